pub mod appearance;
pub mod audio_data;
pub mod countdown;

pub use appearance::{FontFamily, FontSpec, Rgba};
pub use audio_data::AudioData;
pub use countdown::{Countdown, Tick, INCREMENT_MINUTES};
