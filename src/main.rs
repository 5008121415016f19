//! Parliament timer: a countdown with an always-on-top clock overlay.
//!
//! The main window sets and runs the countdown; the overlay mirrors it in a
//! large, draggable label. When a running countdown reaches zero the selected
//! clip from the sound folder is played. Preferences (clock font, color and
//! position, volume, selected sound) are stored in an INI file and written
//! back when the main window closes.

mod app_state;
mod callbacks_clock;
mod callbacks_sound;
mod callbacks_timer;
mod data;
mod layout;
mod logging;
mod playback;
mod settings;
mod sound_library;
mod ui;
mod validation;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use fltk::{app, prelude::*};
use tracing::info;

use app_state::{AppState, SharedCallbacks};
use logging::{configure_logging, LogLevel};
use settings::Settings;
use sound_library::SoundLibrary;
use ui::clock::ClockOverlay;
use ui::{theme, tooltips};

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(
    version,
    about = concat!(
        env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"),
        " - Countdown timer with an always-on-top clock and sound alerts.",
    )
)]
struct Cli {
    /// Preferences file.
    #[arg(long, default_value = settings::DEFAULT_FILE_NAME)]
    config: PathBuf,
    /// Folder holding the alert sounds (.wav). Created if missing.
    #[arg(long = "sounds-dir", default_value = sound_library::DEFAULT_DIR_NAME)]
    sounds_dir: PathBuf,
    /// Increase verbosity (-v=debug, -vv=trace). Overrides RUST_LOG.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
    /// Quiet mode: only warnings and errors. Overrides -v and RUST_LOG.
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(LogLevel::from_flags(cli.quiet, cli.verbose));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "starting"
    );

    let settings = Settings::load_or_create(&cli.config);
    let library = SoundLibrary::open(&cli.sounds_dir)
        .with_context(|| format!("Cannot use sound folder {}", cli.sounds_dir.display()))?;
    info!(dir = %library.dir().display(), "sound folder ready");

    let a = app::App::default();
    theme::apply_dark_theme();
    tooltips::configure_tooltips();

    let (mut win, widgets) = layout::build_ui();

    let mut clock = ClockOverlay::new(
        "00:00",
        settings.font,
        settings.color,
        (settings.clock_x, settings.clock_y),
    );

    let state = Rc::new(RefCell::new(AppState::new(settings, cli.config.clone(), library)));

    let shared = SharedCallbacks {
        sync_time: callbacks_timer::make_sync_time(&widgets, &state, &clock),
        refresh_sounds: callbacks_sound::make_refresh_sounds(&widgets, &state),
    };

    callbacks_timer::setup_timer_callbacks(&widgets, &state, &shared);
    callbacks_clock::setup_clock_callbacks(&widgets, &state, &clock);
    callbacks_sound::setup_sound_callbacks(&widgets, &state, &shared);

    // Initial widget values from settings
    {
        let st = state.borrow();
        let mut check_show_clock = widgets.check_show_clock.clone();
        check_show_clock.set_checked(st.settings.clock_visible);
        let mut slider_volume = widgets.slider_volume.clone();
        slider_volume.set_value(st.settings.volume as f64);
        let mut lbl_volume = widgets.lbl_volume.clone();
        lbl_volume.set_label(&format!("Volume: {}%", st.settings.volume));
    }
    (shared.refresh_sounds.borrow_mut())();
    (shared.sync_time.borrow_mut())();

    // Closing the main window ends the program: remember where the clock was,
    // then take the overlay down too so the event loop can finish.
    {
        let state = state.clone();
        let mut clock = clock.clone();
        win.set_callback(move |w| {
            if app::event() != fltk::enums::Event::Close {
                return; // Escape key
            }
            {
                let mut st = state.borrow_mut();
                st.cancel_tick();
                st.audio_player.stop();
                let (x, y) = clock.position();
                st.settings.clock_x = x;
                st.settings.clock_y = y;
            }
            clock.close();
            w.hide();
        });
    }

    win.show();
    if state.borrow().settings.clock_visible {
        clock.set_visible(true);
    }

    a.run().context("Event loop failed")?;

    state.borrow().save_settings();
    info!("settings saved, exiting");
    Ok(())
}
