pub mod clock;
pub mod dialogs;
pub mod theme;
pub mod tooltips;
