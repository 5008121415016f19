use fltk::prelude::*;

/// Style the toolkit's tooltips to match the dark theme.
pub fn configure_tooltips() {
    fltk::misc::Tooltip::set_color(fltk::enums::Color::from_hex(0x363646));
    fltk::misc::Tooltip::set_text_color(fltk::enums::Color::from_hex(0xcdd6f4));
    fltk::misc::Tooltip::set_font_size(11);
    fltk::misc::Tooltip::set_delay(0.5);
    fltk::misc::Tooltip::set_margin_width(4);
    fltk::misc::Tooltip::set_margin_height(4);
    fltk::misc::Tooltip::enable(true);
}

/// Helper to set a tooltip on any widget
pub fn set_tooltip<W: WidgetExt>(widget: &mut W, text: &str) {
    widget.set_tooltip(text);
}
