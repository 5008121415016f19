use std::cell::RefCell;
use std::rc::Rc;

use fltk::prelude::*;
use tracing::debug;

use crate::app_state::AppState;
use crate::layout::Widgets;
use crate::ui::clock::ClockOverlay;
use crate::ui::dialogs;

// ═══════════════════════════════════════════════════════════════════════════
//  CLOCK OVERLAY CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════
//
// Dialogs below spin their own event loop, and the countdown keeps ticking
// meanwhile. State must never stay borrowed across a dialog.

pub fn setup_clock_callbacks(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    clock: &ClockOverlay,
) {
    // Show / hide
    {
        let state = state.clone();
        let mut clock = clock.clone();

        let mut check_show_clock = widgets.check_show_clock.clone();
        check_show_clock.set_callback(move |c| {
            let visible = c.is_checked();
            state.borrow_mut().settings.clock_visible = visible;
            clock.set_visible(visible);
        });
    }

    // Font
    {
        let state = state.clone();
        let mut clock = clock.clone();

        let mut btn_font = widgets.btn_font.clone();
        btn_font.set_callback(move |_| {
            let current = state.borrow().settings.font;
            if let Some(font) = dialogs::pick_font(current) {
                debug!(family = font.family.name(), size = font.size, "clock font changed");
                state.borrow_mut().settings.font = font;
                clock.set_font(font);
            }
        });
    }

    // Color
    {
        let state = state.clone();
        let mut clock = clock.clone();

        let mut btn_color = widgets.btn_color.clone();
        btn_color.set_callback(move |_| {
            let current = state.borrow().settings.color;
            if let Some(color) = dialogs::pick_color(current) {
                debug!(color = %color.to_hex(), "clock color changed");
                state.borrow_mut().settings.color = color;
                clock.set_color(color);
            }
        });
    }
}
