use std::cell::RefCell;
use std::rc::Rc;

use fltk::{app, prelude::*};
use tracing::{debug, info, warn};

use crate::app_state::{shared_cb, AppState, SharedCallbacks, SharedCb};
use crate::data::countdown::parse_mm_ss;
use crate::data::{Tick, INCREMENT_MINUTES};
use crate::layout::Widgets;
use crate::ui::clock::ClockOverlay;

const TICK_SECONDS: f64 = 1.0;

// ═══════════════════════════════════════════════════════════════════════════
//  TIME DISPLAY SYNC
// ═══════════════════════════════════════════════════════════════════════════

/// Builds the callback that mirrors the countdown onto every widget showing it.
pub fn make_sync_time(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    clock: &ClockOverlay,
) -> SharedCb {
    let state = state.clone();
    let mut clock = clock.clone();
    let mut input_time = widgets.input_time.clone();
    let mut btn_start = widgets.btn_start.clone();
    let mut btn_stop = widgets.btn_stop.clone();
    let mut btn_clear = widgets.btn_clear.clone();
    let mut btn_increments = widgets.btn_increments.clone();

    shared_cb(move || {
        let (text, buttons) = {
            let st = state.borrow();
            (st.countdown.display(), st.countdown.button_states())
        };

        if should_refresh_field(&input_time.value(), &text, input_time.has_focus()) {
            input_time.set_value(&text);
        }
        clock.set_text(&text);

        set_active(&mut btn_start, buttons.start);
        set_active(&mut btn_stop, buttons.stop);
        set_active(&mut btn_clear, buttons.clear);
        for (btn, enabled) in btn_increments.iter_mut().zip(buttons.increments) {
            set_active(btn, enabled);
        }
    })
}

/// Whether a refresh may overwrite the time field. Text being typed is left alone.
fn should_refresh_field(shown: &str, text: &str, editing: bool) -> bool {
    !editing && shown != text
}

fn set_active<W: WidgetExt>(w: &mut W, active: bool) {
    if active {
        w.activate();
    } else {
        w.deactivate();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  TIMER CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════

pub fn setup_timer_callbacks(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    setup_start_callback(widgets, state, shared);
    setup_stop_callback(widgets, state, shared);
    setup_clear_callback(widgets, state, shared);
    setup_increment_callbacks(widgets, state, shared);
    setup_time_input_callback(widgets, state, shared);
}

/// Show the outcome of an alert on the status bar. `idle` is used when
/// nothing expired.
fn report_alert(
    alert: Option<anyhow::Result<bool>>,
    status_bar: &mut fltk::frame::Frame,
    idle: &str,
) {
    match alert {
        None => status_bar.set_label(idle),
        Some(Ok(true)) => status_bar.set_label("Time is up"),
        Some(Ok(false)) => status_bar.set_label("Time is up (no sound)"),
        Some(Err(e)) => {
            warn!(error = %format!("{e:#}"), "alert playback failed");
            status_bar.set_label(&format!("Time is up, sound failed: {e}"));
        }
    }
}

/// One second elapsed. Re-arms itself while the countdown keeps running.
fn on_tick(
    handle: app::TimeoutHandle,
    state: &Rc<RefCell<AppState>>,
    sync_time: &SharedCb,
    status_bar: &mut fltk::frame::Frame,
) {
    let (outcome, alert) = {
        let mut st = state.borrow_mut();
        let (outcome, alert) = st.tick();
        if outcome == Tick::Running {
            app::repeat_timeout3(TICK_SECONDS, handle);
        } else {
            st.tick_handle = None;
        }
        (outcome, alert)
    };

    (sync_time.borrow_mut())();

    if outcome == Tick::Expired {
        report_alert(alert, status_bar, "Ready");
    }
}

// ── Start ──
fn setup_start_callback(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    let state = state.clone();
    let sync_time = shared.sync_time.clone();
    let mut status_bar = widgets.status_bar.clone();

    let mut btn_start = widgets.btn_start.clone();
    btn_start.set_callback(move |_| {
        {
            let mut st = state.borrow_mut();
            if !st.countdown.start() || st.tick_handle.is_some() {
                return;
            }
            st.audio_player.stop();

            let tick_state = state.clone();
            let tick_sync = sync_time.clone();
            let mut tick_status = status_bar.clone();
            st.tick_handle = Some(app::add_timeout3(TICK_SECONDS, move |h| {
                on_tick(h, &tick_state, &tick_sync, &mut tick_status);
            }));
            info!(remaining = st.countdown.remaining(), "countdown started");
        }
        status_bar.set_label("Running");
        (sync_time.borrow_mut())();
    });
}

// ── Stop ──
fn setup_stop_callback(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    let state = state.clone();
    let sync_time = shared.sync_time.clone();
    let mut status_bar = widgets.status_bar.clone();

    let mut btn_stop = widgets.btn_stop.clone();
    btn_stop.set_callback(move |_| {
        {
            let mut st = state.borrow_mut();
            st.countdown.stop();
            st.cancel_tick();
            info!(remaining = st.countdown.remaining(), "countdown stopped");
        }
        status_bar.set_label("Stopped");
        (sync_time.borrow_mut())();
    });
}

// ── Clear ──
fn setup_clear_callback(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    let state = state.clone();
    let sync_time = shared.sync_time.clone();
    let mut status_bar = widgets.status_bar.clone();

    let mut btn_clear = widgets.btn_clear.clone();
    btn_clear.set_callback(move |_| {
        let alert = {
            let mut st = state.borrow_mut();
            st.cancel_tick();
            st.audio_player.stop();
            let outcome = st.countdown.clear();
            st.alert_on_expiry(outcome)
        };
        debug!("countdown cleared");
        (sync_time.borrow_mut())();
        report_alert(alert, &mut status_bar, "Ready");
    });
}

// ── +N minutes ──
fn setup_increment_callbacks(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    for (btn, minutes) in widgets.btn_increments.iter().zip(INCREMENT_MINUTES) {
        let state = state.clone();
        let sync_time = shared.sync_time.clone();

        let mut btn = btn.clone();
        btn.set_callback(move |_| {
            state.borrow_mut().countdown.add_seconds(minutes * 60);
            (sync_time.borrow_mut())();
        });
    }
}

// ── Typed time ──
fn setup_time_input_callback(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    let state = state.clone();
    let sync_time = shared.sync_time.clone();
    let mut status_bar = widgets.status_bar.clone();

    let mut input_time = widgets.input_time.clone();
    input_time.set_callback(move |field| {
        let alert = parse_mm_ss(&field.value()).and_then(|secs| {
            debug!(secs, "time entered");
            let mut st = state.borrow_mut();
            let outcome = st.countdown.set_remaining(secs);
            if !st.countdown.is_running() {
                st.cancel_tick();
            }
            st.alert_on_expiry(outcome)
        });

        (sync_time.borrow_mut())();
        // The field still has focus here, so sync left it alone. Invalid text
        // is replaced by the current value.
        let text = state.borrow().countdown.display();
        if field.value() != text {
            field.set_value(&text);
        }

        if alert.is_some() {
            report_alert(alert, &mut status_bar, "Ready");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_is_refreshed_when_not_editing() {
        assert!(should_refresh_field("01:30", "01:29", false));
        assert!(!should_refresh_field("01:29", "01:29", false));
    }

    #[test]
    fn typed_text_survives_a_tick() {
        assert!(!should_refresh_field("05:", "01:29", true));
    }
}
