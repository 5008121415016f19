use std::cell::RefCell;
use std::rc::Rc;

use fltk::prelude::*;
use tracing::{info, warn};

use crate::app_state::{shared_cb, AppState, SharedCallbacks, SharedCb, NO_SOUND};
use crate::layout::Widgets;
use crate::sound_library::SoundLibraryError;
use crate::ui::dialogs;

/// Escape characters the menu parser treats specially ('/' opens a submenu,
/// '&' marks a shortcut, '_' draws a divider, '\' escapes). '|' separates
/// entries and cannot be escaped, so it is shown as '¦'.
pub fn menu_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\\' | '/' | '&' | '_' => {
                out.push('\\');
                out.push(c);
            }
            '|' => out.push('¦'),
            _ => out.push(c),
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════
//  SOUND CHOOSER REFRESH
// ═══════════════════════════════════════════════════════════════════════════

pub fn make_refresh_sounds(widgets: &Widgets, state: &Rc<RefCell<AppState>>) -> SharedCb {
    let state = state.clone();
    let mut sound_choice = widgets.sound_choice.clone();
    let mut btn_remove_sound = widgets.btn_remove_sound.clone();
    let mut status_bar = widgets.status_bar.clone();

    shared_cb(move || {
        let (names, index) = {
            let mut st = state.borrow_mut();
            if let Err(e) = st.reload_sounds() {
                warn!(error = %format!("{e:#}"), "could not read sound folder");
                status_bar.set_label(&format!("Sound folder unreadable: {e}"));
            }
            (st.sound_names.clone(), st.sound_index())
        };

        sound_choice.clear();
        sound_choice.add_choice(NO_SOUND);
        for name in &names {
            sound_choice.add_choice(&menu_label(name));
        }
        sound_choice.set_value(index as i32);

        if index == 0 {
            btn_remove_sound.deactivate();
        } else {
            btn_remove_sound.activate();
        }
    })
}

// ═══════════════════════════════════════════════════════════════════════════
//  SOUND CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════

pub fn setup_sound_callbacks(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    setup_choice_callback(widgets, state);
    setup_add_callback(widgets, state, shared);
    setup_remove_callback(widgets, state, shared);
    setup_volume_callback(widgets, state);
}

// ── Selection ──
fn setup_choice_callback(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let state = state.clone();
    let mut btn_remove_sound = widgets.btn_remove_sound.clone();

    let mut sound_choice = widgets.sound_choice.clone();
    sound_choice.set_callback(move |c| {
        let index = c.value().max(0) as usize;
        state.borrow_mut().select_sound(index);
        if index == 0 {
            btn_remove_sound.deactivate();
        } else {
            btn_remove_sound.activate();
        }
    });
}

// ── Add ──
fn setup_add_callback(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    let state = state.clone();
    let refresh_sounds = shared.refresh_sounds.clone();
    let mut status_bar = widgets.status_bar.clone();

    let mut btn_add_sound = widgets.btn_add_sound.clone();
    btn_add_sound.set_callback(move |_| {
        let Some(source) = dialogs::pick_wav_file() else {
            return;
        };

        let added = state.borrow().library.add(&source);
        match added {
            Ok(stem) => {
                state.borrow_mut().settings.current_sound = stem.clone();
                (refresh_sounds.borrow_mut())();
                status_bar.set_label(&format!("Added \"{stem}\""));
            }
            Err(e) => {
                warn!(error = %e, "could not add sound");
                let message = match e {
                    SoundLibraryError::AlreadyExists(_) => {
                        "A file with this name already exists.".to_string()
                    }
                    other => format!("The file was not copied.\n{other}"),
                };
                dialogs::error(&message);
            }
        }
    });
}

// ── Remove ──
fn setup_remove_callback(
    widgets: &Widgets,
    state: &Rc<RefCell<AppState>>,
    shared: &SharedCallbacks,
) {
    let state = state.clone();
    let refresh_sounds = shared.refresh_sounds.clone();
    let mut status_bar = widgets.status_bar.clone();

    let mut btn_remove_sound = widgets.btn_remove_sound.clone();
    btn_remove_sound.set_callback(move |_| {
        let current = state.borrow().settings.current_sound.clone();
        if current.is_empty() {
            return;
        }
        if !dialogs::confirm("Are you sure you want to delete this sound file?") {
            return;
        }

        let removed = state.borrow().library.remove(&current);
        match removed {
            Ok(()) => {
                info!(sound = %current, "sound removed");
                status_bar.set_label(&format!("Removed \"{current}\""));
            }
            Err(e) => {
                warn!(error = %e, "could not remove sound");
                dialogs::error(&format!("The file was not deleted.\n{e}"));
            }
        }
        (refresh_sounds.borrow_mut())();
    });
}

// ── Volume ──
fn setup_volume_callback(widgets: &Widgets, state: &Rc<RefCell<AppState>>) {
    let state = state.clone();
    let mut lbl_volume = widgets.lbl_volume.clone();

    let mut slider_volume = widgets.slider_volume.clone();
    slider_volume.set_callback(move |s| {
        let volume = s.value().round().clamp(0.0, 100.0) as u8;
        {
            let mut st = state.borrow_mut();
            st.settings.volume = volume;
            st.audio_player.set_volume(volume);
        }
        lbl_volume.set_label(&format!("Volume: {volume}%"));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_unchanged() {
        assert_eq!(menu_label("gong 2"), "gong 2");
    }

    #[test]
    fn special_characters_are_escaped() {
        assert_eq!(menu_label("a/b"), "a\\/b");
        assert_eq!(menu_label("R&B_mix"), "R\\&B\\_mix");
        assert_eq!(menu_label("back\\slash"), "back\\\\slash");
        assert_eq!(menu_label("a|b"), "a¦b");
    }
}
