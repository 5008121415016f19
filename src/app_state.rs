use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use fltk::app;
use tracing::{debug, info};

use crate::data::{AudioData, Countdown, Tick};
use crate::playback::audio_player::AudioPlayer;
use crate::settings::Settings;
use crate::sound_library::SoundLibrary;

/// Label of the first sound chooser entry.
pub const NO_SOUND: &str = "No sound";

// ─── App State ─────────────────────────────────────────────────────────────────

pub struct AppState {
    pub countdown: Countdown,
    pub settings: Settings,
    pub settings_path: PathBuf,

    pub library: SoundLibrary,
    /// Stems shown in the sound chooser, in chooser order after `NO_SOUND`.
    pub sound_names: Vec<String>,
    pub audio_player: AudioPlayer,

    /// Pending one-second timeout while the countdown runs.
    pub tick_handle: Option<app::TimeoutHandle>,
}

impl AppState {
    pub fn new(settings: Settings, settings_path: PathBuf, library: SoundLibrary) -> Self {
        let mut audio_player = AudioPlayer::new();
        audio_player.set_volume(settings.volume);
        Self {
            countdown: Countdown::new(),
            settings,
            settings_path,
            library,
            sound_names: Vec::new(),
            audio_player,
            tick_handle: None,
        }
    }

    /// Drop the pending tick, if any.
    pub fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            app::remove_timeout3(handle);
        }
    }

    /// Chooser index of the selected sound (0 = no sound).
    pub fn sound_index(&self) -> usize {
        self.sound_names
            .iter()
            .position(|n| *n == self.settings.current_sound)
            .map_or(0, |i| i + 1)
    }

    /// Select by chooser index. Out-of-range selects no sound.
    pub fn select_sound(&mut self, index: usize) {
        self.settings.current_sound = index
            .checked_sub(1)
            .and_then(|i| self.sound_names.get(i))
            .cloned()
            .unwrap_or_default();
    }

    /// Re-read the sound folder. A selection that vanished falls back to no sound.
    pub fn reload_sounds(&mut self) -> anyhow::Result<()> {
        self.sound_names = self.library.list().context("Failed to list sounds")?;
        if !self.settings.current_sound.is_empty() && self.sound_index() == 0 {
            debug!(sound = %self.settings.current_sound, "selected sound no longer present");
            self.settings.current_sound.clear();
        }
        Ok(())
    }

    /// Play the selected alert clip. Returns false when no sound is selected.
    pub fn play_alert(&mut self) -> anyhow::Result<bool> {
        if self.settings.current_sound.is_empty() {
            return Ok(false);
        }
        let path = self.library.path_for(&self.settings.current_sound)?;
        let audio = AudioData::from_wav_file(&path)?;
        self.audio_player.set_volume(self.settings.volume);
        self.audio_player.load_audio(&audio)?;
        self.audio_player.play();
        info!(sound = %self.settings.current_sound, seconds = audio.duration_seconds, "alert playing");
        Ok(true)
    }

    /// Raise the alert if `outcome` is an expiry. `None` when nothing expired,
    /// otherwise the result of `play_alert`.
    pub fn alert_on_expiry(&mut self, outcome: Tick) -> Option<anyhow::Result<bool>> {
        if outcome != Tick::Expired {
            return None;
        }
        info!("countdown expired");
        Some(self.play_alert())
    }

    /// Advance the countdown one second, alerting when it runs out.
    pub fn tick(&mut self) -> (Tick, Option<anyhow::Result<bool>>) {
        let outcome = self.countdown.tick();
        (outcome, self.alert_on_expiry(outcome))
    }

    pub fn save_settings(&self) {
        self.settings.save(&self.settings_path);
    }
}

// ─── Shared callback type ──────────────────────────────────────────────────────

pub type SharedCb = Rc<RefCell<Box<dyn FnMut()>>>;

pub fn shared_cb(f: impl FnMut() + 'static) -> SharedCb {
    Rc::new(RefCell::new(Box::new(f)))
}

pub struct SharedCallbacks {
    /// Push the countdown value to the time field, the clock and the buttons.
    pub sync_time: SharedCb,
    /// Rebuild the sound chooser from the folder.
    pub refresh_sounds: SharedCb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn state_with(names: &[&str]) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        for n in names {
            fs::write(dir.path().join(format!("{n}.wav")), b"RIFF").unwrap();
        }
        let library = SoundLibrary::open(dir.path()).unwrap();
        let st = AppState::new(Settings::default(), dir.path().join("t.ini"), library);
        (dir, st)
    }

    #[test]
    fn sound_selection_maps_chooser_indices() {
        let (_dir, mut st) = state_with(&["bell", "gong"]);
        st.reload_sounds().unwrap();
        assert_eq!(st.sound_index(), 0);

        st.select_sound(2);
        assert_eq!(st.settings.current_sound, "gong");
        assert_eq!(st.sound_index(), 2);

        st.select_sound(0);
        assert_eq!(st.settings.current_sound, "");

        st.select_sound(9);
        assert_eq!(st.sound_index(), 0);
    }

    #[test]
    fn vanished_sound_falls_back_to_none() {
        let (dir, mut st) = state_with(&["bell"]);
        st.settings.current_sound = "bell".to_string();
        st.reload_sounds().unwrap();
        assert_eq!(st.sound_index(), 1);

        fs::remove_file(dir.path().join("bell.wav")).unwrap();
        st.reload_sounds().unwrap();
        assert!(st.settings.current_sound.is_empty());
    }

    #[test]
    fn no_sound_means_no_alert() {
        let (_dir, mut st) = state_with(&[]);
        assert!(!st.play_alert().unwrap());
    }

    #[test]
    fn broken_clip_is_an_error() {
        let (_dir, mut st) = state_with(&["junk"]);
        st.reload_sounds().unwrap();
        st.select_sound(1);
        assert!(st.play_alert().is_err());
    }

    // A selected clip that cannot be decoded makes every alert attempt show
    // up as `Some(Err(..))` without needing an audio device.
    fn running_with_junk_clip(secs: u32) -> (tempfile::TempDir, AppState) {
        let (dir, mut st) = state_with(&["junk"]);
        st.reload_sounds().unwrap();
        st.select_sound(1);
        st.countdown.set_remaining(secs);
        assert!(st.countdown.start());
        (dir, st)
    }

    #[test]
    fn ticking_out_raises_the_alert() {
        let (_dir, mut st) = running_with_junk_clip(2);

        let (outcome, alert) = st.tick();
        assert_eq!(outcome, Tick::Running);
        assert!(alert.is_none());

        let (outcome, alert) = st.tick();
        assert_eq!(outcome, Tick::Expired);
        assert!(matches!(alert, Some(Err(_))));
    }

    #[test]
    fn expiry_without_a_sound_is_silent() {
        let (_dir, mut st) = state_with(&[]);
        st.countdown.set_remaining(1);
        st.countdown.start();
        let (outcome, alert) = st.tick();
        assert_eq!(outcome, Tick::Expired);
        assert!(matches!(alert, Some(Ok(false))));
    }

    #[test]
    fn stopped_countdown_never_alerts() {
        let (_dir, mut st) = running_with_junk_clip(1);
        st.countdown.stop();
        let (outcome, alert) = st.tick();
        assert_eq!(outcome, Tick::Idle);
        assert!(alert.is_none());
        assert_eq!(st.countdown.remaining(), 1);
    }

    #[test]
    fn clearing_while_running_raises_the_alert() {
        let (_dir, mut st) = running_with_junk_clip(90);
        let outcome = st.countdown.clear();
        assert!(matches!(st.alert_on_expiry(outcome), Some(Err(_))));

        let outcome = st.countdown.clear();
        assert!(st.alert_on_expiry(outcome).is_none());
    }

    #[test]
    fn editing_to_zero_while_running_raises_the_alert() {
        let (_dir, mut st) = running_with_junk_clip(90);
        let outcome = st.countdown.set_remaining(0);
        assert!(matches!(st.alert_on_expiry(outcome), Some(Err(_))));
    }
}
