use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::data::{FontFamily, FontSpec, Rgba};

pub const DEFAULT_FILE_NAME: &str = "parliament-timer.ini";

/// User preferences, loaded from the INI file or defaults.
/// Every field here is saveable/loadable.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // ── Clock ──
    pub font: FontSpec,
    pub color: Rgba,
    pub clock_x: i32,
    pub clock_y: i32,
    pub clock_visible: bool,

    // ── Sound ──
    pub volume: u8, // 0..=100
    /// File stem of the alert clip. Empty means no sound.
    pub current_sound: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            color: Rgba::BLACK,
            clock_x: 0,
            clock_y: 0,
            clock_visible: true,

            volume: 50,
            current_sound: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from the INI file, or create it with defaults if it doesn't exist.
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => {
                    let mut settings = Self::default();
                    settings.parse_ini(&content);
                    debug!(path = %path.display(), ?settings, "settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read settings, using defaults");
                    Self::default()
                }
            }
        } else {
            info!(path = %path.display(), "no settings file, writing defaults");
            let settings = Self::default();
            settings.save(path);
            settings
        }
    }

    /// Save current settings. Failures are logged, never fatal.
    pub fn save(&self, path: &Path) {
        match fs::write(path, self.to_ini()) {
            Ok(()) => debug!(path = %path.display(), "settings saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not save settings"),
        }
    }

    fn to_ini(&self) -> String {
        let mut s = String::new();
        s.push_str("# Parliament Timer Settings\n");
        s.push_str("# Edit values below. Delete this file to reset to defaults.\n\n");

        s.push_str("[Clock]\n");
        s.push_str("# Fonts: Helvetica, Helvetica Bold, Courier, Courier Bold, Times, Times Bold, Screen, Screen Bold\n");
        s.push_str(&format!("font_family = {}\n", self.font.family.name()));
        s.push_str(&format!("font_size = {}\n", self.font.size));
        s.push_str("# color: #RRGGBBAA\n");
        s.push_str(&format!("color = {}\n", self.color.to_hex()));
        s.push_str(&format!("clock_x = {}\n", self.clock_x));
        s.push_str(&format!("clock_y = {}\n", self.clock_y));
        s.push_str(&format!("clock_visible = {}\n", self.clock_visible));
        s.push('\n');

        s.push_str("[Sound]\n");
        s.push_str("# volume: 0-100\n");
        s.push_str(&format!("volume = {}\n", self.volume));
        s.push_str("# current_sound: file name without .wav, empty for no sound\n");
        s.push_str(&format!("current_sound = {}\n", self.current_sound));

        s
    }

    fn parse_ini(&mut self, content: &str) {
        let map = parse_ini_to_map(content);

        // Clock
        let mut family = self.font.family;
        let mut size = self.font.size;
        if let Some(v) = map.get("font_family") {
            if let Some(f) = FontFamily::from_name(v) {
                family = f;
            }
        }
        if let Some(v) = map.get("font_size") {
            if let Ok(n) = v.parse() {
                size = n;
            }
        }
        self.font = FontSpec::new(family, size);
        if let Some(v) = map.get("color") {
            if let Some(c) = Rgba::from_hex(v) {
                self.color = c;
            }
        }
        if let Some(v) = map.get("clock_x") {
            if let Ok(n) = v.parse() {
                self.clock_x = n;
            }
        }
        if let Some(v) = map.get("clock_y") {
            if let Ok(n) = v.parse() {
                self.clock_y = n;
            }
        }
        if let Some(v) = map.get("clock_visible") {
            if let Ok(b) = v.parse::<bool>() {
                self.clock_visible = b;
            }
        }

        // Sound
        if let Some(v) = map.get("volume") {
            if let Ok(n) = v.parse::<u8>() {
                self.volume = n.min(100);
            }
        }
        if let Some(v) = map.get("current_sound") {
            self.current_sound = v.clone();
        }
    }
}

/// Parse INI content into a flat key-value map (section headers are ignored,
/// keys are globally unique in our format).
fn parse_ini_to_map(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            map.insert(key.trim().to_string(), val.trim().to_string());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_text_parses_back() {
        let mut original = Settings::default();
        original.font = FontSpec::new(FontFamily::CourierBold, 72);
        original.color = Rgba::new(200, 10, 20, 128);
        original.clock_x = -15;
        original.clock_y = 300;
        original.clock_visible = false;
        original.volume = 85;
        original.current_sound = "gong".to_string();

        let mut restored = Settings::default();
        restored.parse_ini(&original.to_ini());
        assert_eq!(restored, original);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let ini = "[Clock]
font_family = Wingdings
font_size = huge
color = purple
clock_x = 12
clock_visible = yes
[Sound]
volume = 250
unknown_key = 1
";
        let mut restored = Settings::default();
        restored.parse_ini(ini);

        assert_eq!(restored.font, FontSpec::default());
        assert_eq!(restored.color, Rgba::BLACK);
        assert_eq!(restored.clock_x, 12);
        assert!(restored.clock_visible);
        assert_eq!(restored.volume, 50);
    }

    #[test]
    fn oversized_font_is_clamped() {
        let mut restored = Settings::default();
        restored.parse_ini("font_size = 5000\n");
        assert_eq!(restored.font.size, crate::data::appearance::MAX_FONT_SIZE);
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);

        let settings = Settings::load_or_create(&path);
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.ini");

        let mut settings = Settings::default();
        settings.volume = 0;
        settings.current_sound = "bell".to_string();
        settings.save(&path);

        assert_eq!(Settings::load_or_create(&path), settings);
    }
}
