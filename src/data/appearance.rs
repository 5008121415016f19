/// Font families offered for the clock overlay.
///
/// These map onto the toolkit's built-in faces, so they render the same on
/// every platform without loading system fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
    Times,
    TimesBold,
    Screen,
    ScreenBold,
}

impl FontFamily {
    pub const ALL: [FontFamily; 8] = [
        FontFamily::Helvetica,
        FontFamily::HelveticaBold,
        FontFamily::Courier,
        FontFamily::CourierBold,
        FontFamily::Times,
        FontFamily::TimesBold,
        FontFamily::Screen,
        FontFamily::ScreenBold,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::HelveticaBold => "Helvetica Bold",
            FontFamily::Courier => "Courier",
            FontFamily::CourierBold => "Courier Bold",
            FontFamily::Times => "Times",
            FontFamily::TimesBold => "Times Bold",
            FontFamily::Screen => "Screen",
            FontFamily::ScreenBold => "Screen Bold",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn from_index(idx: usize) -> Self {
        Self::ALL.get(idx).copied().unwrap_or_default()
    }
}

pub const MIN_FONT_SIZE: i32 = 8;
pub const MAX_FONT_SIZE: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size: i32,
}

impl FontSpec {
    pub fn new(family: FontFamily, size: i32) -> Self {
        Self {
            family,
            size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(FontFamily::Helvetica, 30)
    }
}

/// Text color with opacity. Stored as `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Parse `#RRGGBBAA` or `#RRGGBB` (opaque). The `#` is optional.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        match s.len() {
            6 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Opaque color that looks like this one drawn over `background`.
    pub fn blend_over(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a as u32;
        let mix = |fg: u8, bg: u8| ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8;
        (
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_family_names_roundtrip() {
        for f in FontFamily::ALL {
            assert_eq!(FontFamily::from_name(f.name()), Some(f));
            assert_eq!(FontFamily::from_index(f.index()), f);
        }
        assert_eq!(FontFamily::from_name("courier bold"), Some(FontFamily::CourierBold));
        assert_eq!(FontFamily::from_name("Comic Sans"), None);
        assert_eq!(FontFamily::from_index(99), FontFamily::Helvetica);
    }

    #[test]
    fn font_size_is_clamped() {
        assert_eq!(FontSpec::new(FontFamily::Times, 2).size, MIN_FONT_SIZE);
        assert_eq!(FontSpec::new(FontFamily::Times, 1000).size, MAX_FONT_SIZE);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgba::from_hex("#ff8000cc"), Some(Rgba::new(255, 128, 0, 204)));
        assert_eq!(Rgba::from_hex("102030"), Some(Rgba::new(16, 32, 48, 255)));
        assert_eq!(Rgba::new(1, 2, 3, 4).to_hex(), "#01020304");
        assert_eq!(Rgba::from_hex("#12345"), None);
        assert_eq!(Rgba::from_hex("#gg0000ff"), None);
    }

    #[test]
    fn blending_respects_alpha() {
        let bg = (255, 255, 255);
        assert_eq!(Rgba::BLACK.blend_over(bg), (0, 0, 0));
        assert_eq!(Rgba::new(0, 0, 0, 0).blend_over(bg), bg);
        assert_eq!(Rgba::new(0, 0, 0, 128).blend_over(bg), (127, 127, 127));
    }
}
