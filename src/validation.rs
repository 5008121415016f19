use fltk::{enums::Event, input::Input, prelude::*};

const MAX_TIME_CHARS: usize = 5; // "mm:ss"

// ─── Time Field Filtering ────────────────────────────────────────────────────
//
// Filter-based validation using handle() instead of set_callback(): the
// callback slot is taken by the commit handler. After every event that can
// change the text, strip anything that cannot be part of "mm:ss" and put
// the cursor back where it was.

/// Keep digits and the first ':' only, at most five characters.
pub fn sanitize_time_input(text: &str) -> String {
    let mut seen_colon = false;
    text.chars()
        .filter(|&c| {
            if c == ':' {
                let keep = !seen_colon;
                seen_colon = true;
                keep
            } else {
                c.is_ascii_digit()
            }
        })
        .take(MAX_TIME_CHARS)
        .collect()
}

/// Attach filtering plus commit-on-unfocus to the time field.
pub fn attach_time_validation(input: &mut Input) {
    input.handle(move |field, ev| {
        match ev {
            Event::KeyUp | Event::Paste | Event::Shortcut => {
                let current = field.value();
                let clean = sanitize_time_input(&current);
                if clean != current {
                    let restore = field.position().saturating_sub(1).min(clean.len() as i32);
                    field.set_value(&clean);
                    field.set_position(restore).ok();
                }
            }
            Event::Unfocus => field.do_callback(),
            _ => {}
        }
        false
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_well_formed_text() {
        assert_eq!(sanitize_time_input("05:30"), "05:30");
        assert_eq!(sanitize_time_input("7"), "7");
        assert_eq!(sanitize_time_input(""), "");
    }

    #[test]
    fn strips_foreign_characters() {
        assert_eq!(sanitize_time_input("0a5:3 0"), "05:30");
        assert_eq!(sanitize_time_input("-12"), "12");
    }

    #[test]
    fn only_first_colon_survives() {
        assert_eq!(sanitize_time_input("1:2:3"), "1:23");
    }

    #[test]
    fn caps_length() {
        assert_eq!(sanitize_time_input("123456789"), "12345");
    }
}
