/// Largest value the timer can show: 59:59.
pub const MAX_SECONDS: u32 = 59 * 60 + 59;

pub const INCREMENT_COUNT: usize = 6;

/// Minutes added by each increment button, left to right.
pub const INCREMENT_MINUTES: [u32; INCREMENT_COUNT] = [1, 3, 5, 10, 20, 30];

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Countdown is not running; nothing changed.
    Idle,
    /// One second was taken off and time is left.
    Running,
    /// A running countdown reached zero. Counting has stopped.
    Expired,
}

/// Which controls may be pressed for the current time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStates {
    pub start: bool,
    pub stop: bool,
    pub clear: bool,
    pub increments: [bool; INCREMENT_COUNT],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin counting down. Refused when there is no time left.
    pub fn start(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.running = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Reset to 00:00. Clearing a running countdown counts as expiry.
    pub fn clear(&mut self) -> Tick {
        self.set_remaining(0)
    }

    /// Add time, saturating at 59:59.
    pub fn add_seconds(&mut self, secs: u32) {
        self.remaining = self.remaining.saturating_add(secs).min(MAX_SECONDS);
    }

    /// Direct edit of the time value. A running countdown edited down to
    /// zero stops and reports `Tick::Expired`, same as running out.
    pub fn set_remaining(&mut self, secs: u32) -> Tick {
        self.remaining = secs.min(MAX_SECONDS);
        match (self.running, self.remaining) {
            (false, _) => Tick::Idle,
            (true, 0) => {
                self.running = false;
                Tick::Expired
            }
            (true, _) => Tick::Running,
        }
    }

    /// Advance one second.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Running
        }
    }

    pub fn button_states(&self) -> ButtonStates {
        let (start, stop, clear) = if self.remaining == 0 {
            (false, false, false)
        } else if self.running {
            (false, true, true)
        } else {
            (true, false, true)
        };

        let headroom = MAX_SECONDS - self.remaining;
        let mut increments = [false; INCREMENT_COUNT];
        for (enabled, minutes) in increments.iter_mut().zip(INCREMENT_MINUTES) {
            *enabled = headroom >= minutes * 60;
        }

        ButtonStates {
            start,
            stop,
            clear,
            increments,
        }
    }

    pub fn display(&self) -> String {
        format_mm_ss(self.remaining)
    }
}

/// Format seconds as zero-padded `mm:ss`.
pub fn format_mm_ss(secs: u32) -> String {
    let secs = secs.min(MAX_SECONDS);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Parse what the user typed into the time field.
///
/// Accepts `m:ss` / `mm:ss` with minutes and seconds in 0..=59, or a bare
/// number of minutes (`"5"` is five minutes).
pub fn parse_mm_ss(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let all_digits = |s: &str| !s.is_empty() && s.len() <= 2 && s.chars().all(|c| c.is_ascii_digit());

    match text.split_once(':') {
        Some((mins, secs)) => {
            if !all_digits(mins) || !all_digits(secs) || secs.len() != 2 {
                return None;
            }
            let mins: u32 = mins.parse().ok()?;
            let secs: u32 = secs.parse().ok()?;
            if mins > 59 || secs > 59 {
                return None;
            }
            Some(mins * 60 + secs)
        }
        None => {
            if !all_digits(text) {
                return None;
            }
            let mins: u32 = text.parse().ok()?;
            (mins <= 59).then_some(mins * 60)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u32) -> Countdown {
        let mut c = Countdown::new();
        c.set_remaining(secs);
        c
    }

    #[test]
    fn tick_counts_down_and_expires_once() {
        let mut c = at(2);
        assert!(c.start());
        assert_eq!(c.tick(), Tick::Running);
        assert_eq!(c.remaining(), 1);
        assert_eq!(c.tick(), Tick::Expired);
        assert_eq!(c.remaining(), 0);
        assert!(!c.is_running());
        assert_eq!(c.tick(), Tick::Idle);
    }

    #[test]
    fn start_refused_at_zero() {
        let mut c = Countdown::new();
        assert!(!c.start());
        assert!(!c.is_running());
    }

    #[test]
    fn stopped_timer_does_not_tick() {
        let mut c = at(10);
        c.start();
        c.stop();
        assert_eq!(c.tick(), Tick::Idle);
        assert_eq!(c.remaining(), 10);
    }

    #[test]
    fn add_saturates_at_max() {
        let mut c = at(58 * 60);
        c.add_seconds(5 * 60);
        assert_eq!(c.remaining(), MAX_SECONDS);
        assert_eq!(c.display(), "59:59");
    }

    #[test]
    fn clearing_a_running_countdown_expires_it() {
        let mut c = at(90);
        c.start();
        assert_eq!(c.clear(), Tick::Expired);
        assert_eq!(c.remaining(), 0);
        assert!(!c.is_running());
        assert_eq!(c.tick(), Tick::Idle);
    }

    #[test]
    fn clearing_a_stopped_countdown_is_silent() {
        let mut c = at(90);
        assert_eq!(c.clear(), Tick::Idle);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn editing_to_zero_while_running_expires() {
        let mut c = at(90);
        c.start();
        assert_eq!(c.set_remaining(0), Tick::Expired);
        assert!(!c.is_running());
    }

    #[test]
    fn editing_while_running_keeps_counting() {
        let mut c = at(90);
        c.start();
        assert_eq!(c.set_remaining(30), Tick::Running);
        assert!(c.is_running());
        assert_eq!(c.tick(), Tick::Running);
        assert_eq!(c.remaining(), 29);
    }

    #[test]
    fn transport_buttons_follow_state() {
        let zero = Countdown::new().button_states();
        assert!(!zero.start && !zero.stop && !zero.clear);

        let mut c = at(30);
        let idle = c.button_states();
        assert!(idle.start && !idle.stop && idle.clear);

        c.start();
        let running = c.button_states();
        assert!(!running.start && running.stop && running.clear);
    }

    #[test]
    fn increment_buttons_disable_near_the_top() {
        assert_eq!(Countdown::new().button_states().increments, [true; 6]);

        // 30:00 leaves 29:59 of headroom, so +30 is off but +20 is on.
        let s = at(30 * 60).button_states();
        assert_eq!(s.increments, [true, true, true, true, true, false]);

        // 29:59 leaves exactly 30:00.
        assert!(at(29 * 60 + 59).button_states().increments[5]);

        // 58:59 leaves exactly one minute.
        let s = at(58 * 60 + 59).button_states();
        assert_eq!(s.increments, [true, false, false, false, false, false]);

        assert_eq!(at(MAX_SECONDS).button_states().increments, [false; 6]);
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(65), "01:05");
        assert_eq!(format_mm_ss(10_000), "59:59");
    }

    #[test]
    fn parses_user_time() {
        assert_eq!(parse_mm_ss("05:30"), Some(330));
        assert_eq!(parse_mm_ss("5:30"), Some(330));
        assert_eq!(parse_mm_ss(" 7 "), Some(420));
        assert_eq!(parse_mm_ss("59:59"), Some(MAX_SECONDS));
        assert_eq!(parse_mm_ss("60:00"), None);
        assert_eq!(parse_mm_ss("1:60"), None);
        assert_eq!(parse_mm_ss("1:5"), None);
        assert_eq!(parse_mm_ss("a:bc"), None);
        assert_eq!(parse_mm_ss(""), None);
        assert_eq!(parse_mm_ss("-1"), None);
    }
}
