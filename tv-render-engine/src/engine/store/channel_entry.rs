use constants::timing::{CHANNEL_ENTRY_MAX_DIGITS, CHANNEL_ENTRY_TIMEOUT_SECS};

/// Result of pushing one digit into a channel entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Digit accepted, waiting for more input or the idle timeout.
    Pending,
    /// Entry completed and must be tuned now.
    Commit(u32),
    /// Digit rejected (not 0-9, or the entry is full).
    Ignored,
}

/// Progressive remote-control style channel number entry.
///
/// Up to three digits accumulate. The third digit commits immediately,
/// otherwise the number commits once no digit arrived for the idle timeout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelEntry {
    digits: String,
    deadline: Option<f64>,
}

impl ChannelEntry {
    pub fn push_digit(&mut self, digit: u8, now: f64) -> EntryOutcome {
        if digit > 9 || self.digits.len() >= CHANNEL_ENTRY_MAX_DIGITS {
            return EntryOutcome::Ignored;
        }

        self.digits.push(char::from(b'0' + digit));

        if self.digits.len() == CHANNEL_ENTRY_MAX_DIGITS {
            self.deadline = None;
            return EntryOutcome::Commit(self.take_number());
        }

        self.deadline = Some(now + CHANNEL_ENTRY_TIMEOUT_SECS);
        EntryOutcome::Pending
    }

    /// Commit the pending number once its idle timeout elapsed.
    pub fn poll(&mut self, now: f64) -> Option<u32> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        if self.digits.is_empty() {
            return None;
        }
        Some(self.take_number())
    }

    /// Digits typed so far, empty when no entry is in progress.
    pub fn in_progress(&self) -> &str {
        &self.digits
    }

    pub fn clear(&mut self) {
        self.digits.clear();
        self.deadline = None;
    }

    // Leading zeros vanish in the numeric parse ("07" tunes channel 7).
    fn take_number(&mut self) -> u32 {
        let number = self.digits.parse().unwrap_or(0);
        self.digits.clear();
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_digits_commit_after_idle_timeout() {
        let mut entry = ChannelEntry::default();
        assert_eq!(entry.push_digit(0, 10.0), EntryOutcome::Pending);
        assert_eq!(entry.push_digit(7, 10.5), EntryOutcome::Pending);
        assert_eq!(entry.in_progress(), "07");

        assert_eq!(entry.poll(12.4), None);
        assert_eq!(entry.poll(12.5), Some(7));
        assert_eq!(entry.in_progress(), "");
        assert_eq!(entry.poll(20.0), None);
    }

    #[test]
    fn third_digit_commits_without_waiting() {
        let mut entry = ChannelEntry::default();
        entry.push_digit(1, 0.0);
        entry.push_digit(2, 0.1);
        assert_eq!(entry.push_digit(3, 0.2), EntryOutcome::Commit(123));
        assert_eq!(entry.poll(5.0), None);
    }

    #[test]
    fn each_digit_restarts_the_timer() {
        let mut entry = ChannelEntry::default();
        entry.push_digit(4, 0.0);
        entry.push_digit(2, 1.9);
        assert_eq!(entry.poll(2.1), None);
        assert_eq!(entry.poll(3.9), Some(42));
    }

    #[test]
    fn invalid_digits_are_ignored() {
        let mut entry = ChannelEntry::default();
        assert_eq!(entry.push_digit(12, 0.0), EntryOutcome::Ignored);
        assert_eq!(entry.in_progress(), "");
    }
}
