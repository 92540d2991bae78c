use regex::Regex;
use std::sync::OnceLock;

pub const CODE_LENGTH: usize = 6;

/// Visual marker of one code cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Empty,
    /// The cursor cell, where the next digit lands
    Active,
    Filled(char),
}

impl Slot {
    pub fn digit(&self) -> Option<char> {
        match self {
            Slot::Filled(d) => Some(*d),
            _ => None,
        }
    }
}

/// What a buffer mutation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeChange {
    /// The buffer transitioned into the full state with this mutation
    pub completed: bool,
}

fn six_digits() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]{6}").expect("static pattern"))
}

/// Six-cell security code buffer
#[derive(Debug, Clone)]
pub struct CodeBuffer {
    slots: [Slot; CODE_LENGTH],
}

impl CodeBuffer {
    /// Empty buffer with the cursor in the first cell
    pub fn new() -> Self {
        let mut slots = [Slot::Empty; CODE_LENGTH];
        slots[0] = Slot::Active;
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.digit().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_complete(&self) -> bool {
        self.len() == CODE_LENGTH
    }

    pub fn code(&self) -> String {
        self.slots.iter().filter_map(Slot::digit).collect()
    }

    pub fn slots(&self) -> &[Slot; CODE_LENGTH] {
        &self.slots
    }

    /// Index of the cursor cell, None when full
    pub fn active_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| *s == Slot::Active)
    }

    /// Append a digit to the first empty cell. No-op when full or `digit`
    /// is not 0-9.
    pub fn push_digit(&mut self, digit: char) -> CodeChange {
        if !digit.is_ascii_digit() {
            return CodeChange { completed: false };
        }
        let Some(index) = self.slots.iter().position(|s| s.digit().is_none()) else {
            return CodeChange { completed: false };
        };

        self.slots[index] = Slot::Filled(digit);
        if index + 1 < CODE_LENGTH {
            self.slots[index + 1] = Slot::Active;
        }

        CodeChange {
            completed: index + 1 == CODE_LENGTH,
        }
    }

    /// Clear the last filled cell, which becomes the cursor
    pub fn backspace(&mut self) -> CodeChange {
        if let Some(index) = self.slots.iter().rposition(|s| s.digit().is_some()) {
            self.slots[index] = Slot::Active;
            for slot in &mut self.slots[index + 1..] {
                *slot = Slot::Empty;
            }
        }
        CodeChange { completed: false }
    }

    /// Replace the whole buffer with the first run of six digits in `text`.
    ///
    /// Returns None, leaving the buffer untouched, if there is no such run.
    pub fn apply_paste(&mut self, text: &str) -> Option<CodeChange> {
        let found = six_digits().find(text)?;

        for (slot, digit) in self.slots.iter_mut().zip(found.as_str().chars()) {
            *slot = Slot::Filled(digit);
        }

        // The buffer is refilled from empty, so a paste always completes it
        Some(CodeChange { completed: true })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for CodeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(digits: &str) -> CodeBuffer {
        let mut buffer = CodeBuffer::new();
        for d in digits.chars() {
            buffer.push_digit(d);
        }
        buffer
    }

    #[test]
    fn test_new_buffer() {
        let buffer = CodeBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.active_slot(), Some(0));
        assert_eq!(buffer.code(), "");
    }

    #[test]
    fn test_push_moves_cursor() {
        let mut buffer = CodeBuffer::new();
        let change = buffer.push_digit('4');

        assert!(!change.completed);
        assert_eq!(buffer.code(), "4");
        assert_eq!(buffer.slots()[0], Slot::Filled('4'));
        assert_eq!(buffer.active_slot(), Some(1));
    }

    #[test]
    fn test_completion_fires_on_sixth_digit_only() {
        let mut buffer = CodeBuffer::new();
        let completions: Vec<bool> = "1234567"
            .chars()
            .map(|d| buffer.push_digit(d).completed)
            .collect();

        assert_eq!(completions, vec![false, false, false, false, false, true, false]);
        assert_eq!(buffer.code(), "123456");
        assert_eq!(buffer.active_slot(), None);
    }

    #[test]
    fn test_length_never_exceeds_six() {
        let buffer = typed("98765432101234");
        assert_eq!(buffer.len(), CODE_LENGTH);
        assert_eq!(buffer.code(), "987654");
    }

    #[test]
    fn test_non_digit_ignored() {
        let mut buffer = CodeBuffer::new();
        buffer.push_digit('a');
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace_from_full() {
        let mut buffer = typed("123456");
        buffer.backspace();

        assert_eq!(buffer.code(), "12345");
        assert_eq!(buffer.active_slot(), Some(5));
    }

    #[test]
    fn test_backspace_clears_later_cursor() {
        let mut buffer = typed("12");
        buffer.backspace();

        assert_eq!(buffer.code(), "1");
        assert_eq!(
            buffer.slots(),
            &[
                Slot::Filled('1'),
                Slot::Active,
                Slot::Empty,
                Slot::Empty,
                Slot::Empty,
                Slot::Empty
            ]
        );
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut buffer = CodeBuffer::new();
        buffer.backspace();
        assert!(buffer.is_empty());
        assert_eq!(buffer.active_slot(), Some(0));
    }

    #[test]
    fn test_length_tracks_digits_minus_backspaces() {
        let mut buffer = CodeBuffer::new();
        buffer.push_digit('1');
        buffer.push_digit('2');
        buffer.backspace();
        buffer.backspace();
        buffer.backspace();
        buffer.push_digit('3');
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.code(), "3");
    }

    #[test]
    fn test_retyping_after_backspace_completes_again() {
        let mut buffer = typed("123456");
        buffer.backspace();
        assert!(buffer.push_digit('9').completed);
        assert_eq!(buffer.code(), "123459");
    }

    #[test]
    fn test_paste_takes_first_six_digit_run() {
        let mut buffer = typed("12");
        let change = buffer.apply_paste("code: 445566 abc");

        assert_eq!(change, Some(CodeChange { completed: true }));
        assert_eq!(buffer.code(), "445566");
        assert_eq!(buffer.active_slot(), None);
    }

    #[test]
    fn test_paste_inside_longer_run() {
        let mut buffer = CodeBuffer::new();
        buffer.apply_paste("1234567890 123456 end");
        assert_eq!(buffer.code(), "123456");
    }

    #[test]
    fn test_paste_without_run_leaves_buffer() {
        let mut buffer = typed("12");
        assert_eq!(buffer.apply_paste("12 34 56"), None);
        assert_eq!(buffer.apply_paste("abc12345"), None);
        assert_eq!(buffer.code(), "12");
        assert_eq!(buffer.active_slot(), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut buffer = typed("1234");
        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.active_slot(), Some(0));
    }
}
