/// Keys the wizard distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Backspace,
    /// Ctrl
    Control,
    /// Cmd on macOS
    Meta,
    Other,
}

/// What currently holds keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    /// A free-text input such as the printer name field
    TextField,
}

/// Raw events delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Text from a paste event
    Paste(String),
    FocusChanged(Focus),
}

/// Input the code buffer acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeInput {
    Digit(char),
    Backspace,
    Paste(String),
    /// Ctrl/Cmd+V: the text has to be read from the clipboard
    PasteShortcut,
}

/// Filters raw host events down to what the code buffer should see.
///
/// Keeps track of the Ctrl/Cmd modifier and of text-field focus. Lets through
/// digit and backspace keys and pastes (bulk or Ctrl/Cmd+V) on the code entry
/// step, and nothing while a text field has focus.
#[derive(Debug, Default)]
pub struct InputRouter {
    modifier_down: bool,
    focus: Focus,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifier_down(&self) -> bool {
        self.modifier_down
    }

    /// Filter one event. `code_step_active` is whether the wizard is on the
    /// code entry step.
    pub fn route(&mut self, event: InputEvent, code_step_active: bool) -> Option<CodeInput> {
        let routed = match event {
            InputEvent::FocusChanged(focus) => {
                self.focus = focus;
                return None;
            }
            InputEvent::KeyDown(Key::Control | Key::Meta) => {
                self.modifier_down = true;
                return None;
            }
            InputEvent::KeyUp(Key::Control | Key::Meta) => {
                self.modifier_down = false;
                return None;
            }
            InputEvent::KeyUp(_) => return None,
            InputEvent::KeyDown(Key::Character(c)) if c.is_ascii_digit() => CodeInput::Digit(c),
            InputEvent::KeyDown(Key::Character('v' | 'V')) if self.modifier_down => {
                CodeInput::PasteShortcut
            }
            InputEvent::KeyDown(Key::Backspace) => CodeInput::Backspace,
            InputEvent::KeyDown(_) => return None,
            InputEvent::Paste(text) => CodeInput::Paste(text),
        };

        if self.focus == Focus::TextField {
            tracing::debug!(target: "pairing_wizard::input", "Text field focused, ignoring {:?}", routed);
            return None;
        }
        if !code_step_active {
            return None;
        }
        Some(routed)
    }
}
