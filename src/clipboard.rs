/// Clipboard access for the Ctrl/Cmd+V shortcut
pub trait ClipboardSource: Send {
    /// Current clipboard text, if any can be read
    fn read_text(&mut self) -> Option<String>;
}

/// System clipboard through arboard. Opened lazily so a headless host
/// without a clipboard still runs the wizard.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&mut self) -> Option<String> {
        if self.inner.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.inner = Some(clipboard),
                Err(e) => {
                    tracing::warn!(target: "pairing_wizard::clipboard", "Clipboard unavailable: {}", e);
                    return None;
                }
            }
        }

        let clipboard = self.inner.as_mut()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(target: "pairing_wizard::clipboard", "No text on clipboard: {}", e);
                None
            }
        }
    }
}

/// Fixed clipboard contents, for hosts that read the clipboard themselves
#[derive(Debug, Clone, Default)]
pub struct StaticClipboard {
    text: Option<String>,
}

impl StaticClipboard {
    pub fn new(text: Option<String>) -> Self {
        Self { text }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

impl ClipboardSource for StaticClipboard {
    fn read_text(&mut self) -> Option<String> {
        self.text.clone()
    }
}
