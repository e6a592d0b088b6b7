use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub keys: Vec<(KeyCode, KeyModifiers)>,
    pub description: String,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, description: &str) -> Self {
        Self {
            keys: vec![(key, modifiers)],
            description: description.to_string(),
        }
    }

    /// Also trigger on `key` with `modifiers`
    pub fn or(mut self, key: KeyCode, modifiers: KeyModifiers) -> Self {
        self.keys.push((key, modifiers));
        self
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys
            .iter()
            .any(|(key, modifiers)| *key == event.code && *modifiers == event.modifiers)
    }
}

/// What a key press asks the prompt to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Insert(char),
    Backspace,
    /// Request candidates, or advance through the ones showing
    Complete,
    Next,
    Previous,
    /// Select the highlighted candidate, or submit the line
    Accept,
    Dismiss,
    Quit,
    Ignore,
}

/// Prompt key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub complete: KeyBinding,
    pub next: KeyBinding,
    pub previous: KeyBinding,
    pub accept: KeyBinding,
    pub dismiss: KeyBinding,
    pub backspace: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Quit"),
            complete: KeyBinding::new(KeyCode::Tab, KeyModifiers::NONE, "Complete / next"),
            next: KeyBinding::new(KeyCode::Right, KeyModifiers::NONE, "Next candidate")
                .or(KeyCode::Down, KeyModifiers::NONE),
            previous: KeyBinding::new(KeyCode::Left, KeyModifiers::NONE, "Previous candidate")
                .or(KeyCode::Up, KeyModifiers::NONE)
                .or(KeyCode::BackTab, KeyModifiers::SHIFT)
                .or(KeyCode::BackTab, KeyModifiers::NONE),
            accept: KeyBinding::new(KeyCode::Enter, KeyModifiers::NONE, "Select / submit"),
            dismiss: KeyBinding::new(KeyCode::Esc, KeyModifiers::NONE, "Dismiss candidates"),
            backspace: KeyBinding::new(KeyCode::Backspace, KeyModifiers::NONE, "Delete character"),
        }
    }
}

impl KeyMap {
    /// Map a key press to a prompt action
    pub fn action(&self, event: &KeyEvent) -> PromptAction {
        if event.kind == KeyEventKind::Release {
            return PromptAction::Ignore;
        }

        if self.quit.matches(event) {
            PromptAction::Quit
        } else if self.complete.matches(event) {
            PromptAction::Complete
        } else if self.next.matches(event) {
            PromptAction::Next
        } else if self.previous.matches(event) {
            PromptAction::Previous
        } else if self.accept.matches(event) {
            PromptAction::Accept
        } else if self.dismiss.matches(event) {
            PromptAction::Dismiss
        } else if self.backspace.matches(event) {
            PromptAction::Backspace
        } else {
            match event.code {
                KeyCode::Char(c)
                    if !event
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    PromptAction::Insert(c)
                }
                _ => PromptAction::Ignore,
            }
        }
    }

    /// Get help text for all key bindings
    pub fn help_text(&self) -> String {
        [
            &self.complete,
            &self.next,
            &self.previous,
            &self.accept,
            &self.dismiss,
            &self.quit,
        ]
        .iter()
        .map(|binding| binding.description.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_navigation_keys() {
        let keys = KeyMap::default();

        assert_eq!(keys.action(&key(KeyCode::Tab, KeyModifiers::NONE)), PromptAction::Complete);
        assert_eq!(keys.action(&key(KeyCode::Right, KeyModifiers::NONE)), PromptAction::Next);
        assert_eq!(keys.action(&key(KeyCode::Left, KeyModifiers::NONE)), PromptAction::Previous);
        assert_eq!(
            keys.action(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            PromptAction::Previous
        );
        assert_eq!(keys.action(&key(KeyCode::Enter, KeyModifiers::NONE)), PromptAction::Accept);
        assert_eq!(keys.action(&key(KeyCode::Esc, KeyModifiers::NONE)), PromptAction::Dismiss);
    }

    #[test]
    fn test_ctrl_c_quits_instead_of_inserting() {
        let keys = KeyMap::default();

        assert_eq!(
            keys.action(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            PromptAction::Quit
        );
        assert_eq!(
            keys.action(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            PromptAction::Insert('c')
        );
        assert_eq!(
            keys.action(&key(KeyCode::Char('C'), KeyModifiers::SHIFT)),
            PromptAction::Insert('C')
        );
        assert_eq!(
            keys.action(&key(KeyCode::Char('x'), KeyModifiers::ALT)),
            PromptAction::Ignore
        );
    }

    #[test]
    fn test_help_text_lists_bindings() {
        let help = KeyMap::default().help_text();
        assert!(help.contains("Complete / next"));
        assert!(help.contains("Quit"));
    }
}
