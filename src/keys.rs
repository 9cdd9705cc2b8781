use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::focus::FocusDelta;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarCommand {
    Focus(FocusDelta),
    /// Toggle the focused day.
    Activate,
    PrevPage,
    NextPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Paging commands are left unbound until a host binds them.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, CalendarCommand>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, command: CalendarCommand) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    pub fn resolve(&self, event: KeyEvent) -> Option<CalendarCommand> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::key(KeyCode::Up), CalendarCommand::Focus(FocusDelta::Up));
        self.bind(KeyBinding::key(KeyCode::Down), CalendarCommand::Focus(FocusDelta::Down));
        self.bind(KeyBinding::key(KeyCode::Left), CalendarCommand::Focus(FocusDelta::Left));
        self.bind(KeyBinding::key(KeyCode::Right), CalendarCommand::Focus(FocusDelta::Right));
        self.bind(KeyBinding::key(KeyCode::Enter), CalendarCommand::Activate);
        self.bind(KeyBinding::key(KeyCode::Char(' ')), CalendarCommand::Activate);
    }
}
