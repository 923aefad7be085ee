use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Window commands for the active window
    FocusNext,
    FocusPrev,
    MinimizeWindow,
    MaximizeWindow,
    CloseWindow,
    // Launcher menu
    ToggleLauncher,
    MenuUp,
    MenuDown,
    MenuSelect,
    MenuClose,
    ToggleMouseCapture,
    // Confirm dialog navigation/actions
    ConfirmToggle,
    ConfirmLeft,
    ConfirmRight,
    ConfirmAccept,
    ConfirmCancel,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::FocusNext => "Focus next window",
            Action::FocusPrev => "Focus previous window",
            Action::MinimizeWindow => "Minimize window",
            Action::MaximizeWindow => "Maximize / restore window",
            Action::CloseWindow => "Close window",
            Action::ToggleLauncher => "Toggle launcher",
            Action::MenuUp => "Menu up",
            Action::MenuDown => "Menu down",
            Action::MenuSelect => "Menu select",
            Action::MenuClose => "Menu close",
            Action::ToggleMouseCapture => "Toggle mouse capture",
            Action::ConfirmToggle => "Confirm toggle (Tab)",
            Action::ConfirmLeft => "Confirm left",
            Action::ConfirmRight => "Confirm right",
            Action::ConfirmAccept => "Confirm accept",
            Action::ConfirmCancel => "Confirm cancel",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let none = KeyModifiers::NONE;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(FocusNext, KeyCombo::new(KeyCode::Tab, none));
        kb.add(FocusPrev, KeyCombo::new(KeyCode::BackTab, none));
        kb.add(MinimizeWindow, KeyCombo::new(KeyCode::F(9), none));
        kb.add(MaximizeWindow, KeyCombo::new(KeyCode::F(10), none));
        kb.add(
            CloseWindow,
            KeyCombo::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        kb.add(ToggleLauncher, KeyCombo::new(KeyCode::F(2), none));
        kb.add(MenuUp, KeyCombo::new(KeyCode::Up, none));
        kb.add(MenuDown, KeyCombo::new(KeyCode::Down, none));
        kb.add(MenuSelect, KeyCombo::new(KeyCode::Enter, none));
        kb.add(MenuClose, KeyCombo::new(KeyCode::Esc, none));
        kb.add(MenuClose, KeyCombo::new(KeyCode::F(2), none));
        kb.add(ToggleMouseCapture, KeyCombo::new(KeyCode::F(12), none));
        // Confirm overlay
        kb.add(ConfirmToggle, KeyCombo::new(KeyCode::Tab, none));
        kb.add(ConfirmToggle, KeyCombo::new(KeyCode::BackTab, none));
        kb.add(ConfirmLeft, KeyCombo::new(KeyCode::Left, none));
        kb.add(ConfirmRight, KeyCombo::new(KeyCode::Right, none));
        kb.add(ConfirmAccept, KeyCombo::new(KeyCode::Enter, none));
        kb.add(ConfirmAccept, KeyCombo::new(KeyCode::Char('y'), none));
        kb.add(ConfirmCancel, KeyCombo::new(KeyCode::Esc, none));
        kb.add(ConfirmCancel, KeyCombo::new(KeyCode::Char('n'), none));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// First action from `candidates` bound to `key`. Several actions share
    /// keys across modes, so callers pass the ones valid for theirs.
    pub fn first_match(&self, candidates: &[Action], key: &KeyEvent) -> Option<Action> {
        candidates
            .iter()
            .copied()
            .find(|action| self.matches(*action, key))
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }
}
