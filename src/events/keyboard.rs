use std::fmt;

/// Клавиша после трансляции keysym
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Return,
    Escape,
    Tab,
    BackSpace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Любой другой keysym (модификаторы, F-клавиши и т.п.)
    Other(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "'{}'", c),
            Key::Other(sym) => write!(f, "keysym 0x{:x}", sym),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Модификаторы клавиш
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift && !self.super_key
    }

    /// Модификаторы, при которых символ не вводится в поле
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.super_key
    }

    pub fn to_vec(&self) -> Vec<&'static str> {
        let mut result = Vec::new();
        if self.ctrl { result.push("ctrl"); }
        if self.alt { result.push("alt"); }
        if self.shift { result.push("shift"); }
        if self.super_key { result.push("super"); }
        result
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.to_vec();
        if modifiers.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", modifiers.join("+"))
        }
    }
}

/// Нажатие клавиши, полученное от источника ввода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Серверная метка времени события (0 = CurrentTime)
    pub time: u32,
}

impl KeyPress {
    pub fn new(key: Key, modifiers: Modifiers, time: u32) -> Self {
        Self { key, modifiers, time }
    }

    #[cfg(test)]
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::new(), 0)
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{} @{}", self.key, self.time)
        } else {
            write!(f, "{}+{} @{}", self.modifiers, self.key, self.time)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_creation() {
        let modifiers = Modifiers::new()
            .with_ctrl(true)
            .with_shift(true);

        assert!(modifiers.ctrl);
        assert!(modifiers.shift);
        assert!(!modifiers.alt);
        assert!(!modifiers.super_key);
        assert!(modifiers.has_command());
        assert_eq!(modifiers.to_string(), "ctrl+shift");
    }

    #[test]
    fn test_shift_is_not_command() {
        let modifiers = Modifiers::new().with_shift(true);
        assert!(!modifiers.is_empty());
        assert!(!modifiers.has_command());
    }

    #[test]
    fn test_key_press_display() {
        let press = KeyPress::new(Key::Char('u'), Modifiers::new().with_ctrl(true), 42);
        assert_eq!(press.to_string(), "ctrl+'u' @42");
        assert_eq!(KeyPress::plain(Key::Escape).to_string(), "Escape @0");
    }
}
