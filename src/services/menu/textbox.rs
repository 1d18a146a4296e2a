use crate::events::{Key, KeyPress};

/// Результат обработки клавиши полем ввода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBoxAction {
    /// Клавиша не изменила буфер (движение курсора тоже сюда)
    NotConsumed,
    Changed,
    Submit,
}

/// Однострочное поле ввода с курсором
#[derive(Debug, Default)]
pub struct TextBox {
    text: String,
    /// Позиция курсора в символах
    cursor: usize,
}

impl TextBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn handle_key(&mut self, press: &KeyPress) -> TextBoxAction {
        let modifiers = press.modifiers;

        match press.key {
            Key::Return => TextBoxAction::Submit,
            Key::Char('u') | Key::Char('U') if modifiers.ctrl => {
                if self.text.is_empty() {
                    return TextBoxAction::NotConsumed;
                }
                self.text.clear();
                self.cursor = 0;
                TextBoxAction::Changed
            }
            Key::Char(c) if !modifiers.has_command() => {
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                TextBoxAction::Changed
            }
            Key::BackSpace => {
                if self.cursor == 0 {
                    return TextBoxAction::NotConsumed;
                }
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
                TextBoxAction::Changed
            }
            Key::Delete => {
                if self.cursor >= self.char_len() {
                    return TextBoxAction::NotConsumed;
                }
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
                TextBoxAction::Changed
            }
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                TextBoxAction::NotConsumed
            }
            Key::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                TextBoxAction::NotConsumed
            }
            Key::Home => {
                self.cursor = 0;
                TextBoxAction::NotConsumed
            }
            Key::End => {
                self.cursor = self.char_len();
                TextBoxAction::NotConsumed
            }
            _ => TextBoxAction::NotConsumed,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}
