pub mod keyboard;
pub mod window;

pub use keyboard::{Key, KeyPress, Modifiers};
pub use window::{Rect, WindowEntry, WindowList};

/// Событие ввода для меню, независимое от оконной системы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Запрос перерисовки (Expose)
    Redraw,
    Key(KeyPress),
}

/// Класс события: подряд идущие события одного класса схлопываются
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEventKind {
    Redraw,
    Key,
}

impl InputEvent {
    pub fn kind(&self) -> InputEventKind {
        match self {
            InputEvent::Redraw => InputEventKind::Redraw,
            InputEvent::Key(_) => InputEventKind::Key,
        }
    }
}
