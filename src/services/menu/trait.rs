use crate::error::Result;
use crate::events::InputEvent;

/// Снимок того, что нужно нарисовать в окне меню
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuFrame<'a> {
    pub prompt: &'a str,
    pub text: &'a str,
    /// Позиция курсора в символах `text`
    pub cursor: usize,
    /// Видимые строки, `None` - пустая строка-заполнитель
    pub rows: Vec<Option<&'a str>>,
    /// Подсвеченная строка
    pub selected: Option<usize>,
}

/// Trait for the window-system side of the menu: surface, keyboard and events.
///
/// The menu state machine only talks to this trait, so it can be driven by a
/// scripted backend in tests.
pub trait MenuBackendTrait {
    /// Create and map the menu surface for `rows` list rows
    fn open(&mut self, rows: usize) -> Result<()>;

    /// One attempt at an exclusive keyboard grab, true on success
    fn grab_keyboard(&mut self) -> Result<bool>;

    /// Release the keyboard grab; called on every exit path
    fn release_keyboard(&mut self);

    /// Destroy the menu surface
    fn close(&mut self);

    /// Block until the next input event
    fn wait_event(&mut self) -> Result<InputEvent>;

    /// Next already queued input event, without blocking
    fn poll_event(&mut self) -> Result<Option<InputEvent>>;

    fn draw(&mut self, frame: &MenuFrame<'_>) -> Result<()>;
}
