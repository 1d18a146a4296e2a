use crate::config::{GrabConfig, MenuConfig};
use crate::debug_if_enabled;
use crate::error::Result;
use crate::events::{InputEvent, Key};
use tracing::{debug, info};

use super::event_queue::EventQueue;
use super::grab::KeyboardGrab;
use super::r#trait::{MenuBackendTrait, MenuFrame};
use super::state::{MenuOutcome, MenuState};
use super::textbox::{TextBox, TextBoxAction};

/// Входные данные одной сессии меню
#[derive(Debug, Clone)]
pub struct MenuRequest {
    pub lines: Vec<String>,
    pub prompt: String,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuResult {
    pub outcome: MenuOutcome,
    /// Метка времени последнего нажатия, нужна для _NET_ACTIVE_WINDOW
    pub time: u32,
}

/// Модальное меню с фильтрацией по мере ввода
pub struct Menu {
    max_rows: usize,
    grab: GrabConfig,
}

impl Menu {
    pub fn new(menu: &MenuConfig, grab: &GrabConfig) -> Self {
        Self {
            max_rows: menu.lines,
            grab: grab.clone(),
        }
    }

    pub fn run<B: MenuBackendTrait + ?Sized>(
        &self,
        backend: &mut B,
        request: MenuRequest,
    ) -> Result<MenuResult> {
        let MenuRequest { lines, prompt, selected } = request;
        let mut state = MenuState::new(lines, self.max_rows, selected);

        info!(
            "Открытие меню: {} кандидатов, {} видимых строк",
            state.lines().len(),
            state.rows()
        );

        if let Err(e) = backend.open(state.rows()) {
            backend.close();
            return Err(e);
        }

        let mut grab = KeyboardGrab::acquire(backend, &self.grab)?;
        let mut text_box = TextBox::new();
        let mut events = EventQueue::new();
        let mut time = 0;

        let chosen = loop {
            match events.next(&mut *grab)? {
                InputEvent::Redraw => {}
                InputEvent::Key(press) => {
                    time = press.time;
                    debug_if_enabled!("Нажатие в меню: {}", press);

                    match text_box.handle_key(&press) {
                        TextBoxAction::Submit => break true,
                        TextBoxAction::Changed => state.apply_query(text_box.text()),
                        TextBoxAction::NotConsumed => match press.key {
                            Key::Escape => break false,
                            Key::Up => state.select_previous(),
                            Key::Down | Key::Tab => state.select_next(),
                            _ => {}
                        },
                    }
                }
            }

            Self::draw(&mut *grab, &prompt, &text_box, &state)?;
        };

        drop(grab);

        let outcome = Self::resolve(chosen, &state, text_box.into_text());
        info!("Меню закрыто: {:?}", outcome);

        Ok(MenuResult { outcome, time })
    }

    fn draw<B: MenuBackendTrait + ?Sized>(
        backend: &mut B,
        prompt: &str,
        text_box: &TextBox,
        state: &MenuState,
    ) -> Result<()> {
        let frame = MenuFrame {
            prompt,
            text: text_box.text(),
            cursor: text_box.cursor(),
            rows: state.visible_rows(),
            selected: state.selected(),
        };
        backend.draw(&frame)
    }

    fn resolve(chosen: bool, state: &MenuState, text: String) -> MenuOutcome {
        if !chosen {
            return MenuOutcome::Aborted;
        }

        if let Some(index) = state.chosen() {
            return MenuOutcome::Chosen(index);
        }

        if text.is_empty() {
            debug!("Подтверждение без совпадений и без текста");
            MenuOutcome::Aborted
        } else {
            MenuOutcome::FreeText(text)
        }
    }
}
