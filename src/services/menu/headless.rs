//! Скриптовый бэкенд меню для тестов без X-сервера.

use crate::error::Result;
use crate::events::{InputEvent, Key, KeyPress};
use crate::switch_error;
use std::collections::VecDeque;

use super::r#trait::{MenuBackendTrait, MenuFrame};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub text: String,
    pub rows: Vec<Option<String>>,
    pub selected: Option<usize>,
}

impl RecordedFrame {
    pub fn visible(&self) -> Vec<&str> {
        self.rows.iter().flatten().map(|s| s.as_str()).collect()
    }
}

pub struct HeadlessBackend {
    /// События по одному на каждое ожидание
    script: VecDeque<InputEvent>,
    /// События, уже стоящие в очереди (отдаются через poll)
    burst: VecDeque<InputEvent>,
    /// Захват удаётся начиная с этой попытки; None - никогда
    grab_succeeds_at: Option<u32>,
    pub grab_attempts: u32,
    pub grabbed: bool,
    pub release_calls: u32,
    pub opened_rows: Option<usize>,
    pub closed: bool,
    pub frames: Vec<RecordedFrame>,
}

impl HeadlessBackend {
    pub fn new(script: Vec<InputEvent>) -> Self {
        Self {
            script: script.into(),
            burst: VecDeque::new(),
            grab_succeeds_at: Some(1),
            grab_attempts: 0,
            grabbed: false,
            release_calls: 0,
            opened_rows: None,
            closed: false,
            frames: Vec::new(),
        }
    }

    /// Скрипт из строки: символы печатаются, `<Down>` и т.п. - управляющие клавиши
    pub fn typing(script: &str) -> Self {
        Self::new(parse_script(script))
    }

    pub fn with_burst(mut self, burst: Vec<InputEvent>) -> Self {
        self.burst = burst.into();
        self
    }

    pub fn with_grab_succeeding_at(mut self, attempt: Option<u32>) -> Self {
        self.grab_succeeds_at = attempt;
        self
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl MenuBackendTrait for HeadlessBackend {
    fn open(&mut self, rows: usize) -> Result<()> {
        self.opened_rows = Some(rows);
        Ok(())
    }

    fn grab_keyboard(&mut self) -> Result<bool> {
        self.grab_attempts += 1;
        self.grabbed = self
            .grab_succeeds_at
            .map(|at| self.grab_attempts >= at)
            .unwrap_or(false);
        Ok(self.grabbed)
    }

    fn release_keyboard(&mut self) {
        self.release_calls += 1;
        self.grabbed = false;
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn wait_event(&mut self) -> Result<InputEvent> {
        self.burst
            .pop_front()
            .or_else(|| self.script.pop_front())
            .ok_or_else(|| switch_error!(internal, "скрипт событий исчерпан"))
    }

    fn poll_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(self.burst.pop_front())
    }

    fn draw(&mut self, frame: &MenuFrame<'_>) -> Result<()> {
        self.frames.push(RecordedFrame {
            text: frame.text.to_string(),
            rows: frame
                .rows
                .iter()
                .map(|row| row.map(|s| s.to_string()))
                .collect(),
            selected: frame.selected,
        });
        Ok(())
    }
}

fn parse_script(script: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut rest = script;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(end) = rest.find('>') {
                let key = match &rest[1..end] {
                    "Return" => Key::Return,
                    "Escape" => Key::Escape,
                    "Tab" => Key::Tab,
                    "BackSpace" => Key::BackSpace,
                    "Delete" => Key::Delete,
                    "Up" => Key::Up,
                    "Down" => Key::Down,
                    "Left" => Key::Left,
                    "Right" => Key::Right,
                    "Expose" => {
                        events.push(InputEvent::Redraw);
                        rest = &rest[end + 1..];
                        continue;
                    }
                    other => panic!("неизвестная клавиша в скрипте: {}", other),
                };
                events.push(InputEvent::Key(KeyPress::plain(key)));
                rest = &rest[end + 1..];
                continue;
            }
        }
        events.push(InputEvent::Key(KeyPress::plain(Key::Char(c))));
        rest = &rest[c.len_utf8()..];
    }

    events
}
