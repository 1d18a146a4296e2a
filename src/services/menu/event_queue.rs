use crate::error::Result;
use crate::events::InputEvent;
use std::collections::VecDeque;

use super::r#trait::MenuBackendTrait;

/// Очередь событий меню со схлопыванием.
///
/// После блокирующего ожидания забирает всё, что уже пришло, и из событий
/// того же класса оставляет только последнее. События других классов
/// остаются в очереди в исходном порядке.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next<B: MenuBackendTrait + ?Sized>(&mut self, backend: &mut B) -> Result<InputEvent> {
        let first = match self.pending.pop_front() {
            Some(event) => event,
            None => backend.wait_event()?,
        };

        while let Some(event) = backend.poll_event()? {
            self.pending.push_back(event);
        }

        Ok(self.take_latest(first))
    }

    fn take_latest(&mut self, first: InputEvent) -> InputEvent {
        let kind = first.kind();
        let mut latest = first;

        self.pending.retain(|event| {
            if event.kind() == kind {
                latest = *event;
                false
            } else {
                true
            }
        });

        latest
    }

    #[cfg(test)]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Key, KeyPress};
    use crate::services::menu::headless::HeadlessBackend;

    fn key(c: char) -> InputEvent {
        InputEvent::Key(KeyPress::plain(Key::Char(c)))
    }

    #[test]
    fn test_single_events_pass_through() {
        let mut backend = HeadlessBackend::new(vec![key('a'), key('b')]);
        let mut queue = EventQueue::new();

        assert_eq!(queue.next(&mut backend).unwrap(), key('a'));
        assert_eq!(queue.next(&mut backend).unwrap(), key('b'));
    }

    #[test]
    fn test_burst_keeps_latest_of_same_kind() {
        let mut backend = HeadlessBackend::new(vec![]).with_burst(vec![
            InputEvent::Redraw,
            key('a'),
            InputEvent::Redraw,
            key('b'),
            InputEvent::Redraw,
        ]);
        let mut queue = EventQueue::new();

        // Первое событие - Redraw, остальные Redraw из очереди поглощаются
        assert_eq!(queue.next(&mut backend).unwrap(), InputEvent::Redraw);
        assert_eq!(queue.pending_len(), 2);

        // Затем нажатия: остаётся только последнее
        assert_eq!(queue.next(&mut backend).unwrap(), key('b'));
        assert_eq!(queue.pending_len(), 0);
    }
}
