use crate::error::Result;
use crate::events::WindowList;
use crate::services::menu::{MenuOutcome, MenuResult};
use crate::services::x11::X11Session;
use crate::switch_error;
use std::rc::Rc;
use tracing::{debug, info};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, ClientMessageData, ClientMessageEvent, ConfigureWindowAux, ConnectionExt, EventMask,
    InputFocus, StackMode, Window, CLIENT_MESSAGE_EVENT,
};

use super::launcher;
use super::r#trait::DispatcherTrait;

/// Источник запроса активации по EWMH: 2 - пейджер/утилита пользователя
const SOURCE_PAGER: u32 = 2;

/// PointerRoot как окно фокуса
const POINTER_ROOT: Window = 1;

pub struct X11Dispatcher {
    session: Rc<X11Session>,
}

impl X11Dispatcher {
    pub fn new(session: Rc<X11Session>) -> Self {
        info!("Инициализация X11Dispatcher");
        Self { session }
    }

    fn activate(&self, window: Window, time: u32, ewmh: bool) -> Result<()> {
        let session = &self.session;
        let conn = session.conn();

        let message = activation_message(window, session.atoms()._NET_ACTIVE_WINDOW, time);
        conn.send_event(
            false,
            session.root(),
            EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
            message,
        )?;

        if !ewmh {
            // Без EWMH поднимаем и фокусируем окно сами
            conn.configure_window(window, &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE))?;

            let hint = match session.input_hint(window) {
                Ok(hint) => hint,
                Err(e) if e.is_window_gone() => None,
                Err(e) => return Err(e),
            };
            let focus = focus_target(window, hint);
            debug!("Фокус на 0x{:x} (input hint {:?})", focus, hint);
            conn.set_input_focus(InputFocus::POINTER_ROOT, focus, x11rb::CURRENT_TIME)?;
        }

        conn.flush()?;
        info!("Окно 0x{:x} активировано", window);
        Ok(())
    }
}

impl DispatcherTrait for X11Dispatcher {
    fn dispatch(&self, result: &MenuResult, windows: &WindowList) -> Result<()> {
        match &result.outcome {
            MenuOutcome::Chosen(index) => {
                let entry = windows
                    .get(*index)
                    .ok_or_else(|| switch_error!(internal, "нет окна с индексом {}", index))?;
                debug!("Выбрано окно {}", entry);
                self.activate(entry.id, result.time, windows.is_ewmh())
            }
            MenuOutcome::FreeText(command) => Err(launcher::exec_shell(command)),
            MenuOutcome::Aborted => {
                info!("Выбор отменён");
                Ok(())
            }
        }
    }
}

/// `_NET_ACTIVE_WINDOW` для отправки в корневое окно
pub fn activation_message(window: Window, active_window: Atom, time: u32) -> ClientMessageEvent {
    ClientMessageEvent {
        response_type: CLIENT_MESSAGE_EVENT,
        format: 32,
        sequence: 0,
        window,
        type_: active_window,
        data: ClientMessageData::from([SOURCE_PAGER, time, 0u32, 0u32, 0u32]),
    }
}

/// Окно получает фокус только если само его принимает (WM_HINTS input)
pub fn focus_target(window: Window, input_hint: Option<bool>) -> Window {
    match input_hint {
        Some(true) => window,
        _ => POINTER_ROOT,
    }
}
