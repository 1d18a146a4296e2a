use crate::error::Result;
use tracing::info;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Screen, Window};
use x11rb::rust_connection::RustConnection;

x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        _NET_ACTIVE_WINDOW,
        _NET_CLIENT_LIST_STACKING,
        _NET_WM_NAME,
        _NET_WM_STATE,
        _NET_WM_STATE_ABOVE,
        _NET_WM_STATE_SKIP_TASKBAR,
        _NET_SUPPORTING_WM_CHECK,
        UTF8_STRING,
    }
}

/// Соединение с X-сервером и всё, что от него зависит: экран, корень, атомы.
///
/// Передаётся во все компоненты явно, глобального состояния нет.
pub struct X11Session {
    conn: RustConnection,
    screen_num: usize,
    atoms: Atoms,
}

impl X11Session {
    /// Подключение к дисплею; `None` - из переменной DISPLAY
    pub fn connect(display: Option<&str>) -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(display)?;
        let atoms = Atoms::new(&conn)?.reply()?;

        let session = Self {
            conn,
            screen_num,
            atoms,
        };

        let screen = session.screen();
        info!(
            "Подключено к X-серверу: экран {} ({}x{}), root 0x{:x}",
            screen_num, screen.width_in_pixels, screen.height_in_pixels, screen.root
        );

        Ok(session)
    }

    pub fn conn(&self) -> &RustConnection {
        &self.conn
    }

    pub fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    pub fn root(&self) -> Window {
        self.screen().root
    }

    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }
}

impl Drop for X11Session {
    fn drop(&mut self) {
        info!("Закрытие соединения с X-сервером");
    }
}
