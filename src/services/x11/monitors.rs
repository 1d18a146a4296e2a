use crate::error::Result;
use crate::events::Rect;
use tracing::{debug, info};
use x11rb::protocol::xinerama::ConnectionExt as _;
use x11rb::protocol::xproto::ConnectionExt as _;

use super::session::X11Session;

impl X11Session {
    /// Логические мониторы через Xinerama; без него - весь экран
    pub fn monitors(&self, max_monitors: usize) -> Vec<Rect> {
        let screen = self.screen();
        let whole = Rect::new(
            0,
            0,
            screen.width_in_pixels as u32,
            screen.height_in_pixels as u32,
        );

        match self.xinerama_screens() {
            Ok(screens) if !screens.is_empty() => {
                screens.into_iter().take(max_monitors).collect()
            }
            Ok(_) => vec![whole],
            Err(e) => {
                debug!("Xinerama недоступна: {}", e);
                vec![whole]
            }
        }
    }

    fn xinerama_screens(&self) -> Result<Vec<Rect>> {
        let conn = self.conn();

        if conn.xinerama_is_active()?.reply()?.state == 0 {
            return Ok(Vec::new());
        }

        let reply = conn.xinerama_query_screens()?.reply()?;
        Ok(reply
            .screen_info
            .iter()
            .map(|info| {
                Rect::new(
                    info.x_org as i32,
                    info.y_org as i32,
                    info.width as u32,
                    info.height as u32,
                )
            })
            .collect())
    }

    /// Центр активного окна по _NET_ACTIVE_WINDOW
    fn active_window_center(&self) -> Result<Option<(i32, i32)>> {
        let active = self.window_list(self.root(), self.atoms()._NET_ACTIVE_WINDOW, 1)?;
        let Some(&window) = active.first() else {
            return Ok(None);
        };
        if window == x11rb::NONE {
            return Ok(None);
        }

        let conn = self.conn();
        let geometry = conn.get_geometry(window)?.reply()?;
        let origin = conn
            .translate_coordinates(window, self.root(), 0, 0)?
            .reply()?;

        let rect = Rect::new(
            origin.dst_x as i32,
            origin.dst_y as i32,
            geometry.width as u32,
            geometry.height as u32,
        );
        Ok(Some(rect.center()))
    }

    fn pointer_position(&self) -> Result<(i32, i32)> {
        let pointer = self.conn().query_pointer(self.root())?.reply()?;
        Ok((pointer.root_x as i32, pointer.root_y as i32))
    }

    /// Монитор для меню: тот, где активное окно, иначе где указатель
    pub fn select_monitor(&self, max_monitors: usize) -> Rect {
        let monitors = self.monitors(max_monitors);

        let point = if monitors.len() > 1 {
            match self.active_window_center() {
                Ok(Some(point)) => Some(point),
                _ => self.pointer_position().ok(),
            }
        } else {
            None
        };

        let index = pick_monitor(&monitors, point);
        let monitor = monitors.get(index).copied().unwrap_or_default();
        info!(
            "Мониторов: {}, выбран #{} ({})",
            monitors.len(),
            index,
            monitor
        );
        monitor
    }
}

/// Индекс монитора, содержащего точку; по умолчанию 0
pub fn pick_monitor(monitors: &[Rect], point: Option<(i32, i32)>) -> usize {
    let (x, y) = point.unwrap_or((0, 0));
    monitors
        .iter()
        .position(|monitor| monitor.contains(x, y))
        .unwrap_or(0)
}
