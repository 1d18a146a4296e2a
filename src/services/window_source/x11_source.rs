use crate::config::Config;
use crate::error::Result;
use crate::events::WindowList;
use crate::services::x11::X11Session;
use std::rc::Rc;
use tracing::{debug, info, warn};
use x11rb::protocol::xproto::{ConnectionExt, Window};

use super::format::{format_entries, ColumnWidths};
use super::r#trait::WindowSourceTrait;
use super::select::{self, WindowInspector};

/// Перечисление окон через EWMH с откатом на обход дерева окон
pub struct X11WindowSource {
    session: Rc<X11Session>,
    config: Rc<Config>,
}

impl X11WindowSource {
    pub fn new(session: Rc<X11Session>, config: Rc<Config>) -> Self {
        info!("Инициализация X11WindowSource");
        Self { session, config }
    }

    /// Окно-проверка EWMH, если менеджер окон его объявил и оно существует
    fn ewmh_check(&self) -> Option<Window> {
        let session = &self.session;
        let check = session
            .window_list(session.root(), session.atoms()._NET_SUPPORTING_WM_CHECK, 1)
            .ok()?
            .first()
            .copied()?;

        match session.attributes(check) {
            Ok(_) => Some(check),
            Err(e) => {
                debug!("_NET_SUPPORTING_WM_CHECK указывает на недоступное окно: {}", e);
                None
            }
        }
    }
}

impl WindowInspector for X11Session {
    fn stacking_list(&self, limit: usize) -> Result<Vec<Window>> {
        self.window_list(self.root(), self.atoms()._NET_CLIENT_LIST_STACKING, limit)
    }

    fn tree_children(&self) -> Result<Vec<Window>> {
        Ok(self.conn().query_tree(self.root())?.reply()?.children)
    }

    fn is_managed_viewable(&self, window: Window) -> Result<bool> {
        X11Session::is_managed_viewable(self, window)
    }

    fn skips_taskbar(&self, window: Window) -> Result<bool> {
        X11Session::skips_taskbar(self, window)
    }

    fn window_name(&self, window: Window) -> Result<Option<String>> {
        X11Session::window_name(self, window)
    }

    fn window_class(&self, window: Window) -> Result<Option<String>> {
        X11Session::window_class(self, window)
    }
}

impl WindowSourceTrait for X11WindowSource {
    fn list_windows(&self) -> Result<WindowList> {
        let wm_check = self.ewmh_check();

        match wm_check {
            Some(check) => debug!("EWMH менеджер окон (check 0x{:x})", check),
            None => warn!("Менеджер окон не поддерживает EWMH, обходим дерево окон"),
        }

        let session = self.session.as_ref();
        let max_windows = self.config.windows.max_windows;
        let candidates = select::candidates(session, wm_check.is_some(), max_windows)?;
        let raw = select::inspect_all(session, &candidates)?;

        let widths = ColumnWidths::measure(&raw, &self.config.windows);
        let entries = format_entries(raw, widths);

        info!(
            "Найдено окон: {} из {} кандидатов (колонки {}/{})",
            entries.len(),
            candidates.len(),
            widths.class,
            widths.name
        );

        Ok(WindowList { entries, wm_check })
    }
}
