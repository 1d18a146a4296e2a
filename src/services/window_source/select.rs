use crate::error::Result;
use tracing::{debug, warn};

use super::format::RawWindow;

/// Запросы к оконной системе, нужные для отбора окон
pub trait WindowInspector {
    /// `_NET_CLIENT_LIST_STACKING` снизу вверх, не более `limit` окон
    fn stacking_list(&self, limit: usize) -> Result<Vec<u32>>;
    /// Дочерние окна корня снизу вверх
    fn tree_children(&self) -> Result<Vec<u32>>;
    fn is_managed_viewable(&self, window: u32) -> Result<bool>;
    fn skips_taskbar(&self, window: u32) -> Result<bool>;
    fn window_name(&self, window: u32) -> Result<Option<String>>;
    fn window_class(&self, window: u32) -> Result<Option<String>>;
}

/// Кандидаты снизу вверх по стеку.
///
/// С EWMH берётся список стека; если менеджер его не публикует, как и без
/// EWMH, обходится дерево окон.
pub fn candidates<I: WindowInspector + ?Sized>(
    inspector: &I,
    ewmh: bool,
    limit: usize,
) -> Result<Vec<u32>> {
    if ewmh {
        let mut stacking = inspector.stacking_list(limit)?;
        if !stacking.is_empty() {
            stacking.truncate(limit);
            return Ok(stacking);
        }
        warn!("_NET_CLIENT_LIST_STACKING пуст или отсутствует, обходим дерево окон");
    }

    scan_tree(inspector, limit)
}

/// Видимые управляемые окна из дерева, не более `limit`
fn scan_tree<I: WindowInspector + ?Sized>(inspector: &I, limit: usize) -> Result<Vec<u32>> {
    let mut windows = Vec::new();
    for window in inspector.tree_children()? {
        if windows.len() >= limit {
            break;
        }
        match inspector.is_managed_viewable(window) {
            Ok(true) => windows.push(window),
            Ok(false) => {}
            Err(e) if e.is_window_gone() => {}
            Err(e) => return Err(e),
        }
    }
    Ok(windows)
}

/// Данные окон сверху стека вниз: последнее поднятое окно первым.
///
/// Повторно отсеивает невидимые окна и окна со skip taskbar; исчезнувшие
/// во время перечисления окна пропускаются.
pub fn inspect_all<I: WindowInspector + ?Sized>(
    inspector: &I,
    candidates: &[u32],
) -> Result<Vec<RawWindow>> {
    let mut raw = Vec::with_capacity(candidates.len());
    for &window in candidates.iter().rev() {
        match inspect(inspector, window) {
            Ok(Some(found)) => raw.push(found),
            Ok(None) => {}
            Err(e) if e.is_window_gone() => {
                debug!("Окно 0x{:x} исчезло во время перечисления", window);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(raw)
}

fn inspect<I: WindowInspector + ?Sized>(inspector: &I, window: u32) -> Result<Option<RawWindow>> {
    if !inspector.is_managed_viewable(window)? {
        return Ok(None);
    }

    if inspector.skips_taskbar(window)? {
        crate::debug_if_enabled!("Окно 0x{:x} пропущено: skip taskbar", window);
        return Ok(None);
    }

    Ok(Some(RawWindow {
        id: window,
        name: inspector.window_name(window)?,
        class: inspector.window_class(window)?,
    }))
}
