use crate::config::Config;
use crate::error::Result;
use crate::events::WindowList;
use std::rc::Rc;
use tracing::info;

use super::format::{format_entries, ColumnWidths, RawWindow};
use super::r#trait::WindowSourceTrait;

pub struct DryRunWindowSource {
    config: Rc<Config>,
}

impl DryRunWindowSource {
    pub fn new(config: Rc<Config>) -> Self {
        Self { config }
    }
}

impl WindowSourceTrait for DryRunWindowSource {
    fn list_windows(&self) -> Result<WindowList> {
        info!("Dry-run режим - список окон эмулируется");

        let fake_windows = vec![
            RawWindow::new(0x0100_0001, "XTerm", "Terminal - dry_run"),
            RawWindow::new(0x0100_0002, "Firefox", "Browser - dry_run"),
            RawWindow::new(0x0100_0003, "Emacs", "Editor - dry_run"),
            RawWindow::new(0x0100_0004, "Steam", "Game - dry_run"),
        ];

        let widths = ColumnWidths::measure(&fake_windows, &self.config.windows);

        Ok(WindowList {
            entries: format_entries(fake_windows, widths),
            wm_check: None,
        })
    }
}
