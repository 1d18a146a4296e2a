use crate::error::Result;
use crate::events::WindowList;
use crate::services::menu::{MenuOutcome, MenuResult};
use tracing::{info, warn};

use super::r#trait::DispatcherTrait;

pub struct DryRunDispatcher;

impl DryRunDispatcher {
    pub fn new() -> Self {
        info!("Dry-run режим - активация и запуск команд отключены");
        Self
    }
}

impl DispatcherTrait for DryRunDispatcher {
    fn dispatch(&self, result: &MenuResult, windows: &WindowList) -> Result<()> {
        match &result.outcome {
            MenuOutcome::Chosen(index) => match windows.get(*index) {
                Some(entry) => info!("[dry-run] Активировали бы окно {}", entry),
                None => warn!("[dry-run] Выбран несуществующий индекс {}", index),
            },
            MenuOutcome::FreeText(command) => {
                info!("[dry-run] Запустили бы команду: /bin/sh -c {:?}", command);
            }
            MenuOutcome::Aborted => info!("[dry-run] Выбор отменён"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WindowEntry;

    #[test]
    fn test_dry_run_never_fails() {
        let windows = WindowList {
            entries: vec![WindowEntry {
                id: 0x42,
                line: "XTerm  bash".to_string(),
                index: 0,
            }],
            wm_check: None,
        };
        let dispatcher = DryRunDispatcher::new();

        for outcome in [
            MenuOutcome::Chosen(0),
            MenuOutcome::Chosen(5),
            MenuOutcome::FreeText("rm -rf /tmp/nothing".to_string()),
            MenuOutcome::Aborted,
        ] {
            let result = MenuResult { outcome, time: 0 };
            assert!(dispatcher.dispatch(&result, &windows).is_ok());
        }
    }
}
