//! Запуск введённого текста как команды оболочки.
//!
//! Текст передаётся в `/bin/sh -c` как есть, без экранирования и проверок:
//! это лаунчер, а не граница безопасности.

use crate::error::SwitchError;
use nix::unistd::setsid;
use std::os::unix::process::CommandExt;
use std::process::Command;
use tracing::{debug, info};

pub const SHELL: &str = "/bin/sh";

pub fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new(SHELL);
    command.arg("-c").arg(command_line);
    command
}

/// Отвязывается от сессии и замещает процесс оболочкой.
///
/// Возвращается только при ошибке exec.
pub fn exec_shell(command_line: &str) -> SwitchError {
    info!("Запуск команды: {}", command_line);

    // Лидер группы процессов получит EPERM, это не мешает запуску
    if let Err(e) = setsid() {
        debug!("setsid не выполнен: {}", e);
    }

    SwitchError::Io(shell_command(command_line).exec())
}
