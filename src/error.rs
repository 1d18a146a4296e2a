use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitchError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Не удалось подключиться к X-серверу: {0}")]
    Connect(#[from] x11rb::errors::ConnectError),

    #[error("Соединение с X-сервером нарушено: {0}")]
    Connection(#[from] x11rb::errors::ConnectionError),

    #[error("Ошибка ответа X-сервера: {0}")]
    Reply(#[from] x11rb::errors::ReplyError),

    #[error("Ошибка ответа X-сервера: {0}")]
    ReplyOrId(#[from] x11rb::errors::ReplyOrIdError),

    #[error("Не удалось захватить клавиатуру: {0}")]
    GrabFailed(String),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl SwitchError {
    /// Окно исчезло между запросами (BadWindow/BadDrawable)
    pub fn is_window_gone(&self) -> bool {
        use x11rb::protocol::ErrorKind;

        match self {
            SwitchError::Reply(x11rb::errors::ReplyError::X11Error(e)) => {
                matches!(e.error_kind, ErrorKind::Window | ErrorKind::Drawable)
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SwitchError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! switch_error {
    (grab_failed, $($arg:tt)*) => {
        $crate::error::SwitchError::GrabFailed(format!($($arg)*))
    };
    (service_unavailable, $($arg:tt)*) => {
        $crate::error::SwitchError::ServiceUnavailable(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::SwitchError::Internal(format!($($arg)*))
    };
}
