use std::env;
use tracing::{info, warn};

/// Проверить, что задан X-дисплей
pub fn check_display() {
    match env::var("DISPLAY") {
        Ok(value) if is_valid_display(&value) => {
            info!("Используется дисплей {}", value);
        }
        Ok(value) => {
            warn!("Подозрительное значение DISPLAY: {:?}", value);
        }
        Err(_) => {
            warn!("Переменная DISPLAY не задана, подключение к X-серверу, скорее всего, не удастся");
        }
    }
}

/// `[host]:display[.screen]`
pub fn is_valid_display(display: &str) -> bool {
    let Some((_host, rest)) = display.rsplit_once(':') else {
        return false;
    };

    let (number, screen) = match rest.split_once('.') {
        Some((number, screen)) => (number, Some(screen)),
        None => (rest, None),
    };

    let is_number = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    is_number(number) && screen.map_or(true, is_number)
}
