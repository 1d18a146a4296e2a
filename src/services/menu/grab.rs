use crate::config::GrabConfig;
use crate::error::Result;
use crate::switch_error;
use std::ops::{Deref, DerefMut};
use std::thread::sleep;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::r#trait::MenuBackendTrait;

/// Эксклюзивный захват клавиатуры на время сессии меню.
///
/// Drop освобождает клавиатуру и закрывает окно меню, поэтому любой выход из
/// сессии (выбор, текст, отмена, ошибка) проходит через освобождение.
pub struct KeyboardGrab<'a, B: MenuBackendTrait + ?Sized> {
    backend: &'a mut B,
    held: bool,
}

impl<'a, B: MenuBackendTrait + ?Sized> KeyboardGrab<'a, B> {
    pub fn acquire(backend: &'a mut B, config: &GrabConfig) -> Result<Self> {
        let mut grab = Self {
            backend,
            held: false,
        };

        let delay = Duration::from_millis(config.retry_delay_ms);

        for attempt in 1..=config.attempts {
            if grab.backend.grab_keyboard()? {
                debug!("Клавиатура захвачена с попытки {}", attempt);
                grab.held = true;
                break;
            }
            if attempt < config.attempts {
                sleep(delay);
            }
        }

        if !grab.held {
            if config.required {
                // grab уходит из области видимости и освобождает ресурсы
                return Err(switch_error!(
                    grab_failed,
                    "клавиатура занята после {} попыток",
                    config.attempts
                ));
            }
            warn!(
                "Не удалось захватить клавиатуру за {} попыток, продолжаем без захвата",
                config.attempts
            );
        }

        Ok(grab)
    }

    #[cfg(test)]
    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl<B: MenuBackendTrait + ?Sized> Deref for KeyboardGrab<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: MenuBackendTrait + ?Sized> DerefMut for KeyboardGrab<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: MenuBackendTrait + ?Sized> Drop for KeyboardGrab<'_, B> {
    fn drop(&mut self) {
        info!("Освобождение клавиатуры и закрытие меню");
        self.backend.release_keyboard();
        self.backend.close();
    }
}
