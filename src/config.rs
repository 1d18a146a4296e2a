use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Верхние границы размеров меню
pub const MAX_MENU_LINES: usize = 1000;
pub const MAX_MENU_WIDTH: u32 = 16384;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub menu: MenuConfig,
    pub windows: WindowsConfig,
    pub grab: GrabConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Дополнительные директивы EnvFilter, например `x11rb=warn`
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MenuConfig {
    /// Сколько строк списка видно одновременно
    pub lines: usize,
    /// Ширина окна: до 100 включительно - проценты ширины монитора, иначе пиксели
    pub width: u32,
    pub font: String,
    pub prompt: String,
    pub initial_selection: usize,
    pub foreground: String,
    pub background: String,
    pub highlight_foreground: String,
    pub highlight_background: String,
    pub border: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowsConfig {
    pub max_windows: usize,
    pub max_monitors: usize,
    pub min_class_width: usize,
    pub min_name_width: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GrabConfig {
    pub attempts: u32,
    pub retry_delay_ms: u64,
    /// Если true - неудачный захват клавиатуры завершает сессию ошибкой
    pub required: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                filter: String::new(),
            },
            menu: MenuConfig {
                lines: 25,
                width: 60,
                font: "fixed".to_string(),
                prompt: "> ".to_string(),
                initial_selection: 1,
                foreground: "#cccccc".to_string(),
                background: "#222222".to_string(),
                highlight_foreground: "#ffffff".to_string(),
                highlight_background: "#005577".to_string(),
                border: "#005577".to_string(),
            },
            windows: WindowsConfig {
                max_windows: 32,
                max_monitors: 3,
                min_class_width: 5,
                min_name_width: 10,
            },
            grab: GrabConfig {
                attempts: 1000,
                retry_delay_ms: 1,
                required: false,
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        // Отсутствующий файл не ошибка: остаются значения по умолчанию
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("XSWITCH_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        // Валидация настроек меню
        if self.menu.lines == 0 || self.menu.lines > MAX_MENU_LINES {
            anyhow::bail!("menu.lines должно быть от 1 до {}", MAX_MENU_LINES);
        }

        // Размеры окна X11 - 16-битные
        if self.menu.width == 0 || self.menu.width > MAX_MENU_WIDTH {
            anyhow::bail!("menu.width должно быть от 1 до {}", MAX_MENU_WIDTH);
        }

        for (name, value) in [
            ("foreground", &self.menu.foreground),
            ("background", &self.menu.background),
            ("highlight_foreground", &self.menu.highlight_foreground),
            ("highlight_background", &self.menu.highlight_background),
            ("border", &self.menu.border),
        ] {
            if parse_color(value).is_none() {
                anyhow::bail!("Неверный цвет menu.{}: '{}'", name, value);
            }
        }

        // Валидация ограничений
        if self.windows.max_windows == 0 {
            anyhow::bail!("windows.max_windows должно быть больше 0");
        }

        if self.windows.max_monitors == 0 {
            anyhow::bail!("windows.max_monitors должно быть больше 0");
        }

        if self.grab.attempts == 0 {
            anyhow::bail!("grab.attempts должно быть минимум 1");
        }

        Ok(())
    }
}

/// Разбирает цвет вида `#rrggbb` в пиксель TrueColor
pub fn parse_color(value: &str) -> Option<u32> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.windows.max_windows, 32);
        assert_eq!(config.grab.attempts, 1000);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#005577"), Some(0x005577));
        assert_eq!(parse_color("#FFFFFF"), Some(0xffffff));
        assert_eq!(parse_color("005577"), None);
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#gg0000"), None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.menu.lines = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.menu.border = "blue".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_menu_size_upper_bounds() {
        let mut config = Config::default();
        config.menu.width = MAX_MENU_WIDTH;
        assert!(config.validate().is_ok());

        config.menu.width = 70_000;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.menu.lines = MAX_MENU_LINES + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load("missing.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.menu.lines, 25);
            assert_eq!(config.menu.prompt, "> ");
            Ok(())
        });
    }

    #[test]
    fn test_load_file_and_env_overlay() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "xswitch.toml",
                r#"
                [menu]
                lines = 10
                font = "9x15"

                [grab]
                required = true
                "#,
            )?;
            jail.set_env("XSWITCH_MENU__WIDTH", "800");

            let config = Config::load("xswitch.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.menu.lines, 10);
            assert_eq!(config.menu.font, "9x15");
            assert_eq!(config.menu.width, 800);
            assert!(config.grab.required);
            // Незаданные поля остаются по умолчанию
            assert_eq!(config.windows.min_class_width, 5);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "[windows]\nmax_windows = 0\n")?;
            assert!(Config::load("bad.toml").is_err());
            Ok(())
        });
    }
}
