use crate::config::WindowsConfig;
use crate::events::WindowEntry;

/// Сырые данные окна до форматирования
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWindow {
    pub id: u32,
    pub name: Option<String>,
    pub class: Option<String>,
}

impl RawWindow {
    pub fn new(id: u32, class: &str, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            class: Some(class.to_string()),
        }
    }
}

/// Ширины колонок по наблюдаемым классам и именам
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub class: usize,
    pub name: usize,
}

impl ColumnWidths {
    pub fn measure(windows: &[RawWindow], config: &WindowsConfig) -> Self {
        windows.iter().fold(
            Self {
                class: config.min_class_width,
                name: config.min_name_width,
            },
            |widths, window| match (&window.class, &window.name) {
                (Some(class), Some(name)) => Self {
                    class: widths.class.max(class.chars().count()),
                    name: widths.name.max(name.chars().count()),
                },
                _ => widths,
            },
        )
    }
}

/// Строки меню: класс выровнен вправо по ширине колонки, два пробела, имя.
///
/// Окна без имени или класса в список не попадают.
pub fn format_entries(windows: Vec<RawWindow>, widths: ColumnWidths) -> Vec<WindowEntry> {
    windows
        .into_iter()
        .filter_map(|window| match (window.class, window.name) {
            (Some(class), Some(name)) => Some((window.id, class, name)),
            _ => None,
        })
        .enumerate()
        .map(|(index, (id, class, name))| WindowEntry {
            id,
            line: format!("{:>width$}  {}", class, name, width = widths.class),
            index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn config() -> WindowsConfig {
        Config::default().windows
    }

    fn format(windows: Vec<RawWindow>) -> Vec<WindowEntry> {
        let widths = ColumnWidths::measure(&windows, &config());
        format_entries(windows, widths)
    }

    #[test]
    fn test_class_column_right_aligned() {
        let entries = format(vec![
            RawWindow::new(1, "Firefox", "Mozilla Firefox"),
            RawWindow::new(2, "XTerm", "bash"),
        ]);

        assert_eq!(entries[0].line, "Firefox  Mozilla Firefox");
        assert_eq!(entries[1].line, "  XTerm  bash");
        assert_eq!(entries[1].id, 2);
        assert_eq!(entries[1].index, 1);
    }

    #[test]
    fn test_minimum_class_width() {
        let entries = format(vec![RawWindow::new(7, "st", "vim")]);
        assert_eq!(entries[0].line, "   st  vim");
    }

    #[test]
    fn test_incomplete_windows_dropped_and_not_measured() {
        let windows = vec![
            RawWindow { id: 1, name: None, class: Some("VeryLongClassName".to_string()) },
            RawWindow::new(2, "Emacs", "notes.org"),
            RawWindow { id: 3, name: Some("untitled".to_string()), class: None },
        ];

        let widths = ColumnWidths::measure(&windows, &config());
        assert_eq!(widths, ColumnWidths { class: 5, name: 10 });

        let entries = format_entries(windows, widths);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[0].index, 0);
        assert_eq!(entries[0].line, "Emacs  notes.org");
    }

    #[test]
    fn test_name_width_tracks_longest_name() {
        let windows = vec![RawWindow::new(1, "Gimp", "Untitled image - GNU Image")];
        let widths = ColumnWidths::measure(&windows, &config());
        assert_eq!(widths.name, 26);
    }
}
