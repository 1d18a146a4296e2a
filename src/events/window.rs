use std::fmt;

/// Кандидат в списке переключателя
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    /// X11 идентификатор окна
    pub id: u32,
    /// Отформатированная строка "класс  имя"
    pub line: String,
    /// Позиция в исходном списке
    pub index: usize,
}

impl fmt::Display for WindowEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} 0x{:x} \"{}\"", self.index, self.id, self.line.trim_start())
    }
}

/// Результат перечисления окон
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowList {
    pub entries: Vec<WindowEntry>,
    /// Окно-проверка EWMH менеджера окон, если он его объявил
    pub wm_check: Option<u32>,
}

impl WindowList {
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.line.clone()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&WindowEntry> {
        self.entries.get(index)
    }

    pub fn is_ewmh(&self) -> bool {
        self.wm_check.is_some()
    }
}

/// Прямоугольник в координатах корневого окна
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        let right = self.x as i64 + self.width as i64;
        let bottom = self.y as i64 + self.height as i64;
        px >= self.x && (px as i64) < right && py >= self.y && (py as i64) < bottom
    }

    pub fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(1920, 0, 1280, 1024);

        assert!(rect.contains(1920, 0));
        assert!(rect.contains(2500, 500));
        assert!(!rect.contains(3200, 500));
        assert!(!rect.contains(1919, 500));
        assert!(!rect.contains(2000, 1024));
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(100, 50, 200, 100);
        assert_eq!(rect.center(), (200, 100));
        assert_eq!(rect.to_string(), "200x100+100+50");
    }

    #[test]
    fn test_window_list_lines() {
        let list = WindowList {
            entries: vec![
                WindowEntry { id: 0x1, line: "Firefox  Web".to_string(), index: 0 },
                WindowEntry { id: 0x2, line: "  XTerm  bash".to_string(), index: 1 },
            ],
            wm_check: None,
        };

        assert_eq!(list.lines(), vec!["Firefox  Web", "  XTerm  bash"]);
        assert_eq!(list.get(1).map(|e| e.id), Some(0x2));
        assert!(list.get(2).is_none());
        assert!(!list.is_ewmh());
    }
}
