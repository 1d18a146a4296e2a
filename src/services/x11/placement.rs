use crate::events::Rect;

/// Внутренний отступ окна меню
pub const PADDING: u32 = 5;
pub const BORDER_WIDTH: u16 = 1;

/// Высота строки: высота шрифта плюс десятая часть на межстрочный интервал
pub fn line_height(font_height: u32) -> u32 {
    font_height + font_height / 10
}

/// Ширина меню: до 100 включительно - проценты ширины монитора
pub fn menu_width(monitor: &Rect, width: u32) -> u32 {
    if width <= 100 {
        (monitor.width / 100) * width
    } else {
        width
    }
}

/// Геометрия окна меню, отцентрованного на мониторе
pub fn menu_geometry(monitor: &Rect, width: u32, line_height: u32, rows: usize) -> Rect {
    let width = menu_width(monitor, width).max(2 * PADDING + 1);
    let height = line_height * (rows as u32 + 1) + 8;

    let x = monitor.x + (monitor.width as i32 - width as i32) / 2;
    let y = monitor.y + (monitor.height as i32 - height as i32) / 2;

    Rect::new(x, y, width, height)
}

/// Верх строки `row` списка (строка 0 - поле ввода)
pub fn row_top(row: usize, line_height: u32) -> i32 {
    (row as u32 * line_height + PADDING) as i32
}
