use crate::config::{parse_color, Config};
use crate::error::Result;
use crate::events::{InputEvent, Rect};
use crate::services::menu::{MenuBackendTrait, MenuFrame};
use crate::switch_error;
use std::rc::Rc;
use tracing::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::protocol::Event;
use x11rb::wrapper::ConnectionExt as _;

use super::keymap::Keymap;
use super::placement::{self, BORDER_WIDTH, PADDING};
use super::session::X11Session;

const FALLBACK_FONT: &str = "fixed";

/// Цвета меню в пикселях TrueColor
#[derive(Debug, Clone, Copy)]
struct MenuColors {
    foreground: u32,
    background: u32,
    highlight_foreground: u32,
    highlight_background: u32,
    border: u32,
}

impl MenuColors {
    fn from_config(config: &Config) -> Result<Self> {
        let color = |value: &str| {
            parse_color(value).ok_or_else(|| switch_error!(internal, "неверный цвет '{}'", value))
        };
        Ok(Self {
            foreground: color(&config.menu.foreground)?,
            background: color(&config.menu.background)?,
            highlight_foreground: color(&config.menu.highlight_foreground)?,
            highlight_background: color(&config.menu.highlight_background)?,
            border: color(&config.menu.border)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct FontMetrics {
    ascent: u32,
    char_width: u32,
    line_height: u32,
}

/// Пара GC для одного стиля строки: текст и заливка фона
#[derive(Debug, Clone, Copy)]
struct RowStyle {
    text: Gcontext,
    fill: Gcontext,
}

/// Созданное окно меню со всеми серверными ресурсами
struct Surface {
    window: Window,
    font: Font,
    normal: RowStyle,
    highlight: RowStyle,
    metrics: FontMetrics,
    geometry: Rect,
}

/// Бэкенд меню поверх X11: override-redirect окно, core-шрифт, захват клавиатуры
pub struct X11MenuBackend {
    session: Rc<X11Session>,
    colors: MenuColors,
    font_name: String,
    width: u32,
    monitor: Rect,
    keymap: Keymap,
    surface: Option<Surface>,
}

impl X11MenuBackend {
    pub fn new(session: Rc<X11Session>, config: &Config, monitor: Rect) -> Result<Self> {
        info!("Инициализация X11MenuBackend на мониторе {}", monitor);

        let keymap = Keymap::load(session.conn())?;

        Ok(Self {
            colors: MenuColors::from_config(config)?,
            font_name: config.menu.font.clone(),
            width: config.menu.width,
            monitor,
            keymap,
            session,
            surface: None,
        })
    }

    fn open_font(&self) -> Result<(Font, QueryFontReply)> {
        let conn = self.session.conn();

        for name in [self.font_name.as_str(), FALLBACK_FONT] {
            let font = conn.generate_id()?;
            conn.open_font(font, name.as_bytes())?;

            match conn.query_font(font)?.reply() {
                Ok(reply) => {
                    debug!("Открыт шрифт '{}'", name);
                    return Ok((font, reply));
                }
                Err(e) => {
                    warn!("Не удалось открыть шрифт '{}': {}", name, e);
                }
            }
        }

        Err(switch_error!(
            service_unavailable,
            "нет ни шрифта '{}', ни '{}'",
            self.font_name,
            FALLBACK_FONT
        ))
    }

    fn create_style(&self, window: Window, font: Font, fg: u32, bg: u32) -> Result<RowStyle> {
        let conn = self.session.conn();

        let text = conn.generate_id()?;
        conn.create_gc(
            text,
            window,
            &CreateGCAux::new().foreground(fg).background(bg).font(font),
        )?;

        let fill = conn.generate_id()?;
        conn.create_gc(fill, window, &CreateGCAux::new().foreground(bg))?;

        Ok(RowStyle { text, fill })
    }

    fn translate_event(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Expose(_) => Some(InputEvent::Redraw),
            Event::KeyPress(e) => {
                let press = self.keymap.translate(e.detail, u16::from(e.state), e.time);
                Some(InputEvent::Key(press))
            }
            Event::Error(e) => {
                // Окна могут исчезать во время работы меню
                debug!("Игнорируем ошибку X11: {:?}", e.error_kind);
                None
            }
            _ => None,
        }
    }

    fn draw_line(
        &self,
        surface: &Surface,
        style: RowStyle,
        top: i32,
        text: &str,
    ) -> Result<()> {
        let conn = self.session.conn();
        let width = surface.geometry.width.saturating_sub(2 * PADDING);

        conn.poly_fill_rectangle(
            surface.window,
            style.fill,
            &[Rectangle {
                x: PADDING as i16,
                y: top as i16,
                width: width as u16,
                height: surface.metrics.line_height as u16,
            }],
        )?;

        let max_chars = (width / surface.metrics.char_width.max(1)) as usize;
        let bytes = encode_latin1(text, max_chars);
        if !bytes.is_empty() {
            conn.image_text8(
                surface.window,
                style.text,
                PADDING as i16,
                (top + surface.metrics.ascent as i32) as i16,
                &bytes,
            )?;
        }
        Ok(())
    }
}

impl MenuBackendTrait for X11MenuBackend {
    fn open(&mut self, rows: usize) -> Result<()> {
        let conn = self.session.conn();
        let screen = self.session.screen();
        let atoms = self.session.atoms();

        let (font, font_info) = self.open_font()?;
        let font_height = (font_info.font_ascent.max(0) + font_info.font_descent.max(0)) as u32;
        let metrics = FontMetrics {
            ascent: font_info.font_ascent.max(0) as u32,
            char_width: font_info.max_bounds.character_width.max(1) as u32,
            line_height: placement::line_height(font_height),
        };

        let geometry = placement::menu_geometry(&self.monitor, self.width, metrics.line_height, rows);
        debug!("Геометрия меню: {}", geometry);

        let window = conn.generate_id()?;
        conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            window,
            screen.root,
            clamp_i16(geometry.x),
            clamp_i16(geometry.y),
            clamp_u16(geometry.width),
            clamp_u16(geometry.height),
            BORDER_WIDTH,
            WindowClass::INPUT_OUTPUT,
            x11rb::COPY_FROM_PARENT,
            &CreateWindowAux::new()
                .background_pixel(self.colors.background)
                .border_pixel(self.colors.border)
                .override_redirect(1)
                .event_mask(EventMask::EXPOSURE | EventMask::KEY_PRESS),
        )?;

        conn.change_property32(
            PropMode::REPLACE,
            window,
            atoms._NET_WM_STATE,
            AtomEnum::ATOM,
            &[atoms._NET_WM_STATE_ABOVE],
        )?;

        let normal = self.create_style(window, font, self.colors.foreground, self.colors.background)?;
        let highlight = self.create_style(
            window,
            font,
            self.colors.highlight_foreground,
            self.colors.highlight_background,
        )?;

        conn.map_window(window)?;
        conn.configure_window(window, &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE))?;
        conn.flush()?;

        self.surface = Some(Surface {
            window,
            font,
            normal,
            highlight,
            metrics,
            geometry,
        });

        info!("Окно меню 0x{:x} открыто ({} строк)", window, rows);
        Ok(())
    }

    fn grab_keyboard(&mut self) -> Result<bool> {
        let Some(surface) = &self.surface else {
            return Ok(false);
        };

        let reply = self
            .session
            .conn()
            .grab_keyboard(
                true,
                surface.window,
                x11rb::CURRENT_TIME,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
            )?
            .reply()?;

        Ok(reply.status == GrabStatus::SUCCESS)
    }

    fn release_keyboard(&mut self) {
        let conn = self.session.conn();
        if let Err(e) = conn.ungrab_keyboard(x11rb::CURRENT_TIME) {
            warn!("Не удалось освободить клавиатуру: {}", e);
        }
        if let Err(e) = conn.flush() {
            warn!("Не удалось отправить запросы X-серверу: {}", e);
        }
    }

    fn close(&mut self) {
        let Some(surface) = self.surface.take() else {
            return;
        };
        let conn = self.session.conn();

        let result = (|| -> Result<()> {
            for gc in [
                surface.normal.text,
                surface.normal.fill,
                surface.highlight.text,
                surface.highlight.fill,
            ] {
                conn.free_gc(gc)?;
            }
            conn.close_font(surface.font)?;
            conn.destroy_window(surface.window)?;
            conn.flush()?;
            Ok(())
        })();

        match result {
            Ok(()) => debug!("Окно меню 0x{:x} уничтожено", surface.window),
            Err(e) => warn!("Ошибка при закрытии окна меню: {}", e),
        }
    }

    fn wait_event(&mut self) -> Result<InputEvent> {
        loop {
            let event = self.session.conn().wait_for_event()?;
            if let Some(event) = self.translate_event(event) {
                return Ok(event);
            }
        }
    }

    fn poll_event(&mut self) -> Result<Option<InputEvent>> {
        while let Some(event) = self.session.conn().poll_for_event()? {
            if let Some(event) = self.translate_event(event) {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &MenuFrame<'_>) -> Result<()> {
        let Some(surface) = &self.surface else {
            return Ok(());
        };
        let line_height = surface.metrics.line_height;

        let input = format!("{}{}", frame.prompt, frame.text);
        self.draw_line(surface, surface.normal, placement::row_top(0, line_height), &input)?;

        // Курсор: вертикальная черта после символа под курсором
        let cursor_x = PADDING + (frame.prompt.chars().count() + frame.cursor) as u32 * surface.metrics.char_width;
        if cursor_x < surface.geometry.width.saturating_sub(PADDING) {
            self.session.conn().poly_fill_rectangle(
                surface.window,
                surface.normal.text,
                &[Rectangle {
                    x: cursor_x as i16,
                    y: placement::row_top(0, line_height) as i16,
                    width: 1,
                    height: line_height as u16,
                }],
            )?;
        }

        for (row, line) in frame.rows.iter().enumerate() {
            let style = if frame.selected == Some(row) {
                surface.highlight
            } else {
                surface.normal
            };
            let top = placement::row_top(row + 1, line_height);
            self.draw_line(surface, style, top, line.unwrap_or(""))?;
        }

        self.session.conn().flush()?;
        Ok(())
    }
}

impl Drop for X11MenuBackend {
    fn drop(&mut self) {
        self.close();
    }
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i16::MIN.into(), i16::MAX.into()) as i16
}

fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Core-шрифты рисуют 8-битный текст: символы вне Latin-1 заменяются на '?'
pub fn encode_latin1(text: &str, max_chars: usize) -> Vec<u8> {
    text.chars()
        .take(max_chars.min(255))
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_latin1() {
        assert_eq!(encode_latin1("XTerm  bash", 100), b"XTerm  bash".to_vec());
        assert_eq!(encode_latin1("café", 100), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(encode_latin1("файл", 100), b"????".to_vec());
    }

    #[test]
    fn test_encode_latin1_truncates() {
        assert_eq!(encode_latin1("abcdef", 3), b"abc".to_vec());
        assert_eq!(encode_latin1(&"x".repeat(400), 1000).len(), 255);
    }

    #[test]
    fn test_geometry_clamped_to_protocol_range() {
        assert_eq!(clamp_u16(70_000), u16::MAX);
        assert_eq!(clamp_u16(640), 640);
        assert_eq!(clamp_i16(-40_000), i16::MIN);
        assert_eq!(clamp_i16(120), 120);
    }

    #[test]
    fn test_menu_colors_from_default_config() {
        let colors = MenuColors::from_config(&Config::default()).unwrap();
        assert_eq!(colors.background, 0x222222);
        assert_eq!(colors.highlight_background, 0x005577);
    }
}
