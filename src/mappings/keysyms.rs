use crate::events::Key;

// Keysym-константы из X11/keysymdef.h
pub const XK_BACKSPACE: u32 = 0xff08;
pub const XK_TAB: u32 = 0xff09;
pub const XK_RETURN: u32 = 0xff0d;
pub const XK_ESCAPE: u32 = 0xff1b;
pub const XK_HOME: u32 = 0xff50;
pub const XK_LEFT: u32 = 0xff51;
pub const XK_UP: u32 = 0xff52;
pub const XK_RIGHT: u32 = 0xff53;
pub const XK_DOWN: u32 = 0xff54;
pub const XK_END: u32 = 0xff57;
pub const XK_KP_ENTER: u32 = 0xff8d;
pub const XK_KP_HOME: u32 = 0xff95;
pub const XK_KP_LEFT: u32 = 0xff96;
pub const XK_KP_UP: u32 = 0xff97;
pub const XK_KP_RIGHT: u32 = 0xff98;
pub const XK_KP_DOWN: u32 = 0xff99;
pub const XK_KP_END: u32 = 0xff9c;
pub const XK_KP_DELETE: u32 = 0xff9f;
pub const XK_KP_SPACE: u32 = 0xff80;
pub const XK_KP_MULTIPLY: u32 = 0xffaa;
pub const XK_KP_7: u32 = 0xffb7;
pub const XK_KP_EQUAL: u32 = 0xffbd;
pub const XK_ISO_LEFT_TAB: u32 = 0xfe20;
pub const XK_DELETE: u32 = 0xffff;

/// Трансляция keysym в клавишу меню
pub struct KeysymMapper;

impl KeysymMapper {
    /// Управляющие клавиши, распознаются на нулевом уровне раскладки
    pub fn special(keysym: u32) -> Option<Key> {
        let key = match keysym {
            XK_BACKSPACE => Key::BackSpace,
            XK_TAB | XK_ISO_LEFT_TAB => Key::Tab,
            XK_RETURN | XK_KP_ENTER => Key::Return,
            XK_ESCAPE => Key::Escape,
            XK_HOME | XK_KP_HOME => Key::Home,
            XK_END | XK_KP_END => Key::End,
            XK_LEFT | XK_KP_LEFT => Key::Left,
            XK_RIGHT | XK_KP_RIGHT => Key::Right,
            XK_UP | XK_KP_UP => Key::Up,
            XK_DOWN | XK_KP_DOWN => Key::Down,
            XK_DELETE | XK_KP_DELETE => Key::Delete,
            _ => return None,
        };
        Some(key)
    }

    /// Клавиши цифровой клавиатуры (KP_Space..KP_Equal)
    pub fn is_keypad(keysym: u32) -> bool {
        (XK_KP_SPACE..=XK_KP_EQUAL).contains(&keysym)
    }

    /// Печатный символ для keysym: Latin-1 напрямую, Unicode через 0x01000000
    pub fn to_char(keysym: u32) -> Option<char> {
        match keysym {
            0x20..=0x7e | 0xa0..=0xff => char::from_u32(keysym),
            // KP_Space и KP_Multiply..KP_Equal повторяют ASCII со сдвигом 0xff80
            XK_KP_SPACE | XK_KP_MULTIPLY..=XK_KP_EQUAL => char::from_u32(keysym - XK_KP_SPACE),
            0x0100_0100..=0x0110_ffff => char::from_u32(keysym - 0x0100_0000),
            _ => None,
        }
        .filter(|c| !c.is_control())
    }

    pub fn translate(keysym: u32) -> Key {
        if let Some(key) = Self::special(keysym) {
            return key;
        }
        match Self::to_char(keysym) {
            Some(c) => Key::Char(c),
            None => Key::Other(keysym),
        }
    }
}
