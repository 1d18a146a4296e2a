use crate::error::Result;
use crate::events::{Key, KeyPress, Modifiers};
use crate::mappings::KeysymMapper;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt, Keycode, ModMask};

/// Таблица keycode -> keysym, снятая с сервера один раз на сессию
pub struct Keymap {
    min_keycode: Keycode,
    keysyms_per_keycode: usize,
    keysyms: Vec<u32>,
}

impl Keymap {
    pub fn load<C: Connection>(conn: &C) -> Result<Self> {
        let setup = conn.setup();
        let min_keycode = setup.min_keycode;
        let max_keycode = setup.max_keycode;

        let mapping = conn
            .get_keyboard_mapping(min_keycode, max_keycode - min_keycode + 1)?
            .reply()?;

        Ok(Self::from_parts(
            min_keycode,
            mapping.keysyms_per_keycode as usize,
            mapping.keysyms,
        ))
    }

    pub fn from_parts(min_keycode: Keycode, keysyms_per_keycode: usize, keysyms: Vec<u32>) -> Self {
        Self {
            min_keycode,
            keysyms_per_keycode,
            keysyms,
        }
    }

    pub fn keysym(&self, keycode: Keycode, level: usize) -> u32 {
        if keycode < self.min_keycode || level >= self.keysyms_per_keycode {
            return 0;
        }
        let idx = (keycode - self.min_keycode) as usize * self.keysyms_per_keycode + level;
        self.keysyms.get(idx).copied().unwrap_or(0)
    }

    pub fn translate(&self, keycode: Keycode, state: u16, time: u32) -> KeyPress {
        let modifiers = modifiers_from_state(state);
        let base = self.keysym(keycode, 0);

        // С NumLock цифровая клавиатура печатает второй уровень, Shift возвращает первый
        let keypad = self.keysym(keycode, 1);
        if state & u16::from(ModMask::M2) != 0 && KeysymMapper::is_keypad(keypad) {
            let keysym = if modifiers.shift { base } else { keypad };
            return KeyPress::new(KeysymMapper::translate(keysym), modifiers, time);
        }

        // Управляющие клавиши смотрим на нулевом уровне
        if let Some(key) = KeysymMapper::special(base) {
            return KeyPress::new(key, modifiers, time);
        }

        let shifted = match self.keysym(keycode, 1) {
            0 => base,
            sym => sym,
        };
        let keysym = if modifiers.shift { shifted } else { base };

        let key = match KeysymMapper::translate(keysym) {
            Key::Char(c) if state & u16::from(ModMask::LOCK) != 0 && c.is_alphabetic() => {
                let flipped = if modifiers.shift {
                    c.to_lowercase().next()
                } else {
                    c.to_uppercase().next()
                };
                Key::Char(flipped.unwrap_or(c))
            }
            key => key,
        };

        KeyPress::new(key, modifiers, time)
    }
}

pub fn modifiers_from_state(state: u16) -> Modifiers {
    Modifiers {
        ctrl: state & u16::from(ModMask::CONTROL) != 0,
        alt: state & u16::from(ModMask::M1) != 0,
        shift: state & u16::from(ModMask::SHIFT) != 0,
        super_key: state & u16::from(ModMask::M4) != 0,
    }
}
