use crate::error::Result;
use smallvec::SmallVec;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ConnectionExt, GetPropertyReply, GetWindowAttributesReply, MapState, Window,
};

use super::session::X11Session;

/// Сколько атомов _NET_WM_STATE читаем с окна
const MAX_STATES: u32 = 10;
/// Предел длины текстовых свойств в 32-битных словах
const MAX_TEXT_WORDS: u32 = 1024;

const INPUT_HINT: u32 = 1;

impl X11Session {
    /// Свойство окна; `None`, если его нет или оно пустое
    pub fn get_property(
        &self,
        window: Window,
        property: Atom,
        prop_type: Atom,
        max_words: u32,
    ) -> Result<Option<GetPropertyReply>> {
        let reply = self
            .conn()
            .get_property(false, window, property, prop_type, 0, max_words)?
            .reply()?;

        if reply.type_ == x11rb::NONE || reply.format == 0 || reply.value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(reply))
        }
    }

    /// Список окон из свойства типа WINDOW, не более `limit`
    pub fn window_list(&self, window: Window, property: Atom, limit: usize) -> Result<Vec<Window>> {
        let reply = self.get_property(window, property, AtomEnum::WINDOW.into(), limit as u32)?;

        Ok(reply
            .filter(|r| r.type_ == u32::from(AtomEnum::WINDOW))
            .and_then(|r| r.value32().map(|values| values.take(limit).collect()))
            .unwrap_or_default())
    }

    pub fn atom_list(&self, window: Window, property: Atom) -> Result<SmallVec<[Atom; 10]>> {
        let reply = self.get_property(window, property, AtomEnum::ATOM.into(), MAX_STATES)?;

        Ok(reply
            .filter(|r| r.type_ == u32::from(AtomEnum::ATOM))
            .and_then(|r| r.value32().map(|values| values.collect()))
            .unwrap_or_default())
    }

    pub fn attributes(&self, window: Window) -> Result<GetWindowAttributesReply> {
        Ok(self.conn().get_window_attributes(window)?.reply()?)
    }

    /// Окно видимо и управляется менеджером окон
    pub fn is_managed_viewable(&self, window: Window) -> Result<bool> {
        let attrs = self.attributes(window)?;
        Ok(attrs.map_state == MapState::VIEWABLE && !attrs.override_redirect)
    }

    pub fn skips_taskbar(&self, window: Window) -> Result<bool> {
        let atoms = self.atoms();
        let states = self.atom_list(window, atoms._NET_WM_STATE)?;
        Ok(states.contains(&atoms._NET_WM_STATE_SKIP_TASKBAR))
    }

    /// Заголовок окна: _NET_WM_NAME (UTF-8), затем WM_NAME
    pub fn window_name(&self, window: Window) -> Result<Option<String>> {
        let atoms = self.atoms();

        if let Some(reply) =
            self.get_property(window, atoms._NET_WM_NAME, atoms.UTF8_STRING, MAX_TEXT_WORDS)?
        {
            return Ok(Some(String::from_utf8_lossy(&reply.value).into_owned()));
        }

        let reply = self.get_property(
            window,
            AtomEnum::WM_NAME.into(),
            AtomEnum::ANY.into(),
            MAX_TEXT_WORDS,
        )?;

        Ok(reply.map(|r| decode_text(r.type_, &r.value)))
    }

    /// Класс окна из WM_CLASS (вторая строка, res_class)
    pub fn window_class(&self, window: Window) -> Result<Option<String>> {
        let reply = self.get_property(
            window,
            AtomEnum::WM_CLASS.into(),
            AtomEnum::STRING.into(),
            MAX_TEXT_WORDS,
        )?;

        Ok(reply.and_then(|r| parse_wm_class(&r.value)))
    }

    /// Флаг input из WM_HINTS; `None`, если подсказка не задана
    pub fn input_hint(&self, window: Window) -> Result<Option<bool>> {
        let reply = self.get_property(
            window,
            AtomEnum::WM_HINTS.into(),
            AtomEnum::WM_HINTS.into(),
            9,
        )?;

        Ok(reply
            .and_then(|r| r.value32().map(|values| values.collect::<Vec<u32>>()))
            .and_then(|values| parse_input_hint(&values)))
    }
}

/// STRING декодируется как Latin-1, остальные кодировки - как UTF-8 с заменой
pub fn decode_text(prop_type: Atom, value: &[u8]) -> String {
    let value = value.split(|&b| b == 0).next().unwrap_or_default();

    if prop_type == u32::from(AtomEnum::STRING) {
        value.iter().map(|&b| b as char).collect()
    } else {
        String::from_utf8_lossy(value).into_owned()
    }
}

/// WM_CLASS содержит две строки через NUL: instance и class
pub fn parse_wm_class(value: &[u8]) -> Option<String> {
    let mut parts = value.split(|&b| b == 0);
    let _instance = parts.next()?;
    let class = parts.next()?;
    Some(class.iter().map(|&b| b as char).collect())
}

pub fn parse_input_hint(values: &[u32]) -> Option<bool> {
    let flags = *values.first()?;
    if flags & INPUT_HINT == 0 {
        return None;
    }
    values.get(1).map(|&input| input != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wm_class() {
        assert_eq!(parse_wm_class(b"Navigator\0Firefox\0"), Some("Firefox".to_string()));
        assert_eq!(parse_wm_class(b"xterm\0XTerm"), Some("XTerm".to_string()));
        assert_eq!(parse_wm_class(b"only-instance"), None);
    }

    #[test]
    fn test_decode_text() {
        let string = u32::from(AtomEnum::STRING);
        assert_eq!(decode_text(string, b"caf\xe9"), "café");
        assert_eq!(decode_text(string, b"bash\0garbage"), "bash");
        // UTF8_STRING или COMPOUND_TEXT
        assert_eq!(decode_text(300, "файл".as_bytes()), "файл");
    }

    #[test]
    fn test_parse_input_hint() {
        assert_eq!(parse_input_hint(&[1, 1, 0]), Some(true));
        assert_eq!(parse_input_hint(&[1, 0]), Some(false));
        assert_eq!(parse_input_hint(&[0, 1]), None);
        assert_eq!(parse_input_hint(&[]), None);
    }
}
