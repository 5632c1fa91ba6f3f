//! Key names as written in the config file.
//!
//! A name is either a single printable ASCII character (`"w"`, `"/"`) or one of the
//! special names `ESC`, `SPACE`, `KEY_UP`, `KEY_DOWN`, `KEY_LEFT`, `KEY_RIGHT`,
//! `KEY_ENTER`, `KEY_BACKSPACE`, `KEY_DELETE`, `KEY_INSERT`, `KEY_HOME`, `KEY_END`,
//! `KEY_PPAGE`, `KEY_NPAGE` and `KEY_F1` .. `KEY_F12`. Anything else is rejected.

use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySpec {
    Char(char),
    Space,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl KeySpec {
    /// Parse a config key name.
    pub fn parse(name: &str) -> Option<Self> {
        let key = match name {
            "ESC" => KeySpec::Esc,
            "SPACE" => KeySpec::Space,
            "KEY_UP" => KeySpec::Up,
            "KEY_DOWN" => KeySpec::Down,
            "KEY_LEFT" => KeySpec::Left,
            "KEY_RIGHT" => KeySpec::Right,
            "KEY_ENTER" => KeySpec::Enter,
            "KEY_BACKSPACE" => KeySpec::Backspace,
            "KEY_DELETE" => KeySpec::Delete,
            "KEY_INSERT" => KeySpec::Insert,
            "KEY_HOME" => KeySpec::Home,
            "KEY_END" => KeySpec::End,
            "KEY_PPAGE" => KeySpec::PageUp,
            "KEY_NPAGE" => KeySpec::PageDown,
            _ => {
                if let Some(n) = name.strip_prefix("KEY_F") {
                    let n: u8 = n.parse().ok()?;
                    return (1..=12).contains(&n).then_some(KeySpec::F(n));
                }
                let mut chars = name.chars();
                let ch = chars.next()?;
                if chars.next().is_some() || !ch.is_ascii_graphic() {
                    return None;
                }
                KeySpec::Char(ch)
            }
        };
        Some(key)
    }

    /// Map a terminal key code back to a key spec, if it is bindable.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::Char(' ') => KeySpec::Space,
            KeyCode::Char(ch) if ch.is_ascii_graphic() => KeySpec::Char(ch),
            KeyCode::Esc => KeySpec::Esc,
            KeyCode::Up => KeySpec::Up,
            KeyCode::Down => KeySpec::Down,
            KeyCode::Left => KeySpec::Left,
            KeyCode::Right => KeySpec::Right,
            KeyCode::Enter => KeySpec::Enter,
            KeyCode::Backspace => KeySpec::Backspace,
            KeyCode::Delete => KeySpec::Delete,
            KeyCode::Insert => KeySpec::Insert,
            KeyCode::Home => KeySpec::Home,
            KeyCode::End => KeySpec::End,
            KeyCode::PageUp => KeySpec::PageUp,
            KeyCode::PageDown => KeySpec::PageDown,
            KeyCode::F(n) if (1..=12).contains(&n) => KeySpec::F(n),
            _ => return None,
        };
        Some(key)
    }

    /// Config name (inverse of [`KeySpec::parse`]).
    pub fn name(&self) -> String {
        match self {
            KeySpec::Char(ch) => ch.to_string(),
            KeySpec::Space => "SPACE".into(),
            KeySpec::Esc => "ESC".into(),
            KeySpec::Up => "KEY_UP".into(),
            KeySpec::Down => "KEY_DOWN".into(),
            KeySpec::Left => "KEY_LEFT".into(),
            KeySpec::Right => "KEY_RIGHT".into(),
            KeySpec::Enter => "KEY_ENTER".into(),
            KeySpec::Backspace => "KEY_BACKSPACE".into(),
            KeySpec::Delete => "KEY_DELETE".into(),
            KeySpec::Insert => "KEY_INSERT".into(),
            KeySpec::Home => "KEY_HOME".into(),
            KeySpec::End => "KEY_END".into(),
            KeySpec::PageUp => "KEY_PPAGE".into(),
            KeySpec::PageDown => "KEY_NPAGE".into(),
            KeySpec::F(n) => format!("KEY_F{}", n),
        }
    }

    /// Short label for help text.
    pub fn display_name(&self) -> String {
        match self {
            KeySpec::Char(ch) => ch.to_string(),
            KeySpec::Space => "Space".into(),
            KeySpec::Esc => "Esc".into(),
            KeySpec::Up => "↑".into(),
            KeySpec::Down => "↓".into(),
            KeySpec::Left => "←".into(),
            KeySpec::Right => "→".into(),
            KeySpec::Enter => "Enter".into(),
            KeySpec::Backspace => "Backspace".into(),
            KeySpec::Delete => "Delete".into(),
            KeySpec::Insert => "Insert".into(),
            KeySpec::Home => "Home".into(),
            KeySpec::End => "End".into(),
            KeySpec::PageUp => "Page Up".into(),
            KeySpec::PageDown => "Page Down".into(),
            KeySpec::F(n) => format!("F{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_special_names() {
        assert_eq!(KeySpec::parse("KEY_UP"), Some(KeySpec::Up));
        assert_eq!(KeySpec::parse("ESC"), Some(KeySpec::Esc));
        assert_eq!(KeySpec::parse("SPACE"), Some(KeySpec::Space));
        assert_eq!(KeySpec::parse("KEY_F12"), Some(KeySpec::F(12)));
        assert_eq!(KeySpec::parse("KEY_NPAGE"), Some(KeySpec::PageDown));
    }

    #[test]
    fn parses_single_printable_chars() {
        assert_eq!(KeySpec::parse("w"), Some(KeySpec::Char('w')));
        assert_eq!(KeySpec::parse("W"), Some(KeySpec::Char('W')));
        assert_eq!(KeySpec::parse("/"), Some(KeySpec::Char('/')));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(KeySpec::parse(""), None);
        assert_eq!(KeySpec::parse("ww"), None);
        assert_eq!(KeySpec::parse(" "), None);
        assert_eq!(KeySpec::parse("KEY_F13"), None);
        assert_eq!(KeySpec::parse("KEY_F0"), None);
        assert_eq!(KeySpec::parse("KEY_TAB"), None);
        assert_eq!(KeySpec::parse("é"), None);
    }

    #[test]
    fn names_round_trip() {
        for name in ["a", "?", "ESC", "SPACE", "KEY_LEFT", "KEY_PPAGE", "KEY_F5"] {
            let key = KeySpec::parse(name).unwrap();
            assert_eq!(key.name(), name);
        }
    }

    #[test]
    fn key_codes_map_back() {
        assert_eq!(KeySpec::from_key_code(KeyCode::Char(' ')), Some(KeySpec::Space));
        assert_eq!(KeySpec::from_key_code(KeyCode::Char('q')), Some(KeySpec::Char('q')));
        assert_eq!(KeySpec::from_key_code(KeyCode::F(3)), Some(KeySpec::F(3)));
        assert_eq!(KeySpec::from_key_code(KeyCode::Tab), None);
    }
}
