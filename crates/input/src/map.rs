//! Mapping from terminal key events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::bindings::KeyBindings;
use crate::keys::KeySpec;
use crate::types::GameAction;

/// Map a key press to a bound action. Releases and repeats are ignored.
pub fn handle_key_event(bindings: &KeyBindings, key: KeyEvent) -> Option<GameAction> {
    bindable_key(key).and_then(|spec| bindings.action_for(spec))
}

/// The key a press would bind to, or `None` for releases, Ctrl/Alt chords and keys
/// with no config name.
pub fn bindable_key(key: KeyEvent) -> Option<KeySpec> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    KeySpec::from_key_code(key.code)
}

/// Ctrl-C always quits, whatever the bindings say.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
