//! Key events through configured bindings

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tui_2048::input::{handle_key_event, should_quit, KeyBindings, KeyConfig};
use tui_2048::types::{Direction, GameAction};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_vim_style_config() {
    let mut config = KeyConfig::default();
    config.movement.up = vec!["k".into()];
    config.movement.down = vec!["j".into()];
    config.movement.left = vec!["h".into()];
    config.movement.right = vec!["l".into()];
    config.actions.save = vec!["KEY_F2".into()];
    config.actions.load = vec!["KEY_F3".into()];
    let bindings = KeyBindings::from_config(&config).unwrap();

    let dirs: Vec<Option<Direction>> = ['k', 'j', 'h', 'l']
        .iter()
        .map(|&c| handle_key_event(&bindings, press(KeyCode::Char(c))).and_then(|a| a.direction()))
        .collect();
    assert_eq!(
        dirs,
        vec![
            Some(Direction::Up),
            Some(Direction::Down),
            Some(Direction::Left),
            Some(Direction::Right)
        ]
    );
    assert_eq!(handle_key_event(&bindings, press(KeyCode::Up)), None);
    assert_eq!(
        handle_key_event(&bindings, press(KeyCode::F(2))),
        Some(GameAction::Save)
    );
}

#[test]
fn test_clashing_config_reports_every_problem() {
    let mut config = KeyConfig::default();
    config.movement.left = vec!["h".into(), "KEY_LEFT".into()];
    config.actions.quit = vec![];
    config.actions.load = vec!["KEY_F99".into()];
    let err = format!("{:#}", KeyBindings::from_config(&config).unwrap_err());
    assert!(err.contains("'h' is bound to both"), "{}", err);
    assert!(err.contains("no key bound to quit"), "{}", err);
    assert!(err.contains("unknown key 'KEY_F99'"), "{}", err);
}

#[test]
fn test_release_and_modified_keys_are_ignored() {
    let bindings = KeyBindings::default();
    let release = KeyEvent {
        code: KeyCode::Char('w'),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    };
    assert_eq!(handle_key_event(&bindings, release), None);
    assert_eq!(
        handle_key_event(&bindings, KeyEvent::new(KeyCode::Char('w'), KeyModifiers::ALT)),
        None
    );
    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!should_quit(press(KeyCode::Char('c'))));
    assert!(!should_quit(press(KeyCode::Char('q'))));
}
