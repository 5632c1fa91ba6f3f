//! Key bindings: the serde config shape and the validated lookup table built from it.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::keys::KeySpec;
use crate::types::GameAction;

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementKeys {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl Default for MovementKeys {
    fn default() -> Self {
        Self {
            up: keys(&["KEY_UP", "w"]),
            down: keys(&["KEY_DOWN", "s"]),
            left: keys(&["KEY_LEFT", "a"]),
            right: keys(&["KEY_RIGHT", "d"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionKeys {
    pub quit: Vec<String>,
    pub save: Vec<String>,
    pub load: Vec<String>,
    pub return_to_title: Vec<String>,
    pub settings: Vec<String>,
}

impl Default for ActionKeys {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "ESC"]),
            save: keys(&["h"]),
            load: keys(&["l"]),
            return_to_title: keys(&["r"]),
            settings: keys(&["o"]),
        }
    }
}

/// Key section of the config file, as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub movement: MovementKeys,
    pub actions: ActionKeys,
}

impl KeyConfig {
    /// Configured key names for `action`.
    pub fn names_for(&self, action: GameAction) -> &[String] {
        match action {
            GameAction::MoveUp => &self.movement.up,
            GameAction::MoveDown => &self.movement.down,
            GameAction::MoveLeft => &self.movement.left,
            GameAction::MoveRight => &self.movement.right,
            GameAction::Quit => &self.actions.quit,
            GameAction::Save => &self.actions.save,
            GameAction::Load => &self.actions.load,
            GameAction::ReturnToTitle => &self.actions.return_to_title,
            GameAction::Settings => &self.actions.settings,
        }
    }

    fn names_for_mut(&mut self, action: GameAction) -> &mut Vec<String> {
        match action {
            GameAction::MoveUp => &mut self.movement.up,
            GameAction::MoveDown => &mut self.movement.down,
            GameAction::MoveLeft => &mut self.movement.left,
            GameAction::MoveRight => &mut self.movement.right,
            GameAction::Quit => &mut self.actions.quit,
            GameAction::Save => &mut self.actions.save,
            GameAction::Load => &mut self.actions.load,
            GameAction::ReturnToTitle => &mut self.actions.return_to_title,
            GameAction::Settings => &mut self.actions.settings,
        }
    }

    /// Bind one more key to `action`.
    ///
    /// The edit is kept only if the whole config still validates, so a key that is
    /// unknown or already bound elsewhere leaves `self` unchanged.
    pub fn add_key(&mut self, action: GameAction, name: &str) -> Result<KeyBindings> {
        if self.names_for(action).iter().any(|n| n == name) {
            bail!("key '{}' is already bound to {}", name, action.as_str());
        }
        let mut candidate = self.clone();
        candidate.names_for_mut(action).push(name.to_string());
        self.commit(candidate)
    }

    /// Unbind a key from `action`. Movements and quit keep at least one key.
    pub fn remove_key(&mut self, action: GameAction, name: &str) -> Result<KeyBindings> {
        let mut candidate = self.clone();
        let names = candidate.names_for_mut(action);
        let Some(pos) = names.iter().position(|n| n == name) else {
            bail!("key '{}' is not bound to {}", name, action.as_str());
        };
        names.remove(pos);
        self.commit(candidate)
    }

    fn commit(&mut self, candidate: KeyConfig) -> Result<KeyBindings> {
        let bindings = KeyBindings::from_config(&candidate)?;
        *self = candidate;
        Ok(bindings)
    }
}

/// Validated key → action table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    entries: Vec<(KeySpec, GameAction)>,
}

impl KeyBindings {
    /// Build the table, rejecting unknown key names, keys bound twice, movements
    /// without a key and a missing quit key. All problems are reported together.
    pub fn from_config(config: &KeyConfig) -> Result<Self> {
        let mut entries: Vec<(KeySpec, GameAction)> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for action in GameAction::ALL {
            let names = config.names_for(action);
            if names.is_empty() && (action.direction().is_some() || action == GameAction::Quit)
            {
                errors.push(format!("no key bound to {}", action.as_str()));
            }
            for name in names {
                let Some(key) = KeySpec::parse(name) else {
                    errors.push(format!("unknown key '{}' in {}", name, action.as_str()));
                    continue;
                };
                if let Some((_, other)) = entries.iter().find(|(k, _)| *k == key) {
                    errors.push(format!(
                        "key '{}' is bound to both {} and {}",
                        name,
                        other.as_str(),
                        action.as_str()
                    ));
                    continue;
                }
                entries.push((key, action));
            }
        }

        if !errors.is_empty() {
            bail!("invalid key bindings: {}", errors.join("; "));
        }
        Ok(Self { entries })
    }

    pub fn action_for(&self, key: KeySpec) -> Option<GameAction> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, action)| *action)
    }

    pub fn keys_for(&self, action: GameAction) -> impl Iterator<Item = KeySpec> + '_ {
        self.entries
            .iter()
            .filter(move |(_, a)| *a == action)
            .map(|(k, _)| *k)
    }

    /// Display names of the keys bound to `action`, joined with `/`.
    pub fn describe(&self, action: GameAction) -> String {
        self.keys_for(action)
            .map(|k| k.display_name())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let config = KeyConfig::default();
        let entries = GameAction::ALL
            .iter()
            .flat_map(|&action| {
                config
                    .names_for(action)
                    .iter()
                    .filter_map(move |name| KeySpec::parse(name).map(|key| (key, action)))
            })
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let bindings = KeyBindings::from_config(&KeyConfig::default()).unwrap();
        assert_eq!(bindings, KeyBindings::default());
        assert_eq!(bindings.action_for(KeySpec::Up), Some(GameAction::MoveUp));
        assert_eq!(bindings.action_for(KeySpec::Char('d')), Some(GameAction::MoveRight));
        assert_eq!(bindings.action_for(KeySpec::Esc), Some(GameAction::Quit));
        assert_eq!(bindings.action_for(KeySpec::Char('x')), None);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut config = KeyConfig::default();
        config.actions.save.push("w".into());
        let err = KeyBindings::from_config(&config).unwrap_err().to_string();
        assert!(err.contains("bound to both up and save"), "{}", err);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut config = KeyConfig::default();
        config.movement.left.push("KEY_TAB".into());
        let err = KeyBindings::from_config(&config).unwrap_err().to_string();
        assert!(err.contains("unknown key 'KEY_TAB'"), "{}", err);
    }

    #[test]
    fn movement_and_quit_need_a_key() {
        let mut config = KeyConfig::default();
        config.movement.down.clear();
        config.actions.quit.clear();
        let err = KeyBindings::from_config(&config).unwrap_err().to_string();
        assert!(err.contains("no key bound to down"), "{}", err);
        assert!(err.contains("no key bound to quit"), "{}", err);
    }

    #[test]
    fn optional_actions_may_be_unbound() {
        let mut config = KeyConfig::default();
        config.actions.save.clear();
        config.actions.load.clear();
        let bindings = KeyBindings::from_config(&config).unwrap();
        assert_eq!(bindings.describe(GameAction::Save), "");
    }

    #[test]
    fn describe_joins_display_names() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.describe(GameAction::MoveUp), "↑/w");
        assert_eq!(bindings.describe(GameAction::Quit), "q/Esc");
    }

    #[test]
    fn add_key_extends_bindings() {
        let mut config = KeyConfig::default();
        let bindings = config.add_key(GameAction::MoveUp, "k").unwrap();
        assert_eq!(config.movement.up, keys(&["KEY_UP", "w", "k"]));
        assert_eq!(bindings.action_for(KeySpec::Char('k')), Some(GameAction::MoveUp));
    }

    #[test]
    fn add_key_rejects_conflicts_and_keeps_config() {
        let mut config = KeyConfig::default();
        let err = config.add_key(GameAction::Load, "w").unwrap_err().to_string();
        assert!(err.contains("bound to both up and load"), "{}", err);
        let err = config.add_key(GameAction::MoveUp, "w").unwrap_err().to_string();
        assert!(err.contains("already bound to up"), "{}", err);
        assert!(config.add_key(GameAction::Save, "KEY_TAB").is_err());
        assert_eq!(config, KeyConfig::default());
    }

    #[test]
    fn remove_key_keeps_required_bindings() {
        let mut config = KeyConfig::default();
        config.remove_key(GameAction::MoveLeft, "a").unwrap();
        let err = config
            .remove_key(GameAction::MoveLeft, "KEY_LEFT")
            .unwrap_err()
            .to_string();
        assert!(err.contains("no key bound to left"), "{}", err);
        assert_eq!(config.movement.left, keys(&["KEY_LEFT"]));

        config.remove_key(GameAction::Quit, "ESC").unwrap();
        assert!(config.remove_key(GameAction::Quit, "q").is_err());

        let bindings = config.remove_key(GameAction::Settings, "o").unwrap();
        assert_eq!(bindings.describe(GameAction::Settings), "");
        assert!(config.remove_key(GameAction::Save, "z").is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: KeyConfig =
            serde_json::from_str(r#"{"movement": {"up": ["k"]}, "actions": {"change_theme": ["t"]}}"#)
                .unwrap();
        assert_eq!(config.movement.up, vec!["k".to_string()]);
        assert_eq!(config.movement.down, MovementKeys::default().down);
        assert_eq!(config.actions, ActionKeys::default());
    }
}
