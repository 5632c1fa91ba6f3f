//! Driver: title menu, play screen, save/load slot pickers, the save-name prompt and
//! the settings pages.
//!
//! `App` is a small state machine fed with crossterm key events. It owns the game and
//! the collaborators (config, bindings, save store, spawn policy, rng) and renders the
//! current screen into a framebuffer. Apart from writing the config and save files it
//! performs no I/O, so it can be driven from tests.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::core::{play_turn, Game, SpawnPolicy};
use crate::input::{bindable_key, handle_key_event, should_quit, KeyBindings, KeyConfig, KeySpec};
use crate::store::{sanitize_name, save_config, Config, SaveStore, SlotSummary};
use crate::term::{FrameBuffer, GameView, Hud, MenuView, Theme, Viewport};
use crate::types::{GameAction, MAX_SAVE_NAME_LEN};

const STATUS_MS: u64 = 3_000;
const TITLE_ITEMS: [&str; 4] = ["New Game", "Load Game", "Settings", "Quit"];
const TITLE_SETTINGS: usize = 2;
const LIST_FOOTER: &str = "↑/↓ select  Enter confirm  Esc back";

/// Startup settings resolved from the command line and config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub board_size: usize,
    pub seed: Option<u64>,
    pub saves_dir: PathBuf,
    pub config: Config,
    /// Where settings changes are written.
    pub config_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotMode {
    Save,
    Load,
}

/// A list page of the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsPage {
    /// Key bindings, theme, reset.
    Main,
    /// Every action with its keys.
    Keys,
    /// Remove or add keys for one action.
    Action(GameAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    Title {
        selected: usize,
    },
    Playing,
    SlotPicker {
        mode: SlotMode,
        selected: usize,
        slots: Vec<SlotSummary>,
        /// Where Esc goes back to.
        from_title: bool,
    },
    NamePrompt {
        slot: u8,
        input: String,
    },
    Settings {
        page: SettingsPage,
        selected: usize,
        from_title: bool,
    },
    /// Waiting for the key to bind to `action`.
    CaptureKey {
        action: GameAction,
        from_title: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    game: Game,
    board_size: usize,
    config: Config,
    config_path: PathBuf,
    bindings: KeyBindings,
    store: SaveStore,
    policy: SpawnPolicy,
    rng: SmallRng,
    screen: Screen,
    status: Option<(String, Instant)>,
    win_banner: bool,
    controls: String,
    game_view: GameView,
    menu_view: MenuView,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let mut config = settings.config;
        let bindings = config.settle_bindings();
        let theme = Theme::from_name(&config.theme);
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let controls = controls_help(&bindings);
        Self {
            game: Game::new(settings.board_size),
            board_size: settings.board_size,
            config,
            config_path: settings.config_path,
            bindings,
            store: SaveStore::new(settings.saves_dir),
            policy: SpawnPolicy::default(),
            rng,
            screen: Screen::Title { selected: 0 },
            status: None,
            win_banner: false,
            controls,
            game_view: GameView::new(theme),
            menu_view: MenuView::new(theme),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Current status line, if it has not expired.
    pub fn status(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < Duration::from_millis(STATUS_MS))
            .map(|(text, _)| text.as_str())
    }

    /// Hash of what the next frame depends on, besides time.
    pub fn fingerprint(&self, now: Instant) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.screen.hash(&mut hasher);
        self.game.snapshot().fingerprint().hash(&mut hasher);
        self.status(now).hash(&mut hasher);
        self.win_banner.hash(&mut hasher);
        self.game_view.theme().name().hash(&mut hasher);
        hasher.finish()
    }

    pub fn new_game(&mut self) {
        self.game = Game::new(self.board_size);
        self.game.start_with(&mut self.rng);
        self.win_banner = false;
        self.status = None;
        self.screen = Screen::Playing;
        info!(size = self.board_size, "new game");
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        if should_quit(key) {
            return Flow::Quit;
        }
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }

        match std::mem::replace(&mut self.screen, Screen::Playing) {
            Screen::Title { selected } => self.on_title(key, selected),
            Screen::Playing => self.on_playing(key),
            Screen::SlotPicker {
                mode,
                selected,
                slots,
                from_title,
            } => self.on_slot_picker(key, mode, selected, slots, from_title, now),
            Screen::NamePrompt { slot, input } => self.on_name_prompt(key, slot, input, now),
            Screen::Settings {
                page,
                selected,
                from_title,
            } => self.on_settings(key, page, selected, from_title, now),
            Screen::CaptureKey { action, from_title } => {
                self.on_capture_key(key, action, from_title, now)
            }
        }
    }

    fn on_title(&mut self, key: KeyEvent, selected: usize) -> Flow {
        let action = handle_key_event(&self.bindings, key);
        let pick = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(selected),
            KeyCode::Char(c @ '1'..='4') => Some(c as usize - '1' as usize),
            _ => None,
        };

        match pick {
            Some(0) => self.new_game(),
            Some(1) => self.open_slot_picker(SlotMode::Load, true),
            Some(TITLE_SETTINGS) => self.open_settings(true),
            Some(_) => return Flow::Quit,
            None => {
                match action {
                    Some(GameAction::Quit) => return Flow::Quit,
                    Some(GameAction::Settings) => {
                        self.open_settings(true);
                        return Flow::Continue;
                    }
                    _ => {}
                }
                let selected = step_selection(key, action, selected, TITLE_ITEMS.len());
                self.screen = Screen::Title { selected };
            }
        }
        Flow::Continue
    }

    fn on_playing(&mut self, key: KeyEvent) -> Flow {
        self.screen = Screen::Playing;

        if self.game.game_over() {
            self.screen = Screen::Title { selected: 0 };
            return Flow::Continue;
        }

        let Some(action) = handle_key_event(&self.bindings, key) else {
            return Flow::Continue;
        };

        if let Some(direction) = action.direction() {
            let outcome = play_turn(&mut self.game, direction, &self.policy, &mut self.rng);
            if outcome.moved {
                self.win_banner = outcome.won_now;
            }
            if outcome.won_now {
                info!(score = self.game.score(), "2048 reached, endless mode on");
            }
            if outcome.game_over {
                info!(score = self.game.score(), "game over");
            }
            return Flow::Continue;
        }

        match action {
            GameAction::Quit => return Flow::Quit,
            GameAction::ReturnToTitle => self.screen = Screen::Title { selected: 0 },
            GameAction::Save => self.open_slot_picker(SlotMode::Save, false),
            GameAction::Load => self.open_slot_picker(SlotMode::Load, false),
            GameAction::Settings => self.open_settings(false),
            _ => {}
        }
        Flow::Continue
    }

    fn open_slot_picker(&mut self, mode: SlotMode, from_title: bool) {
        self.screen = Screen::SlotPicker {
            mode,
            selected: 0,
            slots: self.store.list_slots(),
            from_title,
        };
    }

    fn on_slot_picker(
        &mut self,
        key: KeyEvent,
        mode: SlotMode,
        selected: usize,
        slots: Vec<SlotSummary>,
        from_title: bool,
        now: Instant,
    ) -> Flow {
        let pick = match key.code {
            KeyCode::Enter => Some(selected),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let n = c as usize - '0' as usize;
                (1..=slots.len()).contains(&n).then(|| n - 1)
            }
            KeyCode::Esc => {
                self.screen = if from_title {
                    Screen::Title { selected: 1 }
                } else {
                    Screen::Playing
                };
                return Flow::Continue;
            }
            _ => None,
        };

        let Some(index) = pick else {
            let action = handle_key_event(&self.bindings, key);
            let selected = step_selection(key, action, selected, slots.len());
            self.screen = Screen::SlotPicker {
                mode,
                selected,
                slots,
                from_title,
            };
            return Flow::Continue;
        };

        let Some(slot) = slots.get(index).map(|s| s.slot) else {
            self.screen = Screen::SlotPicker {
                mode,
                selected,
                slots,
                from_title,
            };
            return Flow::Continue;
        };
        match mode {
            SlotMode::Save => {
                let input = slots[index]
                    .entry
                    .as_ref()
                    .and_then(|e| e.name.clone())
                    .unwrap_or_default();
                self.screen = Screen::NamePrompt { slot, input };
            }
            SlotMode::Load => self.load_slot(slot, slots, index, from_title, now),
        }
        Flow::Continue
    }

    fn load_slot(&mut self, slot: u8, slots: Vec<SlotSummary>, index: usize, from_title: bool, now: Instant) {
        let mut game = Game::new(self.board_size);
        match self.store.load_into(&mut game, slot) {
            Ok(()) => {
                self.game = game;
                self.win_banner = false;
                self.set_status(format!("Loaded slot {}", slot), now);
                self.screen = Screen::Playing;
            }
            Err(err) => {
                warn!(slot, error = %format!("{:#}", err), "load failed");
                self.set_status(format!("Could not load slot {}", slot), now);
                self.screen = Screen::SlotPicker {
                    mode: SlotMode::Load,
                    selected: index,
                    slots,
                    from_title,
                };
            }
        }
    }

    fn on_name_prompt(&mut self, key: KeyEvent, slot: u8, mut input: String, now: Instant) -> Flow {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Playing;
                return Flow::Continue;
            }
            KeyCode::Enter => {
                let name = sanitize_name(&input);
                let name = (!name.is_empty()).then_some(name.as_str());
                match self.store.save(&self.game, slot, name) {
                    Ok(()) => self.set_status(format!("Saved to slot {}", slot), now),
                    Err(err) => {
                        warn!(slot, error = %format!("{:#}", err), "save failed");
                        self.set_status(format!("Could not save to slot {}", slot), now);
                    }
                }
                self.screen = Screen::Playing;
                return Flow::Continue;
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c)
                if !c.is_control()
                    && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && input.chars().count() < MAX_SAVE_NAME_LEN =>
            {
                input.push(c);
            }
            _ => {}
        }
        self.screen = Screen::NamePrompt { slot, input };
        Flow::Continue
    }

    fn open_settings(&mut self, from_title: bool) {
        self.screen = Screen::Settings {
            page: SettingsPage::Main,
            selected: 0,
            from_title,
        };
    }

    fn on_settings(
        &mut self,
        key: KeyEvent,
        page: SettingsPage,
        selected: usize,
        from_title: bool,
        now: Instant,
    ) -> Flow {
        let len = self.settings_items(page).len();
        let pick = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(selected),
            KeyCode::Esc => Some(len - 1),
            _ => None,
        };

        let Some(index) = pick else {
            let action = handle_key_event(&self.bindings, key);
            let selected = step_selection(key, action, selected, len);
            self.screen = Screen::Settings {
                page,
                selected,
                from_title,
            };
            return Flow::Continue;
        };

        // The last row of every page is "Back".
        if index + 1 >= len {
            self.screen = match page {
                SettingsPage::Main if from_title => Screen::Title {
                    selected: TITLE_SETTINGS,
                },
                SettingsPage::Main => Screen::Playing,
                SettingsPage::Keys => self.settings_screen(SettingsPage::Main, 0, from_title),
                SettingsPage::Action(action) => {
                    let row = GameAction::ALL.iter().position(|&a| a == action).unwrap_or(0);
                    self.settings_screen(SettingsPage::Keys, row, from_title)
                }
            };
            return Flow::Continue;
        }

        self.screen = match page {
            SettingsPage::Main => match index {
                0 => self.settings_screen(SettingsPage::Keys, 0, from_title),
                1 => {
                    self.cycle_theme(now);
                    self.settings_screen(page, index, from_title)
                }
                _ => {
                    self.reset_keys(now);
                    self.settings_screen(page, index, from_title)
                }
            },
            SettingsPage::Keys => {
                let action = GameAction::ALL[index];
                self.settings_screen(SettingsPage::Action(action), 0, from_title)
            }
            SettingsPage::Action(action) => {
                let names = self.config.keys.names_for(action).to_vec();
                match names.get(index) {
                    Some(name) => {
                        let done = format!("Removed {} from {}", key_label(name), action.label());
                        self.edit_keys(|keys| keys.remove_key(action, name), done, now);
                        let len = self.settings_items(page).len();
                        self.settings_screen(page, index.min(len - 1), from_title)
                    }
                    None => Screen::CaptureKey { action, from_title },
                }
            }
        };
        Flow::Continue
    }

    fn settings_screen(&self, page: SettingsPage, selected: usize, from_title: bool) -> Screen {
        Screen::Settings {
            page,
            selected,
            from_title,
        }
    }

    fn on_capture_key(
        &mut self,
        key: KeyEvent,
        action: GameAction,
        from_title: bool,
        now: Instant,
    ) -> Flow {
        if key.code != KeyCode::Esc {
            match bindable_key(key) {
                Some(spec) => {
                    let done = format!("Bound {} to {}", spec.display_name(), action.label());
                    self.edit_keys(|keys| keys.add_key(action, &spec.name()), done, now);
                }
                None => self.set_status("That key cannot be bound".to_string(), now),
            }
        }
        let add_row = self.config.keys.names_for(action).len();
        self.screen = self.settings_screen(SettingsPage::Action(action), add_row, from_title);
        Flow::Continue
    }

    /// Apply a key-config edit; on success adopt the new bindings and persist.
    fn edit_keys<F>(&mut self, edit: F, done: String, now: Instant)
    where
        F: FnOnce(&mut KeyConfig) -> anyhow::Result<KeyBindings>,
    {
        match edit(&mut self.config.keys) {
            Ok(bindings) => {
                self.adopt_bindings(bindings);
                self.persist_config(done, now);
            }
            Err(err) => {
                warn!(error = %err, "key binding change rejected");
                self.set_status(err.to_string(), now);
            }
        }
    }

    fn adopt_bindings(&mut self, bindings: KeyBindings) {
        self.controls = controls_help(&bindings);
        self.bindings = bindings;
    }

    fn reset_keys(&mut self, now: Instant) {
        self.config.keys = KeyConfig::default();
        self.adopt_bindings(KeyBindings::default());
        self.persist_config("Key bindings reset to defaults".to_string(), now);
    }

    fn cycle_theme(&mut self, now: Instant) {
        let kind = self.game_view.theme().kind.next();
        let theme = Theme::from_kind(kind);
        self.config.theme = kind.name().to_string();
        self.game_view = GameView::new(theme);
        self.menu_view = MenuView::new(theme);
        self.persist_config(format!("Theme: {}", kind.name()), now);
    }

    fn persist_config(&mut self, done: String, now: Instant) {
        match save_config(&self.config_path, &self.config) {
            Ok(()) => {
                info!(path = %self.config_path.display(), "settings saved");
                self.set_status(done, now);
            }
            Err(err) => {
                warn!(error = %format!("{:#}", err), "could not save settings");
                self.set_status("Settings changed but not saved".to_string(), now);
            }
        }
    }

    /// Rows of a settings page; the last one is always "Back".
    fn settings_items(&self, page: SettingsPage) -> Vec<String> {
        let mut items: Vec<String> = match page {
            SettingsPage::Main => vec![
                "Key bindings".to_string(),
                format!("Theme: {}", self.game_view.theme().name()),
                "Reset keys to defaults".to_string(),
            ],
            SettingsPage::Keys => GameAction::ALL
                .iter()
                .map(|&action| {
                    let keys = self.bindings.describe(action);
                    let keys = if keys.is_empty() { "-".to_string() } else { keys };
                    format!("{}: {}", action.label(), keys)
                })
                .collect(),
            SettingsPage::Action(action) => self
                .config
                .keys
                .names_for(action)
                .iter()
                .map(|name| format!("Remove {}", key_label(name)))
                .chain(std::iter::once("Add key".to_string()))
                .collect(),
        };
        items.push("Back".to_string());
        items
    }

    fn set_status(&mut self, text: String, now: Instant) {
        self.status = Some((text, now));
    }

    /// Draw the current screen into `fb`.
    pub fn render_into(&self, now: Instant, viewport: Viewport, fb: &mut FrameBuffer) {
        let status = self.status(now);
        match &self.screen {
            Screen::Title { selected } => {
                self.menu_view.render_title(
                    &TITLE_ITEMS,
                    *selected,
                    status.unwrap_or("↑/↓ select  Enter confirm"),
                    viewport,
                    fb,
                );
            }
            Screen::Playing => {
                let hud = Hud {
                    controls: &self.controls,
                    status,
                    win_banner: self.win_banner,
                };
                self.game_view
                    .render_into(&self.game.snapshot(), &hud, now, viewport, fb);
            }
            Screen::SlotPicker {
                mode,
                selected,
                slots,
                ..
            } => {
                let heading = match mode {
                    SlotMode::Save => "Save to slot",
                    SlotMode::Load => "Load from slot",
                };
                let items: Vec<String> = slots.iter().map(slot_label).collect();
                let footer = status.unwrap_or("1-5/Enter choose  Esc back");
                self.menu_view
                    .render_list(heading, &items, *selected, footer, viewport, fb);
            }
            Screen::NamePrompt { input, .. } => {
                self.menu_view.render_prompt(
                    "Save name (optional)",
                    input,
                    MAX_SAVE_NAME_LEN,
                    "Enter save  Esc cancel  Backspace delete",
                    viewport,
                    fb,
                );
            }
            Screen::Settings { page, selected, .. } => {
                let heading = match page {
                    SettingsPage::Main => "Settings".to_string(),
                    SettingsPage::Keys => "Key bindings".to_string(),
                    SettingsPage::Action(action) => format!("Keys for {}", action.label()),
                };
                let items = self.settings_items(*page);
                let footer = status.unwrap_or(LIST_FOOTER);
                self.menu_view
                    .render_list(&heading, &items, *selected, footer, viewport, fb);
            }
            Screen::CaptureKey { action, .. } => {
                let heading = format!("Press a key for {}", action.label());
                self.menu_view
                    .render_list(&heading, &[], 0, "Esc cancel", viewport, fb);
            }
        }
    }
}

/// Arrow keys or the bound up/down movement keys move a list selection (wrapping).
fn step_selection(key: KeyEvent, action: Option<GameAction>, selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match (key.code, action) {
        (KeyCode::Up, _) | (_, Some(GameAction::MoveUp)) => (selected + len - 1) % len,
        (KeyCode::Down, _) | (_, Some(GameAction::MoveDown)) => (selected + 1) % len,
        _ => selected,
    }
}

/// Display name for a configured key name.
fn key_label(name: &str) -> String {
    KeySpec::parse(name)
        .map(|key| key.display_name())
        .unwrap_or_else(|| name.to_string())
}

fn slot_label(summary: &SlotSummary) -> String {
    match &summary.entry {
        None => format!("{}: empty", summary.slot),
        Some(entry) => {
            let name = entry.name.as_deref().unwrap_or("unnamed");
            let mut label = format!("{}: {} ({})", summary.slot, name, entry.score);
            if entry.endless_mode {
                label.push_str(" endless");
            }
            if entry.game_over {
                label.push_str(" over");
            }
            label
        }
    }
}

/// Footer text such as `Move: ↑/w ↓/s ←/a →/d  Quit: q/Esc  Save: h ...`.
pub fn controls_help(bindings: &KeyBindings) -> String {
    let moves = [
        GameAction::MoveUp,
        GameAction::MoveDown,
        GameAction::MoveLeft,
        GameAction::MoveRight,
    ]
    .iter()
    .map(|&a| bindings.describe(a))
    .collect::<Vec<_>>()
    .join(" ");

    let mut parts = vec![format!("Move: {}", moves)];
    for action in [
        GameAction::Save,
        GameAction::Load,
        GameAction::ReturnToTitle,
        GameAction::Settings,
        GameAction::Quit,
    ] {
        let keys = bindings.describe(action);
        if !keys.is_empty() {
            parts.push(format!("{}: {}", action.label(), keys));
        }
    }
    parts.join("  ")
}
