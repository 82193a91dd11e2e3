// Keyboard shortcut routing: maps hotkeys to session commands.
// Ctrl is the hotkey modifier on Linux/Windows, Cmd (meta) on macOS; every
// default binding exists in both flavours.

use codealong_core::{Key, Language, Modifiers, Panel};

// ──────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────

/// Commands the keyboard layer can fire at the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SetActiveTab(Language),
    Refresh,
    ToggleVisibility(Panel),
    ResetWeights,
    ToggleTheme,
    ToggleFullscreen,
}

impl Command {
    pub const ALL: [Command; 10] = [
        Command::SetActiveTab(Language::Html),
        Command::SetActiveTab(Language::Css),
        Command::SetActiveTab(Language::JavaScript),
        Command::Refresh,
        Command::ToggleVisibility(Panel::Video),
        Command::ToggleVisibility(Panel::Editor),
        Command::ToggleVisibility(Panel::Preview),
        Command::ResetWeights,
        Command::ToggleTheme,
        Command::ToggleFullscreen,
    ];

    /// Stable identifier used in settings.json.
    pub fn action_key(&self) -> String {
        match self {
            Command::SetActiveTab(lang) => format!("tab_{}", lang.key()),
            Command::Refresh => "refresh".to_string(),
            Command::ToggleVisibility(panel) => format!("toggle_{}", panel.name()),
            Command::ResetWeights => "reset_layout".to_string(),
            Command::ToggleTheme => "toggle_theme".to_string(),
            Command::ToggleFullscreen => "toggle_fullscreen".to_string(),
        }
    }

    pub fn from_action_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.action_key() == key)
    }
}

// ──────────────────────────────────────────────
// Hotkey
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Hotkey {
    pub fn new(key: Key, shift: bool, ctrl: bool, meta: bool, alt: bool) -> Self {
        Self {
            key: normalize_key(key),
            shift,
            ctrl,
            meta,
            alt,
        }
    }

    pub fn from_event(key: Key, modifiers: Modifiers) -> Self {
        Self::new(key, modifiers.shift, modifiers.ctrl, modifiers.meta, modifiers.alt)
    }

    /// Parse a key name as written in settings.json ("1", "d", "enter", "f5").
    pub fn key_from_name(name: &str) -> Option<Key> {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "escape" | "esc" => Some(Key::Escape),
            "tab" => Some(Key::Tab),
            _ => {
                if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    return (1..=24).contains(&n).then_some(Key::F(n));
                }
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    pub fn key_name(&self) -> String {
        match self.key {
            Key::Char(c) => c.to_string(),
            Key::Enter => "enter".to_string(),
            Key::Escape => "escape".to_string(),
            Key::Tab => "tab".to_string(),
            Key::F(n) => format!("f{n}"),
        }
    }
}

fn normalize_key(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ──────────────────────────────────────────────
// KeybindingMap
// ──────────────────────────────────────────────

pub struct KeybindingMap {
    bindings: Vec<(Hotkey, Command)>,
}

impl KeybindingMap {
    /// The default bindings.
    pub fn new() -> Self {
        let mut bindings = Vec::new();
        let mut primary = |key: Key, shift: bool, alt: bool, command: Command| {
            bindings.push((Hotkey::new(key, shift, true, false, alt), command));
            bindings.push((Hotkey::new(key, shift, false, true, alt), command));
        };

        // Ctrl/Cmd+1..3 -> editor tabs
        primary(Key::Char('1'), false, false, Command::SetActiveTab(Language::Html));
        primary(Key::Char('2'), false, false, Command::SetActiveTab(Language::Css));
        primary(Key::Char('3'), false, false, Command::SetActiveTab(Language::JavaScript));
        // Ctrl/Cmd+Enter -> refresh preview
        primary(Key::Enter, false, false, Command::Refresh);
        // Ctrl/Cmd+Alt+1..3 -> show/hide panels
        primary(Key::Char('1'), false, true, Command::ToggleVisibility(Panel::Video));
        primary(Key::Char('2'), false, true, Command::ToggleVisibility(Panel::Editor));
        primary(Key::Char('3'), false, true, Command::ToggleVisibility(Panel::Preview));
        // Ctrl/Cmd+Alt+0 -> reset panel sizes
        primary(Key::Char('0'), false, true, Command::ResetWeights);
        // Ctrl/Cmd+Shift+D -> dark/light theme
        primary(Key::Char('d'), true, false, Command::ToggleTheme);
        // Ctrl/Cmd+Shift+F -> fullscreen preview
        primary(Key::Char('f'), true, false, Command::ToggleFullscreen);

        // F5 -> refresh, no modifier
        bindings.push((Hotkey::new(Key::F(5), false, false, false, false), Command::Refresh));

        Self { bindings }
    }

    /// Defaults with user overrides applied. An override replaces every
    /// default binding of its command and steals its hotkey from any other
    /// command.
    pub fn with_overrides(overrides: Vec<(Hotkey, Command)>) -> Self {
        let mut map = Self::new();
        for (hotkey, command) in &overrides {
            map.bindings.retain(|(h, c)| c != command && h != hotkey);
        }
        for (hotkey, command) in overrides {
            log::debug!("Keybinding override: {} -> {}", hotkey.key_name(), command.action_key());
            map.bindings.push((hotkey, command));
        }
        map
    }

    pub fn lookup(&self, hotkey: &Hotkey) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(h, _)| h == hotkey)
            .map(|(_, c)| *c)
    }

    /// Resolve a raw key event. Unbound keys return `None` and belong to the
    /// editor surface.
    pub fn process_key(&self, key: Key, modifiers: Modifiers) -> Option<Command> {
        self.lookup(&Hotkey::from_event(key, modifiers))
    }

    pub fn bindings_for(&self, command: Command) -> Vec<Hotkey> {
        self.bindings
            .iter()
            .filter(|(_, c)| *c == command)
            .map(|(h, _)| *h)
            .collect()
    }

    pub fn bindings(&self) -> &[(Hotkey, Command)] {
        &self.bindings
    }
}

impl Default for KeybindingMap {
    fn default() -> Self {
        Self::new()
    }
}
