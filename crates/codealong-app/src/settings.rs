// Settings: read-only global configuration.
// Uses platform-native config dir: e.g. ~/Library/Application Support/codealong/settings.json
// on macOS, ~/.config/codealong/settings.json on Linux.

use std::path::{Path, PathBuf};
use std::time::Duration;

use codealong_core::PanelMap;
use codealong_input::{Command, Hotkey, KeybindingMap};
use codealong_layout::{LayoutConfig, WeightBounds, DEFAULT_WEIGHTS};
use serde::{Deserialize, Serialize};

use crate::session::SessionConfig;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodealongSettings {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
    #[serde(default)]
    pub keybindings: Vec<KeybindingOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub min_weight: f64,
    pub max_weight: f64,
    pub default_weights: PanelMap<f64>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let bounds = WeightBounds::default();
        Self {
            min_weight: bounds.min,
            max_weight: bounds.max,
            default_weights: DEFAULT_WEIGHTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    /// Quiet period before an edit re-renders the preview.
    pub debounce_ms: u64,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self { debounce_ms: 500 }
    }
}

/// A single keybinding override stored in settings.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeybindingOverride {
    pub action: String,
    pub key: String,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeybindingOverride {
    /// Convert to a (Hotkey, Command) pair. Unknown actions or keys yield `None`.
    pub fn to_binding(&self) -> Option<(Hotkey, Command)> {
        let command = Command::from_action_key(&self.action)?;
        let key = Hotkey::key_from_name(&self.key)?;
        Some((Hotkey::new(key, self.shift, self.ctrl, self.meta, self.alt), command))
    }
}

impl CodealongSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let LayoutSettings {
            min_weight: min,
            max_weight: max,
            default_weights,
        } = &self.layout;
        if !(min.is_finite() && max.is_finite() && 0.0 < *min && min < max && *max <= 100.0) {
            return Err(SettingsError::Validation(format!(
                "weight bounds must satisfy 0 < min < max <= 100, got [{min}, {max}]"
            )));
        }
        // Three panels must be able to share 100 without leaving the bounds.
        if 3.0 * min > 100.0 || 3.0 * max < 100.0 {
            return Err(SettingsError::Validation(format!(
                "weight bounds [{min}, {max}] cannot hold three panels summing to 100"
            )));
        }
        let bounds = WeightBounds::new(*min, *max);
        if let Some((panel, weight)) = default_weights
            .iter()
            .find(|(_, w)| !w.is_finite() || !bounds.contains(**w))
        {
            return Err(SettingsError::Validation(format!(
                "default {} weight {weight} is outside [{min}, {max}]",
                panel.name()
            )));
        }
        if (default_weights.sum() - 100.0).abs() > 0.01 {
            return Err(SettingsError::Validation(format!(
                "default weights must sum to 100, got {}",
                default_weights.sum()
            )));
        }
        if self.preview.debounce_ms == 0 {
            return Err(SettingsError::Validation(format!(
                "preview.debounce_ms must be greater than 0, got {}",
                self.preview.debounce_ms
            )));
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            layout: LayoutConfig {
                bounds: WeightBounds::new(self.layout.min_weight, self.layout.max_weight),
                default_weights: self.layout.default_weights,
            },
            preview_delay: Duration::from_millis(self.preview.debounce_ms),
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("codealong").join("settings.json"))
}

/// Read and validate a settings file. A missing file is not an error.
pub fn load_settings_from(path: &Path) -> Result<CodealongSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(data) => CodealongSettings::from_json(&data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No settings at {}, using defaults", path.display());
            Ok(CodealongSettings::default())
        }
        Err(e) => Err(SettingsError::Io(e)),
    }
}

/// Load settings from `explicit` or the platform config dir. Any failure is
/// logged and falls back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> CodealongSettings {
    let path = match explicit.map(Path::to_path_buf).or_else(settings_path) {
        Some(p) => p,
        None => return CodealongSettings::default(),
    };

    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load {}: {}", path.display(), e);
            CodealongSettings::default()
        }
    }
}

/// Build a KeybindingMap from settings overrides.
pub fn build_keybinding_map(settings: &CodealongSettings) -> KeybindingMap {
    if settings.keybindings.is_empty() {
        return KeybindingMap::new();
    }
    let overrides: Vec<(Hotkey, Command)> = settings
        .keybindings
        .iter()
        .filter_map(|o| {
            let binding = o.to_binding();
            if binding.is_none() {
                log::warn!("Ignoring keybinding override {:?} -> {:?}", o.key, o.action);
            }
            binding
        })
        .collect();
    KeybindingMap::with_overrides(overrides)
}
