use serde::{Deserialize, Serialize};

pub const DEFAULT_COOLDOWN_WEEKS: u32 = 4;

/// Admin settings. Missing fields in a stored blob take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub cooldown_weeks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_webhook: Option<String>,
    pub sounds_enabled: bool,
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cooldown_weeks: DEFAULT_COOLDOWN_WEEKS,
            slack_webhook: None,
            sounds_enabled: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// The webhook, unless blank
    pub fn webhook(&self) -> Option<&str> {
        self.slack_webhook
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
