use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wheel::WheelKind;

/// Most recent entries kept in each history
pub const HISTORY_LIMIT: usize = 200;

/// One landed wheel. Exactly one of the three fields is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub ts: DateTime<Utc>,
}

impl SpinRecord {
    pub fn landed(kind: WheelKind, value: &str, ts: DateTime<Utc>) -> Self {
        let mut record = Self {
            person_id: None,
            capability: None,
            platform: None,
            ts,
        };
        let value = Some(value.to_string());
        match kind {
            WheelKind::Person => record.person_id = value,
            WheelKind::Capability => record.capability = value,
            WheelKind::Platform => record.platform = value,
        }
        record
    }
}

/// Who demos what, on which platform, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub person_id: String,
    pub capability: String,
    pub platform: String,
    #[serde(rename = "nextSyncISO")]
    pub next_sync: DateTime<Utc>,
}

/// Newest first, capped
pub fn push_front<T>(history: &mut Vec<T>, entry: T) {
    history.insert(0, entry);
    history.truncate(HISTORY_LIMIT);
}
