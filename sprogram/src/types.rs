//! Program, calendar event, and activity wire types.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProgramError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Devotion,
    Prayer,
    Meditation,
    Accountability,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Devotion => "devotion",
            Self::Prayer => "prayer",
            Self::Meditation => "meditation",
            Self::Accountability => "accountability",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Devotion => "Devotion",
            Self::Prayer => "Prayer",
            Self::Meditation => "Meditation",
            Self::Accountability => "Accountability",
        }
    }
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ProgramError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "devotion" => Ok(Self::Devotion),
            "prayer" => Ok(Self::Prayer),
            "meditation" => Ok(Self::Meditation),
            "accountability" => Ok(Self::Accountability),
            other => Err(ProgramError::validation(format!(
                "unknown activity type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramStatus {
    Active,
    Completed,
    Cancelled,
}

/// Accepts a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Number(i64),
    Text(String),
}

/// Raw schedule input. Every field is optional here so that all missing
/// required fields can be reported together.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default, alias = "topic_id")]
    pub topic_id: Option<String>,
    #[serde(default, alias = "topic_title")]
    pub topic_title: Option<String>,
    #[serde(default, alias = "time")]
    pub daily_time: Option<String>,
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(default, alias = "duration_days")]
    pub duration_days: Option<DurationValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledProgram {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub topic_id: String,
    pub topic_title: String,
    pub daily_time: String,
    pub duration_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProgramStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration_minutes: u32,
    pub description: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSchedule {
    pub program: ScheduledProgram,
    pub calendar_events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotice {
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default, alias = "topic_id")]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub topic: Option<Value>,
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedActivity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub topic_id: String,
    /// Caller-supplied snapshot of the topic, stored as given.
    pub topic: Value,
    pub timestamp: DateTime<Utc>,
    pub duration_minutes: u32,
    pub notes: String,
    pub rating: Option<u8>,
}
