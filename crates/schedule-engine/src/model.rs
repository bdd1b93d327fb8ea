//! Source entities, the read-only snapshot, and the normalized `ScheduleItem`.
//!
//! Source entities mirror the planner's stored records: dates and times stay
//! as the strings the application wrote, and are only parsed during
//! aggregation so that one malformed record can be skipped on its own.
//! Records whose JSON shape is wrong (a string duration, a negative weekday)
//! are dropped while reading the snapshot, for the same reason.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ScheduleError;
use crate::parse::hhmm;

// ---------------------------------------------------------------------------
// Shared enums
// ---------------------------------------------------------------------------

/// Lifecycle status shared by tasks, goals, projects and derived items.
///
/// Unknown strings are preserved in `Other` instead of failing the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
    Deferred,
    Canceled,
    /// A projected routine occurrence that has not been materialized.
    Future,
    /// A fixed-time event.
    Scheduled,
    Active,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Deferred => "deferred",
            Status::Canceled => "canceled",
            Status::Future => "future",
            Status::Scheduled => "scheduled",
            Status::Active => "active",
            Status::Other(s) => s,
        }
    }

    /// Whether the item no longer needs attention.
    pub fn is_closed(&self) -> bool {
        matches!(self, Status::Completed | Status::Canceled)
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Status::Pending,
            "in-progress" | "in_progress" => Status::InProgress,
            "completed" | "done" => Status::Completed,
            "deferred" => Status::Deferred,
            "canceled" | "cancelled" => Status::Canceled,
            "future" => Status::Future,
            "scheduled" => Status::Scheduled,
            "active" => Status::Active,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurrence frequency of a routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    /// Any frequency the projector does not expand (never occurs).
    Unsupported(String),
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        match s.as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            _ => Frequency::Unsupported(s),
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Unsupported(String::new())
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        match freq {
            Frequency::Daily => "daily".to_string(),
            Frequency::Weekly => "weekly".to_string(),
            Frequency::Unsupported(s) => s,
        }
    }
}

/// Kind of a derived schedule item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Task,
    Event,
    Routine,
    Deadline,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemType::Task => "task",
            ItemType::Event => "event",
            ItemType::Routine => "routine",
            ItemType::Deadline => "deadline",
        };
        f.write_str(s)
    }
}

/// Requested planning horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zoom {
    Day,
    Week,
    Month,
    Year,
}

impl Zoom {
    /// Zoom levels rendered on an hourly time grid.
    pub fn is_time_grid(self) -> bool {
        matches!(self, Zoom::Day | Zoom::Week)
    }
}

impl FromStr for Zoom {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Zoom::Day),
            "week" => Ok(Zoom::Week),
            "month" => Ok(Zoom::Month),
            "year" => Ok(Zoom::Year),
            other => Err(ScheduleError::InvalidZoom(other.to_string())),
        }
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Zoom::Day => "day",
            Zoom::Week => "week",
            Zoom::Month => "month",
            Zoom::Year => "year",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Source entities
// ---------------------------------------------------------------------------

/// A one-off task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub start_time: Option<String>,
    /// Minutes.
    pub duration: Option<u32>,
    pub status: Status,
    pub area_id: Option<String>,
    pub description: Option<String>,
    pub is_focus: bool,
}

/// A fixed-time event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// e.g. `"milestone"`.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub area_id: Option<String>,
    pub description: Option<String>,
}

impl Event {
    pub fn is_milestone(&self) -> bool {
        self.event_type.as_deref() == Some("milestone")
    }
}

/// A recurring routine. A missing frequency never occurs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Routine {
    pub id: String,
    pub title: String,
    pub frequency: Frequency,
    /// Weekday indices, 0 = Sunday through 6 = Saturday. Required for weekly.
    pub days_of_week: Option<Vec<u8>>,
    pub time: Option<String>,
    pub duration: Option<u32>,
    pub area_id: Option<String>,
}

/// A routine occurrence converted into an independently editable record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutineInstance {
    pub id: String,
    pub title: String,
    pub from_routine_id: String,
    pub date: String,
    pub time: Option<String>,
    pub duration: Option<u32>,
    pub status: Status,
    pub area_id: Option<String>,
}

/// A goal; its deadline shows up at week, month and (if strategic) year zoom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub deadline: Option<String>,
    pub status: Status,
    pub area_id: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: Option<String>,
    pub horizon: Option<String>,
}

impl Goal {
    /// Direction-setting goals shown at year zoom.
    pub fn is_strategic(&self) -> bool {
        self.goal_type.as_deref() == Some("strategic") || self.horizon.as_deref() == Some("year")
    }
}

/// A project with an optional deadline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub deadline: Option<String>,
    pub status: Status,
    pub area_id: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub horizon: Option<String>,
}

/// Read-only view of everything the engine aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    #[serde(deserialize_with = "skip_malformed")]
    pub tasks: Vec<Task>,
    #[serde(deserialize_with = "skip_malformed")]
    pub events: Vec<Event>,
    #[serde(deserialize_with = "skip_malformed")]
    pub routines: Vec<Routine>,
    #[serde(deserialize_with = "skip_malformed")]
    pub routine_instances: Vec<RoutineInstance>,
    #[serde(deserialize_with = "skip_malformed")]
    pub goals: Vec<Goal>,
    #[serde(deserialize_with = "skip_malformed")]
    pub projects: Vec<Project>,
}

impl Snapshot {
    /// Parse a snapshot from its JSON representation.
    ///
    /// Fails only when the document itself is not a JSON object; individual
    /// records that do not fit their entity are skipped.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Deserialize a collection record by record, dropping the ones that fail.
///
/// A collection that is not an array (or is `null`) reads as empty.
fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let kind = std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or("record");
    let records = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(records) => records,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => {
            debug!("ignoring {} collection that is not an array: {}", kind, other);
            return Ok(Vec::new());
        }
    };

    Ok(records
        .into_iter()
        .filter_map(|value| {
            let id = value.get("id").and_then(|v| v.as_str()).unwrap_or("?").to_string();
            match serde_json::from_value::<T>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!("skipping malformed {} {}: {}", kind, id, e);
                    None
                }
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Derived output
// ---------------------------------------------------------------------------

/// A normalized, dated entry produced by the aggregator.
///
/// An item without `time` is an all-day item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub status: Status,
    /// Id of the originating source record.
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_focus: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ScheduleItem {
    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }
}
