//! Run record domain model.
//!
//! # Responsibility
//! - Define the canonical record for one logged running session.
//! - Validate raw form input before it can become a record.
//! - Keep the JSON wire shape compatible with exported `runningLog` files.
//!
//! # Invariants
//! - `distance` is finite and strictly positive.
//! - `time` always has the `HH:MM:SS` two-digit shape.
//! - Decoding a record enforces the same rules as `RunDraft::validate()`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a run record (creation time in epoch milliseconds).
pub type RunId = i64;

/// External calendar date format used by forms, labels and JSON.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static RUN_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2})$").expect("valid run time regex"));

/// Validation error for run input and decoded run records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunValidationError {
    /// Date field is empty.
    MissingDate,
    /// Date field is not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Distance is not a finite number greater than zero.
    InvalidDistance(String),
    /// Time does not match `HH:MM:SS`.
    InvalidTime(String),
}

impl Display for RunValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDate => write!(f, "date is required"),
            Self::InvalidDate(value) => {
                write!(f, "date `{value}` is not a valid YYYY-MM-DD calendar date")
            }
            Self::InvalidDistance(value) => {
                write!(f, "distance `{value}` must be a number greater than 0")
            }
            Self::InvalidTime(value) => write!(f, "time `{value}` must use the HH:MM:SS format"),
        }
    }
}

impl Error for RunValidationError {}

/// Elapsed session duration with `HH:MM:SS` external representation.
///
/// Only the two-digit shape is enforced, so `00:75:00` is accepted and
/// counts as 75 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTime {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl RunTime {
    /// Parses `HH:MM:SS` text.
    pub fn parse(value: &str) -> Result<Self, RunValidationError> {
        let invalid = || RunValidationError::InvalidTime(value.to_string());
        let caps = RUN_TIME_RE.captures(value).ok_or_else(invalid)?;
        let group = |index: usize| caps[index].parse::<u32>().map_err(|_| invalid());

        Ok(Self {
            hours: group(1)?,
            minutes: group(2)?,
            seconds: group(3)?,
        })
    }

    /// Builds a duration from its parts. Each part must fit in two digits.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Result<Self, RunValidationError> {
        if hours > 99 || minutes > 99 || seconds > 99 {
            return Err(RunValidationError::InvalidTime(format!(
                "{hours}:{minutes}:{seconds}"
            )));
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Total duration in seconds: `h*3600 + m*60 + s`.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

impl Display for RunTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl Serialize for RunTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RunTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Ordinal post-run rating, 1 (worst) to 5 (best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feeling {
    Awful = 1,
    Poor = 2,
    Normal = 3,
    Good = 4,
    Excellent = 5,
}

impl Feeling {
    /// Maps an ordinal value to a feeling. Unknown values map to `None`.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Awful),
            2 => Some(Self::Poor),
            3 => Some(Self::Normal),
            4 => Some(Self::Good),
            5 => Some(Self::Excellent),
            _ => None,
        }
    }

    /// Parses the external digit form (`"1"`..`"5"`).
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<i64>().ok().and_then(Self::from_value)
    }

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Canonical record for one logged running session.
///
/// Deserialization goes through the wire shape and re-checks the distance
/// rule, so persisted or imported data cannot bypass validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RunRecordWire")]
pub struct RunRecord {
    /// Creation-time identity, never reassigned.
    pub id: RunId,
    /// Calendar day of the session, no time-of-day component.
    pub date: NaiveDate,
    /// Kilometers, always > 0.
    pub distance: f64,
    pub time: RunTime,
    pub calories: u32,
    /// Serialized as `type` to match the exported file schema.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(
        serialize_with = "serialize_feeling",
        skip_serializing_if = "Option::is_none"
    )]
    pub feeling: Option<Feeling>,
    pub notes: String,
}

impl RunRecord {
    /// Returns the calendar date in `YYYY-MM-DD` form.
    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Raw textual form input for creating or editing a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunDraft {
    pub date: String,
    pub distance: String,
    pub time: String,
    pub calories: String,
    pub kind: String,
    pub feeling: String,
    pub notes: String,
}

impl RunDraft {
    /// Pre-fills a draft from an existing record (edit form).
    pub fn from_record(record: &RunRecord) -> Self {
        Self {
            date: record.date_label(),
            distance: record.distance.to_string(),
            time: record.time.to_string(),
            calories: record.calories.to_string(),
            kind: record.kind.clone(),
            feeling: record
                .feeling
                .map(|feeling| feeling.value().to_string())
                .unwrap_or_default(),
            notes: record.notes.clone(),
        }
    }

    /// Validates form input into record fields.
    ///
    /// # Errors
    /// - `MissingDate` / `InvalidDate` for empty or unparseable dates.
    /// - `InvalidDistance` unless distance parses to a finite value > 0.
    /// - `InvalidTime` unless time has the `HH:MM:SS` shape.
    ///
    /// Calories never fail: invalid or negative input becomes 0.
    pub fn validate(&self) -> Result<RunFields, RunValidationError> {
        let date_text = self.date.trim();
        if date_text.is_empty() {
            return Err(RunValidationError::MissingDate);
        }
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
            .map_err(|_| RunValidationError::InvalidDate(date_text.to_string()))?;

        let distance_text = self.distance.trim();
        let distance = distance_text
            .parse::<f64>()
            .ok()
            .filter(|value| is_valid_distance(*value))
            .ok_or_else(|| RunValidationError::InvalidDistance(distance_text.to_string()))?;

        let time = RunTime::parse(self.time.trim())?;

        Ok(RunFields {
            date,
            distance,
            time,
            calories: coerce_calories(&self.calories),
            kind: self.kind.trim().to_string(),
            feeling: Feeling::parse(&self.feeling),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Validated record content, everything except the identity.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFields {
    pub date: NaiveDate,
    pub distance: f64,
    pub time: RunTime,
    pub calories: u32,
    pub kind: String,
    pub feeling: Option<Feeling>,
    pub notes: String,
}

impl RunFields {
    /// Attaches an identity to validated content.
    pub fn into_record(self, id: RunId) -> RunRecord {
        RunRecord {
            id,
            date: self.date,
            distance: self.distance,
            time: self.time,
            calories: self.calories,
            kind: self.kind,
            feeling: self.feeling,
            notes: self.notes,
        }
    }
}

#[derive(Deserialize)]
struct RunRecordWire {
    id: RunId,
    date: NaiveDate,
    distance: f64,
    time: RunTime,
    #[serde(default, deserialize_with = "deserialize_calories")]
    calories: u32,
    #[serde(rename = "type", default, deserialize_with = "deserialize_text")]
    kind: String,
    #[serde(default, deserialize_with = "deserialize_feeling")]
    feeling: Option<Feeling>,
    #[serde(default, deserialize_with = "deserialize_text")]
    notes: String,
}

impl TryFrom<RunRecordWire> for RunRecord {
    type Error = RunValidationError;

    fn try_from(wire: RunRecordWire) -> Result<Self, Self::Error> {
        if !is_valid_distance(wire.distance) {
            return Err(RunValidationError::InvalidDistance(
                wire.distance.to_string(),
            ));
        }
        Ok(Self {
            id: wire.id,
            date: wire.date,
            distance: wire.distance,
            time: wire.time,
            calories: wire.calories,
            kind: wire.kind,
            feeling: wire.feeling,
            notes: wire.notes,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn is_valid_distance(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Reads the leading unsigned integer (`"450.7"` and `"450 kcal"` give 450).
/// Anything else, including negative values, becomes 0.
fn coerce_calories(text: &str) -> u32 {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);
    digits.parse::<u32>().unwrap_or(0)
}

fn serialize_feeling<S: Serializer>(
    feeling: &Option<Feeling>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match feeling {
        Some(feeling) => serializer.serialize_str(&feeling.value().to_string()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_feeling<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Feeling>, D::Error> {
    Ok(match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Int(value) => Feeling::from_value(value),
        LooseNumber::Text(text) => Feeling::parse(&text),
        LooseNumber::Float(_) | LooseNumber::Other(_) => None,
    })
}

fn deserialize_calories<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Int(value) => u32::try_from(value).unwrap_or(0),
        LooseNumber::Float(value) if value.is_finite() && value >= 0.0 => {
            value.trunc().min(f64::from(u32::MAX)) as u32
        }
        LooseNumber::Text(text) => coerce_calories(&text),
        LooseNumber::Float(_) | LooseNumber::Other(_) => 0,
    })
}

fn deserialize_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
