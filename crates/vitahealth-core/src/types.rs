//! API types matching the VitaHealth backend

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============= Authentication Types =============

/// Registration request
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Denormalized user record stored next to the token
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// Body carrying only a human-readable message (errors, acknowledgements)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

// ============= Detection Types =============

/// Image handed to the prediction service
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Raw `/predict` response; every field may be absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub predicted_disease: Option<String>,
    #[serde(default)]
    pub vitamin_deficiency: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Detection result as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub disease: String,
    pub deficiency: String,
    /// Model confidence in `0.0..=1.0`
    pub confidence: f64,
}

impl From<PredictionResponse> for DetectionResult {
    fn from(resp: PredictionResponse) -> Self {
        fn or_default(value: Option<String>, default: &str) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        Self {
            disease: or_default(resp.predicted_disease, "N/A"),
            deficiency: or_default(resp.vitamin_deficiency, "Unknown Deficiency"),
            confidence: resp.confidence.unwrap_or(0.0),
        }
    }
}

impl DetectionResult {
    /// Confidence rendered as a percentage with two decimals, e.g. `87.34%`
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// `/save_detection` body; confidence is a 0-100 percentage
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaveDetectionRequest {
    pub deficiency: String,
    pub disease: String,
    pub confidence: f64,
}

impl From<&DetectionResult> for SaveDetectionRequest {
    fn from(result: &DetectionResult) -> Self {
        Self {
            deficiency: result.deficiency.clone(),
            disease: result.disease.clone(),
            confidence: result.confidence * 100.0,
        }
    }
}

// ============= History Types =============

/// Identifier of a history record; the backend may send numbers or strings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl RecordId {
    /// True when the backend sent no usable id; such records cannot be deleted.
    pub fn is_missing(&self) -> bool {
        matches!(self, RecordId::Text(s) if s.is_empty())
    }

    /// Compare against an id typed by a user, by string form.
    pub fn matches(&self, raw: &str) -> bool {
        self.to_string() == raw.trim()
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(value.to_string()),
        }
    }
}

/// A saved detection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: RecordId,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub deficiency: String,
    /// Percentage as saved by the detection page
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub disease: Option<String>,
}

fn lenient_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => RecordId::Number(i),
            None => RecordId::Text(n.to_string()),
        },
        serde_json::Value::String(s) => RecordId::Text(s),
        _ => RecordId::default(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

impl HistoryRecord {
    /// `Vitamin C Deficiency (87.34%)`
    pub fn summary(&self) -> String {
        match self.confidence {
            Some(c) => format!("{} ({:.2}%)", self.deficiency, c),
            None => self.deficiency.clone(),
        }
    }
}

/// `/history` body: a bare list, an object wrapping the list, or anything else.
///
/// Entries stay raw until [`HistoryPayload::into_records`] so one malformed
/// entry cannot take the whole list down with it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryPayload {
    List(Vec<serde_json::Value>),
    Wrapped { history: Vec<serde_json::Value> },
    Other(serde_json::Value),
}

impl HistoryPayload {
    /// Records in either accepted shape; anything else is empty. Entries that
    /// are not objects are skipped one by one.
    pub fn into_records(self) -> Vec<HistoryRecord> {
        match self {
            HistoryPayload::List(entries) | HistoryPayload::Wrapped { history: entries } => {
                entries
                    .into_iter()
                    .filter_map(|entry| match serde_json::from_value(entry) {
                        Ok(record) => Some(record),
                        Err(e) => {
                            tracing::warn!(error = %e, "Skipping unreadable history entry");
                            None
                        }
                    })
                    .collect()
            }
            HistoryPayload::Other(value) => {
                tracing::debug!(?value, "Unrecognized history payload, treating as empty");
                Vec::new()
            }
        }
    }
}

// ============= Planner Types =============

/// One meal of a plan day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    #[serde(rename = "type", default)]
    pub meal_type: String,
    #[serde(default)]
    pub food: String,
}

/// A day of a diet plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDay {
    #[serde(deserialize_with = "string_or_number")]
    pub day: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

/// `/planner/:vitamin` body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DietPlan {
    #[serde(default)]
    pub plan: Vec<PlanDay>,
    #[serde(default)]
    pub fact: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected day identifier, got {}",
            other
        ))),
    }
}

// ============= Profile Types =============

/// `/profile` body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
}
