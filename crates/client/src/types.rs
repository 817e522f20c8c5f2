//! Request and response models.
//!
//! Response models are lenient: every field is optional or defaults, and
//! fields this crate does not know about are kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// --- Seniors ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Senior {
    pub id: Option<String>,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub room: Option<String>,
    pub floor: Option<i64>,
    pub facility: Option<String>,
    pub status: Option<String>,
    pub care_level: Option<i64>,
    pub diagnoses: Vec<String>,
    pub medications: Vec<Value>,
    pub preferences: Option<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields for registering a senior.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewSenior {
    pub name: String,
    pub age: u32,
    pub room: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_level: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnoses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub medications: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
}

impl NewSenior {
    pub fn new(name: impl Into<String>, age: u32, room: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            room: room.into(),
            ..Default::default()
        }
    }
}

/// Partial update; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeniorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnoses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
}

/// Filters for listing seniors; unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeniorFilter {
    pub status: Option<String>,
    pub floor: Option<i64>,
    pub facility: Option<String>,
    pub care_level: Option<i64>,
}

impl SeniorFilter {
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn floor(mut self, floor: i64) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = Some(facility.into());
        self
    }

    pub fn care_level(mut self, care_level: i64) -> Self {
        self.care_level = Some(care_level);
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(floor) = self.floor {
            pairs.push(("floor", floor.to_string()));
        }
        if let Some(facility) = &self.facility {
            pairs.push(("facility", facility.clone()));
        }
        if let Some(care_level) = self.care_level {
            pairs.push(("care_level", care_level.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsSummary {
    pub heart_rate: Option<f64>,
    pub blood_pressure_systolic: Option<f64>,
    pub blood_pressure_diastolic: Option<f64>,
    pub temperature: Option<f64>,
    pub spo2: Option<f64>,
    pub status: Option<String>,
    pub last_updated: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One sensor measurement to record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    pub sensor_type: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
}

impl SensorReading {
    pub fn new(sensor_type: impl Into<String>, value: f64) -> Self {
        Self {
            sensor_type: sensor_type.into(),
            value,
            unit: None,
            sensor_id: None,
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

// --- IoT ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IotSystemStatus {
    pub status: Option<String>,
    pub connected_devices: Option<u64>,
    pub total_devices: Option<u64>,
    pub mesh_health: Option<f64>,
    pub last_update: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshDevice {
    pub ieee_address: Option<String>,
    pub network_address: Option<String>,
    pub friendly_name: Option<String>,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub link_quality: Option<f64>,
    pub last_seen: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshStatus {
    pub coordinator: Option<MeshDevice>,
    pub devices: Vec<MeshDevice>,
    pub topology: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub confidence: Option<f64>,
    pub detected_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternDetection {
    pub senior_id: Option<String>,
    pub patterns: Vec<Pattern>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Therapy ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TherapyAdvice {
    pub advice: Option<String>,
    pub exercises: Vec<String>,
    pub recommendations: Vec<String>,
    pub urgency: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmpatheticResponse {
    pub response: Option<String>,
    pub emotion_detected: Option<String>,
    pub empathy_score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exercise {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<f64>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseRoutine {
    pub senior_id: Option<String>,
    pub exercises: Vec<Exercise>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- AI ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    pub response: Option<String>,
    pub model: Option<String>,
    pub tokens_used: Option<u64>,
    pub sentiment: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantumAnalysis {
    pub emotional_state: Option<String>,
    pub quantum_coherence: Option<f64>,
    pub empathy_resonance: Option<f64>,
    pub therapeutic_insights: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Scenarios and predictions ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallDetection {
    pub senior_id: Option<String>,
    pub fall_detected: Option<bool>,
    pub confidence: Option<f64>,
    pub timestamp: Option<String>,
    pub location: Option<String>,
    pub action_taken: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduledMedication {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub time: Option<String>,
    pub taken: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicationReminder {
    pub senior_id: Option<String>,
    pub medications: Vec<ScheduledMedication>,
    pub next_reminder: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCrisisPrediction {
    pub senior_id: Option<String>,
    pub risk_level: Option<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub predicted_window: Option<String>,
    pub confidence: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Content ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub published_at: Option<String>,
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsResponse {
    pub articles: Vec<Article>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Quiz difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub question: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: Option<u32>,
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quiz {
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub questions: Vec<QuizQuestion>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub book_id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub content_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Memory ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conversation {
    pub timestamp: Option<String>,
    pub message: Option<String>,
    pub response: Option<String>,
    pub sentiment: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserHistory {
    pub user_id: Option<String>,
    pub conversations: Vec<Conversation>,
    pub total_interactions: Option<u64>,
    pub last_interaction: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakthrough {
    pub user_id: Option<String>,
    pub breakthrough_type: Option<String>,
    pub description: Option<String>,
    pub detected_at: Option<String>,
    pub severity_improvement: Option<f64>,
    pub empathy_increase: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Who wrote a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

// --- Voice ---

/// Azure text-to-speech request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceRequest {
    pub text: String,
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

impl VoiceRequest {
    pub const DEFAULT_VOICE: &'static str = "cs-CZ-AntoninNeural";

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: Self::DEFAULT_VOICE.to_string(),
            rate: None,
            pitch: None,
        }
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }
}

// --- System ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: Option<String>,
    pub timestamp: Option<String>,
    pub version: Option<String>,
    pub checks: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
