//! The SDK entry point and its namespaces.

use std::sync::Arc;

use backend::{BackendConfig, BackendRequest, HttpTransport, Transport, encode_segment};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::types::*;

/// Default `user_id` for chat requests.
pub const DEFAULT_CHAT_USER: &str = "claude-desktop";

/// Default news category.
pub const DEFAULT_NEWS_CATEGORY: &str = "general";

/// Typed client for the Radim Brain API.
///
/// Cheap to clone; clones share one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct RadimBrain {
    transport: Arc<HttpTransport>,
}

impl RadimBrain {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::from_config(config)?))
    }

    /// Configure from `RADIM_API_URL` (or the legacy `RADIM_BRAIN_URL`).
    pub fn from_env() -> Result<Self> {
        Self::new(&BackendConfig::from_env())
    }

    /// Use a preconfigured transport, e.g. one with extra headers.
    pub fn with_transport(transport: HttpTransport) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub fn seniors(&self) -> Seniors<'_> {
        Seniors { client: self }
    }

    pub fn iot(&self) -> Iot<'_> {
        Iot { client: self }
    }

    pub fn therapy(&self) -> Therapy<'_> {
        Therapy { client: self }
    }

    pub fn ai(&self) -> Ai<'_> {
        Ai { client: self }
    }

    pub fn scenarios(&self) -> Scenarios<'_> {
        Scenarios { client: self }
    }

    pub fn predictions(&self) -> Predictions<'_> {
        Predictions { client: self }
    }

    pub fn content(&self) -> Content<'_> {
        Content { client: self }
    }

    pub fn memory(&self) -> Memory<'_> {
        Memory { client: self }
    }

    pub fn voice(&self) -> Voice<'_> {
        Voice { client: self }
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.fetch(BackendRequest::get("/health")).await
    }

    pub async fn windsurf_health(&self) -> Result<Value> {
        self.fetch(BackendRequest::get("/api/windsurf/health")).await
    }

    async fn send(&self, request: BackendRequest) -> Result<(String, Value)> {
        let endpoint = request.to_string();
        let value = self.transport.send(request).await?;
        Ok((endpoint, value))
    }

    async fn fetch<R: DeserializeOwned>(&self, request: BackendRequest) -> Result<R> {
        let (endpoint, value) = self.send(request).await?;
        decode(endpoint, value)
    }

    /// Like `fetch`, but reads `field` out of the envelope when present.
    async fn fetch_field<R: DeserializeOwned>(
        &self,
        request: BackendRequest,
        field: &str,
    ) -> Result<R> {
        let (endpoint, value) = self.send(request).await?;
        decode(endpoint, unwrap_field(value, field))
    }

    async fn fetch_bytes(&self, request: BackendRequest) -> Result<Vec<u8>> {
        Ok(self.transport.send_bytes(request).await?)
    }
}

fn decode<R: DeserializeOwned>(endpoint: String, value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|source| {
        tracing::debug!(%endpoint, error = %source, "response did not match the expected shape");
        Error::Decode { endpoint, source }
    })
}

fn unwrap_field(value: Value, field: &str) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key(field) => map.remove(field).unwrap_or_default(),
        other => other,
    }
}

fn to_body(value: &impl Serialize, endpoint: &str) -> Result<Value> {
    serde_json::to_value(value).map_err(|source| Error::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn senior_path(id: &str, rest: &str) -> String {
    format!("/api/seniors/{}{rest}", encode_segment(id))
}

fn sensors_path(id: &str, rest: &str) -> String {
    format!("/api/iot/sensors/{}/{rest}", encode_segment(id))
}

/// Senior profiles and their vitals.
pub struct Seniors<'a> {
    client: &'a RadimBrain,
}

impl Seniors<'_> {
    pub async fn list(&self, filter: &SeniorFilter) -> Result<Vec<Senior>> {
        let mut request = BackendRequest::get("/api/seniors");
        for (key, value) in filter.query_pairs() {
            request = request.with_query(key, value);
        }
        self.client.fetch_field(request, "seniors").await
    }

    pub async fn get(&self, id: &str) -> Result<Senior> {
        let request = BackendRequest::get(senior_path(id, ""));
        self.client.fetch_field(request, "senior").await
    }

    pub async fn create(&self, senior: &NewSenior) -> Result<Senior> {
        let body = to_body(senior, "POST /api/seniors")?;
        let request = BackendRequest::post("/api/seniors").with_body(body);
        self.client.fetch_field(request, "senior").await
    }

    pub async fn update(&self, id: &str, update: &SeniorUpdate) -> Result<Senior> {
        let path = senior_path(id, "");
        let body = to_body(update, &path)?;
        let request = BackendRequest::put(path).with_body(body);
        self.client.fetch_field(request, "senior").await
    }

    pub async fn vitals(&self, id: &str) -> Result<VitalsSummary> {
        let request = BackendRequest::get(sensors_path(id, "vitals"));
        self.client.fetch(request).await
    }

    pub async fn add_sensor_reading(&self, id: &str, reading: &SensorReading) -> Result<Value> {
        let path = senior_path(id, "/sensor");
        let body = to_body(reading, &path)?;
        self.client
            .fetch(BackendRequest::post(path).with_body(body))
            .await
    }
}

/// Sensor system and mesh network.
pub struct Iot<'a> {
    client: &'a RadimBrain,
}

impl Iot<'_> {
    pub async fn system_status(&self) -> Result<IotSystemStatus> {
        self.client
            .fetch(BackendRequest::get("/api/iot/system/status"))
            .await
    }

    pub async fn mesh_status(&self) -> Result<MeshStatus> {
        self.client
            .fetch(BackendRequest::get("/api/iot/mesh/status"))
            .await
    }

    pub async fn detect_patterns(&self, senior_id: &str) -> Result<PatternDetection> {
        self.client
            .fetch(BackendRequest::get(sensors_path(senior_id, "patterns")))
            .await
    }

    pub async fn vitals_history(&self, senior_id: &str, hours: Option<u32>) -> Result<Value> {
        let mut request = BackendRequest::get(sensors_path(senior_id, "history"));
        if let Some(hours) = hours {
            request = request.with_query("hours", hours.to_string());
        }
        self.client.fetch(request).await
    }
}

/// Therapeutic guidance.
pub struct Therapy<'a> {
    client: &'a RadimBrain,
}

impl Therapy<'_> {
    pub async fn advice(&self, senior_id: &str, context: &str) -> Result<TherapyAdvice> {
        let request = BackendRequest::post("/kal/therapy/advice")
            .with_body(json!({"senior_id": senior_id, "context": context}));
        self.client.fetch(request).await
    }

    pub async fn empathetic_response(&self, message: &str) -> Result<EmpatheticResponse> {
        let request =
            BackendRequest::post("/kal/therapy/empathy").with_body(json!({"message": message}));
        self.client.fetch(request).await
    }

    pub async fn exercises(&self, senior_id: &str) -> Result<ExerciseRoutine> {
        let request =
            BackendRequest::get("/kal/therapy/exercises").with_query("senior_id", senior_id);
        self.client.fetch(request).await
    }

    pub async fn academy_lesson(&self, lesson_id: &str) -> Result<Value> {
        let request =
            BackendRequest::get("/kal/therapy/academy").with_query("lesson_id", lesson_id);
        self.client.fetch(request).await
    }
}

/// Conversational and analysis models.
pub struct Ai<'a> {
    client: &'a RadimBrain,
}

impl Ai<'_> {
    /// Chat as `user_id`, or as [`DEFAULT_CHAT_USER`] when `None`.
    pub async fn smart_chat(&self, message: &str, user_id: Option<&str>) -> Result<ChatResponse> {
        let request = BackendRequest::post("/kal/gemini/smart-chat").with_body(json!({
            "message": message,
            "user_id": user_id.unwrap_or(DEFAULT_CHAT_USER),
        }));
        self.client.fetch(request).await
    }

    pub async fn quantum_analysis(&self, input: &Value) -> Result<QuantumAnalysis> {
        let request = BackendRequest::post("/quantum/process").with_body(input.clone());
        self.client.fetch(request).await
    }
}

/// Care scenarios.
pub struct Scenarios<'a> {
    client: &'a RadimBrain,
}

impl Scenarios<'_> {
    /// `sensor_data` fields are sent at the top level next to `senior_id`.
    pub async fn fall_detection(
        &self,
        senior_id: &str,
        sensor_data: &Value,
    ) -> Result<FallDetection> {
        let mut body = Map::new();
        body.insert("senior_id".into(), Value::String(senior_id.to_string()));
        if let Value::Object(fields) = sensor_data {
            for (key, value) in fields {
                body.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        let request = BackendRequest::post("/api/radim/scenarios/fall-detection")
            .with_body(Value::Object(body));
        self.client.fetch(request).await
    }

    pub async fn medication_reminder(&self, senior_id: &str) -> Result<MedicationReminder> {
        let request = BackendRequest::get("/api/radim/scenarios/medication-reminder")
            .with_query("senior_id", senior_id);
        self.client.fetch(request).await
    }

    pub async fn night_monitoring(&self, senior_id: &str) -> Result<Value> {
        let request = BackendRequest::get("/api/radim/scenarios/night-monitoring")
            .with_query("senior_id", senior_id);
        self.client.fetch(request).await
    }
}

/// Risk prediction.
pub struct Predictions<'a> {
    client: &'a RadimBrain,
}

impl Predictions<'_> {
    pub async fn health_crisis(&self, senior_id: &str) -> Result<HealthCrisisPrediction> {
        let request = BackendRequest::post("/api/radim/predict/health-crisis")
            .with_body(json!({"senior_id": senior_id}));
        self.client.fetch(request).await
    }
}

/// News, quizzes and the library.
pub struct Content<'a> {
    client: &'a RadimBrain,
}

impl Content<'_> {
    pub async fn fetch_news(&self, category: Option<&str>) -> Result<NewsResponse> {
        let request = BackendRequest::post("/kal/news/fetch").with_body(json!({
            "category": category.unwrap_or(DEFAULT_NEWS_CATEGORY),
        }));
        self.client.fetch(request).await
    }

    pub async fn generate_quiz(&self, topic: &str, difficulty: Difficulty) -> Result<Quiz> {
        let request = BackendRequest::post("/kal/quiz/generate")
            .with_body(json!({"topic": topic, "difficulty": difficulty}));
        self.client.fetch(request).await
    }

    pub async fn list_books(&self) -> Result<Vec<Book>> {
        self.client
            .fetch_field(BackendRequest::get("/kal/library/books"), "books")
            .await
    }

    pub async fn get_book(&self, book_id: &str) -> Result<Book> {
        let path = format!("/kal/library/books/{}", encode_segment(book_id));
        self.client
            .fetch_field(BackendRequest::get(path), "book")
            .await
    }
}

/// Conversation memory.
pub struct Memory<'a> {
    client: &'a RadimBrain,
}

impl Memory<'_> {
    pub async fn user_history(&self, user_id: &str) -> Result<UserHistory> {
        let path = format!("/kal/radim/history/{}", encode_segment(user_id));
        self.client.fetch(BackendRequest::get(path)).await
    }

    pub async fn breakthroughs(&self, user_id: &str) -> Result<Vec<Breakthrough>> {
        let path = format!("/kal/radim/breakthroughs/{}", encode_segment(user_id));
        self.client
            .fetch_field(BackendRequest::get(path), "breakthroughs")
            .await
    }

    pub async fn save_message(&self, user_id: &str, role: Role, content: &str) -> Result<Value> {
        let path = format!("/api/memory/history/{}", encode_segment(user_id));
        let request =
            BackendRequest::post(path).with_body(json!({"role": role, "content": content}));
        self.client.fetch(request).await
    }
}

/// Speech synthesis. Both methods return the raw audio (MP3).
pub struct Voice<'a> {
    client: &'a RadimBrain,
}

impl Voice<'_> {
    pub async fn synthesize(&self, request: &VoiceRequest) -> Result<Vec<u8>> {
        let body = to_body(request, "POST /api/azure/tts")?;
        self.client
            .fetch_bytes(BackendRequest::post("/api/azure/tts").with_body(body))
            .await
    }

    pub async fn synthesize_eleven_labs(
        &self,
        text: &str,
        voice_id: Option<&str>,
    ) -> Result<Vec<u8>> {
        let mut body = json!({"text": text});
        if let Some(voice_id) = voice_id {
            body["voice_id"] = json!(voice_id);
        }
        self.client
            .fetch_bytes(BackendRequest::post("/api/elevenlabs/tts").with_body(body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_envelope_field() {
        let value = json!({"success": true, "senior": {"id": "s1"}});
        assert_eq!(unwrap_field(value, "senior"), json!({"id": "s1"}));
    }

    #[test]
    fn bare_value_passes_through() {
        let value = json!([{"id": "b1"}]);
        assert_eq!(unwrap_field(value.clone(), "books"), value);
    }

    #[test]
    fn paths_encode_ids() {
        assert_eq!(senior_path("a/b", "/sensor"), "/api/seniors/a%2Fb/sensor");
        assert_eq!(sensors_path("s 1", "vitals"), "/api/iot/sensors/s%201/vitals");
    }

    #[test]
    fn decode_error_names_endpoint() {
        let err = decode::<Vec<Senior>>("GET /api/seniors".into(), json!({"oops": 1})).unwrap_err();
        assert!(err.to_string().starts_with("unexpected response from GET /api/seniors"));
    }
}
