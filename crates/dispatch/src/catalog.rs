//! The built-in Radim Brain tool table.
//!
//! One entry per tool. Every entry is a contract with the backend: the
//! method, path and argument placement here are exactly what goes on the
//! wire.

use crate::schema::Param;
use crate::tool::{CallSpec, ToolDef};

const SENIOR_ID: Param = Param::string("senior_id", "Senior identifier").required();

const NO_PARAMS: &[Param] = &[];
const SENIOR_ONLY: &[Param] = &[SENIOR_ID];

pub static CATALOG: &[ToolDef] = &[
    // System
    ToolDef {
        name: "radim_health_check",
        description: "Check that the Radim Brain backend is up",
        params: NO_PARAMS,
        call: CallSpec::get("/health"),
    },
    ToolDef {
        name: "radim_windsurf_health",
        description: "Health of the Windsurf integration layer",
        params: NO_PARAMS,
        call: CallSpec::get("/api/windsurf/health"),
    },
    // Seniors
    ToolDef {
        name: "radim_list_seniors",
        description: "List monitored seniors, optionally filtered",
        params: &[
            Param::string("status", "Filter by status"),
            Param::number("floor", "Filter by floor"),
            Param::string("facility", "Filter by facility"),
            Param::number("care_level", "Filter by care level"),
        ],
        call: CallSpec::get("/api/seniors"),
    },
    ToolDef {
        name: "radim_get_senior",
        description: "Get one senior's profile",
        params: SENIOR_ONLY,
        call: CallSpec::get("/api/seniors/{senior_id}"),
    },
    ToolDef {
        name: "radim_create_senior",
        description: "Register a new senior",
        params: &[
            Param::string("name", "Full name").required(),
            Param::range("age", 50.0, 120.0, "Age in years").required(),
            Param::string("room", "Room number").required(),
            Param::number("floor", "Floor"),
            Param::array("medical_conditions", "Known medical conditions"),
            Param::array("medications", "Current medications"),
            Param::object("baselines", "Baseline vital values"),
            Param::object("preferences", "Personal preferences"),
        ],
        call: CallSpec::post("/api/seniors"),
    },
    ToolDef {
        name: "radim_update_senior",
        description: "Update fields of an existing senior",
        params: &[
            SENIOR_ID,
            Param::string("name", "Full name"),
            Param::range("age", 50.0, 120.0, "Age in years"),
            Param::string("room", "Room number"),
            Param::number("floor", "Floor"),
            Param::string("status", "Monitoring status"),
            Param::number("care_level", "Care level"),
            Param::array("medications", "Current medications"),
            Param::object("preferences", "Personal preferences"),
        ],
        call: CallSpec::put("/api/seniors/{senior_id}"),
    },
    // Vitals and IoT
    ToolDef {
        name: "radim_get_vitals",
        description: "Current vital signs of a senior",
        params: SENIOR_ONLY,
        call: CallSpec::get("/api/iot/sensors/{senior_id}/vitals"),
    },
    ToolDef {
        name: "radim_vitals_history",
        description: "Vital sign history of a senior",
        params: &[
            SENIOR_ID,
            Param::number("hours", "How many hours back to look"),
        ],
        call: CallSpec::get("/api/iot/sensors/{senior_id}/history"),
    },
    ToolDef {
        name: "radim_add_sensor_reading",
        description: "Record one sensor reading for a senior",
        params: &[
            SENIOR_ID,
            Param::string("sensor_type", "Sensor type, e.g. heart_rate").required(),
            Param::number("value", "Measured value").required(),
            Param::string("unit", "Unit of the value"),
        ],
        call: CallSpec::post("/api/seniors/{senior_id}/sensor"),
    },
    ToolDef {
        name: "radim_iot_status",
        description: "Status of the IoT sensor system",
        params: NO_PARAMS,
        call: CallSpec::get("/api/iot/system/status"),
    },
    ToolDef {
        name: "radim_mesh_status",
        description: "Status of the sensor mesh network",
        params: NO_PARAMS,
        call: CallSpec::get("/api/iot/mesh/status"),
    },
    ToolDef {
        name: "radim_detect_patterns",
        description: "Detect behavioural patterns in a senior's sensor data",
        params: SENIOR_ONLY,
        call: CallSpec::get("/api/iot/sensors/{senior_id}/patterns"),
    },
    // Therapy
    ToolDef {
        name: "radim_therapy_advice",
        description: "Therapeutic advice for a senior in a given situation",
        params: &[
            SENIOR_ID,
            Param::string("context", "Situation to advise on").required(),
        ],
        call: CallSpec::post("/kal/therapy/advice"),
    },
    ToolDef {
        name: "radim_empathic_response",
        description: "Generate an empathetic reply to a message",
        params: &[Param::string("message", "Message to respond to").required()],
        call: CallSpec::post("/kal/therapy/empathy"),
    },
    ToolDef {
        name: "radim_get_exercises",
        description: "Therapeutic exercises recommended for a senior",
        params: SENIOR_ONLY,
        call: CallSpec::get("/kal/therapy/exercises"),
    },
    ToolDef {
        name: "radim_academy_lesson",
        description: "Fetch a lesson from the caregiver academy",
        params: &[Param::string("lesson_id", "Lesson identifier").required()],
        call: CallSpec::get("/kal/therapy/academy"),
    },
    // AI
    ToolDef {
        name: "radim_smart_chat",
        description: "Chat with the Radim assistant",
        params: &[
            Param::string("message", "Message to send").required(),
            Param::string("user_id", "Conversation owner"),
        ],
        call: CallSpec::post("/kal/gemini/smart-chat").defaults(&[("user_id", "claude-desktop")]),
    },
    ToolDef {
        name: "radim_quantum_analysis",
        description: "Run the quantum text analysis pipeline",
        params: &[
            Param::string("text", "Text to analyse").required(),
            Param::string("analysis_type", "Kind of analysis"),
        ],
        call: CallSpec::post("/quantum/process"),
    },
    // Scenarios
    ToolDef {
        name: "radim_fall_detection",
        description: "Evaluate sensor data for a possible fall",
        params: &[
            SENIOR_ID,
            Param::object("sensor_data", "Raw sensor readings").required(),
        ],
        call: CallSpec::post("/api/radim/scenarios/fall-detection").merge("sensor_data"),
    },
    ToolDef {
        name: "radim_medication_reminder",
        description: "Medication reminder scenario for a senior",
        params: SENIOR_ONLY,
        call: CallSpec::get("/api/radim/scenarios/medication-reminder"),
    },
    ToolDef {
        name: "radim_night_monitoring",
        description: "Night monitoring scenario for a senior",
        params: SENIOR_ONLY,
        call: CallSpec::get("/api/radim/scenarios/night-monitoring"),
    },
    ToolDef {
        name: "radim_predict_crisis",
        description: "Predict the risk of a health crisis",
        params: SENIOR_ONLY,
        call: CallSpec::post("/api/radim/predict/health-crisis"),
    },
    // Content
    ToolDef {
        name: "radim_fetch_news",
        description: "Fetch news articles",
        params: &[Param::string("category", "News category")],
        call: CallSpec::post("/kal/news/fetch").defaults(&[("category", "general")]),
    },
    ToolDef {
        name: "radim_generate_quiz",
        description: "Generate a memory training quiz",
        params: &[
            Param::string("topic", "Quiz topic").required(),
            Param::one_of("difficulty", &["easy", "medium", "hard"], "Difficulty").required(),
        ],
        call: CallSpec::post("/kal/quiz/generate"),
    },
    ToolDef {
        name: "radim_list_books",
        description: "List books in the library",
        params: NO_PARAMS,
        call: CallSpec::get("/kal/library/books"),
    },
    ToolDef {
        name: "radim_get_book",
        description: "Get one book from the library",
        params: &[Param::string("book_id", "Book identifier").required()],
        call: CallSpec::get("/kal/library/books/{book_id}"),
    },
    // Memory
    ToolDef {
        name: "radim_user_history",
        description: "Conversation history of a user",
        params: &[Param::string("user_id", "User identifier").required()],
        call: CallSpec::get("/kal/radim/history/{user_id}"),
    },
    ToolDef {
        name: "radim_breakthroughs",
        description: "Therapeutic breakthroughs recorded for a user",
        params: &[Param::string("user_id", "User identifier").required()],
        call: CallSpec::get("/kal/radim/breakthroughs/{user_id}"),
    },
    // Voice
    ToolDef {
        name: "radim_synthesize_voice",
        description: "Synthesize speech; the audio comes back base64-encoded",
        params: &[
            Param::string("text", "Text to speak").required(),
            Param::string("voice", "Azure voice name"),
        ],
        call: CallSpec::post("/api/azure/tts").defaults(&[("voice", "cs-CZ-AntoninNeural")]),
    },
];
