mod common;

use backend::Method;
use common::{Recording, sample_arguments};
use dispatch::{DispatchError, Dispatcher, Registry};
use serde_json::{Value, json};

/// (tool, method, path with "v" for every placeholder, keys carried in the
/// query string or body when every declared argument is supplied)
const EXPECTED: &[(&str, Method, &str, &[&str])] = &[
    ("radim_health_check", Method::Get, "/health", &[]),
    ("radim_windsurf_health", Method::Get, "/api/windsurf/health", &[]),
    (
        "radim_list_seniors",
        Method::Get,
        "/api/seniors",
        &["care_level", "facility", "floor", "status"],
    ),
    ("radim_get_senior", Method::Get, "/api/seniors/v", &[]),
    (
        "radim_create_senior",
        Method::Post,
        "/api/seniors",
        &[
            "age",
            "baselines",
            "floor",
            "medical_conditions",
            "medications",
            "name",
            "preferences",
            "room",
        ],
    ),
    (
        "radim_update_senior",
        Method::Put,
        "/api/seniors/v",
        &[
            "age",
            "care_level",
            "floor",
            "medications",
            "name",
            "preferences",
            "room",
            "status",
        ],
    ),
    ("radim_get_vitals", Method::Get, "/api/iot/sensors/v/vitals", &[]),
    (
        "radim_vitals_history",
        Method::Get,
        "/api/iot/sensors/v/history",
        &["hours"],
    ),
    (
        "radim_add_sensor_reading",
        Method::Post,
        "/api/seniors/v/sensor",
        &["sensor_type", "unit", "value"],
    ),
    ("radim_iot_status", Method::Get, "/api/iot/system/status", &[]),
    ("radim_mesh_status", Method::Get, "/api/iot/mesh/status", &[]),
    (
        "radim_detect_patterns",
        Method::Get,
        "/api/iot/sensors/v/patterns",
        &[],
    ),
    (
        "radim_therapy_advice",
        Method::Post,
        "/kal/therapy/advice",
        &["context", "senior_id"],
    ),
    (
        "radim_empathic_response",
        Method::Post,
        "/kal/therapy/empathy",
        &["message"],
    ),
    (
        "radim_get_exercises",
        Method::Get,
        "/kal/therapy/exercises",
        &["senior_id"],
    ),
    (
        "radim_academy_lesson",
        Method::Get,
        "/kal/therapy/academy",
        &["lesson_id"],
    ),
    (
        "radim_smart_chat",
        Method::Post,
        "/kal/gemini/smart-chat",
        &["message", "user_id"],
    ),
    (
        "radim_quantum_analysis",
        Method::Post,
        "/quantum/process",
        &["analysis_type", "text"],
    ),
    (
        "radim_fall_detection",
        Method::Post,
        "/api/radim/scenarios/fall-detection",
        &["reading", "senior_id"],
    ),
    (
        "radim_medication_reminder",
        Method::Get,
        "/api/radim/scenarios/medication-reminder",
        &["senior_id"],
    ),
    (
        "radim_night_monitoring",
        Method::Get,
        "/api/radim/scenarios/night-monitoring",
        &["senior_id"],
    ),
    (
        "radim_predict_crisis",
        Method::Post,
        "/api/radim/predict/health-crisis",
        &["senior_id"],
    ),
    ("radim_fetch_news", Method::Post, "/kal/news/fetch", &["category"]),
    (
        "radim_generate_quiz",
        Method::Post,
        "/kal/quiz/generate",
        &["difficulty", "topic"],
    ),
    ("radim_list_books", Method::Get, "/kal/library/books", &[]),
    ("radim_get_book", Method::Get, "/kal/library/books/v", &[]),
    ("radim_user_history", Method::Get, "/kal/radim/history/v", &[]),
    (
        "radim_breakthroughs",
        Method::Get,
        "/kal/radim/breakthroughs/v",
        &[],
    ),
    (
        "radim_synthesize_voice",
        Method::Post,
        "/api/azure/tts",
        &["text", "voice"],
    ),
];

fn dispatcher() -> Dispatcher<std::sync::Arc<Recording>> {
    Dispatcher::new(Registry::builtin().unwrap(), Recording::replying(json!({})))
}

fn carried_keys(request: &backend::BackendRequest) -> Vec<String> {
    let mut keys: Vec<String> = match &request.body {
        Some(Value::Object(body)) => body.keys().cloned().collect(),
        Some(other) => panic!("non-object body: {other}"),
        None => request.query.iter().map(|(k, _)| k.clone()).collect(),
    };
    keys.sort();
    keys
}

#[test]
fn table_covers_every_tool() {
    let registry = Registry::builtin().unwrap();
    let names: Vec<&str> = registry.tools().iter().map(|t| t.name).collect();
    let expected: Vec<&str> = EXPECTED.iter().map(|(name, ..)| *name).collect();
    assert_eq!(names, expected);
}

#[test]
fn every_tool_matches_its_call_spec() {
    let dispatcher = dispatcher();

    for &(name, method, path, keys) in EXPECTED {
        let tool = dispatcher.registry().get(name).unwrap();
        let request = dispatcher
            .plan(name, Some(sample_arguments(tool, true)))
            .unwrap_or_else(|e| panic!("{name}: {e}"));

        assert_eq!(request.method, method, "{name}");
        assert_eq!(request.path, path, "{name}");
        assert_eq!(carried_keys(&request), keys, "{name}");

        if method.has_body() {
            assert!(request.query.is_empty(), "{name} sent a query string");
        } else {
            assert!(request.body.is_none(), "{name} sent a body");
        }
    }
}

#[test]
fn every_required_argument_is_enforced() {
    let dispatcher = dispatcher();

    for tool in dispatcher.registry().tools() {
        for param in tool.params.iter().filter(|p| p.required) {
            let mut arguments = sample_arguments(tool, false);
            arguments.as_object_mut().unwrap().remove(param.name);

            match dispatcher.plan(tool.name, Some(arguments)) {
                Err(DispatchError::MissingArgument { tool: t, param: p }) => {
                    assert_eq!(t, tool.name);
                    assert_eq!(p, param.name);
                }
                other => panic!("{}: omitting {} gave {other:?}", tool.name, param.name),
            }
        }
    }
}

#[test]
fn defaults_injected() {
    let dispatcher = dispatcher();

    let request = dispatcher
        .plan("radim_smart_chat", Some(json!({"message": "Ahoj"})))
        .unwrap();
    assert_eq!(
        request.body,
        Some(json!({"message": "Ahoj", "user_id": "claude-desktop"}))
    );

    let request = dispatcher
        .plan("radim_synthesize_voice", Some(json!({"text": "Dobrý den"})))
        .unwrap();
    assert_eq!(
        request.body,
        Some(json!({"text": "Dobrý den", "voice": "cs-CZ-AntoninNeural"}))
    );

    let request = dispatcher
        .plan("radim_fetch_news", Some(json!({"category": "health"})))
        .unwrap();
    assert_eq!(request.body, Some(json!({"category": "health"})));
}

#[test]
fn constrained_arguments_rejected() {
    let dispatcher = dispatcher();

    let err = dispatcher
        .plan(
            "radim_create_senior",
            Some(json!({"name": "Marie", "age": 42, "room": "101"})),
        )
        .unwrap_err();
    assert!(
        matches!(err, DispatchError::InvalidArgument { param: "age", .. }),
        "{err:?}"
    );

    let err = dispatcher
        .plan(
            "radim_generate_quiz",
            Some(json!({"topic": "history", "difficulty": "extreme"})),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::InvalidArgument {
            param: "difficulty",
            ..
        }
    ));

    let err = dispatcher
        .plan(
            "radim_fall_detection",
            Some(json!({"senior_id": "s1", "sensor_data": "fell"})),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::InvalidArgument {
            param: "sensor_data",
            ..
        }
    ));
}

#[test]
fn list_query_carries_filters() {
    let request = dispatcher()
        .plan(
            "radim_list_seniors",
            Some(json!({"status": "critical", "floor": 2})),
        )
        .unwrap();
    assert_eq!(request.query_value("status"), Some("critical"));
    assert_eq!(request.query_value("floor"), Some("2"));
    assert_eq!(request.query_value("facility"), None);
}

#[test]
fn create_senior_body_passes_values_through() {
    let request = dispatcher()
        .plan(
            "radim_create_senior",
            Some(json!({
                "name": "Marie Nováková",
                "age": 82,
                "room": "101",
                "medications": ["Warfarin"],
                "baselines": {"heart_rate": 72}
            })),
        )
        .unwrap();
    assert_eq!(
        request.body,
        Some(json!({
            "name": "Marie Nováková",
            "age": 82,
            "room": "101",
            "medications": ["Warfarin"],
            "baselines": {"heart_rate": 72}
        }))
    );
}

#[test]
fn create_senior_requires_name_not_split_names() {
    let err = dispatcher()
        .plan(
            "radim_create_senior",
            Some(json!({
                "first_name": "Marie",
                "last_name": "Nováková",
                "age": 82,
                "room": "101"
            })),
        )
        .unwrap_err();
    assert!(matches!(err, DispatchError::MissingArgument { param: "name", .. }));

    let request = dispatcher()
        .plan(
            "radim_create_senior",
            Some(json!({
                "name": "Marie Nováková",
                "first_name": "Marie",
                "age": 82,
                "room": "101"
            })),
        )
        .unwrap();
    assert_eq!(
        request.body,
        Some(json!({"name": "Marie Nováková", "age": 82, "room": "101"}))
    );
}
