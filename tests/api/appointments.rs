use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::helpers::{error_message, spawn_app, DRA_LIA, DR_PAULO};

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("data_hora is not an RFC 3339 timestamp")
}

#[tokio::test]
async fn booked_appointment_shows_up_in_the_user_history() {
    let app = spawn_app().await;
    let user_id = app.register_ana().await;
    assert_eq!(user_id, 1);

    let response = app
        .post_appointment(&json!({
            "usuario_id": 1,
            "medico_id": DRA_LIA,
            "data_hora": "2025-07-01T14:00:00Z"
        }))
        .await;
    assert_eq!(201, response.status().as_u16());
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["usuario_id"], 1);
    assert_eq!(created["medico_id"], DRA_LIA);

    let response = app.get("/consultas/usuario/1").await;
    assert_eq!(200, response.status().as_u16());
    let history: Vec<Value> = response.json().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["id"], created["id"]);
    assert_eq!(history[0]["medico"], "Dra. Lia");
    assert_eq!(history[0]["especialidade"], "Dermatologia");
    assert_eq!(
        timestamp(&history[0]["data_hora"]),
        "2025-07-01T14:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[tokio::test]
async fn history_contains_only_the_users_appointments_in_time_order() {
    let app = spawn_app().await;
    let ana = app.register_ana().await;
    let response = app
        .post_user(&json!({"nome": "Bia", "cpf": "10987654321", "senha": "xyz"}))
        .await;
    let bia = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    for (user_id, doctor_id, at) in [
        (ana, DR_PAULO, "2025-07-02T09:00:00Z"),
        (bia, DR_PAULO, "2025-07-01T10:00:00Z"),
        (ana, DRA_LIA, "2025-07-01T08:00:00Z"),
    ] {
        let response = app
            .post_appointment(&json!({
                "usuario_id": user_id,
                "medico_id": doctor_id,
                "data_hora": at
            }))
            .await;
        assert_eq!(201, response.status().as_u16());
    }

    let history: Vec<Value> = app
        .get(&format!("/consultas/usuario/{ana}"))
        .await
        .json()
        .await
        .unwrap();
    let doctors: Vec<&str> = history.iter().filter_map(|c| c["medico"].as_str()).collect();
    assert_eq!(doctors, ["Dra. Lia", "Dr. Paulo"]);

    let all: Vec<Value> = app.get("/consultas").await.json().await.unwrap();
    let times: Vec<DateTime<Utc>> = all.iter().map(|c| timestamp(&c["data_hora"])).collect();
    assert_eq!(all.len(), 3);
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn history_with_missing_or_undefined_user_id_returns_400() {
    let app = spawn_app().await;

    for path in [
        "/consultas/usuario/undefined",
        "/consultas/usuario/",
        "/consultas/usuario/abc",
    ] {
        let response = app.get(path).await;
        assert_eq!(400, response.status().as_u16(), "path {path}");
        assert!(error_message(response).await.contains("ID do usuário"));
    }
}

#[tokio::test]
async fn offsets_are_normalized_to_utc() {
    let app = spawn_app().await;
    let user_id = app.register_ana().await;

    let response = app
        .post_appointment(&json!({
            "usuario_id": user_id,
            "medico_id": DR_PAULO,
            "data_hora": "2025-07-01T11:00:00-03:00"
        }))
        .await;

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        timestamp(&body["data_hora"]),
        "2025-07-01T14:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[tokio::test]
async fn double_booking_a_doctor_returns_409() {
    let app = spawn_app().await;
    let user_id = app.register_ana().await;
    let booking = json!({
        "usuario_id": user_id,
        "medico_id": DR_PAULO,
        "data_hora": "2025-07-01T14:00:00Z"
    });
    assert_eq!(201, app.post_appointment(&booking).await.status().as_u16());

    let response = app.post_appointment(&booking).await;

    assert_eq!(409, response.status().as_u16());

    let other_doctor = json!({
        "usuario_id": user_id,
        "medico_id": DRA_LIA,
        "data_hora": "2025-07-01T14:00:00Z"
    });
    assert_eq!(201, app.post_appointment(&other_doctor).await.status().as_u16());
}

#[tokio::test]
async fn booking_the_same_slot_with_sub_microsecond_digits_returns_409() {
    let app = spawn_app().await;
    let user_id = app.register_ana().await;
    let first = json!({
        "usuario_id": user_id,
        "medico_id": DR_PAULO,
        "data_hora": "2025-07-01T14:00:00Z"
    });
    assert_eq!(201, app.post_appointment(&first).await.status().as_u16());

    let nudged = json!({
        "usuario_id": user_id,
        "medico_id": DR_PAULO,
        "data_hora": "2025-07-01T14:00:00.0000001Z"
    });
    let response = app.post_appointment(&nudged).await;

    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn booking_returns_400_for_invalid_payloads() {
    let app = spawn_app().await;
    let user_id = app.register_ana().await;
    let test_cases = vec![
        (
            json!({"medico_id": DR_PAULO, "data_hora": "2025-07-01T14:00:00Z"}),
            "missing user",
        ),
        (json!({"usuario_id": user_id, "medico_id": DR_PAULO}), "missing time"),
        (
            json!({"usuario_id": user_id, "medico_id": DR_PAULO, "data_hora": "amanhã"}),
            "malformed time",
        ),
        (
            json!({"usuario_id": "undefined", "medico_id": DR_PAULO, "data_hora": "2025-07-01T14:00:00Z"}),
            "non-numeric user",
        ),
        (
            json!({"usuario_id": user_id, "medico_id": 999, "data_hora": "2025-07-01T14:00:00Z"}),
            "unknown doctor",
        ),
        (
            json!({"usuario_id": 999, "medico_id": DR_PAULO, "data_hora": "2025-07-01T14:00:00Z"}),
            "unknown user",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_appointment(&body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
    }
}

#[tokio::test]
async fn rescheduling_overwrites_the_time_only() {
    let app = spawn_app().await;
    let user_id = app.register_ana().await;
    let created: Value = app
        .post_appointment(&json!({
            "usuario_id": user_id,
            "medico_id": DR_PAULO,
            "data_hora": "2025-07-01T14:00:00Z"
        }))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].to_string();

    let response = app
        .put_appointment(&id, &json!({"data_hora": "2025-07-03T16:30:00Z"}))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["medico_id"], DR_PAULO);
    assert_eq!(
        timestamp(&body["data_hora"]),
        "2025-07-03T16:30:00Z".parse::<DateTime<Utc>>().unwrap()
    );

    let fetched: Value = app
        .get(&format!("/consultas/{id}"))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn rescheduling_an_absent_appointment_returns_404() {
    let app = spawn_app().await;

    let response = app
        .put_appointment("77", &json!({"data_hora": "2025-07-03T16:30:00Z"}))
        .await;

    assert_eq!(404, response.status().as_u16());
    assert_eq!(error_message(response).await, "Consulta não encontrada");
}

#[tokio::test]
async fn rescheduling_into_a_taken_slot_returns_409() {
    let app = spawn_app().await;
    let user_id = app.register_ana().await;
    for at in ["2025-07-01T14:00:00Z", "2025-07-01T15:00:00Z"] {
        app.post_appointment(&json!({
            "usuario_id": user_id,
            "medico_id": DR_PAULO,
            "data_hora": at
        }))
        .await;
    }

    let response = app
        .put_appointment("2", &json!({"data_hora": "2025-07-01T14:00:00Z"}))
        .await;

    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn deleting_an_appointment_twice_returns_204_both_times() {
    let app = spawn_app().await;
    let user_id = app.register_ana().await;
    let created: Value = app
        .post_appointment(&json!({
            "usuario_id": user_id,
            "medico_id": DR_PAULO,
            "data_hora": "2025-07-01T14:00:00Z"
        }))
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/consultas/{}", created["id"]);

    let first = app.delete(&path).await;
    let second = app.delete(&path).await;

    assert_eq!(204, first.status().as_u16());
    assert_eq!(204, second.status().as_u16());
    assert_eq!(404, app.get(&path).await.status().as_u16());
}

#[tokio::test]
async fn deleting_with_a_bad_id_returns_400() {
    let app = spawn_app().await;

    let response = app.delete("/consultas/undefined").await;

    assert_eq!(400, response.status().as_u16());
}
