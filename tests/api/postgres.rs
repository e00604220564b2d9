//! The same HTTP contract served by `PgStore`. Needs `DATABASE_URL` pointing
//! at a server where new databases can be created; otherwise each test returns
//! early.

use chrono::{DateTime, Utc};
use consultplus::store::{CPF_UNIQUE_CONSTRAINT, DOCTOR_SLOT_UNIQUE_CONSTRAINT};
use serde_json::{json, Value};

use crate::helpers::{error_message, spawn_pg_app, DRA_LIA, DR_PAULO};

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("data_hora is not an RFC 3339 timestamp")
}

#[tokio::test]
async fn schema_carries_the_constraint_names_errors_are_classified_by() {
    let Some(app) = spawn_pg_app().await else {
        return;
    };

    let names: Vec<String> =
        sqlx::query_scalar("SELECT conname::text FROM pg_constraint WHERE conname::text = ANY($1)")
            .bind(vec![CPF_UNIQUE_CONSTRAINT, DOCTOR_SLOT_UNIQUE_CONSTRAINT])
            .fetch_all(&app.store)
            .await
            .expect("Failed to query constraints.");

    assert!(names.iter().any(|n| n == CPF_UNIQUE_CONSTRAINT));
    assert!(names.iter().any(|n| n == DOCTOR_SLOT_UNIQUE_CONSTRAINT));
}

#[tokio::test]
async fn user_round_trips_through_postgres() {
    let Some(app) = spawn_pg_app().await else {
        return;
    };

    let response = app
        .post_user(&json!({
            "nome": "Ana",
            "cpf": "123.456.789-01",
            "senha": "abc",
            "telefone": "(11) 98765-4321",
            "data_nascimento": "1990-05-17"
        }))
        .await;
    assert_eq!(201, response.status().as_u16());
    let created: Value = response.json().await.unwrap();

    let response = app.get(&format!("/usuarios/{}", created["id"])).await;
    assert_eq!(200, response.status().as_u16());
    let fetched: Value = response.json().await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched["data_nascimento"], "1990-05-17");
    assert!(fetched.get("password_hash").is_none());

    let response = app
        .post_login(&json!({"cpf": "12345678901", "senha": "abc"}))
        .await;
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn duplicate_cpf_returns_409() {
    let Some(app) = spawn_pg_app().await else {
        return;
    };
    app.register_ana().await;

    let response = app
        .post_user(&json!({"nome": "Outra Ana", "cpf": "12345678901", "senha": "xyz"}))
        .await;
    assert_eq!(409, response.status().as_u16());
    assert_eq!(error_message(response).await, "CPF já cadastrado");

    let response = app
        .post_user(&json!({"nome": "Bia", "cpf": "10987654321", "senha": "xyz"}))
        .await;
    let bia = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();
    let response = app
        .put_user(
            &bia.to_string(),
            &json!({"nome": "Bia", "cpf": "12345678901", "senha": "xyz"}),
        )
        .await;
    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn double_booking_a_doctor_returns_409() {
    let Some(app) = spawn_pg_app().await else {
        return;
    };
    let user_id = app.register_ana().await;
    let booking = json!({
        "usuario_id": user_id,
        "medico_id": DR_PAULO,
        "data_hora": "2025-07-01T14:00:00Z"
    });
    assert_eq!(201, app.post_appointment(&booking).await.status().as_u16());

    let response = app.post_appointment(&booking).await;
    assert_eq!(409, response.status().as_u16());

    let nudged = json!({
        "usuario_id": user_id,
        "medico_id": DR_PAULO,
        "data_hora": "2025-07-01T14:00:00.0000001Z"
    });
    assert_eq!(409, app.post_appointment(&nudged).await.status().as_u16());

    let response = app
        .post_appointment(&json!({
            "usuario_id": user_id,
            "medico_id": DR_PAULO,
            "data_hora": "2025-07-01T15:00:00Z"
        }))
        .await;
    let later = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();
    let response = app
        .put_appointment(
            &later.to_string(),
            &json!({"data_hora": "2025-07-01T14:00:00Z"}),
        )
        .await;
    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn booking_for_unknown_user_or_doctor_returns_400() {
    let Some(app) = spawn_pg_app().await else {
        return;
    };
    let user_id = app.register_ana().await;

    for (usuario_id, medico_id) in [(user_id, 99), (user_id + 100, i64::from(DR_PAULO))] {
        let response = app
            .post_appointment(&json!({
                "usuario_id": usuario_id,
                "medico_id": medico_id,
                "data_hora": "2025-07-01T14:00:00Z"
            }))
            .await;
        assert_eq!(400, response.status().as_u16());
        assert_eq!(error_message(response).await, "Usuário ou médico inexistente");
    }
}

#[tokio::test]
async fn history_joins_doctor_and_specialty_in_time_order() {
    let Some(app) = spawn_pg_app().await else {
        return;
    };
    let user_id = app.register_ana().await;
    for (doctor_id, at) in [
        (DRA_LIA, "2025-07-02T09:00:00-03:00"),
        (DR_PAULO, "2025-07-01T08:00:00Z"),
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

    let response = app.get(&format!("/consultas/usuario/{user_id}")).await;
    assert_eq!(200, response.status().as_u16());
    let history: Vec<Value> = response.json().await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["medico"], "Dr. Paulo");
    assert_eq!(history[0]["especialidade"], "Cardiologia");
    assert_eq!(history[1]["medico"], "Dra. Lia");
    assert_eq!(history[1]["especialidade"], "Dermatologia");
    assert_eq!(
        timestamp(&history[1]["data_hora"]),
        "2025-07-02T12:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[tokio::test]
async fn deleting_a_user_removes_their_appointments() {
    let Some(app) = spawn_pg_app().await else {
        return;
    };
    let user_id = app.register_ana().await;
    let response = app
        .post_appointment(&json!({
            "usuario_id": user_id,
            "medico_id": DR_PAULO,
            "data_hora": "2025-07-01T14:00:00Z"
        }))
        .await;
    let appointment_id = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let response = app.delete(&format!("/usuarios/{user_id}")).await;
    assert_eq!(200, response.status().as_u16());

    let response = app.get(&format!("/consultas/{appointment_id}")).await;
    assert_eq!(404, response.status().as_u16());
    let remaining: Vec<Value> = app.get("/consultas").await.json().await.unwrap();
    assert!(remaining.is_empty());

    let response = app.delete(&format!("/consultas/{appointment_id}")).await;
    assert_eq!(204, response.status().as_u16());
}
