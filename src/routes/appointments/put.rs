use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};

use crate::{domain::BookingError, services::appointments, store::BookingStore, utils::parse_id};

#[derive(serde::Deserialize)]
pub struct RescheduleData {
    data_hora: DateTime<Utc>,
}

pub async fn update_appointment(
    id: web::Path<String>,
    reschedule_data: web::Json<RescheduleData>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let id = parse_id(&id, "da consulta")?;
    let appointment =
        appointments::update_appointment(store.get_ref(), id, reschedule_data.data_hora).await?;
    Ok(HttpResponse::Ok().json(appointment))
}
