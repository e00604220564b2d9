use actix_web::{web, HttpResponse};

use crate::{domain::BookingError, services::appointments, store::BookingStore, utils::parse_id};

pub async fn delete_appointment(
    id: web::Path<String>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let id = parse_id(&id, "da consulta")?;
    appointments::delete_appointment(store.get_ref(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}
