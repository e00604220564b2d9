use actix_web::{web, HttpResponse};

use crate::{domain::BookingError, services::appointments, store::BookingStore, utils::parse_id};

pub async fn list_appointments(
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let booked = appointments::list_appointments(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(booked))
}

pub async fn get_appointment(
    id: web::Path<String>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let id = parse_id(&id, "da consulta")?;
    let appointment = appointments::get_appointment(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(appointment))
}

pub async fn list_appointments_by_user(
    user_id: web::Path<String>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let user_id = parse_id(&user_id, "do usuário")?;
    let history = appointments::list_appointments_by_user(store.get_ref(), user_id).await?;
    Ok(HttpResponse::Ok().json(history))
}
