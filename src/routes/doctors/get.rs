use actix_web::{web, HttpResponse};

use crate::{domain::BookingError, services::catalog, store::BookingStore, utils::parse_id};

pub async fn list_doctors(store: web::Data<dyn BookingStore>) -> Result<HttpResponse, BookingError> {
    let doctors = catalog::list_doctors(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(doctors))
}

pub async fn list_doctors_by_specialty(
    specialty_id: web::Path<String>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let specialty_id = parse_id(&specialty_id, "da especialidade")?;
    let doctors = catalog::list_doctors_by_specialty(store.get_ref(), specialty_id).await?;
    Ok(HttpResponse::Ok().json(doctors))
}
