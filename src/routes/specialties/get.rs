use actix_web::{web, HttpResponse};

use crate::{domain::BookingError, services::catalog, store::BookingStore};

pub async fn list_specialties(
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let specialties = catalog::list_specialties(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(specialties))
}
