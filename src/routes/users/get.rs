use actix_web::{web, HttpResponse};

use crate::{domain::BookingError, services::users, store::BookingStore, utils::parse_id};

pub async fn get_user(
    id: web::Path<String>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let id = parse_id(&id, "do usuário")?;
    let user = users::get_user(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(user))
}
