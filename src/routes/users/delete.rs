use actix_web::{web, HttpResponse};

use crate::{domain::BookingError, services::users, store::BookingStore, utils::parse_id};

pub async fn delete_user(
    id: web::Path<String>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let id = parse_id(&id, "do usuário")?;
    users::delete_user(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "mensagem": "Usuário excluído com sucesso"
    })))
}
