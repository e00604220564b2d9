use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use serde::Serialize;

use crate::{
    domain::{BookingError, Credentials, Cpf, Password, User},
    services::users,
    store::BookingStore,
};

#[derive(serde::Deserialize)]
pub struct LoginData {
    #[serde(default)]
    cpf: String,
    #[serde(default)]
    senha: String,
}

#[derive(Serialize)]
struct LoginResponse {
    usuario: User,
}

pub async fn login(
    login_data: Json<LoginData>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let login_data = login_data.into_inner();
    let credentials = Credentials {
        cpf: Cpf::parse(&login_data.cpf).map_err(BookingError::Validation)?,
        password: Password::parse(login_data.senha).map_err(BookingError::Validation)?,
    };

    let usuario = users::login(store.get_ref(), credentials).await?;

    Ok(HttpResponse::Ok().json(LoginResponse { usuario }))
}
