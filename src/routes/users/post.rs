use actix_web::{http::header::LOCATION, web, HttpResponse};
use chrono::NaiveDate;

use crate::{
    domain::{validate_birth_date, BookingError, Cpf, NewUser, Password, PersonName, Phone},
    services::users,
    startup::ApplicationBaseUrl,
    store::BookingStore,
};

#[derive(serde::Deserialize)]
pub struct RegisterData {
    #[serde(default)]
    nome: String,
    #[serde(default)]
    cpf: String,
    #[serde(default)]
    senha: String,
    telefone: Option<String>,
    data_nascimento: Option<NaiveDate>,
}

impl TryFrom<RegisterData> for NewUser {
    type Error = String;

    fn try_from(data: RegisterData) -> Result<Self, Self::Error> {
        Ok(NewUser {
            name: PersonName::parse(&data.nome)?,
            cpf: Cpf::parse(&data.cpf)?,
            password: Password::parse(data.senha)?,
            phone: Phone::parse_optional(data.telefone.as_deref())?,
            birth_date: validate_birth_date(data.data_nascimento)?,
        })
    }
}

pub async fn create_user(
    register_data: web::Json<RegisterData>,
    store: web::Data<dyn BookingStore>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> Result<HttpResponse, BookingError> {
    let new_user: NewUser = register_data
        .into_inner()
        .try_into()
        .map_err(BookingError::Validation)?;
    let user = users::create_user(store.get_ref(), new_user).await?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("{}/usuarios/{}", base_url.0, user.id)))
        .json(user))
}
