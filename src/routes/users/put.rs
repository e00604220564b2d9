use actix_web::{web, HttpResponse};

use crate::{
    domain::{BookingError, Cpf, Password, PersonName, Phone, UserChanges},
    services::users,
    store::BookingStore,
    utils::parse_id,
};

#[derive(serde::Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    nome: String,
    #[serde(default)]
    cpf: String,
    #[serde(default)]
    senha: String,
    telefone: Option<String>,
}

impl TryFrom<ProfileData> for UserChanges {
    type Error = String;

    fn try_from(data: ProfileData) -> Result<Self, Self::Error> {
        Ok(UserChanges {
            name: PersonName::parse(&data.nome)?,
            cpf: Cpf::parse(&data.cpf)?,
            password: Password::parse(data.senha)?,
            phone: Phone::parse_optional(data.telefone.as_deref())?,
        })
    }
}

pub async fn update_user(
    id: web::Path<String>,
    profile_data: web::Json<ProfileData>,
    store: web::Data<dyn BookingStore>,
) -> Result<HttpResponse, BookingError> {
    let id = parse_id(&id, "do usuário")?;
    let changes: UserChanges = profile_data
        .into_inner()
        .try_into()
        .map_err(BookingError::Validation)?;
    let user = users::update_user(store.get_ref(), id, changes).await?;
    Ok(HttpResponse::Ok().json(user))
}
