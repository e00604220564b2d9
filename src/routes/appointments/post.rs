use actix_web::{http::header::LOCATION, web, HttpResponse};
use chrono::{DateTime, Utc};

use crate::{
    domain::{BookingError, NewAppointment},
    services::appointments,
    startup::ApplicationBaseUrl,
    store::BookingStore,
};

/// `data_hora` is ISO-8601; offsets are normalized to UTC.
#[derive(serde::Deserialize)]
pub struct BookingData {
    usuario_id: i32,
    medico_id: i32,
    data_hora: DateTime<Utc>,
}

pub async fn create_appointment(
    booking_data: web::Json<BookingData>,
    store: web::Data<dyn BookingStore>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> Result<HttpResponse, BookingError> {
    let booking_data = booking_data.into_inner();
    let appointment = appointments::create_appointment(
        store.get_ref(),
        NewAppointment {
            user_id: booking_data.usuario_id,
            doctor_id: booking_data.medico_id,
            scheduled_at: booking_data.data_hora,
        },
    )
    .await?;
    Ok(HttpResponse::Created()
        .insert_header((
            LOCATION,
            format!("{}/consultas/{}", base_url.0, appointment.id),
        ))
        .json(appointment))
}
