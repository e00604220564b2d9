use std::{net::TcpListener, sync::Arc};

use actix_cors::Cors;
use actix_web::{
    dev::Server,
    http::header,
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    configuration::{DatabaseSettings, Settings},
    domain::BookingError,
    routes::{
        create_appointment, create_user, delete_appointment, delete_user, get_appointment,
        get_user, health_check, list_appointments, list_appointments_by_user, list_doctors,
        list_doctors_by_specialty, list_specialties, login, update_appointment, update_user,
    },
    store::{BookingStore, PgStore},
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);

        if configuration.database.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&connection_pool)
                .await
                .context("Failed to migrate the database.")?;
        }

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let store: Arc<dyn BookingStore> = Arc::new(PgStore::new(connection_pool));
        let server = run(listener, store, configuration.application.base_url).await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(configuration.acquire_timeout())
        .max_connections(configuration.max_connections)
        .connect_lazy_with(configuration.connect_options())
}

pub struct ApplicationBaseUrl(pub String);

/// Any origin may call the API; the mobile client also runs in browsers.
fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn BookingStore>,
    base_url: String,
) -> Result<Server, anyhow::Error> {
    let store: Data<dyn BookingStore> = Data::from(store);
    let base_url = Data::new(ApplicationBaseUrl(base_url));
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| BookingError::Validation(format!("Corpo inválido: {err}")).into());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/usuarios")
                    .route("", web::post().to(create_user))
                    .route("/login", web::post().to(login))
                    .route("/{id}", web::get().to(get_user))
                    .route("/{id}", web::put().to(update_user))
                    .route("/{id}", web::delete().to(delete_user)),
            )
            .route("/especialidades", web::get().to(list_specialties))
            .service(
                web::scope("/medicos")
                    .route("", web::get().to(list_doctors))
                    .route(
                        "/especialidade/{id:[^/]*}",
                        web::get().to(list_doctors_by_specialty),
                    ),
            )
            .service(
                web::scope("/consultas")
                    .route("", web::post().to(create_appointment))
                    .route("", web::get().to(list_appointments))
                    .route(
                        "/usuario/{id:[^/]*}",
                        web::get().to(list_appointments_by_user),
                    )
                    .route("/{id}", web::get().to(get_appointment))
                    .route("/{id}", web::put().to(update_appointment))
                    .route("/{id}", web::delete().to(delete_appointment)),
            )
            .app_data(json_config.clone())
            .app_data(store.clone())
            .app_data(base_url.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
