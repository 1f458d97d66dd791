use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod config;
pub mod export;
pub mod generation;
pub mod locale;
pub mod payment;
pub mod petition;
pub mod redaction;
pub mod state;

pub use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::handlers::get_session,
        crate::petition::handlers::create_petition,
        crate::petition::handlers::generate_petition,
        crate::petition::handlers::get_preview,
        crate::petition::handlers::pay_petition,
        crate::petition::handlers::export_petition
    ),
    components(
        schemas(
            ErrorResponse,
            auth::SessionResponse,
            petition::PetitionForm,
            petition::CreatePetitionResponse,
            petition::PreviewResponse,
            petition::PaymentResponse,
            petition::ExportDataUriResponse,
            payment::CardDetails,
            payment::PaymentReceipt,
            export::ExportFormat,
        )
    ),
    tags(
        (name = "Session", description = "Sign-in status."),
        (name = "Petition", description = "Petition generation, preview, payment and export.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost server")
    )
)]
pub struct ApiDoc;

/// Register every `/api` route on a service config.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(auth::handlers::config)
            .configure(petition::handlers::config),
    );
}

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::AppConfig::from_env().context("failed to load configuration")?;
    let app_state = web::Data::new(
        AppState::from_config(&config).context("failed to build generation client")?,
    );
    let allowed_origin = config.allowed_origin.clone();

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(config.bind_addr.as_str())
    .with_context(|| format!("failed to bind {}", config.bind_addr))?
    .run()
    .await?;

    Ok(())
}
