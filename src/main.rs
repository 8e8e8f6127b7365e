use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use docvault_api::domains::account::models::*;
use docvault_api::domains::documents::models::*;
use docvault_api::routes::create_router;
use docvault_api::shared::config::Config;
use docvault_api::shared::database::{BlacklistRepository, Database};
use docvault_api::shared::services::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        docvault_api::domains::account::handlers::account_handler::register,
        docvault_api::domains::account::handlers::account_handler::token,
        docvault_api::domains::account::handlers::account_handler::token_refresh,
        docvault_api::domains::account::handlers::account_handler::logout,
        docvault_api::domains::account::handlers::account_handler::get_me,
        docvault_api::domains::account::handlers::account_handler::update_me,
        docvault_api::domains::account::handlers::account_handler::set_password,
        docvault_api::domains::account::handlers::account_handler::password_reset,
        docvault_api::domains::account::handlers::account_handler::password_reset_confirm,
        docvault_api::domains::documents::handlers::document_handler::list_documents,
        docvault_api::domains::documents::handlers::document_handler::create_document,
        docvault_api::domains::documents::handlers::document_handler::get_document,
        docvault_api::domains::documents::handlers::document_handler::update_document,
        docvault_api::domains::documents::handlers::document_handler::delete_document,
        docvault_api::domains::documents::handlers::file_handler::list_files,
        docvault_api::domains::documents::handlers::file_handler::upload_file,
        docvault_api::domains::documents::handlers::file_handler::get_file,
        docvault_api::domains::documents::handlers::file_handler::delete_file
    ),
    components(schemas(
        RegisterRequest,
        TokenRequest,
        TokenPairResponse,
        RefreshRequest,
        AccessTokenResponse,
        LogoutRequest,
        UpdateMeRequest,
        PasswordChangeRequest,
        PasswordResetRequest,
        PasswordResetConfirmRequest,
        DetailResponse,
        UserResponse,
        CreateDocumentRequest,
        UpdateDocumentRequest,
        DocumentResponse,
        DocumentFileResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account", description = "Registration, JWT issuance and password lifecycle"),
        (name = "Documents", description = "Document CRUD with ownership gate"),
        (name = "Files", description = "Document file uploads")
    ),
    info(
        title = "DocVault API",
        description = "Multi-tenant document management backend",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Adds the "Authorize" button in Swagger UI.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    db.initialize()
        .await
        .context("Failed to run database migrations")?;

    let app_state = AppState::new(db.clone(), &config);

    // Naturally-expired tokens fail verification on their own; their
    // blacklist entries are just dead weight.
    let pruned = BlacklistRepository::new(db.pool().clone())
        .delete_expired()
        .await
        .context("Failed to prune token blacklist")?;
    if pruned > 0 {
        tracing::info!("pruned {pruned} expired blacklist entries");
    }

    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .context("Invalid CORS_ORIGIN")?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true);

    let app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Server running on http://{}", config.bind_addr);
    tracing::info!("Swagger UI available at http://{}/docs", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
