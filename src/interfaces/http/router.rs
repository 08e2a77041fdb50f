//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::ErrorBody;
use super::modules::{
    account::{self, AccountState},
    activity::{self, ActivityState},
    addresses::{self, AddressBookState, VerificationState},
    health::{self, HealthState},
    metrics::{http_metrics_middleware, prometheus_metrics, MetricsState},
    postal_formats,
    request_id::request_id_middleware,
};
use crate::application::{
    AccountService, ActivityLogService, AddressBookService, AddressVerificationService,
};
use crate::auth::{require_session, AuthState, SharedSessionResolver};
use crate::domain::{ActivityAction, ActivityLogEntry, CanonicalAddress, SavedAddress};

/// Everything the HTTP layer needs, built once at startup
#[derive(Clone)]
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub verification: Arc<AddressVerificationService>,
    pub address_book: Arc<AddressBookService>,
    pub activity: Arc<ActivityLogService>,
    pub accounts: Arc<AccountService>,
    pub sessions: SharedSessionResolver,
    pub metrics: PrometheusHandle,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token (auth.mode = jwt)"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    "better-auth.session_token",
                ))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        addresses::verify_address,
        addresses::reverse_geocode,
        addresses::list_saved,
        addresses::save_address,
        addresses::update_label,
        addresses::delete_address,
        activity::list_activity,
        account::delete_account,
        postal_formats::list_postal_formats,
        postal_formats::get_postal_format,
    ),
    components(
        schemas(
            ErrorBody,
            CanonicalAddress,
            SavedAddress,
            ActivityAction,
            ActivityLogEntry,
            addresses::VerifyAddressRequest,
            addresses::GeolocationRequest,
            addresses::VerifiedAddressResponse,
            addresses::CoordinateInput,
            addresses::SaveAddressRequest,
            addresses::UpdateLabelRequest,
            addresses::SavedAddressesResponse,
            addresses::SavedAddressResponse,
            addresses::MessageResponse,
            activity::ActivityResponse,
            account::DeleteAccountResponse,
            postal_formats::PostalFormatDto,
            postal_formats::PostalFormatsResponse,
            postal_formats::PostalFormatResponse,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Verification", description = "Address verification and reverse geocoding"),
        (name = "Address Book", description = "Saved addresses of the signed-in user"),
        (name = "Activity", description = "Account activity log"),
        (name = "Account", description = "Account removal"),
        (name = "Postal Formats", description = "Country addressing conventions"),
    ),
    info(
        title = "Address Utility API",
        version = "1.0.0",
        description = "Address verification, reverse geocoding and personal address book",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let session_layer = middleware::from_fn_with_state(
        AuthState {
            resolver: ctx.sessions.clone(),
        },
        require_session,
    );

    // ── Public ──────────────────────────────────────────────────
    let verification_routes = Router::new()
        .route("/addresses/verify", post(addresses::verify_address))
        .route("/addresses/geolocation", post(addresses::reverse_geocode))
        .with_state(VerificationState {
            verification: ctx.verification.clone(),
        });

    let postal_format_routes = Router::new()
        .route("/postal-formats", get(postal_formats::list_postal_formats))
        .route(
            "/postal-formats/{country_code}",
            get(postal_formats::get_postal_format),
        );

    // ── Session required ────────────────────────────────────────
    let address_book_routes = Router::new()
        .route(
            "/addresses/saved",
            get(addresses::list_saved).post(addresses::save_address),
        )
        .route(
            "/addresses/saved/{id}",
            patch(addresses::update_label).delete(addresses::delete_address),
        )
        .with_state(AddressBookState {
            address_book: ctx.address_book.clone(),
        });

    let activity_routes = Router::new()
        .route("/activity", get(activity::list_activity))
        .with_state(ActivityState {
            activity: ctx.activity.clone(),
        });

    let account_routes = Router::new()
        .route("/user/delete", delete(account::delete_account))
        .with_state(AccountState {
            accounts: ctx.accounts.clone(),
        });

    let protected_routes = Router::new()
        .merge(address_book_routes)
        .merge(activity_routes)
        .merge(account_routes)
        .layer(session_layer);

    let api_routes = Router::new()
        .merge(verification_routes)
        .merge(postal_format_routes)
        .merge(protected_routes);

    // ── Operational ─────────────────────────────────────────────
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db: ctx.db.clone(),
            geocoding_provider: ctx.verification.provider_name(),
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: ctx.metrics.clone(),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api", api_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        // Must stay inside TraceLayer: `require_session` records `user_id` on this span.
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
