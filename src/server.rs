//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, geocoding provider, session resolver, REST API,
//! metrics, and graceful shutdown.

use std::error::Error;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::{
    AccountService, ActivityLogService, AddressBookService, AddressVerificationService,
};
use crate::auth::build_resolver;
use crate::config::{AppConfig, LoggingConfig};
use crate::domain::SharedRepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{build_provider, init_database, DatabaseConfig, SeaOrmRepositoryProvider};
use crate::interfaces::{create_api_router, ApiContext};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

pub type BoxError = Box<dyn Error + Send + Sync>;

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── Logging & metrics ──────────────────────────────────────────────

/// Install the global tracing subscriber. `RUST_LOG` wins over `config.level`.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    }
}

/// The global metrics recorder can only be installed once per process.
fn prometheus_handle() -> Result<PrometheusHandle, BoxError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Validate everything that can be checked without network access.
pub fn check_config(config: &AppConfig) -> Result<(), BoxError> {
    if config.activity.page_size == 0 {
        return Err("activity.page_size must be at least 1".into());
    }
    if !matches!(config.logging.format.as_str(), "text" | "json") {
        return Err(format!(
            "logging.format must be 'text' or 'json', got '{}'",
            config.logging.format
        )
        .into());
    }
    build_provider(&config.geocoding)?;
    build_resolver(&config.auth)?;
    if config.provider_credentials().is_none() {
        warn!(
            provider = config.geocoding.provider.as_str(),
            "No credentials configured for the geocoding provider"
        );
    }
    Ok(())
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// # Examples
///
/// ```rust,no_run
/// use address_utility::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: SharedRepositoryProvider,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is listening on.
    pub local_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the server with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect to the database and run migrations (if enabled)
    /// 3. Build the geocoding provider and session resolver
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, BoxError> {
        let app_cfg = opts.config;

        info!("Starting Address Utility...");

        let prometheus_handle = prometheus_handle()?;

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig {
            url: app_cfg.database.url.clone(),
        };
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: SharedRepositoryProvider = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let provider = build_provider(&app_cfg.geocoding)?;
        let sessions = build_resolver(&app_cfg.auth)?;
        info!(mode = ?app_cfg.auth.mode, "Session resolver configured");

        let activity = Arc::new(ActivityLogService::new(
            repos.clone(),
            app_cfg.activity.page_size,
        ));
        let ctx = ApiContext {
            db: db.clone(),
            verification: Arc::new(AddressVerificationService::new(provider)),
            address_book: Arc::new(AddressBookService::new(repos.clone(), activity.clone())),
            activity,
            accounts: Arc::new(AccountService::new(repos.clone())),
            sessions,
            metrics: prometheus_handle,
        };

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let api_router = create_api_router(ctx);
        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop, then close the database.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds once the
    /// signal fires.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let abort = api_task.abort_handle();
        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;
        if !drained {
            abort.abort();
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Address Utility shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down Address Utility...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}
