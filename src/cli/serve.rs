//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::{load_config, ServeArgs};
use crate::config::{LogFormat, PlannerConfig};
use crate::pipeline::RoutePipeline;
use crate::provider::Providers;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;

    // CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
///
/// Logs go to stderr so `plan` can keep stdout for its JSON output.
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    if config.enable_content_logging {
        eprintln!("WARNING: Content logging is enabled. Prompts and completions will be logged.");
        eprintln!("         This may include personal data. Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Build the process-wide pipeline: credentials, one provider set, three stages.
///
/// Missing credentials fail here, before anything listens.
pub fn build_pipeline(
    config: &PlannerConfig,
) -> Result<RoutePipeline, Box<dyn std::error::Error>> {
    let credentials = config.resolve_credentials()?;
    let providers = Providers::from_config(config, &credentials)?;
    Ok(RoutePipeline::standard(&providers, config))
}

/// Cancel `cancel_token` on SIGINT or SIGTERM.
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Serve `router` on `listener` until `cancel_token` is cancelled.
///
/// In-flight requests are allowed to finish.
pub async fn serve_until_cancelled(
    listener: TcpListener,
    router: axum::Router,
    cancel_token: CancellationToken,
) -> Result<(), std::io::Error> {
    axum::serve(listener, router)
        .with_graceful_shutdown(cancel_token.cancelled_owned())
        .await
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load, merge and validate configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!("Starting route planner server");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Providers and pipeline, shared by every request
    let pipeline = build_pipeline(&config)?;
    tracing::info!(
        completion_model = %config.completion.model,
        default_start = %config.pipeline.default_start_location,
        max_concurrent_lookups = config.pipeline.max_concurrent_lookups,
        "Pipeline ready"
    );

    // 4. Router
    let config = Arc::new(config);
    let app_state = Arc::new(AppState::new(Arc::clone(&config), Arc::new(pipeline)));
    let app = create_router(Arc::clone(&app_state));

    // 5. Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Route planner listening");

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));
    serve_until_cancelled(listener, app, cancel_token).await?;

    tracing::info!(
        uptime_seconds = app_state.uptime_seconds(),
        "Route planner server stopped"
    );
    Ok(())
}
