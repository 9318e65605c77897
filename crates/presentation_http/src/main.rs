//! Climate Policy Dashboard server
//!
//! Main entry point: wires the weather providers, the chat-completion
//! client, the response cache, and the template engine into the HTTP
//! layer.

use std::{sync::Arc, time::Duration};

use application::{
    KeywordTopicGuard, PolicyService, WeatherService,
    ports::{
        ChatPort, CurrentConditionsPort, ForecastPort, PolicyPort, PromptTemplatePort,
        TopicGuardPort,
    },
};
use infrastructure::{
    AppConfig, CachedPolicyAdapter, ChatCompletionAdapter, MokaCache, OpenMeteoAdapter,
    TemplateEngine, WeatherApiAdapter,
};
use presentation_http::{
    routes, set_expose_internal_errors,
    state::{AppState, DashboardSession},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,climate_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "🌍 Climate Policy Dashboard v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.chat.default_model,
        "Configuration loaded"
    );

    // Hide internal error details outside development
    set_expose_internal_errors(!config.is_production());

    // Weather providers
    let forecast: Arc<dyn ForecastPort> = Arc::new(
        OpenMeteoAdapter::with_config(config.weather.to_open_meteo_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize forecast provider: {e}"))?,
    );
    let current: Arc<dyn CurrentConditionsPort> = Arc::new(
        WeatherApiAdapter::with_config(config.weather.to_weatherapi_config()).map_err(|e| {
            anyhow::anyhow!("Failed to initialize current-conditions provider: {e}")
        })?,
    );
    let weather_service = Arc::new(WeatherService::new(forecast, current));

    // Chat-completion provider
    let chat: Arc<dyn ChatPort> = Arc::new(
        ChatCompletionAdapter::with_config(config.chat.to_chat_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize chat provider: {e}"))?,
    );

    // Template engine (prompt layout + dashboard page)
    let templates = Arc::new(
        TemplateEngine::with_config(config.templates.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize templates: {e}"))?,
    );

    // Policy pipeline behind the response cache
    let guard: Arc<dyn TopicGuardPort> = Arc::new(KeywordTopicGuard::new());
    let prompt_templates: Arc<dyn PromptTemplatePort> = templates.clone();
    let policy_service =
        PolicyService::new(Arc::clone(&weather_service), chat, guard, prompt_templates)
            .with_max_tokens(config.chat.max_tokens);

    let cache = Arc::new(MokaCache::with_config(config.cache.to_moka_config()));
    let mut cached = CachedPolicyAdapter::new(policy_service, cache).with_ttl(config.cache.ttl());
    if !config.cache.enabled {
        cached = cached.with_caching_disabled();
    }
    let policy: Arc<dyn PolicyPort> = Arc::new(cached);

    // Create app state
    let state = AppState {
        weather_service,
        policy,
        templates,
        session: Arc::new(DashboardSession::new()),
        config: Arc::new(config.clone()),
    };

    // Build router
    let mut app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_bytes,
        ));

    // Configure CORS layer
    if config.server.cors_enabled {
        let cors_layer = if config.server.allowed_origins.is_empty() {
            // Development mode: allow all origins
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            // Production mode: restrict to configured origins
            use axum::http::{HeaderValue, Method};
            let origins: Vec<HeaderValue> = config
                .server
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET])
                .allow_headers(Any)
        };
        app = app.layer(cors_layer);
    }

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📊 Dashboard: http://{}/dashboard", addr);
    info!("📚 API docs: http://{}/swagger-ui", addr);

    // Graceful shutdown configuration
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
    // Note: The actual connection draining is handled by axum's graceful_shutdown
}
