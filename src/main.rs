use std::sync::Arc;

use astro_assist::astro::gateway::AstroGateway;
use astro_assist::astro::geocode::Geocoder;
use astro_assist::channels::TelegramSender;
use astro_assist::config::AppConfig;
use astro_assist::dialogue::controller::DialogueController;
use astro_assist::server::{WebhookState, webhook_routes};
use astro_assist::store::{ChartCache, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("🔮 Astro Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://0.0.0.0:{}/", config.port);
    eprintln!("   Chart service: {}", config.astro_base_url);
    eprintln!("   Geocoder: {}", config.geocode_url);
    eprintln!("   Chart cache: {} entries max\n", config.chart_cache_cap);

    let sender = Arc::new(TelegramSender::new(
        config.telegram_api_url,
        config.bot_token,
    ));
    let provider = Arc::new(AstroGateway::new(
        config.astro_base_url,
        config.astro_api_key,
    ));
    let resolver = Arc::new(Geocoder::new(config.geocode_url));

    let controller = Arc::new(DialogueController::new(
        SessionStore::new(),
        ChartCache::new(config.chart_cache_cap),
        provider,
        resolver,
        sender,
    ));

    let app = webhook_routes(WebhookState { controller });
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
