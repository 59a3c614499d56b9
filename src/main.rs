use academic_portal::{config, handlers::AppState, router::create_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables before the log filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "academic_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match config::load_config_with_fallback() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.faculty_secret().is_none() {
        tracing::warn!(
            "{} is not set; faculty login is disabled",
            config::ENV_FACULTY_SECRET
        );
    }

    let bind_address = config.bind_address.clone();
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to set up the session directory: {}", e);
            std::process::exit(1);
        }
    };
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", bind_address, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting academic portal on {}", bind_address);
    tracing::info!("Portal routes: /api/v1/portal/{{register,login,logout,dashboard,students}}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
