use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use carflow_rental::config::environment::EnvironmentConfig;
use carflow_rental::database::{create_store, seed::load_catalog};
use carflow_rental::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 CarFlow - API de alquiler de vehículos");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let store = create_store(&config.storage).await?;
    let vehicles = load_catalog(config.catalog_path.as_deref()).await?;

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_url()))?;

    let app = create_app_router(AppState::new(config, store, vehicles));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health");
    info!("   GET  /api/vehicles, /api/vehicles/:id, /api/vehicles/:id/reviews");
    info!("   POST /api/vehicles/:id/quote, /api/vehicles/:id/reviews");
    info!("   POST /api/auth/signup, /api/auth/login - GET/PUT /api/profile");
    info!("   POST/GET /api/reservations - GET/PUT /api/reservations/:id");
    info!("   POST /api/reservations/:id/cancel");
    info!("🏢 Agencia:");
    info!("   GET  /api/agency/reservations - PUT /api/agency/reservations/:id/status");
    info!("   POST /api/agency/vehicles - PUT /api/agency/vehicles/:id/availability");
    info!("   DELETE /api/agency/vehicles/:id");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {}", addr))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
