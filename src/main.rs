use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_tracking::cache::{CacheConfig, RedisClient, StatsCache};
use fleet_tracking::config::{DatabaseConfig, EnvironmentConfig};
use fleet_tracking::database;
use fleet_tracking::repositories::TripRepository;
use fleet_tracking::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚚 Fleet Tracking - Registro de recorridos");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    // Inicializar base de datos
    let pool = match database::create_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };
    database::run_migrations(&pool).await?;

    let store = Arc::new(TripRepository::new(pool));
    let mut app_state = AppState::new(store, config.clone());

    // Redis es opcional: sin REDIS_URL no hay cache de estadísticas
    match &config.redis_url {
        Some(redis_url) => {
            let cache_config = CacheConfig {
                redis_url: redis_url.clone(),
                default_ttl: config.stats_cache_ttl,
            };
            match RedisClient::new(cache_config).await {
                Ok(client) => app_state = app_state.with_stats_cache(StatsCache::new(client)),
                Err(e) => warn!("⚠️ Redis no disponible, se continúa sin cache: {}", e),
            }
        }
        None => info!("ℹ️ REDIS_URL no configurada, cache de estadísticas deshabilitado"),
    }

    let app = create_app_router(app_state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Recorridos:");
    info!("   GET  /api/trips - Listar con filtros y estadísticas");
    info!("   POST /api/trips - Crear recorrido");
    info!("   GET  /api/trips/:id - Detalle de recorrido");
    info!("   PUT  /api/trips/:id - Actualizar recorrido");
    info!("   DELETE /api/trips/:id - Eliminar recorrido");
    info!("   POST /api/trips/toggle-validation - Cambiar validación");
    info!("   POST /api/trips/bulk-validation - Validación masiva");
    info!("📊 Estado:");
    info!("   GET  /api/stats/real-time - Estadísticas");
    info!("   GET  /api/check-updates - Verificar cambios");
    info!("   GET  /api/export - Exportar CSV/Excel");

    let listener = tokio::net::TcpListener::bind(addr).await?;
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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
