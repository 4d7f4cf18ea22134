//! Conexión a PostgreSQL
//!
//! Crea el pool a partir de `DatabaseConfig` y aplica las migraciones embebidas.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Crear el pool y verificar la conexión
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🗄️ Conectando a PostgreSQL: {}", mask_database_url(&config.url));

    let pool = config.create_pool().await?;
    sqlx::query("SELECT 1").execute(&pool).await?;

    info!(
        "✅ Pool de PostgreSQL listo (max: {}, min: {})",
        config.max_connections, config.min_connections
    );
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("📜 Aplicando migraciones...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Migraciones aplicadas");
    Ok(())
}

/// Enmascarar las credenciales de la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
