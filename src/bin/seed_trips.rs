//! Generador de datos de demostración para `trip_records`

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use dotenvy::dotenv;
use rand::thread_rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleet_tracking::config::DatabaseConfig;
use fleet_tracking::database;
use fleet_tracking::models::trip::VehicleType;
use fleet_tracking::models::trip_filter::TripFilter;
use fleet_tracking::repositories::{TripRepository, TripStore};
use fleet_tracking::services::seed_service::{TripSeeder, MAX_UNIQUE_PLATES};
use fleet_tracking::services::stats_service;

#[derive(Parser, Debug)]
#[command(name = "seed_trips")]
#[command(about = "Genera recorridos de demostración en la base de datos")]
struct Cli {
    /// Cantidad de recorridos a generar
    #[arg(default_value_t = 50)]
    count: usize,

    /// Borrar los recorridos existentes antes de generar
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if cli.count > MAX_UNIQUE_PLATES {
        bail!("count must be at most {} (distinct plates available)", MAX_UNIQUE_PLATES);
    }

    let pool = database::create_pool(&DatabaseConfig::from_env()?).await?;
    database::run_migrations(&pool).await?;
    let repository = TripRepository::new(pool);

    if cli.reset {
        let removed = repository.delete_all().await?;
        info!("🧹 {} recorridos existentes eliminados", removed);
    }

    let mut seeder = TripSeeder::new(thread_rng(), Utc::now());
    for index in 1..=cli.count {
        let Some(draft) = seeder.next_draft(index) else {
            break;
        };
        draft.check_invariants()?;
        let record = repository.create(&draft, None).await?;
        info!("🚗 Creado vehículo {}: {} - {}", index, record.plate, record.vehicle_type);
    }

    let records = repository.list(&TripFilter::default()).await?;
    let stats = stats_service::aggregate(&records, Utc::now().date_naive());

    info!("==================================================");
    info!("📊 Estadísticas de datos generados");
    info!("🚗 Total vehículos: {}", stats.total);
    info!(
        "✅ Vehículos validados: {} ({:.1}%)",
        stats.validated, stats.validation_percentage
    );
    info!("📈 Total entregas: {}", stats.total_deliveries);
    info!("💰 Total facturación: {}", stats.total_billing);
    for vehicle_type in VehicleType::ALL {
        info!("   • {}: {}", vehicle_type, stats.by_type.count(vehicle_type));
    }
    info!("==================================================");

    Ok(())
}
