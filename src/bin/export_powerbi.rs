//! Exportación de recorridos en formato Power BI
//!
//! Escribe `vehiculos_powerbi_<fecha>.xlsx` con las columnas `Día`, `Mes` y
//! `Año` y registra un resumen del conjunto exportado.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Local, Utc};
use clap::Parser;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fleet_tracking::config::DatabaseConfig;
use fleet_tracking::database;
use fleet_tracking::models::trip::VehicleType;
use fleet_tracking::models::trip_filter::TripFilter;
use fleet_tracking::repositories::{TripRepository, TripStore};
use fleet_tracking::services::export_service::{
    export_filename_base, ExportFormat, ExportPipeline, ExportRow,
};
use fleet_tracking::services::powerbi_service;

#[derive(Parser, Debug)]
#[command(name = "export_powerbi")]
#[command(about = "Exporta los recorridos a un libro Excel listo para Power BI")]
struct Cli {
    /// Directorio de salida
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Placa (coincidencia parcial, sin distinguir mayúsculas)
    #[arg(long)]
    plate: Option<String>,

    /// Fecha inicial `YYYY-MM-DD`
    #[arg(long)]
    start_date: Option<String>,

    /// Fecha final `YYYY-MM-DD`
    #[arg(long)]
    end_date: Option<String>,

    /// `true` o `false`
    #[arg(long)]
    validated: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let filter = TripFilter::build(
        cli.plate.as_deref(),
        cli.start_date.as_deref(),
        cli.end_date.as_deref(),
        cli.validated.as_deref(),
    );

    let pool = database::create_pool(&DatabaseConfig::from_env()?).await?;
    let repository = TripRepository::new(pool);
    let records = repository.list(&filter).await?;

    info!("📊 Exportando {} registros para Power BI...", records.len());

    let rows: Vec<ExportRow> = records.iter().map(ExportRow::from).collect();
    let pipeline = ExportPipeline::for_format(ExportFormat::PowerBi);
    let filename_base = export_filename_base(pipeline.layout(), Local::now().naive_local());
    let outcome = pipeline
        .run(&rows, &filename_base)
        .map_err(|e| anyhow!("export failed: {}", e))?;
    if outcome.strategy != "xlsx_styled" {
        warn!("⚠️ Archivo generado con la estrategia '{}'", outcome.strategy);
    }

    tokio::fs::create_dir_all(&cli.output_dir).await?;
    let path = cli.output_dir.join(&outcome.filename);
    tokio::fs::write(&path, &outcome.bytes).await?;
    info!("✅ Archivo creado: {}", path.display());

    let summary = powerbi_service::summarize(&records, Utc::now().date_naive());
    let stats = &summary.stats;

    info!("==================================================");
    info!("📈 Resumen de datos");
    info!("🚗 Total registros: {}", stats.total);
    info!("📦 Total entregas: {}", stats.total_deliveries);
    info!("💰 Total facturación: {}", stats.total_billing);
    info!(
        "✅ Validados: {} ({:.1}%)",
        stats.validated, stats.validation_percentage
    );
    info!("🚛 Distribución por tipo:");
    for vehicle_type in VehicleType::ALL {
        info!("   • {}: {}", vehicle_type, stats.by_type.count(vehicle_type));
    }
    info!("📅 Registros por fecha (top {}):", powerbi_service::BUSIEST_DAYS_LIMIT);
    for day in &summary.busiest_days {
        info!("   • {}: {} registros", day.day.format("%d/%m/%Y"), day.count);
    }
    info!("==================================================");

    Ok(())
}
