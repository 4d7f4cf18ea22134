//! Servicio de exportación
//!
//! Convierte un conjunto filtrado y ordenado de recorridos en un archivo
//! descargable. La exportación a Excel es una cadena ordenada de estrategias:
//! la primera que produce bytes gana, los fallos intermedios solo se registran.
//!
//! El layout Power BI agrega las columnas `Día`, `Mes` y `Año` a las diez
//! columnas base para facilitar agrupaciones por fecha.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::trip::TripRecord;
use crate::services::export_writers::{CsvStrategy, PlainXlsxStrategy, StyledXlsxStrategy};
use crate::utils::format::{format_export_datetime, yes_no};

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Nombre de la hoja en las exportaciones Excel
pub const SHEET_NAME: &str = "Vehículos";

/// Encabezados fijos, en orden de columna
pub const EXPORT_HEADERS: [&str; 10] = [
    "Código",
    "Placa",
    "Tipo Vehículo",
    "Fecha Inicio",
    "Fecha Fin",
    "Número Entregas",
    "Facturación",
    "Observación",
    "Cliente",
    "Validado",
];

/// Columnas de fecha agregadas por el layout Power BI
pub const POWERBI_EXTRA_HEADERS: [&str; 3] = ["Día", "Mes", "Año"];

const DAY_FORMAT: &str = "%Y-%m-%d";
const MONTH_FORMAT: &str = "%Y-%m";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv writer failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("xlsx writer failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("buffer flush failed: {0}")]
    Flush(String),

    #[error("every export strategy failed: {0}")]
    Exhausted(String),
}

/// Columnas que lleva el archivo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportLayout {
    #[default]
    Standard,
    PowerBi,
}

impl ExportLayout {
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = EXPORT_HEADERS.to_vec();
        if *self == ExportLayout::PowerBi {
            headers.extend(POWERBI_EXTRA_HEADERS);
        }
        headers
    }

    pub fn filename_prefix(&self) -> &'static str {
        match self {
            ExportLayout::Standard => "vehiculos",
            ExportLayout::PowerBi => "vehiculos_powerbi",
        }
    }
}

/// Formato solicitado por el cliente (`type=csv`, `type=powerbi` o Excel por defecto)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Spreadsheet,
    PowerBi,
}

impl ExportFormat {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("csv") => ExportFormat::Csv,
            Some("powerbi") => ExportFormat::PowerBi,
            _ => ExportFormat::Spreadsheet,
        }
    }

    pub fn layout(&self) -> ExportLayout {
        match self {
            ExportFormat::PowerBi => ExportLayout::PowerBi,
            ExportFormat::Csv | ExportFormat::Spreadsheet => ExportLayout::Standard,
        }
    }
}

/// Una fila de exportación, ya con los valores en su forma final
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub code: String,
    pub plate: String,
    pub vehicle_type: &'static str,
    pub start_time: String,
    pub end_time: String,
    pub delivery_count: i32,
    pub billing_amount: Decimal,
    pub note: String,
    pub client: String,
    pub validated: bool,
    /// Fecha (UTC) de inicio, fuente de las columnas Power BI
    pub start_day: NaiveDate,
}

impl ExportRow {
    /// Valores como texto, en el orden de `layout.headers()`
    pub fn text_fields(&self, layout: ExportLayout) -> Vec<String> {
        let mut fields = vec![
            self.code.clone(),
            self.plate.clone(),
            self.vehicle_type.to_string(),
            self.start_time.clone(),
            self.end_time.clone(),
            self.delivery_count.to_string(),
            self.billing_amount.to_string(),
            self.note.clone(),
            self.client.clone(),
            yes_no(self.validated).to_string(),
        ];
        if layout == ExportLayout::PowerBi {
            fields.push(self.day_label());
            fields.push(self.month_label());
            fields.push(self.year().to_string());
        }
        fields
    }

    pub fn billing_as_f64(&self) -> f64 {
        self.billing_amount.to_f64().unwrap_or(0.0)
    }

    pub fn day_label(&self) -> String {
        self.start_day.format(DAY_FORMAT).to_string()
    }

    pub fn month_label(&self) -> String {
        self.start_day.format(MONTH_FORMAT).to_string()
    }

    pub fn year(&self) -> i32 {
        self.start_day.year()
    }
}

impl From<&TripRecord> for ExportRow {
    fn from(record: &TripRecord) -> Self {
        Self {
            code: record.code.clone(),
            plate: record.plate.clone(),
            vehicle_type: record.vehicle_type.as_str(),
            start_time: format_export_datetime(&record.start_time),
            end_time: format_export_datetime(&record.end_time),
            delivery_count: record.delivery_count,
            billing_amount: record.billing_amount,
            note: record.note.clone().unwrap_or_default(),
            client: record.client.clone(),
            validated: record.validated,
            start_day: record.start_time.date_naive(),
        }
    }
}

/// Una forma de serializar filas. Cada estrategia construye su propio buffer.
pub trait ExportStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Extensión del nombre de archivo que ve el cliente
    fn extension(&self) -> &'static str;

    fn content_type(&self) -> &'static str;

    fn render(&self, rows: &[ExportRow], layout: ExportLayout) -> Result<Vec<u8>, ExportError>;
}

/// Resultado de una exportación exitosa
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
    /// Estrategia que produjo los bytes
    pub strategy: &'static str,
}

pub struct ExportPipeline {
    strategies: Vec<Box<dyn ExportStrategy>>,
    layout: ExportLayout,
}

impl ExportPipeline {
    pub fn new(strategies: Vec<Box<dyn ExportStrategy>>) -> Self {
        Self {
            strategies,
            layout: ExportLayout::Standard,
        }
    }

    pub fn with_layout(mut self, layout: ExportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Cadena de Excel: con formato, sin formato, CSV con nombre `.xlsx`
    fn spreadsheet_chain() -> Vec<Box<dyn ExportStrategy>> {
        vec![
            Box::new(StyledXlsxStrategy),
            Box::new(PlainXlsxStrategy),
            Box::new(CsvStrategy::disguised_as_xlsx()),
        ]
    }

    /// Cadena por defecto para cada formato
    pub fn for_format(format: ExportFormat) -> Self {
        let strategies: Vec<Box<dyn ExportStrategy>> = match format {
            ExportFormat::Csv => vec![Box::new(CsvStrategy::plain())],
            ExportFormat::Spreadsheet | ExportFormat::PowerBi => Self::spreadsheet_chain(),
        };
        Self::new(strategies).with_layout(format.layout())
    }

    pub fn layout(&self) -> ExportLayout {
        self.layout
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Intentar cada estrategia en orden hasta que una tenga éxito
    pub fn run(&self, rows: &[ExportRow], filename_base: &str) -> Result<ExportOutcome, ExportError> {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            match strategy.render(rows, self.layout) {
                Ok(bytes) => {
                    if !failures.is_empty() {
                        log::warn!(
                            "⚠️ Exportación degradada: '{}' usada tras {} fallo(s)",
                            strategy.name(),
                            failures.len()
                        );
                    }
                    log::info!(
                        "📤 Exportación '{}' generada: {} filas, {} bytes",
                        strategy.name(),
                        rows.len(),
                        bytes.len()
                    );
                    return Ok(ExportOutcome {
                        bytes,
                        content_type: strategy.content_type(),
                        filename: format!("{}.{}", filename_base, strategy.extension()),
                        strategy: strategy.name(),
                    });
                }
                Err(e) => {
                    log::warn!("❌ Estrategia de exportación '{}' falló: {}", strategy.name(), e);
                    failures.push(format!("{}: {}", strategy.name(), e));
                }
            }
        }

        Err(ExportError::Exhausted(failures.join("; ")))
    }
}

/// Nombre base del archivo: `<prefijo>_<YYYYMMDD_HHMMSS>`
pub fn export_filename_base(layout: ExportLayout, now: NaiveDateTime) -> String {
    format!("{}_{}", layout.filename_prefix(), now.format("%Y%m%d_%H%M%S"))
}
