//! Resumen de la exportación Power BI
//!
//! Acompaña al archivo `vehiculos_powerbi_*.xlsx`: totales del conjunto
//! exportado y los días con más recorridos.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::stats::TripStats;
use crate::models::trip::TripRecord;
use crate::services::stats_service;

/// Días listados en el ranking
pub const BUSIEST_DAYS_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub day: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerBiSummary {
    pub stats: TripStats,
    /// Conteo por día de inicio, de mayor a menor; empates por fecha más reciente
    pub busiest_days: Vec<DayCount>,
}

pub fn summarize(records: &[TripRecord], today: NaiveDate) -> PowerBiSummary {
    let mut per_day: HashMap<NaiveDate, u64> = HashMap::new();
    for record in records {
        *per_day.entry(record.start_time.date_naive()).or_default() += 1;
    }

    let mut busiest_days: Vec<DayCount> = per_day
        .into_iter()
        .map(|(day, count)| DayCount { day, count })
        .collect();
    busiest_days.sort_by(|a, b| b.count.cmp(&a.count).then(b.day.cmp(&a.day)));
    busiest_days.truncate(BUSIEST_DAYS_LIMIT);

    PowerBiSummary {
        stats: stats_service::aggregate(records, today),
        busiest_days,
    }
}
