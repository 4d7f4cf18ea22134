//! Servicio de estadísticas
//!
//! Agrega un conjunto filtrado de recorridos en un `TripStats`. La fecha de
//! evaluación se inyecta: los campos "hoy" y "última semana" son los únicos
//! que dependen del reloj.

use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::stats::{TripStats, TypeBreakdown};
use crate::models::trip::{TripRecord, VehicleType};
use crate::utils::format::round2;

/// Días de la ventana semanal, incluyendo hoy
const WEEK_WINDOW_DAYS: i64 = 7;

pub fn aggregate(records: &[TripRecord], today: NaiveDate) -> TripStats {
    if records.is_empty() {
        return TripStats::empty();
    }

    let total = records.len() as u64;
    let week_start = today - Duration::days(WEEK_WINDOW_DAYS - 1);

    let mut stats = TripStats::empty();
    stats.total = total;

    let mut by_type = TypeBreakdown::default();
    for record in records {
        if record.validated {
            stats.validated += 1;
        }

        match record.vehicle_type {
            VehicleType::Turbo => by_type.turbo += 1,
            VehicleType::Standard => by_type.sencillo += 1,
            VehicleType::Electric => by_type.electrico += 1,
        }

        stats.total_deliveries += record.delivery_count as i64;
        stats.total_billing += record.billing_amount;

        if stats.last_update.map_or(true, |last| record.start_time > last) {
            stats.last_update = Some(record.start_time);
        }

        let day = record.start_time.date_naive();
        if day == today {
            stats.today_count += 1;
        }
        if day >= week_start && day <= today {
            stats.last_week_count += 1;
        }
    }

    stats.by_type = by_type;
    stats.unvalidated = total - stats.validated;
    stats.validation_percentage = round2(stats.validated as f64 / total as f64 * 100.0);
    stats.average_deliveries = round2(stats.total_deliveries as f64 / total as f64);
    stats.average_billing = (stats.total_billing / Decimal::from(total))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::{Priority, TripStatus};
    use chrono::{DateTime, TimeZone, Utc};

    fn trip(
        id: i64,
        vehicle_type: VehicleType,
        start: DateTime<Utc>,
        deliveries: i32,
        billing: i64,
        validated: bool,
    ) -> TripRecord {
        TripRecord {
            id,
            code: format!("V-{}", id),
            plate: format!("ABC{}", 100 + id),
            vehicle_type,
            start_time: start,
            end_time: start + Duration::hours(2),
            delivery_count: deliveries,
            billing_amount: Decimal::new(billing, 0),
            note: None,
            client: "Logística Global Ltda.".to_string(),
            validated,
            created_at: start,
            updated_at: start,
            created_by: None,
            modified_by: None,
            priority: Priority::Low,
            status: TripStatus::Active,
            performance_index: Decimal::ZERO,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let stats = aggregate(&[], today());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.validation_percentage, 0.0);
        assert_eq!(stats.average_deliveries, 0.0);
        assert_eq!(stats.average_billing, Decimal::ZERO);
        assert!(stats.last_update.is_none());
        assert_eq!(stats.by_type, TypeBreakdown::default());
    }

    #[test]
    fn test_single_validated_turbo() {
        let records = vec![trip(1, VehicleType::Turbo, at(10, 8), 5, 100_000, true)];
        let stats = aggregate(&records, today());

        assert_eq!(stats.total, 1);
        assert_eq!(stats.validated, 1);
        assert_eq!(stats.unvalidated, 0);
        assert_eq!(stats.validation_percentage, 100.0);
        assert_eq!(stats.by_type.turbo, 1);
        assert_eq!(stats.total_deliveries, 5);
        assert_eq!(stats.total_billing, Decimal::new(100_000, 0));
        assert_eq!(stats.last_update, Some(at(10, 8)));
    }

    #[test]
    fn test_counts_are_consistent() {
        let records = vec![
            trip(1, VehicleType::Turbo, at(10, 8), 5, 100, true),
            trip(2, VehicleType::Standard, at(11, 8), 10, 200, false),
            trip(3, VehicleType::Electric, at(12, 8), 15, 300, true),
            trip(4, VehicleType::Electric, at(13, 8), 0, 0, false),
            trip(5, VehicleType::Standard, at(14, 8), 7, 50, false),
        ];
        let stats = aggregate(&records, today());

        assert_eq!(stats.validated + stats.unvalidated, stats.total);
        assert_eq!(stats.by_type.total(), stats.total);
        assert!((0.0..=100.0).contains(&stats.validation_percentage));
        assert_eq!(stats.validation_percentage, 40.0);
        assert_eq!(stats.by_type.sencillo, 2);
        assert_eq!(stats.by_type.electrico, 2);
        assert_eq!(stats.total_deliveries, 37);
        assert_eq!(stats.average_deliveries, 7.4);
        assert_eq!(stats.average_billing, Decimal::new(13_000, 2));
        assert_eq!(stats.last_update, Some(at(14, 8)));
    }

    #[test]
    fn test_percentage_rounding() {
        let records = vec![
            trip(1, VehicleType::Turbo, at(10, 8), 1, 10, true),
            trip(2, VehicleType::Turbo, at(10, 9), 1, 10, false),
            trip(3, VehicleType::Turbo, at(10, 10), 1, 10, false),
        ];
        let stats = aggregate(&records, today());
        assert_eq!(stats.validation_percentage, 33.33);
        assert_eq!(stats.average_billing, Decimal::new(1_000, 2));
    }

    #[test]
    fn test_time_windows_depend_on_injected_day() {
        let records = vec![
            trip(1, VehicleType::Turbo, at(20, 6), 1, 1, false),
            trip(2, VehicleType::Turbo, at(20, 23), 1, 1, false),
            trip(3, VehicleType::Turbo, at(14, 12), 1, 1, false),
            trip(4, VehicleType::Turbo, at(13, 12), 1, 1, false),
            trip(5, VehicleType::Turbo, at(2, 12), 1, 1, false),
        ];

        let stats = aggregate(&records, today());
        assert_eq!(stats.today_count, 2);
        assert_eq!(stats.last_week_count, 3);

        let later = NaiveDate::from_ymd_opt(2024, 1, 27).unwrap();
        let stats = aggregate(&records, later);
        assert_eq!(stats.today_count, 0);
        assert_eq!(stats.last_week_count, 0);
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let records = vec![
            trip(1, VehicleType::Turbo, at(10, 8), 5, 100, true),
            trip(2, VehicleType::Electric, at(11, 8), 3, 70, false),
        ];
        assert_eq!(aggregate(&records, today()), aggregate(&records, today()));
    }
}
