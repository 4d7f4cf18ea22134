//! Generador de recorridos de demostración
//!
//! Produce borradores realistas: fechas en los últimos 30 días, rangos de
//! entregas y facturación según el tipo de vehículo, ~70 % validados.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::trip::{Priority, TripDraft, TripStatus, VehicleType};

const PLATE_PREFIXES: [&str; 10] = ["ABC", "XYZ", "DEF", "GHI", "JKL", "MNO", "PQR", "STU", "VWX", "YZA"];

const CLIENTS: [&str; 10] = [
    "Transportes Rápidos S.A.",
    "Logística Express Ltda.",
    "Mensajería Veloz C.A.",
    "Distribuciones Central S.A.S.",
    "Carga Segura Ltda.",
    "Envíos Express C.A.",
    "Transporte Nacional S.A.",
    "Logística Global Ltda.",
    "Mensajería Internacional C.A.",
    "Distribuciones Rápidas S.A.S.",
];

const NOTES: [&str; 10] = [
    "Vehículo en excelente estado",
    "Requiere mantenimiento preventivo",
    "Nuevo en la flota",
    "Recientemente reparado",
    "Alta prioridad",
    "Ruta regular",
    "Servicio nocturno",
    "Transporte especializado",
    "Vehículo de lujo",
    "Equipado con GPS",
];

/// Placas distintas posibles (prefijos × 100..=999)
pub const MAX_UNIQUE_PLATES: usize = PLATE_PREFIXES.len() * 900;

const HISTORY_DAYS: i64 = 30;
const VALIDATED_RATIO: f64 = 0.7;

/// Rangos por tipo: entregas, facturación en centavos, rendimiento en centésimas
struct TypeProfile {
    deliveries: (i32, i32),
    billing_cents: (i64, i64),
    performance_hundredths: (i64, i64),
}

fn profile(vehicle_type: VehicleType) -> TypeProfile {
    match vehicle_type {
        VehicleType::Turbo => TypeProfile {
            deliveries: (15, 50),
            billing_cents: (5_000_000, 20_000_000),
            performance_hundredths: (200, 500),
        },
        VehicleType::Standard => TypeProfile {
            deliveries: (10, 30),
            billing_cents: (3_000_000, 10_000_000),
            performance_hundredths: (150, 350),
        },
        VehicleType::Electric => TypeProfile {
            deliveries: (8, 25),
            billing_cents: (2_500_000, 8_000_000),
            performance_hundredths: (100, 300),
        },
    }
}

pub struct TripSeeder<R: Rng> {
    rng: R,
    now: DateTime<Utc>,
    used_plates: HashSet<String>,
}

impl<R: Rng> TripSeeder<R> {
    pub fn new(rng: R, now: DateTime<Utc>) -> Self {
        Self {
            rng,
            now,
            used_plates: HashSet::new(),
        }
    }

    fn unique_plate(&mut self) -> Option<String> {
        if self.used_plates.len() >= MAX_UNIQUE_PLATES {
            return None;
        }
        loop {
            let prefix = PLATE_PREFIXES.choose(&mut self.rng).copied().unwrap_or("ABC");
            let plate = format!("{}{}", prefix, self.rng.gen_range(100..=999));
            if self.used_plates.insert(plate.clone()) {
                return Some(plate);
            }
        }
    }

    fn priority(&mut self) -> Priority {
        match self.rng.gen_range(0..100) {
            0..=39 => Priority::Low,
            40..=79 => Priority::Medium,
            _ => Priority::High,
        }
    }

    fn status(&mut self) -> TripStatus {
        match self.rng.gen_range(0..100) {
            0..=69 => TripStatus::Active,
            70..=89 => TripStatus::Maintenance,
            _ => TripStatus::Inactive,
        }
    }

    /// Borrador número `index` (1-based); `None` cuando se agotan las placas
    pub fn next_draft(&mut self, index: usize) -> Option<TripDraft> {
        let plate = self.unique_plate()?;

        let days_ago = self.rng.gen_range(0..=HISTORY_DAYS);
        let start_time = self.now - Duration::days(days_ago);
        let end_time = start_time + Duration::hours(self.rng.gen_range(4..=24));

        let vehicle_type = *VehicleType::ALL.choose(&mut self.rng).unwrap_or(&VehicleType::Turbo);
        let ranges = profile(vehicle_type);

        Some(TripDraft {
            code: format!("V{:03}-{}", index, self.rng.gen_range(1000..=9999)),
            plate,
            vehicle_type,
            start_time,
            end_time,
            delivery_count: self.rng.gen_range(ranges.deliveries.0..=ranges.deliveries.1),
            billing_amount: Decimal::new(
                self.rng.gen_range(ranges.billing_cents.0..=ranges.billing_cents.1),
                2,
            ),
            note: NOTES.choose(&mut self.rng).map(|n| n.to_string()),
            client: CLIENTS.choose(&mut self.rng).copied().unwrap_or(CLIENTS[0]).to_string(),
            validated: self.rng.gen_bool(VALIDATED_RATIO),
            priority: self.priority(),
            status: self.status(),
            performance_index: Decimal::new(
                self.rng.gen_range(ranges.performance_hundredths.0..=ranges.performance_hundredths.1),
                2,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeder() -> TripSeeder<StdRng> {
        TripSeeder::new(StdRng::seed_from_u64(7), Utc::now())
    }

    #[test]
    fn test_drafts_satisfy_write_invariants() {
        let mut seeder = seeder();
        for i in 1..=200 {
            let draft = seeder.next_draft(i).unwrap();
            assert!(draft.check_invariants().is_ok(), "draft {} invalid", i);
            assert!(draft.code.starts_with(&format!("V{:03}-", i)));
            assert!(draft.billing_amount > Decimal::ZERO);
        }
    }

    #[test]
    fn test_type_dependent_ranges() {
        let mut seeder = seeder();
        for i in 1..=300 {
            let draft = seeder.next_draft(i).unwrap();
            let ranges = profile(draft.vehicle_type);
            assert!(draft.delivery_count >= ranges.deliveries.0);
            assert!(draft.delivery_count <= ranges.deliveries.1);
        }
    }

    #[test]
    fn test_dates_within_history_window() {
        let now = Utc::now();
        let mut seeder = TripSeeder::new(StdRng::seed_from_u64(11), now);
        for i in 1..=100 {
            let draft = seeder.next_draft(i).unwrap();
            assert!(draft.start_time <= now);
            assert!(draft.start_time >= now - Duration::days(HISTORY_DAYS));
            let hours = (draft.end_time - draft.start_time).num_hours();
            assert!((4..=24).contains(&hours));
        }
    }

    #[test]
    fn test_plates_are_unique_until_exhausted() {
        let mut seeder = seeder();
        let mut plates = HashSet::new();
        for i in 1..=MAX_UNIQUE_PLATES {
            let draft = seeder.next_draft(i).unwrap();
            assert!(plates.insert(draft.plate));
        }
        assert!(seeder.next_draft(MAX_UNIQUE_PLATES + 1).is_none());
    }
}
