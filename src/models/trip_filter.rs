//! Filtro de recorridos
//!
//! `TripFilter` es un predicado tipado que se construye una sola vez a partir
//! de los parámetros de consulta y se pasa como valor al store. El mismo valor
//! se evalúa en memoria (`matches`) o se traduce a SQL en el repositorio.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::trip::TripRecord;
use crate::utils::validation::{parse_optional_date, parse_validated_flag};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TripFilter {
    /// Subcadena de la placa, comparación sin distinguir mayúsculas
    pub plate: Option<String>,
    /// Límite inferior inclusivo sobre la fecha de `start_time`
    pub start_date: Option<NaiveDate>,
    /// Límite superior inclusivo sobre la fecha de `start_time`
    pub end_date: Option<NaiveDate>,
    pub validated: Option<bool>,
}

impl TripFilter {
    /// Construir el filtro desde parámetros crudos.
    ///
    /// Los valores vacíos o mal formados se ignoran: nunca fallan la petición.
    pub fn build(
        plate: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        validated: Option<&str>,
    ) -> Self {
        Self {
            plate: plate.filter(|p| !p.is_empty()).map(str::to_string),
            start_date: parse_optional_date(start_date),
            end_date: parse_optional_date(end_date),
            validated: parse_validated_flag(validated),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plate.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.validated.is_none()
    }

    /// Evaluar el predicado sobre un registro
    pub fn matches(&self, record: &TripRecord) -> bool {
        if let Some(plate) = &self.plate {
            if !record.plate.to_lowercase().contains(&plate.to_lowercase()) {
                return false;
            }
        }

        let start_day = record.start_time.date_naive();
        if let Some(from) = self.start_date {
            if start_day < from {
                return false;
            }
        }
        if let Some(to) = self.end_date {
            if start_day > to {
                return false;
            }
        }

        match self.validated {
            Some(validated) => record.validated == validated,
            None => true,
        }
    }

    /// Clave estable para cachear resultados calculados con este filtro
    pub fn cache_key(&self) -> String {
        fn part<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(T::to_string).unwrap_or_else(|| "*".to_string())
        }

        format!(
            "plate={}|from={}|to={}|validated={}",
            part(&self.plate.as_ref().map(|p| p.to_lowercase())),
            part(&self.start_date),
            part(&self.end_date),
            part(&self.validated),
        )
    }
}
