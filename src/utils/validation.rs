//! Utilidades de validación
//!
//! Parseo tolerante de parámetros de consulta: un valor mal formado se trata
//! como ausente, nunca como error de la petición.

use chrono::{DateTime, NaiveDate, Utc};
use validator::ValidationError;

/// Convertir string `YYYY-MM-DD` a fecha; `None` si está vacío o no se puede parsear
pub fn parse_optional_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Bandera de validación tri-estado: solo `"true"` y `"false"` literales filtran
pub fn parse_validated_flag(value: Option<&str>) -> Option<bool> {
    match value {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Convertir un cursor RFC3339 a datetime UTC; `None` si es inválido
///
/// Un `+hh:mm` sin codificar en la URL llega como espacio; se restaura antes
/// de reintentar.
pub fn parse_cursor(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc3339(&value.replace(' ', "+")))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Validar que un string no esté vacío (usado por `#[validate(custom)]`)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(
            parse_optional_date(Some("2024-01-10")),
            NaiveDate::from_ymd_opt(2024, 1, 10)
        );
        assert_eq!(parse_optional_date(Some("")), None);
        assert_eq!(parse_optional_date(Some("10/01/2024")), None);
        assert_eq!(parse_optional_date(Some("2024-02-30")), None);
        assert_eq!(parse_optional_date(None), None);
    }

    #[test]
    fn test_parse_validated_flag() {
        assert_eq!(parse_validated_flag(Some("true")), Some(true));
        assert_eq!(parse_validated_flag(Some("false")), Some(false));
        assert_eq!(parse_validated_flag(Some("TRUE")), None);
        assert_eq!(parse_validated_flag(Some("1")), None);
        assert_eq!(parse_validated_flag(None), None);
    }

    #[test]
    fn test_parse_cursor() {
        assert!(parse_cursor(Some("2024-01-10T08:00:00Z")).is_some());
        assert!(parse_cursor(Some("2024-01-10T08:00:00+02:00")).is_some());
        assert!(parse_cursor(Some("ayer")).is_none());
        assert!(parse_cursor(None).is_none());
    }

    #[test]
    fn test_parse_cursor_restores_unencoded_plus_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap();
        assert_eq!(parse_cursor(Some("2024-01-10T08:00:00 02:00")), Some(expected));
        assert_eq!(parse_cursor(Some("2024-01-10T08:00:00+02:00")), Some(expected));
        assert!(parse_cursor(Some("2024-01-10 08:00:00 02:00")).is_none());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("ABC123").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
