//! Helpers de formateo compartidos por estadísticas y exportación

use chrono::{DateTime, Utc};

/// Formato de fecha-hora usado en exportaciones
pub const EXPORT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Redondear a 2 decimales
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_export_datetime(value: &DateTime<Utc>) -> String {
    value.format(EXPORT_DATETIME_FORMAT).to_string()
}

/// Token localizado para booleanos
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Sí"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.675_1), 2.68);
    }

    #[test]
    fn test_format_export_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 10, 8, 5, 9).unwrap();
        assert_eq!(format_export_datetime(&dt), "2024-01-10 08:05:09");
    }

    #[test]
    fn test_yes_no() {
        assert_eq!(yes_no(true), "Sí");
        assert_eq!(yes_no(false), "No");
    }
}
