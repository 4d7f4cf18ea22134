//! Estrategias concretas de exportación
//!
//! - `StyledXlsxStrategy`: libro con formato (encabezado, anchos, números)
//! - `PlainXlsxStrategy`: libro nuevo con escrituras genéricas, sin formatos
//! - `CsvStrategy`: texto delimitado; también se usa como último recurso con
//!   extensión `.xlsx`

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};

use crate::services::export_service::{
    ExportError, ExportLayout, ExportRow, ExportStrategy, CSV_CONTENT_TYPE, SHEET_NAME,
    XLSX_CONTENT_TYPE,
};
use crate::utils::format::yes_no;

const COLUMN_WIDTHS: [f64; 13] = [
    14.0, 10.0, 14.0, 20.0, 20.0, 16.0, 14.0, 32.0, 30.0, 10.0, 12.0, 10.0, 8.0,
];

pub struct StyledXlsxStrategy;

impl ExportStrategy for StyledXlsxStrategy {
    fn name(&self) -> &'static str {
        "xlsx_styled"
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn render(&self, rows: &[ExportRow], layout: ExportLayout) -> Result<Vec<u8>, ExportError> {
        let headers = layout.headers();
        let header_format = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(Color::RGB(0xD9E1F2));
        let integer_format = Format::new().set_num_format("0");
        let money_format = Format::new().set_num_format("#,##0.00");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, header) in headers.iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *header, &header_format)?;
            worksheet.set_column_width(col, COLUMN_WIDTHS[col as usize])?;
        }

        for (index, row) in rows.iter().enumerate() {
            let r = index as u32 + 1;
            worksheet.write_string(r, 0, row.code.as_str())?;
            worksheet.write_string(r, 1, row.plate.as_str())?;
            worksheet.write_string(r, 2, row.vehicle_type)?;
            worksheet.write_string(r, 3, row.start_time.as_str())?;
            worksheet.write_string(r, 4, row.end_time.as_str())?;
            worksheet.write_number_with_format(r, 5, row.delivery_count, &integer_format)?;
            worksheet.write_number_with_format(r, 6, row.billing_as_f64(), &money_format)?;
            worksheet.write_string(r, 7, row.note.as_str())?;
            worksheet.write_string(r, 8, row.client.as_str())?;
            worksheet.write_string(r, 9, yes_no(row.validated))?;
            if layout == ExportLayout::PowerBi {
                worksheet.write_string(r, 10, row.day_label())?;
                worksheet.write_string(r, 11, row.month_label())?;
                worksheet.write_number_with_format(r, 12, row.year(), &integer_format)?;
            }
        }

        worksheet.set_freeze_panes(1, 0)?;
        worksheet.autofilter(0, 0, rows.len() as u32, (headers.len() - 1) as u16)?;

        Ok(workbook.save_to_buffer()?)
    }
}

pub struct PlainXlsxStrategy;

impl ExportStrategy for PlainXlsxStrategy {
    fn name(&self) -> &'static str {
        "xlsx_plain"
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }

    fn render(&self, rows: &[ExportRow], layout: ExportLayout) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, header) in layout.headers().iter().enumerate() {
            worksheet.write(0, col as u16, *header)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let r = index as u32 + 1;
            worksheet.write(r, 0, row.code.as_str())?;
            worksheet.write(r, 1, row.plate.as_str())?;
            worksheet.write(r, 2, row.vehicle_type)?;
            worksheet.write(r, 3, row.start_time.as_str())?;
            worksheet.write(r, 4, row.end_time.as_str())?;
            worksheet.write(r, 5, row.delivery_count)?;
            worksheet.write(r, 6, row.billing_as_f64())?;
            worksheet.write(r, 7, row.note.as_str())?;
            worksheet.write(r, 8, row.client.as_str())?;
            worksheet.write(r, 9, yes_no(row.validated))?;
            if layout == ExportLayout::PowerBi {
                worksheet.write(r, 10, row.day_label())?;
                worksheet.write(r, 11, row.month_label())?;
                worksheet.write(r, 12, row.year())?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

/// Texto delimitado con el encabezado del layout
pub struct CsvStrategy {
    name: &'static str,
    extension: &'static str,
}

impl CsvStrategy {
    pub fn plain() -> Self {
        Self { name: "csv", extension: "csv" }
    }

    /// Contenido CSV pero con el nombre de archivo `.xlsx` que el cliente pidió
    pub fn disguised_as_xlsx() -> Self {
        Self { name: "csv_as_xlsx", extension: "xlsx" }
    }
}

impl ExportStrategy for CsvStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extension(&self) -> &'static str {
        self.extension
    }

    fn content_type(&self) -> &'static str {
        CSV_CONTENT_TYPE
    }

    fn render(&self, rows: &[ExportRow], layout: ExportLayout) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(layout.headers())?;
        for row in rows {
            writer.write_record(row.text_fields(layout))?;
        }
        writer
            .into_inner()
            .map_err(|e| ExportError::Flush(e.error().to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::workbook_reader;
    use super::*;
    use crate::services::export_service::{EXPORT_HEADERS, POWERBI_EXTRA_HEADERS};
    use calamine::Data;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn row(code: &str, note: &str, validated: bool) -> ExportRow {
        ExportRow {
            code: code.to_string(),
            plate: "XYZ789".to_string(),
            vehicle_type: "Eléctrico",
            start_time: "2024-01-10 08:00:00".to_string(),
            end_time: "2024-01-10 10:30:00".to_string(),
            delivery_count: 12,
            billing_amount: Decimal::new(4_550_050, 2),
            note: note.to_string(),
            client: "Mensajería Veloz C.A.".to_string(),
            validated,
            start_day: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    fn xlsx_strategies() -> [&'static dyn ExportStrategy; 2] {
        [&StyledXlsxStrategy, &PlainXlsxStrategy]
    }

    #[test]
    fn test_csv_round_trip_preserves_values_and_order() {
        let rows = vec![
            row("V-2", "Servicio \"nocturno\", ruta 4", true),
            row("V-1", "", false),
        ];
        let bytes = CsvStrategy::plain().render(&rows, ExportLayout::Standard).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, EXPORT_HEADERS.to_vec());

        let parsed: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        assert_eq!(parsed.len(), 2);
        for (parsed_row, expected) in parsed.iter().zip(&rows) {
            assert_eq!(parsed_row, &expected.text_fields(ExportLayout::Standard));
        }
        assert_eq!(parsed[0][6], "45500.50");
        assert_eq!(parsed[0][9], "Sí");
        assert_eq!(parsed[1][7], "");
    }

    #[test]
    fn test_csv_with_no_rows_still_has_header() {
        let bytes = CsvStrategy::plain().render(&[], ExportLayout::Standard).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Código,Placa,Tipo Vehículo"));
    }

    #[test]
    fn test_csv_powerbi_layout_appends_date_columns() {
        let bytes = CsvStrategy::plain()
            .render(&[row("V-1", "", true)], ExportLayout::PowerBi)
            .unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers.len(), 13);
        assert_eq!(&headers[10..], POWERBI_EXTRA_HEADERS.as_slice());

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[10], "2024-01-10");
        assert_eq!(&record[11], "2024-01");
        assert_eq!(&record[12], "2024");
    }

    #[test]
    fn test_xlsx_strategies_produce_zip_containers() {
        let rows = vec![row("V-1", "", true)];
        for strategy in xlsx_strategies() {
            let bytes = strategy.render(&rows, ExportLayout::Standard).unwrap();
            assert_eq!(&bytes[..4], b"PK\x03\x04", "{} output", strategy.name());
        }
    }

    #[test]
    fn test_xlsx_sheet_headers_and_numeric_cells() {
        let mut second = row("V-2", "Ruta norte", false);
        second.delivery_count = 5;
        second.billing_amount = Decimal::new(10_000_050, 2);
        let rows = vec![row("V-1", "", true), second];

        for strategy in xlsx_strategies() {
            let sheet = workbook_reader::read(&strategy.render(&rows, ExportLayout::Standard).unwrap());
            let name = strategy.name();
            assert_eq!(sheet.sheet_names, vec![SHEET_NAME.to_string()], "{}", name);
            assert_eq!(sheet.headers, EXPORT_HEADERS.to_vec(), "{}", name);
            assert_eq!(sheet.rows.len(), rows.len(), "{}", name);

            assert_eq!(sheet.rows[0][0], Data::String("V-1".to_string()), "{}", name);
            assert_eq!(sheet.rows[0][5], Data::Float(12.0), "{}", name);
            assert_eq!(sheet.rows[0][6], Data::Float(45500.5), "{}", name);
            assert_eq!(sheet.rows[0][9], Data::String("Sí".to_string()), "{}", name);
            assert_eq!(sheet.rows[1][5], Data::Float(5.0), "{}", name);
            assert_eq!(sheet.rows[1][6], Data::Float(100000.5), "{}", name);
            assert_eq!(sheet.rows[1][7], Data::String("Ruta norte".to_string()), "{}", name);
        }
    }

    #[test]
    fn test_xlsx_powerbi_layout_appends_date_columns() {
        let rows = vec![row("V-1", "", true)];
        for strategy in xlsx_strategies() {
            let sheet = workbook_reader::read(&strategy.render(&rows, ExportLayout::PowerBi).unwrap());
            let name = strategy.name();
            assert_eq!(sheet.headers, ExportLayout::PowerBi.headers(), "{}", name);
            assert_eq!(sheet.rows.len(), 1, "{}", name);
            assert_eq!(sheet.rows[0][10], Data::String("2024-01-10".to_string()), "{}", name);
            assert_eq!(sheet.rows[0][11], Data::String("2024-01".to_string()), "{}", name);
            assert_eq!(sheet.rows[0][12], Data::Float(2024.0), "{}", name);
        }
    }

    #[test]
    fn test_xlsx_handles_empty_input() {
        for strategy in xlsx_strategies() {
            let sheet = workbook_reader::read(&strategy.render(&[], ExportLayout::Standard).unwrap());
            assert_eq!(sheet.headers, EXPORT_HEADERS.to_vec(), "{}", strategy.name());
            assert!(sheet.rows.is_empty(), "{}", strategy.name());
        }
    }
}
