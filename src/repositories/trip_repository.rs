use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::trip::{Priority, TripDraft, TripRecord};
use crate::models::trip_filter::TripFilter;
use crate::repositories::TripStore;
use crate::utils::errors::{AppError, AppResult};

const TRIP_COLUMNS: &str = "id, code, plate, vehicle_type, start_time, end_time, delivery_count, \
     billing_amount, note, client, validated, created_at, updated_at, created_by, modified_by, \
     priority, status, performance_index";

/// Fila cruda de `trip_records`
#[derive(Debug, sqlx::FromRow)]
pub struct TripRow {
    pub id: i64,
    pub code: String,
    pub plate: String,
    pub vehicle_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub delivery_count: i32,
    pub billing_amount: Decimal,
    pub note: Option<String>,
    pub client: String,
    pub validated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<i64>,
    pub modified_by: Option<i64>,
    pub priority: i16,
    pub status: String,
    pub performance_index: Decimal,
}

impl TryFrom<TripRow> for TripRecord {
    type Error = AppError;

    fn try_from(row: TripRow) -> Result<Self, Self::Error> {
        Ok(TripRecord {
            id: row.id,
            code: row.code,
            plate: row.plate,
            vehicle_type: row.vehicle_type.parse()?,
            start_time: row.start_time,
            end_time: row.end_time,
            delivery_count: row.delivery_count,
            billing_amount: row.billing_amount,
            note: row.note,
            client: row.client,
            validated: row.validated,
            created_at: row.created_at,
            updated_at: row.updated_at,
            created_by: row.created_by,
            modified_by: row.modified_by,
            priority: Priority::from_i16(row.priority)?,
            status: row.status.parse()?,
            performance_index: row.performance_index,
        })
    }
}

fn into_records(rows: Vec<TripRow>) -> AppResult<Vec<TripRecord>> {
    rows.into_iter().map(TripRecord::try_from).collect()
}

/// Escapar comodines de LIKE (`\` es el escape por defecto en PostgreSQL)
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Traducir el filtro a cláusulas WHERE con parámetros enlazados
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TripFilter) {
    builder.push(" WHERE TRUE");

    if let Some(plate) = &filter.plate {
        builder
            .push(" AND plate ILIKE ")
            .push_bind(format!("%{}%", escape_like(plate)));
    }
    if let Some(from) = filter.start_date {
        builder
            .push(" AND (start_time AT TIME ZONE 'UTC')::date >= ")
            .push_bind(from);
    }
    if let Some(to) = filter.end_date {
        builder
            .push(" AND (start_time AT TIME ZONE 'UTC')::date <= ")
            .push_bind(to);
    }
    if let Some(validated) = filter.validated {
        builder.push(" AND validated = ").push_bind(validated);
    }
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrar todos los registros (usado por el generador de datos)
    pub async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM trip_records")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TripStore for TripRepository {
    async fn list(&self, filter: &TripFilter) -> AppResult<Vec<TripRecord>> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM trip_records", TRIP_COLUMNS));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY start_time DESC, id DESC");

        let rows = builder
            .build_query_as::<TripRow>()
            .fetch_all(&self.pool)
            .await?;

        log::debug!("🔍 {} recorridos para filtro {}", rows.len(), filter.cache_key());
        into_records(rows)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<TripRecord>> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {} FROM trip_records WHERE id = $1",
            TRIP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TripRecord::try_from).transpose()
    }

    async fn create(&self, draft: &TripDraft, created_by: Option<i64>) -> AppResult<TripRecord> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            r#"
            INSERT INTO trip_records (
                code, plate, vehicle_type, start_time, end_time, delivery_count,
                billing_amount, note, client, validated, priority, status,
                performance_index, created_by, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, NOW(), NOW()
            )
            RETURNING {}
            "#,
            TRIP_COLUMNS
        ))
        .bind(&draft.code)
        .bind(&draft.plate)
        .bind(draft.vehicle_type.as_str())
        .bind(draft.start_time)
        .bind(draft.end_time)
        .bind(draft.delivery_count)
        .bind(draft.billing_amount)
        .bind(&draft.note)
        .bind(&draft.client)
        .bind(draft.validated)
        .bind(draft.priority.as_i16())
        .bind(draft.status.as_str())
        .bind(draft.performance_index)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        TripRecord::try_from(row)
    }

    async fn update(
        &self,
        id: i64,
        draft: &TripDraft,
        modified_by: Option<i64>,
    ) -> AppResult<Option<TripRecord>> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            r#"
            UPDATE trip_records SET
                code = $2,
                plate = $3,
                vehicle_type = $4,
                start_time = $5,
                end_time = $6,
                delivery_count = $7,
                billing_amount = $8,
                note = $9,
                client = $10,
                validated = $11,
                priority = $12,
                status = $13,
                performance_index = $14,
                modified_by = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TRIP_COLUMNS
        ))
        .bind(id)
        .bind(&draft.code)
        .bind(&draft.plate)
        .bind(draft.vehicle_type.as_str())
        .bind(draft.start_time)
        .bind(draft.end_time)
        .bind(draft.delivery_count)
        .bind(draft.billing_amount)
        .bind(&draft.note)
        .bind(&draft.client)
        .bind(draft.validated)
        .bind(draft.priority.as_i16())
        .bind(draft.status.as_str())
        .bind(draft.performance_index)
        .bind(modified_by)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TripRecord::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM trip_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_validated(
        &self,
        id: i64,
        validated: bool,
        modified_by: Option<i64>,
    ) -> AppResult<Option<TripRecord>> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            r#"
            UPDATE trip_records
            SET validated = $2, modified_by = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TRIP_COLUMNS
        ))
        .bind(id)
        .bind(validated)
        .bind(modified_by)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TripRecord::try_from).transpose()
    }

    async fn set_validated_many(
        &self,
        ids: &[i64],
        validated: bool,
        modified_by: Option<i64>,
    ) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE trip_records
            SET validated = $2, modified_by = $3, updated_at = NOW()
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids.to_vec())
        .bind(validated)
        .bind(modified_by)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn has_updates_since(&self, since: DateTime<Utc>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM trip_records WHERE updated_at > $1)",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ABC"), "ABC");
        assert_eq!(escape_like("10%_x"), "10\\%\\_x");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_push_filter_without_conditions() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM trip_records");
        push_filter(&mut builder, &TripFilter::default());
        assert_eq!(builder.sql(), "SELECT id FROM trip_records WHERE TRUE");
    }

    #[test]
    fn test_push_filter_binds_every_condition() {
        let filter = TripFilter {
            plate: Some("abc".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            validated: Some(true),
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM trip_records");
        push_filter(&mut builder, &filter);

        let sql = builder.sql();
        assert!(sql.contains("plate ILIKE $1"));
        assert!(sql.contains("::date >= $2"));
        assert!(sql.contains("::date <= $3"));
        assert!(sql.contains("validated = $4"));
    }
}
