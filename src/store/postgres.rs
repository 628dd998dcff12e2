// src/store/postgres.rs

use chrono::{DateTime, Utc};
use sqlx::{query, query_as, FromRow, Pool, Postgres};
use tracing::info;
use uuid::Uuid;

use super::StoreError;
use crate::models::Scenario;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS public.scenarios (
    scenario_id  uuid PRIMARY KEY,
    name         text        NOT NULL,
    brand        text,
    outlet       text,
    input_hash   text        NOT NULL,
    payload      jsonb       NOT NULL,
    created_at   timestamptz NOT NULL,
    updated_at   timestamptz NOT NULL
)
"#;

#[derive(FromRow)]
struct ScenarioRow {
    payload: serde_json::Value,
}

impl ScenarioRow {
    fn into_scenario(self) -> Result<Scenario, StoreError> {
        Ok(serde_json::from_value(self.payload)?)
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        query(SCHEMA).execute(&pool).await?;

        info!(max_connections, "connected to PostgreSQL");
        Ok(Self { pool })
    }

    pub async fn insert(&self, s: &Scenario) -> Result<(), StoreError> {
        let payload = serde_json::to_value(s)?;
        let res = query(
            r#"
            INSERT INTO public.scenarios(scenario_id, name, brand, outlet, input_hash, payload, created_at, updated_at)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            ON CONFLICT (scenario_id) DO NOTHING
            "#,
        )
        .bind(s.id).bind(&s.name).bind(&s.brand).bind(&s.outlet)
        .bind(s.parameters.fingerprint()).bind(payload)
        .bind(s.created_at).bind(s.updated_at)
        .execute(&self.pool).await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::Conflict(s.id));
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Scenario>, StoreError> {
        let rows = query_as::<_, ScenarioRow>(
            r#"SELECT payload FROM public.scenarios ORDER BY created_at DESC, scenario_id"#,
        )
        .fetch_all(&self.pool).await?;
        rows.into_iter().map(ScenarioRow::into_scenario).collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<Scenario, StoreError> {
        query_as::<_, ScenarioRow>(r#"SELECT payload FROM public.scenarios WHERE scenario_id=$1"#)
            .bind(id)
            .fetch_optional(&self.pool).await?
            .ok_or(StoreError::NotFound(id))?
            .into_scenario()
    }

    pub async fn replace(&self, s: &Scenario) -> Result<(), StoreError> {
        let payload = serde_json::to_value(s)?;
        let updated_at: DateTime<Utc> = s.updated_at;
        let res = query(
            r#"
            UPDATE public.scenarios SET
              name       = $2,
              brand      = $3,
              outlet     = $4,
              input_hash = $5,
              payload    = $6,
              updated_at = $7
            WHERE scenario_id = $1
            "#,
        )
        .bind(s.id).bind(&s.name).bind(&s.brand).bind(&s.outlet)
        .bind(s.parameters.fingerprint()).bind(payload).bind(updated_at)
        .execute(&self.pool).await?;
        if res.rows_affected() == 0 {
            return Err(StoreError::NotFound(s.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = query(r#"DELETE FROM public.scenarios WHERE scenario_id=$1"#)
            .bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected() > 0)
    }
}
