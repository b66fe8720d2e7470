use sqlx::{postgres::PgPoolOptions, PgPool};

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        ensure_schema(&pool).await?;

        Ok(Self { pool })
    }
}

/// Creates the submission tables if they do not exist yet.
///
/// Records are insert-only; there are no update or delete paths, so the
/// schema carries no updated_at columns.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS consultation_requests (
            id UUID PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            primary_concern TEXT,
            additional_details TEXT,
            consent_given BOOLEAN NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS credit_report_analysis_requests (
            id UUID PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            id_number TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            employer_name TEXT,
            monthly_income TEXT,
            primary_concern TEXT,
            consent_given BOOLEAN NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS credit_investigation_orders (
            id UUID PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            id_number TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            employer_name TEXT,
            monthly_income TEXT,
            primary_concern TEXT,
            consent_given BOOLEAN NOT NULL,
            amount_cents INTEGER NOT NULL,
            payment_reference TEXT NOT NULL,
            payment_status TEXT NOT NULL DEFAULT 'pending',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
