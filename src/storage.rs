use crate::errors::{AppError, ResultExt};
use crate::models::{
    ConsultationRequest, CreditInvestigationOrder, CreditReportAnalysisRequest,
    NewConsultationRequest, NewCreditReportAnalysisRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for the three submission tables.
///
/// Each create is a single-statement insert with `RETURNING *`, so the caller
/// gets the stored row including the generated id and the database-assigned
/// created_at; either the full row is stored or nothing is. Lists return all
/// rows newest-first.
pub struct LeadStorage {
    pool: PgPool,
}

impl LeadStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_consultation_request(
        &self,
        input: &NewConsultationRequest,
    ) -> Result<ConsultationRequest, AppError> {
        sqlx::query_as::<_, ConsultationRequest>(
            r#"
            INSERT INTO consultation_requests
                (id, first_name, last_name, email, phone,
                 primary_concern, additional_details, consent_given)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.primary_concern)
        .bind(&input.additional_details)
        .bind(input.consent_given.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert consultation request")
    }

    pub async fn list_consultation_requests(&self) -> Result<Vec<ConsultationRequest>, AppError> {
        sqlx::query_as::<_, ConsultationRequest>(
            "SELECT * FROM consultation_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch consultation requests")
    }

    pub async fn create_credit_report_analysis_request(
        &self,
        input: &NewCreditReportAnalysisRequest,
    ) -> Result<CreditReportAnalysisRequest, AppError> {
        sqlx::query_as::<_, CreditReportAnalysisRequest>(
            r#"
            INSERT INTO credit_report_analysis_requests
                (id, first_name, last_name, id_number, email, phone,
                 employer_name, monthly_income, primary_concern, consent_given)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.id_number)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.employer_name)
        .bind(&input.monthly_income)
        .bind(&input.primary_concern)
        .bind(input.consent_given.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert credit report analysis request")
    }

    pub async fn list_credit_report_analysis_requests(
        &self,
    ) -> Result<Vec<CreditReportAnalysisRequest>, AppError> {
        sqlx::query_as::<_, CreditReportAnalysisRequest>(
            "SELECT * FROM credit_report_analysis_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch credit report analysis requests")
    }

    /// Inserts a paid investigation order. Called only after the payment
    /// provider has issued the checkout reference.
    pub async fn create_credit_investigation_order(
        &self,
        input: &NewCreditReportAnalysisRequest,
        amount_cents: i32,
        payment_reference: &str,
    ) -> Result<CreditInvestigationOrder, AppError> {
        sqlx::query_as::<_, CreditInvestigationOrder>(
            r#"
            INSERT INTO credit_investigation_orders
                (id, first_name, last_name, id_number, email, phone,
                 employer_name, monthly_income, primary_concern, consent_given,
                 amount_cents, payment_reference, payment_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'pending')
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.id_number)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.employer_name)
        .bind(&input.monthly_income)
        .bind(&input.primary_concern)
        .bind(input.consent_given.unwrap_or(false))
        .bind(amount_cents)
        .bind(payment_reference)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert credit investigation order")
    }

    pub async fn list_credit_investigation_orders(
        &self,
    ) -> Result<Vec<CreditInvestigationOrder>, AppError> {
        sqlx::query_as::<_, CreditInvestigationOrder>(
            "SELECT * FROM credit_investigation_orders ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch credit investigation orders")
    }
}
