use crate::config::Config;
use crate::errors::AppError;
use crate::models::{
    ApiResponse, ConsultationRequest, CreditInvestigationOrder, CreditReportAnalysisRequest,
    NewConsultationRequest, NewCreditReportAnalysisRequest, OrderCreatedResponse,
    INVESTIGATION_AMOUNT_CENTS,
};
use crate::payment_client::PaymentClient;
use crate::storage::LeadStorage;
use crate::validation::{validate_consultation_request, validate_credit_report_analysis_request};
use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::HeaderMap,
    http::StatusCode,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Json extractor that keeps the `{success:false, error}` envelope when the
/// body cannot be deserialized, instead of axum's plain-text 422 rejection.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
    /// Client for the payment provider (None when not configured).
    pub payment_client: Option<PaymentClient>,
}

/// Header carrying the shared admin secret for the list endpoints.
const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Checks the admin key on the list endpoints.
///
/// The submissions contain personal data including national ID numbers, so
/// listing is never exposed without the configured key.
fn require_admin(headers: &HeaderMap, config: &Config) -> Result<(), AppError> {
    let provided = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing admin key".to_string()))?;

    if provided != config.admin_api_key {
        return Err(AppError::Unauthorized("Invalid admin key".to_string()));
    }

    Ok(())
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "credit-leads-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/consultation-requests
///
/// Validates and stores a free-consultation lead.
///
/// # Returns
///
/// * 200 `{success:true, data}` with the stored record (generated id and
///   createdAt included), 400 with the failing field messages otherwise.
pub async fn create_consultation_request(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewConsultationRequest>,
) -> Result<Json<ApiResponse<ConsultationRequest>>, AppError> {
    tracing::info!("POST /api/consultation-requests");

    validate_consultation_request(&input)?;

    let storage = LeadStorage::new(state.db.clone());
    let record = storage.create_consultation_request(&input).await?;

    tracing::info!("Consultation request stored: {}", record.id);
    Ok(Json(ApiResponse::ok(record)))
}

/// GET /api/consultation-requests (admin)
///
/// All consultation requests, newest first.
pub async fn list_consultation_requests(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<ConsultationRequest>>>, AppError> {
    require_admin(&headers, &state.config)?;

    let storage = LeadStorage::new(state.db.clone());
    let records = storage.list_consultation_requests().await?;

    Ok(Json(ApiResponse::ok(records)))
}

/// POST /api/credit-report-analysis
///
/// Validates and stores a free credit-report-analysis lead. Requires a
/// 13-digit SA ID number and an affirmative consent flag.
pub async fn create_credit_report_analysis(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewCreditReportAnalysisRequest>,
) -> Result<Json<ApiResponse<CreditReportAnalysisRequest>>, AppError> {
    tracing::info!("POST /api/credit-report-analysis");

    validate_credit_report_analysis_request(&input)?;

    let storage = LeadStorage::new(state.db.clone());
    let record = storage.create_credit_report_analysis_request(&input).await?;

    tracing::info!("Credit report analysis request stored: {}", record.id);
    Ok(Json(ApiResponse::ok(record)))
}

/// GET /api/credit-report-analysis (admin)
pub async fn list_credit_report_analysis(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<CreditReportAnalysisRequest>>>, AppError> {
    require_admin(&headers, &state.config)?;

    let storage = LeadStorage::new(state.db.clone());
    let records = storage.list_credit_report_analysis_requests().await?;

    Ok(Json(ApiResponse::ok(records)))
}

/// POST /api/credit-investigation-payment
///
/// The paid (R750) investigation variant. Validates the same fields as the
/// analysis request, creates a checkout with the payment provider, then
/// stores the order carrying the provider's reference. The order is inserted
/// only after checkout creation succeeds, so a provider failure stores
/// nothing.
///
/// # Returns
///
/// * 200 with the stored order plus `paymentUrl` for the redirect, 400 on
///   validation failure, 502 when the provider is unavailable or
///   unconfigured.
pub async fn create_credit_investigation_payment(
    State(state): State<Arc<AppState>>,
    AppJson(input): AppJson<NewCreditReportAnalysisRequest>,
) -> Result<Json<OrderCreatedResponse>, AppError> {
    tracing::info!("POST /api/credit-investigation-payment");

    validate_credit_report_analysis_request(&input)?;

    let payment_client = state.payment_client.as_ref().ok_or_else(|| {
        AppError::PaymentProviderError("Payment provider not configured".to_string())
    })?;

    let checkout = payment_client
        .create_checkout(
            INVESTIGATION_AMOUNT_CENTS,
            "R750 Initial Credit Investigation",
            &input.email,
        )
        .await?;

    let storage = LeadStorage::new(state.db.clone());
    let order = storage
        .create_credit_investigation_order(&input, INVESTIGATION_AMOUNT_CENTS, &checkout.id)
        .await?;

    tracing::info!(
        "Credit investigation order stored: {} (checkout {})",
        order.id,
        checkout.id
    );

    Ok(Json(OrderCreatedResponse {
        success: true,
        data: order,
        payment_url: checkout.redirect_url,
    }))
}

/// GET /api/credit-investigation-payment (admin)
pub async fn list_credit_investigation_orders(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<CreditInvestigationOrder>>>, AppError> {
    require_admin(&headers, &state.config)?;

    let storage = LeadStorage::new(state.db.clone());
    let records = storage.list_credit_investigation_orders().await?;

    Ok(Json(ApiResponse::ok(records)))
}
