use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Database Models ============

/// A lead-capture submission expressing interest in a free advisory call.
///
/// Immutable once created; no update or delete path exists.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    /// Server-generated unique identifier.
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// One of the website's concern categories (Debt Review Removal,
    /// Prescribed Debt Clearing, Default Removals, Credit Bureau Clearance,
    /// Judgment Rescission, Credit Score Improvement, Other) or free text.
    /// Not enforced server-side.
    pub primary_concern: Option<String>,
    pub additional_details: Option<String>,
    /// Consent to data processing and contact. Always true for stored rows.
    pub consent_given: bool,
    /// Server-assigned at insert time, immutable thereafter.
    pub created_at: DateTime<Utc>,
}

/// A submission authorizing the service to pull a national credit report
/// using the submitter's SA ID number (free analysis variant).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditReportAnalysisRequest {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// 13-digit South African ID number. Format-validated only; no checksum.
    pub id_number: String,
    pub email: String,
    pub phone: String,
    pub employer_name: Option<String>,
    pub monthly_income: Option<String>,
    pub primary_concern: Option<String>,
    pub consent_given: bool,
    pub created_at: DateTime<Utc>,
}

/// The paid (R750) investigation variant of the analysis request.
///
/// Carries the payment-provider checkout reference assigned when the order
/// was created. Status starts at "pending"; settlement happens outside this
/// service.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditInvestigationOrder {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub id_number: String,
    pub email: String,
    pub phone: String,
    pub employer_name: Option<String>,
    pub monthly_income: Option<String>,
    pub primary_concern: Option<String>,
    pub consent_given: bool,
    /// Fixed investigation fee in cents (75000 = R750).
    pub amount_cents: i32,
    /// Checkout id returned by the payment provider.
    pub payment_reference: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

/// Investigation fee in cents: R750.
pub const INVESTIGATION_AMOUNT_CENTS: i32 = 75_000;

// ============ API Request Models ============

/// Incoming consultation-request form body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConsultationRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub primary_concern: Option<String>,
    pub additional_details: Option<String>,
    #[serde(default, deserialize_with = "consent_flag")]
    pub consent_given: Option<bool>,
}

/// Incoming credit-report-analysis form body. Also the input shape for the
/// paid investigation order, which reuses the same form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCreditReportAnalysisRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub employer_name: Option<String>,
    pub monthly_income: Option<String>,
    pub primary_concern: Option<String>,
    #[serde(default, deserialize_with = "consent_flag")]
    pub consent_given: Option<bool>,
}

/// Accepts the consent flag as a JSON boolean or as the legacy `"true"` /
/// `"false"` strings the original forms submitted.
fn consent_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(b)) => Ok(Some(b)),
        Some(Flag::Text(s)) => match s.as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "consentGiven must be true or false, got '{}'",
                other
            ))),
        },
    }
}

// ============ API Response Models ============

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response for a created investigation order, carrying the provider's
/// checkout redirect so the client can forward the user to payment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub data: CreditInvestigationOrder,
    pub payment_url: String,
}
