use crate::errors::AppError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Client for the hosted-checkout payment provider.
///
/// The base URL is injectable so tests can point it at a mock server.
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// Checkout created by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCheckout {
    /// Provider-assigned checkout id, stored as the order's payment reference.
    pub id: String,
    /// Hosted payment page the customer is redirected to.
    pub redirect_url: String,
}

impl PaymentClient {
    pub fn new(base_url: String, token: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::PaymentProviderError(format!("Failed to create payment client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Creates a hosted checkout for a fixed-amount order.
    ///
    /// Currency is ZAR; `amount_cents` is the fee in cents. The customer
    /// email is forwarded so the provider can send the receipt.
    pub async fn create_checkout(
        &self,
        amount_cents: i32,
        description: &str,
        customer_email: &str,
    ) -> Result<PaymentCheckout, AppError> {
        let url = format!("{}/v1/checkouts", self.base_url);
        tracing::info!("Creating payment checkout: {} ({})", description, url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&json!({
                "amount": amount_cents,
                "currency": "ZAR",
                "description": description,
                "customer_email": customer_email,
            }))
            .send()
            .await
            .map_err(|e| {
                AppError::PaymentProviderError(format!("Payment provider request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::PaymentProviderError(format!(
                "Payment provider returned {}: {}",
                status, error_text
            )));
        }

        let checkout: PaymentCheckout = response.json().await.map_err(|e| {
            AppError::PaymentProviderError(format!(
                "Failed to parse payment provider response: {}",
                e
            ))
        })?;

        tracing::info!("Payment checkout created: {}", checkout.id);
        Ok(checkout)
    }
}
