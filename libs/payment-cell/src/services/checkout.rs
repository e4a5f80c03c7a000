use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::models::{CheckoutRequest, PaymentInfo, PreferenceResponse, DEPOSIT_AMOUNT_ARS};

/// Mercado Pago API client. Two operations: create a checkout preference for
/// the deposit, and fetch a payment by id for webhook verification.
pub struct MercadoPagoClient {
    client: Client,
    base_url: String,
    access_token: String,
    public_base_url: String,
}

impl MercadoPagoClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.mp_base_url.clone(),
            access_token: config.mp_access_token.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Create a checkout preference and return the redirect URL. The
    /// appointment id travels as `external_reference` and comes back on every
    /// payment notification, binding the payment to the reservation.
    pub async fn create_checkout(&self, request: &CheckoutRequest) -> Result<String> {
        if self.access_token.is_empty() {
            return Err(anyhow!("MP_ACCESS_TOKEN not configured"));
        }

        let url = format!("{}/checkout/preferences", self.base_url);
        debug!(
            "Creating checkout preference for appointment {}",
            request.appointment_id
        );

        let body = json!({
            "items": [{
                "title": format!("Seña - {}", request.service_name),
                "quantity": 1,
                "currency_id": "ARS",
                "unit_price": DEPOSIT_AMOUNT_ARS
            }],
            "payer": {
                "name": request.payer_name,
                "email": request.payer_email
            },
            "external_reference": request.appointment_id.to_string(),
            "back_urls": {
                "success": format!("{}/success", self.public_base_url),
                "failure": format!("{}/?pago=error", self.public_base_url),
                "pending": format!("{}/?pago=pendiente", self.public_base_url)
            },
            "auto_return": "approved",
            "notification_url": format!("{}/webhooks/mercadopago", self.public_base_url)
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Checkout preference creation failed ({}): {}", status, error_text);
            return Err(anyhow!("Payment API error ({}): {}", status, error_text));
        }

        let preference = response.json::<PreferenceResponse>().await?;

        preference
            .init_point
            .or(preference.sandbox_init_point)
            .ok_or_else(|| anyhow!("Preference response contains no redirect URL"))
    }

    /// Fetch the authoritative state of a payment. This is the sole source of
    /// truth during webhook handling.
    pub async fn get_payment(&self, payment_id: &str) -> Result<PaymentInfo> {
        if self.access_token.is_empty() {
            return Err(anyhow!("MP_ACCESS_TOKEN not configured"));
        }

        let url = format!("{}/v1/payments/{}", self.base_url, payment_id);
        debug!("Verifying payment {} with provider", payment_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Payment verification failed ({}): {}", status, error_text);
            return Err(anyhow!("Payment API error ({}): {}", status, error_text));
        }

        let payment = response.json::<PaymentInfo>().await?;
        Ok(payment)
    }
}
