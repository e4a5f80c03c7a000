use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::templates::{
    booking_confirmation_html, booking_received_html, BookingEmailData, CLINIC_NAME,
};

const SENDER_EMAIL: &str = "contacto@zoeplasmabeauty.com";

/// Brevo transactional-email client. Sends are fire-and-forget from the
/// booking flow's perspective: callers log failures and move on.
pub struct Mailer {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Mailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.brevo_base_url.clone(),
            api_key: config.brevo_api_key.clone(),
        }
    }

    pub async fn send_booking_received(
        &self,
        to_email: &str,
        data: &BookingEmailData,
    ) -> Result<()> {
        self.send(
            to_email,
            &data.full_name,
            "Evaluación Recibida - Zoe Plasma Beauty",
            &booking_received_html(data),
        )
        .await
    }

    pub async fn send_booking_confirmation(
        &self,
        to_email: &str,
        data: &BookingEmailData,
    ) -> Result<()> {
        self.send(
            to_email,
            &data.full_name,
            "Confirmación de Turno - Zoe Plasma Beauty",
            &booking_confirmation_html(data),
        )
        .await
    }

    async fn send(&self, to_email: &str, to_name: &str, subject: &str, html: &str) -> Result<()> {
        if self.api_key.is_empty() {
            warn!("BREVO_API_KEY not configured, skipping email to {}", to_email);
            return Ok(());
        }

        let url = format!("{}/v3/smtp/email", self.base_url);
        debug!("Sending transactional email to {}", to_email);

        let response = self
            .client
            .post(&url)
            .header("accept", "application/json")
            .header("api-key", &self.api_key)
            .json(&json!({
                "sender": { "name": CLINIC_NAME, "email": SENDER_EMAIL },
                "to": [{ "email": to_email, "name": to_name }],
                "subject": subject,
                "htmlContent": html
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Email API error ({}): {}", status, error_text));
        }

        debug!("Email dispatched to {}", to_email);
        Ok(())
    }
}
