use serde::Deserialize;
use uuid::Uuid;

/// Fixed deposit charged to hold a reservation, in ARS.
pub const DEPOSIT_AMOUNT_ARS: f64 = 20_000.0;

/// Inputs for creating a checkout preference with the payment provider.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub appointment_id: Uuid,
    pub payer_name: String,
    pub payer_email: String,
    pub service_name: String,
}

/// Subset of the provider's preference resource we consume.
#[derive(Debug, Deserialize)]
pub struct PreferenceResponse {
    pub id: Option<String>,
    pub init_point: Option<String>,
    pub sandbox_init_point: Option<String>,
}

/// Authoritative payment state, fetched directly from the provider. The
/// webhook payload's own status field is never trusted.
#[derive(Debug, Deserialize)]
pub struct PaymentInfo {
    pub status: String,
    #[serde(default)]
    pub external_reference: Option<String>,
}

impl PaymentInfo {
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}

/// Terminal result of processing one webhook delivery. Every variant maps to
/// a 200 acknowledgement; failures that should trigger provider redelivery
/// surface as errors instead.
#[derive(Debug, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Not a payment event; acknowledged without side effects.
    Ignored,
    /// Payment verified but not approved (pending/rejected/in review).
    NotApproved(String),
    /// Approved payment without an external reference to bind to.
    Unlinked,
    /// The guarded update matched no `pending` row: redelivery after an
    /// earlier confirmation, or an unknown appointment id.
    AlreadyConfirmed,
    Confirmed,
}
