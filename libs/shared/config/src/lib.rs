use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub mp_access_token: String,
    pub mp_base_url: String,
    pub brevo_api_key: String,
    pub brevo_base_url: String,
    pub admin_session_token: String,
    pub public_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            mp_access_token: env::var("MP_ACCESS_TOKEN")
                .unwrap_or_else(|_| {
                    warn!("MP_ACCESS_TOKEN not set, using empty value");
                    String::new()
                }),
            mp_base_url: env::var("MP_BASE_URL")
                .unwrap_or_else(|_| "https://api.mercadopago.com".to_string()),
            brevo_api_key: env::var("BREVO_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("BREVO_API_KEY not set, confirmation emails disabled");
                    String::new()
                }),
            brevo_base_url: env::var("BREVO_BASE_URL")
                .unwrap_or_else(|_| "https://api.brevo.com".to_string()),
            admin_session_token: env::var("ADMIN_SESSION_TOKEN")
                .unwrap_or_else(|_| {
                    warn!("ADMIN_SESSION_TOKEN not set, admin routes will reject all requests");
                    String::new()
                }),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("PUBLIC_BASE_URL not set, using localhost");
                    "http://localhost:3000".to_string()
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_service_key.is_empty()
            && !self.mp_access_token.is_empty()
    }

    pub fn is_email_configured(&self) -> bool {
        !self.brevo_api_key.is_empty() && !self.brevo_base_url.is_empty()
    }
}
