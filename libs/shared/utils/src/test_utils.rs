use std::sync::Arc;

use shared_config::AppConfig;

pub const TEST_ADMIN_TOKEN: &str = "test-admin-session-token";

/// Config builder for router/service tests. Collaborator base URLs point at
/// localhost by default; tests swap them for a wiremock URI.
pub struct TestConfig {
    pub supabase_url: String,
    pub mp_base_url: String,
    pub brevo_base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            mp_base_url: "http://localhost:54322".to_string(),
            brevo_base_url: "http://localhost:54323".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: "test-service-key".to_string(),
            mp_access_token: "test-mp-access-token".to_string(),
            mp_base_url: self.mp_base_url.clone(),
            brevo_api_key: "test-brevo-key".to_string(),
            brevo_base_url: self.brevo_base_url.clone(),
            admin_session_token: TEST_ADMIN_TOKEN.to_string(),
            public_base_url: "http://localhost:3000".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}
