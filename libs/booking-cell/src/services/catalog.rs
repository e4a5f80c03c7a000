use reqwest::Method;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::domain::Service;
use shared_models::error::AppError;

/// Read-only access to the treatment catalog. Disabled services stay in
/// storage for historical appointments but are invisible here.
pub struct CatalogService {
    supabase: SupabaseClient,
}

impl CatalogService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list_active_services(&self) -> Result<Vec<Service>, AppError> {
        debug!("Listing active services");

        let services: Vec<Service> = self
            .supabase
            .request(
                Method::GET,
                "/rest/v1/services?is_active=eq.true&order=name.asc",
                None,
            )
            .await
            .map_err(|e| {
                warn!("Catalog listing failed: {}", e);
                AppError::Unavailable(
                    "El catálogo no está disponible en este momento.".to_string(),
                )
            })?;

        Ok(services)
    }

    pub async fn get_active_service(&self, service_id: &str) -> Result<Service, AppError> {
        let path = format!(
            "/rest/v1/services?id=eq.{}&is_active=eq.true",
            urlencoding::encode(service_id)
        );

        let result: Vec<Service> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| {
                warn!("Service lookup failed: {}", e);
                AppError::Unavailable("La agenda no está disponible en este momento.".to_string())
            })?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("Servicio no encontrado.".to_string()))
    }
}
