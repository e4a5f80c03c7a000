use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use reqwest::Method;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::error::AppError;
use shared_utils::clock::{clinic_offset, Clock, SystemClock};

use crate::models::{OccupiedAppointmentRow, OccupiedInterval};
use crate::services::catalog::CatalogService;

/// Slot granularity. Fixed system constant, not configurable per service.
const SLOT_INTERVAL_MINUTES: i64 = 30;

/// A same-day slot must start at least this far ahead of "now".
const MIN_LEAD_TIME_MINUTES: i64 = 30;

const WEEKDAY_OPENING_HOUR: u32 = 10;
const SATURDAY_OPENING_HOUR: u32 = 12;
const CLOSING_HOUR: u32 = 19;

/// Computes the bookable start times for one calendar day: clinic hours
/// minus existing occupancy, walked on a fixed half-hour grid.
pub struct AvailabilityService {
    supabase: SupabaseClient,
    catalog: CatalogService,
    clock: Arc<dyn Clock>,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            catalog: CatalogService::new(config),
            clock,
        }
    }

    pub async fn get_available_slots(
        &self,
        date: NaiveDate,
        service_id: &str,
    ) -> Result<Vec<String>, AppError> {
        debug!("Calculating availability for {} / service {}", date, service_id);

        let service = self.catalog.get_active_service(service_id).await?;

        // Closed on Sundays, no occupancy lookup needed.
        if date.weekday() == Weekday::Sun {
            return Ok(vec![]);
        }

        let occupied = self.get_occupied_intervals(date).await?;
        let now = self.clock.now_utc();

        let slots = walk_free_slots(date, service.duration_minutes, &occupied, now);
        debug!("Found {} free slots on {}", slots.len(), date);

        Ok(slots)
    }

    /// Load the day's blocking appointments joined with their service
    /// duration. Both `pending` and `confirmed` hold their slot; only
    /// cancellation frees it.
    async fn get_occupied_intervals(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<OccupiedInterval>, AppError> {
        let offset = clinic_offset();
        let day_start = date
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_local_timezone(offset)
            .unwrap()
            .with_timezone(&Utc);
        let day_end = day_start + Duration::days(1);

        let path = format!(
            "/rest/v1/appointments?appointment_date=gte.{}&appointment_date=lt.{}&status=in.(pending,confirmed)&select=appointment_date,services(duration_minutes)",
            day_start.to_rfc3339(),
            day_end.to_rfc3339()
        );

        let rows: Vec<OccupiedAppointmentRow> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| {
                warn!("Occupancy lookup failed: {}", e);
                AppError::Unavailable("La agenda no está disponible en este momento.".to_string())
            })?;

        Ok(rows
            .into_iter()
            .map(|row| OccupiedInterval {
                start: row.appointment_date,
                end: row.appointment_date + Duration::minutes(row.services.duration_minutes),
            })
            .collect())
    }
}

/// Walk the day on the half-hour grid and keep every candidate interval
/// `[cursor, cursor + duration)` that fits before closing, respects the
/// same-day lead time, and intersects no occupied interval. Comparisons are
/// on absolute instants; only the returned labels are clinic-local.
fn walk_free_slots(
    date: NaiveDate,
    duration_minutes: i64,
    occupied: &[OccupiedInterval],
    now: DateTime<Utc>,
) -> Vec<String> {
    let weekday = date.weekday();
    if weekday == Weekday::Sun {
        return vec![];
    }

    let opening_hour = if weekday == Weekday::Sat {
        SATURDAY_OPENING_HOUR
    } else {
        WEEKDAY_OPENING_HOUR
    };

    let offset = clinic_offset();
    let to_utc = |hour: u32| {
        date.and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_local_timezone(offset)
            .unwrap()
            .with_timezone(&Utc)
    };

    let closing = to_utc(CLOSING_HOUR);
    let min_start = now + Duration::minutes(MIN_LEAD_TIME_MINUTES);
    let is_today = date == now.with_timezone(&offset).date_naive();

    let mut slots = Vec::new();
    let mut cursor = to_utc(opening_hour);

    while cursor < closing {
        let candidate_end = cursor + Duration::minutes(duration_minutes);

        // Every later cursor only ends later, so the walk stops here.
        if candidate_end > closing {
            break;
        }

        // Later slots of the same day may still clear the lead time.
        if is_today && cursor < min_start {
            cursor += Duration::minutes(SLOT_INTERVAL_MINUTES);
            continue;
        }

        // Half-open intersection: touching endpoints do not collide.
        let collides = occupied
            .iter()
            .any(|o| cursor < o.end && candidate_end > o.start);

        if !collides {
            slots.push(cursor.with_timezone(&offset).format("%H:%M").to_string());
        }

        cursor += Duration::minutes(SLOT_INTERVAL_MINUTES);
    }

    slots
}
