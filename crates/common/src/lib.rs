use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seconds per hour; the form collects hours while the backend expects seconds.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

pub fn hours_to_seconds(hours: f64) -> f64 {
    hours * SECONDS_PER_HOUR
}

/// Body of `POST /api/reserve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "GPUs")]
    pub gpus: Vec<String>,
    /// Reservation length in seconds.
    pub reservation_time: f64,
    pub privileged: bool,
}

/// Body of `POST /api/release` and `POST /api/userstatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/extend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendRequest {
    pub username: String,
    pub password: String,
    pub reservation_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub message: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatusResponse {
    pub message: String,
    pub created: bool,
    pub running: bool,
    pub imaged: bool,
    pub port: u16,
}

/// Body of `GET /api/status`. Other top-level keys the backend sends are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub gpu_status: BTreeMap<String, GpuStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuStatus {
    pub user: String,
    /// Unix timestamp (seconds, fractional) until which the GPU is claimed.
    pub invalid_until: f64,
}

impl GpuStatus {
    pub fn is_reserved_at(&self, now: f64) -> bool {
        self.invalid_until > now
    }

    /// Expiry as a timestamp, saturating at the representable range.
    pub fn reserved_until(&self) -> DateTime<Utc> {
        let millis = (self.invalid_until * 1000.0) as i64;
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
    }
}

/// Who holds a GPU and until when.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub user: String,
    pub until: DateTime<Utc>,
}

/// One row of the GPU list as seen at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuSlot {
    pub id: String,
    pub reservation: Option<Reservation>,
}

impl GpuSlot {
    pub fn is_available(&self) -> bool {
        self.reservation.is_none()
    }
}

impl StatusResponse {
    /// GPU rows ordered by id. A GPU counts as reserved only while `invalid_until > now`.
    pub fn slots(&self, now: f64) -> Vec<GpuSlot> {
        self.gpu_status
            .iter()
            .map(|(id, status)| GpuSlot {
                id: id.clone(),
                reservation: status.is_reserved_at(now).then(|| Reservation {
                    user: status.user.clone(),
                    until: status.reserved_until(),
                }),
            })
            .collect()
    }
}

/// Current wall clock as fractional unix seconds, the unit `invalid_until` uses.
pub fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
