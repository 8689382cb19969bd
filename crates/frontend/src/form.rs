use common::{hours_to_seconds, CredentialsRequest, ExtendRequest, ReserveRequest};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Invalid reservation time.")]
    InvalidReservationTime,
}

/// The reservation form as the page posts it (`application/x-www-form-urlencoded`).
///
/// Checked GPUs arrive as repeated `gpus` keys; `privileged` is present only when ticked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionForm {
    pub username: String,
    pub password: String,
    pub reserved_time: Option<String>,
    pub privileged: bool,
    pub gpus: Vec<String>,
}

impl ActionForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = ActionForm::default();
        for (key, value) in pairs {
            match key.as_str() {
                "username" => form.username = value,
                "password" => form.password = value,
                "reserved_time" => form.reserved_time = Some(value),
                "privileged" => form.privileged = true,
                "gpus" => form.gpus.push(value),
                _ => {}
            }
        }
        form
    }

    /// `reserved_time` is entered in hours; the backend wants seconds.
    pub fn reservation_seconds(&self) -> Result<f64, FormError> {
        let hours: f64 = self
            .reserved_time
            .as_deref()
            .map(str::trim)
            .and_then(|raw| raw.parse().ok())
            .ok_or(FormError::InvalidReservationTime)?;
        if !hours.is_finite() || hours < 0.0 {
            return Err(FormError::InvalidReservationTime);
        }
        Ok(hours_to_seconds(hours))
    }

    pub fn credentials(&self) -> CredentialsRequest {
        CredentialsRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn reserve_request(&self) -> Result<ReserveRequest, FormError> {
        Ok(ReserveRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            gpus: self.gpus.clone(),
            reservation_time: self.reservation_seconds()?,
            privileged: self.privileged,
        })
    }

    pub fn extend_request(&self) -> Result<ExtendRequest, FormError> {
        Ok(ExtendRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            reservation_time: self.reservation_seconds()?,
        })
    }
}
