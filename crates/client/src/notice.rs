//! Status lines shown after each action.

use chrono::Local;
use common::{GpuSlot, MessageResponse, ReserveResponse, UserStatusResponse};

use crate::error::ApiError;

pub const DEFAULT_SSH_HOST: &str = "143.248.39.4";
pub const WAITING: &str = "Waiting for response...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
    /// Request in flight. Drawn like a failure until the answer arrives.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Failure,
            text: text.into(),
        }
    }

    pub fn pending() -> Self {
        Self {
            tone: Tone::Pending,
            text: WAITING.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.tone == Tone::Failure
    }
}

pub fn ssh_hint(ssh_host: &str, port: u16) -> String {
    format!("Login with [ssh root@{ssh_host} -p {port}] and use your password to login.")
}

/// A rejected call shows the server's message; anything else is a failed round trip.
pub fn error_notice(err: &ApiError) -> Notice {
    match err {
        ApiError::Rejected { message, .. } => Notice::failure(message.clone()),
        other => Notice::failure(format!("AJAX Failed: {other}")),
    }
}

fn outcome<T>(result: Result<T, ApiError>, on_ok: impl FnOnce(T) -> Vec<Notice>) -> Vec<Notice> {
    match result {
        Ok(body) => on_ok(body),
        Err(err) => vec![error_notice(&err)],
    }
}

pub fn reserve_notices(result: Result<ReserveResponse, ApiError>, ssh_host: &str) -> Vec<Notice> {
    outcome(result, |resp| {
        vec![
            Notice::success(resp.message),
            Notice::success(ssh_hint(ssh_host, resp.port)),
        ]
    })
}

pub fn release_notices(result: Result<MessageResponse, ApiError>) -> Vec<Notice> {
    outcome(result, |resp| {
        vec![
            Notice::success(resp.message),
            Notice::success("Successfully released."),
        ]
    })
}

pub fn extend_notices(result: Result<MessageResponse, ApiError>) -> Vec<Notice> {
    outcome(result, |resp| {
        vec![
            Notice::success(resp.message),
            Notice::success("Successfully extended."),
        ]
    })
}

/// First matching state wins: running, created, imaged, nothing.
pub fn check_notices(result: Result<UserStatusResponse, ApiError>, ssh_host: &str) -> Vec<Notice> {
    outcome(result, |resp| {
        let notice = if resp.running {
            Notice::success(ssh_hint(ssh_host, resp.port))
        } else if resp.created {
            Notice::success("Container is not running but is created.")
        } else if resp.imaged {
            Notice::success("Container is not created but image is persisted.")
        } else {
            Notice::failure("No container information exists.")
        };
        vec![notice]
    })
}

/// `gpu0` or `gpu0 (Reserved by alice until 2026-10-14 18:00:00)`, in local time.
pub fn slot_label(slot: &GpuSlot) -> String {
    match &slot.reservation {
        Some(r) => format!(
            "{} (Reserved by {} until {})",
            slot.id,
            r.user,
            r.until.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => slot.id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use common::Reservation;
    use reqwest::StatusCode;

    fn rejected(message: &str) -> ApiError {
        ApiError::Rejected {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }

    #[test]
    fn reserve_success_gives_port_hint() {
        let notices = reserve_notices(
            Ok(ReserveResponse {
                message: "Successfully launched.".to_string(),
                port: 10003,
            }),
            "10.0.0.5",
        );
        assert_eq!(
            notices,
            vec![
                Notice::success("Successfully launched."),
                Notice::success("Login with [ssh root@10.0.0.5 -p 10003] and use your password to login."),
            ]
        );
    }

    #[test]
    fn rejection_shows_server_message_only() {
        let notices = extend_notices(Err(rejected("No running container found.")));
        assert_eq!(notices, vec![Notice::failure("No running container found.")]);
    }

    #[test]
    fn decode_failure_is_ajax_failure() {
        let err = serde_json::from_str::<MessageResponse>("nope").unwrap_err();
        let notices = release_notices(Err(ApiError::from(err)));
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_failure());
        assert!(notices[0].text.starts_with("AJAX Failed: "));
    }

    #[test]
    fn release_and_extend_append_confirmation() {
        let ok = || {
            Ok(MessageResponse {
                message: "Released container.".to_string(),
            })
        };
        assert_eq!(release_notices(ok())[1].text, "Successfully released.");
        assert_eq!(extend_notices(ok())[1].text, "Successfully extended.");
    }

    fn user_status(running: bool, created: bool, imaged: bool) -> UserStatusResponse {
        UserStatusResponse {
            message: "OK".to_string(),
            created,
            running,
            imaged,
            port: 10007,
        }
    }

    #[test]
    fn check_prefers_running_over_everything() {
        let notices = check_notices(Ok(user_status(true, true, true)), DEFAULT_SSH_HOST);
        assert_eq!(
            notices,
            vec![Notice::success(ssh_hint(DEFAULT_SSH_HOST, 10007))]
        );
    }

    #[test]
    fn check_falls_through_states() {
        let created = check_notices(Ok(user_status(false, true, true)), DEFAULT_SSH_HOST);
        assert_eq!(created[0].text, "Container is not running but is created.");

        let imaged = check_notices(Ok(user_status(false, false, true)), DEFAULT_SSH_HOST);
        assert_eq!(imaged[0].text, "Container is not created but image is persisted.");

        let nothing = check_notices(Ok(user_status(false, false, false)), DEFAULT_SSH_HOST);
        assert_eq!(nothing, vec![Notice::failure("No container information exists.")]);
    }

    #[test]
    fn labels() {
        let free = GpuSlot {
            id: "gpu0".to_string(),
            reservation: None,
        };
        assert_eq!(slot_label(&free), "gpu0");

        let taken = GpuSlot {
            id: "gpu1".to_string(),
            reservation: Some(Reservation {
                user: "alice".to_string(),
                until: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            }),
        };
        assert!(slot_label(&taken).starts_with("gpu1 (Reserved by alice until "));
        assert!(slot_label(&taken).ends_with(')'));
    }
}
