use common::{
    CredentialsRequest, ExtendRequest, MessageResponse, ReserveRequest, ReserveResponse,
    StatusResponse, UserStatusResponse,
};
use reqwest::header::CACHE_CONTROL;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;

pub const RESERVE_PATH: &str = "api/reserve";
pub const RELEASE_PATH: &str = "api/release";
pub const EXTEND_PATH: &str = "api/extend";
pub const USER_STATUS_PATH: &str = "api/userstatus";
pub const STATUS_PATH: &str = "api/status";

const NO_CACHE: &str = "no-cache, no-store, max-age=0";

/// One request per call. No retries, no timeout beyond what the transport imposes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(Client::new(), base_url)
    }

    fn with_client(http: Client, base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }
        // Endpoints are joined relative to the base, which needs a trailing slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base })
    }

    pub async fn reserve(&self, req: &ReserveRequest) -> Result<ReserveResponse, ApiError> {
        self.post(RESERVE_PATH, req).await
    }

    pub async fn release(&self, req: &CredentialsRequest) -> Result<MessageResponse, ApiError> {
        self.post(RELEASE_PATH, req).await
    }

    pub async fn extend(&self, req: &ExtendRequest) -> Result<MessageResponse, ApiError> {
        self.post(EXTEND_PATH, req).await
    }

    pub async fn user_status(
        &self,
        req: &CredentialsRequest,
    ) -> Result<UserStatusResponse, ApiError> {
        self.post(USER_STATUS_PATH, req).await
    }

    pub async fn status(&self) -> Result<StatusResponse, ApiError> {
        let url = self.endpoint(STATUS_PATH)?;
        debug!(%url, "GET");
        let resp = self
            .http
            .get(url)
            .header(CACHE_CONTROL, NO_CACHE)
            .send()
            .await?;
        Self::decode(resp).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(|e| ApiError::InvalidBaseUrl {
            url: self.base.to_string(),
            reason: e.to_string(),
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        let resp = self.http.post(url).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn decode<R: DeserializeOwned>(resp: Response) -> Result<R, ApiError> {
        let status = resp.status();
        let url = resp.url().clone();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let err = ApiError::rejected(status, &bytes);
            warn!(%url, %status, error = %err, "backend rejected request");
            return Err(err);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_without_trailing_slash_keeps_prefix() {
        let client = ApiClient::new("http://gpu.example:3001/rent").unwrap();
        assert_eq!(
            client.endpoint(RESERVE_PATH).unwrap().as_str(),
            "http://gpu.example:3001/rent/api/reserve"
        );
    }

    #[test]
    fn bare_host() {
        let client = ApiClient::new("http://127.0.0.1:3001").unwrap();
        assert_eq!(
            client.endpoint(STATUS_PATH).unwrap().as_str(),
            "http://127.0.0.1:3001/api/status"
        );
    }

    #[test]
    fn rejects_garbage_base() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiClient::new("mailto:ops@example.com"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }
}
