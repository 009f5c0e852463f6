use crate::{
    config::{ClientEnv, ConfigError},
    error::RemoteError,
    service::PostService,
};
use async_trait::async_trait;
use flutter_common::model::request::{DeletePost, ToggleLike, UpdatePostBody};
use reqwest::{Client, Method};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const POST_PATH: &str = "api/flutter";
pub const LIKE_PATH: &str = "api/flutter/like";

/// [`PostService`] talking JSON to the flutter API.
#[derive(Clone, Debug)]
pub struct HttpPostService {
    client: Client,
    base_url: Url,
    post_url: Url,
    like_url: Url,
}

impl HttpPostService {
    /// Endpoints are resolved below `base_url`, which is treated as a directory.
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, ConfigError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let post_url = base_url.join(POST_PATH)?;
        let like_url = base_url.join(LIKE_PATH)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            post_url,
            like_url,
        })
    }

    pub fn from_config(env: &ClientEnv) -> Result<Self, ConfigError> {
        Self::new(env.api_base_url.clone(), env.request_timeout())
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        url: &Url,
        payload: &T,
    ) -> Result<(), RemoteError> {
        debug!(%method, %url, "Calling post service");

        let response = self
            .client
            .request(method, url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|err| RemoteError::Network(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, %status, "Could not read rejection body");
                format!("unreadable response body: {err}")
            }
        };
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait(?Send)]
impl PostService for HttpPostService {
    async fn update_body(&self, request: &UpdatePostBody) -> Result<(), RemoteError> {
        self.send(Method::PUT, &self.post_url, request).await
    }

    async fn toggle_like(&self, request: &ToggleLike) -> Result<(), RemoteError> {
        self.send(Method::PUT, &self.like_url, request).await
    }

    async fn delete_post(&self, request: &DeletePost) -> Result<(), RemoteError> {
        self.send(Method::DELETE, &self.post_url, request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::ClientEnv, http::HttpPostService};
    use std::time::Duration;
    use url::Url;

    #[test]
    fn endpoints_live_below_base_url() {
        let service = HttpPostService::new(
            Url::parse("http://localhost:3000/prefix").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(service.base_url().as_str(), "http://localhost:3000/prefix/");
        assert_eq!(
            service.post_url.as_str(),
            "http://localhost:3000/prefix/api/flutter"
        );
        assert_eq!(
            service.like_url.as_str(),
            "http://localhost:3000/prefix/api/flutter/like"
        );
    }

    #[test]
    fn built_from_config() {
        let env = ClientEnv::from_vars([(
            "FLUTTER_API_BASE_URL".to_owned(),
            "http://127.0.0.1:8080".to_owned(),
        )])
        .unwrap();

        let service = HttpPostService::from_config(&env).unwrap();

        assert_eq!(service.base_url().as_str(), "http://127.0.0.1:8080/");
        assert_eq!(
            service.post_url.as_str(),
            "http://127.0.0.1:8080/api/flutter"
        );
    }
}
