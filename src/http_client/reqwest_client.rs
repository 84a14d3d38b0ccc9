use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use super::{HttpClient, HttpRequest, HttpResponse};
use crate::error::{OpenAiError, Result};

#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// 连接池和连接超时采用保守默认值；不设置整体请求超时，长响应由调用方控制
    pub fn try_default() -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| OpenAiError::Transport(format!("failed to build reqwest client: {e}")))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

impl From<reqwest::Client> for ReqwestHttpClient {
    fn from(client: reqwest::Client) -> Self {
        Self::from_client(client)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[instrument(skip_all, fields(method = %request.method(), uri = %request.uri()))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let request = reqwest::Request::try_from(request)
            .map_err(|e| OpenAiError::Transport(format!("invalid request: {e}")))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| OpenAiError::Transport(e.to_string()))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| OpenAiError::Transport(format!("failed to read response body: {e}")))?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");

        let mut out = http::Response::new(body.to_vec());
        *out.status_mut() = status;
        *out.headers_mut() = headers;
        Ok(out)
    }
}
