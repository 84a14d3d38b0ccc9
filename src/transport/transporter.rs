use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::{BaseUri, Headers, Payload, QueryParams, TransportConfig};
use crate::error::{OpenAiError, Result};
use crate::http_client::{DynHttpClient, HttpRequest, HttpResponse};

/// 请求传输器
///
/// 用解析好的根地址、请求头和查询参数拼装请求，通过注入的客户端发送。
/// 不做重试，也不处理流式响应。
#[derive(Clone, Debug)]
pub struct HttpTransporter {
    config: TransportConfig,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<Value>,
}

impl HttpTransporter {
    pub fn new(
        client: DynHttpClient,
        base_uri: BaseUri,
        headers: Headers,
        query_params: QueryParams,
    ) -> Self {
        Self::from_config(TransportConfig::new(client, base_uri, headers, query_params))
    }

    pub fn from_config(config: TransportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn build_request(&self, payload: &Payload) -> Result<HttpRequest> {
        let mut uri = self.config.base_uri().join(&payload.resource);
        if !self.config.query_params().is_empty() {
            uri.push('?');
            uri.push_str(&self.config.query_params().to_query_string()?);
        }

        let body = if payload.has_body() {
            serde_json::to_vec(&payload.parameters)?
        } else {
            Vec::new()
        };

        let mut request = http::Request::builder()
            .method(payload.method.clone())
            .uri(uri.as_str())
            .body(body)
            .map_err(|e| {
                OpenAiError::Transport(format!(
                    "invalid request URI for resource `{}`: {e}",
                    payload.resource
                ))
            })?;
        *request.headers_mut() = self.config.headers().to_header_map()?;
        Ok(request)
    }

    #[instrument(skip(self, payload), fields(method = %payload.method, resource = %payload.resource))]
    pub async fn request_object(&self, payload: Payload) -> Result<Value> {
        let response = self.send(&payload).await?;
        let status = response.status().as_u16();
        let body = response.into_body();

        if !(200..300).contains(&status) {
            return Err(api_error(status, &body));
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_slice(&body)?;
        if value.get("error").is_some_and(Value::is_object) {
            return Err(api_error(status, &body));
        }
        Ok(value)
    }

    #[instrument(skip(self, payload), fields(method = %payload.method, resource = %payload.resource))]
    pub async fn request_content(&self, payload: Payload) -> Result<Vec<u8>> {
        let response = self.send(&payload).await?;
        let status = response.status().as_u16();
        let body = response.into_body();

        if !(200..300).contains(&status) || serde_json::from_slice::<ErrorEnvelope>(&body).is_ok() {
            return Err(api_error(status, &body));
        }
        Ok(body)
    }

    async fn send(&self, payload: &Payload) -> Result<HttpResponse> {
        let request = self.build_request(payload)?;
        tracing::debug!(uri = %request.uri(), "sending request");
        self.config.client().send(request).await
    }
}

fn api_error(status: u16, body: &[u8]) -> OpenAiError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = match envelope.error.message {
                Some(Value::String(text)) => text,
                Some(Value::Array(parts)) => parts
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("\n"),
                _ => "unknown error".to_string(),
            };
            let code = match envelope.error.code {
                Some(Value::String(code)) => Some(code),
                Some(Value::Number(code)) => Some(code.to_string()),
                _ => None,
            };
            OpenAiError::Api {
                status,
                message,
                error_type: envelope.error.error_type,
                code,
            }
        }
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            let message = if text.is_empty() {
                http::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                text
            };
            OpenAiError::Api {
                status,
                message,
                error_type: None,
                code: None,
            }
        }
    }
}
