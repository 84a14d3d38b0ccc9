use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{HttpClient, HttpRequest, HttpResponse};
use crate::error::{OpenAiError, Result};

/// 记录请求的内存客户端
///
/// 按入队顺序回放响应；队列为空时返回 `Transport` 错误。
#[derive(Debug, Default)]
pub struct MockHttpClient {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push_response(status, body);
        self
    }

    pub fn with_json(self, status: u16, body: Value) -> Self {
        self.push_response(status, body.to_string());
        self
    }

    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        let mut response = http::Response::new(body.into());
        *response.status_mut() =
            http::StatusCode::from_u16(status).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
        lock(&self.responses).push_back(response);
    }

    /// 已发送请求的快照（克隆）
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).iter().map(clone_request).collect()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        lock(&self.requests).push(request);
        lock(&self.responses)
            .pop_front()
            .ok_or_else(|| OpenAiError::Transport("no mock response queued".to_string()))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clone_request(request: &HttpRequest) -> HttpRequest {
    let mut builder = http::Request::builder()
        .method(request.method().clone())
        .uri(request.uri().clone())
        .version(request.version());
    if let Some(headers) = builder.headers_mut() {
        *headers = request.headers().clone();
    }
    builder
        .body(request.body().clone())
        .unwrap_or_else(|_| http::Request::new(request.body().clone()))
}
