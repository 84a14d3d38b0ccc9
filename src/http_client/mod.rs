//! HTTP 客户端抽象
//!
//! 核心组件：
//! - `HttpClient`: 发送一个 HTTP 请求并返回响应的能力，可由调用方注入
//! - `HttpClientDiscovery`: 未注入客户端时查找默认实现
//! - `ReqwestHttpClient`: 基于 reqwest 的默认实现（`reqwest-client` 特性）
//! - `MockHttpClient`: 记录请求、回放预设响应，用于测试

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub mod discovery;
pub mod mock;
#[cfg(feature = "reqwest-client")]
pub mod reqwest_client;

pub use discovery::{DefaultDiscovery, HttpClientDiscovery, NoDiscovery};
pub use mock::MockHttpClient;
#[cfg(feature = "reqwest-client")]
pub use reqwest_client::ReqwestHttpClient;

pub type HttpRequest = http::Request<Vec<u8>>;
pub type HttpResponse = http::Response<Vec<u8>>;

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

pub type DynHttpClient = Arc<dyn HttpClient>;

#[async_trait]
impl<T> HttpClient for Arc<T>
where
    T: HttpClient + ?Sized,
{
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request).await
    }
}
