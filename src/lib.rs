//! OpenAI API 客户端工厂
//!
//! `Factory` 收集 API Key、组织、请求头、查询参数、根地址和 HTTP 客户端，
//! `make` 一次性完成默认值填充与校验，返回不可变的 `Client`。

pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod http_client;
pub mod transport;
pub mod utils;

pub use client::Client;
pub use config::EnvConfig;
pub use error::{OpenAiError, Result};
pub use factory::Factory;
pub use http_client::{
    DefaultDiscovery, DynHttpClient, HttpClient, HttpClientDiscovery, HttpRequest, HttpResponse,
    MockHttpClient, NoDiscovery,
};
#[cfg(feature = "reqwest-client")]
pub use http_client::ReqwestHttpClient;
pub use transport::{
    ApiKey, BaseUri, Headers, HttpTransporter, Payload, QueryParams, TransportConfig,
    DEFAULT_BASE_URL,
};
pub use utils::logging;

/// 新建工厂
pub fn factory() -> Factory {
    Factory::new()
}

/// 用 API Key 直接创建客户端，HTTP 客户端由默认 discovery 提供
pub fn client(api_key: impl Into<String>) -> Result<Client> {
    Factory::new().with_api_key(api_key).make()
}
