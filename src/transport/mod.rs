//! 传输层值对象与请求传输器
//!
//! `Factory::make` 在构造阶段一次性解析出这些值；之后均不可变。

pub mod api_key;
pub mod base_uri;
pub mod config;
pub mod headers;
pub mod payload;
pub mod query_params;
pub mod transporter;

pub use api_key::ApiKey;
pub use base_uri::{BaseUri, DEFAULT_BASE_URL};
pub use config::TransportConfig;
pub use headers::{
    Headers, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HEADER_ORGANIZATION,
};
pub use payload::Payload;
pub use query_params::QueryParams;
pub use transporter::HttpTransporter;
