use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};

use super::{BaseUri, Headers, QueryParams};
use crate::http_client::DynHttpClient;

/// 传输配置：客户端句柄、根地址、请求头、查询参数
///
/// 构造后不可变。相等性比较三个值对象以及客户端句柄的同一性。
#[derive(Clone)]
pub struct TransportConfig {
    client: DynHttpClient,
    base_uri: BaseUri,
    headers: Headers,
    query_params: QueryParams,
}

impl TransportConfig {
    pub fn new(
        client: DynHttpClient,
        base_uri: BaseUri,
        headers: Headers,
        query_params: QueryParams,
    ) -> Self {
        Self {
            client,
            base_uri,
            headers,
            query_params,
        }
    }

    pub fn client(&self) -> &DynHttpClient {
        &self.client
    }

    pub fn base_uri(&self) -> &BaseUri {
        &self.base_uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// 配置摘要；`redact` 为 true 时隐藏 Bearer Token
    pub fn describe(&self, redact: bool) -> Value {
        let headers: Vec<Value> = if redact {
            self.headers
                .redacted()
                .into_iter()
                .map(|(name, value)| json!({ "name": name, "value": value }))
                .collect()
        } else {
            self.headers
                .iter()
                .map(|(name, value)| json!({ "name": name, "value": value }))
                .collect()
        };

        json!({
            "base_uri": self.base_uri.as_str(),
            "headers": headers,
            "query_params": self.query_params.as_map(),
        })
    }
}

impl PartialEq for TransportConfig {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.client, &other.client)
            && self.base_uri == other.base_uri
            && self.headers == other.headers
            && self.query_params == other.query_params
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("base_uri", &self.base_uri.as_str())
            .field("headers", &self.headers.redacted())
            .field("query_params", &self.query_params)
            .finish_non_exhaustive()
    }
}
