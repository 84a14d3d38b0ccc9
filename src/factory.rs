use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::client::Client;
use crate::config::EnvConfig;
use crate::error::{OpenAiError, Result};
use crate::http_client::{DefaultDiscovery, DynHttpClient, HttpClient, HttpClientDiscovery};
use crate::transport::{
    ApiKey, BaseUri, Headers, HttpTransporter, QueryParams, TransportConfig, DEFAULT_BASE_URL,
};

/// OpenAI 客户端工厂
///
/// 所有 `with_*` 方法只记录配置、不做校验，可以任意顺序调用任意次数；
/// 同名请求头/查询参数以最后一次为准。校验与默认值统一在 `make` 中完成。
///
/// ```no_run
/// use openai_factory::Factory;
///
/// let client = Factory::new()
///     .with_api_key("sk-...")
///     .with_organization("org-123")
///     .with_http_header("OpenAI-Beta", "assistants=v2")
///     .make()?;
/// # Ok::<(), openai_factory::OpenAiError>(())
/// ```
#[derive(Clone)]
pub struct Factory {
    api_key: Option<String>,
    organization: Option<String>,
    http_client: Option<DynHttpClient>,
    discovery: Arc<dyn HttpClientDiscovery>,
    // discovery 找到的客户端，克隆出的工厂共享同一份
    discovered: Arc<OnceLock<DynHttpClient>>,
    base_url: Option<String>,
    headers: BTreeMap<String, String>,
    query_params: BTreeMap<String, String>,
}

impl Factory {
    pub fn new() -> Self {
        Self {
            api_key: None,
            organization: None,
            http_client: None,
            discovery: Arc::new(DefaultDiscovery),
            discovered: Arc::new(OnceLock::new()),
            base_url: None,
            headers: BTreeMap::new(),
            query_params: BTreeMap::new(),
        }
    }

    /// 从进程环境变量初始化（`OPENAI_API_KEY`、`OPENAI_ORGANIZATION`、`OPENAI_BASE_URL`）
    pub fn from_env() -> Self {
        Self::from_lookup(EnvConfig::get_env_optional)
    }

    /// 用自定义查找函数初始化；空值视为未设置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut factory = Self::new();
        if let Some(api_key) = get(EnvConfig::API_KEY) {
            factory = factory.with_api_key(api_key);
        }
        if let Some(organization) = get(EnvConfig::ORGANIZATION) {
            factory = factory.with_organization(organization);
        }
        if let Some(base_url) = get(EnvConfig::BASE_URL) {
            factory = factory.with_base_url(base_url);
        }
        factory
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn clear_organization(mut self) -> Self {
        self.organization = None;
        self
    }

    /// 注入 HTTP 客户端；未注入时由 discovery 查找默认实现
    pub fn with_http_client<C>(self, client: C) -> Self
    where
        C: HttpClient + 'static,
    {
        self.with_shared_http_client(Arc::new(client))
    }

    pub fn with_shared_http_client(mut self, client: DynHttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_discovery<D>(mut self, discovery: D) -> Self
    where
        D: HttpClientDiscovery + 'static,
    {
        self.discovery = Arc::new(discovery);
        self.discovered = Arc::new(OnceLock::new());
        self
    }

    /// 未设置时使用 `api.openai.com/v1`
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_http_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// 解析配置并创建客户端
    ///
    /// 不发起任何网络请求。可以重复调用，每次都会得到独立的 `Client`；
    /// 未注入客户端时，首次成功 discovery 的结果会被缓存并在之后复用。
    pub fn make(&self) -> Result<Client> {
        let headers = self.resolve_headers()?;
        let base_uri = self.resolve_base_uri()?;
        let query_params = self.resolve_query_params();
        let client = self.resolve_http_client()?;

        tracing::debug!(
            base_uri = %base_uri,
            headers = headers.len(),
            query_params = query_params.len(),
            has_api_key = self.api_key.is_some(),
            has_organization = self.organization.is_some(),
            "assembled OpenAI transport config"
        );

        let config = TransportConfig::new(client, base_uri, headers, query_params);
        Ok(Client::new(HttpTransporter::from_config(config)))
    }

    fn resolve_headers(&self) -> Result<Headers> {
        let mut headers = Headers::create();

        if let Some(api_key) = &self.api_key {
            headers = headers.with_authorization(&ApiKey::parse(api_key.as_str())?);
        }

        if let Some(organization) = &self.organization {
            headers = headers.with_organization(organization.as_str());
        }

        for (name, value) in &self.headers {
            headers = headers.with_custom_header(name.as_str(), value.as_str());
        }

        // 提前校验，避免到发送请求时才失败
        headers.to_header_map()?;
        Ok(headers)
    }

    fn resolve_base_uri(&self) -> Result<BaseUri> {
        let raw = self
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        BaseUri::parse(raw)
    }

    fn resolve_query_params(&self) -> QueryParams {
        self.query_params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }

    fn resolve_http_client(&self) -> Result<DynHttpClient> {
        if let Some(client) = &self.http_client {
            return Ok(Arc::clone(client));
        }
        if let Some(client) = self.discovered.get() {
            return Ok(Arc::clone(client));
        }
        let found = self.discovery.find().ok_or(OpenAiError::NoHttpClientAvailable)?;
        Ok(Arc::clone(self.discovered.get_or_init(|| found)))
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("organization", &self.organization)
            .field("http_client", &self.http_client.is_some())
            .field("discovered", &self.discovered.get().is_some())
            .field("base_url", &self.base_url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("query_params", &self.query_params)
            .finish()
    }
}
