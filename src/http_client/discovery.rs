use super::DynHttpClient;

/// 默认 HTTP 客户端的查找能力
///
/// `Factory::make` 在调用方没有注入客户端时调用 `find`，返回 `None`
/// 时构造失败并返回 `NoHttpClientAvailable`。
pub trait HttpClientDiscovery: Send + Sync {
    fn find(&self) -> Option<DynHttpClient>;
}

impl<F> HttpClientDiscovery for F
where
    F: Fn() -> Option<DynHttpClient> + Send + Sync,
{
    fn find(&self) -> Option<DynHttpClient> {
        self()
    }
}

/// 按编译特性查找内置实现
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDiscovery;

impl HttpClientDiscovery for DefaultDiscovery {
    #[cfg(feature = "reqwest-client")]
    fn find(&self) -> Option<DynHttpClient> {
        match super::ReqwestHttpClient::try_default() {
            Ok(client) => {
                tracing::debug!("discovered reqwest HTTP client");
                Some(std::sync::Arc::new(client))
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to build default reqwest client");
                None
            }
        }
    }

    #[cfg(not(feature = "reqwest-client"))]
    fn find(&self) -> Option<DynHttpClient> {
        tracing::debug!("no built-in HTTP client compiled in");
        None
    }
}

/// 从不返回客户端，强制调用方显式注入
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiscovery;

impl HttpClientDiscovery for NoDiscovery {
    fn find(&self) -> Option<DynHttpClient> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http_client::MockHttpClient;

    #[test]
    fn no_discovery_finds_nothing() {
        assert!(NoDiscovery.find().is_none());
    }

    #[test]
    fn closures_act_as_discovery() {
        let discovery = || Some(Arc::new(MockHttpClient::new()) as DynHttpClient);
        assert!(discovery.find().is_some());
    }

    #[cfg(feature = "reqwest-client")]
    #[test]
    fn default_discovery_finds_reqwest() {
        assert!(DefaultDiscovery.find().is_some());
    }
}
