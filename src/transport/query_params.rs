use std::collections::BTreeMap;

use crate::error::{OpenAiError, Result};

/// 追加到每个请求 URL 上的查询参数，按名称排序
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> Result<String> {
        serde_urlencoded::to_string(&self.params)
            .map_err(|e| OpenAiError::Other(anyhow::anyhow!("failed to encode query params: {e}")))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::create(), |params, (k, v)| params.with_param(k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_by_default() {
        let params = QueryParams::create();
        assert!(params.is_empty());
        assert_eq!(params.to_query_string().unwrap(), "");
    }

    #[test]
    fn encodes_sorted_and_escaped() {
        let params = QueryParams::create()
            .with_param("b", "two words")
            .with_param("api-version", "2024-02-01");
        assert_eq!(
            params.to_query_string().unwrap(),
            "api-version=2024-02-01&b=two+words"
        );
    }
}
