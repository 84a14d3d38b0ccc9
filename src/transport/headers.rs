use http::header::{HeaderMap, HeaderName, HeaderValue};

use super::api_key::{redact, ApiKey};
use crate::error::{OpenAiError, Result};

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_ORGANIZATION: &str = "OpenAI-Organization";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 请求头集合
///
/// 名称按 ASCII 大小写不敏感去重，后写入者覆盖先写入者，保留首次插入的位置。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// 只包含 `Content-Type: application/json`
    pub fn create() -> Self {
        Self {
            entries: vec![(HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string())],
        }
    }

    pub fn with_authorization(self, api_key: &ApiKey) -> Self {
        self.upsert(HEADER_AUTHORIZATION, api_key.bearer())
    }

    pub fn with_organization(self, organization: impl Into<String>) -> Self {
        self.upsert(HEADER_ORGANIZATION, organization.into())
    }

    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        self.upsert(HEADER_CONTENT_TYPE, content_type.into())
    }

    pub fn with_custom_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.upsert(&name.into(), value.into())
    }

    fn upsert(mut self, name: &str, value: String) -> Self {
        let name = name.trim();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => *entry = (name.to_string(), value),
            None => self.entries.push((name.to_string(), value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 校验并转换为 `http::HeaderMap`
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            let header_name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|e| OpenAiError::invalid_header(name, e))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| OpenAiError::invalid_header(name, e))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    /// 用于日志和 CLI 输出，`Authorization` 只保留前缀
    pub fn redacted(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(HEADER_AUTHORIZATION) {
                    let shown = match value.strip_prefix("Bearer ") {
                        Some(token) => format!("Bearer {}", redact(token)),
                        None => redact(value),
                    };
                    (name.clone(), shown)
                } else {
                    (name.clone(), value.clone())
                }
            })
            .collect()
    }
}

impl Default for Headers {
    fn default() -> Self {
        Self::create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_has_json_content_type() {
        let headers = Headers::create();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("content-type"), Some(CONTENT_TYPE_JSON));
    }

    #[test]
    fn custom_header_overrides_case_insensitively() {
        let key = ApiKey::parse("sk-1").unwrap();
        let headers = Headers::create()
            .with_authorization(&key)
            .with_custom_header("authorization", "custom");
        assert_eq!(headers.get(HEADER_AUTHORIZATION), Some("custom"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn surrounding_whitespace_in_names_is_ignored() {
        let headers = Headers::create()
            .with_custom_header("X-A ", "1")
            .with_custom_header("X-A", "2");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("X-A"), Some("2"));
        assert_eq!(headers.to_header_map().unwrap()["x-a"], "2");
    }

    #[test]
    fn header_map_rejects_invalid_names() {
        let headers = Headers::create().with_custom_header("bad header", "x");
        assert!(matches!(
            headers.to_header_map(),
            Err(OpenAiError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn header_map_rejects_invalid_values() {
        let headers = Headers::create().with_custom_header("X-Trace", "a\nb");
        assert!(headers.to_header_map().is_err());
    }

    #[test]
    fn redacted_hides_bearer_token() {
        let key = ApiKey::parse("sk-secret-value").unwrap();
        let headers = Headers::create().with_authorization(&key);
        let redacted = headers.redacted();
        let (_, auth) = redacted
            .iter()
            .find(|(name, _)| name == HEADER_AUTHORIZATION)
            .unwrap();
        assert_eq!(auth, "Bearer sk-***");
    }
}
