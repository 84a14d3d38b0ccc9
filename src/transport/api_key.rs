use std::fmt;

use crate::error::{OpenAiError, Result};

/// 已校验的 API Key
///
/// 非空、不含控制字符。`Debug` 只输出前缀，避免密钥进入日志。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(OpenAiError::InvalidCredential(
                "API key must not be empty".to_string(),
            ));
        }
        if raw.chars().any(char::is_control) {
            return Err(OpenAiError::InvalidCredential(
                "API key must not contain control characters".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&redact(&self.0)).finish()
    }
}

/// 保留前 3 个字符（如 `sk-`），其余替换为 `***`
pub(crate) fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(3).collect();
    format!("{prefix}***")
}
