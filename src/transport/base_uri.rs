use std::fmt;

use url::Url;

use crate::error::{OpenAiError, Result};

pub const DEFAULT_BASE_URL: &str = "api.openai.com/v1";

/// 已解析的 API 根地址
///
/// 没有协议前缀时补 `https://`；只接受 http/https。规范形式不带结尾斜杠。
#[derive(Clone, Debug)]
pub struct BaseUri {
    url: Url,
    rendered: String,
}

impl BaseUri {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OpenAiError::invalid_base_uri(raw, "base URL is empty"));
        }

        // scheme 不区分大小写，`Url::parse` 会统一转成小写
        let candidate = match trimmed.split_once("://") {
            Some((scheme, _))
                if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
            {
                trimmed.to_string()
            }
            Some((scheme, _)) => {
                return Err(OpenAiError::invalid_base_uri(
                    raw,
                    format!("unsupported scheme `{scheme}`"),
                ));
            }
            None => format!("https://{trimmed}"),
        };

        let url = Url::parse(&candidate).map_err(|e| OpenAiError::invalid_base_uri(raw, e.to_string()))?;
        match url.host_str() {
            Some(host) if !host.is_empty() => {}
            _ => return Err(OpenAiError::invalid_base_uri(raw, "missing host")),
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(OpenAiError::invalid_base_uri(
                raw,
                "query and fragment are not allowed; use `with_query_param`",
            ));
        }

        let rendered = url.as_str().trim_end_matches('/').to_string();
        Ok(Self { url, rendered })
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// 拼接资源路径，例如 `models` -> `https://api.openai.com/v1/models`
    pub fn join(&self, resource: &str) -> String {
        let resource = resource.trim_start_matches('/');
        if resource.is_empty() {
            self.rendered.clone()
        } else {
            format!("{}/{}", self.rendered, resource)
        }
    }
}

impl PartialEq for BaseUri {
    fn eq(&self, other: &Self) -> bool {
        self.rendered == other.rendered
    }
}

impl Eq for BaseUri {}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
