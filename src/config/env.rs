use crate::error::{OpenAiError, Result};
use anyhow::anyhow;
use std::env;

/// 环境变量配置管理
pub struct EnvConfig;

impl EnvConfig {
    pub const API_KEY: &'static str = "OPENAI_API_KEY";
    pub const ORGANIZATION: &'static str = "OPENAI_ORGANIZATION";
    pub const BASE_URL: &'static str = "OPENAI_BASE_URL";
    pub const DEBUG: &'static str = "OPENAI_FACTORY_DEBUG";

    /// 解析配置值
    ///
    /// 优先级：
    /// 1. `${VAR_NAME}` 格式时读取对应环境变量
    /// 2. 空字符串时读取 `default_env_var`
    /// 3. 否则原样返回
    pub fn resolve(value: &str, default_env_var: &str) -> Result<String> {
        if let Some(name) = value.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
            Self::get_env(name)
        } else if value.is_empty() {
            Self::get_env(default_env_var)
        } else {
            Ok(value.to_string())
        }
    }

    /// 从环境变量获取值
    pub fn get_env(key: &str) -> Result<String> {
        env::var(key).map_err(|_| {
            OpenAiError::Other(anyhow!("environment variable `{}` is not set", key))
        })
    }

    /// 获取可选的环境变量
    pub fn get_env_optional(key: &str) -> Option<String> {
        env::var(key).ok()
    }

    /// 检查是否启用调试模式
    pub fn is_debug_mode() -> bool {
        env::var(Self::DEBUG).is_ok()
    }
}
