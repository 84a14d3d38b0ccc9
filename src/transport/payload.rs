use http::Method;
use serde_json::{Map, Value};

/// 单次请求的描述：方法、资源路径、JSON 参数
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    pub method: Method,
    pub resource: String,
    pub parameters: Map<String, Value>,
}

impl Payload {
    pub fn list(resource: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            resource: resource.into(),
            parameters: Map::new(),
        }
    }

    pub fn retrieve(resource: impl AsRef<str>, id: impl AsRef<str>) -> Self {
        Self::list(format!("{}/{}", resource.as_ref(), id.as_ref()))
    }

    /// `parameters` 不是 JSON 对象时按空对象处理
    pub fn create(resource: impl Into<String>, parameters: Value) -> Self {
        let parameters = match parameters {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            method: Method::POST,
            resource: resource.into(),
            parameters,
        }
    }

    pub fn delete(resource: impl AsRef<str>, id: impl AsRef<str>) -> Self {
        Self {
            method: Method::DELETE,
            resource: format!("{}/{}", resource.as_ref(), id.as_ref()),
            parameters: Map::new(),
        }
    }

    pub fn has_body(&self) -> bool {
        self.method == Method::POST
    }
}
