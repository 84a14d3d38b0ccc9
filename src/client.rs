use std::sync::Arc;

use crate::transport::{HttpTransporter, TransportConfig};

/// OpenAI 客户端
///
/// 只暴露已就绪的传输器，具体资源接口（chat、embeddings 等）由上层基于
/// `transporter()` 实现。克隆共享同一个不可变传输器。
#[derive(Clone, Debug)]
pub struct Client {
    transporter: Arc<HttpTransporter>,
}

impl Client {
    pub fn new(transporter: HttpTransporter) -> Self {
        Self {
            transporter: Arc::new(transporter),
        }
    }

    pub fn transporter(&self) -> &HttpTransporter {
        &self.transporter
    }

    pub fn config(&self) -> &TransportConfig {
        self.transporter.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::Factory;
    use crate::http_client::MockHttpClient;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn client_is_shareable_across_threads() {
        assert_send_sync::<Client>();
    }

    #[test]
    fn clones_share_the_same_transporter() {
        let client = Factory::new()
            .with_http_client(MockHttpClient::new())
            .make()
            .unwrap();
        let clone = client.clone();
        assert!(std::ptr::eq(client.transporter(), clone.transporter()));
    }
}
