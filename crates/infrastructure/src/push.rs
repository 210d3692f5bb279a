//! Expo推送网关客户端

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use hmms_core::{
    models::PushMessage, traits::PushGateway, MaintenanceError, MaintenanceResult, PushConfig,
};

/// Expo推送网关HTTP客户端
///
/// 将消息批量POST到推送网关。`enabled = false` 时所有token都视为无效，
/// 调用方因此不会发起任何推送请求。
pub struct ExpoPushClient {
    gateway_url: String,
    enabled: bool,
    http_client: reqwest::Client,
}

impl ExpoPushClient {
    pub fn new(config: &PushConfig) -> MaintenanceResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| MaintenanceError::PushGateway(format!("创建HTTP客户端失败: {e}")))?;

        Ok(Self {
            gateway_url: config.gateway_url.clone(),
            enabled: config.enabled,
            http_client,
        })
    }
}

#[async_trait]
impl PushGateway for ExpoPushClient {
    fn is_valid_token(&self, token: &str) -> bool {
        if !self.enabled {
            return false;
        }
        (token.starts_with("ExponentPushToken[") || token.starts_with("ExpoPushToken["))
            && token.ends_with(']')
    }

    async fn send_batch(&self, messages: &[PushMessage]) -> MaintenanceResult<()> {
        if messages.is_empty() {
            return Ok(());
        }

        let response = self
            .http_client
            .post(&self.gateway_url)
            .json(messages)
            .send()
            .await
            .map_err(|e| MaintenanceError::PushGateway(format!("连接推送网关失败: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MaintenanceError::PushGateway(format!(
                "推送网关返回错误: HTTP {status} - {body}"
            )));
        }

        debug!("已向推送网关提交 {} 条推送消息", messages.len());
        Ok(())
    }
}
