//! 请求通道 - 基础设施层
//!
//! 只负责把一次查询发出去，并通过完成句柄交回原始响应正文

use crate::config::Config;
use crate::error::TransportError;
use crate::infrastructure::registry::{ChannelOutcome, Completer};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// 一次图片元数据查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    /// 远端文件名
    pub identifier: String,
    /// 期望的缩略图宽度
    pub thumbnail_width: u32,
}

impl ProbeRequest {
    pub fn new(identifier: impl Into<String>, thumbnail_width: u32) -> Self {
        Self {
            identifier: identifier.into(),
            thumbnail_width,
        }
    }

    /// MediaWiki 页面标题
    pub fn title(&self) -> String {
        format!("File:{}", self.identifier)
    }
}

/// 一次性请求通道
///
/// 职责：
/// - 发出请求
/// - 通过 `Completer` 交回响应正文或传输错误
/// - 不解释响应内容
pub trait RequestChannel: Send + Sync {
    /// 发出请求；返回的 `InFlight` 持有本次请求占用的临时资源
    fn dispatch(&self, request: &ProbeRequest, completer: Completer) -> InFlight;
}

/// 进行中的请求所占用的资源
///
/// 被丢弃时释放（中止尚未结束的后台任务）
#[derive(Debug, Default)]
pub struct InFlight {
    task: Option<JoinHandle<()>>,
}

impl InFlight {
    /// 没有占用任何资源（同步完成的通道）
    pub fn none() -> Self {
        Self { task: None }
    }

    pub fn task(handle: JoinHandle<()>) -> Self {
        Self { task: Some(handle) }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                task.abort();
            }
        }
    }
}

/// 基于 HTTP 的 MediaWiki 查询通道
pub struct HttpChannel {
    client: reqwest::Client,
    api_url: String,
}

impl HttpChannel {
    /// 创建新的 HTTP 通道
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("nss_gallery/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::request_failed(&config.api_url, e))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// 构建查询参数
    pub fn query_params(request: &ProbeRequest) -> Vec<(&'static str, String)> {
        vec![
            ("action", "query".to_string()),
            ("titles", request.title()),
            ("prop", "imageinfo".to_string()),
            ("iiprop", "url".to_string()),
            ("iiurlwidth", request.thumbnail_width.to_string()),
            ("format", "json".to_string()),
        ]
    }
}

impl RequestChannel for HttpChannel {
    fn dispatch(&self, request: &ProbeRequest, completer: Completer) -> InFlight {
        let client = self.client.clone();
        let api_url = self.api_url.clone();
        let params = Self::query_params(request);
        debug!("[令牌 #{}] 发出查询: {}", completer.token(), request.title());

        let handle = tokio::spawn(async move {
            let outcome = fetch(&client, &api_url, &params).await;
            completer.complete(outcome);
        });

        InFlight::task(handle)
    }
}

async fn fetch(
    client: &reqwest::Client,
    api_url: &str,
    params: &[(&'static str, String)],
) -> ChannelOutcome {
    let response = client
        .get(api_url)
        .query(params)
        .send()
        .await
        .map_err(|e| TransportError::request_failed(api_url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::BadStatus {
            endpoint: api_url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| TransportError::request_failed(api_url, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_match_mediawiki_imageinfo() {
        let request = ProbeRequest::new("NSS2025-14009-KGD-KOODE-01.jpg", 300);
        let params = HttpChannel::query_params(&request);

        assert!(params.contains(&("action", "query".to_string())));
        assert!(params.contains(&("titles", "File:NSS2025-14009-KGD-KOODE-01.jpg".to_string())));
        assert!(params.contains(&("prop", "imageinfo".to_string())));
        assert!(params.contains(&("iiurlwidth", "300".to_string())));
        assert!(params.contains(&("format", "json".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "callback"));
    }

    #[tokio::test]
    async fn test_dropping_in_flight_aborts_task() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let _tx = tx;
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });

        drop(InFlight::task(handle));
        // 任务被中止后持有的发送端随之释放
        assert!(rx.await.is_err());
    }
}
