//! 图片探测桥 - 业务能力层
//!
//! 只负责"确认一个文件是否存在并取回缩略图地址"能力，不关心批量和流程
//!
//! ## 生命周期
//!
//! 每次调用：
//! 1. 在登记表中分配唯一令牌并登记完成回调
//! 2. 通过请求通道发出查询
//! 3. 等待回调触发
//! 4. 离开作用域时注销回调、释放通道资源（成功、不存在、格式异常、传输失败都一样）

use crate::error::{ProbeError, TransportError};
use crate::infrastructure::{PendingRegistry, ProbeRequest, RequestChannel};
use crate::models::image_info::{ImageInfoResponse, PageEntry};
use std::sync::Arc;
use tracing::debug;

/// 图片探测桥
///
/// 职责：
/// - 每次探测对应一次外部请求
/// - 解释响应：存在 → 缩略图地址，不存在 → `None`
/// - 不重试，不吞错误（由调用方决定如何处理）
pub struct ProbeBridge {
    channel: Arc<dyn RequestChannel>,
    registry: Arc<PendingRegistry>,
}

impl ProbeBridge {
    /// 创建新的探测桥，使用独立的登记表
    pub fn new(channel: Arc<dyn RequestChannel>) -> Self {
        Self::with_registry(channel, PendingRegistry::new())
    }

    /// 使用外部注入的登记表
    pub fn with_registry(channel: Arc<dyn RequestChannel>, registry: Arc<PendingRegistry>) -> Self {
        Self { channel, registry }
    }

    pub fn registry(&self) -> &Arc<PendingRegistry> {
        &self.registry
    }

    /// 探测单个文件
    ///
    /// # 参数
    /// - `identifier`: 远端文件名
    /// - `width_hint`: 期望的缩略图宽度
    ///
    /// # 返回
    /// 存在时返回缩略图地址（优先按宽度缩放的地址），不存在时返回 `None`
    pub async fn probe(&self, identifier: &str, width_hint: u32) -> Result<Option<String>, ProbeError> {
        let request = ProbeRequest::new(identifier, width_hint);

        let (guard, rx) = self.registry.register();
        let _in_flight = self.channel.dispatch(&request, guard.completer());

        let outcome = rx.await.map_err(|_| TransportError::Dropped)?;
        let body = outcome?;

        debug!("[令牌 #{}] 收到响应: {}", guard.token(), identifier);
        interpret_response(identifier, &body)
    }
}

/// 解释 MediaWiki imageinfo 响应
///
/// - 页面 ID 为负数（`-1`）：文件不存在，返回 `None`
/// - 页面存在但缺少 imageinfo：格式异常
/// - 优先使用 `thumburl`，缺失时退回 `url`
pub fn interpret_response(identifier: &str, body: &str) -> Result<Option<String>, ProbeError> {
    let response: ImageInfoResponse = serde_json::from_str(body)
        .map_err(|e| ProbeError::malformed(identifier, format!("无法解析 JSON: {}", e)))?;

    if let Some(error) = response.error {
        return Err(ProbeError::malformed(
            identifier,
            format!(
                "API 返回错误: {} ({})",
                error.code.as_deref().unwrap_or("unknown"),
                error.info.as_deref().unwrap_or("")
            ),
        ));
    }

    let query = response
        .query
        .ok_or_else(|| ProbeError::malformed(identifier, "缺少 query 字段"))?;

    let (page_id, page) = query
        .pages
        .into_iter()
        .next()
        .ok_or_else(|| ProbeError::malformed(identifier, "pages 为空"))?;

    if page_id.starts_with('-') {
        return Ok(None);
    }

    let page: PageEntry = serde_json::from_value(page)
        .map_err(|e| ProbeError::malformed(identifier, format!("页面结构异常: {}", e)))?;

    let info = page
        .imageinfo
        .ok_or_else(|| ProbeError::malformed(identifier, "缺少 imageinfo 字段"))?
        .into_iter()
        .next()
        .ok_or_else(|| ProbeError::malformed(identifier, "imageinfo 为空"))?;

    info.thumburl
        .filter(|u| !u.is_empty())
        .or(info.url.filter(|u| !u.is_empty()))
        .map(Some)
        .ok_or_else(|| ProbeError::malformed(identifier, "imageinfo 缺少 thumburl 和 url"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "NSS2025-14009-KGD-KOODE-01.jpg";

    #[test]
    fn test_missing_page_is_absent() {
        let body = r#"{"batchcomplete":"","query":{"pages":{"-1":{"ns":6,"title":"File:X.jpg","missing":""}}}}"#;
        assert_eq!(interpret_response(ID, body).unwrap(), None);
    }

    #[test]
    fn test_prefers_thumburl() {
        let body = r#"{"query":{"pages":{"812":{"pageid":812,"imageinfo":[{"thumburl":"https://w/thumb/300px-a.jpg","url":"https://w/a.jpg"}]}}}}"#;
        assert_eq!(
            interpret_response(ID, body).unwrap().as_deref(),
            Some("https://w/thumb/300px-a.jpg")
        );
    }

    #[test]
    fn test_falls_back_to_url() {
        let body = r#"{"query":{"pages":{"812":{"imageinfo":[{"url":"https://w/a.jpg"}]}}}}"#;
        assert_eq!(
            interpret_response(ID, body).unwrap().as_deref(),
            Some("https://w/a.jpg")
        );

        let body = r#"{"query":{"pages":{"812":{"imageinfo":[{"thumburl":"","url":"https://w/a.jpg"}]}}}}"#;
        assert_eq!(
            interpret_response(ID, body).unwrap().as_deref(),
            Some("https://w/a.jpg")
        );
    }

    #[test]
    fn test_existing_page_without_imageinfo_is_malformed() {
        let body = r#"{"query":{"pages":{"812":{"pageid":812,"title":"File:X.jpg"}}}}"#;
        assert!(matches!(
            interpret_response(ID, body),
            Err(ProbeError::MalformedResponse { .. })
        ));

        let body = r#"{"query":{"pages":{"812":{"imageinfo":[]}}}}"#;
        assert!(interpret_response(ID, body).is_err());

        let body = r#"{"query":{"pages":{"812":{"imageinfo":[{"descriptionurl":"x"}]}}}}"#;
        assert!(interpret_response(ID, body).is_err());
    }

    #[test]
    fn test_bad_shapes_are_malformed() {
        for body in [
            "not json",
            "{}",
            r#"{"query":{"pages":{}}}"#,
            r#"{"error":{"code":"badvalue","info":"Unrecognized value"}}"#,
        ] {
            let err = interpret_response(ID, body).unwrap_err();
            assert!(
                matches!(err, ProbeError::MalformedResponse { ref identifier, .. } if identifier == ID),
                "body {:?} gave {:?}",
                body,
                err
            );
        }
    }
}
