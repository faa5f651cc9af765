//! MediaWiki `prop=imageinfo` 查询响应

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Deserialize)]
pub struct ImageInfoResponse {
    pub query: Option<QueryBody>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    /// 以页面 ID 为键，负数 ID（如 `-1`）表示页面不存在
    pub pages: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    pub imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Debug, Deserialize)]
pub struct ImageInfo {
    /// 按宽度缩放后的缩略图地址
    pub thumburl: Option<String>,
    /// 原图地址
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub info: Option<String>,
}
