use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 探测错误
    #[error("探测错误: {0}")]
    Probe(#[from] ProbeError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必填字段为空
    #[error("配置字段 {field} 不能为空")]
    EmptyField { field: &'static str },

    /// 活动列表为空
    #[error("活动列表不能为空")]
    NoActivities,

    /// 每个活动的最大图片数不合法（后缀固定两位）
    #[error("每个活动的最大图片数 {value} 超出范围 [1, 99]")]
    InvalidMaxImages { value: u32 },

    /// 序号超出范围
    #[error("图片序号 {ordinal} 超出范围 [1, {max}]")]
    InvalidOrdinal { ordinal: u32, max: u32 },

    /// 活动代码为空
    #[error("活动代码不能为空")]
    EmptyGroupId,

    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 传输层错误
///
/// 请求通道本身失败，尚未拿到任何响应
#[derive(Debug, Error)]
pub enum TransportError {
    /// 网络请求失败
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务端返回非成功状态码
    #[error("服务端返回状态码 {status} ({endpoint})")]
    BadStatus { endpoint: String, status: u16 },

    /// 完成句柄在触发前被丢弃
    #[error("请求通道在响应前关闭")]
    Dropped,
}

/// 单次探测错误
#[derive(Debug, Error)]
pub enum ProbeError {
    /// 传输失败
    #[error("传输失败: {0}")]
    Transport(#[from] TransportError),

    /// 响应结构不符合预期
    #[error("响应格式异常 ({identifier}): {reason}")]
    MalformedResponse { identifier: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl ProbeError {
    /// 创建响应格式异常错误
    pub fn malformed(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        ProbeError::MalformedResponse {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}

impl TransportError {
    /// 创建请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        TransportError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }
}

impl AppError {
    /// 创建其他错误
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = AppError::from(ConfigError::InvalidOrdinal { ordinal: 7, max: 5 });
        assert_eq!(err.to_string(), "配置错误: 图片序号 7 超出范围 [1, 5]");

        let err = AppError::from(ProbeError::malformed("A-01.jpg", "缺少 imageinfo"));
        assert!(err.to_string().contains("A-01.jpg"));
        assert!(err.to_string().contains("缺少 imageinfo"));
    }

    #[test]
    fn test_transport_error_converts_into_probe_error() {
        let err: ProbeError = TransportError::Dropped.into();
        assert!(matches!(err, ProbeError::Transport(TransportError::Dropped)));
    }
}
