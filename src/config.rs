use crate::error::ConfigError;
use crate::workflow::ProbePolicy;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 批量探测策略名称
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// 所有候选同时发出
    #[default]
    Fanout,
    /// 按序号逐个发出，两次请求之间固定间隔
    Paced,
}

impl std::str::FromStr for PolicyKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fanout" => Ok(PolicyKind::Fanout),
            "paced" => Ok(PolicyKind::Paced),
            _ => Err(()),
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 学校代码
    pub school_code: String,
    /// 教育区代码
    pub district_code: String,
    /// 文件名前缀
    pub filename_prefix: String,
    /// 文件扩展名
    pub file_extension: String,
    /// 活动代码列表（第一个为默认活动）
    pub activities: Vec<String>,
    /// 每个活动最多探测的图片数
    pub max_images_per_activity: u32,
    /// MediaWiki API 地址
    pub api_url: String,
    /// 原图地址前缀
    pub image_base_url: String,
    /// 缩略图宽度（像素）
    pub thumbnail_width: u32,
    /// 批量探测策略
    pub probe_policy: PolicyKind,
    /// paced 策略下两次请求的间隔（毫秒）
    pub pacing_interval_ms: u64,
    /// 单次 HTTP 请求超时（秒），不设置则由传输层决定
    pub request_timeout_secs: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            school_code: "14009".to_string(),
            district_code: "KGD".to_string(),
            filename_prefix: "NSS2025".to_string(),
            file_extension: "jpg".to_string(),
            activities: ["KOODE", "CAMP", "TREE", "BLOO", "CLEN"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_images_per_activity: 5,
            api_url: "https://schoolwiki.in/api.php".to_string(),
            image_base_url: "https://schoolwiki.in/images/".to_string(),
            thumbnail_width: 300,
            probe_policy: PolicyKind::Fanout,
            pacing_interval_ms: 250,
            request_timeout_secs: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            school_code: std::env::var("GALLERY_SCHOOL_CODE").unwrap_or(default.school_code),
            district_code: std::env::var("GALLERY_DISTRICT_CODE").unwrap_or(default.district_code),
            filename_prefix: std::env::var("GALLERY_FILENAME_PREFIX").unwrap_or(default.filename_prefix),
            file_extension: std::env::var("GALLERY_FILE_EXTENSION").unwrap_or(default.file_extension),
            activities: std::env::var("GALLERY_ACTIVITIES").ok().map(|v| parse_list(&v)).unwrap_or(default.activities),
            max_images_per_activity: std::env::var("GALLERY_MAX_IMAGES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_images_per_activity),
            api_url: std::env::var("GALLERY_API_URL").unwrap_or(default.api_url),
            image_base_url: std::env::var("GALLERY_IMAGE_BASE_URL").unwrap_or(default.image_base_url),
            thumbnail_width: std::env::var("GALLERY_THUMBNAIL_WIDTH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.thumbnail_width),
            probe_policy: std::env::var("GALLERY_PROBE_POLICY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.probe_policy),
            pacing_interval_ms: std::env::var("GALLERY_PACING_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.pacing_interval_ms),
            request_timeout_secs: std::env::var("GALLERY_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 加载并校验配置
    ///
    /// 设置了 `GALLERY_CONFIG` 时读取该 TOML 文件，否则读取环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var("GALLERY_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 校验必填字段
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("school_code", &self.school_code),
            ("district_code", &self.district_code),
            ("filename_prefix", &self.filename_prefix),
            ("file_extension", &self.file_extension),
            ("api_url", &self.api_url),
            ("image_base_url", &self.image_base_url),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }

        if self.activities.is_empty() {
            return Err(ConfigError::NoActivities);
        }
        if self.activities.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::EmptyGroupId);
        }
        if !(1..=99).contains(&self.max_images_per_activity) {
            return Err(ConfigError::InvalidMaxImages {
                value: self.max_images_per_activity,
            });
        }
        if self.thumbnail_width == 0 {
            return Err(ConfigError::EmptyField {
                field: "thumbnail_width",
            });
        }

        Ok(())
    }

    /// 默认展示的活动
    pub fn default_activity(&self) -> Option<&str> {
        self.activities.first().map(String::as_str)
    }

    pub fn probe_policy(&self) -> ProbePolicy {
        match self.probe_policy {
            PolicyKind::Fanout => ProbePolicy::FanOut,
            PolicyKind::Paced => ProbePolicy::Paced {
                interval: Duration::from_millis(self.pacing_interval_ms),
            },
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
