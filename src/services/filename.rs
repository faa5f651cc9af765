//! 文件名生成 - 业务能力层
//!
//! 纯函数：(配置, 活动代码, 序号) → 远端文件名

use crate::config::Config;
use crate::error::ConfigError;
use crate::models::Candidate;

/// 生成候选文件名
///
/// 格式为 `{前缀}-{学校代码}-{教育区代码}-{活动代码}-{两位序号}.{扩展名}`，
/// 例如 `NSS2025-14009-KGD-KOODE-01.jpg`
pub fn generate(config: &Config, group_id: &str, ordinal: u32) -> Result<String, ConfigError> {
    let fields = [
        ("filename_prefix", &config.filename_prefix),
        ("school_code", &config.school_code),
        ("district_code", &config.district_code),
        ("file_extension", &config.file_extension),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyField { field });
        }
    }
    if group_id.trim().is_empty() {
        return Err(ConfigError::EmptyGroupId);
    }
    if ordinal == 0 || ordinal > config.max_images_per_activity {
        return Err(ConfigError::InvalidOrdinal {
            ordinal,
            max: config.max_images_per_activity,
        });
    }

    Ok(format!(
        "{}-{}-{}-{}-{:02}.{}",
        config.filename_prefix,
        config.school_code,
        config.district_code,
        group_id,
        ordinal,
        config.file_extension
    ))
}

/// 生成单个候选
pub fn candidate(config: &Config, group_id: &str, ordinal: u32) -> Result<Candidate, ConfigError> {
    Ok(Candidate {
        group_id: group_id.to_string(),
        ordinal,
        identifier: generate(config, group_id, ordinal)?,
    })
}

/// 生成一个活动的全部候选（序号 1..=max）
pub fn candidates(config: &Config, group_id: &str) -> Result<Vec<Candidate>, ConfigError> {
    (1..=config.max_images_per_activity)
        .map(|ordinal| candidate(config, group_id, ordinal))
        .collect()
}

/// 原图地址
pub fn full_url(config: &Config, identifier: &str) -> String {
    format!("{}{}", config.image_base_url, identifier)
}
