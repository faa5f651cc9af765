//! 日志工具模块
//!
//! 提供日志初始化以及格式化输出的辅助函数

use crate::config::Config;
use crate::models::AggregateResult;
use crate::workflow::ProbePolicy;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 info / debug。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 活动图库");
    info!("🏫 学校: {} / {}", config.school_code, config.district_code);
    info!("📋 活动: {}", config.activities.join(", "));
    info!(
        "📊 每个活动最多 {} 张, 策略: {}",
        config.max_images_per_activity,
        config.probe_policy()
    );
    info!("{}", "=".repeat(60));
}

/// 记录活动探测开始
///
/// # 参数
/// - `group_id`: 活动代码
/// - `total`: 候选数量
/// - `policy`: 探测策略
pub fn log_group_start(group_id: &str, total: usize, policy: &ProbePolicy) {
    info!("🔍 [{}] 开始探测 {} 个候选 ({})", group_id, total, policy);
}

/// 记录活动探测完成
pub fn log_group_complete(group_id: &str, found: usize, total: usize) {
    info!("✓ [{}] 探测完成: 找到 {}/{}", group_id, found, total);
}

/// 打印最终统计信息
///
/// # 参数
/// - `result`: 本次加载的汇总结果
/// - `elapsed`: 耗时
pub fn print_final_stats(result: &AggregateResult, elapsed: Duration) {
    info!("\n{}", "=".repeat(60));
    info!("📊 加载完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📁 范围: {} ({})", result.selection, result.label);
    info!("🖼️ 图片: {}", result.count);
    info!("⏱️ 耗时: {:.2}s", elapsed.as_secs_f64());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
