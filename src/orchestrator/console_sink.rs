//! 控制台展示层
//!
//! 命令行程序使用：把结果逐行写进日志

use crate::models::AggregateResult;
use crate::orchestrator::PresentationSink;
use tracing::{error, info};

/// 无结果时的提示
pub const EMPTY_MESSAGE: &str = "No images found for this activity.";

#[derive(Debug, Default)]
pub struct ConsoleSink;

impl PresentationSink for ConsoleSink {
    fn show_loading(&self, message: &str) {
        info!("⏳ {}", message);
    }

    fn display(&self, result: &AggregateResult) {
        info!("\n{}", "─".repeat(60));
        info!("{}", result.headline());
        info!("{}", "─".repeat(60));

        if result.is_empty() {
            info!("{}", EMPTY_MESSAGE);
            return;
        }

        for item in &result.results {
            info!("🖼️ {}", item.caption());
            info!("   缩略图: {}", item.thumbnail_ref);
            info!("   原图: {}", item.full_ref);
        }
    }

    fn show_error(&self, message: &str) {
        error!("❌ {}", message);
    }
}
