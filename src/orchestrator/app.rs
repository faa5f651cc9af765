//! 应用入口 - 编排层
//!
//! 组装 HTTP 通道、探测器、汇总器和控制台展示层，并执行一次加载

use crate::config::Config;
use crate::models::Selection;
use crate::orchestrator::{Aggregator, ConsoleSink, GallerySession, SessionState};
use crate::utils::logging::{log_startup, print_final_stats};
use anyhow::Result;
use std::time::Instant;
use tracing::warn;

/// 应用主结构
pub struct App {
    session: GallerySession<ConsoleSink>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let aggregator = Aggregator::from_config(&config)?;
        let session = GallerySession::new(config, aggregator, ConsoleSink);

        Ok(Self { session })
    }

    /// 运行应用主逻辑
    ///
    /// 未指定选择时加载默认活动
    pub async fn run(&self, selection: Option<Selection>) -> Result<()> {
        let started = Instant::now();

        let result = match selection {
            Some(selection) => self.session.select(selection).await?,
            None => self.session.initialize().await?,
        };

        match result {
            Some(result) => print_final_stats(&result, started.elapsed()),
            None => warn!("⚠️ 本次加载已被取代"),
        }

        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }
}
