//! 活动汇总器 - 编排层
//!
//! ## 职责
//!
//! 1. **单个活动**：直接委托 `BatchProber`
//! 2. **全部活动**：每个活动一个 `BatchProber` 调用，并发执行，按活动顺序拼接
//!
//! ## 失败处理
//!
//! 单个候选的失败已经在 `BatchProber` 内部吞掉。能走到这里的只有活动级别的
//! 结构性错误（例如活动代码为空），这类错误会直接让整次汇总失败。

use crate::config::Config;
use crate::error::{AppResult, ProbeError};
use crate::infrastructure::{HttpChannel, RequestChannel};
use crate::models::{AggregateResult, ProbeResult, Selection};
use crate::services::ProbeBridge;
use crate::workflow::BatchProber;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::info;

/// 活动汇总器
pub struct Aggregator {
    prober: BatchProber,
}

impl Aggregator {
    pub fn new(prober: BatchProber) -> Self {
        Self { prober }
    }

    /// 使用给定的请求通道和配置中的探测策略组装
    pub fn with_channel(config: &Config, channel: Arc<dyn RequestChannel>) -> Self {
        let bridge = Arc::new(ProbeBridge::new(channel));
        Self::new(BatchProber::new(bridge, config.probe_policy()))
    }

    /// 使用 HTTP 通道组装
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let channel = HttpChannel::new(config).map_err(ProbeError::from)?;
        Ok(Self::with_channel(config, Arc::new(channel)))
    }

    /// 加载单个活动
    pub async fn collect_group(&self, config: &Config, group_id: &str) -> AppResult<Vec<ProbeResult>> {
        self.prober.probe_group(config, group_id).await
    }

    /// 并发加载多个活动，结果按 `group_ids` 的顺序拼接
    pub async fn collect_groups(
        &self,
        config: &Config,
        group_ids: &[String],
    ) -> AppResult<Vec<ProbeResult>> {
        info!("📦 并发加载 {} 个活动", group_ids.len());

        let batches = try_join_all(
            group_ids
                .iter()
                .map(|group_id| self.prober.probe_group(config, group_id)),
        )
        .await?;

        Ok(batches.into_iter().flatten().collect())
    }

    /// 按选择范围加载并打包为展示结果
    pub async fn collect(&self, config: &Config, selection: &Selection) -> AppResult<AggregateResult> {
        let results = match selection {
            Selection::Group(group_id) => self.collect_group(config, group_id).await?,
            Selection::All => self.collect_groups(config, &config.activities).await?,
        };
        Ok(AggregateResult::new(selection, results))
    }
}
