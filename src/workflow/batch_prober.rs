//! 批量探测 - 流程层
//!
//! 定义"一个活动"的探测流程：生成候选 → 逐个探测 → 收集存在的结果
//!
//! 单个候选的失败只记录日志并按"不存在"处理，不会中断同一批次的其他探测。
//! 因此调用方无法区分某个序号是"确认不存在"还是"探测失败"。

use crate::config::Config;
use crate::error::{AppResult, ProbeError};
use crate::models::{Candidate, ProbeResult};
use crate::services::{filename, ProbeBridge};
use crate::utils::logging;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 批量探测策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePolicy {
    /// 同时发出全部探测，结果按完成顺序收集
    FanOut,
    /// 按序号逐个发出，两次发出之间至少间隔 `interval`
    Paced { interval: Duration },
}

impl std::fmt::Display for ProbePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbePolicy::FanOut => write!(f, "fanout"),
            ProbePolicy::Paced { interval } => write!(f, "paced({}ms)", interval.as_millis()),
        }
    }
}

/// 单次探测结果
#[derive(Debug)]
pub enum ProbeOutcome {
    /// 存在，附带缩略图地址
    Present(String),
    /// 不存在
    Absent,
    /// 探测失败
    Failed(ProbeError),
}

impl From<Result<Option<String>, ProbeError>> for ProbeOutcome {
    fn from(result: Result<Option<String>, ProbeError>) -> Self {
        match result {
            Ok(Some(thumbnail)) => ProbeOutcome::Present(thumbnail),
            Ok(None) => ProbeOutcome::Absent,
            Err(e) => ProbeOutcome::Failed(e),
        }
    }
}

impl ProbeOutcome {
    /// 折叠为缩略图地址，失败与不存在一样返回 `None`
    pub fn into_thumbnail(self, candidate: &Candidate) -> Option<String> {
        match self {
            ProbeOutcome::Present(thumbnail) => Some(thumbnail),
            ProbeOutcome::Absent => {
                debug!("图片不存在: {}", candidate.identifier);
                None
            }
            ProbeOutcome::Failed(e) => {
                warn!("⚠️ 检查图片 {} 失败: {}", candidate.identifier, e);
                None
            }
        }
    }
}

/// 批量探测器
///
/// 职责：
/// - 为一个活动生成固定数量的候选
/// - 按策略调度探测
/// - 只返回确认存在的结果
pub struct BatchProber {
    bridge: Arc<ProbeBridge>,
    policy: ProbePolicy,
}

impl BatchProber {
    pub fn new(bridge: Arc<ProbeBridge>, policy: ProbePolicy) -> Self {
        Self { bridge, policy }
    }

    pub fn policy(&self) -> ProbePolicy {
        self.policy
    }

    /// 探测一个活动的全部候选
    ///
    /// 只有候选生成失败（配置或活动代码不合法）才会返回错误
    pub async fn probe_group(&self, config: &Config, group_id: &str) -> AppResult<Vec<ProbeResult>> {
        let candidates = filename::candidates(config, group_id)?;
        let total = candidates.len();
        logging::log_group_start(group_id, total, &self.policy);

        let results = match self.policy {
            ProbePolicy::FanOut => self.fan_out(config, candidates).await,
            ProbePolicy::Paced { interval } => self.paced(config, candidates, interval).await,
        };

        logging::log_group_complete(group_id, results.len(), total);
        Ok(results)
    }

    async fn fan_out(&self, config: &Config, candidates: Vec<Candidate>) -> Vec<ProbeResult> {
        let mut pending: FuturesUnordered<_> = candidates
            .into_iter()
            .map(|candidate| self.probe_candidate(config, candidate))
            .collect();

        let mut results = Vec::new();
        while let Some(found) = pending.next().await {
            results.extend(found);
        }
        results
    }

    async fn paced(
        &self,
        config: &Config,
        candidates: Vec<Candidate>,
        interval: Duration,
    ) -> Vec<ProbeResult> {
        let mut results = Vec::new();
        for (i, candidate) in candidates.into_iter().enumerate() {
            if i > 0 {
                sleep(interval).await; // 控制请求频率
            }
            results.extend(self.probe_candidate(config, candidate).await);
        }
        results
    }

    async fn probe_candidate(&self, config: &Config, candidate: Candidate) -> Option<ProbeResult> {
        let outcome: ProbeOutcome = self
            .bridge
            .probe(&candidate.identifier, config.thumbnail_width)
            .await
            .into();

        let thumbnail_ref = outcome.into_thumbnail(&candidate)?;
        debug!(
            "✓ 找到图片 {}: {}",
            candidate.identifier,
            logging::truncate_text(&thumbnail_ref, 80)
        );

        Some(ProbeResult {
            full_ref: filename::full_url(config, &candidate.identifier),
            thumbnail_ref,
            candidate,
        })
    }
}
