//! 图库会话 - 编排层
//!
//! ## 状态机
//!
//! ```text
//! Idle → Loading(selection) → Displaying(result) | Failed(error)
//!          ↑                                          │
//!          └──────────── 下一次选择 ───────────────────┘
//! ```
//!
//! ## 取代
//!
//! 每次选择都会获得一个新的会话代号。加载完成时如果代号已经不是最新的，
//! 结果直接丢弃，不改变状态也不通知展示层。被取代的探测不会被取消，
//! 只是跑完后无人使用。

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::{AggregateResult, Selection};
use crate::orchestrator::Aggregator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info};

/// 初始加载失败时的提示
const INITIAL_FAILURE_MESSAGE: &str = "Failed to load gallery. Please try again later.";

/// 展示层
///
/// 只接收结果，不参与探测
pub trait PresentationSink: Send + Sync {
    /// 显示加载中提示
    fn show_loading(&self, message: &str);
    /// 显示结果
    fn display(&self, result: &AggregateResult);
    /// 显示错误提示
    fn show_error(&self, message: &str);
}

/// 会话状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading(Selection),
    Displaying(AggregateResult),
    Failed(String),
}

/// 图库会话
pub struct GallerySession<S: PresentationSink> {
    config: Config,
    aggregator: Aggregator,
    sink: S,
    generation: AtomicU64,
    state: Mutex<SessionState>,
}

impl<S: PresentationSink> GallerySession<S> {
    pub fn new(config: Config, aggregator: Aggregator, sink: S) -> Self {
        Self {
            config,
            aggregator,
            sink,
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState::Idle),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// 当前状态快照
    pub fn state(&self) -> SessionState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// 加载默认活动（配置中的第一个）
    pub async fn initialize(&self) -> AppResult<Option<AggregateResult>> {
        let default = self
            .config
            .default_activity()
            .ok_or(AppError::Config(ConfigError::NoActivities))?
            .to_string();
        info!("📂 加载默认活动: {}", default);

        self.run(Selection::Group(default), INITIAL_FAILURE_MESSAGE.to_string())
            .await
    }

    /// 切换选择
    ///
    /// # 返回
    /// - `Ok(Some(result))`: 已展示的结果
    /// - `Ok(None)`: 加载期间被更新的选择取代，结果已丢弃
    /// - `Err(e)`: 汇总失败，展示层已收到错误提示
    pub async fn select(&self, selection: Selection) -> AppResult<Option<AggregateResult>> {
        let failure_message = selection.failure_message();
        self.run(selection, failure_message).await
    }

    async fn run(
        &self,
        selection: Selection,
        failure_message: String,
    ) -> AppResult<Option<AggregateResult>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(SessionState::Loading(selection.clone()));
        self.sink.show_loading(&selection.loading_message());

        let outcome = self.aggregator.collect(&self.config, &selection).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("选择 {} 已被取代，丢弃本次结果", selection);
            return Ok(None);
        }

        match outcome {
            Ok(result) => {
                self.set_state(SessionState::Displaying(result.clone()));
                self.sink.display(&result);
                Ok(Some(result))
            }
            Err(e) => {
                error!("❌ 加载 {} 失败: {}", selection, e);
                self.set_state(SessionState::Failed(e.to_string()));
                self.sink.show_error(&failure_message);
                Err(e)
            }
        }
    }

    fn set_state(&self, state: SessionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}
