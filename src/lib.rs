//! # NSS Gallery
//!
//! 按固定命名规则探测 MediaWiki 上的活动图片，取回缩略图地址并按活动汇总
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有临时资源，只暴露能力
//! - `PendingRegistry` - 请求令牌与一次性完成回调的登记表
//! - `RequestChannel` / `HttpChannel` - 一次性请求通道
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 只处理单个候选
//! - `filename` - 候选文件名生成
//! - `ProbeBridge` - 单个文件的存在性探测
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个活动"的探测流程
//! - `BatchProber` - fanout / paced 两种调度策略，单个失败不影响整批
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/aggregator` - 单个活动 / 全部活动的汇总
//! - `orchestrator/gallery_session` - 会话状态机与展示层接口
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{HttpChannel, PendingRegistry, RequestChannel};
pub use models::{AggregateResult, Candidate, ProbeResult, Selection};
pub use orchestrator::{Aggregator, App, GallerySession, PresentationSink};
pub use services::ProbeBridge;
pub use workflow::{BatchProber, ProbePolicy};
