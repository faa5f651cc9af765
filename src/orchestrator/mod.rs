//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `aggregator` - 活动汇总器
//! - 单个活动：委托 `BatchProber`
//! - 全部活动：并发执行每个活动的 `BatchProber`，按活动顺序拼接
//!
//! ### `gallery_session` - 图库会话
//! - 管理 Idle → Loading → Displaying / Failed 状态
//! - 丢弃被取代的加载结果
//! - 把结果交给展示层（`PresentationSink`）
//!
//! ### `app` - 命令行入口
//!
//! ## 层次关系
//!
//! ```text
//! gallery_session (处理一次选择)
//!     ↓
//! aggregator (处理 Vec<活动>)
//!     ↓
//! workflow::BatchProber (处理一个活动的全部候选)
//!     ↓
//! services (能力层：filename / probe_bridge)
//!     ↓
//! infrastructure (基础设施：PendingRegistry / RequestChannel)
//! ```

pub mod aggregator;
pub mod app;
pub mod console_sink;
pub mod gallery_session;

pub use aggregator::Aggregator;
pub use app::App;
pub use console_sink::ConsoleSink;
pub use gallery_session::{GallerySession, PresentationSink, SessionState};
