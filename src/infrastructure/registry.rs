//! 待完成请求登记表 - 基础设施层
//!
//! 每次探测分配一个唯一令牌，并在表中登记一个一次性完成回调。
//! 回调只由持有该令牌的传输通道触发，登记项只由发起探测的一方删除，
//! 因此并发探测之间不会互相串结果。

use crate::error::TransportError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::debug;

/// 请求令牌
pub type RequestToken = u64;

/// 传输通道交回的结果：响应正文或传输错误
pub type ChannelOutcome = Result<String, TransportError>;

/// 待完成请求登记表
///
/// 可注入，由 `ProbeBridge` 持有；测试可以共享同一个实例检查登记项是否泄漏
#[derive(Debug, Default)]
pub struct PendingRegistry {
    next_token: AtomicU64,
    pending: Mutex<HashMap<RequestToken, oneshot::Sender<ChannelOutcome>>>,
}

impl PendingRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 分配令牌并登记完成回调
    ///
    /// 返回的 `PendingGuard` 被丢弃时登记项随之删除
    pub fn register(self: &Arc<Self>) -> (PendingGuard, oneshot::Receiver<ChannelOutcome>) {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.lock().insert(token, tx);
        debug!("登记请求令牌 #{}", token);

        let guard = PendingGuard {
            token,
            registry: Arc::clone(self),
        };
        (guard, rx)
    }

    /// 当前未完成的登记项数量
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, token: RequestToken) -> bool {
        self.lock().contains_key(&token)
    }

    fn take(&self, token: RequestToken) -> Option<oneshot::Sender<ChannelOutcome>> {
        self.lock().remove(&token)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RequestToken, oneshot::Sender<ChannelOutcome>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 登记项守卫
///
/// 无论探测以何种方式结束，离开作用域时都会注销回调
#[derive(Debug)]
pub struct PendingGuard {
    token: RequestToken,
    registry: Arc<PendingRegistry>,
}

impl PendingGuard {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// 生成交给传输通道的一次性完成句柄
    pub fn completer(&self) -> Completer {
        Completer {
            token: self.token,
            registry: Arc::clone(&self.registry),
            fired: false,
        }
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.registry.take(self.token).is_some() {
            debug!("注销未完成的请求令牌 #{}", self.token);
        }
    }
}

/// 一次性完成句柄
///
/// `complete` 消耗自身，保证最多触发一次。未触发就被丢弃时，
/// 等待方会收到 `TransportError::Dropped`，不会永远挂起。
#[derive(Debug)]
pub struct Completer {
    token: RequestToken,
    registry: Arc<PendingRegistry>,
    fired: bool,
}

impl Completer {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// 交回结果；令牌已被注销时返回 `false`
    pub fn complete(mut self, outcome: ChannelOutcome) -> bool {
        self.fired = true;
        match self.registry.take(self.token) {
            Some(tx) => tx.send(outcome).is_ok(),
            None => {
                debug!("请求令牌 #{} 已注销，丢弃迟到的响应", self.token);
                false
            }
        }
    }
}

impl Drop for Completer {
    fn drop(&mut self) {
        if !self.fired {
            // 删除发送端，接收方立即得到 RecvError
            self.registry.take(self.token);
        }
    }
}
