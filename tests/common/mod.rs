//! 测试用的脚本化请求通道和记录型展示层

#![allow(dead_code)]

use nss_gallery::error::TransportError;
use nss_gallery::infrastructure::{Completer, InFlight, ProbeRequest, RequestChannel};
use nss_gallery::models::AggregateResult;
use nss_gallery::orchestrator::PresentationSink;
use nss_gallery::Config;
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// 预设的响应
#[derive(Debug, Clone)]
pub enum Reply {
    /// 文件存在，返回该缩略图地址
    Present(String),
    /// 文件不存在（页面 ID -1）
    Absent,
    /// 传输失败
    Fail,
    /// 页面存在但缺少 imageinfo
    Malformed,
    /// 丢弃完成句柄，不返回任何结果
    Silent,
    /// 延迟后再返回
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub fn present(url: &str) -> Self {
        Reply::Present(url.to_string())
    }

    pub fn after(self, millis: u64) -> Self {
        Reply::Delayed(Duration::from_millis(millis), Box::new(self))
    }
}

/// 按文件名片段匹配预设响应的请求通道
pub struct ScriptedChannel {
    rules: Vec<(String, Reply)>,
    fallback: Reply,
    dispatched: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedChannel {
    /// 未匹配的文件一律返回不存在
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Reply::Absent,
            dispatched: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, fragment: &str, reply: Reply) -> Self {
        self.rules.push((fragment.to_string(), reply));
        self
    }

    pub fn otherwise(mut self, reply: Reply) -> Self {
        self.fallback = reply;
        self
    }

    /// 已发出的请求（文件名，发出时间），按发出顺序
    pub fn dispatched(&self) -> Vec<(String, Instant)> {
        self.dispatched.lock().unwrap().clone()
    }

    pub fn dispatch_count(&self) -> usize {
        self.dispatched.lock().unwrap().len()
    }

    fn reply_for(&self, identifier: &str) -> Reply {
        self.rules
            .iter()
            .find(|(fragment, _)| identifier.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl RequestChannel for ScriptedChannel {
    fn dispatch(&self, request: &ProbeRequest, completer: Completer) -> InFlight {
        self.dispatched
            .lock()
            .unwrap()
            .push((request.identifier.clone(), Instant::now()));

        match self.reply_for(&request.identifier) {
            Reply::Delayed(delay, reply) => {
                let handle = tokio::spawn(async move {
                    sleep(delay).await;
                    fire(*reply, completer);
                });
                InFlight::task(handle)
            }
            reply => {
                fire(reply, completer);
                InFlight::none()
            }
        }
    }
}

fn fire(reply: Reply, completer: Completer) {
    match reply {
        Reply::Present(url) => {
            completer.complete(Ok(present_body(&url)));
        }
        Reply::Absent => {
            completer.complete(Ok(absent_body()));
        }
        Reply::Fail => {
            completer.complete(Err(TransportError::BadStatus {
                endpoint: "scripted".to_string(),
                status: 503,
            }));
        }
        Reply::Malformed => {
            completer.complete(Ok(json!({"query": {"pages": {"77": {"pageid": 77}}}}).to_string()));
        }
        Reply::Silent => drop(completer),
        Reply::Delayed(_, reply) => fire(*reply, completer),
    }
}

pub fn present_body(thumb: &str) -> String {
    json!({
        "query": {
            "pages": {
                "42": {
                    "pageid": 42,
                    "imageinfo": [{ "thumburl": thumb, "url": format!("{}?full", thumb) }]
                }
            }
        }
    })
    .to_string()
}

pub fn absent_body() -> String {
    json!({"batchcomplete": "", "query": {"pages": {"-1": {"ns": 6, "missing": ""}}}}).to_string()
}

/// 展示层收到的事件
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Loading(String),
    Display(AggregateResult),
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn displays(&self) -> Vec<AggregateResult> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Display(result) => Some(result),
                _ => None,
            })
            .collect()
    }
}

impl PresentationSink for RecordingSink {
    fn show_loading(&self, message: &str) {
        self.events.lock().unwrap().push(SinkEvent::Loading(message.to_string()));
    }

    fn display(&self, result: &AggregateResult) {
        self.events.lock().unwrap().push(SinkEvent::Display(result.clone()));
    }

    fn show_error(&self, message: &str) {
        self.events.lock().unwrap().push(SinkEvent::Error(message.to_string()));
    }
}

/// 两个活动、每个活动两张候选的小配置
pub fn small_config() -> Config {
    Config {
        activities: vec!["KOODE".to_string(), "CAMP".to_string()],
        max_images_per_activity: 2,
        ..Config::default()
    }
}
