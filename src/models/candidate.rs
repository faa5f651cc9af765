use serde::Serialize;

/// 待探测的候选图片
///
/// 由活动代码和序号确定性地生成，探测结束后即丢弃
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Candidate {
    /// 活动代码
    pub group_id: String,
    /// 图片序号（从1开始）
    pub ordinal: u32,
    /// 远端文件名
    pub identifier: String,
}

/// 探测结果
///
/// 只为确认存在的候选生成
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub candidate: Candidate,
    /// 缩略图地址
    pub thumbnail_ref: String,
    /// 原图地址
    pub full_ref: String,
}

impl ProbeResult {
    pub fn group_id(&self) -> &str {
        &self.candidate.group_id
    }

    pub fn ordinal(&self) -> u32 {
        self.candidate.ordinal
    }

    /// 图片说明文字
    pub fn caption(&self) -> String {
        format!(
            "Activity: {} | Image {}",
            self.candidate.group_id, self.candidate.ordinal
        )
    }
}
