use crate::models::ProbeResult;
use serde::Serialize;
use std::fmt::Display;

/// 用户选择的展示范围
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 单个活动
    Group(String),
    /// 全部活动
    All,
}

impl Selection {
    pub fn label(&self) -> SelectionLabel {
        match self {
            Selection::Group(_) => SelectionLabel::SingleGroup,
            Selection::All => SelectionLabel::AllGroups,
        }
    }

    /// 加载中提示
    pub fn loading_message(&self) -> String {
        match self {
            Selection::Group(group) => format!("Loading {} activities...", group),
            Selection::All => "Loading all activities...".to_string(),
        }
    }

    /// 加载失败提示
    pub fn failure_message(&self) -> String {
        match self {
            Selection::Group(group) => {
                format!("Failed to load {} activities. Please try again.", group)
            }
            Selection::All => "Failed to load all activities. Please try again.".to_string(),
        }
    }
}

impl std::str::FromStr for Selection {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(crate::error::ConfigError::EmptyGroupId);
        }
        if value.eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            Ok(Selection::Group(value.to_string()))
        }
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Group(group) => write!(f, "{}", group),
            Selection::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionLabel {
    SingleGroup,
    AllGroups,
}

impl Display for SelectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionLabel::SingleGroup => write!(f, "single group"),
            SelectionLabel::AllGroups => write!(f, "all groups"),
        }
    }
}

/// 一次加载的汇总结果，交给展示层
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub selection: String,
    pub label: SelectionLabel,
    pub count: usize,
    pub results: Vec<ProbeResult>,
}

impl AggregateResult {
    pub fn new(selection: &Selection, results: Vec<ProbeResult>) -> Self {
        Self {
            selection: selection.to_string(),
            label: selection.label(),
            count: results.len(),
            results,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 标题行
    pub fn headline(&self) -> String {
        match self.label {
            SelectionLabel::SingleGroup => format!(
                "Showing {} Activities ({} images)",
                self.selection, self.count
            ),
            SelectionLabel::AllGroups => {
                format!("Showing All Activities ({} images)", self.count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!("all".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("ALL".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!(
            " CAMP ".parse::<Selection>().unwrap(),
            Selection::Group("CAMP".to_string())
        );
        assert!("".parse::<Selection>().is_err());
    }

    #[test]
    fn test_headline_and_label() {
        let single = AggregateResult::new(&Selection::Group("KOODE".to_string()), Vec::new());
        assert_eq!(single.headline(), "Showing KOODE Activities (0 images)");
        assert_eq!(single.label.to_string(), "single group");
        assert!(single.is_empty());

        let all = AggregateResult::new(&Selection::All, Vec::new());
        assert_eq!(all.headline(), "Showing All Activities (0 images)");
        assert_eq!(all.label.to_string(), "all groups");
    }
}
