use serde::Serialize;

use crate::types::report::{SearchQuery, Section};

/// 报告生成的顶层状态
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportRunState {
    pub topic: String,
    /// 规划阶段确定的章节，顺序此后不再改变
    pub sections: Vec<Section>,
    /// 各并发任务产出的已完成章节，只通过 `merge_sections` 增长
    pub completed_sections: Vec<Section>,
    /// 调研章节汇总成的写作上下文
    pub research_context: String,
    pub final_report: String,
}

impl ReportRunState {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// 在屏障之后由控制流程统一合并各任务的增量
    pub fn absorb(&mut self, deltas: Vec<Vec<Section>>) {
        let existing = std::mem::take(&mut self.completed_sections);
        self.completed_sections = deltas.into_iter().fold(existing, merge_sections);
    }
}

/// 单个章节调研流水线的临时状态
#[derive(Debug, Clone)]
pub struct SectionRunState {
    pub section: Section,
    pub search_queries: Vec<SearchQuery>,
    pub source_context: String,
}

impl SectionRunState {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            search_queries: Vec::new(),
            source_context: String::new(),
        }
    }
}

/// 合并已完成章节：把 `incoming` 追加到 `existing` 之后。
/// 合并结果的顺序无意义，报告编译时会按规划顺序重新排列。
pub fn merge_sections(mut existing: Vec<Section>, incoming: Vec<Section>) -> Vec<Section> {
    existing.extend(incoming);
    existing
}
