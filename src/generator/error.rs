use thiserror::Error;

/// 报告生成过程中的致命错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("报告规划失败: {0}")]
    Planning(String),

    #[error("报告规划结果无效: {0}")]
    InvalidPlan(String),

    #[error("章节「{section}」检索语句生成失败: {reason}")]
    QueryGeneration { section: String, reason: String },

    #[error("章节「{section}」写作失败: {reason}")]
    Writing { section: String, reason: String },

    #[error("章节「{0}」缺少已完成的内容")]
    MissingSection(String),
}
