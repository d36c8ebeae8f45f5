use serde::{Deserialize, Serialize};

/// 检索服务返回的单篇文档
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchDocument {
    pub title: String,
    pub url: String,
    /// 检索服务给出的摘要片段
    #[serde(default)]
    pub content: String,
    /// 网页原文，仅在请求 include_raw_content 时返回
    #[serde(default)]
    pub raw_content: Option<String>,
}

/// 一次成功检索调用的结果集
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResultSet {
    pub query: String,
    #[serde(default)]
    pub results: Vec<SearchDocument>,
}
