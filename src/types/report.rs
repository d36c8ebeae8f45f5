use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 报告中的一个章节
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct Section {
    /// Name for a particular section of the report.
    pub name: String,
    /// Brief overview of the main topics and concepts to be covered in this section.
    pub description: String,
    /// Whether to perform web search for this section of the report.
    pub research: bool,
    /// The content for this section.
    #[serde(default)]
    pub content: String,
}

impl Section {
    pub fn new(name: impl Into<String>, description: impl Into<String>, research: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            research,
            content: String::new(),
        }
    }

    /// 填充章节内容，返回已完成的章节
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// 报告规划结果
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct Sections {
    /// All the Sections of the overall report.
    pub sections: Vec<Section>,
}

/// 单条网络检索语句
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct SearchQuery {
    /// Query for web search.
    pub search_query: String,
}

impl SearchQuery {
    pub fn new(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
        }
    }
}

/// 检索语句生成结果
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct Queries {
    /// List of web search queries.
    pub queries: Vec<SearchQuery>,
}
