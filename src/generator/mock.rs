//! 测试用的模型与检索替身

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::llm::LanguageModel;
use crate::search::{SearchError, SearchProvider, SearchRequest};
use crate::types::search::SearchDocument;

/// 章节写作提示词中标题所在的行，用于匹配脚本化的回复
pub fn title_marker(name: &str) -> String {
    format!("Title for the section:\n{}\n", name)
}

struct TextReply {
    marker: String,
    reply: Result<String, String>,
    delay_ms: u64,
}

/// 按脚本回复的模型：结构化输出按目标类型分派，文本输出按提示词中的标记匹配
pub struct ScriptedModel {
    plan: Result<Value, String>,
    queries: Value,
    failing_query_markers: Vec<String>,
    replies: Vec<TextReply>,
    structured_calls: Mutex<Vec<(String, String)>>,
    text_calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self {
            plan: Err("no plan scripted".to_string()),
            queries: json!({
                "queries": [
                    {"search_query": "query alpha"},
                    {"search_query": "query beta"}
                ]
            }),
            failing_query_markers: Vec::new(),
            replies: Vec::new(),
            structured_calls: Mutex::new(Vec::new()),
            text_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_plan(mut self, plan: Value) -> Self {
        self.plan = Ok(plan);
        self
    }

    pub fn with_plan_error(mut self, message: &str) -> Self {
        self.plan = Err(message.to_string());
        self
    }

    /// 系统提示词包含 `marker` 时，检索语句生成失败
    pub fn failing_queries_for(mut self, marker: &str) -> Self {
        self.failing_query_markers.push(marker.to_string());
        self
    }

    /// 为标题为 `name` 的章节设定写作结果
    pub fn with_section_reply(mut self, name: &str, reply: &str, delay_ms: u64) -> Self {
        self.replies.push(TextReply {
            marker: title_marker(name),
            reply: Ok(reply.to_string()),
            delay_ms,
        });
        self
    }

    pub fn with_section_error(mut self, name: &str, message: &str) -> Self {
        self.replies.push(TextReply {
            marker: title_marker(name),
            reply: Err(message.to_string()),
            delay_ms: 0,
        });
        self
    }

    pub fn structured_calls(&self) -> Vec<(String, String)> {
        self.structured_calls.lock().unwrap().clone()
    }

    pub fn text_calls(&self) -> Vec<(String, String)> {
        self.text_calls.lock().unwrap().clone()
    }
}

impl LanguageModel for ScriptedModel {
    async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        self.structured_calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        tokio::task::yield_now().await;

        let type_name = std::any::type_name::<T>();
        let value = if type_name.ends_with("::Sections") {
            self.plan.clone().map_err(|e| anyhow!(e))?
        } else if type_name.ends_with("::Queries") {
            if self
                .failing_query_markers
                .iter()
                .any(|m| system_prompt.contains(m.as_str()))
            {
                return Err(anyhow!("malformed structured output"));
            }
            self.queries.clone()
        } else {
            return Err(anyhow!("unexpected structured type {}", type_name));
        };

        Ok(serde_json::from_value(value)?)
    }

    async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.text_calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let reply = self
            .replies
            .iter()
            .find(|r| system_prompt.contains(r.marker.as_str()))
            .ok_or_else(|| anyhow!("no scripted reply for prompt"))?;

        tokio::time::sleep(Duration::from_millis(reply.delay_ms)).await;
        reply.reply.clone().map_err(|e| anyhow!(e))
    }
}

/// 每条检索语句返回一篇文档的检索服务，可指定失败的检索语句
pub struct StaticSearch {
    failing: Vec<String>,
    calls: AtomicUsize,
}

impl StaticSearch {
    pub fn new() -> Self {
        Self {
            failing: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchDocument>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.failing.contains(&request.query) {
            return Err(SearchError::Provider("scripted failure".to_string()));
        }
        Ok(vec![SearchDocument {
            title: format!("Doc for {}", request.query),
            url: format!("https://example.com/{}", request.query.replace(' ', "-")),
            content: format!("snippet about {}", request.query),
            raw_content: Some(format!("raw text about {}", request.query)),
        }])
    }
}
