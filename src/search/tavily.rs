//! Tavily 检索服务客户端

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SearchConfig;
use crate::search::{SearchError, SearchProvider, SearchRequest};
use crate::types::search::SearchDocument;

#[derive(Debug, Serialize)]
struct TavilySearchBody<'a> {
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<SearchDocument>,
}

#[derive(Clone)]
pub struct TavilyClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl TavilyClient {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.config.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchDocument>, SearchError> {
        let body = TavilySearchBody {
            query: &request.query,
            max_results: request.max_results,
            search_depth: &self.config.search_depth,
            include_answer: false,
            include_raw_content: request.include_raw_content,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TavilySearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Provider(format!("无法解析检索结果: {}", e)))?;
        Ok(parsed.results)
    }
}
