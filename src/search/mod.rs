//! 网络检索 - 检索服务接口与并发检索

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::types::report::SearchQuery;
use crate::types::search::{SearchDocument, SearchResultSet};

pub mod tavily;

pub use tavily::TavilyClient;

/// 单次检索调用的错误，只在并发检索内部被捕获
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("检索语句无效: {0:?}")]
    InvalidQuery(String),

    #[error("检索请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("检索服务返回错误状态 {status}: {body}")]
    Status { status: u16, body: String },

    #[error("检索服务错误: {0}")]
    Provider(String),
}

/// 单次检索请求
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub include_raw_content: bool,
}

/// 检索服务接口
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchDocument>, SearchError>;
}

/// 为每条检索语句并发发起一次检索调用。
///
/// 单次调用失败（请求错误、服务错误、空语句）只会丢弃该条结果，
/// 不影响其它调用，也不会向调用方返回错误。结果按完成顺序收集，
/// 不保证与输入顺序一致。
pub async fn run_search_queries<P>(
    provider: &P,
    queries: &[SearchQuery],
    max_results: u32,
    include_raw_content: bool,
) -> Vec<SearchResultSet>
where
    P: SearchProvider + ?Sized,
{
    if queries.is_empty() {
        return Vec::new();
    }

    let mut pending: FuturesUnordered<_> = queries
        .iter()
        .map(|query| {
            let request = SearchRequest {
                query: query.search_query.trim().to_string(),
                max_results,
                include_raw_content,
            };
            async move {
                let outcome = if request.query.is_empty() {
                    Err(SearchError::InvalidQuery(request.query.clone()))
                } else {
                    provider.search(&request).await
                };
                (request.query, outcome)
            }
        })
        .collect();

    let mut result_sets = Vec::with_capacity(queries.len());
    while let Some((query, outcome)) = pending.next().await {
        match outcome {
            Ok(results) => {
                debug!(query = %query, count = results.len(), "检索完成");
                result_sets.push(SearchResultSet { query, results });
            }
            Err(e) => {
                warn!(query = %query, error = %e, "⚠️ 检索失败，已丢弃该条结果");
            }
        }
    }

    info!(
        succeeded = result_sets.len(),
        total = queries.len(),
        "🔎 并发检索结束"
    );
    result_sets
}
