use std::collections::HashSet;
use std::fmt::Write;

use crate::types::search::{SearchDocument, SearchResultSet};
use crate::utils::token_estimator::TokenEstimator;

/// 将多组检索结果整理为章节写作所需的资料上下文。
///
/// 按URL去重（先出现者保留），原文按文档出现顺序依次消耗 `max_tokens` 预算：
/// 超出剩余预算的原文被截断，预算耗尽后的文档只保留标题、链接与摘要。
pub fn format_search_query_results(
    result_sets: &[SearchResultSet],
    max_tokens: usize,
    include_raw_content: bool,
) -> String {
    let estimator = TokenEstimator::new();
    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut remaining = max_tokens;
    let mut formatted = String::from("Sources:\n\n");

    let documents = result_sets
        .iter()
        .flat_map(|set| set.results.iter())
        .filter(|doc| seen_urls.insert(doc.url.as_str()));

    for doc in documents {
        write_document_header(&mut formatted, doc);

        if !include_raw_content {
            formatted.push('\n');
            continue;
        }

        match doc.raw_content.as_deref().filter(|raw| !raw.trim().is_empty()) {
            Some(raw) if remaining > 0 => {
                let kept = estimator.truncate_to_tokens(raw, remaining);
                remaining = remaining.saturating_sub(estimator.estimate_tokens(kept));
                let _ = write!(formatted, "Full source content: {}", kept);
                if kept.len() < raw.len() {
                    formatted.push_str("... [truncated]");
                }
                formatted.push_str("\n\n");
            }
            Some(_) => {
                formatted.push_str("Full source content: [omitted, source budget exhausted]\n\n");
            }
            None => formatted.push('\n'),
        }
    }

    formatted.trim_end().to_string()
}

fn write_document_header(out: &mut String, doc: &SearchDocument) {
    let _ = write!(
        out,
        "Source: {}\n===\nURL: {}\n===\nMost relevant content from source: {}\n===\n",
        doc.title, doc.url, doc.content
    );
}
