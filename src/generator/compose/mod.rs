//! 成稿阶段 - 整理调研上下文并并发撰写不需要调研的章节

use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Write;
use tracing::info;

use crate::generator::compose::final_section_writer::write_final_section;
use crate::generator::context::GeneratorContext;
use crate::generator::error::ReportError;
use crate::llm::LanguageModel;
use crate::types::report::Section;
use crate::utils::threads::do_parallel_with_limit;

pub mod final_section_writer;

/// 不需要网络检索的章节，保持规划顺序
pub fn sections_without_research(sections: &[Section]) -> Vec<Section> {
    sections.iter().filter(|s| !s.research).cloned().collect()
}

/// 按规划顺序把已完成的调研章节拼接为总结性章节的写作上下文。
///
/// 规划中的调研章节必须都已完成，否则返回 [`ReportError::MissingSection`]。
pub fn format_completed_sections(
    sections: &[Section],
    completed: &[Section],
) -> Result<String, ReportError> {
    let by_name: HashMap<&str, &Section> =
        completed.iter().map(|s| (s.name.as_str(), s)).collect();

    let mut formatted = String::new();
    for (idx, planned) in sections.iter().filter(|s| s.research).enumerate() {
        let done = by_name
            .get(planned.name.as_str())
            .ok_or_else(|| ReportError::MissingSection(planned.name.clone()))?;

        let _ = write!(
            formatted,
            "{sep}\nSection {num}: {name}\n{sep}\nDescription:\n{desc}\n\nContent:\n{content}\n\n",
            sep = "=".repeat(60),
            num = idx + 1,
            name = done.name,
            desc = done.description,
            content = done.content,
        );
    }

    Ok(formatted)
}

/// 为每个不需要调研的章节启动写作任务并等待全部完成，返回每个任务的单元素增量
pub async fn execute<M, S>(
    context: &GeneratorContext<M, S>,
    sections: &[Section],
    research_context: &str,
) -> Result<Vec<Vec<Section>>>
where
    M: LanguageModel,
{
    let final_sections = sections_without_research(sections);
    if final_sections.is_empty() {
        info!("⏭️ 没有需要总结撰写的章节");
        return Ok(Vec::new());
    }

    info!(count = final_sections.len(), "🚀 启动总结性章节撰写任务");

    let writer_futures: Vec<_> = final_sections
        .into_iter()
        .map(|section| async move {
            let completed = write_final_section(context, section, research_context).await?;
            Ok::<_, anyhow::Error>(vec![completed])
        })
        .collect();

    let outcomes =
        do_parallel_with_limit(writer_futures, context.config.llm.max_parallels).await;
    outcomes.into_iter().collect()
}
