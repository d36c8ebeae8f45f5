//! 调研阶段 - 为需要网络检索的章节并发执行写作流水线

use anyhow::Result;
use tracing::info;

use crate::generator::context::GeneratorContext;
use crate::generator::research::section_builder::SectionBuilder;
use crate::llm::LanguageModel;
use crate::search::SearchProvider;
use crate::types::report::Section;
use crate::utils::threads::do_parallel_with_limit;

pub mod section_builder;

/// 需要网络检索的章节，保持规划顺序
pub fn sections_requiring_research(sections: &[Section]) -> Vec<Section> {
    sections.iter().filter(|s| s.research).cloned().collect()
}

/// 为每个调研章节启动一条写作流水线并等待全部完成。
///
/// 每个任务返回只含自身章节的增量，由调用方在屏障之后合并。
/// 任一章节失败都会使整个调研阶段失败。
pub async fn execute<M, S>(
    context: &GeneratorContext<M, S>,
    sections: &[Section],
) -> Result<Vec<Vec<Section>>>
where
    M: LanguageModel,
    S: SearchProvider,
{
    let research_sections = sections_requiring_research(sections);
    if research_sections.is_empty() {
        info!("⏭️ 没有需要调研的章节");
        return Ok(Vec::new());
    }

    let max_parallels = context.config.llm.max_parallels;
    info!(
        count = research_sections.len(),
        max_parallels, "🚀 启动章节调研任务"
    );

    let builder = SectionBuilder::new(context);
    let builder = &builder;
    let section_futures: Vec<_> = research_sections
        .into_iter()
        .map(|section| async move {
            let completed = builder.process_section(section).await?;
            Ok::<_, anyhow::Error>(vec![completed])
        })
        .collect();

    let outcomes = do_parallel_with_limit(section_futures, max_parallels).await;
    outcomes.into_iter().collect()
}
