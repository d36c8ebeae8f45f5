use anyhow::Result;
use tracing::info;

use crate::generator::context::GeneratorContext;
use crate::generator::error::ReportError;
use crate::generator::state::SectionRunState;
use crate::llm::LanguageModel;
use crate::search::{SearchProvider, run_search_queries};
use crate::types::report::{Queries, Section};
use crate::utils::prompt::fill_template;
use crate::utils::sources::format_search_query_results;

const QUERY_GENERATOR_INSTRUCTIONS: &str = "Your goal is to generate targeted web search queries that will gather comprehensive information for writing a technical report section.

Topic for this section:
{section_topic}

When generating {number_of_queries} search queries, ensure that they:
1. Cover different aspects of the topic (e.g., core features, real-world applications, technical architecture)
2. Include specific technical terms related to the topic
3. Target recent information by including year markers where relevant (e.g., \"2024\")
4. Look for comparisons or differentiators from similar technologies/approaches
5. Search for both official documentation and practical implementation examples

Your queries should be:
- Specific enough to avoid generic results
- Technical enough to capture detailed implementation information
- Diverse enough to cover all aspects of the section plan
- Focused on authoritative sources (documentation, technical blogs, academic papers)";

const QUERY_GENERATOR_USER_INSTRUCTION: &str = "Generate search queries on the provided topic.";

const SECTION_WRITER_INSTRUCTIONS: &str = "You are an expert technical writer crafting one section of a technical report.

Title for the section:
{section_title}

Topic for this section:
{section_topic}

Guidelines for writing:

1. Technical Accuracy:
- Include specific version numbers
- Reference concrete metrics/benchmarks
- Cite official documentation
- Use technical terminology precisely

2. Length and Style:
- Strict 150-200 word limit
- No marketing language
- Technical focus
- Write in simple, clear language
- Start with your most important insight in **bold**
- Use short paragraphs (2-3 sentences max)

3. Structure:
- Use ## for section title (Markdown format)
- Only use ONE structural element IF it helps clarify your point:
  * Either a focused table comparing 2-3 key items (using Markdown table syntax)
  * Or a short list (3-5 items) using proper Markdown list syntax
- End with ### Sources that references the below source material formatted as:
  * List each source with title, date, and URL
  * Format: `- Title : URL`

4. Writing Approach:
- Include at least one specific example or case study if available
- Use concrete details over general statements
- Make every word count
- No preamble prior to creating the section content
- Focus on your single most important point

Use this source material obtained from web searches to help write the section:
{context}

Quality checks:
- Format should be Markdown
- Exactly 150-200 words (excluding title and sources)
- Careful use of only ONE structural element (table or bullet list) and only if it helps clarify your point
- One specific example / case study if available
- Starts with bold insight
- No preamble prior to creating the section content
- Sources cited at end";

const SECTION_WRITER_USER_INSTRUCTION: &str = "Generate a report section based on the provided sources.";

/// 单个调研章节的写作流水线：生成检索语句 → 网络检索 → 撰写章节
pub struct SectionBuilder<'a, M, S> {
    context: &'a GeneratorContext<M, S>,
}

impl<'a, M, S> SectionBuilder<'a, M, S>
where
    M: LanguageModel,
    S: SearchProvider,
{
    pub fn new(context: &'a GeneratorContext<M, S>) -> Self {
        Self { context }
    }

    /// 依次执行三个阶段，返回填充了内容的章节
    pub async fn process_section(&self, section: Section) -> Result<Section> {
        let mut run_state = SectionRunState::new(section);

        self.generate_queries(&mut run_state).await?;
        self.search_web(&mut run_state).await;
        self.write_section(&mut run_state).await?;

        Ok(run_state.section)
    }

    async fn generate_queries(&self, run_state: &mut SectionRunState) -> Result<()> {
        let section = &run_state.section;
        let number_of_queries = self.context.config.report.number_of_queries;
        info!(section = %section.name, "🧭 生成检索语句...");

        let number_of_queries = number_of_queries.to_string();
        let system_prompt = fill_template(
            QUERY_GENERATOR_INSTRUCTIONS,
            &[
                ("section_topic", section.description.as_str()),
                ("number_of_queries", number_of_queries.as_str()),
            ],
        );

        let queries: Queries = self
            .context
            .llm_client
            .extract(&system_prompt, QUERY_GENERATOR_USER_INSTRUCTION)
            .await
            .map_err(|e| ReportError::QueryGeneration {
                section: section.name.clone(),
                reason: e.to_string(),
            })?;

        info!(
            section = %section.name,
            count = queries.queries.len(),
            "✅ 检索语句生成完成"
        );
        run_state.search_queries = queries.queries;
        Ok(())
    }

    async fn search_web(&self, run_state: &mut SectionRunState) {
        let report_config = &self.context.config.report;
        info!(
            section = %run_state.section.name,
            queries = run_state.search_queries.len(),
            "🔎 网络检索中..."
        );

        let result_sets = run_search_queries(
            &self.context.search_client,
            &run_state.search_queries,
            report_config.max_results_per_query,
            report_config.include_raw_content,
        )
        .await;

        run_state.source_context = format_search_query_results(
            &result_sets,
            report_config.max_source_tokens,
            report_config.include_raw_content,
        );
    }

    async fn write_section(&self, run_state: &mut SectionRunState) -> Result<()> {
        let section = &run_state.section;
        info!(section = %section.name, "✍️ 撰写调研章节...");

        let system_prompt = fill_template(
            SECTION_WRITER_INSTRUCTIONS,
            &[
                ("section_title", section.name.as_str()),
                ("section_topic", section.description.as_str()),
                ("context", run_state.source_context.as_str()),
            ],
        );

        let content = self
            .context
            .llm_client
            .prompt(&system_prompt, SECTION_WRITER_USER_INSTRUCTION)
            .await
            .map_err(|e| ReportError::Writing {
                section: section.name.clone(),
                reason: e.to_string(),
            })?;

        info!(section = %section.name, "✅ 调研章节撰写完成");
        run_state.section.content = content;
        Ok(())
    }
}
