use anyhow::Result;
use tracing::info;

use crate::generator::context::GeneratorContext;
use crate::generator::error::ReportError;
use crate::llm::LanguageModel;
use crate::types::report::Section;
use crate::utils::prompt::fill_template;

const FINAL_SECTION_WRITER_INSTRUCTIONS: &str = "You are an expert technical writer crafting a section that synthesizes information from the rest of the report.

Title for the section:
{section_title}

Topic for this section:
{section_topic}

Available report content:
{context}

1. Section-Specific Approach:

For Introduction:
- Use # for report title (Markdown format)
- 50-100 word limit
- Write in simple and clear language
- Focus on the core motivation for the report in 1-2 paragraphs
- Use a clear narrative arc to introduce the report
- Include NO structural elements (no lists or tables)
- No sources section needed

For Conclusion/Summary:
- Use ## for section title (Markdown format)
- 100-150 word limit
- For comparative reports:
    * Must include a focused comparison table using Markdown table syntax
    * Table should distill insights from the report
    * Keep table entries clear and concise
- For non-comparative reports:
    * Only use ONE structural element IF it helps distill the points made in the report:
    * Either a focused table comparing items present in the report (using Markdown table syntax)
    * Or a short list using proper Markdown list syntax
- End with specific next steps or implications
- No sources section needed

2. Writing Approach:
- Use concrete details over general statements
- Make every word count
- Focus on your single most important point

3. Quality Checks:
- For introduction: 50-100 word limit, # for report title, no structural elements, no sources section
- For conclusion: 100-150 word limit, ## for section title, only ONE structural element at most, no sources section
- Markdown format
- Do not include word count or any preamble in your response";

const FINAL_SECTION_WRITER_USER_INSTRUCTION: &str =
    "Craft a report section based on the provided sources.";

/// 撰写不需要调研的章节（如引言、结论），以已完成的调研章节作为上下文
pub async fn write_final_section<M, S>(
    context: &GeneratorContext<M, S>,
    section: Section,
    research_context: &str,
) -> Result<Section>
where
    M: LanguageModel,
{
    info!(section = %section.name, "✍️ 撰写总结性章节...");

    let system_prompt = fill_template(
        FINAL_SECTION_WRITER_INSTRUCTIONS,
        &[
            ("section_title", section.name.as_str()),
            ("section_topic", section.description.as_str()),
            ("context", research_context),
        ],
    );

    let content = context
        .llm_client
        .prompt(&system_prompt, FINAL_SECTION_WRITER_USER_INSTRUCTION)
        .await
        .map_err(|e| ReportError::Writing {
            section: section.name.clone(),
            reason: e.to_string(),
        })?;

    info!(section = %section.name, "✅ 总结性章节撰写完成");
    Ok(section.with_content(content))
}
