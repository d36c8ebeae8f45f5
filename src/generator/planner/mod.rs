//! 报告规划 - 根据主题生成章节列表

use anyhow::Result;
use std::collections::HashSet;
use tracing::info;

use crate::config::ReportConfig;
use crate::generator::error::ReportError;
use crate::llm::LanguageModel;
use crate::types::report::{Section, Sections};
use crate::utils::prompt::fill_template;

const REPORT_PLANNER_INSTRUCTIONS: &str = "You are an expert technical writer, helping to plan a report.

The report will be focused on the following topic:
{topic}

The report should follow this organization:
{report_organization}

Now, generate the sections of the report. Each section should have the following fields:
- name - Name for this section of the report.
- description - Brief overview of the main topics and concepts to be covered in this section.
- research - Whether to perform web search for this section of the report.
- content - The content of the section, which you will leave blank for now.

Every section name must be unique within the report.
Consider which sections require web search. For example, introduction and conclusion will not
require research because they will distill information from other parts of the report.";

const REPORT_PLANNER_USER_INSTRUCTION: &str = "Generate the sections of the report. Your response must include a 'sections' field containing a list of sections. Each section must have: name, description, research, and content fields.";

/// 调用模型生成报告章节规划。失败时整个报告生成中止。
pub async fn plan_sections<M: LanguageModel>(
    llm_client: &M,
    report_config: &ReportConfig,
    topic: &str,
) -> Result<Vec<Section>> {
    info!(topic = %topic, "🗺️ 开始规划报告章节...");

    let system_prompt = fill_template(
        REPORT_PLANNER_INSTRUCTIONS,
        &[
            ("topic", topic),
            ("report_organization", report_config.report_structure.as_str()),
        ],
    );

    let plan: Sections = llm_client
        .extract(&system_prompt, REPORT_PLANNER_USER_INSTRUCTION)
        .await
        .map_err(|e| ReportError::Planning(e.to_string()))?;

    let sections = validate_plan(plan.sections)?;

    let research_count = sections.iter().filter(|s| s.research).count();
    info!(
        sections = sections.len(),
        research = research_count,
        "✅ 报告规划完成: {}",
        sections
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join("、")
    );
    Ok(sections)
}

/// 校验规划结果：章节非空、名称非空且唯一，并清空模型预填的内容
fn validate_plan(sections: Vec<Section>) -> Result<Vec<Section>, ReportError> {
    if sections.is_empty() {
        return Err(ReportError::InvalidPlan("规划结果不包含任何章节".to_string()));
    }

    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(sections.len());
    for mut section in sections {
        section.name = section.name.trim().to_string();
        if section.name.is_empty() {
            return Err(ReportError::InvalidPlan("存在名称为空的章节".to_string()));
        }
        if !seen.insert(section.name.clone()) {
            return Err(ReportError::InvalidPlan(format!(
                "章节名称重复: {}",
                section.name
            )));
        }
        section.content.clear();
        validated.push(section);
    }
    Ok(validated)
}
