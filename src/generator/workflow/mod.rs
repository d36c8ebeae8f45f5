use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::state::ReportRunState;
use crate::generator::{compose, outlet, planner, research};
use crate::llm::LanguageModel;
use crate::search::SearchProvider;

use anyhow::Result;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    current_phase: Option<(String, Instant)>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            current_phase: None,
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.current_phase = Some((phase_name.to_string(), Instant::now()));
    }

    /// 结束当前阶段的计时，名称不匹配时返回None
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        match self.current_phase.take() {
            Some((name, start)) if name == phase_name => {
                let duration = start.elapsed();
                self.phase_durations.push((name, duration));
                Some(duration)
            }
            other => {
                self.current_phase = other;
                None
            }
        }
    }

    /// 获取总执行时间
    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 按执行顺序获取各阶段的执行时间
    pub fn get_phase_durations(&self) -> &[(String, Duration)] {
        &self.phase_durations
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 报告生成的各个阶段，严格按顺序推进，没有回退
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Planning,
    Researching,
    ContextFormatting,
    FinalWriting,
    Compiling,
    Done,
}

impl WorkflowStage {
    pub fn next(self) -> Self {
        match self {
            WorkflowStage::Planning => WorkflowStage::Researching,
            WorkflowStage::Researching => WorkflowStage::ContextFormatting,
            WorkflowStage::ContextFormatting => WorkflowStage::FinalWriting,
            WorkflowStage::FinalWriting => WorkflowStage::Compiling,
            WorkflowStage::Compiling | WorkflowStage::Done => WorkflowStage::Done,
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::Planning => "planning",
            WorkflowStage::Researching => "researching",
            WorkflowStage::ContextFormatting => "context_formatting",
            WorkflowStage::FinalWriting => "final_writing",
            WorkflowStage::Compiling => "compiling",
            WorkflowStage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// 报告生成工作流：规划 → 并发调研 → 整理上下文 → 并发撰写总结章节 → 编译
pub struct ReportWorkflow<'a, M, S> {
    context: &'a GeneratorContext<M, S>,
}

impl<'a, M, S> ReportWorkflow<'a, M, S>
where
    M: LanguageModel,
    S: SearchProvider,
{
    pub fn new(context: &'a GeneratorContext<M, S>) -> Self {
        Self { context }
    }

    /// 执行完整流程。任一阶段失败都会中止整个运行，不会产出不完整的报告。
    pub async fn run(&self, topic: &str) -> Result<ReportRunState> {
        let mut state = ReportRunState::new(topic);
        let mut timing = TimingScope::new();
        let mut stage = WorkflowStage::Planning;

        while stage != WorkflowStage::Done {
            let phase = stage.to_string();
            timing.start_phase(&phase);

            self.step(stage, &mut state).await?;

            if let Some(duration) = timing.end_phase(&phase) {
                info!(stage = %phase, "⏱️ 阶段完成，耗时 {:.2}秒", duration.as_secs_f64());
            }
            if self.context.config.verbose {
                debug!(stage = %phase, state = ?state, "阶段状态");
            }

            stage = stage.next();
        }

        info!("🎉 报告生成完成\n{}", timing.generate_timing_report());
        Ok(state)
    }

    async fn step(&self, stage: WorkflowStage, state: &mut ReportRunState) -> Result<()> {
        match stage {
            WorkflowStage::Planning => {
                state.sections = planner::plan_sections(
                    &self.context.llm_client,
                    &self.context.config.report,
                    &state.topic,
                )
                .await?;
            }
            WorkflowStage::Researching => {
                let deltas = research::execute(self.context, &state.sections).await?;
                state.absorb(deltas);
            }
            WorkflowStage::ContextFormatting => {
                state.research_context =
                    compose::format_completed_sections(&state.sections, &state.completed_sections)?;
            }
            WorkflowStage::FinalWriting => {
                let deltas =
                    compose::execute(self.context, &state.sections, &state.research_context)
                        .await?;
                state.absorb(deltas);
            }
            WorkflowStage::Compiling => {
                state.final_report =
                    outlet::compile_final_report(&state.sections, &state.completed_sections)?;
            }
            WorkflowStage::Done => {}
        }
        Ok(())
    }
}

/// 启动报告生成工作流，保存并返回最终报告
pub async fn launch(config: &Config, topic: &str) -> Result<String> {
    let context = GeneratorContext::from_config(config.clone())?;

    // 启动时检查模型连接
    context.llm_client.check_connection().await?;

    let state = ReportWorkflow::new(&context).run(topic).await?;
    outlet::save(config, &state.final_report).await?;

    Ok(state.final_report)
}
