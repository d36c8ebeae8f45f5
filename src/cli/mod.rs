use crate::config::{Config, LLMProvider};
use clap::Parser;
use std::path::PathBuf;

/// DeepResearch-RS - 由Rust与AI驱动的调研报告生成引擎
#[derive(Parser, Debug)]
#[command(name = "deepresearch-rs")]
#[command(
    about = "AI-based research report generator. It plans report sections, researches each section on the web in parallel, and compiles a Markdown report."
)]
#[command(version)]
pub struct Args {
    /// 报告主题
    pub topic: String,

    /// 报告输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 同时输出HTML渲染结果
    #[arg(long)]
    pub render_html: bool,

    /// LLM Provider (openai, deepseek, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 模型名称
    #[arg(short, long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 同时执行的章节任务上限
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// 检索服务 API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 每个章节生成的检索语句数量
    #[arg(long)]
    pub number_of_queries: Option<usize>,

    /// 每条检索语句返回的最大结果数
    #[arg(long)]
    pub max_results_per_query: Option<u32>,

    /// 章节资料上下文的token预算
    #[arg(long)]
    pub max_source_tokens: Option<usize>,

    /// 不请求网页原文，只使用检索摘要
    #[arg(long)]
    pub no_raw_content: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> anyhow::Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定的配置文件必须可读
            Config::from_file(config_path)?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("deepresearch.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path)?
            } else {
                Config::default()
            }
        };

        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            config.llm.provider = provider_str
                .parse::<LLMProvider>()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.llm.max_parallels = max_parallels;
        }

        // 检索与报告配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }
        if let Some(number_of_queries) = self.number_of_queries {
            config.report.number_of_queries = number_of_queries;
        }
        if let Some(max_results_per_query) = self.max_results_per_query {
            config.report.max_results_per_query = max_results_per_query;
        }
        if let Some(max_source_tokens) = self.max_source_tokens {
            config.report.max_source_tokens = max_source_tokens;
        }
        if self.no_raw_content {
            config.report.include_raw_content = false;
        }

        if self.render_html {
            config.render_html = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}

// Include tests
#[cfg(test)]
mod tests;
