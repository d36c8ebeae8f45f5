use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 报告输出路径（Markdown）
    pub output_path: PathBuf,

    /// 是否额外输出HTML渲染结果
    pub render_html: bool,

    /// 是否启用详细日志
    pub verbose: bool,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 网络检索配置
    pub search: SearchConfig,

    /// 报告生成配置
    pub report: ReportConfig,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 模型名称
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 单次调用超时时间（秒），0表示不限制
    pub timeout_seconds: u64,

    /// 同时执行的章节任务上限，0表示不限制
    pub max_parallels: usize,
}

/// 网络检索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// 检索服务 API KEY
    pub api_key: String,

    /// 检索服务基地址
    pub api_base_url: String,

    /// 检索深度
    pub search_depth: String,

    /// 单次检索超时时间（秒）
    pub timeout_seconds: u64,
}

/// 报告生成配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    /// 提供给规划阶段的报告结构说明
    pub report_structure: String,

    /// 每个章节生成的检索语句数量
    pub number_of_queries: usize,

    /// 每条检索语句返回的最大结果数
    pub max_results_per_query: u32,

    /// 是否请求网页原文
    pub include_raw_content: bool,

    /// 章节资料上下文的token预算
    pub max_source_tokens: usize,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

pub const DEFAULT_REPORT_STRUCTURE: &str = "The report structure should focus on breaking-down the user-provided topic:

1. Introduction (no research needed)
   - Brief overview of the topic area

2. Main Body Sections:
   - Each section should focus on a sub-topic of the user-provided topic
   - Include any key concepts and definitions
   - Provide real-world examples or case studies where applicable

3. Conclusion (no research needed)
   - Aim for 1 structural element (either a list or table) that distills the main body sections
   - Provide a concise summary of the report";

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./outputs/final_output.md"),
            render_html: false,
            verbose: false,
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        let api_key = std::env::var("DEEPRESEARCH_LLM_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .unwrap_or_default();
        Self {
            provider: LLMProvider::default(),
            api_key,
            api_base_url: String::from("https://api.openai.com/v1"),
            model: String::from("gpt-4o"),
            max_tokens: 16384,
            temperature: 0.0,
            timeout_seconds: 300,
            max_parallels: 0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TAVILY_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.tavily.com"),
            search_depth: String::from("advanced"),
            timeout_seconds: 60,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_structure: DEFAULT_REPORT_STRUCTURE.to_string(),
            number_of_queries: 5,
            max_results_per_query: 6,
            include_raw_content: true,
            max_source_tokens: 4000,
        }
    }
}
