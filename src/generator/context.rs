use anyhow::Result;

use crate::config::Config;
use crate::llm::client::LLMClient;
use crate::search::TavilyClient;

/// 一次报告生成过程的运行上下文，持有外部协作者与配置
pub struct GeneratorContext<M, S> {
    /// LLM调用器，用于与AI通信。
    pub llm_client: M,
    /// 网络检索服务
    pub search_client: S,
    /// 配置
    pub config: Config,
}

impl<M, S> GeneratorContext<M, S> {
    pub fn new(llm_client: M, search_client: S, config: Config) -> Self {
        Self {
            llm_client,
            search_client,
            config,
        }
    }
}

impl GeneratorContext<LLMClient, TavilyClient> {
    /// 根据配置创建真实的模型与检索客户端
    pub fn from_config(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.llm.clone())?;
        let search_client = TavilyClient::new(config.search.clone())?;
        Ok(Self::new(llm_client, search_client, config))
    }
}
