//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::LLMConfig;
use crate::llm::LanguageModel;
use crate::utils::threads::with_timeout;

mod providers;

use providers::ProviderClient;

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        info!(provider = %self.config.provider, model = %self.config.model, "🔄 正在检查模型连接...");
        match self
            .prompt("System: You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                info!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "❌ 模型连接失败");
                Err(e)
            }
        }
    }
}

impl LanguageModel for LLMClient {
    async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static,
    {
        debug!(model = %self.config.model, "调用模型结构化输出");
        let extractor = self.client.create_extractor::<T>(system_prompt, &self.config);
        with_timeout(
            self.config.timeout_seconds,
            "模型结构化输出",
            extractor.extract(user_prompt),
        )
        .await
    }

    async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        debug!(model = %self.config.model, "调用模型文本生成");
        let agent = self.client.create_agent(system_prompt, &self.config);
        with_timeout(
            self.config.timeout_seconds,
            "模型文本生成",
            agent.prompt(user_prompt),
        )
        .await
    }
}
