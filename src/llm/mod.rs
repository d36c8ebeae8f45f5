use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod client;

/// 语言模型调用接口，报告流水线只依赖该接口
#[allow(async_fn_in_trait)]
pub trait LanguageModel {
    /// 结构化输出：按 `T` 的JSON Schema约束生成并反序列化
    async fn extract<T>(&self, system_prompt: &str, user_prompt: &str) -> Result<T>
    where
        T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + 'static;

    /// 自由文本生成
    async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}
