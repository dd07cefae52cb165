//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

use crate::config::LLMConfig;
use crate::types::chat::ChatMessage;

mod providers;
pub mod utils;

use providers::ProviderClient;
use utils::evaluate_befitting_model;

/// 文本生成服务。生成流程只依赖该trait，便于在测试中替换为脚本化实现
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 单轮生成，返回模型的原始文本
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// 携带历史的对话，返回模型的原始文本
    async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String>;

    /// 当前首选模型名称，用于日志
    fn model_name(&self) -> String;
}

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(config)?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match self
            .generate("You are a helpful assistant.", "Hello")
            .await
        {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 通用重试逻辑，仅针对服务调用失败
    async fn retry_with_backoff<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, anyhow::Error>>,
    {
        let max_retries = self.config.retry_attempts.max(1);
        let retry_delay_ms = self.config.retry_delay_ms;
        let mut retries = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    retries += 1;
                    eprintln!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries, max_retries, err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    async fn generate_inner(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        befitting_model: String,
        fallover_model: Option<String>,
    ) -> Result<String> {
        let agent = self
            .client
            .create_agent(&befitting_model, system_prompt, &self.config);

        let result = self
            .retry_with_backoff(|| async { agent.prompt(user_prompt).await })
            .await;

        match (result, fallover_model) {
            (Ok(text), _) => Ok(text),
            (Err(e), Some(model)) => {
                eprintln!(
                    "❌ 调用模型服务出错，尝试 {} 次均失败，尝试使用备选模型{}...{}",
                    self.config.retry_attempts, model, e
                );
                tracing::warn!(model = %model, error = %e, "falling back to powerful model");
                Box::pin(self.generate_inner(system_prompt, user_prompt, model, None)).await
            }
            (Err(e), None) => {
                eprintln!(
                    "❌ 调用模型服务出错，尝试 {} 次均失败...{}",
                    self.config.retry_attempts, e
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl TextGenerator for LLMClient {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let (befitting_model, fallover_model) =
            evaluate_befitting_model(&self.config, system_prompt, user_prompt);
        tracing::debug!(model = %befitting_model, "generate");

        self.generate_inner(system_prompt, user_prompt, befitting_model, fallover_model)
            .await
    }

    async fn chat(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String> {
        let agent = self
            .client
            .create_agent(&self.config.model_efficient, system_prompt, &self.config);
        tracing::debug!(model = %self.config.model_efficient, turns = history.len(), "chat");

        self.retry_with_backoff(|| async { agent.chat(message, history).await })
            .await
    }

    fn model_name(&self) -> String {
        self.config.model_efficient.clone()
    }
}
