//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::{config::LLMConfig, error::DraftError, llm::client::utils::evaluate_befitting_model};

mod providers;
pub mod utils;

use providers::ProviderClient;

/// 生成器依赖的聊天能力
///
/// 就绪状态由实现方显式提供，调用方在发起请求前等待 `ensure_ready`。
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// 是否已经通过就绪探测
    fn is_ready(&self) -> bool;

    /// 完成一次性的就绪探测，之后的调用直接返回
    async fn ensure_ready(&self) -> Result<()>;

    /// 单轮对话
    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// 基于 rig 的LLM客户端
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
    readiness: Arc<OnceCell<()>>,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config)?;
        Ok(Self {
            config,
            client,
            readiness: Arc::new(OnceCell::new()),
        })
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        tracing::info!("🔄 正在检查模型连接 ({})...", self.config.provider);
        match self
            .prompt_with_model(
                &self.config.model_efficient,
                "You are a helpful assistant.",
                "Hello",
            )
            .await
        {
            Ok(_) => {
                tracing::info!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }

    /// 通用重试逻辑，用于处理异步操作的重试机制
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
                    tracing::warn!(
                        "❌ 调用模型服务出错，重试中 (第 {} / {}次尝试): {}",
                        retries,
                        max_retries,
                        err
                    );
                    if retries >= max_retries {
                        return Err(err);
                    }
                    tokio::time::sleep(Duration::from_millis(retry_delay_ms)).await;
                }
            }
        }
    }

    /// 使用指定模型完成一次带超时与重试的对话
    async fn prompt_with_model(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let agent = self
            .client
            .create_agent(model, system_prompt, &self.config)?;
        let timeout_seconds = self.config.timeout_seconds;
        let timeout = Duration::from_secs(timeout_seconds);

        self.retry_with_backoff(|| async {
            match tokio::time::timeout(timeout, agent.prompt(user_prompt)).await {
                Ok(result) => result,
                Err(_) => Err(DraftError::Timeout(timeout_seconds).into()),
            }
        })
        .await
    }
}

#[async_trait]
impl ChatClient for LLMClient {
    fn is_ready(&self) -> bool {
        self.readiness.initialized()
    }

    async fn ensure_ready(&self) -> Result<()> {
        self.readiness
            .get_or_try_init(|| self.check_connection())
            .await
            .map(|_| ())
            .map_err(|e| DraftError::ClientNotReady(e.to_string()).into())
    }

    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let (befitting_model, fallover_model) =
            evaluate_befitting_model(&self.config, system_prompt, user_prompt);
        tracing::debug!(
            "model = {}, prompt length = {}",
            befitting_model,
            system_prompt.len() + user_prompt.len()
        );

        match self
            .prompt_with_model(&befitting_model, system_prompt, user_prompt)
            .await
        {
            Ok(response) => Ok(response),
            Err(e) => match fallover_model {
                Some(model) => {
                    tracing::warn!(
                        "❌ 调用模型服务出错，尝试 {} 次均失败，尝试使用备选模型{}...{}",
                        self.config.retry_attempts,
                        model,
                        e
                    );
                    self.prompt_with_model(&model, system_prompt, user_prompt)
                        .await
                }
                None => Err(e),
            },
        }
    }
}
