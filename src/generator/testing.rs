use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::ChatClient;

/// 按顺序返回预设响应的聊天客户端
pub struct ScriptedClient {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    ready: bool,
}

impl ScriptedClient {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
            ready: true,
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new(&[])
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn ensure_ready(&self) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(anyhow!("scripted client offline"))
        }
    }

    async fn chat(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted response left"))
    }
}
