use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::DraftError;
use crate::generator::prompts;
use crate::llm::ChatClient;
use crate::types::draft::{GenerationResult, Item};

/// 预设的目标读者
pub const AUDIENCES: [&str; 5] = [
    "college students",
    "researchers",
    "teachers",
    "blog readers",
    "general audience",
];

/// 预设的字数选项
pub const WORD_COUNTS: [u32; 3] = [500, 1000, 1500];

/// 写作全文所需的全部输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRequest {
    pub title: String,
    pub sources: Vec<Item>,
    pub audience: String,
    pub word_count: u32,
}

impl ArticleRequest {
    pub fn from_result(result: &GenerationResult, audience: &str, word_count: u32) -> Self {
        Self {
            title: result.lead_text.clone(),
            sources: result.items.clone(),
            audience: audience.to_string(),
            word_count,
        }
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty()
            || self.sources.is_empty()
            || self.audience.trim().is_empty()
            || self.word_count == 0
        {
            return Err(DraftError::IncompleteArticleRequest);
        }
        Ok(())
    }
}

/// 根据标题与参考文献生成全文
pub async fn generate_article(client: &dyn ChatClient, request: &ArticleRequest) -> Result<String> {
    request.validate()?;

    tracing::info!(
        "✍️ 正在为 {} 撰写约 {} 字的文章...",
        request.audience,
        request.word_count
    );
    let prompt = prompts::article_prompt(request);
    client.chat(prompts::ARTICLE_SYSTEM_PROMPT, &prompt).await
}
