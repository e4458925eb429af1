use anyhow::Result;

use crate::error::DraftError;
use crate::generator::prompts;
use crate::llm::ChatClient;
use crate::parser::{LeadFallback, extract_with};
use crate::types::draft::GenerationResult;

/// 生成文章标题与 MLA 参考文献列表
pub async fn generate_sources(
    client: &dyn ChatClient,
    topic: &str,
    source_count: usize,
    fallback: LeadFallback,
) -> Result<GenerationResult> {
    if topic.trim().is_empty() {
        return Err(DraftError::EmptyTopic.into());
    }

    let prompt = prompts::sources_prompt(topic, source_count);
    let response = client.chat(prompts::SOURCES_SYSTEM_PROMPT, &prompt).await?;
    let result = extract_with(&response, fallback);

    tracing::info!("📚 生成标题 {:?}，共 {} 条参考文献", result.lead_text, result.items.len());
    if result.items.len() != source_count {
        tracing::debug!(
            "requested {} sources, model returned {}",
            source_count,
            result.items.len()
        );
    }
    Ok(result)
}
