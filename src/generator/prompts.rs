//! 发送给模型的提示词

use crate::generator::article::ArticleRequest;
use crate::types::text_type::TextType;

pub const TOPIC_SYSTEM_PROMPT: &str = "You are DraftMate, an AI writing assistant specializing in creating compelling, well-crafted topic suggestions.";

pub const SOURCES_SYSTEM_PROMPT: &str = "You are DraftMate, an AI writing assistant that drafts article titles and MLA works-cited lists.";

pub const ARTICLE_SYSTEM_PROMPT: &str = "You are DraftMate, a world-class SEO content writer.";

const DEFAULT_TITLE_INSTRUCTION: &str =
    "Create a concise, descriptive, and engaging topic title (4-8 words).";

/// 话题建议提示词
pub fn topic_suggestion_prompt(topic: &str, text_type: Option<TextType>) -> String {
    let (title_instruction, context_description) = match text_type {
        Some(text_type) => (
            text_type.title_instruction(),
            format!(
                "The user wants to write {}. ",
                text_type.context_description()
            ),
        ),
        None => (DEFAULT_TITLE_INSTRUCTION, String::new()),
    };

    format!(
        r#"USER INPUT: "{topic}"
{context_description}

INSTRUCTIONS FOR MAIN SUGGESTED TOPIC:
{title_instruction}

QUALITY REQUIREMENTS FOR MAIN SUGGESTION:
- This should be your ABSOLUTE BEST suggestion - the most refined, polished, and compelling version
- Make it a SINGLE PHRASE - NO colons, NO subtitles, just one flowing phrase
- Keep it concise (4-8 words) but still descriptive and engaging
- Make it memorable, clear, and engaging
- Ensure it captures the essence of the user's input perfectly
- Examples of good topics: "Social Media's Impact on Modern Communication", "Artificial Intelligence Transforming Healthcare Today", "Climate Change and Global Action"

INSTRUCTIONS FOR ALTERNATIVE EXAMPLES:
Generate 3 alternative topic suggestions that are:
- SINGLE PHRASES like the main suggestion (NO colons, NO subtitles)
- Concise (4-8 words) but descriptive
- Related to the main topic but explore different angles or perspectives
- Good quality but intentionally less polished than the main suggestion
- Diverse in their approach (don't make them too similar to each other)

OUTPUT FORMAT (follow this EXACTLY):
SUGGESTED TOPIC: [Your BEST, most refined single-phrase topic (4-8 words, NO colons)]
EXAMPLE 1: [Alternative single-phrase topic (NO colons)]
EXAMPLE 2: [Alternative single-phrase topic (NO colons)]
EXAMPLE 3: [Alternative single-phrase topic (NO colons)]"#
    )
}

/// 标题 + MLA 参考文献提示词
pub fn sources_prompt(topic: &str, source_count: usize) -> String {
    format!(
        r#"1. Generate a compelling article title for this topic: {topic}.
2. Provide {source_count} credible sources in proper MLA format for a "Works Cited" section.
   - Each source must include: Author(s). Title. Publisher, Year. URL (if applicable).
   - Number them 1 to {source_count}.
3. Output only the title and the sources in order, properly formatted for MLA."#
    )
}

/// 全文写作提示词，参考文献按 1 开始重新编号
pub fn article_prompt(request: &ArticleRequest) -> String {
    let sources_text = request
        .sources
        .iter()
        .enumerate()
        .map(|(index, source)| format!("{}. {}", index + 1, source.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"ARTICLE TYPE: offsite article/blog post
TARGET AUDIENCE: {audience}
NUMBER OF WORDS: {word_count}

Write an article based on this title: "{title}"
Follow this structure:
1. Hook/introduction related to the title.
2. Body paragraphs that include 2 direct MLA-cited quotes from the sources below.
3. Logical transitions, emotional resonance, and human-like rhythm.
4. Conversational, spontaneous tone.
5. Concluding paragraph that ties everything together naturally.

Use proper MLA in-text citations (Author Last Name, Title).
Here are the sources:
{sources_text}"#,
        audience = request.audience,
        word_count = request.word_count,
        title = request.title,
    )
}
