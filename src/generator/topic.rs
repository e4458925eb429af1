//! 话题建议与交互选择状态

use anyhow::Result;
use serde::Serialize;

use crate::generator::prompts;
use crate::llm::ChatClient;
use crate::parser::parse_suggestions;
use crate::types::draft::TopicSuggestions;
use crate::types::text_type::TextType;

/// 尚未生成任何建议时展示的示例话题
pub const DEFAULT_TOPICS: [&str; 3] = [
    "The Impact of Social Media on Modern Communication",
    "How Technology is Transforming Education",
    "The Role of Renewable Energy in Fighting Climate Change",
];

/// 请求模型给出话题建议，空白输入直接返回空结果
pub async fn suggest(
    client: &dyn ChatClient,
    topic: &str,
    text_type: Option<TextType>,
) -> Result<TopicSuggestions> {
    if topic.trim().is_empty() {
        return Ok(TopicSuggestions::default());
    }

    let prompt = prompts::topic_suggestion_prompt(topic, text_type);
    let response = client.chat(prompts::TOPIC_SYSTEM_PROMPT, &prompt).await?;
    let suggestions = parse_suggestions(&response);

    tracing::debug!(
        "suggestions for {:?}: main = {:?}, examples = {}",
        topic,
        suggestions.suggested_topic,
        suggestions.examples.len()
    );
    Ok(suggestions)
}

/// 被选中话题的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    User,
    Ai,
    Example,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub text: String,
    pub kind: SelectionKind,
}

/// 交互模式下的话题面板
#[derive(Debug, Default)]
pub struct TopicBoard {
    topic: String,
    suggestions: TopicSuggestions,
    selection: Option<Selection>,
}

impl TopicBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn suggestions(&self) -> &TopicSuggestions {
        &self.suggestions
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// 更新用户输入，空白输入会清空建议与选择
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
        if self.topic.trim().is_empty() {
            self.suggestions = TopicSuggestions::default();
            self.selection = None;
        }
    }

    /// 应用建议结果；结果对应的输入已经过期时丢弃并返回 false
    pub fn apply_suggestions(&mut self, for_topic: &str, suggestions: TopicSuggestions) -> bool {
        if for_topic != self.topic {
            return false;
        }
        self.suggestions = suggestions;
        true
    }

    /// 当前展示的示例话题
    pub fn display_topics(&self) -> Vec<&str> {
        if !self.topic.trim().is_empty() && !self.suggestions.examples.is_empty() {
            self.suggestions.examples.iter().map(String::as_str).collect()
        } else {
            DEFAULT_TOPICS.to_vec()
        }
    }

    /// 选择话题，重复选择同一项会取消选择
    pub fn select(&mut self, text: impl Into<String>, kind: SelectionKind) {
        let text = text.into();
        let same = self
            .selection
            .as_ref()
            .is_some_and(|current| current.text == text && current.kind == kind);

        self.selection = if same {
            None
        } else {
            Some(Selection { text, kind })
        };
    }

    /// 按展示序号（从 1 开始）选择示例话题
    pub fn select_example(&mut self, number: usize) -> bool {
        let Some(text) = number
            .checked_sub(1)
            .and_then(|index| self.display_topics().get(index).map(|t| t.to_string()))
        else {
            return false;
        };
        self.select(text, SelectionKind::Example);
        true
    }

    /// 选择用户自己输入的话题
    pub fn select_user(&mut self) -> bool {
        if self.topic.trim().is_empty() {
            return false;
        }
        self.select(self.topic.clone(), SelectionKind::User);
        true
    }

    /// 选择模型推荐的话题
    pub fn select_ai(&mut self) -> bool {
        match self.suggestions.suggested_topic.clone() {
            Some(topic) if !self.topic.trim().is_empty() => {
                self.select(topic, SelectionKind::Ai);
                true
            }
            _ => false,
        }
    }

    /// 有选择且没有进行中的请求时才能进入下一步
    pub fn can_proceed(&self, loading: bool) -> bool {
        self.selection.is_some() && !loading
    }
}
