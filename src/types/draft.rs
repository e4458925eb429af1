use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 一次生成请求得到的结构化结果
///
/// 每次生成都会重新构建，下一次生成会整体覆盖它。
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// 编号列表之前的引导文本（标题/论点）
    pub lead_text: String,
    /// 去掉序号后的列表项，顺序即引用编号
    pub items: Vec<Item>,
}

/// 单个列表项（引用或列表元素）
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub text: String,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl GenerationResult {
    pub fn is_empty(&self) -> bool {
        self.lead_text.is_empty() && self.items.is_empty()
    }
}

/// 话题建议结果
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TopicSuggestions {
    /// 模型给出的最佳话题
    pub suggested_topic: Option<String>,
    /// 备选话题
    pub examples: Vec<String>,
}

impl TopicSuggestions {
    pub fn is_empty(&self) -> bool {
        self.suggested_topic.is_none() && self.examples.is_empty()
    }
}

/// 保存到磁盘的标题与参考文献，供 `article --sources-file` 复用
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SavedDraft {
    pub topic: String,
    pub generated_at: DateTime<Utc>,
    pub result: GenerationResult,
}

impl SavedDraft {
    pub fn new(topic: impl Into<String>, result: GenerationResult) -> Self {
        Self {
            topic: topic.into(),
            generated_at: Utc::now(),
            result,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read draft file: {:?}", path))?;
        serde_json::from_str(&content).context("Failed to parse draft file")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).context(format!("Failed to write draft file: {:?}", path))
    }
}
