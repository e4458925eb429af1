//! 将模型返回的自由文本拆分为引导文本与编号列表

use regex::Regex;
use std::sync::LazyLock;

use crate::types::draft::{GenerationResult, Item};

/// 形如 `1. ` 的序号标记，用于定位列表起点
static ORDINAL_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").unwrap());

/// 列表项前缀，剥离时允许序号后没有空白
static ORDINAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s*").unwrap());

/// 第一行就是编号项时引导文本的取值方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadFallback {
    /// 使用第一行原文（与旧版行为一致，该行同时出现在列表中）
    #[default]
    FirstLine,
    /// 引导文本留空
    Empty,
}

/// 解析模型返回的文本，得到引导文本与列表项
pub fn extract(raw: &str) -> GenerationResult {
    extract_with(raw, LeadFallback::default())
}

/// 按指定的引导文本策略解析
pub fn extract_with(raw: &str, fallback: LeadFallback) -> GenerationResult {
    let lines: Vec<&str> = raw.lines().filter(|line| !line.trim().is_empty()).collect();
    let first_item_index = lines.iter().position(|line| ORDINAL_MARKER.is_match(line));

    let lead_text = match first_item_index {
        Some(index) if index > 0 => lines[..index].join(" ").trim().to_string(),
        Some(_) if fallback == LeadFallback::Empty => String::new(),
        _ => lines
            .first()
            .map(|line| line.trim().to_string())
            .unwrap_or_default(),
    };

    let items = match first_item_index {
        Some(index) => lines[index..]
            .iter()
            .filter_map(|line| strip_ordinal(line))
            .map(Item::new)
            .collect(),
        None => Vec::new(),
    };

    GenerationResult { lead_text, items }
}

fn strip_ordinal(line: &str) -> Option<String> {
    let stripped = ORDINAL_PREFIX.replace(line, "");
    let text = stripped.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// 将文章正文按空行拆分为段落，段内换行合并为单个空格
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
}
