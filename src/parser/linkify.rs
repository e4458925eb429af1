//! 将文本中的裸 URL 切分为可点击的链接片段

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s)]+").unwrap());

/// 不应被链接吞掉的句末标点
const TRAILING_PUNCTUATION: [char; 3] = ['.', ',', ')'];

/// 渲染用的文本片段
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text { value: String },
    Link { url: String },
}

impl Segment {
    pub fn text(value: impl Into<String>) -> Self {
        Segment::Text {
            value: value.into(),
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        Segment::Link { url: url.into() }
    }

    /// 片段对应的原始文本
    pub fn display_text(&self) -> &str {
        match self {
            Segment::Text { value } => value,
            Segment::Link { url } => url,
        }
    }
}

/// 切分文本，URL 成为链接片段，其余保持为文本片段
///
/// 相邻的文本片段会被合并，所有片段按顺序拼接后与输入完全一致。
pub fn linkify(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for found in URL_PATTERN.find_iter(text) {
        push_text(&mut segments, &text[cursor..found.start()]);

        let (url, trailing) = split_trailing_punctuation(found.as_str());
        segments.push(Segment::link(url));
        push_text(&mut segments, trailing);

        cursor = found.end();
    }
    push_text(&mut segments, &text[cursor..]);

    segments
}

/// 拼接所有片段的原始文本
pub fn concat_segments(segments: &[Segment]) -> String {
    segments.iter().map(Segment::display_text).collect()
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text { value }) = segments.last_mut() {
        value.push_str(text);
    } else {
        segments.push(Segment::text(text));
    }
}

fn split_trailing_punctuation(token: &str) -> (&str, &str) {
    let scheme_end = token.find("://").map_or(0, |index| index + 3);
    // 协议之后至少保留一个字符
    let min_len = scheme_end
        + token[scheme_end..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
    let trimmed_len = token
        .trim_end_matches(|c| TRAILING_PUNCTUATION.contains(&c))
        .len();

    token.split_at(trimmed_len.max(min_len))
}
