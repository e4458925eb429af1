//! 话题建议响应解析
//!
//! 响应格式：
//! ```text
//! SUGGESTED TOPIC: ...
//! EXAMPLE 1: ...
//! EXAMPLE 2: ...
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::types::draft::TopicSuggestions;

const SUGGESTED_TOPIC_PREFIX: &str = "SUGGESTED TOPIC:";

static EXAMPLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^EXAMPLE [0-9]+:").unwrap());

pub fn parse_suggestions(raw: &str) -> TopicSuggestions {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let suggested_topic = lines
        .iter()
        .find_map(|line| line.strip_prefix(SUGGESTED_TOPIC_PREFIX))
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string);

    let examples = lines
        .iter()
        .filter_map(|line| {
            EXAMPLE_PREFIX
                .find(line)
                .map(|prefix| line[prefix.end()..].trim())
        })
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect();

    TopicSuggestions {
        suggested_topic,
        examples,
    }
}
