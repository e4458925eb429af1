//! 生成结果的终端输出

use anyhow::Result;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::parser::{Segment, linkify, split_paragraphs};
use crate::types::draft::{GenerationResult, TopicSuggestions};

/// 将片段渲染为一行文本
pub fn render_segments(segments: &[Segment], format: OutputFormat) -> String {
    segments
        .iter()
        .map(|segment| match (segment, format) {
            (Segment::Link { url }, OutputFormat::Markdown) => format!("[{}]({})", url, url),
            (segment, _) => segment.display_text().to_string(),
        })
        .collect()
}

#[derive(Serialize)]
struct LinkedItem<'a> {
    text: &'a str,
    segments: Vec<Segment>,
}

#[derive(Serialize)]
struct LinkedGeneration<'a> {
    lead_text: &'a str,
    items: Vec<LinkedItem<'a>>,
}

/// 渲染标题与参考文献
pub fn render_generation(result: &GenerationResult, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let linked = LinkedGeneration {
            lead_text: &result.lead_text,
            items: result
                .items
                .iter()
                .map(|item| LinkedItem {
                    text: &item.text,
                    segments: linkify(&item.text),
                })
                .collect(),
        };
        return Ok(serde_json::to_string_pretty(&linked)?);
    }

    let mut output = String::new();
    if !result.lead_text.is_empty() {
        match format {
            OutputFormat::Markdown => output.push_str(&format!("# {}\n", result.lead_text)),
            _ => output.push_str(&format!("Generated Title:\n{}\n", result.lead_text)),
        }
    }
    if !result.items.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        match format {
            OutputFormat::Markdown => output.push_str("## Works Cited (MLA)\n\n"),
            _ => output.push_str("Works Cited (MLA):\n"),
        }
        for (index, item) in result.items.iter().enumerate() {
            output.push_str(&format!(
                "{}. {}\n",
                index + 1,
                render_segments(&linkify(&item.text), format)
            ));
        }
    }
    Ok(output)
}

/// 渲染话题建议，`display_topics` 为实际展示的示例列表
pub fn render_suggestions(
    suggestions: &TopicSuggestions,
    display_topics: &[&str],
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "suggested_topic": suggestions.suggested_topic,
            "examples": display_topics,
        }))?);
    }

    let mut output = String::new();
    if let Some(topic) = &suggestions.suggested_topic {
        match format {
            OutputFormat::Markdown => output.push_str(&format!("**AI Suggested Topic:** {}\n\n", topic)),
            _ => output.push_str(&format!("AI Suggested Topic:\n  {}\n\n", topic)),
        }
    }
    match format {
        OutputFormat::Markdown => output.push_str("**Suggested Topics:**\n\n"),
        _ => output.push_str("Suggested Topics:\n"),
    }
    for (index, topic) in display_topics.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", index + 1, topic));
    }
    Ok(output)
}

/// 渲染文章正文，按段落输出并转换链接
pub fn render_article(text: &str, format: OutputFormat) -> Result<String> {
    let paragraphs = split_paragraphs(text);

    if format == OutputFormat::Json {
        let paragraphs: Vec<Vec<Segment>> = paragraphs.iter().map(|p| linkify(p)).collect();
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "paragraphs": paragraphs,
        }))?);
    }

    Ok(paragraphs
        .iter()
        .map(|paragraph| render_segments(&linkify(paragraph), format))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::draft::Item;

    fn result() -> GenerationResult {
        GenerationResult {
            lead_text: "Rooftop Harvests".to_string(),
            items: vec![
                Item::new("Doe, Jane. Green Roofs. 2018. https://mit.edu/roofs."),
                Item::new("Roe, Rick. City Soil. 2020."),
            ],
        }
    }

    #[test]
    fn test_render_segments_markdown_links() {
        let segments = linkify("See https://a.io/x, now.");
        assert_eq!(
            render_segments(&segments, OutputFormat::Markdown),
            "See [https://a.io/x](https://a.io/x), now."
        );
        assert_eq!(
            render_segments(&segments, OutputFormat::Text),
            "See https://a.io/x, now."
        );
    }

    #[test]
    fn test_render_generation_text() {
        let output = render_generation(&result(), OutputFormat::Text).unwrap();
        assert_eq!(
            output,
            "Generated Title:\nRooftop Harvests\n\nWorks Cited (MLA):\n1. Doe, Jane. Green Roofs. 2018. https://mit.edu/roofs.\n2. Roe, Rick. City Soil. 2020.\n"
        );
    }

    #[test]
    fn test_render_generation_markdown() {
        let output = render_generation(&result(), OutputFormat::Markdown).unwrap();
        assert!(output.starts_with("# Rooftop Harvests\n\n## Works Cited (MLA)\n\n"));
        assert!(output.contains("1. Doe, Jane. Green Roofs. 2018. [https://mit.edu/roofs](https://mit.edu/roofs).\n"));
    }

    #[test]
    fn test_render_generation_json() {
        let output = render_generation(&result(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["lead_text"], "Rooftop Harvests");
        assert_eq!(value["items"][0]["segments"][1]["kind"], "link");
        assert_eq!(value["items"][0]["segments"][1]["url"], "https://mit.edu/roofs");
        assert_eq!(value["items"][1]["segments"][0]["kind"], "text");
    }

    #[test]
    fn test_render_empty_generation() {
        let output = render_generation(&GenerationResult::default(), OutputFormat::Text).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_render_suggestions() {
        let suggestions = TopicSuggestions {
            suggested_topic: Some("Main Topic".to_string()),
            examples: vec!["One".to_string()],
        };
        let output = render_suggestions(&suggestions, &["One"], OutputFormat::Text).unwrap();
        assert_eq!(output, "AI Suggested Topic:\n  Main Topic\n\nSuggested Topics:\n1. One\n");

        let json = render_suggestions(&TopicSuggestions::default(), &["A", "B"], OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["suggested_topic"].is_null());
        assert_eq!(value["examples"][1], "B");
    }

    #[test]
    fn test_render_article() {
        let text = "First line\ncontinues https://x.org.\n\nSecond paragraph.";
        assert_eq!(
            render_article(text, OutputFormat::Markdown).unwrap(),
            "First line continues [https://x.org](https://x.org).\n\nSecond paragraph."
        );

        let json = render_article(text, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["paragraphs"].as_array().unwrap().len(), 2);
        assert_eq!(value["paragraphs"][0][1]["url"], "https://x.org");
    }
}
