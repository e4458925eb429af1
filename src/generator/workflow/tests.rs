#[cfg(test)]
mod tests {
    use crate::cli::{Command, ParseKind};
    use crate::config::{Config, OutputFormat};
    use crate::error::DraftError;
    use crate::generator::testing::ScriptedClient;
    use crate::generator::topic::{DEFAULT_TOPICS, SelectionKind};
    use crate::generator::workflow::{InteractiveInput, execute, parse_response, run_interactive};
    use crate::types::draft::{GenerationResult, Item, SavedDraft};
    use std::sync::Arc;
    use tempfile::TempDir;

    const SUGGESTIONS: &str = "SUGGESTED TOPIC: Cities Growing Food on Rooftops\nEXAMPLE 1: Community Gardens and Neighborhood Health\nEXAMPLE 2: Vertical Farming in Dense Cities\nEXAMPLE 3: Urban Agriculture Policy Today";

    const SOURCES: &str = "Rooftop Harvests\n1. Doe, Jane. Green Roofs. MIT Press, 2018. https://mitpress.mit.edu/roofs.\n2. Roe, Rick. City Soil. Island Press, 2020.";

    fn test_config() -> Config {
        let mut config = Config::default();
        config.suggest.quiet_period_ms = 20;
        config
    }

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_interactive_input_parse() {
        assert_eq!(InteractiveInput::parse("/quit"), InteractiveInput::Quit);
        assert_eq!(InteractiveInput::parse(" /next "), InteractiveInput::Next);
        assert_eq!(InteractiveInput::parse("/select 3"), InteractiveInput::Select(3));
        assert_eq!(
            InteractiveInput::parse("/select x"),
            InteractiveInput::Unknown("/select x".to_string())
        );
        assert_eq!(
            InteractiveInput::parse("/help"),
            InteractiveInput::Unknown("/help".to_string())
        );
        assert_eq!(
            InteractiveInput::parse("urban farming"),
            InteractiveInput::Topic("urban farming".to_string())
        );
    }

    #[test]
    fn test_parse_response_sources_from_json_envelope() {
        let raw = serde_json::json!({ "message": { "content": SOURCES } }).to_string();
        let rendered = parse_response(&raw, ParseKind::Sources, &Config::default()).unwrap();

        assert!(rendered.starts_with("Generated Title:\nRooftop Harvests\n"));
        assert!(rendered.contains("2. Roe, Rick. City Soil. Island Press, 2020.\n"));
    }

    #[test]
    fn test_parse_response_strict_lead() {
        let mut config = Config::default();
        config.parser.strict_lead = true;
        config.output_format = OutputFormat::Json;

        let rendered = parse_response("1. Only Item", ParseKind::Sources, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["lead_text"], "");
        assert_eq!(value["items"][0]["text"], "Only Item");
    }

    #[test]
    fn test_parse_response_suggestions_and_article() {
        let rendered =
            parse_response(SUGGESTIONS, ParseKind::Suggestions, &Config::default()).unwrap();
        assert!(rendered.contains("AI Suggested Topic:\n  Cities Growing Food on Rooftops"));
        assert!(rendered.contains("3. Urban Agriculture Policy Today"));

        let mut config = Config::default();
        config.output_format = OutputFormat::Markdown;
        let rendered = parse_response(
            r#"{"content": "Intro https://a.org.\n\nEnd."}"#,
            ParseKind::Article,
            &config,
        )
        .unwrap();
        assert_eq!(rendered, "Intro [https://a.org](https://a.org).\n\nEnd.");
    }

    #[tokio::test]
    async fn test_execute_suggest() {
        let client = Arc::new(ScriptedClient::new(&[SUGGESTIONS]));
        let mut buffer = Vec::new();

        execute(
            &test_config(),
            Command::Suggest {
                topic: Some("urban farming".to_string()),
                text_type: Some("essay".to_string()),
                interactive: false,
            },
            client.clone(),
            &mut buffer,
        )
        .await
        .unwrap();

        let text = output(buffer);
        assert!(text.contains("Cities Growing Food on Rooftops"));
        assert!(text.contains("2. Vertical Farming in Dense Cities"));
        assert!(client.prompts()[0].contains("an academic essay"));
    }

    #[tokio::test]
    async fn test_execute_suggest_rejects_unknown_text_type() {
        let client = Arc::new(ScriptedClient::new(&[SUGGESTIONS]));
        let err = execute(
            &test_config(),
            Command::Suggest {
                topic: Some("x".to_string()),
                text_type: Some("poem".to_string()),
                interactive: false,
            },
            client,
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DraftError>(),
            Some(&DraftError::InvalidTextType("poem".to_string()))
        );
    }

    #[tokio::test]
    async fn test_execute_requires_ready_client() {
        let client = Arc::new(ScriptedClient::not_ready());
        let result = execute(
            &test_config(),
            Command::Sources {
                topic: "oceans".to_string(),
                count: None,
                save: None,
            },
            client.clone(),
            &mut Vec::new(),
        )
        .await;

        assert!(result.is_err());
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_execute_sources_saves_draft() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("roofs.json");
        let client = Arc::new(ScriptedClient::new(&[SOURCES]));
        let mut buffer = Vec::new();

        execute(
            &test_config(),
            Command::Sources {
                topic: "urban farming".to_string(),
                count: Some(2),
                save: Some(save_path.clone()),
            },
            client.clone(),
            &mut buffer,
        )
        .await
        .unwrap();

        assert!(output(buffer).contains("Works Cited (MLA):\n1. Doe, Jane."));
        assert!(client.prompts()[0].contains("Provide 2 credible sources"));

        let saved = SavedDraft::from_file(&save_path).unwrap();
        assert_eq!(saved.topic, "urban farming");
        assert_eq!(saved.result.lead_text, "Rooftop Harvests");
        assert_eq!(saved.result.items.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_sources_empty_response() {
        let client = Arc::new(ScriptedClient::new(&["   \n"]));
        let err = execute(
            &test_config(),
            Command::Sources {
                topic: "oceans".to_string(),
                count: None,
                save: None,
            },
            client,
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Something went wrong");
    }

    #[tokio::test]
    async fn test_execute_article_from_saved_sources() {
        let temp_dir = TempDir::new().unwrap();
        let draft_path = temp_dir.path().join("draft.json");
        SavedDraft::new(
            "urban farming",
            GenerationResult {
                lead_text: "Rooftop Harvests".to_string(),
                items: vec![Item::new("Doe, Jane. Green Roofs. MIT Press, 2018.")],
            },
        )
        .save(&draft_path)
        .unwrap();

        let client = Arc::new(ScriptedClient::new(&[
            "Picture a roof of tomatoes.\n\n(Doe, Green Roofs) says it works.",
        ]));
        let mut config = test_config();
        config.writing.audience = Some("teachers".to_string());
        let mut buffer = Vec::new();

        execute(
            &config,
            Command::Article {
                topic: None,
                audience: None,
                words: Some(500),
                sources_file: Some(draft_path),
            },
            client.clone(),
            &mut buffer,
        )
        .await
        .unwrap();

        let text = output(buffer);
        assert!(text.contains("Generated Title:\nRooftop Harvests"));
        assert!(text.contains("Picture a roof of tomatoes.\n\n(Doe, Green Roofs) says it works."));

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("TARGET AUDIENCE: teachers"));
        assert!(prompts[0].contains("NUMBER OF WORDS: 500"));
    }

    #[tokio::test]
    async fn test_execute_article_generates_sources_first() {
        let client = Arc::new(ScriptedClient::new(&[SOURCES, "Body text."]));
        let mut config = test_config();
        config.output_format = OutputFormat::Json;
        let mut buffer = Vec::new();

        execute(
            &config,
            Command::Article {
                topic: Some("urban farming".to_string()),
                audience: Some("researchers".to_string()),
                words: Some(1000),
                sources_file: None,
            },
            client.clone(),
            &mut buffer,
        )
        .await
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output(buffer)).unwrap();
        assert_eq!(value["paragraphs"][0][0]["value"], "Body text.");
        assert_eq!(client.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_execute_article_without_audience_is_incomplete() {
        let client = Arc::new(ScriptedClient::new(&[SOURCES]));
        let err = execute(
            &test_config(),
            Command::Article {
                topic: Some("urban farming".to_string()),
                audience: None,
                words: Some(1000),
                sources_file: None,
            },
            client.clone(),
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DraftError>(),
            Some(&DraftError::IncompleteArticleRequest)
        );
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_execute_article_without_words_sends_nothing() {
        let client = Arc::new(ScriptedClient::new(&[SOURCES]));
        let err = execute(
            &test_config(),
            Command::Article {
                topic: Some("urban farming".to_string()),
                audience: Some("teachers".to_string()),
                words: None,
                sources_file: None,
            },
            client.clone(),
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DraftError>(),
            Some(&DraftError::IncompleteArticleRequest)
        );
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_execute_article_with_empty_sources_response() {
        let client = Arc::new(ScriptedClient::new(&["  \n"]));
        let err = execute(
            &test_config(),
            Command::Article {
                topic: Some("urban farming".to_string()),
                audience: Some("teachers".to_string()),
                words: Some(500),
                sources_file: None,
            },
            client.clone(),
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.downcast_ref::<DraftError>(), Some(&DraftError::EmptyResponse));
        assert_eq!(err.to_string(), "Something went wrong");
        // 没有继续请求全文
        assert_eq!(client.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_parse_does_not_need_ready_client() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("response.json");
        std::fs::write(&input, r#"{"content": "Title\n1. Source"}"#).unwrap();

        let client = Arc::new(ScriptedClient::not_ready());
        let mut buffer = Vec::new();

        execute(
            &test_config(),
            Command::Parse {
                input: Some(input),
                kind: ParseKind::Sources,
            },
            client.clone(),
            &mut buffer,
        )
        .await
        .unwrap();

        assert!(output(buffer).starts_with("Generated Title:\nTitle\n"));
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_interactive_waits_for_pending_request() {
        let client = Arc::new(ScriptedClient::new(&[SUGGESTIONS]));
        let mut buffer = Vec::new();

        let selection = run_interactive(
            &test_config(),
            client.clone(),
            None,
            "urban farming\n".as_bytes(),
            &mut buffer,
        )
        .await
        .unwrap();

        assert!(selection.is_none());
        let text = output(buffer);
        // 初始展示默认话题，请求完成后展示模型建议
        assert!(text.contains(DEFAULT_TOPICS[0]));
        assert!(text.contains("AI Suggested Topic:\n  Cities Growing Food on Rooftops"));
    }

    #[tokio::test]
    async fn test_interactive_last_input_wins() {
        let client = Arc::new(ScriptedClient::new(&[SUGGESTIONS]));
        let mut config = test_config();
        config.suggest.quiet_period_ms = 50;

        run_interactive(
            &config,
            client.clone(),
            None,
            "u\nur\nurban farming\n".as_bytes(),
            &mut Vec::new(),
        )
        .await
        .unwrap();

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(r#"USER INPUT: "urban farming""#));
    }

    #[tokio::test]
    async fn test_interactive_select_default_topic_and_next() {
        let client = Arc::new(ScriptedClient::new(&[]));
        let mut buffer = Vec::new();

        let selection = run_interactive(
            &test_config(),
            client.clone(),
            None,
            "/next\n/select 2\n/next\n".as_bytes(),
            &mut buffer,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(selection.text, DEFAULT_TOPICS[1]);
        assert_eq!(selection.kind, SelectionKind::Example);
        let text = output(buffer);
        assert!(text.contains("Select a topic first"));
        assert!(text.contains(&format!("Selected topic: {}", DEFAULT_TOPICS[1])));
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_interactive_reports_failed_request() {
        let client = Arc::new(ScriptedClient::new(&[]));
        let mut buffer = Vec::new();

        let selection = run_interactive(
            &test_config(),
            client,
            None,
            "urban farming\n".as_bytes(),
            &mut buffer,
        )
        .await
        .unwrap();

        assert!(selection.is_none());
        assert!(output(buffer).contains("Something went wrong"));
    }

    #[tokio::test]
    async fn test_interactive_quit_and_mine() {
        let client = Arc::new(ScriptedClient::new(&[]));
        let mut buffer = Vec::new();

        let selection = run_interactive(
            &test_config(),
            client,
            None,
            "/mine\n/ai\n/quit\nignored\n".as_bytes(),
            &mut buffer,
        )
        .await
        .unwrap();

        assert!(selection.is_none());
        let text = output(buffer);
        assert!(text.contains("Type a topic first"));
        assert!(text.contains("No AI suggestion yet"));
    }
}
