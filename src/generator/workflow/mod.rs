use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::sync::mpsc;

use crate::cli::{Command, ParseKind};
use crate::config::{Config, OutputFormat};
use crate::error::DraftError;
use crate::generator::article::{ArticleRequest, generate_article};
use crate::generator::debounce::Debouncer;
use crate::generator::sources::generate_sources;
use crate::generator::topic::{Selection, TopicBoard, suggest};
use crate::llm::{ChatClient, LLMClient};
use crate::parser::{extract_with, normalize_raw, parse_suggestions};
use crate::render::{render_article, render_generation, render_suggestions};
use crate::types::draft::{SavedDraft, TopicSuggestions};
use crate::types::text_type::TextType;

/// 启动命令
pub async fn launch(config: &Config, command: Command) -> Result<()> {
    let mut stdout = std::io::stdout();

    // 离线解析不需要模型
    if let Command::Parse { input, kind } = &command {
        return run_parse(config, input.as_deref(), *kind, &mut stdout).await;
    }

    let client: Arc<dyn ChatClient> = Arc::new(LLMClient::new(config.llm.clone())?);
    execute(config, command, client, &mut stdout).await
}

/// 使用给定的聊天客户端执行命令，`parse` 不经过就绪检查
pub async fn execute<W: Write>(
    config: &Config,
    command: Command,
    client: Arc<dyn ChatClient>,
    out: &mut W,
) -> Result<()> {
    if let Command::Parse { input, kind } = &command {
        return run_parse(config, input.as_deref(), *kind, out).await;
    }

    if !client.is_ready() {
        client.ensure_ready().await?;
    }

    match command {
        Command::Suggest {
            topic,
            text_type,
            interactive,
        } => {
            let text_type = resolve_text_type(text_type, config)?;
            if interactive {
                let stdin = BufReader::new(tokio::io::stdin());
                if let Some(selection) =
                    run_interactive(config, client, text_type, stdin, out).await?
                {
                    tracing::debug!("selected {:?}", selection);
                }
                return Ok(());
            }

            let topic = topic.ok_or(DraftError::EmptyTopic)?;
            let suggestions = suggest(client.as_ref(), &topic, text_type).await?;
            if suggestions.is_empty() {
                tracing::warn!("⚠️ 模型没有返回可用的话题建议，展示默认示例");
            }
            let mut board = TopicBoard::new();
            board.set_topic(topic.as_str());
            board.apply_suggestions(&topic, suggestions);
            writeln!(
                out,
                "{}",
                render_suggestions(board.suggestions(), &board.display_topics(), config.output_format)?
            )?;
        }
        Command::Sources { topic, count, save } => {
            let count = count.unwrap_or(config.writing.source_count);
            let result =
                generate_sources(client.as_ref(), &topic, count, config.lead_fallback()).await?;
            if result.is_empty() {
                return Err(DraftError::EmptyResponse.into());
            }
            writeln!(out, "{}", render_generation(&result, config.output_format)?)?;

            if let Some(path) = save {
                SavedDraft::new(topic, result).save(&path)?;
                tracing::info!("💾 已保存到 {}", path.display());
            }
        }
        Command::Article {
            topic,
            audience,
            words,
            sources_file,
        } => {
            // 读者与字数在请求模型之前检查
            let audience = audience
                .or_else(|| config.writing.audience.clone())
                .unwrap_or_default();
            let word_count = words.or(config.writing.word_count).unwrap_or_default();
            if audience.trim().is_empty() || word_count == 0 {
                return Err(DraftError::IncompleteArticleRequest.into());
            }

            let result = match sources_file {
                Some(path) => SavedDraft::from_file(&path)?.result,
                None => {
                    let topic = topic.ok_or(DraftError::EmptyTopic)?;
                    let result = generate_sources(
                        client.as_ref(),
                        &topic,
                        config.writing.source_count,
                        config.lead_fallback(),
                    )
                    .await?;
                    if result.is_empty() {
                        return Err(DraftError::EmptyResponse.into());
                    }
                    result
                }
            };

            let request = ArticleRequest::from_result(&result, &audience, word_count);

            let article = generate_article(client.as_ref(), &request).await?;
            if article.trim().is_empty() {
                return Err(DraftError::EmptyResponse.into());
            }

            if config.output_format != OutputFormat::Json {
                writeln!(out, "{}", render_generation(&result, config.output_format)?)?;
            }
            writeln!(out, "{}", render_article(&article, config.output_format)?)?;
        }
        Command::Parse { input, kind } => {
            run_parse(config, input.as_deref(), kind, out).await?;
        }
    }

    Ok(())
}

/// 解析一段原始响应并渲染
pub fn parse_response(raw: &str, kind: ParseKind, config: &Config) -> Result<String> {
    let content = normalize_raw(raw);
    match kind {
        ParseKind::Sources => {
            render_generation(&extract_with(&content, config.lead_fallback()), config.output_format)
        }
        ParseKind::Suggestions => {
            let suggestions = parse_suggestions(&content);
            let examples: Vec<&str> = suggestions.examples.iter().map(String::as_str).collect();
            render_suggestions(&suggestions, &examples, config.output_format)
        }
        ParseKind::Article => render_article(&content, config.output_format),
    }
}

async fn run_parse<W: Write>(
    config: &Config,
    input: Option<&Path>,
    kind: ParseKind,
    out: &mut W,
) -> Result<()> {
    let raw = read_input(input).await?;
    writeln!(out, "{}", parse_response(&raw, kind, config)?)?;
    Ok(())
}

fn resolve_text_type(arg: Option<String>, config: &Config) -> Result<Option<TextType>> {
    match arg {
        Some(value) => value
            .parse::<TextType>()
            .map(Some)
            .map_err(|_| DraftError::InvalidTextType(value).into()),
        None => Ok(config.writing.text_type),
    }
}

async fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            Ok(raw)
        }
    }
}

/// 交互模式中的一行输入
#[derive(Debug, PartialEq, Eq)]
enum InteractiveInput {
    Quit,
    Next,
    Mine,
    Ai,
    Select(usize),
    Unknown(String),
    Topic(String),
}

impl InteractiveInput {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("/select") {
            return match rest.trim().parse::<usize>() {
                Ok(number) => InteractiveInput::Select(number),
                Err(_) => InteractiveInput::Unknown(trimmed.to_string()),
            };
        }
        match trimmed {
            "/quit" | "/exit" => InteractiveInput::Quit,
            "/next" => InteractiveInput::Next,
            "/mine" => InteractiveInput::Mine,
            "/ai" => InteractiveInput::Ai,
            command if command.starts_with('/') => InteractiveInput::Unknown(command.to_string()),
            _ => InteractiveInput::Topic(line.to_string()),
        }
    }
}

const INTERACTIVE_HELP: &str =
    "Type a topic, or use /select N, /mine, /ai, /next, /quit.";

/// 交互式话题建议
///
/// 每行输入都会重新安排一次防抖请求，只有静默期结束的最后一次输入会真正请求模型。
/// 输入结束后等待进行中的请求完成再退出。返回 `/next` 时选中的话题。
pub async fn run_interactive<R, W>(
    config: &Config,
    client: Arc<dyn ChatClient>,
    text_type: Option<TextType>,
    input: R,
    out: &mut W,
) -> Result<Option<Selection>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut board = TopicBoard::new();
    let mut debouncer = Debouncer::new(Duration::from_millis(config.suggest.quiet_period_ms));
    let (tx, mut rx) = mpsc::unbounded_channel::<(String, Result<TopicSuggestions>)>();
    let mut lines = input.lines();
    let mut input_closed = false;
    let mut loading = false;

    writeln!(out, "{}", INTERACTIVE_HELP)?;
    write_board(&board, config, out)?;

    while !(input_closed && !loading) {
        tokio::select! {
            line = lines.next_line(), if !input_closed => {
                let Some(line) = line? else {
                    input_closed = true;
                    continue;
                };
                match InteractiveInput::parse(&line) {
                    InteractiveInput::Quit => {
                        if debouncer.is_pending() {
                            tracing::debug!("quit with a suggestion request still pending");
                        }
                        break;
                    }
                    InteractiveInput::Next => {
                        if board.can_proceed(loading) {
                            let selection = board.selection().cloned();
                            if let Some(selection) = &selection {
                                writeln!(out, "Selected topic: {}", selection.text)?;
                            }
                            return Ok(selection);
                        }
                        writeln!(out, "Select a topic first")?;
                    }
                    InteractiveInput::Select(number) => {
                        if board.select_example(number) {
                            write_selection(&board, out)?;
                        } else {
                            writeln!(out, "No suggested topic #{}", number)?;
                        }
                    }
                    InteractiveInput::Mine => {
                        if board.select_user() {
                            write_selection(&board, out)?;
                        } else {
                            writeln!(out, "Type a topic first")?;
                        }
                    }
                    InteractiveInput::Ai => {
                        if board.select_ai() {
                            write_selection(&board, out)?;
                        } else {
                            writeln!(out, "No AI suggestion yet")?;
                        }
                    }
                    InteractiveInput::Unknown(command) => {
                        writeln!(out, "Unknown command {}. {}", command, INTERACTIVE_HELP)?;
                    }
                    InteractiveInput::Topic(topic) => {
                        board.set_topic(topic.as_str());
                        if topic.trim().is_empty() {
                            debouncer.cancel();
                            loading = false;
                            write_board(&board, config, out)?;
                            continue;
                        }

                        loading = true;
                        let client = client.clone();
                        let tx = tx.clone();
                        debouncer.schedule(async move {
                            let result = suggest(client.as_ref(), &topic, text_type).await;
                            let _ = tx.send((topic, result));
                        });
                    }
                }
            }
            Some((topic, result)) = rx.recv() => {
                if topic != board.topic() {
                    continue;
                }
                loading = false;
                match result {
                    Ok(suggestions) => {
                        board.apply_suggestions(&topic, suggestions);
                        write_board(&board, config, out)?;
                    }
                    Err(e) => {
                        tracing::error!("❌ 生成话题建议失败: {}", e);
                        writeln!(out, "{}", DraftError::EmptyResponse)?;
                    }
                }
            }
        }
    }

    Ok(None)
}

fn write_board<W: Write>(board: &TopicBoard, config: &Config, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{}",
        render_suggestions(board.suggestions(), &board.display_topics(), config.output_format)?
    )?;
    Ok(())
}

fn write_selection<W: Write>(board: &TopicBoard, out: &mut W) -> Result<()> {
    match board.selection() {
        Some(selection) => writeln!(out, "Selected: {}", selection.text)?,
        None => writeln!(out, "Selection cleared")?,
    }
    Ok(())
}

// Include tests
#[cfg(test)]
mod tests;
