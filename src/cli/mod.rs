use crate::config::{Config, LLMProvider, OutputFormat};
use crate::error::DraftError;
use crate::generator::article::{AUDIENCES, WORD_COUNTS};
use crate::types::text_type::TextType;
use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// DraftMate - 由Rust与AI驱动的写作助手
#[derive(Parser, Debug)]
#[command(name = "draftmate")]
#[command(
    about = "AI writing assistant. Suggests topics, drafts titles with MLA works-cited lists and writes full articles."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 输出格式 (text, markdown, json)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// LLM Provider (openai, moonshot, deepseek, mistral, openrouter, anthropic, gemini, ollama)
    #[arg(long, global = true)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub llm_api_key: Option<String>,

    /// 高能效模型，用于常规请求
    #[arg(long, global = true)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于长prompt以及efficient失效时的兜底
    #[arg(long, global = true)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// 第一行就是编号项时，不把它当作标题
    #[arg(long, global = true)]
    pub strict_lead: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 根据输入生成话题建议
    Suggest {
        /// 用户输入的话题
        topic: Option<String>,

        #[arg(short, long, help = text_type_help())]
        text_type: Option<String>,

        /// 交互模式：逐行读取输入，防抖后请求建议
        #[arg(short, long)]
        interactive: bool,
    },

    /// 生成文章标题与 MLA 参考文献
    Sources {
        /// 文章话题
        topic: String,

        /// 参考文献数量
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        count: Option<usize>,

        /// 将结果保存为 JSON，供 article 命令复用
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// 生成完整文章
    Article {
        /// 文章话题（使用 --sources-file 时可省略）
        topic: Option<String>,

        #[arg(short, long, help = audience_help())]
        audience: Option<String>,

        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..), help = words_help())]
        words: Option<u32>,

        /// 之前 sources --save 保存的文件
        #[arg(long)]
        sources_file: Option<PathBuf>,
    },

    /// 离线解析一段模型响应（文件或标准输入）
    Parse {
        /// 响应文件，缺省时读取标准输入
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 响应类型
        #[arg(short, long, value_enum, default_value_t = ParseKind::Sources)]
        kind: ParseKind,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
    Sources,
    Suggestions,
    Article,
}

fn text_type_help() -> String {
    let names: Vec<String> = TextType::ALL
        .iter()
        .map(|text_type| format!("{} = {}", text_type, text_type.display_name()))
        .collect();
    format!("文本类型 ({})", names.join(", "))
}

fn audience_help() -> String {
    format!("目标读者，常用: {}", AUDIENCES.join(", "))
}

fn words_help() -> String {
    let counts: Vec<String> = WORD_COUNTS.iter().map(u32::to_string).collect();
    format!("字数，常用: {}", counts.join(", "))
}

impl Args {
    /// 加载配置文件并用CLI参数覆盖
    pub fn into_parts(self) -> Result<(Config, Command)> {
        let mut config = Config::load(self.config.as_deref())?;

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用配置中的provider {}",
                    provider_str, config.llm.provider
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        if let Some(format_str) = self.format {
            config.output_format = format_str
                .parse::<OutputFormat>()
                .map_err(|_| DraftError::InvalidFormat(format_str))?;
        }

        // 只允许打开，不允许关闭配置文件中的设置
        if self.strict_lead {
            config.parser.strict_lead = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok((config, self.command))
    }
}
