use serde::{Deserialize, Serialize};

/// 用户想要写作的文本类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    #[serde(rename = "essay")]
    Essay,
    #[serde(rename = "article")]
    Article,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "product")]
    Product,
    #[serde(rename = "story")]
    Story,
}

impl std::fmt::Display for TextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextType::Essay => write!(f, "essay"),
            TextType::Article => write!(f, "article"),
            TextType::Email => write!(f, "email"),
            TextType::Product => write!(f, "product"),
            TextType::Story => write!(f, "story"),
        }
    }
}

impl std::str::FromStr for TextType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "essay" => Ok(TextType::Essay),
            "article" | "blog" => Ok(TextType::Article),
            "email" => Ok(TextType::Email),
            "product" | "product-description" => Ok(TextType::Product),
            "story" => Ok(TextType::Story),
            _ => Err(format!("Unknown text type: {}", s)),
        }
    }
}

impl TextType {
    pub const ALL: [TextType; 5] = [
        TextType::Essay,
        TextType::Article,
        TextType::Email,
        TextType::Product,
        TextType::Story,
    ];

    /// 界面上显示的名称
    pub fn display_name(&self) -> &'static str {
        match self {
            TextType::Essay => "Essay",
            TextType::Article => "Article",
            TextType::Email => "Email",
            TextType::Product => "Product Description",
            TextType::Story => "Story",
        }
    }

    /// 主推荐话题的标题指令
    pub fn title_instruction(&self) -> &'static str {
        match self {
            TextType::Essay => {
                "Create a short, modern title (a concise phrase (4-8 words)) for an essay. The title should sound academic, structured, and intelligent."
            }
            TextType::Article => {
                "Create a short, professional title (a concise phrase (4-8 words)) for an article. The title should feel journalistic and clear."
            }
            TextType::Email => {
                "Create a neutral, straightforward title (a concise phrase (4-8 words)) for an email. Use ONLY the information provided in the user prompt. Do not add any external context or embellishment. Simply state what the user wrote."
            }
            TextType::Product => {
                "Create a short, marketing-style title (a concise phrase (4-8 words)) for a product description. The title should feel commercial and persuasive."
            }
            TextType::Story => {
                "Create a short, creative title (a concise phrase (4-8 words)) for a story. The title should feel imaginative but minimal."
            }
        }
    }

    /// 写作场景描述
    pub fn context_description(&self) -> &'static str {
        match self {
            TextType::Essay => "an academic essay",
            TextType::Article => "an article or blog post",
            TextType::Email => "an email",
            TextType::Product => "a product description",
            TextType::Story => "a narrative or short story",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_type_from_str() {
        assert_eq!("essay".parse::<TextType>().unwrap(), TextType::Essay);
        assert_eq!("Article".parse::<TextType>().unwrap(), TextType::Article);
        assert_eq!("blog".parse::<TextType>().unwrap(), TextType::Article);
        assert_eq!("EMAIL".parse::<TextType>().unwrap(), TextType::Email);
        assert_eq!("product".parse::<TextType>().unwrap(), TextType::Product);
        assert_eq!("story".parse::<TextType>().unwrap(), TextType::Story);
        assert!("poem".parse::<TextType>().is_err());
    }

    #[test]
    fn test_text_type_display_roundtrip() {
        for text_type in TextType::ALL {
            assert_eq!(text_type.to_string().parse::<TextType>().unwrap(), text_type);
        }
    }

    #[test]
    fn test_title_instruction_uses_phrase_length() {
        for text_type in TextType::ALL {
            assert!(text_type.title_instruction().contains("4-8 words"));
        }
        assert_eq!(TextType::Product.display_name(), "Product Description");
    }
}
