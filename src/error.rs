use thiserror::Error;

/// DraftMate 的领域错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("an article needs a title, at least one source, an audience and a word count")]
    IncompleteArticleRequest,

    #[error("the chat service is not ready: {0}")]
    ClientNotReady(String),

    #[error("the chat service did not answer within {0} seconds")]
    Timeout(u64),

    #[error("unknown text type: {0}")]
    InvalidTextType(String),

    #[error("unknown output format: {0}")]
    InvalidFormat(String),

    #[error("Something went wrong")]
    EmptyResponse,
}
