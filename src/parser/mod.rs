//! 响应解析：纯函数，不持有任何状态

pub mod extract;
pub mod linkify;
pub mod normalize;
pub mod suggestions;

pub use extract::{LeadFallback, extract, extract_with, split_paragraphs};
pub use linkify::{Segment, concat_segments, linkify};
pub use normalize::{normalize_raw, normalize_response};
pub use suggestions::parse_suggestions;
