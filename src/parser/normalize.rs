//! 响应体归一化
//!
//! 聊天服务可能返回 `{ message: { content } }`、`{ content }` 或任意值，
//! 统一转换为纯文本后再交给解析器。

use serde_json::Value;

/// 按 `message.content` → `content` → 整体值 的顺序取出文本
pub fn normalize_response(value: &Value) -> String {
    if let Some(content) = value.pointer("/message/content").and_then(Value::as_str)
        && !content.is_empty()
    {
        return content.to_string();
    }
    if let Some(content) = value.get("content").and_then(Value::as_str)
        && !content.is_empty()
    {
        return content.to_string();
    }

    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 原始文本若是 JSON 对象则先归一化，否则原样返回
pub fn normalize_raw(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value @ Value::Object(_)) => normalize_response(&value),
        _ => raw.to_string(),
    }
}
