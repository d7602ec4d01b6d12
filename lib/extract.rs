//! Text extraction from Grok Responses API payloads.
//!
//! The provider's response format is not stable across versions or tools, so
//! this walk is deliberately shape-tolerant: every level checks the actual
//! JSON variant and anything unrecognized is skipped, never an error. The
//! priority chain is `output_text` → `output[].content[]` → serialized
//! payload.

use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Extract display text from a response payload.
///
/// Never fails and never returns an empty string for a non-empty payload:
/// when nothing recognizable is found the whole payload is serialized as
/// JSON (non-ASCII characters are left unescaped by `serde_json`).
pub fn extract_text(payload: &Value) -> String {
    // Highest priority: top-level output_text (standard Responses API field).
    if let Some(value) = payload.get("output_text") {
        if is_truthy(value) {
            return match value {
                Value::Array(items) => {
                    let joined = items.iter().map(stringify).collect::<Vec<_>>().join("\n");
                    joined.trim().to_string()
                }
                other => stringify(other).trim().to_string(),
            };
        }
    }

    // Next: walk the output array for message items.
    let mut texts: Vec<String> = Vec::new();
    if let Some(Value::Array(items)) = payload.get("output") {
        for item in items {
            match item {
                Value::String(text) => texts.push(text.clone()),
                Value::Object(obj) => {
                    if obj.get("type").and_then(Value::as_str) != Some("message") {
                        continue;
                    }
                    match obj.get("content") {
                        Some(Value::String(text)) if !text.is_empty() => texts.push(text.clone()),
                        Some(Value::Array(blocks)) => collect_blocks(blocks, &mut texts),
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }
    if !texts.is_empty() {
        let joined = texts.join("\n").trim().to_string();
        if !joined.is_empty() {
            return joined;
        }
    }

    // Last resort: the payload itself.
    serde_json::to_string(payload).unwrap_or_default()
}

/// Collect text fragments from the content blocks of a message item.
fn collect_blocks(blocks: &[Value], texts: &mut Vec<String>) {
    for block in blocks {
        match block {
            Value::String(text) if !text.is_empty() => texts.push(text.clone()),
            Value::Object(obj) => {
                let kind = obj.get("type").and_then(Value::as_str).unwrap_or("");
                if kind != "output_text" && kind != "text" {
                    continue;
                }
                // Prefer the "text" field, fall back to "output_text".
                let value = [obj.get("text"), obj.get("output_text")]
                    .into_iter()
                    .flatten()
                    .find(|v| is_truthy(v));
                if let Some(value) = value {
                    texts.push(stringify(value));
                }
            }
            _ => {}
        }
    }
}

/// Truthiness in the sense the provider conventions assume: null, empty
/// strings, empty collections, zero, and false all count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Stringify a JSON value: strings verbatim, everything else serialized.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ==================== output_text tests ====================

    #[test]
    fn test_output_text_string() {
        let payload = json!({"output": [], "output_text": "フォールバック"});
        assert_eq!(extract_text(&payload), "フォールバック");
    }

    #[test]
    fn test_output_text_list_joined_with_newline() {
        let payload = json!({"output": [], "output_text": ["行A", "行B"]});
        assert_eq!(extract_text(&payload), "行A\n行B");
    }

    #[test]
    fn test_output_text_empty_string_falls_through() {
        let payload = json!({"output_text": "", "output": [
            {"type": "message", "content": [{"type": "text", "text": "本文"}]}
        ]});
        assert_eq!(extract_text(&payload), "本文");
    }

    #[test]
    fn test_output_text_trimmed() {
        let payload = json!({"output_text": "  padded  "});
        assert_eq!(extract_text(&payload), "padded");
    }

    // ==================== output array tests ====================

    #[test]
    fn test_message_with_text_block() {
        let payload = json!({"output": [
            {"type": "message", "content": [{"type": "text", "text": "結果テキスト"}]}
        ]});
        assert_eq!(extract_text(&payload), "結果テキスト");
    }

    #[test]
    fn test_message_with_output_text_block() {
        let payload = json!({"output": [
            {"type": "message", "content": [{"type": "output_text", "text": "出力テキスト"}]}
        ]});
        assert_eq!(extract_text(&payload), "出力テキスト");
    }

    #[test]
    fn test_block_text_field_fallback() {
        let payload = json!({"output": [
            {"type": "message", "content": [{"type": "output_text", "output_text": "二次フィールド"}]}
        ]});
        assert_eq!(extract_text(&payload), "二次フィールド");
    }

    #[test]
    fn test_multiple_blocks_joined() {
        let payload = json!({"output": [
            {"type": "message", "content": [
                {"type": "text", "text": "行1"},
                {"type": "text", "text": "行2"}
            ]}
        ]});
        assert_eq!(extract_text(&payload), "行1\n行2");
    }

    #[test]
    fn test_skips_non_message_items() {
        let payload = json!({"output": [
            {"type": "tool_call", "content": [{"type": "text", "text": "無視"}]},
            {"type": "message", "content": [{"type": "text", "text": "採用"}]}
        ]});
        assert_eq!(extract_text(&payload), "採用");
    }

    #[test]
    fn test_skips_unrecognized_block_types() {
        let payload = json!({"output": [
            {"type": "message", "content": [
                {"type": "image", "url": "https://example.com/a.png"},
                {"type": "text", "text": "画像の説明"}
            ]}
        ]});
        assert_eq!(extract_text(&payload), "画像の説明");
    }

    #[test]
    fn test_string_content() {
        let payload = json!({"output": [{"type": "message", "content": "直接文字列"}]});
        assert_eq!(extract_text(&payload), "直接文字列");
    }

    #[test]
    fn test_bare_string_item() {
        let payload = json!({"output": ["素のテキスト"]});
        assert_eq!(extract_text(&payload), "素のテキスト");
    }

    #[test]
    fn test_non_array_output_ignored() {
        let payload = json!({"output": "oops", "data": 1});
        let text = extract_text(&payload);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, payload);
    }

    // ==================== fallback tests ====================

    #[test]
    fn test_whitespace_only_fragments_fall_back() {
        let payload = json!({"output": ["  "], "marker": "here"});
        let text = extract_text(&payload);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["marker"], "here");
    }

    #[test]
    fn test_fallback_serializes_payload() {
        let payload = json!({"output": [], "data": "test"});
        let text = extract_text(&payload);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["data"], "test");
    }

    #[test]
    fn test_fallback_round_trips() {
        let payload = json!({"output": [], "nested": {"日本語": ["あ", 1, true]}});
        let text = extract_text(&payload);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_fallback_preserves_non_ascii() {
        let payload = json!({"メモ": "日本語"});
        let text = extract_text(&payload);
        assert!(text.contains("日本語"));
        assert!(!text.contains("\\u"));
    }
}
