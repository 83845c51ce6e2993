use super::*;

fn response(content: Vec<ContentBlock>) -> ChatResponse {
    ChatResponse { content, model: "mock".into(), stop_reason: "end_turn".into(), input_tokens: 0, output_tokens: 0 }
}

// =============================================================================
// ChatResponse::text
// =============================================================================

#[test]
fn text_joins_text_blocks() {
    let resp = response(vec![
        ContentBlock::Text { text: "Soft linen ".into() },
        ContentBlock::Text { text: "pairs well with oak.".into() },
    ]);
    assert_eq!(resp.text(), "Soft linen pairs well with oak.");
}

#[test]
fn text_skips_thinking_and_unknown() {
    let resp = response(vec![
        ContentBlock::Thinking { thinking: "hmm".into() },
        ContentBlock::Unknown,
        ContentBlock::Text { text: "Go warm.".into() },
    ]);
    assert_eq!(resp.text(), "Go warm.");
}

#[test]
fn text_is_empty_without_text_blocks() {
    let resp = response(vec![ContentBlock::Thinking { thinking: "hmm".into() }]);
    assert!(resp.text().is_empty());
}

#[test]
fn text_keeps_whitespace() {
    let resp = response(vec![ContentBlock::Text { text: "  \n".into() }]);
    assert_eq!(resp.text(), "  \n");
}

// =============================================================================
// Message / ContentBlock serde
// =============================================================================

#[test]
fn message_constructors_set_roles() {
    assert_eq!(Message::user("hi").role, ROLE_USER);
    assert_eq!(Message::assistant("hello").role, ROLE_ASSISTANT);
}

#[test]
fn content_block_unknown_type_deserializes() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"image","data":"..."}"#).unwrap();
    assert_eq!(block, ContentBlock::Unknown);
}

#[test]
fn llm_error_display_includes_status() {
    let err = LlmError::ApiResponse { status: 429, body: "quota".into() };
    assert_eq!(err.to_string(), "API response error: status 429");
}
