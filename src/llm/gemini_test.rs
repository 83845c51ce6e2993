use super::*;

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 40, "candidatesTokenCount": 12, "totalTokenCount": 52 },
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "Try a walnut side table." }]));
    let resp = parse_response(&json, "gemini-2.5-flash").unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Try a walnut side table."));
    assert_eq!(resp.model, "gemini-2.5-flash");
    assert_eq!(resp.stop_reason, "STOP");
    assert_eq!(resp.input_tokens, 40);
    assert_eq!(resp.output_tokens, 12);
}

#[test]
fn parse_multi_part_response() {
    let json = make_response(serde_json::json!([{ "text": "Warm " }, { "text": "neutrals." }]));
    let resp = parse_response(&json, "gemini-2.5-flash").unwrap();
    assert_eq!(resp.content.len(), 2);
    assert_eq!(resp.text(), "Warm neutrals.");
}

#[test]
fn parse_thought_parts_are_kept_out_of_text() {
    let json = make_response(serde_json::json!([
        { "text": "Considering the room...", "thought": true },
        { "text": "Go with the Cloud Sofa." }
    ]));
    let resp = parse_response(&json, "gemini-2.5-flash").unwrap();
    assert_eq!(resp.content.len(), 2);
    assert!(matches!(&resp.content[0], ContentBlock::Thinking { .. }));
    assert_eq!(resp.text(), "Go with the Cloud Sofa.");
}

#[test]
fn parse_no_candidates_is_empty_completion() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let resp = parse_response(&json, "gemini-2.5-flash").unwrap();
    assert!(resp.content.is_empty());
    assert_eq!(resp.stop_reason, "NO_CANDIDATE");
    assert_eq!(resp.model, "gemini-2.5-flash");
}

#[test]
fn parse_candidate_without_content() {
    let json = serde_json::json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] }).to_string();
    let resp = parse_response(&json, "m").unwrap();
    assert!(resp.content.is_empty());
    assert_eq!(resp.stop_reason, "MAX_TOKENS");
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json", "m").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

// =============================================================================
// build_request
// =============================================================================

#[test]
fn build_request_maps_assistant_role_to_model() {
    let messages = vec![Message::user("hi"), Message::assistant("hello"), Message::user("sofa?")];
    let body = serde_json::to_value(build_request(512, "be elegant", &messages)).unwrap();

    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be elegant");
    assert_eq!(body["contents"].as_array().unwrap().len(), 3);
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][1]["role"], "model");
    assert_eq!(body["contents"][2]["parts"][0]["text"], "sofa?");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
}

#[test]
fn build_request_omits_empty_system_instruction() {
    let messages = vec![Message::user("hook please")];
    let body = serde_json::to_value(build_request(64, "", &messages)).unwrap();
    assert!(body.get("systemInstruction").is_none());
}
