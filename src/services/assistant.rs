//! Assistant service — the design-advice chat behind the storefront widget.
//!
//! DESIGN
//! ======
//! Each visitor owns one [`AssistantClient`]. The client creates its
//! [`DialogueSession`] on the first message and reuses it for the rest of the
//! process lifetime, so the model keeps turn-by-turn context without the
//! caller replaying history.
//!
//! Failures never reach the caller: every model error is logged and replaced
//! by a fixed apology, and an empty completion by a fixed placeholder.
//!
//! While a message is in flight the client is checked out of the visitor
//! state; a visitor without a client is "typing" and cannot send again.
//! The model call runs on a spawned task, so the client always comes back
//! even when the HTTP request that started the turn goes away.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use super::storefront::StoreError;
use crate::chat::ChatMessage;
use crate::llm::LlmChat;
use crate::llm::types::{LlmError, Message};
use crate::state::AppState;

pub const SYSTEM_INSTRUCTION: &str = "\
You are \"Liwisi AI\", a sophisticated interior design assistant for the Liwisi brand.
We sell premium, modern furniture.
Your tone is elegant, helpful, and concise.
You should help customers find products from our catalog, give design advice (e.g., color matching, layout), and explain the benefits of our Black Friday sales.
Do not invent products that are not generally found in a modern furniture store, but you can speak generally about design concepts.
If asked about specific prices, refer to the context provided or suggest checking the product page, but try to be helpful with general ranges if known (assume premium pricing).
Always be polite and encourage the user to envision the furniture in their home.
";

pub const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't generate a response at the moment.";
pub const CONNECTION_FALLBACK: &str =
    "I'm having trouble connecting to the design servers right now. Please try again later.";

// =============================================================================
// DIALOGUE SESSION
// =============================================================================

/// Conversational context bound to one model and one system instruction.
///
/// Only completed exchanges are kept: a turn that fails or comes back empty
/// leaves the context untouched.
#[derive(Debug)]
pub struct DialogueSession {
    model: String,
    system: &'static str,
    turns: Vec<Message>,
}

impl DialogueSession {
    #[must_use]
    pub fn new(model: impl Into<String>, system: &'static str) -> Self {
        Self { model: model.into(), system, turns: Vec::new() }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of completed user/assistant exchanges.
    #[must_use]
    pub fn exchanges(&self) -> usize {
        self.turns.len() / 2
    }

    /// Submit `text` as the next user turn and await the reply.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`LlmError`].
    pub async fn send(&mut self, llm: &dyn LlmChat, max_tokens: u32, text: &str) -> Result<String, LlmError> {
        self.turns.push(Message::user(text));
        let reply = match llm.chat(max_tokens, self.system, &self.turns).await {
            Ok(response) => {
                info!(
                    model = %response.model,
                    stop_reason = %response.stop_reason,
                    input_tokens = response.input_tokens,
                    output_tokens = response.output_tokens,
                    "assistant: LLM response"
                );
                response.text()
            }
            Err(e) => {
                self.turns.pop();
                return Err(e);
            }
        };
        if reply.is_empty() {
            self.turns.pop();
        } else {
            self.turns.push(Message::assistant(reply.clone()));
        }
        Ok(reply)
    }
}

// =============================================================================
// ASSISTANT CLIENT
// =============================================================================

pub struct AssistantClient {
    llm: Option<Arc<dyn LlmChat>>,
    max_tokens: u32,
    session: Option<DialogueSession>,
}

impl AssistantClient {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmChat>>, max_tokens: u32) -> Self {
        Self { llm, max_tokens, session: None }
    }

    /// The dialogue session, once the first message has been sent.
    #[must_use]
    pub fn session(&self) -> Option<&DialogueSession> {
        self.session.as_ref()
    }

    /// Send one message and return the assistant's reply.
    ///
    /// Never fails: errors become an error-flagged [`CONNECTION_FALLBACK`],
    /// empty completions become [`EMPTY_REPLY_FALLBACK`].
    pub async fn send_message(&mut self, user_text: &str) -> ChatMessage {
        match self.try_send(user_text).await {
            Ok(reply) if reply.is_empty() => ChatMessage::assistant(EMPTY_REPLY_FALLBACK),
            Ok(reply) => ChatMessage::assistant(reply),
            Err(e) => {
                warn!(error = %e, "assistant: model call failed");
                ChatMessage::error(CONNECTION_FALLBACK)
            }
        }
    }

    async fn try_send(&mut self, user_text: &str) -> Result<String, LlmError> {
        let llm = self.llm.as_ref().ok_or(LlmError::NotConfigured)?;
        let session = self
            .session
            .get_or_insert_with(|| DialogueSession::new(llm.model(), SYSTEM_INSTRUCTION));
        session.send(llm.as_ref(), self.max_tokens, user_text).await
    }
}

// =============================================================================
// CHAT FLOW
// =============================================================================

/// Run one chat exchange for a visitor.
///
/// Returns `Ok(None)` for blank input, which is ignored entirely. Otherwise
/// appends the user message and the assistant reply to the transcript and
/// returns the reply.
///
/// # Errors
///
/// [`StoreError::UnknownVisitor`] if the visitor does not exist,
/// [`StoreError::ReplyPending`] if a previous message is still in flight.
pub async fn chat_turn(state: &AppState, visitor_id: Uuid, text: &str) -> Result<Option<ChatMessage>, StoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    // Check the client out under the lock; the model call runs without it.
    let mut assistant = {
        let mut visitors = state.visitors.write().await;
        let visitor = visitors
            .get_mut(&visitor_id)
            .ok_or(StoreError::UnknownVisitor(visitor_id))?;
        let assistant = visitor
            .assistant
            .take()
            .ok_or(StoreError::ReplyPending(visitor_id))?;
        visitor.transcript.push(ChatMessage::user(text));
        assistant
    };

    info!(%visitor_id, text_len = text.len(), "assistant: message received");

    // The turn runs on its own task so that a dropped request still lands
    // the reply and hands the client back.
    let turn = tokio::spawn(finish_turn(state.clone(), visitor_id, assistant, text.to_string()));
    match turn.await {
        Ok(reply) => Ok(Some(reply)),
        Err(e) => {
            error!(%visitor_id, error = %e, "assistant: reply task failed");
            let reply = ChatMessage::error(CONNECTION_FALLBACK);
            restore(state, visitor_id, state.assistant_client(), reply.clone()).await;
            Ok(Some(reply))
        }
    }
}

async fn finish_turn(state: AppState, visitor_id: Uuid, mut assistant: AssistantClient, text: String) -> ChatMessage {
    let reply = assistant.send_message(&text).await;
    if let Some(session) = assistant.session() {
        info!(%visitor_id, model = session.model(), exchanges = session.exchanges(), "assistant: reply ready");
    }
    restore(&state, visitor_id, assistant, reply.clone()).await;
    reply
}

/// Append the reply and return the client to the visitor.
async fn restore(state: &AppState, visitor_id: Uuid, assistant: AssistantClient, reply: ChatMessage) {
    let mut visitors = state.visitors.write().await;
    if let Some(visitor) = visitors.get_mut(&visitor_id) {
        visitor.transcript.push(reply);
        visitor.assistant = Some(assistant);
    }
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
