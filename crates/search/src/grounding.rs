//! Conversation grounding: injects retrieved context into a chat transcript as
//! a transient system message and keeps the transcript short.

use crate::error::{Result, SearchError};
use crate::retriever::Retriever;
use serde::{Deserialize, Serialize};

pub const CONTEXT_HEADER: &str = "Relevant finance context:";
const CONTEXT_FOOTER: &str = "(Use this context only if helpful; otherwise proceed normally.)";
pub const DEFAULT_KEEP_RECENT: usize = 10;

pub const SYSTEM_PROMPT: &str = "You are FinGuide, an educational financial assistant.\n\
Goal: Help users understand personal finance topics (budgeting, saving, debt, investing, retirement, taxes at a high level) in clear, neutral, and practical terms.\n\
Boundaries:\n\
- You are not a licensed advisor and cannot give personalized financial, legal, tax, or investment advice.\n\
- Provide general information and education only.\n\
- Do not request or store sensitive personal data (SSNs, account numbers).\n\
Style: Be concise, structured, and friendly. Ask 1-3 clarifying questions when information is missing.\n\
Formatting: Use short sections with brief headings and bullet points where helpful.\n\
When discussing investing, always mention risk, diversification, time horizon, and fees.\n\
If performing calculations, show the formula and the numbers used.\n\
If quoting figures, include currency and units (e.g., USD) where applicable.\n";

pub const DISCLAIMER: &str = "Important: I'm an AI for educational finance information and not a licensed advisor. \
This is general guidance, not financial, legal, or tax advice.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    fn is_injected_context(&self) -> bool {
        self.role == "system" && self.content.starts_with(CONTEXT_HEADER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub messages: Vec<ChatMessage>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// New conversation seeded with the FinGuide system prompt
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::system(SYSTEM_PROMPT)],
            active: true,
        }
    }

    /// Drop previously injected context, then keep the first message plus the
    /// last `keep_recent` of the rest.
    pub fn prune_injected_context(&mut self, keep_recent: usize) {
        self.messages.retain(|message| !message.is_injected_context());
        if self.messages.len() > 1 {
            let excess = (self.messages.len() - 1).saturating_sub(keep_recent);
            self.messages.drain(1..1 + excess);
        }
    }

    /// Prepare a user turn: prune stale context, inject fresh context for
    /// `message` when any is found, then append the message itself.
    ///
    /// Returns the injected context (empty when none was found).
    pub fn ground_turn(
        &mut self,
        retriever: &Retriever,
        message: &str,
        role: &str,
        k: usize,
        max_chars: usize,
    ) -> Result<String> {
        if !self.active {
            return Err(SearchError::SessionEnded);
        }

        self.prune_injected_context(DEFAULT_KEEP_RECENT);

        let context = retriever.retrieve(message, k, max_chars);
        if context.is_empty() {
            log::debug!("No context found for turn");
        } else {
            self.messages.push(ChatMessage::system(format!(
                "{CONTEXT_HEADER}\n{context}\n{CONTEXT_FOOTER}"
            )));
        }

        self.messages.push(ChatMessage::new(role, message));
        Ok(context)
    }

    /// Store an assistant reply. The first reply of a conversation carries the
    /// disclaimer; the stored text is returned.
    pub fn record_reply(&mut self, response: &str) -> String {
        let first_reply = !self.messages.iter().any(|m| m.role == "assistant");
        let content = if first_reply {
            format!("{DISCLAIMER}\n\n{response}")
        } else {
            response.to_string()
        };
        self.messages
            .push(ChatMessage::new("assistant", content.clone()));
        content
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}
