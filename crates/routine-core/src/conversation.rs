//! In-memory transcript and the idle / awaiting-reply request lifecycle.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::ConversationError;
use crate::state::{ChatMessage, ChatRole};

pub const SYSTEM_PROMPT: &str = "You are a helpful, supportive, kind expert on L'Oréal. \
You are familiar with dermatology, cosmetology, and the brands collaborating with L'Oréal. \
Personalize products and routines by prioritizing compatibility with the user's health and \
product preferences, and ask optional questions to better understand what the user may want.

When a skincare routine is requested, give the recommended routine before asking any questions.

When reminding the user about products they have forgotten, give only the name unless asked for more.

When you look something up on the internet, tell the user before giving your response and cite your sources.

Politely refuse requests that are not about L'Oréal, its brand partners, beauty routines, or other beauty topics.

When a conversation is over, conclude with a short empowering message L'Oréal would support.";

pub const GREETING: &str = "Hello! How may I help you?";

pub const ROUTINE_REQUEST: &str = "Please help me build a routine with the products I sent you!";

/// User message carrying the selected products as JSON
pub fn routine_message(products_json: &str) -> String {
    format!("{} Here it is in JSON form: {}", ROUTINE_REQUEST, products_json)
}

/// Identifies one chat request. Only the current ticket can end the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    AwaitingReply { ticket: RequestTicket, since: Instant },
}

/// Snapshot of the transcript to send for one ticket
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    state: ConversationState,
    next_ticket: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::assistant(GREETING),
            ],
            state: ConversationState::Idle,
            next_ticket: 1,
        }
    }

    /// Full transcript including the system instruction
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages shown to the user
    pub fn visible_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.role != ChatRole::System)
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, ConversationState::AwaitingReply { .. })
    }

    pub fn current_ticket(&self) -> Option<RequestTicket> {
        match self.state {
            ConversationState::AwaitingReply { ticket, .. } => Some(ticket),
            ConversationState::Idle => None,
        }
    }

    /// Appends the typed text as a user message and starts a request
    pub fn submit_text(&mut self, text: &str) -> Result<PendingRequest, ConversationError> {
        if self.is_awaiting() {
            return Err(ConversationError::Busy);
        }
        if text.trim().is_empty() {
            return Err(ConversationError::EmptyInput);
        }
        Ok(self.begin(ChatMessage::user(text)))
    }

    /// Appends the routine request with the selected products embedded as JSON
    pub fn submit_routine(
        &mut self,
        products_json: &str,
    ) -> Result<PendingRequest, ConversationError> {
        if self.is_awaiting() {
            return Err(ConversationError::Busy);
        }
        let message = ChatMessage::user(routine_message(products_json)).with_label(ROUTINE_REQUEST);
        Ok(self.begin(message))
    }

    fn begin(&mut self, message: ChatMessage) -> PendingRequest {
        self.messages.push(message);

        let ticket = RequestTicket(self.next_ticket);
        self.next_ticket += 1;
        self.state = ConversationState::AwaitingReply {
            ticket,
            since: Instant::now(),
        };
        debug!(ticket = ticket.id(), messages = self.messages.len(), "chat request started");

        PendingRequest {
            ticket,
            messages: self.messages.clone(),
        }
    }

    /// Appends the assistant reply if `ticket` is the one being awaited.
    /// Returns false for stale tickets, which are dropped.
    pub fn complete(&mut self, ticket: RequestTicket, reply: String) -> bool {
        if self.current_ticket() != Some(ticket) {
            debug!(ticket = ticket.id(), "dropping reply for stale request");
            return false;
        }
        self.messages.push(ChatMessage::assistant(reply));
        self.state = ConversationState::Idle;
        info!(ticket = ticket.id(), "chat reply received");
        true
    }

    /// Ends the wait without a reply. Returns false for stale tickets.
    pub fn fail(&mut self, ticket: RequestTicket) -> bool {
        if self.current_ticket() != Some(ticket) {
            return false;
        }
        self.state = ConversationState::Idle;
        true
    }

    /// Invalidates the in-flight request, if any
    pub fn cancel(&mut self) -> Option<RequestTicket> {
        let ticket = self.current_ticket()?;
        self.state = ConversationState::Idle;
        info!(ticket = ticket.id(), "chat request cancelled");
        Some(ticket)
    }

    /// The thinking placeholder appears once a request has been pending for `delay`
    pub fn thinking_visible(&self, now: Instant, delay: Duration) -> bool {
        match self.state {
            ConversationState::AwaitingReply { since, .. } => {
                now.saturating_duration_since(since) >= delay
            }
            ConversationState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_has_system_and_greeting() {
        let conversation = Conversation::new();
        let roles: Vec<ChatRole> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::System, ChatRole::Assistant]);
        assert_eq!(conversation.visible_messages().count(), 1);
        assert_eq!(conversation.state(), ConversationState::Idle);
    }

    #[test]
    fn test_submit_then_complete_appends_user_then_assistant() {
        let mut conversation = Conversation::new();
        let pending = conversation.submit_text("Which cleanser suits dry skin?").unwrap();
        assert_eq!(pending.messages.len(), 3);
        assert!(conversation.is_awaiting());

        assert!(conversation.complete(pending.ticket, "Try a cream cleanser.".to_string()));
        let tail: Vec<(ChatRole, &str)> = conversation.messages()[2..]
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            tail,
            vec![
                (ChatRole::User, "Which cleanser suits dry skin?"),
                (ChatRole::Assistant, "Try a cream cleanser."),
            ]
        );
        assert!(!conversation.is_awaiting());
    }

    #[test]
    fn test_second_submit_while_awaiting_is_rejected() {
        let mut conversation = Conversation::new();
        conversation.submit_text("first").unwrap();
        assert_eq!(conversation.submit_text("second").unwrap_err(), ConversationError::Busy);
        assert_eq!(conversation.submit_routine("[]").unwrap_err(), ConversationError::Busy);
        assert_eq!(conversation.messages().len(), 3);
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.submit_text("   ").unwrap_err(), ConversationError::EmptyInput);
        assert!(!conversation.is_awaiting());
    }

    #[test]
    fn test_failure_appends_nothing() {
        let mut conversation = Conversation::new();
        let pending = conversation.submit_text("hello").unwrap();
        assert!(conversation.fail(pending.ticket));
        assert_eq!(conversation.messages().len(), 3);
        assert_eq!(conversation.messages()[2].role, ChatRole::User);
        assert!(!conversation.is_awaiting());
    }

    #[test]
    fn test_stale_ticket_is_ignored_after_cancel() {
        let mut conversation = Conversation::new();
        let first = conversation.submit_text("first").unwrap();
        assert_eq!(conversation.cancel(), Some(first.ticket));

        let second = conversation.submit_text("second").unwrap();
        assert_ne!(first.ticket, second.ticket);
        assert!(!conversation.complete(first.ticket, "late".to_string()));
        assert!(!conversation.fail(first.ticket));
        assert!(conversation.is_awaiting());

        assert!(conversation.complete(second.ticket, "on time".to_string()));
        assert_eq!(conversation.messages().last().unwrap().content, "on time");
    }

    #[test]
    fn test_routine_message_embeds_json_and_labels_short_text() {
        let mut conversation = Conversation::new();
        let pending = conversation.submit_routine("[]").unwrap();
        let last = pending.messages.last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(
            last.content,
            "Please help me build a routine with the products I sent you! Here it is in JSON form: []"
        );
        assert_eq!(last.display_text(), ROUTINE_REQUEST);
    }

    #[test]
    fn test_thinking_visible_after_delay() {
        let mut conversation = Conversation::new();
        let delay = Duration::from_millis(500);
        assert!(!conversation.thinking_visible(Instant::now(), delay));

        conversation.submit_text("hi").unwrap();
        let since = match conversation.state() {
            ConversationState::AwaitingReply { since, .. } => since,
            ConversationState::Idle => panic!("expected awaiting state"),
        };
        assert!(!conversation.thinking_visible(since, delay));
        assert!(conversation.thinking_visible(since + delay, delay));
    }
}
