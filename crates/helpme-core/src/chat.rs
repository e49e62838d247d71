//! Simulated one-to-one chat
//!
//! There is no transport: the partner answers with a canned reply after a
//! short "typing" delay, and trust grows once the conversation gets long
//! enough. Both delays are deadlines owned by the session, so leaving the
//! chat cancels them.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::content::{self, PARTNER_GREETING, PARTNER_REPLIES};
use crate::state::HelpRequest;
use crate::timer::{Deadline, Timings};
use crate::trust::TrustLevel;

/// A chat message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    Me,
    Partner,
}

/// How this conversation came about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOrigin {
    /// Our own request found a helper
    Matched(HelpRequest),
    Question(u32),
    Bottle(u32),
    LibraryPerson(u32),
}

impl ChatOrigin {
    /// Short context line for the chat header
    pub fn subtitle(&self) -> String {
        match self {
            ChatOrigin::Matched(request) => request.tags.join(", "),
            ChatOrigin::Question(id) => content::waiting_question(*id)
                .map(|q| q.tags.join(", "))
                .unwrap_or_default(),
            ChatOrigin::Bottle(id) => content::bottle(*id)
                .map(|b| b.tags.join(", "))
                .unwrap_or_default(),
            ChatOrigin::LibraryPerson(id) => content::library_person(*id)
                .map(|p| p.expertise.to_string())
                .unwrap_or_default(),
        }
    }
}

/// What happened during a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEvent {
    PartnerReplied,
    LevelUpDue,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    origin: ChatOrigin,
    messages: Vec<ChatMessage>,
    reply: Option<Deadline>,
    /// Transcript length just before the message awaiting a reply
    history_at_send: usize,
    level_up: Option<Deadline>,
}

impl ChatSession {
    pub fn new(origin: ChatOrigin) -> Self {
        Self {
            origin,
            messages: vec![ChatMessage {
                sender: Sender::Partner,
                text: PARTNER_GREETING.to_string(),
            }],
            reply: None,
            history_at_send: 0,
            level_up: None,
        }
    }

    pub fn origin(&self) -> &ChatOrigin {
        &self.origin
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_partner_typing(&self) -> bool {
        self.reply.is_some()
    }

    pub fn level_up_pending(&self) -> bool {
        self.level_up.is_some()
    }

    /// Append our message. Only one reply is pending at a time; messages
    /// sent while the partner is typing share it.
    pub(crate) fn send(&mut self, text: String, now: Instant, timings: &Timings) {
        if self.reply.is_none() {
            self.history_at_send = self.messages.len();
            self.reply = Some(Deadline::after(now, timings.reply_delay));
        }
        self.messages.push(ChatMessage {
            sender: Sender::Me,
            text,
        });
    }

    /// Fire whichever deadlines have passed
    pub(crate) fn poll<R: Rng>(
        &mut self,
        now: Instant,
        trust: TrustLevel,
        timings: &Timings,
        rng: &mut R,
    ) -> Vec<ChatEvent> {
        let mut events = Vec::new();

        if self.reply.is_some_and(|d| d.is_due(now)) {
            self.reply = None;
            let text = PARTNER_REPLIES[rng.gen_range(0..PARTNER_REPLIES.len())];
            self.messages.push(ChatMessage {
                sender: Sender::Partner,
                text: text.to_string(),
            });
            events.push(ChatEvent::PartnerReplied);

            if trust.is_anonymous()
                && self.level_up.is_none()
                && self.history_at_send > timings.level_up_message_threshold
            {
                self.level_up = Some(Deadline::after(now, timings.level_up_delay));
            }
        }

        if self.level_up.is_some_and(|d| d.is_due(now)) {
            self.level_up = None;
            events.push(ChatEvent::LevelUpDue);
        }

        events
    }
}
