//! Keyword auto-reply bot
//!
//! After an outbound chat message is sent, a background task waits a few
//! seconds and, when the message matches a known keyword, writes an
//! inbound reply into the same thread. The reply arrives pre-`delivered`
//! since it never passes through the send pipeline.

use std::time::Duration;

use sqlx::PgPool;
use uuid::Uuid;

use crate::simulation::MessageStatus;

use super::db;
use super::types::{MessageDirection, MessageType};

const REPLY_DELAY: Duration = Duration::from_secs(3);

/// Pick a canned reply for an outbound message, if any keyword matches.
pub fn reply_for(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase();

    if ["hello", "hi", "hey"].iter().any(|w| lower.contains(w)) {
        Some("Hello! How can I help you today? 😊")
    } else if ["price", "cost", "pricing"].iter().any(|w| lower.contains(w)) {
        Some("Our pricing starts at ₹999/month. Would you like a detailed quote?")
    } else if lower.contains("help") {
        Some("I'm here to help! What do you need assistance with?")
    } else if ["thanks", "thank you"].iter().any(|w| lower.contains(w)) {
        Some("You're welcome! Let me know if you need anything else.")
    } else if message.contains('?') {
        Some("That's a great question! Let me get back to you with details.")
    } else {
        None
    }
}

/// Spawn the auto-reply task for a just-sent outbound message.
pub fn spawn_auto_reply(pool: PgPool, thread_id: Uuid, user_message: String) {
    tokio::spawn(async move {
        tokio::time::sleep(REPLY_DELAY).await;

        let Some(reply) = reply_for(&user_message) else {
            return;
        };

        let created = db::create_message(
            &pool,
            thread_id,
            MessageDirection::Inbound,
            reply,
            MessageType::Text,
            MessageStatus::Delivered,
        )
        .await;

        match created {
            Ok(_) => {
                if let Err(e) = db::update_thread_snapshot(&pool, thread_id, reply, true).await {
                    tracing::error!(%thread_id, error = %e, "failed to update thread after auto-reply");
                }
            }
            Err(e) => {
                tracing::error!(%thread_id, error = %e, "failed to write auto-reply");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_keywords_get_greeting_reply() {
        assert_eq!(
            reply_for("Hi there!"),
            Some("Hello! How can I help you today? 😊")
        );
        assert_eq!(reply_for("hello"), reply_for("Hey"));
    }

    #[test]
    fn pricing_keywords_get_quote_reply() {
        assert!(reply_for("what is the COST?").is_some());
        assert!(reply_for("pricing please").unwrap().contains("₹999"));
    }

    #[test]
    fn question_mark_fallback() {
        assert_eq!(
            reply_for("when will my order arrive?"),
            Some("That's a great question! Let me get back to you with details.")
        );
    }

    #[test]
    fn no_match_means_no_reply() {
        assert_eq!(reply_for("ok"), None);
        assert_eq!(reply_for(""), None);
    }

    #[test]
    fn keyword_priority_is_greeting_first() {
        // "hi, what's the price?" matches both; greeting wins.
        assert_eq!(
            reply_for("hi, what's the price?"),
            Some("Hello! How can I help you today? 😊")
        );
    }
}
