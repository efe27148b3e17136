//! Message delivery status state machine
//!
//! A message moves forward along `sent -> delivered -> read`. `failed` is
//! reachable from `sent` or `delivered`; `read` and `failed` are terminal.
//! The simulators only ever drive the forward path; `failed` exists for
//! external callers such as the manual status-correction endpoint.

use serde::{Deserialize, Serialize};

/// Delivery status of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
    Failed,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(Self::Sent),
            "delivered" => Some(Self::Delivered),
            "read" => Some(Self::Read),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Whether a transition from `self` to `next` is legal.
    ///
    /// Legal transitions:
    /// - `sent -> delivered`
    /// - `delivered -> read`
    /// - `sent -> failed`, `delivered -> failed`
    ///
    /// `read` and `failed` have no outgoing transitions.
    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        matches!(
            (self, next),
            (Self::Sent, Self::Delivered)
                | (Self::Delivered, Self::Read)
                | (Self::Sent, Self::Failed)
                | (Self::Delivered, Self::Failed)
        )
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Read | Self::Failed)
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_legal() {
        assert!(MessageStatus::Sent.can_transition_to(MessageStatus::Delivered));
        assert!(MessageStatus::Delivered.can_transition_to(MessageStatus::Read));
    }

    #[test]
    fn failed_reachable_from_sent_and_delivered_only() {
        assert!(MessageStatus::Sent.can_transition_to(MessageStatus::Failed));
        assert!(MessageStatus::Delivered.can_transition_to(MessageStatus::Failed));
        assert!(!MessageStatus::Read.can_transition_to(MessageStatus::Failed));
        assert!(!MessageStatus::Failed.can_transition_to(MessageStatus::Failed));
    }

    #[test]
    fn no_backward_or_skipping_transitions() {
        assert!(!MessageStatus::Sent.can_transition_to(MessageStatus::Read));
        assert!(!MessageStatus::Delivered.can_transition_to(MessageStatus::Sent));
        assert!(!MessageStatus::Read.can_transition_to(MessageStatus::Delivered));
        assert!(!MessageStatus::Sent.can_transition_to(MessageStatus::Sent));
    }

    #[test]
    fn terminal_states() {
        assert!(MessageStatus::Read.is_terminal());
        assert!(MessageStatus::Failed.is_terminal());
        assert!(!MessageStatus::Sent.is_terminal());
        assert!(!MessageStatus::Delivered.is_terminal());
    }

    #[test]
    fn string_round_trip() {
        for status in [
            MessageStatus::Sent,
            MessageStatus::Delivered,
            MessageStatus::Read,
            MessageStatus::Failed,
        ] {
            assert_eq!(MessageStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(MessageStatus::from_str("bounced"), None);
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&MessageStatus::Delivered).unwrap();
        assert_eq!(json, "\"delivered\"");
        let parsed: MessageStatus = serde_json::from_str("\"read\"").unwrap();
        assert_eq!(parsed, MessageStatus::Read);
    }
}
