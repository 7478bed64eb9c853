use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

/// Append-only activity log entry (`activities` collection).
/// Written by the background logger, never read back by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub text: String,
    pub created_at: BsonDateTime,
}

/// Creation events observed by the activity logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    RequestAdded,
    UserSignedUp,
}

impl ActivityEvent {
    pub fn message(&self) -> &'static str {
        match self {
            ActivityEvent::RequestAdded => "A new request has been added.",
            ActivityEvent::UserSignedUp => "A new user has signed up.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_fixed_strings() {
        assert_eq!(ActivityEvent::RequestAdded.message(), "A new request has been added.");
        assert_eq!(ActivityEvent::UserSignedUp.message(), "A new user has signed up.");
    }
}
