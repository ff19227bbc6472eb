/// Who produced a message in the conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    User,
    Agent,
}

impl Origin {
    /// Returns the short label shown above a bubble.
    pub fn label(&self) -> &'static str {
        match self {
            Origin::User => "You",
            Origin::Agent => "Agent",
        }
    }
}

/// A single turn in the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub origin: Origin,
    pub text: String,
}

impl Message {
    /// Create a new message with the given origin and text.
    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
        }
    }

    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    /// Create a new agent message.
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(Origin::Agent, text)
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }
}
