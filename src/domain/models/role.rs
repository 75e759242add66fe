use std::fmt;

pub const ASSISTANT_NAME: &str = "VIGNAN JnanaMitra";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire name used by chat completion APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => return "user",
            Role::Assistant => return "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::User => return write!(f, "You"),
            Role::Assistant => return write!(f, "{ASSISTANT_NAME}"),
        }
    }
}
