// src/session.rs

use crate::models::Message;

/// Per-session state: the conversation log and the boot flag. Owned by the
/// event loop and handed to the turn handler by mutable reference; nothing
/// else mutates it.
#[derive(Debug, Default)]
pub struct Session {
    pub initialized: bool,
    messages: Vec<Message>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            initialized: false,
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Records one completed turn: the user entry, then the assistant
    /// entry. This is the only way the log grows, so its length stays even
    /// and alternating after every completed turn.
    pub fn append_turn(&mut self, user_content: &str, assistant_content: &str) {
        self.messages.push(Message::user(user_content));
        self.messages.push(Message::assistant(assistant_content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_append_turn_adds_user_then_assistant() {
        let mut session = Session::new();
        session.append_turn("recommend a laptop", "X1 Laptop — light and sturdy");

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, Role::User);
        assert_eq!(session.messages()[0].content, "recommend a laptop");
        assert_eq!(session.messages()[1].role, Role::Assistant);
        assert_eq!(session.messages()[1].content, "X1 Laptop — light and sturdy");
    }

    #[test]
    fn test_log_length_stays_even() {
        let mut session = Session::new();
        session.append_turn("first", "one");
        session.append_turn("second", "two");

        assert_eq!(session.messages().len() % 2, 0);
        assert_eq!(session.messages()[2].content, "second");
    }
}
