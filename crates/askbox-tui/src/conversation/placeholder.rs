//! Placeholder text shown before the user types anything.

/// Input placeholder when the draft is empty.
pub fn input_placeholder(busy: bool) -> &'static str {
    if busy {
        "Waiting for the answer... (you can keep typing)"
    } else {
        "Ask me anything..."
    }
}

/// Greeting headline for an empty conversation.
pub fn welcome_title(assistant_name: &str) -> String {
    format!("Hello! I'm {assistant_name}.")
}

/// Greeting body for an empty conversation.
pub const WELCOME_BODY: &str =
    "Ask me anything about web development, programming, or general knowledge!";
