//! Built-in bot commands — instant responses, no provider call.

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Support,
    Resume,
}

impl Command {
    /// Parse a command from message text. Returns `None` for unknown `/`
    /// prefixes (which pass through to the provider) and plain text.
    pub fn parse(text: &str) -> Option<Self> {
        let cmd = text.split_whitespace().next()?;
        // Group chats address commands as "/support@botname".
        let cmd = cmd.split('@').next()?;
        match cmd {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/support" => Some(Self::Support),
            "/resume" => Some(Self::Resume),
            _ => None,
        }
    }
}
