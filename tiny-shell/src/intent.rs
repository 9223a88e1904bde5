//! Address bar intents read from the terminal
//!
//! A line starting with `:` is a toolbar action; anything else is text
//! submitted from the address bar.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Submit(String),
    Resolve(String),
    Back,
    Forward,
    Reload,
    State,
    Quit,
    Unknown(String),
}

impl Intent {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(action) = trimmed.strip_prefix(':') else {
            return Intent::Submit(line.to_string());
        };

        let mut parts = action.splitn(2, ' ');
        let name = parts.next().unwrap_or_default().to_lowercase();
        let rest = parts.next().unwrap_or_default().to_string();

        match name.as_str() {
            "back" | "b" => Intent::Back,
            "forward" | "f" => Intent::Forward,
            "reload" | "r" => Intent::Reload,
            "state" | "s" => Intent::State,
            "resolve" => Intent::Resolve(rest),
            "quit" | "q" => Intent::Quit,
            _ => Intent::Unknown(trimmed.to_string()),
        }
    }
}
