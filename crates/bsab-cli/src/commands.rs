//! Slash commands for interactive mode

use std::path::PathBuf;

/// Result of executing a slash command
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Clear the conversation
    Clear,
    /// Attach a file to the next send
    Attach(PathBuf),
    /// Drop the pending attachment
    Detach,
    /// Upload a file to the backend's retrieval corpus
    Embed(PathBuf),
    /// Print the conversation so far
    History,
    /// Show a message to the user (not sent to the backend)
    Message(String),
    /// Exit the application
    Exit,
    /// Unknown command
    Unknown(String),
}

/// Parse a slash command. Returns `None` for ordinary chat input.
pub fn parse_command(input: &str) -> Option<CommandResult> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = input[1..].splitn(2, ' ').collect();
    let command = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    Some(match command.as_str() {
        "help" | "h" | "?" => CommandResult::Message(help_message()),

        "clear" | "c" => CommandResult::Clear,

        "quit" | "q" | "exit" => CommandResult::Exit,

        "attach" | "a" => {
            if args.is_empty() {
                CommandResult::Message("Usage: /attach <path>".to_string())
            } else {
                CommandResult::Attach(PathBuf::from(args))
            }
        }

        "detach" | "d" => CommandResult::Detach,

        "embed" | "e" => {
            if args.is_empty() {
                CommandResult::Message("Usage: /embed <path>".to_string())
            } else {
                CommandResult::Embed(PathBuf::from(args))
            }
        }

        "history" => CommandResult::History,

        _ => CommandResult::Unknown(command),
    })
}

fn help_message() -> String {
    "Commands:
  /help            Show this help
  /attach <path>   Attach a file to your next message
  /detach          Remove the pending attachment
  /embed <path>    Add a document to the bot's knowledge base
  /history         Print the conversation so far
  /clear           Start a new conversation
  /quit            Exit

Anything else is sent to the bot as a question."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(parse_command("what is the golden thread").is_none());
        assert!(parse_command("").is_none());
    }

    #[test]
    fn test_exit_aliases() {
        assert_eq!(parse_command("/quit"), Some(CommandResult::Exit));
        assert_eq!(parse_command("/q"), Some(CommandResult::Exit));
        assert_eq!(parse_command("/exit"), Some(CommandResult::Exit));
    }

    #[test]
    fn test_attach_with_path() {
        assert_eq!(
            parse_command("/attach docs/policy.pdf"),
            Some(CommandResult::Attach(PathBuf::from("docs/policy.pdf")))
        );
    }

    #[test]
    fn test_attach_without_path_shows_usage() {
        match parse_command("/attach") {
            Some(CommandResult::Message(msg)) => assert!(msg.contains("Usage")),
            other => panic!("expected usage message, got {:?}", other),
        }
    }

    #[test]
    fn test_embed_with_path() {
        assert_eq!(
            parse_command("/embed guidance.txt"),
            Some(CommandResult::Embed(PathBuf::from("guidance.txt")))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command("/frobnicate"),
            Some(CommandResult::Unknown("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse_command("/CLEAR"), Some(CommandResult::Clear));
    }
}
