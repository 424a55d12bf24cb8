//! Slash command parsing for the chat application.
//!
//! Only an exact match is a command; any other input, including other text that
//! starts with `/`, is sent to the endpoint as a message.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Exit the chat application.
    Exit,
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use aura::chat::{ChatCommand, parse_command};
/// assert_eq!(parse_command("/EXIT"), Some(ChatCommand::Exit));
/// assert!(parse_command("/exit now").is_none());
/// assert!(parse_command("Salom!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("/exit") {
        Some(ChatCommand::Exit)
    } else {
        None
    }
}
