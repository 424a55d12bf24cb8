//! Flattening a transcript into the single block of text the endpoint expects.

use crate::history::Turn;

/// The line that cues the remote model to answer.
const ASSISTANT_CUE: &str = "Assistant:";

/// Render prior turns and the new input as a prompt.
///
/// Each prior user or assistant turn with non-blank content becomes one
/// `"<Role>: <content>"` line; blank turns and turns with any other role produce no
/// line at all.  The trimmed input follows as a `User:` line, and the
/// prompt ends with a bare `Assistant:` cue.  Lines are joined with `\n` and there is
/// no trailing newline.
///
/// ```
/// use aura::{Turn, build_prompt};
///
/// let prior = vec![Turn::user("a"), Turn::assistant("b")];
/// assert_eq!(
///     build_prompt(&prior, "c"),
///     "User: a\nAssistant: b\nUser: c\nAssistant:"
/// );
/// ```
pub fn build_prompt(history_prev: &[Turn], user_input: &str) -> String {
    let mut lines: Vec<String> = history_prev
        .iter()
        .filter_map(|turn| {
            let label = turn.role.label()?;
            let content = turn.content.trim();
            (!content.is_empty()).then(|| format!("{label}: {content}"))
        })
        .collect();
    lines.push(format!("User: {}", user_input.trim()));
    lines.push(ASSISTANT_CUE.to_string());
    lines.join("\n")
}
