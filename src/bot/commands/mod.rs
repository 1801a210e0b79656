//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Category management commands
pub mod category;

/// General utility commands
pub mod general;

/// Export and bulk-edit commands
pub mod inventory;

/// Product management commands
pub mod product;

/// Low-stock views and inventory summary
pub mod stock;

// Export commands
pub use category::*;
pub use general::*;
pub use inventory::*;
pub use product::*;
pub use stock::*;

use crate::{bot::BotData, errors::Error};

/// Every top-level command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        ping(),
        help(),
        category(),
        product(),
        stock(),
        inventory(),
    ]
}

/// Upper bound for text placed into a single embed description.
pub(crate) const EMBED_TEXT_LIMIT: usize = 3900;

/// Joins lines until [`EMBED_TEXT_LIMIT`] would be exceeded, then appends a
/// count of the lines left out.
pub(crate) fn join_lines_capped(lines: &[String]) -> String {
    let mut text = String::new();
    for (shown, line) in lines.iter().enumerate() {
        if text.len() + line.len() + 1 > EMBED_TEXT_LIMIT {
            text.push_str(&format!("…and {} more", lines.len() - shown));
            return text;
        }
        text.push_str(line);
        text.push('\n');
    }
    text
}

/// Footer text for a list cut to `limit` entries, if anything was cut.
pub(crate) fn more_note(total: usize, limit: usize) -> Option<String> {
    (total > limit).then(|| format!("…and {} more", total - limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines_capped_short() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_lines_capped(&lines), "a\nb\n");
    }

    #[test]
    fn test_join_lines_capped_truncates() {
        let lines: Vec<String> = (0..200).map(|i| format!("{i:0>50}")).collect();
        let text = join_lines_capped(&lines);
        assert!(text.len() <= EMBED_TEXT_LIMIT + 20);
        assert!(text.ends_with("more"));
    }

    #[test]
    fn test_more_note() {
        assert_eq!(more_note(25, 25), None);
        assert_eq!(more_note(3, 25), None);
        assert_eq!(more_note(31, 25).as_deref(), Some("…and 6 more"));
    }
}
