//! Human-oriented colored output

use colored::Colorize;

/// Maximum description length shown in list views.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// A value that knows how to render itself for the pretty format.
pub trait Pretty {
    fn pretty(&self) -> String;
}

/// Render items as blank-line separated blocks.
pub fn format_list<T: Pretty>(items: &[T]) -> String {
    if items.is_empty() {
        return "No results found.".dimmed().to_string();
    }

    items
        .iter()
        .map(Pretty::pretty)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `Label: value` line with a dimmed label.
pub fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {} {}", format!("{}:", label).dimmed(), value)
}

/// Shorten `text` to `max` characters, appending an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str);

    impl Pretty for Item {
        fn pretty(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_format_list_joins_blocks() {
        let out = format_list(&[Item("a"), Item("b")]);
        assert_eq!(out, "a\n\nb");
    }

    #[test]
    fn test_format_list_empty() {
        let items: Vec<Item> = vec![];
        assert!(format_list(&items).contains("No results found."));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("  padded  ", 10), "padded");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        // Multi-byte characters count once
        assert_eq!(truncate("ééééé", 3), "éé…");
    }

    #[test]
    fn test_field_contains_label_and_value() {
        let line = field("Comics", 42);
        assert!(line.contains("Comics:"));
        assert!(line.contains("42"));
    }
}
