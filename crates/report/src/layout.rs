//! Text layout helpers
//!
//! Classifies policy text into bullets and paragraphs and wraps lines to
//! a character budget. Width is estimated by character count; with a
//! single known font that is accurate enough for report layout.

/// One classified line of policy text
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PolicyLine {
    /// A line starting with `-` or `*`, marker stripped
    Bullet(String),
    /// Any other non-blank line
    Paragraph(String),
}

/// Split policy text into bullets and paragraphs, dropping blank lines
///
/// Bullet markers (`-`, `*`) and surrounding whitespace are stripped
/// from both ends of bullet lines.
pub(crate) fn classify_policy_text(text: &str) -> Vec<PolicyLine> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.starts_with('-') || trimmed.starts_with('*') {
                let item = trimmed.trim_matches(['-', '*', ' ']).to_string();
                Some(PolicyLine::Bullet(item))
            } else {
                Some(PolicyLine::Paragraph(trimmed.to_string()))
            }
        })
        .collect()
}

/// Greedy word wrap to a maximum of `max_chars` characters per line
///
/// Words longer than the budget are split at character boundaries so no
/// line ever exceeds it. Empty input yields no lines.
pub(crate) fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= max_chars {
            current.push_str(word);
            current_len = word_len;
        } else {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                if chunk.len() == max_chars {
                    lines.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                    current_len = chunk.len();
                }
            }
        }
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_splits_bullets_and_paragraphs() {
        let text = "Intro paragraph.\n- First measure\n* Second measure\nClosing note.";
        let lines = classify_policy_text(text);
        assert_eq!(
            lines,
            vec![
                PolicyLine::Paragraph("Intro paragraph.".to_string()),
                PolicyLine::Bullet("First measure".to_string()),
                PolicyLine::Bullet("Second measure".to_string()),
                PolicyLine::Paragraph("Closing note.".to_string()),
            ]
        );
    }

    #[test]
    fn classify_strips_markers_from_both_ends() {
        let lines = classify_policy_text("- Expand tree cover -");
        assert_eq!(
            lines,
            vec![PolicyLine::Bullet("Expand tree cover".to_string())]
        );
    }

    #[test]
    fn classify_drops_blank_lines() {
        let lines = classify_policy_text("First.\n\n   \nSecond.");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn classify_handles_indented_bullets() {
        let lines = classify_policy_text("  - Indented item");
        assert_eq!(lines, vec![PolicyLine::Bullet("Indented item".to_string())]);
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap("short text", 40), vec!["short text".to_string()]);
    }

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(
            lines,
            vec!["alpha beta".to_string(), "gamma delta".to_string()]
        );
        for line in &lines {
            assert!(line.chars().count() <= 11);
        }
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(
            lines,
            vec!["abcd".to_string(), "efgh".to_string(), "ij".to_string()]
        );
    }

    #[test]
    fn wrap_empty_input_yields_nothing() {
        assert!(wrap("", 40).is_empty());
        assert!(wrap("   ", 40).is_empty());
    }

    #[test]
    fn wrap_collapses_internal_whitespace() {
        assert_eq!(wrap("a    b\tc", 40), vec!["a b c".to_string()]);
    }
}
