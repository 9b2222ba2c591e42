//! Plain-text summaries of the long-form HTML description.

use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

const SUMMARY_SENTENCES: usize = 2;
const ELLIPSIS: &str = "...";

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag regex"))
}

fn sentence_break() -> &'static Regex {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    BREAK.get_or_init(|| Regex::new(r"[.!?]+\s").expect("valid sentence regex"))
}

/// Replaces every `<...>` span with a space. Unpaired `<` or `>` stay as-is.
pub fn strip_tags(html: &str) -> Cow<'_, str> {
    tag_pattern().replace_all(html, " ")
}

/// Returns the non-empty, trimmed sentences of `text` without their closing
/// punctuation.
pub fn sentences(text: &str) -> Vec<&str> {
    sentence_break()
        .split(text)
        .map(|s| s.trim().trim_end_matches(['.', '!', '?']).trim_end())
        .filter(|s| !s.is_empty())
        .collect()
}

/// First two sentences of the description joined by `". "`, closed with
/// `"..."` when the text continues (or already ended in `...`) and `"."`
/// otherwise.
pub fn text_summary(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    let plain = strip_tags(html);
    let all = sentences(&plain);
    if all.is_empty() {
        return String::new();
    }
    let mut summary = all
        .iter()
        .take(SUMMARY_SENTENCES)
        .copied()
        .collect::<Vec<_>>()
        .join(". ");
    if all.len() > SUMMARY_SENTENCES || plain.trim_end().ends_with(ELLIPSIS) {
        summary.push_str(ELLIPSIS);
    } else {
        summary.push('.');
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_two_sentences_with_ellipsis() {
        let html = "<p>Great food. Nice place. Highly recommend!</p>";
        assert_eq!(text_summary(html), "Great food. Nice place...");
    }

    #[test]
    fn short_text_ends_with_period() {
        assert_eq!(text_summary("<b>Cosy</b> bar! Open late"), "Cosy  bar. Open late.");
        assert_eq!(text_summary("One sentence"), "One sentence.");
        assert_eq!(text_summary("Ends here."), "Ends here.");
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        assert_eq!(text_summary(""), "");
        assert_eq!(text_summary("   "), "");
        assert_eq!(text_summary("<p></p>"), "");
    }

    #[test]
    fn unmatched_angle_brackets_are_left_alone() {
        assert_eq!(strip_tags("5 < 6"), "5 < 6");
        assert_eq!(strip_tags("a > b"), "a > b");
        assert_eq!(strip_tags("x <br> y"), "x   y");
        assert_eq!(text_summary("5 < 6"), "5 < 6.");
    }

    #[test]
    fn bracket_pair_spanning_text_is_stripped() {
        assert_eq!(strip_tags("a < b and c > d"), "a   d");
    }

    #[test]
    fn summary_is_stable_on_plain_text() {
        let once = text_summary("Tasty pastries. Good coffee");
        assert_eq!(text_summary(&once), once);
    }

    #[test]
    fn summary_is_stable_after_ellipsis() {
        let once = text_summary("<p>Great food. Nice place. Highly recommend!</p>");
        assert_eq!(once, "Great food. Nice place...");
        assert_eq!(text_summary(&once), once);
        assert_eq!(text_summary("Wait for it..."), "Wait for it...");
    }
}
