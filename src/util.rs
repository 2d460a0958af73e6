//! Shared utility functions.

/// Convert a slug to title case.
///
/// Splits on `-` and `_`, capitalizes each word.
/// "getting-started" -> "Getting Started"
/// "api_reference" -> "Api Reference"
pub fn title_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a string to a slug suitable for use as an HTML id.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .replace(' ', "-")
        .replace(|c: char| !c.is_alphanumeric() && c != '-', "")
}

/// Escape HTML special characters in text content.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a string for use inside a double-quoted HTML attribute.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Word-wrap text into at most `max_lines` lines of roughly `max_chars`
/// characters each.
///
/// Wrapping counts characters, not bytes, so multi-byte scripts wrap at
/// sensible points. Words longer than a line (including unsegmented CJK
/// titles) are split mid-word. When the text doesn't fit, the last line
/// is truncated with an ellipsis.
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let max_lines = max_lines.max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    let mut push_line = |lines: &mut Vec<String>, line: String| {
        if !line.is_empty() {
            lines.push(line);
        }
    };

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > max_chars {
            push_line(&mut lines, std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > max_chars {
            // Hard-split an overlong word across lines.
            for ch in word.chars() {
                if current_len == max_chars {
                    push_line(&mut lines, std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(ch);
                current_len += 1;
            }
        } else {
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
    }
    push_line(&mut lines, current);

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("getting-started"), "Getting Started");
        assert_eq!(title_case("installation"), "Installation");
        assert_eq!(title_case("api_reference"), "Api Reference");
        assert_eq!(title_case("README"), "README");
        assert_eq!(title_case("my-cool-feature"), "My Cool Feature");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("API Reference"), "api-reference");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<div>&</div>"), "&lt;div&gt;&amp;&lt;/div&gt;");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(
            escape_attr(r#"a "quoted" < b"#),
            "a &quot;quoted&quot; &lt; b"
        );
    }

    #[test]
    fn test_wrap_text_basic() {
        assert_eq!(
            wrap_text("a fairly long page title", 10, 3),
            vec!["a fairly", "long page", "title"]
        );
    }

    #[test]
    fn test_wrap_text_short() {
        assert_eq!(wrap_text("Short", 16, 3), vec!["Short"]);
    }

    #[test]
    fn test_wrap_text_overlong_word() {
        assert_eq!(
            wrap_text("supercalifragilistic", 8, 3),
            vec!["supercal", "ifragili", "stic"]
        );
    }

    #[test]
    fn test_wrap_text_truncates_with_ellipsis() {
        let lines = wrap_text("one two three four five six seven eight", 5, 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with('…'));
    }

    #[test]
    fn test_wrap_text_counts_chars_not_bytes() {
        // Unsegmented text wraps by character count.
        let lines = wrap_text("知识花园的一篇笔记", 4, 3);
        assert_eq!(lines, vec!["知识花园", "的一篇笔", "记"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("", 16, 3).is_empty());
        assert!(wrap_text("   ", 16, 3).is_empty());
    }
}
