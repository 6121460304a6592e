//! Chapter title derivation

/// Derive a chapter's display title.
///
/// Uses the first non-blank line when it is an ATX heading, otherwise the
/// file stem, otherwise `Chapter N`.
pub fn derive_title(text: &str, file_stem: &str, position: usize) -> String {
    heading_title(text)
        .or_else(|| title_from_file_stem(file_stem))
        .unwrap_or_else(|| format!("Chapter {}", position))
}

/// Title from a leading `#` heading line, if there is one
fn heading_title(text: &str) -> Option<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let line = text.lines().find(|l| !l.trim().is_empty())?;

    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let line = line.trim_start_matches(' ');

    let hashes = line.len() - line.trim_start_matches('#').len();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
        return None;
    }

    let title = strip_attributes(strip_closing_sequence(rest.trim())).trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// `# Title ##` -> `Title`; a closing run only counts after whitespace
fn strip_closing_sequence(s: &str) -> &str {
    let without = s.trim_end_matches('#');
    if without.is_empty() || without.ends_with([' ', '\t']) {
        without
    } else {
        s
    }
}

/// `Setup {#setup}` -> `Setup`
fn strip_attributes(s: &str) -> &str {
    if s.ends_with('}') {
        if let Some(open) = s.rfind('{') {
            return s[..open].trim_end();
        }
    }
    s
}

/// Human-readable title from a file stem: `03-getting_started` -> `Getting Started`
fn title_from_file_stem(stem: &str) -> Option<String> {
    let words: Vec<String> = stem
        .split(['-', '_', '.', ' '])
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .skip_while(|token| token.chars().all(|c| c.is_ascii_digit()))
        .map(capitalize)
        .collect();

    (!words.is_empty()).then(|| words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_title() {
        assert_eq!(derive_title("# Introduction\n\nBody", "01-x", 1), "Introduction");
        assert_eq!(derive_title("\n\n  ## Setup ##\n", "x", 1), "Setup");
        assert_eq!(derive_title("# C# Tips", "x", 1), "C# Tips");
        assert_eq!(derive_title("# Install {#install}", "x", 1), "Install");
    }

    #[test]
    fn test_heading_after_byte_order_mark() {
        assert_eq!(derive_title("\u{feff}# Introduction", "01-notes", 1), "Introduction");
    }

    #[test]
    fn test_non_heading_lines_fall_back_to_file_name() {
        assert_eq!(derive_title("Just text\n# Later", "03-conclusion", 3), "Conclusion");
        assert_eq!(derive_title("#hashtag", "notes", 1), "Notes");
        assert_eq!(derive_title("####### seven", "notes", 1), "Notes");
        assert_eq!(derive_title("    # indented code", "notes", 1), "Notes");
        assert_eq!(derive_title("#", "notes", 1), "Notes");
    }

    #[test]
    fn test_file_stem_titles() {
        assert_eq!(derive_title("", "getting_started-guide", 1), "Getting Started Guide");
        assert_eq!(derive_title("", "10.appendix", 1), "Appendix");
        assert_eq!(derive_title("", "chapter-2-basics", 1), "Chapter 2 Basics");
    }

    #[test]
    fn test_numeric_fallback() {
        assert_eq!(derive_title("", "---", 4), "Chapter 4");
        assert_eq!(derive_title("plain", "07", 7), "Chapter 7");
        assert_eq!(derive_title("", "", 1), "Chapter 1");
    }
}
