//! Table-of-contents anchors and links.

/// Anchor for a category heading: lower-cased, spaces become hyphens.
/// Punctuation is kept as-is.
pub fn anchor(text: &str) -> String {
    text.to_lowercase().replace(' ', "-")
}

/// Generate a table-of-contents link for a heading.
pub fn render_toc_link(text: &str) -> String {
    format!("[{}](#{})", text, anchor(text))
}

/// Generate a TOC list item.
pub fn render_toc_item(title: &str) -> String {
    format!("- {}", render_toc_link(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_simple() {
        assert_eq!(anchor("Python"), "python");
    }

    #[test]
    fn anchor_with_spaces() {
        assert_eq!(anchor("Shell Utilities"), "shell-utilities");
        assert_eq!(anchor("Visual Studio Code"), "visual-studio-code");
    }

    #[test]
    fn anchor_keeps_punctuation() {
        assert_eq!(anchor("LaTeX & PDF"), "latex-&-pdf");
    }

    #[test]
    fn toc_item() {
        assert_eq!(render_toc_item("LaTeX"), "- [LaTeX](#latex)");
    }
}
