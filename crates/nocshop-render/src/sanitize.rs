//! Display-label sanitization for link fields.

/// Turns a raw URL into text safe to show as a Markdown link label.
///
/// Only the label is sanitized; link targets keep the raw value.
pub trait UrlSanitizer {
    fn sanitize(&self, url: &str) -> String;
}

/// Default sanitizer for Markdown output.
///
/// Trims whitespace, drops a leading `git+` transport prefix and escapes
/// characters that would close or nest the link label.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownUrlSanitizer;

impl UrlSanitizer for MarkdownUrlSanitizer {
    fn sanitize(&self, url: &str) -> String {
        let url = url.trim();
        let url = url.strip_prefix("git+").unwrap_or(url);
        let mut label = String::with_capacity(url.len());
        for c in url.chars() {
            if matches!(c, '\\' | '[' | ']') {
                label.push('\\');
            }
            label.push(c);
        }
        label
    }
}

/// Passes labels through unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentitySanitizer;

impl UrlSanitizer for IdentitySanitizer {
    fn sanitize(&self, url: &str) -> String {
        url.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_git_prefix() {
        assert_eq!(
            MarkdownUrlSanitizer.sanitize("git+https://github.com/EttusResearch/uhd.git"),
            "https://github.com/EttusResearch/uhd.git"
        );
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(
            MarkdownUrlSanitizer.sanitize("  https://example.com\n"),
            "https://example.com"
        );
    }

    #[test]
    fn escapes_label_brackets() {
        assert_eq!(
            MarkdownUrlSanitizer.sanitize("https://example.com/[x]\\y"),
            "https://example.com/\\[x\\]\\\\y"
        );
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(MarkdownUrlSanitizer.sanitize(""), "");
    }

    #[test]
    fn identity_keeps_value() {
        assert_eq!(IdentitySanitizer.sanitize(" git+x "), " git+x ");
    }
}
