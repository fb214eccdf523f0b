//! Submission sanitization

use crate::domain::communication::EmailAddress;

use super::ValidSubmission;

/// HTML-entity escapes `& < > " '`.
///
/// Existing entities are decoded first, so escaping twice gives the same
/// result as escaping once.
pub fn escape_text(raw: &str) -> String {
    let decoded = htmlescape::decode_html(raw).unwrap_or_else(|_| raw.to_string());

    htmlescape::encode_minimal(&decoded)
}

/// A validated submission that is safe to place in an email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedSubmission {
    /// The escaped name
    pub name: String,

    /// The trimmed name as submitted, for the Reply-To header where lettre does the encoding
    pub display_name: String,

    /// The cleaned email address
    pub email: EmailAddress,

    /// The escaped phone number
    pub phone_number: String,

    /// The escaped message
    pub message: String,
}

impl From<ValidSubmission> for SanitizedSubmission {
    fn from(submission: ValidSubmission) -> Self {
        Self {
            name: escape_text(&submission.name),
            display_name: submission.name,
            email: submission.email.sanitized(),
            phone_number: escape_text(&submission.phone_number),
            message: escape_text(&submission.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_escape_text_escapes_markup() {
        let escaped = escape_text(r#"<script>alert("hi")</script> & 'bye'"#);

        assert!(escaped.starts_with("&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt; &amp; "));
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
    }

    #[test]
    fn test_escape_text_is_idempotent() {
        for raw in [
            "Jane <jane@example.com>",
            r#"O'Brien "the builder""#,
            "Tom & Jerry",
            "already &amp; escaped &lt;b&gt;",
            "plain text",
        ] {
            let once = escape_text(raw);

            assert_eq!(escape_text(&once), once, "{raw}");
        }
    }

    #[test]
    fn test_escape_text_leaves_plain_text_alone() {
        assert_eq!(escape_text("555-1234"), "555-1234");
        assert_eq!(escape_text("Hello\nWorld"), "Hello\nWorld");
    }

    #[test]
    fn test_sanitize_submission() -> TestResult {
        let submission = ValidSubmission {
            name: "<b>Jane</b>".to_string(),
            email: EmailAddress::new("jane@example.com")?,
            phone_number: "555-1234".to_string(),
            message: "\"quoted\"".to_string(),
        };

        let sanitized = SanitizedSubmission::from(submission);

        assert_eq!(sanitized.name, "&lt;b&gt;Jane&lt;/b&gt;");
        assert_eq!(sanitized.display_name, "<b>Jane</b>");
        assert_eq!(sanitized.email.as_str(), "jane@example.com");
        assert_eq!(sanitized.phone_number, "555-1234");
        assert_eq!(sanitized.message, "&quot;quoted&quot;");

        Ok(())
    }
}
