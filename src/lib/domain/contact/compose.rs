//! Message composition

use crate::domain::communication::{
    mailer::{Mailbox, OutgoingMessage},
    EmailAddress,
};

use super::SanitizedSubmission;

/// The subject line for a submission
pub fn subject(submission: &SanitizedSubmission) -> String {
    format!("New Contact Form Submission from {}", submission.name)
}

/// The plain text body for a submission, message last
pub fn body(submission: &SanitizedSubmission) -> String {
    format!(
        "You have received a new message from your website contact form.\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone Number: {}\n\
         Message:\n{}",
        submission.name, submission.email, submission.phone_number, submission.message
    )
}

/// Builds the email relaying `submission` from `sender` to `recipients`.
///
/// Replies go back to the submitter, under the name they typed.
pub fn compose(
    submission: SanitizedSubmission,
    sender: &Mailbox,
    recipients: &[EmailAddress],
) -> OutgoingMessage {
    OutgoingMessage {
        subject: subject(&submission),
        body: body(&submission),
        from: sender.clone(),
        to: recipients.to_vec(),
        reply_to: Mailbox::new(submission.email, submission.display_name),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::contact::{SubmissionRequest, ValidSubmission};

    use super::*;

    fn sanitized(name: &str) -> SanitizedSubmission {
        SanitizedSubmission::from(ValidSubmission {
            name: name.to_string(),
            email: EmailAddress::new("jane@example.com").expect("valid email"),
            phone_number: "555-1234".to_string(),
            message: "Hello\nthere".to_string(),
        })
    }

    #[test]
    fn test_body_lists_fields_with_message_last() -> TestResult {
        let body = body(&sanitized("Jane Doe"));

        assert_eq!(
            body,
            "You have received a new message from your website contact form.\n\n\
             Name: Jane Doe\n\
             Email: jane@example.com\n\
             Phone Number: 555-1234\n\
             Message:\n\
             Hello\nthere"
        );

        Ok(())
    }

    #[test]
    fn test_compose() -> TestResult {
        let sender = Mailbox::new(EmailAddress::new("noreply@example.com")?, "Website");
        let recipients = vec![
            EmailAddress::new("a@x.com")?,
            EmailAddress::new("b@x.com")?,
        ];

        let message = compose(sanitized("Jane Doe"), &sender, &recipients);

        assert_eq!(message.subject, "New Contact Form Submission from Jane Doe");
        assert_eq!(message.from, sender);
        assert_eq!(message.to, recipients);
        assert_eq!(message.reply_to.to_string(), "Jane Doe <jane@example.com>");

        Ok(())
    }

    #[test]
    fn test_markup_in_name_is_escaped_everywhere() -> TestResult {
        let sender = Mailbox::new(EmailAddress::new("noreply@example.com")?, "");
        let message = compose(sanitized("<script>\"x\"</script>"), &sender, &[]);

        for text in [&message.subject, &message.body] {
            assert!(text.contains("&lt;script&gt;&quot;x&quot;&lt;/script&gt;"));
            assert!(!text.contains("<script>"));
        }

        Ok(())
    }

    #[test]
    fn test_reply_to_name_is_not_escaped() -> TestResult {
        let sender = Mailbox::new(EmailAddress::new("noreply@example.com")?, "");
        let message = compose(sanitized("Dara O'Brien"), &sender, &[]);

        assert_eq!(message.reply_to.name, "Dara O'Brien");
        assert!(!message.subject.contains('\''));

        Ok(())
    }

    #[test]
    fn test_json_and_form_bodies_compose_identically() -> TestResult {
        let json = br#"{"name":"Jane <Doe>","email":"jane@example.com","phone_number":"555-1234","message":"It's me"}"#;
        let form = b"name=Jane+%3CDoe%3E&email=jane%40example.com&phone_number=555-1234&message=It%27s+me";
        let sender = Mailbox::new(EmailAddress::new("noreply@example.com")?, "");

        let from_json = SubmissionRequest::decode(json)?.validate()?;
        let from_form = SubmissionRequest::decode(form)?.validate()?;

        assert_eq!(
            compose(from_json.into(), &sender, &[]),
            compose(from_form.into(), &sender, &[])
        );

        Ok(())
    }
}
