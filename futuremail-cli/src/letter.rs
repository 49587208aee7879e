//! Turning command line input into a draft

use anyhow::Context;
use chrono::NaiveDateTime;
use futuremail::draft::DraftEmail;
use futuremail::richtext::RichTextEditor;

/// Accepted `--at` formats, local time
pub const SEND_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a delivery time typed on the command line
///
/// # Errors
///
/// Returns an error if `input` matches none of [`SEND_TIME_FORMATS`].
pub fn parse_send_time(input: &str) -> anyhow::Result<NaiveDateTime> {
    let input = input.trim();
    SEND_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .with_context(|| format!("'{input}' is not a time like 2026-10-16 08:30"))
}

/// A letter collected from flags, files and prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body, one paragraph per line
    pub body: String,
    /// Delivery time
    pub at: NaiveDateTime,
}

impl Letter {
    /// Draft with the body rendered the same way the web editor renders it
    #[must_use]
    pub fn draft(&self) -> DraftEmail {
        let mut editor = RichTextEditor::default();
        editor.sync_text(self.body.trim_end());

        DraftEmail {
            recipient: self.to.clone(),
            subject: self.subject.clone(),
            body_html: editor.html(),
            scheduled_at: Some(self.at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use futuremail::forms::{validate, ValidationFailure};

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_parse_send_time_formats() {
        assert_eq!(parse_send_time("2026-10-16 08:10:30").unwrap(), at(8, 10, 30));
        assert_eq!(parse_send_time(" 2026-10-16 08:10 ").unwrap(), at(8, 10, 0));
        assert!(parse_send_time("tomorrow").is_err());
        assert!(parse_send_time("2026-10-16T08:10").is_err());
    }

    #[test]
    fn test_draft_renders_body() {
        let letter = Letter {
            to: "a@b.com".into(),
            subject: "Hi".into(),
            body: "hello\n".into(),
            at: at(8, 10, 0),
        };

        let draft = letter.draft();
        assert_eq!(draft.body_html, "<p>hello</p>");
        assert_eq!(draft.scheduled_at, Some(at(8, 10, 0)));

        let validated = validate(&draft, at(8, 0, 0), TimeDelta::minutes(5)).unwrap();
        assert_eq!(validated.recipient, "a@b.com");
    }

    #[test]
    fn test_blank_body_is_rejected() {
        let letter = Letter {
            to: "a@b.com".into(),
            subject: "Hi".into(),
            body: "   \n".into(),
            at: at(8, 10, 0),
        };

        assert_eq!(
            validate(&letter.draft(), at(8, 0, 0), TimeDelta::minutes(5)),
            Err(ValidationFailure::MissingBody)
        );
    }
}
