use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A decoded email as handed over by the mail-retrieval side.
///
/// Every field is optional in the input document: a missing or `null` header
/// becomes an empty string (or `None` for the date) instead of failing the load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Decoded `Subject` header.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    /// Decoded `From` header, possibly with display names.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub from: String,
    /// Decoded `To` header, possibly listing several addresses.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub to: String,
    /// Raw RFC-2822 `Date` header, if present.
    #[serde(default)]
    pub date: Option<String>,
    /// Plain-text body, already charset-decoded and stripped of markup.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl EmailRecord {
    pub fn new(
        subject: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        date: Option<&str>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            from: from.into(),
            to: to.into(),
            date: date.map(str::to_string),
            body: body.into(),
        }
    }

    /// `subject + " " + body`, the text every scorer looks at.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.subject, self.body)
    }

    /// Lowercased [`search_text`](Self::search_text).
    pub fn search_text_lower(&self) -> String {
        self.search_text().to_lowercase()
    }
}

/// Per-project aggregate filled while records are routed to a project.
///
/// `emails` and `dates` always have the same length: both are only ever
/// extended together through [`ProjectBucket::push`].
#[derive(Debug, Clone, Default)]
pub struct ProjectBucket {
    name: String,
    emails: Vec<EmailRecord>,
    dates: Vec<Option<String>>,
    pub(crate) participants: BTreeSet<String>,
    pub(crate) keywords: HashMap<String, usize>,
}

impl ProjectBucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Appends a record and its raw date in processing order.
    pub fn push(&mut self, record: EmailRecord) {
        self.dates.push(record.date.clone());
        self.emails.push(record);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn emails(&self) -> &[EmailRecord] {
        &self.emails
    }

    pub fn dates(&self) -> &[Option<String>] {
        &self.dates
    }

    pub fn participants(&self) -> &BTreeSet<String> {
        &self.participants
    }

    pub fn keywords(&self) -> &HashMap<String, usize> {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_become_empty() {
        let json = r#"{"subject": null, "body": "hello"}"#;
        let record: EmailRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.subject, "");
        assert_eq!(record.from, "");
        assert_eq!(record.to, "");
        assert!(record.date.is_none());
        assert_eq!(record.body, "hello");
    }

    #[test]
    fn test_search_text_joins_subject_and_body() {
        let record = EmailRecord::new("Atlas Kickoff", "", "", None, "See You");
        assert_eq!(record.search_text(), "Atlas Kickoff See You");
        assert_eq!(record.search_text_lower(), "atlas kickoff see you");
    }

    #[test]
    fn test_bucket_keeps_emails_and_dates_aligned() {
        let mut bucket = ProjectBucket::new("Atlas");
        bucket.push(EmailRecord::new("a", "", "", Some("Mon, 1 Jan 2024 10:00:00 +0000"), ""));
        bucket.push(EmailRecord::new("b", "", "", None, ""));

        assert_eq!(bucket.name(), "Atlas");
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.emails().len(), bucket.dates().len());
        assert!(bucket.dates()[1].is_none());
    }
}
