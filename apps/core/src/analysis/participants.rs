//! Participant Extraction.
//!
//! Pulls `local@domain.tld` addresses out of the `From` and `To` headers.
//! Purely lexical: display names, angle brackets and separators are ignored.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{EmailRecord, ProjectBucket};

// NOTE: expect() is acceptable here, the pattern is a compiled-in literal
pub(crate) static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("Invalid regex: email address pattern")
});

/// All addresses found in a header value, in order of appearance
pub fn extract_addresses(header: &str) -> Vec<String> {
    EMAIL_PATTERN
        .find_iter(header)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Collects participant addresses into buckets
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticipantSet;

impl ParticipantSet {
    pub fn new() -> Self {
        Self
    }

    /// Union the addresses of `from` and `to` into the bucket's participants
    pub fn record_participants(&self, bucket: &mut ProjectBucket, record: &EmailRecord) {
        for header in [&record.from, &record.to] {
            if header.is_empty() {
                continue;
            }
            bucket.participants.extend(extract_addresses(header));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_addresses_in_one_field() {
        let mut bucket = ProjectBucket::new("Atlas");
        let record = EmailRecord::new("", "a@x.com", "b@y.org, c@z.io", None, "");

        ParticipantSet::new().record_participants(&mut bucket, &record);

        let participants: Vec<&str> = bucket.participants().iter().map(String::as_str).collect();
        assert_eq!(participants, vec!["a@x.com", "b@y.org", "c@z.io"]);
    }

    #[test]
    fn test_display_names_are_stripped() {
        let found = extract_addresses("\"Jane Doe\" <jane.doe@corp.example.com>, Bob <bob+ops@ex.fr>");
        assert_eq!(found, vec!["jane.doe@corp.example.com", "bob+ops@ex.fr"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut bucket = ProjectBucket::new("Atlas");
        let record = EmailRecord::new("", "a@x.com", "a@x.com", None, "");
        let participants = ParticipantSet::new();

        participants.record_participants(&mut bucket, &record);
        participants.record_participants(&mut bucket, &record);

        assert_eq!(bucket.participants().len(), 1);
    }

    #[test]
    fn test_malformed_headers_contribute_nothing() {
        let mut bucket = ProjectBucket::new("Atlas");
        let record = EmailRecord::new("", "undisclosed-recipients:;", "no-at-sign.com", None, "");

        ParticipantSet::new().record_participants(&mut bucket, &record);

        assert!(bucket.participants().is_empty());
    }

    #[test]
    fn test_requires_two_letter_tld() {
        assert!(extract_addresses("root@localhost").is_empty());
        assert!(extract_addresses("x@host.c").is_empty());
    }
}
