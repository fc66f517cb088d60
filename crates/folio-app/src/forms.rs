// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::Field;

/// Minimum lengths, in UTF-16 code units as a browser form counts them.
pub const NAME_MIN_LEN: usize = 2;
pub const SUBJECT_MIN_LEN: usize = 5;
pub const MESSAGE_MIN_LEN: usize = 10;

/// Whitespace and line terminators as browser `trim()` and regex `\s` see
/// them. Unlike Unicode `White_Space` this has U+FEFF and lacks U+0085.
const FORM_SPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^{FORM_SPACE_CLASS}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("email pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Checks every field and returns only the failures. Within a field the
    /// required rule wins, so an empty value never reports a length error.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if let Some(message) = check_length(
            &self.name,
            NAME_MIN_LEN,
            "Name is required",
            "Name must be at least 2 characters",
        ) {
            errors.insert(Field::Name, message);
        }

        if form_trim(&self.email).is_empty() {
            errors.insert(Field::Email, "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert(Field::Email, "Please enter a valid email address");
        }

        if let Some(message) = check_length(
            &self.subject,
            SUBJECT_MIN_LEN,
            "Subject is required",
            "Subject must be at least 5 characters",
        ) {
            errors.insert(Field::Subject, message);
        }

        if let Some(message) = check_length(
            &self.message,
            MESSAGE_MIN_LEN,
            "Message is required",
            "Message must be at least 10 characters",
        ) {
            errors.insert(Field::Message, message);
        }

        errors
    }
}

fn check_length(
    value: &str,
    min_len: usize,
    required: &'static str,
    too_short: &'static str,
) -> Option<&'static str> {
    let trimmed = form_trim(value);
    if trimmed.is_empty() {
        Some(required)
    } else if trimmed.encode_utf16().count() < min_len {
        Some(too_short)
    } else {
        None
    }
}

pub fn is_form_space(ch: char) -> bool {
    matches!(
        ch,
        '\t'
            | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Trims the way a browser form does before measuring a value.
pub fn form_trim(value: &str) -> &str {
    value.trim_matches(is_form_space)
}

/// Matches the raw value; surrounding whitespace is a format failure.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Per-field error text. A field without an entry is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Empty messages are dropped so the map only ever holds real errors.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.0.remove(&field);
        } else {
            self.0.insert(field, message);
        }
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut errors = Self::default();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactFields, FieldErrors, form_trim, is_valid_email};
    use crate::Field;
    use proptest::prelude::*;

    fn fields(name: &str, email: &str, subject: &str, message: &str) -> ContactFields {
        ContactFields {
            name: name.to_owned(),
            email: email.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn boundary_lengths_are_accepted() {
        let errors = fields("Al", "a@b.co", "Hello there", "1234567890").validate();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn every_field_reports_its_own_message() {
        let errors = fields("", "bad", "hi", "short").validate();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(
            errors.get(Field::Email),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            errors.get(Field::Subject),
            Some("Subject must be at least 5 characters")
        );
        assert_eq!(
            errors.get(Field::Message),
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn whitespace_only_values_count_as_missing() {
        let errors = fields("   ", "\t", " \n ", "    ").validate();
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Subject), Some("Subject is required"));
        assert_eq!(errors.get(Field::Message), Some("Message is required"));
    }

    #[test]
    fn lengths_are_measured_after_trimming() {
        let errors = fields(" A ", "a@b.co", "  Hey  ", "   123456789   ").validate();
        assert_eq!(
            errors.get(Field::Name),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(
            errors.get(Field::Subject),
            Some("Subject must be at least 5 characters")
        );
        assert_eq!(
            errors.get(Field::Message),
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let errors = fields("Zoë", "a@b.co", "Héllo", "ünïcödé!!!").validate();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn lengths_count_utf16_units() {
        // One astral character is two code units, so it meets the name minimum.
        let errors = fields("😀", "a@b.co", "🎉🎉🎉", "🚀🚀🚀🚀🚀").validate();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");

        let errors = fields("😀", "a@b.co", "🎉🎉", "🚀🚀🚀🚀").validate();
        assert_eq!(
            errors.get(Field::Subject),
            Some("Subject must be at least 5 characters")
        );
        assert_eq!(
            errors.get(Field::Message),
            Some("Message must be at least 10 characters")
        );
    }

    #[test]
    fn byte_order_mark_is_trimmed_but_next_line_is_not() {
        let errors = fields("\u{FEFF}", "\u{FEFF}", "\u{FEFF}Hi\u{FEFF}", "x").validate();
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(
            errors.get(Field::Subject),
            Some("Subject must be at least 5 characters")
        );

        let errors = fields("\u{85}A", "a@b.co", "Hello", "1234567890").validate();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(form_trim("\u{3000}\u{A0}x\u{2028}"), "x");
        assert_eq!(form_trim("\u{85}x"), "\u{85}x");
    }

    #[test]
    fn email_pattern_matches_expected_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@b.co\u{FEFF}"));
        assert!(!is_valid_email("a\u{A0}b@c.de"));
        assert!(is_valid_email("a\u{85}b@c.de"));
    }

    #[test]
    fn email_is_not_trimmed_before_the_format_check() {
        let errors = fields("Al", " a@b.co ", "Hello there", "1234567890").validate();
        assert_eq!(
            errors.get(Field::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn set_and_clear_fields() {
        let mut form = ContactFields::default();
        form.set(Field::Subject, "Hello");
        assert_eq!(form.get(Field::Subject), "Hello");
        assert!(!form.is_empty());
        form.clear();
        assert!(form.is_empty());
    }

    #[test]
    fn empty_error_messages_are_never_stored() {
        let mut errors = FieldErrors::default();
        errors.insert(Field::Name, "Name is required");
        errors.insert(Field::Name, "");
        assert!(errors.is_empty());
    }

    proptest! {
        #[test]
        fn validate_is_pure(
            name in ".{0,12}",
            email in ".{0,12}",
            subject in ".{0,12}",
            message in ".{0,16}",
        ) {
            let input = fields(&name, &email, &subject, &message);
            let snapshot = input.clone();
            let first = input.validate();
            let second = input.validate();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&input, &snapshot);
        }

        #[test]
        fn empty_fields_never_report_length_errors(
            name in "[ \t]{0,3}|[a-z]{1,3}",
            subject in "[ \t]{0,3}|[a-z]{1,6}",
            message in "[ \t]{0,3}|[a-z]{1,11}",
        ) {
            let errors = fields(&name, "x@y.z", &subject, &message).validate();
            for (field, value) in [
                (Field::Name, &name),
                (Field::Subject, &subject),
                (Field::Message, &message),
            ] {
                if form_trim(value).is_empty() {
                    let text = errors.get(field).unwrap_or_default();
                    prop_assert!(text.ends_with("is required"), "{}: {}", field.as_str(), text);
                } else if let Some(text) = errors.get(field) {
                    prop_assert!(text.contains("at least"), "{}: {}", field.as_str(), text);
                }
            }
        }
    }
}
