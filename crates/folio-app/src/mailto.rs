// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::{ContactFields, form_trim, is_valid_email};

// Everything but the characters a URI component may carry verbatim.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// These would end the address part of the URI or split it into several.
const RECIPIENT_DELIMITERS: [char; 5] = ['?', '#', '&', '%', ','];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailtoError {
    MissingRecipient,
    InvalidRecipient(String),
    InvalidUri(url::ParseError),
}

impl std::fmt::Display for MailtoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRecipient => f.write_str("mailto recipient is empty"),
            Self::InvalidRecipient(recipient) => {
                write!(
                    f,
                    "mailto recipient {recipient:?} is not a single email address"
                )
            }
            Self::InvalidUri(error) => write!(f, "composed mailto URI is malformed: {error}"),
        }
    }
}

impl std::error::Error for MailtoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUri(error) => Some(error),
            Self::MissingRecipient | Self::InvalidRecipient(_) => None,
        }
    }
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn message_body(fields: &ContactFields) -> String {
    format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        fields.name, fields.email, fields.message
    )
}

/// Trims the recipient and checks it can stand verbatim as the address part
/// of a `mailto:` URI.
pub fn check_recipient(recipient: &str) -> Result<&str, MailtoError> {
    let recipient = form_trim(recipient);
    if recipient.is_empty() {
        return Err(MailtoError::MissingRecipient);
    }
    if !is_valid_email(recipient) || recipient.contains(&RECIPIENT_DELIMITERS[..]) {
        return Err(MailtoError::InvalidRecipient(recipient.to_owned()));
    }
    Ok(recipient)
}

/// Builds `mailto:<recipient>?subject=..&body=..` and checks it parses as a URI.
pub fn compose(recipient: &str, fields: &ContactFields) -> Result<String, MailtoError> {
    let recipient = check_recipient(recipient)?;

    let uri = format!(
        "mailto:{recipient}?subject={}&body={}",
        encode_component(&fields.subject),
        encode_component(&message_body(fields)),
    );
    Url::parse(&uri).map_err(MailtoError::InvalidUri)?;
    Ok(uri)
}
