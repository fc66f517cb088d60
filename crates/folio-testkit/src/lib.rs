// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use folio_app::{ContactFields, Navigator, SectionId};

const FIRST_NAMES: [&str; 12] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Quinn", "Parker", "Drew", "Kai",
    "Rowan", "Zoë",
];
const LAST_NAMES: [&str; 10] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Reed", "Turner", "Núñez", "Brooks",
];
const DOMAINS: [&str; 5] = [
    "example.com",
    "mail.example.org",
    "studio.example.net",
    "example.co.uk",
    "dev.example.io",
];
const TOPICS: [&str; 8] = [
    "Backend role",
    "Freelance API work",
    "LLM evaluation project",
    "Collaboration idea",
    "Speaking invitation",
    "Code review & mentoring",
    "Question about your résumé",
    "Hello from a recruiter",
];
const OPENERS: [&str; 6] = [
    "Hi there, I came across your portfolio and",
    "Hello! Our team is hiring and",
    "Good morning. A friend recommended you, and",
    "Hey, quick note:",
    "Greetings from the other side of the world;",
    "Hi,\nI read about your recent project and",
];
const CLOSERS: [&str; 5] = [
    "would love to chat this week.",
    "think you'd be a great fit (100% remote).",
    "wanted to ask a couple of questions?",
    "have a proposal to share: see details below.\nThanks!",
    "hope we can work together soon :)",
];

/// Exactly the shortest values every rule accepts.
pub fn boundary_fields() -> ContactFields {
    ContactFields {
        name: "Al".to_owned(),
        email: "a@b.co".to_owned(),
        subject: "Hello there".to_owned(),
        message: "1234567890".to_owned(),
    }
}

/// Fails every field: one missing, three malformed or short.
pub fn invalid_fields() -> ContactFields {
    ContactFields {
        name: String::new(),
        email: "bad".to_owned(),
        subject: "hi".to_owned(),
        message: "short".to_owned(),
    }
}

/// Deterministic, valid submissions with punctuation, newlines and
/// non-ASCII text so encoding paths get exercised.
pub fn sample_fields(seed: u64) -> ContactFields {
    let mut rng = DemoRng::new(seed);
    let first = rng.pick(&FIRST_NAMES);
    let last = rng.pick(&LAST_NAMES);
    let domain = rng.pick(&DOMAINS);
    let subject = rng.pick(&TOPICS);
    let opener = rng.pick(&OPENERS);
    let closer = rng.pick(&CLOSERS);

    ContactFields {
        name: format!("{first} {last}"),
        email: format!(
            "{}.{}@{domain}",
            ascii_slug(first),
            ascii_slug(last)
        ),
        subject: subject.to_owned(),
        message: format!("{opener} {closer}"),
    }
}

fn ascii_slug(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Heights for a stacked page, in section order.
pub fn stacked_sections(heights: &[f64]) -> Vec<(SectionId, f64)> {
    SectionId::ALL
        .iter()
        .copied()
        .zip(heights.iter().copied())
        .collect()
}

/// Records every URI it is asked to open. Optionally refuses them all.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    opened: Vec<String>,
    refusal: Option<String>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            opened: Vec::new(),
            refusal: Some(reason.into()),
        }
    }

    pub fn opened(&self) -> &[String] {
        &self.opened
    }

    pub fn last(&self) -> Option<&str> {
        self.opened.last().map(String::as_str)
    }

    pub fn set_refusal(&mut self, reason: Option<String>) {
        self.refusal = reason;
    }
}

impl Navigator for RecordingNavigator {
    fn open(&mut self, uri: &str) -> Result<()> {
        if let Some(reason) = &self.refusal {
            bail!("navigation to {uri:?} refused: {reason}");
        }
        self.opened.push(uri.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct DemoRng {
    state: u64,
}

impl DemoRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut value = self.state;
        value = (value ^ (value >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        value = (value ^ (value >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        value ^ (value >> 31)
    }

    fn pick<'a>(&mut self, values: &'a [&'a str]) -> &'a str {
        let idx = (self.next_u64() as usize) % values.len();
        values[idx]
    }
}
