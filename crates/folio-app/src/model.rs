// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

pub const DEFAULT_RECIPIENT: &str = "V8236014408@gmail.com";
pub const DEFAULT_HEADER_OFFSET: f64 = 100.0;
pub const DEFAULT_SCROLLED_THRESHOLD: f64 = 50.0;
pub const DEFAULT_STATUS_CLEAR_MILLIS: u64 = 5_000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Hero,
    About,
    Experience,
    Projects,
    Skills,
    Contact,
}

impl SectionId {
    pub const ALL: [Self; 6] = [
        Self::Hero,
        Self::About,
        Self::Experience,
        Self::Projects,
        Self::Skills,
        Self::Contact,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Contact => "contact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hero" => Some(Self::Hero),
            "about" => Some(Self::About),
            "experience" => Some(Self::Experience),
            "projects" => Some(Self::Projects),
            "skills" => Some(Self::Skills),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }

    /// Text shown in the navigation bar.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::About => "About",
            Self::Experience => "Experience",
            Self::Projects => "Projects",
            Self::Skills => "Skills",
            Self::Contact => "Contact",
        }
    }

    pub fn nav_aria_label(self) -> String {
        format!("Navigate to {} section", self.label())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "subject" => Some(Self::Subject),
            "message" => Some(Self::Message),
            _ => None,
        }
    }

    /// Element id of the inline error paragraph for this field.
    pub fn error_element_id(self) -> String {
        format!("{}-error", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success,
    Error,
}

impl SubmissionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub const fn banner(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Success => Some("Message sent successfully! I'll get back to you soon."),
            Self::Error => Some("There was an error sending your message. Please try again."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_aria_label(self) -> String {
        format!("Switch to {} mode", self.toggled().as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollStrategy {
    /// First section whose viewport box straddles the header line.
    #[default]
    Viewport,
    /// Last section whose document offset is above the header line.
    Offset,
}

impl ScrollStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewport => "viewport",
            Self::Offset => "offset",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "viewport" => Some(Self::Viewport),
            "offset" => Some(Self::Offset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactChannel {
    pub label: &'static str,
    pub value: String,
    pub href: Option<String>,
    pub aria_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub name: &'static str,
    pub href: &'static str,
    pub aria_label: &'static str,
}

pub fn contact_channels(recipient: &str) -> Vec<ContactChannel> {
    vec![
        ContactChannel {
            label: "Email",
            value: recipient.to_owned(),
            href: Some(format!("mailto:{recipient}")),
            aria_label: "Send email to Vikas Dwivedi",
        },
        ContactChannel {
            label: "Phone",
            value: "+91 8839034415".to_owned(),
            href: Some("tel:+918839034415".to_owned()),
            aria_label: "Call Vikas Dwivedi",
        },
        ContactChannel {
            label: "Location",
            value: "India".to_owned(),
            href: None,
            aria_label: "Location: India",
        },
    ]
}

pub const SOCIAL_LINKS: [SocialLink; 2] = [
    SocialLink {
        name: "LinkedIn",
        href: "https://www.linkedin.com/in/vikas-dwivedi-668328227/",
        aria_label: "Connect with Vikas Dwivedi on LinkedIn",
    },
    SocialLink {
        name: "GitHub",
        href: "https://github.com/vikas8236",
        aria_label: "View Vikas Dwivedi's GitHub profile",
    },
];
