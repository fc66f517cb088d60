// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::{
    ContactFields, Field, FieldErrors, Navigator, SectionId, SubmissionStatus, Theme, compose,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFormState {
    pub fields: ContactFields,
    pub errors: FieldErrors,
    pub status: SubmissionStatus,
    pub is_submitting: bool,
    status_token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Edit { field: Field, value: String },
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormEvent {
    FieldEdited(Field),
    ErrorCleared(Field),
    StatusCleared,
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Another attempt is still in flight; nothing changed.
    Busy,
    Invalid(FieldErrors),
    Sent { uri: String, token: u64 },
    Failed { reason: String, token: u64 },
}

impl SubmitOutcome {
    /// Token the auto-clear timer must carry, when one is needed.
    pub const fn clear_token(&self) -> Option<u64> {
        match self {
            Self::Sent { token, .. } | Self::Failed { token, .. } => Some(*token),
            Self::Busy | Self::Invalid(_) => None,
        }
    }
}

impl ContactFormState {
    pub fn dispatch(&mut self, command: FormCommand) -> Vec<FormEvent> {
        match command {
            FormCommand::Edit { field, value } => {
                self.fields.set(field, value);
                let mut events = vec![FormEvent::FieldEdited(field)];
                if self.errors.remove(field).is_some() {
                    events.push(FormEvent::ErrorCleared(field));
                }
                events
            }
            FormCommand::ClearStatus { token } => {
                if token != self.status_token || self.status == SubmissionStatus::Idle {
                    return Vec::new();
                }
                self.status = SubmissionStatus::Idle;
                vec![FormEvent::StatusCleared]
            }
        }
    }

    pub const fn status_token(&self) -> u64 {
        self.status_token
    }

    /// Validates and, when clean, hands the composed `mailto:` URI to the
    /// navigator. Failures after validation surface as `Error` status.
    pub fn submit<N: Navigator + ?Sized>(
        &mut self,
        recipient: &str,
        navigator: &mut N,
    ) -> SubmitOutcome {
        let fields = match self.begin_submit() {
            Ok(fields) => fields,
            Err(outcome) => return outcome,
        };
        let handoff = compose(recipient, &fields)
            .map_err(anyhow::Error::from)
            .and_then(|uri| navigator.open(&uri).map(|()| uri));
        self.complete_submit(handoff)
    }

    /// First half of [`Self::submit`], for hosts that navigate asynchronously.
    /// Returns the validated fields, or the outcome that ends the attempt.
    pub fn begin_submit(&mut self) -> std::result::Result<ContactFields, SubmitOutcome> {
        if self.is_submitting {
            debug!("submit ignored while another attempt is in flight");
            return Err(SubmitOutcome::Busy);
        }
        self.is_submitting = true;
        self.status = SubmissionStatus::Idle;
        self.status_token = self.status_token.saturating_add(1);

        self.errors = self.fields.validate();
        if !self.errors.is_empty() {
            debug!(count = self.errors.len(), "contact form failed validation");
            self.is_submitting = false;
            return Err(SubmitOutcome::Invalid(self.errors.clone()));
        }
        Ok(self.fields.clone())
    }

    /// Second half of [`Self::submit`]: records the hand-off result.
    pub fn complete_submit(&mut self, handoff: Result<String>) -> SubmitOutcome {
        let token = self.status_token;
        self.is_submitting = false;
        match handoff {
            Ok(uri) => {
                info!("contact message handed to mail client");
                self.status = SubmissionStatus::Success;
                self.fields.clear();
                SubmitOutcome::Sent { uri, token }
            }
            Err(failure) => {
                error!("contact form submission failed: {failure:#}");
                self.status = SubmissionStatus::Error;
                SubmitOutcome::Failed {
                    reason: format!("{failure:#}"),
                    token,
                }
            }
        }
    }

    pub fn is_invalid(&self, field: Field) -> bool {
        self.errors.contains(field)
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.is_submitting {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    pub const fn submit_aria_label(&self) -> &'static str {
        if self.is_submitting {
            "Sending message..."
        } else {
            "Send message"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub active: SectionId,
    pub scrolled: bool,
    pub menu_open: bool,
    pub theme: Theme,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            active: SectionId::Hero,
            scrolled: false,
            menu_open: false,
            theme: Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    SetActive(SectionId),
    SetScrolled(bool),
    ToggleMenu,
    CloseMenu,
    ToggleTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavEvent {
    ActiveSectionChanged(SectionId),
    ScrolledChanged(bool),
    MenuChanged(bool),
    ThemeChanged(Theme),
}

impl NavState {
    /// Applies a command; repeated identical commands produce no events.
    pub fn dispatch(&mut self, command: NavCommand) -> Vec<NavEvent> {
        match command {
            NavCommand::SetActive(section) => {
                if self.active == section {
                    return Vec::new();
                }
                self.active = section;
                vec![NavEvent::ActiveSectionChanged(section)]
            }
            NavCommand::SetScrolled(scrolled) => {
                if self.scrolled == scrolled {
                    return Vec::new();
                }
                self.scrolled = scrolled;
                vec![NavEvent::ScrolledChanged(scrolled)]
            }
            NavCommand::ToggleMenu => {
                self.menu_open = !self.menu_open;
                vec![NavEvent::MenuChanged(self.menu_open)]
            }
            NavCommand::CloseMenu => {
                if !self.menu_open {
                    return Vec::new();
                }
                self.menu_open = false;
                vec![NavEvent::MenuChanged(false)]
            }
            NavCommand::ToggleTheme => {
                self.theme = self.theme.toggled();
                vec![NavEvent::ThemeChanged(self.theme)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ContactFormState, FormCommand, FormEvent, NavCommand, NavEvent, NavState, SubmitOutcome,
    };
    use crate::{ContactFields, Field, Navigator, SectionId, SubmissionStatus, Theme};
    use anyhow::{Result, bail};

    #[derive(Default)]
    struct Recorder {
        opened: Vec<String>,
        fail: bool,
    }

    impl Navigator for Recorder {
        fn open(&mut self, uri: &str) -> Result<()> {
            if self.fail {
                bail!("no handler for mailto");
            }
            self.opened.push(uri.to_owned());
            Ok(())
        }
    }

    fn filled() -> ContactFormState {
        ContactFormState {
            fields: ContactFields {
                name: "Al".to_owned(),
                email: "a@b.co".to_owned(),
                subject: "Hello there".to_owned(),
                message: "1234567890".to_owned(),
            },
            ..ContactFormState::default()
        }
    }

    #[test]
    fn successful_submit_clears_fields_and_reports_success() {
        let mut state = filled();
        let mut navigator = Recorder::default();

        let (uri, token) = match state.submit("owner@example.com", &mut navigator) {
            SubmitOutcome::Sent { uri, token } => (uri, token),
            other => panic!("expected sent outcome, got {other:?}"),
        };
        assert!(uri.starts_with("mailto:owner@example.com?subject=Hello%20there&body="));
        assert_eq!(navigator.opened, vec![uri]);
        assert_eq!(token, state.status_token());
        assert_eq!(state.status, SubmissionStatus::Success);
        assert!(state.fields.is_empty());
        assert!(!state.is_submitting);
    }

    #[test]
    fn invalid_submit_stores_errors_without_navigating() {
        let mut state = ContactFormState::default();
        let mut navigator = Recorder::default();

        let outcome = state.submit("owner@example.com", &mut navigator);
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.len() == 4));
        assert_eq!(outcome.clear_token(), None);
        assert!(navigator.opened.is_empty());
        assert_eq!(state.errors.get(Field::Name), Some("Name is required"));
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert!(!state.is_submitting);
    }

    #[test]
    fn navigator_failure_sets_error_and_keeps_fields() {
        let mut state = filled();
        let mut navigator = Recorder {
            fail: true,
            ..Recorder::default()
        };

        let outcome = state.submit("owner@example.com", &mut navigator);
        assert!(
            matches!(&outcome, SubmitOutcome::Failed { reason, .. } if reason.contains("no handler"))
        );
        assert_eq!(state.status, SubmissionStatus::Error);
        assert_eq!(state.fields.name, "Al");
        assert!(!state.is_submitting);
    }

    #[test]
    fn bad_recipient_is_a_submission_failure() {
        let mut state = filled();
        let mut navigator = Recorder::default();

        let outcome = state.submit("nobody", &mut navigator);
        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert!(navigator.opened.is_empty());
        assert_eq!(state.status, SubmissionStatus::Error);
    }

    #[test]
    fn submit_while_in_flight_is_rejected() -> Result<()> {
        let mut state = filled();
        let fields = state
            .begin_submit()
            .map_err(|outcome| anyhow::anyhow!("begin failed: {outcome:?}"))?;
        assert!(state.is_submitting);
        assert_eq!(state.submit_label(), "Sending...");

        let mut navigator = Recorder::default();
        assert_eq!(
            state.submit("owner@example.com", &mut navigator),
            SubmitOutcome::Busy
        );

        let outcome = state.complete_submit(Ok(format!("mailto:x@y.z?subject={}", fields.subject)));
        assert!(matches!(outcome, SubmitOutcome::Sent { .. }));
        assert_eq!(state.submit_label(), "Send Message");
        Ok(())
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut state = ContactFormState::default();
        state.fields.email = "bad".to_owned();
        state.errors.insert(Field::Name, "Name is required");
        state.errors.insert(Field::Email, "Please enter a valid email address");

        let events = state.dispatch(FormCommand::Edit {
            field: Field::Email,
            value: "a@b.co".to_owned(),
        });
        assert_eq!(
            events,
            vec![
                FormEvent::FieldEdited(Field::Email),
                FormEvent::ErrorCleared(Field::Email),
            ]
        );
        assert_eq!(state.errors.get(Field::Name), Some("Name is required"));
        assert!(!state.is_invalid(Field::Email));
        assert!(state.is_invalid(Field::Name));
    }

    #[test]
    fn stale_clear_tokens_are_ignored() {
        let mut state = filled();
        let mut navigator = Recorder::default();
        let first = state.submit("owner@example.com", &mut navigator);

        state.fields = filled().fields;
        let second = state.submit("owner@example.com", &mut navigator);

        let first_token = first.clear_token().expect("first attempt needs a clear");
        let second_token = second.clear_token().expect("second attempt needs a clear");
        assert!(second_token > first_token);

        assert!(
            state
                .dispatch(FormCommand::ClearStatus { token: first_token })
                .is_empty()
        );
        assert_eq!(state.status, SubmissionStatus::Success);

        assert_eq!(
            state.dispatch(FormCommand::ClearStatus {
                token: second_token
            }),
            vec![FormEvent::StatusCleared]
        );
        assert_eq!(state.status, SubmissionStatus::Idle);
    }

    #[test]
    fn nav_scroll_commands_are_idempotent() {
        let mut nav = NavState::default();
        assert_eq!(
            nav.dispatch(NavCommand::SetActive(SectionId::About)),
            vec![NavEvent::ActiveSectionChanged(SectionId::About)]
        );
        assert!(nav.dispatch(NavCommand::SetActive(SectionId::About)).is_empty());
        assert_eq!(
            nav.dispatch(NavCommand::SetScrolled(true)),
            vec![NavEvent::ScrolledChanged(true)]
        );
        assert!(nav.dispatch(NavCommand::SetScrolled(true)).is_empty());
    }

    #[test]
    fn nav_menu_and_theme_toggle() {
        let mut nav = NavState::default();
        assert_eq!(
            nav.dispatch(NavCommand::ToggleMenu),
            vec![NavEvent::MenuChanged(true)]
        );
        assert_eq!(
            nav.dispatch(NavCommand::CloseMenu),
            vec![NavEvent::MenuChanged(false)]
        );
        assert!(nav.dispatch(NavCommand::CloseMenu).is_empty());
        assert_eq!(
            nav.dispatch(NavCommand::ToggleTheme),
            vec![NavEvent::ThemeChanged(Theme::Dark)]
        );
    }
}
