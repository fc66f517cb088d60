// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, warn};

use crate::{DEFAULT_HEADER_OFFSET, PageDocument, ScrollStrategy, SectionId};

/// Decides which section the navigation bar should highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionTracker {
    sections: Vec<SectionId>,
    header_offset: f64,
    strategy: ScrollStrategy,
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_OFFSET, ScrollStrategy::Viewport)
    }
}

impl SectionTracker {
    pub fn new(header_offset: f64, strategy: ScrollStrategy) -> Self {
        Self::with_sections(SectionId::ALL.to_vec(), header_offset, strategy)
    }

    /// Sections are kept in page order; duplicates are dropped.
    pub fn with_sections(
        sections: Vec<SectionId>,
        header_offset: f64,
        strategy: ScrollStrategy,
    ) -> Self {
        let mut ordered = Vec::with_capacity(sections.len());
        for section in sections {
            if !ordered.contains(&section) {
                ordered.push(section);
            }
        }
        if ordered.is_empty() {
            ordered.push(SectionId::Hero);
        }
        Self {
            sections: ordered,
            header_offset,
            strategy,
        }
    }

    pub fn sections(&self) -> &[SectionId] {
        &self.sections
    }

    pub fn first(&self) -> SectionId {
        self.sections[0]
    }

    pub fn contains(&self, section: SectionId) -> bool {
        self.sections.contains(&section)
    }

    pub const fn header_offset(&self) -> f64 {
        self.header_offset
    }

    pub const fn strategy(&self) -> ScrollStrategy {
        self.strategy
    }

    /// The section under the header line, if any.
    pub fn locate<D: PageDocument + ?Sized>(&self, document: &D) -> Option<SectionId> {
        match self.strategy {
            ScrollStrategy::Viewport => self.sections.iter().copied().find(|section| {
                document
                    .section_bounds(*section)
                    .is_some_and(|bounds| bounds.straddles(self.header_offset))
            }),
            ScrollStrategy::Offset => {
                let line = document.scroll_y() + self.header_offset;
                self.sections.iter().rev().copied().find(|section| {
                    document
                        .section_offset(*section)
                        .is_some_and(|offset| offset <= line)
                })
            }
        }
    }

    /// Like [`Self::locate`], but keeps `previous` when nothing qualifies.
    pub fn resolve<D: PageDocument + ?Sized>(
        &self,
        document: &D,
        previous: SectionId,
    ) -> SectionId {
        match self.locate(document) {
            Some(section) => section,
            None => {
                debug!(previous = previous.as_str(), "no section under header line");
                previous
            }
        }
    }

    /// Resolves a raw id to a registered section, logging misses.
    pub fn lookup(&self, id: &str) -> Option<SectionId> {
        let section = SectionId::parse(id).filter(|section| self.contains(*section));
        if section.is_none() {
            warn!(id, "scroll target is not a registered section");
        }
        section
    }

    /// Scrolls the document to `section`. Returns `false` when the target is
    /// missing from the document or the scroll fails; neither is an error.
    pub fn scroll_to<D: PageDocument + ?Sized>(
        &self,
        document: &mut D,
        section: SectionId,
    ) -> bool {
        if !self.contains(section) || document.section_offset(section).is_none() {
            warn!(
                section = section.as_str(),
                "scroll target not found in document"
            );
            return false;
        }
        match document.scroll_into_view(section) {
            Ok(()) => true,
            Err(error) => {
                warn!(section = section.as_str(), "scroll failed: {error:#}");
                false
            }
        }
    }
}
