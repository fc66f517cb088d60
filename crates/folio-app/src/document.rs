// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::SectionId;

/// Vertical extent of a section relative to the viewport top, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds {
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn straddles(self, line: f64) -> bool {
        self.top <= line && self.bottom > line
    }
}

/// The rendered page as seen by the header and the contact form. Lookups
/// return `None` when no element carries the section id.
pub trait PageDocument {
    fn scroll_y(&self) -> f64;
    fn section_bounds(&self, section: SectionId) -> Option<SectionBounds>;
    fn section_offset(&self, section: SectionId) -> Option<f64>;
    /// Smoothly scrolls so the section's top edge meets the viewport top.
    fn scroll_into_view(&mut self, section: SectionId) -> Result<()>;
}

/// Hands a URI to whatever the host registered for its scheme.
pub trait Navigator {
    fn open(&mut self, uri: &str) -> Result<()>;
}

impl<T: PageDocument + ?Sized> PageDocument for &mut T {
    fn scroll_y(&self) -> f64 {
        (**self).scroll_y()
    }

    fn section_bounds(&self, section: SectionId) -> Option<SectionBounds> {
        (**self).section_bounds(section)
    }

    fn section_offset(&self, section: SectionId) -> Option<f64> {
        (**self).section_offset(section)
    }

    fn scroll_into_view(&mut self, section: SectionId) -> Result<()> {
        (**self).scroll_into_view(section)
    }
}

impl<T: Navigator + ?Sized> Navigator for &mut T {
    fn open(&mut self, uri: &str) -> Result<()> {
        (**self).open(uri)
    }
}
