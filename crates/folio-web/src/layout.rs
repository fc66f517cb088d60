// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use folio_app::{PageDocument, SectionBounds, SectionId};

pub const DEMO_VIEWPORT_HEIGHT: f64 = 900.0;
pub const DEMO_SECTION_HEIGHTS: [f64; 6] = [900.0, 750.0, 1_400.0, 1_600.0, 1_100.0, 1_250.0];

#[derive(Debug, Clone, PartialEq)]
struct Placed {
    section: SectionId,
    offset: f64,
    height: f64,
}

/// Headless page made of vertically stacked sections.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticLayout {
    placed: Vec<Placed>,
    viewport_height: f64,
    scroll_y: f64,
    scroll_log: Vec<SectionId>,
}

impl StaticLayout {
    pub fn stacked(sections: &[(SectionId, f64)], viewport_height: f64) -> Self {
        let mut offset = 0.0;
        let mut placed = Vec::with_capacity(sections.len());
        for (section, height) in sections {
            placed.push(Placed {
                section: *section,
                offset,
                height: *height,
            });
            offset += height;
        }
        Self {
            placed,
            viewport_height,
            scroll_y: 0.0,
            scroll_log: Vec::new(),
        }
    }

    /// Assigns heights to the page sections in order.
    pub fn from_heights(heights: &[f64], viewport_height: f64) -> Result<Self> {
        if heights.is_empty() {
            bail!("layout needs at least one section height");
        }
        if heights.len() > SectionId::ALL.len() {
            bail!(
                "layout has {} heights but the page only has {} sections",
                heights.len(),
                SectionId::ALL.len()
            );
        }
        if let Some(height) = heights.iter().find(|height| **height <= 0.0) {
            bail!("section heights must be positive, got {height}");
        }
        if viewport_height <= 0.0 {
            bail!("viewport height must be positive, got {viewport_height}");
        }

        let sections: Vec<_> = SectionId::ALL
            .iter()
            .copied()
            .zip(heights.iter().copied())
            .collect();
        Ok(Self::stacked(&sections, viewport_height))
    }

    pub fn demo() -> Self {
        let sections: Vec<_> = SectionId::ALL
            .iter()
            .copied()
            .zip(DEMO_SECTION_HEIGHTS)
            .collect();
        Self::stacked(&sections, DEMO_VIEWPORT_HEIGHT)
    }

    /// Drops a section from the page, as if its element were never rendered.
    pub fn without(mut self, section: SectionId) -> Self {
        self.placed.retain(|placed| placed.section != section);
        self
    }

    pub fn document_height(&self) -> f64 {
        self.placed
            .iter()
            .map(|placed| placed.offset + placed.height)
            .fold(0.0, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport_height).max(0.0)
    }

    pub const fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Clamped to the scrollable range.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    /// Sections scrolled to through [`PageDocument::scroll_into_view`].
    pub fn scroll_log(&self) -> &[SectionId] {
        &self.scroll_log
    }

    fn find(&self, section: SectionId) -> Option<&Placed> {
        self.placed.iter().find(|placed| placed.section == section)
    }
}

impl PageDocument for StaticLayout {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn section_bounds(&self, section: SectionId) -> Option<SectionBounds> {
        self.find(section).map(|placed| {
            let top = placed.offset - self.scroll_y;
            SectionBounds::new(top, top + placed.height)
        })
    }

    fn section_offset(&self, section: SectionId) -> Option<f64> {
        self.find(section).map(|placed| placed.offset)
    }

    fn scroll_into_view(&mut self, section: SectionId) -> Result<()> {
        let Some(offset) = self.section_offset(section) else {
            bail!("no element with id {:?}", section.as_str());
        };
        self.set_scroll_y(offset);
        self.scroll_log.push(section);
        Ok(())
    }
}
