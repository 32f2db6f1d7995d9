//! Maps the continuous offset onto a logical section.

use tracing::debug;

use crate::section::Section;

/// Below this fraction of one viewport the page counts as section 0.
pub const START_BAND: f64 = 0.4;

pub fn section_index(offset: f64, extent: f64, count: usize) -> usize {
    if count == 0 || !(extent > 0.0) || !offset.is_finite() || offset < START_BAND * extent {
        return 0;
    }
    let index = (offset / extent).round().max(0.0) as usize;
    index.min(count - 1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionChange {
    pub previous: usize,
    pub current: usize,
    pub background_color: Option<String>,
}

/// Side effects run on a section change.
pub trait SectionHooks {
    fn section_changed(&mut self, change: &SectionChange);
}

impl<F> SectionHooks for F
where
    F: FnMut(&SectionChange),
{
    fn section_changed(&mut self, change: &SectionChange) {
        self(change)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionIndexTracker {
    current: usize,
}

impl SectionIndexTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Reports a change only on the frame where the boundary is crossed.
    pub fn observe(&mut self, offset: f64, extent: f64, sections: &[Section]) -> Option<SectionChange> {
        let next = section_index(offset, extent, sections.len());
        if next == self.current {
            return None;
        }
        let previous = std::mem::replace(&mut self.current, next);
        debug!(previous, current = next, "section changed");
        Some(SectionChange {
            previous,
            current: next,
            background_color: sections.get(next).and_then(|s| s.background_color.clone()),
        })
    }
}
