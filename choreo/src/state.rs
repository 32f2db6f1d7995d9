/// Scroll position owned by exactly one choreographer.
///
/// Offsets only change through [`ScrollState::retarget`], the animator step
/// or [`ScrollState::rescale`], all of which keep
/// `0 <= current_offset <= max_offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    pub(crate) current_offset: f64,
    pub(crate) target_offset: f64,
    pub(crate) max_offset: f64,
    pub(crate) is_animating: bool,
    pub(crate) current_section_index: usize,
}

impl ScrollState {
    pub fn new(max_offset: f64) -> Self {
        Self {
            current_offset: 0.0,
            target_offset: 0.0,
            max_offset: max_offset.max(0.0),
            is_animating: false,
            current_section_index: 0,
        }
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    pub fn target_offset(&self) -> f64 {
        self.target_offset
    }

    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn current_section_index(&self) -> usize {
        self.current_section_index
    }

    /// Progress through the whole page in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.max_offset > 0.0 {
            self.current_offset / self.max_offset
        } else {
            0.0
        }
    }

    /// Sets a new target that was already bounded by the resolver. Returns
    /// whether motion is needed.
    pub(crate) fn retarget(&mut self, target: f64) -> bool {
        self.target_offset = target.clamp(0.0, self.max_offset);
        self.is_animating = self.target_offset != self.current_offset;
        self.is_animating
    }

    /// Moves both offsets to a new viewport extent, keeping their relative
    /// position, then pulls them back inside the new bound.
    pub(crate) fn rescale(&mut self, factor: f64, max_offset: f64) {
        self.max_offset = max_offset.max(0.0);
        self.current_offset = (self.current_offset * factor).clamp(0.0, self.max_offset);
        self.target_offset = (self.target_offset * factor).clamp(0.0, self.max_offset);
        self.is_animating = self.is_animating && self.target_offset != self.current_offset;
    }

    /// Jumps without animation.
    pub(crate) fn snap_to(&mut self, offset: f64) {
        let offset = offset.clamp(0.0, self.max_offset);
        self.current_offset = offset;
        self.target_offset = offset;
        self.is_animating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_keeps_relative_position() {
        let mut state = ScrollState::new(2000.0);
        state.snap_to(1300.0);
        state.rescale(0.5, 1000.0);
        assert_eq!(state.current_offset(), 650.0);
        assert_eq!(state.target_offset(), 650.0);
        assert!(!state.is_animating());
    }

    #[test]
    fn rescale_clamps_into_new_bound() {
        let mut state = ScrollState::new(2000.0);
        state.snap_to(2000.0);
        state.rescale(1.0, 1200.0);
        assert_eq!(state.current_offset(), 1200.0);
        assert_eq!(state.target_offset(), 1200.0);
    }
}
