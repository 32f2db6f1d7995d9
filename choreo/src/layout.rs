//! Declarative per-section placement.
//!
//! Renderers derive every transform from the scroll state through
//! [`layout`] instead of mutating retained nodes.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
    pub index: usize,
    /// Distance of the section's leading edge from the viewport's, in pixels.
    pub translate: f64,
    /// Counter-translate for the section's inner media layer.
    pub parallax: f64,
    /// Cross-fade weight, 1.0 when centered and 0.0 one viewport away.
    pub opacity: f64,
    pub active: bool,
}

pub fn layout(
    count: usize,
    offset: f64,
    extent: f64,
    active_index: usize,
    parallax: f64,
) -> Vec<SectionLayout> {
    (0..count)
        .map(|index| {
            let translate = index as f64 * extent - offset;
            let opacity = if extent > 0.0 {
                (1.0 - translate.abs() / extent).clamp(0.0, 1.0)
            } else {
                f64::from(u8::from(index == active_index))
            };
            SectionLayout {
                index,
                translate,
                parallax: -translate * parallax,
                opacity,
                active: index == active_index,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_between_sections_crossfades_evenly() {
        let placed = layout(3, 500.0, 1000.0, 1, 0.2);
        assert_eq!(placed[0].translate, -500.0);
        assert_eq!(placed[1].translate, 500.0);
        assert!((placed[0].opacity - 0.5).abs() < 1e-9);
        assert!((placed[1].opacity - 0.5).abs() < 1e-9);
        assert_eq!(placed[2].opacity, 0.0);
        assert!((placed[1].parallax + 100.0).abs() < 1e-9);
        assert!(placed[1].active);
    }

    #[test]
    fn aligned_section_is_fully_visible() {
        let placed = layout(3, 2000.0, 1000.0, 2, 0.0);
        assert_eq!(placed[2].translate, 0.0);
        assert_eq!(placed[2].opacity, 1.0);
        assert_eq!(placed[0].opacity, 0.0);
    }
}
