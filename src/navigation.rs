//! Section hit testing and in-page anchor resolution.

use crate::language::Language;

/// Named content regions in page order.
pub const SECTIONS: [&str; 6] = [
    "vision",
    "architecture",
    "features",
    "roadmap",
    "budget",
    "tech",
];

/// Document-relative vertical extent of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRange {
    pub name: &'static str,
    pub top: f64,
    pub height: f64,
}

impl SectionRange {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Section whose `[top, top + height)` holds `scroll_y + bias`. Later
/// sections win when ranges overlap.
pub fn active_section(
    scroll_y: f64,
    bias: f64,
    ranges: &[SectionRange],
) -> Option<&'static str> {
    let point = scroll_y + bias;
    ranges
        .iter()
        .rev()
        .find(|range| range.contains(point))
        .map(|range| range.name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorTarget {
    Top,
    Element(String),
}

/// Resolves the fragment of an `href="#..."` link (without the `#`) to the id
/// to scroll to. German prefers the `-de` variant and falls back to the raw
/// id. `None` when neither exists.
pub fn resolve_anchor(
    fragment: &str,
    language: Language,
    exists: impl Fn(&str) -> bool,
) -> Option<AnchorTarget> {
    if fragment.is_empty() {
        return Some(AnchorTarget::Top);
    }

    let suffix = language.suffix();
    if !suffix.is_empty() && !fragment.ends_with(suffix) {
        let localized = format!("{fragment}{suffix}");
        if exists(&localized) {
            return Some(AnchorTarget::Element(localized));
        }
    }

    exists(fragment).then(|| AnchorTarget::Element(fragment.to_string()))
}

/// Whether the navbar shows its compact `scrolled` style.
pub fn navbar_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Absolute scroll offset that puts an element just below the fixed header.
pub fn scroll_target(viewport_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    (viewport_top + scroll_y - header_offset).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sections() -> Vec<SectionRange> {
        vec![
            SectionRange {
                name: "vision",
                top: 0.0,
                height: 500.0,
            },
            SectionRange {
                name: "architecture",
                top: 500.0,
                height: 400.0,
            },
        ]
    }

    #[test]
    fn picks_section_under_biased_scroll() {
        let ranges = two_sections();
        assert_eq!(active_section(250.0, 200.0, &ranges), Some("vision"));
        assert_eq!(active_section(350.0, 200.0, &ranges), Some("architecture"));
    }

    #[test]
    fn range_end_is_exclusive() {
        let ranges = two_sections();
        assert_eq!(active_section(300.0, 200.0, &ranges), Some("architecture"));
        assert_eq!(active_section(700.0, 200.0, &ranges), None);
    }

    #[test]
    fn nothing_matches_outside_ranges() {
        let ranges = vec![SectionRange {
            name: "tech",
            top: 1000.0,
            height: 200.0,
        }];
        assert_eq!(active_section(0.0, 200.0, &ranges), None);
        assert_eq!(active_section(0.0, 200.0, &[]), None);
    }

    #[test]
    fn english_anchor_uses_raw_id() {
        let target = resolve_anchor("roadmap", Language::En, |id| id == "roadmap");
        assert_eq!(target, Some(AnchorTarget::Element("roadmap".into())));
    }

    #[test]
    fn german_anchor_prefers_suffixed_id() {
        let both = |id: &str| id == "roadmap" || id == "roadmap-de";
        assert_eq!(
            resolve_anchor("roadmap", Language::De, both),
            Some(AnchorTarget::Element("roadmap-de".into()))
        );
        assert_eq!(
            resolve_anchor("roadmap-de", Language::De, both),
            Some(AnchorTarget::Element("roadmap-de".into()))
        );
    }

    #[test]
    fn german_anchor_falls_back_to_raw_id() {
        let target = resolve_anchor("contact", Language::De, |id| id == "contact");
        assert_eq!(target, Some(AnchorTarget::Element("contact".into())));
        assert_eq!(resolve_anchor("missing", Language::De, |_| false), None);
    }

    #[test]
    fn empty_fragment_means_top() {
        assert_eq!(
            resolve_anchor("", Language::De, |_| false),
            Some(AnchorTarget::Top)
        );
    }

    #[test]
    fn navbar_scrolled_past_threshold_only() {
        assert!(!navbar_scrolled(0.0, 100.0));
        assert!(!navbar_scrolled(100.0, 100.0));
        assert!(navbar_scrolled(100.5, 100.0));
    }

    #[test]
    fn scroll_target_clears_header() {
        assert_eq!(scroll_target(300.0, 1000.0, 100.0), 1200.0);
        assert_eq!(scroll_target(20.0, 0.0, 100.0), 0.0);
    }
}
