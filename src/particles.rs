use crate::device::DeviceClass;

/// Randomized styling for one decorative particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleStyle {
    pub left_pct: u32,
    pub top_pct: u32,
    pub size_px: u32,
    pub opacity: f64,
    pub delay_s: f64,
    pub duration_s: f64,
}

struct Profile {
    min_size: u32,
    size_span: u32,
    opacity_span: f64,
    min_duration: f64,
}

const DESKTOP: Profile = Profile {
    min_size: 3,
    size_span: 6,
    opacity_span: 0.5,
    min_duration: 10.0,
};

const COMPACT: Profile = Profile {
    min_size: 2,
    size_span: 4,
    opacity_span: 0.3,
    min_duration: 15.0,
};

impl ParticleStyle {
    /// `rand` must yield values in `[0, 1)`.
    pub fn generate(rand: &mut impl FnMut() -> f64, class: DeviceClass) -> Self {
        let profile = match class {
            DeviceClass::Desktop => &DESKTOP,
            DeviceClass::Compact => &COMPACT,
        };
        Self {
            left_pct: (rand() * 100.0).floor() as u32,
            top_pct: (rand() * 100.0).floor() as u32,
            size_px: (rand() * profile.size_span as f64).floor() as u32 + profile.min_size,
            opacity: rand() * profile.opacity_span + 0.1,
            delay_s: rand() * 5.0,
            duration_s: rand() * 20.0 + profile.min_duration,
        }
    }

    /// Inline style declarations, property name first.
    pub fn declarations(&self) -> [(&'static str, String); 7] {
        [
            ("left", format!("{}%", self.left_pct)),
            ("top", format!("{}%", self.top_pct)),
            ("width", format!("{}px", self.size_px)),
            ("height", format!("{}px", self.size_px)),
            ("opacity", format!("{:.3}", self.opacity)),
            ("animation-delay", format!("{:.2}s", self.delay_s)),
            ("animation-duration", format!("{:.2}s", self.duration_s)),
        ]
    }
}

pub fn generate_batch(
    count: usize,
    rand: &mut impl FnMut() -> f64,
    class: DeviceClass,
) -> Vec<ParticleStyle> {
    (0..count).map(|_| ParticleStyle::generate(rand, class)).collect()
}
