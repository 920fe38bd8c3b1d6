use std::fs;
use std::path::Path;

use serde::Deserialize;

use astral_engine::paint::Color;

use crate::error::SkyError;
use crate::random::RandomSource;

/// Cyan accent, `rgb(0, 243, 255)`.
pub const CYAN: [u8; 3] = [0, 243, 255];
/// Violet accent, `rgb(157, 0, 255)`.
pub const VIOLET: [u8; 3] = [157, 0, 255];

/// Builds a premultiplied color from an `[r, g, b]` triple and straight alpha.
#[inline]
pub fn accent(rgb: [u8; 3], alpha: f32) -> Color {
    Color::rgba(rgb[0], rgb[1], rgb[2], alpha)
}

/// Half-open `[min, max)` range for uniform draws.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Maps one unit draw `u ∈ [0, 1)` into the range.
    #[inline]
    pub fn sample(self, rng: &mut dyn RandomSource) -> f32 {
        self.min + (self.max - self.min) * rng.next_unit()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StarFieldConfig {
    pub count: usize,
    /// Star radius.
    pub size: SpawnRange,
    /// Fill alpha, fixed per star.
    pub brightness: SpawnRange,
    /// Stars strictly closer than this are joined by an edge.
    pub link_distance: f32,
    pub line_width: f32,
    pub line_alpha: f32,
    pub color: [u8; 3],
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 100,
            size: SpawnRange::new(1.0, 3.0),
            brightness: SpawnRange::new(0.5, 1.0),
            link_distance: 150.0,
            line_width: 1.0,
            line_alpha: 0.1,
            color: CYAN,
        }
    }
}

impl StarFieldConfig {
    pub fn line_color(&self) -> Color {
        accent(self.color, self.line_alpha)
    }

    pub fn star_color(&self, brightness: f32) -> Color {
        accent(self.color, brightness)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Each velocity component is drawn from `[-max_speed, max_speed)` units/frame.
    pub max_speed: f32,
    /// Particle radius.
    pub size: SpawnRange,
    pub alpha: f32,
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            max_speed: 1.0,
            size: SpawnRange::new(1.0, 4.0),
            alpha: 0.3,
            primary: CYAN,
            secondary: VIOLET,
        }
    }
}

/// Backdrop configuration.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```ron
/// (
///     stars: (count: 160, link_distance: 120.0),
///     particles: (max_speed: 0.5),
/// )
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SkyConfig {
    pub stars: StarFieldConfig,
    pub particles: ParticleConfig,
}

impl SkyConfig {
    pub fn from_ron_str(src: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(src)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SkyError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| SkyError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data).map_err(|e| SkyError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads `path`, falling back to defaults when it is missing or invalid.
    ///
    /// The returned error (if any) is for the caller to log.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<SkyError>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Returns human-readable warnings for suspicious values. Nothing is rejected.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();

        fn check_range(w: &mut Vec<String>, label: &str, r: SpawnRange) {
            if r.min > r.max {
                w.push(format!("{label} min ({}) greater than max ({})", r.min, r.max));
            }
            if r.min < 0.0 {
                w.push(format!("{label} min ({}) is negative", r.min));
            }
        }

        let s = &self.stars;
        if s.count == 0 {
            w.push("stars.count is 0; the constellation layer stays empty".into());
        }
        if s.count > 5_000 {
            w.push(format!(
                "stars.count {} is high; edge linking is quadratic",
                s.count
            ));
        }
        check_range(&mut w, "stars.size", s.size);
        check_range(&mut w, "stars.brightness", s.brightness);
        if s.brightness.max > 1.0 {
            w.push(format!("stars.brightness max ({}) above 1.0 is clamped", s.brightness.max));
        }
        if s.link_distance <= 0.0 {
            w.push("stars.link_distance <= 0; no edges will be drawn".into());
        }

        let p = &self.particles;
        if p.count == 0 {
            w.push("particles.count is 0; the particle layer stays empty".into());
        }
        if p.max_speed < 0.0 {
            w.push(format!("particles.max_speed {} is negative", p.max_speed));
        }
        check_range(&mut w, "particles.size", p.size);
        if !(0.0..=1.0).contains(&p.alpha) {
            w.push(format!("particles.alpha {} outside 0..1 is clamped", p.alpha));
        }

        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;

    #[test]
    fn defaults_match_the_classic_backdrop() {
        let cfg = SkyConfig::default();
        assert_eq!(cfg.stars.count, 100);
        assert_eq!(cfg.stars.link_distance, 150.0);
        assert_eq!(cfg.particles.count, 50);
        assert_eq!(cfg.particles.max_speed, 1.0);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn sample_maps_unit_draws_into_range() {
        let mut rng = SequenceSource::new(vec![0.0, 0.5, 0.999]);
        let r = SpawnRange::new(1.0, 3.0);
        assert_eq!(r.sample(&mut rng), 1.0);
        assert_eq!(r.sample(&mut rng), 2.0);
        assert!(r.sample(&mut rng) < 3.0);
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let cfg = SkyConfig::from_ron_str("(stars: (count: 12), particles: (alpha: 0.5))").unwrap();
        assert_eq!(cfg.stars.count, 12);
        assert_eq!(cfg.stars.link_distance, 150.0);
        assert_eq!(cfg.particles.alpha, 0.5);
        assert_eq!(cfg.particles.count, 50);
    }

    #[test]
    fn shipped_example_spells_out_the_defaults() {
        let cfg = SkyConfig::from_ron_str(include_str!("../../../astral.example.ron")).unwrap();
        assert_eq!(cfg, SkyConfig::default());
    }

    #[test]
    fn invalid_ron_is_an_error() {
        assert!(SkyConfig::from_ron_str("(stars: (count: \"many\"))").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let (cfg, err) = SkyConfig::load_or_default("/definitely/not/here/sky.ron");
        assert_eq!(cfg, SkyConfig::default());
        assert!(matches!(err, Some(SkyError::ConfigRead { .. })));
    }

    #[test]
    fn validate_flags_inverted_ranges() {
        let mut cfg = SkyConfig::default();
        cfg.particles.size = SpawnRange::new(4.0, 1.0);
        cfg.stars.count = 0;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("particles.size")));
    }
}
