//! Spinning wheel: the persisted name list, spin generation and the pointer resolver.

use std::time::{Duration, SystemTime};

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Names offered by the "fill sample" action of the wheel.
pub const SAMPLE_WHEEL_NAMES: [&str; 6] =
    ["Pizza", "Burger", "Sushi", "Kebap", "Lahmacun", "Döner"];

/// Angle of the fixed pointer, clockwise from the positive x axis (the top of the wheel).
const POINTER_DEGREES: f64 = 270.0;

/// Errors raised by the wheel model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WheelError {
    /// The wheel cannot be spun or resolved in its current shape.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A name index no longer points at an entry.
    #[error("index out of range: name {index} (len {len})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Current number of names.
        len: usize,
    },
    /// The submitted name was blank.
    #[error("name must not be empty")]
    EmptyName,
}

/// Map the wheel's final rotation to the index of the segment under the pointer.
///
/// Segments start at 0° (pointing right) and run clockwise, each `360 / segment_count`
/// degrees wide; the pointer sits at 270°.
pub fn resolve(final_rotation_degrees: f64, segment_count: usize) -> Result<usize, WheelError> {
    if segment_count == 0 {
        return Err(WheelError::InvalidConfiguration(
            "the wheel has no segments".into(),
        ));
    }
    if !final_rotation_degrees.is_finite() {
        return Err(WheelError::InvalidConfiguration(format!(
            "rotation {final_rotation_degrees} is not a finite angle"
        )));
    }

    let effective = final_rotation_degrees % 360.0;
    let segment = 360.0 / segment_count as f64;
    let under_pointer = (POINTER_DEGREES - effective + 360.0) % 360.0;
    let index = (under_pointer / segment).floor() as usize;

    Ok(index.min(segment_count - 1))
}

/// Shape and pacing of a spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinSettings {
    /// Length of the eased rotation transition; the result is revealed afterwards.
    pub duration: Duration,
    /// Spacing of the tick cues.
    pub tick_interval: Duration,
    /// Number of tick cues played from the start of the spin.
    pub tick_count: u32,
    /// Guaranteed rotation (four full turns).
    pub base_rotation_degrees: f64,
    /// Width of the uniformly random offset added to the base rotation.
    pub random_range_degrees: f64,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(4_000),
            tick_interval: Duration::from_millis(200),
            tick_count: 15,
            base_rotation_degrees: 1_440.0,
            random_range_degrees: 360.0,
        }
    }
}

impl SpinSettings {
    /// Draw a final rotation: the base turns plus a uniform offset in `[0, range)`.
    pub fn rotation<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.random_range_degrees > 0.0 {
            self.base_rotation_degrees + rng.random_range(0.0..self.random_range_degrees)
        } else {
            self.base_rotation_degrees
        }
    }
}

/// Outcome of a finished spin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelSpinResult {
    /// Rotation the wheel ended on.
    pub final_rotation_degrees: f64,
    /// Segment under the pointer.
    pub winning_index: usize,
    /// Name of that segment.
    pub winning_label: String,
}

/// A spin that has started but not been revealed yet.
///
/// The segments are captured when the spin starts so edits made during the animation do
/// not shift the result away from what the wheel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSpin {
    /// Identifier of the spin.
    pub id: Uuid,
    /// Final rotation applied to the wheel.
    pub rotation_degrees: f64,
    /// Segment labels at spin time.
    pub segments: Vec<String>,
}

impl WheelSpin {
    /// Start a spin over `segments` with a random rotation.
    pub fn start<R: Rng + ?Sized>(
        segments: Vec<String>,
        settings: &SpinSettings,
        rng: &mut R,
    ) -> Result<Self, WheelError> {
        if segments.is_empty() {
            return Err(WheelError::InvalidConfiguration(
                "add at least one name before spinning".into(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            rotation_degrees: settings.rotation(rng),
            segments,
        })
    }

    /// Compute the winner once the animation is over.
    pub fn resolve(&self) -> Result<WheelSpinResult, WheelError> {
        let winning_index = resolve(self.rotation_degrees, self.segments.len())?;
        Ok(WheelSpinResult {
            final_rotation_degrees: self.rotation_degrees,
            winning_index,
            winning_label: self.segments[winning_index].clone(),
        })
    }
}

/// A revealed spin, kept so late subscribers can ask for the last winner.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpin {
    /// Identifier of the spin.
    pub spin_id: Uuid,
    /// Winner and final rotation.
    pub result: WheelSpinResult,
    /// Time of the reveal.
    pub resolved_at: SystemTime,
}

/// Ordered list of names shown on the wheel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WheelNames {
    names: Vec<String>,
}

impl WheelNames {
    /// Wrap a list loaded from storage as is.
    pub fn from_stored(names: Vec<String>) -> Self {
        Self { names }
    }

    /// All stored names, including any blank entry that came from storage.
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Number of stored names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no name is stored.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names that become segments (blank entries are skipped).
    pub fn segments(&self) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Append a trimmed name. Returns `false` when the name is already on the wheel.
    pub fn add(&mut self, raw: &str) -> Result<bool, WheelError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(WheelError::EmptyName);
        }
        if self.names.iter().any(|existing| existing == name) {
            return Ok(false);
        }
        self.names.push(name.to_string());
        Ok(true)
    }

    /// Remove the name at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Result<String, WheelError> {
        if index >= self.names.len() {
            return Err(WheelError::IndexOutOfRange {
                index,
                len: self.names.len(),
            });
        }
        Ok(self.names.remove(index))
    }

    /// Drop every name.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Replace the list with the sample names.
    pub fn fill_sample(&mut self) {
        self.names = SAMPLE_WHEEL_NAMES.iter().map(|s| s.to_string()).collect();
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn pointer_at_top_with_quarter_turn_picks_first_segment() {
        assert_eq!(resolve(270.0, 4), Ok(0));
    }

    #[test]
    fn zero_rotation_picks_segment_under_the_top() {
        assert_eq!(resolve(0.0, 4), Ok(3));
    }

    #[test]
    fn full_turns_are_ignored() {
        assert_eq!(resolve(1440.0 + 270.0, 4), Ok(0));
        assert_eq!(resolve(1440.0, 4), Ok(3));
        assert_eq!(resolve(1440.0 + 100.0, 6), resolve(100.0, 6));
    }

    #[test]
    fn segment_boundaries_follow_the_formula() {
        // (270 - 180 + 360) % 360 = 90 -> floor(90 / 90) = 1
        assert_eq!(resolve(180.0, 4), Ok(1));
        // (270 - 90 + 360) % 360 = 180 -> 2
        assert_eq!(resolve(90.0, 4), Ok(2));
        // (270 - 269 + 360) % 360 = 1 -> 0
        assert_eq!(resolve(269.0, 4), Ok(0));
        // (270 - 271 + 360) % 360 = 359 -> 3
        assert_eq!(resolve(271.0, 4), Ok(3));
        assert_eq!(resolve(123.4, 1), Ok(0));
    }

    #[test]
    fn negative_rotation_resolves_like_the_browser() {
        // -90 % 360 = -90 -> (270 + 90 + 360) % 360 = 0
        assert_eq!(resolve(-90.0, 4), Ok(0));
    }

    #[test]
    fn empty_wheel_is_invalid() {
        for rotation in [0.0, 270.0, 1800.5, -3.0] {
            assert!(matches!(
                resolve(rotation, 0),
                Err(WheelError::InvalidConfiguration(_))
            ));
        }
        assert!(resolve(f64::NAN, 3).is_err());
    }

    #[test]
    fn index_always_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let settings = SpinSettings::default();
        for count in 1..12 {
            for _ in 0..200 {
                let rotation = settings.rotation(&mut rng);
                assert!((1440.0..1800.0).contains(&rotation));
                assert!(resolve(rotation, count).unwrap() < count);
            }
        }
    }

    #[test]
    fn default_rotation_spins_at_least_four_turns() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let rotation = SpinSettings::default().rotation(&mut rng);
            assert!((1440.0..1800.0).contains(&rotation));
        }
    }

    #[test]
    fn spin_captures_segments_and_resolves_label() {
        let mut rng = StdRng::seed_from_u64(5);
        let segments = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let spin = WheelSpin::start(segments.clone(), &SpinSettings::default(), &mut rng).unwrap();
        let result = spin.resolve().unwrap();

        assert_eq!(result.final_rotation_degrees, spin.rotation_degrees);
        assert_eq!(
            result.winning_index,
            resolve(spin.rotation_degrees, 3).unwrap()
        );
        assert_eq!(result.winning_label, segments[result.winning_index]);
    }

    #[test]
    fn spin_without_segments_is_refused() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            WheelSpin::start(Vec::new(), &SpinSettings::default(), &mut rng),
            Err(WheelError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn names_are_trimmed_and_deduplicated() {
        let mut names = WheelNames::default();
        assert_eq!(names.add("  Pizza "), Ok(true));
        assert_eq!(names.add("Pizza"), Ok(false));
        assert_eq!(names.add("   "), Err(WheelError::EmptyName));
        assert_eq!(names.as_slice(), ["Pizza".to_string()]);
    }

    #[test]
    fn remove_and_clear() {
        let mut names = WheelNames::default();
        names.fill_sample();
        assert_eq!(names.len(), 6);
        assert_eq!(names.remove(1), Ok("Burger".to_string()));
        assert_eq!(
            names.remove(10),
            Err(WheelError::IndexOutOfRange { index: 10, len: 5 })
        );
        names.clear();
        assert!(names.is_empty());
    }

    #[test]
    fn blank_stored_entries_are_not_segments() {
        let names = WheelNames::from_stored(vec!["a".into(), " ".into(), "b".into()]);
        assert_eq!(names.segments(), vec!["a".to_string(), "b".to_string()]);
    }
}
