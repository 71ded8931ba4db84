//! Thickness scaling of reference settings.
//!
//! A reference profile is measured at one stock thickness. For other
//! thicknesses power grows and speed falls with the thickness ratio:
//!
//! ```text
//! power' = power × ratio^k
//! speed' = speed / ratio^(k / 2)
//! ```
//!
//! where `k` depends on the material family and operation. Metal scales
//! most aggressively, paper least.

use laserpath_core::{LaserSettings, MaterialCategory, Operation, Range};

/// Differences up to this many mm count as the reference thickness.
pub const THICKNESS_MATCH_TOLERANCE: f64 = 0.1;

/// Absolute power bounds (%) applied right after scaling.
pub const POWER_LIMITS: Range = Range::new(1.0, 100.0);

/// Absolute speed bounds (mm/min) applied right after scaling.
pub const SPEED_LIMITS: Range = Range::new(10.0, 20_000.0);

/// `(cut, engrave)` exponents per material family.
fn modifiers(category: MaterialCategory) -> (f64, f64) {
    match category {
        MaterialCategory::Wood => (1.2, 0.5),
        MaterialCategory::Acrylic => (1.1, 0.4),
        MaterialCategory::Leather => (0.9, 0.4),
        MaterialCategory::Fabric => (0.7, 0.3),
        MaterialCategory::Paper => (0.6, 0.2),
        MaterialCategory::Metal => (1.5, 0.8),
        MaterialCategory::Other => (1.0, 0.5),
    }
}

/// Scaling exponent for `operation` on `category`. Score sits halfway
/// between cut and engrave.
pub fn thickness_modifier(category: MaterialCategory, operation: Operation) -> f64 {
    let (cut, engrave) = modifiers(category);
    match operation {
        Operation::Cut => cut,
        Operation::Engrave => engrave,
        Operation::Score => (cut + engrave) / 2.0,
    }
}

/// Returns true when `requested` differs enough from `reference` to rescale.
pub fn needs_rescale(reference: f64, requested: f64) -> bool {
    (reference - requested).abs() > THICKNESS_MATCH_TOLERANCE
}

/// Rescales `settings` measured at `reference` mm for `requested` mm,
/// then clamps power and speed to [`POWER_LIMITS`] and [`SPEED_LIMITS`].
///
/// Passes and air assist are left alone.
pub fn scale_for_thickness(
    settings: LaserSettings,
    reference: f64,
    requested: f64,
    modifier: f64,
) -> LaserSettings {
    let ratio = requested / reference;
    let power = settings.power * ratio.powf(modifier);
    let speed = settings.speed / ratio.powf(modifier * 0.5);

    LaserSettings {
        power: POWER_LIMITS.clamp(power),
        speed: SPEED_LIMITS.clamp(speed),
        ..settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_score_modifier_is_mean() {
        assert_relative_eq!(
            thickness_modifier(MaterialCategory::Wood, Operation::Score),
            0.85,
            epsilon = 1e-12
        );
        for category in MaterialCategory::ALL {
            let cut = thickness_modifier(category, Operation::Cut);
            let engrave = thickness_modifier(category, Operation::Engrave);
            assert!(cut > engrave);
        }
    }

    #[test]
    fn test_metal_scales_most() {
        let metal = thickness_modifier(MaterialCategory::Metal, Operation::Cut);
        for category in MaterialCategory::ALL {
            assert!(thickness_modifier(category, Operation::Cut) <= metal);
        }
    }

    #[test]
    fn test_rescale_threshold() {
        assert!(!needs_rescale(3.0, 3.05));
        assert!(!needs_rescale(3.0, 3.0));
        assert!(needs_rescale(3.0, 3.2));
        assert!(needs_rescale(3.0, 2.5));
    }

    #[test]
    fn test_thicker_means_hotter_and_slower() {
        let base = LaserSettings::new(40.0, 1000.0, 1);
        let scaled = scale_for_thickness(base, 3.0, 6.0, 1.0);
        assert_relative_eq!(scaled.power, 80.0);
        assert_relative_eq!(scaled.speed, 1000.0 / 2f64.sqrt());
        assert_eq!(scaled.passes, 1);
    }

    #[test]
    fn test_thinner_means_cooler_and_faster() {
        let base = LaserSettings::new(80.0, 1000.0, 1);
        let scaled = scale_for_thickness(base, 4.0, 1.0, 1.0);
        assert_relative_eq!(scaled.power, 20.0);
        assert_relative_eq!(scaled.speed, 2000.0);
    }

    #[test]
    fn test_scaling_clamps_to_absolute_bounds() {
        let base = LaserSettings::new(100.0, 15_000.0, 1);
        let hot = scale_for_thickness(base, 1.0, 10.0, 1.5);
        assert_eq!(hot.power, 100.0);
        assert_eq!(hot.passes, 1);

        let fast = scale_for_thickness(base, 10.0, 0.1, 1.5);
        assert_eq!(fast.speed, 20_000.0);
        assert_eq!(fast.power, 1.0);
    }
}
