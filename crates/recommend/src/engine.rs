//! Power/speed recommendation engine.
//!
//! Derives settings for a (material, thickness, operation, machine,
//! quality) request from the registry's reference profiles:
//!
//! 1. Resolve the machine, then the material or a same-family substitute
//! 2. Note compatibility problems
//! 3. Pick the base settings for the operation
//! 4. Rescale for thickness
//! 5. Apply the quality preset
//! 6. Clamp to the machine's hardware limits
//! 7. Derive alternatives
//!
//! Every heuristic step multiplies `confidence` down and leaves a note.

use std::cmp::Ordering;

use laserpath_core::{
    LaserSettings, MachineProfile, MaterialCategory, MaterialProfile, Operation, Registry,
    DEFAULT_THICKNESS_TOLERANCE,
};

use crate::error::{RecommendationError, Result};
use crate::quality::QualityLevel;
use crate::result::PowerSpeedRecommendation;
use crate::scaling::{needs_rescale, scale_for_thickness, thickness_modifier};

/// Pass cap used when a material declares none.
const DEFAULT_MAX_PASSES: u32 = 3;

const SUBSTITUTE_CONFIDENCE: f64 = 0.7;
const INCOMPATIBLE_FACTOR: f64 = 0.5;
const INTERPOLATED_FACTOR: f64 = 0.8;
const RESCALED_FACTOR: f64 = 0.9;
const CLAMPED_FACTOR: f64 = 0.9;

/// Running product of confidence factors, kept in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
struct Confidence(f64);

impl Confidence {
    fn scale(&mut self, factor: f64) {
        let next = self.0 * factor;
        self.0 = if next.is_nan() { 0.0 } else { next.clamp(0.0, 1.0) };
    }
}

/// Recommendation engine over a machine/material registry.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    registry: &'a Registry,
}

impl Recommender<'static> {
    /// Engine over the builtin tables.
    pub fn builtin() -> Self {
        Self::new(Registry::builtin())
    }
}

impl<'a> Recommender<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Recommends settings for cutting, engraving or scoring `material_id`
    /// at `thickness` mm on `machine_id`.
    ///
    /// Fails only when the machine is unknown, when the material is
    /// unknown and has no same-family substitute within
    /// [`DEFAULT_THICKNESS_TOLERANCE`] of `thickness`, or when `thickness`
    /// is not a positive number. Everything else lowers `confidence` and
    /// adds a note.
    pub fn recommend(
        &self,
        material_id: &str,
        thickness: f64,
        operation: Operation,
        machine_id: &str,
        quality: QualityLevel,
    ) -> Result<PowerSpeedRecommendation> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(RecommendationError::InvalidThickness(thickness));
        }

        let machine = self
            .registry
            .get_machine(machine_id)
            .ok_or_else(|| RecommendationError::UnknownMachine(machine_id.to_string()))?;

        let mut confidence = Confidence(1.0);
        let mut notes = Vec::new();

        let material = match self.registry.get_material(material_id) {
            Some(material) => material,
            None => {
                let substitute = self
                    .find_substitute(material_id, thickness)
                    .ok_or_else(|| RecommendationError::UnknownMaterial(material_id.to_string()))?;
                log::warn!(
                    "material '{}' not found, substituting '{}'",
                    material_id,
                    substitute.id
                );
                confidence.scale(SUBSTITUTE_CONFIDENCE);
                notes.push(format!(
                    "Material '{}' not found; derived from {} ({} mm)",
                    material_id, substitute.name, substitute.thickness
                ));
                substitute
            }
        };

        let report = self.registry.validate_compatibility(&material.id, &machine.id);
        if !report.compatible {
            confidence.scale(INCOMPATIBLE_FACTOR);
        }
        notes.extend(report.issues);

        let mut settings = material.settings_for(operation);
        if operation == Operation::Score {
            confidence.scale(INTERPOLATED_FACTOR);
            notes.push(
                "Score settings interpolated from cut and engrave data, not measured".to_string(),
            );
        }

        if needs_rescale(material.thickness, thickness) {
            let modifier = thickness_modifier(material.category, operation);
            settings = scale_for_thickness(settings, material.thickness, thickness, modifier);
            confidence.scale(RESCALED_FACTOR);
            notes.push(format!(
                "Scaled from {} mm reference to {} mm thickness",
                material.thickness, thickness
            ));
        }

        if quality != QualityLevel::Normal {
            let (power, speed) = quality.multipliers();
            settings.power *= power;
            settings.speed *= speed;
            notes.push(format!(
                "{} quality: power x{}, speed x{}",
                quality, power, speed
            ));
        }

        let clamped = machine.clamp_settings(&settings);
        if clamped.power != settings.power || clamped.speed != settings.speed {
            confidence.scale(CLAMPED_FACTOR);
            notes.push(format!("{}: settings clamped to machine limits", machine.name));
        }
        let recommended = clamped;

        let alternatives = alternatives(
            &recommended,
            operation,
            machine,
            material.pass_limit(DEFAULT_MAX_PASSES),
        );

        log::debug!(
            "recommended {} {} on {}: {:.1}% @ {:.0} mm/min x{}, confidence {:.2}",
            operation,
            material.id,
            machine.id,
            recommended.power,
            recommended.speed,
            recommended.passes,
            confidence.0
        );

        Ok(PowerSpeedRecommendation {
            material_name: material.name.clone(),
            thickness,
            operation,
            recommended,
            alternatives,
            confidence: confidence.0,
            notes,
        })
    }

    /// Same-family material closest to `thickness`, ties to the first
    /// registered.
    fn find_substitute(&self, material_id: &str, thickness: f64) -> Option<&'a MaterialProfile> {
        let registry = self.registry;
        let category = MaterialCategory::from_material_id(material_id)?;
        registry
            .find_by_thickness(category, thickness, DEFAULT_THICKNESS_TOLERANCE)
            .into_iter()
            .min_by(|a, b| {
                let da = (a.thickness - thickness).abs();
                let db = (b.thickness - thickness).abs();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
    }
}

/// Conservative, aggressive and (single-pass cuts only) multi-pass
/// variants of `recommended`, dropping any the machine cannot run.
fn alternatives(
    recommended: &LaserSettings,
    operation: Operation,
    machine: &MachineProfile,
    pass_limit: u32,
) -> Vec<LaserSettings> {
    let mut variants = vec![
        LaserSettings {
            power: recommended.power * 0.8,
            speed: recommended.speed * 0.8,
            passes: (recommended.passes + 1).min(pass_limit),
            ..*recommended
        },
        LaserSettings {
            power: (recommended.power * 1.2).min(machine.power_range.max),
            speed: recommended.speed * 1.2,
            passes: recommended.passes.saturating_sub(1).max(1),
            ..*recommended
        },
    ];
    if operation == Operation::Cut && recommended.passes == 1 {
        variants.push(LaserSettings {
            power: recommended.power * 0.7,
            speed: recommended.speed * 1.1,
            passes: 2,
            ..*recommended
        });
    }
    variants.retain(|s| machine.accepts(s));
    variants
}

/// Recommends settings against the builtin registry.
///
/// # Example
///
/// ```rust
/// use laserpath_core::Operation;
/// use laserpath_recommend::{recommend, QualityLevel};
///
/// let rec = recommend("basswood-3mm", 3.0, Operation::Cut, "xtool-d1", QualityLevel::Normal)?;
/// assert_eq!(rec.recommended.power, 100.0);
/// assert_eq!(rec.recommended.speed, 200.0);
/// assert_eq!(rec.confidence, 1.0);
/// # Ok::<(), laserpath_recommend::RecommendationError>(())
/// ```
pub fn recommend(
    material_id: &str,
    thickness: f64,
    operation: Operation,
    machine_id: &str,
    quality: QualityLevel,
) -> Result<PowerSpeedRecommendation> {
    Recommender::builtin().recommend(material_id, thickness, operation, machine_id, quality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_stays_in_unit_range() {
        let mut c = Confidence(1.0);
        c.scale(2.0);
        assert_eq!(c.0, 1.0);
        c.scale(-3.0);
        assert_eq!(c.0, 0.0);
        let mut c = Confidence(0.5);
        c.scale(f64::NAN);
        assert_eq!(c.0, 0.0);
    }

    #[test]
    fn test_alternatives_for_single_pass_cut() {
        let machine = Registry::builtin().get_machine("xtool-d1").unwrap();
        let rec = LaserSettings::new(100.0, 200.0, 1).with_air_assist(true);
        let alts = alternatives(&rec, Operation::Cut, machine, 3);

        assert_eq!(alts.len(), 3);
        assert_eq!(alts[0].passes, 2);
        assert!(alts[0].power < rec.power && alts[0].speed < rec.speed);
        assert_eq!(alts[1].power, 100.0);
        assert!(alts[1].speed > rec.speed);
        assert_eq!(alts[1].passes, 1);
        assert_eq!(alts[2].passes, 2);
        assert!(alts.iter().all(|a| a.air_assist));
    }

    #[test]
    fn test_no_multi_pass_for_engrave() {
        let machine = Registry::builtin().get_machine("xtool-d1").unwrap();
        let rec = LaserSettings::new(30.0, 3000.0, 1);
        let alts = alternatives(&rec, Operation::Engrave, machine, 3);
        assert_eq!(alts.len(), 2);
    }

    #[test]
    fn test_alternatives_filtered_to_machine() {
        let machine = Registry::builtin().get_machine("xtool-d1").unwrap();
        // Aggressive variant would run at 12000 mm/min on a 10000 mm/min machine.
        let rec = LaserSettings::new(20.0, 10_000.0, 2);
        let alts = alternatives(&rec, Operation::Engrave, machine, 3);
        assert_eq!(alts.len(), 1);
        assert_eq!(alts[0].passes, 3);
        assert!(alts.iter().all(|a| machine.accepts(a)));
    }

    #[test]
    fn test_conservative_passes_capped() {
        let machine = Registry::builtin().get_machine("xtool-d1").unwrap();
        let rec = LaserSettings::new(50.0, 500.0, 3);
        let alts = alternatives(&rec, Operation::Cut, machine, 3);
        assert_eq!(alts[0].passes, 3);
        assert_eq!(alts[1].passes, 2);
    }

    #[test]
    fn test_substitute_prefers_closest_thickness() {
        let recommender = Recommender::builtin();
        let sub = recommender.find_substitute("walnut-6mm", 5.5).unwrap();
        assert_eq!(sub.id, "basswood-6mm");

        let sub = recommender.find_substitute("walnut-3mm", 3.0).unwrap();
        assert_eq!(sub.id, "basswood-3mm");

        // 0.8 mm from the nearest 3 mm wood.
        assert!(recommender.find_substitute("walnut-3.8mm", 3.8).is_none());
        assert!(recommender.find_substitute("walnut-12mm", 12.0).is_none());
        assert!(recommender.find_substitute("unobtainium-3mm", 3.0).is_none());
    }
}
