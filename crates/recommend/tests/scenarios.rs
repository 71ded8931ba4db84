//! Recommendation scenarios against the builtin tables.

use approx::assert_relative_eq;
use laserpath_core::{MachineProfile, MaterialCategory, Operation, Range, Registry, WorkArea};
use laserpath_recommend::{recommend, QualityLevel, RecommendationError, Recommender};

#[test]
fn test_reference_settings_returned_verbatim() {
    let rec = recommend("basswood-3mm", 3.0, Operation::Cut, "xtool-d1", QualityLevel::Normal)
        .expect("reference material should resolve");

    assert_eq!(rec.material_name, "Basswood Plywood 3mm");
    assert_eq!(rec.recommended.power, 100.0);
    assert_eq!(rec.recommended.speed, 200.0);
    assert_eq!(rec.recommended.passes, 1);
    assert!(rec.recommended.air_assist);
    assert_eq!(rec.confidence, 1.0);
    assert!(rec.notes.is_empty(), "notes: {:?}", rec.notes);
    assert!(rec.alternatives.len() >= 2 && rec.alternatives.len() <= 3);
}

#[test]
fn test_thicker_stock_needs_more_energy() {
    let thin = recommend("basswood-3mm", 3.0, Operation::Cut, "xtool-d1", QualityLevel::Normal)
        .unwrap();
    let thick = recommend("basswood-3mm", 6.0, Operation::Cut, "xtool-d1", QualityLevel::Normal)
        .unwrap();

    // Power is already at 100 %, so the thicker cut slows down instead.
    assert!(thick.recommended.power >= thin.recommended.power);
    assert!(thick.recommended.speed < thin.recommended.speed);
    assert_eq!(thick.recommended.passes, thin.recommended.passes);
    assert!(thick.confidence < 1.0);
    assert!(thick.notes.iter().any(|n| n.contains("thickness")));
    assert_eq!(thick.thickness, 6.0);
}

#[test]
fn test_thicker_single_pass_cut_offers_multi_pass() {
    let rec = recommend("basswood-3mm", 6.0, Operation::Cut, "xtool-d1", QualityLevel::Normal)
        .unwrap();
    let r = rec.recommended;
    assert_eq!(r.passes, 1);
    assert_eq!(rec.alternatives.len(), 3);

    let conservative = &rec.alternatives[0];
    assert_eq!(conservative.passes, 2);
    assert_relative_eq!(conservative.power, r.power * 0.8);

    let multi = &rec.alternatives[2];
    assert_eq!(multi.passes, 2);
    assert_relative_eq!(multi.power, r.power * 0.7);
    assert_relative_eq!(multi.speed, r.speed * 1.1);
}

#[test]
fn test_thicker_stock_raises_unsaturated_power() {
    let thin = recommend("leather-2mm", 2.0, Operation::Engrave, "xtool-d1", QualityLevel::Normal)
        .unwrap();
    let thick = recommend("leather-2mm", 3.0, Operation::Engrave, "xtool-d1", QualityLevel::Normal)
        .unwrap();
    assert!(thick.recommended.power > thin.recommended.power);
    assert!(thick.recommended.speed < thin.recommended.speed);
    assert_relative_eq!(thick.confidence, 0.9);
}

#[test]
fn test_small_thickness_difference_ignored() {
    let rec = recommend("basswood-3mm", 3.05, Operation::Cut, "xtool-d1", QualityLevel::Normal)
        .unwrap();
    assert_eq!(rec.recommended.speed, 200.0);
    assert_eq!(rec.confidence, 1.0);
}

#[test]
fn test_score_is_interpolated() {
    let rec = recommend("basswood-3mm", 3.0, Operation::Score, "xtool-d1", QualityLevel::Normal)
        .unwrap();
    assert_relative_eq!(rec.recommended.power, 65.0);
    assert_relative_eq!(rec.recommended.speed, 1600.0);
    assert_eq!(rec.recommended.passes, 1);
    assert_relative_eq!(rec.confidence, 0.8);
    assert!(rec.notes.iter().any(|n| n.contains("interpolated")));
    // Score is never a cut, so no multi-pass alternative.
    assert_eq!(rec.alternatives.len(), 2);
}

#[test]
fn test_quality_presets() {
    let normal = recommend("basswood-3mm", 3.0, Operation::Engrave, "xtool-d1", QualityLevel::Normal)
        .unwrap();
    let draft = recommend("basswood-3mm", 3.0, Operation::Engrave, "xtool-d1", QualityLevel::Draft)
        .unwrap();
    let ultra = recommend("basswood-3mm", 3.0, Operation::Engrave, "xtool-d1", QualityLevel::Ultra)
        .unwrap();

    assert_relative_eq!(draft.recommended.power, normal.recommended.power * 0.8);
    assert_relative_eq!(draft.recommended.speed, normal.recommended.speed * 1.5);
    assert_relative_eq!(ultra.recommended.power, normal.recommended.power * 1.2);
    assert_relative_eq!(ultra.recommended.speed, normal.recommended.speed * 0.6);
    assert!(draft.notes.iter().any(|n| n.contains("draft")));
    assert!(normal.notes.is_empty());
    // Quality alone does not lower confidence.
    assert_eq!(ultra.confidence, 1.0);
}

#[test]
fn test_clamped_to_machine_limits() {
    // Ultra wants 120 % power on a cut already at 100 %.
    let rec = recommend("basswood-3mm", 3.0, Operation::Cut, "xtool-d1", QualityLevel::Ultra)
        .unwrap();
    assert_eq!(rec.recommended.power, 100.0);
    assert_relative_eq!(rec.confidence, 0.9);
    assert!(rec
        .notes
        .iter()
        .any(|n| n.contains("settings clamped to machine limits")));
}

#[test]
fn test_incompatible_material_degrades_confidence() {
    let rec = recommend(
        "stainless-steel-1mm",
        1.0,
        Operation::Engrave,
        "xtool-d1",
        QualityLevel::Normal,
    )
    .expect("incompatibility is not an error");
    assert!(rec.confidence <= 0.5);
    assert!(rec.notes.iter().any(|n| n.contains("metal")));
}

#[test]
fn test_substitute_material() {
    let rec = recommend("walnut-3mm", 3.0, Operation::Cut, "xtool-d1", QualityLevel::Normal)
        .expect("walnut should fall back to another wood");
    assert_eq!(rec.material_name, "Basswood Plywood 3mm");
    assert!(rec.confidence <= 0.7);
    assert!(rec.notes.iter().any(|n| n.contains("walnut-3mm")));

    let rec = recommend("walnut-6mm", 5.5, Operation::Cut, "xtool-d1", QualityLevel::Normal)
        .expect("0.5 mm is inside the substitute window");
    assert_eq!(rec.material_name, "Basswood Plywood 6mm");
}

#[test]
fn test_errors() {
    assert_eq!(
        recommend("basswood-3mm", 3.0, Operation::Cut, "laser-9000", QualityLevel::Normal),
        Err(RecommendationError::UnknownMachine("laser-9000".into()))
    );
    assert_eq!(
        recommend("unobtainium-3mm", 3.0, Operation::Cut, "xtool-d1", QualityLevel::Normal),
        Err(RecommendationError::UnknownMaterial("unobtainium-3mm".into()))
    );
    // Nearest 3 mm wood is 0.8 mm away, beyond the 0.5 mm substitute window.
    assert_eq!(
        recommend("walnut-3.8mm", 3.8, Operation::Cut, "xtool-d1", QualityLevel::Normal),
        Err(RecommendationError::UnknownMaterial("walnut-3.8mm".into()))
    );
    assert_eq!(
        recommend("walnut-20mm", 20.0, Operation::Cut, "xtool-d1", QualityLevel::Normal),
        Err(RecommendationError::UnknownMaterial("walnut-20mm".into()))
    );
    assert!(matches!(
        recommend("basswood-3mm", 0.0, Operation::Cut, "xtool-d1", QualityLevel::Normal),
        Err(RecommendationError::InvalidThickness(_))
    ));
    assert!(matches!(
        recommend("basswood-3mm", f64::NAN, Operation::Cut, "xtool-d1", QualityLevel::Normal),
        Err(RecommendationError::InvalidThickness(_))
    ));
}

#[test]
fn test_deterministic() {
    let run = || {
        recommend("acrylic-black-3mm", 4.5, Operation::Score, "xtool-m1", QualityLevel::High)
            .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(first.recommended.power.to_bits(), second.recommended.power.to_bits());
    assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
}

#[test]
fn test_bounds_hold_for_every_request() {
    let registry = Registry::builtin();
    let engine = Recommender::new(registry);

    for machine in registry.machines() {
        for material in registry.materials() {
            for &thickness in &[0.2, material.thickness, material.thickness * 2.5, 25.0] {
                for operation in Operation::ALL {
                    for quality in QualityLevel::ALL {
                        let rec = engine
                            .recommend(&material.id, thickness, operation, &machine.id, quality)
                            .unwrap();
                        assert!(
                            (0.0..=1.0).contains(&rec.confidence),
                            "{} on {}: confidence {}",
                            material.id,
                            machine.id,
                            rec.confidence
                        );
                        assert!(machine.power_range.contains(rec.recommended.power));
                        assert!(machine.speed_range.contains(rec.recommended.speed));
                        assert!(rec.recommended.passes >= 1);
                        assert!(rec.alternatives.len() <= 3);
                        assert!(rec.alternatives.iter().all(|a| machine.accepts(a)));
                    }
                }
            }
        }
    }
}

#[test]
fn test_custom_registry() {
    let machine = MachineProfile {
        id: "slow-diode".into(),
        name: "Slow Diode".into(),
        laser_power_watts: 2.0,
        work_area: WorkArea::new(200.0, 200.0),
        power_range: Range::new(10.0, 80.0),
        speed_range: Range::new(50.0, 1500.0),
        supported_material_categories: vec![MaterialCategory::Paper],
        features: Vec::new(),
    };
    let materials = Registry::builtin()
        .materials_by_category(MaterialCategory::Paper)
        .into_iter()
        .cloned()
        .collect();
    let registry = Registry::new(vec![machine], materials).unwrap();
    let engine = Recommender::new(&registry);

    let rec = engine
        .recommend("cardstock-0.3mm", 0.3, Operation::Engrave, "slow-diode", QualityLevel::Normal)
        .unwrap();
    assert_eq!(rec.recommended.power, 10.0);
    assert_eq!(rec.recommended.speed, 1500.0);
    assert!(rec.confidence < 1.0);
    assert!(rec.notes.iter().any(|n| n.contains("clamped")));

    assert!(matches!(
        engine.recommend("cardstock-0.3mm", 0.3, Operation::Cut, "xtool-d1", QualityLevel::Normal),
        Err(RecommendationError::UnknownMachine(_))
    ));
}
