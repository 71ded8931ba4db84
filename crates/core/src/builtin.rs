//! Compiled-in machine and material tables.

use crate::machine::{MachineFeature, MachineProfile, Range, WorkArea};
use crate::material::{MaterialCategory, MaterialProfile};
use crate::settings::LaserSettings;

use MachineFeature::*;
use MaterialCategory::*;

const DIODE_CATEGORIES: [MaterialCategory; 6] = [Wood, Acrylic, Leather, Fabric, Paper, Other];

fn machine(
    id: &str,
    name: &str,
    watts: f64,
    work_area: (f64, f64),
    speed_range: (f64, f64),
    categories: &[MaterialCategory],
    features: &[MachineFeature],
) -> MachineProfile {
    MachineProfile {
        id: id.to_string(),
        name: name.to_string(),
        laser_power_watts: watts,
        work_area: WorkArea::new(work_area.0, work_area.1),
        power_range: Range::new(1.0, 100.0),
        speed_range: Range::new(speed_range.0, speed_range.1),
        supported_material_categories: categories.to_vec(),
        features: features.to_vec(),
    }
}

pub(crate) fn machines() -> Vec<MachineProfile> {
    vec![
        machine(
            "xtool-d1",
            "xTool D1 10W",
            10.0,
            (430.0, 390.0),
            (10.0, 10000.0),
            &DIODE_CATEGORIES,
            &[AirAssist, RotaryAttachment],
        ),
        machine(
            "xtool-d1-pro",
            "xTool D1 Pro 20W",
            20.0,
            (430.0, 390.0),
            (10.0, 20000.0),
            &DIODE_CATEGORIES,
            &[AirAssist, RotaryAttachment],
        ),
        machine(
            "xtool-s1",
            "xTool S1 20W",
            20.0,
            (498.0, 319.0),
            (10.0, 20000.0),
            &DIODE_CATEGORIES,
            &[AirAssist, RotaryAttachment, Enclosure, Autofocus],
        ),
        machine(
            "xtool-m1",
            "xTool M1 10W",
            10.0,
            (385.0, 300.0),
            (10.0, 6000.0),
            &DIODE_CATEGORIES,
            &[AirAssist, Camera, Enclosure, BladeCutting],
        ),
        machine(
            "xtool-p2",
            "xTool P2 55W CO2",
            55.0,
            (600.0, 308.0),
            (10.0, 20000.0),
            &DIODE_CATEGORIES,
            &[AirAssist, Camera, Autofocus, Enclosure, RotaryAttachment],
        ),
        machine(
            "xtool-f1",
            "xTool F1 Fiber/Diode",
            10.0,
            (115.0, 115.0),
            (100.0, 20000.0),
            &[Metal, Wood, Leather, Paper, Other],
            &[FiberSource, Enclosure],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn material(
    id: &str,
    name: &str,
    category: MaterialCategory,
    thickness: f64,
    density: f64,
    cut: LaserSettings,
    engrave: LaserSettings,
    max_passes: Option<u32>,
    safety_notes: &[&str],
) -> MaterialProfile {
    MaterialProfile {
        id: id.to_string(),
        name: name.to_string(),
        category,
        thickness,
        density,
        cut_settings: cut,
        engrave_settings: engrave,
        safety_notes: safety_notes.iter().map(|s| s.to_string()).collect(),
        max_passes,
    }
}

fn s(power: f64, speed: f64, passes: u32, air_assist: bool) -> LaserSettings {
    LaserSettings::new(power, speed, passes).with_air_assist(air_assist)
}

const VENTILATION: &str = "Run the exhaust fan or purifier for the whole job";
const NEVER_UNATTENDED: &str = "Never leave the machine unattended while cutting";

pub(crate) fn materials() -> Vec<MaterialProfile> {
    vec![
        material(
            "basswood-3mm",
            "Basswood Plywood 3mm",
            Wood,
            3.0,
            0.42,
            s(100.0, 200.0, 1, true),
            s(30.0, 3000.0, 1, false),
            Some(3),
            &[VENTILATION, NEVER_UNATTENDED],
        ),
        material(
            "basswood-6mm",
            "Basswood Plywood 6mm",
            Wood,
            6.0,
            0.42,
            s(100.0, 100.0, 2, true),
            s(35.0, 3000.0, 1, false),
            Some(4),
            &[VENTILATION, NEVER_UNATTENDED],
        ),
        material(
            "plywood-3mm",
            "Birch Plywood 3mm",
            Wood,
            3.0,
            0.68,
            s(100.0, 150.0, 2, true),
            s(40.0, 2500.0, 1, false),
            Some(4),
            &[VENTILATION, "Glue layers char more than solid wood"],
        ),
        material(
            "mdf-3mm",
            "MDF 3mm",
            Wood,
            3.0,
            0.75,
            s(100.0, 150.0, 2, true),
            s(35.0, 2000.0, 1, false),
            Some(4),
            &[VENTILATION, "MDF binders release formaldehyde when burned"],
        ),
        material(
            "acrylic-black-3mm",
            "Black Cast Acrylic 3mm",
            Acrylic,
            3.0,
            1.18,
            s(100.0, 100.0, 3, true),
            s(25.0, 3000.0, 1, false),
            Some(5),
            &[
                VENTILATION,
                "Diode lasers only cut dark, opaque acrylic",
                "Never cut PVC or vinyl: it releases chlorine gas",
            ],
        ),
        material(
            "acrylic-clear-3mm",
            "Clear Cast Acrylic 3mm",
            Acrylic,
            3.0,
            1.18,
            s(100.0, 150.0, 1, true),
            s(20.0, 4000.0, 1, false),
            Some(3),
            &[VENTILATION, "Clear acrylic needs a CO2 source to cut"],
        ),
        material(
            "leather-2mm",
            "Veg-Tan Leather 2mm",
            Leather,
            2.0,
            0.86,
            s(90.0, 300.0, 1, true),
            s(20.0, 4000.0, 1, false),
            Some(3),
            &[VENTILATION, "Do not process chrome-tanned leather"],
        ),
        material(
            "felt-3mm",
            "Wool Felt 3mm",
            Fabric,
            3.0,
            0.3,
            s(60.0, 1200.0, 1, true),
            s(15.0, 6000.0, 1, false),
            Some(2),
            &[VENTILATION, "Synthetic felts melt; test a corner first"],
        ),
        material(
            "cotton-fabric",
            "Cotton Fabric",
            Fabric,
            0.5,
            0.25,
            s(40.0, 2000.0, 1, true),
            s(10.0, 8000.0, 1, false),
            Some(1),
            &[NEVER_UNATTENDED],
        ),
        material(
            "cardstock-0.3mm",
            "Cardstock 0.3mm",
            Paper,
            0.3,
            0.8,
            s(30.0, 3000.0, 1, false),
            s(10.0, 6000.0, 1, false),
            Some(1),
            &[NEVER_UNATTENDED, "Keep a fire extinguisher within reach"],
        ),
        material(
            "cardboard-3mm",
            "Corrugated Cardboard 3mm",
            Paper,
            3.0,
            0.25,
            s(80.0, 600.0, 1, true),
            s(15.0, 5000.0, 1, false),
            Some(2),
            &[NEVER_UNATTENDED, "Keep a fire extinguisher within reach"],
        ),
        material(
            "stainless-steel-1mm",
            "Stainless Steel 1mm",
            Metal,
            1.0,
            8.0,
            s(100.0, 100.0, 8, true),
            s(80.0, 1500.0, 1, false),
            Some(10),
            &["Marking only on diode sources; cutting needs a fiber source"],
        ),
        material(
            "anodized-aluminum-1mm",
            "Anodized Aluminum 1mm",
            Metal,
            1.0,
            2.7,
            s(100.0, 100.0, 10, true),
            s(60.0, 3000.0, 1, false),
            Some(10),
            &["Marking removes the anodized layer; cutting needs a fiber source"],
        ),
        material(
            "cork-3mm",
            "Cork Sheet 3mm",
            Other,
            3.0,
            0.24,
            s(85.0, 400.0, 1, true),
            s(20.0, 5000.0, 1, false),
            Some(2),
            &[VENTILATION, NEVER_UNATTENDED],
        ),
    ]
}
