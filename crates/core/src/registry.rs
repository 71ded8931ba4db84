//! Machine and material registry.
//!
//! The builtin tables are compiled in and initialised once on first use.
//! A [`Registry`] can also be assembled from caller-supplied tables (or JSON
//! with the `serde` feature); those are validated on construction.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::builtin;
use crate::machine::{MachineFeature, MachineProfile};
use crate::material::{MaterialCategory, MaterialProfile};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tolerance for [`Registry::find_by_thickness`], in mm.
pub const DEFAULT_THICKNESS_TOLERANCE: f64 = 0.5;

static BUILTIN: OnceLock<Registry> = OnceLock::new();

/// Read-only lookup tables of machines and materials.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Registry {
    machines: Vec<MachineProfile>,
    materials: Vec<MaterialProfile>,
}

/// Outcome of [`Registry::validate_compatibility`].
///
/// `issues` can be non-empty while `compatible` is true: advisory findings
/// (e.g. missing air assist) are reported without failing the check.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompatibilityReport {
    pub compatible: bool,
    pub issues: Vec<String>,
}

impl Registry {
    /// Builds a registry from caller-supplied tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegistry`] if the tables fail [`Registry::validate`].
    pub fn new(machines: Vec<MachineProfile>, materials: Vec<MaterialProfile>) -> Result<Self> {
        let registry = Self {
            machines,
            materials,
        };
        registry.validate()?;
        Ok(registry)
    }

    /// The compiled-in tables.
    pub fn builtin() -> &'static Registry {
        BUILTIN.get_or_init(|| Registry {
            machines: builtin::machines(),
            materials: builtin::materials(),
        })
    }

    /// Parses and validates a registry from JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let registry: Registry = serde_json::from_str(json)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Serializes the registry to pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks table invariants: unique ids, valid ranges, positive
    /// thickness and work area, and well-formed reference settings.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for m in &self.machines {
            if !seen.insert(m.id.as_str()) {
                return Err(Error::InvalidRegistry(format!("duplicate machine id '{}'", m.id)));
            }
            if !(m.work_area.width > 0.0 && m.work_area.height > 0.0) {
                return Err(Error::InvalidRegistry(format!(
                    "machine '{}' has a non-positive work area",
                    m.id
                )));
            }
            if !m.power_range.is_valid() || m.power_range.min < 0.0 || m.power_range.max > 100.0 {
                return Err(Error::InvalidRegistry(format!(
                    "machine '{}' has an invalid power range",
                    m.id
                )));
            }
            if !m.speed_range.is_valid() || m.speed_range.min <= 0.0 {
                return Err(Error::InvalidRegistry(format!(
                    "machine '{}' has an invalid speed range",
                    m.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for mat in &self.materials {
            if !seen.insert(mat.id.as_str()) {
                return Err(Error::InvalidRegistry(format!(
                    "duplicate material id '{}'",
                    mat.id
                )));
            }
            if !(mat.thickness.is_finite() && mat.thickness > 0.0) {
                return Err(Error::InvalidRegistry(format!(
                    "material '{}' has non-positive thickness",
                    mat.id
                )));
            }
            if mat.max_passes == Some(0) {
                return Err(Error::InvalidRegistry(format!(
                    "material '{}' allows zero passes",
                    mat.id
                )));
            }
            for settings in [&mat.cut_settings, &mat.engrave_settings] {
                settings.validate().map_err(|e| {
                    Error::InvalidRegistry(format!("material '{}': {}", mat.id, e))
                })?;
            }
        }
        Ok(())
    }

    /// All machines, in registration order.
    pub fn machines(&self) -> &[MachineProfile] {
        &self.machines
    }

    /// All materials, in registration order.
    pub fn materials(&self) -> &[MaterialProfile] {
        &self.materials
    }

    /// Looks up a machine by id.
    pub fn get_machine(&self, id: &str) -> Option<&MachineProfile> {
        self.machines.iter().find(|m| m.id == id)
    }

    /// Looks up a material by id.
    pub fn get_material(&self, id: &str) -> Option<&MaterialProfile> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Looks up a machine by id, failing if it is unknown.
    pub fn machine(&self, id: &str) -> Result<&MachineProfile> {
        self.get_machine(id).ok_or_else(|| Error::UnknownMachine(id.to_string()))
    }

    /// Looks up a material by id, failing if it is unknown.
    pub fn material(&self, id: &str) -> Result<&MaterialProfile> {
        self.get_material(id).ok_or_else(|| Error::UnknownMaterial(id.to_string()))
    }

    /// Materials whose category the machine supports. Empty for an
    /// unknown machine.
    pub fn compatible_materials(&self, machine_id: &str) -> Vec<&MaterialProfile> {
        match self.get_machine(machine_id) {
            Some(machine) => self
                .materials
                .iter()
                .filter(|m| machine.supports(m.category))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Materials in `category`.
    pub fn materials_by_category(&self, category: MaterialCategory) -> Vec<&MaterialProfile> {
        self.materials
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }

    /// Materials in `category` whose thickness is within `tolerance` of
    /// `target`.
    pub fn find_by_thickness(
        &self,
        category: MaterialCategory,
        target: f64,
        tolerance: f64,
    ) -> Vec<&MaterialProfile> {
        self.materials
            .iter()
            .filter(|m| m.category == category && (m.thickness - target).abs() <= tolerance)
            .collect()
    }

    /// Checks whether `material_id` can be processed on `machine_id`.
    ///
    /// Each failing check adds its own issue. A missing air-assist feature
    /// is advisory and leaves `compatible` untouched.
    pub fn validate_compatibility(&self, material_id: &str, machine_id: &str) -> CompatibilityReport {
        let mut issues = Vec::new();
        let mut compatible = true;

        let material = self.get_material(material_id);
        let machine = self.get_machine(machine_id);

        if material.is_none() {
            compatible = false;
            issues.push(format!("Material '{}' not found", material_id));
        }
        if machine.is_none() {
            compatible = false;
            issues.push(format!("Machine '{}' not found", machine_id));
        }

        if let (Some(material), Some(machine)) = (material, machine) {
            if !machine.supports(material.category) {
                compatible = false;
                issues.push(format!(
                    "{} does not support {} materials",
                    machine.name, material.category
                ));
            }

            for (label, settings) in [
                ("cut", &material.cut_settings),
                ("engrave", &material.engrave_settings),
            ] {
                if !machine.power_range.contains(settings.power) {
                    compatible = false;
                    issues.push(format!(
                        "{} power {}% outside machine range {}-{}%",
                        label, settings.power, machine.power_range.min, machine.power_range.max
                    ));
                }
                if !machine.speed_range.contains(settings.speed) {
                    compatible = false;
                    issues.push(format!(
                        "{} speed {} mm/min outside machine range {}-{} mm/min",
                        label, settings.speed, machine.speed_range.min, machine.speed_range.max
                    ));
                }
            }

            if material.cut_settings.air_assist && !machine.has_feature(MachineFeature::AirAssist) {
                issues.push(format!(
                    "{} recommends air assist, which {} lacks",
                    material.name, machine.name
                ));
            }
        }

        if !compatible {
            log::debug!(
                "material '{}' incompatible with machine '{}': {} issue(s)",
                material_id,
                machine_id,
                issues.len()
            );
        }

        CompatibilityReport { compatible, issues }
    }
}

/// Looks up a machine in the builtin registry.
pub fn get_machine(id: &str) -> Option<&'static MachineProfile> {
    Registry::builtin().get_machine(id)
}

/// Looks up a material in the builtin registry.
pub fn get_material(id: &str) -> Option<&'static MaterialProfile> {
    Registry::builtin().get_material(id)
}

/// Builtin materials supported by `machine_id`.
pub fn compatible_materials(machine_id: &str) -> Vec<&'static MaterialProfile> {
    Registry::builtin().compatible_materials(machine_id)
}

/// Builtin materials in `category`.
pub fn materials_by_category(category: MaterialCategory) -> Vec<&'static MaterialProfile> {
    Registry::builtin().materials_by_category(category)
}

/// Builtin materials in `category` within [`DEFAULT_THICKNESS_TOLERANCE`] of `target`.
pub fn find_by_thickness(category: MaterialCategory, target: f64) -> Vec<&'static MaterialProfile> {
    Registry::builtin().find_by_thickness(category, target, DEFAULT_THICKNESS_TOLERANCE)
}

/// Compatibility check against the builtin registry.
pub fn validate_compatibility(material_id: &str, machine_id: &str) -> CompatibilityReport {
    Registry::builtin().validate_compatibility(material_id, machine_id)
}
