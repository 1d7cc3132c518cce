//! Hounsfield conversion: water-normalized rescaling of attenuation values.

use crate::domain::{
    CalibrationError, CalibrationResult, KvpSetting, MaterialId, PhantomRecipe, ResolvedShape,
};
use crate::numerics::within_tolerance;
use serde::Serialize;

/// A linear attenuation coefficient tagged with the energy it was evaluated
/// at. HU conversion takes two of these so a numerator/denominator energy
/// mismatch is a detectable error instead of a silent miscalibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LacSample {
    pub energy_kev: f64,
    pub value: f64,
}

/// Relative energy tolerance below which two evaluation energies are
/// considered the same sample.
const ENERGY_MATCH_REL_TOL: f64 = 1e-9;
const ENERGY_MATCH_REL_FLOOR: f64 = 1e-12;

/// `hu = 1000 * (material / water - 1)`, both LACs at the identical energy.
///
/// The monoenergetic and polyenergetic paths compute water's LAC
/// independently; this guard is what keeps them synchronized. The water LAC
/// must be positive, otherwise the normalization is undefined. No clamping:
/// air comes out near -1000 and dense inserts can exceed +2000.
pub fn hounsfield(material: LacSample, water: LacSample) -> CalibrationResult<f64> {
    if !within_tolerance(
        material.energy_kev,
        water.energy_kev,
        0.0,
        ENERGY_MATCH_REL_TOL,
        ENERGY_MATCH_REL_FLOOR,
    ) {
        return Err(CalibrationError::EnergyMismatch {
            material_energy_kev: material.energy_kev,
            water_energy_kev: water.energy_kev,
        });
    }
    if water.value <= 0.0 {
        return Err(CalibrationError::NonPositiveWaterLac {
            energy_kev: water.energy_kev,
            value: water.value,
        });
    }
    Ok(1000.0 * (material.value / water.value - 1.0))
}

/// Label of one HU table column: the energy the LACs were evaluated at,
/// tagged with the kVp setting when that energy is a spectral effective
/// energy rather than an explicitly requested one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HuColumn {
    pub setting: Option<KvpSetting>,
    pub energy_kev: f64,
}

/// Per-material HU values, one column per evaluation energy. This is the
/// value handed to the phantom-builder collaborator and written out by the
/// CLI; row-major: `values[material][column]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuTable {
    pub columns: Vec<HuColumn>,
    pub materials: Vec<MaterialId>,
    pub values: Vec<Vec<f64>>,
}

impl HuTable {
    pub fn row(&self, material: &MaterialId) -> Option<&[f64]> {
        self.materials
            .iter()
            .position(|candidate| candidate == material)
            .map(|index| self.values[index].as_slice())
    }

    /// HU for one material in one column.
    pub fn value(&self, material: &MaterialId, column: usize) -> Option<f64> {
        self.row(material).and_then(|row| row.get(column)).copied()
    }

    /// Resolve a phantom recipe's material tags into HU fills taken from
    /// one column of this table. Fails on the first shape whose material
    /// has no row; no partial recipe is produced.
    pub fn resolve_phantom_fills(
        &self,
        recipe: &PhantomRecipe,
        column: usize,
    ) -> CalibrationResult<Vec<ResolvedShape>> {
        recipe
            .shapes
            .iter()
            .map(|shape| {
                let material = shape.material();
                let hu_fill = self.value(material, column).ok_or_else(|| {
                    CalibrationError::UnknownMaterial {
                        material: material.clone(),
                    }
                })?;
                Ok(ResolvedShape {
                    shape: shape.clone(),
                    hu_fill,
                })
            })
            .collect()
    }
}
