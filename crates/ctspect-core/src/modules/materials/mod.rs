//! Material attenuation: tabulated LAC curves, point evaluation at an
//! effective energy, the external lookup seam, and the two-component
//! mixture law.

mod lookup;
mod mixture;

pub use lookup::{LacLookup, TabulatedLacLookup};
pub use mixture::{MixtureSpec, mixture_lac, mixture_lac_curve};

use crate::domain::{CalibrationError, CalibrationResult, MaterialId};
use crate::modules::hu::LacSample;
use crate::numerics::{BoundaryPolicy, interp_linear};

/// A material's monoenergetic linear attenuation coefficients tabulated over
/// strictly increasing energies in keV. Read-only reference data.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialLac {
    material: MaterialId,
    energies_kev: Vec<f64>,
    values: Vec<f64>,
}

impl MaterialLac {
    pub fn new(
        material: MaterialId,
        energies_kev: Vec<f64>,
        values: Vec<f64>,
    ) -> CalibrationResult<Self> {
        let malformed = |reason: String| CalibrationError::MalformedLacTable {
            material: material.clone(),
            reason,
        };

        if energies_kev.len() != values.len() {
            return Err(malformed(format!(
                "{} energy samples but {} LAC samples",
                energies_kev.len(),
                values.len()
            )));
        }
        if energies_kev.is_empty() {
            return Err(malformed("empty table".to_string()));
        }
        for pair in energies_kev.windows(2) {
            if pair[1] <= pair[0] {
                return Err(malformed(format!(
                    "energies not strictly increasing at {} keV",
                    pair[1]
                )));
            }
        }
        for (&energy, &value) in energies_kev.iter().zip(values.iter()) {
            if !value.is_finite() || value < 0.0 {
                return Err(malformed(format!(
                    "negative or non-finite LAC {value} at {energy} keV"
                )));
            }
        }

        Ok(Self {
            material,
            energies_kev,
            values,
        })
    }

    pub fn material(&self) -> &MaterialId {
        &self.material
    }

    pub fn energies_kev(&self) -> &[f64] {
        &self.energies_kev
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// LAC at one energy, linearly interpolated inside the table and held
    /// flat at the edges. Attenuation tables are never extended along the
    /// boundary slope: past the physical table that can go negative or
    /// unbounded.
    pub fn value_at(&self, energy_kev: f64) -> LacSample {
        let value = interp_linear(
            &self.energies_kev,
            &self.values,
            energy_kev,
            BoundaryPolicy::ClampToEdge,
        );
        LacSample {
            energy_kev,
            value,
        }
    }

    /// LAC at several energies; same boundary behavior as [`Self::value_at`].
    pub fn values_at(&self, energies_kev: &[f64]) -> Vec<LacSample> {
        energies_kev
            .iter()
            .map(|&energy| self.value_at(energy))
            .collect()
    }
}
