pub mod errors;
mod geometry;
mod phantom;

pub use errors::{CalibrationError, CalibrationErrorCategory, CalibrationResult};
pub use geometry::{ImageGeometry, ScannerGeometry};
pub use phantom::{PhantomRecipe, ResolvedShape, ShapeSpec};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Peak tube voltage setting in kV. Identifies one source spectrum table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct KvpSetting(pub u32);

impl KvpSetting {
    /// File name of the tabulated spectrum for this setting, per the
    /// `spectra_<kvp>.csv` convention.
    pub fn spectrum_file_name(self) -> String {
        format!("spectra_{}.csv", self.0)
    }
}

impl Display for KvpSetting {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Identifier of a material or element in the attenuation table,
/// e.g. "water", "calcium", "myocardium".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub String);

impl MaterialId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MaterialId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}
