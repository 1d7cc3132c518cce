use crate::domain::{KvpSetting, MaterialId};
use std::path::PathBuf;

pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Failure taxonomy for the spectral calibration pipeline.
///
/// Every variant is a precondition-style failure detected before a result is
/// produced. Inputs are static tabulated data, so nothing is retried; the
/// variant carries enough context (setting, material, path, energy) to
/// diagnose without re-running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("no spectrum table for {setting} kVp under '{}'", directory.display())]
    MissingSpectrumFile {
        setting: KvpSetting,
        directory: PathBuf,
    },

    #[error("malformed spectrum table for {setting} kVp: {reason}")]
    MalformedSpectrumTable { setting: KvpSetting, reason: String },

    #[error("degenerate spectrum for {setting} kVp: zero total integral, effective energy is undefined")]
    DegenerateSpectrum { setting: KvpSetting },

    #[error(
        "invalid mixture fraction: insert concentration {concentration_g_cm3} g/cm3 over host reference density {reference_density_g_cm3} g/cm3 gives a volume fraction outside 0..=1"
    )]
    InvalidMixtureFraction {
        concentration_g_cm3: f64,
        reference_density_g_cm3: f64,
    },

    #[error(
        "HU numerator and denominator evaluated at different energies: material LAC at {material_energy_kev} keV, water LAC at {water_energy_kev} keV"
    )]
    EnergyMismatch {
        material_energy_kev: f64,
        water_energy_kev: f64,
    },

    #[error(
        "water LAC {value} at {energy_kev} keV is not positive, HU normalization is undefined"
    )]
    NonPositiveWaterLac { energy_kev: f64, value: f64 },

    #[error("empty spectrum set: at least one kVp setting is required")]
    EmptySpectrumSet,

    #[error("malformed attenuation table for '{material}': {reason}")]
    MalformedLacTable { material: MaterialId, reason: String },

    #[error("material '{material}' is not present in the attenuation table")]
    UnknownMaterial { material: MaterialId },

    #[error("failed to read table '{}': {source}", path.display())]
    TableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table '{}': {source}", path.display())]
    TableParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CalibrationError {
    pub fn category(&self) -> CalibrationErrorCategory {
        match self {
            Self::MalformedSpectrumTable { .. }
            | Self::InvalidMixtureFraction { .. }
            | Self::EmptySpectrumSet
            | Self::MalformedLacTable { .. }
            | Self::UnknownMaterial { .. } => CalibrationErrorCategory::InputValidationError,
            Self::MissingSpectrumFile { .. } | Self::TableRead { .. } | Self::TableParse { .. } => {
                CalibrationErrorCategory::IoSystemError
            }
            Self::DegenerateSpectrum { .. }
            | Self::EnergyMismatch { .. }
            | Self::NonPositiveWaterLac { .. } => CalibrationErrorCategory::ComputationError,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalibrationErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
}

impl CalibrationErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
        }
    }
}
