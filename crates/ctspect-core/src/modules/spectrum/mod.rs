//! Tabulated X-ray source spectra: loading and common-axis resampling.

mod loader;
mod resampler;

pub use loader::{available_settings, load_spectra, load_spectrum, parse_spectrum_source};
pub use resampler::resample_spectra;

use crate::domain::{CalibrationError, CalibrationResult, KvpSetting};

/// One tube-voltage setting's emission spectrum: relative photon weight
/// tabulated over strictly increasing energies in keV. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergySpectrum {
    setting: KvpSetting,
    energies_kev: Vec<f64>,
    weights: Vec<f64>,
}

impl EnergySpectrum {
    /// Build a spectrum, enforcing the load-time invariants: at least two
    /// samples, strictly increasing positive energies, non-negative finite
    /// weights.
    pub fn new(
        setting: KvpSetting,
        energies_kev: Vec<f64>,
        weights: Vec<f64>,
    ) -> CalibrationResult<Self> {
        let malformed = |reason: String| CalibrationError::MalformedSpectrumTable {
            setting,
            reason,
        };

        if energies_kev.len() != weights.len() {
            return Err(malformed(format!(
                "{} energy samples but {} weight samples",
                energies_kev.len(),
                weights.len()
            )));
        }
        if energies_kev.len() < 2 {
            return Err(malformed(format!(
                "{} samples, need at least 2",
                energies_kev.len()
            )));
        }
        for &energy in &energies_kev {
            if !energy.is_finite() || energy <= 0.0 {
                return Err(malformed(format!("non-positive energy sample {energy}")));
            }
        }
        for pair in energies_kev.windows(2) {
            if pair[1] <= pair[0] {
                return Err(malformed(format!(
                    "energies not strictly increasing at {} keV",
                    pair[1]
                )));
            }
        }
        for (&energy, &weight) in energies_kev.iter().zip(weights.iter()) {
            if !weight.is_finite() || weight < 0.0 {
                return Err(malformed(format!(
                    "negative or non-finite weight {weight} at {energy} keV"
                )));
            }
        }

        Ok(Self {
            setting,
            energies_kev,
            weights,
        })
    }

    pub fn setting(&self) -> KvpSetting {
        self.setting
    }

    pub fn energies_kev(&self) -> &[f64] {
        &self.energies_kev
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn max_energy_kev(&self) -> f64 {
        self.energies_kev[self.energies_kev.len() - 1]
    }
}

/// All loaded spectra aligned onto one shared energy axis, one weight column
/// per kVp setting. Derived from a spectrum set by [`resample_spectra`];
/// read-only afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledSpectrumSet {
    energies_kev: Vec<f64>,
    settings: Vec<KvpSetting>,
    columns: Vec<Vec<f64>>,
}

impl ResampledSpectrumSet {
    pub(crate) fn from_parts(
        energies_kev: Vec<f64>,
        settings: Vec<KvpSetting>,
        columns: Vec<Vec<f64>>,
    ) -> Self {
        debug_assert_eq!(settings.len(), columns.len());
        debug_assert!(
            columns
                .iter()
                .all(|column| column.len() == energies_kev.len())
        );
        Self {
            energies_kev,
            settings,
            columns,
        }
    }

    /// The shared, union-spanning energy axis in keV.
    pub fn energies_kev(&self) -> &[f64] {
        &self.energies_kev
    }

    pub fn settings(&self) -> &[KvpSetting] {
        &self.settings
    }

    /// Weight column for one setting, aligned to [`Self::energies_kev`].
    pub fn column(&self, setting: KvpSetting) -> Option<&[f64]> {
        self.settings
            .iter()
            .position(|&candidate| candidate == setting)
            .map(|index| self.columns[index].as_slice())
    }

    pub fn columns(&self) -> impl Iterator<Item = (KvpSetting, &[f64])> {
        self.settings
            .iter()
            .copied()
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::EnergySpectrum;
    use crate::domain::{CalibrationError, KvpSetting};

    #[test]
    fn new_rejects_non_monotonic_energies() {
        let error = EnergySpectrum::new(
            KvpSetting(80),
            vec![20.0, 30.0, 30.0],
            vec![1.0, 2.0, 3.0],
        )
        .expect_err("duplicate energy should be rejected");
        assert!(matches!(
            error,
            CalibrationError::MalformedSpectrumTable { .. }
        ));
    }

    #[test]
    fn new_rejects_negative_weights() {
        let error =
            EnergySpectrum::new(KvpSetting(80), vec![20.0, 30.0], vec![1.0, -0.5])
                .expect_err("negative weight should be rejected");
        assert!(matches!(
            error,
            CalibrationError::MalformedSpectrumTable { .. }
        ));
    }

    #[test]
    fn new_accepts_zero_weights() {
        let spectrum = EnergySpectrum::new(KvpSetting(80), vec![20.0, 30.0], vec![0.0, 0.0])
            .expect("zero weights are valid fluence values");
        assert_eq!(spectrum.max_energy_kev(), 30.0);
    }
}
