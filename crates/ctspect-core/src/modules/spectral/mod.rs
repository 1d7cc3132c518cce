//! Spectral integration: per-setting effective energy and total integral.

use crate::domain::{CalibrationError, CalibrationResult, KvpSetting};
use crate::modules::spectrum::ResampledSpectrumSet;
use crate::numerics::stable_sum;

/// Integral summary of one kVp setting's resampled spectrum.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SpectralSummary {
    pub setting: KvpSetting,
    /// Photon-fluence-weighted mean energy of the differential spectrum.
    pub effective_energy_kev: f64,
    /// Sum of the differential spectrum.
    pub integral: f64,
}

/// Summarize every setting of a resampled spectrum set.
///
/// The differential spectrum is the weight column times the forward
/// difference of the shared axis, with the first bin forced to zero: there
/// is no differential mass below the first sample. The effective energy is
/// the first moment of that differential column over its integral.
pub fn summarize_spectra(
    set: &ResampledSpectrumSet,
) -> CalibrationResult<Vec<SpectralSummary>> {
    set.columns()
        .map(|(setting, weights)| summarize_column(setting, set.energies_kev(), weights))
        .collect()
}

fn summarize_column(
    setting: KvpSetting,
    energies_kev: &[f64],
    weights: &[f64],
) -> CalibrationResult<SpectralSummary> {
    let differential = differential_spectrum(energies_kev, weights);
    let integral = stable_sum(&differential);
    if integral == 0.0 {
        return Err(CalibrationError::DegenerateSpectrum { setting });
    }

    let moment: Vec<f64> = energies_kev
        .iter()
        .zip(differential.iter())
        .map(|(&energy, &mass)| energy * mass)
        .collect();
    let effective_energy_kev = stable_sum(&moment) / integral;

    Ok(SpectralSummary {
        setting,
        effective_energy_kev,
        integral,
    })
}

/// Bin masses aligned to the energy axis: `d[0] = 0`,
/// `d[i] = w[i] * (e[i] - e[i-1])` for `i >= 1`.
fn differential_spectrum(energies_kev: &[f64], weights: &[f64]) -> Vec<f64> {
    debug_assert_eq!(energies_kev.len(), weights.len());
    let mut differential = Vec::with_capacity(weights.len());
    differential.push(0.0);
    for i in 1..weights.len() {
        differential.push(weights[i] * (energies_kev[i] - energies_kev[i - 1]));
    }
    differential
}
