use super::{EnergySpectrum, ResampledSpectrumSet};
use crate::domain::{CalibrationError, CalibrationResult};
use crate::numerics::{BoundaryPolicy, interp_linear_many};

/// Align every spectrum onto one shared energy axis.
///
/// The shared axis is the axis of the input whose maximum energy is largest,
/// so no input is truncated at the top; on a tie the first such input in
/// list order wins. Every other input is mapped onto the axis by linear
/// interpolation inside its own domain and linear extrapolation along the
/// boundary slope outside it. Spectra are never clamped: a clamped tail
/// would put spurious constant fluence above a tube's endpoint energy.
pub fn resample_spectra(
    spectra: &[EnergySpectrum],
) -> CalibrationResult<ResampledSpectrumSet> {
    let Some(first) = spectra.first() else {
        return Err(CalibrationError::EmptySpectrumSet);
    };

    let mut axis_owner = 0usize;
    let mut axis_max = first.max_energy_kev();
    for (index, spectrum) in spectra.iter().enumerate().skip(1) {
        if spectrum.max_energy_kev() > axis_max {
            axis_owner = index;
            axis_max = spectrum.max_energy_kev();
        }
    }

    let axis = spectra[axis_owner].energies_kev().to_vec();
    let mut settings = Vec::with_capacity(spectra.len());
    let mut columns = Vec::with_capacity(spectra.len());
    for (index, spectrum) in spectra.iter().enumerate() {
        settings.push(spectrum.setting());
        if index == axis_owner {
            columns.push(spectrum.weights().to_vec());
        } else {
            columns.push(interp_linear_many(
                spectrum.energies_kev(),
                spectrum.weights(),
                &axis,
                BoundaryPolicy::ExtrapolateLinear,
            ));
        }
    }

    Ok(ResampledSpectrumSet::from_parts(axis, settings, columns))
}
