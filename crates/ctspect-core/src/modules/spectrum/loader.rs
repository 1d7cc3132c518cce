//! Reads tabulated `spectra_<kvp>.csv` files into [`EnergySpectrum`] values.
//!
//! The stored tables follow the reference-table convention of tabulating
//! photon counts per energy bin; the loader multiplies each weight by its
//! energy unconditionally so downstream integration sees fluence-weighted
//! values.

use super::EnergySpectrum;
use crate::domain::{CalibrationError, CalibrationResult, KvpSetting};
use globset::Glob;
use std::fs;
use std::path::Path;

/// Load one spectrum per requested setting from `directory`.
///
/// Settings are loaded in list order; the first failure aborts the whole
/// load, no partial set is returned.
pub fn load_spectra(
    directory: impl AsRef<Path>,
    settings: &[KvpSetting],
) -> CalibrationResult<Vec<EnergySpectrum>> {
    let directory = directory.as_ref();
    settings
        .iter()
        .map(|&setting| load_spectrum(directory, setting))
        .collect()
}

/// Load the spectrum table for a single setting.
pub fn load_spectrum(
    directory: impl AsRef<Path>,
    setting: KvpSetting,
) -> CalibrationResult<EnergySpectrum> {
    let directory = directory.as_ref();
    let path = directory.join(setting.spectrum_file_name());
    if !path.is_file() {
        return Err(CalibrationError::MissingSpectrumFile {
            setting,
            directory: directory.to_path_buf(),
        });
    }

    let source = fs::read_to_string(&path).map_err(|source| CalibrationError::TableRead {
        path: path.clone(),
        source,
    })?;
    parse_spectrum_source(setting, &source)
}

/// Parse a two-column (energy keV, relative photon weight) table.
///
/// One leading non-numeric header line is tolerated; exact duplicate energy
/// rows are collapsed keeping the first occurrence; decreasing energies are
/// rejected. The weight-times-energy correction is applied after validation.
pub fn parse_spectrum_source(
    setting: KvpSetting,
    source: &str,
) -> CalibrationResult<EnergySpectrum> {
    let malformed = |reason: String| CalibrationError::MalformedSpectrumTable {
        setting,
        reason,
    };

    let mut rows: Vec<(f64, f64)> = Vec::new();
    for (line_index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_row(trimmed) {
            Some(row) => rows.push(row),
            None if rows.is_empty() && line_index == 0 => {
                // Header line such as "energy,weight".
                continue;
            }
            None => {
                return Err(malformed(format!(
                    "line {} is not a two-column numeric row: '{}'",
                    line_index + 1,
                    trimmed
                )));
            }
        }
    }

    // De-duplication check: collapse exact repeats, reject reversals.
    let mut energies = Vec::with_capacity(rows.len());
    let mut weights = Vec::with_capacity(rows.len());
    for (energy, weight) in rows {
        match energies.last() {
            Some(&previous) if energy == previous => continue,
            Some(&previous) if energy < previous => {
                return Err(malformed(format!(
                    "energy column decreases at {energy} keV"
                )));
            }
            _ => {}
        }
        energies.push(energy);
        weights.push(weight);
    }

    for (weight, &energy) in weights.iter_mut().zip(energies.iter()) {
        *weight *= energy;
    }

    EnergySpectrum::new(setting, energies, weights)
}

fn parse_row(line: &str) -> Option<(f64, f64)> {
    let mut fields = line
        .split(|c: char| c == ',' || c == ';' || c.is_ascii_whitespace())
        .filter(|field| !field.is_empty());
    let energy: f64 = fields.next()?.parse().ok()?;
    let weight: f64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((energy, weight))
}

/// Scan a directory for `spectra_*.csv` tables and report the kVp settings
/// they cover, ascending. Diagnostic helper for error messages and the CLI;
/// files whose `<kvp>` part is not an integer are ignored.
pub fn available_settings(directory: impl AsRef<Path>) -> CalibrationResult<Vec<KvpSetting>> {
    let directory = directory.as_ref();
    let matcher = Glob::new("spectra_*.csv")
        .expect("static glob pattern is valid")
        .compile_matcher();

    let entries = fs::read_dir(directory).map_err(|source| CalibrationError::TableRead {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut settings = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CalibrationError::TableRead {
            path: directory.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !matcher.is_match(name) {
            continue;
        }
        let kvp = name
            .strip_prefix("spectra_")
            .and_then(|rest| rest.strip_suffix(".csv"))
            .and_then(|digits| digits.parse::<u32>().ok());
        if let Some(kvp) = kvp {
            settings.push(KvpSetting(kvp));
        }
    }

    settings.sort();
    Ok(settings)
}
