//! End-to-end calibration: spectra in, per-material HU tables out.
//!
//! Strict producer/consumer ordering, no state between runs:
//! loader -> resampler -> integrator -> {evaluator, mixture law} -> HU.
//! A failure for any setting or material aborts the whole table; no partial
//! rows are produced.

use crate::domain::{CalibrationResult, KvpSetting, MaterialId};
use crate::modules::hu::{HuColumn, HuTable, LacSample, hounsfield};
use crate::modules::materials::{LacLookup, MaterialLac, MixtureSpec, mixture_lac};
use crate::modules::spectral::{SpectralSummary, summarize_spectra};
use crate::modules::spectrum::{EnergySpectrum, load_spectra, resample_spectra};
use std::path::Path;

/// Load, resample, and integrate the spectra for a list of kVp settings.
pub fn spectral_summaries(
    spectra_dir: impl AsRef<Path>,
    settings: &[KvpSetting],
) -> CalibrationResult<Vec<SpectralSummary>> {
    let spectra = load_spectra(spectra_dir, settings)?;
    summaries_for_spectra(&spectra)
}

/// Resample and integrate already-loaded spectra.
pub fn summaries_for_spectra(
    spectra: &[EnergySpectrum],
) -> CalibrationResult<Vec<SpectralSummary>> {
    let resampled = resample_spectra(spectra)?;
    summarize_spectra(&resampled)
}

/// Polyenergetic HU table: one column per kVp setting, each material's LAC
/// and water's LAC both evaluated at that setting's effective energy.
pub fn polyenergetic_hu_table(
    spectra: &[EnergySpectrum],
    materials: &[MaterialId],
    water: &MaterialId,
    lookup: &dyn LacLookup,
) -> CalibrationResult<HuTable> {
    let summaries = summaries_for_spectra(spectra)?;
    let energies: Vec<f64> = summaries
        .iter()
        .map(|summary| summary.effective_energy_kev)
        .collect();
    let columns = summaries
        .iter()
        .map(|summary| HuColumn {
            setting: Some(summary.setting),
            energy_kev: summary.effective_energy_kev,
        })
        .collect();

    hu_table_at_energies(columns, &energies, materials, water, lookup)
}

/// Monoenergetic HU table: one column per explicitly requested energy.
pub fn monoenergetic_hu_table(
    energies_kev: &[f64],
    materials: &[MaterialId],
    water: &MaterialId,
    lookup: &dyn LacLookup,
) -> CalibrationResult<HuTable> {
    let columns = energies_kev
        .iter()
        .map(|&energy_kev| HuColumn {
            setting: None,
            energy_kev,
        })
        .collect();

    hu_table_at_energies(columns, energies_kev, materials, water, lookup)
}

fn hu_table_at_energies(
    columns: Vec<HuColumn>,
    energies_kev: &[f64],
    materials: &[MaterialId],
    water: &MaterialId,
    lookup: &dyn LacLookup,
) -> CalibrationResult<HuTable> {
    let water_lacs = lookup.lac(water, energies_kev)?;

    let mut values = Vec::with_capacity(materials.len());
    for material in materials {
        let material_lacs = lookup.lac(material, energies_kev)?;
        let row = energies_kev
            .iter()
            .zip(material_lacs.iter().zip(water_lacs.iter()))
            .map(|(&energy_kev, (&material_lac, &water_lac))| {
                hounsfield(
                    LacSample {
                        energy_kev,
                        value: material_lac,
                    },
                    LacSample {
                        energy_kev,
                        value: water_lac,
                    },
                )
            })
            .collect::<CalibrationResult<Vec<f64>>>()?;
        values.push(row);
    }

    Ok(HuTable {
        columns,
        materials: materials.to_vec(),
        values,
    })
}

/// HU table for an insert-concentration series (e.g. calcium in myocardium),
/// one row per concentration, one column per evaluation energy. Rows are
/// labeled `<insert>_<concentration>` with three decimals, matching the
/// usual insert naming (calcium_0.200, calcium_0.400, ...).
pub fn mixture_hu_table(
    concentrations_g_cm3: &[f64],
    host_density_g_cm3: f64,
    insert: &MaterialLac,
    host: &MaterialLac,
    water: &MaterialLac,
    energies_kev: &[f64],
) -> CalibrationResult<HuTable> {
    let columns: Vec<HuColumn> = energies_kev
        .iter()
        .map(|&energy_kev| HuColumn {
            setting: None,
            energy_kev,
        })
        .collect();

    let mut materials = Vec::with_capacity(concentrations_g_cm3.len());
    let mut values = Vec::with_capacity(concentrations_g_cm3.len());
    for &concentration in concentrations_g_cm3 {
        let spec = MixtureSpec::new(concentration, host_density_g_cm3);
        let row = energies_kev
            .iter()
            .map(|&energy_kev| {
                let blended = mixture_lac(spec, insert, host, energy_kev)?;
                hounsfield(
                    LacSample {
                        energy_kev,
                        value: blended,
                    },
                    water.value_at(energy_kev),
                )
            })
            .collect::<CalibrationResult<Vec<f64>>>()?;
        materials.push(MaterialId::new(format!(
            "{}_{:.3}",
            insert.material(),
            concentration
        )));
        values.push(row);
    }

    Ok(HuTable {
        columns,
        materials,
        values,
    })
}
