use super::CliError;
use anyhow::Context;
use ctspect_core::domain::{KvpSetting, MaterialId};
use ctspect_core::modules::hu::HuTable;
use ctspect_core::modules::materials::TabulatedLacLookup;
use std::fs;
use std::path::{Path, PathBuf};

pub(super) fn parse_kvp_list(raw: &str) -> Result<Vec<KvpSetting>, CliError> {
    let settings = raw
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<u32>()
                .map(KvpSetting)
                .map_err(|_| CliError::Usage(format!("invalid kVp setting '{field}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if settings.is_empty() {
        return Err(CliError::Usage("at least one kVp setting is required".to_string()));
    }
    Ok(settings)
}

pub(super) fn parse_energy_list(raw: &str) -> Result<Vec<f64>, CliError> {
    let energies = raw
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| CliError::Usage(format!("invalid energy '{field}' keV")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if energies.is_empty() {
        return Err(CliError::Usage("at least one energy is required".to_string()));
    }
    Ok(energies)
}

pub(super) fn parse_concentration_list(raw: &str) -> Result<Vec<f64>, CliError> {
    raw.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| CliError::Usage(format!("invalid concentration '{field}' g/cm3")))
        })
        .collect()
}

pub(super) fn load_lookup(path: &Path) -> Result<TabulatedLacLookup, CliError> {
    Ok(TabulatedLacLookup::from_json_file(path)?)
}

/// Materials requested on the command line, or every tabulated material when
/// none were named.
pub(super) fn select_materials(
    lookup: &TabulatedLacLookup,
    requested: &[String],
) -> Vec<MaterialId> {
    if requested.is_empty() {
        lookup.materials().cloned().collect()
    } else {
        requested
            .iter()
            .map(|name| MaterialId::new(name.clone()))
            .collect()
    }
}

pub(super) fn emit_json<T: serde::Serialize>(
    value: &T,
    output: Option<&PathBuf>,
) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)
        .context("failed to serialize output")
        .map_err(CliError::Internal)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write '{}'", path.display()))
                .map_err(CliError::Internal)?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

pub(super) fn render_hu_table(table: &HuTable) -> String {
    let mut lines = Vec::with_capacity(table.materials.len() + 1);
    let header = table
        .columns
        .iter()
        .map(|column| match column.setting {
            Some(setting) => format!("{} kVp ({:.2} keV)", setting, column.energy_kev),
            None => format!("{:.2} keV", column.energy_kev),
        })
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("{:<16} {header}", "material"));

    for (material, row) in table.materials.iter().zip(table.values.iter()) {
        let cells = row
            .iter()
            .map(|hu| format!("{hu:>10.1}"))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(format!("{:<16} {cells}", material.as_str()));
    }

    lines.join("\n")
}
