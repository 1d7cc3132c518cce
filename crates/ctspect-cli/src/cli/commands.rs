use super::CliError;
use super::helpers::{
    emit_json, load_lookup, parse_concentration_list, parse_energy_list, parse_kvp_list,
    render_hu_table, select_materials,
};
use ctspect_core::domain::MaterialId;
use ctspect_core::modules::calibration::{
    mixture_hu_table, monoenergetic_hu_table, polyenergetic_hu_table, spectral_summaries,
};
use ctspect_core::modules::spectrum::load_spectra;
use std::path::PathBuf;
use tracing::debug;

#[derive(clap::Args)]
pub(super) struct EffectiveEnergiesArgs {
    /// Directory holding spectra_<kvp>.csv tables
    #[arg(long)]
    spectra_dir: PathBuf,

    /// Comma-separated kVp settings, e.g. 80,100,140
    #[arg(long)]
    kvp: String,

    /// Emit JSON instead of the human summary
    #[arg(long)]
    json: bool,
}

pub(super) fn run_effective_energies(args: EffectiveEnergiesArgs) -> Result<i32, CliError> {
    let settings = parse_kvp_list(&args.kvp)?;
    debug!(settings = settings.len(), "loading spectra");
    let summaries = spectral_summaries(&args.spectra_dir, &settings)?;

    if args.json {
        emit_json(&summaries, None)?;
    } else {
        for summary in &summaries {
            println!(
                "{} kVp: effective energy {:.3} keV, integral {:.6e}",
                summary.setting, summary.effective_energy_kev, summary.integral
            );
        }
    }
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct HuTableArgs {
    /// Directory holding spectra_<kvp>.csv tables
    #[arg(long)]
    spectra_dir: PathBuf,

    /// Comma-separated kVp settings, e.g. 80,100,140
    #[arg(long)]
    kvp: String,

    /// JSON file of per-material LAC tables
    #[arg(long)]
    lac_tables: PathBuf,

    /// Materials to tabulate (default: every material in the LAC file)
    #[arg(long)]
    material: Vec<String>,

    /// Material used as the HU normalization reference
    #[arg(long, default_value = "water")]
    water: String,

    /// Write the table as JSON to this path instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(super) fn run_hu_table(args: HuTableArgs) -> Result<i32, CliError> {
    let settings = parse_kvp_list(&args.kvp)?;
    let lookup = load_lookup(&args.lac_tables)?;
    let materials = select_materials(&lookup, &args.material);
    let water = MaterialId::new(args.water);

    let spectra = load_spectra(&args.spectra_dir, &settings)?;
    debug!(
        settings = settings.len(),
        materials = materials.len(),
        "running polyenergetic calibration"
    );
    let table = polyenergetic_hu_table(&spectra, &materials, &water, &lookup)?;

    if args.output.is_some() {
        emit_json(&table, args.output.as_ref())?;
    } else {
        println!("{}", render_hu_table(&table));
    }
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct MonoHuArgs {
    /// Comma-separated energies in keV, e.g. 80,100,120,135
    #[arg(long)]
    energies: String,

    /// JSON file of per-material LAC tables
    #[arg(long)]
    lac_tables: PathBuf,

    /// Materials to tabulate (default: every material in the LAC file)
    #[arg(long)]
    material: Vec<String>,

    /// Material used as the HU normalization reference
    #[arg(long, default_value = "water")]
    water: String,

    /// Write the table as JSON to this path instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(super) fn run_mono_hu(args: MonoHuArgs) -> Result<i32, CliError> {
    let energies = parse_energy_list(&args.energies)?;
    let lookup = load_lookup(&args.lac_tables)?;
    let materials = select_materials(&lookup, &args.material);
    let water = MaterialId::new(args.water);

    let table = monoenergetic_hu_table(&energies, &materials, &water, &lookup)?;

    if args.output.is_some() {
        emit_json(&table, args.output.as_ref())?;
    } else {
        println!("{}", render_hu_table(&table));
    }
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct MixtureHuArgs {
    /// JSON file of per-material LAC tables
    #[arg(long)]
    lac_tables: PathBuf,

    /// Insert material, e.g. calcium
    #[arg(long)]
    insert: String,

    /// Host tissue material, e.g. myocardium
    #[arg(long)]
    host: String,

    /// Host tissue reference density in g/cm3
    #[arg(long, default_value_t = 1.050)]
    host_density: f64,

    /// Comma-separated insert concentrations in g/cm3, e.g. 0.2,0.4,0.8
    #[arg(long)]
    concentrations: String,

    /// Comma-separated evaluation energies in keV
    #[arg(long)]
    energies: String,

    /// Material used as the HU normalization reference
    #[arg(long, default_value = "water")]
    water: String,

    /// Write the table as JSON to this path instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(super) fn run_mixture_hu(args: MixtureHuArgs) -> Result<i32, CliError> {
    let concentrations = parse_concentration_list(&args.concentrations)?;
    let energies = parse_energy_list(&args.energies)?;
    let lookup = load_lookup(&args.lac_tables)?;

    let insert = lookup.table(&MaterialId::new(args.insert))?;
    let host = lookup.table(&MaterialId::new(args.host))?;
    let water = lookup.table(&MaterialId::new(args.water))?;

    debug!(
        concentrations = concentrations.len(),
        energies = energies.len(),
        "building mixture HU series"
    );
    let table = mixture_hu_table(
        &concentrations,
        args.host_density,
        insert,
        host,
        water,
        &energies,
    )?;

    if args.output.is_some() {
        emit_json(&table, args.output.as_ref())?;
    } else {
        println!("{}", render_hu_table(&table));
    }
    Ok(0)
}
