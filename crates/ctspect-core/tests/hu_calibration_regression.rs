use ctspect_core::domain::{ImageGeometry, KvpSetting, MaterialId, PhantomRecipe, ShapeSpec};
use ctspect_core::modules::calibration::{
    mixture_hu_table, monoenergetic_hu_table, polyenergetic_hu_table,
};
use ctspect_core::modules::materials::{MixtureSpec, TabulatedLacLookup, mixture_lac};
use ctspect_core::modules::spectrum::load_spectra;
use std::fs;
use tempfile::TempDir;

const LAC_TABLES_JSON: &str = r#"{
    "water":      [[20.0, 0.810], [60.0, 0.206], [100.0, 0.171], [140.0, 0.154]],
    "myocardium": [[20.0, 0.823], [60.0, 0.215], [100.0, 0.178], [140.0, 0.160]],
    "calcium":    [[20.0, 8.360], [60.0, 1.080], [100.0, 0.480], [140.0, 0.330]],
    "air":        [[20.0, 0.0009], [60.0, 0.0002], [100.0, 0.0002], [140.0, 0.0002]]
}"#;

fn lookup(temp: &TempDir) -> TabulatedLacLookup {
    let path = temp.path().join("lac_tables.json");
    fs::write(&path, LAC_TABLES_JSON).expect("LAC fixture should be written");
    TabulatedLacLookup::from_json_file(&path).expect("LAC tables should load")
}

#[test]
fn water_hu_is_zero_at_every_tested_energy() {
    let temp = TempDir::new().expect("tempdir should be created");
    let lookup = lookup(&temp);
    let water = MaterialId::new("water");

    let table = monoenergetic_hu_table(
        &[80.0, 100.0, 120.0, 135.0],
        &[water.clone()],
        &water,
        &lookup,
    )
    .expect("monoenergetic table should build");

    let row = table.row(&water).expect("water row exists");
    for &hu in row {
        assert!(hu.abs() <= 1e-9, "water HU should be 0 +- 1e-9, was {hu}");
    }
}

#[test]
fn monoenergetic_hu_spans_air_to_calcium_without_clamping() {
    let temp = TempDir::new().expect("tempdir should be created");
    let lookup = lookup(&temp);
    let water = MaterialId::new("water");
    let materials = [
        MaterialId::new("air"),
        MaterialId::new("myocardium"),
        MaterialId::new("calcium"),
    ];

    let table = monoenergetic_hu_table(&[100.0], &materials, &water, &lookup)
        .expect("monoenergetic table should build");

    let air = table.value(&MaterialId::new("air"), 0).expect("air row");
    assert!(air < -990.0, "air HU was {air}");
    let calcium = table
        .value(&MaterialId::new("calcium"), 0)
        .expect("calcium row");
    assert!(calcium > 1500.0, "calcium HU was {calcium}");
}

#[test]
fn polyenergetic_pipeline_produces_one_hu_column_per_setting() {
    let temp = TempDir::new().expect("tempdir should be created");
    let lookup = lookup(&temp);

    fs::write(
        temp.path().join("spectra_80.csv"),
        "20.0,0.0\n50.0,1.2\n80.0,0.1\n",
    )
    .expect("fixture should be written");
    fs::write(
        temp.path().join("spectra_140.csv"),
        "20.0,0.0\n80.0,1.6\n140.0,0.1\n",
    )
    .expect("fixture should be written");

    let settings = [KvpSetting(80), KvpSetting(140)];
    let spectra = load_spectra(temp.path(), &settings).expect("spectra should load");
    let water = MaterialId::new("water");
    let materials = [water.clone(), MaterialId::new("calcium")];

    let table = polyenergetic_hu_table(&spectra, &materials, &water, &lookup)
        .expect("polyenergetic calibration should succeed");

    assert_eq!(table.columns.len(), 2);
    for (column, &setting) in table.columns.iter().zip(settings.iter()) {
        assert_eq!(column.setting, Some(setting));
        assert!(column.energy_kev > 20.0 && column.energy_kev < 140.0);
    }

    let water_row = table.row(&water).expect("water row exists");
    for &hu in water_row {
        assert!(hu.abs() <= 1e-9, "water HU should be 0, was {hu}");
    }

    // The calcium insert attenuates more at the softer 80 kVp beam.
    let calcium_row = table
        .row(&MaterialId::new("calcium"))
        .expect("calcium row exists");
    assert!(calcium_row[0] > calcium_row[1]);
}

#[test]
fn calcium_mixture_at_0_200_against_1_050_matches_the_hand_computation() {
    let temp = TempDir::new().expect("tempdir should be created");
    let lookup = lookup(&temp);
    let calcium = lookup
        .table(&MaterialId::new("calcium"))
        .expect("calcium is tabulated");
    let myocardium = lookup
        .table(&MaterialId::new("myocardium"))
        .expect("myocardium is tabulated");

    let spec = MixtureSpec::new(0.200, 1.050);
    let fraction = spec
        .insert_volume_fraction()
        .expect("fraction should be valid");
    assert!((fraction - 0.1905).abs() < 1e-4);
    assert!((1.0 - fraction - 0.8095).abs() < 1e-4);

    let blended = mixture_lac(spec, calcium, myocardium, 100.0)
        .expect("mixture should evaluate");
    let expected = fraction * 0.480 + (1.0 - fraction) * 0.178;
    assert!(
        (blended - expected).abs() < 1e-12,
        "mixture LAC {blended} should equal the volume-weighted combination {expected}"
    );
}

#[test]
fn mixture_hu_series_feeds_phantom_fills() {
    let temp = TempDir::new().expect("tempdir should be created");
    let lookup = lookup(&temp);
    let calcium = lookup
        .table(&MaterialId::new("calcium"))
        .expect("calcium is tabulated");
    let myocardium = lookup
        .table(&MaterialId::new("myocardium"))
        .expect("myocardium is tabulated");
    let water = lookup
        .table(&MaterialId::new("water"))
        .expect("water is tabulated");

    let table = mixture_hu_table(
        &[0.200, 0.400, 0.800],
        1.050,
        calcium,
        myocardium,
        water,
        &[100.0],
    )
    .expect("mixture series should build");

    let recipe = PhantomRecipe {
        image: ImageGeometry {
            voxels: [256, 256, 32],
            voxel_size_mm: [0.5, 0.5, 1.0],
        },
        shapes: vec![
            ShapeSpec::Cylinder {
                material: MaterialId::new("calcium_0.200"),
                center_mm: [30.0, 0.0, 0.0],
                radius_mm: 4.0,
                height_mm: 10.0,
            },
            ShapeSpec::Cylinder {
                material: MaterialId::new("calcium_0.800"),
                center_mm: [-30.0, 0.0, 0.0],
                radius_mm: 4.0,
                height_mm: 10.0,
            },
        ],
    };

    let resolved = table
        .resolve_phantom_fills(&recipe, 0)
        .expect("every insert is a row of the series");
    assert_eq!(resolved.len(), 2);
    assert!(
        resolved[1].hu_fill > resolved[0].hu_fill,
        "denser insert should fill with a higher HU"
    );
}
