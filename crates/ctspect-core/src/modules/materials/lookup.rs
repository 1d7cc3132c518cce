use super::MaterialLac;
use crate::domain::{CalibrationError, CalibrationResult, MaterialId};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// External physics capability: monoenergetic LAC lookup per material.
///
/// The pipeline calls this once per material per distinct energy set and
/// treats the backing data as immutable for the session.
pub trait LacLookup {
    fn lac(&self, material: &MaterialId, energies_kev: &[f64]) -> CalibrationResult<Vec<f64>>;
}

/// JSON-backed lookup: `{ "<material>": [[energy_kev, lac], ...], ... }`.
///
/// Each table is validated once at load; queries interpolate with the
/// flat-edge policy of [`MaterialLac::value_at`].
#[derive(Debug, Clone)]
pub struct TabulatedLacLookup {
    tables: BTreeMap<MaterialId, MaterialLac>,
}

impl TabulatedLacLookup {
    pub fn from_tables(tables: impl IntoIterator<Item = MaterialLac>) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|table| (table.material().clone(), table))
                .collect(),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CalibrationResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| CalibrationError::TableRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source).map_err(|source| match source {
            JsonTableError::Parse(source) => CalibrationError::TableParse {
                path: path.to_path_buf(),
                source,
            },
            JsonTableError::Table(error) => error,
        })
    }

    fn from_json_str(source: &str) -> Result<Self, JsonTableError> {
        let raw: BTreeMap<String, Vec<[f64; 2]>> =
            serde_json::from_str(source).map_err(JsonTableError::Parse)?;

        let mut tables = BTreeMap::new();
        for (name, rows) in raw {
            let material = MaterialId::new(name);
            let energies: Vec<f64> = rows.iter().map(|row| row[0]).collect();
            let values: Vec<f64> = rows.iter().map(|row| row[1]).collect();
            let table = MaterialLac::new(material.clone(), energies, values)
                .map_err(JsonTableError::Table)?;
            tables.insert(material, table);
        }
        Ok(Self { tables })
    }

    pub fn table(&self, material: &MaterialId) -> CalibrationResult<&MaterialLac> {
        self.tables
            .get(material)
            .ok_or_else(|| CalibrationError::UnknownMaterial {
                material: material.clone(),
            })
    }

    pub fn materials(&self) -> impl Iterator<Item = &MaterialId> {
        self.tables.keys()
    }
}

enum JsonTableError {
    Parse(serde_json::Error),
    Table(CalibrationError),
}

impl LacLookup for TabulatedLacLookup {
    fn lac(&self, material: &MaterialId, energies_kev: &[f64]) -> CalibrationResult<Vec<f64>> {
        let table = self.table(material)?;
        Ok(table
            .values_at(energies_kev)
            .into_iter()
            .map(|sample| sample.value)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{LacLookup, TabulatedLacLookup};
    use crate::domain::{CalibrationError, MaterialId};
    use std::fs;
    use tempfile::TempDir;

    const TABLE_JSON: &str = r#"{
        "water": [[40.0, 0.27], [80.0, 0.18], [120.0, 0.16]],
        "calcium": [[40.0, 1.00], [80.0, 0.48], [120.0, 0.36]]
    }"#;

    #[test]
    fn json_file_loads_and_answers_queries() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("lac_tables.json");
        fs::write(&path, TABLE_JSON).expect("fixture should be written");

        let lookup = TabulatedLacLookup::from_json_file(&path).expect("table should load");
        let values = lookup
            .lac(&MaterialId::new("water"), &[40.0, 60.0, 200.0])
            .expect("water should be tabulated");
        assert_eq!(values[0], 0.27);
        assert!((values[1] - 0.225).abs() < 1e-12);
        // Flat extrapolation above the table.
        assert_eq!(values[2], 0.16);
    }

    #[test]
    fn unknown_material_is_reported_by_name() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("lac_tables.json");
        fs::write(&path, TABLE_JSON).expect("fixture should be written");

        let lookup = TabulatedLacLookup::from_json_file(&path).expect("table should load");
        let error = lookup
            .lac(&MaterialId::new("unobtainium"), &[80.0])
            .expect_err("unknown material should fail");
        match error {
            CalibrationError::UnknownMaterial { material } => {
                assert_eq!(material.as_str(), "unobtainium");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_table_is_rejected_at_load() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("lac_tables.json");
        fs::write(&path, r#"{ "water": [[80.0, 0.18], [40.0, 0.27]] }"#)
            .expect("fixture should be written");

        let error = TabulatedLacLookup::from_json_file(&path)
            .expect_err("decreasing energies should be rejected");
        assert!(matches!(error, CalibrationError::MalformedLacTable { .. }));
    }

    #[test]
    fn missing_file_maps_to_table_read_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = TabulatedLacLookup::from_json_file(temp.path().join("absent.json"))
            .expect_err("missing file should fail");
        assert!(matches!(error, CalibrationError::TableRead { .. }));
    }
}
