use super::MaterialLac;
use crate::domain::{CalibrationError, CalibrationResult};

/// Two-component volumetric mixture: a high-attenuation insert (e.g. calcium
/// hydroxyapatite) blended into a host tissue at a mass concentration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixtureSpec {
    /// Insert mass concentration in g/cm3.
    pub insert_concentration_g_cm3: f64,
    /// Host tissue reference density in g/cm3.
    pub host_density_g_cm3: f64,
}

impl MixtureSpec {
    pub fn new(insert_concentration_g_cm3: f64, host_density_g_cm3: f64) -> Self {
        Self {
            insert_concentration_g_cm3,
            host_density_g_cm3,
        }
    }

    /// Volume fraction of the insert, `C / D`. Inclusive at both ends: a
    /// fraction of exactly 1.0 is a pure insert, still a physical mixture.
    pub fn insert_volume_fraction(&self) -> CalibrationResult<f64> {
        let fraction = self.insert_concentration_g_cm3 / self.host_density_g_cm3;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(CalibrationError::InvalidMixtureFraction {
                concentration_g_cm3: self.insert_concentration_g_cm3,
                reference_density_g_cm3: self.host_density_g_cm3,
            });
        }
        Ok(fraction)
    }
}

/// Mixture LAC at one energy by the linear mixing rule (Bragg additivity):
/// the volume-fraction-weighted combination of the pure components, both
/// evaluated at that same energy.
pub fn mixture_lac(
    spec: MixtureSpec,
    insert: &MaterialLac,
    host: &MaterialLac,
    energy_kev: f64,
) -> CalibrationResult<f64> {
    let fraction = spec.insert_volume_fraction()?;
    let insert_lac = insert.value_at(energy_kev).value;
    let host_lac = host.value_at(energy_kev).value;
    Ok(fraction * insert_lac + (1.0 - fraction) * host_lac)
}

/// Mixture LAC sampled over a whole energy axis.
pub fn mixture_lac_curve(
    spec: MixtureSpec,
    insert: &MaterialLac,
    host: &MaterialLac,
    energies_kev: &[f64],
) -> CalibrationResult<Vec<f64>> {
    let fraction = spec.insert_volume_fraction()?;
    Ok(energies_kev
        .iter()
        .map(|&energy| {
            let insert_lac = insert.value_at(energy).value;
            let host_lac = host.value_at(energy).value;
            fraction * insert_lac + (1.0 - fraction) * host_lac
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{MixtureSpec, mixture_lac, mixture_lac_curve};
    use crate::domain::{CalibrationError, MaterialId};
    use crate::modules::materials::MaterialLac;

    fn calcium() -> MaterialLac {
        MaterialLac::new(
            MaterialId::new("calcium"),
            vec![40.0, 100.0],
            vec![1.00, 0.40],
        )
        .expect("test table should be valid")
    }

    fn myocardium() -> MaterialLac {
        MaterialLac::new(
            MaterialId::new("myocardium"),
            vec![40.0, 100.0],
            vec![0.26, 0.17],
        )
        .expect("test table should be valid")
    }

    #[test]
    fn calcium_insert_fractions_match_reference_numbers() {
        let spec = MixtureSpec::new(0.200, 1.050);
        let fraction = spec
            .insert_volume_fraction()
            .expect("fraction should be valid");
        assert!((fraction - 0.19047619047619047).abs() < 1e-12);

        let lac = mixture_lac(spec, &calcium(), &myocardium(), 100.0)
            .expect("mixture should evaluate");
        let expected = fraction * 0.40 + (1.0 - fraction) * 0.17;
        assert!((lac - expected).abs() < 1e-12);
    }

    #[test]
    fn mixture_lac_grows_with_concentration_when_insert_attenuates_more() {
        let concentrations = [0.200, 0.400, 0.800];
        let mut previous = f64::NEG_INFINITY;
        for concentration in concentrations {
            let spec = MixtureSpec::new(concentration, 1.050);
            let lac = mixture_lac(spec, &calcium(), &myocardium(), 70.0)
                .expect("mixture should evaluate");
            assert!(lac > previous, "LAC should increase with concentration");
            previous = lac;
        }
    }

    #[test]
    fn concentration_above_reference_density_is_rejected() {
        let spec = MixtureSpec::new(1.2, 1.050);
        let error = spec
            .insert_volume_fraction()
            .expect_err("fraction above 1 should be rejected");
        match error {
            CalibrationError::InvalidMixtureFraction {
                concentration_g_cm3,
                reference_density_g_cm3,
            } => {
                assert_eq!(concentration_g_cm3, 1.2);
                assert_eq!(reference_density_g_cm3, 1.050);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_concentration_is_rejected_with_the_fraction_bound_named() {
        let spec = MixtureSpec::new(-0.1, 1.050);
        let error = spec
            .insert_volume_fraction()
            .expect_err("negative fraction should be rejected");
        assert!(matches!(
            error,
            CalibrationError::InvalidMixtureFraction { .. }
        ));
        assert!(
            error.to_string().contains("outside 0..=1"),
            "message should state the fraction bound, was: {error}"
        );
    }

    #[test]
    fn concentration_equal_to_reference_density_is_a_pure_insert() {
        let spec = MixtureSpec::new(1.050, 1.050);
        let lac = mixture_lac(spec, &calcium(), &myocardium(), 40.0)
            .expect("boundary fraction 1.0 is valid");
        assert_eq!(lac, 1.00);
    }

    #[test]
    fn curve_matches_pointwise_evaluation() {
        let spec = MixtureSpec::new(0.400, 1.050);
        let energies = [40.0, 55.0, 70.0, 100.0];
        let curve = mixture_lac_curve(spec, &calcium(), &myocardium(), &energies)
            .expect("curve should evaluate");
        for (&energy, &value) in energies.iter().zip(curve.iter()) {
            let pointwise = mixture_lac(spec, &calcium(), &myocardium(), energy)
                .expect("pointwise should evaluate");
            assert_eq!(value, pointwise);
        }
    }
}
