//! Polyenergetic CT spectral calibration.
//!
//! Converts tabulated per-kVp X-ray source spectra and per-material
//! monoenergetic linear attenuation coefficients into calibrated Hounsfield
//! Unit tables: spectra are resampled onto a common energy axis, integrated
//! into per-setting effective energies, and each material's attenuation at
//! those energies is normalized against water. The resulting HU fills feed
//! an external phantom builder; projection and FDK reconstruction live
//! behind that collaborator as well and are not implemented here.
//!
//! Every stage is a pure transform over immutable tabulated inputs; the only
//! I/O is the initial table load.

pub mod domain;
pub mod modules;
pub mod numerics;
