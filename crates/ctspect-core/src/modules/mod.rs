pub mod calibration;
pub mod hu;
pub mod materials;
pub mod spectral;
pub mod spectrum;
