use serde::{Deserialize, Serialize};

/// Flat description of a circular-orbit fan/cone-beam scanner.
///
/// Consumed as-is by the external projector and FDK reconstructor; this crate
/// only assembles and forwards it, no field is interpreted here beyond
/// serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerGeometry {
    /// Distance from the X-ray source to the rotation axis, in mm.
    pub source_to_axis_mm: f64,
    /// Distance from the X-ray source to the detector plane, in mm.
    pub source_to_detector_mm: f64,
    /// Detector element count along the fan direction.
    pub detector_columns: usize,
    /// Detector element count along the cone direction.
    pub detector_rows: usize,
    /// Detector element pitch in mm (square elements).
    pub detector_pixel_mm: f64,
    /// Number of projection views over one full rotation.
    pub views_per_rotation: usize,
}

impl ScannerGeometry {
    /// Geometric magnification at the rotation axis.
    pub fn magnification(&self) -> f64 {
        self.source_to_detector_mm / self.source_to_axis_mm
    }
}

/// Voxel grid the phantom is rasterized onto and the FDK output lives on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGeometry {
    /// Voxel counts along (x, y, z).
    pub voxels: [usize; 3],
    /// Voxel edge lengths along (x, y, z), in mm.
    pub voxel_size_mm: [f64; 3],
}

impl ImageGeometry {
    /// Physical extent of the grid along each axis, in mm.
    pub fn extent_mm(&self) -> [f64; 3] {
        [
            self.voxels[0] as f64 * self.voxel_size_mm[0],
            self.voxels[1] as f64 * self.voxel_size_mm[1],
            self.voxels[2] as f64 * self.voxel_size_mm[2],
        ]
    }
}
