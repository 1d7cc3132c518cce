use crate::domain::{ImageGeometry, MaterialId};
use serde::{Deserialize, Serialize};

/// Analytic shape descriptor handed to the external phantom builder.
///
/// Positions and sizes are in mm in the image frame. Each shape is tagged
/// with the material that fills it; the HU fill value is resolved from a
/// computed HU table before the recipe is handed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Cylinder {
        material: MaterialId,
        center_mm: [f64; 3],
        radius_mm: f64,
        height_mm: f64,
    },
    Cuboid {
        material: MaterialId,
        center_mm: [f64; 3],
        extent_mm: [f64; 3],
    },
}

impl ShapeSpec {
    pub fn material(&self) -> &MaterialId {
        match self {
            Self::Cylinder { material, .. } | Self::Cuboid { material, .. } => material,
        }
    }
}

/// A shape descriptor with its material resolved to a concrete HU fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedShape {
    pub shape: ShapeSpec,
    pub hu_fill: f64,
}

/// Voxel grid plus the analytic shapes to rasterize onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhantomRecipe {
    pub image: ImageGeometry,
    pub shapes: Vec<ShapeSpec>,
}

impl PhantomRecipe {
    /// Materials referenced by the recipe, deduplicated, in first-use order.
    pub fn materials(&self) -> Vec<MaterialId> {
        let mut seen = Vec::new();
        for shape in &self.shapes {
            let material = shape.material();
            if !seen.contains(material) {
                seen.push(material.clone());
            }
        }
        seen
    }
}
