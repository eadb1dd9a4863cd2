//! Structured hexahedral block meshes.

use nalgebra::{Point3, Vector3};

use crate::mesh_error::MeshRemapError;
use crate::topology::poly_mesh::{BoundaryPatch, PatchKind, PolyMesh, PolyMeshParts};

/// Patch name for the minimum-x side.
pub const BOUNDARY_X_MIN: &str = "x_min";
/// Patch name for the maximum-x side.
pub const BOUNDARY_X_MAX: &str = "x_max";
/// Patch name for the minimum-y side.
pub const BOUNDARY_Y_MIN: &str = "y_min";
/// Patch name for the maximum-y side.
pub const BOUNDARY_Y_MAX: &str = "y_max";
/// Patch name for the minimum-z side.
pub const BOUNDARY_Z_MIN: &str = "z_min";
/// Patch name for the maximum-z side.
pub const BOUNDARY_Z_MAX: &str = "z_max";

/// Cell counts, origin and cell size of a block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockSpec {
    pub cells: [usize; 3],
    pub origin: Point3<f64>,
    pub spacing: Vector3<f64>,
}

impl BlockSpec {
    /// Unit cells starting at the origin.
    pub fn new(cells: [usize; 3]) -> Self {
        Self {
            cells,
            origin: Point3::origin(),
            spacing: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_spacing(mut self, spacing: Vector3<f64>) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Build a block of `nx × ny × nz` hexahedra.
///
/// Internal faces are ordered by owner then neighbour; boundary faces are
/// grouped into the six patches in `x_min, x_max, y_min, y_max, z_min, z_max`
/// order, all pointing outward.
pub fn block_mesh(block: &BlockSpec) -> Result<PolyMesh, MeshRemapError> {
    let [nx, ny, nz] = block.cells;
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(MeshRemapError::InvalidGeometry(format!(
            "block needs at least one cell per direction, got {nx}x{ny}x{nz}"
        )));
    }
    if block.spacing.iter().any(|h| *h <= 0.0) {
        return Err(MeshRemapError::InvalidGeometry(
            "block spacing must be positive".into(),
        ));
    }

    let pt = |i: usize, j: usize, k: usize| i + (nx + 1) * (j + (ny + 1) * k);
    let cell = |i: usize, j: usize, k: usize| i + nx * (j + ny * k);

    let mut points = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                points.push(Point3::new(
                    block.origin.x + i as f64 * block.spacing.x,
                    block.origin.y + j as f64 * block.spacing.y,
                    block.origin.z + k as f64 * block.spacing.z,
                ));
            }
        }
    }

    // face vertex loops whose right-hand normal points in +x, +y, +z
    let x_face = |i: usize, j: usize, k: usize| {
        vec![pt(i, j, k), pt(i, j + 1, k), pt(i, j + 1, k + 1), pt(i, j, k + 1)]
    };
    let y_face = |i: usize, j: usize, k: usize| {
        vec![pt(i, j, k), pt(i, j, k + 1), pt(i + 1, j, k + 1), pt(i + 1, j, k)]
    };
    let z_face = |i: usize, j: usize, k: usize| {
        vec![pt(i, j, k), pt(i + 1, j, k), pt(i + 1, j + 1, k), pt(i, j + 1, k)]
    };
    let reversed = |mut f: Vec<usize>| {
        f.reverse();
        f
    };

    let mut faces = Vec::new();
    let mut owner = Vec::new();
    let mut neighbour = Vec::new();

    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let c = cell(i, j, k);
                if i + 1 < nx {
                    faces.push(x_face(i + 1, j, k));
                    owner.push(c);
                    neighbour.push(cell(i + 1, j, k));
                }
                if j + 1 < ny {
                    faces.push(y_face(i, j + 1, k));
                    owner.push(c);
                    neighbour.push(cell(i, j + 1, k));
                }
                if k + 1 < nz {
                    faces.push(z_face(i, j, k + 1));
                    owner.push(c);
                    neighbour.push(cell(i, j, k + 1));
                }
            }
        }
    }

    let mut patches = Vec::with_capacity(6);
    let mut add_patch = |name: &str, entries: Vec<(Vec<usize>, usize)>| {
        patches.push(BoundaryPatch::new(
            name,
            faces.len(),
            entries.len(),
            PatchKind::Physical,
        ));
        for (f, c) in entries {
            faces.push(f);
            owner.push(c);
        }
    };

    let mut x_min = Vec::new();
    let mut x_max = Vec::new();
    for k in 0..nz {
        for j in 0..ny {
            x_min.push((reversed(x_face(0, j, k)), cell(0, j, k)));
            x_max.push((x_face(nx, j, k), cell(nx - 1, j, k)));
        }
    }
    let mut y_min = Vec::new();
    let mut y_max = Vec::new();
    for k in 0..nz {
        for i in 0..nx {
            y_min.push((reversed(y_face(i, 0, k)), cell(i, 0, k)));
            y_max.push((y_face(i, ny, k), cell(i, ny - 1, k)));
        }
    }
    let mut z_min = Vec::new();
    let mut z_max = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            z_min.push((reversed(z_face(i, j, 0)), cell(i, j, 0)));
            z_max.push((z_face(i, j, nz), cell(i, j, nz - 1)));
        }
    }
    add_patch(BOUNDARY_X_MIN, x_min);
    add_patch(BOUNDARY_X_MAX, x_max);
    add_patch(BOUNDARY_Y_MIN, y_min);
    add_patch(BOUNDARY_Y_MAX, y_max);
    add_patch(BOUNDARY_Z_MIN, z_min);
    add_patch(BOUNDARY_Z_MAX, z_max);

    PolyMesh::from_parts(PolyMeshParts {
        points,
        faces,
        owner,
        neighbour,
        patches,
    })
}
