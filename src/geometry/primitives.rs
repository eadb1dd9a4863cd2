//! Face and cell geometry of polyhedral meshes.
//!
//! Faces are decomposed into triangles about their vertex average, cells into
//! pyramids about an estimated centre built from their face centres.

use nalgebra::{Point3, Vector3};

const VSMALL: f64 = 1e-300;

/// Centre and area vector of one polygonal face.
///
/// The area vector follows the right-hand rule over the vertex order.
pub fn face_centre_and_area(points: &[Point3<f64>], face: &[usize]) -> (Point3<f64>, Vector3<f64>) {
    let n = face.len();
    if n == 3 {
        let (a, b, c) = (points[face[0]], points[face[1]], points[face[2]]);
        let centre = Point3::from((a.coords + b.coords + c.coords) / 3.0);
        let area = 0.5 * (b - a).cross(&(c - a));
        return (centre, area);
    }

    let mut estimate = Vector3::zeros();
    for &p in face {
        estimate += points[p].coords;
    }
    let estimate = Point3::from(estimate / n.max(1) as f64);

    let mut sum_n = Vector3::zeros();
    let mut sum_a = 0.0;
    let mut sum_ac = Vector3::zeros();
    for i in 0..n {
        let this = points[face[i]];
        let next = points[face[(i + 1) % n]];
        let centroid3 = this.coords + next.coords + estimate.coords;
        let normal = (next - this).cross(&(estimate - this));
        let area = normal.norm();
        sum_n += normal;
        sum_a += area;
        sum_ac += area * centroid3;
    }

    let centre = if sum_a < VSMALL {
        estimate
    } else {
        Point3::from(sum_ac / (3.0 * sum_a))
    };
    (centre, 0.5 * sum_n)
}

/// Cell centres and volumes from face geometry and owner/neighbour addressing.
pub fn cell_centres_and_volumes(
    n_cells: usize,
    face_centres: &[Point3<f64>],
    face_areas: &[Vector3<f64>],
    owner: &[usize],
    neighbour: &[usize],
) -> (Vec<Point3<f64>>, Vec<f64>) {
    let mut estimate = vec![Vector3::zeros(); n_cells];
    let mut n_faces = vec![0usize; n_cells];
    for (face, &cell) in owner.iter().enumerate() {
        estimate[cell] += face_centres[face].coords;
        n_faces[cell] += 1;
    }
    for (face, &cell) in neighbour.iter().enumerate() {
        estimate[cell] += face_centres[face].coords;
        n_faces[cell] += 1;
    }
    for (e, &count) in estimate.iter_mut().zip(&n_faces) {
        if count > 0 {
            *e /= count as f64;
        }
    }

    let mut weighted = vec![Vector3::zeros(); n_cells];
    let mut volume3 = vec![0.0; n_cells];
    let mut add_pyramid = |cell: usize, face: usize, outward: f64| {
        let cf = face_centres[face].coords;
        let pyr3_vol = (outward * face_areas[face].dot(&(cf - estimate[cell]))).max(VSMALL);
        let pyr_centre = 0.75 * cf + 0.25 * estimate[cell];
        weighted[cell] += pyr3_vol * pyr_centre;
        volume3[cell] += pyr3_vol;
    };
    for (face, &cell) in owner.iter().enumerate() {
        add_pyramid(cell, face, 1.0);
    }
    for (face, &cell) in neighbour.iter().enumerate() {
        add_pyramid(cell, face, -1.0);
    }

    let centres = weighted
        .iter()
        .zip(&volume3)
        .zip(&estimate)
        .map(|((w, &v3), e)| {
            if v3 > VSMALL {
                Point3::from(*w / v3)
            } else {
                Point3::from(*e)
            }
        })
        .collect();
    let volumes = volume3.iter().map(|v3| v3 / 3.0).collect();
    (centres, volumes)
}
