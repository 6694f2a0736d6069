use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Edge-only geometry stored as a line list: every consecutive pair of
/// positions is one segment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireGeometry {
    positions: Vec<Vec3>,
}

impl WireGeometry {
    pub fn from_segments(segments: impl IntoIterator<Item = (Vec3, Vec3)>) -> Self {
        let positions = segments.into_iter().flat_map(|(a, b)| [a, b]).collect();
        Self { positions }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.positions.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Flattened xyz for vertex upload
    pub fn vertex_data(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Torus wireframe in the XY plane: the tube circle is swept around Z.
///
/// The surface is a periodic grid of `radial x tubular` vertices. Each grid
/// cell contributes its two leading edges plus one diagonal, which matches the
/// edge set of a triangulated torus.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> WireGeometry {
    let (radial, tubular) = (radial_segments as usize, tubular_segments as usize);
    if radial == 0 || tubular == 0 {
        return WireGeometry::default();
    }

    let vertex = |j: usize, i: usize| -> Vec3 {
        let v = (j % radial) as f32 / radial as f32 * TAU;
        let u = (i % tubular) as f32 / tubular as f32 * TAU;
        let ring = radius + tube * v.cos();
        Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin())
    };

    let mut segments = Vec::with_capacity(radial * tubular * 3);
    for j in 0..radial {
        for i in 0..tubular {
            let here = vertex(j, i);
            let along_tube = vertex(j, i + 1);
            let around_tube = vertex(j + 1, i);
            segments.push((here, along_tube));
            segments.push((here, around_tube));
            segments.push((around_tube, along_tube));
        }
    }

    WireGeometry::from_segments(segments)
}

/// UV sphere wireframe: meridians pole to pole plus the interior latitude
/// rings (the pole rings are degenerate and skipped)
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> WireGeometry {
    let (width, height) = (width_segments as usize, height_segments as usize);
    if width < 3 || height < 2 {
        return WireGeometry::default();
    }

    let vertex = |row: usize, col: usize| -> Vec3 {
        let phi = (col % width) as f32 / width as f32 * TAU;
        let theta = row as f32 / height as f32 * PI;
        Vec3::new(
            -radius * phi.cos() * theta.sin(),
            radius * theta.cos(),
            radius * phi.sin() * theta.sin(),
        )
    };

    let mut segments = Vec::with_capacity(width * height * 2);
    for col in 0..width {
        for row in 0..height {
            segments.push((vertex(row, col), vertex(row + 1, col)));
        }
    }
    for row in 1..height {
        for col in 0..width {
            segments.push((vertex(row, col), vertex(row, col + 1)));
        }
    }

    WireGeometry::from_segments(segments)
}

/// Points of the decorative connecting loop: a circle whose radius wobbles
/// three times per turn and whose depth oscillates twice per turn
pub fn connecting_loop_points(count: u32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            let r = 3.0 + (angle * 3.0).sin() * 0.5;
            Vec3::new(angle.cos() * r, angle.sin() * r, (angle * 2.0).sin() * 0.5)
        })
        .collect()
}

/// Closed polyline through `points`; the last point joins the first
pub fn closed_polyline(points: &[Vec3]) -> WireGeometry {
    if points.len() < 2 {
        return WireGeometry::default();
    }
    WireGeometry::from_segments(
        (0..points.len()).map(|i| (points[i], points[(i + 1) % points.len()])),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_edge_count_and_extent() {
        let torus = torus(5.0, 2.8, 16, 100);
        assert_eq!(torus.segment_count(), 3 * 16 * 100);

        let max_xy = torus
            .positions()
            .iter()
            .map(|p| p.truncate().length())
            .fold(0.0f32, f32::max);
        let max_z = torus.positions().iter().map(|p| p.z.abs()).fold(0.0f32, f32::max);
        assert!((max_xy - 7.8).abs() < 1e-3);
        assert!(max_z <= 2.8 + 1e-4);
    }

    #[test]
    fn torus_degenerate_segments_are_empty() {
        assert!(torus(5.0, 2.8, 0, 100).is_empty());
        assert!(torus(5.0, 2.8, 16, 0).is_empty());
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sphere = sphere(0.015, 8, 20);
        assert_eq!(sphere.segment_count(), 8 * 20 + 19 * 8);
        for p in sphere.positions() {
            assert!((p.length() - 0.015).abs() < 1e-6);
        }
    }

    #[test]
    fn loop_radius_follows_wobble() {
        let points = connecting_loop_points(50);
        assert_eq!(points.len(), 50);
        // angle 0: r = 3, z = 0
        assert!((points[0] - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-6);
        for p in &points {
            let r = p.truncate().length();
            assert!((2.5 - 1e-4..=3.5 + 1e-4).contains(&r));
            assert!(p.z.abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn closed_polyline_wraps_to_start() {
        let points = connecting_loop_points(50);
        let line = closed_polyline(&points);
        assert_eq!(line.segment_count(), 50);

        let (last_start, last_end) = line.segments().last().unwrap();
        assert_eq!(last_start, points[49]);
        assert_eq!(last_end, points[0]);
    }

    #[test]
    fn vertex_data_matches_positions() {
        let line = closed_polyline(&[Vec3::X, Vec3::Y, Vec3::Z]);
        let data = line.vertex_data();
        assert_eq!(data.len(), 6);
        assert_eq!(data[0], [1.0, 0.0, 0.0]);
        assert_eq!(data[5], [1.0, 0.0, 0.0]);
    }
}
