//! Point arena and quad triangulation.
//!
//! Points live in a [`SlotMap`] and are addressed by [`PointId`]. Triangles
//! hold ids, never copies, so moving a point is immediately visible in every
//! triangle that references it. A separate id list keeps insertion order,
//! which is what polygon indices and picking refer to.

use glam::Vec2;
use slotmap::SlotMap;

use crate::canvas::Canvas;
use crate::config::SceneConfig;
use crate::error::{EditorError, Result};
use crate::point::{Point, PointId};

/// Floats per vertex in the interleaved buffer: `x, y, z, r, g, b`.
pub const FLOATS_PER_VERTEX: usize = 6;

/// Floats per triangle in the interleaved buffer.
pub const FLOATS_PER_TRIANGLE: usize = 3 * FLOATS_PER_VERTEX;

/// Number of point indices accepted by [`GeometryStore::add_polygon`].
pub const QUAD_ARITY: usize = 4;

/// Stable handle to a triangle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TriangleId(pub(crate) usize);

/// Three point references in winding order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Triangle {
    pub vertices: [PointId; 3],
}

/// Owns the points and the triangles derived from quads.
#[derive(Debug, Clone)]
pub struct GeometryStore {
    canvas: Canvas,
    points: SlotMap<PointId, Point>,
    order: Vec<PointId>,
    triangles: Vec<Triangle>,
}

impl GeometryStore {
    /// Creates an empty store for a fixed canvas.
    pub fn new(canvas: Canvas) -> Result<Self> {
        if !canvas.is_valid() {
            return Err(EditorError::out_of_bounds(format!(
                "canvas size {}x{} must be positive and finite",
                canvas.width, canvas.height
            )));
        }

        Ok(Self {
            canvas,
            points: SlotMap::with_key(),
            order: Vec::new(),
            triangles: Vec::new(),
        })
    }

    /// Builds a store from startup configuration.
    ///
    /// Points are added first, then polygons, both in configuration order.
    /// The first invalid entry aborts construction.
    pub fn from_config(config: &SceneConfig) -> Result<Self> {
        let mut store = Self::new(config.canvas)?;

        for spec in &config.points {
            store.add_point(Vec2::new(spec.x, spec.y), [spec.r, spec.g, spec.b])?;
        }
        for quad in &config.polygons {
            store.add_polygon(quad)?;
        }

        log::debug!(
            "geometry store built: {} points, {} triangles",
            store.point_count(),
            store.triangle_count()
        );

        Ok(store)
    }

    #[inline]
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Creates a point at a device-space position with an 8-bit style color.
    pub fn add_point(&mut self, device: Vec2, rgb: [f32; 3]) -> Result<PointId> {
        let mut point = Point::from_device(device, self.canvas)?;
        point.set_color(rgb[0], rgb[1], rgb[2])?;

        let id = self.points.insert(point);
        self.order.push(id);
        Ok(id)
    }

    /// Splits a quad into the triangles `(0, 1, 2)` and `(0, 2, 3)`.
    ///
    /// Indices need not be distinct. Nothing is inserted unless the whole
    /// quad is valid.
    pub fn add_polygon(&mut self, indices: &[usize]) -> Result<[TriangleId; 2]> {
        if indices.len() != QUAD_ARITY {
            return Err(EditorError::invalid_polygon(format!(
                "expected {QUAD_ARITY} point indices, got {}",
                indices.len()
            )));
        }

        if let Some(&bad) = indices.iter().find(|&&i| i >= self.order.len()) {
            return Err(EditorError::invalid_polygon(format!(
                "point index {bad} out of range (have {} points)",
                self.order.len()
            )));
        }

        let [a, b, c, d] = [indices[0], indices[1], indices[2], indices[3]].map(|i| self.order[i]);

        let first = TriangleId(self.triangles.len());
        self.triangles.push(Triangle { vertices: [a, b, c] });
        let second = TriangleId(self.triangles.len());
        self.triangles.push(Triangle { vertices: [a, c, d] });

        Ok([first, second])
    }

    #[inline]
    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    /// Id of the `index`-th inserted point.
    #[inline]
    pub fn point_id(&self, index: usize) -> Option<PointId> {
        self.order.get(index).copied()
    }

    /// Insertion index of `id`, the inverse of [`point_id`](Self::point_id).
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.order.iter().position(|&o| o == id)
    }

    /// Points in insertion order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &Point> + '_ {
        self.order.iter().map(|&id| &self.points[id])
    }

    /// Points paired with their ids, in insertion order.
    pub fn iter_points(&self) -> impl ExactSizeIterator<Item = (PointId, &Point)> + '_ {
        self.order.iter().map(|&id| (id, &self.points[id]))
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Moves a point. Returns `false` for an unknown id.
    pub(crate) fn set_point_position(&mut self, id: PointId, position: Vec2) -> bool {
        match self.points.get_mut(id) {
            Some(p) => {
                p.position = position;
                true
            }
            None => false,
        }
    }

    /// Builds the interleaved vertex buffer (18 floats per triangle).
    pub fn vertex_buffer(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.triangles.len() * FLOATS_PER_TRIANGLE);
        self.write_vertex_buffer(&mut out);
        out
    }

    /// Same as [`vertex_buffer`](Self::vertex_buffer) but reuses `out`.
    ///
    /// `out` is cleared first; its capacity is kept.
    pub fn write_vertex_buffer(&self, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.triangles.len() * FLOATS_PER_TRIANGLE);

        for tri in &self.triangles {
            for id in tri.vertices {
                // Ids are only created by this store and points are never removed.
                if let Some(p) = self.points.get(id) {
                    out.extend_from_slice(&p.vertex());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_store() -> GeometryStore {
        let mut s = GeometryStore::new(Canvas::new(400.0, 400.0)).unwrap();
        s.add_point(Vec2::new(100.0, 100.0), [255.0, 0.0, 0.0]).unwrap();
        s.add_point(Vec2::new(300.0, 100.0), [0.0, 255.0, 0.0]).unwrap();
        s.add_point(Vec2::new(300.0, 300.0), [0.0, 0.0, 255.0]).unwrap();
        s.add_point(Vec2::new(100.0, 300.0), [255.0, 255.0, 0.0]).unwrap();
        s
    }

    // ── add_point ─────────────────────────────────────────────────────────

    #[test]
    fn add_point_ids_resolve_by_insertion_index() {
        let mut s = square_store();
        let fifth = s.add_point(Vec2::new(200.0, 200.0), [0.0; 3]).unwrap();

        assert_eq!(s.point_count(), 5);
        assert_eq!(s.point_id(4), Some(fifth));
        assert_eq!(s.index_of(fifth), Some(4));
        assert_eq!(s.point_id(5), None);

        let indices: Vec<Option<usize>> = s.iter_points().map(|(id, _)| s.index_of(id)).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn points_iterate_in_insertion_order() {
        let s = square_store();
        let xs: Vec<f32> = s.points().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![-0.5, 0.5, 0.5, -0.5]);
        for (i, (id, p)) in s.iter_points().enumerate() {
            assert_eq!(s.point_id(i), Some(id));
            assert_eq!(s.point(id), Some(p));
        }
    }

    #[test]
    fn add_point_with_bad_color_inserts_nothing() {
        let mut s = square_store();
        let err = s.add_point(Vec2::new(10.0, 10.0), [0.0, 300.0, 0.0]).unwrap_err();
        assert!(matches!(err, EditorError::OutOfBounds(_)));
        assert_eq!(s.point_count(), 4);
    }

    #[test]
    fn invalid_canvas_is_rejected() {
        assert!(GeometryStore::new(Canvas::new(0.0, 100.0)).is_err());
    }

    // ── add_polygon ───────────────────────────────────────────────────────

    #[test]
    fn add_polygon_shares_diagonal_zero_two() {
        let mut s = square_store();
        s.add_polygon(&[3, 2, 1, 0]).unwrap();
        let id = |i| s.point_id(i).unwrap();
        let t = s.triangles();
        assert_eq!(t[0].vertices, [id(3), id(2), id(1)]);
        assert_eq!(t[1].vertices, [id(3), id(1), id(0)]);
    }

    #[test]
    fn add_polygon_allows_repeated_indices() {
        let mut s = square_store();
        s.add_polygon(&[0, 0, 1, 1]).unwrap();
        assert_eq!(s.triangle_count(), 2);
    }

    #[test]
    fn add_polygon_rejects_wrong_arity() {
        let mut s = square_store();
        assert!(matches!(s.add_polygon(&[0, 1, 2]), Err(EditorError::InvalidPolygon(_))));
        assert!(matches!(s.add_polygon(&[0, 1, 2, 3, 0]), Err(EditorError::InvalidPolygon(_))));
        assert_eq!(s.triangle_count(), 0);
    }

    #[test]
    fn add_polygon_rejects_out_of_range_index_without_partial_insert() {
        let mut s = square_store();
        s.add_polygon(&[0, 1, 2, 3]).unwrap();
        assert!(matches!(s.add_polygon(&[0, 1, 2, 4]), Err(EditorError::InvalidPolygon(_))));
        assert_eq!(s.triangle_count(), 2);
    }

    // ── vertex buffer ─────────────────────────────────────────────────────

    #[test]
    fn vertex_buffer_follows_triangle_then_vertex_order() {
        let mut s = square_store();
        s.add_polygon(&[0, 1, 2, 3]).unwrap();
        let buf = s.vertex_buffer();
        assert_eq!(buf.len(), 2 * FLOATS_PER_TRIANGLE);

        // Triangle (0, 2, 3) starts at float 18 with point 0.
        assert_eq!(&buf[18..24], &[-0.5, 0.5, 0.0, 1.0, 0.0, 0.0]);
        // ... and its third vertex is point 3.
        assert_eq!(&buf[30..36], &[-0.5, -0.5, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn vertex_buffer_reflects_moved_points_everywhere() {
        let mut s = square_store();
        s.add_polygon(&[0, 1, 2, 3]).unwrap();
        let id = s.point_id(2).unwrap();
        assert!(s.set_point_position(id, Vec2::new(0.9, -0.9)));

        let buf = s.vertex_buffer();
        // Point 2 is vertex 2 of triangle 0 and vertex 1 of triangle 1.
        assert_eq!(&buf[12..14], &[0.9, -0.9]);
        assert_eq!(&buf[24..26], &[0.9, -0.9]);
    }

    #[test]
    fn write_vertex_buffer_clears_previous_contents() {
        let mut s = square_store();
        s.add_polygon(&[0, 1, 2, 3]).unwrap();
        let mut out = vec![42.0; 100];
        s.write_vertex_buffer(&mut out);
        assert_eq!(out.len(), 36);
        assert_eq!(out, s.vertex_buffer());
    }

    #[test]
    fn set_point_position_ignores_unknown_id() {
        let mut s = square_store();
        assert!(!s.set_point_position(PointId::default(), Vec2::ZERO));
    }
}
