//! 批量绘制列表
//!
//! 把所有绘制调用合并成三组缓冲：
//! - 线段列表（`LineList` 拓扑）
//! - 三角形列表（`TriangleList` 拓扑）
//! - 点精灵实例
//!
//! 顶点坐标转换为 `f32`，可以直接用 `bytemuck` 上传到 GPU。

use crate::renderer::Renderer;
use crate::style::Color;
use crate::vertex::{PointVertex, SceneVertex};
use tokgeom_core::math::{BoundingBox3, Point3, Vector3, EPSILON};

/// 箭头头部长度占箭头总长的比例
const ARROW_HEAD_RATIO: f64 = 0.25;
/// 箭头头部半宽占箭头总长的比例
const ARROW_HEAD_WIDTH: f64 = 0.1;

fn to_f32(p: &Point3) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}

/// 一组可以直接上传并绘制的缓冲
#[derive(Debug, Clone)]
pub struct DrawBatch<'a> {
    pub label: &'static str,
    pub topology: wgpu::PrimitiveTopology,
    pub layout: wgpu::VertexBufferLayout<'static>,
    pub vertex_bytes: &'a [u8],
    /// 点精灵按实例绘制，没有索引
    pub index_bytes: &'a [u8],
    /// 索引数，无索引时为实例数
    pub element_count: u32,
}

/// 批量绘制列表
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    line_vertices: Vec<SceneVertex>,
    line_indices: Vec<u32>,
    mesh_vertices: Vec<SceneVertex>,
    mesh_indices: Vec<u32>,
    points: Vec<PointVertex>,
    bounds: BoundingBox3,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 清空所有缓冲
    pub fn clear(&mut self) {
        self.line_vertices.clear();
        self.line_indices.clear();
        self.mesh_vertices.clear();
        self.mesh_indices.clear();
        self.points.clear();
        self.bounds = BoundingBox3::empty();
    }

    pub fn is_empty(&self) -> bool {
        self.line_indices.is_empty() && self.mesh_indices.is_empty() && self.points.is_empty()
    }

    /// 线段数量
    pub fn line_segment_count(&self) -> usize {
        self.line_indices.len() / 2
    }

    /// 三角形数量
    pub fn triangle_count(&self) -> usize {
        self.mesh_indices.len() / 3
    }

    /// 点数量
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// 场景包围盒
    pub fn bounds(&self) -> &BoundingBox3 {
        &self.bounds
    }

    pub fn line_vertices(&self) -> &[SceneVertex] {
        &self.line_vertices
    }

    pub fn line_indices(&self) -> &[u32] {
        &self.line_indices
    }

    pub fn mesh_vertices(&self) -> &[SceneVertex] {
        &self.mesh_vertices
    }

    pub fn mesh_indices(&self) -> &[u32] {
        &self.mesh_indices
    }

    pub fn points(&self) -> &[PointVertex] {
        &self.points
    }

    /// 线条顶点缓冲的字节视图
    pub fn line_vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.line_vertices)
    }

    /// 网格顶点缓冲的字节视图
    pub fn mesh_vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.mesh_vertices)
    }

    /// 点实例缓冲的字节视图
    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// 非空的绘制批次：线段、三角形、点精灵
    pub fn batches(&self) -> Vec<DrawBatch<'_>> {
        let mut batches = Vec::with_capacity(3);
        if !self.line_indices.is_empty() {
            batches.push(DrawBatch {
                label: "lines",
                topology: wgpu::PrimitiveTopology::LineList,
                layout: SceneVertex::desc(),
                vertex_bytes: self.line_vertex_bytes(),
                index_bytes: bytemuck::cast_slice(&self.line_indices),
                element_count: self.line_indices.len() as u32,
            });
        }
        if !self.mesh_indices.is_empty() {
            batches.push(DrawBatch {
                label: "meshes",
                topology: wgpu::PrimitiveTopology::TriangleList,
                layout: SceneVertex::desc(),
                vertex_bytes: self.mesh_vertex_bytes(),
                index_bytes: bytemuck::cast_slice(&self.mesh_indices),
                element_count: self.mesh_indices.len() as u32,
            });
        }
        if !self.points.is_empty() {
            batches.push(DrawBatch {
                label: "points",
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                layout: PointVertex::desc(),
                vertex_bytes: self.point_bytes(),
                index_bytes: &[],
                element_count: self.points.len() as u32,
            });
        }
        batches
    }

    fn push_line_vertex(&mut self, p: &Point3, color: Color) -> u32 {
        self.bounds.expand_to_include(p);
        let index = self.line_vertices.len() as u32;
        self.line_vertices.push(SceneVertex::new(to_f32(p), color));
        index
    }

    fn push_segment(&mut self, a: &Point3, b: &Point3, color: Color) {
        let ia = self.push_line_vertex(a, color);
        let ib = self.push_line_vertex(b, color);
        self.line_indices.extend([ia, ib]);
    }
}

/// 与方向垂直的单位向量
fn perpendicular(direction: &Vector3) -> Vector3 {
    let candidate = direction.cross(&Vector3::z());
    if candidate.norm() > EPSILON {
        candidate.normalize()
    } else {
        direction.cross(&Vector3::x()).normalize()
    }
}

impl Renderer for DrawList {
    fn draw_points(&mut self, points: &[Point3], size: f32, color: Color) {
        for p in points {
            self.bounds.expand_to_include(p);
            self.points.push(PointVertex::new(to_f32(p), size, color));
        }
    }

    fn draw_polyline(&mut self, points: &[Point3], closed: bool, color: Color) {
        if points.len() < 2 {
            return;
        }
        let base = self.line_vertices.len() as u32;
        for p in points {
            self.push_line_vertex(p, color);
        }
        let n = points.len() as u32;
        for i in 0..n - 1 {
            self.line_indices.extend([base + i, base + i + 1]);
        }
        if closed && n > 2 {
            self.line_indices.extend([base + n - 1, base]);
        }
    }

    fn draw_mesh(&mut self, vertices: &[Point3], triangles: &[[u32; 3]], color: Color) {
        let base = self.mesh_vertices.len() as u32;
        for p in vertices {
            self.bounds.expand_to_include(p);
            self.mesh_vertices.push(SceneVertex::new(to_f32(p), color));
        }
        self.mesh_indices
            .extend(triangles.iter().flat_map(|t| t.map(|i| base + i)));
    }

    /// 每个箭头由杆和两条倒钩组成
    fn draw_arrows(&mut self, anchors: &[Point3], directions: &[Vector3], magnitude: f64, color: Color) {
        for (anchor, direction) in anchors.iter().zip(directions) {
            let norm = direction.norm();
            if !norm.is_finite() || norm <= EPSILON {
                continue;
            }
            let unit = direction / norm;
            let tip = anchor + unit * magnitude;
            let side = perpendicular(&unit) * (magnitude * ARROW_HEAD_WIDTH);
            let back = tip - unit * (magnitude * ARROW_HEAD_RATIO);

            self.push_segment(anchor, &tip, color);
            self.push_segment(&tip, &(back + side), color);
            self.push_segment(&tip, &(back - side), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render_primitives;
    use crate::style::Style;
    use tokgeom_core::math::{approx_eq, Point2};
    use tokgeom_core::primitive::{PolygonMesh, Primitive, VectorField};
    use tokgeom_core::transform::revolve;

    const WHITE: Color = [1.0; 4];

    #[test]
    fn test_polyline_batching() {
        let mut list = DrawList::new();
        let square = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        list.draw_polyline(&square, false, WHITE);
        assert_eq!(list.line_segment_count(), 3);

        list.draw_polyline(&square, true, WHITE);
        assert_eq!(list.line_segment_count(), 7);
        // 第二条折线的索引从自己的顶点开始
        assert_eq!(&list.line_indices()[6..8], &[4, 5]);
        assert_eq!(&list.line_indices()[12..14], &[7, 4]);

        list.draw_polyline(&square[..1], false, WHITE);
        assert_eq!(list.line_segment_count(), 7);
    }

    #[test]
    fn test_mesh_offsets() {
        let mut list = DrawList::new();
        let tri = [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        list.draw_mesh(&tri, &[[0, 1, 2]], WHITE);
        list.draw_mesh(&tri, &[[0, 2, 1]], WHITE);
        assert_eq!(list.triangle_count(), 2);
        assert_eq!(list.mesh_indices(), &[0, 1, 2, 3, 5, 4]);
        assert_eq!(list.mesh_vertex_bytes().len(), 6 * 28);
    }

    #[test]
    fn test_arrow_glyphs() {
        let field = VectorField::new(
            vec![Point3::new(1.0, 2.0, 3.0), Point3::origin()],
            vec![Vector3::z(), Vector3::x()],
        )
        .unwrap();

        let mut list = DrawList::new();
        render_primitives(&mut list, &[Primitive::VectorField(field)], &Style::default());

        assert_eq!(list.point_count(), 2);
        assert_eq!(list.points()[0].size, 8.0);
        assert_eq!(list.line_segment_count(), 6);

        let labels: Vec<_> = list.batches().iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["lines", "points"]);
        assert_eq!(list.batches()[1].layout.step_mode, wgpu::VertexStepMode::Instance);

        // 杆的终点：锚点 + 0.6 · 方向
        let tip = list.line_vertices()[1].position;
        assert!((tip[2] - 3.6).abs() < 1e-6);
        assert!(approx_eq(list.bounds().max.z, 3.6));
    }

    #[test]
    fn test_scene_from_primitives() {
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        let mesh = PolygonMesh::new(0, ring, vec![[0, 1, 2]]);
        let surface = revolve(
            &[Point2::new(5.0, -1.0), Point2::new(5.0, 1.0)],
            std::f64::consts::TAU,
            16,
            false,
        )
        .unwrap();

        let mut list = DrawList::new();
        render_primitives(
            &mut list,
            &[Primitive::PolygonMesh(mesh), Primitive::RevolvedSurface(surface)],
            &Style::default(),
        );

        assert_eq!(list.triangle_count(), 1 + 32);
        assert!(approx_eq(list.bounds().min.x, -5.0));
        assert!(approx_eq(list.bounds().max.z, 1.0));

        let batches = list.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(batches[0].element_count, 3 * 33);
        assert_eq!(batches[0].index_bytes.len(), 4 * 3 * 33);
        assert_eq!(
            batches[0].vertex_bytes.len() as u64,
            batches[0].layout.array_stride * list.mesh_vertices().len() as u64
        );

        list.clear();
        assert!(list.is_empty());
        assert!(list.batches().is_empty());
        assert!(list.bounds().is_empty());
    }
}
