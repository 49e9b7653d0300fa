//! 渲染图元定义
//!
//! 构建器的输出单位：
//! - 点集 (PointSet)
//! - 折线 (Polyline)
//! - 多边形网格 (PolygonMesh)
//! - 向量场 (VectorField)
//! - 旋转曲面 (RevolvedSurface)
//!
//! 图元构建完成后不可修改，渲染器只读取其缓冲区。

use crate::math::{BoundingBox3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// 图元枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    PointSet(PointSet),
    Polyline(Polyline),
    PolygonMesh(PolygonMesh),
    VectorField(VectorField),
    RevolvedSurface(RevolvedSurface),
}

impl Primitive {
    /// 获取图元的包围盒
    pub fn bounding_box(&self) -> BoundingBox3 {
        BoundingBox3::from_points(self.points())
    }

    /// 获取图元的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::PointSet(_) => "PointSet",
            Primitive::Polyline(_) => "Polyline",
            Primitive::PolygonMesh(_) => "PolygonMesh",
            Primitive::VectorField(_) => "VectorField",
            Primitive::RevolvedSurface(_) => "RevolvedSurface",
        }
    }

    /// 图元的全部顶点
    pub fn points(&self) -> &[Point3] {
        match self {
            Primitive::PointSet(p) => p.points(),
            Primitive::Polyline(p) => p.points(),
            Primitive::PolygonMesh(p) => p.ring(),
            Primitive::VectorField(v) => v.points(),
            Primitive::RevolvedSurface(s) => s.vertices(),
        }
    }

    /// 所属几何元素索引（点集与向量场覆盖全部元素，返回 None）
    pub fn element(&self) -> Option<usize> {
        match self {
            Primitive::PointSet(_) | Primitive::VectorField(_) => None,
            Primitive::Polyline(p) => Some(p.element),
            Primitive::PolygonMesh(p) => Some(p.element),
            Primitive::RevolvedSurface(s) => Some(s.element),
        }
    }

    /// 三角形数量
    pub fn triangle_count(&self) -> usize {
        match self {
            Primitive::PolygonMesh(p) => p.triangles.len(),
            Primitive::RevolvedSurface(s) => s.triangles.len(),
            _ => 0,
        }
    }
}

/// 点集
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<Point3>,
}

impl PointSet {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 折线（不闭合）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    element: usize,
    points: Vec<Point3>,
}

impl Polyline {
    pub fn new(element: usize, points: Vec<Point3>) -> Self {
        Self { element, points }
    }

    pub fn element(&self) -> usize {
        self.element
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// 计算总长度
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// 三角化的闭合多边形
///
/// `ring` 首尾两点完全相同；三角形索引只引用前 `ring.len() - 1` 个顶点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    element: usize,
    ring: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
}

impl PolygonMesh {
    pub fn new(element: usize, ring: Vec<Point3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            element,
            ring,
            triangles,
        }
    }

    pub fn element(&self) -> usize {
        self.element
    }

    /// 闭合环（含重复的首点）
    pub fn ring(&self) -> &[Point3] {
        &self.ring
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }
}

/// 向量场：锚点 + 每点单位方向
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorField {
    points: Vec<Point3>,
    directions: Vec<Vector3>,
}

impl VectorField {
    /// 创建向量场，锚点与方向数量必须一致
    pub fn new(points: Vec<Point3>, directions: Vec<Vector3>) -> Option<Self> {
        (points.len() == directions.len()).then_some(Self { points, directions })
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn directions(&self) -> &[Vector3] {
        &self.directions
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 旋转曲面
///
/// 顶点按环存储：第 `k` 个角度环的第 `i` 个剖面点位于 `k * profile_len + i`。
/// 整周旋转时最后一条带状面回绕到第 0 环，不存储重复的接缝环。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevolvedSurface {
    pub(crate) element: usize,
    pub(crate) vertices: Vec<Point3>,
    pub(crate) triangles: Vec<[u32; 3]>,
    pub(crate) profile_len: usize,
    pub(crate) ring_count: usize,
    pub(crate) full_revolution: bool,
    pub(crate) capped: bool,
}

impl RevolvedSurface {
    /// 指定所属几何元素
    pub fn for_element(mut self, element: usize) -> Self {
        self.element = element;
        self
    }

    pub fn element(&self) -> usize {
        self.element
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// 剖面点数
    pub fn profile_len(&self) -> usize {
        self.profile_len
    }

    /// 角度环数
    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    /// 第 `ring` 个角度环上的点
    pub fn ring(&self, ring: usize) -> &[Point3] {
        let start = ring * self.profile_len;
        &self.vertices[start..start + self.profile_len]
    }

    /// 第 `i` 个剖面点扫过的轨迹（按角度顺序）
    pub fn sweep_path(&self, i: usize) -> Vec<Point3> {
        (0..self.ring_count)
            .map(|ring| self.vertices[ring * self.profile_len + i])
            .collect()
    }

    pub fn is_full_revolution(&self) -> bool {
        self.full_revolution
    }

    pub fn is_capped(&self) -> bool {
        self.capped
    }
}
