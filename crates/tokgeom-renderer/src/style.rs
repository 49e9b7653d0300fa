//! 绘制样式

use tokgeom_core::primitive::Primitive;

/// RGBA 颜色
pub type Color = [f32; 4];

/// 箭头默认长度
pub const DEFAULT_ARROW_MAGNITUDE: f64 = 0.6;

/// 绘制样式
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// 点集的点大小（像素）
    pub point_size: f32,
    /// 向量场锚点大小（像素）
    pub anchor_size: f32,
    /// 向量场箭头长度（世界单位）
    pub arrow_magnitude: f64,
    pub point_color: Color,
    pub line_color: Color,
    pub mesh_color: Color,
    pub arrow_color: Color,
    pub surface_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            point_size: 6.0,
            anchor_size: 8.0,
            arrow_magnitude: DEFAULT_ARROW_MAGNITUDE,
            point_color: [0.9, 0.3, 0.2, 1.0],
            line_color: [0.2, 0.6, 0.9, 1.0],
            mesh_color: [0.6, 0.6, 0.65, 1.0],
            arrow_color: [0.95, 0.75, 0.1, 1.0],
            surface_color: [0.4, 0.75, 0.5, 0.6],
        }
    }
}

impl Style {
    /// 设置箭头长度
    pub fn with_arrow_magnitude(mut self, magnitude: f64) -> Self {
        self.arrow_magnitude = magnitude;
        self
    }

    /// 图元的主颜色
    pub fn color_for(&self, primitive: &Primitive) -> Color {
        match primitive {
            Primitive::PointSet(_) => self.point_color,
            Primitive::Polyline(_) => self.line_color,
            Primitive::PolygonMesh(_) => self.mesh_color,
            Primitive::VectorField(_) => self.arrow_color,
            Primitive::RevolvedSurface(_) => self.surface_color,
        }
    }
}
