//! 渲染接口

use crate::style::{Color, Style};
use tokgeom_core::math::{Point3, Vector3};
use tokgeom_core::primitive::{Primitive, RevolvedSurface};
use tracing::debug;

/// 渲染后端接口
///
/// 所有方法只读取输入数据。
pub trait Renderer {
    /// 绘制点云
    fn draw_points(&mut self, points: &[Point3], size: f32, color: Color);

    /// 绘制折线
    fn draw_polyline(&mut self, points: &[Point3], closed: bool, color: Color);

    /// 绘制三角网格
    fn draw_mesh(&mut self, vertices: &[Point3], triangles: &[[u32; 3]], color: Color);

    /// 绘制箭头：从锚点沿方向延伸 `magnitude`
    fn draw_arrows(&mut self, anchors: &[Point3], directions: &[Vector3], magnitude: f64, color: Color);

    /// 绘制旋转曲面
    ///
    /// 有三角形时按网格绘制，否则（单点剖面）绘制每个剖面点的扫掠轨迹。
    fn draw_revolved_surface(&mut self, surface: &RevolvedSurface, color: Color) {
        if !surface.triangles().is_empty() {
            self.draw_mesh(surface.vertices(), surface.triangles(), color);
            return;
        }
        for i in 0..surface.profile_len() {
            let path = surface.sweep_path(i);
            self.draw_polyline(&path, surface.is_full_revolution(), color);
        }
    }
}

/// 把图元交给渲染器
pub fn render_primitives<'a, R>(renderer: &mut R, primitives: impl IntoIterator<Item = &'a Primitive>, style: &Style)
where
    R: Renderer + ?Sized,
{
    let mut count = 0usize;
    for primitive in primitives {
        let color = style.color_for(primitive);
        match primitive {
            Primitive::PointSet(points) => renderer.draw_points(points.points(), style.point_size, color),
            Primitive::Polyline(polyline) => renderer.draw_polyline(polyline.points(), false, color),
            Primitive::PolygonMesh(mesh) => {
                if mesh.triangles().is_empty() {
                    renderer.draw_polyline(mesh.ring(), false, color);
                } else {
                    renderer.draw_mesh(mesh.ring(), mesh.triangles(), color);
                }
            }
            Primitive::VectorField(field) => {
                renderer.draw_points(field.points(), style.anchor_size, color);
                renderer.draw_arrows(field.points(), field.directions(), style.arrow_magnitude, color);
            }
            Primitive::RevolvedSurface(surface) => renderer.draw_revolved_surface(surface, color),
        }
        count += 1;
    }
    debug!("Rendered {} primitives", count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokgeom_core::math::Point2;
    use tokgeom_core::primitive::{PointSet, Polyline, VectorField};
    use tokgeom_core::transform::revolve;

    /// 只记录调用的渲染器
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Renderer for Recorder {
        fn draw_points(&mut self, points: &[Point3], size: f32, _color: Color) {
            self.calls.push(format!("points {} {}", points.len(), size));
        }

        fn draw_polyline(&mut self, points: &[Point3], closed: bool, _color: Color) {
            self.calls.push(format!("polyline {} {}", points.len(), closed));
        }

        fn draw_mesh(&mut self, vertices: &[Point3], triangles: &[[u32; 3]], _color: Color) {
            self.calls.push(format!("mesh {} {}", vertices.len(), triangles.len()));
        }

        fn draw_arrows(&mut self, anchors: &[Point3], _directions: &[Vector3], magnitude: f64, _color: Color) {
            self.calls.push(format!("arrows {} {}", anchors.len(), magnitude));
        }
    }

    #[test]
    fn test_dispatch() {
        let primitives = vec![
            Primitive::PointSet(PointSet::new(vec![Point3::origin(); 3])),
            Primitive::Polyline(Polyline::new(0, vec![Point3::origin(); 2])),
            Primitive::VectorField(VectorField::new(vec![Point3::origin()], vec![Vector3::z()]).unwrap()),
        ];

        let mut recorder = Recorder::default();
        render_primitives(&mut recorder, &primitives, &Style::default());
        assert_eq!(
            recorder.calls,
            vec!["points 3 6", "polyline 2 false", "points 1 8", "arrows 1 0.6"]
        );
    }

    #[test]
    fn test_revolved_point_draws_sweep_paths() {
        let circle = revolve(&[Point2::new(1.0, 0.0)], std::f64::consts::TAU, 12, false).unwrap();
        let band = revolve(&[Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)], 1.0, 4, false).unwrap();

        let mut recorder = Recorder::default();
        render_primitives(
            &mut recorder,
            &[Primitive::RevolvedSurface(circle), Primitive::RevolvedSurface(band)],
            &Style::default(),
        );
        assert_eq!(recorder.calls, vec!["polyline 12 true", "mesh 10 8"]);
    }
}
