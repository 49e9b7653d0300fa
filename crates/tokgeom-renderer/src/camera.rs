//! 3D相机
//!
//! 绕目标点的轨道相机：方位角、仰角、距离，透视投影。

use tokgeom_core::math::{BoundingBox3, Matrix4, Point3, Vector3};

/// 3D相机
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// 观察目标（世界坐标）
    pub target: Point3,

    /// 相机到目标的距离
    pub distance: f64,

    /// 方位角（弧度，绕 Z 轴）
    pub yaw: f64,

    /// 仰角（弧度）
    pub pitch: f64,

    /// 垂直视场角（弧度）
    pub fov_y: f64,

    /// 视口宽度（像素）
    pub viewport_width: u32,

    /// 视口高度（像素）
    pub viewport_height: u32,

    /// 最小距离
    pub min_distance: f64,

    /// 最大距离
    pub max_distance: f64,
}

impl Camera3D {
    /// 仰角限制，避免视线与上方向平行
    const PITCH_LIMIT: f64 = 1.55;

    /// 创建新的相机
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            target: Point3::origin(),
            distance: 10.0,
            yaw: -std::f64::consts::FRAC_PI_4,
            pitch: 0.5,
            fov_y: 45f64.to_radians(),
            viewport_width,
            viewport_height,
            min_distance: 0.01,
            max_distance: 1.0e5,
        }
    }

    /// 更新视口大小
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// 宽高比
    pub fn aspect(&self) -> f64 {
        self.viewport_width.max(1) as f64 / self.viewport_height.max(1) as f64
    }

    /// 相机位置
    pub fn eye(&self) -> Point3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + Vector3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch) * self.distance
    }

    /// 旋转相机
    pub fn orbit(&mut self, delta_yaw: f64, delta_pitch: f64) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// 缩放（factor > 1 拉近）
    pub fn zoom(&mut self, factor: f64) {
        if factor > 0.0 {
            self.distance = (self.distance / factor).clamp(self.min_distance, self.max_distance);
        }
    }

    /// 对准包围盒，使其外接球完整可见
    pub fn fit_to_bounds(&mut self, bbox: &BoundingBox3, padding: f64) {
        if bbox.is_empty() {
            return;
        }
        let radius = (bbox.diagonal() / 2.0).max(self.min_distance) * (1.0 + padding);
        let half_fov_y = self.fov_y / 2.0;
        let half_fov_x = (self.aspect() * half_fov_y.tan()).atan();
        let half_fov = half_fov_y.min(half_fov_x);

        self.target = bbox.center();
        self.distance = (radius / half_fov.sin()).clamp(self.min_distance, self.max_distance);
    }

    /// 近裁剪面
    pub fn near(&self) -> f64 {
        (self.distance * 0.001).max(1.0e-4)
    }

    /// 远裁剪面
    pub fn far(&self) -> f64 {
        self.distance * 10.0
    }

    /// 视图矩阵
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at_rh(&self.eye(), &self.target, &Vector3::z())
    }

    /// 投影矩阵
    pub fn projection_matrix(&self) -> Matrix4 {
        Matrix4::new_perspective(self.aspect(), self.fov_y, self.near(), self.far())
    }

    /// 世界坐标转标准化设备坐标
    pub fn world_to_ndc(&self, world: &Point3) -> Point3 {
        (self.projection_matrix() * self.view_matrix()).transform_point(world)
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokgeom_core::math::approx_eq;

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera3D::new(800, 600);
        let ndc = camera.world_to_ndc(&camera.target);
        assert!(ndc.x.abs() < 1e-9);
        assert!(ndc.y.abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_bounds() {
        let mut camera = Camera3D::new(1024, 512);
        let bbox = BoundingBox3::new(Point3::new(-6.0, -6.0, -2.0), Point3::new(6.0, 6.0, 2.0));
        camera.fit_to_bounds(&bbox, 0.1);

        assert!(approx_eq(camera.target.z, 0.0));
        for corner in [bbox.min, bbox.max, Point3::new(6.0, -6.0, 2.0), Point3::new(-6.0, 6.0, -2.0)] {
            let ndc = camera.world_to_ndc(&corner);
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "corner {corner} outside view");
        }
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera3D::default();
        camera.orbit(0.3, 10.0);
        assert!(camera.pitch <= Camera3D::PITCH_LIMIT);
        let distance = (camera.eye() - camera.target).norm();
        assert!((distance - camera.distance).abs() < 1e-9);

        camera.zoom(2.0);
        assert!(approx_eq(camera.distance, 5.0));
    }
}
