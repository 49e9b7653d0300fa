//! 坐标变换
//!
//! - 柱坐标 (R, φ, Z) 与笛卡尔坐标互转
//! - 由法向极向角/环向角构造单位方向向量场
//! - 极向剖面绕对称轴（Z轴）旋转生成直纹曲面

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, EPSILON, FULL_TURN};
use crate::primitive::RevolvedSurface;
use crate::triangulate::{open_ring, triangulate_2d};
use serde::{Deserialize, Serialize};

/// 整周判定容差（弧度）
const FULL_TURN_TOLERANCE: f64 = 1e-9;

fn check_lengths(lengths: &[(&str, usize)]) -> Result<usize> {
    let expected = lengths[0].1;
    match lengths.iter().find(|(_, len)| *len != expected) {
        Some((name, len)) => Err(GeometryError::invalid(format!(
            "coordinate '{name}' has {len} values, expected {expected}"
        ))),
        None => Ok(expected),
    }
}

/// 柱坐标转笛卡尔坐标
///
/// `x = r·cos(φ)`，`y = r·sin(φ)`，`z` 不变。
pub fn cylindrical_to_cartesian(r: &[f64], phi: &[f64], z: &[f64]) -> Result<Vec<Point3>> {
    check_lengths(&[("r", r.len()), ("phi", phi.len()), ("z", z.len())])?;
    Ok(r.iter()
        .zip(phi)
        .zip(z)
        .map(|((&r, &phi), &z)| {
            let (sin, cos) = phi.sin_cos();
            Point3::new(r * cos, r * sin, z)
        })
        .collect())
}

/// 笛卡尔坐标转柱坐标，返回 (r, φ, z)，φ ∈ (-π, π]
pub fn cartesian_to_cylindrical(point: &Point3) -> (f64, f64, f64) {
    (point.x.hypot(point.y), point.y.atan2(point.x), point.z)
}

/// 方向向量公式
///
/// 原始数据中方位偏移 `φ + 环向角` 的含义尚未确认，
/// 因此保留为可替换的显式公式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationFormula {
    /// 环向角相对于节点方位角：
    /// `d = (cos(pol)·cos(φ+tor), cos(pol)·sin(φ+tor), -sin(pol))`
    #[default]
    AzimuthOffset,
    /// 环向角为绝对方位角：
    /// `d = (cos(pol)·cos(tor), cos(pol)·sin(tor), -sin(pol))`
    Absolute,
}

impl OrientationFormula {
    /// 计算未归一化的方向
    pub fn direction(&self, pol: f64, tor: f64, phi: f64) -> Vector3 {
        let azimuth = match self {
            OrientationFormula::AzimuthOffset => phi + tor,
            OrientationFormula::Absolute => tor,
        };
        let (sin_az, cos_az) = azimuth.sin_cos();
        let (sin_pol, cos_pol) = pol.sin_cos();
        Vector3::new(cos_pol * cos_az, cos_pol * sin_az, -sin_pol)
    }
}

/// 构造单位方向向量场
///
/// 长度为零（或非有限）的方向向量无法归一化，返回
/// [`GeometryError::DegenerateVector`] 而不是产生 NaN。
pub fn unit_vector_field(
    pol_angle: &[f64],
    tor_angle: &[f64],
    phi: &[f64],
    formula: OrientationFormula,
) -> Result<Vec<Vector3>> {
    check_lengths(&[
        ("normal_poloidal_angle", pol_angle.len()),
        ("normal_toroidal_angle", tor_angle.len()),
        ("azimuth", phi.len()),
    ])?;

    pol_angle
        .iter()
        .zip(tor_angle)
        .zip(phi)
        .enumerate()
        .map(|(index, ((&pol, &tor), &phi))| {
            let v = formula.direction(pol, tor, phi);
            let norm = v.norm();
            if norm.is_finite() && norm > EPSILON {
                Ok(v / norm)
            } else {
                Err(GeometryError::DegenerateVector { index })
            }
        })
        .collect()
}

/// 剖面旋转
///
/// 将 (r, z) 剖面绕 Z 轴扫过 `angle_span` 弧度，分成 `resolution` 等份，
/// 相邻角度环之间以两个三角形连接每条剖面线段。
/// - `angle_span ≥ 2π`：整周，最后一条带回绕到第 0 环，无重复接缝
/// - `capped` 且非整周：两个开口端面按剖面多边形三角化封闭
/// - 单点剖面只生成角度环上的顶点（扫出圆或圆弧），没有三角形
pub fn revolve(profile: &[Point2], angle_span: f64, resolution: usize, capped: bool) -> Result<RevolvedSurface> {
    if profile.is_empty() {
        return Err(GeometryError::invalid("cannot revolve an empty profile"));
    }
    if !angle_span.is_finite() || angle_span <= 0.0 {
        return Err(GeometryError::invalid(format!(
            "revolve angle must be positive, got {angle_span}"
        )));
    }
    if resolution == 0 {
        return Err(GeometryError::invalid("revolve resolution must be at least 1"));
    }

    let full_revolution = angle_span >= FULL_TURN - FULL_TURN_TOLERANCE;
    let span = if full_revolution { FULL_TURN } else { angle_span };
    let ring_count = if full_revolution { Some(resolution) } else { resolution.checked_add(1) };
    let n = profile.len();

    // 三角形索引为 u32
    let vertex_count = ring_count
        .and_then(|rings| rings.checked_mul(n))
        .filter(|&count| u32::try_from(count).is_ok())
        .ok_or_else(|| {
            GeometryError::invalid(format!(
                "revolving {n} profile points over {resolution} segments exceeds the u32 index range"
            ))
        })?;
    let ring_count = vertex_count / n;

    let mut vertices = Vec::with_capacity(vertex_count);
    for step in 0..ring_count {
        let theta = span * step as f64 / resolution as f64;
        let (sin, cos) = theta.sin_cos();
        vertices.extend(profile.iter().map(|p| Point3::new(p.x * cos, p.x * sin, p.y)));
    }

    let mut triangles = Vec::with_capacity(2 * resolution * n.saturating_sub(1));
    for step in 0..resolution {
        let base = step * n;
        let next_base = if full_revolution && step == resolution - 1 {
            0
        } else {
            (step + 1) * n
        };

        for i in 0..n - 1 {
            let a = (base + i) as u32;
            let b = (next_base + i) as u32;
            let c = (next_base + i + 1) as u32;
            let d = (base + i + 1) as u32;
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }

    let mut has_caps = false;
    if capped && !full_revolution {
        let cap = triangulate_2d(open_ring(profile))?;
        if !cap.is_empty() {
            let end_base = ((ring_count - 1) * n) as u32;
            // 起始端面反向，使两个端面都朝外
            triangles.extend(cap.iter().map(|&[a, b, c]| [a, c, b]));
            triangles.extend(cap.iter().map(|&[a, b, c]| [end_base + a, end_base + b, end_base + c]));
            has_caps = true;
        }
    }

    Ok(RevolvedSurface {
        element: 0,
        vertices,
        triangles,
        profile_len: n,
        ring_count,
        full_revolution,
        capped: has_caps,
    })
}
