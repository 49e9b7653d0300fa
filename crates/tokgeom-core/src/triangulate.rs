//! 多边形三角化
//!
//! 使用 earcutr 的耳切法，支持凹多边形。三维环先投影到
//! Newell 法向量的主平面上再三角化。

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, Vector3, EPSILON};

/// 去掉与首点完全相同的末点
pub fn open_ring<T: PartialEq>(ring: &[T]) -> &[T] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// 对扁平化的二维坐标执行耳切
fn earcut(flat: &[f64]) -> Result<Vec<[u32; 3]>> {
    let indices = earcutr::earcut(flat, &[], 2)
        .map_err(|e| GeometryError::invalid(format!("triangulation failed: {e:?}")))?;

    Ok(indices
        .chunks_exact(3)
        .map(|t| [t[0] as u32, t[1] as u32, t[2] as u32])
        .collect())
}

/// 三角化二维多边形（首尾可以重复，也可以不重复）
pub fn triangulate_2d(points: &[Point2]) -> Result<Vec<[u32; 3]>> {
    let points = open_ring(points);
    if points.len() < 3 {
        return Ok(Vec::new());
    }
    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    earcut(&flat)
}

/// Newell 法向量
fn newell_normal(points: &[Point3]) -> Vector3 {
    let mut normal = Vector3::zeros();
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

/// 三角化三维平面多边形
pub fn triangulate_3d(points: &[Point3]) -> Result<Vec<[u32; 3]>> {
    let points = open_ring(points);
    if points.len() < 3 {
        return Ok(Vec::new());
    }

    let normal = newell_normal(points);
    if normal.norm() < EPSILON {
        // 共线或退化，没有可填充的面积
        return Ok(Vec::new());
    }

    // 丢弃法向量分量最大的坐标轴
    let (ax, ay) = if normal.x.abs() >= normal.y.abs() && normal.x.abs() >= normal.z.abs() {
        (1, 2)
    } else if normal.y.abs() >= normal.z.abs() {
        (2, 0)
    } else {
        (0, 1)
    };

    let flat: Vec<f64> = points.iter().flat_map(|p| [p[ax], p[ay]]).collect();
    earcut(&flat)
}
