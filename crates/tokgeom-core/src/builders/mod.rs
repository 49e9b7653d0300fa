//! 几何构建器
//!
//! 每种几何类型一个独立实现，统一接口为
//! `build(dataset, container, config) -> Vec<Primitive>`。
//! 构建器只读取数据集，返回的图元序列构建后不再修改。

mod line;
mod point;
mod poloidal;
mod polygon;
mod unit_vector;

pub use line::LineBuilder;
pub use point::PointBuilder;
pub use poloidal::{PoloidalLineBuilder, PoloidalPointBuilder, PoloidalPolygonBuilder};
pub use polygon::PolygonBuilder;
pub use unit_vector::UnitVectorBuilder;

use crate::config::BuildConfig;
use crate::container::{GeometryContainer, GeometryType, NODE_COORDINATES};
use crate::dataset::Dataset;
use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3};
use crate::primitive::Primitive;
use crate::standard_name::{resolve, StandardName};
use crate::transform::cylindrical_to_cartesian;

/// 几何构建器接口
pub trait GeometryBuilder: Send + Sync {
    /// 处理的几何类型
    fn geometry_type(&self) -> GeometryType;

    /// 从几何容器构建图元
    fn build(
        &self,
        dataset: &dyn Dataset,
        container: &GeometryContainer<'_>,
        config: &BuildConfig,
    ) -> Result<Vec<Primitive>>;
}

/// 解析节点的笛卡尔坐标（R, φ, Z）
fn node_positions(dataset: &dyn Dataset, container: &GeometryContainer<'_>) -> Result<Vec<Point3>> {
    let r = resolve(dataset, container, NODE_COORDINATES, StandardName::RadialDistance)?;
    let phi = resolve(dataset, container, NODE_COORDINATES, StandardName::Azimuth)?;
    let z = resolve(dataset, container, NODE_COORDINATES, StandardName::VerticalDistance)?;
    cylindrical_to_cartesian(r, phi, z)
}

/// 解析节点的极向截面坐标 (R, Z)
fn poloidal_nodes(dataset: &dyn Dataset, container: &GeometryContainer<'_>) -> Result<Vec<Point2>> {
    let r = resolve(dataset, container, NODE_COORDINATES, StandardName::RadialDistance)?;
    let z = resolve(dataset, container, NODE_COORDINATES, StandardName::VerticalDistance)?;
    if r.len() != z.len() {
        return Err(GeometryError::invalid(format!(
            "radial_distance has {} values but vertical_distance has {}",
            r.len(),
            z.len()
        )));
    }
    Ok(r.iter().zip(z).map(|(&r, &z)| Point2::new(r, z)).collect())
}

/// 计数数组引用的节点必须都存在于坐标数组中
fn check_node_total(container: &GeometryContainer<'_>, required: usize, available: usize) -> Result<()> {
    if required > available {
        return Err(GeometryError::invalid(format!(
            "{} references {required} nodes but coordinates hold {available}",
            container.name
        )));
    }
    Ok(())
}

/// 闭合环：首尾不同时追加首点的副本
pub fn close_ring<T: PartialEq + Copy>(mut points: Vec<T>) -> Vec<T> {
    if let (Some(&first), Some(last)) = (points.first(), points.last()) {
        if first != *last {
            points.push(first);
        }
    }
    points
}

/// 环至少需要三个不同的点
fn check_ring<T: PartialEq>(ring: &[T], element: usize) -> Result<()> {
    let unique = crate::triangulate::open_ring(ring).len();
    if unique <= 2 {
        return Err(GeometryError::invalid(format!(
            "ring of geometry element {element} has only {unique} distinct points"
        )));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_ring() {
        assert_eq!(close_ring(vec![1, 2, 3]), vec![1, 2, 3, 1]);
        assert_eq!(close_ring(vec![1, 2, 3, 1]), vec![1, 2, 3, 1]);
        assert!(close_ring(Vec::<i32>::new()).is_empty());
    }

    #[test]
    fn test_check_ring() {
        assert!(check_ring(&[1, 2, 3], 0).is_ok());
        assert!(check_ring(&[1, 2, 1], 0).is_err());
        assert!(check_ring(&[1, 2], 0).is_err());
    }
}
