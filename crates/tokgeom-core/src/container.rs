//! 几何容器
//!
//! 几何容器是一个不带数据的变量，用属性描述某个量的空间几何：
//! 拓扑类型、坐标数组名以及节点/部件计数数组名。

use crate::dataset::Dataset;
use crate::error::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 坐标组：节点位置
pub const NODE_COORDINATES: &str = "node_coordinates";

/// 坐标组：节点朝向
pub const NODE_ORIENTATIONS: &str = "node_orientations";

/// 几何拓扑类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    UnitVector,
    Point,
    Line,
    Polygon,
    PoloidalPoint,
    PoloidalLine,
    PoloidalPolygon,
}

impl GeometryType {
    /// 全部七种类型
    pub const ALL: [GeometryType; 7] = [
        GeometryType::UnitVector,
        GeometryType::Point,
        GeometryType::Line,
        GeometryType::Polygon,
        GeometryType::PoloidalPoint,
        GeometryType::PoloidalLine,
        GeometryType::PoloidalPolygon,
    ];

    /// 属性中使用的标签
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::UnitVector => "unit_vector",
            GeometryType::Point => "point",
            GeometryType::Line => "line",
            GeometryType::Polygon => "polygon",
            GeometryType::PoloidalPoint => "poloidal_point",
            GeometryType::PoloidalLine => "poloidal_line",
            GeometryType::PoloidalPolygon => "poloidal_polygon",
        }
    }

    /// 是否为轴对称（需要环向扫掠）的类型
    pub fn is_axisymmetric(&self) -> bool {
        matches!(
            self,
            GeometryType::PoloidalPoint | GeometryType::PoloidalLine | GeometryType::PoloidalPolygon
        )
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        GeometryType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GeometryError::UnknownGeometryType(s.to_string()))
    }
}

/// 几何容器视图
///
/// 只借用数据集中的属性字符串，不复制任何数值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryContainer<'a> {
    /// 容器变量名
    pub name: &'a str,
    /// `geometry_type` 原始标签
    pub geometry_type: &'a str,
    /// `node_count` 计数数组名
    pub node_count: Option<&'a str>,
    /// `part_node_count` 计数数组名
    pub part_node_count: Option<&'a str>,
}

impl<'a> GeometryContainer<'a> {
    /// 从数据集中读取容器
    pub fn from_dataset<D: Dataset + ?Sized>(dataset: &'a D, name: &'a str) -> Result<Self> {
        let geometry_type = dataset.require_attribute(name, "geometry_type")?;
        Ok(Self {
            name,
            geometry_type,
            node_count: dataset.attribute(name, "node_count"),
            part_node_count: dataset.attribute(name, "part_node_count"),
        })
    }

    /// 解析拓扑类型
    pub fn kind(&self) -> Result<GeometryType> {
        self.geometry_type.parse()
    }

    /// 部件计数数组名，缺省时等于 `node_count`（每个元素一个部件）
    pub fn effective_part_node_count(&self) -> Option<&'a str> {
        self.part_node_count.or(self.node_count)
    }

    /// 坐标组中的坐标数组名（按出现顺序）
    pub fn coordinate_names<D: Dataset + ?Sized>(&self, dataset: &'a D, group: &str) -> Result<Vec<&'a str>> {
        let names = dataset.require_attribute(self.name, group)?;
        Ok(names.split_whitespace().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{InMemoryDataset, Variable};

    #[test]
    fn test_geometry_type_round_trip() {
        for kind in GeometryType::ALL {
            assert_eq!(kind.as_str().parse::<GeometryType>().unwrap(), kind);
        }
        assert_eq!(
            "torus".parse::<GeometryType>(),
            Err(GeometryError::UnknownGeometryType("torus".into()))
        );
        assert!(GeometryType::PoloidalLine.is_axisymmetric());
        assert!(!GeometryType::Polygon.is_axisymmetric());
    }

    #[test]
    fn test_container_view() {
        let ds = InMemoryDataset::new().with_variable(
            "coil_geometry",
            Variable::default()
                .with_attr("geometry_type", "poloidal_polygon")
                .with_attr("node_coordinates", "coil_r  coil_z\tcoil_phi")
                .with_attr("node_count", "coil_node_count"),
        );

        let container = GeometryContainer::from_dataset(&ds, "coil_geometry").unwrap();
        assert_eq!(container.kind().unwrap(), GeometryType::PoloidalPolygon);
        assert_eq!(container.part_node_count, None);
        assert_eq!(container.effective_part_node_count(), Some("coil_node_count"));
        assert_eq!(
            container.coordinate_names(&ds, NODE_COORDINATES).unwrap(),
            vec!["coil_r", "coil_z", "coil_phi"]
        );
        assert!(matches!(
            container.coordinate_names(&ds, NODE_ORIENTATIONS),
            Err(GeometryError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_container_without_type() {
        let ds = InMemoryDataset::new().with_variable("bare", Variable::default());
        assert!(GeometryContainer::from_dataset(&ds, "bare").is_err());
    }
}
