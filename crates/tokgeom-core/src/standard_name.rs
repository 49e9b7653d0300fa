//! 标准名称与坐标解析
//!
//! 坐标数组通过 `standard_name` 属性标明其物理含义，几何构建时
//! 按标准名称在容器的坐标组中查找，而不是依赖数组名。

use crate::container::GeometryContainer;
use crate::dataset::Dataset;
use crate::error::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 坐标标准名称（受控词表）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardName {
    /// 大半径 R
    RadialDistance,
    /// 高度 Z
    VerticalDistance,
    /// 环向角 φ
    Azimuth,
    /// 法向极向角
    NormalPoloidalAngle,
    /// 法向环向角
    NormalToroidalAngle,
}

impl StandardName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardName::RadialDistance => "radial_distance",
            StandardName::VerticalDistance => "vertical_distance",
            StandardName::Azimuth => "azimuth",
            StandardName::NormalPoloidalAngle => "normal_poloidal_angle",
            StandardName::NormalToroidalAngle => "normal_toroidal_angle",
        }
    }

    /// 检查属性值是否为该标准名称
    ///
    /// 文件中的标签带前导下划线（`_radial_distance`），两种写法等价。
    pub fn matches(&self, tag: &str) -> bool {
        tag.trim().trim_start_matches('_') == self.as_str()
    }
}

impl fmt::Display for StandardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StandardName {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        [
            StandardName::RadialDistance,
            StandardName::VerticalDistance,
            StandardName::Azimuth,
            StandardName::NormalPoloidalAngle,
            StandardName::NormalToroidalAngle,
        ]
        .into_iter()
        .find(|name| name.matches(s))
        .ok_or_else(|| GeometryError::invalid(format!("unknown standard_name '{s}'")))
    }
}

/// 在坐标组中按标准名称查找坐标数组
///
/// 按组内顺序扫描，返回第一个匹配的数组。
pub fn resolve<'a, D: Dataset + ?Sized>(
    dataset: &'a D,
    container: &GeometryContainer<'a>,
    group: &str,
    standard_name: StandardName,
) -> Result<&'a [f64]> {
    for name in container.coordinate_names(dataset, group)? {
        if !dataset.contains(name) {
            return Err(GeometryError::MissingVariable(name.to_string()));
        }
        let tagged = dataset
            .attribute(name, "standard_name")
            .is_some_and(|tag| standard_name.matches(tag));
        if tagged {
            return dataset.require_values(name);
        }
    }

    Err(GeometryError::StandardNameNotFound {
        standard_name: standard_name.to_string(),
        group: group.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{NODE_COORDINATES, NODE_ORIENTATIONS};
    use crate::dataset::{InMemoryDataset, Variable};

    fn dataset() -> InMemoryDataset {
        InMemoryDataset::new()
            .with_variable(
                "probe_geometry",
                Variable::default()
                    .with_attr("geometry_type", "point")
                    .with_attr("node_coordinates", "probe_z probe_r probe_r_dup")
                    .with_attr("node_orientations", "probe_missing"),
            )
            .with_variable("probe_r", Variable::new(vec![1.0, 2.0]).with_attr("standard_name", "_radial_distance"))
            .with_variable("probe_r_dup", Variable::new(vec![9.0, 9.0]).with_attr("standard_name", "radial_distance"))
            .with_variable("probe_z", Variable::new(vec![0.5, -0.5]).with_attr("standard_name", "vertical_distance"))
    }

    #[test]
    fn test_resolve_first_match() {
        let ds = dataset();
        let container = GeometryContainer::from_dataset(&ds, "probe_geometry").unwrap();

        let r = resolve(&ds, &container, NODE_COORDINATES, StandardName::RadialDistance).unwrap();
        assert_eq!(r, &[1.0, 2.0]);

        let z = resolve(&ds, &container, NODE_COORDINATES, StandardName::VerticalDistance).unwrap();
        assert_eq!(z, &[0.5, -0.5]);
    }

    #[test]
    fn test_resolve_not_found() {
        let ds = dataset();
        let container = GeometryContainer::from_dataset(&ds, "probe_geometry").unwrap();

        let err = resolve(&ds, &container, NODE_COORDINATES, StandardName::Azimuth).unwrap_err();
        assert_eq!(
            err,
            GeometryError::StandardNameNotFound {
                standard_name: "azimuth".into(),
                group: NODE_COORDINATES.into(),
            }
        );
    }

    #[test]
    fn test_resolve_missing_variable() {
        let ds = dataset();
        let container = GeometryContainer::from_dataset(&ds, "probe_geometry").unwrap();

        let err = resolve(&ds, &container, NODE_ORIENTATIONS, StandardName::NormalPoloidalAngle).unwrap_err();
        assert_eq!(err, GeometryError::MissingVariable("probe_missing".into()));
    }

    #[test]
    fn test_standard_name_parsing() {
        assert_eq!("_azimuth".parse::<StandardName>().unwrap(), StandardName::Azimuth);
        assert_eq!(
            "normal_toroidal_angle".parse::<StandardName>().unwrap(),
            StandardName::NormalToroidalAngle
        );
        assert!("_major_radius".parse::<StandardName>().is_err());
    }
}
