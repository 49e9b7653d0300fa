//! TokGeom 核心
//!
//! 解码托卡马克 NetCDF 数据集中 CF 风格的几何容器，并构建可渲染的图元。
//!
//! # 架构设计
//!
//! - `Dataset`: 只读数据集访问接口
//! - `GeometryContainer`: 几何容器视图（拓扑类型、计数数组、坐标组）
//! - `GeometryBuilder`: 每种拓扑一个构建器，输出不可变的 `Primitive` 序列
//! - `GeometrySession`: 按 `geometry_type` 分派构建器并收集结果
//!
//! # 示例
//!
//! ```rust
//! use tokgeom_core::prelude::*;
//!
//! let dataset = InMemoryDataset::new()
//!     .with_variable("r", Variable::new(vec![1.0]).with_attr("standard_name", "_radial_distance"))
//!     .with_variable("phi", Variable::new(vec![0.0]).with_attr("standard_name", "_azimuth"))
//!     .with_variable("z", Variable::new(vec![0.0]).with_attr("standard_name", "_vertical_distance"))
//!     .with_variable(
//!         "probe_geometry",
//!         Variable::default()
//!             .with_attr("geometry_type", "point")
//!             .with_attr("node_coordinates", "r phi z"),
//!     )
//!     .with_variable("probe", Variable::new(vec![0.0]).with_attr("geometry", "probe_geometry"));
//!
//! let mut session = GeometrySession::new();
//! session.add(&dataset, "probe", &BuildConfig::default());
//! assert_eq!(session.primitive_count(), 1);
//! ```

pub mod builders;
pub mod config;
pub mod container;
pub mod dataset;
pub mod error;
pub mod math;
pub mod parts;
pub mod primitive;
pub mod registry;
pub mod standard_name;
pub mod transform;
pub mod triangulate;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::builders::GeometryBuilder;
    pub use crate::config::BuildConfig;
    pub use crate::container::{GeometryContainer, GeometryType};
    pub use crate::dataset::{find_geometry_quantities, Dataset, InMemoryDataset, Variable};
    pub use crate::error::GeometryError;
    pub use crate::math::{BoundingBox3, Point2, Point3, Vector3};
    pub use crate::primitive::{PointSet, PolygonMesh, Polyline, Primitive, RevolvedSurface, VectorField};
    pub use crate::registry::{GeometrySession, QuantityGeometry};
    pub use crate::transform::OrientationFormula;
}
