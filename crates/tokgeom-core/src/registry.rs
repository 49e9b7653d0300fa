//! 几何注册表
//!
//! 按 `geometry_type` 标签分派到对应的构建器。[`GeometrySession`] 收集
//! 每个量构建出的图元；构建失败只记录日志与失败列表，不向调用方抛出，
//! 其余量继续构建。

use crate::builders::{
    GeometryBuilder, LineBuilder, PointBuilder, PoloidalLineBuilder, PoloidalPointBuilder,
    PoloidalPolygonBuilder, PolygonBuilder, UnitVectorBuilder,
};
use crate::config::BuildConfig;
use crate::container::{GeometryContainer, GeometryType};
use crate::dataset::Dataset;
use crate::error::{GeometryError, Result};
use crate::primitive::Primitive;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, error, info};

/// 量变量上指向几何容器的属性
pub const GEOMETRY_ATTRIBUTE: &str = "geometry";

/// 获取几何类型对应的构建器
pub fn builder_for(kind: GeometryType) -> &'static dyn GeometryBuilder {
    match kind {
        GeometryType::Point => &PointBuilder,
        GeometryType::Line => &LineBuilder,
        GeometryType::Polygon => &PolygonBuilder,
        GeometryType::UnitVector => &UnitVectorBuilder,
        GeometryType::PoloidalPoint => &PoloidalPointBuilder,
        GeometryType::PoloidalLine => &PoloidalLineBuilder,
        GeometryType::PoloidalPolygon => &PoloidalPolygonBuilder,
    }
}

/// 构建单个量的几何
pub fn build_quantity<D: Dataset + ?Sized>(
    dataset: &D,
    quantity: &str,
    config: &BuildConfig,
) -> Result<QuantityGeometry> {
    if !dataset.contains(quantity) {
        return Err(GeometryError::MissingVariable(quantity.to_string()));
    }
    let container_name = dataset
        .attribute(quantity, GEOMETRY_ATTRIBUTE)
        .ok_or_else(|| GeometryError::MissingGeometryAttribute(quantity.to_string()))?;

    let container = GeometryContainer::from_dataset(dataset, container_name)?;
    let kind = container.kind()?;
    debug!("Building {} geometry '{}' for '{}'", kind, container.name, quantity);

    // 构建器统一以 trait object 形式读取数据集
    let primitives = builder_for(kind).build(&DatasetRef(dataset), &container, config)?;

    Ok(QuantityGeometry {
        quantity: quantity.to_string(),
        container: container_name.to_string(),
        geometry_type: kind,
        primitives,
    })
}

/// 把 `?Sized` 的数据集包装成可以转换为 `&dyn Dataset` 的类型
struct DatasetRef<'a, D: ?Sized>(&'a D);

impl<D: Dataset + ?Sized> Dataset for DatasetRef<'_, D> {
    fn variable_names(&self) -> Vec<&str> {
        self.0.variable_names()
    }

    fn contains(&self, variable: &str) -> bool {
        self.0.contains(variable)
    }

    fn attribute(&self, variable: &str, attribute: &str) -> Option<&str> {
        self.0.attribute(variable, attribute)
    }

    fn values(&self, variable: &str) -> Option<&[f64]> {
        self.0.values(variable)
    }
}

/// 单个量的构建结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityGeometry {
    /// 量变量名
    pub quantity: String,
    /// 几何容器变量名
    pub container: String,
    pub geometry_type: GeometryType,
    pub primitives: Vec<Primitive>,
}

/// 构建失败记录
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFailure {
    pub quantity: String,
    pub error: GeometryError,
}

/// 构建会话
///
/// 结果按添加顺序保存。
#[derive(Debug, Clone, Default)]
pub struct GeometrySession {
    geometries: Vec<QuantityGeometry>,
    failures: Vec<BuildFailure>,
}

impl GeometrySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一个量的几何
    ///
    /// 任何失败都只记录日志并写入失败列表，返回新增的图元数量（失败时为 0）。
    pub fn add<D: Dataset + ?Sized>(&mut self, dataset: &D, quantity: &str, config: &BuildConfig) -> usize {
        let result = build_quantity(dataset, quantity, config);
        self.record(quantity, result)
    }

    /// 添加一个量的几何，失败时返回错误，会话不变
    pub fn try_add<D: Dataset + ?Sized>(
        &mut self,
        dataset: &D,
        quantity: &str,
        config: &BuildConfig,
    ) -> Result<&[Primitive]> {
        let geometry = build_quantity(dataset, quantity, config)?;
        let index = self.geometries.len();
        self.geometries.push(geometry);
        Ok(&self.geometries[index].primitives)
    }

    /// 并行构建多个量，结果顺序与输入顺序一致
    pub fn build_all<D, S>(&mut self, dataset: &D, quantities: &[(S, BuildConfig)]) -> usize
    where
        D: Dataset + Sync + ?Sized,
        S: AsRef<str> + Sync,
    {
        let results: Vec<_> = quantities
            .par_iter()
            .map(|(quantity, config)| build_quantity(dataset, quantity.as_ref(), config))
            .collect();

        quantities
            .iter()
            .zip(results)
            .map(|((quantity, _), result)| self.record(quantity.as_ref(), result))
            .sum()
    }

    fn record(&mut self, quantity: &str, result: Result<QuantityGeometry>) -> usize {
        match result {
            Ok(geometry) => {
                let count = geometry.primitives.len();
                info!(
                    "Added {} primitives for '{}' ({})",
                    count, quantity, geometry.geometry_type
                );
                self.geometries.push(geometry);
                count
            }
            Err(e) => {
                error!("Failed to build geometry for '{}': {}", quantity, e);
                self.failures.push(BuildFailure {
                    quantity: quantity.to_string(),
                    error: e,
                });
                0
            }
        }
    }

    /// 已构建的几何
    pub fn geometries(&self) -> &[QuantityGeometry] {
        &self.geometries
    }

    /// 失败记录
    pub fn failures(&self) -> &[BuildFailure] {
        &self.failures
    }

    /// 所有图元（按添加顺序）
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.geometries.iter().flat_map(|g| g.primitives.iter())
    }

    /// 图元总数
    pub fn primitive_count(&self) -> usize {
        self.geometries.iter().map(|g| g.primitives.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// 清空会话
    pub fn clear(&mut self) {
        self.geometries.clear();
        self.failures.clear();
    }
}
