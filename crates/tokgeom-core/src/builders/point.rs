//! 点几何：全部节点组成一个点集

use super::{node_positions, GeometryBuilder};
use crate::config::BuildConfig;
use crate::container::{GeometryContainer, GeometryType};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::primitive::{PointSet, Primitive};

#[derive(Debug, Clone, Copy, Default)]
pub struct PointBuilder;

impl GeometryBuilder for PointBuilder {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn build(
        &self,
        dataset: &dyn Dataset,
        container: &GeometryContainer<'_>,
        _config: &BuildConfig,
    ) -> Result<Vec<Primitive>> {
        let points = node_positions(dataset, container)?;
        Ok(vec![Primitive::PointSet(PointSet::new(points))])
    }
}
