//! 线几何：每个部件一条折线，保持节点顺序，不闭合

use super::{check_node_total, node_positions, GeometryBuilder};
use crate::config::BuildConfig;
use crate::container::{GeometryContainer, GeometryType};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::parts;
use crate::primitive::{Polyline, Primitive};

#[derive(Debug, Clone, Copy, Default)]
pub struct LineBuilder;

impl GeometryBuilder for LineBuilder {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Line
    }

    fn build(
        &self,
        dataset: &dyn Dataset,
        container: &GeometryContainer<'_>,
        _config: &BuildConfig,
    ) -> Result<Vec<Primitive>> {
        let points = node_positions(dataset, container)?;
        let layout = parts::decode(dataset, container)?;
        check_node_total(container, layout.node_total(), points.len())?;

        Ok(layout
            .iter_parts()
            .filter(|(_, range)| !range.is_empty())
            .map(|(element, range)| Primitive::Polyline(Polyline::new(element, points[range].to_vec())))
            .collect())
    }
}
