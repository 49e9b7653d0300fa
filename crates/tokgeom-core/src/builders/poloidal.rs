//! 极向（轴对称）几何
//!
//! 极向截面 (R, Z) 中的点、线、多边形绕 Z 轴环向扫掠，
//! 扫掠角度与分段数来自 [`BuildConfig`]。

use super::{check_node_total, check_ring, close_ring, poloidal_nodes, GeometryBuilder};
use crate::config::BuildConfig;
use crate::container::{GeometryContainer, GeometryType};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::parts;
use crate::primitive::Primitive;
use crate::transform::revolve;

/// 极向点：每个节点扫出一个圆（或圆弧）
#[derive(Debug, Clone, Copy, Default)]
pub struct PoloidalPointBuilder;

impl GeometryBuilder for PoloidalPointBuilder {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::PoloidalPoint
    }

    fn build(
        &self,
        dataset: &dyn Dataset,
        container: &GeometryContainer<'_>,
        config: &BuildConfig,
    ) -> Result<Vec<Primitive>> {
        poloidal_nodes(dataset, container)?
            .into_iter()
            .enumerate()
            .map(|(element, node)| {
                let surface = revolve(&[node], config.max_phi, config.num_phi, false)?;
                Ok(Primitive::RevolvedSurface(surface.for_element(element)))
            })
            .collect()
    }
}

/// 极向线：每个部件的折线剖面扫出一个不封口的曲面
#[derive(Debug, Clone, Copy, Default)]
pub struct PoloidalLineBuilder;

impl GeometryBuilder for PoloidalLineBuilder {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::PoloidalLine
    }

    fn build(
        &self,
        dataset: &dyn Dataset,
        container: &GeometryContainer<'_>,
        config: &BuildConfig,
    ) -> Result<Vec<Primitive>> {
        let nodes = poloidal_nodes(dataset, container)?;
        let layout = parts::decode(dataset, container)?;
        check_node_total(container, layout.node_total(), nodes.len())?;

        layout
            .iter_parts()
            .filter(|(_, range)| !range.is_empty())
            .map(|(element, range)| {
                let surface = revolve(&nodes[range], config.max_phi, config.num_phi, false)?;
                Ok(Primitive::RevolvedSurface(surface.for_element(element)))
            })
            .collect()
    }
}

/// 极向多边形：每个部件的闭合环扫出一个实体，非整周时封闭两端
#[derive(Debug, Clone, Copy, Default)]
pub struct PoloidalPolygonBuilder;

impl GeometryBuilder for PoloidalPolygonBuilder {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::PoloidalPolygon
    }

    fn build(
        &self,
        dataset: &dyn Dataset,
        container: &GeometryContainer<'_>,
        config: &BuildConfig,
    ) -> Result<Vec<Primitive>> {
        let nodes = poloidal_nodes(dataset, container)?;
        let layout = parts::decode(dataset, container)?;
        check_node_total(container, layout.node_total(), nodes.len())?;

        layout
            .iter_parts()
            .filter(|(_, range)| !range.is_empty())
            .map(|(element, range)| {
                let ring = &nodes[range];
                check_ring(ring, element)?;
                let profile = close_ring(ring.to_vec());
                let surface = revolve(&profile, config.max_phi, config.num_phi, true)?;
                Ok(Primitive::RevolvedSurface(surface.for_element(element)))
            })
            .collect()
    }
}
