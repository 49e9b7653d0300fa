//! 单位向量几何：节点位置 + 法向方向

use super::{node_positions, GeometryBuilder};
use crate::config::BuildConfig;
use crate::container::{GeometryContainer, GeometryType, NODE_COORDINATES, NODE_ORIENTATIONS};
use crate::dataset::Dataset;
use crate::error::{GeometryError, Result};
use crate::primitive::{Primitive, VectorField};
use crate::standard_name::{resolve, StandardName};
use crate::transform::unit_vector_field;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnitVectorBuilder;

impl GeometryBuilder for UnitVectorBuilder {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::UnitVector
    }

    fn build(
        &self,
        dataset: &dyn Dataset,
        container: &GeometryContainer<'_>,
        config: &BuildConfig,
    ) -> Result<Vec<Primitive>> {
        let points = node_positions(dataset, container)?;
        let phi = resolve(dataset, container, NODE_COORDINATES, StandardName::Azimuth)?;
        let pol_angle = resolve(dataset, container, NODE_ORIENTATIONS, StandardName::NormalPoloidalAngle)?;
        let tor_angle = resolve(dataset, container, NODE_ORIENTATIONS, StandardName::NormalToroidalAngle)?;

        let directions = unit_vector_field(pol_angle, tor_angle, phi, config.orientation)?;
        let field = VectorField::new(points, directions).ok_or_else(|| {
            GeometryError::invalid(format!(
                "{}: orientation count does not match node count",
                container.name
            ))
        })?;

        Ok(vec![Primitive::VectorField(field)])
    }
}
