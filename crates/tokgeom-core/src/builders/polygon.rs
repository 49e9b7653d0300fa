//! 多边形几何：每个部件一个闭合环，三角化为网格

use super::{check_node_total, check_ring, close_ring, node_positions, GeometryBuilder};
use crate::config::BuildConfig;
use crate::container::{GeometryContainer, GeometryType};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::parts;
use crate::primitive::{PolygonMesh, Primitive};
use crate::triangulate::triangulate_3d;

#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonBuilder;

impl GeometryBuilder for PolygonBuilder {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
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

        layout
            .iter_parts()
            .filter(|(_, range)| !range.is_empty())
            .map(|(element, range)| {
                let ring = &points[range];
                check_ring(ring, element)?;
                let ring = close_ring(ring.to_vec());
                let triangles = triangulate_3d(&ring)?;
                Ok(Primitive::PolygonMesh(PolygonMesh::new(element, ring, triangles)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::fixtures::{run, Fixture};
    use crate::error::GeometryError;

    #[test]
    fn test_rings_are_closed() {
        // 一个开口方形 + 一个已闭合三角形
        let ds = Fixture::new("polygon")
            .coordinate("_radial_distance", &[1.0, 2.0, 2.0, 1.0, 3.0, 4.0, 3.5, 3.0])
            .coordinate("_azimuth", &[0.0, 0.0, 0.3, 0.3, 1.0, 1.0, 1.2, 1.0])
            .coordinate("_vertical_distance", &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0])
            .node_count(&[4.0, 4.0])
            .build();

        let primitives = run(&PolygonBuilder, &ds, &BuildConfig::default()).unwrap();
        assert_eq!(primitives.len(), 2);

        for primitive in &primitives {
            let Primitive::PolygonMesh(mesh) = primitive else {
                panic!("expected a polygon mesh");
            };
            let ring = mesh.ring();
            let (first, last) = (ring[0], ring[ring.len() - 1]);
            assert_eq!(first.x.to_bits(), last.x.to_bits());
            assert_eq!(first.y.to_bits(), last.y.to_bits());
            assert_eq!(first.z.to_bits(), last.z.to_bits());
        }

        let Primitive::PolygonMesh(square) = &primitives[0] else {
            unreachable!()
        };
        assert_eq!(square.ring().len(), 5);
        assert_eq!(square.triangles().len(), 2);

        let Primitive::PolygonMesh(triangle) = &primitives[1] else {
            unreachable!()
        };
        assert_eq!(triangle.ring().len(), 4);
        assert_eq!(triangle.triangles().len(), 1);
    }

    #[test]
    fn test_degenerate_ring() {
        let ds = Fixture::new("polygon")
            .coordinate("_radial_distance", &[1.0, 2.0, 1.0, 2.0, 2.0])
            .coordinate("_azimuth", &[0.0; 5])
            .coordinate("_vertical_distance", &[0.0, 0.0, 0.0, 1.0, 2.0])
            .node_count(&[2.0, 3.0])
            .build();

        assert!(matches!(
            run(&PolygonBuilder, &ds, &BuildConfig::default()),
            Err(GeometryError::InvalidGeometry(_))
        ));
    }
}
