//! 构建与汇总

use std::path::Path;
use tokgeom_core::config::BuildConfig;
use tokgeom_core::dataset::{find_geometry_quantities, Dataset};
use tokgeom_core::registry::GeometrySession;
use tokgeom_file::export::{export_geometries, ExportFormat};
use tokgeom_renderer::{render_primitives, Camera3D, DrawList, Style};
use tracing::info;

/// 数据集中带几何的量：(量, 几何容器, 几何类型)
pub fn list_quantities<D: Dataset + ?Sized>(dataset: &D) -> Vec<(String, String, String)> {
    find_geometry_quantities(dataset)
        .into_iter()
        .map(|quantity| {
            let container = dataset.attribute(&quantity, "geometry").unwrap_or_default().to_string();
            let geometry_type = dataset
                .attribute(&container, "geometry_type")
                .unwrap_or("<missing>")
                .to_string();
            (quantity, container, geometry_type)
        })
        .collect()
}

/// 并行构建所有量
pub fn build_session<D: Dataset + Sync + ?Sized>(dataset: &D, jobs: &[(String, BuildConfig)]) -> GeometrySession {
    let mut session = GeometrySession::new();
    let added = session.build_all(dataset, jobs);
    info!(
        "Built {} primitives for {} of {} quantities",
        added,
        session.geometries().len(),
        jobs.len()
    );
    session
}

/// 打印构建结果与渲染批次信息
pub fn print_summary(session: &GeometrySession) {
    for geometry in session.geometries() {
        let triangles: usize = geometry.primitives.iter().map(|p| p.triangle_count()).sum();
        println!(
            "  {:<40} {:<16} {:>6} primitives {:>8} triangles",
            geometry.quantity,
            geometry.geometry_type.as_str(),
            geometry.primitives.len(),
            triangles
        );
    }
    for failure in session.failures() {
        println!("  {:<40} FAILED: {}", failure.quantity, failure.error);
    }

    let mut draw_list = DrawList::new();
    render_primitives(&mut draw_list, session.primitives(), &Style::default());
    if draw_list.is_empty() {
        return;
    }

    let mut camera = Camera3D::default();
    camera.fit_to_bounds(draw_list.bounds(), 0.05);
    println!();
    println!(
        "Scene: {} points, {} line segments, {} triangles",
        draw_list.point_count(),
        draw_list.line_segment_count(),
        draw_list.triangle_count()
    );
    for batch in draw_list.batches() {
        println!(
            "  {:<8} {:?}: {} elements, {} vertex bytes, {} index bytes",
            batch.label,
            batch.topology,
            batch.element_count,
            batch.vertex_bytes.len(),
            batch.index_bytes.len()
        );
    }
    println!(
        "Camera: target ({:.3}, {:.3}, {:.3}), distance {:.3}",
        camera.target.x, camera.target.y, camera.target.z, camera.distance
    );
}

/// 导出会话中的几何
pub fn export_session(session: &GeometrySession, path: &Path) -> anyhow::Result<()> {
    let format = ExportFormat::from_path(path)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    export_geometries(session.geometries(), format, path)?;
    println!("Exported to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokgeom_core::dataset::{InMemoryDataset, Variable};

    fn dataset() -> InMemoryDataset {
        InMemoryDataset::new()
            .with_variable("r", Variable::new(vec![2.0, 3.0]).with_attr("standard_name", "_radial_distance"))
            .with_variable("z", Variable::new(vec![0.0, 1.0]).with_attr("standard_name", "_vertical_distance"))
            .with_variable(
                "loop_geometry",
                Variable::default()
                    .with_attr("geometry_type", "poloidal_point")
                    .with_attr("node_coordinates", "r z"),
            )
            .with_variable("flux", Variable::new(vec![0.0]).with_attr("geometry", "loop_geometry"))
            .with_variable("orphan", Variable::new(vec![0.0]).with_attr("geometry", "nowhere"))
    }

    #[test]
    fn test_list_quantities() {
        let listed = list_quantities(&dataset());
        assert_eq!(
            listed,
            vec![("flux".to_string(), "loop_geometry".to_string(), "poloidal_point".to_string())]
        );
    }

    #[test]
    fn test_build_session() {
        let jobs = vec![
            ("flux".to_string(), BuildConfig::default().with_num_phi(12)),
            ("orphan".to_string(), BuildConfig::default()),
        ];
        let session = build_session(&dataset(), &jobs);
        assert_eq!(session.primitive_count(), 2);
        assert_eq!(session.failures().len(), 1);
        print_summary(&session);
    }
}
