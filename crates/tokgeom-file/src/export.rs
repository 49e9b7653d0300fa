//! 导出模块
//!
//! 支持将构建好的图元导出为 Wavefront OBJ 或 JSON。

use crate::error::FileError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tokgeom_core::math::Point3;
use tokgeom_core::primitive::Primitive;
use tokgeom_core::registry::QuantityGeometry;
use tracing::info;

/// 向量场箭头默认长度
pub const DEFAULT_ARROW_LENGTH: f64 = 0.6;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Obj,
    Json,
}

impl ExportFormat {
    /// 由文件扩展名判断格式
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("obj") => Ok(ExportFormat::Obj),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(FileError::UnsupportedExtension(path.display().to_string())),
        }
    }
}

/// OBJ 导出器
///
/// 每个量一个组（`g`），每个图元一个对象（`o`）。
/// 向量场写成从锚点出发的线段，旋转曲面没有面时写成扫掠轨迹。
#[derive(Debug, Clone)]
pub struct ObjExporter {
    /// 向量场箭头长度
    pub arrow_length: f64,
    /// 顶点坐标小数位数
    pub precision: usize,
}

impl Default for ObjExporter {
    fn default() -> Self {
        Self {
            arrow_length: DEFAULT_ARROW_LENGTH,
            precision: 6,
        }
    }
}

/// OBJ 写入状态：顶点索引从 1 开始且全局累计
struct ObjWriter<'a, W: Write> {
    out: &'a mut W,
    precision: usize,
    vertex_count: usize,
}

impl<W: Write> ObjWriter<'_, W> {
    /// 写入顶点，返回第一个顶点的 OBJ 索引
    fn vertices<'p>(&mut self, points: impl IntoIterator<Item = &'p Point3>) -> Result<usize, FileError> {
        let first = self.vertex_count + 1;
        let precision = self.precision;
        for p in points {
            writeln!(self.out, "v {:.*} {:.*} {:.*}", precision, p.x, precision, p.y, precision, p.z)?;
            self.vertex_count += 1;
        }
        Ok(first)
    }

    fn faces(&mut self, base: usize, triangles: &[[u32; 3]]) -> Result<(), FileError> {
        for [a, b, c] in triangles {
            writeln!(
                self.out,
                "f {} {} {}",
                base + *a as usize,
                base + *b as usize,
                base + *c as usize
            )?;
        }
        Ok(())
    }

    fn line(&mut self, indices: impl IntoIterator<Item = usize>) -> Result<(), FileError> {
        let indices: Vec<String> = indices.into_iter().map(|i| i.to_string()).collect();
        if indices.len() >= 2 {
            writeln!(self.out, "l {}", indices.join(" "))?;
        }
        Ok(())
    }
}

impl ObjExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arrow_length(mut self, arrow_length: f64) -> Self {
        self.arrow_length = arrow_length;
        self
    }

    /// 写入 OBJ 文本
    pub fn write<W: Write>(&self, geometries: &[QuantityGeometry], out: &mut W) -> Result<(), FileError> {
        let mut obj = ObjWriter {
            out,
            precision: self.precision,
            vertex_count: 0,
        };
        writeln!(obj.out, "# tokgeom export")?;

        for geometry in geometries {
            writeln!(obj.out, "g {}", sanitize(&geometry.quantity))?;
            for (index, primitive) in geometry.primitives.iter().enumerate() {
                writeln!(
                    obj.out,
                    "o {}_{}_{}",
                    sanitize(&geometry.quantity),
                    primitive.type_name(),
                    index
                )?;
                self.write_primitive(&mut obj, primitive)?;
            }
        }
        Ok(())
    }

    fn write_primitive<W: Write>(&self, obj: &mut ObjWriter<'_, W>, primitive: &Primitive) -> Result<(), FileError> {
        match primitive {
            Primitive::PointSet(points) => {
                let base = obj.vertices(points.points())?;
                for i in 0..points.len() {
                    writeln!(obj.out, "p {}", base + i)?;
                }
            }
            Primitive::Polyline(polyline) => {
                let base = obj.vertices(polyline.points())?;
                obj.line(base..base + polyline.points().len())?;
            }
            Primitive::PolygonMesh(mesh) => {
                // 闭合环的最后一点是首点的副本
                let ring = &mesh.ring()[..mesh.ring().len().saturating_sub(1)];
                let base = obj.vertices(ring)?;
                if mesh.triangles().is_empty() {
                    obj.line((base..base + ring.len()).chain(std::iter::once(base)))?;
                } else {
                    obj.faces(base, mesh.triangles())?;
                }
            }
            Primitive::VectorField(field) => {
                for (anchor, direction) in field.points().iter().zip(field.directions()) {
                    let tip = anchor + direction * self.arrow_length;
                    let base = obj.vertices([anchor, &tip])?;
                    obj.line([base, base + 1])?;
                }
            }
            Primitive::RevolvedSurface(surface) => {
                let base = obj.vertices(surface.vertices())?;
                if surface.triangles().is_empty() {
                    for i in 0..surface.profile_len() {
                        let path = (0..surface.ring_count()).map(|k| base + k * surface.profile_len() + i);
                        if surface.is_full_revolution() {
                            obj.line(path.chain(std::iter::once(base + i)))?;
                        } else {
                            obj.line(path)?;
                        }
                    }
                } else {
                    obj.faces(base, surface.triangles())?;
                }
            }
        }
        Ok(())
    }

    /// 导出到文件
    pub fn export_to_file(&self, geometries: &[QuantityGeometry], path: &Path) -> Result<(), FileError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(geometries, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// OBJ 名称中不能有空白
fn sanitize(name: &str) -> String {
    name.chars().map(|c| if c.is_whitespace() { '_' } else { c }).collect()
}

#[derive(Serialize)]
struct JsonExport<'a> {
    geometries: &'a [QuantityGeometry],
}

/// 写入 JSON
pub fn write_json<W: Write>(geometries: &[QuantityGeometry], out: W) -> Result<(), FileError> {
    serde_json::to_writer_pretty(out, &JsonExport { geometries })?;
    Ok(())
}

/// 通用导出函数
pub fn export_geometries(geometries: &[QuantityGeometry], format: ExportFormat, path: &Path) -> Result<(), FileError> {
    match format {
        ExportFormat::Obj => ObjExporter::new().export_to_file(geometries, path)?,
        ExportFormat::Json => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_json(geometries, &mut writer)?;
            writer.flush()?;
        }
    }

    let primitives: usize = geometries.iter().map(|g| g.primitives.len()).sum();
    info!(
        "Exported {} primitives from {} quantities to {}",
        primitives,
        geometries.len(),
        path.display()
    );
    Ok(())
}
