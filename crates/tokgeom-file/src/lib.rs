//! TokGeom 文件处理
//!
//! 支持：
//! - 数据集转储加载：`.json` 与 gzip 压缩的 `.json.gz`
//! - 图元导出：Wavefront `.obj` 与 `.json`

pub mod dataset;
pub mod error;
pub mod export;

pub use dataset::{load_dataset, save_dataset, DatasetFormat};
pub use error::FileError;
pub use export::{export_geometries, ExportFormat, ObjExporter};
