//! 数据集转储加载
//!
//! 数据集以 JSON 形式转储：顶层 `variables` 映射变量名到
//! `{ "attrs": {...}, "values": [...] }`。`.json.gz` 为 gzip 压缩的同一格式。

use crate::error::FileError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tokgeom_core::dataset::{find_geometry_quantities, InMemoryDataset};
use tracing::{debug, info};

/// 数据集文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    JsonGz,
}

impl DatasetFormat {
    /// 由文件扩展名判断格式
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if name.ends_with(".json.gz") {
            Ok(DatasetFormat::JsonGz)
        } else if name.ends_with(".json") {
            Ok(DatasetFormat::Json)
        } else {
            Err(FileError::UnsupportedExtension(path.display().to_string()))
        }
    }
}

/// 从读取器解析数据集
pub fn read_dataset<R: Read>(reader: R, format: DatasetFormat) -> Result<InMemoryDataset, FileError> {
    let dataset: InMemoryDataset = match format {
        DatasetFormat::Json => serde_json::from_reader(reader)?,
        DatasetFormat::JsonGz => serde_json::from_reader(GzDecoder::new(reader))?,
    };

    if dataset.is_empty() {
        return Err(FileError::InvalidFormat("dataset has no variables".to_string()));
    }
    Ok(dataset)
}

/// 把数据集写入写入器
pub fn write_dataset<W: Write>(dataset: &InMemoryDataset, writer: W, format: DatasetFormat) -> Result<(), FileError> {
    match format {
        DatasetFormat::Json => serde_json::to_writer(writer, dataset)?,
        DatasetFormat::JsonGz => {
            let mut encoder = GzEncoder::new(writer, Compression::default());
            serde_json::to_writer(&mut encoder, dataset)?;
            encoder.finish()?;
        }
    }
    Ok(())
}

/// 从文件加载数据集
pub fn load_dataset(path: &Path) -> Result<InMemoryDataset, FileError> {
    let format = DatasetFormat::from_path(path)?;
    let file = File::open(path)?;
    let dataset = read_dataset(BufReader::new(file), format)?;

    let quantities = find_geometry_quantities(&dataset);
    info!(
        "Loaded dataset {} ({} variables, {} with geometry)",
        path.display(),
        dataset.len(),
        quantities.len()
    );
    debug!("Geometry quantities: {:?}", quantities);

    Ok(dataset)
}

/// 保存数据集到文件
pub fn save_dataset(dataset: &InMemoryDataset, path: &Path) -> Result<(), FileError> {
    let format = DatasetFormat::from_path(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_dataset(dataset, &mut writer, format)?;
    writer.flush()?;
    info!("Saved dataset {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tokgeom_core::dataset::{Dataset, Variable};

    fn sample() -> InMemoryDataset {
        InMemoryDataset::new()
            .with_variable("r", Variable::new(vec![1.0, 2.5]).with_attr("standard_name", "_radial_distance"))
            .with_variable("probe_geometry", Variable::default().with_attr("geometry_type", "point"))
            .with_variable("probe", Variable::new(vec![0.0]).with_attr("geometry", "probe_geometry"))
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(DatasetFormat::from_path(Path::new("shot.json")).unwrap(), DatasetFormat::Json);
        assert_eq!(DatasetFormat::from_path(Path::new("dir/shot.JSON.GZ")).unwrap(), DatasetFormat::JsonGz);
        assert!(matches!(
            DatasetFormat::from_path(Path::new("shot.nc")),
            Err(FileError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn test_read_json() {
        let json = r#"{
            "variables": {
                "coil_geometry": { "attrs": { "geometry_type": "poloidal_line", "node_count": "coil_nc" } },
                "coil_nc": { "values": [2, 3] }
            }
        }"#;
        let dataset = read_dataset(Cursor::new(json), DatasetFormat::Json).unwrap();
        assert_eq!(dataset.attribute("coil_geometry", "geometry_type"), Some("poloidal_line"));
        assert_eq!(dataset.values("coil_nc"), Some(&[2.0, 3.0][..]));
    }

    #[test]
    fn test_gzip_round_trip() {
        let dataset = sample();
        let mut buffer = Vec::new();
        write_dataset(&dataset, &mut buffer, DatasetFormat::JsonGz).unwrap();
        // gzip 魔数
        assert_eq!(&buffer[..2], &[0x1f, 0x8b]);

        let loaded = read_dataset(Cursor::new(buffer), DatasetFormat::JsonGz).unwrap();
        assert_eq!(loaded, dataset);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let file_path = std::env::temp_dir().join("tokgeom_test_dataset.json.gz");

        save_dataset(&sample(), &file_path).expect("Failed to save");
        let loaded = load_dataset(&file_path).expect("Failed to load");
        assert_eq!(loaded, sample());

        std::fs::remove_file(&file_path).ok();
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            read_dataset(Cursor::new("{}"), DatasetFormat::Json),
            Err(FileError::InvalidFormat(_))
        ));
        assert!(matches!(
            read_dataset(Cursor::new("not json"), DatasetFormat::Json),
            Err(FileError::Json(_))
        ));
        assert!(read_dataset(Cursor::new(b"plain".to_vec()), DatasetFormat::JsonGz).is_err());
    }
}
