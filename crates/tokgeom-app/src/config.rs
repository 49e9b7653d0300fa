//! TOML 批处理任务配置

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokgeom_core::config::BuildConfig;

/// 批处理任务
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    /// 数据集文件（相对路径相对于任务文件）
    pub dataset: PathBuf,
    /// 所有量的默认构建参数
    #[serde(default)]
    pub defaults: BuildConfig,
    /// 要构建的量
    #[serde(default, rename = "quantity")]
    pub quantities: Vec<QuantityConfig>,
    /// 导出文件（扩展名决定格式）
    #[serde(default)]
    pub export: Option<PathBuf>,
}

/// 单个量及其覆盖参数
#[derive(Debug, Deserialize)]
pub struct QuantityConfig {
    pub name: String,
    /// 环向扫掠角度（弧度）
    #[serde(default)]
    pub max_phi: Option<f64>,
    /// 环向分段数
    #[serde(default)]
    pub num_phi: Option<usize>,
}

impl QuantityConfig {
    /// 在默认参数上应用覆盖
    pub fn build_config(&self, defaults: &BuildConfig) -> BuildConfig {
        let mut config = *defaults;
        if let Some(max_phi) = self.max_phi {
            config = config.with_max_phi(max_phi);
        }
        if let Some(num_phi) = self.num_phi {
            config = config.with_num_phi(num_phi);
        }
        config
    }
}

impl JobConfig {
    /// 按任务文件位置解析相对路径
    fn resolve_paths(&mut self, base: &Path) {
        if self.dataset.is_relative() {
            self.dataset = base.join(&self.dataset);
        }
        if let Some(export) = self.export.as_mut().filter(|p| p.is_relative()) {
            *export = base.join(&*export);
        }
    }

    /// 每个量的最终构建参数
    pub fn jobs(&self) -> Vec<(String, BuildConfig)> {
        self.quantities
            .iter()
            .map(|q| (q.name.clone(), q.build_config(&self.defaults)))
            .collect()
    }
}

/// 解析任务配置文本
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    Ok(config)
}

/// 加载 TOML 任务配置
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    if let Some(base) = path.parent() {
        config.resolve_paths(base);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    const JOB: &str = r#"
        dataset = "shot_30420.json.gz"
        export = "out/shot.obj"

        [defaults]
        num_phi = 24

        [[quantity]]
        name = "magnetics.flux_loop.flux"

        [[quantity]]
        name = "pf_active.coil.current"
        max_phi = 3.141592653589793
        num_phi = 30
    "#;

    #[test]
    fn test_parse_job() {
        let job = parse_config(JOB).unwrap();
        assert_eq!(job.dataset, PathBuf::from("shot_30420.json.gz"));
        assert_eq!(job.quantities.len(), 2);

        let jobs = job.jobs();
        assert_eq!(jobs[0].1.num_phi, 24);
        assert_eq!(jobs[0].1.max_phi, TAU);
        assert_eq!(jobs[1].1.num_phi, 30);
        assert_eq!(jobs[1].1.max_phi, PI);
    }

    #[test]
    fn test_relative_paths() {
        let mut job = parse_config(JOB).unwrap();
        job.resolve_paths(Path::new("/data/jobs"));
        assert_eq!(job.dataset, PathBuf::from("/data/jobs/shot_30420.json.gz"));
        assert_eq!(job.export, Some(PathBuf::from("/data/jobs/out/shot.obj")));
    }

    #[test]
    fn test_minimal_job() {
        let job = parse_config(r#"dataset = "/abs/shot.json""#).unwrap();
        assert!(job.quantities.is_empty());
        assert!(job.export.is_none());
        assert_eq!(job.defaults, BuildConfig::default());
    }

    #[test]
    fn test_missing_dataset() {
        assert!(parse_config("[[quantity]]\nname = \"x\"").is_err());
    }
}
