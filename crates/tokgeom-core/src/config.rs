//! 单次构建配置

use crate::math::FULL_TURN;
use crate::transform::OrientationFormula;
use serde::{Deserialize, Serialize};

/// 默认环向分段数
pub const DEFAULT_NUM_PHI: usize = 20;

/// 构建配置
///
/// `max_phi` 与 `num_phi` 只对三种极向（轴对称）类型生效。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// 环向扫掠角度（弧度），默认整周
    pub max_phi: f64,
    /// 环向分段数
    pub num_phi: usize,
    /// 单位向量方向公式
    pub orientation: OrientationFormula,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_phi: FULL_TURN,
            num_phi: DEFAULT_NUM_PHI,
            orientation: OrientationFormula::default(),
        }
    }
}

impl BuildConfig {
    /// 设置扫掠角度
    pub fn with_max_phi(mut self, max_phi: f64) -> Self {
        self.max_phi = max_phi;
        self
    }

    /// 设置分段数
    pub fn with_num_phi(mut self, num_phi: usize) -> Self {
        self.num_phi = num_phi;
        self
    }

    /// 设置方向公式
    pub fn with_orientation(mut self, orientation: OrientationFormula) -> Self {
        self.orientation = orientation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.num_phi, 20);
        assert_eq!(config.max_phi, std::f64::consts::TAU);
        assert_eq!(config.orientation, OrientationFormula::AzimuthOffset);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: BuildConfig = serde_json::from_str(r#"{ "num_phi": 30 }"#).unwrap();
        assert_eq!(config.num_phi, 30);
        assert_eq!(config.max_phi, std::f64::consts::TAU);

        let config: BuildConfig = serde_json::from_str(r#"{ "orientation": "absolute" }"#).unwrap();
        assert_eq!(config.orientation, OrientationFormula::Absolute);
    }
}
