//! 几何构建错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Quantity '{0}' does not have a geometry container")]
    MissingGeometryAttribute(String),

    #[error("'{0}' is not a supported geometry type")]
    UnknownGeometryType(String),

    #[error("{standard_name} does not appear in {group}")]
    StandardNameNotFound {
        standard_name: String,
        group: String,
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Direction vector at node {index} has zero length")]
    DegenerateVector { index: usize },

    #[error("Variable not found: {0}")]
    MissingVariable(String),

    #[error("Variable '{variable}' has no attribute '{attribute}'")]
    MissingAttribute { variable: String, attribute: String },
}

impl GeometryError {
    /// 创建无效几何错误
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidGeometry(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
