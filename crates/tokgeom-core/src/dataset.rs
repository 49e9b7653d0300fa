//! 数据集访问接口
//!
//! 几何容器的解码只需要三种能力：按名称查找变量、读取字符串属性、
//! 读取已物化的数值数组。文件的打开与读取不在核心范围内，
//! 由实现 [`Dataset`] 的外部类型负责。

use crate::error::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 只读数据集
pub trait Dataset {
    /// 所有变量名
    fn variable_names(&self) -> Vec<&str>;

    /// 是否包含指定变量
    fn contains(&self, variable: &str) -> bool;

    /// 读取变量的字符串属性
    fn attribute(&self, variable: &str, attribute: &str) -> Option<&str>;

    /// 读取变量的数值
    fn values(&self, variable: &str) -> Option<&[f64]>;

    /// 读取必需的属性
    fn require_attribute(&self, variable: &str, attribute: &str) -> Result<&str> {
        if !self.contains(variable) {
            return Err(GeometryError::MissingVariable(variable.to_string()));
        }
        self.attribute(variable, attribute)
            .ok_or_else(|| GeometryError::MissingAttribute {
                variable: variable.to_string(),
                attribute: attribute.to_string(),
            })
    }

    /// 读取必需的数值数组
    fn require_values(&self, variable: &str) -> Result<&[f64]> {
        self.values(variable)
            .ok_or_else(|| GeometryError::MissingVariable(variable.to_string()))
    }
}

/// 属性值
///
/// NetCDF 属性可以是文本或数值，几何容器只关心文本属性。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Numbers(Vec<f64>),
}

impl AttributeValue {
    /// 以文本形式读取
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// 数据集中的一个变量
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// 属性
    #[serde(default)]
    pub attrs: BTreeMap<String, AttributeValue>,

    /// 数值（标量变量或几何容器可为空）
    #[serde(default)]
    pub values: Vec<f64>,
}

impl Variable {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            attrs: BTreeMap::new(),
            values,
        }
    }

    /// 设置属性
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// 常驻内存的数据集
///
/// 加载一次之后不再修改，可以在多个线程间共享。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryDataset {
    #[serde(default)]
    variables: BTreeMap<String, Variable>,
}

impl InMemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加变量（构建阶段使用）
    pub fn with_variable(mut self, name: impl Into<String>, variable: Variable) -> Self {
        self.variables.insert(name.into(), variable);
        self
    }

    /// 添加变量
    pub fn insert(&mut self, name: impl Into<String>, variable: Variable) {
        self.variables.insert(name.into(), variable);
    }

    /// 获取变量
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// 变量数量
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Dataset for InMemoryDataset {
    fn variable_names(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).collect()
    }

    fn contains(&self, variable: &str) -> bool {
        self.variables.contains_key(variable)
    }

    fn attribute(&self, variable: &str, attribute: &str) -> Option<&str> {
        self.variables
            .get(variable)?
            .attrs
            .get(attribute)?
            .as_str()
    }

    fn values(&self, variable: &str) -> Option<&[f64]> {
        self.variables.get(variable).map(|v| v.values.as_slice())
    }
}

/// 查找所有带几何容器的量
///
/// 返回 `geometry` 属性指向数据集中已有变量的变量名。
pub fn find_geometry_quantities<D: Dataset + ?Sized>(dataset: &D) -> Vec<String> {
    dataset
        .variable_names()
        .into_iter()
        .filter(|name| {
            dataset
                .attribute(name, "geometry")
                .is_some_and(|container| dataset.contains(container))
        })
        .map(str::to_string)
        .collect()
}
