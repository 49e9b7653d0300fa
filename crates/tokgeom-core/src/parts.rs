//! 多部件节点区间解码
//!
//! 几何容器用两个计数数组描述不定长的多部件结构：
//! - `node_count`：每个几何元素包含的节点数
//! - `part_node_count`：每个部件包含的节点数（缺省时等于 `node_count`）
//!
//! 解码结果把 元素 → 部件 → 节点区间 两级映射展开为四个平行数组。
//! 每个元素只有一个部件的情况只是 `part_node_count == node_count` 的特例，
//! 走同一条代码路径。

use crate::container::GeometryContainer;
use crate::dataset::Dataset;
use crate::error::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 解码后的部件布局
///
/// 元素 `i` 拥有部件 `part_starts[i]..part_ends[i]`，
/// 部件 `p` 拥有节点 `node_starts[p]..node_ends[p]`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartLayout {
    pub part_starts: Vec<usize>,
    pub part_ends: Vec<usize>,
    pub node_starts: Vec<usize>,
    pub node_ends: Vec<usize>,
}

impl PartLayout {
    /// 几何元素数量
    pub fn element_count(&self) -> usize {
        self.part_ends.len()
    }

    /// 部件数量
    pub fn part_count(&self) -> usize {
        self.node_ends.len()
    }

    /// 节点总数
    pub fn node_total(&self) -> usize {
        self.node_ends.last().copied().unwrap_or(0)
    }

    /// 元素拥有的部件区间
    pub fn parts_of(&self, element: usize) -> Range<usize> {
        self.part_starts[element]..self.part_ends[element]
    }

    /// 部件拥有的节点区间
    pub fn node_range(&self, part: usize) -> Range<usize> {
        self.node_starts[part]..self.node_ends[part]
    }

    /// 按元素顺序遍历所有部件，产出 (元素索引, 节点区间)
    pub fn iter_parts(&self) -> impl Iterator<Item = (usize, Range<usize>)> + '_ {
        (0..self.element_count()).flat_map(move |element| {
            self.parts_of(element)
                .map(move |part| (element, self.node_range(part)))
        })
    }
}

/// 把计数数组的浮点值转换为非负整数
pub fn counts_from_values(values: &[f64], name: &str) -> Result<Vec<usize>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < usize::MAX as f64 {
                Ok(v as usize)
            } else {
                Err(GeometryError::invalid(format!(
                    "{name}[{i}] = {v} is not a non-negative integer count"
                )))
            }
        })
        .collect()
}

/// 累加和，溢出时报错
fn cumsum(counts: &[usize], name: &str) -> Result<Vec<usize>> {
    let mut total = 0usize;
    counts
        .iter()
        .map(|&c| {
            total = total
                .checked_add(c)
                .ok_or_else(|| GeometryError::invalid(format!("{name} total overflows")))?;
            Ok(total)
        })
        .collect()
}

/// 右移一位，首位补零
fn shift_right(ends: &[usize]) -> Vec<usize> {
    std::iter::once(0)
        .chain(ends.iter().copied())
        .take(ends.len())
        .collect()
}

/// 从计数数组解码部件布局
pub fn decode_counts(node_count: &[usize], part_node_count: &[usize]) -> Result<PartLayout> {
    let node_ends = cumsum(part_node_count, "part_node_count")?;
    let node_starts = shift_right(&node_ends);
    let geom_node_ends = cumsum(node_count, "node_count")?;

    let part_total = node_ends.last().copied().unwrap_or(0);
    let geom_total = geom_node_ends.last().copied().unwrap_or(0);
    if part_total != geom_total {
        return Err(GeometryError::invalid(format!(
            "part_node_count sums to {part_total} but node_count sums to {geom_total}"
        )));
    }

    // 元素的部件终点：第一个节点终点超过元素节点终点的部件
    let geom_part_ends: Vec<usize> = geom_node_ends
        .iter()
        .map(|&end| node_ends.partition_point(|&e| e <= end))
        .collect();

    // 元素边界必须落在部件边界上
    for (element, (&node_end, &part_end)) in geom_node_ends.iter().zip(&geom_part_ends).enumerate() {
        let covered = part_end.checked_sub(1).map_or(0, |p| node_ends[p]);
        if covered != node_end {
            return Err(GeometryError::invalid(format!(
                "geometry element {element} ends at node {node_end}, inside a part"
            )));
        }
    }

    Ok(PartLayout {
        part_starts: shift_right(&geom_part_ends),
        part_ends: geom_part_ends,
        node_starts,
        node_ends,
    })
}

/// 读取容器的 (node_count, part_node_count)
fn read_counts<D: Dataset + ?Sized>(
    dataset: &D,
    container: &GeometryContainer<'_>,
) -> Result<(Vec<usize>, Vec<usize>)> {
    let node_count_name = container
        .node_count
        .ok_or_else(|| GeometryError::MissingAttribute {
            variable: container.name.to_string(),
            attribute: "node_count".to_string(),
        })?;
    let node_count = counts_from_values(dataset.require_values(node_count_name)?, node_count_name)?;

    let part_node_count = match container.effective_part_node_count() {
        Some(name) if name != node_count_name => counts_from_values(dataset.require_values(name)?, name)?,
        _ => node_count.clone(),
    };

    Ok((node_count, part_node_count))
}

/// 解码几何容器的部件布局
pub fn decode<D: Dataset + ?Sized>(dataset: &D, container: &GeometryContainer<'_>) -> Result<PartLayout> {
    let (node_count, part_node_count) = read_counts(dataset, container)?;
    decode_counts(&node_count, &part_node_count)
}

/// 由部件计数直接产出顺序的节点区间
pub fn part_ranges(part_node_count: &[usize]) -> Result<Vec<Range<usize>>> {
    let ends = cumsum(part_node_count, "part_node_count")?;
    Ok(shift_right(&ends).into_iter().zip(ends).map(|(start, end)| start..end).collect())
}

/// 不分组地遍历容器的所有部件节点区间
pub fn iterate_parts<D: Dataset + ?Sized>(
    dataset: &D,
    container: &GeometryContainer<'_>,
) -> Result<Vec<Range<usize>>> {
    let (_, part_node_count) = read_counts(dataset, container)?;
    part_ranges(&part_node_count)
}
