//! TokGeom 渲染
//!
//! 渲染只消费构建好的图元，不修改它们。
//!
//! # 特点
//!
//! - **统一接口**：`Renderer` trait 描述点、线、网格、箭头和旋转曲面的绘制
//! - **批量处理**：`DrawList` 把全部图元合并成 GPU 可直接上传的顶点/索引缓冲
//! - **自动取景**：`Camera3D` 按场景包围盒对准目标

pub mod camera;
pub mod draw_list;
pub mod renderer;
pub mod style;
pub mod vertex;

pub use camera::Camera3D;
pub use draw_list::{DrawBatch, DrawList};
pub use renderer::{render_primitives, Renderer};
pub use style::{Color, Style};
