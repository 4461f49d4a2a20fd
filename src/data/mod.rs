//! 数据模块
//!
//! 提供带属性图的节点数据容器，以及用于评估的合成离群点注入。
//!
//! # 主要组件
//!
//! - [`NodeData`]: 节点特征 `x: [N, F]`、可选的离群标签与可选的边列表
//! - [`gen_contextual_outliers`]: 上下文离群点（特征替换为远处节点的特征）
//! - [`gen_structural_outliers`]: 结构离群点（若干节点组成稠密团）
//! - [`DataError`]: 数据相关错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use graph_outlier::data::{NodeData, gen_contextual_outliers};
//!
//! let data = NodeData::from_npy("features.npy")?;
//! let data = gen_contextual_outliers(&data, 10, 50, 42)?;
//! assert_eq!(data.num_outliers(), 10);
//! ```

pub mod error;
mod node_data;
mod outlier;

#[cfg(test)]
mod tests;

pub use error::DataError;
pub use node_data::NodeData;
pub use outlier::{gen_contextual_outliers, gen_structural_outliers};
