//! # Graph Outlier
//!
//! `graph_outlier`用纯rust实现带属性图上的节点离群点检测：
//! 以多层感知机自编码器（MLP Autoencoder）重构节点特征，重构误差即离群分数。
//! 训练所需的张量运算、计算图、反向传播与优化器均由本crate自带的轻量框架提供。
//!
//! ```ignore
//! use graph_outlier::data::NodeData;
//! use graph_outlier::detector::{Detector, MlpAe, MlpAeConfig};
//!
//! let data = NodeData::from_npy("features.npy")?;
//! let mut detector = MlpAe::new(MlpAeConfig::default().with_seed(42));
//! detector.fit(&data)?;
//! let is_outlier = detector.predict(&data)?;
//! ```

pub mod data;
pub mod detector;
pub mod errors;
pub mod metric;
pub mod nn;
pub mod tensor;
mod utils;
