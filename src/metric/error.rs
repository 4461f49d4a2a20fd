//! 评估指标错误类型定义

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricError {
    #[error("标签与分数的长度不一致: 标签 {labels}, 分数 {scores}")]
    LengthMismatch { labels: usize, scores: usize },

    #[error("输入为空")]
    Empty,

    /// ROC-AUC 需要同时存在正负两类样本
    #[error("标签中只有一个类别，无法计算ROC-AUC")]
    SingleClass,

    #[error("标签中没有正样本（离群点）")]
    NoPositive,

    #[error("k 须在[1, {len}]内，实际为{k}")]
    InvalidK { k: usize, len: usize },

    #[error("分数中含有NaN或无穷值")]
    NonFinite,
}
