//! 数据错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 数据加载与校验相关错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 文件未找到
    #[error("文件未找到: {0}")]
    FileNotFound(PathBuf),

    /// IO 错误
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 格式错误（如 .npy 的元素类型或维度不受支持）
    #[error("格式错误: {0}")]
    FormatError(String),

    /// 索引越界
    #[error("索引越界: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 形状不匹配
    #[error("形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// .npy 数组的维数与要求不符（如特征矩阵必须为2阶）
    #[error("维数不符: {0}")]
    NdimMismatch(String),

    /// 数据为空
    #[error("数据为空: {0}")]
    Empty(String),

    /// 特征中含有 NaN 或无穷值
    #[error("特征中含有非有限值（NaN 或无穷）")]
    NonFinite,

    /// 参数不合法
    #[error("参数不合法: {0}")]
    InvalidArgument(String),
}
