//! 检测器错误类型定义

use crate::data::DataError;
use crate::metric::MetricError;
use crate::nn::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectorError {
    /// 在`fit`之前调用了需要训练结果的方法
    #[error("检测器尚未训练，请先调用 fit")]
    NotFitted,

    #[error("配置不合法: {0}")]
    InvalidConfig(String),

    #[error("特征维度不匹配: 训练时为 {expected}, 实际为 {got}")]
    FeatureMismatch { expected: usize, got: usize },

    /// 训练过程中出现 NaN 或无穷的损失
    #[error("训练发散: {0}")]
    Diverged(String),

    #[error("计算图错误: {0}")]
    Graph(#[from] GraphError),

    #[error("数据错误: {0}")]
    Data(#[from] DataError),

    #[error("评估指标错误: {0}")]
    Metric(#[from] MetricError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),
}
