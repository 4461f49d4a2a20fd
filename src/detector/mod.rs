/*
 * @Description  : 离群检测器：统一的 Detector trait、基于污染率的阈值，以及 MLP 自编码器实现
 */

mod error;
mod mlpae;

#[cfg(test)]
mod tests;

pub use error::DetectorError;
pub use mlpae::{MlpAe, MlpAeConfig};

use crate::data::NodeData;
use serde::{Deserialize, Serialize};
use statrs::function::erf::erf;
use tracing::warn;

/// 将离群分数转换为概率的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbaMethod {
    /// 以训练分数的最小/最大值做线性缩放，截断到[0, 1]
    #[default]
    Linear,
    /// 高斯统一化：`erf((s - μ) / (σ√2))`，截断到[0, 1]
    Unify,
}

/// 训练后由训练分数推出的判定状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionState {
    decision_scores: Vec<f32>,
    threshold: f32,
    labels: Vec<bool>,
}

impl DecisionState {
    /// 阈值取训练分数的`100 * (1 - contamination)`分位数，分数严格大于阈值者判为离群
    pub fn from_scores(decision_scores: Vec<f32>, contamination: f32) -> Self {
        let threshold = percentile(&decision_scores, 100.0 * (1.0 - contamination));
        let labels = decision_scores.iter().map(|&s| s > threshold).collect();
        Self {
            decision_scores,
            threshold,
            labels,
        }
    }

    pub fn decision_scores(&self) -> &[f32] {
        &self.decision_scores
    }

    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn labels(&self) -> &[bool] {
        &self.labels
    }

    /// 每个分数对应`[正常概率, 离群概率]`
    pub fn proba(&self, scores: &[f32], method: ProbaMethod) -> Vec<[f32; 2]> {
        let outlier_proba: Vec<f32> = match method {
            ProbaMethod::Linear => {
                let (min, max) = self
                    .decision_scores
                    .iter()
                    .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
                        (lo.min(s), hi.max(s))
                    });
                let range = max - min;
                // 训练分数全部相同时退化为平移
                let range = if range > 0.0 { range } else { 1.0 };
                scores
                    .iter()
                    .map(|&s| ((s - min) / range).clamp(0.0, 1.0))
                    .collect()
            }
            ProbaMethod::Unify => {
                let (mu, sigma) = mean_std(&self.decision_scores);
                if sigma == 0.0 {
                    warn!("训练分数的标准差为0，高斯统一化退化为阶跃函数");
                    scores
                        .iter()
                        .map(|&s| if s > mu as f32 { 1.0 } else { 0.0 })
                        .collect()
                } else {
                    scores
                        .iter()
                        .map(|&s| {
                            let z = (s as f64 - mu) / (sigma * std::f64::consts::SQRT_2);
                            (erf(z) as f32).clamp(0.0, 1.0)
                        })
                        .collect()
                }
            }
        };
        outlier_proba.into_iter().map(|p| [1.0 - p, p]).collect()
    }
}

/// 离群检测器
///
/// # 使用示例
/// ```ignore
/// let mut detector = MlpAe::new(MlpAeConfig::default().with_seed(42));
/// detector.fit(&data)?;
/// let labels = detector.predict(&data)?;
/// let proba = detector.predict_proba(&data, ProbaMethod::Unify)?;
/// ```
pub trait Detector {
    /// 用`data`训练检测器，训练分数、阈值与标签随之确定
    fn fit(&mut self, data: &NodeData) -> Result<&mut Self, DetectorError>
    where
        Self: Sized;

    /// 原始离群分数，越大越可能离群
    fn decision_function(&self, data: &NodeData) -> Result<Vec<f32>, DetectorError>;

    /// 训练得到的判定状态，未训练时为 None
    fn decision_state(&self) -> Option<&DecisionState>;

    fn is_fitted(&self) -> bool {
        self.decision_state().is_some()
    }

    /// 训练数据上的离群分数
    fn decision_scores(&self) -> Result<&[f32], DetectorError> {
        Ok(self.fitted_state()?.decision_scores())
    }

    fn threshold(&self) -> Result<f32, DetectorError> {
        Ok(self.fitted_state()?.threshold())
    }

    /// 训练数据上的离群标签
    fn labels(&self) -> Result<&[bool], DetectorError> {
        Ok(self.fitted_state()?.labels())
    }

    /// 分数严格大于训练阈值者判为离群
    fn predict(&self, data: &NodeData) -> Result<Vec<bool>, DetectorError> {
        let threshold = self.threshold()?;
        Ok(self
            .decision_function(data)?
            .into_iter()
            .map(|s| s > threshold)
            .collect())
    }

    /// 每个节点的`[正常概率, 离群概率]`
    fn predict_proba(
        &self,
        data: &NodeData,
        method: ProbaMethod,
    ) -> Result<Vec<[f32; 2]>, DetectorError> {
        let state = self.fitted_state()?;
        let scores = self.decision_function(data)?;
        Ok(state.proba(&scores, method))
    }

    #[doc(hidden)]
    fn fitted_state(&self) -> Result<&DecisionState, DetectorError> {
        self.decision_state().ok_or(DetectorError::NotFitted)
    }
}

/// 线性插值的百分位数（与 NumPy 的默认方式一致），`q`取值[0, 100]
pub fn percentile(values: &[f32], q: f32) -> f32 {
    if values.is_empty() {
        return f32::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);

    let rank = (q.clamp(0.0, 100.0) as f64 / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = (rank - lo as f64) as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// 总体均值与标准差（ddof = 0）
fn mean_std(values: &[f32]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, var.sqrt())
}
