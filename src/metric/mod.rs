/*
 * @Description  : 离群检测的排序类评估指标：ROC-AUC、平均精度、precision@k与recall@k
 *                 所有函数的`labels`中 true 表示离群（正类），`scores`越大越可能离群
 */

mod error;

#[cfg(test)]
mod tests;

pub use error::MetricError;

use std::cmp::Ordering;

/// ROC 曲线下面积（Mann-Whitney U 统计量形式）
///
/// 按分数升序赋予秩（从1开始），分数相同的样本取平均秩，于是
/// `AUC = (正样本秩和 - P(P+1)/2) / (P * Q)`，其中 P、Q 分别为正负样本数。
pub fn roc_auc_score(labels: &[bool], scores: &[f32]) -> Result<f32, MetricError> {
    check_inputs(labels, scores)?;
    let num_pos = labels.iter().filter(|&&l| l).count();
    let num_neg = labels.len() - num_pos;
    if num_pos == 0 || num_neg == 0 {
        return Err(MetricError::SingleClass);
    }

    let ranks = average_ranks(scores);
    let pos_rank_sum: f64 = ranks
        .iter()
        .zip(labels)
        .filter(|(_, l)| **l)
        .map(|(r, _)| r)
        .sum();

    let (p, q) = (num_pos as f64, num_neg as f64);
    let auc = (pos_rank_sum - p * (p + 1.0) / 2.0) / (p * q);
    Ok(auc as f32)
}

/// 平均精度：`AP = Σ (R_i - R_{i-1}) * P_i`
///
/// 按分数降序扫描，每个不同的分数值视为一个阈值（并列分数一起越过阈值），
/// `P_i`、`R_i`为该阈值下的精确率与召回率。
pub fn average_precision(labels: &[bool], scores: &[f32]) -> Result<f32, MetricError> {
    check_inputs(labels, scores)?;
    let num_pos = labels.iter().filter(|&&l| l).count();
    if num_pos == 0 {
        return Err(MetricError::NoPositive);
    }

    let order = descending_order(scores);
    let mut ap = 0.0f64;
    let mut true_pos = 0usize;
    let mut prev_recall = 0.0f64;
    let mut i = 0;
    while i < order.len() {
        // 一次吞下所有与当前分数并列的样本
        let threshold = scores[order[i]];
        while i < order.len() && scores[order[i]] == threshold {
            if labels[order[i]] {
                true_pos += 1;
            }
            i += 1;
        }
        let precision = true_pos as f64 / i as f64;
        let recall = true_pos as f64 / num_pos as f64;
        ap += (recall - prev_recall) * precision;
        prev_recall = recall;
    }
    Ok(ap as f32)
}

/// 分数最高的`k`个样本中离群点所占的比例
pub fn precision_at_k(labels: &[bool], scores: &[f32], k: usize) -> Result<f32, MetricError> {
    let hits = hits_at_k(labels, scores, k)?;
    Ok(hits as f32 / k as f32)
}

/// 分数最高的`k`个样本覆盖了全部离群点中的多少比例
pub fn recall_at_k(labels: &[bool], scores: &[f32], k: usize) -> Result<f32, MetricError> {
    let hits = hits_at_k(labels, scores, k)?;
    let num_pos = labels.iter().filter(|&&l| l).count();
    if num_pos == 0 {
        return Err(MetricError::NoPositive);
    }
    Ok(hits as f32 / num_pos as f32)
}

fn hits_at_k(labels: &[bool], scores: &[f32], k: usize) -> Result<usize, MetricError> {
    check_inputs(labels, scores)?;
    if k == 0 || k > labels.len() {
        return Err(MetricError::InvalidK {
            k,
            len: labels.len(),
        });
    }
    Ok(descending_order(scores)
        .into_iter()
        .take(k)
        .filter(|&i| labels[i])
        .count())
}

fn check_inputs(labels: &[bool], scores: &[f32]) -> Result<(), MetricError> {
    if labels.len() != scores.len() {
        return Err(MetricError::LengthMismatch {
            labels: labels.len(),
            scores: scores.len(),
        });
    }
    if labels.is_empty() {
        return Err(MetricError::Empty);
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(MetricError::NonFinite);
    }
    Ok(())
}

// 稳定排序：分数相同时保持原有下标顺序
fn descending_order(scores: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    order
}

fn average_ranks(scores: &[f32]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0f64; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // 下标 start..end 对应秩 start+1..=end，取平均
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}
