/*
 * @Description  : 合成离群点注入，用于在无真实标签的数据上评估检测器
 */

use super::{DataError, NodeData};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index::sample;

/// 注入`n`个上下文离群点
///
/// 随机选取`n`个互不相同的节点，对每个节点再随机抽取`k`个候选节点，
/// 用其中与该节点欧氏距离最远的候选节点的特征替换该节点的特征，并将其标记为离群。
/// 原有标签（若有）会被保留，新离群点在其上按位取或。
pub fn gen_contextual_outliers(
    data: &NodeData,
    n: usize,
    k: usize,
    seed: u64,
) -> Result<NodeData, DataError> {
    let num_nodes = data.num_nodes();
    if n > num_nodes {
        return Err(DataError::InvalidArgument(format!(
            "离群点个数{}超过了节点数{}",
            n, num_nodes
        )));
    }
    if k == 0 || k > num_nodes {
        return Err(DataError::InvalidArgument(format!(
            "候选节点个数须在[1, {}]内，实际为{}",
            num_nodes, k
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let (mut x, y, edges) = data.clone().into_parts();
    let mut y = y.unwrap_or_else(|| vec![false; num_nodes]);
    let original = x.clone();

    for node in sample(&mut rng, num_nodes, n).into_vec() {
        let target = original.row(node);
        let farthest = sample(&mut rng, num_nodes, k)
            .into_vec()
            .into_iter()
            .map(|candidate| {
                let dist = squared_distance(
                    target.data_as_slice(),
                    original.row(candidate).data_as_slice(),
                );
                (candidate, dist)
            })
            .fold((node, f32::NEG_INFINITY), |best, cur| {
                if cur.1 > best.1 { cur } else { best }
            })
            .0;
        x.set_row(node, original.row(farthest).data_as_slice());
        y[node] = true;
    }

    NodeData::new(x)?.with_edges(edges)?.with_labels(y)
}

/// 注入`m`个大小为`n`的结构离群团
///
/// 随机选取`m * n`个互不相同的节点，依次分成`m`组，每组内任意两个不同节点之间双向连边，
/// 组内节点全部标记为离群。已存在的边会被保留（不去重）。
pub fn gen_structural_outliers(
    data: &NodeData,
    m: usize,
    n: usize,
    seed: u64,
) -> Result<NodeData, DataError> {
    let num_nodes = data.num_nodes();
    let total = m.checked_mul(n).ok_or_else(|| {
        DataError::InvalidArgument(format!("团的个数{}与大小{}的乘积溢出", m, n))
    })?;
    if total > num_nodes {
        return Err(DataError::InvalidArgument(format!(
            "结构离群点总数{}超过了节点数{}",
            total, num_nodes
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let (x, y, mut edges) = data.clone().into_parts();
    let mut y = y.unwrap_or_else(|| vec![false; num_nodes]);

    let chosen = sample(&mut rng, num_nodes, total).into_vec();
    for clique in chosen.chunks(n.max(1)) {
        for &src in clique {
            for &dst in clique {
                if src != dst {
                    edges.push((src, dst));
                }
            }
            y[src] = true;
        }
    }

    NodeData::new(x)?.with_edges(edges)?.with_labels(y)
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum()
}
