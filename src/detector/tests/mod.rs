mod config;
mod decision;

use crate::data::NodeData;
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// 服从标准正态分布的`[n, f]`节点特征
fn random_data(n: usize, f: usize, seed: u64) -> NodeData {
    let mut rng = StdRng::seed_from_u64(seed);
    NodeData::new(Tensor::normal_with_rng(0.0, 1.0, &[n, f], &mut rng)).unwrap()
}
