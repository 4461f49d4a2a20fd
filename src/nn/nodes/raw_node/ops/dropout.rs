use crate::nn::nodes::raw_node::{TraitNode, parent_value};
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Dropout 节点（inverted dropout）
///
/// - 训练模式：以概率`p`把元素置0，保留的元素乘以`1 / (1 - p)`，使期望不变
/// - 评估模式：恒等映射
///
/// 每个节点持有自己的随机数生成器，种子在创建时由图分配，保证同种子下掩码序列可复现
pub(in crate::nn) struct Dropout {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
    p: f32,
    rng: StdRng,
    /// 最近一次训练模式前向所用的掩码（已含缩放系数）；评估模式下为 None
    mask: Option<Tensor>,
}

impl Dropout {
    pub(in crate::nn) fn new(parents: &[&NodeHandle], p: f32, seed: u64) -> Result<Self, GraphError> {
        // 1. 必要的验证
        if parents.len() != 1 {
            return Err(GraphError::InvalidOperation(
                "Dropout节点只需要1个父节点".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&p) {
            return Err(GraphError::InvalidOperation(format!(
                "Dropout的丢弃概率须在[0, 1)内，但得到: {p}"
            )));
        }

        // 2. 返回
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape: parents[0].value_expected_shape().to_vec(),
            p,
            rng: StdRng::seed_from_u64(seed),
            mask: None,
        })
    }
}

impl TraitNode for Dropout {
    fn id(&self) -> NodeId {
        self.id
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn type_name(&self) -> &'static str {
        "Dropout"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        is_train: bool,
    ) -> Result<(), GraphError> {
        let x = parent_value(self, parents[0])?;
        if !is_train || self.p == 0.0 {
            self.mask = None;
            self.value = Some(x.clone());
            return Ok(());
        }

        let keep = 1.0 - self.p;
        let scale = 1.0 / keep;
        let mask_data = (0..x.size())
            .map(|_| {
                if self.rng.r#gen::<f32>() < keep {
                    scale
                } else {
                    0.0
                }
            })
            .collect::<Vec<_>>();
        let mask = Tensor::new(&mask_data, x.shape());
        self.value = Some(x * &mask);
        self.mask = Some(mask);
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn clear_value(&mut self) {
        self.value = None;
        self.mask = None;
    }

    fn calc_grad_to_parent(
        &self,
        _target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        match &self.mask {
            Some(mask) => Ok(upstream_grad * mask),
            None => Ok(upstream_grad.clone()),
        }
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
