use crate::nn::nodes::raw_node::{TraitNode, parent_value};
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 矩阵乘法节点：`C = A @ B`
///
/// - dL/dA = G @ Bᵀ
/// - dL/dB = Aᵀ @ G
pub(in crate::nn) struct MatMul {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
    /// 左父节点 id，用于反向传播时区分 A 和 B
    left_parent_id: NodeId,
}

impl MatMul {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 必要的验证
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "MatMul节点需要正好2个父节点".to_string(),
            ));
        }
        let (left, right) = (
            parents[0].value_expected_shape(),
            parents[1].value_expected_shape(),
        );
        if left.len() != 2 || right.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: left.len().max(right.len()),
                message: "MatMul节点的父节点必须都是2阶张量".to_string(),
            });
        }
        if left[1] != right[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![left[1], right[1]],
                got: right.to_vec(),
                message: format!(
                    "MatMul节点左矩阵的列数{}必须等于右矩阵的行数{}",
                    left[1], right[0]
                ),
            });
        }

        // 2. 返回
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape: vec![left[0], right[1]],
            left_parent_id: parents[0].id(),
        })
    }
}

impl TraitNode for MatMul {
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
        "MatMul"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        _is_train: bool,
    ) -> Result<(), GraphError> {
        let left = parent_value(self, parents[0])?;
        let right = parent_value(self, parents[1])?;
        if left.shape()[1] != right.shape()[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![left.shape()[1], right.shape()[1]],
                got: right.shape().to_vec(),
                message: format!("{}的父节点形状不满足矩阵乘法", self.display_node()),
            });
        }
        self.value = Some(left.mat_mul(right));
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn clear_value(&mut self) {
        self.value = None;
    }

    fn calc_grad_to_parent(
        &self,
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        // 两个父节点是同一节点（x @ x）时没有辅助父节点
        let other = match assistant_parent {
            Some(p) => parent_value(self, p)?,
            None => parent_value(self, target_parent)?,
        };
        if target_parent.id() == self.left_parent_id {
            Ok(upstream_grad.mat_mul(&other.transpose()))
        } else {
            Ok(other.transpose().mat_mul(upstream_grad))
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
