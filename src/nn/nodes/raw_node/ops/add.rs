use crate::nn::nodes::raw_node::{TraitNode, parent_value};
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 加法节点，支持 NumPy 风格广播（如`[N, F] + [1, F]`的偏置相加）
///
/// 反向传播时，对被广播的父节点需把上游梯度沿广播轴求和，还原到父节点自身的形状
pub(in crate::nn) struct Add {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
}

impl Add {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 必要的验证
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "Add节点需要正好2个父节点".to_string(),
            ));
        }
        let (left, right) = (
            parents[0].value_expected_shape(),
            parents[1].value_expected_shape(),
        );
        if left.len() != right.len() {
            return Err(GraphError::DimensionMismatch {
                expected: left.len(),
                got: right.len(),
                message: "Add节点的两个父节点阶数必须相同".to_string(),
            });
        }
        let mut shape = Vec::with_capacity(left.len());
        for (&a, &b) in left.iter().zip(right) {
            if a != b && a != 1 && b != 1 {
                return Err(GraphError::ShapeMismatch {
                    expected: left.to_vec(),
                    got: right.to_vec(),
                    message: "Add节点的两个父节点形状无法广播".to_string(),
                });
            }
            shape.push(a.max(b));
        }

        // 2. 返回
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape,
        })
    }
}

impl TraitNode for Add {
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
        "Add"
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
        if !left.can_broadcast_with(right) {
            return Err(GraphError::ShapeMismatch {
                expected: left.shape().to_vec(),
                got: right.shape().to_vec(),
                message: format!("{}的两个父节点的值无法广播", self.display_node()),
            });
        }
        self.value = Some(left + right);
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
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        let target_value = parent_value(self, target_parent)?;
        Ok(upstream_grad.reduce_to_shape(target_value.shape()))
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
