use super::{NodeHandle, TraitNode};
use crate::nn::{GraphError, NodeId};
use crate::tensor::Tensor;

/// 输入节点：值由外部设置，不参与梯度计算。
/// 第一维视为 batch 维，可在每次设置值时变化（动态 batch），其余维度必须与创建时一致
pub(in crate::nn) struct Input {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    shape: Vec<usize>,
}

impl Input {
    pub(in crate::nn) fn new(shape: &[usize]) -> Result<Self, GraphError> {
        if shape.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: shape.len(),
                message: format!("输入节点必须是2阶张量[batch, features]，但收到的形状为{shape:?}"),
            });
        }
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            shape: shape.to_vec(),
        })
    }
}

impl TraitNode for Input {
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
        "Input"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(
        &mut self,
        _parents: &[&NodeHandle],
        _is_train: bool,
    ) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}被执行了前向传播。不该触及本错误，否则说明crate代码有问题",
            self.display_node()
        )))
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        if let Some(value) = value {
            // 只比较除 batch 维以外的维度
            if value.dimension() != self.shape.len() || value.shape()[1..] != self.shape[1..] {
                return Err(GraphError::ShapeMismatch {
                    expected: self.shape.clone(),
                    got: value.shape().to_vec(),
                    message: format!("{}的特征维度与新值不一致", self.display_node()),
                });
            }
            self.shape[0] = value.shape()[0];
        }
        self.value = value.cloned();
        Ok(())
    }

    fn clear_value(&mut self) {
        self.value = None;
    }

    fn calc_grad_to_parent(
        &self,
        _target_parent: &NodeHandle,
        _upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}没有父节点",
            self.display_node()
        )))
    }

    fn grad(&self) -> Option<&Tensor> {
        None
    }

    fn set_grad(&mut self, _grad: Option<&Tensor>) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}不应该有梯度",
            self.display_node()
        )))
    }
}
