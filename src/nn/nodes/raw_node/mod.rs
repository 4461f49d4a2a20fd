mod input;
mod loss;
mod ops;
mod parameter;

pub(in crate::nn) use input::Input;
pub(in crate::nn) use loss::*;
pub(in crate::nn) use ops::*;
pub(in crate::nn) use parameter::Parameter;

use super::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
pub(in crate::nn) enum NodeType {
    Input(Input),
    Parameter(Parameter),
    Add(Add),
    MatMul(MatMul),
    LeakyReLU(LeakyReLU),
    Sigmoid(Sigmoid),
    Tanh(Tanh),
    Dropout(Dropout),
    MSELoss(MSELoss),
}

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    fn id(&self) -> NodeId;

    fn set_id(&mut self, id: NodeId);

    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    fn type_name(&self) -> &'static str;

    fn display_node(&self) -> String {
        format!(
            "节点[id={}, name={}, type={}]",
            self.id().0,
            self.name(),
            self.type_name()
        )
    }

    /// 节点值的预期形状。对于支持动态 batch 的节点，第一维只是创建时的参考值
    fn value_expected_shape(&self) -> &[usize];

    // 根据父节点的值计算本节点的值（注意：该接口只在Graph中使用，调用时所有父节点的值都已预先计算好）
    fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        is_train: bool,
    ) -> Result<(), GraphError>;

    fn value(&self) -> Option<&Tensor>;

    fn set_value(&mut self, _value: Option<&Tensor>) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}的值不应该被手动设置",
            self.display_node()
        )))
    }

    fn clear_value(&mut self);

    /// VJP：给定上游梯度，计算对`target_parent`的梯度。
    /// `assistant_parent`为二元节点的另一个父节点
    fn calc_grad_to_parent(
        &self,
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError>;

    fn grad(&self) -> Option<&Tensor>;

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError>;
}

/// 取出父节点的值；父节点无值说明前向传播的调度出了问题
pub(in crate::nn) fn parent_value<'a>(
    node: &dyn TraitNode,
    parent: &'a NodeHandle,
) -> Result<&'a Tensor, GraphError> {
    parent.value().ok_or_else(|| {
        GraphError::ComputationError(format!(
            "{}的父节点{}没有值。不该触及本错误，否则说明crate代码有问题",
            node.display_node(),
            parent
        ))
    })
}
