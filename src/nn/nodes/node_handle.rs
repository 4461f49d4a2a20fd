/*
 * @Description  : 节点句柄：包装具体节点（NodeType），并记录其在图中的前向传播状态
 */

use super::raw_node::{
    Add, Dropout, Input, LeakyReLU, MSELoss, MatMul, NodeType, Parameter, Sigmoid, Tanh,
    TraitNode,
};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

pub(in crate::nn) struct NodeHandle {
    raw_node: NodeType,
    /// 该节点最后一次参与的前向传播 id，用于同一次前向中避免重复计算
    last_forward_pass_id: u64,
}

impl NodeHandle {
    fn new<T: Into<NodeType>>(raw_node: T) -> Self {
        Self {
            raw_node: raw_node.into(),
            last_forward_pass_id: 0,
        }
    }

    // ========== 各类型节点的构造 ==========

    pub(in crate::nn) fn new_input(shape: &[usize]) -> Result<Self, GraphError> {
        Ok(Self::new(Input::new(shape)?))
    }

    pub(in crate::nn) fn new_parameter(shape: &[usize]) -> Result<Self, GraphError> {
        Ok(Self::new(Parameter::new(shape)?))
    }

    pub(in crate::nn) fn new_add(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::new(Add::new(parents)?))
    }

    pub(in crate::nn) fn new_mat_mul(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::new(MatMul::new(parents)?))
    }

    pub(in crate::nn) fn new_leaky_relu(
        parents: &[&Self],
        negative_slope: f32,
    ) -> Result<Self, GraphError> {
        Ok(Self::new(LeakyReLU::new(parents, negative_slope)?))
    }

    pub(in crate::nn) fn new_sigmoid(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::new(Sigmoid::new(parents)?))
    }

    pub(in crate::nn) fn new_tanh(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::new(Tanh::new(parents)?))
    }

    pub(in crate::nn) fn new_dropout(
        parents: &[&Self],
        p: f32,
        seed: u64,
    ) -> Result<Self, GraphError> {
        Ok(Self::new(Dropout::new(parents, p, seed)?))
    }

    pub(in crate::nn) fn new_mse_loss(parents: &[&Self]) -> Result<Self, GraphError> {
        Ok(Self::new(MSELoss::new(parents)?))
    }

    // ========== 基本属性 ==========

    pub(in crate::nn) fn id(&self) -> NodeId {
        self.raw_node.id()
    }

    pub(in crate::nn) fn name(&self) -> &str {
        self.raw_node.name()
    }

    pub(in crate::nn) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.raw_node.set_id(id);
        self.raw_node.set_name(name);
    }

    pub(in crate::nn) const fn node_type(&self) -> &NodeType {
        &self.raw_node
    }

    pub(in crate::nn) fn is_leaf(&self) -> bool {
        matches!(self.raw_node, NodeType::Input(_) | NodeType::Parameter(_))
    }

    pub(in crate::nn) fn value_expected_shape(&self) -> &[usize] {
        self.raw_node.value_expected_shape()
    }

    // ========== 值 ==========

    pub(in crate::nn) fn value(&self) -> Option<&Tensor> {
        self.raw_node.value()
    }

    pub(in crate::nn) fn has_value(&self) -> bool {
        self.raw_node.value().is_some()
    }

    pub(in crate::nn) fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        self.raw_node.set_value(value)
    }

    pub(in crate::nn) fn clear_value(&mut self) {
        self.raw_node.clear_value();
    }

    pub(in crate::nn) fn calc_value_by_parents(
        &mut self,
        parents: &[&Self],
        is_train: bool,
    ) -> Result<(), GraphError> {
        self.raw_node.calc_value_by_parents(parents, is_train)
    }

    pub(in crate::nn) const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub(in crate::nn) const fn set_last_forward_pass_id(&mut self, id: u64) {
        self.last_forward_pass_id = id;
    }

    // ========== 梯度 ==========

    pub(in crate::nn) fn grad(&self) -> Option<&Tensor> {
        self.raw_node.grad()
    }

    pub(in crate::nn) fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.raw_node.set_grad(grad)
    }

    pub(in crate::nn) fn clear_grad(&mut self) {
        // 输入节点的 set_grad 总是报错，这里只需忽略
        let _ = self.raw_node.set_grad(None);
    }

    pub(in crate::nn) fn calc_grad_to_parent(
        &self,
        target_parent: &Self,
        upstream_grad: &Tensor,
        assistant_parent: Option<&Self>,
    ) -> Result<Tensor, GraphError> {
        self.raw_node
            .calc_grad_to_parent(target_parent, upstream_grad, assistant_parent)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_node.display_node())
    }
}
