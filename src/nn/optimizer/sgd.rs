use std::cell::RefCell;
use std::rc::Rc;

use super::Optimizer;
use crate::nn::graph::GraphInner;
use crate::nn::{Graph, GraphError, NodeId, Var};

/// SGD 优化器
///
/// 随机梯度下降：θ = θ - α * ∇θ
pub struct SGD {
    graph: Rc<RefCell<GraphInner>>,
    params: Vec<NodeId>,
    lr: f32,
}

impl SGD {
    pub fn new(graph: &Graph, params: &[Var], lr: f32) -> Self {
        Self {
            graph: graph.inner_rc(),
            params: params.iter().map(Var::node_id).collect(),
            lr,
        }
    }
}

impl Optimizer for SGD {
    fn zero_grad(&mut self) -> Result<(), GraphError> {
        let mut g = self.graph.borrow_mut();
        for &node_id in &self.params {
            g.clear_node_grad(node_id)?;
        }
        Ok(())
    }

    fn step(&mut self) -> Result<(), GraphError> {
        let mut g = self.graph.borrow_mut();
        for &node_id in &self.params {
            if let Some(grad) = g.get_node_grad(node_id)? {
                let current = g.get_node_value(node_id)?.ok_or_else(|| {
                    GraphError::ComputationError(format!("参数节点 {node_id:?} 没有值"))
                })?;
                let new_value = current - &(self.lr * &grad);
                g.set_node_value(node_id, Some(&new_value))?;
            }
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn reset(&mut self) {
        // SGD 无状态
    }
}
