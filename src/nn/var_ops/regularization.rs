/*
 * @Description  : Var 正则化扩展 trait
 */

use crate::nn::{GraphError, Var};
use std::rc::Rc;

pub trait VarRegularizationOps {
    /// Dropout：训练模式下以概率`p`随机置0并对保留元素放大`1/(1-p)`，评估模式下恒等
    fn dropout(&self, p: f32) -> Result<Var, GraphError>;
}

impl VarRegularizationOps for Var {
    fn dropout(&self, p: f32) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_dropout_node(self.node_id(), p, None)?;
        Ok(Var::new(id, Rc::clone(self.graph())))
    }
}
