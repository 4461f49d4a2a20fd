/*
 * @Description  : Var 矩阵运算扩展 trait
 */

use crate::nn::{GraphError, Var};
use std::rc::Rc;

/// 矩阵运算扩展 trait
pub trait VarMatrixOps {
    /// 矩阵乘法
    ///
    /// # 形状要求
    /// - self: [m, k]
    /// - other: [k, n]
    /// - 输出: [m, n]
    fn matmul(&self, other: &Var) -> Result<Var, GraphError>;
}

impl VarMatrixOps for Var {
    fn matmul(&self, other: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(other)?;
        let id =
            self.graph()
                .borrow_mut()
                .new_mat_mul_node(self.node_id(), other.node_id(), None)?;
        Ok(Var::new(id, Rc::clone(self.graph())))
    }
}
