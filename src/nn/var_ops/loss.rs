/*
 * @Description  : Var 损失函数扩展 trait
 */

use crate::nn::{GraphError, Var};
use std::rc::Rc;

/// 损失函数扩展 trait
///
/// # 使用示例
/// ```ignore
/// use graph_outlier::nn::VarLossOps;
///
/// let loss = reconstruction.mse_loss(&x)?;
/// ```
pub trait VarLossOps {
    /// MSE Loss（均方误差，对所有元素取平均）
    ///
    /// # 返回
    /// 标量损失值节点 [1, 1]
    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError>;
}

impl VarLossOps for Var {
    fn mse_loss(&self, target: &Var) -> Result<Var, GraphError> {
        self.check_same_graph(target)?;
        let id =
            self.graph()
                .borrow_mut()
                .new_mse_loss_node(self.node_id(), target.node_id(), None)?;
        Ok(Var::new(id, Rc::clone(self.graph())))
    }
}
