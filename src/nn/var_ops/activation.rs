/*
 * @Description  : Var 激活函数扩展 trait
 */

use crate::nn::{GraphError, Var};
use std::rc::Rc;

/// 激活函数扩展 trait
///
/// 提供常用激活函数的链式调用：
/// - `relu()`: `ReLU` 激活
/// - `leaky_relu(slope)`: `LeakyReLU` 激活
/// - `sigmoid()`: Sigmoid 激活
/// - `tanh()`: Tanh 激活
///
/// # 使用示例
/// ```ignore
/// use graph_outlier::nn::VarActivationOps;
///
/// let h = x.relu()?.sigmoid()?;
/// ```
pub trait VarActivationOps {
    /// `ReLU` 激活：max(0, x)
    fn relu(&self) -> Result<Var, GraphError>;

    /// `LeakyReLU` 激活：x if x > 0 else slope * x
    fn leaky_relu(&self, negative_slope: f32) -> Result<Var, GraphError>;

    /// Sigmoid 激活：1 / (1 + exp(-x))
    fn sigmoid(&self) -> Result<Var, GraphError>;

    /// Tanh 激活
    fn tanh(&self) -> Result<Var, GraphError>;
}

impl VarActivationOps for Var {
    fn relu(&self) -> Result<Var, GraphError> {
        let id = self.graph().borrow_mut().new_relu_node(self.node_id(), None)?;
        Ok(Self::new(id, Rc::clone(self.graph())))
    }

    fn leaky_relu(&self, negative_slope: f32) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_leaky_relu_node(self.node_id(), negative_slope, None)?;
        Ok(Self::new(id, Rc::clone(self.graph())))
    }

    fn sigmoid(&self) -> Result<Var, GraphError> {
        let id = self
            .graph()
            .borrow_mut()
            .new_sigmoid_node(self.node_id(), None)?;
        Ok(Self::new(id, Rc::clone(self.graph())))
    }

    fn tanh(&self) -> Result<Var, GraphError> {
        let id = self.graph().borrow_mut().new_tanh_node(self.node_id(), None)?;
        Ok(Self::new(id, Rc::clone(self.graph())))
    }
}
