/*
 * @Description  : 优化器（PyTorch 风格）
 *
 * - Optimizer 持有 Rc<RefCell<GraphInner>> 引用，并绑定特定参数
 * - `backward()` 计算所有参数的梯度（由 Var 调用）
 * - `step()` 只更新 Optimizer 绑定的参数
 */

mod adam;
mod sgd;

pub use adam::Adam;
pub use sgd::SGD;

use crate::nn::{GraphError, Var};

/// 优化器 trait
///
/// # 使用示例
/// ```ignore
/// let mut optimizer = Adam::new(&graph, &model.parameters(), 0.01);
///
/// // 训练循环
/// optimizer.zero_grad()?;
/// let loss = model.forward(&x)?.mse_loss(&x)?;
/// loss.backward()?;
/// optimizer.step()?;
///
/// // 或者一步完成
/// let loss_val = optimizer.minimize(&loss)?;
/// ```
pub trait Optimizer {
    /// 清零所有参数的梯度
    fn zero_grad(&mut self) -> Result<(), GraphError>;

    /// 更新参数（只更新 Optimizer 绑定的参数）
    fn step(&mut self) -> Result<(), GraphError>;

    /// 一步完成：zero_grad + backward + step，返回 loss 的标量值
    fn minimize(&mut self, loss: &Var) -> Result<f32, GraphError> {
        self.zero_grad()?;
        let loss_val = loss.backward()?;
        self.step()?;
        Ok(loss_val)
    }

    fn learning_rate(&self) -> f32;

    fn set_learning_rate(&mut self, lr: f32);

    /// 重置累积状态（如 Adam 的动量）
    fn reset(&mut self);
}
