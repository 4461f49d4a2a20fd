/*
 * @Description  : Var 扩展 trait，用户需 import 对应 trait 后才能链式调用
 */

mod activation;
mod loss;
mod matrix;
mod regularization;

pub use activation::VarActivationOps;
pub use loss::VarLossOps;
pub use matrix::VarMatrixOps;
pub use regularization::VarRegularizationOps;
