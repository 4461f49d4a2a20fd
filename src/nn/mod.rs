/*
 * @Description  : 神经网络模块：计算图、节点、Var句柄、层与优化器
 *
 * 使用方式（PyTorch 风格）：
 * ```ignore
 * let graph = Graph::new_with_seed(42);
 * let x = graph.input(&data)?;
 * let mlp = Mlp::new(&graph, &[8, 4, 8], MlpConfig::default(), "ae")?;
 * let loss = mlp.forward(&x)?.mse_loss(&x)?;
 * let mut optimizer = Adam::new(&graph, &mlp.parameters(), 0.005);
 * optimizer.minimize(&loss)?;
 * ```
 */

mod graph;
pub mod layer;
mod module;
mod nodes;
pub mod optimizer;
mod var;
mod var_ops;

#[cfg(test)]
mod tests;

pub use graph::{Graph, GraphError, GraphInner};
pub use layer::{Activation, Linear, Mlp, MlpConfig};
pub use module::Module;
pub use nodes::NodeId;
pub use optimizer::{Adam, Optimizer, SGD};
pub use var::{Init, Var};
pub use var_ops::{VarActivationOps, VarLossOps, VarMatrixOps, VarRegularizationOps};
