/*
 * @Description  : SGD / Adam 优化器
 */

use crate::nn::{
    Adam, Graph, GraphError, Init, Mlp, MlpConfig, Module, Optimizer, SGD, VarLossOps,
    VarMatrixOps,
};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_sgd_single_step() -> Result<(), GraphError> {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., 2.], &[1, 2]))?;
    let t = graph.input(&Tensor::zeros(&[1, 1]))?;
    let w = graph.parameter(&[2, 1], Init::Zeros, "w")?;
    w.set_value(&Tensor::new(&[0.5, -1.], &[2, 1]))?;
    let loss = x.matmul(&w)?.mse_loss(&t)?;

    let mut optimizer = SGD::new(&graph, &[w.clone()], 0.1);
    let loss_value = optimizer.minimize(&loss)?;
    assert_abs_diff_eq!(loss_value, 2.25);
    // 梯度为 [-3, -6]
    let updated = w.value()?.ok_or(GraphError::NodeNotFound(w.node_id()))?;
    assert_abs_diff_eq!(updated[[0, 0]], 0.8, epsilon = 1e-6);
    assert_abs_diff_eq!(updated[[1, 0]], -0.4, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_adam_first_step_moves_by_lr() -> Result<(), GraphError> {
    // Adam 第一步的更新量约为 lr * sign(grad)
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., 2.], &[1, 2]))?;
    let t = graph.input(&Tensor::zeros(&[1, 1]))?;
    let w = graph.parameter(&[2, 1], Init::Zeros, "w")?;
    w.set_value(&Tensor::new(&[0.5, -1.], &[2, 1]))?;
    let loss = x.matmul(&w)?.mse_loss(&t)?;

    let mut optimizer = Adam::new(&graph, &[w.clone()], 0.01);
    optimizer.minimize(&loss)?;
    let updated = w.value()?.ok_or(GraphError::NodeNotFound(w.node_id()))?;
    assert_abs_diff_eq!(updated[[0, 0]], 0.51, epsilon = 1e-5);
    assert_abs_diff_eq!(updated[[1, 0]], -0.99, epsilon = 1e-5);

    optimizer.set_learning_rate(0.5);
    assert_abs_diff_eq!(optimizer.learning_rate(), 0.5);
    optimizer.reset();
    Ok(())
}

#[test]
fn test_adam_weight_decay_shrinks_params_without_loss_grad() -> Result<(), GraphError> {
    // 输出已等于目标，损失梯度为0，只剩权重衰减项
    let graph = Graph::new();
    let x = graph.input(&Tensor::zeros(&[1, 1]))?;
    let t = graph.input(&Tensor::zeros(&[1, 1]))?;
    let w = graph.parameter(&[1, 1], Init::Constant(2.0), "w")?;
    let loss = x.matmul(&w)?.mse_loss(&t)?;

    let mut optimizer = Adam::new(&graph, &[w.clone()], 0.1).with_weight_decay(0.5);
    assert_abs_diff_eq!(optimizer.weight_decay(), 0.5);
    optimizer.minimize(&loss)?;
    assert!(w.item()? < 2.0);
    Ok(())
}

#[test]
fn test_adam_reduces_autoencoder_loss() -> Result<(), GraphError> {
    let graph = Graph::new_with_seed(5);
    let data = Tensor::new(
        &[
            0.1, 0.2, 0.3, 0.4, 0.2, 0.1, 0.4, 0.3, 0.3, 0.4, 0.1, 0.2, 0.4, 0.3, 0.2, 0.1,
        ],
        &[4, 4],
    );
    let x = graph.input(&data)?;
    let mlp = Mlp::new(&graph, &[4, 8, 4], MlpConfig::default(), "ae")?;
    let loss = mlp.forward(&x)?.mse_loss(&x)?;
    let mut optimizer = Adam::new(&graph, &mlp.parameters(), 0.01);

    let first = optimizer.minimize(&loss)?;
    let mut last = first;
    for _ in 0..200 {
        last = optimizer.minimize(&loss)?;
    }
    assert!(last < first * 0.5, "first={first}, last={last}");
    Ok(())
}
