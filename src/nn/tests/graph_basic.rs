/*
 * @Description  : 计算图基础行为：节点创建、命名、前向、动态 batch、模式切换
 */

use crate::assert_err;
use crate::nn::{Graph, GraphError, Init, VarActivationOps, VarMatrixOps};
use crate::tensor::Tensor;

#[test]
fn test_node_ids_and_default_names() -> Result<(), GraphError> {
    let graph = Graph::new();
    let x = graph.input(&Tensor::zeros(&[2, 3]))?;
    let w = graph.parameter(&[3, 2], Init::Zeros, "w")?;
    let y = x.matmul(&w)?;

    let inner = graph.inner();
    assert_eq!(inner.nodes_count(), 3);
    assert_eq!(inner.get_node_name(x.node_id())?, "input_1");
    assert_eq!(inner.get_node_name(w.node_id())?, "w");
    assert_eq!(inner.get_node_name(y.node_id())?, "mat_mul_1");
    assert_eq!(
        inner.get_node_parents(y.node_id())?,
        vec![x.node_id(), w.node_id()]
    );
    assert_eq!(inner.get_node_children(x.node_id())?, vec![y.node_id()]);
    Ok(())
}

#[test]
fn test_duplicate_parameter_name() -> Result<(), GraphError> {
    let graph = Graph::new();
    graph.parameter(&[1, 1], Init::Zeros, "w")?;
    assert_err!(
        graph.parameter(&[1, 1], Init::Zeros, "w"),
        GraphError::DuplicateNodeName(_)
    );
    Ok(())
}

#[test]
fn test_shape_checks_at_creation() -> Result<(), GraphError> {
    let graph = Graph::new();
    let x = graph.input(&Tensor::zeros(&[4, 3]))?;
    let w = graph.parameter(&[2, 5], Init::Zeros, "w")?;
    assert_err!(x.matmul(&w), GraphError::ShapeMismatch { .. });
    assert_err!(
        graph.input(&Tensor::zeros(&[3])),
        GraphError::DimensionMismatch { expected: 2, got: 1, .. }
    );

    let other = Graph::new();
    let z = other.input(&Tensor::zeros(&[4, 3]))?;
    assert_err!(x.try_add(&z), GraphError::InvalidOperation(_));
    Ok(())
}

#[test]
fn test_forward_with_broadcast_bias() -> Result<(), GraphError> {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1., 2., 3., 4.], &[2, 2]))?;
    let w = graph.parameter(&[2, 2], Init::Ones, "w")?;
    let b = graph.parameter(&[1, 2], Init::Constant(0.5), "b")?;
    let y = &x.matmul(&w)? + &b;

    y.forward()?;
    assert_eq!(
        y.value()?,
        Some(Tensor::new(&[3.5, 3.5, 7.5, 7.5], &[2, 2]))
    );
    Ok(())
}

#[test]
fn test_dynamic_batch() -> Result<(), GraphError> {
    let graph = Graph::new();
    let x = graph.input(&Tensor::zeros(&[4, 2]))?;
    let w = graph.parameter(&[2, 1], Init::Ones, "w")?;
    let y = x.matmul(&w)?.relu()?;

    x.set_value(&Tensor::new(&[1., -3., 2., 2., -1., 0.], &[3, 2]))?;
    y.forward()?;
    assert_eq!(y.value()?, Some(Tensor::new(&[0., 4., 0.], &[3, 1])));

    // 特征维度不允许改变
    assert_err!(
        x.set_value(&Tensor::zeros(&[3, 3])),
        GraphError::ShapeMismatch { .. }
    );
    Ok(())
}

#[test]
fn test_leaf_without_value_cannot_forward() -> Result<(), GraphError> {
    let mut graph = crate::nn::GraphInner::new();
    let x = graph.new_input_node(&[2, 2], None)?;
    assert_err!(graph.forward(x), GraphError::InvalidOperation(_));
    Ok(())
}

#[test]
fn test_train_eval_and_no_grad_scope() {
    let graph = Graph::new();
    assert!(!graph.is_eval());
    let inside = graph.no_grad_scope(|g| g.is_eval());
    assert!(inside);
    assert!(!graph.is_eval());

    graph.eval();
    assert!(graph.is_eval());
    graph.train();
    assert!(!graph.is_eval());
}

#[test]
fn test_seeded_graph_is_reproducible() -> Result<(), GraphError> {
    let g1 = Graph::new_with_seed(7);
    let g2 = Graph::new_with_seed(7);
    let w1 = g1.parameter(&[4, 3], Init::Kaiming, "w")?;
    let w2 = g2.parameter(&[4, 3], Init::Kaiming, "w")?;
    assert_eq!(w1.value()?, w2.value()?);
    Ok(())
}
