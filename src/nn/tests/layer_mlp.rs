/*
 * @Description  : Linear / Mlp 层
 */

use crate::assert_err;
use crate::nn::{Activation, Graph, GraphError, Linear, Mlp, MlpConfig, Module};
use crate::tensor::Tensor;

#[test]
fn test_linear_shapes_and_forward() -> Result<(), GraphError> {
    let graph = Graph::new_with_seed(42);
    let fc = Linear::new(&graph, 3, 2, true, "fc")?;
    assert_eq!(fc.weights().value_expected_shape()?, vec![3, 2]);
    assert_eq!(fc.bias().map(|b| b.value_expected_shape()).transpose()?, Some(vec![1, 2]));
    assert_eq!(fc.num_params(), 2);

    fc.weights()
        .set_value(&Tensor::new(&[1., 0., 0., 1., 0., 0.], &[3, 2]))?;
    if let Some(b) = fc.bias() {
        b.set_value(&Tensor::new(&[0.5, 0.5], &[1, 2]))?;
    }
    let x = graph.input(&Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]))?;
    let y = fc.forward(&x)?;
    y.forward()?;
    assert_eq!(
        y.value()?,
        Some(Tensor::new(&[1.5, 2.5, 4.5, 5.5], &[2, 2]))
    );
    Ok(())
}

#[test]
fn test_linear_without_bias() -> Result<(), GraphError> {
    let graph = Graph::new();
    let fc = Linear::new(&graph, 4, 4, false, "fc")?;
    assert!(fc.bias().is_none());
    assert_eq!(fc.parameters().len(), 1);
    assert_err!(Linear::new(&graph, 0, 4, true, "bad"), GraphError::InvalidOperation(_));
    Ok(())
}

#[test]
fn test_mlp_layer_layout() -> Result<(), GraphError> {
    let graph = Graph::new_with_seed(1);
    let mlp = Mlp::new(&graph, &[5, 8, 8, 5], MlpConfig::default(), "ae")?;
    let dims: Vec<(usize, usize)> = mlp
        .layers()
        .iter()
        .map(|l| (l.in_features(), l.out_features()))
        .collect();
    assert_eq!(dims, vec![(5, 8), (8, 8), (8, 5)]);
    assert_eq!(mlp.num_params(), 6);
    assert_eq!(mlp.layers()[1].name(), "ae_fc1");

    assert_err!(
        Mlp::new(&graph, &[5], MlpConfig::default(), "one"),
        GraphError::InvalidOperation(_)
    );
    let bad = MlpConfig {
        dropout: 1.0,
        ..MlpConfig::default()
    };
    assert_err!(Mlp::new(&graph, &[5, 5], bad, "bad"), GraphError::InvalidOperation(_));
    Ok(())
}

#[test]
fn test_mlp_no_activation_after_last_layer() -> Result<(), GraphError> {
    // 单层 MLP 即一个 Linear，输出可以为负
    let graph = Graph::new();
    let mlp = Mlp::new(&graph, &[2, 2], MlpConfig::default(), "m")?;
    mlp.layers()[0]
        .weights()
        .set_value(&Tensor::new(&[-1., 0., 0., -1.], &[2, 2]))?;
    let x = graph.input(&Tensor::new(&[1., 2.], &[1, 2]))?;
    let y = mlp.forward(&x)?;
    y.forward()?;
    assert_eq!(y.value()?, Some(Tensor::new(&[-1., -2.], &[1, 2])));
    Ok(())
}

#[test]
fn test_mlp_hidden_activation_applied() -> Result<(), GraphError> {
    let graph = Graph::new();
    let config = MlpConfig {
        dropout: 0.0,
        act: Some(Activation::Relu),
    };
    let mlp = Mlp::new(&graph, &[1, 1, 1], config, "m")?;
    mlp.layers()[0]
        .weights()
        .set_value(&Tensor::new(&[-1.], &[1, 1]))?;
    mlp.layers()[1]
        .weights()
        .set_value(&Tensor::new(&[1.], &[1, 1]))?;
    let x = graph.input(&Tensor::new(&[3.], &[1, 1]))?;
    let y = mlp.forward(&x)?;
    y.forward()?;
    // relu(-3) = 0
    assert_eq!(y.value()?, Some(Tensor::new(&[0.], &[1, 1])));

    // 无激活时为纯线性
    let linear = Mlp::new(
        &graph,
        &[1, 1, 1],
        MlpConfig {
            dropout: 0.0,
            act: None,
        },
        "lin",
    )?;
    linear.layers()[0]
        .weights()
        .set_value(&Tensor::new(&[-1.], &[1, 1]))?;
    linear.layers()[1]
        .weights()
        .set_value(&Tensor::new(&[1.], &[1, 1]))?;
    let y = linear.forward(&x)?;
    y.forward()?;
    assert_eq!(y.value()?, Some(Tensor::new(&[-3.], &[1, 1])));
    Ok(())
}
