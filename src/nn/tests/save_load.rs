/*
 * @Description  : 参数保存/加载
 */

use crate::assert_err;
use crate::nn::{Graph, GraphError, Init, Mlp, MlpConfig, Module};
use crate::tensor::Tensor;
use tempfile::tempdir;

#[test]
fn test_save_and_load_params_roundtrip() -> Result<(), GraphError> {
    let dir = tempdir().map_err(|e| GraphError::ComputationError(e.to_string()))?;
    let path = dir.path().join("params.bin");

    let g1 = Graph::new_with_seed(1);
    let m1 = Mlp::new(&g1, &[3, 4, 3], MlpConfig::default(), "ae")?;
    g1.save_params(&path)?;

    let g2 = Graph::new_with_seed(2);
    let m2 = Mlp::new(&g2, &[3, 4, 3], MlpConfig::default(), "ae")?;
    assert_ne!(m1.parameters()[0].value()?, m2.parameters()[0].value()?);

    g2.load_params(&path)?;
    for (p1, p2) in m1.parameters().iter().zip(m2.parameters()) {
        assert_eq!(p1.value()?, p2.value()?);
    }

    // 同一输入得到相同输出
    let input = Tensor::new(&[0.1, 0.5, -0.3], &[1, 3]);
    let y1 = m1.forward(&g1.input(&input)?)?;
    let y2 = m2.forward(&g2.input(&input)?)?;
    y1.forward()?;
    y2.forward()?;
    assert_eq!(y1.value()?, y2.value()?);
    Ok(())
}

#[test]
fn test_load_params_rejects_mismatched_graph() -> Result<(), GraphError> {
    let dir = tempdir().map_err(|e| GraphError::ComputationError(e.to_string()))?;
    let path = dir.path().join("params.bin");

    let g1 = Graph::new_with_seed(1);
    Mlp::new(&g1, &[3, 4, 3], MlpConfig::default(), "ae")?;
    g1.save_params(&path)?;

    // 形状不同
    let g2 = Graph::new();
    Mlp::new(&g2, &[3, 5, 3], MlpConfig::default(), "ae")?;
    assert_err!(g2.load_params(&path), GraphError::ShapeMismatch { .. });

    // 名称不同
    let g3 = Graph::new();
    Mlp::new(&g3, &[3, 4, 3], MlpConfig::default(), "other")?;
    assert_err!(g3.load_params(&path), GraphError::InvalidOperation(_));

    // 文件不存在
    assert_err!(
        g3.load_params(dir.path().join("missing.bin")),
        GraphError::ComputationError(_)
    );
    Ok(())
}

#[test]
fn test_load_params_rejects_parameters_missing_from_file() -> Result<(), GraphError> {
    let dir = tempdir().map_err(|e| GraphError::ComputationError(e.to_string()))?;
    let path = dir.path().join("params.bin");

    let g1 = Graph::new_with_seed(1);
    Mlp::new(&g1, &[3, 4, 3], MlpConfig::default(), "ae")?;
    g1.save_params(&path)?;

    // 图中多出一个文件里没有的参数
    let g2 = Graph::new_with_seed(2);
    let m2 = Mlp::new(&g2, &[3, 4, 3], MlpConfig::default(), "ae")?;
    g2.parameter(&[1, 3], Init::Zeros, "extra")?;
    let before: Vec<_> = m2
        .parameters()
        .iter()
        .map(|p| p.value())
        .collect::<Result<_, _>>()?;

    assert_err!(
        g2.load_params(&path),
        GraphError::InvalidOperation(msg) if msg.contains("extra")
    );

    // 加载失败时已有参数保持不变
    for (p, old) in m2.parameters().iter().zip(before) {
        assert_eq!(p.value()?, old);
    }
    Ok(())
}
