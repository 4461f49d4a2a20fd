/*
 * @Description  : 演示：在带属性图上用MLP自编码器检测离群节点
 *
 * 运行方式：
 *   cargo run --example outlier_detection                          # 合成数据
 *   cargo run --example outlier_detection -- x.npy y.npy [cfg.json] # 自有数据
 *
 * 日志级别由 RUST_LOG 控制，默认 info
 */

use graph_outlier::data::{NodeData, gen_contextual_outliers, gen_structural_outliers};
use graph_outlier::detector::{Detector, DetectorError, MlpAe, MlpAeConfig, ProbaMethod};
use graph_outlier::metric::{average_precision, precision_at_k, roc_auc_score};
use graph_outlier::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn synthetic_data() -> Result<NodeData, DetectorError> {
    let mut rng = StdRng::seed_from_u64(2022);
    // 正常节点：3个高斯簇
    let num_nodes = 600;
    let num_features = 16;
    let centers = Tensor::normal_with_rng(0.0, 3.0, &[3, num_features], &mut rng);
    let mut x = Tensor::normal_with_rng(0.0, 0.5, &[num_nodes, num_features], &mut rng);
    for node in 0..num_nodes {
        let center = centers.row(node % 3);
        let shifted = x.row(node) + center;
        x.set_row(node, shifted.data_as_slice());
    }

    let data = NodeData::new(x)?;
    let data = gen_contextual_outliers(&data, 30, 50, 1)?;
    Ok(gen_structural_outliers(&data, 3, 10, 2)?)
}

fn load_data(args: &[String]) -> Result<NodeData, DetectorError> {
    match args {
        [x_path, y_path, ..] => {
            let labels = NodeData::labels_from_npy(y_path)?;
            Ok(NodeData::from_npy(x_path)?.with_labels(labels)?)
        }
        [x_path] => Ok(NodeData::from_npy(x_path)?),
        [] => synthetic_data(),
    }
}

fn main() -> Result<(), DetectorError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let data = load_data(&args[..args.len().min(2)])?;
    info!(
        nodes = data.num_nodes(),
        features = data.num_features(),
        edges = data.num_edges(),
        outliers = data.num_outliers(),
        "数据已就绪"
    );

    let config = match args.get(2) {
        Some(path) => MlpAeConfig::from_json_file(path)?,
        None => MlpAeConfig::default().with_seed(42).with_verbose(true),
    };

    let mut detector = MlpAe::new(config);
    detector.fit(&data)?;

    let scores = detector.decision_function(&data)?;
    let predicted = detector.predict(&data)?;
    let proba = detector.predict_proba(&data, ProbaMethod::Unify)?;
    info!(
        threshold = detector.threshold()?,
        flagged = predicted.iter().filter(|&&p| p).count(),
        max_proba = proba.iter().map(|p| p[1]).fold(0.0f32, f32::max),
        "检测完成"
    );

    if let Some(labels) = data.y() {
        let k = data.num_outliers().max(1);
        info!(
            auc = roc_auc_score(labels, &scores)?,
            ap = average_precision(labels, &scores)?,
            precision_at_k = precision_at_k(labels, &scores, k)?,
            "评估结果"
        );
    }
    Ok(())
}
