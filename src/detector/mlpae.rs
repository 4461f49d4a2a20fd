/*
 * @Description  : 多层感知机自编码器（MLP Autoencoder）离群检测器
 *
 * 用 MLP 重构节点特征，以每个节点的重构误差（各特征平方误差的均值）作为离群分数。
 * 只使用节点特征，不使用图的边。
 */

use super::{DecisionState, Detector, DetectorError};
use crate::data::NodeData;
use crate::metric::roc_auc_score;
use crate::nn::{
    Activation, Adam, Graph, Mlp, MlpConfig, Module, Optimizer, Var, VarLossOps,
};
use crate::tensor::Tensor;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info};

const METADATA_FILE: &str = "detector.json";
const PARAMS_FILE: &str = "params.bin";
const MODEL_NAME: &str = "mlpae";

/// MLP 自编码器的超参数
///
/// 反序列化时缺失的字段取默认值，`act`为`null`表示层间不使用激活函数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlpAeConfig {
    /// 隐藏层维度
    pub hid_dim: usize,
    /// 自编码器的总层数
    pub num_layers: usize,
    pub dropout: f32,
    /// L2 权重衰减
    pub weight_decay: f32,
    pub act: Option<Activation>,
    /// 数据中离群点的预期比例，用于确定判定阈值
    pub contamination: f32,
    pub lr: f32,
    pub epoch: usize,
    /// 为 true 时以 info 级别输出每轮的损失（有标签时附带 AUC）
    pub verbose: bool,
    /// 参数初始化与 Dropout 的随机种子，None 表示不可复现
    pub seed: Option<u64>,
}

impl Default for MlpAeConfig {
    fn default() -> Self {
        Self {
            hid_dim: 64,
            num_layers: 4,
            dropout: 0.3,
            weight_decay: 0.0,
            act: Some(Activation::Relu),
            contamination: 0.1,
            lr: 5e-3,
            epoch: 100,
            verbose: false,
            seed: None,
        }
    }
}

impl MlpAeConfig {
    pub const fn with_hid_dim(mut self, hid_dim: usize) -> Self {
        self.hid_dim = hid_dim;
        self
    }

    pub const fn with_num_layers(mut self, num_layers: usize) -> Self {
        self.num_layers = num_layers;
        self
    }

    pub const fn with_dropout(mut self, dropout: f32) -> Self {
        self.dropout = dropout;
        self
    }

    pub const fn with_weight_decay(mut self, weight_decay: f32) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub const fn with_act(mut self, act: Option<Activation>) -> Self {
        self.act = act;
        self
    }

    pub const fn with_contamination(mut self, contamination: f32) -> Self {
        self.contamination = contamination;
        self
    }

    pub const fn with_lr(mut self, lr: f32) -> Self {
        self.lr = lr;
        self
    }

    pub const fn with_epoch(mut self, epoch: usize) -> Self {
        self.epoch = epoch;
        self
    }

    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 从 JSON 文件读取配置并校验
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DetectorError> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DetectorError> {
        let fail = |msg: String| Err(DetectorError::InvalidConfig(msg));
        if self.hid_dim == 0 {
            return fail("hid_dim 须至少为1".to_string());
        }
        if self.num_layers == 0 {
            return fail("num_layers 须至少为1".to_string());
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return fail(format!("dropout 须在[0, 1)内，实际为{}", self.dropout));
        }
        if !(self.weight_decay >= 0.0 && self.weight_decay.is_finite()) {
            return fail(format!(
                "weight_decay 须为非负有限数，实际为{}",
                self.weight_decay
            ));
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return fail(format!(
                "contamination 须在(0, 0.5]内，实际为{}",
                self.contamination
            ));
        }
        if !(self.lr > 0.0 && self.lr.is_finite()) {
            return fail(format!("lr 须为正的有限数，实际为{}", self.lr));
        }
        if self.epoch == 0 {
            return fail("epoch 须至少为1".to_string());
        }
        Ok(())
    }

    /// 各层的通道数：`[F, hid_dim × (num_layers − 1), F]`
    pub fn channel_list(&self, num_features: usize) -> Vec<usize> {
        let mut channels = Vec::with_capacity(self.num_layers + 1);
        channels.push(num_features);
        channels.extend(std::iter::repeat_n(self.hid_dim, self.num_layers - 1));
        channels.push(num_features);
        channels
    }

    const fn mlp_config(&self) -> MlpConfig {
        MlpConfig {
            dropout: self.dropout,
            act: self.act,
        }
    }
}

/// 训练好的网络：计算图与其中的输入、重构输出节点
struct Network {
    graph: Graph,
    mlp: Mlp,
    input: Var,
    reconstruction: Var,
    num_features: usize,
}

impl Network {
    fn build(config: &MlpAeConfig, x: &Tensor) -> Result<Self, DetectorError> {
        let num_features = x.shape()[1];
        let graph = match config.seed {
            Some(seed) => Graph::new_with_seed(seed),
            None => Graph::new(),
        };
        let input = graph.input_named(x, "x")?;
        let mlp = Mlp::new(
            &graph,
            &config.channel_list(num_features),
            config.mlp_config(),
            MODEL_NAME,
        )?;
        let reconstruction = mlp.forward(&input)?;
        Ok(Self {
            graph,
            mlp,
            input,
            reconstruction,
            num_features,
        })
    }

    /// 评估模式下前向一次并计算重构误差
    fn score(&self, x: &Tensor) -> Result<Vec<f32>, DetectorError> {
        self.graph.no_grad_scope(|_| -> Result<Vec<f32>, DetectorError> {
            self.input.set_value(x)?;
            self.reconstruction.forward()?;
            let output = self.current_reconstruction()?;
            Ok(reconstruction_error(&output, x))
        })
    }

    fn current_reconstruction(&self) -> Result<Tensor, DetectorError> {
        self.reconstruction.value()?.ok_or_else(|| {
            DetectorError::Graph(crate::nn::GraphError::ComputationError(
                "重构输出没有值".to_string(),
            ))
        })
    }
}

/// 持久化的检测器元数据
#[derive(Serialize, Deserialize)]
struct Metadata {
    config: MlpAeConfig,
    num_features: usize,
    state: DecisionState,
}

/// 多层感知机自编码器离群检测器
///
/// # 使用示例
/// ```ignore
/// let config = MlpAeConfig::default().with_epoch(50).with_seed(42);
/// let mut detector = MlpAe::new(config);
/// detector.fit(&data)?;
/// let scores = detector.decision_function(&data)?;
/// ```
pub struct MlpAe {
    config: MlpAeConfig,
    network: Option<Network>,
    state: Option<DecisionState>,
}

impl Default for MlpAe {
    fn default() -> Self {
        Self::new(MlpAeConfig::default())
    }
}

impl MlpAe {
    pub const fn new(config: MlpAeConfig) -> Self {
        Self {
            config,
            network: None,
            state: None,
        }
    }

    pub const fn config(&self) -> &MlpAeConfig {
        &self.config
    }

    /// 训练后网络的可训练参数个数
    pub fn num_params(&self) -> Option<usize> {
        self.network.as_ref().map(|net| net.mlp.num_params())
    }

    /// 保存到目录`dir`：`detector.json`（配置、输入维度、判定状态）与`params.bin`（网络参数）
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<(), DetectorError> {
        let (Some(network), Some(state)) = (&self.network, &self.state) else {
            return Err(DetectorError::NotFitted);
        };
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let metadata = Metadata {
            config: self.config.clone(),
            num_features: network.num_features,
            state: state.clone(),
        };
        let writer = BufWriter::new(File::create(dir.join(METADATA_FILE))?);
        serde_json::to_writer_pretty(writer, &metadata)?;
        network.graph.save_params(dir.join(PARAMS_FILE))?;

        info!(dir = %dir.display(), "MLP自编码器已保存");
        Ok(())
    }

    /// 从`save`写出的目录恢复已训练的检测器
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, DetectorError> {
        let dir = dir.as_ref();
        let reader = BufReader::new(File::open(dir.join(METADATA_FILE))?);
        let metadata: Metadata = serde_json::from_reader(reader)?;
        metadata.config.validate()?;
        if metadata.num_features == 0 {
            return Err(DetectorError::InvalidConfig(
                "保存的输入维度为0".to_string(),
            ));
        }

        let placeholder = Tensor::zeros(&[1, metadata.num_features]);
        let network = Network::build(&metadata.config, &placeholder)?;
        network.graph.load_params(dir.join(PARAMS_FILE))?;

        info!(dir = %dir.display(), "MLP自编码器已加载");
        Ok(Self {
            config: metadata.config,
            network: Some(network),
            state: Some(metadata.state),
        })
    }
}

impl Detector for MlpAe {
    fn fit(&mut self, data: &NodeData) -> Result<&mut Self, DetectorError> {
        self.config.validate()?;
        let x = data.x();
        let network = Network::build(&self.config, x)?;
        let loss = network.reconstruction.mse_loss(&network.input)?;
        let mut optimizer = Adam::new(&network.graph, &network.mlp.parameters(), self.config.lr)
            .with_weight_decay(self.config.weight_decay);

        debug!(
            num_nodes = data.num_nodes(),
            channels = ?self.config.channel_list(network.num_features),
            num_params = network.mlp.num_params(),
            "开始训练MLP自编码器"
        );

        let mut scores = Vec::new();
        for epoch in 0..self.config.epoch {
            network.graph.train();
            loss.forward()?;
            let loss_value = loss.item()?;
            if !loss_value.is_finite() {
                return Err(DetectorError::Diverged(format!(
                    "第{epoch}轮的损失为{loss_value}"
                )));
            }
            // 分数取自本轮参数更新之前的重构
            scores = reconstruction_error(&network.current_reconstruction()?, x);

            optimizer.zero_grad()?;
            loss.backward()?;
            optimizer.step()?;

            if self.config.verbose {
                match data.y().map(|y| roc_auc_score(y, &scores)) {
                    Some(Ok(auc)) => {
                        info!("Epoch {:04}: Loss {:.4} | AUC {:.4}", epoch, loss_value, auc)
                    }
                    _ => info!("Epoch {:04}: Loss {:.4}", epoch, loss_value),
                }
            } else {
                debug!(epoch, loss = loss_value, "训练轮次完成");
            }
        }

        let state = DecisionState::from_scores(scores, self.config.contamination);
        debug!(threshold = state.threshold(), "训练完成");
        self.network = Some(network);
        self.state = Some(state);
        Ok(self)
    }

    fn decision_function(&self, data: &NodeData) -> Result<Vec<f32>, DetectorError> {
        let network = self.network.as_ref().ok_or(DetectorError::NotFitted)?;
        if data.num_features() != network.num_features {
            return Err(DetectorError::FeatureMismatch {
                expected: network.num_features,
                got: data.num_features(),
            });
        }
        network.score(data.x())
    }

    fn decision_state(&self) -> Option<&DecisionState> {
        self.state.as_ref()
    }
}

/// 每行的重构误差：各特征平方误差的均值
fn reconstruction_error(reconstruction: &Tensor, x: &Tensor) -> Vec<f32> {
    (reconstruction - x).square().mean_axis(1).to_vec()
}
