/*
 * @Description  : 多层感知机（MLP）：按通道列表堆叠 Linear 层
 *
 * 相邻两层之间依次施加激活与 Dropout，最后一层之后不施加任何变换
 */

use crate::nn::{
    Graph, GraphError, Linear, Module, Var, VarActivationOps, VarRegularizationOps,
};
use serde::{Deserialize, Serialize};

/// 隐藏层激活函数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    /// 负半轴斜率
    LeakyRelu(f32),
    Sigmoid,
    Tanh,
}

impl Activation {
    pub fn apply(&self, x: &Var) -> Result<Var, GraphError> {
        match self {
            Self::Relu => x.relu(),
            Self::LeakyRelu(slope) => x.leaky_relu(*slope),
            Self::Sigmoid => x.sigmoid(),
            Self::Tanh => x.tanh(),
        }
    }
}

/// MLP 的层间配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MlpConfig {
    /// 层间 Dropout 概率，0 表示不使用
    pub dropout: f32,
    /// 层间激活函数，None 表示不使用激活（纯线性）
    pub act: Option<Activation>,
}

impl Default for MlpConfig {
    fn default() -> Self {
        Self {
            dropout: 0.0,
            act: Some(Activation::Relu),
        }
    }
}

pub struct Mlp {
    layers: Vec<Linear>,
    config: MlpConfig,
}

impl Mlp {
    /// 按`channel_list`创建 MLP：共`channel_list.len() - 1`个 Linear 层，
    /// 第 i 层为`channel_list[i] -> channel_list[i + 1]`，参数名前缀为`{name}_fc{i}`
    pub fn new(
        graph: &Graph,
        channel_list: &[usize],
        config: MlpConfig,
        name: &str,
    ) -> Result<Self, GraphError> {
        if channel_list.len() < 2 {
            return Err(GraphError::InvalidOperation(format!(
                "MLP的通道列表至少需要2个元素，但得到{channel_list:?}"
            )));
        }
        if !(0.0..1.0).contains(&config.dropout) {
            return Err(GraphError::InvalidOperation(format!(
                "MLP的dropout须在[0, 1)内，但得到{}",
                config.dropout
            )));
        }

        let layers = channel_list
            .windows(2)
            .enumerate()
            .map(|(i, pair)| Linear::new(graph, pair[0], pair[1], true, &format!("{name}_fc{i}")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { layers, config })
    }

    pub fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let last = self.layers.len() - 1;
        let mut h = x.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            h = layer.forward(&h)?;
            if i == last {
                break;
            }
            if let Some(act) = &self.config.act {
                h = act.apply(&h)?;
            }
            if self.config.dropout > 0.0 {
                h = h.dropout(self.config.dropout)?;
            }
        }
        Ok(h)
    }

    pub fn layers(&self) -> &[Linear] {
        &self.layers
    }

    pub const fn config(&self) -> &MlpConfig {
        &self.config
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Var> {
        self.layers.iter().flat_map(|layer| layer.parameters()).collect()
    }
}
