/*
 * @Description  : Linear (全连接) 层
 */

use crate::nn::{Graph, GraphError, Init, Module, Var, VarMatrixOps};

/// Linear (全连接) 层
///
/// PyTorch 风格的全连接层：`output = x @ W + b`
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
///
/// 偏置 [1, out_features] 通过 Add 节点的广播加到每一行，batch 大小可在运行时变化
///
/// # 使用示例
/// ```ignore
/// let fc = Linear::new(&graph, 784, 128, true, "fc1")?;
/// let h = fc.forward(&x)?.relu()?;
/// ```
pub struct Linear {
    /// 权重参数 [in_features, out_features]
    weights: Var,
    /// 偏置参数 [1, out_features]（可选）
    bias: Option<Var>,
    in_features: usize,
    out_features: usize,
    name: String,
}

impl Linear {
    /// 创建新的 Linear 层
    ///
    /// 权重使用 Kaiming 初始化，偏置初始化为零；
    /// 参数节点命名为`{name}_W`和`{name}_b`
    pub fn new(
        graph: &Graph,
        in_features: usize,
        out_features: usize,
        use_bias: bool,
        name: &str,
    ) -> Result<Self, GraphError> {
        if in_features == 0 || out_features == 0 {
            return Err(GraphError::InvalidOperation(format!(
                "Linear层{name}的输入/输出维度必须为正，但得到[{in_features}, {out_features}]"
            )));
        }

        let weights = graph.parameter(
            &[in_features, out_features],
            Init::Kaiming,
            &format!("{name}_W"),
        )?;
        let bias = if use_bias {
            Some(graph.parameter(&[1, out_features], Init::Zeros, &format!("{name}_b"))?)
        } else {
            None
        };

        Ok(Self {
            weights,
            bias,
            in_features,
            out_features,
            name: name.to_string(),
        })
    }

    /// 前向传播：计算 `x @ W + b`
    pub fn forward(&self, x: &Var) -> Result<Var, GraphError> {
        let xw = x.matmul(&self.weights)?;
        match &self.bias {
            Some(b) => xw.try_add(b),
            None => Ok(xw),
        }
    }

    pub const fn in_features(&self) -> usize {
        self.in_features
    }

    pub const fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn weights(&self) -> &Var {
        &self.weights
    }

    pub const fn bias(&self) -> Option<&Var> {
        self.bias.as_ref()
    }
}

impl Module for Linear {
    fn parameters(&self) -> Vec<Var> {
        let mut params = vec![self.weights.clone()];
        if let Some(b) = &self.bias {
            params.push(b.clone());
        }
        params
    }
}
