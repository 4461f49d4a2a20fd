use crate::nn::nodes::raw_node::{TraitNode, parent_value};
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// MSE（均方误差）损失节点
///
/// ## 公式
/// `MSE = mean((input - target)^2) = sum((input - target)^2) / N`
///
/// ## 梯度
/// `∂L/∂input = 2 * (input - target) / N`，对 target 取相反数
///
/// ## 输入
/// - 父节点 0: input（预测值）
/// - 父节点 1: target（目标值）
///
/// ## 输出
/// - 标量损失值 [1, 1]
pub(in crate::nn) struct MSELoss {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    /// 输出形状固定为 [1, 1]（标量损失）
    shape: Vec<usize>,
    /// 缓存 input - target，用于反向传播
    diff_cache: Option<Tensor>,
    /// 父节点 input 的 id，用于区分 input 和 target
    input_id: NodeId,
}

impl MSELoss {
    pub(in crate::nn) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "MSELoss 节点需要 2 个父节点（input 和 target）".to_string(),
            ));
        }

        // 2. 验证特征维度（batch 维是动态的，不参与比较）
        let input_shape = parents[0].value_expected_shape();
        let target_shape = parents[1].value_expected_shape();
        if input_shape.len() != target_shape.len() || input_shape[1..] != target_shape[1..] {
            return Err(GraphError::ShapeMismatch {
                expected: input_shape.to_vec(),
                got: target_shape.to_vec(),
                message: "input 和 target 的形状必须一致".to_string(),
            });
        }

        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape: vec![1, 1],
            diff_cache: None,
            input_id: parents[0].id(),
        })
    }
}

impl TraitNode for MSELoss {
    fn id(&self) -> NodeId {
        self.id
    }

    fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn type_name(&self) -> &'static str {
        "MSELoss"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        _is_train: bool,
    ) -> Result<(), GraphError> {
        let input = parent_value(self, parents[0])?;
        let target = parent_value(self, parents[1])?;
        if !input.is_same_shape(target) {
            return Err(GraphError::ShapeMismatch {
                expected: input.shape().to_vec(),
                got: target.shape().to_vec(),
                message: format!("{}的 input 和 target 形状不一致", self.display_node()),
            });
        }

        let diff = input - target;
        self.value = Some(Tensor::from(diff.square().mean()));
        self.diff_cache = Some(diff);
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn clear_value(&mut self) {
        self.value = None;
        self.diff_cache = None;
    }

    fn calc_grad_to_parent(
        &self,
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        let diff = self.diff_cache.as_ref().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "{}没有缓存的差值，请先执行前向传播",
                self.display_node()
            ))
        })?;
        let upstream = upstream_grad.get_data_number().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "{}的上游梯度必须是标量，但形状为{:?}",
                self.display_node(),
                upstream_grad.shape()
            ))
        })?;

        let scale = 2.0 * upstream / diff.size() as f32;
        let grad = diff * scale;
        if target_parent.id() == self.input_id {
            Ok(grad)
        } else {
            Ok(-grad)
        }
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
