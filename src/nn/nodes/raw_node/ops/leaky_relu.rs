use crate::nn::nodes::raw_node::{TraitNode, parent_value};
use crate::nn::nodes::{NodeHandle, NodeId};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Leaky ReLU 激活函数节点
///
/// forward: f(x) = x if x > 0, else negative_slope * x
/// backward: d(f)/dx = 1 if x > 0, else negative_slope
///
/// 当 negative_slope = 0 时，等价于标准 ReLU
pub(in crate::nn) struct LeakyReLU {
    id: NodeId,
    name: String,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    shape: Vec<usize>,
    negative_slope: f32,
}

impl LeakyReLU {
    pub(in crate::nn) fn new(
        parents: &[&NodeHandle],
        negative_slope: f32,
    ) -> Result<Self, GraphError> {
        // 1. 必要的验证
        if parents.len() != 1 {
            return Err(GraphError::InvalidOperation(
                "LeakyReLU节点只需要1个父节点".to_string(),
            ));
        }
        if negative_slope < 0.0 || !negative_slope.is_finite() {
            return Err(GraphError::InvalidOperation(format!(
                "LeakyReLU的negative_slope应为非负数，但得到: {negative_slope}"
            )));
        }

        // 2. 返回
        Ok(Self {
            id: NodeId(0),
            name: String::new(),
            value: None,
            grad: None,
            shape: parents[0].value_expected_shape().to_vec(),
            negative_slope,
        })
    }
}

impl TraitNode for LeakyReLU {
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
        if self.negative_slope == 0.0 {
            "ReLU"
        } else {
            "LeakyReLU"
        }
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
        _is_train: bool,
    ) -> Result<(), GraphError> {
        let x = parent_value(self, parents[0])?;
        let slope = self.negative_slope;
        self.value = Some(x.where_with_f32(|x| x > 0.0, |x| x, |x| slope * x));
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn clear_value(&mut self) {
        self.value = None;
    }

    fn calc_grad_to_parent(
        &self,
        target_parent: &NodeHandle,
        upstream_grad: &Tensor,
        _assistant_parent: Option<&NodeHandle>,
    ) -> Result<Tensor, GraphError> {
        let x = parent_value(self, target_parent)?;
        let slope = self.negative_slope;
        let local_grad = x.where_with_f32(|x| x > 0.0, |_| 1.0, |_| slope);
        Ok(upstream_grad * &local_grad)
    }

    fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    fn set_grad(&mut self, grad: Option<&Tensor>) -> Result<(), GraphError> {
        self.grad = grad.cloned();
        Ok(())
    }
}
