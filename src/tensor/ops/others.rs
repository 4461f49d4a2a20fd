use crate::errors::{ComparisonOperator, TensorError};
use crate::tensor::Tensor;
use ndarray::Axis;

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl From<f32> for Tensor {
    /// 将`f32`转换为形状为`[1, 1]`的标量张量
    fn from(scalar: f32) -> Self {
        Self::new(&[scalar], &[1, 1])
    }
}

impl Tensor {
    /// 检查两个张量能否按 NumPy 规则广播：
    /// 从右向左对齐维度，每个维度必须相等或其中一个为1
    pub fn can_broadcast_with(&self, other: &Self) -> bool {
        self.shape()
            .iter()
            .rev()
            .zip(other.shape().iter().rev())
            .all(|(&a, &b)| a == b || a == 1 || b == 1)
    }

    /// 对张量中的所有元素求和并返回一个形状为[1, 1]的标量。
    pub fn sum(&self) -> Self {
        Self::from(self.data.sum())
    }

    /// 所有元素的均值（纯数）。空张量返回NaN
    pub fn mean(&self) -> f32 {
        self.data.mean().unwrap_or(f32::NAN)
    }

    /// 沿`axis`求均值并去掉该维度，如`[N, F]`沿轴1得到`[N]`
    pub fn mean_axis(&self, axis: usize) -> Self {
        self.check_axis(axis);
        let len = self.shape()[axis];
        Self::from_array(self.data.sum_axis(Axis(axis)) / len.max(1) as f32)
    }

    /// 沿`axis`求和并保留该维度（长度变为1）
    pub fn sum_axis_keepdims(&self, axis: usize) -> Self {
        self.check_axis(axis);
        Self::from_array(self.data.sum_axis(Axis(axis)).insert_axis(Axis(axis)))
    }

    /// 将广播得到的梯度“还原”到`shape`：对被广播的轴求和。
    /// 用于带广播的二元节点的反向传播。
    pub fn reduce_to_shape(&self, shape: &[usize]) -> Self {
        if self.shape() == shape {
            return self.clone();
        }
        let mut result = self.clone();
        // 先消去多出来的前导维度
        while result.dimension() > shape.len() {
            result = Self::from_array(result.data.sum_axis(Axis(0)));
        }
        // 再对目标形状中为1而当前不为1的轴求和
        for (axis, &dim) in shape.iter().enumerate() {
            if dim == 1 && result.shape()[axis] != 1 {
                result = result.sum_axis_keepdims(axis);
            }
        }
        result
    }

    /// 逐元素映射
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Self {
        Self::from_array(self.data.mapv(f))
    }

    /// 按条件逐元素取值：满足`cond`的元素用`on_true`变换，否则用`on_false`
    pub fn where_with_f32<C, T, F>(&self, cond: C, on_true: T, on_false: F) -> Self
    where
        C: Fn(f32) -> bool,
        T: Fn(f32) -> f32,
        F: Fn(f32) -> f32,
    {
        self.map(|x| if cond(x) { on_true(x) } else { on_false(x) })
    }

    pub fn sqrt(&self) -> Self {
        self.map(f32::sqrt)
    }

    pub fn square(&self) -> Self {
        self.map(|x| x * x)
    }

    fn check_axis(&self, axis: usize) {
        assert!(
            axis < self.dimension(),
            "{}",
            TensorError::ValueMustSatisfyComparison {
                value_name: "axis".to_string(),
                operator: ComparisonOperator::LessThan,
                threshold: self.dimension(),
            }
        );
    }
}
