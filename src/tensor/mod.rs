/*
 * @Description  : 张量（Tensor）：基于ndarray的f32多维数组，是计算图中所有节点值与梯度的载体
 */

use ndarray::{Array, IxDyn};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;

use crate::errors::TensorError;

mod ops {
    pub mod add;
    pub mod assign;
    pub mod div;
    pub mod mat_mul;
    pub mod mul;
    pub mod others;
    pub mod sub;
}

mod index;
mod print;
mod property;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则会panic；不想panic请用`try_new`。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        Self::try_new(data, shape).unwrap_or_else(|e| panic!("{}", e))
    }

    /// `new`的可失败版本
    pub fn try_new(data: &[f32], shape: &[usize]) -> Result<Self, TensorError> {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).map_err(|_| {
            TensorError::DataShapeMismatch {
                data_len: data.len(),
                shape: shape.to_vec(),
            }
        })?;
        Ok(Self { data })
    }

    /// 内部数据必须保持标准（行优先）布局，`data_as_slice`依赖于此
    pub(crate) fn from_array(data: Array<f32, IxDyn>) -> Self {
        if data.is_standard_layout() {
            Self { data }
        } else {
            Self {
                data: data.as_standard_layout().into_owned(),
            }
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间（使用指定的RNG，确保可重复性）
    pub fn uniform_with_rng(min: f32, max: f32, shape: &[usize], rng: &mut StdRng) -> Self {
        let dist = Uniform::from(min..=max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| dist.sample(rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }

    /// 创建一个服从正态分布的随机张量（使用全局 thread_rng，非确定性）
    pub fn normal(mean: f32, std_dev: f32, shape: &[usize]) -> Self {
        Self::normal_from(mean, std_dev, shape, &mut rand::thread_rng())
    }

    /// 创建一个服从正态分布的随机张量（使用指定的RNG）
    pub fn normal_with_rng(mean: f32, std_dev: f32, shape: &[usize], rng: &mut StdRng) -> Self {
        Self::normal_from(mean, std_dev, shape, rng)
    }

    // Box-Muller 变换
    fn normal_from<R: Rng + ?Sized>(mean: f32, std_dev: f32, shape: &[usize], rng: &mut R) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = rng.r#gen();
            let u2: f32 = rng.r#gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }
}
