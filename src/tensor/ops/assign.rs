use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::{AddAssign, MulAssign};

impl AddAssign<&Tensor> for Tensor {
    fn add_assign(&mut self, other: &Tensor) {
        // 原地运算不允许改变左操作数的形状
        if self.is_same_shape(other) {
            self.data += &other.data;
        } else if let Some(number) = other.get_data_number() {
            self.data += number;
        } else {
            panic!(
                "{}",
                TensorError::OperatorError {
                    operator: Operator::AddAssign,
                    tensor1_shape: self.shape().to_vec(),
                    tensor2_shape: other.shape().to_vec(),
                }
            )
        }
    }
}

impl AddAssign<f32> for Tensor {
    fn add_assign(&mut self, scalar: f32) {
        self.data += scalar;
    }
}

impl MulAssign<&Tensor> for Tensor {
    fn mul_assign(&mut self, other: &Tensor) {
        if self.is_same_shape(other) {
            self.data *= &other.data;
        } else if let Some(number) = other.get_data_number() {
            self.data *= number;
        } else {
            panic!(
                "{}",
                TensorError::OperatorError {
                    operator: Operator::MulAssign,
                    tensor1_shape: self.shape().to_vec(),
                    tensor2_shape: other.shape().to_vec(),
                }
            )
        }
    }
}

impl MulAssign<f32> for Tensor {
    fn mul_assign(&mut self, scalar: f32) {
        self.data *= scalar;
    }
}
