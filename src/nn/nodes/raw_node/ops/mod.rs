mod add;
mod dropout;
mod leaky_relu;
mod mat_mul;
mod sigmoid;
mod tanh;

pub(in crate::nn) use add::Add;
pub(in crate::nn) use dropout::Dropout;
pub(in crate::nn) use leaky_relu::LeakyReLU;
pub(in crate::nn) use mat_mul::MatMul;
pub(in crate::nn) use sigmoid::Sigmoid;
pub(in crate::nn) use tanh::Tanh;
