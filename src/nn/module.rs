/*
 * @Description  : Module trait 定义
 */

use super::Var;

/// 模块 trait
///
/// - `forward()` 与 `new()` 签名各异，不放入 trait
/// - `parameters()` 返回 `Vec<Var>`，供优化器与参数统计使用
pub trait Module {
    /// 获取所有可训练参数
    fn parameters(&self) -> Vec<Var>;

    /// 获取参数张量的个数
    fn num_params(&self) -> usize {
        self.parameters().len()
    }
}
