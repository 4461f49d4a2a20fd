/*
 * @Description  : Var - 智能变量句柄，支持算子重载和链式调用
 */

use super::graph::GraphInner;
use super::{GraphError, NodeId};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::ops::Add;
use std::rc::Rc;

// ==================== Init 枚举 ====================

/// 参数初始化策略
#[derive(Debug, Clone)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零
    Zeros,
    /// 全一
    Ones,
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// Kaiming/He 初始化（适用于 `ReLU`）
    Kaiming,
    /// Xavier/Glorot 初始化（适用于 Sigmoid/Tanh）
    Xavier,
}

impl Init {
    /// 生成初始化后的 Tensor（使用全局 RNG）
    pub fn generate(&self, shape: &[usize]) -> Tensor {
        match self.normal_std(shape) {
            Some((mean, std)) => Tensor::normal(mean, std, shape),
            None => self.generate_constant(shape),
        }
    }

    /// 生成初始化后的 Tensor（使用指定的 RNG）
    pub fn generate_with_rng(&self, shape: &[usize], rng: &mut StdRng) -> Tensor {
        match self.normal_std(shape) {
            Some((mean, std)) => Tensor::normal_with_rng(mean, std, shape, rng),
            None => self.generate_constant(shape),
        }
    }

    // 随机类策略返回正态分布的(均值, 标准差)
    fn normal_std(&self, shape: &[usize]) -> Option<(f32, f32)> {
        let fan_in = shape.first().copied().unwrap_or(1).max(1);
        let fan_out = shape.get(1).copied().unwrap_or(1);
        match self {
            Self::Normal { mean, std } => Some((*mean, *std)),
            Self::Kaiming => Some((0.0, (2.0 / fan_in as f32).sqrt())),
            Self::Xavier => Some((0.0, (2.0 / (fan_in + fan_out) as f32).sqrt())),
            _ => None,
        }
    }

    fn generate_constant(&self, shape: &[usize]) -> Tensor {
        match self {
            Self::Constant(v) => &Tensor::ones(shape) * *v,
            Self::Ones => Tensor::ones(shape),
            _ => Tensor::zeros(shape),
        }
    }
}

// ==================== Var 结构 ====================

/// 智能变量句柄 - 携带图引用，支持算子重载和链式调用
///
/// # 使用示例
/// ```ignore
/// let graph = Graph::new();
/// let x = graph.input(&features)?;
/// let h = x.matmul(&w)?.relu()?;
/// let y = &h + &b;
/// let loss = y.mse_loss(&x)?;
/// loss.backward()?;
/// ```
#[derive(Clone)]
pub struct Var {
    id: NodeId,
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    pub(crate) const fn graph(&self) -> &Rc<RefCell<GraphInner>> {
        &self.graph
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph handle
    pub fn get_graph(&self) -> super::graph::Graph {
        super::graph::Graph::from_rc(Rc::clone(&self.graph))
    }

    /// 节点创建时确定的预期形状
    pub fn value_expected_shape(&self) -> Result<Vec<usize>, GraphError> {
        Ok(self
            .graph
            .borrow()
            .get_node_value_expected_shape(self.id)?
            .to_vec())
    }

    pub(crate) fn check_same_graph(&self, other: &Self) -> Result<(), GraphError> {
        if self.same_graph(other) {
            Ok(())
        } else {
            Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 进行操作".to_string(),
            ))
        }
    }

    // ==================== 执行 ====================

    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 反向传播，返回 loss 的标量值
    ///
    /// 若 loss 尚无值则先执行一次前向；已有值时直接沿用，
    /// 以保证梯度与调用方读取到的前向结果（含 Dropout 掩码）一致
    pub fn backward(&self) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        if g.get_node_value(self.id)?.is_none() {
            g.forward(self.id)?;
        }
        g.backward(self.id)
    }

    // ==================== 值访问和设置 ====================

    /// 获取节点的值（克隆的 Tensor）
    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.cloned())
    }

    /// 设置节点的值
    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, Some(value))
    }

    /// 获取标量值（假设是 1x1 Tensor）
    pub fn item(&self) -> Result<f32, GraphError> {
        let val = self.value()?.ok_or_else(|| {
            GraphError::ComputationError(format!("节点{:?}没有值，请先执行 forward", self.id))
        })?;
        val.get_data_number()
            .ok_or_else(|| GraphError::InvalidOperation("Tensor 不是标量".to_string()))
    }

    /// 获取节点的梯度
    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        self.graph.borrow().get_node_grad(self.id)
    }

    /// 带广播的加法（返回 Result）
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other)?;
        let id = self
            .graph
            .borrow_mut()
            .new_add_node(&[self.id, other.id], None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }
}

// ==================== 算子重载 ====================

impl Add for &Var {
    type Output = Var;

    fn add(self, other: &Var) -> Var {
        self.try_add(other).expect("Var 加法失败")
    }
}

impl Add for Var {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Add<&Self> for Var {
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        &self + other
    }
}
