/*
 * @Description  : 带属性图的节点数据：特征矩阵、可选离群标签、可选边列表
 */

use super::DataError;
use crate::tensor::Tensor;
use ndarray::{Array1, Array2};
use ndarray_npy::{ReadNpyError, read_npy};
use std::path::Path;

/// 节点数据
///
/// - `x`: 节点特征，形状`[N, F]`，要求非空且全部为有限数
/// - `y`: 可选的离群标签（true 表示离群），长度为 N
/// - `edges`: 有向边`(src, dst)`，端点须小于 N。基于 MLP 的检测器不使用边
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    x: Tensor,
    y: Option<Vec<bool>>,
    edges: Vec<(usize, usize)>,
}

impl NodeData {
    pub fn new(x: Tensor) -> Result<Self, DataError> {
        if x.dimension() != 2 {
            return Err(DataError::ShapeMismatch {
                expected: vec![0, 0],
                got: x.shape().to_vec(),
            });
        }
        if x.size() == 0 {
            return Err(DataError::Empty(format!(
                "特征矩阵的形状为{:?}",
                x.shape()
            )));
        }
        if !x.is_all_finite() {
            return Err(DataError::NonFinite);
        }
        Ok(Self {
            x,
            y: None,
            edges: Vec::new(),
        })
    }

    /// 附加离群标签
    pub fn with_labels(mut self, y: Vec<bool>) -> Result<Self, DataError> {
        if y.len() != self.num_nodes() {
            return Err(DataError::ShapeMismatch {
                expected: vec![self.num_nodes()],
                got: vec![y.len()],
            });
        }
        self.y = Some(y);
        Ok(self)
    }

    /// 附加边列表（覆盖原有的边）
    pub fn with_edges(mut self, edges: Vec<(usize, usize)>) -> Result<Self, DataError> {
        let len = self.num_nodes();
        if let Some(&index) = edges
            .iter()
            .flat_map(|(src, dst)| [src, dst])
            .find(|&&i| i >= len)
        {
            return Err(DataError::IndexOutOfBounds { index, len });
        }
        self.edges = edges;
        Ok(self)
    }

    /// 从 .npy 文件读取特征矩阵（支持 f32 与 f64 的2阶数组）
    pub fn from_npy<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.to_path_buf()));
        }
        // 只有元素类型不是 f32 时才改按 f64 读取，其余错误原样报告
        let array: Array2<f32> = match read_npy::<_, Array2<f32>>(path) {
            Ok(array) => array,
            Err(ReadNpyError::WrongDescriptor(_)) => read_npy::<_, Array2<f64>>(path)
                .map_err(|e| npy_error(path, e))?
                .mapv(|v| v as f32),
            Err(e) => return Err(npy_error(path, e)),
        };
        Self::new(Tensor::from_array(array.into_dyn()))
    }

    /// 从 .npy 文件读取1阶标签数组（整数，非零即离群；或布尔）
    pub fn labels_from_npy<P: AsRef<Path>>(path: P) -> Result<Vec<bool>, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.to_path_buf()));
        }
        match read_npy::<_, Array1<i64>>(path) {
            Ok(labels) => Ok(labels.iter().map(|&v| v != 0).collect()),
            Err(ReadNpyError::WrongDescriptor(_)) => {
                let labels: Array1<bool> = read_npy(path).map_err(|e| npy_error(path, e))?;
                Ok(labels.to_vec())
            }
            Err(e) => Err(npy_error(path, e)),
        }
    }

    pub const fn x(&self) -> &Tensor {
        &self.x
    }

    pub fn y(&self) -> Option<&[bool]> {
        self.y.as_deref()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn num_nodes(&self) -> usize {
        self.x.shape()[0]
    }

    pub fn num_features(&self) -> usize {
        self.x.shape()[1]
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// 标签中离群点的个数；无标签时为0
    pub fn num_outliers(&self) -> usize {
        self.y
            .as_ref()
            .map_or(0, |y| y.iter().filter(|&&v| v).count())
    }

    pub(super) fn into_parts(self) -> (Tensor, Option<Vec<bool>>, Vec<(usize, usize)>) {
        (self.x, self.y, self.edges)
    }
}

fn npy_error(path: &Path, err: ReadNpyError) -> DataError {
    match err {
        ReadNpyError::WrongNdim(..) => {
            DataError::NdimMismatch(format!("{}: {err}", path.display()))
        }
        _ => DataError::FormatError(format!("{}: {err}", path.display())),
    }
}
