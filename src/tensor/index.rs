use super::Tensor;
use std::ops::{Index, IndexMut};

// 引用式索引：`tensor[[i, j]]`
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; N]) -> &Self::Output {
        &self.data[&index[..]]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, index: [usize; N]) -> &mut Self::Output {
        &mut self.data[&index[..]]
    }
}

impl Tensor {
    /// 取出2阶张量的第`row`行，返回形状为`[1, cols]`的新张量
    pub fn row(&self, row: usize) -> Self {
        assert!(self.dimension() == 2, "只有2阶张量才能按行取值");
        let cols = self.shape()[1];
        let slice = &self.data_as_slice()[row * cols..(row + 1) * cols];
        Self::new(slice, &[1, cols])
    }

    /// 用`values`覆盖2阶张量的第`row`行
    pub fn set_row(&mut self, row: usize, values: &[f32]) {
        assert!(self.dimension() == 2, "只有2阶张量才能按行赋值");
        assert_eq!(values.len(), self.shape()[1], "行长度与列数不一致");
        for (col, &v) in values.iter().enumerate() {
            self[[row, col]] = v;
        }
    }
}
