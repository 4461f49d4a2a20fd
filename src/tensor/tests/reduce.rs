use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_sum_and_mean() {
    let t = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    assert_eq!(t.sum(), Tensor::from(10.));
    assert_abs_diff_eq!(t.mean(), 2.5);
}

#[test]
fn test_mean_axis() {
    let t = Tensor::new(&[1., 3., 2., 6.], &[2, 2]);
    assert_eq!(t.mean_axis(1), Tensor::new(&[2., 4.], &[2]));
    assert_eq!(t.mean_axis(0), Tensor::new(&[1.5, 4.5], &[2]));
}

#[test]
fn test_reduce_to_shape() {
    let grad = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]);
    // 广播到 [3, 2] 的偏置 [1, 2]，梯度需要沿轴0求和
    assert_eq!(grad.reduce_to_shape(&[1, 2]), Tensor::new(&[9., 12.], &[1, 2]));
    // 广播到 [3, 2] 的标量 [1, 1]
    assert_eq!(grad.reduce_to_shape(&[1, 1]), Tensor::new(&[21.], &[1, 1]));
    // 前导维度被补齐的情况
    assert_eq!(grad.reduce_to_shape(&[2]), Tensor::new(&[9., 12.], &[2]));
    assert_eq!(grad.reduce_to_shape(&[3, 2]), grad);
}

#[test]
fn test_elementwise_maps() {
    let t = Tensor::new(&[-1., 0., 4.], &[3]);
    assert_eq!(
        t.where_with_f32(|x| x > 0., |x| x, |x| 0.1 * x),
        Tensor::new(&[-0.1, 0., 4.], &[3])
    );
    assert_eq!(t.square(), Tensor::new(&[1., 0., 16.], &[3]));
    assert_eq!(Tensor::new(&[4., 9.], &[2]).sqrt(), Tensor::new(&[2., 3.], &[2]));
    assert!(t.is_all_finite());
    assert!(!Tensor::new(&[f32::NAN], &[1]).is_all_finite());
}
