use crate::assert_panic;
use crate::tensor::Tensor;

#[test]
fn test_add_with_or_without_ownership() {
    let tensor1 = Tensor::new(&[1., 2., 3.], &[3]);
    let tensor2 = Tensor::new(&[4., 5., 6.], &[3]);
    let expected = Tensor::new(&[5., 7., 9.], &[3]);

    assert_eq!(tensor1.clone() + tensor2.clone(), expected);
    assert_eq!(tensor1.clone() + &tensor2, expected);
    assert_eq!(&tensor1 + tensor2.clone(), expected);
    assert_eq!(&tensor1 + &tensor2, expected);

    // 与纯数相加
    let expected = Tensor::new(&[6., 7., 8.], &[3]);
    assert_eq!(5. + &tensor1, expected);
    assert_eq!(&tensor1 + 5., expected);
}

#[test]
fn test_broadcast_add_bias() {
    // [N, F] + [1, F]：线性层偏置的广播方式
    let x = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2]);
    let b = Tensor::new(&[10., 20.], &[1, 2]);
    let expected = Tensor::new(&[11., 22., 13., 24., 15., 26.], &[3, 2]);
    assert_eq!(&x + &b, expected);
    assert_eq!(&b + &x, expected);
}

#[test]
fn test_incompatible_shapes_panic() {
    let a = Tensor::zeros(&[2, 3]);
    let b = Tensor::zeros(&[3, 2]);
    assert_panic!(&a + &b);
    assert_panic!(&a * &b);
}

#[test]
fn test_sub_mul_div() {
    let a = Tensor::new(&[2., 4., 6., 8.], &[2, 2]);
    let b = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    assert_eq!(&a - &b, Tensor::new(&[1., 2., 3., 4.], &[2, 2]));
    assert_eq!(&a * &b, Tensor::new(&[2., 8., 18., 32.], &[2, 2]));
    assert_eq!(&a / &b, Tensor::new(&[2., 2., 2., 2.], &[2, 2]));
    assert_eq!(&a / 2., b);
    assert_eq!(1. - &b, Tensor::new(&[0., -1., -2., -3.], &[2, 2]));
    assert_eq!(-&b, Tensor::new(&[-1., -2., -3., -4.], &[2, 2]));
    assert_panic!(&a / 0.);
}

#[test]
fn test_assign_ops() {
    let mut a = Tensor::new(&[1., 2.], &[1, 2]);
    a += &Tensor::new(&[1., 1.], &[1, 2]);
    assert_eq!(a, Tensor::new(&[2., 3.], &[1, 2]));
    a *= 2.;
    assert_eq!(a, Tensor::new(&[4., 6.], &[1, 2]));
    a += 1.;
    assert_eq!(a, Tensor::new(&[5., 7.], &[1, 2]));
    let mut c = a.clone();
    assert_panic!(c += &Tensor::zeros(&[2, 2]));
}

#[test]
fn test_mat_mul_and_transpose() {
    let a = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let b = Tensor::new(&[7., 8., 9., 10., 11., 12.], &[3, 2]);
    let c = a.mat_mul(&b);
    assert_eq!(c, Tensor::new(&[58., 64., 139., 154.], &[2, 2]));

    let t = a.transpose();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.data_as_slice(), &[1., 4., 2., 5., 3., 6.]);

    assert_panic!(a.mat_mul(&a));
    assert_panic!(Tensor::zeros(&[3]).transpose());
}
