use crate::assert_err;
use crate::data::{DataError, NodeData};
use crate::tensor::Tensor;
use ndarray::{Array1, Array2, Array3, array};
use ndarray_npy::write_npy;

fn sample_x() -> Tensor {
    Tensor::new(&[1., 2., 3., 4., 5., 6.], &[3, 2])
}

#[test]
fn test_new_node_data() {
    let data = NodeData::new(sample_x()).unwrap();
    assert_eq!(data.num_nodes(), 3);
    assert_eq!(data.num_features(), 2);
    assert_eq!(data.num_edges(), 0);
    assert!(data.y().is_none());
    assert_eq!(data.num_outliers(), 0);
}

#[test]
fn test_new_node_data_rejects_bad_features() {
    assert_err!(
        NodeData::new(Tensor::new(&[1., 2., 3.], &[3])),
        DataError::ShapeMismatch { .. }
    );
    assert_err!(NodeData::new(Tensor::zeros(&[0, 4])), DataError::Empty(_));
    assert_err!(
        NodeData::new(Tensor::new(&[1., f32::NAN, 3., 4.], &[2, 2])),
        DataError::NonFinite
    );
    assert_err!(
        NodeData::new(Tensor::new(&[1., f32::INFINITY], &[1, 2])),
        DataError::NonFinite
    );
}

#[test]
fn test_with_labels() {
    let data = NodeData::new(sample_x())
        .unwrap()
        .with_labels(vec![false, true, true])
        .unwrap();
    assert_eq!(data.y(), Some(&[false, true, true][..]));
    assert_eq!(data.num_outliers(), 2);

    let result = NodeData::new(sample_x()).unwrap().with_labels(vec![true]);
    assert_err!(
        result,
        DataError::ShapeMismatch { expected, got } if expected == &vec![3] && got == &vec![1]
    );
}

#[test]
fn test_with_edges() {
    let data = NodeData::new(sample_x())
        .unwrap()
        .with_edges(vec![(0, 1), (2, 0)])
        .unwrap();
    assert_eq!(data.edges(), &[(0, 1), (2, 0)]);

    let result = NodeData::new(sample_x()).unwrap().with_edges(vec![(0, 3)]);
    assert_err!(result, DataError::IndexOutOfBounds { index: 3, len: 3 });
}

#[test]
fn test_from_npy_f32_and_f64() {
    let dir = tempfile::tempdir().unwrap();

    let path_f32 = dir.path().join("x32.npy");
    let x32: Array2<f32> = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
    write_npy(&path_f32, &x32).unwrap();
    let data = NodeData::from_npy(&path_f32).unwrap();
    assert_eq!(data.x(), &sample_x());

    let path_f64 = dir.path().join("x64.npy");
    let x64: Array2<f64> = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
    write_npy(&path_f64, &x64).unwrap();
    let data = NodeData::from_npy(&path_f64).unwrap();
    assert_eq!(data.x(), &sample_x());
}

#[test]
fn test_from_npy_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert_err!(
        NodeData::from_npy(dir.path().join("missing.npy")),
        DataError::FileNotFound(_)
    );

    // 非数值元素类型
    let path = dir.path().join("ints.npy");
    let ints: Array2<i32> = array![[1, 2], [3, 4]];
    write_npy(&path, &ints).unwrap();
    assert_err!(NodeData::from_npy(&path), DataError::FormatError(_));
}

#[test]
fn test_from_npy_reports_wrong_ndim() {
    let dir = tempfile::tempdir().unwrap();

    // f32 的1阶、3阶数组应报告维数错误，而不是 f64 回退时的类型错误
    let path = dir.path().join("vec32.npy");
    let v: Array1<f32> = array![1.0, 2.0];
    write_npy(&path, &v).unwrap();
    assert_err!(NodeData::from_npy(&path), DataError::NdimMismatch(_));

    let path = dir.path().join("cube32.npy");
    let cube: Array3<f32> = Array3::zeros((2, 2, 2));
    write_npy(&path, &cube).unwrap();
    assert_err!(NodeData::from_npy(&path), DataError::NdimMismatch(_));

    let path = dir.path().join("vec64.npy");
    let v: Array1<f64> = array![1.0, 2.0];
    write_npy(&path, &v).unwrap();
    assert_err!(NodeData::from_npy(&path), DataError::NdimMismatch(_));

    let path = dir.path().join("labels2d.npy");
    let y: Array2<i64> = array![[0, 1], [1, 0]];
    write_npy(&path, &y).unwrap();
    assert_err!(NodeData::labels_from_npy(&path), DataError::NdimMismatch(_));
}

#[test]
fn test_labels_from_npy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("y.npy");
    let y: Array1<i64> = array![0, 1, 0, 2];
    write_npy(&path, &y).unwrap();
    let labels = NodeData::labels_from_npy(&path).unwrap();
    assert_eq!(labels, vec![false, true, false, true]);

    assert_err!(
        NodeData::labels_from_npy(dir.path().join("missing.npy")),
        DataError::FileNotFound(_)
    );
}
