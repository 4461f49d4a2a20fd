use crate::assert_err;
use crate::metric::{
    MetricError, average_precision, precision_at_k, recall_at_k, roc_auc_score,
};
use approx::assert_abs_diff_eq;

#[test]
fn test_roc_auc_perfect_and_inverted() {
    let labels = [false, false, true, true];
    assert_abs_diff_eq!(
        roc_auc_score(&labels, &[0.1, 0.2, 0.8, 0.9]).unwrap(),
        1.0
    );
    assert_abs_diff_eq!(
        roc_auc_score(&labels, &[0.9, 0.8, 0.2, 0.1]).unwrap(),
        0.0
    );
}

#[test]
fn test_roc_auc_known_value() {
    // sklearn 的经典示例: y=[0,0,1,1], s=[0.1,0.4,0.35,0.8] -> 0.75
    let labels = [false, false, true, true];
    let auc = roc_auc_score(&labels, &[0.1, 0.4, 0.35, 0.8]).unwrap();
    assert_abs_diff_eq!(auc, 0.75, epsilon = 1e-6);
}

#[test]
fn test_roc_auc_with_ties() {
    // 全部分数相同 -> 0.5
    let labels = [true, false, false, true, false];
    assert_abs_diff_eq!(
        roc_auc_score(&labels, &[0.3; 5]).unwrap(),
        0.5,
        epsilon = 1e-6
    );

    // 一对正负样本并列，计半
    let labels = [false, true, false];
    let auc = roc_auc_score(&labels, &[0.1, 0.5, 0.5]).unwrap();
    assert_abs_diff_eq!(auc, 0.75, epsilon = 1e-6);
}

#[test]
fn test_roc_auc_errors() {
    assert_err!(
        roc_auc_score(&[true, true], &[0.1, 0.2]),
        MetricError::SingleClass
    );
    assert_err!(
        roc_auc_score(&[true, false], &[0.1]),
        MetricError::LengthMismatch {
            labels: 2,
            scores: 1
        }
    );
    assert_err!(roc_auc_score(&[], &[]), MetricError::Empty);
    assert_err!(
        roc_auc_score(&[true, false], &[f32::NAN, 0.1]),
        MetricError::NonFinite
    );
}

#[test]
fn test_average_precision() {
    // sklearn 示例: y=[0,0,1,1], s=[0.1,0.4,0.35,0.8] -> 0.8333
    let labels = [false, false, true, true];
    let ap = average_precision(&labels, &[0.1, 0.4, 0.35, 0.8]).unwrap();
    assert_abs_diff_eq!(ap, 5.0 / 6.0, epsilon = 1e-6);

    assert_abs_diff_eq!(
        average_precision(&labels, &[0.0, 0.1, 0.9, 0.8]).unwrap(),
        1.0
    );

    // 并列时作为同一阈值：精确率为 2/4
    assert_abs_diff_eq!(
        average_precision(&labels, &[0.5; 4]).unwrap(),
        0.5,
        epsilon = 1e-6
    );

    assert_err!(
        average_precision(&[false, false], &[0.1, 0.2]),
        MetricError::NoPositive
    );
}

#[test]
fn test_precision_and_recall_at_k() {
    let labels = [true, false, true, false, false, true];
    let scores = [0.9, 0.8, 0.7, 0.1, 0.2, 0.3];

    // 前2名: 0(离群), 1(正常)
    assert_abs_diff_eq!(precision_at_k(&labels, &scores, 2).unwrap(), 0.5);
    assert_abs_diff_eq!(
        recall_at_k(&labels, &scores, 2).unwrap(),
        1.0 / 3.0,
        epsilon = 1e-6
    );

    // 前4名: 0, 1, 2, 5
    assert_abs_diff_eq!(precision_at_k(&labels, &scores, 4).unwrap(), 0.75);
    assert_abs_diff_eq!(recall_at_k(&labels, &scores, 4).unwrap(), 1.0);

    assert_err!(
        precision_at_k(&labels, &scores, 0),
        MetricError::InvalidK { k: 0, len: 6 }
    );
    assert_err!(
        recall_at_k(&labels, &scores, 7),
        MetricError::InvalidK { k: 7, len: 6 }
    );
    assert_err!(
        recall_at_k(&[false, false], &[0.1, 0.2], 1),
        MetricError::NoPositive
    );
}
