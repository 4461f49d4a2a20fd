use crate::detector::{DecisionState, ProbaMethod, percentile};
use approx::assert_abs_diff_eq;

#[test]
fn test_percentile_linear_interpolation() {
    let values = [5.0, 1.0, 4.0, 2.0, 3.0];
    assert_abs_diff_eq!(percentile(&values, 0.0), 1.0);
    assert_abs_diff_eq!(percentile(&values, 50.0), 3.0);
    assert_abs_diff_eq!(percentile(&values, 100.0), 5.0);
    assert_abs_diff_eq!(percentile(&values, 90.0), 4.6, epsilon = 1e-5);
    assert_abs_diff_eq!(percentile(&[7.0], 30.0), 7.0);
    assert!(percentile(&[], 50.0).is_nan());
}

#[test]
fn test_threshold_and_labels_from_contamination() {
    let scores: Vec<f32> = (1..=10).map(|v| v as f32).collect();
    let state = DecisionState::from_scores(scores.clone(), 0.2);

    // 第80百分位: 秩 7.2 -> 8.2
    assert_abs_diff_eq!(state.threshold(), 8.2, epsilon = 1e-4);
    assert_eq!(state.decision_scores(), &scores[..]);
    let expected: Vec<bool> = (1..=10).map(|v| v >= 9).collect();
    assert_eq!(state.labels(), &expected[..]);
}

#[test]
fn test_labels_use_strict_comparison() {
    // 全部分数相同时阈值等于分数本身，没有节点被判为离群
    let state = DecisionState::from_scores(vec![0.5; 8], 0.1);
    assert_abs_diff_eq!(state.threshold(), 0.5);
    assert!(state.labels().iter().all(|&l| !l));
}

#[test]
fn test_linear_proba() {
    let state = DecisionState::from_scores(vec![0.0, 1.0, 2.0, 3.0, 4.0], 0.1);
    let proba = state.proba(&[-1.0, 2.0, 5.0], ProbaMethod::Linear);
    assert_eq!(proba, vec![[1.0, 0.0], [0.5, 0.5], [0.0, 1.0]]);
}

#[test]
fn test_unify_proba() {
    // μ = 2, σ = √2
    let state = DecisionState::from_scores(vec![0.0, 1.0, 2.0, 3.0, 4.0], 0.1);
    let proba = state.proba(&[0.0, 2.0, 4.0], ProbaMethod::Unify);

    assert_abs_diff_eq!(proba[0][1], 0.0);
    assert_abs_diff_eq!(proba[1][1], 0.0, epsilon = 1e-6);
    // erf(1)
    assert_abs_diff_eq!(proba[2][1], 0.842_700_8, epsilon = 1e-5);
    for p in &proba {
        assert_abs_diff_eq!(p[0] + p[1], 1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_proba_with_constant_training_scores() {
    let state = DecisionState::from_scores(vec![1.0; 4], 0.1);

    let linear = state.proba(&[0.5, 1.0, 1.5], ProbaMethod::Linear);
    assert_eq!(linear, vec![[1.0, 0.0], [1.0, 0.0], [0.5, 0.5]]);

    let unify = state.proba(&[0.5, 1.0, 1.5], ProbaMethod::Unify);
    assert_eq!(unify, vec![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
}
