use crate::assert_err;
use crate::detector::{DetectorError, MlpAeConfig};
use crate::nn::Activation;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = MlpAeConfig::default();
    assert_eq!(config.hid_dim, 64);
    assert_eq!(config.num_layers, 4);
    assert_eq!(config.dropout, 0.3);
    assert_eq!(config.weight_decay, 0.0);
    assert_eq!(config.act, Some(Activation::Relu));
    assert_eq!(config.contamination, 0.1);
    assert_eq!(config.lr, 5e-3);
    assert_eq!(config.epoch, 100);
    assert!(!config.verbose);
    assert_eq!(config.seed, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_channel_list() {
    let config = MlpAeConfig::default();
    assert_eq!(config.channel_list(10), vec![10, 64, 64, 64, 10]);

    let config = MlpAeConfig::default().with_hid_dim(3).with_num_layers(1);
    assert_eq!(config.channel_list(5), vec![5, 5]);

    let config = MlpAeConfig::default().with_hid_dim(3).with_num_layers(2);
    assert_eq!(config.channel_list(5), vec![5, 3, 5]);
}

#[test]
fn test_validate_rejects_bad_values() {
    let base = MlpAeConfig::default();
    let bad = [
        base.clone().with_hid_dim(0),
        base.clone().with_num_layers(0),
        base.clone().with_dropout(1.0),
        base.clone().with_dropout(-0.1),
        base.clone().with_weight_decay(-1.0),
        base.clone().with_contamination(0.0),
        base.clone().with_contamination(0.6),
        base.clone().with_lr(0.0),
        base.clone().with_lr(f32::NAN),
        base.clone().with_epoch(0),
    ];
    for config in bad {
        assert_err!(config.validate(), DetectorError::InvalidConfig(_));
    }

    assert!(base.clone().with_contamination(0.5).validate().is_ok());
    assert!(base.with_dropout(0.0).validate().is_ok());
}

#[test]
fn test_deserialize_partial_json_uses_defaults() {
    let config: MlpAeConfig =
        serde_json::from_str(r#"{"hid_dim": 16, "act": "tanh", "seed": 7}"#).unwrap();
    assert_eq!(config.hid_dim, 16);
    assert_eq!(config.act, Some(Activation::Tanh));
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.num_layers, 4);
    assert_eq!(config.epoch, 100);

    let config: MlpAeConfig = serde_json::from_str(r#"{"act": null}"#).unwrap();
    assert_eq!(config.act, None);

    let config: MlpAeConfig =
        serde_json::from_str(r#"{"act": {"leaky_relu": 0.2}}"#).unwrap();
    assert_eq!(config.act, Some(Activation::LeakyRelu(0.2)));
}

#[test]
fn test_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"epoch": 5, "lr": 0.01, "verbose": true}}"#).unwrap();
    let config = MlpAeConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.epoch, 5);
    assert_eq!(config.lr, 0.01);
    assert!(config.verbose);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"contamination": 0.9}}"#).unwrap();
    assert_err!(
        MlpAeConfig::from_json_file(file.path()),
        DetectorError::InvalidConfig(_)
    );

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert_err!(
        MlpAeConfig::from_json_file(file.path()),
        DetectorError::Json(_)
    );

    assert_err!(
        MlpAeConfig::from_json_file("/nonexistent/config.json"),
        DetectorError::Io(_)
    );
}
