//! 設定ファイルのテスト
//!
//! 一時ディレクトリで読み書きを検証

use bean_matcher::config::Config;
use bean_matcher_common::ScoringWeights;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// ファイルがなければデフォルト
#[test]
fn test_load_missing_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.default_limit, 5);
    assert_eq!(config.weights, ScoringWeights::default());
}

/// 保存して読み直すと同じ内容
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_default_limit(8).unwrap();
    config.catalog_path = Some(PathBuf::from("/data/beans.json"));
    config.weights.burr_bonus = 7;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

/// 一部の項目だけの設定ファイル
#[test]
fn test_partial_config_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"default_limit": 3, "weights": {"max_tips": 1}}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.default_limit, 3);
    assert_eq!(config.catalog_path, None);
    assert_eq!(config.weights.max_tips, 1);
    assert_eq!(config.weights.max_score, ScoringWeights::default().max_score);
}

/// 壊れた設定ファイルはエラー
#[test]
fn test_broken_config_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}

/// コマンドライン指定が最優先
#[test]
fn test_cli_catalog_path_wins() {
    let config = Config {
        catalog_path: Some(PathBuf::from("/from/config.json")),
        ..Default::default()
    };
    assert_eq!(
        config.catalog_path(Some(Path::new("/from/cli.json"))),
        Some(PathBuf::from("/from/cli.json"))
    );
}

/// 設定したカタログファイルを読み込む
#[test]
fn test_load_catalog_from_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.json");
    let mut catalog = bean_matcher_common::Catalog::builtin().unwrap();
    catalog.beans.truncate(4);
    std::fs::write(&path, serde_json::to_string_pretty(&catalog).unwrap()).unwrap();

    let loaded = Config::default().load_catalog(Some(&path)).unwrap();
    assert_eq!(loaded.beans.len(), 4);
    assert_eq!(loaded.machines.len(), catalog.machines.len());
}

/// 保存できない場所ではエラーを返す
#[test]
fn test_save_to_unwritable_path_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "file").unwrap();

    let config = Config {
        catalog_path: Some(PathBuf::from("/data/beans.json")),
        ..Default::default()
    };
    assert!(config.save_to(&blocker.join("config.json")).is_err());
}
