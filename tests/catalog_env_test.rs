//! 環境変数によるカタログ指定のテスト
//!
//! 環境変数を書き換えるため他のテストと別バイナリにしている

use bean_matcher::config::{Config, CATALOG_ENV};
use std::path::{Path, PathBuf};

/// 環境変数は設定ファイルより優先、コマンドラインよりは後
#[test]
fn test_env_catalog_precedence() {
    let config = Config {
        catalog_path: Some(PathBuf::from("/from/config.json")),
        ..Default::default()
    };

    std::env::set_var(CATALOG_ENV, "/from/env.json");
    assert_eq!(config.catalog_path(None), Some(PathBuf::from("/from/env.json")));
    assert_eq!(
        config.catalog_path(Some(Path::new("/from/cli.json"))),
        Some(PathBuf::from("/from/cli.json"))
    );

    // 空文字は未設定扱い
    std::env::set_var(CATALOG_ENV, "  ");
    assert_eq!(config.catalog_path(None), Some(PathBuf::from("/from/config.json")));

    std::env::remove_var(CATALOG_ENV);
    assert_eq!(config.catalog_path(None), Some(PathBuf::from("/from/config.json")));
}
