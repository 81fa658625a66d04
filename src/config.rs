use crate::error::{BeanMatcherError, Result};
use bean_matcher_common::{Catalog, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// カタログパスを上書きする環境変数
pub const CATALOG_ENV: &str = "BEAN_MATCHER_CATALOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// recommend の既定件数
    pub default_limit: usize,
    /// 独自カタログ（未指定なら組み込み）
    pub catalog_path: Option<PathBuf>,
    pub weights: ScoringWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_limit: 5,
            catalog_path: None,
            weights: ScoringWeights::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（なければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BeanMatcherError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("bean-matcher").join("config.json"))
    }

    /// 使用するカタログパス
    ///
    /// コマンドライン指定 > 環境変数 > 設定ファイル の順
    pub fn catalog_path(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = cli_override {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CATALOG_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        self.catalog_path.clone()
    }

    /// カタログを読み込む（未検証、パス未指定なら組み込み）
    pub fn load_catalog_unvalidated(&self, cli_override: Option<&Path>) -> Result<Catalog> {
        match self.catalog_path(cli_override) {
            Some(path) => {
                if !path.exists() {
                    return Err(BeanMatcherError::FileNotFound(path.display().to_string()));
                }
                debug!(path = %path.display(), "loading catalog");
                Ok(Catalog::from_file(&path)?)
            }
            None => Ok(Catalog::builtin()?),
        }
    }

    /// カタログを読み込んで検証する
    pub fn load_catalog(&self, cli_override: Option<&Path>) -> Result<Catalog> {
        Ok(self.load_catalog_unvalidated(cli_override)?.into_validated()?)
    }

    pub fn set_default_limit(&mut self, limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(BeanMatcherError::Config("件数は1以上を指定してください".into()));
        }
        self.default_limit = limit;
        Ok(())
    }
}
