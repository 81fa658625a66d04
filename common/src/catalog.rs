//! 豆・器具カタログ
//!
//! 組み込みカタログ（JSON埋め込み）またはJSONファイルから読み込む。
//! 照合前に豆レコードの不変条件を検証する。

use crate::equipment::{CoffeeGrinder, EquipmentProfile, EspressoMachine};
use crate::error::{Error, Result};
use crate::matcher::BeanMatcher;
use crate::types::{Bean, BrewMethod, RoastLevel};
use crate::weights::ScoringWeights;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

lazy_static::lazy_static! {
    static ref PURCHASE_URL: Regex = Regex::new(r"(?i)^https?://[^\s/?#]+([/?#]\S*)?$").unwrap();
}

/// カタログ全体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub beans: Vec<Bean>,
    #[serde(default)]
    pub machines: Vec<EspressoMachine>,
    #[serde(default)]
    pub grinders: Vec<CoffeeGrinder>,
}

/// 検証で見つかった問題
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    pub bean_id: String,
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.bean_id, self.message)
    }
}

impl Catalog {
    /// 組み込みカタログ
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 豆レコードの不変条件を検証
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for bean in &self.beans {
            let mut report = |message: &str| {
                issues.push(CatalogIssue {
                    bean_id: bean.id.clone(),
                    message: message.to_string(),
                });
            };

            if bean.id.trim().is_empty() {
                report("id is empty");
            } else if !seen.insert(bean.id.as_str()) {
                report("duplicate id");
            }
            if !(bean.price > 0.0) {
                report("price must be positive");
            }
            if bean.flavor_notes.is_empty() {
                report("at least one flavor note is required");
            }
            if bean.brew_methods.is_empty() {
                report("at least one brew method is required");
            }
            if !PURCHASE_URL.is_match(&bean.affiliate_url) {
                report("purchase URL must be an absolute http(s) URL");
            }
        }

        issues
    }

    /// 検証済みのカタログを返す
    pub fn into_validated(self) -> Result<Self> {
        let issues = self.validate();
        if issues.is_empty() {
            return Ok(self);
        }
        let summary: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        Err(Error::InvalidCatalog(summary.join("; ")))
    }

    pub fn machine(&self, id: &str) -> Option<&EspressoMachine> {
        self.machines.iter().find(|m| m.id == id)
    }

    pub fn grinder(&self, id: &str) -> Option<&CoffeeGrinder> {
        self.grinders.iter().find(|g| g.id == id)
    }

    /// プロファイルのID指定をカタログで解決した照合器を作る
    ///
    /// 見つからないIDは警告を出して「指定なし」として扱う。
    pub fn matcher_for(&self, profile: &EquipmentProfile, weights: ScoringWeights) -> BeanMatcher<'_> {
        let machine = profile.machine_id.as_deref().and_then(|id| {
            let found = self.machine(id);
            if found.is_none() {
                warn!(machine_id = id, "unknown machine id, ignoring");
            }
            found
        });
        let grinder = profile.grinder_id.as_deref().and_then(|id| {
            let found = self.grinder(id);
            if found.is_none() {
                warn!(grinder_id = id, "unknown grinder id, ignoring");
            }
            found
        });

        BeanMatcher::new(weights)
            .with_machine(machine)
            .with_grinder(grinder)
    }

    pub fn beans_by_roaster(&self, roaster: &str) -> Vec<&Bean> {
        self.beans.iter().filter(|b| b.roaster == roaster).collect()
    }

    pub fn beans_by_origin(&self, origin: &str) -> Vec<&Bean> {
        self.beans.iter().filter(|b| b.origin == origin).collect()
    }

    /// フレーバーノートの部分一致（大文字小文字を無視）
    pub fn beans_by_flavor_note(&self, note: &str) -> Vec<&Bean> {
        let needle = note.to_lowercase();
        self.beans
            .iter()
            .filter(|b| b.has_note_matching(&[needle.as_str()]))
            .collect()
    }

    pub fn beans_by_roast_level(&self, level: RoastLevel) -> Vec<&Bean> {
        self.beans.iter().filter(|b| b.roast_level == level).collect()
    }

    pub fn beans_by_brew_method(&self, method: BrewMethod) -> Vec<&Bean> {
        self.beans.iter().filter(|b| b.supports(method)).collect()
    }

    pub fn in_stock_beans(&self) -> Vec<&Bean> {
        self.beans.iter().filter(|b| b.in_stock).collect()
    }

    /// ロースター一覧（重複除去、カタログ順）
    pub fn roasters(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.beans
            .iter()
            .map(|b| b.roaster.as_str())
            .filter(|r| seen.insert(*r))
            .collect()
    }
}

/// 追加の絞り込み条件（CLIから指定可能なもの）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeanFilter {
    pub in_stock_only: bool,
    pub max_price: Option<f64>,
    pub brew_method: Option<BrewMethod>,
    pub roaster: Option<String>,
    pub origin: Option<String>,
}

impl BeanFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, bean: &Bean) -> bool {
        if self.in_stock_only && !bean.in_stock {
            return false;
        }
        if let Some(max) = self.max_price {
            if bean.price > max {
                return false;
            }
        }
        if let Some(method) = self.brew_method {
            if !bean.supports(method) {
                return false;
            }
        }
        if let Some(ref roaster) = self.roaster {
            if !bean.roaster.eq_ignore_ascii_case(roaster) {
                return false;
            }
        }
        if let Some(ref origin) = self.origin {
            if !bean.origin.eq_ignore_ascii_case(origin) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::MachineType;
    use crate::types::fixtures::bean;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin().expect("組み込みカタログの読み込み失敗");
        assert_eq!(catalog.beans.len(), 16);
        assert_eq!(catalog.machines.len(), 10);
        assert_eq!(catalog.grinders.len(), 5);
        assert!(catalog.validate().is_empty(), "{:?}", catalog.validate());
    }

    #[test]
    fn test_validate_reports_each_issue() {
        let mut bad = bean("b1", RoastLevel::Light, &[], &[]);
        bad.price = 0.0;
        bad.affiliate_url = "ftp://example.com/bean".to_string();
        let dup = bean("b1", RoastLevel::Medium, &[BrewMethod::Espresso], &["cocoa"]);

        let catalog = Catalog {
            beans: vec![bad, dup],
            ..Default::default()
        };
        let issues = catalog.validate();
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();

        assert_eq!(
            messages,
            vec![
                "price must be positive",
                "at least one flavor note is required",
                "at least one brew method is required",
                "purchase URL must be an absolute http(s) URL",
                "duplicate id",
            ]
        );
    }

    #[test]
    fn test_url_validation() {
        assert!(PURCHASE_URL.is_match("https://bluebottlecoffee.com/us/eng/espresso"));
        assert!(PURCHASE_URL.is_match("http://example.com"));
        assert!(!PURCHASE_URL.is_match("/relative/path"));
        assert!(!PURCHASE_URL.is_match("https://"));
        assert!(!PURCHASE_URL.is_match("https://example.com/with space"));
        assert!(PURCHASE_URL.is_match("https://example.com?tag=abc"));
        assert!(PURCHASE_URL.is_match("https://example.com#beans"));
        assert!(PURCHASE_URL.is_match("HTTPS://example.com/x"));
        assert!(PURCHASE_URL.is_match("http://localhost:8080/beans"));
        assert!(!PURCHASE_URL.is_match("mailto:shop@example.com"));
    }

    #[test]
    fn test_validate_accepts_query_and_local_urls() {
        let beans = ["https://example.com?tag=abc", "HTTPS://example.com/x", "http://localhost:8080/beans"]
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let mut b = bean(&format!("b{}", i), RoastLevel::Medium, &[BrewMethod::Espresso], &["cocoa"]);
                b.affiliate_url = url.to_string();
                b
            })
            .collect();
        let catalog = Catalog { beans, ..Default::default() };
        assert!(catalog.validate().is_empty(), "{:?}", catalog.validate());
    }

    #[test]
    fn test_into_validated_error() {
        let mut b = bean("b1", RoastLevel::Light, &[BrewMethod::Filter], &["tea"]);
        b.price = -1.0;
        let err = Catalog { beans: vec![b], ..Default::default() }
            .into_validated()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCatalog(ref msg) if msg.contains("b1: price")));
    }

    #[test]
    fn test_lookup_helpers() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.machine("breville-bambino-plus").is_some());
        assert!(catalog.grinder("niche-zero").is_some());
        assert!(catalog.machine("missing").is_none());

        assert_eq!(catalog.beans_by_roast_level(RoastLevel::Dark).len(), 2);
        assert_eq!(catalog.beans_by_flavor_note("JASMINE").len(), 3);
        assert_eq!(catalog.beans_by_origin("Ethiopia").len(), 2);
        assert_eq!(catalog.in_stock_beans().len(), 14);
        assert_eq!(catalog.roasters().len(), 5);
        assert_eq!(catalog.beans_by_roaster("La Colombe").len(), 3);
        assert!(catalog
            .beans_by_brew_method(BrewMethod::MokaPot)
            .iter()
            .all(|b| b.supports(BrewMethod::MokaPot)));
    }

    #[test]
    fn test_matcher_for_ignores_unknown_ids() {
        let catalog = Catalog::builtin().unwrap();
        let profile = EquipmentProfile {
            machine_id: Some("no-such-machine".to_string()),
            machine_type: Some(MachineType::PourOver),
            grinder_id: Some("niche-zero".to_string()),
            ..Default::default()
        };

        let matcher = catalog.matcher_for(&profile, ScoringWeights::default());
        let matches = matcher.match_beans(&catalog.beans, &profile);
        assert_eq!(matches.len(), catalog.beans.len());
        // グラインダーは解決され、マシンは未指定扱い
        assert!(matches[0].match_reasons.iter().any(|r| r.contains("Niche Zero")));
        assert!(matches[0].match_reasons.iter().any(|r| r.starts_with("Scored for a typical")));
    }

    #[test]
    fn test_bean_filter() {
        let mut b = bean("b1", RoastLevel::Light, &[BrewMethod::Filter], &["tea"]);
        b.price = 25.0;

        assert!(BeanFilter::default().matches(&b));
        assert!(BeanFilter::default().is_empty());

        let cheap = BeanFilter { max_price: Some(20.0), ..Default::default() };
        assert!(!cheap.matches(&b));

        let espresso = BeanFilter { brew_method: Some(BrewMethod::Espresso), ..Default::default() };
        assert!(!espresso.matches(&b));

        let roaster = BeanFilter { roaster: Some("test roaster".to_string()), ..Default::default() };
        assert!(roaster.matches(&b));

        b.in_stock = false;
        let stock = BeanFilter { in_stock_only: true, ..Default::default() };
        assert!(!stock.matches(&b));
    }

    #[test]
    fn test_from_json_partial_catalog() {
        let catalog = Catalog::from_json(r#"{"beans": []}"#).unwrap();
        assert!(catalog.beans.is_empty());
        assert!(catalog.machines.is_empty());
    }
}
