//! カテゴリ分類モジュール
//!
//! フレーバー系統と焙煎度による豆の絞り込み。

use crate::error::{Error, Result};
use crate::types::{Bean, RoastLevel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// フレーバー系統
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlavorFamily {
    ChocolateNutty,
    FruityBright,
    FloralTea,
    SweetCaramel,
    EarthySpicy,
}

impl FlavorFamily {
    pub const ALL: [FlavorFamily; 5] = [
        FlavorFamily::ChocolateNutty,
        FlavorFamily::FruityBright,
        FlavorFamily::FloralTea,
        FlavorFamily::SweetCaramel,
        FlavorFamily::EarthySpicy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlavorFamily::ChocolateNutty => "chocolate-nutty",
            FlavorFamily::FruityBright => "fruity-bright",
            FlavorFamily::FloralTea => "floral-tea",
            FlavorFamily::SweetCaramel => "sweet-caramel",
            FlavorFamily::EarthySpicy => "earthy-spicy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FlavorFamily::ChocolateNutty => "Chocolate & Nutty",
            FlavorFamily::FruityBright => "Fruity & Bright",
            FlavorFamily::FloralTea => "Floral & Tea-like",
            FlavorFamily::SweetCaramel => "Sweet & Caramel",
            FlavorFamily::EarthySpicy => "Earthy & Spicy",
        }
    }

    /// フレーバーノートの部分一致キーワード
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            FlavorFamily::ChocolateNutty => &["chocolate", "nutty", "hazelnut", "almond", "cocoa"],
            FlavorFamily::FruityBright => &["fruity", "berry", "citrus", "tropical", "bright"],
            FlavorFamily::FloralTea => &["floral", "tea", "jasmine", "lavender", "delicate"],
            FlavorFamily::SweetCaramel => &["caramel", "honey", "maple", "toffee", "sweet"],
            FlavorFamily::EarthySpicy => &["earthy", "spicy", "tobacco", "cedar", "pepper"],
        }
    }
}

/// 豆のカテゴリ（フレーバー系統 or 焙煎度）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeanCategory {
    Flavor(FlavorFamily),
    Roast(RoastLevel),
}

impl BeanCategory {
    /// 利用可能なカテゴリ一覧
    pub fn all() -> Vec<BeanCategory> {
        FlavorFamily::ALL
            .into_iter()
            .map(BeanCategory::Flavor)
            .chain(RoastLevel::ALL.into_iter().map(BeanCategory::Roast))
            .collect()
    }

    pub fn matches(&self, bean: &Bean) -> bool {
        match self {
            BeanCategory::Flavor(family) => bean.has_note_matching(family.keywords()),
            BeanCategory::Roast(level) => bean.roast_level == *level,
        }
    }
}

impl FromStr for BeanCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_lowercase();

        if let Some(family) = FlavorFamily::ALL.into_iter().find(|f| f.as_str() == tag) {
            return Ok(BeanCategory::Flavor(family));
        }

        tag.strip_suffix("-roast")
            .and_then(|level| level.parse::<RoastLevel>().ok())
            .map(BeanCategory::Roast)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for BeanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeanCategory::Flavor(family) => f.write_str(family.as_str()),
            BeanCategory::Roast(level) => write!(f, "{}-roast", level),
        }
    }
}

/// カテゴリに一致する豆を抽出（カタログ順を維持、スコア計算なし）
pub fn get_beans_by_category<'a>(beans: &'a [Bean], category: &BeanCategory) -> Vec<&'a Bean> {
    beans.iter().filter(|bean| category.matches(bean)).collect()
}

/// ウィザードで選ぶ好み
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlavorPreference {
    ChocolateNutty,
    FruityBright,
    Balanced,
    BoldStrong,
}

impl FlavorPreference {
    pub const ALL: [FlavorPreference; 4] = [
        FlavorPreference::ChocolateNutty,
        FlavorPreference::FruityBright,
        FlavorPreference::Balanced,
        FlavorPreference::BoldStrong,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FlavorPreference::ChocolateNutty => "Chocolate & Nutty",
            FlavorPreference::FruityBright => "Fruity & Bright",
            FlavorPreference::Balanced => "Balanced & Smooth",
            FlavorPreference::BoldStrong => "Bold & Strong",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            FlavorPreference::ChocolateNutty => {
                &["chocolate", "nutty", "hazelnut", "cocoa", "almond", "caramel"]
            }
            FlavorPreference::FruityBright => {
                &["fruity", "berry", "citrus", "tropical", "bright", "apple", "cherry"]
            }
            FlavorPreference::Balanced => &["balanced", "smooth", "clean", "mild"],
            FlavorPreference::BoldStrong => &["bold", "intense", "dark", "smoky", "tobacco", "earthy"],
        }
    }

    pub fn matches(&self, bean: &Bean) -> bool {
        if bean.has_note_matching(self.keywords()) {
            return true;
        }
        match self {
            FlavorPreference::BoldStrong => bean.roast_level.is_darker(),
            FlavorPreference::Balanced => bean.roast_level == RoastLevel::Medium,
            _ => false,
        }
    }

    /// 好みで絞り込む。一致する豆がなければ全件を返す
    pub fn select<'a>(&self, beans: &'a [Bean]) -> Vec<&'a Bean> {
        let selected: Vec<&Bean> = beans.iter().filter(|b| self.matches(b)).collect();
        if selected.is_empty() {
            beans.iter().collect()
        } else {
            selected
        }
    }
}
