//! コーヒー豆と照合結果の型定義
//!
//! CLIとライブラリ利用側で共有される型:
//! - Bean: カタログの豆レコード（読み取り専用）
//! - BeanMatch: 器具プロファイルとの照合結果

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 焙煎度（浅→深の順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoastLevel {
    Light,
    MediumLight,
    Medium,
    MediumDark,
    Dark,
}

impl RoastLevel {
    pub const ALL: [RoastLevel; 5] = [
        RoastLevel::Light,
        RoastLevel::MediumLight,
        RoastLevel::Medium,
        RoastLevel::MediumDark,
        RoastLevel::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::Light => "light",
            RoastLevel::MediumLight => "medium-light",
            RoastLevel::Medium => "medium",
            RoastLevel::MediumDark => "medium-dark",
            RoastLevel::Dark => "dark",
        }
    }

    /// 表示用（ハイフンを空白に）
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }

    /// 浅煎り系（light / medium-light）
    pub fn is_lighter(&self) -> bool {
        matches!(self, RoastLevel::Light | RoastLevel::MediumLight)
    }

    /// 深煎り系（medium-dark / dark）
    pub fn is_darker(&self) -> bool {
        matches!(self, RoastLevel::MediumDark | RoastLevel::Dark)
    }
}

impl FromStr for RoastLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "-").as_str() {
            "light" => Ok(RoastLevel::Light),
            "medium-light" => Ok(RoastLevel::MediumLight),
            "medium" => Ok(RoastLevel::Medium),
            "medium-dark" => Ok(RoastLevel::MediumDark),
            "dark" => Ok(RoastLevel::Dark),
            _ => Err(format!(
                "Unknown roast level: {}. Use light, medium-light, medium, medium-dark, or dark",
                s
            )),
        }
    }
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 抽出方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrewMethod {
    Espresso,
    Filter,
    FrenchPress,
    MokaPot,
    ColdBrew,
}

impl BrewMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrewMethod::Espresso => "espresso",
            BrewMethod::Filter => "filter",
            BrewMethod::FrenchPress => "french-press",
            BrewMethod::MokaPot => "moka-pot",
            BrewMethod::ColdBrew => "cold-brew",
        }
    }

    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl FromStr for BrewMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "-").as_str() {
            "espresso" => Ok(BrewMethod::Espresso),
            "filter" | "pour-over" | "drip" => Ok(BrewMethod::Filter),
            "french-press" => Ok(BrewMethod::FrenchPress),
            "moka-pot" | "moka" => Ok(BrewMethod::MokaPot),
            "cold-brew" => Ok(BrewMethod::ColdBrew),
            _ => Err(format!(
                "Unknown brew method: {}. Use espresso, filter, french-press, moka-pot, or cold-brew",
                s
            )),
        }
    }
}

impl fmt::Display for BrewMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 精製方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessMethod {
    Washed,
    Natural,
    Honey,
    Anaerobic,
}

/// 味覚プロファイル（各1-10）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasteProfile {
    pub acidity: u8,
    pub body: u8,
    pub sweetness: u8,
    pub bitterness: u8,
}

impl TasteProfile {
    /// 酸味とボディ、甘味と苦味の差の合計（小さいほどバランスが良い）
    pub fn imbalance(&self) -> u32 {
        u32::from(self.acidity.abs_diff(self.body)) + u32::from(self.sweetness.abs_diff(self.bitterness))
    }
}

/// コーヒー豆レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bean {
    pub id: String,
    pub name: String,
    pub roaster: String,
    pub origin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub process: ProcessMethod,
    pub roast_level: RoastLevel,

    /// フレーバーノート（順序あり）
    pub flavor_notes: Vec<String>,
    pub taste_profile: TasteProfile,

    /// 価格（USD）
    pub price: f64,
    /// 内容量（g）
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub description: String,

    /// 対応する抽出方法（順序あり）
    pub brew_methods: Vec<BrewMethod>,
    #[serde(default)]
    pub recommended_for: Vec<String>,

    /// 購入URL（http/https）
    pub affiliate_url: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
}

fn default_in_stock() -> bool {
    true
}

impl Bean {
    pub fn supports(&self, method: BrewMethod) -> bool {
        self.brew_methods.contains(&method)
    }

    /// フレーバーノートにキーワードが含まれるか（大文字小文字を無視）
    pub fn has_note_matching(&self, keywords: &[&str]) -> bool {
        self.flavor_notes.iter().any(|note| {
            let note = note.to_lowercase();
            keywords.iter().any(|kw| note.contains(kw))
        })
    }
}

/// 照合結果
///
/// 豆への参照・スコア・理由・抽出のヒントを持つ。呼び出しごとに新しく生成される。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeanMatch<'a> {
    pub bean: &'a Bean,
    /// 0-100
    pub match_score: u32,
    pub match_reasons: Vec<String>,
    pub brew_tips: Vec<String>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// テスト用の豆を生成
    pub fn bean(id: &str, roast: RoastLevel, methods: &[BrewMethod], notes: &[&str]) -> Bean {
        Bean {
            id: id.to_string(),
            name: format!("Bean {}", id),
            roaster: "Test Roaster".to_string(),
            origin: "Ethiopia".to_string(),
            region: None,
            process: ProcessMethod::Washed,
            roast_level: roast,
            flavor_notes: notes.iter().map(|n| n.to_string()).collect(),
            taste_profile: TasteProfile { acidity: 5, body: 5, sweetness: 5, bitterness: 5 },
            price: 18.0,
            weight: 340,
            description: String::new(),
            brew_methods: methods.to_vec(),
            recommended_for: Vec::new(),
            affiliate_url: format!("https://example.com/beans/{}", id),
            in_stock: true,
            rating: 4.5,
            review_count: 100,
        }
    }
}
