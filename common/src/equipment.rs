//! 器具（マシン・グラインダー）と器具プロファイル
//!
//! プロファイルの任意項目は不明値・欠損を「指定なし」として扱う。

use crate::types::{BrewMethod, RoastLevel};
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// マシン種別
///
/// 既知の種別以外は `Other` として保持し、中立的なスコアリングに回す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MachineType {
    Manual,
    SemiAutomatic,
    Automatic,
    SuperAutomatic,
    PourOver,
    FrenchPress,
    MokaPot,
    Aeropress,
    Other(String),
}

impl MachineType {
    pub const KNOWN: [MachineType; 8] = [
        MachineType::Manual,
        MachineType::SemiAutomatic,
        MachineType::Automatic,
        MachineType::SuperAutomatic,
        MachineType::PourOver,
        MachineType::FrenchPress,
        MachineType::MokaPot,
        MachineType::Aeropress,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MachineType::Manual => "manual",
            MachineType::SemiAutomatic => "semi-automatic",
            MachineType::Automatic => "automatic",
            MachineType::SuperAutomatic => "super-automatic",
            MachineType::PourOver => "pour-over",
            MachineType::FrenchPress => "french-press",
            MachineType::MokaPot => "moka-pot",
            MachineType::Aeropress => "aeropress",
            MachineType::Other(raw) => raw,
        }
    }

    /// 表示用ラベル
    pub fn label(&self) -> String {
        match self {
            MachineType::Other(_) => "coffee".to_string(),
            known => known.as_str().replace('-', " "),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, MachineType::Other(_))
    }

    /// エスプレッソマシン系か
    pub fn is_espresso_machine(&self) -> bool {
        matches!(
            self,
            MachineType::Manual
                | MachineType::SemiAutomatic
                | MachineType::Automatic
                | MachineType::SuperAutomatic
        )
    }

    /// 相性の良い焙煎度（優先順）
    pub fn preferred_roasts(&self) -> &'static [RoastLevel] {
        use RoastLevel::*;
        match self {
            MachineType::SuperAutomatic => &[Medium, MediumDark, Dark],
            MachineType::Automatic => &[Medium, MediumDark],
            MachineType::SemiAutomatic => &[MediumLight, Medium, MediumDark],
            MachineType::Manual => &[Light, MediumLight, Medium],
            MachineType::PourOver => &[Light, MediumLight],
            MachineType::FrenchPress => &[Medium, MediumDark, Dark],
            MachineType::MokaPot => &[MediumDark, Dark],
            MachineType::Aeropress => &[Light, MediumLight, Medium],
            MachineType::Other(_) => &[Medium],
        }
    }

    /// 主な抽出方法
    pub fn brew_method(&self) -> BrewMethod {
        match self {
            MachineType::PourOver | MachineType::Aeropress => BrewMethod::Filter,
            MachineType::FrenchPress => BrewMethod::FrenchPress,
            MachineType::MokaPot => BrewMethod::MokaPot,
            _ => BrewMethod::Espresso,
        }
    }
}

impl Default for MachineType {
    fn default() -> Self {
        MachineType::SemiAutomatic
    }
}

impl From<&str> for MachineType {
    fn from(s: &str) -> Self {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        MachineType::KNOWN
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .unwrap_or_else(|| MachineType::Other(s.trim().to_string()))
    }
}

impl From<String> for MachineType {
    fn from(s: String) -> Self {
        MachineType::from(s.as_str())
    }
}

impl From<MachineType> for String {
    fn from(t: MachineType) -> Self {
        t.as_str().to_string()
    }
}

impl FromStr for MachineType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MachineType::from(s))
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// グラインダー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrinderType {
    Manual,
    Electric,
}

impl FromStr for GrinderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" | "hand" => Ok(GrinderType::Manual),
            "electric" => Ok(GrinderType::Electric),
            _ => Err(format!("Unknown grinder type: {}. Use manual or electric", s)),
        }
    }
}

/// 刃の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BurrType {
    Flat,
    Conical,
}

impl FromStr for BurrType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(BurrType::Flat),
            "conical" => Ok(BurrType::Conical),
            _ => Err(format!("Unknown burr type: {}. Use flat or conical", s)),
        }
    }
}

impl fmt::Display for BurrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BurrType::Flat => write!(f, "flat"),
            BurrType::Conical => write!(f, "conical"),
        }
    }
}

/// 価格帯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceRange {
    Budget,
    MidRange,
    Premium,
    Prosumer,
}

impl PriceRange {
    /// グラインダー品質スコア (1-3)
    ///
    /// prosumer は品質表に載っていないので最低値の1。
    pub fn grinder_quality(&self) -> u32 {
        match self {
            PriceRange::MidRange => 2,
            PriceRange::Premium => 3,
            PriceRange::Budget | PriceRange::Prosumer => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoilerType {
    Single,
    Dual,
    HeatExchanger,
    Thermoblock,
}

/// プレインフュージョン設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreInfusion {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_seconds: Option<u32>,
}

/// エスプレッソマシン
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EspressoMachine {
    pub id: String,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    pub price_range: PriceRange,
    pub price: f64,
    pub boiler_type: BoilerType,
    /// ポンプ圧（bar）
    pub pump_pressure: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_infusion: Option<PreInfusion>,
}

impl EspressoMachine {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }
}

/// コーヒーグラインダー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeGrinder {
    pub id: String,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub grinder_type: GrinderType,
    pub burr_type: BurrType,
    /// 刃径（mm）
    pub burr_size: u32,
    pub price_range: PriceRange,
    pub price: f64,
}

/// 器具プロファイル（呼び出し側が指定）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentProfile {
    #[serde(deserialize_with = "lenient")]
    pub machine_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub machine_type: Option<MachineType>,
    #[serde(deserialize_with = "lenient")]
    pub grinder_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub grinder_type: Option<GrinderType>,
    #[serde(deserialize_with = "lenient")]
    pub burr_type: Option<BurrType>,
}

impl EquipmentProfile {
    pub fn with_machine_type(machine_type: MachineType) -> Self {
        Self {
            machine_type: Some(machine_type),
            ..Default::default()
        }
    }

    /// カタログの器具からプロファイルを組み立てる
    pub fn from_equipment(
        machine: Option<&EspressoMachine>,
        grinder: Option<&CoffeeGrinder>,
    ) -> Self {
        Self {
            machine_id: machine.map(|m| m.id.clone()),
            machine_type: machine.map(|m| m.machine_type.clone()),
            grinder_id: grinder.map(|g| g.id.clone()),
            grinder_type: grinder.map(|g| g.grinder_type),
            burr_type: grinder.map(|g| g.burr_type),
        }
    }

    /// 未指定ならセミオート扱い
    pub fn effective_machine_type(&self) -> MachineType {
        self.machine_type.clone().unwrap_or_default()
    }
}

/// 文字列以外・空文字・不明値はすべて None にする
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok()))
}
