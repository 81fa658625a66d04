//! スコアリングの重み
//!
//! すべて加点のみ。設定ファイルで上書きできる。

use serde::{Deserialize, Serialize};

/// 高圧抽出とみなすポンプ圧（bar）
pub const HIGH_PRESSURE_BAR: u32 = 15;
/// フルボディとみなすボディ値
pub const FULL_BODY_THRESHOLD: u8 = 7;
/// 推奨秒数が未設定のときのプレインフュージョン秒数
pub const DEFAULT_PRE_INFUSION_SECONDS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// 第一候補の焙煎度
    pub roast_match: u32,
    /// 候補順位ごとの減点幅
    pub roast_rank_step: u32,
    /// 焙煎度が候補外
    pub roast_fallback: u32,

    pub brew_method_match: u32,
    pub brew_method_fallback: u32,

    /// 浅煎り × 中級以上のグラインダー
    pub grinder_light_capable: u32,
    /// 浅煎り × エントリーグラインダー
    pub grinder_light_basic: u32,
    /// 中煎り以深の基本点（+ 品質 × step）
    pub grinder_base: u32,
    pub grinder_quality_step: u32,
    pub grinder_unspecified: u32,

    pub burr_bonus: u32,

    pub pressure_bonus: u32,
    pub pre_infusion_bonus: u32,
    pub machine_unspecified: u32,

    /// 味のバランス点の上限
    pub balance_max: u32,

    pub max_score: u32,
    pub max_tips: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            roast_match: 30,
            roast_rank_step: 5,
            roast_fallback: 5,
            brew_method_match: 25,
            brew_method_fallback: 5,
            grinder_light_capable: 20,
            grinder_light_basic: 10,
            grinder_base: 15,
            grinder_quality_step: 2,
            grinder_unspecified: 10,
            burr_bonus: 5,
            pressure_bonus: 10,
            pre_infusion_bonus: 5,
            machine_unspecified: 10,
            balance_max: 10,
            max_score: 100,
            max_tips: 3,
        }
    }
}

impl ScoringWeights {
    /// 焙煎度の候補順位に応じた点数
    pub fn roast_score(&self, rank: usize) -> u32 {
        let penalty = self.roast_rank_step.saturating_mul(rank as u32);
        self.roast_match.saturating_sub(penalty)
    }

    /// 味のバランス点（0未満は0）
    pub fn balance_score(&self, imbalance: u32) -> u32 {
        self.balance_max.saturating_sub(imbalance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roast_score_by_rank() {
        let w = ScoringWeights::default();
        assert_eq!(w.roast_score(0), 30);
        assert_eq!(w.roast_score(1), 25);
        assert_eq!(w.roast_score(2), 20);
        assert_eq!(w.roast_score(100), 0);
    }

    #[test]
    fn test_balance_score_floor() {
        let w = ScoringWeights::default();
        assert_eq!(w.balance_score(0), 10);
        assert_eq!(w.balance_score(4), 6);
        assert_eq!(w.balance_score(15), 0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let w: ScoringWeights = serde_json::from_str(r#"{"roast_match": 40, "max_tips": 2}"#).unwrap();
        assert_eq!(w.roast_match, 40);
        assert_eq!(w.max_tips, 2);
        assert_eq!(w.brew_method_match, 25);
    }
}
