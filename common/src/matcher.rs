//! 豆レコメンドの照合ロジック
//!
//! 器具プロファイルに対して各豆を独立にスコアリングし、スコア降順に並べる。
//! 状態を持たない純粋関数で、同じ入力には常に同じ結果を返す。
//!
//! ## スコア構成（デフォルト重み）
//! 1. 焙煎度の相性（最大30）
//! 2. 抽出方法の対応（最大25）
//! 3. グラインダーの相性（最大21）
//! 4. 刃の種類（最大5）
//! 5. マシン固有の最適化（最大15）
//! 6. 味のバランス（最大10）

use crate::category::BeanCategory;
use crate::equipment::{BurrType, CoffeeGrinder, EquipmentProfile, EspressoMachine, MachineType};
use crate::types::{Bean, BeanMatch, RoastLevel};
use crate::weights::{
    ScoringWeights, DEFAULT_PRE_INFUSION_SECONDS, FULL_BODY_THRESHOLD, HIGH_PRESSURE_BAR,
};
use tracing::debug;

/// 絞り込み条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationQuery {
    /// カテゴリで絞り込む
    pub category: Option<BeanCategory>,
    /// 最大件数（None は無制限）
    pub limit: Option<usize>,
}

/// 1件分の加点と理由を集計する
#[derive(Default)]
struct Scorecard {
    score: u32,
    reasons: Vec<String>,
    tips: Vec<String>,
}

impl Scorecard {
    /// 加点する。0点なら理由も残さない
    fn add(&mut self, points: u32, reason: impl Into<String>) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.reasons.push(reason.into());
    }

    fn tip(&mut self, tip: impl Into<String>) {
        self.tips.push(tip.into());
    }
}

/// 照合器
///
/// 重みと、解決済みのマシン・グラインダー情報（任意）を保持する。
/// 呼び出しをまたぐ状態は持たない。
#[derive(Debug, Clone, Default)]
pub struct BeanMatcher<'e> {
    weights: ScoringWeights,
    machine: Option<&'e EspressoMachine>,
    grinder: Option<&'e CoffeeGrinder>,
}

impl<'e> BeanMatcher<'e> {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            machine: None,
            grinder: None,
        }
    }

    pub fn with_machine(mut self, machine: Option<&'e EspressoMachine>) -> Self {
        self.machine = machine;
        self
    }

    pub fn with_grinder(mut self, grinder: Option<&'e CoffeeGrinder>) -> Self {
        self.grinder = grinder;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// 全件をスコアリングしてスコア降順に並べる
    ///
    /// 同点はカタログ順を維持する（安定ソート）。入力と同じ件数を返す。
    pub fn match_beans<'a>(&self, beans: &'a [Bean], profile: &EquipmentProfile) -> Vec<BeanMatch<'a>> {
        let machine_type = profile.effective_machine_type();

        let mut matches: Vec<BeanMatch<'a>> = beans
            .iter()
            .map(|bean| self.score(bean, profile, &machine_type))
            .collect();

        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        debug!(
            beans = beans.len(),
            machine_type = %machine_type,
            top_score = matches.first().map(|m| m.match_score),
            "ranked beans"
        );

        matches
    }

    /// 上位のおすすめを取得
    ///
    /// ランキング後にカテゴリ・追加条件で絞り込み、最後に件数で切り詰める。
    /// 絞り込みで順序は変わらない。
    pub fn top_recommendations<'a>(
        &self,
        beans: &'a [Bean],
        profile: &EquipmentProfile,
        query: &RecommendationQuery,
        extra_filter: Option<&dyn Fn(&Bean) -> bool>,
    ) -> Vec<BeanMatch<'a>> {
        self.match_beans(beans, profile)
            .into_iter()
            .filter(|m| query.category.map_or(true, |c| c.matches(m.bean)))
            .filter(|m| extra_filter.map_or(true, |f| f(m.bean)))
            .take(query.limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// 1件分のスコアリング
    fn score<'a>(&self, bean: &'a Bean, profile: &EquipmentProfile, machine_type: &MachineType) -> BeanMatch<'a> {
        let w = &self.weights;
        let mut card = Scorecard::default();
        let roast = bean.roast_level;

        // 1. 焙煎度
        match machine_type.preferred_roasts().iter().position(|r| *r == roast) {
            Some(rank) => card.add(
                w.roast_score(rank),
                format!("{} roast is ideal for your {} machine", roast.label(), machine_type.label()),
            ),
            None => card.add(
                w.roast_fallback,
                format!("{} roast still works with a {} setup", roast.label(), machine_type.label()),
            ),
        }

        // 2. 抽出方法
        let method = machine_type.brew_method();
        if bean.supports(method) {
            card.add(w.brew_method_match, format!("Optimized for {} brewing", method.label()));
        } else {
            card.add(w.brew_method_fallback, format!("Adaptable to {} brewing", method.label()));
            card.tip(format!("Consider adjusting grind size for {} brewing", method));
        }

        // 3. グラインダー
        match self.grinder {
            Some(grinder) => {
                let quality = grinder.price_range.grinder_quality();
                if roast.is_lighter() {
                    if quality >= 2 {
                        card.add(
                            w.grinder_light_capable,
                            format!("Your {} can handle light roast precision grinding", grinder.name),
                        );
                    } else {
                        card.add(
                            w.grinder_light_basic,
                            format!("Your {} can grind light roasts with some care", grinder.name),
                        );
                        card.tip("Light roasts benefit from a more precise grinder");
                    }
                } else {
                    card.add(
                        w.grinder_base + quality * w.grinder_quality_step,
                        format!("Great match with your {}", grinder.name),
                    );
                }
            }
            None => card.add(w.grinder_unspecified, "Scored for a typical home grinder"),
        }

        // 4. 刃の種類（プロファイル指定を優先）
        let burr = profile.burr_type.or(self.grinder.map(|g| g.burr_type));
        match burr {
            Some(BurrType::Flat) if roast.is_lighter() => {
                card.add(w.burr_bonus, "Flat burrs excel at extracting light roast complexity");
            }
            Some(BurrType::Conical) if roast.is_darker() => {
                card.add(w.burr_bonus, "Conical burrs bring out rich body in darker roasts");
            }
            _ => {}
        }

        // 5. マシン固有
        match self.machine {
            Some(machine) => {
                if machine.pump_pressure >= HIGH_PRESSURE_BAR
                    && bean.taste_profile.body >= FULL_BODY_THRESHOLD
                {
                    card.add(w.pressure_bonus, "High-pressure extraction enhances the full body");
                }
                if let Some(pre) = machine.pre_infusion.filter(|p| p.available) {
                    if roast != RoastLevel::Dark {
                        let seconds = pre.recommended_seconds.unwrap_or(DEFAULT_PRE_INFUSION_SECONDS);
                        card.add(
                            w.pre_infusion_bonus,
                            format!("Pre-infusion on your {} evens out extraction", machine.name),
                        );
                        card.tip(format!("Use {}s pre-infusion for better extraction", seconds));
                    }
                }
            }
            None => card.add(
                w.machine_unspecified,
                format!("Scored for a typical {} setup", machine_type.label()),
            ),
        }

        // 6. 味のバランス
        let balance = w.balance_score(bean.taste_profile.imbalance());
        card.add(balance, format!("Balanced taste profile ({}/{})", balance, w.balance_max));

        push_equipment_tips(&mut card, machine_type, roast);

        let Scorecard { score, reasons, mut tips } = card;
        tips.truncate(w.max_tips);

        BeanMatch {
            bean,
            match_score: score.min(w.max_score),
            match_reasons: reasons,
            brew_tips: tips,
        }
    }
}

/// 器具ごとの定番ヒント
fn push_equipment_tips(card: &mut Scorecard, machine_type: &MachineType, roast: RoastLevel) {
    if machine_type.is_espresso_machine() {
        card.tip("Aim for 18-20g dose, 36-40g yield in 25-30 seconds");
        if roast.is_lighter() {
            card.tip("Grind finer and use higher temperature for light roasts");
        }
        return;
    }

    match machine_type {
        MachineType::PourOver => {
            card.tip("Use 1:15 ratio (15g coffee to 225ml water)");
            card.tip("Water temperature: 92-96°C for optimal extraction");
        }
        MachineType::FrenchPress => {
            card.tip("Coarse grind, 4-minute steep time");
            card.tip("Use 1:12 ratio for stronger brew");
        }
        MachineType::MokaPot => {
            card.tip("Fill water to just below the valve");
            card.tip("Use medium-fine grind, not espresso fine");
        }
        _ => {}
    }
}

/// デフォルト重みで全件を照合
pub fn match_beans_to_equipment<'a>(beans: &'a [Bean], profile: &EquipmentProfile) -> Vec<BeanMatch<'a>> {
    BeanMatcher::default().match_beans(beans, profile)
}

/// デフォルト重みで上位のおすすめを取得
pub fn get_top_bean_recommendations<'a>(
    beans: &'a [Bean],
    profile: &EquipmentProfile,
    category: Option<&BeanCategory>,
    extra_filter: Option<&dyn Fn(&Bean) -> bool>,
    limit: Option<usize>,
) -> Vec<BeanMatch<'a>> {
    let query = RecommendationQuery {
        category: category.copied(),
        limit,
    };
    BeanMatcher::default().top_recommendations(beans, profile, &query, extra_filter)
}
