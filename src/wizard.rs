//! 対話式おすすめウィザード
//!
//! 抽出方法 → マシン → グラインダー → 好み の順に選び、上位の豆を表示する。

use crate::config::Config;
use crate::error::{BeanMatcherError, Result};
use crate::output;
use bean_matcher_common::{
    Bean, Catalog, CoffeeGrinder, EquipmentProfile, EspressoMachine, FlavorPreference, MachineType,
};
use dialoguer::Select;

/// ウィザードで選ぶ抽出方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrewingMethod {
    EspressoMachine,
    PourOver,
    FrenchPress,
    MokaPot,
    Aeropress,
}

impl BrewingMethod {
    pub const ALL: [BrewingMethod; 5] = [
        BrewingMethod::EspressoMachine,
        BrewingMethod::PourOver,
        BrewingMethod::FrenchPress,
        BrewingMethod::MokaPot,
        BrewingMethod::Aeropress,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            BrewingMethod::EspressoMachine => "Espresso Machine",
            BrewingMethod::PourOver => "Pour Over",
            BrewingMethod::FrenchPress => "French Press",
            BrewingMethod::MokaPot => "Moka Pot",
            BrewingMethod::Aeropress => "AeroPress",
        }
    }

    /// マシン種別へ変換（エスプレッソはマシンの種別、なければセミオート）
    pub fn machine_type(&self, machine: Option<&EspressoMachine>) -> MachineType {
        match self {
            BrewingMethod::EspressoMachine => machine
                .map(|m| m.machine_type.clone())
                .unwrap_or(MachineType::SemiAutomatic),
            BrewingMethod::PourOver => MachineType::PourOver,
            BrewingMethod::FrenchPress => MachineType::FrenchPress,
            BrewingMethod::MokaPot => MachineType::MokaPot,
            BrewingMethod::Aeropress => MachineType::Aeropress,
        }
    }
}

/// 選択内容からプロファイルを組み立てる
pub fn build_profile(
    method: BrewingMethod,
    machine: Option<&EspressoMachine>,
    grinder: Option<&CoffeeGrinder>,
) -> EquipmentProfile {
    EquipmentProfile {
        machine_type: Some(method.machine_type(machine)),
        ..EquipmentProfile::from_equipment(machine, grinder)
    }
}

/// 好みで絞った豆の候補（一致なしなら全件）
pub fn candidate_beans(beans: &[Bean], preference: Option<FlavorPreference>) -> Vec<Bean> {
    match preference {
        Some(pref) => pref.select(beans).into_iter().cloned().collect(),
        None => beans.to_vec(),
    }
}

fn select_index(prompt: &str, items: &[String]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| BeanMatcherError::CliExecution(e.to_string()))
}

/// 対話式でおすすめを表示
pub fn run_wizard(catalog: &Catalog, config: &Config) -> Result<()> {
    println!("\n☕ Bean Matcher\n");

    // Step 1: 抽出方法
    let methods: Vec<String> = BrewingMethod::ALL
        .iter()
        .map(|m| m.display_name().to_string())
        .collect();
    let method = BrewingMethod::ALL[select_index("抽出方法を選択", &methods)?];

    let machine = if method == BrewingMethod::EspressoMachine && !catalog.machines.is_empty() {
        let names: Vec<String> = catalog
            .machines
            .iter()
            .map(|m| format!("{} ({})", m.display_name(), m.machine_type.label()))
            .collect();
        Some(&catalog.machines[select_index("マシンを選択", &names)?])
    } else {
        None
    };

    // Step 2: グラインダー（「持っていない」を先頭に）
    let mut grinder_items = vec!["グラインダーなし / 挽いた豆を使う".to_string()];
    grinder_items.extend(
        catalog
            .grinders
            .iter()
            .map(|g| format!("{} {} ({} burr)", g.brand, g.name, g.burr_type)),
    );
    let grinder = match select_index("グラインダーを選択", &grinder_items)? {
        0 => None,
        i => catalog.grinders.get(i - 1),
    };

    // Step 3: 好み
    let mut pref_items = vec!["こだわらない".to_string()];
    pref_items.extend(FlavorPreference::ALL.iter().map(|p| p.display_name().to_string()));
    let preference = match select_index("好みの味を選択", &pref_items)? {
        0 => None,
        i => FlavorPreference::ALL.get(i - 1).copied(),
    };

    let profile = build_profile(method, machine, grinder);
    let candidates = candidate_beans(&catalog.beans, preference);
    let matcher = catalog.matcher_for(&profile, config.weights.clone());
    let matches = matcher.match_beans(&candidates, &profile);
    let top: Vec<_> = matches.into_iter().take(config.default_limit).collect();

    println!("\n🏆 おすすめ ({}件)\n", top.len());
    print!("{}", output::render_matches(&top));
    Ok(())
}
