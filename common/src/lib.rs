//! Bean Matcher Common Library
//!
//! 器具プロファイルに合うコーヒー豆をスコアリング・ランキングする。
//! CLIとライブラリ利用側で共有される型とロジック。

pub mod types;
pub mod equipment;
pub mod weights;
pub mod category;
pub mod catalog;
pub mod matcher;
pub mod error;

pub use types::{Bean, BeanMatch, BrewMethod, ProcessMethod, RoastLevel, TasteProfile};
pub use equipment::{
    BoilerType, BurrType, CoffeeGrinder, EquipmentProfile, EspressoMachine, GrinderType,
    MachineType, PreInfusion, PriceRange,
};
pub use weights::ScoringWeights;
pub use category::{get_beans_by_category, BeanCategory, FlavorFamily, FlavorPreference};
pub use catalog::{BeanFilter, Catalog, CatalogIssue};
pub use matcher::{
    get_top_bean_recommendations, match_beans_to_equipment, BeanMatcher, RecommendationQuery,
};
pub use error::{Error, Result};
