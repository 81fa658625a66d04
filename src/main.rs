use bean_matcher::{cli, config, error, logging, output, profile, wizard};
use bean_matcher_common::{
    get_beans_by_category, Bean, BeanCategory, BeanFilter, RecommendationQuery,
};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load()?;

    match cli.command {
        Commands::Match { profile: profile_args, catalog, format } => {
            let catalog = config.load_catalog(catalog.as_deref())?;
            let profile = profile::build_profile(&profile_args, &catalog)?;
            let matcher = catalog.matcher_for(&profile, config.weights.clone());
            let matches = matcher.match_beans(&catalog.beans, &profile);

            match format {
                OutputFormat::Json => println!("{}", output::matches_to_json(&matches)?),
                OutputFormat::Table => {
                    println!("☕ {} 向けの豆ランキング\n", profile.effective_machine_type().label());
                    print!("{}", output::render_matches(&matches));
                }
            }
        }

        Commands::Recommend {
            profile: profile_args,
            category,
            in_stock,
            max_price,
            brew_method,
            roaster,
            origin,
            limit,
            catalog,
            format,
        } => {
            let category = category.map(|c| c.parse::<BeanCategory>()).transpose()?;
            let filter = BeanFilter {
                in_stock_only: in_stock,
                max_price,
                brew_method,
                roaster,
                origin,
            };

            let catalog = config.load_catalog(catalog.as_deref())?;
            let profile = profile::build_profile(&profile_args, &catalog)?;
            let matcher = catalog.matcher_for(&profile, config.weights.clone());
            let query = RecommendationQuery {
                category,
                limit: Some(limit.unwrap_or(config.default_limit)),
            };
            let extra = |bean: &Bean| filter.matches(bean);
            let extra_filter: Option<&dyn Fn(&Bean) -> bool> =
                if filter.is_empty() { None } else { Some(&extra) };
            let matches = matcher.top_recommendations(&catalog.beans, &profile, &query, extra_filter);

            match format {
                OutputFormat::Json => println!("{}", output::matches_to_json(&matches)?),
                OutputFormat::Table => {
                    match category {
                        Some(c) => println!("🏆 おすすめ: {} ({}件)\n", c, matches.len()),
                        None => println!("🏆 おすすめ ({}件)\n", matches.len()),
                    }
                    print!("{}", output::render_matches(&matches));
                }
            }
        }

        Commands::Category { category, catalog, format } => {
            let category: BeanCategory = category.parse()?;
            let catalog = config.load_catalog(catalog.as_deref())?;
            let beans = get_beans_by_category(&catalog.beans, &category);

            match format {
                OutputFormat::Json => println!("{}", output::beans_to_json(&beans)?),
                OutputFormat::Table => {
                    println!("📂 {} ({}件)\n", category, beans.len());
                    print!("{}", output::render_beans(&beans));
                }
            }
        }

        Commands::Catalog { catalog, validate } => {
            // 検証エラーも一覧表示したいので未検証のまま読み込む
            let path = config.catalog_path(catalog.as_deref());
            let loaded = config.load_catalog_unvalidated(catalog.as_deref())?;
            let issues = loaded.validate();

            if !validate {
                println!("📚 カタログ: {}\n", path.as_ref().map_or("組み込み".to_string(), |p| p.display().to_string()));
                print!("{}", output::render_catalog_summary(&loaded));
                println!("\nカテゴリ:");
                for c in BeanCategory::all() {
                    println!("  {} ({}件)", c, get_beans_by_category(&loaded.beans, &c).len());
                }
                println!();
            }

            if issues.is_empty() {
                println!("✔ カタログは正常です");
            } else {
                println!("⚠ {}件の問題があります", issues.len());
                print!("{}", output::render_issues(&issues));
                return Err(bean_matcher_common::Error::InvalidCatalog(format!("{}件の問題", issues.len())).into());
            }
        }

        Commands::Wizard { catalog } => {
            let catalog = config.load_catalog(catalog.as_deref())?;
            wizard::run_wizard(&catalog, &config)?;
        }

        Commands::Config { show, init, set_limit, set_catalog } => {
            let editing = init || set_limit.is_some() || set_catalog.is_some();
            if init {
                config = Config::default();
                config.save()?;
                println!("✔ 設定ファイルを作成しました: {}", Config::config_path()?.display());
            }
            if let Some(limit) = set_limit {
                config.set_default_limit(limit)?;
                config.save()?;
                println!("✔ 既定件数を {} に設定しました", limit);
            }
            if let Some(path) = set_catalog {
                config.catalog_path = Some(path);
                config.save()?;
                if let Some(ref saved) = config.catalog_path {
                    println!("✔ カタログを設定しました: {}", saved.display());
                }
            }
            if show || !editing {
                println!("設定:");
                println!("  既定件数: {}", config.default_limit);
                println!(
                    "  カタログ: {}",
                    config
                        .catalog_path
                        .as_ref()
                        .map_or("組み込み".to_string(), |p| p.display().to_string())
                );
                println!("  重み: {}", serde_json::to_string(&config.weights)?);
            }
        }
    }

    Ok(())
}
