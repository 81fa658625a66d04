use bean_matcher_common::BrewMethod;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bean-matcher")]
#[command(about = "器具に合うコーヒー豆をおすすめするツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 全ての豆をスコア順に表示
    Match {
        #[command(flatten)]
        profile: ProfileArgs,

        /// カタログJSONファイル（省略時は組み込み）
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// 出力形式 (table/json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// 上位のおすすめを表示
    Recommend {
        #[command(flatten)]
        profile: ProfileArgs,

        /// カテゴリ (chocolate-nutty, fruity-bright, light-roast など)
        #[arg(short, long)]
        category: Option<String>,

        /// 在庫ありのみ
        #[arg(long)]
        in_stock: bool,

        /// 上限価格（USD）
        #[arg(long)]
        max_price: Option<f64>,

        /// 対応する抽出方法で絞り込む
        #[arg(long)]
        brew_method: Option<BrewMethod>,

        /// ロースターで絞り込む
        #[arg(long)]
        roaster: Option<String>,

        /// 産地で絞り込む
        #[arg(long)]
        origin: Option<String>,

        /// 最大件数（省略時は設定値）
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// カタログJSONファイル
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// 出力形式 (table/json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// カテゴリに該当する豆を一覧表示
    Category {
        /// カテゴリ名
        #[arg(required = true)]
        category: String,

        /// カタログJSONファイル
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// 出力形式 (table/json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// カタログを表示・検証
    Catalog {
        /// カタログJSONファイル
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// 検証のみ行う
        #[arg(long)]
        validate: bool,
    },

    /// 対話式で器具と好みを選んでおすすめを表示
    Wizard {
        /// カタログJSONファイル
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定ファイルを書き出す
        #[arg(long)]
        init: bool,

        /// recommend の既定件数を設定
        #[arg(long)]
        set_limit: Option<usize>,

        /// 既定のカタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,
    },
}

/// 器具プロファイル指定
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    /// マシン種別 (semi-automatic, pour-over, french-press など)
    #[arg(short = 't', long)]
    pub machine_type: Option<String>,

    /// マシンID（カタログ）
    #[arg(short, long)]
    pub machine: Option<String>,

    /// グラインダーID（カタログ）
    #[arg(short, long)]
    pub grinder: Option<String>,

    /// グラインダー種別 (manual/electric、不明値は指定なし)
    #[arg(long)]
    pub grinder_type: Option<String>,

    /// 刃の種類 (flat/conical、不明値は指定なし)
    #[arg(long)]
    pub burr_type: Option<String>,

    /// プロファイルJSONファイル（個別指定で上書き）
    #[arg(short, long)]
    pub profile: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "bean-matcher",
            "recommend",
            "--machine-type",
            "pour-over",
            "--burr-type",
            "flat",
            "--category",
            "fruity-bright",
            "--in-stock",
            "-n",
            "3",
            "--format",
            "json",
        ])
        .expect("パース失敗");

        match cli.command {
            Commands::Recommend { profile, category, in_stock, limit, format, .. } => {
                assert_eq!(profile.machine_type.as_deref(), Some("pour-over"));
                assert_eq!(profile.burr_type.as_deref(), Some("flat"));
                assert_eq!(category.as_deref(), Some("fruity-bright"));
                assert!(in_stock);
                assert_eq!(limit, Some(3));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("recommend として解釈されていない"),
        }
    }

    #[test]
    fn test_parse_accepts_unknown_equipment_values() {
        let cli = Cli::try_parse_from([
            "bean-matcher",
            "match",
            "--burr-type",
            "blade",
            "--grinder-type",
            "turbo",
        ])
        .expect("不明値でもパースできる");

        match cli.command {
            Commands::Match { profile, .. } => {
                assert_eq!(profile.burr_type.as_deref(), Some("blade"));
                assert_eq!(profile.grinder_type.as_deref(), Some("turbo"));
            }
            _ => panic!("match として解釈されていない"),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
