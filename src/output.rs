//! 結果の表示（テーブル/JSON）

use crate::error::Result;
use bean_matcher_common::{Bean, BeanMatch, Catalog, CatalogIssue};
use std::fmt::Write;

const NAME_WIDTH: usize = 28;

/// 表示幅に収まるよう切り詰める（文字単位）
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

/// 照合結果をテーブル形式で出力
pub fn render_matches(matches: &[BeanMatch]) -> String {
    if matches.is_empty() {
        return "該当する豆がありません\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:>5}  {:<width$}  {:<14}  {:>7}",
        "#",
        "score",
        "name",
        "roast",
        "price",
        width = NAME_WIDTH
    );
    let _ = writeln!(out, "{}", "-".repeat(3 + 2 + 5 + 2 + NAME_WIDTH + 2 + 14 + 2 + 7));

    for (i, m) in matches.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:>5}  {:<width$}  {:<14}  {:>7}",
            i + 1,
            m.match_score,
            truncate(&m.bean.name, NAME_WIDTH),
            m.bean.roast_level.as_str(),
            format!("${:.2}", m.bean.price),
            width = NAME_WIDTH
        );
        let _ = writeln!(out, "     {} ({})", m.bean.roaster, m.bean.origin);
        for reason in &m.match_reasons {
            let _ = writeln!(out, "     + {}", reason);
        }
        for tip in &m.brew_tips {
            let _ = writeln!(out, "     > {}", tip);
        }
        if !m.bean.in_stock {
            let _ = writeln!(out, "     (在庫切れ)");
        }
    }

    out
}

/// 豆一覧をテーブル形式で出力
pub fn render_beans(beans: &[&Bean]) -> String {
    if beans.is_empty() {
        return "該当する豆がありません\n".to_string();
    }

    let mut out = String::new();
    for bean in beans {
        let _ = writeln!(
            out,
            "{:<10} {:<width$}  {:<14}  {}",
            bean.id,
            truncate(&bean.name, NAME_WIDTH),
            bean.roast_level.as_str(),
            bean.flavor_notes.join(", "),
            width = NAME_WIDTH
        );
    }
    out
}

/// カタログの概要
pub fn render_catalog_summary(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "豆: {}件", catalog.beans.len());
    let _ = writeln!(out, "マシン: {}件", catalog.machines.len());
    let _ = writeln!(out, "グラインダー: {}件", catalog.grinders.len());
    let _ = writeln!(out, "ロースター: {}", catalog.roasters().join(", "));

    let _ = writeln!(out, "\n[豆]");
    let beans: Vec<&Bean> = catalog.beans.iter().collect();
    out.push_str(&render_beans(&beans));

    let _ = writeln!(out, "\n[マシン]");
    for m in &catalog.machines {
        let _ = writeln!(
            out,
            "{:<32} {:<38} {:>2} bar",
            m.id,
            truncate(&m.display_name(), 38),
            m.pump_pressure
        );
    }

    let _ = writeln!(out, "\n[グラインダー]");
    for g in &catalog.grinders {
        let _ = writeln!(
            out,
            "{:<32} {:<38} {} burr",
            g.id,
            truncate(&format!("{} {}", g.brand, g.name), 38),
            g.burr_type
        );
    }
    out
}

pub fn render_issues(issues: &[CatalogIssue]) -> String {
    let mut out = String::new();
    for issue in issues {
        let _ = writeln!(out, "  ✗ {}", issue);
    }
    out
}

pub fn matches_to_json(matches: &[BeanMatch]) -> Result<String> {
    Ok(serde_json::to_string_pretty(matches)?)
}

pub fn beans_to_json(beans: &[&Bean]) -> Result<String> {
    Ok(serde_json::to_string_pretty(beans)?)
}
