//! コマンドライン指定から器具プロファイルを組み立てる

use crate::cli::ProfileArgs;
use crate::error::{BeanMatcherError, Result};
use bean_matcher_common::{Catalog, EquipmentProfile, MachineType};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// プロファイルJSONファイルを読み込む
///
/// 個々の項目の不明値は「指定なし」になるが、オブジェクトでないJSONはエラー。
pub fn load_profile_file(path: &Path) -> Result<EquipmentProfile> {
    if !path.exists() {
        return Err(BeanMatcherError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| BeanMatcherError::InvalidProfile(format!("{}: {}", path.display(), e)))
}

/// 任意項目の解析。不明値は警告して「指定なし」
fn parse_optional<T: FromStr>(field: &str, raw: &str) -> Option<T> {
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        warn!(field, value = raw, "unrecognized value, treating as no preference");
    }
    parsed
}

/// ファイル指定と個別フラグを合成し、カタログで補完する
///
/// 個別フラグはファイルの値より優先。マシン種別が未指定でマシンIDが
/// カタログにあれば、そのマシンの種別を使う。
pub fn build_profile(args: &ProfileArgs, catalog: &Catalog) -> Result<EquipmentProfile> {
    let mut profile = match args.profile {
        Some(ref path) => load_profile_file(path)?,
        None => EquipmentProfile::default(),
    };

    if let Some(ref raw) = args.machine_type {
        profile.machine_type = Some(MachineType::from(raw.as_str()));
    }
    if let Some(ref id) = args.machine {
        profile.machine_id = Some(id.clone());
    }
    if let Some(ref id) = args.grinder {
        profile.grinder_id = Some(id.clone());
    }
    if let Some(ref raw) = args.grinder_type {
        profile.grinder_type = parse_optional("grinder_type", raw);
    }
    if let Some(ref raw) = args.burr_type {
        profile.burr_type = parse_optional("burr_type", raw);
    }

    if profile.machine_type.is_none() {
        if let Some(machine) = profile.machine_id.as_deref().and_then(|id| catalog.machine(id)) {
            profile.machine_type = Some(machine.machine_type.clone());
        }
    }
    if profile.grinder_type.is_none() {
        if let Some(grinder) = profile.grinder_id.as_deref().and_then(|id| catalog.grinder(id)) {
            profile.grinder_type = Some(grinder.grinder_type);
        }
    }

    if let Some(ref machine_type) = profile.machine_type {
        if !machine_type.is_recognized() {
            warn!(machine_type = machine_type.as_str(), "unrecognized machine type, using neutral scoring");
        }
    }

    debug!(?profile, "equipment profile");
    Ok(profile)
}
