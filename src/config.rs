use crate::scheduler::GenerateOptions;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Règles de génération lues depuis un fichier JSON, par exemple :
///
/// ```json
/// { "second_shift_ratio": 0.45, "min_second_shift": 2 }
/// ```
///
/// Les champs absents prennent leur valeur par défaut.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<GenerateOptions> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading rules {}", path.display()))?;
    let opts: GenerateOptions = serde_json::from_slice(&data)
        .with_context(|| format!("parsing rules {}", path.display()))?;
    validate(&opts)?;
    Ok(opts)
}

pub fn export_options<P: AsRef<Path>>(path: P, opts: &GenerateOptions) -> Result<()> {
    validate(opts)?;
    let json = serde_json::to_string_pretty(opts)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn validate(opts: &GenerateOptions) -> Result<()> {
    if !(0.0..=1.0).contains(&opts.second_shift_ratio) {
        bail!(
            "second_shift_ratio must be within [0, 1], got {}",
            opts.second_shift_ratio
        );
    }
    Ok(())
}
