//! Subcommand implementations.
//!
//! Each command loads a snapshot from disk, drives [`kovar_core::Designer`],
//! and returns a summary that [`run`] prints.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use kovar_core::{AssetMap, Designer, ExportConfig, ObjectId, SnapshotDocument};

use crate::{CliConfig, Command};

/// Files written by `kovar export`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Path of the schema JSON.
    pub schema_path: PathBuf,
    /// Path of the markup file.
    pub html_path: PathBuf,
    /// Number of schema nodes, root included.
    pub nodes: usize,
}

/// Result of `kovar name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOutcome {
    /// Where the updated snapshot was written.
    pub output: PathBuf,
    /// `(handle, name)` for every object that received a new name.
    pub renamed: Vec<(String, String)>,
}

/// Result of `kovar check` on a valid snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Objects in the snapshot, root frame included.
    pub objects: usize,
    /// Objects that carry a public name.
    pub named: usize,
    /// Schema nodes derived from the snapshot, root included.
    pub nodes: usize,
}

/// Run the configured subcommand and print its summary.
///
/// # Errors
///
/// Returns any error from the subcommand, with file paths as context.
pub fn run(config: CliConfig) -> Result<()> {
    match config.command {
        Command::Export {
            snapshot,
            out_dir,
            name,
            assets,
        } => {
            let outcome = export(
                &snapshot,
                &out_dir,
                name.as_deref(),
                assets.as_deref(),
                config.export,
            )?;
            println!(
                "Exported {} nodes to {} and {}",
                outcome.nodes,
                outcome.schema_path.display(),
                outcome.html_path.display()
            );
        }
        Command::Name { snapshot, output } => {
            let outcome = name(&snapshot, output.as_deref())?;
            for (id, assigned) in &outcome.renamed {
                println!("{id} -> {assigned}");
            }
            println!(
                "Named {} objects, wrote {}",
                outcome.renamed.len(),
                outcome.output.display()
            );
        }
        Command::Check { snapshot } => {
            let report = check(&snapshot, config.export)?;
            println!(
                "OK: {} objects, {} named, {} schema nodes",
                report.objects, report.named, report.nodes
            );
        }
    }
    Ok(())
}

/// Derive schema and markup for a snapshot and write them to `out_dir`.
///
/// Sources from `assets_file` take precedence over the snapshot's own asset
/// records.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, or the snapshot
/// cannot be exported.
pub fn export(
    snapshot: &Path,
    out_dir: &Path,
    stem: Option<&str>,
    assets_file: Option<&Path>,
    config: ExportConfig,
) -> Result<ExportOutcome> {
    let document = load_snapshot(snapshot)?;
    let mut assets = document.asset_map();
    if let Some(path) = assets_file {
        assets.extend(load_assets(path)?);
    }

    let table = document
        .to_table()
        .with_context(|| format!("Invalid snapshot {}", snapshot.display()))?;
    let bundle = kovar_core::SchemaExporter::new(config)
        .export(&table, &assets)
        .with_context(|| format!("Failed to export {}", snapshot.display()))?;

    let stem = stem.map_or_else(|| default_stem(snapshot), str::to_string);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let schema_path = out_dir.join(format!("{stem}.kovar.json"));
    let html_path = out_dir.join(format!("{stem}.html"));
    let schema_json = bundle.schema.to_json_pretty()?;
    fs::write(&schema_path, schema_json)
        .with_context(|| format!("Failed to write {}", schema_path.display()))?;
    fs::write(&html_path, &bundle.html)
        .with_context(|| format!("Failed to write {}", html_path.display()))?;

    let nodes = bundle.schema.root.node_count();
    tracing::info!(
        snapshot = %snapshot.display(),
        nodes,
        schema = %schema_path.display(),
        html = %html_path.display(),
        "export complete"
    );
    Ok(ExportOutcome {
        schema_path,
        html_path,
        nodes,
    })
}

/// Name unnamed objects and rename repeated names, then save.
///
/// Objects go to the allocator as one batch in table order. Of several
/// objects sharing a name, only the first keeps it.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read, parsed, or written.
pub fn name(snapshot: &Path, output: Option<&Path>) -> Result<NameOutcome> {
    let document = load_snapshot(snapshot)?;
    let mut designer = Designer::from_snapshot(&document)
        .with_context(|| format!("Invalid snapshot {}", snapshot.display()))?;

    // The first holder of a name keeps it; later holders are pasted copies.
    let mut holders = HashSet::new();
    let batch: Vec<ObjectId> = designer
        .table()
        .iter()
        .filter(|o| match o.public_id() {
            None => true,
            Some(name) => !holders.insert(name),
        })
        .map(|o| o.id.clone())
        .collect();
    let renamed: Vec<(String, String)> = designer
        .objects_added(&batch)
        .into_iter()
        .map(|assignment| (assignment.id.to_string(), assignment.name))
        .collect();

    let output = output.unwrap_or(snapshot).to_path_buf();
    let json = designer.snapshot().to_json_pretty()?;
    fs::write(&output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        snapshot = %snapshot.display(),
        renamed = renamed.len(),
        "naming complete"
    );
    Ok(NameOutcome { output, renamed })
}

/// Verify that a snapshot is well formed and exports.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded, has no root frame,
/// repeats a public name, or fails to derive a schema.
pub fn check(snapshot: &Path, config: ExportConfig) -> Result<CheckReport> {
    let document = load_snapshot(snapshot)?;
    let designer = Designer::from_snapshot(&document)
        .with_context(|| format!("Invalid snapshot {}", snapshot.display()))?
        .with_export_config(config);
    let table = designer.table();

    if table.root_frame().is_none() {
        bail!("{} has no root frame", snapshot.display());
    }

    let mut holders: HashMap<&str, usize> = HashMap::new();
    for name in table.iter().filter_map(|o| o.public_id()) {
        *holders.entry(name).or_default() += 1;
    }
    let mut repeated: Vec<&str> = holders
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(name, _)| name)
        .collect();
    if !repeated.is_empty() {
        repeated.sort_unstable();
        bail!(
            "{} has repeated public names: {}",
            snapshot.display(),
            repeated.join(", ")
        );
    }

    let schema = designer
        .schema()
        .with_context(|| format!("Failed to export {}", snapshot.display()))?;

    Ok(CheckReport {
        objects: table.len(),
        named: table.iter().filter(|o| o.public_id().is_some()).count(),
        nodes: schema.root.node_count(),
    })
}

fn load_snapshot(path: &Path) -> Result<SnapshotDocument> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    SnapshotDocument::from_json(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_assets(path: &Path) -> Result<AssetMap> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

/// File name up to its first dot: `login.snapshot.json` → `login`.
fn default_stem(snapshot: &Path) -> String {
    snapshot
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("design")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stem() {
        assert_eq!(default_stem(Path::new("dir/login.snapshot.json")), "login");
        assert_eq!(default_stem(Path::new("plain")), "plain");
        assert_eq!(default_stem(Path::new(".hidden")), "design");
    }
}
