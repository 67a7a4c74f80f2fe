//! TDS configuration export.
//!
//! Writes the transforms and settings CSV files a Transform Distribution
//! Server imports. Large exports are split into several files so each
//! import stays small.

use crate::config::{ConfigError, ServerConfig};
use crate::registry::{TransformRegistry, TransformSetting};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use trx_protocol::xml::escape_csv_field;

/// Header of the transforms CSV
pub const TRANSFORMS_CSV_HEADER: &str = "Owner,Author,Disclaimer,Description,Version,\
    Name,UIName,URL,entityName,oAuthSettingId,transformSettingIDs,seedIDs,outputEntities";

/// Header of the transforms CSV for servers that predate the `outputEntities` column
pub const LEGACY_TRANSFORMS_CSV_HEADER: &str = "Owner,Author,Disclaimer,Description,Version,\
    Name,UIName,URL,entityName,oAuthSettingId,transformSettingIDs,seedIDs";

/// Header of the settings CSV
pub const SETTINGS_CSV_HEADER: &str = "Name,Type,Display,DefaultValue,Optional,Popup";

const SEPARATOR: char = ',';

/// Export error
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration is incomplete
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to write a file
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    /// Target path has no file name
    #[error("Invalid export path: {0}")]
    InvalidPath(String),

    /// Failed to write the `.mtz` archive
    #[error("Failed to write bundle: {0}")]
    Zip(#[from] zip::result::ZipError),
}

fn csv_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| escape_csv_field(f.as_ref(), SEPARATOR).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

fn serialize_bool(value: bool, yes: &str, no: &str) -> String {
    let text = if value { yes } else { no };
    text.to_string()
}

/// One CSV row per registered transform, in registration order.
///
/// The `outputEntities` column is only present when
/// `project.include_output_entities` is set.
pub fn transform_rows(
    registry: &TransformRegistry,
    config: &ServerConfig,
) -> Result<Vec<String>, ExportError> {
    let project = &config.project;
    let host_url = project.host_url()?.trim_end_matches('/');
    let global_ids: Vec<String> = config.global_settings.iter().map(TransformSetting::id).collect();

    let rows = registry
        .metas()
        .map(|meta| {
            let setting_ids: Vec<String> = meta
                .settings
                .iter()
                .map(TransformSetting::id)
                .chain(global_ids.iter().cloned())
                .collect();

            let mut row = vec![
                project.owner.clone(),
                project.author.clone(),
                meta.disclaimer.clone(),
                meta.description.clone(),
                project.version.clone(),
                meta.name.clone(),
                format!("{}{}", meta.display_name, project.display_name_suffix),
                format!("{}/run/{}", host_url, meta.name),
                meta.input_entity.clone(),
                project.oauth_settings_ids.join(";"),
                setting_ids.join(";"),
                project.seed_ids.join(";"),
            ];
            if project.include_output_entities {
                row.push(meta.output_entities.join(";"));
            }
            csv_row(row)
        })
        .collect();

    Ok(rows)
}

/// One CSV row per distinct setting name: global settings first, then
/// transform settings in registration order
pub fn setting_rows(registry: &TransformRegistry, config: &ServerConfig) -> Vec<String> {
    let mut seen = HashSet::new();

    config
        .global_settings
        .iter()
        .chain(registry.metas().flat_map(|meta| meta.settings.iter()))
        .filter(|setting| seen.insert(setting.name.clone()))
        .map(|setting| {
            csv_row([
                setting.id(),
                setting.setting_type.clone(),
                setting.display_name.clone(),
                setting.default_value.clone(),
                serialize_bool(setting.optional, "True", "False"),
                serialize_bool(setting.popup, "Yes", "No"),
            ])
        })
        .collect()
}

/// Split `lines` into the fewest chunks of at most `limit` lines, keeping
/// chunk sizes as even as possible
pub fn chunk_lines<T>(lines: &[T], limit: usize) -> Vec<&[T]> {
    if lines.is_empty() {
        return Vec::new();
    }
    let limit = limit.max(1);
    let chunk_count = lines.len().div_ceil(limit);
    let chunk_size = lines.len().div_ceil(chunk_count);
    lines.chunks(chunk_size).collect()
}

/// Write `header` and `lines` to `path`, splitting into
/// `{stem}_{i}-{n}.{ext}` files when there are more than `limit` lines.
///
/// Returns the written paths.
pub fn export_csv(
    header: &str,
    lines: &[String],
    path: &Path,
    limit: usize,
) -> Result<Vec<PathBuf>, ExportError> {
    if lines.len() <= limit {
        write_csv(path, header, lines)?;
        return Ok(vec![path.to_path_buf()]);
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ExportError::InvalidPath(path.display().to_string()))?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("csv");

    let chunks = chunk_lines(lines, limit);
    let total = chunks.len();
    let mut written = Vec::with_capacity(total);

    for (i, chunk) in chunks.into_iter().enumerate() {
        let chunk_path = path.with_file_name(format!("{}_{}-{}.{}", stem, i + 1, total, extension));
        write_csv(&chunk_path, header, chunk)?;
        written.push(chunk_path);
    }

    Ok(written)
}

fn write_csv(path: &Path, header: &str, lines: &[String]) -> Result<(), ExportError> {
    let mut contents = String::new();
    contents.push_str(header);
    contents.push('\n');
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(path, contents)?;
    info!("Wrote {} rows to {}", lines.len(), path.display());
    Ok(())
}

/// Export the transforms CSV
pub fn write_transforms_config(
    registry: &TransformRegistry,
    config: &ServerConfig,
    path: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let rows = transform_rows(registry, config)?;
    let header = if config.project.include_output_entities {
        TRANSFORMS_CSV_HEADER
    } else {
        LEGACY_TRANSFORMS_CSV_HEADER
    };
    export_csv(header, &rows, path, config.project.csv_line_limit)
}

/// Export the settings CSV
pub fn write_settings_config(
    registry: &TransformRegistry,
    config: &ServerConfig,
    path: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let rows = setting_rows(registry, config);
    export_csv(SETTINGS_CSV_HEADER, &rows, path, config.project.csv_line_limit)
}
