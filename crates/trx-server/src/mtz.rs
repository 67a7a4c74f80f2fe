//! Local transform bundle (`.mtz`) export.
//!
//! An `.mtz` is a zip archive the desktop client imports in one step. The
//! local variant registers every transform as a command-line transform
//! that runs `{command} {params} local {name}` in a working directory, so
//! the client drives `trx local` directly instead of calling a server.
//!
//! Archive layout:
//!
//! ```text
//! Servers/Local.tas
//! TransformRepositories/Local/{name}.transform
//! TransformRepositories/Local/{name}.transformsettings
//! TransformSets/{set}.set
//! ```
//!
//! All XML is written in canonical form (sorted attributes, no
//! self-closing tags).

use crate::config::ServerConfig;
use crate::export::ExportError;
use crate::registry::TransformRegistry;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use trx_protocol::xml::XmlWriter;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const LOCAL_ADAPTER: &str = "com.paterva.maltego.transform.protocol.v2api.LocalTransformAdapterV2";

const COMMAND_PROPERTY: &str = "transform.local.command";
const PARAMETERS_PROPERTY: &str = "transform.local.parameters";
const WORKING_DIR_PROPERTY: &str = "transform.local.working-directory";
const DEBUG_PROPERTY: &str = "transform.local.debug";

/// How the client invokes a local transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCommand {
    /// Directory the command runs in
    pub working_dir: PathBuf,
    /// Executable to run
    pub command: String,
    /// Arguments placed before `local {name}`
    pub params: String,
    /// Show the transform's text output in the client
    pub debug: bool,
}

impl Default for LocalCommand {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            command: "trx".to_string(),
            params: String::new(),
            debug: true,
        }
    }
}

impl LocalCommand {
    /// Command-line parameters for one transform
    pub fn parameters_for(&self, name: &str) -> String {
        if self.params.is_empty() {
            format!("local {}", name)
        } else {
            format!("{} local {}", self.params, name)
        }
    }
}

/// Current time in the `LastSync` format, e.g. `2022-08-10 07:52:45 UTC`
pub fn last_sync_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// `Servers/Local.tas`: the local server and the transforms it hosts
pub fn local_server_xml<'a, I>(transform_names: I, last_sync: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut w = XmlWriter::new(true);
    w.start(
        "MaltegoServer",
        &[
            ("name", "Local"),
            ("enabled", "true"),
            ("description", "Local transforms hosted on this machine"),
            ("url", "http://localhost"),
        ],
    );
    w.text_element("LastSync", &[], last_sync);
    w.empty("Protocol", &[("version", "0.0")]);
    w.empty("Authentication", &[("type", "none")]);

    w.start("Transforms", &[]);
    for name in transform_names {
        w.empty("Transform", &[("name", name)]);
    }
    w.end("Transforms");

    w.empty("Seeds", &[]);
    w.end("MaltegoServer");
    w.into_string()
}

/// `{name}.transformsettings`: the command line the client runs
pub fn settings_xml(working_dir: &str, command: &str, params: &str, debug: bool) -> String {
    let mut w = XmlWriter::new(true);
    w.start(
        "TransformSettings",
        &[
            ("enabled", "true"),
            ("disclaimerAccepted", "false"),
            ("showHelp", "true"),
            ("runWithAll", "true"),
            ("favorite", "false"),
        ],
    );

    w.start("Properties", &[]);
    let properties = [
        (COMMAND_PROPERTY, "string", command),
        (PARAMETERS_PROPERTY, "string", params),
        (WORKING_DIR_PROPERTY, "string", working_dir),
        (DEBUG_PROPERTY, "boolean", if debug { "true" } else { "false" }),
    ];
    for (name, kind, value) in properties {
        w.text_element(
            "Property",
            &[("name", name), ("type", kind), ("popup", "false")],
            value,
        );
    }
    w.end("Properties");

    w.end("TransformSettings");
    w.into_string()
}

/// `{name}.transform`: the transform definition
pub fn transform_xml(
    name: &str,
    display_name: &str,
    description: &str,
    input_entity: &str,
    author: &str,
) -> String {
    let mut w = XmlWriter::new(true);
    w.start(
        "MaltegoTransform",
        &[
            ("name", name),
            ("displayName", display_name),
            ("abstract", "false"),
            ("template", "false"),
            ("visibility", "public"),
            ("description", description),
            ("author", author),
            ("requireDisplayInfo", "false"),
        ],
    );
    w.text_element("TransformAdapter", &[], LOCAL_ADAPTER);

    w.start("Properties", &[]);
    w.start("Fields", &[]);
    let fields = [
        (
            COMMAND_PROPERTY,
            "string",
            "false",
            "The command to execute for this transform",
            "Command line",
        ),
        (
            PARAMETERS_PROPERTY,
            "string",
            "true",
            "The parameters to pass to the transform command",
            "Command parameters",
        ),
        (
            WORKING_DIR_PROPERTY,
            "string",
            "true",
            "The working directory used when invoking the executable",
            "Working directory",
        ),
        (
            DEBUG_PROPERTY,
            "boolean",
            "true",
            "When this is set, the transform's text output will be \
             printed to the output window",
            "Show debug info",
        ),
    ];
    for (field, kind, nullable, field_description, label) in fields {
        w.empty(
            "Property",
            &[
                ("name", field),
                ("type", kind),
                ("nullable", nullable),
                ("hidden", "false"),
                ("readonly", "false"),
                ("description", field_description),
                ("popup", "false"),
                ("abstract", "false"),
                ("visibility", "public"),
                ("auth", "false"),
                ("displayName", label),
            ],
        );
    }
    w.end("Fields");
    w.end("Properties");

    w.start("InputConstraints", &[]);
    w.empty("Entity", &[("type", input_entity), ("min", "1"), ("max", "1")]);
    w.end("InputConstraints");

    w.empty("OutputEntities", &[]);
    w.empty("defaultSets", &[]);
    w.text_element("StealthLevel", &[], "0");

    w.end("MaltegoTransform");
    w.into_string()
}

/// `TransformSets/{set}.set`: a named group of transforms
pub fn transform_set_xml<'a, I>(name: &str, description: &str, transforms: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut w = XmlWriter::new(true);
    w.start("TransformSet", &[("name", name), ("description", description)]);
    w.start("Transforms", &[]);
    for transform in transforms {
        w.empty("Transform", &[("name", transform)]);
    }
    w.end("Transforms");
    w.end("TransformSet");
    w.into_string()
}

/// Archive entries as `(path, contents)`, in the order they are written.
///
/// Settings cannot be passed to local transforms; any configured ones are
/// reported with `warn!` and left out.
pub fn local_mtz_entries(
    registry: &TransformRegistry,
    config: &ServerConfig,
    local: &LocalCommand,
    last_sync: &str,
) -> Vec<(String, String)> {
    if !config.global_settings.is_empty() {
        let names: Vec<&str> = config.global_settings.iter().map(|s| s.name.as_str()).collect();
        warn!(
            "Settings are not supported with local transforms. Global settings are: {}",
            names.join(", ")
        );
    }

    let mut entries = vec![(
        "Servers/Local.tas".to_string(),
        local_server_xml(registry.names(), last_sync),
    )];

    let working_dir = local.working_dir.display().to_string();
    for meta in registry.metas() {
        if !meta.settings.is_empty() {
            let names: Vec<&str> = meta.settings.iter().map(|s| s.name.as_str()).collect();
            warn!(
                "Settings are not supported with local transforms. Transform '{}' has: {}",
                meta.display_name,
                names.join(", ")
            );
        }

        let settings = settings_xml(
            &working_dir,
            &local.command,
            &local.parameters_for(&meta.name),
            local.debug,
        );
        let transform = transform_xml(
            &meta.name,
            &meta.display_name,
            &meta.description,
            &meta.input_entity,
            &config.project.author,
        );

        entries.push((
            format!("TransformRepositories/Local/{}.transform", meta.name),
            transform,
        ));
        entries.push((
            format!("TransformRepositories/Local/{}.transformsettings", meta.name),
            settings,
        ));
    }

    for (set, members) in registry.transform_sets() {
        entries.push((
            format!("TransformSets/{}.set", set.name),
            transform_set_xml(&set.name, &set.description, members),
        ));
    }

    entries
}

/// Write a local `.mtz` bundle to `path`.
///
/// The working directory is made absolute before it is recorded.
pub fn write_local_mtz(
    registry: &TransformRegistry,
    config: &ServerConfig,
    path: &Path,
    local: &LocalCommand,
) -> Result<PathBuf, ExportError> {
    let local = LocalCommand {
        working_dir: std::path::absolute(&local.working_dir)?,
        ..local.clone()
    };
    let entries = local_mtz_entries(registry, config, &local, &last_sync_timestamp());

    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default();
    for (name, contents) in &entries {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(contents.as_bytes())?;
    }
    zip.finish()?;

    info!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{TransformMeta, TransformSet, TransformSetting};
    use std::io::Read;
    use trx_protocol::{Request, Response};

    const LAST_SYNC: &str = "2022-08-10 07:52:45 UTC";

    fn noop(_: &Request, _: &mut Response) -> anyhow::Result<()> {
        Ok(())
    }

    fn test_registry() -> TransformRegistry {
        let set = TransformSet::new("test", "Test Transform Set");
        let mut registry = TransformRegistry::new();
        registry
            .register(
                "ToLower",
                TransformMeta::new("maltego.Phrase", "Converts the input to lowercase")
                    .with_transform_set(set.clone()),
                noop,
            )
            .unwrap();
        registry
            .register(
                "ToUpper",
                TransformMeta::new("maltego.Phrase", "Converts the input to uppercase")
                    .with_transform_set(set)
                    .with_setting(TransformSetting::new("language", "Language")),
                noop,
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_local_server_xml() {
        let xml = local_server_xml(["to_lower", "to_upper"], LAST_SYNC);
        assert_eq!(
            xml,
            "<MaltegoServer description=\"Local transforms hosted on this machine\" \
             enabled=\"true\" name=\"Local\" url=\"http://localhost\">\
             <LastSync>2022-08-10 07:52:45 UTC</LastSync>\
             <Protocol version=\"0.0\"></Protocol>\
             <Authentication type=\"none\"></Authentication>\
             <Transforms><Transform name=\"to_lower\"></Transform>\
             <Transform name=\"to_upper\"></Transform></Transforms>\
             <Seeds></Seeds></MaltegoServer>"
        );
    }

    #[test]
    fn test_settings_xml() {
        let xml = settings_xml("~/project/maltego", "venv/bin/trx", "local to_lower", false);
        assert!(xml.starts_with(
            "<TransformSettings disclaimerAccepted=\"false\" enabled=\"true\" \
             favorite=\"false\" runWithAll=\"true\" showHelp=\"true\"><Properties>"
        ));
        assert!(xml.contains(
            "<Property name=\"transform.local.command\" popup=\"false\" type=\"string\">\
             venv/bin/trx</Property>"
        ));
        assert!(xml.contains(">local to_lower</Property>"));
        assert!(xml.contains(">~/project/maltego</Property>"));
        assert!(xml.contains(
            "<Property name=\"transform.local.debug\" popup=\"false\" type=\"boolean\">\
             false</Property>"
        ));
    }

    #[test]
    fn test_transform_xml() {
        let xml = transform_xml(
            "to_upper",
            "To Upper",
            "Converts the input to uppercase",
            "maltego.Text",
            "Maltego Organization",
        );
        assert!(xml.starts_with(
            "<MaltegoTransform abstract=\"false\" author=\"Maltego Organization\" \
             description=\"Converts the input to uppercase\" displayName=\"To Upper\" \
             name=\"to_upper\" requireDisplayInfo=\"false\" template=\"false\" \
             visibility=\"public\">"
        ));
        assert!(xml.contains(&format!("<TransformAdapter>{}</TransformAdapter>", LOCAL_ADAPTER)));
        assert!(xml.contains(
            "<InputConstraints><Entity max=\"1\" min=\"1\" type=\"maltego.Text\"></Entity>\
             </InputConstraints><OutputEntities></OutputEntities><defaultSets></defaultSets>\
             <StealthLevel>0</StealthLevel></MaltegoTransform>"
        ));
        assert_eq!(xml.matches("<Property ").count(), 4);
        assert!(xml.contains("description=\"When this is set, the transform&apos;s text output"));
    }

    #[test]
    fn test_transform_set_xml() {
        let xml = transform_set_xml("text_transforms", "Basic text transforms", ["to_lower"]);
        assert_eq!(
            xml,
            "<TransformSet description=\"Basic text transforms\" name=\"text_transforms\">\
             <Transforms><Transform name=\"to_lower\"></Transform></Transforms></TransformSet>"
        );
    }

    #[test]
    fn test_entry_paths() {
        let local = LocalCommand {
            working_dir: PathBuf::from("/home/maltego"),
            ..LocalCommand::default()
        };
        let config = ServerConfig::default_test_config();
        let entries = local_mtz_entries(&test_registry(), &config, &local, LAST_SYNC);
        let paths: Vec<&str> = entries.iter().map(|(p, _)| p.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "Servers/Local.tas",
                "TransformRepositories/Local/tolower.transform",
                "TransformRepositories/Local/tolower.transformsettings",
                "TransformRepositories/Local/toupper.transform",
                "TransformRepositories/Local/toupper.transformsettings",
                "TransformSets/test.set",
            ]
        );
        assert!(entries[2].1.contains(">local tolower</Property>"));
        assert!(entries[2].1.contains(">/home/maltego</Property>"));
        assert!(entries[1].1.contains("author=\"Test Author\""));
        assert!(entries[5].1.contains("<Transform name=\"toupper\">"));
    }

    #[test]
    fn test_parameters_for() {
        let local = LocalCommand {
            params: "--no-color".to_string(),
            ..LocalCommand::default()
        };
        assert_eq!(local.parameters_for("dnstoip"), "--no-color local dnstoip");
        assert_eq!(LocalCommand::default().parameters_for("dnstoip"), "local dnstoip");
    }

    #[test]
    fn test_last_sync_format() {
        let stamp = last_sync_timestamp();
        assert_eq!(stamp.len(), "2022-08-10 07:52:45 UTC".len());
        assert!(stamp.ends_with(" UTC"));
    }

    #[test]
    fn test_write_local_mtz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.mtz");
        let config = ServerConfig::default_test_config();

        let written = write_local_mtz(&test_registry(), &config, &path, &LocalCommand::default())
            .unwrap();
        assert_eq!(written, path);

        let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.len(), 6);

        let mut settings = String::new();
        archive
            .by_name("TransformRepositories/Local/tolower.transformsettings")
            .unwrap()
            .read_to_string(&mut settings)
            .unwrap();
        // The recorded working directory is absolute
        let working_dir = std::path::absolute(".").unwrap();
        assert!(settings.contains(&format!(">{}</Property>", working_dir.display())));

        for i in 0..archive.len() {
            assert!(archive.by_index(i).unwrap().size() > 0);
        }
    }
}
