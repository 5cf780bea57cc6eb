use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BROADCAST: &str = "255.255.255.255";
pub const DEFAULT_PORT: u16 = 9;

/// Reserved top-level key whose fields are merged beneath every entry.
const DEFAULTS_KEY: &str = "@default";

/// Default config location, `~/.wol.yaml`. Resolved once by the CLI layer
/// and passed into [`ConfigSet::load`]; the loader itself never consults it.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/"))
        .join(".wol.yaml")
}

/// Optional fields as they appear in the file, before defaults are merged.
/// Also the shape of the `@default` overlay itself.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawFields {
    mac: Option<String>,
    broadcast: Option<String>,
    port: Option<u16>,
    interface: Option<String>,
}

/// A raw entry value is either a bare MAC string (shorthand) or a field
/// mapping. Decoded once here; nothing downstream re-inspects YAML shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Shorthand(String),
    Record(RawFields),
}

/// A fully resolved target: overlay and built-in defaults already applied.
/// `mac` stays optional so a missing field surfaces as a lookup diagnostic
/// rather than a load failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    pub mac: Option<String>,
    pub broadcast: String,
    pub port: u16,
    pub interface: Option<String>,
}

/// Resolved targets in file order. Built once per invocation, immutable.
#[derive(Debug, Default)]
pub struct ConfigSet {
    entries: Vec<(String, TargetEntry)>,
}

impl ConfigSet {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed reading config {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed parsing YAML {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        // An empty or comment-only document deserializes to None.
        let doc: Option<serde_yaml::Mapping> = serde_yaml::from_str(contents)?;
        let Some(doc) = doc else {
            return Ok(Self::default());
        };

        let mut defaults = RawFields::default();
        let mut raw_entries = Vec::new();
        for (key, value) in doc {
            let name = key
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("non-string target name in config"))?
                .to_string();
            if name == DEFAULTS_KEY {
                defaults = serde_yaml::from_value(value)
                    .context("invalid @default entry: expected a field mapping")?;
                continue;
            }
            let raw: RawEntry = serde_yaml::from_value(value)
                .with_context(|| format!("invalid entry '{}'", name))?;
            raw_entries.push((name, raw));
        }

        let entries = raw_entries
            .into_iter()
            .map(|(name, raw)| {
                let fields = match raw {
                    RawEntry::Shorthand(mac) => RawFields {
                        mac: Some(mac),
                        ..RawFields::default()
                    },
                    RawEntry::Record(fields) => fields,
                };
                (name, resolve(&defaults, fields))
            })
            .collect();
        Ok(ConfigSet { entries })
    }

    pub fn get(&self, name: &str) -> Option<&TargetEntry> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, entry)| entry)
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TargetEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Target names in file order, for diagnostics and listings.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Prioritized union: entry fields win, overlay fields fill gaps, built-in
/// defaults cover the rest.
fn resolve(defaults: &RawFields, entry: RawFields) -> TargetEntry {
    TargetEntry {
        mac: entry.mac.or_else(|| defaults.mac.clone()),
        broadcast: entry
            .broadcast
            .or_else(|| defaults.broadcast.clone())
            .unwrap_or_else(|| DEFAULT_BROADCAST.to_string()),
        port: entry.port.or(defaults.port).unwrap_or(DEFAULT_PORT),
        interface: entry.interface.or_else(|| defaults.interface.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn overlay_fills_gaps_and_entry_wins() {
        let config = ConfigSet::parse(
            "\"@default\":\n  broadcast: 10.0.0.255\n  port: 7\nx:\n  mac: \"AA:BB:CC:DD:EE:FF\"\ny:\n  mac: \"00:11:22:33:44:55\"\n  port: 3\n",
        )
        .unwrap();

        let x = config.get("x").unwrap();
        assert_eq!(x.mac.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
        assert_eq!(x.broadcast, "10.0.0.255");
        assert_eq!(x.port, 7);

        let y = config.get("y").unwrap();
        assert_eq!(y.port, 3); // entry overrides overlay
        assert_eq!(y.broadcast, "10.0.0.255");
    }

    #[test]
    fn overlay_can_supply_mac() {
        let config = ConfigSet::parse(
            "\"@default\":\n  mac: \"00:11:22:33:44:55\"\nrack:\n  port: 7\n",
        )
        .unwrap();
        let rack = config.get("rack").unwrap();
        assert_eq!(rack.mac.as_deref(), Some("00:11:22:33:44:55"));
        assert_eq!(rack.port, 7);
    }

    #[test]
    fn shorthand_is_equivalent_to_mac_mapping() {
        let config = ConfigSet::parse(
            "\"@default\":\n  port: 7\nshort: \"00:11:22:33:44:55\"\nfull:\n  mac: \"00:11:22:33:44:55\"\n",
        )
        .unwrap();
        assert_eq!(config.get("short"), config.get("full"));
        assert_eq!(config.get("short").unwrap().port, 7);
    }

    #[test]
    fn built_in_defaults_apply_without_overlay() {
        let config = ConfigSet::parse("desktop:\n  mac: \"00:11:22:33:44:55\"\n").unwrap();
        let desktop = config.get("desktop").unwrap();
        assert_eq!(desktop.broadcast, DEFAULT_BROADCAST);
        assert_eq!(desktop.port, DEFAULT_PORT);
        assert_eq!(desktop.interface, None);
    }

    #[test]
    fn missing_mac_stays_unset() {
        let config = ConfigSet::parse("ghost:\n  port: 9\n").unwrap();
        assert_eq!(config.get("ghost").unwrap().mac, None);
    }

    #[test]
    fn empty_document_is_an_empty_set() {
        let config = ConfigSet::parse("").unwrap();
        assert!(config.names().is_empty());

        let config = ConfigSet::parse("# just a comment\n").unwrap();
        assert!(config.names().is_empty());
    }

    #[test]
    fn defaults_only_document_is_an_empty_set() {
        let config = ConfigSet::parse("\"@default\":\n  port: 7\n").unwrap();
        assert!(config.names().is_empty());
    }

    #[test]
    fn names_preserve_file_order() {
        let config = ConfigSet::parse(
            "zulu: \"00:11:22:33:44:55\"\nalpha: \"00:11:22:33:44:66\"\nmike: \"00:11:22:33:44:77\"\n",
        )
        .unwrap();
        assert_eq!(config.names(), vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn scalar_defaults_entry_is_rejected() {
        let err = ConfigSet::parse("\"@default\": \"00:11:22:33:44:55\"\n").unwrap_err();
        assert!(err.to_string().contains("@default"));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(ConfigSet::parse("desktop: [unclosed\n").is_err());
        assert!(ConfigSet::parse("- not\n- a\n- mapping\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ConfigSet::load(Path::new("/nonexistent/.wol.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed reading config"));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "\"@default\":\n  broadcast: 192.168.1.255\ndesktop:\n  mac: \"00:11:22:33:44:55\"\n"
        )
        .unwrap();

        let config = ConfigSet::load(file.path()).unwrap();
        let desktop = config.get("desktop").unwrap();
        assert_eq!(desktop.mac.as_deref(), Some("00:11:22:33:44:55"));
        assert_eq!(desktop.broadcast, "192.168.1.255");
    }

    #[test]
    fn default_path_is_under_home() {
        let path = default_config_path();
        assert!(path.ends_with(".wol.yaml"));
    }
}
