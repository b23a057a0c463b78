use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Error;

/// The whole config file, including the history of the last update. It is
/// read once at startup and written back in full after a successful update.
/// Absent fields populate as zero values so a hand-written file with just
/// the credentials is enough to get started.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Config {
    pub log_file: String,
    pub email: String,
    pub token: String,
    pub zone: String,
    pub records: Vec<Record>,
    pub history: History,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Record {
    pub hostname: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct History {
    #[serde(rename = "LastIP")]
    pub last_ip: String,
    pub last_set: i64,
    pub next_verify: i64,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Whole-file replace, tab-indented. The file holds the API token, so it
    /// is created owner-read/write only.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut out = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
        self.serialize(&mut ser)?;

        let mut file = open_owner_only(path.as_ref())?;
        file.write_all(&out)?;
        Ok(())
    }
}

#[cfg(unix)]
fn open_owner_only(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
