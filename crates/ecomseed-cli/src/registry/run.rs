use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub command: String,
    pub run_dir: PathBuf,
    pub config_file: Option<PathBuf>,
    /// Fully resolved options of the command, after config and flags.
    pub options: serde_json::Value,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub command: String,
    pub config_file: Option<PathBuf>,
    pub options: serde_json::Value,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub logs_path: PathBuf,
}

impl RunPaths {
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        command: ctx.command.clone(),
        config_file: ctx.config_file.clone(),
        options: ctx.options.clone(),
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new().create(true).append(true).open(&logs_path)?;

    Ok(RunPaths {
        root,
        config_path,
        logs_path,
    })
}

/// Write a command report into the run directory and return its path.
pub fn write_artifact<T: Serialize>(
    paths: &RunPaths,
    name: &str,
    value: &T,
) -> RegistryResult<PathBuf> {
    let path = paths.artifact(name);
    write_json(&path, value)?;
    Ok(path)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(label: &str) -> RunContext {
        let run_dir = std::env::temp_dir().join(format!(
            "ecomseed_registry_{label}_{}",
            uuid::Uuid::new_v4()
        ));
        RunContext {
            run_id: "0a1b2c".to_string(),
            started_at: DateTime::parse_from_rfc3339("2025-03-04T05:06:07Z")
                .unwrap()
                .with_timezone(&Utc),
            command: "generate".to_string(),
            run_dir,
            config_file: None,
            options: serde_json::json!({ "seed": 42 }),
        }
    }

    #[test]
    fn start_run_lays_out_the_run_directory() {
        let ctx = context("layout");
        let paths = start_run(&ctx).expect("start run");

        assert_eq!(
            paths.root,
            ctx.run_dir.join("2025-03-04T05-06-07Z__run_0a1b2c")
        );
        assert!(paths.logs_path.is_file());

        let config: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.config_path).unwrap()).unwrap();
        assert_eq!(config["command"], "generate");
        assert_eq!(config["options"]["seed"], 42);
        assert_eq!(config["started_at"], "2025-03-04T05:06:07+00:00");
    }

    #[test]
    fn artifacts_land_in_the_run_directory() {
        let paths = start_run(&context("artifact")).expect("start run");
        let written = write_artifact(&paths, "load_report.json", &serde_json::json!({ "ok": true }))
            .expect("write artifact");
        assert_eq!(written, paths.root.join("load_report.json"));
        assert!(written.is_file());
    }
}
