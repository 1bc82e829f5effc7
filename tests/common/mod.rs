use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_LOG: &str = "\
Currently:
\t- 2024-01-15 09:30 | Fixed the @bug in parser
\t\tfirst line
\t\tsecond line
\t- 2024-01-15 11:00 | Call the vendor @flagged
Archive:
\t- 2024-01-14 09:00 | Review @work @done(2024-01-14 10:00)
\t- 2024-01-14 13:00 | Standup @work @meeting @done(2024-01-14 13:15)
";

/// Command for the wwid binary with a config file under `dir` that does
/// not exist unless a test writes it.
pub fn wwid_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wwid").unwrap();
    cmd.env("WWID_CONFIG", config_path(dir));
    cmd.env_remove("NO_COLOR");
    cmd.current_dir(dir);
    cmd
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join("wwid-config.toml")
}

/// Write the sample activity log into `dir` and return its path
pub fn write_log(dir: &Path) -> PathBuf {
    let path = dir.join("doing.md");
    fs::write(&path, SAMPLE_LOG).unwrap();
    path
}
