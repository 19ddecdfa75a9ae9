#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn wonder_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wonder").unwrap();
    cmd.env_remove("WONDER_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialize a journal in `dir`
pub fn init_journal(dir: &Path) {
    wonder_cmd().arg("init").arg(dir).assert().success();
}

/// Add an entry and return its id (the last line printed)
pub fn add_entry(dir: &Path, reflection: &str) -> String {
    let output = wonder_cmd()
        .current_dir(dir)
        .args(["add", "--image", "data:image/png;base64,iVBORw0KGgo="])
        .args(["--reflection", reflection])
        .args(["--prompt", "Capture a moment of serendipity"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout.lines().last().unwrap().trim().to_string()
}
