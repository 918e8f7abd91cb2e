use assert_cmd::Command;
use std::path::Path;

pub fn quotebook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("quotebook").unwrap();
    cmd.env_remove("QUOTEBOOK_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Command running inside an initialized quote book
pub fn book_cmd(root: &Path) -> Command {
    let mut cmd = quotebook_cmd();
    cmd.current_dir(root);
    cmd
}

pub fn init_book(root: &Path) {
    quotebook_cmd().arg("init").arg(root).assert().success();
}
