//! Integration tests for the tplset CLI

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn create_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("templates/partials")).unwrap();
    fs::create_dir_all(root.join("templates/blog")).unwrap();
    fs::write(
        root.join("templates/layout.html"),
        "<title>{% include \"_title\" %}</title>{% include \"yield\" %}",
    )
    .unwrap();
    fs::write(root.join("templates/index.html"), "Welcome {{ who }}").unwrap();
    fs::write(root.join("templates/blog/post.html"), "Post").unwrap();
    fs::write(root.join("templates/partials/_title.html"), "Demo").unwrap();
    dir
}

fn tplset(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tplset").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn test_list_command() {
    let dir = create_site();
    tplset(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout("blog/post\nindex\n");
}

#[test]
fn test_render_command_with_data() {
    let dir = create_site();
    fs::write(dir.path().join("data.json"), r#"{ "who": "you & me" }"#).unwrap();

    tplset(dir.path())
        .args(["render", "index", "--data", "data.json"])
        .assert()
        .success()
        .stdout("<title>Demo</title>Welcome you &amp; me");
}

#[test]
fn test_render_without_escaping() {
    let dir = create_site();
    fs::write(dir.path().join("data.json"), r#"{ "who": "you & me" }"#).unwrap();

    tplset(dir.path())
        .args(["render", "index", "--data", "data.json", "--no-autoescape"])
        .assert()
        .success()
        .stdout("<title>Demo</title>Welcome you & me");
}

#[test]
fn test_render_unknown_template_fails() {
    let dir = create_site();
    tplset(dir.path())
        .args(["render", "missing"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Template named: missing does not exist"));
}

#[test]
fn test_config_file_locations() {
    let dir = create_site();
    fs::rename(dir.path().join("templates"), dir.path().join("views")).unwrap();
    fs::write(
        dir.path().join("tplset.toml"),
        "templates_dir = \"views\"\npartials_dir = \"views/partials\"\n",
    )
    .unwrap();

    tplset(dir.path())
        .args(["--config", "tplset.toml", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blog/post"));
}

#[test]
fn test_broken_template_exits_at_startup() {
    let dir = create_site();
    fs::write(dir.path().join("templates/blog/broken.html"), "{% if %}").unwrap();

    tplset(dir.path())
        .arg("list")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("blog/broken.html"));
}
