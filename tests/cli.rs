//! End-to-end tests driving the `folio` binary against a copy of
//! `fixtures/site/`.
//!
//! The publish test needs a `git` executable and is skipped without one.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir(&fixtures, tmp.path());
    tmp
}

fn copy_dir(src: &Path, dst: &Path) {
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let to = dst.join(entry.file_name());
        if entry.path().is_dir() {
            fs::create_dir_all(&to).unwrap();
            copy_dir(&entry.path(), &to);
        } else {
            fs::copy(entry.path(), &to).unwrap();
        }
    }
}

fn folio(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .unwrap()
}

fn folio_in(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap()
}

fn init_repo(repo: &Path) {
    assert!(git(repo, &["init", "-q"]).status.success());
    git(repo, &["config", "user.email", "test@example.com"]);
    git(repo, &["config", "user.name", "Test"]);
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(repo: &Path, args: &[&str]) -> Output {
    Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .unwrap()
}

#[test]
fn build_writes_page_and_assets() {
    let site = site();
    fs::write(site.path().join("projects/1-1.png"), b"png").unwrap();
    fs::write(site.path().join("projects/1-2.jpg"), b"jpg").unwrap();
    fs::write(site.path().join("projects/4-1.gif"), b"gif").unwrap();

    let out = folio(site.path(), &[]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Successfully generated index.html"));

    let html = fs::read_to_string(site.path().join("index.html")).unwrap();
    assert!(!html.contains("{{ project_"));
    assert!(!html.contains("{{ modal_body }}"));
    assert!(html.contains("<h3>Pathfinder</h3>"));
    assert!(html.contains(r#"href="https://github.com/example/tally""#));
    assert!(html.contains(r#"<img src="projects/1-1.png" alt="Pathfinder" class="project-image">"#));
    assert!(html.contains("class=\"youtube-link\""));
    assert!(!html.contains("resume-button\""));

    // Project 1: the intro paragraph takes slot 1 (left), Motivation slot 2
    // (right); How it works finds no slot 3 and gets no image.
    assert!(html.contains(
        r#"<img src="projects/1-1.png" alt="" class="modal-section-image-left">"#
    ));
    assert!(html.contains(
        r#"<img src="projects/1-2.jpg" alt="Motivation" class="modal-section-image-right">"#
    ));
    assert!(!html.contains(r#"alt="How it works""#));

    assert!(site.path().join("public/projects/1-2.jpg").exists());
    assert!(site.path().join("public/projects/4-1.gif").exists());
    assert!(!site.path().join("public/projects/1.md").exists());
}

#[test]
fn resume_flag_adds_button() {
    let site = site();
    let out = folio(site.path(), &["--resume"]);
    assert!(out.status.success());
    let html = fs::read_to_string(site.path().join("index.html")).unwrap();
    assert!(html.contains(r#"class="resume-button" download"#));
}

#[test]
fn missing_template_fails_without_output() {
    let site = site();
    fs::remove_file(site.path().join("templates/modal.html")).unwrap();
    let out = folio(site.path(), &[]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("modal.html"));
    assert!(!site.path().join("index.html").exists());
}

#[test]
fn check_reports_without_writing() {
    let site = site();
    let out = folio(site.path(), &["check"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("001 Pathfinder"));
    assert!(text.contains("Tech: Python, SQLite"));
    assert!(text.contains("Site is valid"));
    assert!(!site.path().join("index.html").exists());
}

#[test]
fn check_fails_on_missing_project() {
    let site = site();
    fs::remove_file(site.path().join("projects/4.md")).unwrap();
    let out = folio(site.path(), &["check"]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("projects/4.md"));
}

#[test]
fn gen_config_prints_stock_config() {
    let site = site();
    let out = folio(site.path(), &["gen-config"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("[projects]"));
    assert!(stdout(&out).contains("push = false"));
}

#[test]
fn config_file_changes_project_count() {
    let site = site();
    fs::write(site.path().join("folio.toml"), "[projects]\ncount = 2\n").unwrap();
    fs::remove_file(site.path().join("projects/3.md")).unwrap();
    let out = folio(site.path(), &[]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let html = fs::read_to_string(site.path().join("index.html")).unwrap();
    // Cards for 3 and 4 stay unfilled and are reported
    assert!(html.contains("{{ project_3_title }}"));
    assert!(stdout(&out).contains("Unresolved placeholders"));
}

#[test]
fn publish_without_target_is_error() {
    let site = site();
    let out = folio(site.path(), &["--publish"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--target"));
}

#[test]
fn publish_to_missing_target_fails() {
    let site = site();
    let out = folio(site.path(), &["--publish", "--target", "no-such-website"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no-such-website"));
    assert!(!site.path().join("no-such-website").exists());
}

#[test]
fn publish_commits_locally() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let site = site();
    fs::write(site.path().join("projects/2-1.png"), b"png").unwrap();
    fs::write(site.path().join("cv.pdf"), b"%PDF").unwrap();

    let web = TempDir::new().unwrap();
    init_repo(web.path());

    let target = web.path().to_str().unwrap();
    let out = folio(site.path(), &["--publish", "--target", target]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Push disabled"));

    assert!(web.path().join("index.html").exists());
    assert!(web.path().join("projects/2-1.png").exists());
    assert!(web.path().join("cv.pdf").exists());

    let log = git(web.path(), &["log", "--format=%s"]);
    let subject = String::from_utf8_lossy(&log.stdout);
    assert!(subject.starts_with("Update website - "), "{subject}");

    // Nothing changed: committing again fails and the error carries git's output
    let again = folio(site.path(), &["--publish", "--target", target]);
    assert!(!again.status.success());
    assert!(String::from_utf8_lossy(&again.stderr).contains("git commit"));
}

#[test]
fn target_flag_is_relative_to_working_dir() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let work = TempDir::new().unwrap();
    let site = work.path().join("site");
    fs::create_dir(&site).unwrap();
    copy_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site"), &site);
    let web = work.path().join("web");
    fs::create_dir(&web).unwrap();
    init_repo(&web);

    let out = folio_in(work.path(), &["--root", "site", "--publish", "--target", "web"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(web.join("index.html").exists());
    assert!(!site.join("web").exists());
}

#[test]
fn config_target_is_relative_to_root() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let site = site();
    let web = site.path().join("web");
    fs::create_dir(&web).unwrap();
    init_repo(&web);
    fs::write(site.path().join("folio.toml"), "[publish]\ntarget = \"web\"\n").unwrap();

    let out = folio(site.path(), &["--publish"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(web.join("index.html").exists());
}
