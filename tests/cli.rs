use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn create_project(root: &Path) {
    write(
        root,
        "paper.tex",
        "\\documentclass{article}\n\
         \\def\\figdir{img}\n\
         \\input{body}\n",
    );
    write(
        root,
        "body.tex",
        "\\includegraphics{\\figdir/photo}\n\
         \\includegraphics{\\figdir/absent}\n",
    );
    write(root, "img/photo.jpg", "jpg");
}

fn texdist(project: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("texdist");
    cmd.current_dir(project)
        .env_remove("RUST_LOG")
        .env_remove("TEXDIST_GIT")
        .env_remove("TEXDIST_SOURCE_EXTENSIONS")
        .env_remove("TEXDIST_FIGURE_EXTENSIONS");
    cmd
}

#[test]
fn json_report_is_the_only_stdout() {
    let project = tempfile::tempdir().unwrap();
    create_project(project.path());

    let output = texdist(project.path())
        .args(["paper.tex", "dist", "--working-tree", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["scan"]["figure_dir"], "img");
    assert_eq!(report["copy"]["copied"], 2);
    assert_eq!(report["scan"]["missing_figures"].as_array().unwrap().len(), 2);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("=== SCAN REPORT ==="));
    assert!(stderr.contains("figure img/absent not found!"));
    assert!(project.path().join("dist/body.tex").is_file());
}

#[test]
fn without_json_stdout_stays_empty() {
    let project = tempfile::tempdir().unwrap();
    create_project(project.path());

    texdist(project.path())
        .args(["paper.tex", "dist", "--working-tree"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("=== FILE COPY REPORT ==="));
}

#[test]
fn figure_extensions_come_from_the_environment() {
    let project = tempfile::tempdir().unwrap();
    create_project(project.path());

    texdist(project.path())
        .args(["paper.tex", "dist", "--working-tree"])
        .env("TEXDIST_FIGURE_EXTENSIONS", "pdf, jpg")
        .assert()
        .success();

    assert!(project.path().join("dist/img/photo.jpg").is_file());
}

#[test]
fn empty_extension_list_keeps_defaults() {
    let project = tempfile::tempdir().unwrap();
    create_project(project.path());

    texdist(project.path())
        .args(["paper.tex", "dist", "--working-tree"])
        .env("TEXDIST_FIGURE_EXTENSIONS", " , ")
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignoring TEXDIST_FIGURE_EXTENSIONS"))
        .stderr(predicate::str::contains("figure img/photo not found!"));

    assert!(!project.path().join("dist/img").exists());
}

#[test]
fn source_extensions_come_from_the_environment() {
    let project = tempfile::tempdir().unwrap();
    create_project(project.path());
    fs::rename(project.path().join("body.tex"), project.path().join("body.ltx")).unwrap();

    texdist(project.path())
        .args(["paper.tex", "dist", "--working-tree"])
        .env("TEXDIST_SOURCE_EXTENSIONS", "ltx")
        .assert()
        .success();

    assert!(project.path().join("dist/body.ltx").is_file());
}

#[test]
fn git_program_from_the_environment_is_used() {
    let project = tempfile::tempdir().unwrap();
    create_project(project.path());

    texdist(project.path())
        .args(["paper.tex", "dist"])
        .env("TEXDIST_GIT", "texdist-no-such-git-binary")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to execute texdist-no-such-git-binary",
        ));

    assert!(!project.path().join("dist").exists());
}

#[test]
fn working_tree_flag_bypasses_git() {
    let project = tempfile::tempdir().unwrap();
    create_project(project.path());

    // a git that cannot be spawned does not matter when scanning the disk
    texdist(project.path())
        .args(["paper.tex", "dist", "--working-tree"])
        .env("TEXDIST_GIT", "texdist-no-such-git-binary")
        .assert()
        .success();

    assert!(project.path().join("dist/paper.tex").is_file());
}

#[test]
fn shift_text_defaults_to_four_spaces() {
    cargo_bin_cmd!("shift-text")
        .write_stdin("abc\ndef\n")
        .assert()
        .success()
        .stdout("    abc\n    def\n");
}

#[test]
fn shift_text_reads_width_option() {
    cargo_bin_cmd!("shift-text")
        .args(["-s", "2"])
        .write_stdin("abc\n")
        .assert()
        .success()
        .stdout("  abc\n");

    cargo_bin_cmd!("shift-text")
        .args(["--shift", "0"])
        .write_stdin("abc\ndef")
        .assert()
        .success()
        .stdout("abc\ndef");
}

#[test]
fn shift_text_negative_width_means_no_indent() {
    cargo_bin_cmd!("shift-text")
        .args(["-s", "-3"])
        .write_stdin("abc\n")
        .assert()
        .success()
        .stdout("abc\n");
}

#[test]
fn shift_text_rejects_non_numbers() {
    cargo_bin_cmd!("shift-text")
        .args(["--shift", "wide"])
        .write_stdin("abc\n")
        .assert()
        .failure();
}
