use std::fs;

use crate::helpers::{run_liburutegia, stdout_json};

fn listed(name: &str) -> bool {
    let files = stdout_json(&run_liburutegia(&["file", "list"], Some("Maixux")));
    files
        .as_array()
        .expect("list is an array")
        .iter()
        .any(|f| f["name"] == name)
}

#[test]
fn upload_download_and_delete_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("cli-upload-marker.csv");
    fs::write(&source, "title,author\nObabakoak,Bernardo Atxaga\n").unwrap();

    let stored = stdout_json(&run_liburutegia(
        &["file", "upload", "--path", source.to_str().unwrap()],
        Some("Maixux"),
    ));
    assert_eq!(stored["name"], "cli-upload-marker.csv");
    assert_eq!(stored["content_type"], "text/csv");
    assert_eq!(stored["size"], 39);
    assert!(listed("cli-upload-marker.csv"));

    let target = dir.path().join("downloaded.csv");
    let output = run_liburutegia(
        &[
            "file",
            "download",
            "--name",
            "cli-upload-marker.csv",
            "--output",
            target.to_str().unwrap(),
        ],
        Some("Arantxa"),
    );
    assert!(output.status.success());
    assert_eq!(fs::read(&target).unwrap(), fs::read(&source).unwrap());

    let output = run_liburutegia(
        &["file", "delete", "--name", "cli-upload-marker.csv", "--yes"],
        Some("Arantxa"),
    );
    assert!(output.status.success());
    assert!(!listed("cli-upload-marker.csv"));
}

#[test]
fn upload_can_rename_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("local.txt");
    fs::write(&source, "kaixo").unwrap();

    let stored = stdout_json(&run_liburutegia(
        &[
            "file",
            "upload",
            "--path",
            source.to_str().unwrap(),
            "--name",
            "cli rename marker.txt",
        ],
        Some("Arantxa"),
    ));
    assert_eq!(stored["name"], "cli rename marker.txt");
    assert!(listed("cli rename marker.txt"));
}

#[test]
fn downloading_a_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing.bin");

    let output = run_liburutegia(
        &[
            "file",
            "download",
            "--name",
            "cli-never-uploaded.bin",
            "--output",
            target.to_str().unwrap(),
        ],
        Some("Maixux"),
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("404"), "stderr: {stderr}");
    assert!(!target.exists());
}
