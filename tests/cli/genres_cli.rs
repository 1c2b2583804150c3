use crate::helpers::{add_book, run_liburutegia, run_liburutegia_with_input, stdout_json};

fn genre_id(name: &str) -> Option<i64> {
    let genres = stdout_json(&run_liburutegia(&["genre", "list"], Some("Maixux")));
    genres
        .as_array()
        .expect("list is an array")
        .iter()
        .find(|g| g["name"] == name)
        .and_then(|g| g["id"].as_i64())
}

#[test]
fn added_genre_can_be_deleted() {
    let genre = stdout_json(&run_liburutegia(
        &["genre", "add", "--name", "Cli genre marker"],
        Some("Arantxa"),
    ));
    assert_eq!(genre["name"], "Cli genre marker");
    let id = genre["id"].as_i64().unwrap().to_string();
    assert!(genre_id("Cli genre marker").is_some());

    let output = run_liburutegia(&["genre", "delete", "--id", &id, "--yes"], Some("Arantxa"));
    assert!(output.status.success());
    assert!(genre_id("Cli genre marker").is_none());
}

#[test]
fn duplicate_genre_reports_a_conflict() {
    let output = run_liburutegia(&["genre", "add", "--name", "romance"], Some("Maixux"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("409"), "stderr: {stderr}");
    assert!(stderr.contains("already exists"), "stderr: {stderr}");
}

#[test]
fn declined_genre_delete_keeps_it() {
    let genre = stdout_json(&run_liburutegia(
        &["genre", "add", "--name", "Cli kept genre"],
        Some("Maixux"),
    ));
    let id = genre["id"].as_i64().unwrap().to_string();

    let output =
        run_liburutegia_with_input(&["genre", "delete", "--id", &id], Some("Maixux"), "n\n");
    assert!(output.status.success());
    assert!(genre_id("Cli kept genre").is_some());
}

#[test]
fn books_keep_a_deleted_genre() {
    let genre = stdout_json(&run_liburutegia(
        &["genre", "add", "--name", "Cli short-lived genre"],
        Some("Arantxa"),
    ));
    let id = genre["id"].as_i64().unwrap().to_string();
    let book_id = add_book("Arantxa", "Cli genre book marker", "Ramon Saizarbitoria", "300");
    stdout_json(&run_liburutegia(
        &["book", "update", "--id", &book_id, "--genre", "Cli short-lived genre"],
        Some("Arantxa"),
    ));

    let output = run_liburutegia(&["genre", "delete", "--id", &id, "--yes"], Some("Arantxa"));
    assert!(output.status.success());

    let book = stdout_json(&run_liburutegia(
        &["book", "get", "--id", &book_id],
        Some("Arantxa"),
    ));
    assert_eq!(book["genre"], "Cli short-lived genre");
}
