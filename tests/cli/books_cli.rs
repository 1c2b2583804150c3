use serde_json::Value;

use crate::helpers::{
    SERVER, add_book, run_liburutegia, run_liburutegia_with_input, stdout_json,
};

#[test]
fn shared_server_runs_inside_the_test_process() {
    add_book("Maixux", "Cli harness marker", "Mikel Laboa", "90");

    assert!(SERVER.base_url.starts_with("http://127.0.0.1:"));
    assert!(!SERVER.thread.is_finished());
}

#[test]
fn commands_without_a_reader_fail() {
    let output = run_liburutegia(&["book", "list"], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no reader selected"), "stderr: {stderr}");
}

#[test]
fn unknown_reader_is_rejected_by_the_parser() {
    let output = run_liburutegia(&["book", "list", "--user", "guest"], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown reader 'guest'"), "stderr: {stderr}");
}

#[test]
fn add_book_outputs_the_stored_record() {
    let output = run_liburutegia(
        &[
            "book",
            "add",
            "--title",
            "Soinujolearen semea",
            "--author",
            "Bernardo Atxaga",
            "--pages",
            "450",
            "--genre",
            "Ficción",
            "--status",
            "finished",
        ],
        Some("Maixux"),
    );

    let book = stdout_json(&output);
    assert_eq!(book["title"], "Soinujolearen semea");
    assert_eq!(book["user_id"], "Maixux");
    assert_eq!(book["status"], "finished");
    assert_eq!(book["current_page"], 450);
    assert!(book["finish_date"].is_string());
}

#[test]
fn invalid_book_reports_the_server_message() {
    let output = run_liburutegia(
        &["book", "add", "--title", "No pages", "--author", "Nobody"],
        Some("Maixux"),
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("total_pages must be greater than zero"),
        "stderr: {stderr}"
    );
}

#[test]
fn list_shows_only_the_readers_books() {
    let id = add_book("Arantxa", "Cli list marker", "Julio Cortázar", "600");

    let output = run_liburutegia(
        &["book", "list", "--search", "cli list marker"],
        Some("Arantxa"),
    );
    let books = stdout_json(&output);
    let books = books.as_array().expect("list is an array");
    assert!(books.iter().any(|b| b["id"] == id.as_str()));

    let output = run_liburutegia(
        &["book", "list", "--search", "cli list marker"],
        Some("Maixux"),
    );
    let other = stdout_json(&output);
    assert!(other.as_array().unwrap().is_empty());
}

#[test]
fn list_rejects_unknown_sort_key() {
    let output = run_liburutegia(&["book", "list", "--sort", "isbn"], Some("Maixux"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown sort key 'isbn'"), "stderr: {stderr}");
}

#[test]
fn progress_moves_a_book_to_reading_then_finished() {
    let id = add_book("Maixux", "Cli progress marker", "Haruki Murakami", "300");

    let reading = stdout_json(&run_liburutegia(
        &["book", "progress", "--id", &id, "--page", "120"],
        Some("Maixux"),
    ));
    assert_eq!(reading["status"], "reading");
    assert!(reading["start_date"].is_string());

    let finished = stdout_json(&run_liburutegia(
        &["book", "progress", "--id", &id, "--page", "300"],
        Some("Maixux"),
    ));
    assert_eq!(finished["status"], "finished");
    assert!(finished["finish_date"].is_string());
}

#[test]
fn update_changes_only_the_given_fields() {
    let id = add_book("Arantxa", "Cli update marker", "Juan Rulfo", "130");

    let updated = stdout_json(&run_liburutegia(
        &["book", "update", "--id", &id, "--rating", "4"],
        Some("Arantxa"),
    ));
    assert_eq!(updated["rating"], 4);
    assert_eq!(updated["title"], "Cli update marker");

    let fetched = stdout_json(&run_liburutegia(
        &["book", "get", "--id", &id],
        Some("Arantxa"),
    ));
    assert_eq!(fetched["rating"], 4);
}

#[test]
fn delete_with_yes_removes_the_book() {
    let id = add_book("Maixux", "Cli delete marker", "Jorge Luis Borges", "200");

    let output = run_liburutegia(&["book", "delete", "--id", &id, "--yes"], Some("Maixux"));
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("Deleted book {id}")), "stderr: {stderr}");

    let output = run_liburutegia(&["book", "get", "--id", &id], Some("Maixux"));
    assert!(!output.status.success());
}

#[test]
fn declined_delete_keeps_the_book() {
    let id = add_book("Arantxa", "Cli keep marker", "Mariana Enríquez", "350");

    let output = run_liburutegia_with_input(
        &["book", "delete", "--id", &id],
        Some("Arantxa"),
        "n\n",
    );
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Deletion cancelled."), "stderr: {stderr}");

    let book: Value = stdout_json(&run_liburutegia(
        &["book", "get", "--id", &id],
        Some("Arantxa"),
    ));
    assert_eq!(book["title"], "Cli keep marker");
}

#[test]
fn another_reader_cannot_delete_the_book() {
    let id = add_book("Maixux", "Cli foreign marker", "Kirmen Uribe", "250");

    let output = run_liburutegia(&["book", "delete", "--id", &id, "--yes"], Some("Arantxa"));
    assert!(!output.status.success());

    let output = run_liburutegia(&["book", "get", "--id", &id], Some("Maixux"));
    assert!(output.status.success());
}

#[test]
fn list_summary_prints_one_line_per_book() {
    let id = add_book("Arantxa", "Cli summary list marker", "Harkaitz Cano", "220");
    stdout_json(&run_liburutegia(
        &["book", "update", "--id", &id, "--current-page", "220", "--rating", "3"],
        Some("Arantxa"),
    ));

    let output = run_liburutegia(
        &["book", "list", "--search", "cli summary list marker", "--summary"],
        Some("Arantxa"),
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "Cli summary list marker by Harkaitz Cano · Finished · ★★★☆☆"
    );
}
