use crate::helpers::{add_book, run_liburutegia, stdout_json};

#[test]
fn stats_outputs_the_report_as_json() {
    add_book("Maixux", "Cli stats marker", "Ursula K. Le Guin", "320");

    let stats = stdout_json(&run_liburutegia(&["stats"], Some("Maixux")));

    assert!(stats["total_books"].as_u64().unwrap() >= 1);
    assert_eq!(stats["monthly_progress"].as_array().unwrap().len(), 12);
    assert!(stats["fun_facts"].is_object());
    assert!(stats["computed_at"].is_string());
}

#[test]
fn stats_summary_is_human_readable() {
    add_book("Arantxa", "Cli summary marker", "Bernardo Atxaga", "200");

    let output = run_liburutegia(&["stats", "--summary"], Some("Arantxa"));
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next().unwrap_or_default();
    assert!(first.starts_with("Books: "), "stdout: {stdout}");
    assert!(stdout.contains("Pages read: "));
    assert!(stdout.contains("Best month: "));
}

#[test]
fn suggest_fails_cleanly_when_the_server_has_no_key() {
    let output = run_liburutegia(&["suggest", "--title", "Obabakoak"], Some("Maixux"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not configured"), "stderr: {stderr}");
}
