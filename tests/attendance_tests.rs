use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, init_demo, init_with_student, mark, rti, setup_test_db};

#[test]
fn test_mark_then_overwrite_keeps_one_record() {
    let db_path = setup_test_db("mark_overwrite");
    init_with_student(&db_path, "UMAT2024001", "Kofi Mensah");

    rti()
        .args(["--db", &db_path, "mark", "MIN101", "--date", "2024-07-15"])
        .assert()
        .success()
        .stdout(contains(
            "Marked present for Introduction to Mining Engineering (MIN101) on 2024-07-15.",
        ));

    rti()
        .args([
            "--db", &db_path, "mark", "MIN101", "--date", "2024-07-15", "--status", "absent",
        ])
        .assert()
        .success()
        .stdout(contains("on 2024-07-15 to absent."));

    rti()
        .args(["--db", &db_path, "history", "--course", "MIN101"])
        .assert()
        .success()
        .stdout(contains("2024-07-15"))
        .stdout(contains("Present: 0  Absent: 1  Attendance: 0.0%"));
}

#[test]
fn test_same_mark_twice_is_unchanged() {
    let db_path = setup_test_db("mark_unchanged");
    init_with_student(&db_path, "S1", "Ama Owusu");
    mark(&db_path, "CSE305", "2024-07-17", "present");

    rti()
        .args(["--db", &db_path, "mark", "cse305", "--date", "2024-07-17"])
        .assert()
        .success()
        .stdout(contains("is already recorded as present."));
}

#[test]
fn test_stats_without_records_is_zero_percent() {
    let db_path = setup_test_db("stats_empty");
    init_with_student(&db_path, "S1", "Ama Owusu");

    rti()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("0.0%"))
        .stdout(contains("0/0"))
        .stdout(contains("NaN").not());
}

#[test]
fn test_stats_of_demo_student() {
    let db_path = setup_test_db("stats_demo");
    init_demo(&db_path);

    rti()
        .args(["--db", &db_path, "stats"])
        .assert()
        .success()
        .stdout(contains("Kofi Mensah (UMAT2024001)"))
        .stdout(contains("91.7%"))
        .stdout(contains("66.7%"))
        .stdout(contains("2/3"));
}

#[test]
fn test_history_is_newest_first() {
    let db_path = setup_test_db("history_order");
    init_demo(&db_path);

    let out = common::stdout_of(&["--db", &db_path, "history", "--course", "GEO202"]);
    let newest = out.find("2024-07-23").unwrap();
    let middle = out.find("2024-07-18").unwrap();
    let oldest = out.find("2024-07-16").unwrap();
    assert!(newest < middle && middle < oldest);
    assert!(out.contains("Present: 2  Absent: 1  Attendance: 66.7%"));
}

#[test]
fn test_mark_requires_known_course() {
    let db_path = setup_test_db("mark_unknown_course");
    init_with_student(&db_path, "S1", "Ama Owusu");

    rti()
        .args(["--db", &db_path, "mark", "XYZ999"])
        .assert()
        .failure()
        .stderr(contains("Unknown course: XYZ999"));
}

#[test]
fn test_mark_requires_active_student() {
    let db_path = setup_test_db("mark_no_student");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "mark", "MIN101"])
        .assert()
        .failure()
        .stderr(contains("No active student"));
}

#[test]
fn test_mark_rejects_bad_input() {
    let db_path = setup_test_db("mark_bad_input");
    init_with_student(&db_path, "S1", "Ama Owusu");

    rti()
        .args(["--db", &db_path, "mark", "MIN101", "--status", "late"])
        .assert()
        .failure()
        .stderr(contains("Invalid attendance status: late"));

    rti()
        .args(["--db", &db_path, "mark", "MIN101", "--date", "15/07/2024"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_courses_are_listed() {
    let db_path = setup_test_db("courses_list");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "courses"])
        .assert()
        .success()
        .stdout(contains("MIN101"))
        .stdout(contains("Structural Geology"))
        .stdout(contains("Digital Signal Processing"));
}
