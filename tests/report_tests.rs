use predicates::str::contains;

mod common;
use common::{init_db, init_demo, mark, rti, setup_test_db, signup, stdout_of};

#[test]
fn test_report_sorts_students_by_percentage() {
    let db_path = setup_test_db("report_sorted");
    init_demo(&db_path);
    signup(&db_path, "UMAT2024002", "Ama Owusu");
    mark(&db_path, "GEO202", "2024-07-16", "absent");

    let out = stdout_of(&["--db", &db_path, "report", "--course", "GEO202"]);

    let ama = out.find("Ama Owusu").unwrap();
    let kofi = out.find("Kofi Mensah").unwrap();
    assert!(ama < kofi, "lowest percentage first:\n{out}");
    assert!(out.contains("Poor"));
    assert!(out.contains("At Risk"));
    assert!(out.contains("Enrolled students:   2"));
    // 2 present out of 4 records across both students.
    assert!(out.contains("50.0%"));
}

#[test]
fn test_report_requires_course() {
    let db_path = setup_test_db("report_no_course");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "report"])
        .assert()
        .failure()
        .stderr(contains("no course selected"));
}

#[test]
fn test_report_ai_failure_still_shows_roster() {
    let db_path = setup_test_db("report_ai_down");
    init_demo(&db_path);

    rti()
        .args(["--db", &db_path, "report", "--course", "MIN101", "--ai"])
        .assert()
        .success()
        .stdout(contains("Kofi Mensah"))
        .stdout(contains("Good"))
        .stdout(contains("Report generation failed"));
}
