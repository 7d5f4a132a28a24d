#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, isolated from the user's configuration and AI endpoint.
pub fn rti() -> Command {
    let mut cmd = cargo_bin_cmd!("rattendance");
    cmd.env("HOME", test_home())
        .env("APPDATA", test_home())
        .env_remove("RATTENDANCE_AI_ENDPOINT")
        .env_remove("RATTENDANCE_AI_KEY");
    cmd
}

pub fn test_home() -> PathBuf {
    let home = env::temp_dir().join("rattendance_test_home");
    fs::create_dir_all(&home).ok();
    home
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh DB with the schema only.
pub fn init_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh DB with the demo student active.
pub fn init_demo(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init", "--demo"])
        .assert()
        .success();
}

/// Fresh DB with one registered, active student.
pub fn init_with_student(db_path: &str, id: &str, name: &str) {
    init_db(db_path);
    signup(db_path, id, name);
}

pub fn signup(db_path: &str, id: &str, name: &str) {
    rti()
        .args(["--db", db_path, "student", "signup", "--id", id, "--name", name])
        .assert()
        .success();
}

pub fn mark(db_path: &str, course: &str, date: &str, status: &str) {
    rti()
        .args([
            "--db", db_path, "mark", course, "--date", date, "--status", status,
        ])
        .assert()
        .success();
}

pub fn stdout_of(args: &[&str]) -> String {
    let out = rti().args(args).output().expect("run rattendance");
    assert!(out.status.success(), "command failed: {:?}", args);
    String::from_utf8_lossy(&out.stdout).to_string()
}
