use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn hungarian() -> Command {
    Command::cargo_bin("hungarian").unwrap()
}

#[test]
fn test_reference_instance_from_stdin() {
    hungarian()
        .write_stdin("3 3\n4 1 3\n2 0 5\n3 2 2\n")
        .assert()
        .success()
        .stdout("2\n1\n3\n5\n");
}

#[test]
fn test_maximize() {
    hungarian()
        .arg("--maximize")
        .write_stdin("2 2\n1 5\n4 1\n")
        .assert()
        .success()
        .stdout("2\n1\n9\n");
}

#[test]
fn test_input_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "1 3\n7 3 5\n").unwrap();
    hungarian()
        .arg(file.path())
        .assert()
        .success()
        .stdout("2\n3\n");
}

#[test]
fn test_more_rows_than_columns() {
    hungarian()
        .write_stdin("3 2\n1 9\n9 1\n5 5\n")
        .assert()
        .success()
        .stdout("1\n2\n0\n2\n");
}

#[test]
fn test_malformed_input() {
    hungarian()
        .write_stdin("2 2\n1 2 x 4\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an integer"));
}

#[test]
fn test_iteration_limit() {
    hungarian()
        .args(["--max-iterations", "2"])
        .write_stdin("3 3\n4 1 3\n2 0 5\n3 2 2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("iteration limit of 2"));
}

#[test]
fn test_missing_file() {
    hungarian()
        .arg("does/not/exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open"));
}
