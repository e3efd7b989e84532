extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn renders_a_mandelbrot_image() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.pnm");
    Command::cargo_bin("escape")
        .unwrap()
        .args(&[
            "--output",
            out.to_str().unwrap(),
            "--density",
            "20",
            "--iterations",
            "50",
        ])
        .assert()
        .success();
    // 3.0 x 3.0 units at density 20 is a 60x60 graymap plus header.
    assert!(fs::metadata(&out).unwrap().len() > 3600);
}

#[test]
fn renders_a_julia_image() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("julia.pnm");
    Command::cargo_bin("escape")
        .unwrap()
        .args(&[
            "--output",
            out.to_str().unwrap(),
            "--leftlower",
            "-1.5,-1.5",
            "--rightupper",
            "1.5,1.5",
            "--julia",
            "-0.4,0.6",
            "--density",
            "20",
            "--iterations",
            "50",
            "--threads",
            "1",
        ])
        .assert()
        .success();
    assert!(fs::metadata(&out).unwrap().len() > 3600);
}

#[test]
fn rejects_an_inverted_region() {
    Command::cargo_bin("escape")
        .unwrap()
        .args(&[
            "--output",
            "unused.pnm",
            "--leftlower",
            "1.0,-1.5",
            "--rightupper",
            "-2.0,1.5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid region"));
}

#[test]
fn rejects_a_bad_iteration_count() {
    Command::cargo_bin("escape")
        .unwrap()
        .args(&["--output", "unused.pnm", "--iterations", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count"));
}
