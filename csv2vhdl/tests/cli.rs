// Copyright 2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>

use std::path::Path;
use std::process::{Command, Output};

fn csv2vhdl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_csv2vhdl"))
        .args(args)
        .output()
        .expect("failed to run csv2vhdl")
}

fn write_input(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_stdout_without_entity() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "capture.csv", "Time[s],A\n0.0,0\n0.1,1\n0.25,1\n");
    let out = csv2vhdl(&[&input]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.starts_with("stimulus : process\n"));
    assert!(text.contains("        0.15 sec\n"));
    assert!(text.contains("        A <= A_VALUES(i);\n"));
    assert!(!text.contains("architecture"));
}

#[test]
fn test_output_file_with_entity() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "sensor.csv",
        "A;Time[s];B\n1;0.000;0\n0;0.002;1\n",
    );
    let output = dir.path().join("tb_sensor.vhd");
    let out = csv2vhdl(&[
        &input,
        "--entity",
        "tb_sensor",
        "--delimiter",
        ";",
        "--time-unit",
        "ms",
        "--signal-type",
        "std_ulogic",
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("from sensor.csv\n"));
    assert!(text.contains("-- total duration:       2.00e-3 sec\n"));
    assert!(text.contains("entity tb_sensor is\n"));
    assert!(text.contains("architecture sim of tb_sensor is\n"));
    assert!(text.contains("    signal A : std_ulogic;\n    signal B : std_ulogic;\n"));
    assert!(text.contains("            2.0 ms\n"));
    assert!(text.ends_with("end architecture sim;\n"));
}

#[test]
fn test_custom_time_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "scope.csv", "t,CH1\n0,1\n1e-6,0\n");
    let out = csv2vhdl(&[&input, "--time-column", "t", "--time-unit", "us"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.contains("        1.0 us\n"));
}

#[test]
fn test_failures_exit_non_zero_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("tb.vhd");
    let output = output.to_str().unwrap();

    let missing = dir.path().join("missing.csv");
    let out = csv2vhdl(&[missing.to_str().unwrap(), "-o", output]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to open"));

    let bad_time = write_input(dir.path(), "bad.csv", "Time[s],A\n0.0,0\nlater,1\n");
    let out = csv2vhdl(&[&bad_time, "-o", output]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("line 3: invalid timestamp `later`"));

    let short_row = write_input(dir.path(), "short.csv", "Time[s],A,B\n0.0,0,1\n0.1,0\n");
    let out = csv2vhdl(&[&short_row, "-o", output]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("expected 3 columns, found 2"));

    assert!(!Path::new(output).exists());
}

#[test]
fn test_invalid_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "capture.csv", "Time[s],A\n0.0,0\n");
    assert!(!csv2vhdl(&[&input, "--time-unit", "min"]).status.success());
    assert!(!csv2vhdl(&[&input, "--delimiter", ";;"]).status.success());
    assert!(!csv2vhdl(&[]).status.success());
}
