use std::process::{Command, Output};

fn run_glyphmesh(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_glyphmesh"))
        .args(args)
        .output()
        .expect("run glyphmesh")
}

#[test]
fn help_lists_mesh_options() {
    let out = run_glyphmesh(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for flag in ["--font", "--text", "--extrude", "--bezier-steps", "--grid-pitch"] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
    assert!(stdout.contains("Bevel subdivisions"));
}

#[test]
fn missing_font_file_fails() {
    let out = run_glyphmesh(&["--font", "/nonexistent/font.ttf", "--text", "A"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("/nonexistent/font.ttf"), "stderr: {stderr}");
}

#[test]
fn text_is_required() {
    let out = run_glyphmesh(&["--font", "/nonexistent/font.ttf"]);
    assert!(!out.status.success());
}
