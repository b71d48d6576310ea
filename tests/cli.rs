#![cfg(feature = "cli")]

extern crate icogen;

use icogen::{ClipboardArt, PixelFormat};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

//===========================================================================//

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("icogen-cli-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn run_icogen(dir: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_icogen"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .output()
        .unwrap()
}

fn render_all(sizes: &[u32], format: PixelFormat) -> Vec<u8> {
    let images: Vec<_> = sizes
        .iter()
        .map(|&size| ClipboardArt::Scaled.render(size, format).unwrap())
        .collect();
    icogen::encode(&images).unwrap()
}

//===========================================================================//

#[test]
fn generate_with_defaults() {
    let dir = scratch_dir("defaults");
    let output = run_icogen(&dir, &[]);
    assert!(output.status.success(), "{:?}", output);
    let written = fs::read(dir.join("icon.ico")).unwrap();
    let expected = render_all(&[16, 32, 48], PixelFormat::Rgba);
    assert_eq!(written, expected);
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("Generated icon.ico ({} bytes)", expected.len()).as_str(),
            "Contains: 16x16, 32x32, 48x48 pixels (32-bit BGRA)",
        ]
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn generate_subcommand_at_24_bpp() {
    let dir = scratch_dir("rgb");
    let output = run_icogen(
        &dir,
        &["generate", "-o", "small.ico", "-s", "32", "-d", "24"],
    );
    assert!(output.status.success(), "{:?}", output);
    let written = fs::read(dir.join("small.ico")).unwrap();
    let expected = render_all(&[32], PixelFormat::Rgb);
    assert_eq!(written, expected);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(&format!(
        "Generated small.ico ({} bytes)",
        expected.len()
    )));
    assert!(stdout.contains("Contains: 32x32 pixels (24-bit BGR)\n"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn generate_rejects_oversized_icon() {
    let dir = scratch_dir("oversized");
    let output = run_icogen(&dir, &["generate", "-s", "100000"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.join("icon.ico").exists());
    let output = run_icogen(&dir, &["generate", "-s", "4294967295"]);
    assert_eq!(output.status.code(), Some(1));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn list_generated_file() {
    let dir = scratch_dir("list");
    let output = run_icogen(&dir, &["generate", "-s", "16,256"]);
    assert!(output.status.success(), "{:?}", output);
    let output = run_icogen(&dir, &["list", "icon.ico"]);
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("    0: 16x16 BMP, 32 bpp"));
    assert!(lines[1].starts_with("    1: 256x256 BMP, 32 bpp"));
    fs::remove_dir_all(&dir).unwrap();
}

//===========================================================================//
