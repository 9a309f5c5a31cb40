mod common;

use clap::Parser;
use common::synthetic_image::{ScratchDir, checkerboard_rgb};
use pixelshift::cli::{CliArgs, run};
use pixelshift::io::load_rgb;
use std::process::ExitCode;

fn parse(argv: &[&str]) -> CliArgs {
    let mut full = vec!["pixelshift"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).unwrap()
}

#[test]
fn encrypt_then_decrypt_restores_png() {
    let scratch = ScratchDir::new("cli_round_trip");
    let original = checkerboard_rgb(32, 20, 5);
    let input = scratch.path("input.png");
    let locked = scratch.path("locked.png");
    let restored = scratch.path("restored.png");
    original.save(&input).unwrap();

    let encrypt = parse(&[
        "-i", input.to_str().unwrap(),
        "-k", "123",
        "-o", locked.to_str().unwrap(),
        "--verify",
    ]);
    assert_eq!(run(encrypt), ExitCode::SUCCESS);
    assert_ne!(load_rgb(&locked).unwrap().pixels, original);

    let decrypt = parse(&[
        "-i", locked.to_str().unwrap(),
        "-k", "123",
        "--decrypt",
        "-o", restored.to_str().unwrap(),
    ]);
    assert_eq!(run(decrypt), ExitCode::SUCCESS);
    assert_eq!(load_rgb(&restored).unwrap().pixels, original);
}

#[test]
fn verify_rejects_lossy_output() {
    let scratch = ScratchDir::new("cli_verify_jpeg");
    let input = scratch.path("input.png");
    let locked = scratch.path("locked.jpg");
    checkerboard_rgb(32, 32, 3).save(&input).unwrap();

    let args = parse(&[
        "-i", input.to_str().unwrap(),
        "-k", "77",
        "-o", locked.to_str().unwrap(),
        "-q", "50",
        "--verify",
    ]);
    assert_eq!(run(args), ExitCode::FAILURE);
    // The file is written; only the check fails.
    assert!(locked.exists());
}

#[test]
fn verify_accepts_lossless_decrypt() {
    let scratch = ScratchDir::new("cli_verify_bmp");
    let input = scratch.path("input.bmp");
    checkerboard_rgb(12, 9, 2).save(&input).unwrap();

    let args = parse(&["-i", input.to_str().unwrap(), "-k", "300", "-d", "-f", "bmp", "--verify"]);
    assert_eq!(run(args), ExitCode::SUCCESS);
    assert!(scratch.path("input_decrypted.bmp").exists());
}

#[test]
fn mismatched_extension_still_writes_requested_format() {
    let scratch = ScratchDir::new("cli_mismatch");
    let input = scratch.path("input.png");
    let output = scratch.path("out.jpg");
    checkerboard_rgb(6, 6, 2).save(&input).unwrap();

    let args = parse(&[
        "-i", input.to_str().unwrap(),
        "-k", "5",
        "-f", "png",
        "-o", output.to_str().unwrap(),
    ]);
    assert_eq!(run(args), ExitCode::SUCCESS);
    assert_eq!(load_rgb(&output).unwrap().info.format_label(), "PNG");
}

#[test]
fn default_output_name_uses_direction_and_format() {
    let scratch = ScratchDir::new("cli_default_name");
    let input = scratch.path("cli_default.png");
    checkerboard_rgb(4, 4, 1).save(&input).unwrap();

    let args = parse(&["-i", input.to_str().unwrap(), "-k", "9", "-f", "bmp"]);
    assert_eq!(run(args), ExitCode::SUCCESS);

    let expected = input.with_file_name("cli_default_encrypted.bmp");
    let loaded = load_rgb(&expected).unwrap();
    assert_eq!(loaded.info.format_label(), "BMP");
}

#[test]
fn invalid_key_fails_without_writing() {
    let scratch = ScratchDir::new("cli_bad_key");
    let input = scratch.path("input.png");
    let output = scratch.path("out.png");
    checkerboard_rgb(4, 4, 1).save(&input).unwrap();

    for key in ["0", "-5", "abc"] {
        let args = parse(&["-i", input.to_str().unwrap(), "-k", key, "-o", output.to_str().unwrap()]);
        assert_eq!(run(args), ExitCode::FAILURE);
    }
    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let scratch = ScratchDir::new("cli_missing_input");
    let args = parse(&["-i", scratch.path("nope.png").to_str().unwrap(), "-k", "5"]);
    assert_eq!(run(args), ExitCode::FAILURE);
}

#[test]
fn scratch_dir_is_removed_on_drop() {
    let scratch = ScratchDir::new("cli_scratch_cleanup");
    let root = scratch.root().to_path_buf();
    checkerboard_rgb(2, 2, 1).save(scratch.path("leftover.png")).unwrap();
    drop(scratch);
    assert!(!root.exists());
}
