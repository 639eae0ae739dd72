//! Builder orchestration tests

use espurna_build::{
    BuildEnvironment, Builder, CodegenOutcome, OutputMode, Re2c, StaticVersion, DISCLAIMER,
    BUILD_AND_COPY,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn firmware_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let espurna = dir.path().join("espurna");
    fs::create_dir_all(&espurna).unwrap();
    fs::write(espurna.join("espurna.h"), "#pragma once\n").unwrap();
    for name in ["main.cpp", "telnet.cpp", "wifi.cpp"] {
        fs::write(espurna.join(name), "// module\n").unwrap();
    }
    dir
}

fn builder_for(project: &TempDir) -> Builder {
    let env = BuildEnvironment::new(
        project.path(),
        project.path().join(".pio").join("build").join("nodemcu"),
        "nodemcu",
    );
    Builder::new(env, Box::new(StaticVersion::new("1.15.0")))
        .unwrap()
        .with_output(OutputMode::Quiet)
}

#[test]
fn test_setup_registers_substitution_and_copy_target() {
    let project = firmware_project();
    let mut builder = builder_for(&project);
    builder.setup().unwrap();

    let registry = builder.registry();
    assert_eq!(registry.rewrites().len(), 1);
    assert_eq!(registry.commands().len(), 1);
    assert_eq!(registry.copy_targets().len(), 1);
    assert_eq!(registry.aliases().len(), 1);

    let synthetic = builder.environment().single_source();
    assert_eq!(
        registry.rewrite(&project.path().join("espurna").join("main.cpp")),
        Some(synthetic.as_path())
    );
    assert_eq!(
        registry.rewrite(&project.path().join("espurna").join("telnet.cpp")),
        None
    );

    let command = &registry.commands()[0];
    assert_eq!(command.output, synthetic);
    assert_eq!(command.inputs.len(), 3);
}

#[test]
fn test_setup_twice_registers_once() {
    let project = firmware_project();
    let mut builder = builder_for(&project);
    builder.setup().unwrap();
    builder.setup().unwrap();

    let registry = builder.registry();
    assert_eq!(registry.rewrites().len(), 1);
    assert_eq!(registry.commands().len(), 1);
    assert_eq!(registry.copy_targets().len(), 1);
    assert_eq!(registry.aliases().len(), 1);
}

#[test]
fn test_setup_leaves_original_entry_point_untouched() {
    let project = firmware_project();
    let entry = project.path().join("espurna").join("main.cpp");
    let before = fs::read(&entry).unwrap();

    let mut builder = builder_for(&project);
    builder.setup().unwrap();

    assert_eq!(fs::read(&entry).unwrap(), before);
}

#[test]
fn test_aggregate_materializes_synthetic_source() {
    let project = firmware_project();
    let builder = builder_for(&project);

    let synthetic = builder.aggregate().unwrap();
    assert_eq!(synthetic, builder.environment().single_source());

    let content = fs::read_to_string(&synthetic).unwrap();
    assert!(content.starts_with(DISCLAIMER));
    assert_eq!(content.lines().count(), 5);

    let again = fs::read(builder.aggregate().unwrap()).unwrap();
    assert_eq!(content.as_bytes(), again.as_slice());
}

#[test]
fn test_copy_artifact_stores_firmware_at_destination() {
    let project = firmware_project();
    let mut builder = builder_for(&project);
    builder.setup().unwrap();

    let firmware = builder.environment().primary_artifact();
    fs::create_dir_all(firmware.parent().unwrap()).unwrap();
    fs::write(&firmware, b"\xe9firmware").unwrap();

    let destination = builder.copy_artifact().unwrap();
    assert_eq!(
        destination,
        project
            .path()
            .join("espurna-1.15.0")
            .join("espurna-1.15.0-nodemcu.bin")
    );
    assert_eq!(fs::read(&destination).unwrap(), b"\xe9firmware");
}

#[test]
fn test_copy_artifact_follows_alias_destination() {
    let project = firmware_project();
    let mut builder = builder_for(&project);
    builder.setup().unwrap();

    let alias = builder.registry().alias(BUILD_AND_COPY).unwrap();
    assert_eq!(alias, builder.registry().copy_targets()[0].destination);
}

#[test]
fn test_run_codegen_continue_for_plain_targets() {
    let project = firmware_project();
    let builder = builder_for(&project);
    let re2c = Re2c::new();

    let outcome = builder
        .run_codegen(&[Path::new("firmware.bin").to_path_buf()], &re2c)
        .unwrap();
    assert_eq!(outcome, CodegenOutcome::Continue);
}
