use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn print_config_names_the_env_override() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("custom.xml");

    let me = assert_cmd::cargo::cargo_bin!("archive_file");
    let out = Command::new(me)
        .env("ARCHIVE_FILE_CONFIG", &cfg_path)
        .arg("--print-config")
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "binary should succeed with --print-config");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("custom.xml"), "stdout: {stdout}");
    assert!(!cfg_path.exists(), "--print-config must not write anything");
}

#[test]
fn init_config_writes_a_loadable_template_once() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg_path = base.join("conf").join("config.xml");
    let me = assert_cmd::cargo::cargo_bin!("archive_file");

    let first = Command::new(me)
        .env("ARCHIVE_FILE_CONFIG", &cfg_path)
        .arg("--init-config")
        .output()
        .expect("spawn binary");
    assert!(first.status.success(), "stderr: {}", String::from_utf8_lossy(&first.stderr));
    let cfg = archive_file::load_config_from_xml_path(&cfg_path).expect("template parses");
    assert_eq!(cfg, archive_file::Config::default());

    let second = Command::new(me)
        .env("ARCHIVE_FILE_CONFIG", &cfg_path)
        .arg("--init-config")
        .output()
        .expect("spawn binary");
    assert!(!second.status.success(), "existing config must not be overwritten");
}

#[test]
fn config_file_supplies_destination_and_gzip() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let archive_dir = base.join("vault");
    let cfg_path = base.join("config.xml");
    fs::write(
        &cfg_path,
        format!(
            "<config>\n  <archive_dir>{}</archive_dir>\n  <gzip>true</gzip>\n</config>",
            archive_dir.display()
        ),
    )
    .unwrap();
    let input = base.join("notes.md");
    fs::write(&input, "# notes").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("archive_file");
    let out = Command::new(me)
        .env("ARCHIVE_FILE_CONFIG", &cfg_path)
        .arg(&input)
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let produced: Vec<String> = fs::read_dir(&archive_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(produced.len(), 1, "{produced:?}");
    assert!(produced[0].starts_with("notes__") && produced[0].ends_with(".md.gz"), "{produced:?}");
    assert!(!input.exists());
}
