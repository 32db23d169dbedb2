use std::fs;
use std::io::{self, Write};
use std::process::Command;
use std::sync::{Arc, Mutex};

use archive_file::{ArchiveRequest, archive};
use tempfile::tempdir;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::layer::SubscriberExt;

/// A simple writer that appends written bytes into a shared Vec<u8>.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn pipeline_emits_structured_completion_event() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new("info"))
        .with(tsfmt::layer().with_writer(make_writer).with_ansi(false).compact());

    let td = tempdir().unwrap();
    let input = td.path().join("events.log");
    fs::write(&input, "e").unwrap();

    // Scoped so no global subscriber is installed for other tests.
    let dispatch = tracing::Dispatch::new(subscriber);
    tracing::dispatcher::with_default(&dispatch, || {
        archive(&ArchiveRequest::new(&input).destination(td.path().join("out")))
            .expect("archive should succeed");
    });

    let contents = String::from_utf8_lossy(&buf.lock().unwrap()).to_string();
    assert!(contents.contains("Archive completed"), "captured: {contents}");
    assert!(contents.contains("Created destination directory"), "captured: {contents}");
    assert!(contents.contains("compressed=false"), "captured: {contents}");
}

#[test]
fn log_file_receives_json_lines() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let input = base.join("a.txt");
    fs::write(&input, "x").unwrap();
    let log_path = base.join("logs").join("archive_file.log");

    let me = assert_cmd::cargo::cargo_bin!("archive_file");
    let out = Command::new(me)
        .current_dir(&base)
        .env("ARCHIVE_FILE_CONFIG", base.join("absent.xml"))
        .args(["--log-level", "info", "--json", "--log-file"])
        .arg(&log_path)
        .arg("a.txt")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let logged = fs::read_to_string(&log_path).expect("log file written");
    let completion = logged
        .lines()
        .find(|l| l.contains("Archive completed"))
        .unwrap_or_else(|| panic!("no completion line in: {logged}"));
    let v: serde_json::Value = serde_json::from_str(completion).expect("json log line");
    assert_eq!(v["level"], "INFO");
    assert_eq!(v["fields"]["dry_run"], false);
}

#[test]
fn quiet_level_keeps_stderr_clean_on_success() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("b.txt"), "y").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("archive_file");
    let out = Command::new(me)
        .current_dir(td.path())
        .env("ARCHIVE_FILE_CONFIG", td.path().join("absent.xml"))
        .args(["--log-level", "quiet", "b.txt"])
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}
