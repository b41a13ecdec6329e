use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::process::{Command, Stdio};
use std::time::Duration;

const BIN: &str = env!("CARGO_BIN_EXE_hpreserve");

#[test]
fn test_no_arguments() -> anyhow::Result<()> {
    let output = Command::new(BIN).output()?;
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8(output.stdout)?.contains("Invalid number of arguments"));
    assert!(!String::from_utf8(output.stderr)?.contains("Reserving Hugepages"));
    Ok(())
}

#[test]
fn test_too_many_arguments() -> anyhow::Result<()> {
    let output = Command::new(BIN).args(["4", "5"]).output()?;
    assert_eq!(output.status.code(), Some(3));
    assert!(!String::from_utf8(output.stderr)?.contains("Reserving Hugepages"));
    Ok(())
}

#[test]
fn test_zero_pages_rejected_by_kernel() -> anyhow::Result<()> {
    let args = ["0", "abc", "--", "-h", "--help", "-V", "--version", ""]
        .into_iter()
        .map(OsString::from)
        .chain([OsString::from_vec(b"x\xff".to_vec())]);
    for arg in args {
        let output = Command::new(BIN).arg(&arg).env("RUST_LOG", "info").output()?;
        let stderr = String::from_utf8(output.stderr)?;
        assert_eq!(output.status.code(), Some(1), "{:?}: {}", arg, stderr);
        assert!(!String::from_utf8(output.stdout)?.contains("Invalid number of arguments"));
        assert!(stderr.contains("=== Reserving Hugepages =="));
        assert!(stderr.contains("mmap of 0 bytes failed"));
        assert!(!stderr.contains("Waiting for interruption"));
    }
    Ok(())
}

#[test]
fn test_escape_only_counts_as_argument() -> anyhow::Result<()> {
    let output = Command::new(BIN).args(["--", "--"]).output()?;
    assert_eq!(output.status.code(), Some(3));
    Ok(())
}

#[test]
fn test_negative_pages_never_mapped() -> anyhow::Result<()> {
    let output = Command::new(BIN).arg("-1").env("RUST_LOG", "info").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(!String::from_utf8(output.stderr)?.contains("mmap of"));
    Ok(())
}

/// Requires at least 4 free 2 MiB huge pages.
#[test]
#[ignore]
fn test_interrupt_releases() -> anyhow::Result<()> {
    let child = Command::new(BIN)
        .arg("4")
        .env("RUST_LOG", "info")
        .stderr(Stdio::piped())
        .spawn()?;
    std::thread::sleep(Duration::from_millis(500));
    unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGINT) };
    let output = child.wait_with_output()?;
    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(output.status.code(), Some(0), "{}", stderr);
    assert!(stderr.contains("Number of hugepages: 4"));
    let free = stderr.find("Free memory").expect("no release message");
    let exited = stderr
        .find("========= EXITED =========")
        .expect("no exit message");
    assert!(free < exited);
    Ok(())
}
