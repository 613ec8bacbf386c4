use std::process::Command;

fn server_command(workdir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ambulance-server"));
    cmd.current_dir(workdir)
        .env_remove("AMBULANCE_API_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_named_config_exits_with_config_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let output = server_command(dir.path())
        .args(["--config", "absent.toml"])
        .output()
        .expect("run server binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file not found"), "stderr: {stderr}");
}

#[test]
fn server_failure_exits_non_zero() {
    let dir = tempfile::tempdir().expect("tmp dir");
    // Hold the port so the server cannot bind it
    let taken = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = taken.local_addr().unwrap().port();

    let output = server_command(dir.path())
        .env("AMBULANCE_API__SERVER__HOST", "127.0.0.1")
        .env("AMBULANCE_API__SERVER__PORT", port.to_string())
        .output()
        .expect("run server binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Server error"), "stderr: {stderr}");
    drop(taken);
}
