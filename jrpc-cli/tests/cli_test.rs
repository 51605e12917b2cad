//! End-to-end tests running the `jrpc` binary

use std::process::{Command, Output};

fn jrpc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jrpc"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .output()
        .expect("failed to run jrpc")
}

#[test]
fn test_json_logs_stay_off_stdout() {
    let out = jrpc(&[
        "--json-logs",
        "--log-level",
        "debug",
        "parse",
        r#"{"jsonrpc":"2.0","method":"update","id":123}"#,
    ]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "{\"kind\":\"request\",\"id\":123,\"method\":\"update\"}\n"
    );
    assert!(String::from_utf8_lossy(&out.stderr).contains("parsed input"));
}

#[test]
fn test_built_message_pipes_into_batch() {
    let notify = jrpc(&["--json-logs", "--log-level", "trace", "notify", "a"]);
    assert!(notify.status.success());
    let message = String::from_utf8_lossy(&notify.stdout).trim().to_string();
    assert_eq!(message, r#"{"jsonrpc":"2.0","method":"a"}"#);

    let batch = jrpc(&["batch", &message]);
    assert_eq!(
        String::from_utf8_lossy(&batch.stdout).trim(),
        r#"[{"jsonrpc":"2.0","method":"a"}]"#
    );
}

#[test]
fn test_invalid_input_exits_non_zero() {
    let out = jrpc(&["parse", r#"{"foo":"boo"}"#]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with(r#"{"kind":"invalid""#));
}

#[test]
fn test_wide_integer_id() {
    let out = jrpc(&["parse", r#"{"jsonrpc":"2.0","method":"m","id":18446744073709551615}"#]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        r#"{"kind":"request","id":18446744073709551615,"method":"m"}"#
    );
}
