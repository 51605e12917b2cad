//! jrpc - build and classify JSON-RPC 2.0 messages from the command line
//!
//! # Usage
//!
//! ```bash
//! # Classify a message or batch (argument, @file, or stdin)
//! jrpc parse '{"jsonrpc":"2.0","method":"update","id":123}'
//! jrpc parse @replies.json --replies
//! cat batch.json | jrpc parse
//!
//! # Build messages
//! jrpc request update --id 123 --params '[1,2]'
//! jrpc notify heartbeat
//! jrpc success --id '"abc"' '{"ok":true}'
//! jrpc error --id 7 --code -32601 --message "Method not found"
//! jrpc batch "$(jrpc notify a)" "$(jrpc notify b)"
//! ```
//!
//! `parse` prints one JSON report per envelope and exits non-zero if any of
//! them is invalid. Builders print the message, or the error object on
//! stderr with a non-zero exit.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jrpc_core::{
    build_batch, build_error, build_notification, build_request, build_request_auto,
    build_success, error_with, parse, parse_reply, parse_request, rand_id, Envelope, ErrorObject,
    Id, Kind, ObservabilityConfig,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "jrpc", version, about = "Build and classify JSON-RPC 2.0 messages")]
struct Cli {
    /// Log filter directive (e.g. "debug", "jrpc_core=trace")
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Export spans to this OTLP collector (spans are recorded at the info level)
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", global = true)]
    otlp_endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a message or batch
    Parse {
        /// Message text, @path to read a file, or - (default) for stdin
        input: Option<String>,

        /// Only accept success and error replies
        #[arg(long, conflicts_with = "requests")]
        replies: bool,

        /// Only accept requests and notifications
        #[arg(long)]
        requests: bool,
    },
    /// Build a request (a random id is generated when --id is omitted)
    Request {
        method: String,
        #[arg(long, allow_negative_numbers = true)]
        id: Option<String>,
        /// Parameters as JSON
        #[arg(long)]
        params: Option<String>,
    },
    /// Build a notification
    Notify {
        method: String,
        /// Parameters as JSON
        #[arg(long)]
        params: Option<String>,
    },
    /// Build a success reply
    Success {
        #[arg(long, allow_negative_numbers = true)]
        id: Option<String>,
        /// Result as JSON
        result: String,
    },
    /// Build an error reply
    Error {
        #[arg(long, allow_negative_numbers = true)]
        id: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        code: i64,
        #[arg(long)]
        message: String,
        /// Error data as JSON
        #[arg(long)]
        data: Option<String>,
    },
    /// Join encoded messages into a batch
    Batch { fragments: Vec<String> },
    /// Print a random UUID v4
    RandId,
}

/// What a command wants written, and whether it failed
#[derive(Debug, Default)]
struct Output {
    stdout: Vec<String>,
    stderr: Vec<String>,
    failed: bool,
}

impl Output {
    fn line(text: String) -> Self {
        Self {
            stdout: vec![text],
            ..Default::default()
        }
    }

    fn built(result: std::result::Result<String, ErrorObject>) -> Result<Self> {
        match result {
            Ok(text) => Ok(Self::line(text)),
            Err(err) => Ok(Self {
                stderr: vec![serde_json::to_string(&err)?],
                failed: true,
                ..Default::default()
            }),
        }
    }
}

/// One line of `parse` output
#[derive(Debug, Serialize)]
struct Report<'a> {
    kind: Kind,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a ErrorObject>,
}

impl<'a> From<&'a Envelope> for Report<'a> {
    fn from(env: &'a Envelope) -> Self {
        Self {
            kind: env.kind(),
            id: env.id(),
            method: env.method(),
            params: env.params(),
            result: env.result(),
            error: env.error(),
        }
    }
}

/// Ids are taken as JSON when they parse (`7`, `"a"`, `true`), else as a bare string
fn id_arg(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Null,
        Some(s) => serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string())),
    }
}

fn json_arg(name: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("{} is not valid JSON: {}", name, raw))
}

fn read_input(input: Option<&str>, stdin: &mut impl Read) -> Result<String> {
    match input {
        None | Some("-") => {
            let mut text = String::new();
            stdin.read_to_string(&mut text).context("failed to read stdin")?;
            Ok(text)
        }
        Some(arg) => match arg.strip_prefix('@') {
            Some(path) => {
                std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
            }
            None => Ok(arg.to_string()),
        },
    }
}

fn execute(command: Command, stdin: &mut impl Read) -> Result<Output> {
    match command {
        Command::Parse {
            input,
            replies,
            requests,
        } => {
            let text = read_input(input.as_deref(), stdin)?;
            let parsed = if replies {
                parse_reply(&text)
            } else if requests {
                parse_request(&text)
            } else {
                parse(&text)
            };
            let envelopes = parsed.into_vec();
            let mut out = Output {
                failed: envelopes.iter().any(|env| !env.is_valid()),
                ..Default::default()
            };
            for env in &envelopes {
                out.stdout.push(serde_json::to_string(&Report::from(env))?);
            }
            tracing::debug!(count = envelopes.len(), failed = out.failed, "parsed input");
            Ok(out)
        }
        Command::Request { method, id, params } => {
            let params = params.map(|p| json_arg("--params", &p)).transpose()?;
            match id {
                Some(raw) => Output::built(build_request(id_arg(Some(&raw)), &method, params)),
                None => Output::built(build_request_auto(&method, params).map(|(_, text)| text)),
            }
        }
        Command::Notify { method, params } => {
            let params = params.map(|p| json_arg("--params", &p)).transpose()?;
            Output::built(build_notification(&method, params))
        }
        Command::Success { id, result } => {
            let result = json_arg("result", &result)?;
            Output::built(build_success(id_arg(id.as_deref()), result))
        }
        Command::Error {
            id,
            code,
            message,
            data,
        } => {
            let data = data.map(|d| json_arg("--data", &d)).transpose()?;
            let error = error_with(code, message, data);
            Output::built(build_error(id_arg(id.as_deref()), &error))
        }
        Command::Batch { fragments } => Ok(Output::line(build_batch(&fragments))),
        Command::RandId => Ok(Output::line(rand_id())),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = ObservabilityConfig::new("jrpc-cli")
        .with_log_level(cli.log_level.clone())
        .with_json_logs(cli.json_logs)
        .with_traces(cli.otlp_endpoint.is_some());
    if let Some(endpoint) = &cli.otlp_endpoint {
        config = config.with_endpoint(endpoint.clone());
    }
    jrpc_core::init_observability(config).map_err(|e| anyhow::anyhow!(e))?;

    let output = execute(cli.command, &mut std::io::stdin().lock());
    jrpc_core::shutdown_observability();
    let output = output?;

    for line in &output.stdout {
        println!("{}", line);
    }
    for line in &output.stderr {
        eprintln!("{}", line);
    }
    Ok(if output.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(args: &[&str], stdin: &str) -> Output {
        let cli = Cli::try_parse_from(std::iter::once("jrpc").chain(args.iter().copied())).unwrap();
        execute(cli.command, &mut stdin.as_bytes()).unwrap()
    }

    #[test]
    fn test_id_arg() {
        assert_eq!(id_arg(None), Value::Null);
        assert_eq!(id_arg(Some("7")), json!(7));
        assert_eq!(id_arg(Some("\"7\"")), json!("7"));
        assert_eq!(id_arg(Some("abc")), json!("abc"));
        assert_eq!(id_arg(Some("true")), json!(true));
    }

    #[test]
    fn test_parse_from_argument() {
        let out = run(&["parse", r#"{"jsonrpc":"2.0","method":"update","id":123}"#], "");
        assert!(!out.failed);
        assert_eq!(
            out.stdout,
            vec![r#"{"kind":"request","id":123,"method":"update"}"#.to_string()]
        );
    }

    #[test]
    fn test_parse_from_stdin_batch() {
        let out = run(
            &["parse"],
            r#"[{"jsonrpc":"2.0","method":"a"},{"foo":"boo"}]"#,
        );
        assert!(out.failed);
        assert_eq!(out.stdout.len(), 2);
        assert!(out.stdout[0].starts_with(r#"{"kind":"notification""#));
        assert!(out.stdout[1].starts_with(r#"{"kind":"invalid""#));
    }

    #[test]
    fn test_parse_replies_only() {
        let out = run(
            &["parse", "--replies", r#"{"jsonrpc":"2.0","method":"a","id":1}"#],
            "",
        );
        assert!(out.failed);
        assert!(out.stdout[0].contains("-32600"));
    }

    #[test]
    fn test_request_command() {
        let out = run(&["request", "update", "--id", "123", "--params", "[1,2]"], "");
        assert_eq!(
            out.stdout,
            vec![r#"{"jsonrpc":"2.0","method":"update","params":[1,2],"id":123}"#.to_string()]
        );
    }

    #[test]
    fn test_request_with_generated_id() {
        let out = run(&["request", "ping"], "");
        let env = jrpc_core::parse_message(&out.stdout[0]);
        assert_eq!(env.kind(), Kind::Request);
    }

    #[test]
    fn test_request_with_illegal_id() {
        let out = run(&["request", "update", "--id", "true"], "");
        assert!(out.failed);
        assert!(out.stdout.is_empty());
        assert!(out.stderr[0].contains("-32603"));
    }

    #[test]
    fn test_error_command_with_negative_code() {
        let out = run(
            &["error", "--id", "7", "--code", "-32601", "--message", "Method not found"],
            "",
        );
        assert_eq!(
            out.stdout,
            vec![
                r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":7}"#
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_success_requires_result() {
        let out = run(&["success", "--id", "1", "null"], "");
        assert!(out.failed);
    }

    #[test]
    fn test_invalid_params_json_is_an_error() {
        let cli = Cli::try_parse_from(["jrpc", "notify", "m", "--params", "{oops"]).unwrap();
        assert!(execute(cli.command, &mut "".as_bytes()).is_err());
    }

    #[test]
    fn test_batch_command() {
        let out = run(&["batch"], "");
        assert_eq!(out.stdout, vec!["[]".to_string()]);

        let out = run(&["batch", r#"{"a":1}"#, r#"{"b":2}"#], "");
        assert_eq!(out.stdout, vec![r#"[{"a":1},{"b":2}]"#.to_string()]);
    }

    #[test]
    fn test_read_input_literal() {
        let mut empty = "".as_bytes();
        assert_eq!(read_input(Some("abc"), &mut empty).unwrap(), "abc");
        let mut stdin = "from stdin".as_bytes();
        assert_eq!(read_input(Some("-"), &mut stdin).unwrap(), "from stdin");
        assert!(read_input(Some("@/definitely/not/here.json"), &mut empty).is_err());
    }
}
