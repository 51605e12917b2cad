//! Classify a batch of error replies, one of them with a null id
//!
//! Run with `cargo run --example classify_batch_reply`

use jrpc::{parse_reply, Envelope};

const REPLIES: &str = r#"[
    {"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": null},
    {"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": "1"},
    {"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": "1"}
]"#;

fn main() {
    let parsed = parse_reply(REPLIES);
    println!("batch: {}", parsed.is_batch());

    for (i, env) in parsed.into_vec().iter().enumerate() {
        match env {
            Envelope::Error(reply) => {
                println!("[{}] {} id={} -> {}", i, env.kind(), reply.id, reply.error);
            }
            Envelope::Invalid(inv) => {
                println!("[{}] rejected: {} ({:?})", i, inv.error, inv.error.data);
            }
            other => println!("[{}] unexpected {}", i, other.kind()),
        }
    }
}
