//! Build one of each message, batch them, and classify the batch again
//!
//! Run with `cargo run --example build_and_parse`

use jrpc::{
    build_batch, build_error, build_notification, build_request, build_request_auto,
    build_success, parse, ErrorObject,
};
use serde_json::json;

fn main() -> Result<(), ErrorObject> {
    let (auto_id, auto) = build_request_auto("status", None)?;
    println!("generated id: {}", auto_id);

    let messages = vec![
        build_request(1, "subtract", Some(json!([42, 23])))?,
        auto,
        build_notification("update", Some(json!([1, 2, 3, 4, 5])))?,
        build_success(1, 19)?,
        build_error("2", &ErrorObject::method_not_found(None))?,
    ];

    // Illegal ids are refused before anything reaches the wire
    if let Err(err) = build_request(json!({"not": "an id"}), "subtract", None) {
        println!("refused: {} ({:?})", err, err.data);
    }

    let batch = build_batch(&messages);
    println!("batch: {}", batch);

    for env in parse(&batch).into_vec() {
        println!(
            "{:<12} id={:<40} method={:?}",
            env.kind().as_str(),
            env.id().map(|id| id.to_string()).unwrap_or_default(),
            env.method()
        );
    }
    Ok(())
}
