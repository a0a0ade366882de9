//! Walking entries at runtime and converting through serde.
//!
//! Run with: cargo run --example dynamic_values

use kvs_format::{parse, to_string, Entry, Tree};
use std::error::Error;

fn print_tree(tree: &Tree, depth: usize) {
    for (key, entry) in tree {
        let indent = "  ".repeat(depth);
        match entry {
            Entry::Leaf(text) => println!("{indent}{key} = {text:?}"),
            Entry::Child(child) => {
                println!("{indent}{key}:");
                print_tree(child, depth + 1);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = parse("host=localhost;port=8080;features[=auth;=logging;=metrics;]debug=true;");

    println!("Entries:");
    print_tree(&config, 1);
    println!();

    // Typed reads
    let port: Option<u16> = config.get_parsed(&["port"]);
    let debug = config.get_or(false, &["debug"]);
    println!("port={port:?} debug={debug}");
    println!("features map: {:?}\n", config.get_map(&["features"]));

    // Tree -> JSON
    let json = serde_json::to_string_pretty(&config)?;
    println!("As JSON:\n{json}\n");

    // JSON -> Tree; scalars become text, arrays become auto-keyed children
    let from_json: Tree =
        serde_json::from_str(r#"{"id": 7, "roles": ["admin", "dev"], "manager": null}"#)?;
    println!("From JSON: {}", to_string(&from_json));

    // A detached snapshot for logging
    println!("Snapshot:\n{}", config.debug());

    Ok(())
}
