//! Reading and editing nested values by key path.
//!
//! Run with: cargo run --example nested_paths

use kvs_format::{parse, to_string, to_string_pretty};

fn main() {
    let mut config = parse(
        "server[host=localhost;port=80;tls[enabled=false;]]\
         users[[name=alice;][name=bob;]]",
    );

    // Reads never fail; missing paths give empty text
    println!("host:      {}", config.get(&["server", "host"]));
    println!("port:      {}", config.get_or(0u16, &["server", "port"]));
    println!("timeout:   {:?}", config.get(&["server", "timeout"]));
    println!("tls on?    {}", config.get_or(false, &["server", "tls", "enabled"]));
    println!("user 1:    {}\n", config.get(&["users", "1", "name"]));

    // Writes create missing levels
    config.set("30", &["server", "timeout"]);
    config.set_default("8443", &["server", "tls", "port"]);
    config.set_default("ignored", &["server", "host"]);

    // Blocked by a leaf: nothing happens
    config.set("x", &["server", "host", "inner"]);

    // Removal keeps sibling order
    let removed = config.remove(&["server", "port"]);
    println!("removed port: {:?}", removed.map(|e| e.to_string()));

    // Overlay another document
    config.merge(parse("server[tls[enabled=true;]]log[level=debug;]"));

    println!("Result:\n{}\n", to_string_pretty(&config));
    println!("Compact: {}", to_string(&config));
}
