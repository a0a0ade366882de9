//! Basic KVS parsing and serialization.
//!
//! Run with: cargo run --example simple

use kvs_format::{parse, to_string, to_string_pretty};

fn main() {
    let text = "name=Alice Johnson;email=alice@example.com;roles[=admin;=developer;]";

    // Parse into a tree
    let mut user = parse(text);
    println!("Name:  {}", user.get(&["name"]));
    println!("Roles: {:?}\n", user.get_list(&["roles"]));

    // Change it
    user.set("42", &["id"]);
    user.set("Cape Town", &["address", "city"]);
    if let Some(roles) = user.get_or_create(&["roles"]) {
        roles.add("ops");
    }

    // Serialize back
    let compact = to_string(&user);
    println!("Compact:\n{}\n", compact);
    println!("Pretty:\n{}\n", to_string_pretty(&user));

    let back = parse(&compact);
    assert_eq!(user, back);
    println!("✓ Round-trip successful");
}
