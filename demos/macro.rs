//! Using the kvs! macro to build trees in code.
//!
//! Run with: cargo run --example macro

use kvs_format::{kvs, to_string, to_string_pretty};

fn main() {
    let numbers = kvs!([1, 2, 3, 4, 5]);
    let mixed = kvs!([1, "two", true]);

    println!("Sequences:");
    println!("  Numbers: {}", to_string(&numbers));
    println!("  Mixed:   {}\n", to_string(&mixed));

    let user = kvs!({
        "id" => 123,
        "name" => "Alice",
        "email" => "alice@example.com",
        "active" => true
    });

    println!("Labeled entries:");
    println!("{}\n", to_string_pretty(&user));

    let mut config = kvs!({
        "app" => {
            "name" => "MyApp",
            "version" => "1.0.0"
        },
        "database" => {
            "host" => "localhost",
            "port" => 5432,
            "name" => "mydb"
        },
        "features" => ["auth", "logging", "metrics"],
        "debug" => true
    });

    println!("Nested structures:");
    println!("{}\n", to_string_pretty(&config));

    // Macro output is an ordinary tree
    for (id, status) in [(1, "active"), (2, "pending"), (3, "completed")] {
        let item = kvs!({ "id" => id, "status" => status });
        if let Some(items) = config.get_or_create(&["items"]) {
            items.add(item);
        }
    }

    println!("Accessing values:");
    println!("  App name: {}", config.get(&["app", "name"]));
    println!("  Features: {}", config.get_list(&["features"]).len());
    println!("  Item 2:   {}", config.get(&["items", "1", "status"]));
}
