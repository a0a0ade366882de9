//! Controlling output: pretty printing, indentation, wrapping, implicit keys, colour.
//!
//! Run with: cargo run --example custom_options

use kvs_format::{kvs, to_string_with_options, KvsOptions};

fn main() {
    let data = kvs!({
        "name" => "Widget",
        "sizes" => ["S", "M", "L"],
        "dims" => { "w" => 10, "h" => 4 }
    });

    let compact = KvsOptions::new();
    println!("Compact:\n{}\n", to_string_with_options(&data, &compact));

    let pretty = KvsOptions::pretty();
    println!("Pretty (tabs):\n{}\n", to_string_with_options(&data, &pretty));

    let spaces = KvsOptions::pretty().with_indent("  ");
    println!("Pretty (2 spaces):\n{}\n", to_string_with_options(&data, &spaces));

    let implicit = KvsOptions::new().with_implicit_keys(true);
    println!("Implicit keys:\n{}\n", to_string_with_options(&data, &implicit));

    let colourful = KvsOptions::colourful();
    println!("Colourful:\n{}\n", to_string_with_options(&data, &colourful));

    // Wrapped output can be read into another tree as a single entry
    let wrapped = KvsOptions::new().with_wrap("product");
    let text = to_string_with_options(&data, &wrapped);
    println!("Wrapped:\n{}\n", text);

    let mut catalog = kvs!({ "store" => "Main St" });
    catalog.read_str(&text);
    println!("Catalog product name: {}", catalog.get(&["product", "name"]));
}
