use kvs_format::{
    from_reader, parse, parse_strict, to_string, to_string_pretty, to_string_with_options,
    Entry, Error, KvsOptions, Tree,
};

fn user_record() -> Tree {
    let mut tree = Tree::new();
    tree.set("123", &["id"])
        .set("Alice", &["name"])
        .set("true", &["active"]);
    tree.get_or_create(&["tags"])
        .unwrap()
        .add_all(["admin", "developer"]);
    tree
}

#[test]
fn test_simple_record() {
    let tree = user_record();

    let text = to_string(&tree);
    println!("User KVS: {}", text);
    assert_eq!(text, "id=123;name=Alice;active=true;tags[0=admin;1=developer;]");

    let back = parse(&text);
    assert_eq!(tree, back);
}

#[test]
fn test_nested_record() {
    let mut order = Tree::new();
    order.set("12345", &["order_id"]);
    order.set(user_record(), &["customer"]);
    for (sku, price) in [("WIDGET-001", "29.99"), ("GADGET-002", "49.99")] {
        let mut item = Tree::new();
        item.set(sku, &["sku"]).set(price, &["price"]);
        order.get_or_create(&["items"]).unwrap().add(item);
    }

    let text = to_string_pretty(&order);
    println!("Order KVS:\n{}", text);

    let back = parse(&text);
    assert_eq!(order, back);
    assert_eq!(back.get(&["customer", "tags", "1"]), "developer");
    assert_eq!(back.get(&["items", "1", "sku"]), "GADGET-002");
    assert_eq!(back.get_or(0.0f64, &["items", "0", "price"]), 29.99);
}

#[test]
fn test_values_with_semicolons_round_trip() {
    let mut tree = Tree::new();
    tree.set("a;b", &["one"])
        .set(";", &["lead"])
        .set(";;;", &["many"])
        .set("end;", &["tail"]);

    let text = to_string(&tree);
    assert_eq!(text, "one=a;;b;lead=;;;many=;;;;;;;tail=end;;;");

    let back = parse(&text);
    for key in ["one", "lead", "many", "tail"] {
        assert_eq!(back.get(&[key]), tree.get(&[key]), "key {key}");
    }
}

#[test]
fn test_values_keep_whitespace_and_equals() {
    let tree = parse("expr= a = b ;path=/usr/local;");
    assert_eq!(tree.get(&["expr"]), " a = b ");
    assert_eq!(tree.get(&["path"]), "/usr/local");
    assert_eq!(parse(&to_string(&tree)), tree);
}

#[test]
fn test_unicode_text() {
    let tree = parse("greeting=héllo wörld 👋;名前=太郎;");
    assert_eq!(tree.get(&["greeting"]), "héllo wörld 👋");
    assert_eq!(tree.get(&["名前"]), "太郎");
}

#[test]
fn test_merge_documents() {
    let mut config = parse("server[host=localhost;port=80;]debug=false;");
    let overrides = parse("server[port=8080;tls[cert=a.pem;]]debug=true;");
    config.merge(overrides);

    assert_eq!(
        to_string(&config),
        "server[host=localhost;port=8080;tls[cert=a.pem;]]debug=true;"
    );
}

#[test]
fn test_get_or_create_then_serialize() {
    let mut tree = Tree::new();
    tree.get_or_create(&["a", "b", "c"]);

    assert!(tree.exists(&["a", "b", "c"]));
    assert_eq!(tree.get(&["a", "b", "c"]), "");
    assert_eq!(to_string(&tree), "a[b[c[]]]");
}

#[test]
fn test_read_str_overlays_existing_tree() {
    let mut tree = parse("a=1;b[x=1;]c=3;");
    tree.read_str("b[y=2;]d=4;");

    // Top-level collisions are replaced, not merged.
    assert_eq!(to_string(&tree), "a=1;b[y=2;]c=3;d=4;");
}

#[test]
fn test_first_key_and_value() {
    let tree = parse("z[inner=1;]a=2;");
    assert_eq!(tree.first_key(), "z");
    assert!(tree.first_value().is_child());
}

#[test]
fn test_keys_and_values_are_snapshots() {
    let mut tree = parse("a=1;b=2;");
    let keys = tree.keys();
    let values = tree.values();
    tree.clear();

    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(values, vec![Entry::from("1"), Entry::from("2")]);
    assert!(tree.is_empty());
}

#[test]
fn test_wrapped_document_as_value() {
    let child = parse("x=1;y=2;");
    let embedded = to_string_with_options(&child, &KvsOptions::new().with_wrap("child"));

    let mut parent = parse("name=parent;");
    parent.read_str(&embedded);
    assert_eq!(parent.get(&["child", "y"]), "2");
}

#[test]
fn test_from_reader_is_lenient() {
    let tree = from_reader("a=1;b[c=2;".as_bytes()).unwrap();
    assert_eq!(tree.get(&["b", "c"]), "2");
}

#[test]
fn test_strict_error_positions() {
    let err = parse_strict("a=1;\nb[\n  c=2;\n").unwrap_err();
    assert_eq!(err, Error::unterminated_struct(4, 1, 1));
    assert_eq!(err.position(), Some((4, 1)));
}

#[test]
fn test_serde_json_bridge() {
    let tree = parse("name=Alice;tags[=a;=b;]");
    let json = serde_json::to_string(&tree).unwrap();
    assert_eq!(json, r#"{"name":"Alice","tags":{"0":"a","1":"b"}}"#);

    let back: Tree = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn test_serde_json_scalars_become_text() {
    let tree: Tree =
        serde_json::from_str(r#"{"n":42,"f":1.5,"b":true,"z":null,"list":["x",{"k":"v"}]}"#)
            .unwrap();

    assert_eq!(to_string(&tree), "n=42;f=1.5;b=true;z=;list[0=x;1[k=v;]]");
}

#[test]
fn test_serde_json_rejects_top_level_text() {
    assert!(serde_json::from_str::<Tree>(r#""just text""#).is_err());
}

#[test]
fn test_debug_snapshot_json() {
    let tree = parse("a=1;b[c=2;]");
    let value = serde_json::to_value(tree.debug()).unwrap();
    assert_eq!(value, serde_json::json!({"a": "1", "b": {"c": "2"}}));
}
