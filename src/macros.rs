/// Builds a [`Tree`](crate::Tree) from a literal description.
///
/// - `{ "key" => value, ... }` creates labeled entries
/// - `[ value, ... ]` creates auto-keyed entries (`"0"`, `"1"`, ...)
/// - any other value is stored as a leaf using its `Display` text
///
/// # Examples
///
/// ```rust
/// use kvs_format::kvs;
///
/// let tree = kvs!({
///     "name" => "Alice",
///     "age" => 30,
///     "tags" => ["admin", "eng"],
///     "address" => { "city" => "Cape Town" }
/// });
///
/// assert_eq!(tree.get(&["age"]), "30");
/// assert_eq!(tree.get(&["tags", "1"]), "eng");
/// assert_eq!(tree.get(&["address", "city"]), "Cape Town");
/// ```
#[macro_export]
macro_rules! kvs {
    (@entry { $($inner:tt)* }) => {
        $crate::Entry::Child($crate::kvs!({ $($inner)* }))
    };

    (@entry [ $($inner:tt)* ]) => {
        $crate::Entry::Child($crate::kvs!([ $($inner)* ]))
    };

    (@entry $value:expr) => {
        $crate::Entry::Leaf(::std::string::ToString::to_string(&$value))
    };

    // Labeled entries
    ({ $($key:literal => $value:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut tree = $crate::Tree::new();
        $(
            tree.insert(::std::string::ToString::to_string(&$key), $crate::kvs!(@entry $value));
        )*
        tree
    }};

    // Unlabeled entries
    ([ $($value:tt),* $(,)? ]) => {{
        #[allow(unused_mut)]
        let mut tree = $crate::Tree::new();
        $(
            tree.add($crate::kvs!(@entry $value));
        )*
        tree
    }};

    // Bare labeled entries, for `kvs! { ... }`
    ($($key:literal => $value:tt),* $(,)?) => {
        $crate::kvs!({ $($key => $value),* })
    };
}
