use json_path_extract as jpx;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn catalog() -> Value {
    json!({
        "store": {
            "book": [
                {"category": "reference", "author": "Nigel Rees", "price": 8.95},
                {"category": "fiction", "author": "Evelyn Waugh", "price": 12.99},
                {"category": "fiction", "author": "Herman Melville", "price": 8.99},
                {"category": "fiction", "author": "J. R. R. Tolkien", "price": 22.99}
            ],
            "bicycle": {"color": "red", "price": 19.95}
        }
    })
}

fn query(path: &str) -> Vec<Value> {
    let doc = catalog();
    jpx::extract(&doc, path).unwrap().into_iter().cloned().collect()
}

fn authors(books: &[Value]) -> Vec<&str> {
    books.iter().filter_map(|b| b["author"].as_str()).collect()
}

#[test]
fn test_book_authors() {
    assert_eq!(
        query("$.store.book[*].author"),
        vec![
            json!("Nigel Rees"),
            json!("Evelyn Waugh"),
            json!("Herman Melville"),
            json!("J. R. R. Tolkien"),
        ]
    );
}

#[test]
fn test_all_authors_match_book_authors() {
    assert_eq!(query("$..author"), query("$.store.book[*].author"));
}

#[test]
fn test_store_child() {
    assert_eq!(query("$.store"), vec![catalog()["store"].clone()]);
}

#[test]
fn test_index_and_slice() {
    assert_eq!(query("$.store.book[2].price"), vec![json!(8.99)]);
    assert_eq!(query("$.store.book[1:3].price"), vec![json!(12.99), json!(8.99)]);
    assert_eq!(query("$.store.book[-1].author"), vec![json!("J. R. R. Tolkien")]);
}

#[test]
fn test_all_prices_in_document_order() {
    assert_eq!(
        query("$..price"),
        vec![json!(8.95), json!(12.99), json!(8.99), json!(22.99), json!(19.95)]
    );
}

#[test]
fn test_filter_contains() {
    let single = query("$.store.book[?(@.author contains 'Tolkien')]");
    let double = query("$.store.book[?(@.author contains \"Tolkien\")]");
    assert_eq!(authors(&single), vec!["J. R. R. Tolkien"]);
    assert_eq!(single, double);
}

#[test]
fn test_filter_equality() {
    let out = query("$.store.book[?(@.category == \"reference\")]");
    assert_eq!(authors(&out), vec!["Nigel Rees"]);
}

#[test]
fn test_filter_numeric_comparison() {
    let out = query("$.store.book[?(@.price < 10)]");
    assert_eq!(authors(&out), vec!["Nigel Rees", "Herman Melville"]);
}

#[test]
fn test_filter_and() {
    let out = query("$.store.book[?(@.price < 10 && @.category == 'reference')]");
    assert_eq!(authors(&out), vec!["Nigel Rees"]);
}

#[test]
fn test_filter_or() {
    let out = query("$.store.book[?(@.price > 500 || @.category == 'fiction')]");
    assert_eq!(
        authors(&out),
        vec!["Evelyn Waugh", "Herman Melville", "J. R. R. Tolkien"]
    );
}

#[test]
fn test_filter_then_field() {
    assert_eq!(
        query("$..book[?(@.price >= 12.99)].author"),
        vec![json!("Evelyn Waugh"), json!("J. R. R. Tolkien")]
    );
}

#[test]
fn test_no_match_is_empty() {
    assert!(query("$.store.magazine").is_empty());
    assert!(query("$.store.book[?(@.price > 100)]").is_empty());
}

#[test]
fn test_from_json_clones_matches() {
    let out = jpx::from_json(r#"{"a":[0,1,2,3,4]}"#, "$.a[1:4]").unwrap();
    assert_eq!(out, json!([1, 2, 3]));
}
