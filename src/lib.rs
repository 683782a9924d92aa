//! Select values out of a JSON document with a compact, JSONPath-like path.
//!
//! ```
//! use serde_json::json;
//!
//! let doc = json!({"store": {"book": [
//!     {"author": "Nigel Rees", "price": 8.95},
//!     {"author": "J. R. R. Tolkien", "price": 22.99}
//! ]}});
//! let cheap = json_path_extract::extract(&doc, "$.store.book[?(@.price < 10)].author").unwrap();
//! assert_eq!(cheap, vec![&json!("Nigel Rees")]);
//! ```
//!
//! Supported syntax: `$`, `.field`, `..field`, `..`, `[*]`, `[index]`,
//! `['key']`, `[start:end]` and `[?(<predicate>)]`, where a predicate combines
//! `@.field` comparisons (`== != < <= > >=`) and `contains` tests with `&&`
//! and `||`, evaluated left to right.

pub mod engine;
pub mod errors;
pub mod lexer;
mod comparison;
mod executor;
mod filter;
mod parser;

pub use engine::{first, from_json, or_default, unique};
pub use errors::{Error, PathSyntaxError, Result};
pub use executor::extract;
pub use filter::evaluate_filter;
pub use lexer::{tokenize, Token};
