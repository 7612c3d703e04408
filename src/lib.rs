//! This crate reads `.bib` files entry by entry in pure, safe rust,
//! surviving malformed entries instead of giving up on the whole file.
//!
//! `.bib` files are popular in reference management since many resources
//! allow to export metadata in a BibTeχ or BibLaTeχ file. One entry
//! in such a file can look like this:
//!
//! ```tex
//! @book{DBLP:books/aw/Knuth73a,
//!     author    = {Donald E. Knuth},
//!     title     = {The Art of Computer Programming, Volume {I:} Fundamental Algorithms,
//!                  2nd Edition},
//!     publisher = {Addison-Wesley},
//!     year      = {1973},
//! }
//! ```
//!
//! In this example, we call `book` the `kind` of the entry and
//! `DBLP:books/aw/Knuth73a` its `key`. Then we have a sequence of fields with
//! `name` (like `year`) and `data` (like `1973`). Field data is either enclosed
//! in `{curly braces}` or `"double quotes"`; nested braces are kept verbatim,
//! line breaks are flattened into single spaces. `%` starts a comment.
//! String macros, `#` concatenation and bare numbers are not supported.
//!
//! The source is read as a stream, one character at a time. Whenever an entry
//! turns out to be malformed, the parser resynchronizes at the next entry
//! (or, inside an entry, at the next field) and reports the entry as skipped:
//!
//! ```rust
//! use bibstream::{ParseOutcome, Parser};
//! use std::str::FromStr;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut p = Parser::from_str("junk @book{tolkien1937, author = {J. R. R. Tolkien}}")?;
//!     for outcome in p.iter() {
//!         match outcome {
//!             ParseOutcome::Record(entry) => {
//!                 println!("type = {}", entry.kind);
//!                 println!("key = {}", entry.key);
//!                 for (name, data) in entry.fields.iter() {
//!                     println!("\t{}\t= {}", name, data);
//!                 }
//!             }
//!             ParseOutcome::Skipped(skip) => eprintln!("{}", skip),
//!             ParseOutcome::Fatal(err) => return Err(err.into()),
//!             ParseOutcome::EndOfInput => break,
//!         }
//!     }
//!     assert_eq!(p.counters().valid, 1);
//!     assert_eq!(p.counters().skipped, 1);
//!     Ok(())
//! }
//! ```
//!
//! Only I/O and allocation failures stop the stream; they are reported as
//! [`FatalError`]. Diagnostics about skipped entries go through the `log` facade.

mod errors;
mod lexer;
mod parser;
mod stats;
mod types;

pub use crate::errors::{FatalError, LexingError};
pub use crate::lexer::Position;
pub use crate::parser::{Outcomes, Parser, Records};
pub use crate::stats::{Report, Statistics, YearTable};
pub use crate::types::{flatten_line_breaks, Counters, Fields, FieldsIter, ParseOutcome, Record, Skip};
