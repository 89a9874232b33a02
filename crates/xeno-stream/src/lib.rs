//! `xeno-stream` — the textual map format.
//!
//! One city per line:
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! ```
//!
//! Reading builds a [`WorldMap`](xeno_world::WorldMap) with symmetric links;
//! writing serializes whatever cities survive.  Malformed input is never
//! fatal — bad lines are skipped with a warning — so the only errors this
//! crate produces are real I/O failures.
//!
//! | Module     | Contents                                  |
//! |------------|-------------------------------------------|
//! | [`reader`] | `read_map`, `load_map`, the line parser   |
//! | [`writer`] | `write_map`, `save_map`                   |
//! | [`error`]  | `StreamError`, `StreamResult`             |

pub mod error;
pub mod reader;
pub mod writer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{StreamError, StreamResult};
pub use reader::{load_map, read_map};
pub use writer::{save_map, write_map};
