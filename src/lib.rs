//! # lightgrid
//!
//! Rebuilds a lightbox gallery grid from a directory of images. Your
//! filesystem is the data source: every image in the source directory gets a
//! size-bounded thumbnail, a caption (sidecar text file, else the file's
//! modification date), and one block in a generated HTML fragment. The
//! fragment is then spliced into an existing page by locating the grid
//! container and replacing its contents in place.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Gallery   assets/  →  assets/thumb/ + gallery_fragment.html
//! 2. Patch     fragment →  index.html    (grid region replaced in place)
//! ```
//!
//! The gallery stage never depends on the patch stage; the patch stage is a
//! pure text transformation that touches exactly one file. Running the
//! pipeline twice with unchanged inputs is a no-op: thumbnails are cached by
//! existence (never re-validated for staleness), the fragment is regenerated
//! byte-identically, and the splice lands on the same span.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists the source directory, filters by extension, sorts by filename |
//! | [`metadata`] | Caption resolution: sidecar `.txt` file, else modification date |
//! | [`imaging`] | Thumbnail backend: decode, bounded resize, encode |
//! | [`gallery`] | Stage 1 — thumbnails, captions, fragment assembly |
//! | [`patch`] | Stage 2 — marker-based splice into the host document |
//! | [`config`] | `config.toml` loading and the stock configuration constants |
//! | [`output`] | CLI output formatting for events, patch status, and `check` |
//!
//! # Design Decisions
//!
//! ## Existence-Only Thumbnail Cache
//!
//! A thumbnail is generated only when no file with the same name exists in
//! the thumbnail directory. There is no hash or mtime comparison: replacing
//! a source image does not regenerate its thumbnail until the old one is
//! deleted by hand. This keeps repeat runs cheap and the cache policy
//! obvious from an `ls`.
//!
//! ## Marker Splicing, Not HTML Parsing
//!
//! The patcher works on the document as text. It finds the literal grid
//! marker, then locates the grid's own closing tag by searching backward
//! from the next section's marker — a nesting-blind heuristic that is
//! correct for the expected page shape and deliberately not a parser. See
//! [`patch`] for the fallback chain.
//!
//! ## Maud With Explicit Escaping
//!
//! Blocks are rendered with [maud](https://maud.lambda.xyz/), but caption
//! text follows the gallery's own escaping contract: double quotes become
//! `&quot;` in attribute values and nothing else is rewritten, while the
//! visible caption element carries the text verbatim. Both paths go through
//! `PreEscaped` so maud's auto-escaping cannot widen that contract.

pub mod config;
pub mod gallery;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod patch;
pub mod scan;
