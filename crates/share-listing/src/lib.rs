//! Parser for the share point listing printed by `sharing -l`
//!
//! [`parse_listing`] is a pure function of its input: it never invokes the
//! tool and returns an explicit [`Listing`] snapshot that callers pass on to
//! reconciliation.
//!
//! # Example
//!
//! ```
//! use share_listing::parse_listing;
//!
//! let text = "List of Share Points\nname:\t\tA\npath:\t\t/Shares/A\n\tafp:\t{\n\t\tshared:\t1\n\t}\n";
//! let listing = parse_listing(text).unwrap();
//! assert_eq!(listing.get("/Shares/A").unwrap().share_name, "A");
//! ```

pub mod error;
mod grammar;
pub mod parser;

pub use error::{ParseError, Result};
pub use grammar::{BLOCK_PREFIX, HEADER_MARKER, PATH_PREFIX};
pub use parser::{Listing, parse_block, parse_listing};
