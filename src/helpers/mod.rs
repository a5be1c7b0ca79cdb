//! Helper functions
//!
//! Path-to-URL resolution used when embedding cover images in front matter.

mod url;

pub use url::*;
