//! File formats understood by locedit.
//!
//! [`strings`] is the `.strings` reader and writer. [`plist`] decodes
//! property-list string tables and is used when a `.strings` file does not
//! follow the commented layout.

pub mod plist;
pub mod strings;

pub use strings::Format as StringsFormat;
