//! Decoder and encoder for the OpenStep / NeXTSTEP "old-style" ASCII
//! property-list format.
//!
//! The distinctive property of this crate is that decoded values carry
//! *formatting clues* from the source: whether a string was quoted, which
//! spelling its escaped line feeds used, whether an array broke its
//! elements onto lines or kept a trailing comma, and the key order of
//! dictionaries that were not already sorted. Re-encoding an unmodified
//! tree reproduces the shape of the input instead of a canonicalized
//! blob, so plists under version control stay diffable.
//!
//! # Examples
//!
//! Round-trip a document:
//!
//! ```rust
//! use openstep_plist::{from_str, to_string};
//!
//! let source = "{\n  name = demo;\n  flags = (\"-O2\", \"-g\");\n}";
//! let value = from_str(source)?;
//! assert_eq!(to_string(&value), source);
//! # Ok::<(), openstep_plist::DecodingError>(())
//! ```
//!
//! Inspect a tree:
//!
//! ```rust
//! use openstep_plist::from_str;
//!
//! let value = from_str("{id = <c0ffee>; tags = (new, hot);}")?;
//! assert_eq!(value.get("id").unwrap().as_data().unwrap(), [0xC0, 0xFF, 0xEE]);
//! assert_eq!(value.get("tags").unwrap().get_index(1).unwrap().as_string().unwrap(), "hot");
//! # Ok::<(), openstep_plist::DecodingError>(())
//! ```
//!
//! Compare content while ignoring formatting:
//!
//! ```rust
//! use openstep_plist::from_str;
//!
//! let compact = from_str("{a = (1, 2);}")?;
//! let spread = from_str("{\n  a = (\n    1,\n    2,\n  );\n}")?;
//! assert_ne!(compact, spread);
//! assert_eq!(compact.plain(), spread.plain());
//! # Ok::<(), openstep_plist::DecodingError>(())
//! ```
//!
//! Restrict decoding to a few top-level keys of a large document:
//!
//! ```rust
//! use openstep_plist::{from_str_with_options, DecodeOptions};
//!
//! let options = DecodeOptions::new().with_top_level_keys(["objects"]);
//! let value = from_str_with_options("{objects = (a, b); archiveVersion = 1;}", &options)?;
//! assert_eq!(value.as_dictionary().unwrap().len(), 1);
//! # Ok::<(), openstep_plist::DecodingError>(())
//! ```
//!
//! # Modules
//!
//! - [`decode`]: input bytes to a [`Value`] tree, with located errors
//! - [`encode`]: a [`Value`] tree to text, honoring captured formatting
//! - [`error`]: the [`ContentError`] taxonomy and [`DecodingError`]
//! - [`options`]: formatting flag sets and decode/encode configuration
//! - [`types`]: [`ByteString`], [`Value`], [`Dictionary`], [`PathSet`]

pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod types;

pub use crate::decode::{
    from_slice, from_slice_with_options, from_str, from_str_with_options, validate_slice,
    validate_str,
};
#[cfg(feature = "parallel")]
pub use crate::decode::from_slices_parallel;
pub use crate::encode::{
    to_string, to_string_with_options, to_vec, to_vec_into, to_vec_with_options,
};
pub use crate::error::{ContentError, DecodingError, Result};
pub use crate::options::{
    ArrayOptions, DecodeOptions, DictionaryOptions, EncodeOptions, Indentation, LineFeedEscaping,
    StringOptions, Utf8Policy,
};
pub use crate::types::{ByteString, Dictionary, Key, PathComponent, PathSet, PlainValue, Value};
