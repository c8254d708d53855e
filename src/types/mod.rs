mod bytestring;
mod path;
mod value;

pub use bytestring::ByteString;
pub(crate) use bytestring::is_unquoted_literal_byte;
pub use path::{PathComponent, PathSet};
pub use value::{Dictionary, Key, PlainValue, Value};
