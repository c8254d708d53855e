use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::options::{ArrayOptions, DictionaryOptions, StringOptions};
use crate::types::ByteString;

/// Equality and hashing look at `string` only, so a lookup key built
/// from a bare string matches an entry whose key was quoted in the
/// source.
#[derive(Clone, Debug)]
pub struct Key {
    pub string: ByteString,
    pub options: StringOptions,
}

impl Key {
    pub fn new(string: ByteString, options: StringOptions) -> Self {
        Self { string, options }
    }

    pub fn plain(string: impl Into<ByteString>) -> Self {
        Self {
            string: string.into(),
            options: StringOptions::empty(),
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl From<&str> for Key {
    fn from(string: &str) -> Self {
        Self::plain(string)
    }
}

/// `order` is present only when the source key order was not already
/// ascending; without it the encoder emits keys sorted ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: IndexMap<Key, Value>,
    order: Option<Vec<ByteString>>,
    pub options: DictionaryOptions,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A repeated key keeps its original position and spelling; the
    /// previous value is returned.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&Key::plain(key))
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&Key, &Value)> {
        self.entries.get_key_value(&Key::plain(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&Key::plain(key))
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    pub fn explicit_order(&self) -> Option<&[ByteString]> {
        self.order.as_deref()
    }

    /// The encoder asserts that an explicit order names exactly the keys
    /// present.
    pub fn set_explicit_order(&mut self, order: Option<Vec<ByteString>>) {
        self.order = order;
    }

    pub(crate) fn insertion_order_is_ascending(&self) -> bool {
        let mut keys = self.entries.keys();
        let Some(first) = keys.next() else {
            return true;
        };
        let mut previous = &first.string;
        for key in keys {
            if *previous >= key.string {
                return false;
            }
            previous = &key.string;
        }
        true
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(Key, Value)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let mut dictionary = Dictionary::new();
        for (key, value) in iter {
            dictionary.insert(key, value);
        }
        dictionary
    }
}

/// A property-list value. The formatting options travel with the value
/// itself, so they survive ordinary assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    String(ByteString, StringOptions),
    Data(Vec<u8>),
    Array(Vec<Value>, ArrayOptions),
    Dictionary(Dictionary),
}

impl Value {
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(..))
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Value::Data(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(..))
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, Value::Dictionary(_))
    }

    pub fn as_string(&self) -> Option<&ByteString> {
        match self {
            Value::String(string, _) => Some(string),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Value::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items, _) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dictionary) => Some(dictionary),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dictionary()?.get(key)
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items, _) => items.get(index),
            _ => None,
        }
    }

    pub fn plain(&self) -> PlainValue<'_> {
        PlainValue(self)
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Value::String(string.into(), StringOptions::empty())
    }
}

/// View whose equality and hash ignore all formatting options and
/// dictionary key order. Dictionary entries are hashed in key order so
/// insertion order cannot leak into the digest.
#[derive(Clone, Copy)]
pub struct PlainValue<'a>(&'a Value);

impl PlainValue<'_> {
    pub fn value(&self) -> &Value {
        self.0
    }
}

impl PartialEq for PlainValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Value::String(a, _), Value::String(b, _)) => a == b,
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Array(a, _), Value::Array(b, _)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.plain() == y.plain())
            }
            (Value::Dictionary(a), Value::Dictionary(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.get(key.string.as_str())
                            .is_some_and(|other| value.plain() == other.plain())
                    })
            }
            _ => false,
        }
    }
}

impl Eq for PlainValue<'_> {}

impl Hash for PlainValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::String(string, _) => {
                state.write_u8(0);
                string.hash(state);
            }
            Value::Data(bytes) => {
                state.write_u8(1);
                bytes.hash(state);
            }
            Value::Array(items, _) => {
                state.write_u8(2);
                state.write_usize(items.len());
                for item in items {
                    item.plain().hash(state);
                }
            }
            Value::Dictionary(dictionary) => {
                state.write_u8(3);
                state.write_usize(dictionary.len());
                let mut entries: SmallVec<[(&Key, &Value); 8]> = dictionary.iter().collect();
                entries.sort_unstable_by(|(a, _), (b, _)| a.string.cmp(&b.string));
                for (key, value) in entries {
                    key.string.hash(state);
                    value.plain().hash(state);
                }
            }
        }
    }
}

impl fmt::Debug for PlainValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainValue").field(self.0).finish()
    }
}
