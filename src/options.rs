use std::fmt;

use indexmap::IndexSet;

use crate::types::ByteString;

macro_rules! flag_set {
    ($(#[$doc:meta])* $name:ident { $($(#[$fdoc:meta])* $flag:ident = $bit:expr, $label:literal;)+ }) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(u8);

        impl $name {
            $( $(#[$fdoc])* pub const $flag: Self = Self(1 << $bit); )+

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            pub fn remove(&mut self, other: Self) {
                self.0 &= !other.0;
            }

            pub const fn union(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(", stringify!($name))?;
                let mut first = true;
                $(
                    if self.contains(Self::$flag) {
                        if !first {
                            write!(f, " | ")?;
                        }
                        write!(f, $label)?;
                        first = false;
                    }
                )+
                if first {
                    write!(f, "empty")?;
                }
                write!(f, ")")
            }
        }
    };
}

flag_set! {
    /// Formatting clues for a string. The three line-feed flags are
    /// mutually exclusive; at most one is ever set.
    StringOptions {
        UNQUOTED = 0, "UNQUOTED";
        ESCAPED_LINE_FEEDS_NAMED = 1, "ESCAPED_LINE_FEEDS_NAMED";
        ESCAPED_LINE_FEEDS_LITERAL = 2, "ESCAPED_LINE_FEEDS_LITERAL";
        ESCAPED_LINE_FEEDS_OCTAL = 3, "ESCAPED_LINE_FEEDS_OCTAL";
        ESCAPED_HORIZONTAL_TABS_OCTAL = 4, "ESCAPED_HORIZONTAL_TABS_OCTAL";
    }
}

flag_set! {
    /// Formatting clues for an array. `SPACE_SEPARATOR` is ignored by the
    /// encoder when `BREAK_ELEMENTS_ONTO_LINES` is set.
    ArrayOptions {
        BREAK_ELEMENTS_ONTO_LINES = 0, "BREAK_ELEMENTS_ONTO_LINES";
        TRAILING_COMMA = 1, "TRAILING_COMMA";
        SPACE_SEPARATOR = 2, "SPACE_SEPARATOR";
    }
}

flag_set! {
    /// Formatting clues for a dictionary.
    DictionaryOptions {
        BREAK_ELEMENTS_ONTO_LINES = 0, "BREAK_ELEMENTS_ONTO_LINES";
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFeedEscaping {
    None,
    Named,
    Literal,
    Octal,
}

impl StringOptions {
    pub fn line_feed_escaping(self) -> LineFeedEscaping {
        if self.contains(Self::ESCAPED_LINE_FEEDS_NAMED) {
            LineFeedEscaping::Named
        } else if self.contains(Self::ESCAPED_LINE_FEEDS_LITERAL) {
            LineFeedEscaping::Literal
        } else if self.contains(Self::ESCAPED_LINE_FEEDS_OCTAL) {
            LineFeedEscaping::Octal
        } else {
            LineFeedEscaping::None
        }
    }
}

/// `Spaces(0)` behaves exactly like `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    Spaces(usize),
    Tabs,
    None,
}

impl Indentation {
    pub(crate) fn unit(self) -> String {
        match self {
            Indentation::Spaces(count) => " ".repeat(count),
            Indentation::Tabs => "\t".to_string(),
            Indentation::None => String::new(),
        }
    }
}

impl Default for Indentation {
    fn default() -> Self {
        Indentation::Spaces(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    pub indentation: Indentation,
    pub level: usize,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = indentation;
        self
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Policy {
    #[default]
    Strict,
    Replace,
}

#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub top_level_keys: Option<IndexSet<ByteString>>,
    pub utf8: Utf8Policy,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_level_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ByteString>,
    {
        self.top_level_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_utf8(mut self, utf8: Utf8Policy) -> Self {
        self.utf8 = utf8;
        self
    }
}
