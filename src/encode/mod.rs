//! Encoding: a [`Value`] tree back into text, driven by the formatting
//! captured at decode time.

mod writer;

use smallvec::SmallVec;

use crate::options::{
    ArrayOptions, DictionaryOptions, EncodeOptions, LineFeedEscaping, StringOptions,
};
use crate::types::{ByteString, Dictionary, Key, Value};

use writer::Writer;

const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";

pub fn to_string(value: &Value) -> String {
    to_string_with_options(value, &EncodeOptions::default())
}

pub fn to_string_with_options(value: &Value, options: &EncodeOptions) -> String {
    String::from_utf8(to_vec_with_options(value, options))
        .expect("encoder output is valid UTF-8")
}

pub fn to_vec(value: &Value) -> Vec<u8> {
    to_vec_with_options(value, &EncodeOptions::default())
}

pub fn to_vec_with_options(value: &Value, options: &EncodeOptions) -> Vec<u8> {
    let mut out = Vec::new();
    to_vec_into(value, options, &mut out);
    out
}

/// Append the encoded form to a caller-owned sink.
///
/// Encoding is total: the only failure mode is the assertion that an
/// explicit dictionary order matches the keys actually present.
pub fn to_vec_into(value: &Value, options: &EncodeOptions, out: &mut Vec<u8>) {
    let mut writer = Writer::new(out, options);
    encode_value(&mut writer, value, options.level);
}

fn encode_value(writer: &mut Writer<'_>, value: &Value, level: usize) {
    match value {
        Value::String(string, options) => encode_string(writer, string, *options),
        Value::Data(bytes) => encode_data(writer, bytes),
        Value::Array(items, options) => encode_array(writer, items, *options, level),
        Value::Dictionary(dictionary) => encode_dictionary(writer, dictionary, level),
    }
}

fn encode_string(writer: &mut Writer<'_>, string: &ByteString, options: StringOptions) {
    if options.contains(StringOptions::UNQUOTED) && string.is_unquoted_literal() {
        writer.write_bytes(string.as_bytes());
        return;
    }

    let octal_tabs = options.contains(StringOptions::ESCAPED_HORIZONTAL_TABS_OCTAL);
    let line_feeds = options.line_feed_escaping();

    writer.write_byte(b'"');
    let bytes = string.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'\t' => {
                if octal_tabs {
                    writer.write_str("\\011");
                } else {
                    writer.write_byte(b'\t');
                }
            }
            b'\\' => writer.write_str("\\\\"),
            b'"' => writer.write_str("\\\""),
            b'\r' => {
                // CRLF folds into one escaped line feed; a lone CR
                // becomes one as well.
                write_line_feed(writer, line_feeds);
                if bytes.get(index + 1) == Some(&b'\n') {
                    index += 1;
                }
            }
            b'\n' => write_line_feed(writer, line_feeds),
            other => writer.write_byte(other),
        }
        index += 1;
    }
    writer.write_byte(b'"');
}

fn write_line_feed(writer: &mut Writer<'_>, escaping: LineFeedEscaping) {
    match escaping {
        LineFeedEscaping::Named => writer.write_str("\\n"),
        LineFeedEscaping::Literal => writer.write_bytes(b"\\\n"),
        LineFeedEscaping::Octal => writer.write_str("\\012"),
        LineFeedEscaping::None => writer.write_byte(b'\n'),
    }
}

fn encode_data(writer: &mut Writer<'_>, bytes: &[u8]) {
    writer.write_byte(b'<');
    for &byte in bytes {
        writer.write_byte(HEX_LOWER[usize::from(byte >> 4)]);
        writer.write_byte(HEX_LOWER[usize::from(byte & 0x0F)]);
    }
    writer.write_byte(b'>');
}

fn encode_array(writer: &mut Writer<'_>, items: &[Value], options: ArrayOptions, level: usize) {
    let break_lines = options.contains(ArrayOptions::BREAK_ELEMENTS_ONTO_LINES);
    let space_separator = !break_lines && options.contains(ArrayOptions::SPACE_SEPARATOR);

    writer.write_byte(b'(');
    if break_lines {
        writer.write_newline();
    }
    for (index, item) in items.iter().enumerate() {
        if break_lines {
            writer.write_indent(level + 1);
        }
        encode_value(writer, item, level + 1);
        if index + 1 < items.len() {
            writer.write_byte(b',');
            if break_lines {
                writer.write_newline();
            } else if space_separator {
                writer.write_byte(b' ');
            }
        } else {
            if options.contains(ArrayOptions::TRAILING_COMMA) {
                writer.write_byte(b',');
            }
            if break_lines {
                writer.write_newline();
            }
        }
    }
    if break_lines {
        writer.write_indent(level);
    }
    writer.write_byte(b')');
}

fn encode_dictionary(writer: &mut Writer<'_>, dictionary: &Dictionary, level: usize) {
    let break_lines = dictionary
        .options
        .contains(DictionaryOptions::BREAK_ELEMENTS_ONTO_LINES);

    writer.write_byte(b'{');
    if break_lines {
        writer.write_newline();
    }

    match dictionary.explicit_order() {
        Some(order) => {
            assert_eq!(
                order.len(),
                dictionary.len(),
                "explicit dictionary order must name every key exactly once",
            );
            for key_string in order {
                let (key, value) = dictionary
                    .get_key_value(key_string.as_str())
                    .expect("explicit dictionary order names a key that is not present");
                encode_entry(writer, key, value, break_lines, level);
            }
        }
        None => {
            let mut entries: SmallVec<[(&Key, &Value); 8]> = dictionary.iter().collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.string.cmp(&b.string));
            for (key, value) in entries {
                encode_entry(writer, key, value, break_lines, level);
            }
        }
    }

    if break_lines {
        writer.write_indent(level);
    }
    writer.write_byte(b'}');
}

fn encode_entry(
    writer: &mut Writer<'_>,
    key: &Key,
    value: &Value,
    break_lines: bool,
    level: usize,
) {
    if break_lines {
        writer.write_indent(level + 1);
    }
    encode_string(writer, &key.string, key.options);
    writer.write_str(" = ");
    encode_value(writer, value, level + 1);
    writer.write_byte(b';');
    if break_lines {
        writer.write_newline();
    }
}
