use rstest::rstest;

use openstep_plist::{
    from_str, ArrayOptions, ContentError, DictionaryOptions, StringOptions, Value,
};

fn decode(input: &str) -> Value {
    from_str(input).unwrap()
}

fn decode_kind(input: &str) -> ContentError {
    from_str(input).unwrap_err().kind
}

// Data

#[rstest]
#[case("<>", &[])]
#[case("<ff>", &[0xFF])]
#[case("<FF>", &[0xFF])]
#[case("< F F >", &[0xFF])]
#[case("<cafe f00d>", &[0xCA, 0xFE, 0xF0, 0x0D])]
#[case("<0001 0203>", &[0, 1, 2, 3])]
#[case("<  >", &[])]
#[case("<\t0a\n0b >", &[0x0A, 0x0B])]
fn data_values(#[case] input: &str, #[case] expected: &[u8]) {
    assert_eq!(decode(input).as_data().unwrap(), expected);
}

#[rstest]
#[case("<FF F>", ContentError::MissingHexadecimalLowByteData)]
#[case("<F>", ContentError::MissingHexadecimalLowByteData)]
#[case("<zz>", ContentError::NonHexadecimalHighByteData(b'z'))]
#[case("<fz>", ContentError::NonHexadecimalLowByteData(b'z'))]
#[case("<ff", ContentError::MissingDataEnd)]
#[case("<", ContentError::MissingDataEnd)]
fn data_errors(#[case] input: &str, #[case] expected: ContentError) {
    assert_eq!(decode_kind(input), expected);
}

#[rstest]
fn comments_are_not_recognized_inside_data() {
    // '/' is not a hex digit; data skipping is whitespace-only.
    assert_eq!(
        decode_kind("< // ff\n>"),
        ContentError::NonHexadecimalHighByteData(b'/')
    );
}

// Arrays

#[rstest]
fn empty_array() {
    let Value::Array(items, options) = decode("()") else {
        panic!("expected an array");
    };
    assert!(items.is_empty());
    assert_eq!(options, ArrayOptions::empty());
}

#[rstest]
fn array_with_space_separator_and_trailing_comma() {
    let Value::Array(items, options) = decode("(1, 2, )") else {
        panic!("expected an array");
    };
    let strings: Vec<&str> = items
        .iter()
        .map(|item| item.as_string().unwrap().as_str())
        .collect();
    assert_eq!(strings, ["1", "2"]);
    assert_eq!(
        options,
        ArrayOptions::TRAILING_COMMA.union(ArrayOptions::SPACE_SEPARATOR)
    );
    assert!(items
        .iter()
        .all(|item| matches!(item, Value::String(_, options) if *options == StringOptions::UNQUOTED)));
}

#[rstest]
fn array_without_spaces_records_no_separator() {
    let Value::Array(_, options) = decode("(a,b)") else {
        panic!("expected an array");
    };
    assert_eq!(options, ArrayOptions::empty());
}

#[rstest]
fn array_break_is_detected_from_the_first_byte() {
    let Value::Array(items, options) = decode("(\n  a,\n  b,\n)") else {
        panic!("expected an array");
    };
    assert_eq!(items.len(), 2);
    assert!(options.contains(ArrayOptions::BREAK_ELEMENTS_ONTO_LINES));
    assert!(options.contains(ArrayOptions::TRAILING_COMMA));
    assert!(!options.contains(ArrayOptions::SPACE_SEPARATOR));

    // A leading space before the newline means no break.
    let Value::Array(_, options) = decode("( \na)") else {
        panic!("expected an array");
    };
    assert!(!options.contains(ArrayOptions::BREAK_ELEMENTS_ONTO_LINES));
}

#[rstest]
fn tab_after_comma_is_not_a_space_separator() {
    let Value::Array(_, options) = decode("(a,\tb)") else {
        panic!("expected an array");
    };
    assert!(!options.contains(ArrayOptions::SPACE_SEPARATOR));
}

#[rstest]
fn nested_arrays() {
    let value = decode("((a), (b, c))");
    assert_eq!(value.get_index(0).unwrap().as_array().unwrap().len(), 1);
    assert_eq!(value.get_index(1).unwrap().as_array().unwrap().len(), 2);
    assert!(value.get_index(2).is_none());
}

#[rstest]
#[case("(a", ContentError::MissingClosingParenthesis)]
#[case("(a b)", ContentError::MissingClosingParenthesis)]
#[case("(a,", ContentError::MissingContent)]
fn array_errors(#[case] input: &str, #[case] expected: ContentError) {
    assert_eq!(decode_kind(input), expected);
}

// Dictionaries

#[rstest]
fn ascending_keys_store_no_order() {
    let value = decode("{a = 1; b = 2;}");
    let dictionary = value.as_dictionary().unwrap();
    assert_eq!(dictionary.len(), 2);
    assert!(dictionary.explicit_order().is_none());
    assert_eq!(dictionary.get("a").unwrap().as_string().unwrap(), "1");
    assert_eq!(dictionary.get("b").unwrap().as_string().unwrap(), "2");
}

#[rstest]
fn non_ascending_keys_keep_their_order() {
    let value = decode("{b = 1; a = 2;}");
    let dictionary = value.as_dictionary().unwrap();
    let order: Vec<&str> = dictionary
        .explicit_order()
        .unwrap()
        .iter()
        .map(|key| key.as_str())
        .collect();
    assert_eq!(order, ["b", "a"]);
}

#[rstest]
fn equal_adjacent_keys_are_not_ascending() {
    // "a" repeated collapses to one entry, but "b" before it still
    // forces an explicit order.
    let value = decode("{b = 1; b = 2; a = 3;}");
    let dictionary = value.as_dictionary().unwrap();
    assert_eq!(dictionary.len(), 2);
    let order: Vec<&str> = dictionary
        .explicit_order()
        .unwrap()
        .iter()
        .map(|key| key.as_str())
        .collect();
    assert_eq!(order, ["b", "a"]);
}

#[rstest]
fn repeated_keys_last_value_wins() {
    let value = decode("{a = first; a = second;}");
    let dictionary = value.as_dictionary().unwrap();
    assert_eq!(dictionary.len(), 1);
    assert_eq!(dictionary.get("a").unwrap().as_string().unwrap(), "second");
    assert!(dictionary.explicit_order().is_none());
}

#[rstest]
fn dictionary_break_flag() {
    let value = decode("{\n  a = 1;\n}");
    let dictionary = value.as_dictionary().unwrap();
    assert!(dictionary
        .options
        .contains(DictionaryOptions::BREAK_ELEMENTS_ONTO_LINES));

    let value = decode("{a = 1;}");
    let dictionary = value.as_dictionary().unwrap();
    assert!(!dictionary
        .options
        .contains(DictionaryOptions::BREAK_ELEMENTS_ONTO_LINES));
}

#[rstest]
fn nested_dictionaries_and_mixed_values() {
    let value = decode(
        "{\n  settings = {\n    opt = (\"-Wall\", \"-Werror\");\n  };\n  blob = <beef>;\n}",
    );
    let settings = value.get("settings").unwrap();
    let opt = settings.get("opt").unwrap().as_array().unwrap();
    assert_eq!(opt[1].as_string().unwrap(), "-Werror");
    assert_eq!(value.get("blob").unwrap().as_data().unwrap(), [0xBE, 0xEF]);
}

#[rstest]
#[case("{() = value;}", ContentError::NonStringKey)]
#[case("{<00> = value;}", ContentError::NonStringKey)]
#[case("{{} = value;}", ContentError::NonStringKey)]
#[case("{a value;}", ContentError::MissingEqualSignInDictionary)]
#[case("{a = 1}", ContentError::MissingSemicolonInDictionary)]
#[case("{a = 1;", ContentError::MissingClosingBrace)]
#[case("{", ContentError::MissingClosingBrace)]
fn dictionary_errors(#[case] input: &str, #[case] expected: ContentError) {
    assert_eq!(decode_kind(input), expected);
}

// Trivia and comments

#[rstest]
#[case("  value  ")]
#[case("\t\r\nvalue\x0B\x0C")]
#[case("// leading comment\nvalue")]
#[case("/* block */ value /* again */")]
#[case("value // trailing comment")]
#[case("\u{2028}value\u{2029}")]
fn trivia_around_the_top_level_value(#[case] input: &str) {
    assert_eq!(decode(input).as_string().unwrap(), "value");
}

#[rstest]
fn comments_between_every_token() {
    let value = decode("{/*a*/key/*b*/=/*c*/(/*d*/x/*e*/,/*f*/y/*g*/)/*h*/;/*i*/}");
    let items = value.get("key").unwrap().as_array().unwrap();
    assert_eq!(items.len(), 2);
}

#[rstest]
fn line_comments_end_at_any_line_terminator() {
    for terminator in ["\n", "\r", "\u{2028}", "\u{2029}"] {
        let input = format!("// note{terminator}value");
        assert_eq!(decode(&input).as_string().unwrap(), "value");
    }
}

#[rstest]
fn block_comments_do_not_nest() {
    // The first "*/" ends the comment, leaving "*/" as content.
    assert_eq!(
        decode_kind("/* outer /* inner */ */"),
        ContentError::IllegalContent(b'*')
    );
}

#[rstest]
#[case("", ContentError::MissingContent)]
#[case("   ", ContentError::MissingContent)]
#[case("// only a comment\n", ContentError::MissingContent)]
#[case("{}a", ContentError::OversuppliedContent)]
#[case("a b", ContentError::OversuppliedContent)]
#[case("#", ContentError::IllegalContent(b'#'))]
#[case("=", ContentError::IllegalContent(b'='))]
#[case("/", ContentError::IncompleteCommentStart)]
#[case("/x", ContentError::IllegalCommentStart(b'x'))]
#[case("/* unterminated", ContentError::MissingCommentEnd)]
fn structural_and_comment_errors(#[case] input: &str, #[case] expected: ContentError) {
    assert_eq!(decode_kind(input), expected);
}

// Position reporting

#[rstest]
#[case("", 1, 1)]
#[case("{}a", 1, 3)]
#[case("#", 1, 1)]
#[case("{a = 1;\nb = #;\n}", 2, 5)]
#[case("(\n  ok,\n  #\n)", 3, 3)]
fn positions_are_one_based_lines_and_columns(
    #[case] input: &str,
    #[case] line: usize,
    #[case] column: usize,
) {
    let error = from_str(input).unwrap_err();
    assert_eq!((error.line, error.column), (line, column));
}
