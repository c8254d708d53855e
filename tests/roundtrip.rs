use rstest::rstest;

use openstep_plist::{from_str, to_string, to_string_with_options, EncodeOptions, Indentation};

/// Inputs whose decoded form re-encodes to the exact same bytes under
/// the default two-space indentation.
#[rstest]
#[case::unquoted("name")]
#[case::quoted("\"two words\"")]
#[case::empty_string("\"\"")]
#[case::empty_dictionary("{}")]
#[case::empty_array("()")]
#[case::empty_array_broken("(\n)")]
#[case::tight_array("(a,b)")]
#[case::spaced_array("(a, b)")]
#[case::trailing_comma("(a, b,)")]
#[case::broken_array("(\n  one,\n  two,\n)")]
#[case::data("<cafef00d>")]
#[case::empty_data("<>")]
#[case::inline_dictionary("{a = 1;}")]
#[case::unsorted_dictionary("{b = 2;a = 1;}")]
#[case::broken_dictionary("{\n  a = 1;\n  b = 2;\n}")]
#[case::named_line_feed("\"line\\nfeed\"")]
#[case::octal_line_feed("\"line\\012feed\"")]
#[case::literal_line_feed("\"line\\\nfeed\"")]
#[case::raw_line_feed("\"line\nfeed\"")]
#[case::octal_tab("\"col\\011umn\"")]
#[case::escaped_quote("\"say \\\"hi\\\"\"")]
#[case::nested(
    "{\n  objects = {\n    A1 = {\n      isa = PBXGroup;\n      children = (\n        B2,\n        C3,\n      );\n    };\n  };\n  rootObject = A1;\n}"
)]
fn structural_round_trip(#[case] input: &str) {
    let value = from_str(input).unwrap();
    assert_eq!(to_string(&value), input);
}

/// Inputs that canonicalize on the way out but stay plain-equal.
#[rstest]
#[case::single_quotes("'single'", "\"single\"")]
#[case::data_whitespace("< CA FE >", "<cafe>")]
#[case::uppercase_data("<CAFE>", "<cafe>")]
#[case::comments("{a = 1; // note\n}", "{a = 1;}")]
#[case::unknown_escape("\"\\q\"", "\"q\"")]
#[case::hex_escape("\"\\U0061\"", "\"a\"")]
#[case::octal_letter("\"\\141\"", "\"a\"")]
#[case::space_before_trailing_close("(a, b, )", "(a, b,)")]
#[case::sorted_keys_forget_source_spacing("{ a = 1; }", "{a = 1;}")]
fn canonicalizing_round_trip(#[case] input: &str, #[case] expected: &str) {
    let value = from_str(input).unwrap();
    let encoded = to_string(&value);
    assert_eq!(encoded, expected);

    let again = from_str(&encoded).unwrap();
    assert_eq!(again.plain(), value.plain());
}

/// Carriage returns deliberately canonicalize into the string's
/// line-feed spelling, so they do not survive a round trip.
#[rstest]
fn carriage_returns_fold_into_line_feeds() {
    let value = from_str("\"a\\rb\"").unwrap();
    assert_eq!(to_string(&value), "\"a\nb\"");

    // Here the escaped "\n" recorded the named spelling, so the CRLF
    // pair folds into a single "\n" escape.
    let value = from_str("\"a\\r\\nb\"").unwrap();
    assert_eq!(to_string(&value), "\"a\\nb\"");
}

/// Decode, encode with each indentation, decode again: the trees must be
/// plain-equal throughout.
#[rstest]
#[case("{\n  deep = {\n    list = (\n      \"a b\",\n      <00ff>,\n      {x = y;},\n    );\n  };\n}")]
#[case("(nested, (arrays, (deeper)), \"with strings\")")]
#[case("{z = 26; m = 13; a = 1;}")]
#[case("\"mixed\\ttabs \\012 and \\U00e9scapes\"")]
#[case("{empty = {}; blank = \"\"; none = ();}")]
fn plain_round_trip_under_every_indentation(#[case] input: &str) {
    let value = from_str(input).unwrap();
    for indentation in [
        Indentation::Spaces(2),
        Indentation::Spaces(0),
        Indentation::Spaces(7),
        Indentation::Tabs,
        Indentation::None,
    ] {
        let options = EncodeOptions::new().with_indentation(indentation);
        let encoded = to_string_with_options(&value, &options);
        let reparsed = from_str(&encoded)
            .unwrap_or_else(|error| panic!("re-parse failed for {encoded:?}: {error}"));
        assert_eq!(reparsed.plain(), value.plain(), "indentation {indentation:?}");
        // Formatting options are themselves part of the tree, so a full
        // second round trip is stable.
        assert_eq!(reparsed, value);
    }
}
