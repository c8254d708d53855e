mod parser;

use memchr::{memchr_iter, memrchr};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{DecodingError, Result};
use crate::options::{DecodeOptions, Utf8Policy};
use crate::types::Value;

use parser::{ParseError, Parser};

pub fn from_str(input: &str) -> Result<Value> {
    from_slice(input.as_bytes())
}

pub fn from_str_with_options(input: &str, options: &DecodeOptions) -> Result<Value> {
    from_slice_with_options(input.as_bytes(), options)
}

pub fn from_slice(input: &[u8]) -> Result<Value> {
    from_slice_with_options(input, &DecodeOptions::default())
}

pub fn from_slice_with_options(input: &[u8], options: &DecodeOptions) -> Result<Value> {
    let mut parser = Parser::new(input, options.utf8);
    parser
        .parse_document(options.top_level_keys.as_ref())
        .map_err(|error| locate(input, error))
}

pub fn validate_str(input: &str) -> Result<()> {
    validate_slice(input.as_bytes())
}

pub fn validate_slice(input: &[u8]) -> Result<()> {
    let mut validator = Parser::validator(input, Utf8Policy::default());
    validator
        .parse_document(None)
        .map(|_| ())
        .map_err(|error| locate(input, error))
}

/// Each document is decoded whole on one worker; the parser itself never
/// suspends mid-document.
#[cfg(feature = "parallel")]
pub fn from_slices_parallel(
    inputs: &[&[u8]],
    options: &DecodeOptions,
) -> Vec<Result<Value>> {
    inputs
        .par_iter()
        .map(|input| from_slice_with_options(input, options))
        .collect()
}

fn locate(input: &[u8], error: ParseError) -> DecodingError {
    let offset = error.offset.min(input.len());
    let line = memchr_iter(b'\n', &input[..offset]).count() + 1;
    let column = match memrchr(b'\n', &input[..offset]) {
        Some(last_line_feed) => offset - last_line_feed,
        None => offset + 1,
    };
    DecodingError::new(error.kind, line, column)
}
