use crate::options::EncodeOptions;

/// Append-only byte sink with a cached indent string per depth.
pub(crate) struct Writer<'out> {
    buffer: &'out mut Vec<u8>,
    indent_unit: String,
    indent_cache: Vec<String>,
}

impl<'out> Writer<'out> {
    pub fn new(buffer: &'out mut Vec<u8>, options: &EncodeOptions) -> Self {
        Self {
            buffer,
            indent_unit: options.indentation.unit(),
            indent_cache: vec![String::new()],
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    pub fn write_str(&mut self, text: &str) {
        self.buffer.extend_from_slice(text.as_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn write_newline(&mut self) {
        self.buffer.push(b'\n');
    }

    pub fn write_indent(&mut self, depth: usize) {
        if depth == 0 || self.indent_unit.is_empty() {
            return;
        }
        if depth >= self.indent_cache.len() {
            self.extend_indent_cache(depth);
        }
        self.buffer
            .extend_from_slice(self.indent_cache[depth].as_bytes());
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let previous = self.indent_cache.last().map(String::as_str).unwrap_or("");
            let mut next = String::with_capacity(previous.len() + self.indent_unit.len());
            next.push_str(previous);
            next.push_str(&self.indent_unit);
            self.indent_cache.push(next);
        }
    }
}
