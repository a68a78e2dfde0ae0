//! Splits source text into tokens.
//!
//! Tokens borrow from the source. Whitespace is space, tab and newline
//! only; the six delimiters `{ } ( ) [ ]` always stand alone; a token
//! opening with a quote runs to the matching quote, quotes included.

/// Iterator over the tokens of a byte slice.
#[derive(Clone, Debug)]
pub(crate) struct Tokens<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Tokens { src, pos: 0 }
    }
}

#[inline]
fn is_separator(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n')
}

#[inline]
fn is_delimiter(c: u8) -> bool {
    matches!(c, b'{' | b'}' | b'(' | b')' | b'[' | b']')
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let src = self.src;
        while self.pos < src.len() && is_separator(src[self.pos]) {
            self.pos += 1;
        }
        let start = self.pos;
        let &first = src.get(start)?;

        match first {
            b'"' | b'\'' => {
                self.pos += 1;
                while let Some(&c) = src.get(self.pos) {
                    self.pos += 1;
                    if c == b'\\' && first == b'"' {
                        // The escaped byte never closes the token.
                        self.pos = (self.pos + 1).min(src.len());
                    } else if c == first {
                        break;
                    }
                }
            }
            c if is_delimiter(c) => self.pos += 1,
            _ => {
                while self.pos < src.len()
                    && !is_separator(src[self.pos])
                    && !is_delimiter(src[self.pos])
                {
                    self.pos += 1;
                }
            }
        }

        Some(&src[start..self.pos])
    }
}
