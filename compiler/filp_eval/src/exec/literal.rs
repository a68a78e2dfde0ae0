//! String literal decoding.

use filp_core::{Kind, Machine, ValueId};

/// Contents of a single-quoted token: everything up to the closing quote,
/// taken verbatim.
pub(crate) fn single_quoted(token: &[u8]) -> &[u8] {
    let body = token.get(1..).unwrap_or_default();
    let end = body.iter().position(|&c| c == b'\'').unwrap_or(body.len());
    &body[..end]
}

/// Contents of a double-quoted token with escapes decoded and `$name`
/// references replaced by the text of the named symbol.
///
/// An undefined or Null symbol interpolates as nothing. A name is a run of
/// ASCII letters and underscores; the byte that ends it is decoded
/// normally.
pub(crate) fn double_quoted(machine: &mut Machine, token: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(token.len());
    let mut i = 1;

    while let Some(&c) = token.get(i) {
        match c {
            b'\\' => {
                let Some(&escaped) = token.get(i + 1) else {
                    break;
                };
                i += 2;
                match escaped {
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'a' => out.push(0x07),
                    b'e' => out.push(0x1b),
                    // line continuation
                    b'\n' => {}
                    other => out.push(other),
                }
            }
            b'$' => {
                let start = i + 1;
                let len = token[start..]
                    .iter()
                    .take_while(|&&c| c.is_ascii_alphabetic() || c == b'_')
                    .count();
                interpolate(machine, &token[start..start + len], &mut out);
                i = start + len;
            }
            b'"' => break,
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    out
}

fn interpolate(machine: &mut Machine, name: &[u8], out: &mut Vec<u8>) {
    let v = match machine.find_symbol(name) {
        Some(id) => machine.symbol_value(id),
        None => ValueId::NULL,
    };
    if machine.heap.kind(v) != Kind::Null {
        out.extend_from_slice(machine.heap.text(v));
    }
}

#[cfg(test)]
mod tests;
