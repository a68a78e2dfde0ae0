//! `dumper`: render a value as filp source text.
//!
//! Levels below the limit are laid out one value per line and indented
//! with tabs; deeper levels run together on one line. An Array met again
//! while inside itself is written as its kind marker.

use filp_core::{Heap, ValueData, ValueId};

use super::Word;
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[("dumper", dumper)];

/// Nesting depth up to which the output is laid out on separate lines.
const LAYOUT_DEPTH: usize = 3;

fn dumper(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let text = dump(&interp.machine.heap, v, LAYOUT_DEPTH);
    interp.put_scalar(&text);
    Status::Ok
}

fn is_numeric(bytes: &[u8]) -> bool {
    match bytes {
        [first, ..] if first.is_ascii_digit() => true,
        [b'-', second, ..] => second.is_ascii_digit(),
        _ => false,
    }
}

fn indent(out: &mut Vec<u8>, lvl: usize) {
    out.extend(std::iter::repeat(b'\t').take(lvl));
}

/// Render `v` with line layout down to nesting depth `max`.
pub(crate) fn dump(heap: &Heap, v: ValueId, max: usize) -> Vec<u8> {
    let mut dumper = Dumper {
        heap,
        max,
        path: Vec::new(),
        out: Vec::new(),
    };
    dumper.value(v, 0);
    dumper.out
}

struct Dumper<'a> {
    heap: &'a Heap,
    max: usize,
    /// Arrays currently being written, outermost first.
    path: Vec<ValueId>,
    out: Vec<u8>,
}

impl Dumper<'_> {
    fn value(&mut self, v: ValueId, lvl: usize) {
        let heap = self.heap;
        let laid_out = lvl < self.max;
        if laid_out {
            indent(&mut self.out, lvl);
        }

        match heap.data(v) {
            ValueData::Scalar(bytes) if is_numeric(bytes) => {
                self.out.extend_from_slice(bytes);
                if !laid_out {
                    self.out.push(b' ');
                }
            }
            ValueData::Scalar(bytes) => {
                self.out.push(b'\'');
                self.out.extend_from_slice(bytes);
                self.out.extend_from_slice(b"' ");
            }
            ValueData::Code(bytes) if bytes.contains(&b'\n') => {
                self.out.extend_from_slice(b"\n{\n");
                self.out.extend_from_slice(bytes);
                self.out.extend_from_slice(b"\n}\n");
            }
            ValueData::Code(bytes) => {
                self.out.extend_from_slice(b"{ ");
                self.out.extend_from_slice(bytes);
                self.out.extend_from_slice(b" } ");
            }
            ValueData::Array(elements) if !self.path.contains(&v) => {
                let inner_laid_out = lvl + 1 < self.max;
                self.out.extend_from_slice(b"( ");
                if inner_laid_out {
                    self.out.push(b'\n');
                }
                self.path.push(v);
                for &e in elements {
                    self.value(e, lvl + 1);
                }
                self.path.pop();
                if inner_laid_out {
                    indent(&mut self.out, lvl);
                }
                self.out.extend_from_slice(b") ");
            }
            other => {
                self.out.extend_from_slice(b"'[");
                self.out.extend_from_slice(other.kind().name().as_bytes());
                self.out.extend_from_slice(b"]' ");
            }
        }

        if laid_out {
            self.out.push(b'\n');
        }
    }
}
