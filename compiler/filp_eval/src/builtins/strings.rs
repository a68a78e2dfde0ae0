//! String words. Positions are 1-based.

use filp_core::ErrorKind;

use super::{scalar_operand, Word};
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    ("strcat", strcat),
    (".", strcat),
    ("length", length),
    ("strlen", length),
    ("substr", substr),
    ("splice", splice),
    ("instr", instr),
    ("split", split),
];

fn len_i64(bytes: &[u8]) -> i64 {
    i64::try_from(bytes.len()).unwrap_or(i64::MAX)
}

/// Clamp a signed position into `0..=len`.
fn clamp(pos: i64, len: usize) -> usize {
    usize::try_from(pos.max(0)).map_or(len, |pos| pos.min(len))
}

fn strcat(interp: &mut Interpreter) -> Status {
    let last = interp.machine.pop();
    let first = interp.machine.pop();
    let heap = &interp.machine.heap;
    let joined = match (heap.scalar_bytes(first), heap.scalar_bytes(last)) {
        (Some(a), Some(b)) => Some([a, b].concat()),
        _ => None,
    };
    let Some(joined) = joined else {
        interp.put_null();
        interp.machine.fail(ErrorKind::ScalarExpected);
        return Status::Error;
    };
    interp.put_scalar(&joined);
    Status::Ok
}

fn length(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let Some(n) = interp.machine.heap.scalar_bytes(v).map(len_i64) else {
        interp.put_null();
        interp.machine.fail(ErrorKind::ScalarExpected);
        return Status::Error;
    };
    interp.put_int(n);
    Status::Ok
}

/// `string org num substr`: `num` bytes starting at `org`, cut short at
/// the end of the string. A non-positive `org` or `num` gives "".
fn substr(interp: &mut Interpreter) -> Status {
    let num = interp.machine.pop_int();
    let org = interp.machine.pop_int();
    let s = interp.machine.pop();
    let text = interp.machine.heap.text(s);

    let piece = if num <= 0 || org <= 0 {
        &[][..]
    } else {
        let start = clamp(org - 1, text.len());
        let end = clamp(org.saturating_sub(1).saturating_add(num), text.len());
        &text[start..end]
    };
    let piece = piece.to_vec();
    interp.put_scalar(&piece);
    Status::Ok
}

/// `string offset size new splice`: replace `size` bytes starting at
/// `offset` with `new`. Out-of-range offsets are clamped, so an offset
/// past the end appends.
fn splice(interp: &mut Interpreter) -> Status {
    let new = interp.machine.pop();
    let size = interp.machine.pop_int();
    let offset = interp.machine.pop_int();
    let s = interp.machine.pop();

    let heap = &interp.machine.heap;
    let src = heap.text(s);
    let offset = offset.saturating_sub(1);
    let keep = clamp(offset, src.len());
    let resume = clamp(offset.saturating_add(size), src.len()).max(keep);

    let mut out = Vec::with_capacity(src.len() + heap.text(new).len());
    out.extend_from_slice(&src[..keep]);
    out.extend_from_slice(heap.text(new));
    out.extend_from_slice(&src[resume..]);
    interp.put_scalar(&out);
    Status::Ok
}

/// `string needle instr`: 1-based position of the first occurrence, or 0.
fn instr(interp: &mut Interpreter) -> Status {
    let needle = interp.machine.pop();
    let s = interp.machine.pop();
    let Some(s) = scalar_operand(interp, s) else {
        return Status::Error;
    };
    let Some(needle) = scalar_operand(interp, needle) else {
        return Status::Error;
    };

    let pos = (0..s.len())
        .find(|&i| s[i..].starts_with(&needle))
        .map_or(0, |i| i + 1);
    interp.put_int(i64::try_from(pos).unwrap_or(0));
    Status::Ok
}

/// `string separators split`: a Null-terminated list of the non-empty
/// pieces between any of the separator bytes. With no separators, one
/// piece per byte.
fn split(interp: &mut Interpreter) -> Status {
    let separators = interp.machine.pop();
    let s = interp.machine.pop();
    interp.put_null();
    let Some(s) = scalar_operand(interp, s) else {
        return Status::Error;
    };
    let Some(separators) = scalar_operand(interp, separators) else {
        return Status::Error;
    };

    if separators.is_empty() {
        for byte in s.chunks(1) {
            interp.put_scalar(byte);
        }
    } else {
        for piece in s
            .split(|c| separators.contains(c))
            .filter(|piece| !piece.is_empty())
        {
            interp.put_scalar(piece);
        }
    }
    Status::Ok
}
