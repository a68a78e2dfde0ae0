//! The executor.
//!
//! Source is never compiled: every block, user word and control-flow body
//! is kept as text and re-tokenized each time it runs. [`Interpreter::execute_bytes`]
//! is the single loop that does this; it recurses through natives and code
//! symbols, so every entry goes through `ensure_sufficient_stack`.
//!
//! Within one call the loop tracks two counters:
//!
//! - comment depth: a token starting with `/*` opens a comment, `*/`
//!   closes one, and nothing is processed while any are open. A token that
//!   both starts with `/*` and ends with `*/` is a complete comment.
//! - block depth: `{` opens a block and `}` closes it. The tokens of an
//!   outermost block are joined with single spaces and pushed as Code
//!   instead of being run. An unmatched `}` ends the call.
//!
//! The incremental collector runs after every processed token.

mod literal;
mod tokenizer;

use filp_core::{ErrorKind, Kind, ValueData, ValueId};
use filp_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{Interpreter, Status};

use tokenizer::Tokens;

fn is_comment_open(token: &[u8]) -> bool {
    token.starts_with(b"/*")
}

fn is_whole_comment(token: &[u8]) -> bool {
    token.len() >= 4 && token.starts_with(b"/*") && token.ends_with(b"*/")
}

/// Whether an unknown name may be taken as a literal without bareword
/// mode.
fn is_numeric_looking(token: &[u8]) -> bool {
    matches!(token.first(), Some(c) if c.is_ascii_digit() || *c == b'-')
}

impl Interpreter {
    /// Run source bytes.
    ///
    /// Returns [`Status::Ok`] when the text is exhausted, or the first
    /// non-Ok status a token produced.
    #[tracing::instrument(level = "trace", skip_all, fields(len = code.len()))]
    pub fn execute_bytes(&mut self, code: &[u8]) -> Status {
        ensure_sufficient_stack(|| self.run(code))
    }

    fn run(&mut self, code: &[u8]) -> Status {
        let code = match code.strip_prefix(b"#!") {
            Some(rest) => match rest.iter().position(|&c| c == b'\n') {
                Some(eol) => &rest[eol..],
                None => return Status::Ok,
            },
            None => code,
        };

        let mut status = Status::Ok;
        let mut comments = 0usize;
        let mut nesting = 0i64;
        let mut block: Vec<u8> = Vec::new();

        for token in Tokens::new(code) {
            if is_comment_open(token) {
                if !is_whole_comment(token) {
                    comments += 1;
                }
                continue;
            }
            if token == b"*/" {
                comments = comments.saturating_sub(1);
                continue;
            }
            if comments > 0 {
                continue;
            }

            match token {
                b"}" => {
                    nesting -= 1;
                    if nesting < 0 {
                        break;
                    }
                    if nesting == 0 {
                        self.put_code(&block);
                        continue;
                    }
                }
                b"{" => {
                    nesting += 1;
                    if nesting == 1 {
                        block.clear();
                        continue;
                    }
                }
                _ => {}
            }

            if nesting > 0 {
                if !block.is_empty() {
                    block.push(b' ');
                }
                block.extend_from_slice(token);
                continue;
            }

            status = self.process_token(token);
            self.machine.sweep(false);
            if !status.is_ok() {
                break;
            }
        }

        status
    }

    /// Act on one token outside any block.
    pub(crate) fn process_token(&mut self, token: &[u8]) -> Status {
        trace!(token = %String::from_utf8_lossy(token), "token");

        match token {
            b"break" => return Status::Break,
            b"end" => return Status::End,
            _ => {}
        }

        match token.first() {
            Some(b'\'') => {
                let text = literal::single_quoted(token);
                self.put_scalar(text);
                return Status::Ok;
            }
            Some(b'"') => {
                let text = literal::double_quoted(&mut self.machine, token);
                self.put_scalar(&text);
                return Status::Ok;
            }
            Some(b'$') => {
                if let Err(overflow) = self.machine.push_symbol_value(&token[1..]) {
                    tracing::debug!(%overflow, "value dropped");
                }
                return Status::Ok;
            }
            _ => {}
        }

        if let Some(id) = self.machine.find_symbol(token) {
            let bound = self
                .machine
                .symbols
                .get(id)
                .map(|symbol| (symbol.kind(), symbol.value()));
            return match bound {
                Some((Kind::Native, v)) => match self.machine.heap.data(v) {
                    ValueData::Native(native) => {
                        let native = *native;
                        self.call_native(native)
                    }
                    _ => Status::Ok,
                },
                // A break inside a user word ends the word, not the caller.
                Some((Kind::Code, v)) => self.execute_value(v).absorb_break(),
                _ => {
                    self.put_scalar(token);
                    Status::Ok
                }
            };
        }

        if let Some(name) = token.strip_prefix(b"/") {
            self.put_scalar(name);
        } else if self.machine.flags.bareword || is_numeric_looking(token) {
            self.put_scalar(token);
        } else {
            self.machine.fail_with(ErrorKind::TokenNotFound, token);
            return Status::Error;
        }
        Status::Ok
    }

    /// Run a value as code.
    ///
    /// Scalars and Code are executed as source text and natives are
    /// called. Any other kind does nothing. The value is held for the
    /// duration of the call.
    pub fn execute_value(&mut self, v: ValueId) -> Status {
        self.machine.heap.retain(v);
        let status = match self.machine.heap.data(v) {
            ValueData::Scalar(bytes) | ValueData::Code(bytes) => {
                let code = bytes.to_vec();
                self.execute_bytes(&code)
            }
            ValueData::Native(native) => {
                let native = *native;
                self.call_native(native)
            }
            _ => Status::Ok,
        };
        self.machine.heap.release(v);
        status
    }
}

#[cfg(test)]
mod tests;
