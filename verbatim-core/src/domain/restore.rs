//! Inverse of the templater: paste phrases back over placeholders

use super::error::Result;
use super::placeholder::Placeholder;
use super::side_channel::SideChannel;

/// Restored text and the number of placeholders that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    /// Tokens joined by single spaces, phrases expanded
    pub text: String,
    /// Unresolvable placeholders replaced with the empty string
    pub errors: usize,
}

/// Resolves `DNT(_<TYPE>)?_<N>` tokens against a side channel
#[derive(Debug, Clone, Copy, Default)]
pub struct Restorer {
    ignore_errors: bool,
}

impl Restorer {
    /// With `ignore_errors`, unresolvable placeholders become empty strings
    /// and are counted. Otherwise the first one aborts restoration.
    pub fn new(ignore_errors: bool) -> Self {
        Self { ignore_errors }
    }

    /// Restore one transformed token sequence
    pub fn restore<S: AsRef<str>>(&self, tokens: &[S], side_channel: &SideChannel) -> Result<Restored> {
        let mut errors = 0;
        let mut out: Vec<&str> = Vec::with_capacity(tokens.len());
        for tok in tokens {
            let tok = tok.as_ref();
            let Some(placeholder) = Placeholder::parse(tok) else {
                out.push(tok);
                continue;
            };
            match side_channel.lookup(&placeholder) {
                Ok(phrase) => out.push(phrase),
                Err(err) if self.ignore_errors => {
                    log::debug!("could not restore {tok}: {err}");
                    errors += 1;
                    out.push("");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(Restored {
            text: out.join(" "),
            errors,
        })
    }
}
