//! Text emitters.
//!
//! Each emitter is a pure function from registry content and
//! [`EmitOptions`](crate::EmitOptions) to a `String`; running it twice on the
//! same input yields identical bytes.

mod c_header;
mod fortran;
mod wrap_line;

pub use c_header::c_header;
pub use fortran::{descriptor_module, fortran_module};
pub use wrap_line::wrap_line;

/// Line-oriented string builder.
#[derive(Debug, Default)]
pub(crate) struct CodeWriter {
    out: String,
}

impl CodeWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append `text` and a newline.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Append pre-formatted text, which must end with a newline.
    pub(crate) fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
