pub use hl7_toolchain_diagnostics::{Diagnostic, LineIndex, Severity, Span, codes};
