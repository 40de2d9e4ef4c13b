//! gradebook-report — Printable transcript documents.
//!
//! Renders a [`gradebook_core::report::TranscriptReport`] as a
//! self-contained HTML page suitable for printing or archiving.

pub mod html;
