//! Integration tests: full runs from feed files to report.

mod pipeline;
