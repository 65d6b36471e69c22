//! End-to-end tests for the cybind pipeline.

#[cfg(test)]
mod pipeline;
#[cfg(test)]
mod utils;
