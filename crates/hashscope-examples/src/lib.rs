//! Example applications for hashscope.
//!
//! - `dissect_demo` - builds a random linear model over a small hash space,
//!   hashes a synthetic vocabulary into it and reports which names matter
//! - `mapping_sweep` - prints how each coordinate mapping bends the real line
//!
//! # Running Examples
//!
//! ```bash
//! cargo run -p hashscope-examples --bin dissect_demo -- --dim 64 --vocab 300 --top 5
//! cargo run -p hashscope-examples --bin mapping_sweep -- --low 1e-4 --high 1
//! ```

// This crate is primarily for examples, no lib code needed.
