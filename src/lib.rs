//! # etcdxt
//!
//! Precomputed ETC1 → DXT1 endpoint tables for texture transcoders.
//!
//! A transcoder that turns ETC1 blocks into DXT1 blocks on the fly cannot
//! afford to search for DXT1 endpoints per block. Instead it looks them up:
//! for every ETC1 intensity table, 5-bit base value, active selector range and
//! selector-to-palette mapping, this crate finds the DXT1 endpoint pair whose
//! interpolated palette best reproduces the ETC1 sub-block, by exhaustive
//! search.
//!
//! The search runs on a tiny 4×i32 vector layer ([`lanes`]) with backends for
//! x86-64 SSE4.1, ARM NEON and WASM SIMD128, picked at runtime, with a scalar
//! fallback. Every backend produces bit-identical tables.
//!
//! ```rust
//! use etcdxt::{EndpointBits, Generator, GeneratorConfig, Tuple};
//!
//! let generator = Generator::new(GeneratorConfig::default().with_bits(EndpointBits::Five))?;
//! let table = generator.generate();
//!
//! let best = table.get(Tuple { intensity: 0, green: 0, range: 0, mapping: 6 });
//! assert_eq!(best, generator.solve(Tuple { intensity: 0, green: 0, range: 0, mapping: 6 }));
//! # Ok::<(), etcdxt::TableError>(())
//! ```
//!
//! ## Feature flags
//!
//! - **`std`** (default): `std::error::Error` for the error types and
//!   runtime CPU feature detection in archmage. Without it the crate is
//!   `no_std` + `alloc`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod endpoints;
pub mod error;
pub mod etc1;
pub mod lanes;
pub mod search;
pub mod selectors;
pub mod table;

pub use endpoints::{ColorTable, EndpointBits};
pub use error::{TableError, VerifyError};
pub use search::{Generator, GeneratorConfig, ScanStrategy, scan_batched, scan_scalar};
pub use selectors::{DEFAULT_MAPPINGS, DEFAULT_RANGES, SelectorMapping, SelectorRange, Slot};
pub use table::{ResultTable, Solution, TableLayout, Tuple, solutions_from_le_bytes};
