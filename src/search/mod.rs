// ---------------------------------------------------------------------------
// Exhaustive endpoint search with SIMD dispatch.
//
// Architecture: generic `#[inline(always)]` kernels over `I32x4` hold the
// scan loops. One `#[arcane]` wrapper per backend enables target features and
// monomorphizes them; `incant!` picks the wrapper once per intensity block,
// not once per tuple.
// ---------------------------------------------------------------------------

//! Best-match search over every endpoint pair.
//!
//! For each tuple (intensity, green, range, mapping) the search reconstructs
//! the ETC1 green targets, then tries every DXT1 endpoint pair in high-major
//! order and keeps the first one with the lowest squared error over the
//! active selector slots.
//!
//! ```rust
//! use etcdxt::{EndpointBits, Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::default().with_bits(EndpointBits::Five);
//! let table = Generator::new(config)?.generate();
//! assert_eq!(table.entries().len(), 8 * 32 * 6 * 10);
//! # Ok::<(), etcdxt::TableError>(())
//! ```

use alloc::vec;
use alloc::vec::Vec;

use archmage::{ScalarToken, incant};

#[cfg(target_arch = "x86_64")]
use archmage::{X64V2Token, arcane};

#[cfg(target_arch = "aarch64")]
use archmage::{NeonToken, arcane};

#[cfg(target_arch = "wasm32")]
use archmage::{Wasm128Token, arcane};

use crate::endpoints::{ColorTable, EndpointBits, interpolate};
use crate::error::TableError;
use crate::etc1::{BASE_LEVELS, INTENSITY_LEVELS, subblock_channel};
use crate::lanes::{I32x4, Lanes};
use crate::selectors::{
    DEFAULT_MAPPINGS, DEFAULT_RANGES, Descriptors, SelectorMapping, SelectorRange, Slot,
};
use crate::table::{ResultTable, Solution, TableLayout, Tuple};


// ===========================================================================
// Configuration
// ===========================================================================

/// How the endpoint space is scanned. Both produce identical tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScanStrategy {
    /// Precomputed palettes and 4-lane vector arithmetic, on the best
    /// instruction set available at runtime.
    #[default]
    Batched,
    /// Plain nested loops over high, low and the active slots.
    Scalar,
}

/// Everything a generation run depends on.
///
/// `Default` is the basis universal green-channel setup: 6-bit endpoints,
/// [`DEFAULT_RANGES`], [`DEFAULT_MAPPINGS`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub bits: EndpointBits,
    pub ranges: Vec<SelectorRange>,
    pub mappings: Vec<SelectorMapping>,
    pub strategy: ScanStrategy,
    /// Stop scanning a tuple once an exact match is found. Never changes the
    /// result.
    pub early_exit: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bits: EndpointBits::Six,
            ranges: DEFAULT_RANGES.to_vec(),
            mappings: DEFAULT_MAPPINGS.to_vec(),
            strategy: ScanStrategy::Batched,
            early_exit: true,
        }
    }
}

impl GeneratorConfig {
    pub fn with_bits(mut self, bits: EndpointBits) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_ranges(mut self, ranges: &[SelectorRange]) -> Self {
        self.ranges = ranges.to_vec();
        self
    }

    pub fn with_mappings(mut self, mappings: &[SelectorMapping]) -> Self {
        self.mappings = mappings.to_vec();
        self
    }

    pub fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }
}

// ===========================================================================
// Generator
// ===========================================================================

/// A validated configuration plus the precomputed color table and selector
/// descriptors.
///
/// Generation only reads from it, so one generator can fill disjoint
/// intensity blocks from several threads at once.
#[derive(Clone, Debug)]
pub struct Generator {
    config: GeneratorConfig,
    layout: TableLayout,
    colors: ColorTable,
    descriptors: Descriptors,
}

impl Generator {
    /// Validates `config` and precomputes everything independent of the
    /// tuple being solved.
    pub fn new(config: GeneratorConfig) -> Result<Self, TableError> {
        let descriptors = Descriptors::new(&config.ranges, &config.mappings)?;
        Ok(Self {
            layout: TableLayout::new(config.ranges.len(), config.mappings.len()),
            colors: ColorTable::new(config.bits),
            descriptors,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[inline]
    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    #[inline]
    pub fn color_table(&self) -> &ColorTable {
        &self.colors
    }

    /// Builds the whole table.
    pub fn generate(&self) -> ResultTable {
        let mut entries = vec![Solution::default(); self.layout.len()];
        for (intensity, block) in entries
            .chunks_exact_mut(self.layout.intensity_len())
            .enumerate()
        {
            self.fill(intensity, block);
        }
        log::debug!("generated {} entries", entries.len());
        ResultTable::from_parts(self.layout, entries)
    }

    /// Builds the whole table into `out`, which must hold exactly
    /// [`TableLayout::len`] entries.
    pub fn generate_into(&self, out: &mut [Solution]) -> Result<(), TableError> {
        check_len(self.layout.len(), out.len())?;
        for (intensity, block) in out
            .chunks_exact_mut(self.layout.intensity_len())
            .enumerate()
        {
            self.fill(intensity, block);
        }
        Ok(())
    }

    /// Builds the block for one intensity level into `out`, which must hold
    /// exactly [`TableLayout::intensity_len`] entries. Blocks are disjoint
    /// and laid out consecutively, so callers can split a table buffer with
    /// `chunks_mut` and fill the pieces in parallel.
    ///
    /// # Panics
    ///
    /// If `intensity >= 8`.
    pub fn generate_intensity(
        &self,
        intensity: usize,
        out: &mut [Solution],
    ) -> Result<(), TableError> {
        assert!(
            intensity < INTENSITY_LEVELS,
            "intensity out of range: {intensity}"
        );
        check_len(self.layout.intensity_len(), out.len())?;
        self.fill(intensity, out);
        Ok(())
    }

    /// Solves a single tuple with the configured strategy.
    ///
    /// # Panics
    ///
    /// If any tuple coordinate is out of range for this generator.
    pub fn solve(&self, t: Tuple) -> Solution {
        assert!(
            t.intensity < INTENSITY_LEVELS && t.green < BASE_LEVELS,
            "tuple out of range: {t:?}"
        );
        let targets = subblock_channel(t.green as u8, t.intensity);
        let range = self.config.ranges[t.range];
        let mapping = self.config.mappings[t.mapping];
        match self.config.strategy {
            ScanStrategy::Batched => {
                scan_batched(&self.colors, targets, range, mapping, self.config.early_exit)
            }
            ScanStrategy::Scalar => {
                scan_scalar(self.config.bits, targets, range, mapping, self.config.early_exit)
            }
        }
    }

    fn fill(&self, intensity: usize, out: &mut [Solution]) {
        log::debug!(
            "intensity {intensity}: {} tuples, {}-bit endpoints, {:?} scan",
            out.len(),
            self.config.bits.bits(),
            self.config.strategy
        );
        match self.config.strategy {
            ScanStrategy::Batched => {
                let job = Job {
                    colors: &self.colors,
                    descriptors: &self.descriptors,
                    intensity,
                    early_exit: self.config.early_exit,
                };
                incant!(fill_block(job, out), [v2, neon, wasm128, scalar]);
            }
            ScanStrategy::Scalar => fill_block_plain(&self.config, intensity, out),
        }
    }
}

#[inline]
fn check_len(needed: usize, actual: usize) -> Result<(), TableError> {
    if needed == actual {
        Ok(())
    } else {
        Err(TableError::OutputSizeMismatch { needed, actual })
    }
}

/// Final bookkeeping shared by both strategies.
#[inline]
fn solution(bits: EndpointBits, index: usize, error: u32) -> Solution {
    assert!(
        error <= 0xFFFF,
        "squared error {error} does not fit the 16-bit table field"
    );
    let (low, high) = bits.split(index);
    Solution::new(low, high, error as u16)
}

// ===========================================================================
// Batched strategy
// ===========================================================================

/// Read-only inputs for filling one intensity block.
#[derive(Clone, Copy)]
struct Job<'a> {
    colors: &'a ColorTable,
    descriptors: &'a Descriptors,
    intensity: usize,
    early_exit: bool,
}

#[inline(always)]
fn fill_block_lanes<V: I32x4>(t: V, job: Job<'_>, out: &mut [Solution]) {
    let d = job.descriptors;
    let per_green = d.range_masks.len() * d.shuffles.len();
    assert_eq!(out.len(), BASE_LEVELS * per_green, "block size does not match descriptors");
    for (green, row) in out.chunks_exact_mut(per_green).enumerate() {
        let [a, b, c, e] = subblock_channel(green as u8, job.intensity).map(i32::from);
        let targets = t.init(a, b, c, e);
        for (slots, mask) in row.chunks_exact_mut(d.shuffles.len()).zip(&d.range_masks) {
            let mask = t.load(mask);
            let masked = t.and(targets, mask);
            let inactive = t.not(mask);
            for (slot, shuffle) in slots.iter_mut().zip(&d.shuffles) {
                let idx = t.or(t.load(shuffle), inactive);
                *slot = scan_lanes(t, job.colors, masked, idx, job.early_exit);
            }
        }
    }
}

/// `masked` holds the targets with inactive lanes zeroed; `idx` routes each
/// active slot to its palette lane and every inactive one to zero.
#[inline(always)]
fn scan_lanes<V: I32x4>(
    t: V,
    colors: &ColorTable,
    masked: V::Reg,
    idx: V::Reg,
    early_exit: bool,
) -> Solution {
    let mut best = i32::MAX;
    let mut best_index = 0;
    for (i, palette) in colors.entries().iter().enumerate() {
        let picked = t.shuffle_bytes(t.load(palette), idx);
        let diff = t.sub(picked, masked);
        let err = t.horizontal_sum(t.mul(diff, diff));
        if err < best {
            best = err;
            best_index = i;
            if early_exit && err == 0 {
                break;
            }
        }
    }
    solution(colors.bits(), best_index, best as u32)
}

#[inline(always)]
fn scan_one_lanes<V: I32x4>(t: V, colors: &ColorTable, q: &Query) -> Solution {
    let mask = t.load(&q.mask);
    let [a, b, c, e] = q.targets;
    let masked = t.and(t.init(a, b, c, e), mask);
    let idx = t.or(t.load(&q.shuffle), t.not(mask));
    scan_lanes(t, colors, masked, idx, q.early_exit)
}

struct Query {
    targets: [i32; 4],
    mask: Lanes,
    shuffle: Lanes,
    early_exit: bool,
}

fn fill_block_scalar(t: ScalarToken, job: Job<'_>, out: &mut [Solution]) {
    fill_block_lanes(t, job, out);
}

fn scan_one_scalar(t: ScalarToken, colors: &ColorTable, q: &Query) -> Solution {
    scan_one_lanes(t, colors, q)
}

#[cfg(target_arch = "x86_64")]
#[arcane]
fn fill_block_v2(t: X64V2Token, job: Job<'_>, out: &mut [Solution]) {
    fill_block_lanes(t, job, out);
}
#[cfg(target_arch = "x86_64")]
#[arcane]
fn scan_one_v2(t: X64V2Token, colors: &ColorTable, q: &Query) -> Solution {
    scan_one_lanes(t, colors, q)
}

#[cfg(target_arch = "aarch64")]
#[arcane]
fn fill_block_neon(t: NeonToken, job: Job<'_>, out: &mut [Solution]) {
    fill_block_lanes(t, job, out);
}
#[cfg(target_arch = "aarch64")]
#[arcane]
fn scan_one_neon(t: NeonToken, colors: &ColorTable, q: &Query) -> Solution {
    scan_one_lanes(t, colors, q)
}

#[cfg(target_arch = "wasm32")]
#[arcane]
fn fill_block_wasm128(t: Wasm128Token, job: Job<'_>, out: &mut [Solution]) {
    fill_block_lanes(t, job, out);
}
#[cfg(target_arch = "wasm32")]
#[arcane]
fn scan_one_wasm128(t: Wasm128Token, colors: &ColorTable, q: &Query) -> Solution {
    scan_one_lanes(t, colors, q)
}

/// Best pair for raw `targets` using the precomputed palettes in `colors`.
///
/// Targets outside `range` are ignored, whatever their value.
///
/// # Panics
///
/// If `range` or `mapping` is invalid.
pub fn scan_batched(
    colors: &ColorTable,
    targets: [u8; 4],
    range: SelectorRange,
    mapping: SelectorMapping,
    early_exit: bool,
) -> Solution {
    assert!(range.is_valid(), "invalid selector range {range:?}");
    assert!(mapping.is_valid(), "invalid selector mapping {mapping:?}");
    let q = Query {
        targets: targets.map(i32::from),
        mask: range.mask(),
        shuffle: mapping.shuffle(),
        early_exit,
    };
    let q = &q;
    incant!(scan_one(colors, q), [v2, neon, wasm128, scalar])
}

// ===========================================================================
// Scalar strategy
// ===========================================================================

/// Best pair for raw `targets`, computing every palette on the fly.
///
/// # Panics
///
/// If `range` or `mapping` is invalid.
pub fn scan_scalar(
    bits: EndpointBits,
    targets: [u8; 4],
    range: SelectorRange,
    mapping: SelectorMapping,
    early_exit: bool,
) -> Solution {
    assert!(range.is_valid(), "invalid selector range {range:?}");
    assert!(mapping.is_valid(), "invalid selector mapping {mapping:?}");
    let levels = bits.levels();
    let active = range.low as usize..=range.high as usize;

    let mut best = u32::MAX;
    let mut best_index = 0;
    'scan: for high in 0..levels {
        let high8 = bits.expand(high as u8);
        for low in 0..levels {
            let palette = interpolate(bits.expand(low as u8), high8);
            let err: u32 = active
                .clone()
                .map(|s| {
                    let value = match mapping.slot(s) {
                        Slot::Lane(l) => palette[l as usize],
                        Slot::Zero => 0,
                    };
                    let d = value.abs_diff(i32::from(targets[s]));
                    d * d
                })
                .sum();
            if err < best {
                best = err;
                best_index = high * levels + low;
                if early_exit && err == 0 {
                    break 'scan;
                }
            }
        }
    }
    solution(bits, best_index, best)
}

fn fill_block_plain(config: &GeneratorConfig, intensity: usize, out: &mut [Solution]) {
    let per_green = config.ranges.len() * config.mappings.len();
    for (green, row) in out.chunks_exact_mut(per_green).enumerate() {
        let targets = subblock_channel(green as u8, intensity);
        let tuples = config
            .ranges
            .iter()
            .flat_map(|r| config.mappings.iter().map(move |m| (*r, *m)));
        for (slot, (range, mapping)) in row.iter_mut().zip(tuples) {
            *slot = scan_scalar(config.bits, targets, range, mapping, config.early_exit);
        }
    }
}
