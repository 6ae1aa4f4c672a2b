//! Seeded draw stream - the deterministic random source under every generator
//!
//! Every value in the universe is a pure function of (seed, channel). There is
//! no shared RNG state: each generated element owns a disjoint block of
//! channels (`index * CHANNEL_STRIDE + k`), so element `i` can be regenerated
//! without touching element `i - 1`. That property is what makes sparse,
//! on-demand generation possible.

// ============================================================================
// Constants
// ============================================================================

/// Channel block reserved per generated element.
///
/// Generators derive per-element channels as `index * CHANNEL_STRIDE + k`.
/// A single element never draws anywhere near 1000 values, so blocks of
/// sibling elements cannot collide.
pub const CHANNEL_STRIDE: i64 = 1000;

/// Multiplier for the sine-fract transform.
const SIN_SCALE: f64 = 10_000.0;

// ============================================================================
// SeededStream
// ============================================================================

/// Stateless deterministic draw source keyed by an integer seed.
///
/// The transform is the classic `fract(sin(n) * 10000)` hash. Statistical
/// quality is deliberately modest (the output only has to look random); what
/// matters is bit-for-bit reproducibility, which `libm::sin` guarantees
/// across platforms where the std implementation does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededStream {
    seed: i64,
}

impl SeededStream {
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Draw a value in [0, 1) at the given channel.
    ///
    /// `seed + channel` must stay within f64's exact integer range (|n| <
    /// 2^53); seeds are 32-bit in practice and channels are small multiples
    /// of element indices, so this holds by a wide margin.
    pub fn unit(&self, channel: i64) -> f64 {
        let n = self.seed.wrapping_add(channel) as f64;
        let s = libm::sin(n) * SIN_SCALE;
        s - s.floor()
    }

    /// Draw a value in [lo, hi) at the given channel.
    pub fn range(&self, channel: i64, lo: f64, hi: f64) -> f64 {
        lo + self.unit(channel) * (hi - lo)
    }

    /// Draw an index in [0, len) at the given channel. Returns 0 for an
    /// empty length so callers can guard with `is_empty` themselves.
    pub fn index(&self, channel: i64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let idx = (self.unit(channel) * len as f64) as usize;
        idx.min(len - 1)
    }

    /// Bernoulli draw at the given channel.
    pub fn chance(&self, channel: i64, probability: f64) -> bool {
        self.unit(channel) < probability
    }

    /// Cursor over consecutive channels starting at `base`.
    pub fn cursor(&self, base: i64) -> DrawCursor<'_> {
        DrawCursor {
            stream: self,
            channel: base,
        }
    }
}

// ============================================================================
// DrawCursor
// ============================================================================

/// Explicit local draw position within one element's channel block.
///
/// Replaces the shared-mutable-seed pattern: the cursor is created at an
/// element's base channel, bumped once per draw, and dropped when the element
/// is complete. Two cursors over disjoint blocks are provably independent.
pub struct DrawCursor<'a> {
    stream: &'a SeededStream,
    channel: i64,
}

impl<'a> DrawCursor<'a> {
    pub fn unit(&mut self) -> f64 {
        let value = self.stream.unit(self.channel);
        self.channel += 1;
        value
    }

    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            self.channel += 1;
            return 0;
        }
        let idx = (self.unit() * len as f64) as usize;
        idx.min(len - 1)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Skip ahead without drawing; keeps later draws aligned when a branch
    /// draws fewer values than its sibling branch.
    pub fn skip(&mut self, count: i64) {
        self.channel += count;
    }

    pub fn channel(&self) -> i64 {
        self.channel
    }
}

// ============================================================================
// String hashing
// ============================================================================

/// FNV-1a 64-bit hash.
///
/// Used where a value must be keyed by a string deterministically across
/// runs (per-system stream seeds, texture variant selection). Std's hasher
/// is randomly keyed per process and cannot be used here.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    fnv1a_continue(FNV_OFFSET_BASIS, bytes)
}

/// Continue an FNV-1a hash from a previous state, for folding a sequence of
/// byte strings (e.g. every star id in a population) into one value.
pub fn fnv1a_continue(state: u64, bytes: &[u8]) -> u64 {
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = state;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Initial state for [`fnv1a_continue`].
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

// ============================================================================
// Tests
// ============================================================================
