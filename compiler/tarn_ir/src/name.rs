//! `Name`: a script identifier or string literal after interning.
//!
//! Names are plain `u32`s so AST nodes stay `Copy`. The top bits pick one of
//! the interner's lock shards and the rest index into that shard's table;
//! `StringInterner::lookup` turns a name back into text.

use std::fmt;

const SHARD_SHIFT: u32 = 28;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// `""`, interned up front in shard 0.
    pub const EMPTY: Name = Name(0);

    pub const NUM_SHARDS: usize = 1 << (u32::BITS - SHARD_SHIFT);

    /// Largest slot a shard can hand out.
    pub const MAX_LOCAL: u32 = (1 << SHARD_SHIFT) - 1;

    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << SHARD_SHIFT) | local)
    }

    /// Build a name from its packed form without going through an interner.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Name(bits)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> SHARD_SHIFT) as usize
    }

    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name#{}.{}", self.shard(), self.local())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
