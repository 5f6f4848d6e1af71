//! Flat storage for a parsed script's expressions.

use crate::ast::{Expr, MapEntry, MapEntryRange};
use crate::{ExprId, ExprRange};

#[expect(
    clippy::cast_possible_truncation,
    reason = "scripts are bounded by u32 byte offsets, so node counts fit in u32"
)]
#[inline]
fn index_u32(len: usize) -> u32 {
    len as u32
}

/// Contiguous storage for all expressions of one script.
///
/// Child references are `ExprId` indices; lists are ranges into
/// `expr_lists` or `map_entries`.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    map_entries: Vec<MapEntry>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heuristic: roughly one expression per 8 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 8;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 2),
            map_entries: Vec::new(),
        }
    }

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(index_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// # Panics
    /// Panics if `id` did not come from this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = index_u32(self.expr_lists.len());
        self.expr_lists.extend(exprs);
        ExprRange::new(start, index_u32(self.expr_lists.len()) - start)
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    pub fn alloc_map_entries(
        &mut self,
        entries: impl IntoIterator<Item = MapEntry>,
    ) -> MapEntryRange {
        let start = index_u32(self.map_entries.len());
        self.map_entries.extend(entries);
        MapEntryRange {
            start,
            len: index_u32(self.map_entries.len()) - start,
        }
    }

    #[inline]
    pub fn get_map_entries(&self, range: MapEntryRange) -> &[MapEntry] {
        let start = range.start as usize;
        &self.map_entries[start..start + range.len as usize]
    }
}
