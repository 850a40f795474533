//! Polynomial multiplication kernels.
//!
//! Two kernels produce identical term sets:
//!
//! - [`mul_simple`]: a single-threaded reference loop over all monomial
//!   pairs, with per-product overflow checking
//! - [`mul_mt_hm`]: the parallel kernel. It proves up front that no
//!   monomial product can overflow, groups both operands' terms by segment,
//!   and hands each output segment to a rayon task that owns a local hash
//!   map. The finished segments are installed into the destination without
//!   rehashing.
//!
//! Both kernels accept an optional truncation bound `(d, S)`: a product
//! term is kept only when its partial degree over `S` does not exceed `d`.
//! When `S` is omitted it defaults to the full symbol set.
//!
//! Routing a pair `(t_f, t_g)` to its output segment never forms the
//! product monomial: the hash projection is additive, so the destination
//! segment is a function of the operands' hash words.

use std::collections::hash_map::Entry;

use dashu::integer::IBig;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use noether_integers::Integer;
use noether_pack::Packable;
use noether_rings::Ring;
use noether_symbols::SymbolSet;

use crate::error::PolyError;
use crate::monomial::PackedMonomial;
use crate::polynomial::{segment_of, Polynomial, MAX_LOG2_SEGMENTS};

/// Rough number of output terms a segment is sized for when the multiplier
/// chooses the segment count itself.
const TARGET_SEGMENT_LOAD: usize = 4096;

/// Cap on the automatically chosen log2 segment count.
const MAX_AUTO_LOG2_SEGMENTS: u32 = 8;

/// Cap on the per-segment hash map capacity reserved up front.
const MAX_SEGMENT_CAPACITY: usize = 1 << 17;

/// Multiplies `f` and `g` into `h` with the single-threaded kernel.
///
/// Preconditions: `h`, `f` and `g` share one symbol set and `h` is empty.
/// On error `h` is left empty.
///
/// # Errors
///
/// Returns an error when the preconditions are violated or a monomial
/// product overflows the packed exponent range.
pub fn mul_simple<T, R>(
    h: &mut Polynomial<T, R>,
    f: &Polynomial<T, R>,
    g: &Polynomial<T, R>,
) -> Result<(), PolyError>
where
    T: Packable + Into<IBig>,
    R: Ring,
{
    mul_simple_impl(h, f, g, None)
}

/// Multiplies `f` and `g` into `h`, keeping only the terms whose partial
/// degree over `symbols` (default: the full symbol set) is at most
/// `max_degree`.
///
/// # Errors
///
/// Returns an error when the preconditions are violated or a monomial
/// product overflows the packed exponent range.
pub fn mul_simple_truncated<T, R>(
    h: &mut Polynomial<T, R>,
    f: &Polynomial<T, R>,
    g: &Polynomial<T, R>,
    max_degree: &Integer,
    symbols: Option<&SymbolSet>,
) -> Result<(), PolyError>
where
    T: Packable + Into<IBig>,
    R: Ring,
{
    let truncation = Truncation::new(f.symbol_set(), max_degree, symbols);
    mul_simple_impl(h, f, g, Some(&truncation))
}

/// Multiplies `f` and `g` into `h` with the parallel segmented kernel.
///
/// Preconditions: `h`, `f` and `g` share one symbol set and `h` is empty.
/// If `h` has a non-zero preset segment count it is honored; otherwise a
/// count is selected from the problem size and the thread pool width. On
/// error `h` is left empty.
///
/// # Errors
///
/// Returns an error when the preconditions are violated or the pre-check
/// detects that some monomial product could overflow the packed exponent
/// range.
pub fn mul_mt_hm<T, R>(
    h: &mut Polynomial<T, R>,
    f: &Polynomial<T, R>,
    g: &Polynomial<T, R>,
) -> Result<(), PolyError>
where
    T: Packable + Into<IBig>,
    R: Ring + Send + Sync,
{
    mul_mt_hm_impl(h, f, g, None)
}

/// Truncated variant of [`mul_mt_hm`]; see [`mul_simple_truncated`] for
/// the truncation semantics.
///
/// # Errors
///
/// Returns an error when the preconditions are violated or the pre-check
/// detects that some monomial product could overflow the packed exponent
/// range.
pub fn mul_mt_hm_truncated<T, R>(
    h: &mut Polynomial<T, R>,
    f: &Polynomial<T, R>,
    g: &Polynomial<T, R>,
    max_degree: &Integer,
    symbols: Option<&SymbolSet>,
) -> Result<(), PolyError>
where
    T: Packable + Into<IBig>,
    R: Ring + Send + Sync,
{
    let truncation = Truncation::new(f.symbol_set(), max_degree, symbols);
    mul_mt_hm_impl(h, f, g, Some(&truncation))
}

/// A resolved truncation bound: the degree limit plus the slot indices the
/// partial degree ranges over.
struct Truncation {
    bound: Integer,
    indices: Vec<usize>,
}

impl Truncation {
    fn new(full: &SymbolSet, max_degree: &Integer, symbols: Option<&SymbolSet>) -> Self {
        let indices = match symbols {
            Some(symbols) => full.intersection_indices(symbols),
            None => (0..full.len()).collect(),
        };
        Self {
            bound: max_degree.clone(),
            indices,
        }
    }
}

fn check_preconditions<T, R>(
    h: &Polynomial<T, R>,
    f: &Polynomial<T, R>,
    g: &Polynomial<T, R>,
) -> Result<(), PolyError>
where
    T: Packable,
    R: Ring,
{
    if f.symbol_set() != g.symbol_set() {
        return Err(PolyError::SymbolSetMismatch {
            left: f.symbol_set().to_string(),
            right: g.symbol_set().to_string(),
        });
    }
    if h.symbol_set() != f.symbol_set() {
        return Err(PolyError::SymbolSetMismatch {
            left: h.symbol_set().to_string(),
            right: f.symbol_set().to_string(),
        });
    }
    if !h.is_empty() {
        return Err(PolyError::NonEmptyDestination);
    }
    Ok(())
}

fn mul_simple_impl<T, R>(
    h: &mut Polynomial<T, R>,
    f: &Polynomial<T, R>,
    g: &Polynomial<T, R>,
    truncation: Option<&Truncation>,
) -> Result<(), PolyError>
where
    T: Packable + Into<IBig>,
    R: Ring,
{
    check_preconditions(h, f, g)?;
    let arity = f.arity();

    for (mf, cf) in f.iter() {
        for (mg, cg) in g.iter() {
            let monomial = match mf.checked_mul(mg, arity) {
                Ok(monomial) => monomial,
                Err(e) => {
                    h.clear_terms();
                    return Err(e.into());
                }
            };
            if let Some(truncation) = truncation {
                if monomial.partial_degree(arity, &truncation.indices) > truncation.bound {
                    continue;
                }
            }
            h.insert_or_accumulate(monomial, cf.clone() * cg.clone());
        }
    }
    Ok(())
}

fn mul_mt_hm_impl<T, R>(
    h: &mut Polynomial<T, R>,
    f: &Polynomial<T, R>,
    g: &Polynomial<T, R>,
    truncation: Option<&Truncation>,
) -> Result<(), PolyError>
where
    T: Packable + Into<IBig>,
    R: Ring + Send + Sync,
{
    check_preconditions(h, f, g)?;
    if f.is_empty() || g.is_empty() {
        return Ok(());
    }

    let arity = f.arity();
    check_product_bounds(f, g, arity)?;

    let log2 = if h.n_segments() > 0 {
        h.n_segments()
    } else {
        select_log2_segments(f.len(), g.len())
    };
    let n_segments = 1usize << log2;

    // Group both operands by the segment of their own hash word. Since the
    // hash projection is additive, a pair from f-group i and g-group j
    // lands in output segment (i + j) mod 2^n.
    let f_groups = group_terms(f, log2, truncation, arity);
    let g_groups = group_terms(g, log2, truncation, arity);

    let capacity = (f.len().saturating_mul(g.len()) >> log2)
        .clamp(1, MAX_SEGMENT_CAPACITY);

    let segments: Vec<FxHashMap<PackedMonomial<T>, R>> = (0..n_segments)
        .into_par_iter()
        .map(|sigma| {
            let mut segment: FxHashMap<PackedMonomial<T>, R> =
                FxHashMap::with_capacity_and_hasher(capacity, Default::default());
            for (i, f_group) in f_groups.iter().enumerate() {
                if f_group.is_empty() {
                    continue;
                }
                let j = (sigma + n_segments - i) & (n_segments - 1);
                for (mf, cf, df) in f_group {
                    for (mg, cg, dg) in &g_groups[j] {
                        if let Some(truncation) = truncation {
                            if df.clone() + dg.clone() > truncation.bound {
                                continue;
                            }
                        }
                        // Safe: the pre-check proved every slot sum stays
                        // in range.
                        let monomial = mf.mul_unchecked(mg);
                        let coefficient = (*cf).clone() * (*cg).clone();
                        if coefficient.is_zero() {
                            continue;
                        }
                        match segment.entry(monomial) {
                            Entry::Occupied(mut entry) => {
                                let sum = entry.get().clone() + coefficient;
                                if sum.is_zero() {
                                    entry.remove();
                                } else {
                                    *entry.get_mut() = sum;
                                }
                            }
                            Entry::Vacant(entry) => {
                                entry.insert(coefficient);
                            }
                        }
                    }
                }
            }
            segment
        })
        .collect();

    h.install_segments(log2, segments);
    Ok(())
}

/// Snapshot of one operand's terms, bucketed by segment: the monomial, its
/// coefficient, and (when truncating) its partial degree.
type TermGroups<'a, T, R> = Vec<Vec<(PackedMonomial<T>, &'a R, Integer)>>;

fn group_terms<'a, T, R>(
    p: &'a Polynomial<T, R>,
    log2: u32,
    truncation: Option<&Truncation>,
    arity: u32,
) -> TermGroups<'a, T, R>
where
    T: Packable + Into<IBig>,
    R: Ring,
{
    let mut groups: TermGroups<'a, T, R> = (0..1usize << log2).map(|_| Vec::new()).collect();
    for (monomial, coefficient) in p.iter() {
        let degree = match truncation {
            Some(truncation) => monomial.partial_degree(arity, &truncation.indices),
            None => Integer::new(0),
        };
        groups[segment_of(monomial.hash_word(), log2)].push((*monomial, coefficient, degree));
    }
    groups
}

/// Verifies that no pairwise monomial product can escape the per-slot
/// exponent range, by bounding every slot sum with the operands' per-slot
/// extremes. Runs in arbitrary precision so the check itself cannot
/// overflow.
fn check_product_bounds<T, R>(
    f: &Polynomial<T, R>,
    g: &Polynomial<T, R>,
    arity: u32,
) -> Result<(), PolyError>
where
    T: Packable + Into<IBig>,
    R: Ring,
{
    if arity == 0 {
        return Ok(());
    }
    let (Some(f_extremes), Some(g_extremes)) = (slot_extremes(f, arity), slot_extremes(g, arity))
    else {
        return Ok(());
    };

    let (lo, hi) = T::slot_bounds(arity);
    let (lo, hi): (IBig, IBig) = (lo.into(), hi.into());
    for (slot, ((f_min, f_max), (g_min, g_max))) in
        f_extremes.into_iter().zip(g_extremes).enumerate()
    {
        if f_min + g_min < lo || f_max + g_max > hi {
            return Err(PolyError::ProductOverflow {
                slot,
                min: lo.to_string(),
                max: hi.to_string(),
            });
        }
    }
    Ok(())
}

/// Per-slot minimum and maximum exponents over all terms, or `None` for an
/// empty polynomial.
fn slot_extremes<T, R>(p: &Polynomial<T, R>, arity: u32) -> Option<Vec<(IBig, IBig)>>
where
    T: Packable + Into<IBig>,
    R: Ring,
{
    let mut extremes: Option<Vec<(T, T)>> = None;
    for (monomial, _) in p.iter() {
        let exponents = monomial.exponents(arity);
        match &mut extremes {
            None => extremes = Some(exponents.iter().map(|&e| (e, e)).collect()),
            Some(extremes) => {
                for ((min, max), &e) in extremes.iter_mut().zip(exponents.iter()) {
                    if e < *min {
                        *min = e;
                    }
                    if e > *max {
                        *max = e;
                    }
                }
            }
        }
    }
    extremes.map(|v| v.into_iter().map(|(a, b)| (a.into(), b.into())).collect())
}

/// Picks a log2 segment count approximating
/// `min(worker threads, pair count / target load)`.
fn select_log2_segments(f_len: usize, g_len: usize) -> u32 {
    let pairs = f_len.saturating_mul(g_len);
    let workers = rayon::current_num_threads();
    let wanted = workers.min((pairs / TARGET_SEGMENT_LOAD).max(1));
    wanted
        .next_power_of_two()
        .trailing_zeros()
        .min(MAX_AUTO_LOG2_SEGMENTS)
        .min(MAX_LOG2_SEGMENTS)
}
