//! Subgroup values and the cyclic-extension lattice enumerator.
//!
//! Enumeration grows subgroups in layers, one prime-power-order generator at
//! a time, restricting candidate generators to the normalizer of the
//! subgroup being extended. The normalizer restriction is what keeps the
//! search tractable; without it the enumeration is exponential in practice
//! even for moderate orders.

use crate::bitset::BitSet;
use crate::cancel::CancelToken;
use crate::error::GroupError;
use crate::group::Group;
use crate::numtheory::is_prime_power;

/// A subgroup of a specific parent `Group`, immutable once published in the
/// parent's subgroup list.
///
/// `generators` and `members` are sets of parent elements. `contains` and
/// `contained_in` are sets over the *index space of the subgroup list* and
/// record only the immediate (covering) lattice relations; indirect
/// containments are removed by a reduction pass.
#[derive(Debug, Clone)]
pub struct Subgroup {
    generators: BitSet,
    members: BitSet,
    contains: BitSet,
    contained_in: BitSet,
}

impl Subgroup {
    pub fn generators(&self) -> &BitSet {
        &self.generators
    }

    pub fn members(&self) -> &BitSet {
        &self.members
    }

    pub fn order(&self) -> usize {
        self.members.len()
    }

    /// Indices of the subgroups this one immediately contains.
    pub fn contains(&self) -> &BitSet {
        &self.contains
    }

    /// Indices of the subgroups immediately containing this one.
    pub fn contained_in(&self) -> &BitSet {
        &self.contained_in
    }
}

/// Result of a full enumeration, memoized on the parent `Group`.
#[derive(Debug)]
pub(crate) struct LatticeData {
    pub(crate) subgroups: Vec<Subgroup>,
    pub(crate) is_solvable: bool,
}

/// Working subgroup during enumeration: generators and members only, lattice
/// relations attached later.
#[derive(Clone)]
struct Candidate {
    generators: BitSet,
    members: BitSet,
}

/// Enumerates all subgroups of `group`, sorted ascending by order, together
/// with the covering lattice and the solvability verdict.
pub(crate) fn enumerate(group: &Group, cancel: &CancelToken) -> Result<LatticeData, GroupError> {
    let order = group.order();
    let trivial = Candidate {
        generators: BitSet::from_indices(order, [0]),
        members: BitSet::from_indices(order, [0]),
    };

    if order == 1 {
        return Ok(assemble(vec![trivial], true));
    }
    if crate::numtheory::is_prime(order) {
        // A prime-order group has no proper nontrivial subgroups.
        let gens = group.generators_with(cancel)?;
        let whole = Candidate {
            generators: BitSet::from_indices(order, gens.iter().copied()),
            members: BitSet::new(order).complement(),
        };
        return Ok(assemble(vec![trivial, whole], true));
    }

    // Pool of candidate extension generators: nonidentity elements whose
    // order is a prime power.
    let mut z_pool = BitSet::new(order);
    for e in 1..order {
        if is_prime_power(group.element_order(e)) {
            z_pool.insert(e);
        }
    }

    let mut all: Vec<Candidate> = vec![trivial];
    let mut current: Vec<usize> = vec![0];
    let mut layer = 0usize;
    loop {
        if cancel.is_cancelled() {
            return Err(GroupError::Cancelled);
        }
        let mut next: Vec<usize> = Vec::new();
        for &si in &current {
            let norm = normalizer(group, &all[si]);
            let mut candidates = z_pool.intersection(&norm.members);
            candidates.difference_with(&all[si].members);
            // Skip elements already absorbed by a subgroup of the next layer
            // that extends this one; those extensions were found already via
            // different generators.
            for &ti in &next {
                if all[ti].members.is_superset(&all[si].members) {
                    candidates.difference_with(&all[ti].members);
                }
            }
            while let Some(g) = candidates.pop_first() {
                if cancel.is_cancelled() {
                    return Err(GroupError::Cancelled);
                }
                // Admissibility: some prime-indexed power of g must already
                // lie in the subgroup for the extension to be a prime step.
                if !group.element_prime_powers(g).intersects(&all[si].members) {
                    continue;
                }
                let extended = extend(group, &all[si], g);
                candidates.difference_with(&extended.members);
                if all.iter().any(|c| c.members == extended.members) {
                    continue;
                }
                all.push(extended);
                next.push(all.len() - 1);
            }
        }
        layer += 1;
        log::debug!("layer {}: {} new subgroups", layer, next.len());
        if next.is_empty() {
            break;
        }
        current = next;
    }

    all.sort_by_key(|c| c.members.len());
    let reached_top = all
        .last()
        .map(|c| c.members.len() == order)
        .unwrap_or(false);
    if !reached_top {
        // The prime-power chain stalled below the whole group, which only
        // happens for non-solvable groups. Terminate the list with the whole
        // group generated by the minimal generating tuple.
        let gens = group.generators_with(cancel)?;
        all.push(Candidate {
            generators: BitSet::from_indices(order, gens.iter().copied()),
            members: BitSet::new(order).complement(),
        });
    }
    Ok(assemble(all, reached_top))
}

/// Normalizer of `sub` in `group`: grow `H` from the subgroup, testing each
/// remaining element `g` against `sub` itself. A normalizing `g` extends
/// `H`; a non-normalizing one rules out its entire right translate `H*g`
/// (every element of `H` normalizes `sub`, so `m*g` normalizing would force
/// `g` to normalize too).
fn normalizer(group: &Group, sub: &Candidate) -> Candidate {
    let mut h = sub.clone();
    let mut todo = h.members.complement();
    while let Some(g) = todo.pop_first() {
        let g_inv = group.inverse(g);
        let normalizes = sub
            .generators
            .iter()
            .all(|t| sub.members.contains(group.mult(group.mult(g, t), g_inv)));
        if normalizes {
            h = extend(group, &h, g);
            todo.difference_with(&h.members);
        } else {
            for m in h.members.iter() {
                todo.remove(group.mult(m, g));
            }
        }
    }
    h
}

/// Extends a subgroup by one element `g` (assumed to normalize it):
/// generators whose cyclic orbit is spanned by `g`'s orbit are dropped as
/// redundant, then the member set is saturated under multiplication by the
/// powers of `g` until a fixed point.
fn extend(group: &Group, sub: &Candidate, g: usize) -> Candidate {
    let g_powers = group.element_powers(g);
    let mut generators = BitSet::new(group.order());
    for t in sub.generators.iter() {
        if !g_powers.is_superset(group.element_powers(t)) {
            generators.insert(t);
        }
    }
    generators.insert(g);

    let mut members = sub.members.clone();
    loop {
        let mut grew = false;
        let snapshot = members.to_vec();
        for &m in &snapshot {
            for p in g_powers.iter() {
                if members.insert(group.mult(m, p)) {
                    grew = true;
                }
            }
        }
        if !grew {
            break;
        }
    }
    Candidate { generators, members }
}

/// Attaches the covering lattice to the sorted subgroup list.
fn assemble(all: Vec<Candidate>, is_solvable: bool) -> LatticeData {
    let n = all.len();
    // Full containment first (i before j in ascending-size order).
    let mut contains: Vec<BitSet> = (0..n).map(|_| BitSet::new(n)).collect();
    for j in 0..n {
        for i in 0..j {
            if all[j].members.is_superset(&all[i].members) {
                contains[j].insert(i);
            }
        }
    }
    // Keep covering edges only: j -> i is indirect when some k sits between.
    let full = contains.clone();
    for j in 0..n {
        for k in full[j].iter() {
            for i in full[k].iter() {
                contains[j].remove(i);
            }
        }
    }
    let mut contained_in: Vec<BitSet> = (0..n).map(|_| BitSet::new(n)).collect();
    for (j, set) in contains.iter().enumerate() {
        for i in set.iter() {
            contained_in[i].insert(j);
        }
    }

    let subgroups = all
        .into_iter()
        .zip(contains.into_iter().zip(contained_in))
        .map(|(c, (contains, contained_in))| Subgroup {
            generators: c.generators,
            members: c.members,
            contains,
            contained_in,
        })
        .collect();
    LatticeData {
        subgroups,
        is_solvable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subgroup_orders(group: &Group) -> Vec<usize> {
        group
            .subgroups()
            .unwrap()
            .iter()
            .map(|s| s.order())
            .collect()
    }

    #[test]
    fn trivial_group_has_one_subgroup() {
        let g = Group::cyclic(1);
        assert_eq!(subgroup_orders(&g), vec![1]);
        assert!(g.is_solvable().unwrap());
    }

    #[test]
    fn prime_order_short_circuits() {
        let g = Group::cyclic(7);
        assert_eq!(subgroup_orders(&g), vec![1, 7]);
        assert!(g.is_solvable().unwrap());
        // Two subgroups only: not simple by the operational definition.
        assert!(!g.is_simple().unwrap());
    }

    #[test]
    fn z6_lattice() {
        let g = Group::cyclic(6);
        // One subgroup per divisor of 6.
        assert_eq!(subgroup_orders(&g), vec![1, 2, 3, 6]);
        let subs = g.subgroups().unwrap();
        // Whole group covers the order-2 and order-3 subgroups, which cover
        // only the trivial one and are incomparable to each other.
        assert_eq!(subs[3].contains().to_vec(), vec![1, 2]);
        assert_eq!(subs[1].contains().to_vec(), vec![0]);
        assert_eq!(subs[2].contains().to_vec(), vec![0]);
        assert_eq!(subs[1].contained_in().to_vec(), vec![3]);
        assert_eq!(subs[0].contained_in().to_vec(), vec![1, 2]);
        assert!(g.is_solvable().unwrap());
    }

    #[test]
    fn s3_lattice() {
        let g = Group::symmetric(3);
        // Trivial, three order-2, one order-3, whole.
        assert_eq!(subgroup_orders(&g), vec![1, 2, 2, 2, 3, 6]);
        assert!(g.is_solvable().unwrap());
        // The order-3 subgroup is proper, nontrivial, and normal.
        assert!(!g.is_simple().unwrap());
        let subs = g.subgroups().unwrap();
        let order3 = subs.iter().find(|s| s.order() == 3).unwrap();
        assert!(g.is_normal(order3).unwrap());
    }

    #[test]
    fn d4_lattice() {
        let g = Group::dihedral(4);
        // D4 has 10 subgroups: 1, five of order 2, three of order 4, D4.
        assert_eq!(subgroup_orders(&g), vec![1, 2, 2, 2, 2, 2, 4, 4, 4, 8]);
        assert!(g.is_solvable().unwrap());
        assert!(!g.is_simple().unwrap());
    }

    #[test]
    fn s4_subgroup_count() {
        let g = Group::symmetric(4);
        let subs = g.subgroups().unwrap();
        assert_eq!(subs.len(), 30);
        assert!(g.is_solvable().unwrap());
        // Every subgroup closes under the group operation.
        for sub in subs {
            let again = g.closure(&sub.generators().to_vec());
            assert_eq!(&again, sub.members());
        }
    }

    #[test]
    fn a5_lattice_is_complete() {
        let g = Group::alternating(5);
        assert_eq!(g.order(), 60);
        let subs = g.subgroups().unwrap();
        assert_eq!(subs.len(), 59);
        let mut by_order = std::collections::BTreeMap::new();
        for s in subs {
            *by_order.entry(s.order()).or_insert(0usize) += 1;
        }
        let counts: Vec<(usize, usize)> = by_order.into_iter().collect();
        assert_eq!(
            counts,
            vec![
                (1, 1),
                (2, 15),
                (3, 10),
                (4, 5),
                (5, 6),
                (6, 10),
                (10, 6),
                (12, 5),
                (60, 1)
            ]
        );
        // No prime-power chain reaches the whole group, so the list is
        // terminated by the appended whole group.
        assert!(!g.is_solvable().unwrap());
        assert!(g.is_simple().unwrap());
        let whole = subs.last().unwrap();
        assert_eq!(whole.order(), 60);
        assert_eq!(&g.closure(&whole.generators().to_vec()), whole.members());
    }

    #[test]
    fn normalizer_is_computed_against_the_input_subgroup() {
        // In A5 the normalizer of an order-2 subgroup is the Klein four
        // group containing it, even though that V4 is in turn normalized by
        // a larger A4. Growing the accumulator must not widen the test.
        let g = Group::alternating(5);
        let e = (1..g.order()).find(|&e| g.element_order(e) == 2).unwrap();
        let sub = Candidate {
            generators: BitSet::from_indices(g.order(), [e]),
            members: g.element_powers(e).clone(),
        };
        let norm = normalizer(&g, &sub);
        assert_eq!(norm.members.len(), 4);
        for m in norm.members.iter() {
            let conj = g.mult(g.mult(m, e), g.inverse(m));
            assert!(sub.members.contains(conj));
        }
    }

    #[test]
    fn klein_four_lattice() {
        let g = Group::direct_product(&Group::cyclic(2), &Group::cyclic(2));
        assert_eq!(subgroup_orders(&g), vec![1, 2, 2, 2, 4]);
        let subs = g.subgroups().unwrap();
        // Whole group covers all three order-2 subgroups.
        assert_eq!(subs[4].contains().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn subgroup_members_contain_generators_and_identity() {
        let g = Group::dihedral(6);
        for sub in g.subgroups().unwrap() {
            assert!(sub.members().contains(0));
            assert!(sub.members().is_superset(sub.generators()));
        }
    }

    #[test]
    fn cancelled_token_stops_enumeration() {
        use std::sync::atomic::AtomicBool;
        use std::sync::Arc;

        let flag = Arc::new(AtomicBool::new(true));
        let token = CancelToken::with_flag(flag);
        let g = Group::symmetric(4);
        assert!(matches!(
            g.subgroups_with(&token),
            Err(GroupError::Cancelled)
        ));
        // A later uncancelled call still succeeds; nothing was memoized.
        assert_eq!(g.subgroups().unwrap().len(), 30);
    }
}
