//! Isomorphism search between groups, and classification against a library
//! of known groups.
//!
//! The search fixes a minimal generating tuple of `G`, then backtracks over
//! tuples of `H`-elements with matching orders. Each candidate tuple seeds a
//! partial map that is extended by the same coset-closure walk `Group::closure`
//! uses, computing `H`-side products in lockstep; cheap rejections (tuple does
//! not generate, map not a bijection) come before the full quadratic
//! homomorphism check.

use crate::bitset::BitSet;
use crate::cancel::CancelToken;
use crate::error::GroupError;
use crate::group::Group;
use crate::library::{GroupLibrary, LibraryEntry};
use crate::subgroup::Subgroup;

/// An identified copy of a library group inside a larger group.
#[derive(Debug)]
pub struct Embedding<'a> {
    pub entry: &'a LibraryEntry,
    /// `map[e]` is the parent-group element representing library element `e`.
    pub map: Vec<usize>,
}

/// An identified quotient: a surjection from a group onto a library group.
#[derive(Debug)]
pub struct QuotientMatch<'a> {
    pub entry: &'a LibraryEntry,
    /// `map[e]` is the library element that parent element `e` maps to.
    pub map: Vec<usize>,
}

/// Searches for an isomorphism `G -> H`. Returns the element map `g2h` if
/// one exists, `None` if the groups are not isomorphic.
pub fn isomorphism(g: &Group, h: &Group) -> Result<Option<Vec<usize>>, GroupError> {
    isomorphism_with(g, h, &CancelToken::none())
}

pub fn isomorphism_with(
    g: &Group,
    h: &Group,
    cancel: &CancelToken,
) -> Result<Option<Vec<usize>>, GroupError> {
    if g.order() != h.order() {
        return Ok(None);
    }
    if g.order() == 1 {
        return Ok(Some(vec![0]));
    }
    let g_gens = g.generators_with(cancel)?.to_vec();
    let required: Vec<usize> = g_gens.iter().map(|&e| g.element_order(e)).collect();
    // One pool of H-elements per required order; a chosen element leaves the
    // pool for the duration of its branch.
    let mut pools: Vec<BitSet> = h.order_classes().to_vec();
    let mut chosen = Vec::with_capacity(g_gens.len());
    match_generators(g, h, &g_gens, &required, &mut pools, &mut chosen, cancel)
}

fn match_generators(
    g: &Group,
    h: &Group,
    g_gens: &[usize],
    required: &[usize],
    pools: &mut [BitSet],
    chosen: &mut Vec<usize>,
    cancel: &CancelToken,
) -> Result<Option<Vec<usize>>, GroupError> {
    if cancel.is_cancelled() {
        return Err(GroupError::Cancelled);
    }
    let position = chosen.len();
    if position == g_gens.len() {
        return Ok(try_candidate(g, h, g_gens, chosen));
    }
    let order = required[position];
    for e in pools[order].to_vec() {
        pools[order].remove(e);
        chosen.push(e);
        let found = match_generators(g, h, g_gens, required, pools, chosen, cancel)?;
        chosen.pop();
        pools[order].insert(e);
        if found.is_some() {
            return Ok(found);
        }
    }
    Ok(None)
}

/// Builds and verifies the map induced by pairing `g_gens[i]` with
/// `h_gens[i]`. The closure walk mirrors `Group::closure`: the cyclic group
/// of the first generator is the base, and each newly discovered
/// representative pulls in its whole base coset, assigning `H`-images as it
/// goes.
fn try_candidate(g: &Group, h: &Group, g_gens: &[usize], h_gens: &[usize]) -> Option<Vec<usize>> {
    let order = g.order();
    let mut g2h = vec![usize::MAX; order];
    g2h[0] = 0;
    let g0 = g_gens[0];
    let h0 = h_gens[0];
    let mut x = g0;
    let mut y = h0;
    while x != 0 {
        g2h[x] = y;
        x = g.mult(x, g0);
        y = h.mult(y, h0);
    }

    let base = g.element_powers(g0).to_vec();
    let mut members = g.element_powers(g0).clone();
    let mut reps = vec![0usize];
    let mut next = 0;
    while next < reps.len() {
        let r = reps[next];
        next += 1;
        for (k, &s) in g_gens.iter().enumerate() {
            let product = g.mult(r, s);
            if members.contains(product) {
                continue;
            }
            let image = h.mult(g2h[r], h_gens[k]);
            reps.push(product);
            for &c in &base {
                let m = g.mult(c, product);
                if members.insert(m) {
                    g2h[m] = h.mult(g2h[c], image);
                }
            }
        }
    }

    if members.len() != order {
        return None; // tuple does not generate G
    }
    let mut seen = BitSet::new(order);
    for &v in &g2h {
        if v >= order || !seen.insert(v) {
            return None; // not a bijection onto H
        }
    }
    for i in 0..order {
        for j in 0..order {
            if g2h[g.mult(i, j)] != h.mult(g2h[i], g2h[j]) {
                return None;
            }
        }
    }
    Some(g2h)
}

/// First library entry of `g`'s order that is isomorphic to `g`, together
/// with the map from library elements to `g` elements. Entries failing the
/// order-profile prefilter are skipped without a search.
pub fn find<'a>(
    g: &Group,
    library: &'a GroupLibrary,
) -> Result<Option<(&'a LibraryEntry, Vec<usize>)>, GroupError> {
    find_with(g, library, &CancelToken::none())
}

pub fn find_with<'a>(
    g: &Group,
    library: &'a GroupLibrary,
    cancel: &CancelToken,
) -> Result<Option<(&'a LibraryEntry, Vec<usize>)>, GroupError> {
    let profile = g.order_profile();
    for entry in library.of_order(g.order()) {
        if entry.group.order_profile() != profile {
            continue;
        }
        if let Some(map) = isomorphism_with(&entry.group, g, cancel)? {
            log::debug!("matched library entry '{}'", entry.name);
            return Ok(Some((entry, map)));
        }
    }
    Ok(None)
}

/// Library representative of a subgroup viewed as a standalone group. For
/// the whole group this is just `find`; otherwise the subgroup is restricted
/// first, and the returned map targets the restricted numbering.
pub fn find_for_subgroup<'a>(
    g: &Group,
    sub: &Subgroup,
    library: &'a GroupLibrary,
) -> Result<Option<(&'a LibraryEntry, Vec<usize>)>, GroupError> {
    find_for_subgroup_with(g, sub, library, &CancelToken::none())
}

pub fn find_for_subgroup_with<'a>(
    g: &Group,
    sub: &Subgroup,
    library: &'a GroupLibrary,
    cancel: &CancelToken,
) -> Result<Option<(&'a LibraryEntry, Vec<usize>)>, GroupError> {
    if sub.order() == g.order() {
        return find_with(g, library, cancel);
    }
    let restricted = g.subgroup_as_group(sub);
    find_with(&restricted.group, library, cancel)
}

/// Identifies a subgroup of `g` with a library group and produces the
/// embedding of that library group into `g`: the library→restriction
/// isomorphism composed with the restriction's parent map.
pub fn find_embedding<'a>(
    g: &Group,
    sub: &Subgroup,
    library: &'a GroupLibrary,
) -> Result<Option<Embedding<'a>>, GroupError> {
    find_embedding_with(g, sub, library, &CancelToken::none())
}

pub fn find_embedding_with<'a>(
    g: &Group,
    sub: &Subgroup,
    library: &'a GroupLibrary,
    cancel: &CancelToken,
) -> Result<Option<Embedding<'a>>, GroupError> {
    let restricted = g.subgroup_as_group(sub);
    match find_with(&restricted.group, library, cancel)? {
        None => Ok(None),
        Some((entry, lib_to_restricted)) => {
            let map = lib_to_restricted
                .iter()
                .map(|&local| restricted.to_parent[local])
                .collect();
            Ok(Some(Embedding { entry, map }))
        }
    }
}

/// Identifies the quotient of `g` by a normal subgroup with a library group
/// and produces the surjection `g -> library group`: the coset-index map
/// composed with the inverted library→quotient isomorphism. Returns
/// `NotNormal` if the subgroup is not normal.
pub fn find_quotient<'a>(
    g: &Group,
    sub: &Subgroup,
    library: &'a GroupLibrary,
) -> Result<Option<QuotientMatch<'a>>, GroupError> {
    find_quotient_with(g, sub, library, &CancelToken::none())
}

pub fn find_quotient_with<'a>(
    g: &Group,
    sub: &Subgroup,
    library: &'a GroupLibrary,
    cancel: &CancelToken,
) -> Result<Option<QuotientMatch<'a>>, GroupError> {
    let quotient = g.quotient_with(sub, cancel)?;
    match find_with(&quotient.group, library, cancel)? {
        None => Ok(None),
        Some((entry, lib_to_quotient)) => {
            let mut quotient_to_lib = vec![0usize; lib_to_quotient.len()];
            for (lib_e, &q_e) in lib_to_quotient.iter().enumerate() {
                quotient_to_lib[q_e] = lib_e;
            }
            let map = quotient
                .element_to_coset
                .iter()
                .map(|&coset| quotient_to_lib[coset])
                .collect();
            Ok(Some(QuotientMatch { entry, map }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_is_isomorphism(g: &Group, h: &Group, map: &[usize]) {
        let mut seen = BitSet::new(h.order());
        for &v in map {
            assert!(seen.insert(v), "map is not injective");
        }
        for i in 0..g.order() {
            for j in 0..g.order() {
                assert_eq!(map[g.mult(i, j)], h.mult(map[i], map[j]));
            }
        }
    }

    #[test]
    fn trivial_groups_are_isomorphic() {
        let a = Group::cyclic(1);
        let b = Group::cyclic(1);
        assert_eq!(isomorphism(&a, &b).unwrap(), Some(vec![0]));
    }

    #[test]
    fn different_orders_never_match() {
        let a = Group::cyclic(4);
        let b = Group::cyclic(5);
        assert_eq!(isomorphism(&a, &b).unwrap(), None);
    }

    #[test]
    fn z6_is_isomorphic_to_z2_times_z3() {
        let z6 = Group::cyclic(6);
        let product = Group::direct_product(&Group::cyclic(2), &Group::cyclic(3));
        let map = isomorphism(&z6, &product).unwrap().expect("isomorphic");
        assert_is_isomorphism(&z6, &product, &map);
    }

    #[test]
    fn z4_is_not_isomorphic_to_klein_four() {
        let z4 = Group::cyclic(4);
        let klein = Group::direct_product(&Group::cyclic(2), &Group::cyclic(2));
        assert_eq!(isomorphism(&z4, &klein).unwrap(), None);
    }

    #[test]
    fn s3_is_not_isomorphic_to_z6() {
        let s3 = Group::symmetric(3);
        let z6 = Group::cyclic(6);
        assert_eq!(isomorphism(&s3, &z6).unwrap(), None);
        assert_eq!(isomorphism(&z6, &s3).unwrap(), None);
    }

    #[test]
    fn s3_is_isomorphic_to_d3() {
        let s3 = Group::symmetric(3);
        let d3 = Group::dihedral(3);
        let map = isomorphism(&s3, &d3).unwrap().expect("isomorphic");
        assert_is_isomorphism(&s3, &d3, &map);
    }

    #[test]
    fn find_classifies_against_library() {
        let mut lib = GroupLibrary::new();
        lib.insert("Z_4", Group::cyclic(4));
        lib.insert("Z_2 x Z_2", Group::direct_product(&Group::cyclic(2), &Group::cyclic(2)));
        lib.insert("Z_6", Group::cyclic(6));
        lib.insert("S_3", Group::symmetric(3));

        let (entry, map) = find(&Group::dihedral(3), &lib).unwrap().expect("match");
        assert_eq!(entry.name, "S_3");
        assert_is_isomorphism(&entry.group, &Group::dihedral(3), &map);

        let (entry, _) = find(&Group::direct_product(&Group::cyclic(2), &Group::cyclic(3)), &lib)
            .unwrap()
            .expect("match");
        assert_eq!(entry.name, "Z_6");

        // Order present, no isomorphic representative.
        let mut sparse = GroupLibrary::new();
        sparse.insert("Z_4", Group::cyclic(4));
        let klein = Group::direct_product(&Group::cyclic(2), &Group::cyclic(2));
        assert!(find(&klein, &sparse).unwrap().is_none());
    }

    #[test]
    fn cancelled_search_reports_cancellation() {
        use std::sync::atomic::AtomicBool;
        use std::sync::Arc;

        let token = CancelToken::with_flag(Arc::new(AtomicBool::new(true)));
        let a = Group::cyclic(6);
        let b = Group::cyclic(6);
        assert!(matches!(
            isomorphism_with(&a, &b, &token),
            Err(GroupError::Cancelled)
        ));
    }
}
