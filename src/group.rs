//! Multiplication-table groups and their derived invariants.
//!
//! A `Group` owns an `order x order` table with `table[a][b] = a*b` and
//! element `0` as the identity. Cheap invariants (inverses, element orders,
//! order classes, conjugacy classes, abelian/cyclic flags) are computed once
//! at construction. The subgroup lattice, solvability verdict, and minimal
//! generating tuple are expensive and computed lazily on first access, then
//! memoized.

use std::collections::HashSet;
use std::sync::OnceLock;

use num_integer::Integer;

use crate::bitset::BitSet;
use crate::cancel::CancelToken;
use crate::error::GroupError;
use crate::numtheory::is_prime;
use crate::subgroup::{self, LatticeData, Subgroup};

#[derive(Debug)]
pub struct Group {
    order: usize,
    table: Vec<Vec<usize>>,
    inverses: Vec<usize>,
    element_powers: Vec<BitSet>,
    element_prime_powers: Vec<BitSet>,
    element_orders: Vec<usize>,
    order_classes: Vec<BitSet>,
    conjugacy_classes: Vec<BitSet>,
    non_abelian_example: Option<(usize, usize)>,
    is_cyclic: bool,
    lattice: OnceLock<LatticeData>,
    generators: OnceLock<Vec<usize>>,
}

/// Quotient of a group by a normal subgroup: the induced group on coset
/// indices plus the surjection from parent elements onto those indices.
#[derive(Debug)]
pub struct QuotientGroup {
    pub group: Group,
    /// `element_to_coset[e]` is the index of the coset containing `e`.
    pub element_to_coset: Vec<usize>,
}

/// A subgroup renumbered as a standalone group: local element `i` is parent
/// element `to_parent[i]`, with the identity kept at index 0.
#[derive(Debug)]
pub struct RestrictedGroup {
    pub group: Group,
    pub to_parent: Vec<usize>,
}

impl Group {
    /// Builds a group from a multiplication table, validating the input
    /// contract: square shape, entries in `[0, order)`, index 0 a two-sided
    /// identity, and every row and column a permutation of all indices.
    pub fn from_table(table: Vec<Vec<usize>>) -> Result<Group, GroupError> {
        let order = table.len();
        if order == 0 {
            return Err(GroupError::MalformedTable("table is empty".into()));
        }
        for (i, row) in table.iter().enumerate() {
            if row.len() != order {
                return Err(GroupError::MalformedTable(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    order
                )));
            }
            for (j, &v) in row.iter().enumerate() {
                if v >= order {
                    return Err(GroupError::MalformedTable(format!(
                        "entry ({}, {}) = {} is out of range",
                        i, j, v
                    )));
                }
            }
        }
        for e in 0..order {
            if table[0][e] != e || table[e][0] != e {
                return Err(GroupError::MalformedTable(
                    "index 0 is not a two-sided identity".into(),
                ));
            }
        }
        for i in 0..order {
            let mut row_seen = vec![false; order];
            let mut col_seen = vec![false; order];
            for j in 0..order {
                if std::mem::replace(&mut row_seen[table[i][j]], true) {
                    return Err(GroupError::MalformedTable(format!(
                        "row {} is not a permutation",
                        i
                    )));
                }
                if std::mem::replace(&mut col_seen[table[j][i]], true) {
                    return Err(GroupError::MalformedTable(format!(
                        "column {} is not a permutation",
                        i
                    )));
                }
            }
        }
        Ok(Group::from_table_unchecked(table))
    }

    /// Constructor for tables that are valid by construction (family
    /// builders, quotients of checked-normal subgroups, restrictions).
    /// Feeding it a non-group table yields garbage invariants, not an error.
    pub(crate) fn from_table_unchecked(table: Vec<Vec<usize>>) -> Group {
        let order = table.len();

        let mut inverses = vec![0usize; order];
        for e in 0..order {
            for x in 0..order {
                if table[e][x] == 0 {
                    inverses[e] = x;
                    break;
                }
            }
        }

        // First commutation failure in lexicographic (i, j) order, i <= j.
        let mut non_abelian_example = None;
        'scan: for i in 0..order {
            for j in i..order {
                if table[i][j] != table[j][i] {
                    non_abelian_example = Some((i, j));
                    break 'scan;
                }
            }
        }

        let mut element_powers = Vec::with_capacity(order);
        let mut element_prime_powers = Vec::with_capacity(order);
        let mut element_orders = Vec::with_capacity(order);
        for e in 0..order {
            let mut powers = BitSet::new(order);
            let mut prime_powers = BitSet::new(order);
            let mut x = e;
            let mut exp = 1usize;
            loop {
                powers.insert(x);
                if is_prime(exp) {
                    prime_powers.insert(x);
                }
                if x == 0 {
                    break;
                }
                x = table[x][e];
                exp += 1;
            }
            element_orders.push(powers.len());
            element_powers.push(powers);
            element_prime_powers.push(prime_powers);
        }

        let mut order_classes = vec![BitSet::new(order); order + 1];
        for e in 0..order {
            order_classes[element_orders[e]].insert(e);
        }

        let is_cyclic = element_orders.iter().any(|&o| o == order);

        // Conjugation orbits, deduplicated by set equality (the derived hash
        // buckets candidates before the exact word comparison) and sorted
        // ascending by size.
        let mut conjugacy_classes: Vec<BitSet> = Vec::new();
        let mut seen: HashSet<BitSet> = HashSet::new();
        for x in 0..order {
            let mut class = BitSet::new(order);
            for g in 0..order {
                class.insert(table[table[g][x]][inverses[g]]);
            }
            if seen.insert(class.clone()) {
                conjugacy_classes.push(class);
            }
        }
        conjugacy_classes.sort_by_key(|c| c.len());

        Group {
            order,
            table,
            inverses,
            element_powers,
            element_prime_powers,
            element_orders,
            order_classes,
            conjugacy_classes,
            non_abelian_example,
            is_cyclic,
            lattice: OnceLock::new(),
            generators: OnceLock::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Family builders
    // -----------------------------------------------------------------------

    /// The cyclic group Z_n with `table[i][j] = (i + j) mod n`.
    pub fn cyclic(n: usize) -> Group {
        let table = (0..n).map(|i| (0..n).map(|j| (i + j) % n).collect()).collect();
        Group::from_table_unchecked(table)
    }

    /// The dihedral group of order 2n: rotations `r^a` at indices `0..n`,
    /// reflections `r^a s` at indices `n..2n`.
    pub fn dihedral(n: usize) -> Group {
        let order = 2 * n;
        let mut table = vec![vec![0usize; order]; order];
        for a in 0..n {
            for e in 0..2 {
                for b in 0..n {
                    for f in 0..2 {
                        // r^a s^e * r^b s^f = r^(a +/- b) s^(e+f)
                        let rot = if e == 0 { (a + b) % n } else { (a + n - b) % n };
                        let flip = (e + f) % 2;
                        table[e * n + a][f * n + b] = flip * n + rot;
                    }
                }
            }
        }
        Group::from_table_unchecked(table)
    }

    /// The symmetric group S_n on `n!` elements, permutations numbered in
    /// lexicographic order (identity first). Intended for small `n`.
    pub fn symmetric(n: usize) -> Group {
        Group::from_permutations(n, permutations(n))
    }

    /// The alternating group A_n: the even permutations of `0..n`, numbered
    /// in lexicographic order (identity first). Intended for small `n`.
    pub fn alternating(n: usize) -> Group {
        let perms = permutations(n)
            .into_iter()
            .filter(|p| is_even_permutation(p))
            .collect();
        Group::from_permutations(n, perms)
    }

    /// Composition table over a permutation set closed under composition.
    fn from_permutations(n: usize, perms: Vec<Vec<usize>>) -> Group {
        let mut index_of = std::collections::HashMap::new();
        for (i, p) in perms.iter().enumerate() {
            index_of.insert(p.clone(), i);
        }
        let order = perms.len();
        let mut table = vec![vec![0usize; order]; order];
        let mut composed = vec![0usize; n];
        for (i, p) in perms.iter().enumerate() {
            for (j, q) in perms.iter().enumerate() {
                for (x, slot) in composed.iter_mut().enumerate() {
                    *slot = p[q[x]];
                }
                table[i][j] = index_of[&composed];
            }
        }
        Group::from_table_unchecked(table)
    }

    /// Direct product: element `i * order(b) + j` is the pair `(i, j)`.
    pub fn direct_product(a: &Group, b: &Group) -> Group {
        let (na, nb) = (a.order, b.order);
        let order = na * nb;
        let mut table = vec![vec![0usize; order]; order];
        for i1 in 0..na {
            for j1 in 0..nb {
                for i2 in 0..na {
                    for j2 in 0..nb {
                        table[i1 * nb + j1][i2 * nb + j2] =
                            a.mult(i1, i2) * nb + b.mult(j1, j2);
                    }
                }
            }
        }
        Group::from_table_unchecked(table)
    }

    // -----------------------------------------------------------------------
    // Eager invariants
    // -----------------------------------------------------------------------

    pub fn order(&self) -> usize {
        self.order
    }

    /// Product `a * b` from the table.
    pub fn mult(&self, a: usize, b: usize) -> usize {
        self.table[a][b]
    }

    pub fn inverse(&self, e: usize) -> usize {
        self.inverses[e]
    }

    pub fn element_order(&self, e: usize) -> usize {
        self.element_orders[e]
    }

    pub fn element_orders(&self) -> &[usize] {
        &self.element_orders
    }

    /// The cyclic subgroup `{e, e^2, ...}` generated by `e`.
    pub fn element_powers(&self, e: usize) -> &BitSet {
        &self.element_powers[e]
    }

    /// Powers of `e` at prime exponents; drives the cyclic-extension
    /// admissibility filter.
    pub fn element_prime_powers(&self, e: usize) -> &BitSet {
        &self.element_prime_powers[e]
    }

    /// `order_classes()[k]` holds the elements of order `k`; index 0 is
    /// always empty and the slice has length `order + 1`.
    pub fn order_classes(&self) -> &[BitSet] {
        &self.order_classes
    }

    /// Conjugacy classes as a partition of all elements, ascending by size.
    pub fn conjugacy_classes(&self) -> &[BitSet] {
        &self.conjugacy_classes
    }

    pub fn is_abelian(&self) -> bool {
        self.non_abelian_example.is_none()
    }

    /// First pair `(i, j)` with `i <= j` and `ij != ji`, if any.
    pub fn non_abelian_example(&self) -> Option<(usize, usize)> {
        self.non_abelian_example
    }

    pub fn is_cyclic(&self) -> bool {
        self.is_cyclic
    }

    /// Elements commuting with every element.
    pub fn center(&self) -> BitSet {
        let mut center = BitSet::new(self.order);
        for z in 0..self.order {
            if (0..self.order).all(|g| self.table[z][g] == self.table[g][z]) {
                center.insert(z);
            }
        }
        center
    }

    /// Group exponent: lcm of all element orders.
    pub fn exponent(&self) -> usize {
        self.element_orders.iter().fold(1, |acc, &o| acc.lcm(&o))
    }

    /// Multiset of order-class sizes as `(element order, count)` pairs,
    /// ascending by order. Equal profiles are a necessary condition for
    /// isomorphism and serve as the cheap library prefilter.
    pub fn order_profile(&self) -> Vec<(usize, usize)> {
        self.order_classes
            .iter()
            .enumerate()
            .filter(|(_, class)| !class.is_empty())
            .map(|(k, class)| (k, class.len()))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Closure, normality, cosets
    // -----------------------------------------------------------------------

    /// Smallest subgroup containing the generators, built by coset-bulk
    /// extension: seed with the cyclic group of the first generator, then
    /// whenever a representative walk discovers a new element, absorb its
    /// whole coset in one pass.
    pub fn closure(&self, generators: &[usize]) -> BitSet {
        let mut members = BitSet::new(self.order);
        members.insert(0);
        let Some(&first) = generators.first() else {
            return members;
        };
        let base = self.element_powers[first].to_vec();
        members = self.element_powers[first].clone();
        let mut reps = vec![0usize];
        let mut next = 0;
        while next < reps.len() {
            let r = reps[next];
            next += 1;
            for &s in generators {
                let x = self.mult(r, s);
                if members.contains(x) {
                    continue;
                }
                reps.push(x);
                for &c in &base {
                    members.insert(self.mult(c, x));
                }
            }
        }
        members
    }

    /// Normality test: trivially true in abelian groups, otherwise verified
    /// by conjugating every subgroup generator by every whole-group
    /// generator (sufficient, since normality under a generating set
    /// extends to its closure).
    pub fn is_normal(&self, sub: &Subgroup) -> Result<bool, GroupError> {
        self.is_normal_with(sub, &CancelToken::none())
    }

    pub fn is_normal_with(&self, sub: &Subgroup, cancel: &CancelToken) -> Result<bool, GroupError> {
        if self.is_abelian() {
            return Ok(true);
        }
        let gens = self.generators_with(cancel)?;
        for &g in gens {
            let g_inv = self.inverse(g);
            for h in sub.generators().iter() {
                let conj = self.mult(self.mult(g, h), g_inv);
                if !sub.members().contains(conj) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Partition of the group into cosets of `members` (assumed to be a
    /// subgroup); the subgroup itself is always the first coset. `left`
    /// selects `g*H` cosets, otherwise `H*g`.
    pub fn cosets(&self, members: &BitSet, left: bool) -> Vec<BitSet> {
        let mut cosets = vec![members.clone()];
        let mut todo = members.complement();
        while let Some(r) = todo.pop_first() {
            let mut coset = BitSet::new(self.order);
            for m in members.iter() {
                coset.insert(if left { self.mult(r, m) } else { self.mult(m, r) });
            }
            todo.difference_with(&coset);
            cosets.push(coset);
        }
        cosets
    }

    /// Quotient by a normal subgroup. Returns `NotNormal` if the subgroup
    /// fails the normality check; the induced table is then never built, so
    /// a non-group table can never be computed silently.
    pub fn quotient(&self, sub: &Subgroup) -> Result<QuotientGroup, GroupError> {
        self.quotient_with(sub, &CancelToken::none())
    }

    pub fn quotient_with(
        &self,
        sub: &Subgroup,
        cancel: &CancelToken,
    ) -> Result<QuotientGroup, GroupError> {
        if !self.is_normal_with(sub, cancel)? {
            return Err(GroupError::NotNormal);
        }
        let cosets = self.cosets(sub.members(), true);
        let mut element_to_coset = vec![0usize; self.order];
        let mut reps = Vec::with_capacity(cosets.len());
        for (idx, coset) in cosets.iter().enumerate() {
            for e in coset.iter() {
                element_to_coset[e] = idx;
            }
            reps.push(coset.first().unwrap_or(0));
        }
        let k = cosets.len();
        let table = (0..k)
            .map(|i| {
                (0..k)
                    .map(|j| element_to_coset[self.mult(reps[i], reps[j])])
                    .collect()
            })
            .collect();
        Ok(QuotientGroup {
            group: Group::from_table_unchecked(table),
            element_to_coset,
        })
    }

    /// Restricts the table to a subgroup's elements, renumbering them
    /// `0..sub.order()` in ascending parent order (identity stays at 0).
    pub fn subgroup_as_group(&self, sub: &Subgroup) -> RestrictedGroup {
        let to_parent = sub.members().to_vec();
        let mut local = vec![usize::MAX; self.order];
        for (i, &e) in to_parent.iter().enumerate() {
            local[e] = i;
        }
        let table = to_parent
            .iter()
            .map(|&a| to_parent.iter().map(|&b| local[self.mult(a, b)]).collect())
            .collect();
        RestrictedGroup {
            group: Group::from_table_unchecked(table),
            to_parent,
        }
    }

    // -----------------------------------------------------------------------
    // Lazy invariants (memoized on first access)
    // -----------------------------------------------------------------------

    /// The complete subgroup list, ascending by order, with covering-lattice
    /// relations attached. Computed once via cyclic extension.
    pub fn subgroups(&self) -> Result<&[Subgroup], GroupError> {
        self.subgroups_with(&CancelToken::none())
    }

    pub fn subgroups_with(&self, cancel: &CancelToken) -> Result<&[Subgroup], GroupError> {
        Ok(&self.lattice_with(cancel)?.subgroups)
    }

    /// Solvability, as determined by whether the cyclic-extension chain of
    /// prime-power-order generators reaches the whole group.
    pub fn is_solvable(&self) -> Result<bool, GroupError> {
        self.is_solvable_with(&CancelToken::none())
    }

    pub fn is_solvable_with(&self, cancel: &CancelToken) -> Result<bool, GroupError> {
        Ok(self.lattice_with(cancel)?.is_solvable)
    }

    /// True iff the group has more than two subgroups and none besides the
    /// trivial and whole subgroups is normal.
    pub fn is_simple(&self) -> Result<bool, GroupError> {
        self.is_simple_with(&CancelToken::none())
    }

    pub fn is_simple_with(&self, cancel: &CancelToken) -> Result<bool, GroupError> {
        let subs = self.subgroups_with(cancel)?;
        if subs.len() <= 2 {
            return Ok(false);
        }
        for sub in &subs[1..subs.len() - 1] {
            if self.is_normal_with(sub, cancel)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn lattice_with(&self, cancel: &CancelToken) -> Result<&LatticeData, GroupError> {
        if let Some(data) = self.lattice.get() {
            return Ok(data);
        }
        log::debug!("enumerating subgroups of a group of order {}", self.order);
        let data = subgroup::enumerate(self, cancel)?;
        log::debug!(
            "found {} subgroups (solvable: {})",
            data.subgroups.len(),
            data.is_solvable
        );
        Ok(self.lattice.get_or_init(|| data))
    }

    /// First minimal-size generating tuple, found by brute-force search over
    /// increasing tuple sizes in lexicographic element order.
    pub fn generators(&self) -> Result<&[usize], GroupError> {
        self.generators_with(&CancelToken::none())
    }

    pub fn generators_with(&self, cancel: &CancelToken) -> Result<&[usize], GroupError> {
        if let Some(gens) = self.generators.get() {
            return Ok(gens);
        }
        let found = self.find_minimal_generators(cancel)?;
        Ok(self.generators.get_or_init(|| found))
    }

    fn find_minimal_generators(&self, cancel: &CancelToken) -> Result<Vec<usize>, GroupError> {
        if self.order == 1 {
            return Ok(Vec::new());
        }
        let mut current = Vec::new();
        for size in 1..=self.order {
            if let Some(found) = self.generator_search(size, 1, &mut current, cancel)? {
                return Ok(found);
            }
        }
        // Unreachable for a valid table: the full element set generates.
        Ok((1..self.order).collect())
    }

    fn generator_search(
        &self,
        size: usize,
        start: usize,
        current: &mut Vec<usize>,
        cancel: &CancelToken,
    ) -> Result<Option<Vec<usize>>, GroupError> {
        if cancel.is_cancelled() {
            return Err(GroupError::Cancelled);
        }
        if current.len() == size {
            if self.closure(current).len() == self.order {
                return Ok(Some(current.clone()));
            }
            return Ok(None);
        }
        for e in start..self.order {
            current.push(e);
            if let Some(found) = self.generator_search(size, e + 1, current, cancel)? {
                return Ok(Some(found));
            }
            current.pop();
        }
        Ok(None)
    }
}

/// Parity by inversion count: even iff an even number of out-of-order pairs.
fn is_even_permutation(p: &[usize]) -> bool {
    let mut inversions = 0usize;
    for i in 0..p.len() {
        for j in i + 1..p.len() {
            if p[i] > p[j] {
                inversions += 1;
            }
        }
    }
    inversions % 2 == 0
}

/// All permutations of `0..n` in lexicographic order (identity first).
fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(n);
    let mut used = vec![false; n];
    fn rec(n: usize, current: &mut Vec<usize>, used: &mut [bool], out: &mut Vec<Vec<usize>>) {
        if current.len() == n {
            out.push(current.clone());
            return;
        }
        for x in 0..n {
            if !used[x] {
                used[x] = true;
                current.push(x);
                rec(n, current, used, out);
                current.pop();
                used[x] = false;
            }
        }
    }
    rec(n, &mut current, &mut used, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z6_invariants() {
        let g = Group::cyclic(6);
        assert_eq!(g.order(), 6);
        assert!(g.is_abelian());
        assert!(g.is_cyclic());
        assert_eq!(g.element_orders(), &[1, 6, 3, 2, 3, 6]);
        assert_eq!(g.exponent(), 6);
        assert_eq!(g.inverse(1), 5);
        assert_eq!(g.inverse(3), 3);
        // Abelian group: every conjugacy class is a singleton.
        assert_eq!(g.conjugacy_classes().len(), 6);
        assert_eq!(g.center().len(), 6);
    }

    #[test]
    fn s3_invariants() {
        let g = Group::symmetric(3);
        assert_eq!(g.order(), 6);
        assert!(!g.is_abelian());
        assert!(!g.is_cyclic());
        assert!(g.non_abelian_example().is_some());
        // Classes: identity, the two 3-cycles, the three transpositions.
        let sizes: Vec<usize> = g.conjugacy_classes().iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![1, 2, 3]);
        assert_eq!(g.center().to_vec(), vec![0]);
        assert_eq!(g.exponent(), 6);
    }

    #[test]
    fn dihedral_order_and_center() {
        let d4 = Group::dihedral(4);
        assert_eq!(d4.order(), 8);
        assert!(!d4.is_abelian());
        // Center of D4 is {1, r^2}.
        assert_eq!(d4.center().to_vec(), vec![0, 2]);
        let d3 = Group::dihedral(3);
        // D3 and S3 share every eager invariant.
        let s3 = Group::symmetric(3);
        assert_eq!(d3.order_profile(), s3.order_profile());
    }

    #[test]
    fn alternating_groups() {
        let a3 = Group::alternating(3);
        assert_eq!(a3.order(), 3);
        assert!(a3.is_cyclic());
        let a4 = Group::alternating(4);
        assert_eq!(a4.order(), 12);
        assert!(!a4.is_abelian());
        // Element orders in A4 are 1, 2, and 3.
        assert_eq!(a4.exponent(), 6);
        assert_eq!(a4.order_profile(), vec![(1, 1), (2, 3), (3, 8)]);
    }

    #[test]
    fn direct_product_orders() {
        let g = Group::direct_product(&Group::cyclic(2), &Group::cyclic(3));
        assert_eq!(g.order(), 6);
        assert!(g.is_abelian());
        assert!(g.is_cyclic()); // gcd(2, 3) = 1
        let h = Group::direct_product(&Group::cyclic(2), &Group::cyclic(2));
        assert!(!h.is_cyclic());
        assert_eq!(h.exponent(), 2);
    }

    #[test]
    fn closure_is_idempotent() {
        let g = Group::symmetric(4);
        for gens in [vec![1], vec![5, 2], vec![3, 7, 11]] {
            let first = g.closure(&gens);
            let again = g.closure(&first.to_vec());
            assert_eq!(first, again);
        }
    }

    #[test]
    fn closure_of_nothing_is_trivial() {
        let g = Group::cyclic(5);
        assert_eq!(g.closure(&[]).to_vec(), vec![0]);
    }

    #[test]
    fn cosets_partition_the_group() {
        let g = Group::symmetric(3);
        let subs = g.subgroups().unwrap();
        for sub in subs {
            for left in [true, false] {
                let cosets = g.cosets(sub.members(), left);
                assert_eq!(cosets.len(), g.order() / sub.order());
                assert_eq!(&cosets[0], sub.members());
                let mut union = BitSet::new(g.order());
                for c in &cosets {
                    assert_eq!(c.len(), sub.order());
                    union.union_with(c);
                }
                assert_eq!(union.len(), g.order());
            }
        }
    }

    #[test]
    fn generators_of_cyclic_group() {
        let g = Group::cyclic(8);
        assert_eq!(g.generators().unwrap(), &[1]);
    }

    #[test]
    fn generators_of_s3_have_size_two() {
        let g = Group::symmetric(3);
        let gens = g.generators().unwrap();
        assert_eq!(gens.len(), 2);
        assert_eq!(g.closure(gens).len(), 6);
    }

    #[test]
    fn quotient_of_non_normal_subgroup_is_rejected() {
        let g = Group::symmetric(3);
        let subs = g.subgroups().unwrap();
        let order2 = subs.iter().find(|s| s.order() == 2).unwrap();
        assert!(!g.is_normal(order2).unwrap());
        assert!(matches!(g.quotient(order2), Err(GroupError::NotNormal)));
    }

    #[test]
    fn restriction_keeps_identity_at_zero() {
        let g = Group::symmetric(3);
        let subs = g.subgroups().unwrap();
        let order3 = subs.iter().find(|s| s.order() == 3).unwrap();
        let restricted = g.subgroup_as_group(order3);
        assert_eq!(restricted.group.order(), 3);
        assert_eq!(restricted.to_parent[0], 0);
        assert!(restricted.group.is_cyclic());
    }

    #[test]
    fn malformed_tables_are_rejected() {
        assert!(matches!(
            Group::from_table(vec![]),
            Err(GroupError::MalformedTable(_))
        ));
        // Non-square.
        assert!(Group::from_table(vec![vec![0, 1], vec![1]]).is_err());
        // Out of range.
        assert!(Group::from_table(vec![vec![0, 1], vec![1, 2]]).is_err());
        // 0 not the identity.
        assert!(Group::from_table(vec![vec![1, 0], vec![0, 1]]).is_err());
        // Row repeats an entry (not a Latin square).
        assert!(Group::from_table(vec![
            vec![0, 1, 2],
            vec![1, 1, 0],
            vec![2, 0, 1]
        ])
        .is_err());
        // A valid table passes.
        assert!(Group::from_table(vec![vec![0, 1], vec![1, 0]]).is_ok());
    }

    #[test]
    fn order_profile_distinguishes_z4_from_klein() {
        let z4 = Group::cyclic(4);
        let klein = Group::direct_product(&Group::cyclic(2), &Group::cyclic(2));
        assert_eq!(z4.order_profile(), vec![(1, 1), (2, 1), (4, 2)]);
        assert_eq!(klein.order_profile(), vec![(1, 1), (2, 3)]);
    }
}
