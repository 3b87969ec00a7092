//! Walkthrough of the engine on small well-known groups: invariants,
//! subgroup lattices, and classification against a library.

use group_engine::{isomorphism, Group, GroupError, GroupLibrary};

fn main() -> Result<(), GroupError> {
    env_logger::init();
    println!("=== Finite-Group Engine ===\n");

    let library = build_library();
    section_1_invariants()?;
    section_2_lattices()?;
    section_3_classification(&library)?;
    section_4_embeddings_and_quotients(&library)?;
    Ok(())
}

fn build_library() -> GroupLibrary {
    let mut library = GroupLibrary::new();
    for n in 1..=8 {
        library.insert(format!("Z_{}", n), Group::cyclic(n));
    }
    library.insert(
        "Z_2 x Z_2",
        Group::direct_product(&Group::cyclic(2), &Group::cyclic(2)),
    );
    library.insert(
        "Z_2 x Z_4",
        Group::direct_product(&Group::cyclic(2), &Group::cyclic(4)),
    );
    library.insert("S_3", Group::symmetric(3));
    library.insert("D_4", Group::dihedral(4));
    library.insert("S_4", Group::symmetric(4));
    library
}

// -------------------------------------------------------------------------
// Section 1 — Eager invariants
// -------------------------------------------------------------------------

fn section_1_invariants() -> Result<(), GroupError> {
    println!("--- Section 1: Invariants ---\n");

    for (name, group) in [
        ("Z_6", Group::cyclic(6)),
        ("S_3", Group::symmetric(3)),
        ("D_4", Group::dihedral(4)),
    ] {
        println!("  {} (order {})", name, group.order());
        println!(
            "    abelian: {}, cyclic: {}, exponent: {}",
            group.is_abelian(),
            group.is_cyclic(),
            group.exponent()
        );
        if let Some((i, j)) = group.non_abelian_example() {
            println!("    witness: {}*{} != {}*{}", i, j, j, i);
        }
        println!("    element orders: {:?}", group.element_orders());
        let class_sizes: Vec<usize> = group.conjugacy_classes().iter().map(|c| c.len()).collect();
        println!("    conjugacy class sizes: {:?}", class_sizes);
        println!("    center: {:?}\n", group.center().to_vec());
    }
    Ok(())
}

// -------------------------------------------------------------------------
// Section 2 — Subgroup lattices
// -------------------------------------------------------------------------

fn section_2_lattices() -> Result<(), GroupError> {
    println!("--- Section 2: Subgroup lattices ---\n");

    for (name, group) in [("S_3", Group::symmetric(3)), ("D_4", Group::dihedral(4))] {
        let subgroups = group.subgroups()?;
        println!(
            "  {}: {} subgroups, solvable: {}, simple: {}",
            name,
            subgroups.len(),
            group.is_solvable()?,
            group.is_simple()?
        );
        for (i, sub) in subgroups.iter().enumerate() {
            println!(
                "    #{} order {} members {:?} covers {:?}",
                i,
                sub.order(),
                sub.members().to_vec(),
                sub.contains().to_vec()
            );
        }
        println!();
    }
    Ok(())
}

// -------------------------------------------------------------------------
// Section 3 — Classification against the library
// -------------------------------------------------------------------------

fn section_3_classification(library: &GroupLibrary) -> Result<(), GroupError> {
    println!("--- Section 3: Classification ---\n");

    let unknowns = [
        (
            "Z_2 x Z_3",
            Group::direct_product(&Group::cyclic(2), &Group::cyclic(3)),
        ),
        ("D_3", Group::dihedral(3)),
        (
            "Z_4 x Z_2",
            Group::direct_product(&Group::cyclic(4), &Group::cyclic(2)),
        ),
        ("D_2", Group::dihedral(2)),
    ];
    for (name, group) in &unknowns {
        match isomorphism::find(group, library)? {
            Some((entry, _)) => println!("  {} is isomorphic to {}", name, entry.name),
            None => println!("  {} has no library representative", name),
        }
    }
    println!();
    Ok(())
}

// -------------------------------------------------------------------------
// Section 4 — Embeddings and quotients
// -------------------------------------------------------------------------

fn section_4_embeddings_and_quotients(library: &GroupLibrary) -> Result<(), GroupError> {
    println!("--- Section 4: Embeddings and quotients ---\n");

    let d4 = Group::dihedral(4);
    for sub in d4.subgroups()? {
        if sub.order() != 4 {
            continue;
        }
        if let Some(embedding) = isomorphism::find_embedding(&d4, sub, library)? {
            println!(
                "  {} embeds in D_4 as {:?}",
                embedding.entry.name, embedding.map
            );
        }
    }

    let s3 = Group::symmetric(3);
    let subgroups = s3.subgroups()?;
    for sub in subgroups {
        if sub.order() == 1 || sub.order() == s3.order() || !s3.is_normal(sub)? {
            continue;
        }
        match isomorphism::find_quotient(&s3, sub, library)? {
            Some(quotient) => println!(
                "  S_3 / (order-{} subgroup) is isomorphic to {}, surjection {:?}",
                sub.order(),
                quotient.entry.name,
                quotient.map
            ),
            None => println!(
                "  S_3 / (order-{} subgroup) has no library representative",
                sub.order()
            ),
        }
    }
    println!();
    Ok(())
}
