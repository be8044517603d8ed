//! Readable renamings for machine-minted symbols.
//!
//! Trees produced by code generation are full of [`Sym::fresh`] names
//! like `##tmp#247`, which are unambiguous and unreadable in equal
//! measure. [`gensym_ids`] renames them to `tmp_1`, `tmp_2`, ... in
//! first-encounter order, giving stable spellings for snapshot tests.
//! [`alias_gensyms`] picks short animal aliases instead, which is easier
//! on the eyes when reading dumps.

use rustc_hash::FxHashMap;
use templar_core::{Expr, Sym};

use crate::walk::postwalk;

const ANIMALS: &[&str] = &[
    "hare", "porcupine", "gull", "heron", "stoat", "badger", "otter", "lynx", "marmot", "vole",
    "shrew", "weasel", "plover", "crane", "finch", "wren", "swift", "tern", "skua", "auk", "seal",
    "walrus", "ermine", "sable", "marten", "fisher", "mink", "ibex", "chamois", "serow", "saiga",
    "oryx", "eland", "kudu", "duiker", "dikdik", "gerenuk", "impala", "topi", "nyala",
];

/// Rename every generated symbol with `namer(base, n)`, where `n` counts
/// distinct gensyms in first-encounter order. Occurrences of the same
/// gensym all map to the same new name.
fn rename_gensyms(ex: &Expr, mut namer: impl FnMut(&str, usize) -> String) -> Expr {
    let mut table: FxHashMap<Sym, Sym> = FxHashMap::default();
    postwalk(ex, |ex| match &ex {
        Expr::Sym(s) if s.is_gensym() => {
            let next = table.len();
            let renamed = table
                .entry(s.clone())
                .or_insert_with(|| {
                    let base = s.gensym_base().unwrap_or("gensym");
                    Sym::from_owned(namer(base, next))
                })
                .clone();
            Expr::Sym(renamed)
        }
        _ => ex,
    })
}

/// Rename generated symbols to `base_1`, `base_2`, ... in
/// first-encounter order.
///
/// The numbering is shared across bases, so a tree holding `##tmp#81`
/// and `##i#14` comes out with `tmp_1` and `i_2`. Deterministic for a
/// given tree, which makes rewritten output diffable.
#[must_use]
pub fn gensym_ids(ex: &Expr) -> Expr {
    rename_gensyms(ex, |base, n| format!("{base}_{}", n + 1))
}

/// Rename generated symbols to short animal names, in first-encounter
/// order. Cycles with a numeric suffix if a tree somehow holds more
/// gensyms than the alias table.
#[must_use]
pub fn alias_gensyms(ex: &Expr) -> Expr {
    rename_gensyms(ex, |_base, n| {
        let name = ANIMALS[n % ANIMALS.len()];
        if n < ANIMALS.len() {
            name.to_string()
        } else {
            format!("{name}{}", n / ANIMALS.len() + 1)
        }
    })
}
