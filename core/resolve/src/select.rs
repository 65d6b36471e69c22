//! Narrows the classified functions to the working set to expose.

use std::rc::Rc;

use cybind_ast::nodes::FunctionDecl;
use rustc_hash::FxHashSet;

use crate::classify::Classification;

/// Selects the functions to generate bindings for.
///
/// A function is kept when it satisfies `ffilter` (default: accept all)
/// **and**, if an allow-list is given, its name is a member of it. The
/// two constraints compose as a logical AND: an allow-listed name that
/// fails the filter is still excluded.
///
/// The result is sorted by name so selection is deterministic regardless
/// of the category map's iteration order.
pub fn select_functions<F>(
    classification: &Classification,
    ffilter: Option<F>,
    allow_list: Option<&FxHashSet<String>>,
) -> Vec<Rc<FunctionDecl>>
where
    F: Fn(&str) -> bool,
{
    let mut kept: Vec<Rc<FunctionDecl>> = classification
        .functions
        .values()
        .filter(|f| ffilter.as_ref().is_none_or(|p| p(&f.name)))
        .filter(|f| allow_list.is_none_or(|names| names.contains(&f.name)))
        .cloned()
        .collect();
    kept.sort_by(|a, b| a.name.cmp(&b.name));
    kept
}
