use std::collections::BTreeSet;

/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for ordered sets. Sets of [`crate::Symbol`]s are always ordered, since a symbol
/// is ordered by its label and two symbols with the same label occupy the same slot.
///
/// Use [`ordered_set`] instead of `collect` to build such a set from an iterator.
pub type OrderedSet<S> = BTreeSet<S>;

/// Builds an [`OrderedSet`] by inserting the elements of `iter` one by one, keeping the first
/// of several elements that compare as equal under [`Ord`].
///
/// `BTreeSet::from_iter` removes duplicates with [`PartialEq`] after sorting, which keeps
/// symbols that have the same label but a different provenance side by side.
pub fn ordered_set<S: Ord, I: IntoIterator<Item = S>>(iter: I) -> OrderedSet<S> {
    let mut set = OrderedSet::new();
    set.extend(iter);
    set
}
