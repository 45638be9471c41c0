use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Separator that is placed between the labels of the two sources of a [`Symbol::Pair`].
pub const PAIR_SEPARATOR: char = '_';

/// A symbol is the token type that is used for states as well as for input and output signals
/// of a [`crate::Machine`]. It is either a leaf, which is identified by a plain label, or a pair
/// that is built from two source symbols when taking the product of two machines. A pair
/// remembers where it came from, its label is the concatenation of the source labels.
///
/// Equality is structural, two symbols are equal if and only if their labels are equal and
/// their sources are (recursively) equal. Ordering on the other hand only looks at the label.
/// Thus `Symbol::leaf("a_b")` and `Symbol::pair("a".into(), "b".into())` are unequal, but
/// neither is smaller than the other. Ordered collections of symbols therefore key on labels.
#[derive(Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A plain symbol without provenance.
    Leaf {
        /// The label identifying this symbol.
        label: String,
    },
    /// A composite symbol, built from a left and a right source symbol.
    Pair {
        /// Concatenation of the source labels, joined by [`PAIR_SEPARATOR`].
        label: String,
        /// The left and right source.
        sources: Arc<(Symbol, Symbol)>,
    },
}

impl Symbol {
    /// Creates a leaf symbol with the given label.
    pub fn leaf<S: Into<String>>(label: S) -> Self {
        Symbol::Leaf {
            label: label.into(),
        }
    }

    /// Combines `left` and `right` into a composite symbol whose label is
    /// `left.label() + "_" + right.label()`.
    pub fn pair(left: Symbol, right: Symbol) -> Self {
        let label = format!("{}{PAIR_SEPARATOR}{}", left.label(), right.label());
        Symbol::Pair {
            label,
            sources: Arc::new((left, right)),
        }
    }

    /// Returns the label of the symbol.
    pub fn label(&self) -> &str {
        match self {
            Symbol::Leaf { label } | Symbol::Pair { label, .. } => label,
        }
    }

    /// Returns the left and right source of a pair, or `None` for a leaf.
    pub fn sources(&self) -> Option<(&Symbol, &Symbol)> {
        match self {
            Symbol::Leaf { .. } => None,
            Symbol::Pair { sources, .. } => Some((&sources.0, &sources.1)),
        }
    }

    /// Returns true if and only if `self` is a [`Symbol::Leaf`].
    pub fn is_leaf(&self) -> bool {
        matches!(self, Symbol::Leaf { .. })
    }

    /// Returns true if and only if `self` is a [`Symbol::Pair`].
    pub fn is_pair(&self) -> bool {
        matches!(self, Symbol::Pair { .. })
    }

    /// A symbol is stable if it is a leaf or if it is a pair whose two sources are equal.
    /// For the output of a product machine this means that both operands emitted the same
    /// output.
    pub fn is_stable(&self) -> bool {
        match self.sources() {
            None => true,
            Some((left, right)) => left == right,
        }
    }

    /// Compares two symbols by their labels only, ignoring provenance. This is the ordering
    /// that [`Ord`] implements.
    pub fn compare_by_label(&self, other: &Symbol) -> Ordering {
        self.label().cmp(other.label())
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_by_label(other)
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// equal symbols have equal labels, so hashing the label is consistent with `Eq`
impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label().hash(state)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::leaf(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Symbol::leaf(value)
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol::leaf(value)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sources() {
            None => write!(f, "{}", self.label()),
            Some((left, right)) => write!(f, "({left:?}, {right:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::Symbol;
    use crate::math::ordered_set;

    #[test]
    fn leaf_symbols() {
        let a = Symbol::leaf("a");
        assert_eq!(a, Symbol::leaf("a"));
        assert_ne!(a, Symbol::leaf("b"));
        assert!(a.is_stable());
        assert!(a.is_leaf());
        assert_eq!(a.sources(), None);
        assert_eq!(Symbol::from('a'), a);
    }

    #[test]
    fn pair_symbols() {
        let ab = Symbol::pair("a".into(), "b".into());
        assert_eq!(ab.label(), "a_b");
        assert!(ab.is_pair());
        assert_eq!(ab.sources(), Some((&Symbol::leaf("a"), &Symbol::leaf("b"))));
        assert!(!ab.is_stable());
        assert!(Symbol::pair("0".into(), "0".into()).is_stable());
        assert_eq!(format!("{ab:?}"), "(a, b)");
        assert_eq!(ab.to_string(), "a_b");
    }

    #[test]
    fn stability_is_deep() {
        let left = Symbol::pair("x".into(), "y".into());
        let right = Symbol::leaf("x_y");
        let nested = Symbol::pair(left.clone(), right);
        assert_eq!(nested.label(), "x_y_x_y");
        assert!(!nested.is_stable());
        assert!(Symbol::pair(left.clone(), left).is_stable());
    }

    #[test]
    fn ordering_ignores_provenance() {
        let composite = Symbol::pair("a".into(), "b".into());
        let flat = Symbol::leaf("a_b");

        assert_ne!(composite, flat);
        assert_eq!(composite.cmp(&flat), Ordering::Equal);
        assert_eq!(
            Symbol::leaf("q0").compare_by_label(&Symbol::leaf("q1")),
            Ordering::Less
        );

        let set = ordered_set([composite.clone(), flat]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.first(), Some(&composite));
    }
}
