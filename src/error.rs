use std::{error, fmt};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, PartialEq)]
pub enum Error<K>
where
    K: Clone + Ord,
{
    /// Returned by the delete family of APIs when the map holds no
    /// entries. Callers can check [`is_empty`] first.
    ///
    /// [`is_empty`]: crate::OrderedMap::is_empty
    EmptyMap,
    /// Returned by create() API when key is already present.
    OverwriteKey,
    /// Fatal case, two red links in a row along some path.
    ConsecutiveReds,
    /// Fatal case, a red link is leaning right.
    RedRightLink,
    /// Fatal case, root of a non-empty tree is red.
    RedRoot,
    /// Fatal case, black height differs between a node's children. The
    /// String component of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, entries are not in sort-order. The first key is the
    /// misplaced one, the second is the ancestor it violates.
    SortError(K, K),
    /// Fatal case, cached subtree count disagrees with its children.
    SizeMismatch(String),
}

impl<K> fmt::Display for Error<K>
where
    K: Clone + Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyMap => write!(f, "map is empty"),
            Error::OverwriteKey => write!(f, "key already present"),
            Error::ConsecutiveReds => write!(f, "consecutive red links"),
            Error::RedRightLink => write!(f, "right leaning red link"),
            Error::RedRoot => write!(f, "root is red"),
            Error::UnbalancedBlacks(msg) => write!(f, "unbalanced blacks, {}", msg),
            Error::SortError(key, bound) => write!(f, "key {:?} out of order with {:?}", key, bound),
            Error::SizeMismatch(msg) => write!(f, "subtree size mismatch, {}", msg),
        }
    }
}

impl<K> error::Error for Error<K> where K: Clone + Ord + fmt::Debug {}
