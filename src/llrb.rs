use std::{
    borrow::Borrow,
    cmp::{self, Ordering},
    mem,
    ops::{Bound, DerefMut, RangeBounds},
    vec,
};

use log::{debug, trace};

use crate::error::Error;
use crate::stats::{Depth, Stats};

/// Default number of entries fetched from the tree in one batch by
/// iterators, refer to [`OrderedMap::set_iter_limit`].
pub const ITER_LIMIT: usize = 100;

/// OrderedMap manage a single instance of in-memory ordered map using
/// [left-leaning-red-black][llrb] tree.
///
/// Every key holds exactly one value, re-inserting a key overwrites its
/// value. Height of the tree stays within `2 * log2(n + 1)` irrespective
/// of the order in which keys are inserted or removed.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
#[derive(Clone)]
pub struct OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    name: String,
    root: Option<Box<Node<K, V>>>,
    iter_limit: usize,
}

/// Different ways to construct a new OrderedMap instance.
impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Create an empty instance of OrderedMap, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> OrderedMap<K, V>
    where
        S: AsRef<str>,
    {
        debug!("new ordered map {:?}", name.as_ref());
        OrderedMap {
            name: name.as_ref().to_string(),
            root: Default::default(),
            iter_limit: ITER_LIMIT,
        }
    }

    /// Create a new instance of OrderedMap and load it with entries
    /// from `iter`. If a key repeats, later value overwrites the
    /// earlier one.
    pub fn load_from<S, I>(name: S, iter: I) -> OrderedMap<K, V>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = OrderedMap::new(name);
        for (key, value) in iter {
            map.insert(key, value);
        }
        debug!("loaded {} entries into {:?}", map.len(), map.name);
        map
    }
}

/// Maintenance API.
impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating OrderedMap instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        size(self.root.as_deref())
    }

    /// Check whether this map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of entries fetched from the tree in one batch by
    /// [`iter`], [`range`] and the key iterators. Values less than
    /// 1 are treated as 1.
    ///
    /// [`iter`]: OrderedMap::iter
    /// [`range`]: OrderedMap::range
    pub fn set_iter_limit(&mut self, limit: usize) -> &mut Self {
        self.iter_limit = cmp::max(limit, 1);
        self
    }

    /// Return longest path, in links, from root to a null link. Empty
    /// map has a height of -1 and a map with single entry has 0.
    pub fn height(&self) -> isize {
        height(self.root.as_deref())
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.len(), mem::size_of::<Node<K, V>>())
    }

    /// Validate LLRB tree with following rules:
    ///
    /// * Root is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Red links lean left.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    /// * Cached subtree sizes add up.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error<K>> {
        let root = self.root.as_deref();
        if is_red(root) {
            return Err(Error::RedRoot);
        }
        let mut stats = self.stats();
        let mut depths = Depth::new();
        let blacks = OrderedMap::validate_tree(root, false, 0, 0, (None, None), &mut depths)?;
        stats.set_blacks(blacks);
        stats.set_depths(depths);
        Ok(stats)
    }
}

/// Read operations on OrderedMap instance.
impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Get the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        while let Some(nref) = node {
            node = match nref.key.borrow().cmp(key) {
                Ordering::Less => nref.right_deref(),
                Ordering::Greater => nref.left_deref(),
                Ordering::Equal => return Some(nref.value.clone()),
            };
        }
        None
    }

    /// Check whether key is present in this map.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Return the smallest key, None if map is empty.
    pub fn min(&self) -> Option<K> {
        self.first().map(|(key, _)| key)
    }

    /// Return the largest key, None if map is empty.
    pub fn max(&self) -> Option<K> {
        self.last().map(|(key, _)| key)
    }

    /// Return the entry with smallest key.
    pub fn first(&self) -> Option<(K, V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left_deref() {
            node = left;
        }
        Some((node.key.clone(), node.value.clone()))
    }

    /// Return the entry with largest key.
    pub fn last(&self) -> Option<(K, V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right_deref() {
            node = right;
        }
        Some((node.key.clone(), node.value.clone()))
    }

    /// Return an iterator over all entries in this instance, in sort
    /// order.
    pub fn iter(&self) -> Range<K, V> {
        self.range::<K, _>(..)
    }

    /// Return an iterator over all keys, in sort order.
    pub fn keys(&self) -> Keys<K, V> {
        Keys { inner: self.iter() }
    }

    /// Return an iterator over keys between `min` and `max`, both
    /// inclusive. Iterator is empty if `min` is greater than `max`.
    pub fn keys_between(&self, min: &K, max: &K) -> Keys<K, V> {
        let mut inner = self.range::<K, _>((Bound::Included(min), Bound::Included(max)));
        if min > max {
            inner.low = None;
        }
        Keys { inner }
    }

    /// Range over all entries from low to high. Use [`Range::rev`] to
    /// iterate from high to low.
    pub fn range<Q, R>(&self, range: R) -> Range<K, V>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ToOwned<Owned = K> + ?Sized,
    {
        Range {
            root: self.root.as_deref(),
            node_iter: vec![].into_iter(),
            low: Some(to_owned_bound(range.start_bound())),
            high: to_owned_bound(range.end_bound()),
            limit: self.iter_limit,
        }
    }
}

type Upsert<K, V> = (Box<Node<K, V>>, Put<V>);

type Delete<K, V> = (Option<Box<Node<K, V>>>, Option<V>);

type Delmin<K, V> = (Option<Box<Node<K, V>>>, Box<Node<K, V>>);

// Outcome of a single put into the tree.
enum Put<V> {
    Inserted,
    Replaced(V),
    Refused,
}

/// Write operations on OrderedMap instance.
impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (mut root, put) = OrderedMap::upsert(self.root.take(), key, value, true);
        root.set_black();
        self.root = Some(root);
        match put {
            Put::Replaced(old_value) => Some(old_value),
            Put::Inserted | Put::Refused => None,
        }
    }

    /// Create a new {key, value} entry in the map. If key is already
    /// present return error and leave the old entry as it is.
    pub fn create(&mut self, key: K, value: V) -> Result<(), Error<K>> {
        let (mut root, put) = OrderedMap::upsert(self.root.take(), key, value, false);
        root.set_black();
        self.root = Some(root);
        match put {
            Put::Refused => Err(Error::OverwriteKey),
            Put::Inserted | Put::Replaced(_) => Ok(()),
        }
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, return None and the map is left with the same
    /// entries. Deleting from an empty map is an error.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>, Error<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let root = self.take_root("remove")?;
        let (root, old_value) = OrderedMap::do_remove(Some(root), key);
        self.put_root(root);
        if old_value.is_none() {
            trace!("{:?} remove(): key not found", self.name);
        }
        Ok(old_value)
    }

    /// Delete the entry with smallest key and return it.
    pub fn delete_min(&mut self) -> Result<(K, V), Error<K>> {
        let root = self.take_root("delete_min")?;
        let (root, node) = OrderedMap::do_delete_min(root);
        self.put_root(root);
        Ok(node.into_entry())
    }

    /// Delete the entry with largest key and return it.
    pub fn delete_max(&mut self) -> Result<(K, V), Error<K>> {
        let root = self.take_root("delete_max")?;
        let (root, node) = OrderedMap::do_delete_max(root);
        self.put_root(root);
        Ok(node.into_entry())
    }

    // Detach root ahead of a delete. If both children are black, color
    // root red so that the descent always has a red link to give away.
    fn take_root(&mut self, op: &str) -> Result<Box<Node<K, V>>, Error<K>> {
        match self.root.take() {
            None => {
                debug!("{:?} {}(): map is empty", self.name, op);
                Err(Error::EmptyMap)
            }
            Some(mut root) => {
                if !is_red(root.left_deref()) && !is_red(root.right_deref()) {
                    root.set_red();
                }
                Ok(root)
            }
        }
    }

    fn put_root(&mut self, root: Option<Box<Node<K, V>>>) {
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn upsert(node: Option<Box<Node<K, V>>>, key: K, value: V, overwrite: bool) -> Upsert<K, V> {
        let mut node = match node {
            None => return (Node::new(key, value), Put::Inserted),
            Some(node) => node,
        };

        let put = match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, put) = OrderedMap::upsert(node.left.take(), key, value, overwrite);
                node.left = Some(left);
                put
            }
            Ordering::Less => {
                let (right, put) = OrderedMap::upsert(node.right.take(), key, value, overwrite);
                node.right = Some(right);
                put
            }
            Ordering::Equal if overwrite => Put::Replaced(mem::replace(&mut node.value, value)),
            Ordering::Equal => Put::Refused,
        };
        (OrderedMap::walkuprot_23(node), put)
    }

    fn do_remove<Q>(node: Option<Box<Node<K, V>>>, key: &Q) -> Delete<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };

        if node.key.borrow().cmp(key) == Ordering::Greater {
            let left = match node.left_deref() {
                // key is missing, nothing changes below this node.
                None => return (Some(node), None),
                Some(left) => left,
            };
            if !left.is_red() && !is_red(left.left_deref()) {
                node = OrderedMap::move_red_left(node);
            }
            let (left, old_value) = OrderedMap::do_remove(node.left.take(), key);
            node.left = left;
            return (Some(OrderedMap::balance(node)), old_value);
        }

        if is_red(node.left_deref()) {
            node = OrderedMap::rotate_right(node);
        }

        if node.key.borrow().cmp(key) == Ordering::Equal && node.right.is_none() {
            debug_assert!(node.left.is_none());
            return (None, Some(node.into_entry().1));
        }

        if let Some(right) = node.right_deref() {
            if !right.is_red() && !is_red(right.left_deref()) {
                node = OrderedMap::move_red_right(node);
            }
        }

        let old_value = match node.right.take() {
            Some(right) if node.key.borrow().cmp(key) == Ordering::Equal => {
                trace!("remove(): replacing with in-order successor");
                let (right, successor) = OrderedMap::do_delete_min(right);
                node.right = right;
                let (key, value) = successor.into_entry();
                node.key = key;
                Some(mem::replace(&mut node.value, value))
            }
            right => {
                let (right, old_value) = OrderedMap::do_remove(right, key);
                node.right = right;
                old_value
            }
        };
        (Some(OrderedMap::balance(node)), old_value)
    }

    fn do_delete_min(mut node: Box<Node<K, V>>) -> Delmin<K, V> {
        let left = match node.left_deref() {
            None => {
                debug_assert!(node.right.is_none());
                return (None, node);
            }
            Some(left) => left,
        };
        if !left.is_red() && !is_red(left.left_deref()) {
            node = OrderedMap::move_red_left(node);
        }
        match node.left.take() {
            Some(left) => {
                let (left, min_node) = OrderedMap::do_delete_min(left);
                node.left = left;
                (Some(OrderedMap::balance(node)), min_node)
            }
            None => unreachable!("delete_min(): lost left link, call the programmer"),
        }
    }

    fn do_delete_max(mut node: Box<Node<K, V>>) -> Delmin<K, V> {
        if is_red(node.left_deref()) {
            node = OrderedMap::rotate_right(node);
        }
        let right = match node.right_deref() {
            None => {
                debug_assert!(node.left.is_none());
                return (None, node);
            }
            Some(right) => right,
        };
        if !right.is_red() && !is_red(right.left_deref()) {
            node = OrderedMap::move_red_right(node);
        }
        match node.right.take() {
            Some(right) => {
                let (right, max_node) = OrderedMap::do_delete_max(right);
                node.right = right;
                (Some(OrderedMap::balance(node)), max_node)
            }
            None => unreachable!("delete_max(): lost right link, call the programmer"),
        }
    }

    // Return the black height below `node`, lo and hi are the closest
    // ancestor keys bounding this subtree.
    fn validate_tree(
        node: Option<&Node<K, V>>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        (lo, hi): (Option<&K>, Option<&K>),
        depths: &mut Depth,
    ) -> Result<usize, Error<K>> {
        let node = match node {
            None => {
                depths.sample(depth);
                return Ok(nb);
            }
            Some(node) => node,
        };

        let red = node.is_red();
        if fromred && red {
            return Err(Error::ConsecutiveReds);
        }
        if is_red(node.right_deref()) {
            return Err(Error::RedRightLink);
        }
        if !red {
            nb += 1;
        }
        match (lo, hi) {
            (Some(lo), _) if node.key.le(lo) => {
                return Err(Error::SortError(node.key.clone(), lo.clone()));
            }
            (_, Some(hi)) if node.key.ge(hi) => {
                return Err(Error::SortError(node.key.clone(), hi.clone()));
            }
            _ => (),
        }

        let (left, right) = (node.left_deref(), node.right_deref());
        let lbounds = (lo, Some(&node.key));
        let lblacks = OrderedMap::validate_tree(left, red, nb, depth + 1, lbounds, depths)?;
        let rbounds = (Some(&node.key), hi);
        let rblacks = OrderedMap::validate_tree(right, red, nb, depth + 1, rbounds, depths)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(Error::UnbalancedBlacks(err));
        }

        let (lsize, rsize) = (size(left), size(right));
        if node.size != 1 + lsize + rsize {
            let err = format!("node: {} left: {} right: {}", node.size, lsize, rsize);
            return Err(Error::SizeMismatch(err));
        }
        Ok(lblacks)
    }

    //--------- rotation routines for 2-3 algorithm ----------------

    fn walkuprot_23(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right_deref()) && !is_red(node.left_deref()) {
            node = OrderedMap::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = OrderedMap::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            OrderedMap::flip(node.deref_mut())
        }
        node.update_size();
        node
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    (r)                 (r)  \
    //            /       \                 /     \
    //          left       x             node      xr
    //                    / \            /  \
    //                  xl   xr       left   xl
    //
    fn rotate_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut x = match node.right.take() {
            Some(x) if x.is_red() => x,
            _ => panic!("rotate_left(): rotating a black link ? Call the programmer"),
        };
        node.right = x.left.take();
        x.color = node.color;
        x.size = node.size;
        node.set_red();
        node.update_size();
        x.left = Some(node);
        x
    }

    //              (i)                       (i)
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //            (r)   \                   (r)  \
    //           /       \                 /      \
    //          x       right             xl      node
    //         / \                                / \
    //       xl   xr                             xr  right
    //
    fn rotate_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        let mut x = match node.left.take() {
            Some(x) if x.is_red() => x,
            _ => panic!("rotate_right(): rotating a black link ? Call the programmer"),
        };
        node.left = x.right.take();
        x.color = node.color;
        x.size = node.size;
        node.set_red();
        node.update_size();
        x.right = Some(node);
        x
    }

    //        (x)                   (!x)
    //         |                     |
    //        node                  node
    //        / \                   / \
    //      (y) (z)              (!y) (!z)
    //     /      \              /      \
    //   left    right         left    right
    //
    fn flip(node: &mut Node<K, V>) {
        match (node.left.as_deref_mut(), node.right.as_deref_mut()) {
            (Some(left), Some(right)) => {
                left.toggle_link();
                right.toggle_link();
            }
            _ => panic!("flip(): missing child ? Call the programmer"),
        }
        node.toggle_link();
    }

    fn balance(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        if is_red(node.right_deref()) {
            node = OrderedMap::rotate_left(node);
        }
        let left = node.left_deref();
        if is_red(left) && is_red(left.and_then(Node::left_deref)) {
            node = OrderedMap::rotate_right(node);
        }
        if is_red(node.left_deref()) && is_red(node.right_deref()) {
            OrderedMap::flip(node.deref_mut());
        }
        node.update_size();
        node
    }

    fn move_red_left(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        OrderedMap::flip(node.deref_mut());
        if is_red(node.right_deref().and_then(Node::left_deref)) {
            node.right = node.right.take().map(OrderedMap::rotate_right);
            node = OrderedMap::rotate_left(node);
            OrderedMap::flip(node.deref_mut());
        }
        node
    }

    fn move_red_right(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
        OrderedMap::flip(node.deref_mut());
        if is_red(node.left_deref().and_then(Node::left_deref)) {
            node = OrderedMap::rotate_right(node);
            OrderedMap::flip(node.deref_mut());
        }
        node
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = Range<'a, K, V>;

    fn into_iter(self) -> Range<'a, K, V> {
        self.iter()
    }
}

fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool {
    node.map_or(false, Node::is_red)
}

fn size<K, V>(node: Option<&Node<K, V>>) -> usize {
    node.map_or(0, |node| node.size)
}

fn height<K, V>(node: Option<&Node<K, V>>) -> isize {
    match node {
        None => -1,
        Some(node) => 1 + cmp::max(height(node.left_deref()), height(node.right_deref())),
    }
}

fn to_owned_bound<Q>(bound: Bound<&Q>) -> Bound<Q::Owned>
where
    Q: ToOwned + ?Sized,
{
    match bound {
        Bound::Included(key) => Bound::Included(key.to_owned()),
        Bound::Excluded(key) => Bound::Excluded(key.to_owned()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

// Whether `key` lies on the inner side of lower bound `low`.
fn above<K: Ord>(low: &Bound<K>, key: &K) -> bool {
    match low {
        Bound::Included(low) => key >= low,
        Bound::Excluded(low) => key > low,
        Bound::Unbounded => true,
    }
}

// Whether `key` lies on the inner side of upper bound `high`.
fn below<K: Ord>(high: &Bound<K>, key: &K) -> bool {
    match high {
        Bound::Included(high) => key <= high,
        Bound::Excluded(high) => key < high,
        Bound::Unbounded => true,
    }
}

// Whether some key smaller than `key` can lie within lower bound `low`.
fn opens_left<K: Ord>(low: &Bound<K>, key: &K) -> bool {
    match low {
        Bound::Included(low) | Bound::Excluded(low) => low < key,
        Bound::Unbounded => true,
    }
}

// Whether some key larger than `key` can lie within upper bound `high`.
fn opens_right<K: Ord>(high: &Bound<K>, key: &K) -> bool {
    match high {
        Bound::Included(high) | Bound::Excluded(high) => high > key,
        Bound::Unbounded => true,
    }
}

/// Iterator over entries of [`OrderedMap`] in ascending order, within
/// a range. Entries are read from the tree in batches, refer to
/// [`OrderedMap::set_iter_limit`].
pub struct Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    root: Option<&'a Node<K, V>>,
    node_iter: vec::IntoIter<(K, V)>,
    low: Option<Bound<K>>, // None once the range is exhausted.
    high: Bound<K>,
    limit: usize,
}

impl<'a, K, V> Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Iterate the same range in descending order. Meant to be called
    /// on a fresh range.
    pub fn rev(self) -> Reverse<'a, K, V> {
        let (high, low) = match self.low {
            Some(low) => (Some(self.high), low),
            None => (None, Bound::Unbounded),
        };
        Reverse {
            root: self.root,
            node_iter: vec![].into_iter(),
            high,
            low,
            limit: self.limit,
        }
    }

    fn range_iter(
        &self,
        low: &Bound<K>,
        node: Option<&Node<K, V>>,
        acc: &mut Vec<(K, V)>, // accumulator for batch of nodes
    ) -> bool {
        let node = match node {
            None => return true,
            Some(node) => node,
        };

        if opens_left(low, &node.key) && !self.range_iter(low, node.left_deref(), acc) {
            return false;
        }
        if above(low, &node.key) && below(&self.high, &node.key) {
            acc.push((node.key.clone(), node.value.clone()));
            if acc.len() >= self.limit {
                return false;
            }
        }
        if opens_right(&self.high, &node.key) {
            return self.range_iter(low, node.right_deref(), acc);
        }
        true
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if let item @ Some(_) = self.node_iter.next() {
            return item;
        }
        let low = self.low.take()?;
        let mut acc: Vec<(K, V)> = Vec::with_capacity(self.limit);
        self.range_iter(&low, self.root, &mut acc);
        self.low = acc.last().map(|x| Bound::Excluded(x.0.clone()));
        self.node_iter = acc.into_iter();
        self.node_iter.next()
    }
}

/// Iterator over entries of [`OrderedMap`] in descending order, within
/// a range. Created by [`Range::rev`].
pub struct Reverse<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    root: Option<&'a Node<K, V>>,
    node_iter: vec::IntoIter<(K, V)>,
    high: Option<Bound<K>>, // None once the range is exhausted.
    low: Bound<K>,
    limit: usize,
}

impl<'a, K, V> Reverse<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn reverse_iter(
        &self,
        high: &Bound<K>,
        node: Option<&Node<K, V>>,
        acc: &mut Vec<(K, V)>, // accumulator for batch of nodes
    ) -> bool {
        let node = match node {
            None => return true,
            Some(node) => node,
        };

        if opens_right(high, &node.key) && !self.reverse_iter(high, node.right_deref(), acc) {
            return false;
        }
        if above(&self.low, &node.key) && below(high, &node.key) {
            acc.push((node.key.clone(), node.value.clone()));
            if acc.len() >= self.limit {
                return false;
            }
        }
        if opens_left(&self.low, &node.key) {
            return self.reverse_iter(high, node.left_deref(), acc);
        }
        true
    }
}

impl<'a, K, V> Iterator for Reverse<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if let item @ Some(_) = self.node_iter.next() {
            return item;
        }
        let high = self.high.take()?;
        let mut acc: Vec<(K, V)> = Vec::with_capacity(self.limit);
        self.reverse_iter(&high, self.root, &mut acc);
        self.high = acc.last().map(|x| Bound::Excluded(x.0.clone()));
        self.node_iter = acc.into_iter();
        self.node_iter.next()
    }
}

/// Iterator over keys of [`OrderedMap`] in ascending order.
pub struct Keys<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    inner: Range<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// Node corresponds to a single entry in OrderedMap instance.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    size: usize,                    // number of entries in this subtree
    left: Option<Box<Node<K, V>>>,  // store: left child
    right: Option<Box<Node<K, V>>>, // store: right child
}

// Primary operations on a single node.
impl<K, V> Node<K, V> {
    // new nodes join the tree through a red link.
    fn new(key: K, value: V) -> Box<Node<K, V>> {
        Box::new(Node {
            key,
            value,
            color: Color::Red,
            size: 1,
            left: None,
            right: None,
        })
    }

    fn into_entry(self: Box<Self>) -> (K, V) {
        let node = *self;
        (node.key, node.value)
    }

    #[inline]
    fn left_deref(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    #[inline]
    fn right_deref(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    #[inline]
    fn update_size(&mut self) {
        self.size = 1 + size(self.left_deref()) + size(self.right_deref());
    }

    #[inline]
    fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    fn toggle_link(&mut self) {
        self.color = match self.color {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    #[inline]
    fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}
