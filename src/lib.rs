//! Ordered map on a [left-leaning-red-black][llrb] tree.
//!
//! ```
//! use llrb_map::OrderedMap;
//!
//! let mut map: OrderedMap<i64, &str> = OrderedMap::new("example");
//! map.insert(20, "twenty");
//! map.insert(10, "ten");
//! assert_eq!(map.get(&10), Some("ten"));
//! assert_eq!(map.keys().collect::<Vec<i64>>(), vec![10, 20]);
//! assert_eq!(map.delete_min(), Ok((10, "ten")));
//! ```
//!
//! [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree

mod error;
mod llrb;
mod stats;

pub use crate::error::Error;
pub use crate::llrb::{Keys, OrderedMap, Range, Reverse, ITER_LIMIT};
pub use crate::stats::{Depth, Stats};
