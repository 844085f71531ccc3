use std::fmt;

/// Statistics on [`OrderedMap`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`OrderedMap::stats`] method.
/// * To get full statisics via [`OrderedMap::validate`] method.
///
/// [`OrderedMap`]: crate::OrderedMap
/// [`OrderedMap::stats`]: crate::OrderedMap::stats
/// [`OrderedMap::validate`]: crate::OrderedMap::validate
#[derive(Clone, Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    pub(crate) fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    pub(crate) fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    pub(crate) fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in the map.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head, for `OrderedMap<K,V>`.
    /// The overhead is constant, node size varies with key and value
    /// types. EG:
    ///
    /// ```
    /// use llrb_map::OrderedMap;
    /// let map: OrderedMap<u64, u64> = OrderedMap::new("myinstance");
    ///
    /// // key 8 bytes, value 8 bytes, subtree count 8 bytes,
    /// // links 16 bytes, color 1 byte padded to 8.
    /// assert_eq!(map.stats().node_size(), 48);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to any leaf. Available
    /// only after validation.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics, None when the tree was not validated.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}

/// Depth calculates minimum, maximum, average and percentile of leaf
/// depths, that is the number of links from root to every null link.
#[derive(Clone, Default, Debug)]
pub struct Depth {
    samples: usize,
    min: Option<usize>,
    max: usize,
    total: usize,
    depths: Vec<u64>,
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        self.samples += 1;
        self.total += depth;
        self.min = Some(self.min.map_or(depth, |min| min.min(depth)));
        self.max = self.max.max(depth);
        if self.depths.len() <= depth {
            self.depths.resize(depth + 1, 0);
        }
        self.depths[depth] += 1;
    }

    /// Return number of leaves sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return minimum leaf depth.
    pub fn min(&self) -> usize {
        self.min.unwrap_or(0)
    }

    /// Return maximum leaf depth.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average leaf depth.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return depth as tuple of percentiles, each tuple provides
    /// (percentile, depth). Returned percentiles from 90, 91 .. 100
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles: Vec<(u8, usize)> = vec![];
        let (mut acc, mut prev_perc) = (0_u64, 90_u8);
        let iter = self.depths.iter().enumerate().filter(|(_, &item)| item > 0);
        for (depth, samples) in iter {
            acc += *samples;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev_perc {
                percentiles.push((perc, depth));
                prev_perc = perc;
            }
        }
        percentiles
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ps: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(p, d)| format!("{}: {}", p, d))
            .collect();
        write!(
            f,
            "{{ min: {}, mean: {}, max: {}, percentiles: {{ {} }} }}",
            self.min(),
            self.mean(),
            self.max,
            ps.join(", ")
        )
    }
}
