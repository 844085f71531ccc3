// Reference map, one slot per key in 0..capacity.
struct RefMap {
    entries: Vec<Option<i64>>,
}

impl RefMap {
    fn new(capacity: usize) -> RefMap {
        RefMap {
            entries: vec![None; capacity],
        }
    }

    fn len(&self) -> usize {
        self.entries.iter().filter(|x| x.is_some()).count()
    }

    fn get(&self, key: i64) -> Option<i64> {
        self.entries[key as usize]
    }

    fn insert(&mut self, key: i64, value: i64) -> Option<i64> {
        self.entries[key as usize].replace(value)
    }

    fn create(&mut self, key: i64, value: i64) -> Result<(), Error<i64>> {
        let entry = &mut self.entries[key as usize];
        if entry.is_some() {
            return Err(Error::OverwriteKey);
        }
        *entry = Some(value);
        Ok(())
    }

    fn remove(&mut self, key: i64) -> Result<Option<i64>, Error<i64>> {
        if self.len() == 0 {
            return Err(Error::EmptyMap);
        }
        Ok(self.entries[key as usize].take())
    }

    fn delete_min(&mut self) -> Result<(i64, i64), Error<i64>> {
        match self.iter().next() {
            None => Err(Error::EmptyMap),
            Some((key, value)) => {
                self.entries[key as usize] = None;
                Ok((key, value))
            }
        }
    }

    fn delete_max(&mut self) -> Result<(i64, i64), Error<i64>> {
        match self.iter().last() {
            None => Err(Error::EmptyMap),
            Some((key, value)) => {
                self.entries[key as usize] = None;
                Ok((key, value))
            }
        }
    }

    fn iter(&self) -> std::vec::IntoIter<(i64, i64)> {
        self.range((Bound::Unbounded, Bound::Unbounded))
    }

    fn range(&self, (low, high): (Bound<i64>, Bound<i64>)) -> std::vec::IntoIter<(i64, i64)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(key, value)| value.map(|value| (key as i64, value)))
            .filter(|(key, _)| match low {
                Bound::Included(low) => *key >= low,
                Bound::Excluded(low) => *key > low,
                Bound::Unbounded => true,
            })
            .filter(|(key, _)| match high {
                Bound::Included(high) => *key <= high,
                Bound::Excluded(high) => *key < high,
                Bound::Unbounded => true,
            })
            .collect::<Vec<(i64, i64)>>()
            .into_iter()
    }

    fn reverse(&self, bounds: (Bound<i64>, Bound<i64>)) -> std::vec::IntoIter<(i64, i64)> {
        let mut entries: Vec<(i64, i64)> = self.range(bounds).collect();
        entries.reverse();
        entries.into_iter()
    }
}

fn random_low_high(rng: &mut SmallRng, size: usize) -> (Bound<i64>, Bound<i64>) {
    let low = rng.gen_range(0, size as i64);
    let high = rng.gen_range(0, size as i64);
    let low = match rng.gen::<u8>() % 3 {
        0 => Bound::Included(low),
        1 => Bound::Excluded(low),
        2 => Bound::Unbounded,
        _ => unreachable!(),
    };
    let high = match rng.gen::<u8>() % 3 {
        0 => Bound::Included(high),
        1 => Bound::Excluded(high),
        2 => Bound::Unbounded,
        _ => unreachable!(),
    };
    (low, high)
}

fn assert_same<I, J>(mut iter: I, mut iter_ref: J)
where
    I: Iterator<Item = (i64, i64)>,
    J: Iterator<Item = (i64, i64)>,
{
    loop {
        match (iter.next(), iter_ref.next()) {
            (Some(item), Some(ref_item)) => assert_eq!(item, ref_item),
            (None, None) => break,
            (Some(item), None) => panic!("invalid item: {:?}", item),
            (None, Some(ref_item)) => panic!("invalid none: {:?}", ref_item),
        }
    }
}
