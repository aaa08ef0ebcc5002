//! Uniform grid hash over Lab space
//!
//! Cells have edge length equal to the rejection threshold. A query collects the 3x3x3 block of
//! cells around the probe. ΔE94 is neither Euclidean nor symmetric, so this bounds the search
//! heuristically rather than guaranteeing every color within the threshold is visited.

use std::collections::HashMap;

use itertools::iproduct;
use palette::Lab;
use palette::white_point::D65;

/// Integer cell coordinates of a Lab value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinKey {
    pub l: i64,
    pub a: i64,
    pub b: i64,
}

impl BinKey {
    pub fn of(lab: &Lab<D65, f64>, bin_size: f64) -> Self {
        Self {
            l: (lab.l / bin_size).floor() as i64,
            a: (lab.a / bin_size).floor() as i64,
            b: (lab.b / bin_size).floor() as i64,
        }
    }

    /// This cell and its 26 neighbours
    pub fn neighbourhood(self) -> impl Iterator<Item = BinKey> {
        iproduct!(-1..=1, -1..=1, -1..=1).map(move |(dl, da, db)| BinKey {
            l: self.l + dl,
            a: self.a + da,
            b: self.b + db,
        })
    }
}

/// Buckets of palette indices keyed by the Lab cell each entry falls in
#[derive(Debug, Clone)]
pub struct SpatialBinIndex {
    bin_size: f64,
    bins: HashMap<BinKey, Vec<usize>>,
    len: usize,
}

impl SpatialBinIndex {
    pub fn new(bin_size: f64) -> Self {
        Self {
            bin_size,
            bins: HashMap::new(),
            len: 0,
        }
    }

    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    pub fn key(&self, lab: &Lab<D65, f64>) -> BinKey {
        BinKey::of(lab, self.bin_size)
    }

    /// Store `index` in the bucket of its own cell
    pub fn insert(&mut self, index: usize, lab: &Lab<D65, f64>) {
        let key = self.key(lab);
        self.bins.entry(key).or_default().push(index);
        self.len += 1;
    }

    /// Indices stored anywhere in the 3x3x3 neighbourhood of `lab`
    pub fn query(&self, lab: &Lab<D65, f64>) -> Vec<usize> {
        self.key(lab)
            .neighbourhood()
            .filter_map(|key| self.bins.get(&key))
            .flatten()
            .copied()
            .collect()
    }

    pub fn bucket(&self, key: &BinKey) -> &[usize] {
        self.bins.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of stored indices
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells
    pub fn occupied_bins(&self) -> usize {
        self.bins.len()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn key_floors_towards_negative_infinity() {
        let key = BinKey::of(&Lab::new(5.0, -0.5, -4.0), 2.0);
        assert_eq!(key, BinKey { l: 2, a: -1, b: -2 });
    }

    #[test]
    fn neighbourhood_has_27_distinct_cells() {
        let cells = BinKey { l: 0, a: 3, b: -3 }.neighbourhood().collect_vec();
        assert_eq!(cells.len(), 27);
        assert_eq!(cells.iter().unique().count(), 27);
        assert!(cells.contains(&BinKey { l: 0, a: 3, b: -3 }));
        assert!(cells.contains(&BinKey { l: -1, a: 2, b: -4 }));
        assert!(cells.contains(&BinKey { l: 1, a: 4, b: -2 }));
    }

    #[test]
    fn each_entry_lives_in_its_own_bucket() {
        let mut index = SpatialBinIndex::new(2.0);
        let labs = [
            Lab::new(50.0, 10.0, 10.0),
            Lab::new(50.5, 10.5, 10.5),
            Lab::new(80.0, -30.0, 5.0),
        ];
        for (i, lab) in labs.iter().enumerate() {
            index.insert(i, lab);
        }
        assert_eq!(index.len(), 3);
        assert_eq!(index.occupied_bins(), 2);
        assert_eq!(index.bucket(&index.key(&labs[0])), &[0, 1]);
        assert_eq!(index.bucket(&index.key(&labs[2])), &[2]);
    }

    #[test]
    fn query_sees_adjacent_cells_only() {
        let mut index = SpatialBinIndex::new(2.0);
        index.insert(0, &Lab::new(50.0, 10.0, 10.0));
        index.insert(1, &Lab::new(53.9, 10.0, 10.0));
        index.insert(2, &Lab::new(56.1, 10.0, 10.0));

        let near = index.query(&Lab::new(51.0, 10.0, 10.0)).into_iter().sorted().collect_vec();
        assert_eq!(near, vec![0, 1]);
        assert!(index.query(&Lab::new(20.0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn empty_index_answers_nothing() {
        let index = SpatialBinIndex::new(1.0);
        assert!(index.is_empty());
        assert!(index.query(&Lab::new(0.0, 0.0, 0.0)).is_empty());
        assert!(index.bucket(&BinKey { l: 0, a: 0, b: 0 }).is_empty());
    }
}
