//! Fixed-layout record: one value per schema field, addressed by the field's index.

use std::ops::{Index, IndexMut};

/// Values of one record in schema order.
///
/// Build one with [crate::schema::Schema::record] or
/// [crate::schema::Schema::record_from] and address slots with
/// [crate::schema::Schema::index_of].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: Vec<f64>,
}

impl Record {
    /// A record of `len` zeroed slots.
    pub fn zeroed(len: usize) -> Self {
        Record {
            values: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn resize(&mut self, len: usize) {
        self.values.resize(len, 0.0);
    }
}

impl Index<usize> for Record {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl IndexMut<usize> for Record {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

impl From<Vec<f64>> for Record {
    fn from(values: Vec<f64>) -> Self {
        Record { values }
    }
}
