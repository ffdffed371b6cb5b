//! Storage for extrapolation tables built one anti-diagonal at a time.
//!
//! Cell `(k, n)` is column `k` (the extrapolation depth) at row `n`. Adding
//! the `N`-th partial sum produces the anti-diagonal `(0, N), (1, N - 1),
//! ..., (N, 0)`, and every cell of it only depends on the cells of the same
//! diagonal in lower columns and on the previous diagonal. That is why the
//! window mode needs no more than two diagonals.
//!
//! Transforms that cascade whole orders instead keep one [`Column`] per
//! order.
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
enum Storage<V> {
    /// Every column, indexed `columns[k][n]`
    Full(Vec<Vec<V>>),
    /// The previous diagonal and the one under construction, both indexed
    /// by column
    Window { prev: Vec<V>, next: Vec<V> },
}

/// An extrapolation table grown along anti-diagonals
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DiagonalTable<V> {
    storage: Storage<V>,
    /// Number of committed diagonals
    diagonals: usize,
    /// Cells pushed onto the diagonal under construction
    width: usize,
}

impl<V: Copy> DiagonalTable<V> {
    pub(crate) fn new(retain_full_table: bool) -> Self {
        let storage = if retain_full_table {
            Storage::Full(Vec::new())
        } else {
            Storage::Window {
                prev: Vec::new(),
                next: Vec::new(),
            }
        };
        Self {
            storage,
            diagonals: 0,
            width: 0,
        }
    }

    /// Index of the diagonal under construction
    #[inline]
    pub(crate) fn diagonal(&self) -> usize {
        self.diagonals
    }

    /// Column `k` of the last committed diagonal
    pub(crate) fn previous(&self, k: usize) -> Option<V> {
        if k >= self.diagonals {
            return None;
        }
        match &self.storage {
            Storage::Full(columns) => {
                let row = self.diagonals - 1 - k;
                columns.get(k).and_then(|col| col.get(row)).copied()
            }
            Storage::Window { prev, .. } => prev.get(k).copied(),
        }
    }

    /// Append the next column of the diagonal under construction
    pub(crate) fn push(&mut self, value: V) {
        let k = self.width;
        match &mut self.storage {
            Storage::Full(columns) => {
                if k == columns.len() {
                    columns.push(Vec::new());
                }
                columns[k].push(value);
            }
            Storage::Window { next, .. } => next.push(value),
        }
        self.width += 1;
    }

    /// Finish the diagonal under construction
    pub(crate) fn commit(&mut self) {
        if let Storage::Window { prev, next } = &mut self.storage {
            std::mem::swap(prev, next);
            next.clear();
        }
        self.diagonals += 1;
        self.width = 0;
    }

    /// Number of cells held in memory
    pub(crate) fn cells(&self) -> usize {
        match &self.storage {
            Storage::Full(columns) => columns.iter().map(Vec::len).sum(),
            Storage::Window { prev, next } => prev.len() + next.len(),
        }
    }
}

/// Values of one extrapolation order. Without the full table only the three
/// values the next order needs are kept.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column<T> {
    values: VecDeque<T>,
    retain_all: bool,
}

impl<T: Copy> Column<T> {
    pub(crate) fn new(retain_all: bool) -> Self {
        Self {
            values: VecDeque::with_capacity(3),
            retain_all,
        }
    }

    pub(crate) fn push(&mut self, value: T) {
        self.values.push_back(value);
        if !self.retain_all && self.values.len() > 3 {
            self.values.pop_front();
        }
    }

    /// The `i`-th latest value, `back(0)` being the latest
    pub(crate) fn back(&self, i: usize) -> Option<T> {
        let n = self.values.len();
        (i < n).then(|| self.values[n - 1 - i])
    }

    /// The three latest values, oldest first
    pub(crate) fn last_three(&self) -> Option<(T, T, T)> {
        Some((self.back(2)?, self.back(1)?, self.back(0)?))
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}
