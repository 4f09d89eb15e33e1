// SPDX-License-Identifier: GPL-3.0-or-later

//! Restricted Damerau-Levenshtein edit distance over code points.
//!
//! The recurrence is the classic Levenshtein one (deletion, insertion,
//! substitution) extended with a two-step look-back that lets an adjacent
//! transposition cost 1 instead of 2. The look-back only fires once both
//! indices exceed 2, so a swap in the first two positions (`"ab"` vs `"ba"`)
//! still costs two substitutions. This is a restricted variant, not full
//! Damerau-Levenshtein: existing scores depend on it, so keep it as is.

/// Dense `(rows × cols)` table of edit costs backed by a single owned buffer.
///
/// Cell `(i, j)` holds the minimum cost of turning the first `i` code points
/// of the left sequence into the first `j` code points of the right one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl DistanceMatrix {
    /// Allocate a zeroed matrix for sequences of `len1` and `len2` code points.
    pub fn new(len1: usize, len2: usize) -> Self {
        let rows = len1 + 1;
        let cols = len2 + 1;
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Allocate a matrix with row 0 set to `0..=len2` and column 0 set to `0..=len1`.
    pub fn with_borders(len1: usize, len2: usize) -> Self {
        let mut matrix = Self::new(len1, len2);
        for i in 0..matrix.rows {
            matrix.set(i, 0, i);
        }
        for j in 0..matrix.cols {
            matrix.set(0, j, j);
        }
        matrix
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[self.offset(i, j)]
    }

    /// Write cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    pub fn set(&mut self, i: usize, j: usize, value: usize) {
        let offset = self.offset(i, j);
        self.cells[offset] = value;
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.rows && j < self.cols,
            "cell ({i}, {j}) outside {}x{} distance matrix",
            self.rows,
            self.cols
        );
        i * self.cols + j
    }

    /// Fill the matrix for `left` and `right` and return it.
    pub fn compute(left: &[char], right: &[char]) -> Self {
        let mut matrix = Self::with_borders(left.len(), right.len());

        for index1 in 1..=left.len() {
            let left_current = left[index1 - 1];

            for index2 in 1..=right.len() {
                let right_current = right[index2 - 1];
                let cost = usize::from(left_current != right_current);

                let above = matrix.get(index1 - 1, index2) + 1;
                let beside = matrix.get(index1, index2 - 1) + 1;
                let diagonal = matrix.get(index1 - 1, index2 - 1) + cost;
                let mut cell = above.min(beside).min(diagonal);

                if index1 > 2 && index2 > 2 {
                    let mut transposition = matrix.get(index1 - 2, index2 - 2) + 1;
                    if left[index1 - 2] != right_current {
                        transposition += 1;
                    }
                    if left_current != right[index2 - 2] {
                        transposition += 1;
                    }
                    cell = cell.min(transposition);
                }

                matrix.set(index1, index2, cell);
            }
        }

        matrix
    }

    /// Cost stored in the bottom-right cell.
    pub fn distance(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Restricted edit distance between two code-point sequences.
///
/// An empty side yields the other side's length.
pub fn edit_distance(left: &[char], right: &[char]) -> usize {
    if left.is_empty() {
        return right.len();
    }
    if right.is_empty() {
        return left.len();
    }

    DistanceMatrix::compute(left, right).distance()
}
