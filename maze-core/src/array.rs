use std::ops;

use crate::dims::Pos;

/// Row-major 2-D buffer indexed by [`Pos`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2D<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn pos_to_idx(&self, pos: Pos) -> Option<usize> {
        let Pos(r, c) = pos;
        if r < 0 || c < 0 {
            return None;
        }

        let (r, c) = (r as usize, c as usize);
        if r >= self.rows || c >= self.cols {
            return None;
        }

        Some(r * self.cols + c)
    }

    pub fn idx_to_pos(&self, idx: usize) -> Option<Pos> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Pos((idx / self.cols) as i32, (idx % self.cols) as i32))
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.pos_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        self.pos_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buf.iter_mut()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Pos> {
        Pos::iter_fill(self.rows, self.cols)
    }

    pub fn row(&self, r: usize) -> Option<&[T]> {
        if r >= self.rows {
            return None;
        }

        let start = r * self.cols;
        Some(&self.buf[start..start + self.cols])
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, rows: usize, cols: usize) -> Self {
        Self {
            buf: vec![item; rows * cols],
            rows,
            cols,
        }
    }

    pub fn fill(&mut self, item: T) {
        self.buf.fill(item);
    }
}

impl<T> ops::Index<Pos> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {}", index))
    }
}

impl<T> ops::IndexMut<Pos> for Array2D<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("Index out of bounds: {}", index))
    }
}
