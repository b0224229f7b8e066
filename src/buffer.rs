use crate::Target;
use core::fmt;

/// A 2-dimensional buffer of pixels, stored row by row.
///
/// This is the frame the renderer draws into, and what gets handed to a window or exported as an image.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Buffer2d<T> {
    size: [usize; 2],
    items: Vec<T>,
}

impl<T> Buffer2d<T> {
    /// Create a new buffer with the given size, filled with duplicates of the given element.
    pub fn fill(size: [usize; 2], item: T) -> Self
    where
        T: Clone,
    {
        Self::fill_with(size, || item.clone())
    }

    /// Create a new buffer with the given size, filled by calling the function for each element.
    pub fn fill_with<F: FnMut() -> T>([w, h]: [usize; 2], mut f: F) -> Self {
        Self {
            size: [w, h],
            items: (0..w * h).map(|_| f()).collect(),
        }
    }

    /// Convert the given position into an index into the raw data of this buffer.
    #[inline(always)]
    pub fn linear_index(&self, [x, y]: [usize; 2]) -> usize {
        y * self.size[0] + x
    }

    /// Change the size of the buffer, discarding its contents.
    pub fn resize(&mut self, [w, h]: [usize; 2], item: T)
    where
        T: Clone,
    {
        self.size = [w, h];
        self.items.clear();
        self.items.resize(w * h, item);
    }

    /// View this buffer as a linear slice of elements.
    #[inline]
    pub fn raw(&self) -> &[T] {
        &self.items
    }

    /// View this buffer as a linear mutable slice of elements.
    #[inline]
    pub fn raw_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Get a reference to the item at the given position, if it is within bounds.
    #[inline]
    pub fn get(&self, [x, y]: [usize; 2]) -> Option<&T> {
        if x < self.size[0] && y < self.size[1] {
            self.items.get(self.linear_index([x, y]))
        } else {
            None
        }
    }

    /// Get a mutable reference to the item at the given position, if it is within bounds.
    #[inline]
    pub fn get_mut(&mut self, [x, y]: [usize; 2]) -> Option<&mut T> {
        if x < self.size[0] && y < self.size[1] {
            let idx = self.linear_index([x, y]);
            self.items.get_mut(idx)
        } else {
            None
        }
    }
}

impl<T: Clone> Target for Buffer2d<T> {
    type Texel = T;

    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        self.size
    }

    #[inline]
    fn read(&self, pos: [usize; 2]) -> Option<T> {
        self.get(pos).cloned()
    }

    #[inline]
    fn write(&mut self, pos: [usize; 2], texel: T) {
        if let Some(item) = self.get_mut(pos) {
            *item = texel;
        }
    }

    fn clear(&mut self, texel: T) {
        self.items.iter_mut().for_each(|item| *item = texel.clone());
    }
}

impl<T> AsRef<[T]> for Buffer2d<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T> AsMut<[T]> for Buffer2d<T> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> fmt::Debug for Buffer2d<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Buffer2d(dimensions: {:?})", self.size)
    }
}
