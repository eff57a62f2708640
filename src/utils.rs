/// A trait that provides easy access to the first element of a slice.
pub trait Front<T> {
    fn front(&self) -> &T;
    fn mut_front(&mut self) -> &mut T;
}

/// A trait that provides easy access to the last element of a slice.
pub trait Back<T> {
    fn back(&self) -> &T;
}

impl<T> Front<T> for [T] {
    #[inline(always)]
    fn front(&self) -> &T {
        &self[0]
    }
    #[inline(always)]
    fn mut_front(&mut self) -> &mut T {
        &mut self[0]
    }
}

impl<T> Back<T> for [T] {
    #[inline(always)]
    fn back(&self) -> &T {
        &self[self.len() - 1]
    }
}

/// Allocates a vector of `len` zeros, reporting allocation failure instead of
/// aborting.
pub fn try_zeros(len: usize) -> crate::error::Result<Vec<f64>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| crate::error::Error::AllocationFailure { elements: len })?;
    data.resize(len, 0.0);
    Ok(data)
}
