use itertools::Itertools;

use crate::traits::Numeric;

/// Iterator adapters for sequences that are known to converge.
pub trait ConvergentSequence<T: Numeric>: Iterator<Item = T> + Sized {
    /// Running sums of the sequence, i.e. turns terms into partial sums.
    ///
    /// # Example
    ///
    /// ```
    /// use shanks::misc::ConvergentSequence;
    ///
    /// let sums: Vec<f64> = vec![1.0, 0.5, 0.25].into_iter().partial_sums().collect();
    /// assert_eq!(sums, vec![1.0, 1.5, 1.75]);
    /// ```
    fn partial_sums(self) -> impl Iterator<Item = T> {
        self.scan(T::zero(), |acc, x| {
            *acc = *acc + x;
            Some(*acc)
        })
    }

    /// Applies Aitken's Δ² process to accelerate the convergence of a sequence.
    /// See https://en.wikipedia.org/wiki/Aitken%27s_delta-squared_process and
    /// https://en.wikipedia.org/wiki/Shanks_transformation
    ///
    /// # Returns
    ///
    /// An iterator over the accelerated sequence.
    fn aitken(self) -> impl Iterator<Item = T> {
        self.tuple_windows::<(_, _, _)>().filter_map(|(x, y, z)| {
            let dx = z - y;
            let dx2 = y - x;
            let ddx = dx - dx2;

            // We can't handle a segment like [2,4,6]
            // But e.g. [2, 2, 2] may have already converged
            if ddx.is_zero() {
                if dx.is_zero() {
                    Some(z)
                } else {
                    None
                }
            } else {
                Some(z - dx * dx / ddx)
            }
        })
    }

    /// Finds the limit of the sequence within a given tolerance using Aitken's
    /// Δ² process. This should *only* be applied to sequences that are known to
    /// converge.
    ///
    /// # Arguments
    ///
    /// * `tol` - The tolerance within which to find the limit.
    /// * `max_len` - The maximum number of source elements to consume.
    ///
    /// # Returns
    ///
    /// The limit of the sequence, or `None` if two successive fourth-order
    /// Aitken values never came within `tol` of each other.
    fn limit(self, tol: T, max_len: usize) -> Option<T> {
        self.take(max_len)
            .aitken()
            .aitken()
            .aitken()
            .aitken()
            .tuple_windows::<(_, _)>()
            .find_map(|(a, b)| {
                if T::is_within_tolerance(a, b, tol) {
                    Some(b)
                } else {
                    None
                }
            })
    }
}

impl<T, I> ConvergentSequence<T> for I
where
    T: Numeric,
    I: Iterator<Item = T> + Sized,
{
}
