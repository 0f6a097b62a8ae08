// Copyright 2026 the Arcspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear systems with a [`Vec2`] unknown per row.
//!
//! Spline fitting produces systems whose coefficients are scalars but whose
//! unknowns and right-hand sides are vectors. The x and y components never
//! interact, so a single elimination pass solves both columns at once.
//!
//! Both solvers take `self` by value: elimination overwrites the coefficient
//! storage, so the system cannot be reused after a solve.

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use smallvec::SmallVec;

use crate::common::PIVOT_EPSILON;
use crate::Vec2;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Systems up to this size keep their band storage inline.
const INLINE_ROWS: usize = 16;

type Band = SmallVec<[f64; INLINE_ROWS]>;

/// An error from one of the linear solvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The system has fewer than two unknowns.
    #[error("a system needs at least 2 unknowns, got {0}")]
    TooSmall(usize),
    /// The right-hand side does not have one entry per row.
    #[error("right-hand side has {found} rows but the system has {expected}")]
    Dimension {
        /// Number of rows in the system.
        expected: usize,
        /// Number of right-hand side entries supplied.
        found: usize,
    },
    /// A pivot was numerically zero.
    #[error("pivot of row {row} is numerically zero")]
    Singular {
        /// The row at which elimination stopped.
        row: usize,
    },
    /// Scratch storage for the coefficients could not be allocated.
    #[error("could not allocate scratch space for {0} coefficients")]
    Alloc(usize),
}

/// A tridiagonal system, solved with the Thomas algorithm.
///
/// Row `i` reads `sub[i] v[i-1] + diag[i] v[i] + sup[i] v[i+1] = rhs[i]`.
///
/// # Examples
///
/// ```
/// use arcspline::linear::Tridiagonal;
/// use arcspline::Vec2;
///
/// let mut system = Tridiagonal::new(3).unwrap();
/// system.set_row(0, 0.0, 2.0, 1.0);
/// system.set_row(1, 1.0, 2.0, 1.0);
/// system.set_row(2, 1.0, 2.0, 0.0);
/// let mut v = [Vec2::new(3.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(3.0, 0.0)];
/// system.solve(&mut v).unwrap();
/// assert!(v.iter().all(|v| (v.x - 1.0).abs() < 1e-12));
/// ```
#[derive(Clone, Debug)]
pub struct Tridiagonal {
    sub: Band,
    diag: Band,
    sup: Band,
}

impl Tridiagonal {
    /// Create a system of `n` rows with all coefficients zero.
    pub fn new(n: usize) -> Result<Tridiagonal, SolveError> {
        if n < 2 {
            return Err(SolveError::TooSmall(n));
        }
        Ok(Tridiagonal {
            sub: zeroed_band(n)?,
            diag: zeroed_band(n)?,
            sup: zeroed_band(n)?,
        })
    }

    /// The number of rows.
    #[inline]
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    /// Set the coefficients of one row.
    ///
    /// `sub` is ignored for the first row and `sup` for the last one.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn set_row(&mut self, row: usize, sub: f64, diag: f64, sup: f64) {
        self.sub[row] = sub;
        self.diag[row] = diag;
        self.sup[row] = sup;
    }

    /// Solve the system in place.
    ///
    /// On success `rhs` holds the solution. On failure its contents are
    /// unspecified.
    pub fn solve(mut self, rhs: &mut [Vec2]) -> Result<(), SolveError> {
        let n = self.dim();
        if rhs.len() != n {
            return Err(SolveError::Dimension {
                expected: n,
                found: rhs.len(),
            });
        }
        let mut w = self.diag[0];
        if w.abs() < PIVOT_EPSILON {
            log::debug!("tridiagonal solve: zero pivot in row 0");
            return Err(SolveError::Singular { row: 0 });
        }
        rhs[0] = rhs[0] / w;
        for i in 1..n {
            // The super-diagonal is replaced by its normalized value.
            self.sup[i - 1] /= w;
            w = self.diag[i] - self.sub[i] * self.sup[i - 1];
            if w.abs() < PIVOT_EPSILON {
                log::debug!("tridiagonal solve: zero pivot in row {i} of {n}");
                return Err(SolveError::Singular { row: i });
            }
            rhs[i] = (rhs[i] - self.sub[i] * rhs[i - 1]) / w;
        }
        for i in (0..n - 1).rev() {
            rhs[i] = rhs[i] - self.sup[i] * rhs[i + 1];
        }
        Ok(())
    }
}

fn zeroed_band(n: usize) -> Result<Band, SolveError> {
    let mut v = Band::new();
    v.try_reserve_exact(n).map_err(|_| SolveError::Alloc(n))?;
    v.resize(n, 0.0);
    Ok(v)
}

/// A dense square system, solved by Gauss-Jordan elimination with partial
/// pivoting.
///
/// Coefficients are stored row-major and addressed as `matrix[(row, col)]`.
#[derive(Clone, Debug)]
pub struct DenseMatrix {
    n: usize,
    coeffs: Vec<f64>,
}

impl DenseMatrix {
    /// Create an `n` by `n` system with all coefficients zero.
    pub fn new(n: usize) -> Result<DenseMatrix, SolveError> {
        if n < 2 {
            return Err(SolveError::TooSmall(n));
        }
        let m = n.checked_mul(n).ok_or(SolveError::Alloc(usize::MAX))?;
        let mut v = Vec::new();
        v.try_reserve_exact(m).map_err(|_| SolveError::Alloc(m))?;
        v.resize(m, 0.0);
        Ok(DenseMatrix { n, coeffs: v })
    }

    /// The number of rows (and columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Solve the system in place.
    ///
    /// On success `rhs` holds the solution. On failure its contents are
    /// unspecified.
    pub fn solve(mut self, rhs: &mut [Vec2]) -> Result<(), SolveError> {
        let n = self.n;
        if rhs.len() != n {
            return Err(SolveError::Dimension {
                expected: n,
                found: rhs.len(),
            });
        }
        let a = &mut self.coeffs;
        for k in 0..n {
            // Largest magnitude in column k, at or below the diagonal.
            let mut m = k;
            for i in k + 1..n {
                if a[i * n + k].abs() > a[m * n + k].abs() {
                    m = i;
                }
            }
            if m != k {
                for j in k..n {
                    a.swap(m * n + j, k * n + j);
                }
                rhs.swap(m, k);
            }
            let pivot = a[k * n + k];
            if pivot.abs() < PIVOT_EPSILON {
                log::debug!("dense solve: zero pivot in column {k} of {n}");
                return Err(SolveError::Singular { row: k });
            }
            let inv = pivot.recip();
            for j in k..n {
                a[k * n + j] *= inv;
            }
            rhs[k] *= inv;
            for i in k + 1..n {
                let f = a[i * n + k];
                if f == 0.0 {
                    continue;
                }
                for j in k..n {
                    let t = a[k * n + j] * f;
                    a[i * n + j] -= t;
                }
                rhs[i] = rhs[i] - f * rhs[k];
            }
        }
        for i in (0..n - 1).rev() {
            for j in i + 1..n {
                rhs[i] = rhs[i] - a[i * n + j] * rhs[j];
            }
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(col < self.n, "column {col} out of range");
        &self.coeffs[row * self.n + col]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(col < self.n, "column {col} out of range");
        &mut self.coeffs[row * self.n + col]
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn near(a: Vec2, b: Vec2, epsilon: f64) -> bool {
        (a - b).hypot() < epsilon
    }

    #[test]
    fn tridiagonal_known_solution() {
        let expected = [
            Vec2::new(1.0, -1.0),
            Vec2::new(2.0, 0.5),
            Vec2::new(-3.0, 4.0),
            Vec2::new(0.25, 2.0),
        ];
        let rows = [(0.0, 4.0, 1.0), (1.0, 4.0, 1.0), (2.0, 5.0, -1.0), (1.0, 3.0, 0.0)];
        let mut system = Tridiagonal::new(4).unwrap();
        let mut rhs = [Vec2::ZERO; 4];
        for (i, &(a, b, c)) in rows.iter().enumerate() {
            system.set_row(i, a, b, c);
            let mut r = b * expected[i];
            if i > 0 {
                r += a * expected[i - 1];
            }
            if i < 3 {
                r += c * expected[i + 1];
            }
            rhs[i] = r;
        }
        system.solve(&mut rhs).unwrap();
        for (got, want) in rhs.iter().zip(expected) {
            assert!(near(*got, want, 1e-12), "got {got:?} want {want:?}");
        }
    }

    #[test]
    fn tridiagonal_singular() {
        let mut system = Tridiagonal::new(3).unwrap();
        system.set_row(0, 0.0, 0.0, 1.0);
        system.set_row(1, 1.0, 2.0, 1.0);
        system.set_row(2, 1.0, 2.0, 0.0);
        let mut rhs = [Vec2::ZERO; 3];
        assert_eq!(system.solve(&mut rhs), Err(SolveError::Singular { row: 0 }));

        // Second pivot is 1 - 1 * 1 = 0.
        let mut system = Tridiagonal::new(2).unwrap();
        system.set_row(0, 0.0, 1.0, 1.0);
        system.set_row(1, 1.0, 1.0, 0.0);
        let mut rhs = [Vec2::new(1.0, 1.0); 2];
        assert_eq!(system.solve(&mut rhs), Err(SolveError::Singular { row: 1 }));
    }

    #[test]
    fn size_checks() {
        assert_eq!(Tridiagonal::new(1).unwrap_err(), SolveError::TooSmall(1));
        assert_eq!(DenseMatrix::new(0).unwrap_err(), SolveError::TooSmall(0));
        assert_eq!(
            Tridiagonal::new(usize::MAX).unwrap_err(),
            SolveError::Alloc(usize::MAX)
        );
        assert_eq!(
            DenseMatrix::new(usize::MAX).unwrap_err(),
            SolveError::Alloc(usize::MAX)
        );
        let system = Tridiagonal::new(3).unwrap();
        let mut rhs = [Vec2::ZERO; 2];
        assert_eq!(
            system.solve(&mut rhs),
            Err(SolveError::Dimension {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn dense_needs_pivoting() {
        // Zero on the diagonal; only solvable with a row swap.
        let mut m = DenseMatrix::new(3).unwrap();
        m[(0, 1)] = 2.0;
        m[(0, 2)] = 1.0;
        m[(1, 0)] = 1.0;
        m[(1, 2)] = -1.0;
        m[(2, 0)] = 3.0;
        m[(2, 1)] = 1.0;
        m[(2, 2)] = 1.0;
        // Solution (1, 2, 3) in x, (-1, 0, 1) in y.
        let mut rhs = [Vec2::new(7.0, 1.0), Vec2::new(-2.0, -2.0), Vec2::new(8.0, -2.0)];
        m.solve(&mut rhs).unwrap();
        assert!(near(rhs[0], Vec2::new(1.0, -1.0), 1e-12));
        assert!(near(rhs[1], Vec2::new(2.0, 0.0), 1e-12));
        assert!(near(rhs[2], Vec2::new(3.0, 1.0), 1e-12));
    }

    #[test]
    fn dense_singular() {
        let mut m = DenseMatrix::new(2).unwrap();
        m[(0, 0)] = 1.0;
        m[(0, 1)] = 2.0;
        m[(1, 0)] = 2.0;
        m[(1, 1)] = 4.0;
        let mut rhs = [Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        assert_eq!(m.solve(&mut rhs), Err(SolveError::Singular { row: 1 }));
    }

    #[test]
    fn dense_and_tridiagonal_agree() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for n in [2, 3, 5, 17, 40] {
            let mut tri = Tridiagonal::new(n).unwrap();
            let mut dense = DenseMatrix::new(n).unwrap();
            let mut rhs = Vec::with_capacity(n);
            for i in 0..n {
                let a = if i > 0 { rng.random_range(-1.0..1.0) } else { 0.0 };
                let c = if i + 1 < n { rng.random_range(-1.0..1.0) } else { 0.0 };
                // Diagonal dominance keeps both solvers well conditioned.
                let b = 2.5 + rng.random_range(0.0..1.0);
                tri.set_row(i, a, b, c);
                if i > 0 {
                    dense[(i, i - 1)] = a;
                }
                dense[(i, i)] = b;
                if i + 1 < n {
                    dense[(i, i + 1)] = c;
                }
                rhs.push(Vec2::new(
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-10.0..10.0),
                ));
            }
            let mut v_tri = rhs.clone();
            let mut v_dense = rhs;
            tri.solve(&mut v_tri).unwrap();
            dense.solve(&mut v_dense).unwrap();
            for (a, b) in v_tri.iter().zip(&v_dense) {
                assert!(near(*a, *b, 1e-9), "n = {n}: {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn dense_cyclic_system() {
        // The periodic 1, 4, 1 system has the constant solution for a constant rhs.
        let n = 7;
        let mut m = DenseMatrix::new(n).unwrap();
        for i in 0..n {
            m[(i, (i + n - 1) % n)] = 1.0;
            m[(i, i)] = 4.0;
            m[(i, (i + 1) % n)] = 1.0;
        }
        let mut rhs = vec![Vec2::new(6.0, -12.0); n];
        m.solve(&mut rhs).unwrap();
        for v in rhs {
            assert!(near(v, Vec2::new(1.0, -2.0), 1e-12));
        }
    }
}
