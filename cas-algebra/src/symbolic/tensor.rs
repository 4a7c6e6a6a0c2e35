//! Minimal tensor support: the operations the term combiner and the power normalizer need.

use cas_error::Error;
use crate::ctxt::Ctxt;
use crate::error::UnsupportedShape;
use std::cmp::Ordering;
use super::{add, expr::Expr, multiply};

/// A tensor of expressions, stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tensor {
    /// The size of each dimension. The rank of the tensor is the number of dimensions.
    dims: Vec<usize>,

    /// The elements, in row-major order.
    elems: Vec<Expr>,
}

impl std::fmt::Display for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_dim(
            f: &mut std::fmt::Formatter<'_>,
            dims: &[usize],
            elems: &[Expr],
        ) -> std::fmt::Result {
            let Some((&len, rest)) = dims.split_first() else {
                return write!(f, "{}", elems[0]);
            };
            let stride = rest.iter().product::<usize>();
            write!(f, "[")?;
            for i in 0..len {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_dim(f, rest, &elems[i * stride..(i + 1) * stride])?;
            }
            write!(f, "]")
        }

        write_dim(f, &self.dims, &self.elems)
    }
}

impl Tensor {
    /// Creates a tensor with the given dimensions and elements. Returns [`None`] if there are no
    /// dimensions, any dimension is zero, or the number of elements does not match the dimensions.
    pub fn new(dims: Vec<usize>, elems: Vec<Expr>) -> Option<Self> {
        if dims.is_empty() || dims.contains(&0) || dims.iter().product::<usize>() != elems.len() {
            return None;
        }
        Some(Self { dims, elems })
    }

    /// Creates a rank-1 tensor from the given elements. Returns [`None`] if there are none.
    pub fn vector(elems: Vec<Expr>) -> Option<Self> {
        Self::new(vec![elems.len()], elems)
    }

    /// Creates a rank-2 tensor from the given rows. Returns [`None`] if the rows are empty or do
    /// not all have the same length.
    pub fn matrix(rows: Vec<Vec<Expr>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let dims = vec![rows.len(), cols];
        Self::new(dims, rows.into_iter().flatten().collect())
    }

    /// Creates the `n` by `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let elems = (0..n * n)
            .map(|i| Expr::integer(u8::from(i / n == i % n)))
            .collect();
        Self { dims: vec![n, n], elems }
    }

    /// Returns the rank (number of dimensions) of the tensor.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the size of each dimension.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the elements in row-major order.
    pub fn elems(&self) -> &[Expr] {
        &self.elems
    }

    /// Orders two tensors by rank, then by their dimensions.
    pub fn cmp_shape(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank()).then_with(|| self.dims.cmp(&other.dims))
    }

    /// Returns true if every element is zero.
    pub fn is_zero(&self) -> bool {
        self.elems.iter().all(Expr::is_zero)
    }

    /// Applies the given function to each element, keeping the shape.
    pub fn map(&self, f: impl FnMut(&Expr) -> Expr) -> Self {
        Self {
            dims: self.dims.clone(),
            elems: self.elems.iter().map(f).collect(),
        }
    }

    /// Applies the given fallible function to each element, keeping the shape.
    pub fn try_map(&self, f: impl FnMut(&Expr) -> Result<Expr, Error>) -> Result<Self, Error> {
        Ok(Self {
            dims: self.dims.clone(),
            elems: self.elems.iter().map(f).collect::<Result<_, _>>()?,
        })
    }

    /// Adds two tensors of the same shape element by element.
    pub(crate) fn add(&self, ctxt: &Ctxt, other: &Self) -> Result<Self, Error> {
        debug_assert_eq!(self.dims, other.dims);
        Ok(Self {
            dims: self.dims.clone(),
            elems: self.elems.iter()
                .zip(&other.elems)
                .map(|(lhs, rhs)| add(ctxt, lhs.clone(), rhs.clone()))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Multiplies every element by the given scalar.
    pub(crate) fn scale(&self, ctxt: &Ctxt, scalar: &Expr) -> Result<Self, Error> {
        self.try_map(|elem| multiply(ctxt, scalar.clone(), elem.clone()))
    }

    /// Multiplies two square matrices of the same size.
    fn matmul(&self, ctxt: &Ctxt, other: &Self) -> Result<Self, Error> {
        let n = self.dims[0];
        let mut elems = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let terms = (0..n)
                    .map(|k| multiply(
                        ctxt,
                        self.elems[row * n + k].clone(),
                        other.elems[k * n + col].clone(),
                    ))
                    .collect::<Result<Vec<_>, _>>()?;
                elems.push(super::add_all(ctxt, terms)?);
            }
        }
        Ok(Self { dims: self.dims.clone(), elems })
    }

    /// Raises the tensor to the given power.
    ///
    /// Only square matrices raised to non-negative integers are computed; `m^0` is the identity
    /// matrix. Returns [`None`] for other exponents, leaving the power unreduced, and an error for
    /// tensors that are not square matrices.
    pub(crate) fn power(&self, ctxt: &Ctxt, exponent: &Expr) -> Result<Option<Self>, Error> {
        let Some(n) = exponent.as_integer() else {
            return Ok(None);
        };

        if self.rank() != 2 || self.dims[0] != self.dims[1] {
            return Err(Error::unspanned(UnsupportedShape {
                operation: "power",
                rank: self.rank(),
                expected: "a square matrix",
            }));
        }

        let Some(n) = n.to_u32() else {
            return Ok(None);
        };

        let mut result = Self::identity(self.dims[0]);
        for _ in 0..n {
            ctxt.check_interrupt()?;
            result = result.matmul(ctxt, self)?;
        }
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matrix(rows: &[&[i32]]) -> Tensor {
        Tensor::matrix(
            rows.iter()
                .map(|row| row.iter().map(|&n| Expr::integer(n)).collect())
                .collect(),
        ).unwrap()
    }

    #[test]
    fn shape_checks() {
        assert!(Tensor::new(vec![2, 2], vec![Expr::integer(1)]).is_none());
        assert!(Tensor::matrix(vec![vec![Expr::integer(1)], vec![]]).is_none());
        assert!(Tensor::vector(vec![]).is_none());
    }

    #[test]
    fn display() {
        assert_eq!(matrix(&[&[1, 2], &[3, 4]]).to_string(), "[[1, 2], [3, 4]]");
    }

    #[test]
    fn matrix_power() {
        let ctxt = Ctxt::default();
        let m = matrix(&[&[1, 1], &[0, 1]]);
        assert_eq!(m.power(&ctxt, &Expr::integer(3)).unwrap(), Some(matrix(&[&[1, 3], &[0, 1]])));
        assert_eq!(m.power(&ctxt, &Expr::integer(0)).unwrap(), Some(Tensor::identity(2)));
        assert_eq!(m.power(&ctxt, &Expr::integer(-1)).unwrap(), None);
    }

    #[test]
    fn power_of_vector_fails() {
        let ctxt = Ctxt::default();
        let v = Tensor::vector(vec![Expr::symbol("x"), Expr::symbol("y")]).unwrap();
        let err = v.power(&ctxt, &Expr::integer(2)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnsupportedShape>().map(|kind| kind.rank),
            Some(1),
        );
    }

    #[test]
    fn symbolic_elements() {
        let ctxt = Ctxt::default();
        let x = Expr::symbol("x");
        let v = Tensor::vector(vec![x.clone(), Expr::integer(1)]).unwrap();
        let sum = v.add(&ctxt, &v).unwrap();
        assert_eq!(sum.elems(), &[Expr::Mul(vec![Expr::integer(2), x]), Expr::integer(2)]);
    }
}
