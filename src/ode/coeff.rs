use crate::ode::types::State;

/// Stage values of a single Runge-Kutta step, in stage order.
#[derive(Debug, Default)]
pub struct CoefficientMap {
    inner: Vec<CoefficientPoint>,
}

impl CoefficientMap {
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// the slopes `k_i`
    #[inline]
    pub fn ks(&self) -> Ks<'_> {
        Ks {
            inner: self.inner.iter(),
        }
    }

    /// the stage states the slopes were evaluated at
    #[inline]
    pub fn vs(&self) -> Vs<'_> {
        Vs {
            inner: self.inner.iter(),
        }
    }
}

impl std::ops::Deref for CoefficientMap {
    type Target = Vec<CoefficientPoint>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl std::ops::DerefMut for CoefficientMap {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<'a> IntoIterator for &'a CoefficientMap {
    type Item = &'a CoefficientPoint;
    type IntoIter = std::slice::Iter<'a, CoefficientPoint>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

pub struct Ks<'a> {
    inner: std::slice::Iter<'a, CoefficientPoint>,
}

impl<'a> Iterator for Ks<'a> {
    type Item = &'a State;

    #[inline]
    fn next(&mut self) -> Option<&'a State> {
        self.inner.next().map(|coeff| &coeff.k)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct Vs<'a> {
    inner: std::slice::Iter<'a, CoefficientPoint>,
}

impl<'a> Iterator for Vs<'a> {
    type Item = &'a State;

    #[inline]
    fn next(&mut self) -> Option<&'a State> {
        self.inner.next().map(|coeff| &coeff.v)
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// pairs the slope `k` with the stage state `v` it was evaluated at
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientPoint {
    pub k: State,
    pub v: State,
}

impl CoefficientPoint {
    #[inline]
    pub fn new(k: State, v: State) -> Self {
        Self { k, v }
    }
}
