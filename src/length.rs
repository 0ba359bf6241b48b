use std::fmt::{self, Debug};
use std::rc::{Rc};

use super::{Split};

/// The length of an axis that has no declared bound.
///
/// An unbounded axis is open-ended: its valid indices are whatever the
/// value function of the [`View`] can answer.
///
/// [`View`]: super::View
pub const UNBOUNDED: usize = usize::MAX;

/// The length of one axis of a [`View`], as a function of the indices `P` of
/// the preceding axes.
///
/// `P` is `()` for the first axis, `usize` for the second, `(usize, usize)`
/// for the third and `(usize, usize, usize)` for the fourth.
///
/// ```
/// use funview::{Length, UNBOUNDED};
/// let triangle: Length<usize> = Length::from_fn(|i: usize| i + 1);
/// assert_eq!(triangle.get(4), 5);
/// assert_eq!(Length::<()>::from(None).get(()), UNBOUNDED);
/// assert_eq!(Length::<()>::from(3).get(()), 3);
/// ```
///
/// [`View`]: super::View
pub enum Length<'a, P> {
    /// The same length whatever the preceding indices.
    Fixed(usize),

    /// A length computed on demand, every time it is needed.
    Computed(Rc<dyn Fn(P) -> usize + 'a>),
}

impl<'a, P> Length<'a, P> {
    /// A `Length` that is always `length`.
    pub fn fixed(length: usize) -> Self { Self::Fixed(length) }

    /// A `Length` that is always [`UNBOUNDED`].
    pub fn unbounded() -> Self { Self::Fixed(UNBOUNDED) }

    /// A `Length` computed by `f`.
    ///
    /// `f` must be pure.
    pub fn from_fn(f: impl Fn(P) -> usize + 'a) -> Self { Self::Computed(Rc::new(f)) }

    /// Evaluate this `Length` given the indices of the preceding axes.
    #[inline(always)]
    pub fn get(&self, prefix: P) -> usize {
        match self {
            Self::Fixed(length) => *length,
            Self::Computed(f) => f(prefix),
        }
    }

    /// Returns `true` if `self.get(prefix)` is [`UNBOUNDED`].
    pub fn is_unbounded(&self, prefix: P) -> bool { self.get(prefix) == UNBOUNDED }
}

impl<'a, P: Split> Length<'a, P> {
    /// Fix the first of the preceding indices to be `head`.
    ///
    /// ```
    /// use funview::{Length};
    /// let area: Length<(usize, usize)> = Length::from_fn(|(i, j): (usize, usize)| i * j);
    /// assert_eq!(area.bind(3).get(4), 12);
    /// ```
    pub fn bind(&self, head: usize) -> Length<'a, P::Tail> {
        match self {
            Self::Fixed(length) => Length::Fixed(*length),
            Self::Computed(f) => {
                let f = Rc::clone(f);
                Length::Computed(Rc::new(move |tail: P::Tail| f(P::join(head, tail))))
            },
        }
    }
}

impl<'a, P> Clone for Length<'a, P> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(length) => Self::Fixed(*length),
            Self::Computed(f) => Self::Computed(Rc::clone(f)),
        }
    }
}

impl<'a, P> Default for Length<'a, P> {
    fn default() -> Self { Self::unbounded() }
}

impl<'a, P> Debug for Length<'a, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(UNBOUNDED) => f.write_str("Unbounded"),
            Self::Fixed(length) => f.debug_tuple("Fixed").field(length).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<'a, P> From<usize> for Length<'a, P> {
    fn from(length: usize) -> Self { Self::fixed(length) }
}

impl<'a, P> From<Option<usize>> for Length<'a, P> {
    fn from(length: Option<usize>) -> Self { Self::fixed(length.unwrap_or(UNBOUNDED)) }
}

// ----------------------------------------------------------------------------
