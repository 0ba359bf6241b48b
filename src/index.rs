use std::fmt::{Debug};

use super::{Length};

/// Implemented by types that can be used as an index for a [`View`].
///
/// The implementations are `()`, `usize`, `(usize, usize)`,
/// `(usize, usize, usize)` and `(usize, usize, usize, usize)`. An index of
/// rank `K` addresses one element of a `K`-dimensional `View`. The rank-0
/// index `()` addresses the single element of a `View` whose indices have
/// all been bound by [`View::row()`].
///
/// The index type also determines the [`Index::Shape`] of the `View`: one
/// [`Length`] per axis, each of which may depend on all of the preceding
/// indices. This is what allows a `View` to be jagged.
///
/// [`View`]: super::View
/// [`View::row()`]: super::View::row()
pub trait Index: 'static + Debug + Copy + PartialEq {
    /// The number of axes.
    const RANK: usize;

    /// The run-time representation of the shape of a `View` indexed by
    /// `Self`.
    ///
    /// The `Default` shape is unbounded on every axis.
    type Shape<'a>: Clone + Default + Debug;

    /// Returns `true` if `self` is inside `shape`.
    ///
    /// The axes are checked from left to right, and checking stops at the
    /// first axis that is out of bounds. Therefore each length function is
    /// only called with a prefix that is itself inside `shape`.
    fn contains(self, shape: &Self::Shape<'_>) -> bool;
}

impl Index for () {
    const RANK: usize = 0;
    type Shape<'a> = ();
    fn contains(self, _: &()) -> bool { true }
}

impl Index for usize {
    const RANK: usize = 1;
    type Shape<'a> = Length<'a, ()>;

    fn contains(self, shape: &Length<'_, ()>) -> bool {
        self < shape.get(())
    }
}

impl Index for (usize, usize) {
    const RANK: usize = 2;
    type Shape<'a> = (Length<'a, ()>, Length<'a, usize>);

    fn contains(self, shape: &Self::Shape<'_>) -> bool {
        let (i, j) = self;
        i < shape.0.get(()) &&
        j < shape.1.get(i)
    }
}

impl Index for (usize, usize, usize) {
    const RANK: usize = 3;
    type Shape<'a> = (Length<'a, ()>, Length<'a, usize>, Length<'a, (usize, usize)>);

    fn contains(self, shape: &Self::Shape<'_>) -> bool {
        let (i, j, k) = self;
        i < shape.0.get(()) &&
        j < shape.1.get(i) &&
        k < shape.2.get((i, j))
    }
}

impl Index for (usize, usize, usize, usize) {
    const RANK: usize = 4;
    type Shape<'a> = (
        Length<'a, ()>,
        Length<'a, usize>,
        Length<'a, (usize, usize)>,
        Length<'a, (usize, usize, usize)>,
    );

    fn contains(self, shape: &Self::Shape<'_>) -> bool {
        let (i, j, k, l) = self;
        i < shape.0.get(()) &&
        j < shape.1.get(i) &&
        k < shape.2.get((i, j)) &&
        l < shape.3.get((i, j, k))
    }
}

// ----------------------------------------------------------------------------

/// Implemented by [`Index`]es with at least one axis.
///
/// `Self` is isomorphic to `(usize, Self::Tail)`. The first axis is the one
/// that [`View::rows()`] iterates over.
///
/// [`View::rows()`]: super::View::rows()
pub trait Split: Index {
    /// `Self` without its first axis.
    type Tail: Index;

    /// Separate the first axis from the others.
    fn split(self) -> (usize, Self::Tail);

    /// The inverse of `split()`.
    fn join(head: usize, tail: Self::Tail) -> Self;

    /// The length of the first axis.
    fn first<'s, 'a>(shape: &'s Self::Shape<'a>) -> &'s Length<'a, ()>;

    /// The shape of the remaining axes when the first index is `head`.
    fn bind<'a>(shape: &Self::Shape<'a>, head: usize) -> <Self::Tail as Index>::Shape<'a>;
}

impl Split for usize {
    type Tail = ();
    fn split(self) -> (usize, ()) { (self, ()) }
    fn join(head: usize, _: ()) -> Self { head }
    fn first<'s, 'a>(shape: &'s Self::Shape<'a>) -> &'s Length<'a, ()> { shape }
    fn bind<'a>(_: &Self::Shape<'a>, _: usize) -> <() as Index>::Shape<'a> {}
}

impl Split for (usize, usize) {
    type Tail = usize;

    fn split(self) -> (usize, usize) { self }

    fn join(head: usize, tail: usize) -> Self { (head, tail) }

    fn first<'s, 'a>(shape: &'s Self::Shape<'a>) -> &'s Length<'a, ()> { &shape.0 }

    fn bind<'a>(shape: &Self::Shape<'a>, head: usize) -> Length<'a, ()> {
        shape.1.bind(head)
    }
}

impl Split for (usize, usize, usize) {
    type Tail = (usize, usize);

    fn split(self) -> (usize, (usize, usize)) { (self.0, (self.1, self.2)) }

    fn join(head: usize, (j, k): (usize, usize)) -> Self { (head, j, k) }

    fn first<'s, 'a>(shape: &'s Self::Shape<'a>) -> &'s Length<'a, ()> { &shape.0 }

    fn bind<'a>(shape: &Self::Shape<'a>, head: usize) -> (Length<'a, ()>, Length<'a, usize>) {
        (shape.1.bind(head), shape.2.bind(head))
    }
}

impl Split for (usize, usize, usize, usize) {
    type Tail = (usize, usize, usize);

    fn split(self) -> (usize, (usize, usize, usize)) { (self.0, (self.1, self.2, self.3)) }

    fn join(head: usize, (j, k, l): (usize, usize, usize)) -> Self { (head, j, k, l) }

    fn first<'s, 'a>(shape: &'s Self::Shape<'a>) -> &'s Length<'a, ()> { &shape.0 }

    fn bind<'a>(
        shape: &Self::Shape<'a>,
        head: usize,
    ) -> (Length<'a, ()>, Length<'a, usize>, Length<'a, (usize, usize)>) {
        (shape.1.bind(head), shape.2.bind(head), shape.3.bind(head))
    }
}

// ----------------------------------------------------------------------------

/// Implemented by the strict prefixes of `I`.
///
/// A prefix of length `d - 1` names axis `d`, and [`Prefix::length()`]
/// evaluates the length of that axis given the indices in the prefix. For
/// example, `()` names the first axis of any `View`, and `(i, j)` names the
/// third axis of a `View` indexed by `(usize, usize, usize)`.
pub trait Prefix<I: Index>: Copy {
    /// The length of the axis after `self`.
    fn length(self, shape: &I::Shape<'_>) -> usize;
}

impl Prefix<usize> for () {
    fn length(self, shape: &Length<'_, ()>) -> usize { shape.get(()) }
}

impl Prefix<(usize, usize)> for () {
    fn length(self, shape: &<(usize, usize) as Index>::Shape<'_>) -> usize { shape.0.get(()) }
}

impl Prefix<(usize, usize)> for usize {
    fn length(self, shape: &<(usize, usize) as Index>::Shape<'_>) -> usize { shape.1.get(self) }
}

impl Prefix<(usize, usize, usize)> for () {
    fn length(self, shape: &<(usize, usize, usize) as Index>::Shape<'_>) -> usize { shape.0.get(()) }
}

impl Prefix<(usize, usize, usize)> for usize {
    fn length(self, shape: &<(usize, usize, usize) as Index>::Shape<'_>) -> usize { shape.1.get(self) }
}

impl Prefix<(usize, usize, usize)> for (usize, usize) {
    fn length(self, shape: &<(usize, usize, usize) as Index>::Shape<'_>) -> usize { shape.2.get(self) }
}

impl Prefix<(usize, usize, usize, usize)> for () {
    fn length(self, shape: &<(usize, usize, usize, usize) as Index>::Shape<'_>) -> usize { shape.0.get(()) }
}

impl Prefix<(usize, usize, usize, usize)> for usize {
    fn length(self, shape: &<(usize, usize, usize, usize) as Index>::Shape<'_>) -> usize { shape.1.get(self) }
}

impl Prefix<(usize, usize, usize, usize)> for (usize, usize) {
    fn length(self, shape: &<(usize, usize, usize, usize) as Index>::Shape<'_>) -> usize { shape.2.get(self) }
}

impl Prefix<(usize, usize, usize, usize)> for (usize, usize, usize) {
    fn length(self, shape: &<(usize, usize, usize, usize) as Index>::Shape<'_>) -> usize { shape.3.get(self) }
}

// ----------------------------------------------------------------------------
