use std::fmt::{self, Debug};
use std::ops::{Range};
use std::rc::{Rc};

use tracing::{debug, trace};

use super::{Index, Split, Prefix, Length, UNBOUNDED, Source, Handle, Error, Result};

/// A lazy, possibly jagged, multi-dimensional collection of `T`s indexed by
/// `I`.
///
/// A `View` doesn't store any elements. It is a bundle of closures that
/// compute the [`Length`] of each axis and the element at each index on
/// demand, every time they are asked. The closures may read from a constant,
/// a function, or a nested collection; the `View` looks the same in all
/// cases.
///
/// `I` is one of the [`Index`] types `usize`, `(usize, usize)`,
/// `(usize, usize, usize)` and `(usize, usize, usize, usize)`. The aliases
/// [`View1`] to [`View4`] name the four cases.
///
/// ### Shape
///
/// The length of axis `d` may depend on the indices of all the axes before
/// it. A `View` can therefore be triangular, ragged, or anything else that
/// can be expressed by saying "this index is out of bounds". An axis whose
/// length is not given is [`UNBOUNDED`]: its valid indices are whatever the
/// value function can answer.
///
/// ```
/// use funview::{Length, View2};
/// // Row `i` has `i` elements.
/// let v = View2::from_fn(|(i, j): (usize, usize)| 10 * i + j, (
///     Length::fixed(3),
///     Length::from_fn(|i: usize| i),
/// ));
/// assert_eq!(v.get((0, 0)), None);
/// assert_eq!(v.get((1, 0)), Some(10));
/// assert_eq!(v.get((2, 1)), Some(21));
/// assert_eq!(v.get((1, 1)), None);
/// ```
///
/// ### Access
///
/// [`View::get()`] checks the index against the shape, one axis at a time,
/// and returns `None` if it is out of bounds. [`View::at()`] does not check
/// anything, and is only as well-behaved as the underlying source.
///
/// ### Traversal
///
/// [`View::rows()`] iterates over the first axis, yielding a `View` of one
/// fewer dimension for each index. Each row is a partial application of
/// `self` to its index, and is just as lazy as `self`. For a one-dimensional
/// `View`, [`View::iter()`] yields the elements themselves.
///
/// ### Sharing
///
/// A `View` built from a [`Handle`] reads the source through the handle on
/// every access. If the source is an `Rc<RefCell<_>>` that is modified after
/// the `View` is constructed, the `View` sees the changes.
///
/// ```
/// use std::cell::{RefCell};
/// use std::rc::{Rc};
/// use funview::{View2};
/// let rows = Rc::new(RefCell::new(vec![vec![0, 10], vec![1, 11, 111, 1111]]));
/// let v = View2::from_source(Rc::clone(&rows));
/// assert_eq!(v.at((1, 0)), 1);
/// rows.borrow_mut()[1][0] = 42;
/// assert_eq!(v.at((1, 0)), 42);
/// rows.borrow_mut().push(vec![2]);
/// assert_eq!(v.len(), 3);
/// ```
///
/// A `View` is neither `Send` nor `Sync`. The closures are shared between a
/// `View`, its clones and its rows using `Rc`. This applies even to a `View`
/// of a constant or a pure function, whose elements could safely be read
/// from many threads at once. To use such a `View` on several threads,
/// construct one on each thread; construction is cheap.
///
/// ```
/// use std::thread;
/// use funview::{Length, View1};
/// let totals: Vec<usize> = (0..3usize).map(|t| thread::spawn(move || {
///     let v = View1::from_fn(move |i: usize| i * t, Length::fixed(4));
///     v.iter().unwrap().sum::<usize>()
/// })).collect::<Vec<_>>().into_iter().map(|h| h.join().unwrap()).collect();
/// assert_eq!(totals, [0, 6, 12]);
/// ```
pub struct View<'a, I: Index, T> {
    shape: I::Shape<'a>,
    value: Rc<dyn Fn(I) -> T + 'a>,
    scalar: Option<T>,
}

/// A one-dimensional [`View`].
pub type View1<'a, T> = View<'a, usize, T>;

/// A two-dimensional [`View`].
pub type View2<'a, T> = View<'a, (usize, usize), T>;

/// A three-dimensional [`View`].
pub type View3<'a, T> = View<'a, (usize, usize, usize), T>;

/// A four-dimensional [`View`].
pub type View4<'a, T> = View<'a, (usize, usize, usize, usize), T>;

impl<'a, I: Index, T: Clone + 'a> View<'a, I, T> {
    fn new(shape: I::Shape<'a>, value: Rc<dyn Fn(I) -> T + 'a>, scalar: Option<T>) -> Self {
        Self {shape, value, scalar}
    }

    /// Constructs a `View` of shape `shape` whose every element is `value`.
    ///
    /// The result has an [underlying scalar].
    ///
    /// ```
    /// use funview::{Length, View1, View2};
    /// let v = View1::constant("smith", Length::fixed(50));
    /// assert_eq!(v.len(), 50);
    /// assert_eq!(v.at(42), "smith");
    /// assert_eq!(v.get(100), None);
    ///
    /// let w = View2::constant("smith", (Length::fixed(50), Length::from_fn(|i: usize| i)));
    /// assert_eq!(w.get((42, 1)), Some("smith"));
    /// assert_eq!(w.get((0, 0)), None);
    /// assert_eq!(w.get((50, 0)), None);
    /// ```
    ///
    /// [underlying scalar]: Self::underlying_scalar()
    pub fn constant(value: T, shape: I::Shape<'a>) -> Self {
        let scalar = value.clone();
        Self::new(shape, Rc::new(move |_: I| value.clone()), Some(scalar))
    }

    /// Constructs a `View` of shape `shape` whose element at `index` is
    /// `f(index)`.
    ///
    /// `f` must be pure. It is called every time an element is needed.
    ///
    /// ```
    /// use funview::{Length, UNBOUNDED, View1};
    /// fn factorial(n: usize) -> usize { (1..=n).product() }
    ///
    /// let factorials = View1::from_fn(factorial, Length::unbounded());
    /// assert_eq!(factorials.len(), UNBOUNDED);
    /// assert_eq!(factorials.at(5), 120);
    ///
    /// let first_four = View1::from_fn(factorial, Length::fixed(4));
    /// assert_eq!(first_four.get(3), Some(6));
    /// assert_eq!(first_four.get(5), None);
    /// ```
    pub fn from_fn(f: impl Fn(I) -> T + 'a, shape: I::Shape<'a>) -> Self {
        Self::new(shape, Rc::new(f), None)
    }

    /// The lengths of the axes of `self`.
    pub fn shape(&self) -> &I::Shape<'a> { &self.shape }

    /// The length of the axis after `prefix`, given the indices in `prefix`.
    ///
    /// `prefix` is `()` for the first axis, `i` for the second, `(i, j)` for
    /// the third and `(i, j, k)` for the fourth.
    ///
    /// ```
    /// use funview::{View3};
    /// let data = [[vec![1, 2], vec![3]], [vec![], vec![4, 5, 6]]];
    /// let v = View3::from_source(&data);
    /// assert_eq!(v.length(()), 2);
    /// assert_eq!(v.length(1usize), 2);
    /// assert_eq!(v.length((0usize, 1usize)), 1);
    /// assert_eq!(v.length((1usize, 1usize)), 3);
    /// ```
    pub fn length<P: Prefix<I>>(&self, prefix: P) -> usize { prefix.length(&self.shape) }

    /// Returns the element at `index` if `index` is inside the shape of
    /// `self`, otherwise `None`.
    ///
    /// The indices are checked from left to right against the lengths of the
    /// axes. Checking stops at the first index that is out of bounds, so no
    /// length is ever computed for an invalid prefix. The element is computed
    /// only if all the checks pass.
    ///
    /// ```
    /// use funview::{View2};
    /// let rows = [vec!['a', 'b', 'c'], vec!['d']];
    /// let v = View2::from_source(&rows);
    /// assert_eq!(v.get((1, 0)), Some('d'));
    /// assert_eq!(v.get((0, 3)), None);
    /// assert_eq!(v.get((2, 0)), None);
    /// ```
    pub fn get(&self, index: I) -> Option<T> {
        if index.contains(&self.shape) { Some(self.at(index)) } else { None }
    }

    /// Returns the element at `index` without checking it against the shape
    /// of `self`.
    ///
    /// Use [`View::get()`] for the checked version. If `index` is out of
    /// bounds, the result is whatever the underlying source does: a constant
    /// or a function will usually answer anyway, while a collection will
    /// usually panic.
    #[inline(always)]
    pub fn at(&self, index: I) -> T { (self.value)(index) }

    /// The constant that `self` was constructed from, if any.
    ///
    /// This is `Some` only for `View`s built by [`View::constant()`] (and
    /// their rows and [`map()`]s). It saves the caller from probing the
    /// elements to find out that they are all the same.
    ///
    /// ```
    /// use funview::{Length, View1};
    /// let v = View1::constant(10, Length::unbounded());
    /// assert_eq!(v.underlying_scalar(), Some(&10));
    /// let w = View1::from_source(&[10, 10, 10]);
    /// assert!(!w.has_underlying_scalar());
    /// ```
    ///
    /// [`map()`]: View::map()
    pub fn underlying_scalar(&self) -> Option<&T> { self.scalar.as_ref() }

    /// Returns `true` if `self` has an [underlying scalar].
    ///
    /// [underlying scalar]: View::underlying_scalar()
    pub fn has_underlying_scalar(&self) -> bool { self.scalar.is_some() }

    /// Creates a `View` of the same shape that applies `f` to the elements of
    /// `self`.
    ///
    /// `f` is called every time an element is needed. If `self` has an
    /// underlying scalar, `f` is applied to it once, immediately.
    ///
    /// ```
    /// use funview::{View1};
    /// let v = View1::from_source(&[1, 2, 3]).map(|x| x * x);
    /// assert_eq!(v.iter().unwrap().collect::<Vec<_>>(), [1, 4, 9]);
    /// ```
    pub fn map<U: Clone + 'a>(&self, f: impl Fn(T) -> U + 'a) -> View<'a, I, U> {
        let scalar = self.scalar.clone().map(&f);
        let value = Rc::clone(&self.value);
        View::<I, U>::new(self.shape.clone(), Rc::new(move |index: I| f(value(index))), scalar)
    }
}

impl<'a, I: Split, T: Clone + 'a> View<'a, I, T> {
    /// The length of the first axis.
    pub fn len(&self) -> usize { I::first(&self.shape).get(()) }

    /// Returns `true` if the first axis has length zero.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns the `View` of one fewer dimension whose element at `j`
    /// is `self.at(i, j)`.
    ///
    /// The result computes its lengths and elements by calling the closures
    /// of `self` with `i` prepended. `i` is not checked.
    ///
    /// ```
    /// use funview::{View2};
    /// let rows = [vec!['a', 'b', 'c'], vec!['d']];
    /// let v = View2::from_source(&rows);
    /// let row = v.row(0);
    /// assert_eq!(row.len(), 3);
    /// assert_eq!(row.get(2), Some('c'));
    /// ```
    pub fn row(&self, i: usize) -> View<'a, I::Tail, T> {
        let value = Rc::clone(&self.value);
        View::<I::Tail, T>::new(
            I::bind(&self.shape, i),
            Rc::new(move |tail: I::Tail| value(I::join(i, tail))),
            self.scalar.clone(),
        )
    }

    /// The length of the first axis, if it is not [`UNBOUNDED`].
    fn bounded_len(&self) -> Result<usize> {
        let len = self.len();
        if len == UNBOUNDED {
            debug!(rank = I::RANK, "Refusing to traverse an unbounded axis");
            return Err(Error::Unbounded {rank: I::RANK});
        }
        Ok(len)
    }

    /// Iterate over the rows of `self`, i.e. over `self.row(i)` for `i` in
    /// `0..self.len()`.
    ///
    /// The iterator is lazy, and each call makes a new one, which reads the
    /// length of the first axis afresh.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unbounded`] if the first axis is [`UNBOUNDED`]. Use
    /// [`View::rows_in()`] to traverse part of it.
    ///
    /// ```
    /// use funview::{View2};
    /// let rows = [vec![1, 2, 3], vec![4]];
    /// let v = View2::from_source(&rows);
    /// let sums: Vec<i32> = v.rows().unwrap().map(|row| row.iter().unwrap().sum()).collect();
    /// assert_eq!(sums, [6, 4]);
    /// ```
    pub fn rows(&self) -> Result<Rows<'_, 'a, I, T>> {
        Ok(self.rows_in(0..self.bounded_len()?))
    }

    /// Iterate over `self.row(i)` for `i` in `range`.
    ///
    /// `range` is not checked against the length of the first axis.
    ///
    /// ```
    /// use funview::{Length, View2};
    /// let v = View2::from_fn(|(i, j): (usize, usize)| i + j, (Length::unbounded(), Length::fixed(2)));
    /// let rows: Vec<Vec<usize>> = v.rows_in(5..7)
    ///     .map(|row| row.iter().unwrap().collect())
    ///     .collect();
    /// assert_eq!(rows, [[5, 6], [6, 7]]);
    /// ```
    pub fn rows_in(&self, range: Range<usize>) -> Rows<'_, 'a, I, T> {
        Rows {view: self, range}
    }
}

impl<'a, T: Clone + 'a> View<'a, usize, T> {
    /// Iterate over the elements of `self`, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unbounded`] if `self` is [`UNBOUNDED`]. Use
    /// [`View::iter_in()`] to traverse part of it.
    ///
    /// ```
    /// use funview::{Length, View1};
    /// let evens = View1::from_fn(|i| i % 2 == 0, Length::fixed(4));
    /// assert!(evens.iter().unwrap().any(|even| even));
    /// assert!(View1::from_fn(|i| i % 2 == 0, Length::unbounded()).iter().is_err());
    /// ```
    pub fn iter(&self) -> Result<Iter<'_, 'a, T>> {
        Ok(self.iter_in(0..self.bounded_len()?))
    }

    /// Iterate over `self.at(i)` for `i` in `range`.
    ///
    /// `range` is not checked against the length of `self`.
    pub fn iter_in(&self, range: Range<usize>) -> Iter<'_, 'a, T> {
        Iter {view: self, range}
    }

    /// Constructs a `View` that reads a one-dimensional collection through
    /// `source`.
    ///
    /// The length is the length of the collection, read afresh every time.
    ///
    /// ```
    /// use funview::{View1};
    /// let v = View1::from_source(&['a', 'b', 'c']);
    /// assert_eq!(v.len(), 3);
    /// assert_eq!(v.at(2), 'c');
    /// assert_eq!(v.get(0), Some('a'));
    /// assert_eq!(v.get(3), None);
    /// ```
    pub fn from_source<H>(source: H) -> Self where
        H: Handle + 'a,
        H::Target: Source<Item=T>,
    {
        trace!(rank = 1, "Binding a view to a source");
        let s1 = source.clone();
        let length = Length::from_fn(move |()| s1.with(|s| s.len()));
        Self::new(length, Rc::new(move |i: usize| source.with(|s| s.at(i).clone())), None)
    }
}

impl<'a, T: Clone + 'a> View<'a, (usize, usize), T> {
    /// Constructs a `View` that reads a two-dimensional nested collection
    /// through `source`.
    ///
    /// The length of each axis is the length of the corresponding nested
    /// collection, read afresh every time. The rows may have different
    /// lengths.
    ///
    /// ```
    /// use funview::{View2};
    /// let rows = [vec!['a', 'b', 'c'], vec!['d']];
    /// let v = View2::from_source(&rows);
    /// assert_eq!(v.len(), 2);
    /// assert_eq!(v.length(0usize), 3);
    /// assert_eq!(v.length(1usize), 1);
    /// assert_eq!(v.at((0, 2)), 'c');
    /// ```
    pub fn from_source<H>(source: H) -> Self where
        H: Handle + 'a,
        H::Target: Source,
        <H::Target as Source>::Item: Source<Item=T>,
    {
        trace!(rank = 2, "Binding a view to a source");
        let (s1, s2) = (source.clone(), source.clone());
        let shape = (
            Length::from_fn(move |()| s1.with(|s| s.len())),
            Length::from_fn(move |i: usize| s2.with(|s| s.at(i).len())),
        );
        Self::new(shape, Rc::new(move |(i, j): (usize, usize)| {
            source.with(|s| s.at(i).at(j).clone())
        }), None)
    }
}

impl<'a, T: Clone + 'a> View<'a, (usize, usize, usize), T> {
    /// Constructs a `View` that reads a three-dimensional nested collection
    /// through `source`.
    ///
    /// See the two-dimensional version of `from_source()`.
    pub fn from_source<H>(source: H) -> Self where
        H: Handle + 'a,
        H::Target: Source,
        <H::Target as Source>::Item: Source,
        <<H::Target as Source>::Item as Source>::Item: Source<Item=T>,
    {
        trace!(rank = 3, "Binding a view to a source");
        let (s1, s2, s3) = (source.clone(), source.clone(), source.clone());
        let shape = (
            Length::from_fn(move |()| s1.with(|s| s.len())),
            Length::from_fn(move |i: usize| s2.with(|s| s.at(i).len())),
            Length::from_fn(move |(i, j): (usize, usize)| s3.with(|s| s.at(i).at(j).len())),
        );
        Self::new(shape, Rc::new(move |(i, j, k): (usize, usize, usize)| {
            source.with(|s| s.at(i).at(j).at(k).clone())
        }), None)
    }
}

impl<'a, T: Clone + 'a> View<'a, (usize, usize, usize, usize), T> {
    /// Constructs a `View` that reads a four-dimensional nested collection
    /// through `source`.
    ///
    /// See the two-dimensional version of `from_source()`.
    pub fn from_source<H>(source: H) -> Self where
        H: Handle + 'a,
        H::Target: Source,
        <H::Target as Source>::Item: Source,
        <<H::Target as Source>::Item as Source>::Item: Source,
        <<<H::Target as Source>::Item as Source>::Item as Source>::Item: Source<Item=T>,
    {
        trace!(rank = 4, "Binding a view to a source");
        let (s1, s2, s3, s4) = (source.clone(), source.clone(), source.clone(), source.clone());
        let shape = (
            Length::from_fn(move |()| s1.with(|s| s.len())),
            Length::from_fn(move |i: usize| s2.with(|s| s.at(i).len())),
            Length::from_fn(move |(i, j): (usize, usize)| s3.with(|s| s.at(i).at(j).len())),
            Length::from_fn(move |(i, j, k): (usize, usize, usize)| s4.with(|s| s.at(i).at(j).at(k).len())),
        );
        Self::new(shape, Rc::new(move |(i, j, k, l): (usize, usize, usize, usize)| {
            source.with(|s| s.at(i).at(j).at(k).at(l).clone())
        }), None)
    }
}

impl<'a, I: Index, T: Clone> Clone for View<'a, I, T> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            value: Rc::clone(&self.value),
            scalar: self.scalar.clone(),
        }
    }
}

impl<'a, I: Index, T: Debug> Debug for View<'a, I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("rank", &I::RANK)
            .field("shape", &self.shape)
            .field("scalar", &self.scalar)
            .finish_non_exhaustive()
    }
}

// ----------------------------------------------------------------------------

/// The return type of [`View::rows()`] and [`View::rows_in()`].
#[derive(Clone)]
pub struct Rows<'v, 'a, I: Split, T> {
    view: &'v View<'a, I, T>,
    range: Range<usize>,
}

impl<'v, 'a, I: Split, T: Clone + 'a> Iterator for Rows<'v, 'a, I, T> {
    type Item = View<'a, I::Tail, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|i| self.view.row(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.range.size_hint() }
}

impl<'v, 'a, I: Split, T: Clone + 'a> DoubleEndedIterator for Rows<'v, 'a, I, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|i| self.view.row(i))
    }
}

impl<'v, 'a, I: Split, T: Clone + 'a> ExactSizeIterator for Rows<'v, 'a, I, T> {}

// ----------------------------------------------------------------------------

/// The return type of [`View::iter()`] and [`View::iter_in()`].
#[derive(Clone)]
pub struct Iter<'v, 'a, T> {
    view: &'v View<'a, usize, T>,
    range: Range<usize>,
}

impl<'v, 'a, T: Clone + 'a> Iterator for Iter<'v, 'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.range.next().map(|i| self.view.at(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.range.size_hint() }
}

impl<'v, 'a, T: Clone + 'a> DoubleEndedIterator for Iter<'v, 'a, T> {
    fn next_back(&mut self) -> Option<T> {
        self.range.next_back().map(|i| self.view.at(i))
    }
}

impl<'v, 'a, T: Clone + 'a> ExactSizeIterator for Iter<'v, 'a, T> {}

// ----------------------------------------------------------------------------

/// A constant, to be broadcast to every index of a [`View`].
///
/// `Scalar(x).into()` is the same as `View::constant(x, Default::default())`:
/// every axis is [`UNBOUNDED`].
///
/// ```
/// use funview::{Scalar, View2};
/// let v: View2<&str> = Scalar("smith").into();
/// assert_eq!(v.at((42, 42)), "smith");
/// assert_eq!(v.get((100, 42)), Some("smith"));
/// assert!(v.has_underlying_scalar());
/// ```
#[derive(Default, Debug, Copy, Clone, Hash, PartialEq, Eq)]
#[repr(transparent)]
pub struct Scalar<T>(pub T);

impl<'a, I: Index, T: Clone + 'a> From<Scalar<T>> for View<'a, I, T> {
    fn from(scalar: Scalar<T>) -> Self { Self::constant(scalar.0, Default::default()) }
}

/// A function from an [`Index`] to an element, to be viewed as a [`View`].
///
/// `Func(f).into()` is the same as `View::from_fn(f, Default::default())`:
/// every axis is [`UNBOUNDED`].
///
/// ```
/// use funview::{Func, View2};
/// let distance: View2<usize> = Func(|(i, j): (usize, usize)| i.abs_diff(j)).into();
/// assert_eq!(distance.at((1, 2)), 1);
/// assert_eq!(distance.at((10, 5)), 5);
/// ```
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct Func<F>(pub F);

impl<'a, I: Index, T: Clone + 'a, F> From<Func<F>> for View<'a, I, T> where
    F: Fn(I) -> T + 'a,
{
    fn from(f: Func<F>) -> Self { Self::from_fn(f.0, Default::default()) }
}

impl<'a, H, T: Clone + 'a> From<H> for View1<'a, T> where
    H: Handle + 'a,
    H::Target: Source<Item=T>,
{
    fn from(source: H) -> Self { Self::from_source(source) }
}

impl<'a, H, T: Clone + 'a> From<H> for View2<'a, T> where
    H: Handle + 'a,
    H::Target: Source,
    <H::Target as Source>::Item: Source<Item=T>,
{
    fn from(source: H) -> Self { Self::from_source(source) }
}

impl<'a, H, T: Clone + 'a> From<H> for View3<'a, T> where
    H: Handle + 'a,
    H::Target: Source,
    <H::Target as Source>::Item: Source,
    <<H::Target as Source>::Item as Source>::Item: Source<Item=T>,
{
    fn from(source: H) -> Self { Self::from_source(source) }
}

impl<'a, H, T: Clone + 'a> From<H> for View4<'a, T> where
    H: Handle + 'a,
    H::Target: Source,
    <H::Target as Source>::Item: Source,
    <<H::Target as Source>::Item as Source>::Item: Source,
    <<<H::Target as Source>::Item as Source>::Item as Source>::Item: Source<Item=T>,
{
    fn from(source: H) -> Self { Self::from_source(source) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc};

    use super::*;

    /// Row `i` has `i` elements.
    fn triangle<'a>() -> View2<'a, usize> {
        View2::from_fn(|(i, j): (usize, usize)| 10 * i + j, (
            Length::fixed(3),
            Length::from_fn(|i: usize| i),
        ))
    }

    #[test]
    fn jagged_get() {
        let v = triangle();
        assert_eq!(v.get((0, 0)), None);
        assert_eq!(v.get((1, 0)), Some(10));
        assert_eq!(v.get((2, 1)), Some(21));
        assert_eq!(v.get((1, 1)), None);
        assert_eq!(v.get((3, 0)), None);
        assert_eq!(v.length(()), 3);
        assert_eq!(v.length(2usize), 2);
    }

    #[test]
    fn get_checks_before_computing() {
        let calls = Cell::new(0);
        let v = View1::from_fn(|i: usize| { calls.set(calls.get() + 1); i }, Length::fixed(2));
        assert_eq!(v.get(5), None);
        assert_eq!(calls.get(), 0);
        assert_eq!(v.get(1), Some(1));
        assert_eq!(calls.get(), 1);
        assert_eq!(v.at(5), 5);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn get_short_circuits() {
        let asked = RefCell::new(Vec::new());
        let v = View2::from_fn(|(i, j): (usize, usize)| i + j, (
            Length::fixed(2),
            Length::from_fn(|i: usize| { asked.borrow_mut().push(i); 3 }),
        ));
        assert_eq!(v.get((7, 0)), None);
        assert!(asked.borrow().is_empty());
        assert_eq!(v.get((1, 2)), Some(3));
        assert_eq!(*asked.borrow(), [1]);
    }

    #[test]
    fn constant() {
        let v = View3::constant('x', Default::default());
        assert_eq!(v.at((1, 2, 3)), 'x');
        assert_eq!(v.get((usize::MAX - 1, 0, 0)), Some('x'));
        assert_eq!(v.len(), UNBOUNDED);
        assert_eq!(v.underlying_scalar(), Some(&'x'));
        let row = v.row(4);
        assert!(row.has_underlying_scalar());
        assert_eq!(row.row(5).underlying_scalar(), Some(&'x'));
        assert!(!triangle().has_underlying_scalar());
    }

    #[test]
    fn unbounded_traversal() {
        let v: View2<usize> = Func(|(i, j): (usize, usize)| i * j).into();
        assert_eq!(v.rows().err(), Some(Error::Unbounded {rank: 2}));
        assert_eq!(v.row(3).iter().err(), Some(Error::Unbounded {rank: 1}));
        let rows: Vec<Vec<usize>> = v.rows_in(2..4).map(|row| row.iter_in(0..3).collect()).collect();
        assert_eq!(rows, [[0, 2, 4], [0, 3, 6]]);
    }

    #[test]
    fn traversal_agrees_with_get() {
        let v = triangle();
        let mut seen = Vec::new();
        for (i, row) in v.rows().unwrap().enumerate() {
            assert_eq!(row.len(), v.length(i));
            for (j, x) in row.iter().unwrap().enumerate() {
                assert_eq!(v.get((i, j)), Some(x));
                seen.push(x);
            }
        }
        assert_eq!(seen, [10, 20, 21]);
        let rows = v.rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.rev().map(|row| row.len()).collect::<Vec<_>>(), [2, 1, 0]);
    }

    #[test]
    fn rank_0() {
        let v = View1::from_source(&[5, 6]);
        let element = v.row(1);
        assert_eq!(element.at(()), 6);
        assert_eq!(element.get(()), Some(6));
    }

    #[test]
    fn live_list() {
        let list = Rc::new(RefCell::new(vec![vec![1, 2], vec![3]]));
        let v = View2::from_source(Rc::clone(&list));
        let row = v.row(1);
        assert_eq!(row.len(), 1);
        list.borrow_mut()[1].push(4);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(1), Some(4));
        list.borrow_mut()[0][0] = 100;
        assert_eq!(v.at((0, 0)), 100);
        list.borrow_mut().push(vec![]);
        assert_eq!(v.len(), 3);
        assert_eq!(v.get((2, 0)), None);
        list.borrow_mut().clear();
        assert_eq!(v.get((0, 0)), None);
        assert!(v.is_empty());
    }

    #[test]
    fn rank_4_rows_bind_every_axis() {
        let data = vec![
            vec![vec![vec![1], vec![2, 3]]],
            vec![vec![], vec![vec![4, 5, 6]]],
        ];
        let v = View4::from_source(&data);
        assert_eq!(v.length(()), 2);
        assert_eq!(v.length(1usize), 2);
        assert_eq!(v.length((0usize, 0usize)), 2);
        assert_eq!(v.length((0usize, 0usize, 1usize)), 2);
        assert_eq!(v.get((0, 0, 1, 1)), Some(3));
        assert_eq!(v.get((0, 0, 1, 2)), None);
        assert_eq!(v.get((1, 0, 0, 0)), None);
        let row = v.row(1);
        assert_eq!(row.len(), 2);
        assert_eq!(row.length(1usize), 1);
        assert_eq!(row.length((1usize, 0usize)), 3);
        assert_eq!(row.get((1, 0, 2)), Some(6));
        assert_eq!(row.get((1, 0, 3)), None);
        let leaf = row.row(1).row(0);
        assert_eq!(leaf.iter().unwrap().collect::<Vec<_>>(), [4, 5, 6]);
    }

    #[test]
    fn coercions() {
        let grid = [[1, 2, 3], [4, 5, 6]];
        let v: View2<i32> = (&grid).into();
        assert_eq!(v.get((1, 2)), Some(6));
        assert_eq!(v.get((1, 3)), None);
        let s: View1<i32> = Scalar(7).into();
        assert_eq!(s.at(1000), 7);
        assert_eq!(s.len(), UNBOUNDED);
        let f: View3<usize> = Func(|(i, j, k): (usize, usize, usize)| i + j + k).into();
        assert_eq!(f.at((1, 2, 3)), 6);
        assert!(!f.has_underlying_scalar());
    }

    #[test]
    fn map() {
        let v = triangle().map(|x| x % 10);
        assert_eq!(v.get((2, 1)), Some(1));
        assert_eq!(v.get((1, 1)), None);
        let c = View1::constant(3, Length::fixed(2)).map(|x| x * 2);
        assert_eq!(c.underlying_scalar(), Some(&6));
        assert_eq!(c.get(1), Some(6));
    }

    #[test]
    fn borrowed_source() {
        let words = vec!["a".to_string(), "bc".to_string()];
        let v = View1::from_source(&words).map(|w| w.len());
        assert_eq!(v.iter().unwrap().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn constant_per_thread() {
        let handles: Vec<_> = (0..4u32).map(|t| std::thread::spawn(move || {
            let v = View2::constant(t, (Length::fixed(2), Length::fixed(3)));
            v.rows().unwrap().map(|row| row.iter().unwrap().sum::<u32>()).sum::<u32>()
        })).collect();
        let totals: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(totals, [0, 6, 12, 18]);
    }

    #[test]
    fn debug() {
        let v = View2::constant(1, (Length::fixed(2), Length::unbounded()));
        assert_eq!(
            format!("{:?}", v),
            "View { rank: 2, shape: (Fixed(2), Unbounded), scalar: Some(1), .. }",
        );
    }
}
