use std::cell::{RefCell};
use std::collections::{VecDeque};
use std::rc::{Rc};

/// A random-access collection of `Self::Item`s that a [`View`] can read.
///
/// Nest `Source`s to make a multi-dimensional source. For example,
/// `Vec<Vec<T>>` is a two-dimensional source of `T`s, and its rows may have
/// different lengths.
///
/// [`View`]: super::View
pub trait Source {
    /// The element type.
    type Item;

    /// The number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Borrow the element at `index`.
    ///
    /// Panics if `index >= self.len()`.
    fn at(&self, index: usize) -> &Self::Item;
}

impl<T> Source for [T] {
    type Item = T;
    fn len(&self) -> usize { <[T]>::len(self) }
    fn at(&self, index: usize) -> &T { &self[index] }
}

impl<T, const N: usize> Source for [T; N] {
    type Item = T;
    fn len(&self) -> usize { N }
    fn at(&self, index: usize) -> &T { &self[index] }
}

impl<T> Source for Vec<T> {
    type Item = T;
    fn len(&self) -> usize { Vec::len(self) }
    fn at(&self, index: usize) -> &T { &self[index] }
}

impl<T> Source for Box<[T]> {
    type Item = T;
    fn len(&self) -> usize { <[T]>::len(self) }
    fn at(&self, index: usize) -> &T { &self[index] }
}

impl<T> Source for VecDeque<T> {
    type Item = T;
    fn len(&self) -> usize { VecDeque::len(self) }
    fn at(&self, index: usize) -> &T { &self[index] }
}

// ----------------------------------------------------------------------------

/// A shared, read-only way of reaching a [`Source`].
///
/// A [`View`] built from a `Handle` keeps a clone of it in each of its
/// closures, and reads through it on every access. It never copies the
/// source, so the `View` always sees the current contents.
///
/// - `&S` borrows a source for the lifetime of the `View`. Nothing can
///   modify the source while the `View` exists.
/// - `Rc<RefCell<S>>` shares a source that can still be modified through
///   other clones of the `Rc`. Changes, including changes of length, are
///   visible through the `View` on the next access. Accessing the `View`
///   while the source is mutably borrowed panics.
///
/// [`View`]: super::View
pub trait Handle: Clone {
    /// The type of the source.
    type Target: ?Sized;

    /// Call `f` with a shared reference to the source.
    fn with<R>(&self, f: impl FnOnce(&Self::Target) -> R) -> R;
}

impl<'s, S: ?Sized> Handle for &'s S {
    type Target = S;

    #[inline(always)]
    fn with<R>(&self, f: impl FnOnce(&Self::Target) -> R) -> R { f(self) }
}

impl<S: ?Sized> Handle for Rc<RefCell<S>> {
    type Target = S;

    #[inline(always)]
    fn with<R>(&self, f: impl FnOnce(&Self::Target) -> R) -> R { f(&self.borrow()) }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn first_and_len<S: Source + ?Sized>(s: &S) -> (&S::Item, usize) { (s.at(0), s.len()) }

    #[test]
    fn sources() {
        assert_eq!(first_and_len(&[7, 8, 9]), (&7, 3));
        assert_eq!(first_and_len(&vec!['a', 'b']), (&'a', 2));
        assert_eq!(first_and_len(&[1u8, 2][..]), (&1, 2));
        assert_eq!(first_and_len(&VecDeque::from(vec![5, 6])), (&5, 2));
        let boxed: Box<[i32]> = vec![4].into_boxed_slice();
        assert_eq!(first_and_len(&boxed), (&4, 1));
        assert!(Source::is_empty(&Vec::<u8>::new()));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds() {
        let v = vec![1, 2, 3];
        Source::at(&v, 3);
    }

    #[test]
    fn handles() {
        let v = vec![1, 2, 3];
        assert_eq!((&v).with(|s| Source::len(s)), 3);
        let shared = Rc::new(RefCell::new(vec![1, 2, 3]));
        let handle = Rc::clone(&shared);
        shared.borrow_mut().push(4);
        assert_eq!(handle.with(|s| Source::len(s)), 4);
    }
}
