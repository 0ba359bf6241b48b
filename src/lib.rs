//! Lazy, jagged, multi-dimensional views of constants, functions and nested
//! collections.
//!
//! [`View<I, T>`] represents a collection of `T` indexed by `I`, where `I` is
//! `usize`, `(usize, usize)`, `(usize, usize, usize)` or
//! `(usize, usize, usize, usize)`. A `View` doesn't store anything, but
//! instead computes lengths and elements on demand. The same `View` type can
//! be constructed from a constant, from a function of the index, from a
//! dense nested array, or from a nested list that is still being modified
//! elsewhere. Code that consumes a `View` doesn't need to know which.
//!
//! The length of each axis is a [`Length`], which may depend on the indices
//! of all the preceding axes. This allows `View`s to be jagged: each row can
//! have a different length. An axis can also be [`UNBOUNDED`], in which case
//! any index is accepted.
//!
//! ```
//! use std::cell::{RefCell};
//! use std::rc::{Rc};
//! use funview::{Length, Scalar, View2};
//!
//! let list = Rc::new(RefCell::new(vec![vec!['a', 'b', 'c', 'd'], vec!['u', 'v']]));
//! let v = View2::from_source(Rc::clone(&list));
//! assert_eq!(v.len(), 2);
//! assert_eq!(v.length(1usize), 2);
//! assert_eq!(v.get((1, 1)), Some('v'));
//! assert_eq!(v.get((1, 2)), None);
//!
//! list.borrow_mut()[1].push('w');
//! assert_eq!(v.get((1, 2)), Some('w'));
//!
//! let jagged = View2::from_fn(|(i, j): (usize, usize)| i + j, (
//!     Length::fixed(3),
//!     Length::from_fn(|i: usize| i),
//! ));
//! let lengths: Vec<usize> = jagged.rows().unwrap().map(|row| row.len()).collect();
//! assert_eq!(lengths, [0, 1, 2]);
//!
//! let everywhere: View2<char> = Scalar('x').into();
//! assert_eq!(everywhere.at((123, 456)), 'x');
//! assert!(everywhere.rows().is_err());
//! ```
//!
//! Checked access with [`View::get()`] returns `None` outside the shape.
//! Unchecked access with [`View::at()`] is as cheap as the underlying source,
//! and as well-behaved. Traversal with [`View::rows()`] and [`View::iter()`]
//! is lazy, and refuses to enumerate an unbounded axis.

mod index;
pub use index::{Index, Split, Prefix};

mod length;
pub use length::{Length, UNBOUNDED};

mod source;
pub use source::{Source, Handle};

mod error;
pub use error::{Error, Result};

pub mod view;
pub use view::{View, View1, View2, View3, View4, Scalar, Func, Rows, Iter};
