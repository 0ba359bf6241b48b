/// Things that can go wrong when traversing a [`View`].
///
/// Element access never returns an `Error`: [`View::get()`] returns `None`
/// for an index outside the shape, and [`View::at()`] does whatever the
/// underlying source does.
///
/// [`View`]: super::View
/// [`View::get()`]: super::View::get()
/// [`View::at()`]: super::View::at()
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The axis to be traversed has length [`UNBOUNDED`].
    ///
    /// Use [`View::rows_in()`] or [`View::iter_in()`] to traverse a finite
    /// part of it.
    ///
    /// [`UNBOUNDED`]: super::UNBOUNDED
    /// [`View::rows_in()`]: super::View::rows_in()
    /// [`View::iter_in()`]: super::View::iter_in()
    #[error("cannot traverse the unbounded first axis of a rank-{rank} view")]
    Unbounded { rank: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
