//! Error types for the djset core library.
//!
//! Defines error enums exposed by the public API together with stable,
//! machine-readable codes and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DisjointSet`] operations.
///
/// Every variant signals caller misuse rather than a transient fault, so none
/// of them is worth retrying.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DisjointSetError {
    /// A value was looked up before being registered with `make_set`.
    #[error("element {element} was never registered")]
    UnknownElement {
        /// `Debug` rendering of the offending value.
        element: Arc<str>,
    },
    /// `make_set` was called twice for the same value.
    #[error("element {element} is already registered")]
    DuplicateElement {
        /// `Debug` rendering of the offending value.
        element: Arc<str>,
    },
    /// A handle did not originate from this disjoint set.
    #[error("handle {index} is outside a disjoint set of {len} elements")]
    UnknownHandle {
        /// Arena index carried by the handle.
        index: usize,
        /// Number of elements registered in the set.
        len: usize,
    },
    /// `union` was given a handle that is not the root of its set.
    #[error("handle {index} is not the root of its set")]
    NotARoot {
        /// Arena index carried by the handle.
        index: usize,
    },
}

impl DisjointSetError {
    pub(crate) fn unknown_element(element: &impl fmt::Debug) -> Self {
        Self::UnknownElement {
            element: Arc::from(format!("{element:?}")),
        }
    }

    pub(crate) fn duplicate_element(element: &impl fmt::Debug) -> Self {
        Self::DuplicateElement {
            element: Arc::from(format!("{element:?}")),
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`DisjointSetError`] variants.
    enum DisjointSetErrorCode for DisjointSetError {
        /// A value was looked up before being registered.
        UnknownElement => UnknownElement { .. } => "DISJOINT_SET_UNKNOWN_ELEMENT",
        /// `make_set` was called twice for the same value.
        DuplicateElement => DuplicateElement { .. } => "DISJOINT_SET_DUPLICATE_ELEMENT",
        /// A handle did not originate from this disjoint set.
        UnknownHandle => UnknownHandle { .. } => "DISJOINT_SET_UNKNOWN_HANDLE",
        /// `union` was given a non-root handle.
        NotARoot => NotARoot { .. } => "DISJOINT_SET_NOT_A_ROOT",
    }
}

/// Error type produced while generating a maze.
#[cfg(feature = "maze")]
#[cfg_attr(docsrs, doc(cfg(feature = "maze")))]
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MazeError {
    /// The requested grid holds more cells than the host can address.
    #[error("a {width}x{height} grid has more cells than this platform can address")]
    GridTooLarge {
        /// Requested width in cells.
        width: i64,
        /// Requested height in cells.
        height: i64,
    },
    /// The candidate pool ran dry before the spanning tree was complete.
    ///
    /// The grid graph is always connected, so this indicates a logic error.
    #[error("candidate edges exhausted with {remaining} merges still required")]
    CandidatesExhausted {
        /// Number of merges that were still outstanding.
        remaining: usize,
    },
    /// The underlying disjoint set rejected an operation.
    #[error(transparent)]
    DisjointSet(#[from] DisjointSetError),
}

#[cfg(feature = "maze")]
define_error_codes! {
    /// Stable codes describing [`MazeError`] variants.
    enum MazeErrorCode for MazeError {
        /// The requested grid holds more cells than the host can address.
        GridTooLarge => GridTooLarge { .. } => "MAZE_GRID_TOO_LARGE",
        /// The candidate pool ran dry before the spanning tree was complete.
        CandidatesExhausted => CandidatesExhausted { .. } => "MAZE_CANDIDATES_EXHAUSTED",
        /// The underlying disjoint set rejected an operation.
        DisjointSetFailure => DisjointSet(..) => "MAZE_DISJOINT_SET_FAILURE",
    }
}

#[cfg(feature = "maze")]
impl MazeError {
    /// Retrieve the inner [`DisjointSetErrorCode`] when the failure came from
    /// the disjoint set.
    #[must_use]
    pub const fn disjoint_set_code(&self) -> Option<DisjointSetErrorCode> {
        match self {
            Self::DisjointSet(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the disjoint-set API.
pub type Result<T> = core::result::Result<T, DisjointSetError>;
