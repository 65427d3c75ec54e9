//! Abstractions for cursor-based pagination.

use std::fmt;

/// Generic pagination connection.
#[derive(Clone, Debug)]
pub struct Connection<C, I> {
    /// [`Edge`]s in this [`Connection`].
    pub edges: Vec<Edge<C, I>>,

    /// [`Kind`] of this [`Connection`].
    pub kind: Kind,

    /// Indicator whether this [`Connection`] has more nodes in the direction
    /// of its [`Kind`].
    pub has_more: bool,

    /// Total number of nodes across all the pages.
    pub total_count: usize,
}

/// A page in a [`Connection`].
pub type Page<C, I> = Connection<C, I>;

impl<C, I> Connection<C, I> {
    /// Creates a new [`Connection`] from the provided [`Edge`]s.
    #[must_use]
    pub fn new(
        args: &Arguments<C>,
        edges: impl IntoIterator<Item = impl Into<Edge<C, I>>>,
        has_more: bool,
        total_count: usize,
    ) -> Self {
        Self {
            edges: edges.into_iter().map(Into::into).collect::<Vec<_>>(),
            kind: args.kind(),
            has_more,
            total_count,
        }
    }

    /// Cuts a page out of the provided already ordered `(cursor, node)`
    /// pairs according to the provided [`Arguments`].
    ///
    /// [`Edge`]s keep the order of the provided `items` for both pagination
    /// directions. A cursor not present in `items` results in an empty page.
    #[must_use]
    pub fn slice(args: &Arguments<C>, items: Vec<(C, I)>) -> Self
    where
        C: PartialEq,
    {
        let total_count = items.len();
        let position = |cursor: &C| items.iter().position(|(c, _)| c == cursor);

        let (range, has_more) = match args {
            Arguments::Forward {
                first,
                after,
                including,
            } => {
                let start = match after {
                    None => Some(0),
                    Some(c) => position(c).map(|i| i + usize::from(!including)),
                };
                start.map_or((0..0, false), |start| {
                    let end = start.saturating_add(*first).min(total_count);
                    (start..end, end < total_count)
                })
            }
            Arguments::Backward {
                last,
                before,
                including,
            } => {
                let end = match before {
                    None => Some(total_count),
                    Some(c) => position(c).map(|i| i + usize::from(*including)),
                };
                end.map_or((0..0, false), |end| {
                    let start = end.saturating_sub(*last);
                    (start..end, start > 0)
                })
            }
        };

        let edges = items
            .into_iter()
            .skip(range.start)
            .take(range.end - range.start)
            .map(Edge::from)
            .collect();
        Self {
            edges,
            kind: args.kind(),
            has_more,
            total_count,
        }
    }

    /// Transforms nodes of this [`Connection`] keeping the cursors.
    #[must_use]
    pub fn map<T>(self, mut f: impl FnMut(I) -> T) -> Connection<C, T> {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|Edge { cursor, node }| Edge {
                    cursor,
                    node: f(node),
                })
                .collect(),
            kind: self.kind,
            has_more: self.has_more,
            total_count: self.total_count,
        }
    }

    /// Returns [`PageInfo`] of this [`Connection`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo<C>
    where
        C: Clone,
    {
        PageInfo {
            start_cursor: self.edges.first().map(|e| e.cursor.clone()),
            end_cursor: self.edges.last().map(|e| e.cursor.clone()),
            has_next_page: self.has_more && self.kind.is_forward(),
            has_previous_page: self.has_more && self.kind.is_backward(),
        }
    }
}

/// Information about a page in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct PageInfo<C> {
    /// First cursor on this page.
    pub start_cursor: Option<C>,

    /// Last cursor on this page.
    pub end_cursor: Option<C>,

    /// Indicator whether [`Connection`] has a next page.
    pub has_next_page: bool,

    /// Indicator whether [`Connection`] has a previous page.
    pub has_previous_page: bool,
}

/// An edge in a [`Connection`].
#[derive(Clone, Copy, Debug)]
pub struct Edge<C, I> {
    /// Cursor of this [`Edge`].
    pub cursor: C,

    /// Node of this [`Edge`].
    pub node: I,
}

impl<C, I> From<(C, I)> for Edge<C, I> {
    fn from((cursor, node): (C, I)) -> Self {
        Self { cursor, node }
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug)]
pub enum Arguments<C> {
    /// Forward pagination.
    Forward {
        /// Number of items to return.
        first: usize,

        /// Cursor after which to return items.
        after: Option<C>,

        /// Indicator whether the `after` cursor should be included in the
        /// result.
        including: bool,
    },

    /// Backward pagination.
    Backward {
        /// Number of items to return.
        last: usize,

        /// Cursor before which to return items.
        before: Option<C>,

        /// Indicator whether the `before` cursor should be included in the
        /// result.
        including: bool,
    },
}

impl<C> Arguments<C> {
    /// Creates new [`Arguments`] out of Relay-style `first`/`after`/`last`/
    /// `before` parameters.
    ///
    /// [`None`] is returned if the combination is ambiguous or any number
    /// doesn't fit into [`usize`].
    pub fn new<Num>(
        first: Option<Num>,
        after: Option<C>,
        last: Option<Num>,
        before: Option<C>,
        default: Num,
    ) -> Option<Self>
    where
        C: PartialEq + fmt::Debug,
        Num: TryInto<usize> + fmt::Debug,
    {
        Some(match (first, after, last, before) {
            (None, None, None, None) => Self::Forward {
                first: default.try_into().ok()?,
                after: None,
                including: false,
            },
            (Some(first), None, None, None) => Self::Forward {
                first: first.try_into().ok()?,
                after: None,
                including: false,
            },
            (first, Some(after), None, None) => Self::Forward {
                first: first.unwrap_or(default).try_into().ok()?,
                after: Some(after),
                including: false,
            },
            (Some(first), Some(after), None, Some(before))
                if after == before =>
            {
                Self::Forward {
                    first: first.try_into().ok()?,
                    after: Some(after),
                    including: true,
                }
            }
            (None, None, Some(last), None) => Self::Backward {
                last: last.try_into().ok()?,
                before: None,
                including: false,
            },
            (None, None, Some(last), Some(before)) => Self::Backward {
                last: last.try_into().ok()?,
                before: Some(before),
                including: false,
            },
            (None, Some(after), Some(last), Some(before))
                if after == before =>
            {
                Self::Backward {
                    last: last.try_into().ok()?,
                    before: Some(before),
                    including: true,
                }
            }
            (None, Some(after), None, Some(before)) if after == before => {
                Self::Forward {
                    first: 1,
                    after: Some(after),
                    including: true,
                }
            }
            _ => return None,
        })
    }

    /// Returns cursor requested by this [`Arguments`].
    #[must_use]
    pub fn cursor(&self) -> Option<&C> {
        match self {
            Self::Forward { after, .. } => after.as_ref(),
            Self::Backward { before, .. } => before.as_ref(),
        }
    }

    /// Returns [`Kind`] of pagination this [`Arguments`] requests.
    pub fn kind(&self) -> Kind {
        match *self {
            Self::Forward { including, .. } => {
                if including {
                    Kind::ForwardIncluding
                } else {
                    Kind::Forward
                }
            }
            Self::Backward { including, .. } => {
                if including {
                    Kind::BackwardIncluding
                } else {
                    Kind::Backward
                }
            }
        }
    }

    /// Returns limit requested by this [`Arguments`].
    #[must_use]
    pub fn limit(&self) -> usize {
        match *self {
            Self::Forward { first, .. } => first,
            Self::Backward { last, .. } => last,
        }
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<C, F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments<C>,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Kind of pagination.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Forward pagination.
    Forward,

    /// Forward pagination including the cursor.
    ForwardIncluding,

    /// Backward pagination.
    Backward,

    /// Backward pagination including the cursor.
    BackwardIncluding,
}

impl Kind {
    /// Returns whether this [`Kind`] is forward.
    #[must_use]
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward | Self::ForwardIncluding)
    }

    /// Returns whether this [`Kind`] is backward.
    #[must_use]
    pub fn is_backward(&self) -> bool {
        matches!(self, Self::Backward | Self::BackwardIncluding)
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($cursor:ty, $node:ty, $filter:ty) => {
        #[doc = "Edge of a [`Connection`]."]
        pub type Edge = $crate::pagination::Edge<$cursor, $node>;

        #[doc = "A [`Connection`] of [`$node`]s."]
        pub type Connection = $crate::pagination::Connection<$cursor, $node>;

        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$cursor, $node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo<$cursor>;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments<$cursor>;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$cursor, $filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page};

    fn items(n: u8) -> Vec<(u8, char)> {
        (0..n).map(|i| (i, char::from(b'a' + i))).collect()
    }

    fn nodes(page: &Page<u8, char>) -> String {
        page.edges.iter().map(|e| e.node).collect()
    }

    #[test]
    fn resolves_arguments() {
        let args = Arguments::<u8>::new(None, None, None, None, 10).unwrap();
        assert_eq!(args.limit(), 10);
        assert!(args.kind().is_forward());

        let args = Arguments::new(None, Some(3), None, None, 10).unwrap();
        assert_eq!(args.cursor(), Some(&3));
        assert_eq!(args.limit(), 10);

        let args = Arguments::new(None, None, Some(2), Some(5), 10).unwrap();
        assert!(args.kind().is_backward());

        assert!(Arguments::<u8>::new(Some(1), None, Some(1), None, 10).is_none());
        assert!(Arguments::<u8>::new(Some(-1), None, None, None, 10).is_none());
    }

    #[test]
    fn slices_forward() {
        let args = Arguments::new(Some(2), None, None, None, 10).unwrap();
        let page = Page::slice(&args, items(5));
        assert_eq!(nodes(&page), "ab");
        assert_eq!(page.total_count, 5);
        assert!(page.page_info().has_next_page);
        assert!(!page.page_info().has_previous_page);

        let args = Arguments::new(Some(2), Some(3), None, None, 10).unwrap();
        let page = Page::slice(&args, items(5));
        assert_eq!(nodes(&page), "e");
        assert!(!page.page_info().has_next_page);
        assert_eq!(page.page_info().end_cursor, Some(4));
    }

    #[test]
    fn slices_backward() {
        let args = Arguments::new(None, None, Some(2), Some(3), 10).unwrap();
        let page = Page::slice(&args, items(5));
        assert_eq!(nodes(&page), "bc");
        assert!(page.page_info().has_previous_page);

        let args = Arguments::new(None, None, Some(10), None, 10).unwrap();
        let page = Page::slice(&args, items(3));
        assert_eq!(nodes(&page), "abc");
        assert!(!page.page_info().has_previous_page);
    }

    #[test]
    fn slices_exact_cursor() {
        let args = Arguments::new(None, Some(2), None, Some(2), 10).unwrap();
        let page = Page::slice(&args, items(5));
        assert_eq!(nodes(&page), "c");
    }

    #[test]
    fn unknown_cursor_yields_empty_page() {
        let args = Arguments::new(Some(2), Some(42), None, None, 10).unwrap();
        let page = Page::slice(&args, items(5));
        assert!(page.edges.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.total_count, 5);
    }
}
