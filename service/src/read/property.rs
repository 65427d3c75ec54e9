//! [`Property`] read model definitions.

use crate::domain::user;
#[cfg(doc)]
use crate::domain::{Property, User};

/// ID of a [`User`] whose posted [`Property`]s are selected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Poster(pub user::Id);

pub mod list {
    //! [`Property`] list definitions.

    use common::define_pagination;

    use crate::domain::{property, Property};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = Property;

    /// Cursor pointing to a specific [`Property`] in a list.
    pub type Cursor = property::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`property::Filter`] criteria every listed [`Property`] matches.
        pub criteria: property::Filter,

        /// [`property::Sort`] order of the list.
        pub sort: property::Sort,
    }
}
