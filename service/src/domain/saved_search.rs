//! [`SavedSearch`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Property, User};
use crate::domain::{property, user};

/// [`property::Filter`] remembered by a [`User`] under a [`Name`].
#[derive(Clone, Debug)]
pub struct SavedSearch {
    /// ID of this [`SavedSearch`].
    pub id: Id,

    /// ID of the [`User`] owning this [`SavedSearch`].
    pub user_id: user::Id,

    /// [`Name`] of this [`SavedSearch`].
    pub name: Name,

    /// [`property::Filter`] selecting [`Property`]s.
    pub filter: property::Filter,

    /// [`property::Sort`] order of the selected [`Property`]s.
    pub sort: property::Sort,

    /// [`DateTime`] when this [`SavedSearch`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`SavedSearch`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_text! {
    #[doc = "Name of a [`SavedSearch`]."]
    Name(max = 100)
}

/// [`DateTime`] when a [`SavedSearch`] was created.
pub type CreationDateTime = DateTimeOf<(SavedSearch, unit::Creation)>;
