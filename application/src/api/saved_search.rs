//! [`SavedSearch`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, property::filter, scalar},
    Context,
};

/// `Property` search criteria remembered by a `User`.
#[derive(Clone, Debug, From, Into)]
pub struct SavedSearch(domain::SavedSearch);

/// `Property` search criteria remembered by a `User`.
#[graphql_object(context = Context)]
impl SavedSearch {
    /// Unique identifier of this `SavedSearch`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `SavedSearch`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Criteria of this `SavedSearch`.
    #[must_use]
    pub fn filter(&self) -> filter::Filter {
        (&self.0.filter).into()
    }

    /// Order of the `Property`s found by this `SavedSearch`.
    #[must_use]
    pub fn sort(&self) -> filter::Sort {
        self.0.sort.into()
    }

    /// `User` owning this `SavedSearch`.
    #[must_use]
    pub fn user(&self) -> api::User {
        #[expect(
            unsafe_code,
            reason = "`SavedSearch` is created by an existing `User` only"
        )]
        unsafe {
            api::User::new_unchecked(self.0.user_id)
        }
    }

    /// `DateTime` when this `SavedSearch` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `SavedSearch`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::saved_search::Id)]
#[into(domain::saved_search::Id)]
#[graphql(name = "SavedSearchId", transparent)]
pub struct Id(Uuid);

/// Name of a `SavedSearch`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "SavedSearchName",
    with = scalar::Via::<domain::saved_search::Name>,
)]
pub struct Name(domain::saved_search::Name);
