//! [`Query`] collection related to the multiple [`SavedSearch`]es.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::User, Query};
use crate::domain::{user, SavedSearch};

use super::DatabaseQuery;

/// Queries all [`SavedSearch`]es of a [`User`], the newest first.
pub type ByUser = DatabaseQuery<By<Vec<SavedSearch>, user::Id>>;
