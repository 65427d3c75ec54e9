//! [`Query`] collection related to the multiple [`Inquiry`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{
    domain::{Property, User},
    Query,
};
use crate::{domain::Inquiry, read};

use super::DatabaseQuery;

/// Queries [`Inquiry`]s received for the [`Property`]s of a [`User`], the
/// newest first.
pub type ByOwner = DatabaseQuery<By<Vec<Inquiry>, read::inquiry::Owner>>;

/// Queries [`Inquiry`]s sent by a [`User`], the newest first.
pub type BySender = DatabaseQuery<By<Vec<Inquiry>, read::inquiry::Sender>>;
