//! [`Inquiry`] read model definitions.

use crate::domain::user;
#[cfg(doc)]
use crate::domain::{Inquiry, Property, User};

/// ID of a [`User`] whose [`Property`]s received the selected [`Inquiry`]s.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Owner(pub user::Id);

/// ID of a [`User`] who sent the selected [`Inquiry`]s.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sender(pub user::Id);
