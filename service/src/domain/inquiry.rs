//! [`Inquiry`] definitions.

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

/// Contact request sent to the poster of a [`Property`].
#[derive(Clone, Debug)]
pub struct Inquiry {
    /// ID of this [`Inquiry`].
    pub id: Id,

    /// ID of the [`Property`] this [`Inquiry`] is about.
    pub property_id: property::Id,

    /// ID of the [`User`] who posted the [`Property`].
    pub owner_id: user::Id,

    /// ID of the [`User`] who sent this [`Inquiry`], if logged in.
    pub sender_id: Option<user::Id>,

    /// Name of the sender.
    pub name: user::Name,

    /// Phone number of the sender.
    pub phone: user::Phone,

    /// Email address of the sender.
    pub email: Option<user::Email>,

    /// [`Message`] of this [`Inquiry`].
    pub message: Message,

    /// [`DateTime`] when this [`Inquiry`] was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`Inquiry`].
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
    #[doc = "Text of an [`Inquiry`]."]
    Message(max = 2000)
}

/// [`DateTime`] when an [`Inquiry`] was created.
pub type CreationDateTime = DateTimeOf<(Inquiry, unit::Creation)>;
