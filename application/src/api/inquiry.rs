//! [`Inquiry`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    Context,
};

/// Contact request sent to the poster of a `Property`.
#[derive(Clone, Debug, From, Into)]
pub struct Inquiry(domain::Inquiry);

/// Contact request sent to the poster of a `Property`.
#[graphql_object(context = Context)]
impl Inquiry {
    /// Unique identifier of this `Inquiry`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Property` this `Inquiry` is about.
    #[must_use]
    pub fn property(&self) -> api::Property {
        #[expect(
            unsafe_code,
            reason = "`Inquiry` cannot outlive its `Property` in the \
                      repository"
        )]
        unsafe {
            api::Property::new_unchecked(self.0.property_id)
        }
    }

    /// ID of the `User` who posted the `Property`.
    #[must_use]
    pub fn owner_id(&self) -> api::user::Id {
        self.0.owner_id.into()
    }

    /// `User` who sent this `Inquiry`, if they were logged in.
    #[must_use]
    pub fn sender(&self) -> Option<api::User> {
        self.0.sender_id.map(|id| {
            #[expect(
                unsafe_code,
                reason = "`Inquiry` is created by an existing `User` only"
            )]
            unsafe {
                api::User::new_unchecked(id)
            }
        })
    }

    /// Name of the sender.
    #[must_use]
    pub fn name(&self) -> api::user::Name {
        self.0.name.clone().into()
    }

    /// Phone of the sender.
    #[must_use]
    pub fn phone(&self) -> api::user::Phone {
        self.0.phone.clone().into()
    }

    /// Email of the sender.
    #[must_use]
    pub fn email(&self) -> Option<api::user::Email> {
        self.0.email.clone().map(Into::into)
    }

    /// Message of this `Inquiry`.
    #[must_use]
    pub fn message(&self) -> Message {
        self.0.message.clone().into()
    }

    /// `DateTime` when this `Inquiry` was sent.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Inquiry`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::inquiry::Id)]
#[into(domain::inquiry::Id)]
#[graphql(name = "InquiryId", transparent)]
pub struct Id(Uuid);

/// Text of an `Inquiry`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "InquiryMessage",
    with = scalar::Via::<domain::inquiry::Message>,
)]
pub struct Message(domain::inquiry::Message);
