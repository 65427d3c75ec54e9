//! [`User`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, read, Query};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A [`User`] of the system.
#[derive(Clone, Debug, From)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`domain::User`] representing this [`User`].
    user: OnceCell<domain::User>,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id.into(),
            user: OnceCell::new_with(Some(user)),
        }
    }
}

impl User {
    /// Creates a new [`User`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`User`] with the provided ID exists,
    /// otherwise accessing this [`User`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            user: OnceCell::new(),
        }
    }

    /// Returns the [`domain::User`] representing this [`User`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::User`] doesn't exist.
    async fn user(&self, ctx: &Context) -> Result<&domain::User, Error> {
        let id = self.id.into();
        self.user
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::user::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|u| {
                        future::ready(u.ok_or_else(|| {
                            api::query::UserError::NotExists.into()
                        }))
                    })
            })
            .await
    }

    /// Ensures this [`User`] is the one of the current [`Session`].
    ///
    /// # Errors
    ///
    /// With [`api::PrivilegeError::NotYourself`] if it's not.
    ///
    /// [`Session`]: crate::Session
    async fn ensure_yourself(&self, ctx: &Context) -> Result<(), Error> {
        let my_id = ctx.current_session().await?.user_id;
        (my_id == self.id)
            .then_some(())
            .ok_or_else(|| api::PrivilegeError::NotYourself.into())
            .map_err(ctx.error())
    }

    /// Indicates whether this [`User`] is the one of the current [`Session`].
    ///
    /// [`Session`]: crate::Session
    async fn is_yourself(&self, ctx: &Context) -> Result<bool, Error> {
        let my_id = ctx.try_current_session().await?.map(|s| s.user_id);
        Ok(Some(self.id) == my_id)
    }
}

/// A `User` of the system.
#[graphql_object(context = Context)]
impl User {
    /// Unique identifier of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.user(ctx).await?.name.clone().into())
    }

    /// Kind of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn kind(&self, ctx: &Context) -> Result<Kind, Error> {
        Ok(self.user(ctx).await?.kind.into())
    }

    /// Avatar image of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.avatar",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn avatar(&self, ctx: &Context) -> Result<Option<Avatar>, Error> {
        Ok(self.user(ctx).await?.avatar.clone().map(Into::into))
    }

    /// Email of this `User`.
    ///
    /// Visible to this `User` only, `null` for everyone else.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(&self, ctx: &Context) -> Result<Option<Email>, Error> {
        Ok(if self.is_yourself(ctx).await? {
            Some(self.user(ctx).await?.email.clone().into())
        } else {
            None
        })
    }

    /// Phone of this `User`.
    ///
    /// Visible to this `User` only, `null` for everyone else.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn phone(&self, ctx: &Context) -> Result<Option<Phone>, Error> {
        Ok(if self.is_yourself(ctx).await? {
            self.user(ctx).await?.phone.clone().map(Into::into)
        } else {
            None
        })
    }

    /// `Property`s listed by this `User`, the newest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.listedProperties",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn listed_properties(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        ctx.service()
            .execute(query::properties::ByPoster::by(read::property::Poster(
                self.id.into(),
            )))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ps| ps.into_iter().map(Into::into).collect())
    }

    /// `Property`s saved by this `User`, in the saving order.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_YOURSELF` - if the current `User` is not this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.savedProperties",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn saved_properties(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Property>, Error> {
        self.ensure_yourself(ctx).await?;

        let ids = self.user(ctx).await?.saved_properties.clone();
        let mut found = ctx
            .service()
            .execute(query::properties::ByIds::by(ids.clone()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        // Saved IDs may outlive deleted `Property`s.
        Ok(ids
            .iter()
            .filter_map(|id| found.remove(id))
            .map(Into::into)
            .collect())
    }

    /// `Inquiry`s sent by this `User`, the newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_YOURSELF` - if the current `User` is not this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.sentInquiries",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn sent_inquiries(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Inquiry>, Error> {
        self.ensure_yourself(ctx).await?;

        ctx.service()
            .execute(query::inquiries::BySender::by(read::inquiry::Sender(
                self.id.into(),
            )))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|is| is.into_iter().map(Into::into).collect())
    }

    /// `Inquiry`s received by this `User` about the `Property`s they
    /// listed, the newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_YOURSELF` - if the current `User` is not this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.receivedInquiries",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn received_inquiries(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Inquiry>, Error> {
        self.ensure_yourself(ctx).await?;

        ctx.service()
            .execute(query::inquiries::ByOwner::by(read::inquiry::Owner(
                self.id.into(),
            )))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|is| is.into_iter().map(Into::into).collect())
    }

    /// `SavedSearch`es of this `User`, the newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_YOURSELF` - if the current `User` is not this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.savedSearches",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn saved_searches(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::SavedSearch>, Error> {
        self.ensure_yourself(ctx).await?;

        ctx.service()
            .execute(query::saved_searches::ByUser::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ss| ss.into_iter().map(Into::into).collect())
    }

    /// `DateTime` when this `User` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.user(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(Uuid);

define_enum! {
    #[doc = "Kind of a `User` posting `Property`s."]
    #[graphql(name = "UserKind")]
    enum Kind: domain::user::Kind {
        #[doc = "Owner of the `Property`."]
        Owner,

        #[doc = "Builder or developer."]
        Builder,

        #[doc = "Real-estate agent or broker."]
        Agent,
    }
}

/// Name of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserName",
    with = scalar::Via::<domain::user::Name>,
)]
pub struct Name(domain::user::Name);

/// Password of a `User`.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserPassword",
    with = scalar::Via::<domain::user::Password>,
)]
pub struct Password(domain::user::Password);

/// Email of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserEmail",
    with = scalar::Via::<domain::user::Email>,
)]
pub struct Email(domain::user::Email);

/// Phone of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserPhone",
    with = scalar::Via::<domain::user::Phone>,
)]
pub struct Phone(domain::user::Phone);

/// Avatar image URL of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserAvatar",
    with = scalar::Via::<domain::user::Avatar>,
)]
pub struct Avatar(domain::user::Avatar);

pub mod session {
    //! [`Session`]-related definitions.
    //!
    //! [`Session`]: crate::Session

    use common::DateTime;
    use derive_more::{AsRef, From, Into};
    use juniper::{GraphQLObject, GraphQLScalar};
    use service::{command, domain};

    use crate::{
        api::{self, scalar},
        Context,
    };

    /// `Session` access token.
    #[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
    #[graphql(
        name = "UserAuthToken",
        with = scalar::Via::<domain::user::session::Token>,
    )]
    pub struct Token(domain::user::session::Token);

    /// Result of a `Session` creation.
    #[derive(Clone, Debug, From, GraphQLObject)]
    #[graphql(context = Context, name = "CreateSessionResult")]
    pub struct CreateResult {
        /// Access token of the created `Session`.
        pub token: Token,

        /// `User` associated with the created `Session`.
        pub user: api::User,

        /// `DateTime` when the created `Session` expires.
        pub expires_at: DateTime,
    }

    impl From<command::create_user_session::Output> for CreateResult {
        fn from(output: command::create_user_session::Output) -> Self {
            let command::create_user_session::Output {
                token,
                user,
                expires_at,
            } = output;
            Self {
                token: token.into(),
                user: user.into(),
                expires_at: expires_at.coerce(),
            }
        }
    }
}
