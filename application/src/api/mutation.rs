//! GraphQL [`Mutation`]s definitions.

use itertools::Itertools as _;
use juniper::{graphql_object, Nullable};
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `User` with the provided credentials and contact info,
    /// and authenticates as them.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMAIL_OCCUPIED` - provided `UserEmail` is occupied by another
    ///                      `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createUser",
            kind = ?kind,
            name = %name,
            otel.name = Self::SPAN_NAME,
            phone = ?phone,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        email: api::user::Email,
        password: api::user::Password,
        phone: Option<api::user::Phone>,
        kind: api::user::Kind,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let user = ctx
            .service()
            .execute(command::CreateUser {
                name: name.into(),
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
                phone: phone.map(Into::into),
                kind: kind.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByUserId(user.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `UserSession` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createUserSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        email: api::user::Email,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Updates the profile of the authenticated `User`.
    ///
    /// Omitted arguments are left untouched, while explicit `null`s clear the
    /// optional ones.
    #[tracing::instrument(
        skip_all,
        fields(
            avatar = ?avatar,
            gql.name = "updateMyProfile",
            kind = ?kind,
            name = ?name,
            otel.name = Self::SPAN_NAME,
            phone = ?phone,
        ),
    )]
    pub async fn update_my_profile(
        name: Option<api::user::Name>,
        phone: Nullable<api::user::Phone>,
        kind: Option<api::user::Kind>,
        avatar: Nullable<api::user::Avatar>,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateUserProfile {
                user_id: my_id.into(),
                name: name.map(Into::into),
                phone: phone.explicit().map(|p| p.map(Into::into)),
                kind: kind.map(Into::into),
                avatar: avatar.explicit().map(|a| a.map(Into::into)),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Posts a new `Property` listing by the authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_LISTING` - provided `draft` doesn't pass the listing
    ///                       wizard;
    /// - `NUMBER_OUT_OF_RANGE` - a number in the `draft` is out of range;
    /// - `INVALID_DECIMAL` - the area in the `draft` is not a valid decimal.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createProperty",
            otel.name = Self::SPAN_NAME,
            title = ?draft.title,
        ),
    )]
    pub async fn create_property(
        draft: api::property::DraftInput,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateProperty {
                poster_id: my_id.into(),
                draft: draft.try_into().map_err(ctx.error())?,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Revises the `Property` listing posted by the authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does not
    ///                           exist;
    /// - `NOT_POSTER` - the authenticated `User` didn't post the `Property`;
    /// - `INVALID_LISTING` - provided `draft` doesn't pass the listing
    ///                       wizard;
    /// - `NUMBER_OUT_OF_RANGE` - a number in the `draft` is out of range;
    /// - `INVALID_DECIMAL` - the area in the `draft` is not a valid decimal.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateProperty",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_property(
        id: api::property::Id,
        draft: api::property::DraftInput,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateProperty {
                property_id: id.into(),
                editor_id: my_id.into(),
                draft: draft.try_into().map_err(ctx.error())?,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Removes the `Property` listing posted by the authenticated `User`.
    ///
    /// Returns the ID of the removed `Property`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does not
    ///                           exist;
    /// - `NOT_POSTER` - the authenticated `User` didn't post the `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteProperty",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::property::Id, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteProperty {
                property_id: id.into(),
                editor_id: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.id.into())
    }

    /// Counts one more view of the `Property`.
    ///
    /// Returns the updated number of views.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does not
    ///                           exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "recordPropertyView",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn record_property_view(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<i32, Error> {
        ctx.service()
            .execute(command::RecordPropertyView {
                property_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(api::property::views)
    }

    /// Saves the `Property` for the authenticated `User`, or unsaves it if
    /// it's saved already.
    ///
    /// Returns whether the `Property` is saved now.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does not
    ///                           exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "toggleSavedProperty",
            otel.name = Self::SPAN_NAME,
            property_id = %property_id,
        ),
    )]
    pub async fn toggle_saved_property(
        property_id: api::property::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::ToggleSavedProperty {
                user_id: my_id.into(),
                property_id: property_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Sends an `Inquiry` to the poster of the `Property`.
    ///
    /// Doesn't require authentication, but links the `Inquiry` to the
    /// authenticated `User`, if any.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does not
    ///                           exist;
    /// - `OWN_PROPERTY` - the authenticated `User` posted the `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createInquiry",
            name = %name,
            otel.name = Self::SPAN_NAME,
            property_id = %property_id,
        ),
    )]
    pub async fn create_inquiry(
        property_id: api::property::Id,
        name: api::user::Name,
        phone: api::user::Phone,
        email: Option<api::user::Email>,
        message: api::inquiry::Message,
        ctx: &Context,
    ) -> Result<api::Inquiry, Error> {
        let my_id = ctx.try_current_session().await?.map(|s| s.user_id);

        ctx.service()
            .execute(command::CreateInquiry {
                property_id: property_id.into(),
                sender_id: my_id.map(Into::into),
                name: name.into(),
                phone: phone.into(),
                email: email.map(Into::into),
                message: message.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Remembers the provided `Property` search criteria for the
    /// authenticated `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NUMBER_OUT_OF_RANGE` - a number in the `filter` is out of range;
    /// - `INVALID_DECIMAL` - an area in the `filter` is not a valid decimal.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "saveSearch",
            name = %name,
            otel.name = Self::SPAN_NAME,
            sort = ?sort,
        ),
    )]
    pub async fn save_search(
        name: api::saved_search::Name,
        filter: api::property::filter::FilterInput,
        sort: Option<api::property::filter::Sort>,
        ctx: &Context,
    ) -> Result<api::SavedSearch, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::SaveSearch {
                user_id: my_id.into(),
                name: name.into(),
                filter: filter.try_into().map_err(ctx.error())?,
                sort: sort.map(Into::into).unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Forgets the `SavedSearch` of the authenticated `User`.
    ///
    /// Returns the ID of the removed `SavedSearch`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `SAVED_SEARCH_NOT_EXISTS` - the authenticated `User` has no
    ///                               `SavedSearch` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteSavedSearch",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_saved_search(
        id: api::saved_search::Id,
        ctx: &Context,
    ) -> Result<api::saved_search::Id, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteSavedSearch {
                user_id: my_id.into(),
                saved_search_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|s| s.id.into())
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the specified ID does not exist"]
        NotExists,

        #[code = "NOT_POSTER"]
        #[status = FORBIDDEN]
        #[message = "Only the `User` who posted the `Property` may modify it"]
        NotPoster,
    }
}

/// Builds the `INVALID_LISTING` [`Error`] listing all the provided
/// [`Violation`]s.
///
/// [`Violation`]: service::domain::property::Violation
fn invalid_listing(
    step: service::domain::property::Step,
    violations: &[service::domain::property::Violation],
) -> Error {
    Error {
        code: "INVALID_LISTING",
        status_code: http::StatusCode::BAD_REQUEST,
        message: format!(
            "`Property` listing is invalid at `{step}` step: {}",
            violations.iter().join("; "),
        ),
        backtrace: None,
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`UserEmail` is occupied by another `User`"]
                EmailOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
            Self::PasswordHash(_) => None,
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any `User`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) | Self::WrongCredentials => {
                Some(Error::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::update_user_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => None,
        }
    }
}

impl AsError for command::create_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidListing { step, violations } => {
                Some(invalid_listing(*step, violations))
            }
            Self::UserNotExists(_) => None,
        }
    }
}

impl AsError for command::update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::InvalidListing { step, violations } => {
                invalid_listing(*step, violations)
            }
            Self::NotPoster(_) => PropertyError::NotPoster.into(),
            Self::PropertyNotExists(_) => PropertyError::NotExists.into(),
        })
    }
}

impl AsError for command::delete_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::NotPoster(_) => PropertyError::NotPoster.into(),
            Self::PropertyNotExists(_) => PropertyError::NotExists.into(),
        })
    }
}

impl AsError for command::record_property_view::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(PropertyError::NotExists.into())
            }
        }
    }
}

impl AsError for command::toggle_saved_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PropertyNotExists(_) => {
                Some(PropertyError::NotExists.into())
            }
            Self::UserNotExists(_) => None,
        }
    }
}

impl AsError for command::create_inquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "OWN_PROPERTY"]
                #[status = CONFLICT]
                #[message = "`User` cannot inquire about own `Property`"]
                OwnProperty,
            }
        }

        Some(match self {
            Self::Db(e) => return e.try_as_error(),
            Self::OwnProperty(_) => Error::OwnProperty.into(),
            Self::PropertyNotExists(_) => PropertyError::NotExists.into(),
        })
    }
}

impl AsError for command::save_search::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => None,
        }
    }
}

impl AsError for command::delete_saved_search::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "SAVED_SEARCH_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`SavedSearch` with the specified ID does not \
                             exist"]
                SavedSearchNotExists,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::SavedSearchNotExists(_) => {
                Some(Error::SavedSearchNotExists.into())
            }
        }
    }
}
