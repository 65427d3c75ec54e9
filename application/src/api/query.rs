//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;
        ctx.service()
            .execute(query::user::ById::by(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "user",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        ctx.service()
            .execute(query::user::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Property` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROPERTY_NOT_EXISTS` - the `Property` with the specified ID does not
    ///                           exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "property",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn property(
        id: api::property::Id,
        ctx: &Context,
    ) -> Result<api::Property, Error> {
        ctx.service()
            .execute(query::property::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PropertyError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of `Property`s matching the provided `filter`, in the
    /// provided `sort` order.
    ///
    /// Page size defaults to the server configured one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous;
    /// - `NUMBER_OUT_OF_RANGE` - a number in the `filter` is out of range;
    /// - `INVALID_DECIMAL` - an area in the `filter` is not a valid decimal.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "properties",
            last = ?last,
            otel.name = Self::SPAN_NAME,
            sort = ?sort,
        ),
    )]
    pub async fn properties(
        first: Option<i32>,
        after: Option<api::property::list::Cursor>,
        last: Option<i32>,
        before: Option<api::property::list::Cursor>,
        filter: Option<api::property::filter::FilterInput>,
        sort: Option<api::property::filter::Sort>,
        ctx: &Context,
    ) -> Result<api::property::list::Connection, Error> {
        let criteria = filter
            .map(domain::property::Filter::try_from)
            .transpose()
            .map_err(ctx.error())?
            .unwrap_or_default();

        ctx.service()
            .execute(query::properties::List(read::property::list::Selector {
                arguments: read::property::list::Arguments::new(
                    first,
                    after.map(Into::into),
                    last,
                    before.map(Into::into),
                    i32::from(ctx.default_page_size()),
                )
                .ok_or_else(|| api::PaginationError::Ambiguous.into())
                .map_err(ctx.error())?,
                filter: read::property::list::Filter {
                    criteria,
                    sort: sort.map(Into::into).unwrap_or_default(),
                },
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Checks the provided `step` of the `Property` listing `draft`.
    ///
    /// Keeps no state, so clients may gate the wizard navigation on their
    /// side.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NUMBER_OUT_OF_RANGE` - a number in the `draft` is out of range;
    /// - `INVALID_DECIMAL` - the area in the `draft` is not a valid decimal.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "validateListingStep",
            otel.name = Self::SPAN_NAME,
            step = ?step,
        ),
    )]
    pub async fn validate_listing_step(
        draft: api::property::DraftInput,
        step: api::listing::Step,
        ctx: &Context,
    ) -> Result<api::listing::StepReport, Error> {
        ctx.service()
            .execute(query::listing::ValidateStep {
                draft: draft.try_into().map_err(ctx.error())?,
                step: step.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum PropertyError {
        #[code = "PROPERTY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Property` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}
