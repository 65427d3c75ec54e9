//! GraphQL API definitions.

/// Defines a GraphQL enum mirroring a domain kind enum variant by variant.
macro_rules! define_enum {
    (
        #[doc = $doc:literal]
        #[graphql(name = $gql_name:literal)]
        enum $name:ident: $domain:ty {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Eq, ::juniper::GraphQLEnum, PartialEq)]
        #[graphql(name = $gql_name)]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                $variant,
            )*
        }

        impl From<$domain> for $name {
            fn from(kind: $domain) -> Self {
                type K = $domain;
                match kind {
                    $( K::$variant => Self::$variant, )*
                }
            }
        }

        impl From<$name> for $domain {
            fn from(kind: $name) -> Self {
                match kind {
                    $( $name::$variant => Self::$variant, )*
                }
            }
        }
    };
}

pub mod inquiry;
pub mod listing;
mod mutation;
pub mod property;
mod query;
pub mod saved_search;
pub mod scalar;
pub mod user;

use juniper::EmptySubscription;

use crate::{define_error, Context};

pub use self::{
    inquiry::Inquiry, mutation::Mutation, property::Property, query::Query,
    saved_search::SavedSearch, user::User,
};

/// GraphQL subscriptions root, having none.
pub type Subscription = EmptySubscription<Context>;

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum PrivilegeError {
        #[code = "NOT_YOURSELF"]
        #[status = FORBIDDEN]
        #[message = "Only the authenticated `User` may access this data"]
        NotYourself,
    }
}

define_error! {
    enum PaginationError {
        #[code = "AMBIGUOUS_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Ambiguous pagination arguments"]
        Ambiguous,
    }
}

define_error! {
    enum InputError {
        #[code = "NUMBER_OUT_OF_RANGE"]
        #[status = BAD_REQUEST]
        #[message = "Provided number is out of the allowed range"]
        OutOfRange,

        #[code = "INVALID_DECIMAL"]
        #[status = BAD_REQUEST]
        #[message = "Provided number cannot be represented as a decimal"]
        InvalidDecimal,
    }
}
