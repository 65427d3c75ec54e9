//! Definitions related to filling a `Property` listing step by step.

use juniper::GraphQLObject;
use service::{domain, query};

define_enum! {
    #[doc = "Step of filling a `Property` listing."]
    #[graphql(name = "ListingStep")]
    enum Step: domain::property::Step {
        #[doc = "Title, purpose, type and price."]
        BasicDetails,

        #[doc = "Where the `Property` is."]
        Location,

        #[doc = "Rooms, area, furnishing and floors."]
        Profile,

        #[doc = "Images and video."]
        Media,

        #[doc = "Description, amenities, availability and terms."]
        AdditionalDetails,
    }
}

define_enum! {
    #[doc = "Field of a `Property` listing a `ListingViolation` refers to."]
    #[graphql(name = "ListingField")]
    enum Field: domain::property::draft::Field {
        #[doc = "Title of the listing."]
        Title,

        #[doc = "Purpose of the listing."]
        Purpose,

        #[doc = "Kind of the `Property`."]
        Kind,

        #[doc = "Sub-type of the `Property`."]
        SubType,

        #[doc = "Asked price."]
        Price,

        #[doc = "Security deposit."]
        SecurityDeposit,

        #[doc = "City."]
        City,

        #[doc = "Locality."]
        Locality,

        #[doc = "Sub-locality."]
        SubLocality,

        #[doc = "Society."]
        Society,

        #[doc = "Street address."]
        Address,

        #[doc = "Postal code."]
        Pincode,

        #[doc = "Number of bedrooms."]
        Bedrooms,

        #[doc = "Number of bathrooms."]
        Bathrooms,

        #[doc = "Built-up area."]
        Area,

        #[doc = "Furnishing status."]
        Furnishing,

        #[doc = "Floor of the `Property`."]
        Floor,

        #[doc = "Image URLs."]
        Images,

        #[doc = "Video tour URL."]
        Video,

        #[doc = "Description."]
        Description,

        #[doc = "Amenities."]
        Amenities,

        #[doc = "Availability date."]
        AvailableFrom,

        #[doc = "Terms and conditions."]
        Terms,
    }
}

define_enum! {
    #[doc = "Reason a `ListingField` failed validation."]
    #[graphql(name = "ListingViolationReason")]
    enum Reason: domain::property::draft::Reason {
        #[doc = "Value is absent."]
        Missing,

        #[doc = "Value has wrong format."]
        Invalid,

        #[doc = "Value is zero or negative."]
        NotPositive,

        #[doc = "Value is negative."]
        Negative,

        #[doc = "Sub-type doesn't belong to the chosen kind."]
        KindMismatch,

        #[doc = "Floor is above the total number of floors."]
        AboveTotalFloors,

        #[doc = "Text is shorter than required."]
        TooShort,

        #[doc = "Too many items."]
        TooMany,
    }
}

/// Single validation failure of a `Property` listing.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ListingViolation")]
pub struct Violation {
    /// Field failed validation.
    pub field: Field,

    /// Reason of the failure.
    pub reason: Reason,

    /// Human-readable description of the failure.
    pub message: String,
}

impl From<domain::property::Violation> for Violation {
    fn from(violation: domain::property::Violation) -> Self {
        Self {
            field: violation.field.into(),
            reason: violation.reason.into(),
            message: violation.to_string(),
        }
    }
}

/// Result of checking a single `ListingStep`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ListingStepReport")]
pub struct StepReport {
    /// Violations of the checked `ListingStep`, empty if it's valid.
    pub violations: Vec<Violation>,

    /// Completeness score of the whole listing, from 0 to 100.
    pub score: i32,

    /// `ListingStep` to move to, if the checked one is valid and is not the
    /// last.
    pub next: Option<Step>,
}

impl From<query::listing::StepReport> for StepReport {
    fn from(report: query::listing::StepReport) -> Self {
        let query::listing::StepReport {
            violations,
            score,
            next,
        } = report;
        Self {
            violations: violations.into_iter().map(Into::into).collect(),
            score: score.get().into(),
            next: next.map(Into::into),
        }
    }
}
