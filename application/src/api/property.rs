//! [`Property`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLInputObject, GraphQLObject, GraphQLScalar};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// A property listed on the marketplace.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    id: Id,

    /// Underlying [`domain::Property`].
    property: OnceCell<domain::Property>,
}

impl From<domain::Property> for Property {
    fn from(property: domain::Property) -> Self {
        Self {
            id: property.id.into(),
            property: OnceCell::new_with(Some(property)),
        }
    }
}

impl Property {
    /// Creates a new [`Property`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Property`] with the provided ID exists,
    /// otherwise accessing this [`Property`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            property: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Property`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Property`] doesn't exist.
    async fn property(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Property, Error> {
        let id = self.id.into();
        self.property
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::property::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::PropertyError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A property listed on the marketplace.
#[graphql_object(context = Context)]
impl Property {
    /// Unique identifier of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Title of this `Property` listing.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<String, Error> {
        Ok(self.property(ctx).await?.title.to_string())
    }

    /// Purpose this `Property` is listed for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.purpose",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn purpose(&self, ctx: &Context) -> Result<Purpose, Error> {
        Ok(self.property(ctx).await?.purpose.into())
    }

    /// Kind of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.kind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn kind(&self, ctx: &Context) -> Result<Kind, Error> {
        Ok(self.property(ctx).await?.kind.into())
    }

    /// Sub-type of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.subType",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn sub_type(&self, ctx: &Context) -> Result<SubType, Error> {
        Ok(self.property(ctx).await?.sub_type.into())
    }

    /// Asked price of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.property(ctx).await?.price)
    }

    /// Asked price of this `Property` in lakh and crore units, like
    /// `₹1.25 Cr`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.compactPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn compact_price(&self, ctx: &Context) -> Result<String, Error> {
        Ok(self.property(ctx).await?.price.compact())
    }

    /// Security deposit of this `Property`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.securityDeposit",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn security_deposit(
        &self,
        ctx: &Context,
    ) -> Result<Option<Money>, Error> {
        Ok(self.property(ctx).await?.security_deposit)
    }

    /// Location of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.location",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn location(&self, ctx: &Context) -> Result<Location, Error> {
        Ok((&self.property(ctx).await?.location).into())
    }

    /// Physical details of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.details",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn details(&self, ctx: &Context) -> Result<Details, Error> {
        Ok((&self.property(ctx).await?.details).into())
    }

    /// Amenities provided by this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.amenities",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn amenities(&self, ctx: &Context) -> Result<Vec<String>, Error> {
        Ok(self
            .property(ctx)
            .await?
            .amenities
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Description of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Option<String>, Error> {
        Ok(self
            .property(ctx)
            .await?
            .description
            .as_ref()
            .map(ToString::to_string))
    }

    /// Image URLs of this `Property`, in display order.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.images",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn images(&self, ctx: &Context) -> Result<Vec<String>, Error> {
        Ok(self
            .property(ctx)
            .await?
            .images
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Video tour URL of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.video",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn video(&self, ctx: &Context) -> Result<Option<String>, Error> {
        Ok(self.property(ctx).await?.video.as_ref().map(ToString::to_string))
    }

    /// `Date` this `Property` becomes available from.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.availableFrom",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn available_from(
        &self,
        ctx: &Context,
    ) -> Result<Option<Date>, Error> {
        Ok(self.property(ctx).await?.available_from)
    }

    /// Poster of this `Property`, as of the posting.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.postedBy",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn posted_by(&self, ctx: &Context) -> Result<PostedBy, Error> {
        Ok((&self.property(ctx).await?.posted_by).into())
    }

    /// Terms and conditions of this `Property`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.terms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn terms(&self, ctx: &Context) -> Result<Option<String>, Error> {
        Ok(self.property(ctx).await?.terms.as_ref().map(ToString::to_string))
    }

    /// Number of times this `Property` has been viewed.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.views",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn views(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(views(self.property(ctx).await?.views))
    }

    /// Indicator whether this `Property` is verified.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.verified",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn verified(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.property(ctx).await?.verified)
    }

    /// Completeness score of this `Property` listing, from 0 to 100.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.score",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn score(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.property(ctx).await?.score().get().into())
    }

    /// `DateTime` when this `Property` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.property(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Property` was last modified.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Property.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.property(ctx).await?.updated_at.coerce())
    }
}

/// Unique identifier of a `Property`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::property::Id)]
#[into(domain::property::Id)]
#[graphql(name = "PropertyId", transparent)]
pub struct Id(Uuid);

define_enum! {
    #[doc = "Purpose a `Property` is listed for."]
    #[graphql(name = "PropertyPurpose")]
    enum Purpose: domain::property::Purpose {
        #[doc = "For sale."]
        Sell,

        #[doc = "For rent."]
        Rent,

        #[doc = "As a paying guest accommodation."]
        Pg,
    }
}

define_enum! {
    #[doc = "Kind of a `Property`."]
    #[graphql(name = "PropertyKind")]
    enum Kind: domain::property::Kind {
        #[doc = "Living space."]
        Residential,

        #[doc = "Business space."]
        Commercial,
    }
}

define_enum! {
    #[doc = "Sub-type of a `Property`."]
    #[graphql(name = "PropertySubType")]
    enum SubType: domain::property::SubType {
        #[doc = "Apartment in a building."]
        Apartment,

        #[doc = "Standalone house."]
        IndependentHouse,

        #[doc = "Villa."]
        Villa,

        #[doc = "Residential land plot."]
        Plot,

        #[doc = "Whole floor of a low-rise building."]
        BuilderFloor,

        #[doc = "Studio apartment."]
        Studio,

        #[doc = "Penthouse."]
        Penthouse,

        #[doc = "Office space."]
        Office,

        #[doc = "Shop."]
        Shop,

        #[doc = "Showroom."]
        Showroom,

        #[doc = "Warehouse."]
        Warehouse,

        #[doc = "Commercial land plot."]
        CommercialLand,
    }
}

define_enum! {
    #[doc = "Furnishing status of a `Property`."]
    #[graphql(name = "PropertyFurnishing")]
    enum Furnishing: domain::property::Furnishing {
        #[doc = "Fully furnished."]
        Furnished,

        #[doc = "Partly furnished."]
        SemiFurnished,

        #[doc = "Not furnished."]
        Unfurnished,
    }
}

define_enum! {
    #[doc = "Age of a `Property` construction."]
    #[graphql(name = "PropertyAge")]
    enum Age: domain::property::Age {
        #[doc = "Still being built."]
        UnderConstruction,

        #[doc = "Less than a year old."]
        New,

        #[doc = "One to five years old."]
        UpToFiveYears,

        #[doc = "Five to ten years old."]
        UpToTenYears,

        #[doc = "More than ten years old."]
        OverTenYears,
    }
}

define_enum! {
    #[doc = "Direction a `Property` faces."]
    #[graphql(name = "PropertyFacing")]
    enum Facing: domain::property::Facing {
        #[doc = "North."]
        North,

        #[doc = "South."]
        South,

        #[doc = "East."]
        East,

        #[doc = "West."]
        West,

        #[doc = "North-east."]
        NorthEast,

        #[doc = "North-west."]
        NorthWest,

        #[doc = "South-east."]
        SouthEast,

        #[doc = "South-west."]
        SouthWest,
    }
}

define_enum! {
    #[doc = "Unit an area of a `Property` is measured in."]
    #[graphql(name = "AreaUnit")]
    enum AreaUnit: domain::property::AreaUnit {
        #[doc = "Square feet."]
        SqFt,

        #[doc = "Square meters."]
        SqM,

        #[doc = "Square yards."]
        SqYd,

        #[doc = "Acres."]
        Acre,
    }
}

/// Location of a `Property`.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "PropertyLocation")]
pub struct Location {
    /// City.
    pub city: String,

    /// Locality within the city.
    pub locality: String,

    /// Sub-locality within the locality.
    pub sub_locality: Option<String>,

    /// Society or project name.
    pub society: Option<String>,

    /// Street address.
    pub address: String,

    /// Six-digit postal code.
    pub pincode: String,
}

impl From<&domain::property::Location> for Location {
    fn from(location: &domain::property::Location) -> Self {
        Self {
            city: location.city.to_string(),
            locality: location.locality.to_string(),
            sub_locality: location
                .sub_locality
                .as_ref()
                .map(ToString::to_string),
            society: location.society.as_ref().map(ToString::to_string),
            address: location.address.to_string(),
            pincode: location.pincode.to_string(),
        }
    }
}

/// Area of a `Property`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "PropertyArea")]
pub struct Area {
    /// Area value, measured in `unit`.
    pub value: f64,

    /// Unit the `value` is measured in.
    pub unit: AreaUnit,

    /// Area value converted into square feet.
    pub sq_ft: f64,
}

impl From<domain::property::Area> for Area {
    fn from(area: domain::property::Area) -> Self {
        Self {
            value: area.value().to_f64().unwrap_or_default(),
            unit: area.unit().into(),
            sq_ft: area.in_sq_ft().to_f64().unwrap_or_default(),
        }
    }
}

/// Physical details of a `Property`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "PropertyDetails")]
pub struct Details {
    /// Number of bedrooms.
    pub bedrooms: Option<i32>,

    /// Number of bathrooms.
    pub bathrooms: Option<i32>,

    /// Number of balconies.
    pub balconies: Option<i32>,

    /// Built-up area.
    pub area: Area,

    /// Furnishing status.
    pub furnishing: Option<Furnishing>,

    /// Age of the construction.
    pub age: Option<Age>,

    /// Direction the `Property` faces.
    pub facing: Option<Facing>,

    /// Number of covered parking slots.
    pub covered_parking: i32,

    /// Number of open parking slots.
    pub open_parking: i32,

    /// Floor the `Property` is on.
    pub floor: Option<i32>,

    /// Total number of floors in the building.
    pub total_floors: Option<i32>,
}

impl From<&domain::property::Details> for Details {
    fn from(details: &domain::property::Details) -> Self {
        let rooms = |c: Option<domain::property::RoomCount>| {
            c.map(|c| i32::from(c.get()))
        };
        Self {
            bedrooms: rooms(details.bedrooms),
            bathrooms: rooms(details.bathrooms),
            balconies: rooms(details.balconies),
            area: details.area.into(),
            furnishing: details.furnishing.map(Into::into),
            age: details.age.map(Into::into),
            facing: details.facing.map(Into::into),
            covered_parking: details.covered_parking.into(),
            open_parking: details.open_parking.into(),
            floor: details.floor.map(Into::into),
            total_floors: details.total_floors.map(Into::into),
        }
    }
}

/// Poster of a `Property`, as of the posting.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "PropertyPoster")]
pub struct PostedBy {
    /// ID of the posting `User`.
    pub id: api::user::Id,

    /// Kind of the posting `User`.
    pub kind: api::user::Kind,

    /// Name of the posting `User`.
    pub name: api::user::Name,

    /// Phone of the posting `User`.
    pub phone: Option<api::user::Phone>,

    /// Email of the posting `User`.
    pub email: Option<api::user::Email>,
}

impl From<&domain::property::PostedBy> for PostedBy {
    fn from(posted_by: &domain::property::PostedBy) -> Self {
        Self {
            id: posted_by.id.into(),
            kind: posted_by.kind.into(),
            name: posted_by.name.clone().into(),
            phone: posted_by.phone.clone().map(Into::into),
            email: posted_by.email.clone().map(Into::into),
        }
    }
}

/// Partially filled `Property` listing.
///
/// Every field is validated by the listing wizard only.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "PropertyDraftInput")]
pub struct DraftInput {
    /// Title of the listing.
    pub title: Option<String>,

    /// Purpose of the listing.
    pub purpose: Option<Purpose>,

    /// Kind of the `Property`.
    pub kind: Option<Kind>,

    /// Sub-type of the `Property`.
    pub sub_type: Option<SubType>,

    /// Asked price.
    pub price: Option<Money>,

    /// Security deposit.
    pub security_deposit: Option<Money>,

    /// City of the `Property`.
    pub city: Option<String>,

    /// Locality of the `Property`.
    pub locality: Option<String>,

    /// Sub-locality of the `Property`.
    pub sub_locality: Option<String>,

    /// Society of the `Property`.
    pub society: Option<String>,

    /// Street address of the `Property`.
    pub address: Option<String>,

    /// Six-digit postal code of the `Property`.
    pub pincode: Option<String>,

    /// Number of bedrooms.
    pub bedrooms: Option<i32>,

    /// Number of bathrooms.
    pub bathrooms: Option<i32>,

    /// Number of balconies.
    pub balconies: Option<i32>,

    /// Area value, measured in `areaUnit`.
    pub area: Option<f64>,

    /// Unit of the `area`, square feet if absent.
    pub area_unit: Option<AreaUnit>,

    /// Furnishing status.
    pub furnishing: Option<Furnishing>,

    /// Age of the construction.
    pub age: Option<Age>,

    /// Direction the `Property` faces.
    pub facing: Option<Facing>,

    /// Number of covered parking slots.
    pub covered_parking: Option<i32>,

    /// Number of open parking slots.
    pub open_parking: Option<i32>,

    /// Floor the `Property` is on.
    pub floor: Option<i32>,

    /// Total number of floors in the building.
    pub total_floors: Option<i32>,

    /// Image URLs, in display order.
    pub images: Option<Vec<String>>,

    /// Video tour URL.
    pub video: Option<String>,

    /// Description of the `Property`.
    pub description: Option<String>,

    /// Amenity names.
    pub amenities: Option<Vec<String>>,

    /// `Date` the `Property` becomes available from.
    pub available_from: Option<Date>,

    /// Terms and conditions.
    pub terms: Option<String>,
}

impl TryFrom<DraftInput> for domain::property::Draft {
    type Error = Error;

    fn try_from(input: DraftInput) -> Result<Self, Self::Error> {
        let DraftInput {
            title,
            purpose,
            kind,
            sub_type,
            price,
            security_deposit,
            city,
            locality,
            sub_locality,
            society,
            address,
            pincode,
            bedrooms,
            bathrooms,
            balconies,
            area,
            area_unit,
            furnishing,
            age,
            facing,
            covered_parking,
            open_parking,
            floor,
            total_floors,
            images,
            video,
            description,
            amenities,
            available_from,
            terms,
        } = input;

        Ok(Self {
            title,
            purpose: purpose.map(Into::into),
            kind: kind.map(Into::into),
            sub_type: sub_type.map(Into::into),
            price: price.map(|m| m.amount()),
            security_deposit: security_deposit.map(|m| m.amount()),
            city,
            locality,
            sub_locality,
            society,
            address,
            pincode,
            bedrooms: narrow(bedrooms)?,
            bathrooms: narrow(bathrooms)?,
            balconies: narrow(balconies)?,
            area: area.map(decimal).transpose()?,
            area_unit: area_unit.map(Into::into),
            furnishing: furnishing.map(Into::into),
            age: age.map(Into::into),
            facing: facing.map(Into::into),
            covered_parking: narrow(covered_parking)?,
            open_parking: narrow(open_parking)?,
            floor: narrow(floor)?,
            total_floors: narrow(total_floors)?,
            images: images.unwrap_or_default(),
            video,
            description,
            amenities: amenities.unwrap_or_default(),
            available_from,
            terms,
        })
    }
}

/// Converts the provided [`domain::property::Views`] into a GraphQL integer,
/// saturating on overflow.
pub(crate) fn views(views: domain::property::Views) -> i32 {
    i32::try_from(u32::from(views)).unwrap_or(i32::MAX)
}

/// Narrows the provided GraphQL integer into a smaller one.
///
/// # Errors
///
/// With [`api::InputError::OutOfRange`] if the `value` doesn't fit.
pub(crate) fn narrow<T: TryFrom<i32>>(
    value: Option<i32>,
) -> Result<Option<T>, Error> {
    value
        .map(T::try_from)
        .transpose()
        .map_err(|_| api::InputError::OutOfRange.into())
}

/// Converts the provided GraphQL float into a [`Decimal`].
///
/// # Errors
///
/// With [`api::InputError::InvalidDecimal`] if the `value` is not finite.
pub(crate) fn decimal(value: f64) -> Result<Decimal, Error> {
    Decimal::try_from(value).map_err(|_| api::InputError::InvalidDecimal.into())
}

pub mod filter {
    //! Definitions related to [`Property`] filtering.
    //!
    //! [`Property`]: super::Property

    use common::Money;
    use juniper::{GraphQLInputObject, GraphQLObject};
    use rust_decimal::prelude::ToPrimitive as _;
    use service::domain;

    use crate::{api, Error};

    use super::{decimal, AreaUnit, Furnishing, Kind, Purpose, SubType};

    define_enum! {
        #[doc = "Order of listed `Property`s."]
        #[graphql(name = "PropertySort")]
        enum Sort: domain::property::Sort {
            #[doc = "Most recently created first."]
            Newest,

            #[doc = "Least recently created first."]
            Oldest,

            #[doc = "Cheapest first."]
            PriceLowToHigh,

            #[doc = "Most expensive first."]
            PriceHighToLow,

            #[doc = "Most viewed first."]
            MostViewed,

            #[doc = "Most complete listings first."]
            BestScore,
        }
    }

    /// Bound of an area range.
    #[derive(Clone, Copy, Debug, GraphQLInputObject)]
    #[graphql(name = "AreaBoundInput")]
    pub struct AreaBoundInput {
        /// Area value, measured in `unit`.
        pub value: f64,

        /// Unit the `value` is measured in.
        pub unit: AreaUnit,
    }

    impl TryFrom<AreaBoundInput> for domain::property::Area {
        type Error = Error;

        fn try_from(bound: AreaBoundInput) -> Result<Self, Self::Error> {
            Self::new(decimal(bound.value)?, bound.unit.into())
                .ok_or_else(|| api::InputError::OutOfRange.into())
        }
    }

    /// Bound of an area range.
    #[derive(Clone, Copy, Debug, GraphQLObject)]
    #[graphql(name = "AreaBound")]
    pub struct AreaBound {
        /// Area value, measured in `unit`.
        pub value: f64,

        /// Unit the `value` is measured in.
        pub unit: AreaUnit,
    }

    impl From<domain::property::Area> for AreaBound {
        fn from(area: domain::property::Area) -> Self {
            Self {
                value: area.value().to_f64().unwrap_or_default(),
                unit: area.unit().into(),
            }
        }
    }

    /// Criteria listed `Property`s should satisfy.
    ///
    /// Every provided criterion must hold.
    #[derive(Clone, Debug, Default, GraphQLInputObject)]
    #[graphql(name = "PropertyFilterInput")]
    pub struct FilterInput {
        /// Required purpose.
        pub purpose: Option<Purpose>,

        /// Required kind.
        pub kind: Option<Kind>,

        /// Allowed sub-types.
        pub sub_types: Option<Vec<SubType>>,

        /// Allowed bedroom counts, `4` meaning four or more.
        pub bedrooms: Option<Vec<i32>>,

        /// Allowed bathroom counts, `4` meaning four or more.
        pub bathrooms: Option<Vec<i32>>,

        /// Allowed furnishing statuses.
        pub furnishing: Option<Vec<Furnishing>>,

        /// Minimum price, inclusive.
        pub min_price: Option<Money>,

        /// Maximum price, inclusive.
        pub max_price: Option<Money>,

        /// Minimum area, inclusive.
        pub min_area: Option<AreaBoundInput>,

        /// Maximum area, inclusive.
        pub max_area: Option<AreaBoundInput>,

        /// Allowed kinds of the posting `User`.
        pub posted_by: Option<Vec<api::user::Kind>>,

        /// Amenities every listed `Property` must provide.
        pub amenities: Option<Vec<String>>,

        /// Free-text search over title, description, city, locality and
        /// society.
        pub query: Option<String>,

        /// Indicator whether only verified `Property`s are listed.
        pub verified_only: Option<bool>,
    }

    impl TryFrom<FilterInput> for domain::property::Filter {
        type Error = Error;

        fn try_from(input: FilterInput) -> Result<Self, Self::Error> {
            let FilterInput {
                purpose,
                kind,
                sub_types,
                bedrooms,
                bathrooms,
                furnishing,
                min_price,
                max_price,
                min_area,
                max_area,
                posted_by,
                amenities,
                query,
                verified_only,
            } = input;

            let rooms = |counts: Option<Vec<i32>>| {
                counts
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| {
                        u8::try_from(c)
                            .map(domain::property::RoomCount::from)
                            .map_err(|_| {
                                Error::from(api::InputError::OutOfRange)
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            };

            Ok(Self {
                purpose: purpose.map(Into::into),
                kind: kind.map(Into::into),
                sub_types: collect(sub_types),
                bedrooms: rooms(bedrooms)?,
                bathrooms: rooms(bathrooms)?,
                furnishing: collect(furnishing),
                price: domain::property::Range {
                    min: min_price,
                    max: max_price,
                },
                area: domain::property::Range {
                    min: min_area
                        .map(domain::property::Area::try_from)
                        .transpose()?,
                    max: max_area
                        .map(domain::property::Area::try_from)
                        .transpose()?,
                },
                posted_by: collect(posted_by),
                amenities: amenities
                    .unwrap_or_default()
                    .iter()
                    .filter_map(domain::property::Amenity::new)
                    .collect(),
                query: query.and_then(domain::property::SearchQuery::new),
                verified_only: verified_only.unwrap_or_default(),
            })
        }
    }

    /// Converts the provided optional GraphQL list into a domain one.
    fn collect<T: Into<D>, D>(items: Option<Vec<T>>) -> Vec<D> {
        items.unwrap_or_default().into_iter().map(Into::into).collect()
    }

    /// Criteria of a saved `Property` search.
    #[derive(Clone, Debug, GraphQLObject)]
    #[graphql(name = "PropertyFilter")]
    pub struct Filter {
        /// Required purpose.
        pub purpose: Option<Purpose>,

        /// Required kind.
        pub kind: Option<Kind>,

        /// Allowed sub-types.
        pub sub_types: Vec<SubType>,

        /// Allowed bedroom counts, `4` meaning four or more.
        pub bedrooms: Vec<i32>,

        /// Allowed bathroom counts, `4` meaning four or more.
        pub bathrooms: Vec<i32>,

        /// Allowed furnishing statuses.
        pub furnishing: Vec<Furnishing>,

        /// Minimum price, inclusive.
        pub min_price: Option<Money>,

        /// Maximum price, inclusive.
        pub max_price: Option<Money>,

        /// Minimum area, inclusive.
        pub min_area: Option<AreaBound>,

        /// Maximum area, inclusive.
        pub max_area: Option<AreaBound>,

        /// Allowed kinds of the posting `User`.
        pub posted_by: Vec<api::user::Kind>,

        /// Amenities every listed `Property` must provide.
        pub amenities: Vec<String>,

        /// Free-text search query.
        pub query: Option<String>,

        /// Indicator whether only verified `Property`s are listed.
        pub verified_only: bool,
    }

    impl From<&domain::property::Filter> for Filter {
        fn from(filter: &domain::property::Filter) -> Self {
            let rooms = |counts: &[domain::property::RoomCount]| {
                counts.iter().map(|c| i32::from(c.get())).collect()
            };
            Self {
                purpose: filter.purpose.map(Into::into),
                kind: filter.kind.map(Into::into),
                sub_types: filter
                    .sub_types
                    .iter()
                    .copied()
                    .map(Into::into)
                    .collect(),
                bedrooms: rooms(&filter.bedrooms),
                bathrooms: rooms(&filter.bathrooms),
                furnishing: filter
                    .furnishing
                    .iter()
                    .copied()
                    .map(Into::into)
                    .collect(),
                min_price: filter.price.min,
                max_price: filter.price.max,
                min_area: filter.area.min.map(Into::into),
                max_area: filter.area.max.map(Into::into),
                posted_by: filter
                    .posted_by
                    .iter()
                    .copied()
                    .map(Into::into)
                    .collect(),
                amenities: filter
                    .amenities
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                query: filter.query.as_ref().map(ToString::to_string),
                verified_only: filter.verified_only,
            }
        }
    }
}

pub mod list {
    //! Definitions related to the [`Property`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::read;

    use super::{Id, Property};
    use crate::{api::scalar, Context};

    /// Cursor for the `Property` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::property::list::Cursor)]
    #[graphql(
        name = "PropertyListCursor",
        with = scalar::Via::<read::property::list::Cursor>,
    )]
    pub struct Cursor(pub read::property::list::Cursor);

    /// Edge in the [`Property`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Edge(read::property::list::Edge);

    /// Edge in the `Property` list.
    #[graphql_object(name = "PropertyListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `PropertyListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `PropertyListEdge`.
        #[must_use]
        pub fn node(&self) -> Property {
            self.0.node.clone().into()
        }
    }

    /// Connection of the [`Property`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::property::list::Connection);

    /// Connection of the `Property` list.
    #[graphql_object(name = "PropertyListConnection", context = Context)]
    impl Connection {
        /// Edges in this `PropertyListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.0.edges.iter().cloned().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo {
                info: self.0.page_info(),
                total_count: self.0.total_count,
            }
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Copy, Debug)]
    pub struct PageInfo {
        /// Underlying [`read::property::list::PageInfo`].
        info: read::property::list::PageInfo,

        /// Total number of `Property`s matching the filter.
        total_count: usize,
    }

    /// Information about a `PropertyListConnection` page.
    #[graphql_object(name = "PropertyListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.info.has_next_page
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.info.has_previous_page
        }

        /// Start cursor of the page.
        #[must_use]
        pub fn start_cursor(&self) -> Option<Cursor> {
            self.info.start_cursor.map(Into::into)
        }

        /// End cursor of the page.
        #[must_use]
        pub fn end_cursor(&self) -> Option<Cursor> {
            self.info.end_cursor.map(Into::into)
        }

        /// Total number of `Property`s matching the filter.
        #[must_use]
        pub fn total_count(&self) -> i32 {
            i32::try_from(self.total_count).unwrap_or(i32::MAX)
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain::property::{Draft, Filter, RoomCount};

    use super::{
        filter::{AreaBoundInput, FilterInput},
        AreaUnit, DraftInput, Purpose,
    };

    #[test]
    fn converts_draft_input() {
        let draft = Draft::try_from(DraftInput {
            title: Some("Sea view flat".into()),
            purpose: Some(Purpose::Rent),
            bedrooms: Some(3),
            area: Some(1250.5),
            ..DraftInput::default()
        })
        .unwrap();

        assert_eq!(draft.title.as_deref(), Some("Sea view flat"));
        assert_eq!(draft.purpose, Some(Purpose::Rent.into()));
        assert_eq!(draft.bedrooms, Some(3));
        assert_eq!(
            draft.area.map(|a| a.to_string()).as_deref(),
            Some("1250.5"),
        );
        assert!(draft.images.is_empty());
    }

    #[test]
    fn rejects_out_of_range_draft_numbers() {
        let err = Draft::try_from(DraftInput {
            bathrooms: Some(300),
            ..DraftInput::default()
        })
        .unwrap_err();

        assert_eq!(err.code, "NUMBER_OUT_OF_RANGE");
    }

    #[test]
    fn rejects_non_finite_area() {
        let err = Draft::try_from(DraftInput {
            area: Some(f64::NAN),
            ..DraftInput::default()
        })
        .unwrap_err();

        assert_eq!(err.code, "INVALID_DECIMAL");
    }

    #[test]
    fn converts_filter_input() {
        let filter = Filter::try_from(FilterInput {
            bedrooms: Some(vec![2, 4]),
            amenities: Some(vec!["Gym".into(), "  ".into()]),
            query: Some("   ".into()),
            ..FilterInput::default()
        })
        .unwrap();

        assert_eq!(filter.bedrooms, [RoomCount::from(2), RoomCount::from(4)]);
        assert_eq!(filter.amenities.len(), 1);
        assert!(filter.query.is_none());
        assert!(!filter.verified_only);
    }

    #[test]
    fn empty_filter_input_is_empty_filter() {
        let filter = Filter::try_from(FilterInput::default()).unwrap();

        assert!(filter.is_empty());
    }

    #[test]
    fn rejects_negative_room_counts() {
        let err = Filter::try_from(FilterInput {
            bathrooms: Some(vec![-1]),
            ..FilterInput::default()
        })
        .unwrap_err();

        assert_eq!(err.code, "NUMBER_OUT_OF_RANGE");
    }

    #[test]
    fn rejects_area_bound_overflowing_sq_ft() {
        let err = Filter::try_from(FilterInput {
            max_area: Some(AreaBoundInput {
                value: 1e27,
                unit: AreaUnit::Acre,
            }),
            ..FilterInput::default()
        })
        .unwrap_err();

        assert_eq!(err.code, "NUMBER_OUT_OF_RANGE");
    }
}
