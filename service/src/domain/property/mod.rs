//! [`Property`] definitions.

pub mod draft;
pub mod filter;
pub mod wizard;

use std::{collections::BTreeSet, fmt, sync::LazyLock};

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{user, User};

pub use self::{
    draft::{Draft, Listing, Step, Violation},
    filter::{Filter, Range, SearchQuery, Sort},
    wizard::Wizard,
};

/// Real-estate listing posted on the marketplace.
#[derive(Clone, Debug)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// [`Title`] of this [`Property`].
    pub title: Title,

    /// [`Purpose`] this [`Property`] is listed for.
    pub purpose: Purpose,

    /// [`Kind`] of this [`Property`].
    pub kind: Kind,

    /// [`SubType`] of this [`Property`].
    pub sub_type: SubType,

    /// Sale price, or monthly rent for [`Purpose::Rent`] and [`Purpose::Pg`].
    pub price: Money,

    /// Security deposit required by the poster, if any.
    pub security_deposit: Option<Money>,

    /// [`Location`] of this [`Property`].
    pub location: Location,

    /// Physical [`Details`] of this [`Property`].
    pub details: Details,

    /// [`Amenities`] provided by this [`Property`].
    pub amenities: Amenities,

    /// [`Description`] of this [`Property`].
    pub description: Option<Description>,

    /// Images of this [`Property`], in display order.
    pub images: Vec<ImageUrl>,

    /// Video tour of this [`Property`], if any.
    pub video: Option<VideoUrl>,

    /// [`AvailabilityDate`] of this [`Property`].
    pub available_from: Option<AvailabilityDate>,

    /// [`PostedBy`] snapshot of the [`User`] who listed this [`Property`].
    pub posted_by: PostedBy,

    /// [`Terms`] and conditions of this [`Property`].
    pub terms: Option<Terms>,

    /// Number of times this [`Property`] has been viewed.
    pub views: Views,

    /// Indicator whether this [`Property`] has been verified.
    pub verified: bool,

    /// [`DateTime`] when this [`Property`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Property`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Property {
    /// Creates a new [`Property`] out of the provided complete [`Listing`].
    #[must_use]
    pub fn new(listing: Listing, posted_by: PostedBy) -> Self {
        let now = common::DateTime::now();
        let Listing {
            title,
            purpose,
            kind,
            sub_type,
            price,
            security_deposit,
            location,
            details,
            amenities,
            description,
            images,
            video,
            available_from,
            terms,
        } = listing;

        Self {
            id: Id::new(),
            title,
            purpose,
            kind,
            sub_type,
            price,
            security_deposit,
            location,
            details,
            amenities,
            description: Some(description),
            images,
            video,
            available_from: Some(available_from),
            posted_by,
            terms,
            views: Views::default(),
            verified: false,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        }
    }

    /// Replaces the contents of this [`Property`] with the provided complete
    /// [`Listing`], bumping its modification [`DateTime`].
    pub fn revise(&mut self, listing: Listing) {
        let Listing {
            title,
            purpose,
            kind,
            sub_type,
            price,
            security_deposit,
            location,
            details,
            amenities,
            description,
            images,
            video,
            available_from,
            terms,
        } = listing;

        self.title = title;
        self.purpose = purpose;
        self.kind = kind;
        self.sub_type = sub_type;
        self.price = price;
        self.security_deposit = security_deposit;
        self.location = location;
        self.details = details;
        self.amenities = amenities;
        self.description = Some(description);
        self.images = images;
        self.video = video;
        self.available_from = Some(available_from);
        self.terms = terms;
        self.updated_at = common::DateTime::now().coerce();
    }

    /// Returns completeness [`Score`] of this [`Property`].
    ///
    /// Always computed out of the current contents.
    #[must_use]
    pub fn score(&self) -> Score {
        Score::from_sections(&Draft::from(self).completed_sections())
    }

    /// Indicates whether this [`Property`] was posted by the [`User`] with
    /// the provided ID.
    #[must_use]
    pub fn is_posted_by(&self, user_id: user::Id) -> bool {
        self.posted_by.id == user_id
    }
}

/// ID of a [`Property`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
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
    #[doc = "Title of a [`Property`] listing."]
    Title(max = 200)
}

define_text! {
    #[doc = "City a [`Property`] is located in."]
    City(max = 100)
}

define_text! {
    #[doc = "Locality of a [`City`] a [`Property`] is located in."]
    Locality(max = 100)
}

define_text! {
    #[doc = "Part of a [`Locality`] a [`Property`] is located in."]
    SubLocality(max = 100)
}

define_text! {
    #[doc = "Society (gated community, project) of a [`Property`]."]
    Society(max = 200)
}

define_text! {
    #[doc = "Street address of a [`Property`]."]
    Address(max = 500)
}

define_text! {
    #[doc = "Free-form description of a [`Property`]."]
    Description(max = 5000)
}

define_text! {
    #[doc = "Terms and conditions of a [`Property`] deal."]
    Terms(max = 5000)
}

/// Indian postal code of a [`Property`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Pincode(String);

impl Pincode {
    /// Creates a new [`Pincode`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `code` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Creates a new [`Pincode`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Pincode`]:
    /// exactly 6 digits, not starting with zero.
    fn check(code: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Pincode`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[1-9][0-9]{5}$").expect("valid regex")
        });

        REGEX.is_match(code.as_ref())
    }
}

impl FromStr for Pincode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Pincode`")
    }
}

/// Checks whether the given `url` is an absolute HTTP(S) URL.
fn is_http_url(url: &str) -> bool {
    /// Regular expression checking HTTP(S) URL format.
    static REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid regex")
    });

    url.len() <= 2048 && REGEX.is_match(url)
}

/// URL of a [`Property`] image.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        is_http_url(&url).then_some(Self(url))
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// URL of a [`Property`] video tour.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct VideoUrl(String);

impl VideoUrl {
    /// Creates a new [`VideoUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        is_http_url(&url).then_some(Self(url))
    }
}

impl FromStr for VideoUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `VideoUrl`")
    }
}

/// Amenity provided by a [`Property`].
///
/// Always lowercase with single spaces between words, so `"Power  Backup"`
/// and `"power backup"` are the same [`Amenity`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Amenity(String);

impl Amenity {
    /// Creates a new [`Amenity`] normalizing the given `name`, if it's not
    /// blank.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Option<Self> {
        let name = name
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        (!name.is_empty() && name.chars().count() <= 100).then_some(Self(name))
    }
}

impl FromStr for Amenity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Amenity`")
    }
}

/// Ordered set of [`Amenity`]s.
pub type Amenities = BTreeSet<Amenity>;

define_kind! {
    #[doc = "Purpose a [`Property`] is listed for."]
    enum Purpose {
        #[doc = "Outright sale."]
        Sell = 1,

        #[doc = "Rent."]
        Rent = 2,

        #[doc = "Paying guest accommodation."]
        Pg = 3,
    }
}

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind {
        #[doc = "Dwelling."]
        Residential = 1,

        #[doc = "Business premises."]
        Commercial = 2,
    }
}

define_kind! {
    #[doc = "Sub-type of a [`Property`] refining its [`Kind`]."]
    enum SubType {
        #[doc = "Apartment in a multi-storey building."]
        Apartment = 1,

        #[doc = "Standalone house."]
        IndependentHouse = 2,

        #[doc = "Villa."]
        Villa = 3,

        #[doc = "Residential plot of land."]
        Plot = 4,

        #[doc = "Floor of a low-rise building."]
        BuilderFloor = 5,

        #[doc = "Studio apartment."]
        Studio = 6,

        #[doc = "Penthouse."]
        Penthouse = 7,

        #[doc = "Office space."]
        Office = 8,

        #[doc = "Shop."]
        Shop = 9,

        #[doc = "Showroom."]
        Showroom = 10,

        #[doc = "Warehouse."]
        Warehouse = 11,

        #[doc = "Commercial plot of land."]
        CommercialLand = 12,
    }
}

impl SubType {
    /// Returns the [`Kind`] this [`SubType`] belongs to.
    #[must_use]
    pub const fn kind(self) -> Kind {
        match self {
            Self::Apartment
            | Self::IndependentHouse
            | Self::Villa
            | Self::Plot
            | Self::BuilderFloor
            | Self::Studio
            | Self::Penthouse => Kind::Residential,
            Self::Office
            | Self::Shop
            | Self::Showroom
            | Self::Warehouse
            | Self::CommercialLand => Kind::Commercial,
        }
    }

    /// Indicates whether a [`Property`] of this [`SubType`] is a bare land.
    #[must_use]
    pub const fn is_land(self) -> bool {
        matches!(self, Self::Plot | Self::CommercialLand)
    }

    /// Indicates whether a [`Property`] of this [`SubType`] must describe
    /// its rooms and furnishing.
    #[must_use]
    pub fn requires_rooms(self) -> bool {
        self.kind() == Kind::Residential && !self.is_land()
    }
}

define_kind! {
    #[doc = "Furnishing status of a [`Property`]."]
    enum Furnishing {
        #[doc = "Fully furnished."]
        Furnished = 1,

        #[doc = "Partially furnished."]
        SemiFurnished = 2,

        #[doc = "Not furnished."]
        Unfurnished = 3,
    }
}

define_kind! {
    #[doc = "Direction the main entrance of a [`Property`] faces."]
    enum Facing {
        #[doc = "North."]
        North = 1,

        #[doc = "South."]
        South = 2,

        #[doc = "East."]
        East = 3,

        #[doc = "West."]
        West = 4,

        #[doc = "North-east."]
        NorthEast = 5,

        #[doc = "North-west."]
        NorthWest = 6,

        #[doc = "South-east."]
        SouthEast = 7,

        #[doc = "South-west."]
        SouthWest = 8,
    }
}

define_kind! {
    #[doc = "Age of a [`Property`] construction."]
    enum Age {
        #[doc = "Still under construction."]
        UnderConstruction = 1,

        #[doc = "Less than a year old."]
        New = 2,

        #[doc = "From 1 to 5 years old."]
        UpToFiveYears = 3,

        #[doc = "From 5 to 10 years old."]
        UpToTenYears = 4,

        #[doc = "Older than 10 years."]
        OverTenYears = 5,
    }
}

define_kind! {
    #[doc = "Unit an [`Area`] is measured in."]
    enum AreaUnit {
        #[doc = "Square feet."]
        SqFt = 1,

        #[doc = "Square meters."]
        SqM = 2,

        #[doc = "Square yards."]
        SqYd = 3,

        #[doc = "Acres."]
        Acre = 4,
    }
}

impl AreaUnit {
    /// Returns the number of square feet in one unit.
    #[must_use]
    pub const fn sq_ft(self) -> Decimal {
        match self {
            Self::SqFt => Decimal::ONE,
            Self::SqM => Decimal::from_parts(107_639, 0, 0, false, 4),
            Self::SqYd => Decimal::from_parts(9, 0, 0, false, 0),
            Self::Acre => Decimal::from_parts(43_560, 0, 0, false, 0),
        }
    }
}

/// Area of a [`Property`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Area {
    /// Measured value.
    value: Decimal,

    /// [`AreaUnit`] the `value` is measured in.
    unit: AreaUnit,
}

impl Area {
    /// Creates a new [`Area`] if the given `value` is not negative and is
    /// representable in square feet.
    #[must_use]
    pub fn new(value: Decimal, unit: AreaUnit) -> Option<Self> {
        let non_negative = !value.is_sign_negative() || value.is_zero();
        (non_negative && value.checked_mul(unit.sq_ft()).is_some()).then(
            || Self {
                value: value.normalize(),
                unit,
            },
        )
    }

    /// Returns the measured value of this [`Area`].
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.value
    }

    /// Returns [`AreaUnit`] of this [`Area`].
    #[must_use]
    pub const fn unit(&self) -> AreaUnit {
        self.unit
    }

    /// Returns this [`Area`] normalized to square feet, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn in_sq_ft(&self) -> Decimal {
        self.value
            .checked_mul(self.unit.sq_ft())
            .unwrap_or(Decimal::MAX)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Count of bedrooms, bathrooms or balconies.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct RoomCount(u8);

impl RoomCount {
    /// Largest count distinguished exactly; requesting it means "this many
    /// or more".
    pub const MAX_EXACT: u8 = 4;

    /// Returns the raw count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Indicates whether this actual count satisfies the `requested` one.
    #[must_use]
    pub const fn satisfies(self, requested: Self) -> bool {
        if requested.0 >= Self::MAX_EXACT {
            self.0 >= Self::MAX_EXACT
        } else {
            self.0 == requested.0
        }
    }
}

/// Floor number in a building, `0` being the ground floor.
pub type Floor = u16;

/// Location of a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    /// [`City`] of the [`Property`].
    pub city: City,

    /// [`Locality`] of the [`Property`].
    pub locality: Locality,

    /// [`SubLocality`] of the [`Property`], if any.
    pub sub_locality: Option<SubLocality>,

    /// [`Society`] of the [`Property`], if any.
    pub society: Option<Society>,

    /// Street [`Address`] of the [`Property`].
    pub address: Address,

    /// [`Pincode`] of the [`Property`].
    pub pincode: Pincode,
}

/// Physical details of a [`Property`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Details {
    /// Number of bedrooms.
    pub bedrooms: Option<RoomCount>,

    /// Number of bathrooms.
    pub bathrooms: Option<RoomCount>,

    /// Number of balconies.
    pub balconies: Option<RoomCount>,

    /// Built-up or plot [`Area`].
    pub area: Area,

    /// [`Furnishing`] status.
    pub furnishing: Option<Furnishing>,

    /// [`Age`] of the construction.
    pub age: Option<Age>,

    /// [`Facing`] direction.
    pub facing: Option<Facing>,

    /// Number of covered parking slots.
    pub covered_parking: u8,

    /// Number of open parking slots.
    pub open_parking: u8,

    /// [`Floor`] the [`Property`] is on.
    pub floor: Option<Floor>,

    /// Total number of floors in the building.
    pub total_floors: Option<Floor>,
}

/// Snapshot of the [`User`] who posted a [`Property`], taken at the moment
/// of posting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostedBy {
    /// ID of the poster.
    pub id: user::Id,

    /// [`user::Kind`] of the poster.
    pub kind: user::Kind,

    /// [`user::Name`] of the poster.
    pub name: user::Name,

    /// [`user::Phone`] of the poster, if any.
    pub phone: Option<user::Phone>,

    /// [`user::Email`] of the poster.
    pub email: Option<user::Email>,
}

impl From<&User> for PostedBy {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            kind: user.kind,
            name: user.name.clone(),
            phone: user.phone.clone(),
            email: Some(user.email.clone()),
        }
    }
}

/// Number of times a [`Property`] has been viewed.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Views(u32);

impl Views {
    /// Returns these [`Views`] with one more view counted.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Completeness score of a [`Property`] listing, from `0` to `100`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct Score(u8);

impl Score {
    /// Points granted for every completed section.
    pub const PER_SECTION: u8 = 20;

    /// Maximum possible [`Score`].
    pub const MAX: Self = Self(100);

    /// Computes a [`Score`] out of section completeness flags.
    #[must_use]
    pub fn from_sections(completed: &[bool]) -> Self {
        let done = completed.iter().filter(|c| **c).count();
        let points = u8::try_from(done)
            .unwrap_or(u8::MAX)
            .saturating_mul(Self::PER_SECTION);
        Self(points.min(Self::MAX.0))
    }

    /// Returns the raw number of points.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Calendar date a [`Property`] becomes available from.
pub type AvailabilityDate = Date;

/// [`DateTime`] when a [`Property`] was created.
pub type CreationDateTime = DateTimeOf<(Property, unit::Creation)>;

/// [`DateTime`] when a [`Property`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Property, unit::Modification)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{
        Amenity, Area, AreaUnit, ImageUrl, Kind, Pincode, RoomCount, Score,
        SubType, Title,
    };

    #[test]
    fn validates_pincode() {
        assert!(Pincode::new("560001").is_some());
        assert!(Pincode::new("110092").is_some());

        assert!(Pincode::new("056001").is_none());
        assert!(Pincode::new("56001").is_none());
        assert!(Pincode::new("5600011").is_none());
        assert!(Pincode::new("56000a").is_none());
        assert!(Pincode::new(" 560001").is_none());
    }

    #[test]
    fn validates_title() {
        assert!(Title::new("2 BHK in Indiranagar").is_some());
        assert!(Title::new("").is_none());
        assert!(Title::new(" padded ").is_none());
        assert!(Title::new("x".repeat(201)).is_none());
    }

    #[test]
    fn normalizes_amenities() {
        assert_eq!(
            Amenity::new("  Power   Backup ").unwrap(),
            Amenity::from_str("power backup").unwrap(),
        );
        assert!(Amenity::new("   ").is_none());
    }

    #[test]
    fn validates_urls() {
        assert!(ImageUrl::new("https://cdn.example.com/a.jpg").is_some());
        assert!(ImageUrl::new("http://example.com/b.png").is_some());
        assert!(ImageUrl::new("ftp://example.com/a.jpg").is_none());
        assert!(ImageUrl::new("https://exa mple.com").is_none());
        assert!(ImageUrl::new("data:image/png;base64,AAAA").is_none());
    }

    #[test]
    fn sub_type_kinds() {
        assert_eq!(SubType::Villa.kind(), Kind::Residential);
        assert_eq!(SubType::Warehouse.kind(), Kind::Commercial);

        assert!(SubType::Apartment.requires_rooms());
        assert!(!SubType::Plot.requires_rooms());
        assert!(!SubType::Office.requires_rooms());
        assert!(!SubType::CommercialLand.requires_rooms());
    }

    #[test]
    fn normalizes_area() {
        let yards = Area::new(Decimal::from(100), AreaUnit::SqYd).unwrap();
        assert_eq!(yards.in_sq_ft(), Decimal::from(900));

        let acre = Area::new(Decimal::ONE, AreaUnit::Acre).unwrap();
        assert_eq!(acre.in_sq_ft(), Decimal::from(43_560));

        let meters = Area::new(Decimal::from(10), AreaUnit::SqM).unwrap();
        assert_eq!(meters.in_sq_ft(), Decimal::from_str("107.639").unwrap());

        assert!(Area::new(Decimal::from(-1), AreaUnit::SqFt).is_none());
    }

    #[test]
    fn rejects_area_overflowing_sq_ft() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);

        assert!(Area::new(huge, AreaUnit::Acre).is_none());
        assert!(Area::new(Decimal::MAX, AreaUnit::SqYd).is_none());

        let feet = Area::new(huge, AreaUnit::SqFt).unwrap();
        assert_eq!(feet.in_sq_ft(), huge);
        let max = Area::new(Decimal::MAX, AreaUnit::SqFt).unwrap();
        assert_eq!(max.in_sq_ft(), Decimal::MAX);
    }

    #[test]
    fn room_count_plus() {
        let four = RoomCount::from(RoomCount::MAX_EXACT);

        assert!(RoomCount::from(2).satisfies(RoomCount::from(2)));
        assert!(!RoomCount::from(3).satisfies(RoomCount::from(2)));
        assert!(RoomCount::from(4).satisfies(four));
        assert!(RoomCount::from(6).satisfies(four));
        assert!(!RoomCount::from(3).satisfies(four));
        assert!(!RoomCount::from(6).satisfies(RoomCount::from(3)));
    }

    #[test]
    fn score_from_sections() {
        assert_eq!(Score::from_sections(&[false; 5]).get(), 0);
        assert_eq!(
            Score::from_sections(&[true, false, true, false, false]).get(),
            40,
        );
        assert_eq!(Score::from_sections(&[true; 5]), Score::MAX);
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    //! Sample [`Property`] data for tests.

    use common::Date;
    use rust_decimal::Decimal;

    use crate::domain::user;

    use super::{
        AreaUnit, Draft, Furnishing, Kind, PostedBy, Property, Purpose,
        SubType,
    };

    /// Returns a [`Draft`] passing every step.
    pub(crate) fn draft() -> Draft {
        Draft {
            title: Some("Spacious 3 BHK apartment".into()),
            purpose: Some(Purpose::Sell),
            kind: Some(Kind::Residential),
            sub_type: Some(SubType::Apartment),
            price: Some(Decimal::from(12_000_000)),
            security_deposit: None,
            city: Some("Bengaluru".into()),
            locality: Some("Indiranagar".into()),
            sub_locality: Some("HAL 2nd Stage".into()),
            society: Some("Green Meadows".into()),
            address: Some("12th Main Road, 4th Cross".into()),
            pincode: Some("560038".into()),
            bedrooms: Some(3),
            bathrooms: Some(2),
            balconies: Some(1),
            area: Some(Decimal::from(1200)),
            area_unit: Some(AreaUnit::SqFt),
            furnishing: Some(Furnishing::Unfurnished),
            age: None,
            facing: None,
            covered_parking: Some(1),
            open_parking: None,
            floor: Some(3),
            total_floors: Some(10),
            images: vec!["https://cdn.example.com/living-room.jpg".into()],
            video: None,
            description: Some(
                "Well ventilated home with ample natural light, close to \
                 schools and hospitals."
                    .into(),
            ),
            amenities: vec!["Lift".into()],
            available_from: Date::from_calendar(2025, 1, 15),
            terms: None,
        }
    }

    /// Returns a [`PostedBy`] of an owner.
    pub(crate) fn posted_by() -> PostedBy {
        PostedBy {
            id: user::Id::new(),
            kind: user::Kind::Owner,
            name: user::Name::new("Asha Rao").unwrap(),
            phone: None,
            email: user::Email::new("asha@example.com"),
        }
    }

    /// Returns a complete [`Property`] with the provided `title`.
    pub(crate) fn property(title: &str) -> Property {
        let mut draft = draft();
        draft.title = Some(title.into());
        Property::new(draft.listing().unwrap(), posted_by())
    }
}
