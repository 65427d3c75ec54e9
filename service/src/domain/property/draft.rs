//! [`Draft`] of a [`Property`] listing and its per-[`Step`] validation.

use common::{define_kind, Money};
use derive_more::Display;
use rust_decimal::Decimal;

use super::{
    Address, Age, Amenities, Amenity, Area, AreaUnit, AvailabilityDate, City,
    Description, Details, Facing, Floor, Furnishing, ImageUrl, Kind,
    Locality, Location, Pincode, Property, Purpose, RoomCount, Score, Society,
    SubLocality, SubType, Terms, Title, VideoUrl,
};

define_kind! {
    #[doc = "Step of filling a [`Draft`]."]
    enum Step {
        #[doc = "Title, purpose, type and price."]
        BasicDetails = 1,

        #[doc = "Where the [`Property`] is."]
        Location = 2,

        #[doc = "Rooms, area, furnishing and floors."]
        Profile = 3,

        #[doc = "Images and video."]
        Media = 4,

        #[doc = "Description, amenities, availability and terms."]
        AdditionalDetails = 5,
    }
}

impl Step {
    /// Number of [`Step`]s.
    pub const COUNT: usize = 5;

    /// Returns the [`Step`] following this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_u8(self.u8() + 1)
    }

    /// Returns the [`Step`] preceding this one, if any.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        Self::from_u8(self.u8().checked_sub(1)?)
    }

    /// Returns zero-based position of this [`Step`].
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.u8()) - 1
    }
}

/// Field of a [`Draft`] a [`Violation`] refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    /// [`Draft::title`].
    Title,

    /// [`Draft::purpose`].
    Purpose,

    /// [`Draft::kind`].
    Kind,

    /// [`Draft::sub_type`].
    SubType,

    /// [`Draft::price`].
    Price,

    /// [`Draft::security_deposit`].
    SecurityDeposit,

    /// [`Draft::city`].
    City,

    /// [`Draft::locality`].
    Locality,

    /// [`Draft::sub_locality`].
    SubLocality,

    /// [`Draft::society`].
    Society,

    /// [`Draft::address`].
    Address,

    /// [`Draft::pincode`].
    Pincode,

    /// [`Draft::bedrooms`].
    Bedrooms,

    /// [`Draft::bathrooms`].
    Bathrooms,

    /// [`Draft::area`].
    Area,

    /// [`Draft::furnishing`].
    Furnishing,

    /// [`Draft::floor`].
    Floor,

    /// [`Draft::images`].
    Images,

    /// [`Draft::video`].
    Video,

    /// [`Draft::description`].
    Description,

    /// [`Draft::amenities`].
    Amenities,

    /// [`Draft::available_from`].
    AvailableFrom,

    /// [`Draft::terms`].
    Terms,
}

/// Reason of a [`Violation`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Reason {
    /// Value is absent.
    #[display("is required")]
    Missing,

    /// Value has wrong format.
    #[display("is malformed")]
    Invalid,

    /// Value is zero or negative.
    #[display("must be positive")]
    NotPositive,

    /// Value is negative.
    #[display("must not be negative")]
    Negative,

    /// [`SubType`] doesn't belong to the chosen [`Kind`].
    #[display("does not match the property type")]
    KindMismatch,

    /// Floor is above the total number of floors.
    #[display("must not exceed the total number of floors")]
    AboveTotalFloors,

    /// Text is shorter than required.
    #[display(
        "must be at least {} characters long",
        Draft::MIN_DESCRIPTION_LEN,
    )]
    TooShort,

    /// Too many items.
    #[display("must have at most {} items", Draft::MAX_IMAGES)]
    TooMany,
}

/// Single validation failure of a [`Draft`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("`{field}` {reason}")]
pub struct Violation {
    /// [`Field`] failed validation.
    pub field: Field,

    /// [`Reason`] of the failure.
    pub reason: Reason,
}

/// Partially filled [`Property`] listing.
///
/// Every field is raw user input, checked only by [`Draft::validate()`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Draft {
    /// Title of the listing.
    pub title: Option<String>,

    /// [`Purpose`] of the listing.
    pub purpose: Option<Purpose>,

    /// [`Kind`] of the [`Property`].
    pub kind: Option<Kind>,

    /// [`SubType`] of the [`Property`].
    pub sub_type: Option<SubType>,

    /// Asked price in rupees.
    pub price: Option<Decimal>,

    /// Security deposit in rupees.
    pub security_deposit: Option<Decimal>,

    /// City of the [`Property`].
    pub city: Option<String>,

    /// Locality of the [`Property`].
    pub locality: Option<String>,

    /// Sub-locality of the [`Property`].
    pub sub_locality: Option<String>,

    /// Society of the [`Property`].
    pub society: Option<String>,

    /// Street address of the [`Property`].
    pub address: Option<String>,

    /// Postal code of the [`Property`].
    pub pincode: Option<String>,

    /// Number of bedrooms.
    pub bedrooms: Option<u8>,

    /// Number of bathrooms.
    pub bathrooms: Option<u8>,

    /// Number of balconies.
    pub balconies: Option<u8>,

    /// Area value, measured in `area_unit`.
    pub area: Option<Decimal>,

    /// [`AreaUnit`] of the `area`, square feet if absent.
    pub area_unit: Option<AreaUnit>,

    /// [`Furnishing`] status.
    pub furnishing: Option<Furnishing>,

    /// [`Age`] of the construction.
    pub age: Option<Age>,

    /// [`Facing`] direction.
    pub facing: Option<Facing>,

    /// Number of covered parking slots.
    pub covered_parking: Option<u8>,

    /// Number of open parking slots.
    pub open_parking: Option<u8>,

    /// [`Floor`] the [`Property`] is on.
    pub floor: Option<Floor>,

    /// Total number of floors in the building.
    pub total_floors: Option<Floor>,

    /// Image URLs, in display order.
    pub images: Vec<String>,

    /// Video tour URL.
    pub video: Option<String>,

    /// Description of the [`Property`].
    pub description: Option<String>,

    /// Amenity names.
    pub amenities: Vec<String>,

    /// Date the [`Property`] becomes available from.
    pub available_from: Option<AvailabilityDate>,

    /// Terms and conditions.
    pub terms: Option<String>,
}

impl Draft {
    /// Maximum number of images a listing may have.
    pub const MAX_IMAGES: usize = 20;

    /// Minimum number of characters in a listing description.
    pub const MIN_DESCRIPTION_LEN: usize = 30;

    /// Validates the fields relevant to the provided [`Step`] only.
    ///
    /// # Errors
    ///
    /// With all the [`Violation`]s found in the [`Step`].
    pub fn validate(&self, step: Step) -> Result<(), Vec<Violation>> {
        match step {
            Step::BasicDetails => self.basic_details().map(drop),
            Step::Location => self.location().map(drop),
            Step::Profile => self.profile().map(drop),
            Step::Media => self.media().map(drop),
            Step::AdditionalDetails => self.additional_details().map(drop),
        }
    }

    /// Returns completeness flags of every [`Step`], in [`Step::ALL`] order.
    #[must_use]
    pub fn completed_sections(&self) -> [bool; Step::COUNT] {
        [
            Step::BasicDetails,
            Step::Location,
            Step::Profile,
            Step::Media,
            Step::AdditionalDetails,
        ]
        .map(|step| self.validate(step).is_ok())
    }

    /// Computes completeness [`Score`] of this [`Draft`].
    #[must_use]
    pub fn score(&self) -> Score {
        Score::from_sections(&self.completed_sections())
    }

    /// Validates every [`Step`] and converts this [`Draft`] into a complete
    /// [`Listing`].
    ///
    /// # Errors
    ///
    /// With [`Violation`]s of all the [`Step`]s.
    pub fn listing(&self) -> Result<Listing, Vec<Violation>> {
        let basic = self.basic_details();
        let location = self.location();
        let details = self.profile();
        let media = self.media();
        let additional = self.additional_details();

        match (basic, location, details, media, additional) {
            (
                Ok(basic),
                Ok(location),
                Ok(details),
                Ok(media),
                Ok(additional),
            ) => {
                Ok(Listing {
                    title: basic.title,
                    purpose: basic.purpose,
                    kind: basic.kind,
                    sub_type: basic.sub_type,
                    price: basic.price,
                    security_deposit: basic.security_deposit,
                    location,
                    details,
                    amenities: additional.amenities,
                    description: additional.description,
                    images: media.images,
                    video: media.video,
                    available_from: additional.available_from,
                    terms: additional.terms,
                })
            }
            (basic, location, details, media, additional) => Err([
                basic.err(),
                location.err(),
                details.err(),
                media.err(),
                additional.err(),
            ]
            .into_iter()
            .flatten()
            .flatten()
            .collect()),
        }
    }

    /// Validates [`Step::BasicDetails`].
    fn basic_details(&self) -> Result<BasicDetails, Vec<Violation>> {
        let mut report = Report::default();

        let title =
            report.text(Field::Title, self.title.as_deref(), Title::new);
        let purpose = report.required(Field::Purpose, self.purpose);
        let kind = report.required(Field::Kind, self.kind);
        let sub_type = report.required(Field::SubType, self.sub_type);
        if let (Some(kind), Some(sub_type)) = (kind, sub_type) {
            if sub_type.kind() != kind {
                report.fail(Field::SubType, Reason::KindMismatch);
            }
        }
        let price = report
            .required(Field::Price, self.price)
            .and_then(|p| report.positive(Field::Price, p))
            .and_then(Money::new);
        let security_deposit = self.security_deposit.and_then(|d| {
            let deposit = Money::new(d);
            if deposit.is_none() {
                report.fail(Field::SecurityDeposit, Reason::Negative);
            }
            deposit
        });

        match (title, purpose, kind, sub_type, price) {
            (
                Some(title),
                Some(purpose),
                Some(kind),
                Some(sub_type),
                Some(price),
            ) if report.is_clean() =>
            {
                Ok(BasicDetails {
                    title,
                    purpose,
                    kind,
                    sub_type,
                    price,
                    security_deposit,
                })
            }
            _ => Err(report.into_violations()),
        }
    }

    /// Validates [`Step::Location`].
    fn location(&self) -> Result<Location, Vec<Violation>> {
        let mut report = Report::default();

        let city = report.text(Field::City, self.city.as_deref(), City::new);
        let locality = report.text(
            Field::Locality,
            self.locality.as_deref(),
            Locality::new,
        );
        let sub_locality = report.optional_text(
            Field::SubLocality,
            self.sub_locality.as_deref(),
            SubLocality::new,
        );
        let society = report.optional_text(
            Field::Society,
            self.society.as_deref(),
            Society::new,
        );
        let address =
            report.text(Field::Address, self.address.as_deref(), Address::new);
        let pincode =
            report.text(Field::Pincode, self.pincode.as_deref(), Pincode::new);

        match (city, locality, address, pincode) {
            (Some(city), Some(locality), Some(address), Some(pincode))
                if report.is_clean() =>
            {
                Ok(Location {
                    city,
                    locality,
                    sub_locality,
                    society,
                    address,
                    pincode,
                })
            }
            _ => Err(report.into_violations()),
        }
    }

    /// Validates [`Step::Profile`].
    fn profile(&self) -> Result<Details, Vec<Violation>> {
        let mut report = Report::default();

        let unit = self.area_unit.unwrap_or(AreaUnit::SqFt);
        let area = report
            .required(Field::Area, self.area)
            .and_then(|a| report.positive(Field::Area, a))
            .and_then(|a| {
                let area = Area::new(a, unit);
                if area.is_none() {
                    report.fail(Field::Area, Reason::Invalid);
                }
                area
            });

        let requires_rooms = self.sub_type.map_or(
            self.kind == Some(Kind::Residential),
            SubType::requires_rooms,
        );
        if requires_rooms {
            _ = report.required(Field::Bedrooms, self.bedrooms);
            _ = report.required(Field::Bathrooms, self.bathrooms);
            _ = report.required(Field::Furnishing, self.furnishing);
        }

        if let (Some(floor), Some(total)) = (self.floor, self.total_floors) {
            if floor > total {
                report.fail(Field::Floor, Reason::AboveTotalFloors);
            }
        }

        match area {
            Some(area) if report.is_clean() => Ok(Details {
                bedrooms: self.bedrooms.map(RoomCount::from),
                bathrooms: self.bathrooms.map(RoomCount::from),
                balconies: self.balconies.map(RoomCount::from),
                area,
                furnishing: self.furnishing,
                age: self.age,
                facing: self.facing,
                covered_parking: self.covered_parking.unwrap_or_default(),
                open_parking: self.open_parking.unwrap_or_default(),
                floor: self.floor,
                total_floors: self.total_floors,
            }),
            _ => Err(report.into_violations()),
        }
    }

    /// Validates [`Step::Media`].
    fn media(&self) -> Result<Media, Vec<Violation>> {
        let mut report = Report::default();

        if self.images.is_empty() {
            report.fail(Field::Images, Reason::Missing);
        } else if self.images.len() > Self::MAX_IMAGES {
            report.fail(Field::Images, Reason::TooMany);
        }
        let images = self
            .images
            .iter()
            .map(|url| ImageUrl::new(url.trim()))
            .collect::<Option<Vec<_>>>();
        if images.is_none() {
            report.fail(Field::Images, Reason::Invalid);
        }
        let video = report.optional_text(
            Field::Video,
            self.video.as_deref(),
            VideoUrl::new,
        );

        match images {
            Some(images) if report.is_clean() => Ok(Media { images, video }),
            _ => Err(report.into_violations()),
        }
    }

    /// Validates [`Step::AdditionalDetails`].
    fn additional_details(&self) -> Result<AdditionalDetails, Vec<Violation>> {
        let mut report = Report::default();

        let description = report
            .text(Field::Description, self.description.as_deref(), Some)
            .and_then(|d| {
                if d.chars().count() < Self::MIN_DESCRIPTION_LEN {
                    report.fail(Field::Description, Reason::TooShort);
                    return None;
                }
                let description = Description::new(d);
                if description.is_none() {
                    report.fail(Field::Description, Reason::Invalid);
                }
                description
            });
        let available_from =
            report.required(Field::AvailableFrom, self.available_from);
        let amenities = self
            .amenities
            .iter()
            .filter(|a| !a.trim().is_empty())
            .map(Amenity::new)
            .collect::<Option<Amenities>>();
        if amenities.is_none() {
            report.fail(Field::Amenities, Reason::Invalid);
        }
        let terms = report.optional_text(
            Field::Terms,
            self.terms.as_deref(),
            Terms::new,
        );

        match (description, available_from, amenities) {
            (Some(description), Some(available_from), Some(amenities))
                if report.is_clean() =>
            {
                Ok(AdditionalDetails {
                    description,
                    available_from,
                    amenities,
                    terms,
                })
            }
            _ => Err(report.into_violations()),
        }
    }
}

impl From<&Property> for Draft {
    fn from(property: &Property) -> Self {
        let Property {
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
            ..
        } = property;

        Self {
            title: Some(title.to_string()),
            purpose: Some(*purpose),
            kind: Some(*kind),
            sub_type: Some(*sub_type),
            price: Some(price.amount()),
            security_deposit: security_deposit.map(|d| d.amount()),
            city: Some(location.city.to_string()),
            locality: Some(location.locality.to_string()),
            sub_locality: location
                .sub_locality
                .as_ref()
                .map(ToString::to_string),
            society: location.society.as_ref().map(ToString::to_string),
            address: Some(location.address.to_string()),
            pincode: Some(location.pincode.to_string()),
            bedrooms: details.bedrooms.map(RoomCount::get),
            bathrooms: details.bathrooms.map(RoomCount::get),
            balconies: details.balconies.map(RoomCount::get),
            area: Some(details.area.value()),
            area_unit: Some(details.area.unit()),
            furnishing: details.furnishing,
            age: details.age,
            facing: details.facing,
            covered_parking: Some(details.covered_parking),
            open_parking: Some(details.open_parking),
            floor: details.floor,
            total_floors: details.total_floors,
            images: images.iter().map(ToString::to_string).collect(),
            video: video.as_ref().map(ToString::to_string),
            description: description.as_ref().map(ToString::to_string),
            amenities: amenities.iter().map(ToString::to_string).collect(),
            available_from: *available_from,
            terms: terms.as_ref().map(ToString::to_string),
        }
    }
}

/// Complete and valid contents of a [`Property`] listing, produced out of a
/// [`Draft`] passing every [`Step`].
#[derive(Clone, Debug)]
pub struct Listing {
    /// [`Title`] of the listing.
    pub title: Title,

    /// [`Purpose`] of the listing.
    pub purpose: Purpose,

    /// [`Kind`] of the [`Property`].
    pub kind: Kind,

    /// [`SubType`] of the [`Property`].
    pub sub_type: SubType,

    /// Asked price.
    pub price: Money,

    /// Security deposit, if any.
    pub security_deposit: Option<Money>,

    /// [`Location`] of the [`Property`].
    pub location: Location,

    /// [`Details`] of the [`Property`].
    pub details: Details,

    /// [`Amenities`] of the [`Property`].
    pub amenities: Amenities,

    /// [`Description`] of the [`Property`].
    pub description: Description,

    /// Images of the [`Property`].
    pub images: Vec<ImageUrl>,

    /// Video tour of the [`Property`].
    pub video: Option<VideoUrl>,

    /// [`AvailabilityDate`] of the [`Property`].
    pub available_from: AvailabilityDate,

    /// [`Terms`] of the [`Property`].
    pub terms: Option<Terms>,
}

/// Validated [`Step::BasicDetails`] fields.
#[derive(Debug)]
struct BasicDetails {
    title: Title,
    purpose: Purpose,
    kind: Kind,
    sub_type: SubType,
    price: Money,
    security_deposit: Option<Money>,
}

/// Validated [`Step::Media`] fields.
#[derive(Debug)]
struct Media {
    images: Vec<ImageUrl>,
    video: Option<VideoUrl>,
}

/// Validated [`Step::AdditionalDetails`] fields.
#[derive(Debug)]
struct AdditionalDetails {
    description: Description,
    available_from: AvailabilityDate,
    amenities: Amenities,
    terms: Option<Terms>,
}

/// Accumulator of [`Violation`]s found while validating a [`Step`].
#[derive(Debug, Default)]
struct Report(Vec<Violation>);

impl Report {
    /// Records a new [`Violation`].
    fn fail(&mut self, field: Field, reason: Reason) {
        self.0.push(Violation { field, reason });
    }

    /// Indicates whether no [`Violation`]s have been recorded.
    fn is_clean(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the recorded [`Violation`]s.
    fn into_violations(self) -> Vec<Violation> {
        self.0
    }

    /// Requires the provided `value` to be present.
    fn required<T>(&mut self, field: Field, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.fail(field, Reason::Missing);
        }
        value
    }

    /// Requires the provided `value` to be greater than zero.
    fn positive(&mut self, field: Field, value: Decimal) -> Option<Decimal> {
        if value <= Decimal::ZERO {
            self.fail(field, Reason::NotPositive);
            return None;
        }
        Some(value)
    }

    /// Requires the provided text to be present and non-blank, and parses it
    /// after trimming.
    fn text<'v, T>(
        &mut self,
        field: Field,
        value: Option<&'v str>,
        parse: impl FnOnce(&'v str) -> Option<T>,
    ) -> Option<T> {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        let Some(value) = self.required(field, value) else {
            return None;
        };
        let parsed = parse(value);
        if parsed.is_none() {
            self.fail(field, Reason::Invalid);
        }
        parsed
    }

    /// Parses the provided optional text after trimming, treating a blank
    /// one as absent.
    fn optional_text<'v, T>(
        &mut self,
        field: Field,
        value: Option<&'v str>,
        parse: impl FnOnce(&'v str) -> Option<T>,
    ) -> Option<T> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        let parsed = parse(value);
        if parsed.is_none() {
            self.fail(field, Reason::Invalid);
        }
        parsed
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::domain::property::{
        fixture, AreaUnit, Kind, Purpose, Score, SubType,
    };

    use super::{Draft, Field, Reason, Step, Violation};

    fn violated(draft: &Draft, step: Step) -> Vec<(Field, Reason)> {
        draft
            .validate(step)
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(|Violation { field, reason }| (field, reason))
            .collect()
    }

    #[test]
    fn navigates_steps() {
        assert_eq!(Step::BasicDetails.next(), Some(Step::Location));
        assert_eq!(Step::AdditionalDetails.next(), None);
        assert_eq!(Step::BasicDetails.prev(), None);
        assert_eq!(Step::Media.prev(), Some(Step::Profile));
        assert_eq!(Step::ALL.len(), Step::COUNT);
        assert_eq!(Step::Profile.index(), 2);
    }

    #[test]
    fn empty_draft_fails_every_step() {
        let draft = Draft::default();

        assert_eq!(
            violated(&draft, Step::BasicDetails),
            [
                (Field::Title, Reason::Missing),
                (Field::Purpose, Reason::Missing),
                (Field::Kind, Reason::Missing),
                (Field::SubType, Reason::Missing),
                (Field::Price, Reason::Missing),
            ],
        );
        for step in Step::ALL {
            assert!(draft.validate(*step).is_err(), "{step} passed");
        }
        assert_eq!(draft.completed_sections(), [false; Step::COUNT]);
        assert_eq!(draft.score(), Score::default());
    }

    #[test]
    fn validates_basic_details() {
        let mut draft = fixture::draft();
        assert!(draft.validate(Step::BasicDetails).is_ok());

        draft.title = Some("   ".into());
        draft.kind = Some(Kind::Commercial);
        draft.price = Some(Decimal::ZERO);
        draft.security_deposit = Some(Decimal::from(-1));
        assert_eq!(
            violated(&draft, Step::BasicDetails),
            [
                (Field::Title, Reason::Missing),
                (Field::SubType, Reason::KindMismatch),
                (Field::Price, Reason::NotPositive),
                (Field::SecurityDeposit, Reason::Negative),
            ],
        );
    }

    #[test]
    fn validates_location() {
        let mut draft = fixture::draft();
        assert!(draft.validate(Step::Location).is_ok());

        draft.pincode = Some("012345".into());
        draft.city = None;
        draft.society = Some("  ".into());
        assert_eq!(
            violated(&draft, Step::Location),
            [
                (Field::City, Reason::Missing),
                (Field::Pincode, Reason::Invalid),
            ],
        );
    }

    #[test]
    fn requires_rooms_for_residential_buildings_only() {
        let mut draft = fixture::draft();
        draft.bedrooms = None;
        draft.bathrooms = None;
        draft.furnishing = None;
        assert_eq!(
            violated(&draft, Step::Profile),
            [
                (Field::Bedrooms, Reason::Missing),
                (Field::Bathrooms, Reason::Missing),
                (Field::Furnishing, Reason::Missing),
            ],
        );

        draft.sub_type = Some(SubType::Plot);
        assert!(draft.validate(Step::Profile).is_ok());

        draft.kind = Some(Kind::Commercial);
        draft.sub_type = Some(SubType::Office);
        assert!(draft.validate(Step::Profile).is_ok());
    }

    #[test]
    fn validates_profile_numbers() {
        let mut draft = fixture::draft();
        draft.area = Some(Decimal::ZERO);
        draft.floor = Some(12);
        draft.total_floors = Some(10);
        assert_eq!(
            violated(&draft, Step::Profile),
            [
                (Field::Area, Reason::NotPositive),
                (Field::Floor, Reason::AboveTotalFloors),
            ],
        );

        draft.area = None;
        draft.floor = Some(10);
        assert_eq!(
            violated(&draft, Step::Profile),
            [(Field::Area, Reason::Missing)],
        );

        draft.area = Some(Decimal::from_i128_with_scale(10_i128.pow(27), 0));
        draft.area_unit = Some(AreaUnit::Acre);
        assert_eq!(
            violated(&draft, Step::Profile),
            [(Field::Area, Reason::Invalid)],
        );
    }

    #[test]
    fn validates_media() {
        let mut draft = fixture::draft();
        assert!(draft.validate(Step::Media).is_ok());

        draft.images.clear();
        assert_eq!(
            violated(&draft, Step::Media),
            [(Field::Images, Reason::Missing)],
        );

        draft.images = (0..=Draft::MAX_IMAGES)
            .map(|i| format!("https://cdn.example.com/{i}.jpg"))
            .collect();
        assert_eq!(
            violated(&draft, Step::Media),
            [(Field::Images, Reason::TooMany)],
        );

        draft.images = vec!["not a url".into()];
        draft.video = Some("youtube".into());
        assert_eq!(
            violated(&draft, Step::Media),
            [(Field::Images, Reason::Invalid), (Field::Video, Reason::Invalid)],
        );
    }

    #[test]
    fn validates_additional_details() {
        let mut draft = fixture::draft();
        assert!(draft.validate(Step::AdditionalDetails).is_ok());

        draft.description = Some("Too short to tell anything".into());
        draft.available_from = None;
        assert_eq!(
            violated(&draft, Step::AdditionalDetails),
            [
                (Field::Description, Reason::TooShort),
                (Field::AvailableFrom, Reason::Missing),
            ],
        );
    }

    #[test]
    fn scores_completed_sections() {
        let mut draft = fixture::draft();
        assert_eq!(draft.score(), Score::MAX);

        draft.images.clear();
        draft.pincode = None;
        assert_eq!(
            draft.completed_sections(),
            [true, false, true, false, true],
        );
        assert_eq!(draft.score().get(), 60);
    }

    #[test]
    fn builds_listing_from_valid_draft() {
        let listing = fixture::draft().listing().unwrap();

        assert_eq!(listing.purpose, Purpose::Sell);
        assert_eq!(listing.sub_type, SubType::Apartment);
        assert_eq!(listing.images.len(), 1);
        assert_eq!(listing.location.pincode.to_string(), "560038");
    }

    #[test]
    fn collects_violations_of_all_steps() {
        let mut draft = fixture::draft();
        draft.title = None;
        draft.images.clear();

        let violations = draft.listing().unwrap_err();
        assert_eq!(
            violations.iter().map(|v| v.field).collect::<Vec<_>>(),
            [Field::Title, Field::Images],
        );
        assert_eq!(violations[0].to_string(), "`title` is required");
    }

    #[test]
    fn round_trips_property() {
        let property = fixture::property("Round trip");
        let draft = Draft::from(&property);

        assert_eq!(draft.score(), Score::MAX);
        assert_eq!(draft.title.as_deref(), Some("Round trip"));
        assert_eq!(property.score(), Score::MAX);
    }
}
