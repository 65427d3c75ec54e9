//! [`Filter`] engine selecting [`Property`] records.

use std::{borrow::Borrow, cmp::Ordering};

use common::{define_kind, Money};
use derive_more::{AsRef, Display};

use crate::domain::{user, Property};

use super::{Amenity, Area, Furnishing, Kind, Purpose, RoomCount, SubType};

/// Criteria a [`Property`] should satisfy.
///
/// Every supplied criterion must hold; absent (`None` or empty) criteria
/// always hold.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    /// Required [`Purpose`].
    pub purpose: Option<Purpose>,

    /// Required [`Kind`].
    pub kind: Option<Kind>,

    /// Allowed [`SubType`]s.
    pub sub_types: Vec<SubType>,

    /// Allowed bedroom counts.
    pub bedrooms: Vec<RoomCount>,

    /// Allowed bathroom counts.
    pub bathrooms: Vec<RoomCount>,

    /// Allowed [`Furnishing`] statuses.
    pub furnishing: Vec<Furnishing>,

    /// Allowed price [`Range`].
    pub price: Range<Money>,

    /// Allowed [`Area`] [`Range`], compared in square feet.
    pub area: Range<Area>,

    /// Allowed [`user::Kind`]s of the poster.
    pub posted_by: Vec<user::Kind>,

    /// [`Amenity`]s every matching [`Property`] must provide.
    pub amenities: Vec<Amenity>,

    /// Free-text [`SearchQuery`].
    pub query: Option<SearchQuery>,

    /// Indicator whether only verified [`Property`]s match.
    pub verified_only: bool,
}

impl Filter {
    /// Indicates whether this [`Filter`] has no criteria at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            purpose,
            kind,
            sub_types,
            bedrooms,
            bathrooms,
            furnishing,
            price,
            area,
            posted_by,
            amenities,
            query,
            verified_only,
        } = self;

        purpose.is_none()
            && kind.is_none()
            && sub_types.is_empty()
            && bedrooms.is_empty()
            && bathrooms.is_empty()
            && furnishing.is_empty()
            && price.is_unbounded()
            && area.is_unbounded()
            && posted_by.is_empty()
            && amenities.is_empty()
            && query.is_none()
            && !verified_only
    }

    /// Checks whether the provided [`Property`] satisfies this [`Filter`].
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        let details = &property.details;

        self.purpose.map_or(true, |p| p == property.purpose)
            && self.kind.map_or(true, |k| k == property.kind)
            && any_of(&self.sub_types, Some(&property.sub_type))
            && rooms(&self.bedrooms, details.bedrooms)
            && rooms(&self.bathrooms, details.bathrooms)
            && any_of(&self.furnishing, details.furnishing.as_ref())
            && self.price.contains(&property.price)
            && self
                .area
                .map(|a| a.in_sq_ft())
                .contains(&details.area.in_sq_ft())
            && any_of(&self.posted_by, Some(&property.posted_by.kind))
            && self
                .amenities
                .iter()
                .all(|a| property.amenities.contains(a))
            && self.query.as_ref().map_or(true, |q| q.matches(property))
            && (!self.verified_only || property.verified)
    }

    /// Lazily keeps the provided records matching this [`Filter`].
    pub fn apply<'f, I, P>(&'f self, records: I) -> impl Iterator<Item = P> + 'f
    where
        I: IntoIterator<Item = P>,
        I::IntoIter: 'f,
        P: Borrow<Property> + 'f,
    {
        records.into_iter().filter(move |p| self.matches(p.borrow()))
    }
}

/// Checks an any-of criterion: empty `allowed` accepts everything, while a
/// missing `actual` value fails a non-empty criterion.
fn any_of<T: PartialEq>(allowed: &[T], actual: Option<&T>) -> bool {
    allowed.is_empty() || actual.is_some_and(|v| allowed.contains(v))
}

/// Checks a [`RoomCount`] criterion, treating [`RoomCount::MAX_EXACT`] as
/// "that many or more".
fn rooms(allowed: &[RoomCount], actual: Option<RoomCount>) -> bool {
    allowed.is_empty()
        || actual.is_some_and(|v| allowed.iter().any(|r| v.satisfies(*r)))
}

/// Inclusive range with optionally open bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Range<T> {
    /// Lower bound, inclusive.
    pub min: Option<T>,

    /// Upper bound, inclusive.
    pub max: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T> Range<T> {
    /// Indicates whether both bounds of this [`Range`] are open.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Maps the bounds of this [`Range`] with the provided function.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Range<U> {
        Range {
            min: self.min.map(&mut f),
            max: self.max.map(f),
        }
    }

    /// Checks whether the provided `value` lies within this [`Range`].
    ///
    /// A [`Range`] with `min` above `max` contains nothing.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialOrd,
    {
        self.min.as_ref().map_or(true, |min| value >= min)
            && self.max.as_ref().map_or(true, |max| value <= max)
    }
}

/// Free-text search over a [`Property`] title, description, city, locality
/// and society.
///
/// Matching is case-insensitive substring search.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(forward)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Creates a new [`SearchQuery`] out of the provided `input`, unless it's
    /// blank.
    #[must_use]
    pub fn new(input: impl AsRef<str>) -> Option<Self> {
        let query = input.as_ref().trim();
        (!query.is_empty()).then(|| Self(query.to_lowercase()))
    }

    /// Checks whether the provided [`Property`] contains this
    /// [`SearchQuery`] in any of its searchable fields.
    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        let location = &property.location;
        let fields: [Option<&str>; 5] = [
            Some(property.title.as_ref()),
            property.description.as_ref().map(AsRef::as_ref),
            Some(location.city.as_ref()),
            Some(location.locality.as_ref()),
            location.society.as_ref().map(AsRef::as_ref),
        ];
        fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}

define_kind! {
    #[doc = "Order of [`Property`] records."]
    enum Sort {
        #[doc = "Most recently created first."]
        Newest = 1,

        #[doc = "Least recently created first."]
        Oldest = 2,

        #[doc = "Cheapest first."]
        PriceLowToHigh = 3,

        #[doc = "Most expensive first."]
        PriceHighToLow = 4,

        #[doc = "Most viewed first."]
        MostViewed = 5,

        #[doc = "Most complete listing first."]
        BestScore = 6,
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::Newest
    }
}

impl Sort {
    /// Compares the provided [`Property`]s according to this [`Sort`].
    ///
    /// Ties are broken by [`Property`] ID, so the order is total and stable
    /// across calls.
    #[must_use]
    pub fn compare(self, a: &Property, b: &Property) -> Ordering {
        match self {
            Self::Newest => b.created_at.cmp(&a.created_at),
            Self::Oldest => a.created_at.cmp(&b.created_at),
            Self::PriceLowToHigh => a.price.cmp(&b.price),
            Self::PriceHighToLow => b.price.cmp(&a.price),
            Self::MostViewed => b.views.cmp(&a.views),
            Self::BestScore => b.score().cmp(&a.score()),
        }
        .then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;
    use rust_decimal::Decimal;

    use crate::domain::{
        property::{
            fixture::property, Amenity, Area, AreaUnit, Furnishing, Kind,
            Purpose, RoomCount, SubType, Views,
        },
        user, Property,
    };

    use super::{Filter, Range, SearchQuery, Sort};

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn matching<'p>(filter: &Filter, records: &'p [Property]) -> Vec<&'p str> {
        filter
            .apply(records)
            .map(|p: &'p Property| -> &'p str { p.title.as_ref() })
            .collect()
    }

    fn records() -> Vec<Property> {
        let mut villa = property("Sea facing villa");
        villa.sub_type = SubType::Villa;
        villa.price = money("45000000");
        villa.details.bedrooms = Some(RoomCount::from(5));
        villa.details.furnishing = Some(Furnishing::Furnished);
        villa.details.area =
            Area::new(Decimal::from(500), AreaUnit::SqYd).unwrap();
        villa.amenities = ["pool", "gym", "power backup"]
            .map(|a| Amenity::new(a).unwrap())
            .into();
        villa.verified = true;

        let mut flat = property("Cozy flat near metro");
        flat.purpose = Purpose::Rent;
        flat.price = money("25000");
        flat.details.bedrooms = Some(RoomCount::from(2));
        flat.details.furnishing = Some(Furnishing::SemiFurnished);
        flat.amenities = ["gym"].map(|a| Amenity::new(a).unwrap()).into();
        flat.posted_by.kind = user::Kind::Agent;

        let mut plot = property("Corner plot");
        plot.sub_type = SubType::Plot;
        plot.price = money("3000000");
        plot.details.bedrooms = None;
        plot.details.bathrooms = None;
        plot.details.furnishing = None;
        plot.location.society = None;

        let mut shop = property("High street shop");
        shop.kind = Kind::Commercial;
        shop.sub_type = SubType::Shop;
        shop.purpose = Purpose::Rent;
        shop.price = money("90000");
        shop.details.bedrooms = None;
        shop.details.furnishing = None;
        shop.posted_by.kind = user::Kind::Builder;

        vec![villa, flat, plot, shop]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let records = records();
        let filter = Filter::default();

        assert!(filter.is_empty());
        assert_eq!(matching(&filter, &records).len(), records.len());
        assert_eq!(filter.apply(Vec::<Property>::new()).count(), 0);
    }

    #[test]
    fn matches_purpose_and_kind() {
        let records = records();

        let filter = Filter {
            purpose: Some(Purpose::Rent),
            ..Filter::default()
        };
        assert!(!filter.is_empty());
        assert_eq!(
            matching(&filter, &records),
            ["Cozy flat near metro", "High street shop"],
        );

        let filter = Filter {
            purpose: Some(Purpose::Rent),
            kind: Some(Kind::Residential),
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records), ["Cozy flat near metro"]);
    }

    #[test]
    fn matches_any_of_sub_types() {
        let filter = Filter {
            sub_types: vec![SubType::Villa, SubType::Plot],
            ..Filter::default()
        };
        assert_eq!(
            matching(&filter, &records()),
            ["Sea facing villa", "Corner plot"],
        );
    }

    #[test]
    fn matches_bedrooms_with_plus_bucket() {
        let records = records();

        let filter = Filter {
            bedrooms: vec![RoomCount::from(RoomCount::MAX_EXACT)],
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records), ["Sea facing villa"]);

        let filter = Filter {
            bedrooms: vec![RoomCount::from(1), RoomCount::from(2)],
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records), ["Cozy flat near metro"]);
    }

    #[test]
    fn missing_attribute_fails_criterion() {
        let filter = Filter {
            furnishing: vec![
                Furnishing::Furnished,
                Furnishing::SemiFurnished,
                Furnishing::Unfurnished,
            ],
            ..Filter::default()
        };
        let records = records();
        let matched = matching(&filter, &records);

        assert!(!matched.contains(&"Corner plot"));
        assert!(!matched.contains(&"High street shop"));
    }

    #[test]
    fn matches_inclusive_price_range() {
        let records = records();

        let filter = Filter {
            price: Range {
                min: Some(money("25000")),
                max: Some(money("3000000")),
            },
            ..Filter::default()
        };
        assert_eq!(
            matching(&filter, &records),
            ["Cozy flat near metro", "Corner plot", "High street shop"],
        );

        let filter = Filter {
            price: Range {
                min: Some(money("100000")),
                max: None,
            },
            ..Filter::default()
        };
        assert_eq!(
            matching(&filter, &records),
            ["Sea facing villa", "Corner plot"],
        );

        let filter = Filter {
            price: Range {
                min: Some(money("100000")),
                max: Some(money("1000")),
            },
            ..Filter::default()
        };
        assert!(matching(&filter, &records).is_empty());
    }

    #[test]
    fn matches_area_across_units() {
        let filter = Filter {
            area: Range {
                min: Area::new(Decimal::from(4000), AreaUnit::SqFt),
                max: Area::new(Decimal::ONE, AreaUnit::Acre),
            },
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records()), ["Sea facing villa"]);
    }

    #[test]
    fn matches_huge_areas() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        assert!(Area::new(huge, AreaUnit::Acre).is_none());

        let mut records = records();
        records[0].details.area =
            Area::new(Decimal::MAX, AreaUnit::SqFt).unwrap();

        let filter = Filter {
            area: Range {
                min: None,
                max: Area::new(Decimal::from(1000), AreaUnit::Acre),
            },
            ..Filter::default()
        };
        assert!(!matching(&filter, &records).contains(&"Sea facing villa"));

        let filter = Filter {
            area: Range {
                min: Area::new(huge, AreaUnit::SqFt),
                max: None,
            },
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records), ["Sea facing villa"]);
    }

    #[test]
    fn matches_poster_kind() {
        let filter = Filter {
            posted_by: vec![user::Kind::Agent, user::Kind::Builder],
            ..Filter::default()
        };
        assert_eq!(
            matching(&filter, &records()),
            ["Cozy flat near metro", "High street shop"],
        );
    }

    #[test]
    fn requires_all_amenities() {
        let records = records();

        let filter = Filter {
            amenities: vec![Amenity::new("gym").unwrap()],
            ..Filter::default()
        };
        assert_eq!(
            matching(&filter, &records),
            ["Sea facing villa", "Cozy flat near metro"],
        );

        let filter = Filter {
            amenities: vec![
                Amenity::new("Gym").unwrap(),
                Amenity::new("Pool").unwrap(),
            ],
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records), ["Sea facing villa"]);
    }

    #[test]
    fn searches_case_insensitively() {
        let records = records();

        let filter = Filter {
            query: SearchQuery::new("  METRO "),
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records), ["Cozy flat near metro"]);

        let filter = Filter {
            query: SearchQuery::new("green meadows"),
            ..Filter::default()
        };
        assert_eq!(
            matching(&filter, &records),
            ["Sea facing villa", "Cozy flat near metro", "High street shop"],
        );

        let filter = Filter {
            query: SearchQuery::new("indiranagar"),
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records).len(), records.len());
    }

    #[test]
    fn blank_query_is_absent() {
        assert!(SearchQuery::new("   ").is_none());
        assert!(SearchQuery::new("").is_none());
    }

    #[test]
    fn combines_criteria_conjunctively() {
        let filter = Filter {
            purpose: Some(Purpose::Sell),
            amenities: vec![Amenity::new("gym").unwrap()],
            verified_only: true,
            ..Filter::default()
        };
        assert_eq!(matching(&filter, &records()), ["Sea facing villa"]);

        let filter = Filter {
            purpose: Some(Purpose::Rent),
            verified_only: true,
            ..Filter::default()
        };
        assert!(matching(&filter, &records()).is_empty());
    }

    #[test]
    fn sorts_with_id_tiebreak() {
        let mut records = records();
        records[1].views = Views::from(10);
        records[3].views = Views::from(3);

        let titles = |records: &[Property]| {
            records.iter().map(|p| p.title.to_string()).collect::<Vec<_>>()
        };

        records.sort_by(|a, b| Sort::PriceLowToHigh.compare(a, b));
        assert_eq!(
            titles(&records),
            [
                "Cozy flat near metro",
                "High street shop",
                "Corner plot",
                "Sea facing villa",
            ],
        );

        records.sort_by(|a, b| Sort::PriceHighToLow.compare(a, b));
        assert_eq!(titles(&records)[0], "Sea facing villa");

        records.sort_by(|a, b| Sort::MostViewed.compare(a, b));
        assert_eq!(
            titles(&records)[..2],
            ["Cozy flat near metro", "High street shop"],
        );

        let mut twins = vec![property("Twin"), property("Twin")];
        twins[1].created_at = twins[0].created_at;
        let mut reversed = twins.clone();
        reversed.reverse();
        twins.sort_by(|a, b| Sort::Newest.compare(a, b));
        reversed.sort_by(|a, b| Sort::Newest.compare(a, b));
        assert_eq!(twins[0].id, reversed[0].id);
        assert!(twins[0].id < twins[1].id);
    }

    #[test]
    fn defaults_to_newest() {
        assert_eq!(Sort::default(), Sort::Newest);
    }
}
