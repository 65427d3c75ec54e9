//! [`Money`]-related definitions.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Amount of Indian rupees.
///
/// Never negative.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd,
)]
pub struct Money(Decimal);

impl Money {
    /// Zero [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Currency code every [`Money`] amount is expressed in.
    pub const CURRENCY: &'static str = "INR";

    /// One lakh (`1,00,000`) rupees.
    const LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

    /// One crore (`1,00,00,000`) rupees.
    const CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

    /// Creates a new [`Money`] if the provided `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative() || amount.is_zero())
            .then(|| Self(amount.normalize()))
    }

    /// Returns the amount of rupees.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] is greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns a human-friendly representation using lakh and crore units,
    /// like `₹1.25 Cr`, `₹45 L` or `₹45,000`.
    #[must_use]
    pub fn compact(&self) -> String {
        let amount = self.0;
        if amount >= Self::CRORE {
            format!("₹{} Cr", (amount / Self::CRORE).round_dp(2).normalize())
        } else if amount >= Self::LAKH {
            format!("₹{} L", (amount / Self::LAKH).round_dp(2).normalize())
        } else {
            let rupees = amount.round().to_u64().unwrap_or_default();
            if rupees >= 1000 {
                format!("₹{},{:03}", rupees / 1000, rupees % 1000)
            } else {
                format!("₹{rupees}")
            }
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.normalize(), Self::CURRENCY)
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix(Self::CURRENCY).unwrap_or(s);
        let s = s.strip_prefix('₹').unwrap_or(s).trim();
        if s.is_empty() {
            return Err("empty amount");
        }

        let amount = Decimal::from_str(&s.replace(',', ""))
            .map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

impl TryFrom<Decimal> for Money {
    type Error = &'static str;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or("negative amount")
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Money {
    accepts!(NUMERIC);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        Self::new(Decimal::from_sql(ty, raw)?)
            .ok_or_else(|| "negative `Money` amount".into())
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Money {
    accepts!(NUMERIC);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Amount of Indian rupees in `{major}.{minor}INR` format, where the
    /// `INR` suffix is optional on input and `minor` part may be omitted.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn money(s: &str) -> Money {
        Money::new(s.parse::<Decimal>().unwrap()).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("123.45INR").unwrap(), money("123.45"));
        assert_eq!(Money::from_str("123.45").unwrap(), money("123.45"));
        assert_eq!(Money::from_str("₹ 15,00,000").unwrap(), money("1500000"));
        assert_eq!(Money::from_str("0").unwrap(), Money::ZERO);

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("INR").is_err());
        assert!(Money::from_str("-5INR").is_err());
        assert!(Money::from_str("12USD").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(money("123.45").to_string(), "123.45INR");
        assert_eq!(money("123.00").to_string(), "123INR");
        assert_eq!(money("123").to_string(), "123INR");
    }

    #[test]
    fn compact() {
        assert_eq!(money("12500000").compact(), "₹1.25 Cr");
        assert_eq!(money("10000000").compact(), "₹1 Cr");
        assert_eq!(money("4500000").compact(), "₹45 L");
        assert_eq!(money("150000").compact(), "₹1.5 L");
        assert_eq!(money("45000").compact(), "₹45,000");
        assert_eq!(money("1005").compact(), "₹1,005");
        assert_eq!(money("999").compact(), "₹999");
    }

    #[test]
    fn ordering() {
        assert!(money("100") < money("100.5"));
        assert!(Money::ZERO < money("1"));
        assert!(!Money::ZERO.is_positive());
        assert!(money("0.01").is_positive());
    }
}
