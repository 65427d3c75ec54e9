//! [`User`] definitions.

pub mod session;

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use argon2::{
    password_hash::{PasswordHasher as _, PasswordVerifier as _, SaltString},
    Argon2,
};
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rand::rngs::OsRng;
use regex::Regex;
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Inquiry, Property, SavedSearch};
use crate::domain::{inquiry, property, saved_search};

pub use self::session::Session;

/// Marketplace user.
#[derive(Clone, Debug)]
pub struct User {
    /// ID of this [`User`]
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Email`] of this [`User`], used to log in.
    pub email: Email,

    /// [`PasswordHash`] of this [`User`].
    pub password_hash: PasswordHash,

    /// [`Phone`] of this [`User`].
    pub phone: Option<Phone>,

    /// [`Kind`] of this [`User`].
    pub kind: Kind,

    /// [`Avatar`] of this [`User`].
    pub avatar: Option<Avatar>,

    /// [`Property`]s saved by this [`User`], in saving order.
    pub saved_properties: Vec<property::Id>,

    /// [`Property`]s listed by this [`User`], in listing order.
    pub listed_properties: Vec<property::Id>,

    /// [`Inquiry`]s sent by this [`User`].
    pub inquiries: Vec<inquiry::Id>,

    /// [`SavedSearch`]es of this [`User`].
    pub saved_searches: Vec<saved_search::Id>,

    /// [`DateTime`] when this [`User`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`User`] was last modified.
    pub updated_at: ModificationDateTime,

    /// [`DateTime`] when this [`User`] was deleted.
    pub deleted_at: Option<DeletionDateTime>,
}

impl User {
    /// Applies the provided [`ListChange`] to the ID lists of this [`User`].
    ///
    /// Returns whether any list has been modified.
    pub fn apply(&mut self, change: ListChange) -> bool {
        match change {
            ListChange::ListProperty(id) => {
                push_unique(&mut self.listed_properties, id)
            }
            ListChange::UnlistProperty(id) => {
                remove(&mut self.listed_properties, id)
            }
            ListChange::ToggleSavedProperty(id) => {
                if !remove(&mut self.saved_properties, id) {
                    self.saved_properties.push(id);
                }
                true
            }
            ListChange::AddInquiry(id) => push_unique(&mut self.inquiries, id),
            ListChange::AddSavedSearch(id) => {
                push_unique(&mut self.saved_searches, id)
            }
            ListChange::RemoveSavedSearch(id) => {
                remove(&mut self.saved_searches, id)
            }
        }
    }

    /// Indicates whether this [`User`] has saved the [`Property`] with the
    /// provided ID.
    #[must_use]
    pub fn has_saved(&self, property_id: property::Id) -> bool {
        self.saved_properties.contains(&property_id)
    }
}

/// Pushes the provided `id` unless it's present already.
fn push_unique<T: PartialEq>(ids: &mut Vec<T>, id: T) -> bool {
    if ids.contains(&id) {
        return false;
    }
    ids.push(id);
    true
}

/// Removes the provided `id`, returning whether it was present.
fn remove<T: PartialEq>(ids: &mut Vec<T>, id: T) -> bool {
    let len = ids.len();
    ids.retain(|i| *i != id);
    ids.len() != len
}

/// Change of the ID lists a [`User`] keeps.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListChange {
    /// [`Property`] has been listed by the [`User`].
    ListProperty(property::Id),

    /// [`Property`] has been removed by the [`User`].
    UnlistProperty(property::Id),

    /// [`Property`] has been saved or unsaved by the [`User`].
    ToggleSavedProperty(property::Id),

    /// [`Inquiry`] has been sent by the [`User`].
    AddInquiry(inquiry::Id),

    /// [`SavedSearch`] has been created by the [`User`].
    AddSavedSearch(saved_search::Id),

    /// [`SavedSearch`] has been deleted by the [`User`].
    RemoveSavedSearch(saved_search::Id),
}

/// ID of a [`User`].
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

define_kind! {
    #[doc = "Kind of a [`User`] posting [`Property`]s."]
    enum Kind {
        #[doc = "Owner of the [`Property`]."]
        Owner = 1,

        #[doc = "Builder or developer."]
        Builder = 2,

        #[doc = "Real-estate agent or broker."]
        Agent = 3,
    }
}

/// Name of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Password of a [`User`].
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `password` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        password.chars().count() >= 8 && password.len() <= 128
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Argon2id hash of a [`User`] password in PHC string format.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hashes the given [`Password`] with a random salt.
    ///
    /// # Errors
    ///
    /// If the [`Argon2`] hashing fails.
    pub fn new(
        password: &Password,
    ) -> Result<Self, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.0.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
    }

    /// Checks whether the given [`Password`] matches this [`PasswordHash`].
    ///
    /// A malformed hash matches nothing.
    #[must_use]
    pub fn verify(&self, password: &Password) -> bool {
        argon2::PasswordHash::new(&self.0).is_ok_and(|hash| {
            Argon2::default()
                .verify_password(password.0.as_bytes(), &hash)
                .is_ok()
        })
    }
}

/// Email address of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Email`] if the given `address` is valid.
    ///
    /// The `address` is lowercased, so a [`User`] logs in regardless of the
    /// case typed.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into().to_lowercase();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                "^([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                     \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                  |\\x22([^\\x0d\\x22\\x5c\\x80-\\xff]\
                  |\\x5c[\\x00-\\x7f])*\\x22)\
                  (\\x2e([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                           \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                        |\\x22([^\\x0d\\x22\\x5c\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x22))*\\x40\
                  ([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                     \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                  |\\x5b([^\\x0d\\x5b-\\x5d\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x5d)\
                  (\\x2e([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                           \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                        |\\x5b([^\\x0d\\x5b-\\x5d\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x5d))*$",
            )
            .expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^([+]?\d{1,2}[-\s]?|)\d{3}[-\s]?\d{3}[-\s]?\d{4}$")
                .expect("valid regex")
        });

        REGEX.is_match(number.as_ref())
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// URL of a [`User`] avatar image.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Avatar(String);

impl Avatar {
    /// Creates a new [`Avatar`] if the given `url` is a valid image URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        property::ImageUrl::new(url.as_str()).is_some().then_some(Self(url))
    }
}

impl FromStr for Avatar {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Avatar`")
    }
}

/// [`DateTime`] when a [`User`] was created.
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;

/// [`DateTime`] when a [`User`] was last modified.
pub type ModificationDateTime = DateTimeOf<(User, unit::Modification)>;

/// [`DateTime`] when a [`User`] was deleted.
pub type DeletionDateTime = DateTimeOf<(User, unit::Deletion)>;

#[cfg(test)]
pub(crate) mod fixture {
    use common::DateTime;

    use super::{Email, Kind, Name, PasswordHash, Password, User};

    /// Returns a fresh [`User`] with the provided `email` and no lists.
    pub(crate) fn user(email: &str) -> User {
        User {
            id: super::Id::new(),
            name: Name::new("Asha Rao").unwrap(),
            email: Email::new(email).unwrap(),
            password_hash: PasswordHash::new(
                &Password::new("correct horse").unwrap(),
            )
            .unwrap(),
            phone: None,
            kind: Kind::Owner,
            avatar: None,
            saved_properties: vec![],
            listed_properties: vec![],
            inquiries: vec![],
            saved_searches: vec![],
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
            deleted_at: None,
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{property, saved_search};

    use super::{fixture, Avatar, Email, ListChange, Password, PasswordHash};

    #[test]
    fn verifies_password_hash() {
        let password = Password::new("correct horse").unwrap();
        let hash = PasswordHash::new(&password).unwrap();

        assert_ne!(hash.to_string(), "correct horse");
        assert!(hash.verify(&password));
        assert!(!hash.verify(&Password::new("wrong horse").unwrap()));
    }

    #[test]
    fn rejects_short_password() {
        assert!(Password::new("short").is_none());
        assert!(Password::new("long enough").is_some());
    }

    #[test]
    fn lowercases_email() {
        let email = Email::new("Asha@Example.COM").unwrap();

        assert_eq!(AsRef::<str>::as_ref(&email), "asha@example.com");
        assert!(Email::new("not an email").is_none());
    }

    #[test]
    fn checks_avatar_url() {
        assert!(Avatar::new("https://cdn.example.com/a.png").is_some());
        assert!(Avatar::new("ftp://cdn.example.com/a.png").is_none());
    }

    #[test]
    fn toggles_saved_property() {
        let mut user = fixture::user("asha@example.com");
        let id = property::Id::new();

        assert!(user.apply(ListChange::ToggleSavedProperty(id)));
        assert!(user.has_saved(id));

        assert!(user.apply(ListChange::ToggleSavedProperty(id)));
        assert!(!user.has_saved(id));
    }

    #[test]
    fn keeps_lists_free_of_duplicates() {
        let mut user = fixture::user("asha@example.com");
        let property = property::Id::new();
        let search = saved_search::Id::new();

        assert!(user.apply(ListChange::ListProperty(property)));
        assert!(!user.apply(ListChange::ListProperty(property)));
        assert_eq!(user.listed_properties, [property]);

        assert!(user.apply(ListChange::AddSavedSearch(search)));
        assert!(user.apply(ListChange::RemoveSavedSearch(search)));
        assert!(!user.apply(ListChange::RemoveSavedSearch(search)));
        assert!(user.saved_searches.is_empty());
    }
}
