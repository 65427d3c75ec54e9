//! In-memory [`Database`] implementation for tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use common::operations::{
    By, Commit, Delete, Insert, Lock, Select, Transact, Update,
};
use tracerr::Traced;

use crate::{
    domain::{
        inquiry, property, saved_search, user, Inquiry, Property, SavedSearch,
        User,
    },
    infra::{database, Database},
    read,
};

/// In-memory [`Database`] shared between its clones.
///
/// [`Transact`] returns the same [`Memory`], so every write is visible
/// immediately and [`Commit`] does nothing.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<Mutex<State>>);

/// Contents of a [`Memory`] [`Database`].
#[derive(Debug, Default)]
pub struct State {
    /// Stored [`User`]s.
    pub users: HashMap<user::Id, User>,

    /// Stored [`Property`]s.
    pub properties: HashMap<property::Id, Property>,

    /// Stored [`Inquiry`]s.
    pub inquiries: HashMap<inquiry::Id, Inquiry>,

    /// Stored [`SavedSearch`]es.
    pub saved_searches: HashMap<saved_search::Id, SavedSearch>,

    /// Number of the next [`Property`] list loads to fail.
    pub failing_loads: u8,

    /// Number of [`Property`] list loads performed so far.
    pub loads: u8,

    /// Indicator whether [`Update`]s of [`User`]s fail.
    pub failing_user_updates: bool,
}

impl Memory {
    /// Locks the [`State`] of this [`Memory`].
    pub fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shortcut for a [`Memory`] operation result.
type Result<T> = std::result::Result<T, Traced<database::Error>>;

impl Database<Transact> for Memory {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok> {
        Ok(())
    }
}

impl Database<Lock<By<User, user::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Lock<By<User, user::Id>>) -> Result<()> {
        Ok(())
    }
}

impl Database<Lock<By<Property, property::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Property, property::Id>>,
    ) -> Result<()> {
        Ok(())
    }
}

impl Database<Insert<User>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(user): Insert<User>) -> Result<()> {
        drop(self.state().users.insert(user.id, user));
        Ok(())
    }
}

impl Database<Update<User>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Update(user): Update<User>) -> Result<()> {
        let mut state = self.state();
        if state.failing_user_updates {
            return Err(tracerr::new!(database::Error::Unavailable));
        }
        drop(state.users.insert(user.id, user));
        Ok(())
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok> {
        Ok(self.state().users.get(&by.into_inner()).cloned())
    }
}

impl<'l> Database<Select<By<Option<User>, &'l user::Email>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'l user::Email>>,
    ) -> Result<Self::Ok> {
        let email = by.into_inner();
        Ok(self
            .state()
            .users
            .values()
            .find(|u| u.email == *email && u.deleted_at.is_none())
            .cloned())
    }
}

impl Database<Insert<Property>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(p): Insert<Property>) -> Result<()> {
        drop(self.state().properties.insert(p.id, p));
        Ok(())
    }
}

impl Database<Update<Property>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Update(p): Update<Property>) -> Result<()> {
        drop(self.state().properties.insert(p.id, p));
        Ok(())
    }
}

impl Database<Delete<By<Property, property::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<()> {
        drop(self.state().properties.remove(&by.into_inner()));
        Ok(())
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok> {
        Ok(self.state().properties.get(&by.into_inner()).cloned())
    }
}

impl
    Database<
        Select<By<HashMap<property::Id, Property>, Vec<property::Id>>>,
    > for Memory
{
    type Ok = HashMap<property::Id, Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<HashMap<property::Id, Property>, Vec<property::Id>>,
        >,
    ) -> Result<Self::Ok> {
        let state = self.state();
        Ok(by
            .into_inner()
            .into_iter()
            .filter_map(|id| state.properties.get(&id).map(|p| (id, p.clone())))
            .collect())
    }
}

impl Database<Select<By<Vec<Property>, read::property::Poster>>> for Memory {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, read::property::Poster>>,
    ) -> Result<Self::Ok> {
        let read::property::Poster(user_id) = by.into_inner();
        let mut found = self
            .state()
            .properties
            .values()
            .filter(|p| p.is_posted_by(user_id))
            .cloned()
            .collect::<Vec<_>>();
        found.sort_by(|a, b| property::Sort::Newest.compare(a, b));
        Ok(found)
    }
}

impl<'l> Database<Select<By<Vec<Property>, &'l property::Filter>>>
    for Memory
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Property>, &'l property::Filter>>,
    ) -> Result<Self::Ok> {
        let mut state = self.state();
        state.loads += 1;
        if state.failing_loads > 0 {
            state.failing_loads -= 1;
            return Err(tracerr::new!(database::Error::Unavailable));
        }
        Ok(state.properties.values().cloned().collect())
    }
}

impl Database<Insert<Inquiry>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(i): Insert<Inquiry>) -> Result<()> {
        drop(self.state().inquiries.insert(i.id, i));
        Ok(())
    }
}

impl Database<Select<By<Vec<Inquiry>, read::inquiry::Owner>>> for Memory {
    type Ok = Vec<Inquiry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Inquiry>, read::inquiry::Owner>>,
    ) -> Result<Self::Ok> {
        let read::inquiry::Owner(owner_id) = by.into_inner();
        Ok(newest_first(
            self.state().inquiries.values(),
            |i| i.owner_id == owner_id,
            |i| i.created_at,
        ))
    }
}

impl Database<Select<By<Vec<Inquiry>, read::inquiry::Sender>>> for Memory {
    type Ok = Vec<Inquiry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Inquiry>, read::inquiry::Sender>>,
    ) -> Result<Self::Ok> {
        let read::inquiry::Sender(sender_id) = by.into_inner();
        Ok(newest_first(
            self.state().inquiries.values(),
            |i| i.sender_id == Some(sender_id),
            |i| i.created_at,
        ))
    }
}

impl Database<Insert<SavedSearch>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, Insert(s): Insert<SavedSearch>) -> Result<()> {
        drop(self.state().saved_searches.insert(s.id, s));
        Ok(())
    }
}

impl Database<Delete<By<SavedSearch, saved_search::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<SavedSearch, saved_search::Id>>,
    ) -> Result<()> {
        drop(self.state().saved_searches.remove(&by.into_inner()));
        Ok(())
    }
}

impl Database<Select<By<Option<SavedSearch>, saved_search::Id>>> for Memory {
    type Ok = Option<SavedSearch>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<SavedSearch>, saved_search::Id>>,
    ) -> Result<Self::Ok> {
        Ok(self.state().saved_searches.get(&by.into_inner()).cloned())
    }
}

impl Database<Select<By<Vec<SavedSearch>, user::Id>>> for Memory {
    type Ok = Vec<SavedSearch>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<SavedSearch>, user::Id>>,
    ) -> Result<Self::Ok> {
        let user_id = by.into_inner();
        Ok(newest_first(
            self.state().saved_searches.values(),
            |s| s.user_id == user_id,
            |s| s.created_at,
        ))
    }
}

/// Collects the `items` satisfying the provided `filter`, ordered by the
/// provided `key` descending.
fn newest_first<'i, T, K>(
    items: impl Iterator<Item = &'i T>,
    filter: impl Fn(&T) -> bool,
    key: impl Fn(&T) -> K,
) -> Vec<T>
where
    T: Clone + 'i,
    K: Ord,
{
    let mut found = items.filter(|i| filter(i)).cloned().collect::<Vec<_>>();
    found.sort_by_key(|i| std::cmp::Reverse(key(i)));
    found
}
