//! [`Command`] for saving a [`property::Filter`] as a [`SavedSearch`].

use std::fmt;

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::saved_search::Name;
use crate::{
    domain::{
        property, saved_search,
        user::{self, ListChange},
        SavedSearch, User,
    },
    infra::{database, Database},
    Service,
};

use super::{Command, UpdateUserLists};

/// [`Command`] for saving a [`property::Filter`] as a [`SavedSearch`].
#[derive(Clone, Debug)]
pub struct SaveSearch {
    /// ID of the [`User`] saving the search.
    pub user_id: user::Id,

    /// [`Name`] of the [`SavedSearch`].
    pub name: saved_search::Name,

    /// [`property::Filter`] to save.
    pub filter: property::Filter,

    /// [`property::Sort`] to save.
    pub sort: property::Sort,
}

impl<Db> Command<SaveSearch> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<SavedSearch>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Self: Command<UpdateUserLists, Err: fmt::Display>,
{
    type Ok = SavedSearch;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SaveSearch) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SaveSearch {
            user_id,
            name,
            filter,
            sort,
        } = cmd;

        drop(
            self.database()
                .execute(Select(By::<Option<User>, _>::new(user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .filter(|u| u.deleted_at.is_none())
                .ok_or(E::UserNotExists(user_id))
                .map_err(tracerr::wrap!())?,
        );

        let search = SavedSearch {
            id: saved_search::Id::new(),
            user_id,
            name,
            filter,
            sort,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(search.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.update_user_lists(user_id, ListChange::AddSavedSearch(search.id))
            .await;

        Ok(search)
    }
}

/// Error of [`SaveSearch`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
