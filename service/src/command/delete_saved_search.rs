//! [`Command`] for deleting a [`SavedSearch`].

use std::fmt;

use common::operations::{By, Commit, Delete, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::{
        saved_search,
        user::{self, ListChange},
        SavedSearch,
    },
    infra::{database, Database},
    Service,
};

use super::{Command, UpdateUserLists};

/// [`Command`] for deleting a [`SavedSearch`] by its owner.
#[derive(Clone, Copy, Debug)]
pub struct DeleteSavedSearch {
    /// ID of the [`User`] owning the [`SavedSearch`].
    pub user_id: user::Id,

    /// ID of the [`SavedSearch`] to delete.
    pub saved_search_id: saved_search::Id,
}

impl<Db> Command<DeleteSavedSearch> for Service<Db>
where
    Db: Database<
            Select<By<Option<SavedSearch>, saved_search::Id>>,
            Ok = Option<SavedSearch>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Delete<By<SavedSearch, saved_search::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
    Self: Command<UpdateUserLists, Err: fmt::Display>,
{
    type Ok = SavedSearch;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteSavedSearch,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteSavedSearch {
            user_id,
            saved_search_id,
        } = cmd;

        let search = self
            .database()
            .execute(Select(By::new(saved_search_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|s| s.user_id == user_id)
            .ok_or(E::SavedSearchNotExists(saved_search_id))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Delete(By::<SavedSearch, _>::new(saved_search_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.update_user_lists(
            user_id,
            ListChange::RemoveSavedSearch(saved_search_id),
        )
        .await;

        Ok(search)
    }
}

/// Error of [`DeleteSavedSearch`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`SavedSearch`] doesn't exist or belongs to another [`User`].
    #[display("`SavedSearch(id: {_0})` does not exist")]
    #[from(ignore)]
    SavedSearchNotExists(#[error(not(source))] saved_search::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{Command as _, SaveSearch},
        domain::{property, saved_search, user},
        query::{saved_searches, Query as _},
        test_service,
    };

    use super::{DeleteSavedSearch, ExecutionError};

    #[tokio::test]
    async fn saves_lists_and_deletes_search() {
        let service = test_service();
        let user = user::fixture::user("asha@example.com");
        drop(service.database().state().users.insert(user.id, user.clone()));

        let search = service
            .execute(SaveSearch {
                user_id: user.id,
                name: saved_search::Name::new("3 BHK in Indiranagar").unwrap(),
                filter: property::Filter {
                    query: property::SearchQuery::new("indiranagar"),
                    ..property::Filter::default()
                },
                sort: property::Sort::PriceLowToHigh,
            })
            .await
            .unwrap();
        assert_eq!(
            service.database().state().users[&user.id].saved_searches,
            [search.id],
        );

        let listed = service
            .execute(saved_searches::ByUser::by(user.id))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].sort, property::Sort::PriceLowToHigh);

        let err = service
            .execute(DeleteSavedSearch {
                user_id: user::Id::new(),
                saved_search_id: search.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::SavedSearchNotExists(_),
        ));

        drop(
            service
                .execute(DeleteSavedSearch {
                    user_id: user.id,
                    saved_search_id: search.id,
                })
                .await
                .unwrap(),
        );
        let state = service.database().state();
        assert!(state.saved_searches.is_empty());
        assert!(state.users[&user.id].saved_searches.is_empty());
    }
}
