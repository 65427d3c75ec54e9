//! [`Query`] collection related to the multiple [`Property`]s.

use std::collections::HashMap;

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::{domain::User, RetryPolicy};
use crate::{
    domain::{property, Property},
    infra::{database, Database},
    read::{
        self,
        property::list::{Filter, Page, Selector},
    },
    Service,
};

use super::{DatabaseQuery, Query};

/// Queries multiple [`Property`]s by their [`property::Id`]s.
pub type ByIds =
    DatabaseQuery<By<HashMap<property::Id, Property>, Vec<property::Id>>>;

/// Queries all [`Property`]s posted by a [`User`], the newest first.
pub type ByPoster = DatabaseQuery<By<Vec<Property>, read::property::Poster>>;

/// Queries a filtered and sorted [`Page`] of [`Property`]s.
///
/// Loading the records is retried according to the configured
/// [`RetryPolicy`].
#[derive(Clone, Debug)]
pub struct List(pub Selector);

impl<Db> Query<List> for Service<Db>
where
    Db: for<'l> Database<
        Select<By<Vec<Property>, &'l property::Filter>>,
        Ok = Vec<Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Page;
    type Err = Traced<database::Error>;

    async fn execute(&self, List(selector): List) -> Result<Page, Self::Err> {
        let Selector {
            arguments,
            filter: Filter { criteria, sort },
        } = selector;

        let db = self.database();
        let by = &criteria;
        let candidates = self
            .config()
            .listing_retry
            .run("`query::properties::List` loading", move || {
                db.execute(Select(By::new(by)))
            })
            .await
            .map_err(tracerr::wrap!())?;

        let mut found = criteria.apply(candidates).collect::<Vec<_>>();
        found.sort_by(|a, b| sort.compare(a, b));

        Ok(Page::slice(
            &arguments,
            found.into_iter().map(|p| (p.id, p)).collect(),
        ))
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        domain::property::{
            fixture, Filter, Purpose, Range, SearchQuery, Sort,
        },
        query::Query as _,
        read::property::list::{self, Arguments, Selector},
        test_service,
    };

    use super::List;

    fn list(criteria: Filter, sort: Sort, arguments: Arguments) -> List {
        List(Selector {
            arguments,
            filter: list::Filter { criteria, sort },
        })
    }

    fn money(amount: i64) -> Money {
        Money::new(Decimal::from(amount)).unwrap()
    }

    fn first(n: i32) -> Arguments {
        Arguments::new(Some(n), None, None, None, 10).unwrap()
    }

    #[tokio::test]
    async fn filters_sorts_and_pages() {
        let service = test_service();
        {
            let mut state = service.database().state();
            for (title, price) in [
                ("Cheap flat", 3_000_000),
                ("Mid flat", 6_000_000),
                ("Pricey flat", 9_000_000),
                ("Luxury flat", 20_000_000),
            ] {
                let mut p = fixture::property(title);
                p.price = money(price);
                drop(state.properties.insert(p.id, p));
            }
            let mut rental = fixture::property("Rental flat");
            rental.purpose = Purpose::Rent;
            drop(state.properties.insert(rental.id, rental));
        }

        let criteria = Filter {
            purpose: Some(Purpose::Sell),
            price: Range {
                min: None,
                max: Some(money(10_000_000)),
            },
            ..Filter::default()
        };
        let page = service
            .execute(list(criteria.clone(), Sort::PriceHighToLow, first(2)))
            .await
            .unwrap();

        let titles = page
            .edges
            .iter()
            .map(|e| e.node.title.to_string())
            .collect::<Vec<_>>();
        assert_eq!(titles, ["Pricey flat", "Mid flat"]);
        assert_eq!(page.total_count, 3);
        assert!(page.page_info().has_next_page);

        let after = page.page_info().end_cursor;
        let page = service
            .execute(list(
                criteria,
                Sort::PriceHighToLow,
                Arguments::new(Some(2), after, None, None, 10).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(page.edges.len(), 1);
        assert_eq!(page.edges[0].node.title.to_string(), "Cheap flat");
        assert!(!page.page_info().has_next_page);
    }

    #[tokio::test]
    async fn matches_whole_search_query() {
        let service = test_service();
        {
            let mut state = service.database().state();
            for title in ["Sea view flat", "Sea facing villa", "Garden view"] {
                let p = fixture::property(title);
                drop(state.properties.insert(p.id, p));
            }
        }

        let criteria = Filter {
            query: SearchQuery::new("Sea View"),
            ..Filter::default()
        };
        let page = service
            .execute(list(criteria, Sort::Newest, first(10)))
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.edges[0].node.title.to_string(), "Sea view flat");
    }

    #[tokio::test]
    async fn empty_record_set_yields_empty_page() {
        let page = test_service()
            .execute(list(Filter::default(), Sort::Newest, first(10)))
            .await
            .unwrap();

        assert!(page.edges.is_empty());
        assert_eq!(page.total_count, 0);
    }

    #[tokio::test]
    async fn retries_failed_loads() {
        let service = test_service();
        {
            let mut state = service.database().state();
            let p = fixture::property("Only flat");
            drop(state.properties.insert(p.id, p));
            state.failing_loads = 2;
        }

        let page = service
            .execute(list(Filter::default(), Sort::Newest, first(10)))
            .await
            .unwrap();

        assert_eq!(page.edges.len(), 1);
        assert_eq!(service.database().state().loads, 3);
    }

    #[tokio::test]
    async fn gives_up_after_configured_attempts() {
        let service = test_service();
        service.database().state().failing_loads = 5;

        let res = service
            .execute(list(Filter::default(), Sort::Newest, first(10)))
            .await;

        assert!(res.is_err());
        assert_eq!(service.database().state().loads, 3);
    }
}
