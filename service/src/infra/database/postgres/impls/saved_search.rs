//! [`SavedSearch`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, Area, AreaUnit, Range, RoomCount, SearchQuery},
        saved_search, user, SavedSearch,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of a [`SavedSearch`] row.
const COLUMNS: &str = "\
    id, user_id, name, \
    purpose, kind, sub_types, bedrooms, bathrooms, furnishing, \
    price_min, price_max, \
    area_min, area_min_unit, area_max, area_max_unit, \
    posted_by, amenities, query, verified_only, \
    sort, created_at";

/// Reads a [`SavedSearch`] out of the provided [`Row`].
fn from_row(row: &Row) -> SavedSearch {
    let rooms = |column: &str| {
        row.get::<_, Vec<i16>>(column)
            .into_iter()
            .map(|c| u8::try_from(c).map(RoomCount::from))
            .collect::<Result<Vec<_>, _>>()
            .expect("room count overflow")
    };
    let area = |value: &str, unit: &str| {
        row.get::<_, Option<Decimal>>(value).map(|v| {
            Area::new(v, row.get(unit)).expect("`area` is always valid")
        })
    };

    SavedSearch {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        filter: property::Filter {
            purpose: row.get("purpose"),
            kind: row.get("kind"),
            sub_types: row.get("sub_types"),
            bedrooms: rooms("bedrooms"),
            bathrooms: rooms("bathrooms"),
            furnishing: row.get("furnishing"),
            price: Range {
                min: row.get("price_min"),
                max: row.get("price_max"),
            },
            area: Range {
                min: area("area_min", "area_min_unit"),
                max: area("area_max", "area_max_unit"),
            },
            posted_by: row.get("posted_by"),
            amenities: row.get("amenities"),
            query: row
                .get::<_, Option<String>>("query")
                .and_then(SearchQuery::new),
            verified_only: row.get("verified_only"),
        },
        sort: row.get("sort"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Insert<SavedSearch>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(search): Insert<SavedSearch>,
    ) -> Result<Self::Ok, Self::Err> {
        let SavedSearch {
            id,
            user_id,
            name,
            filter,
            sort,
            created_at,
        } = search;
        let property::Filter {
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
        } = filter;

        let rooms = |counts: Vec<RoomCount>| {
            counts
                .into_iter()
                .map(|c| i16::from(c.get()))
                .collect::<Vec<_>>()
        };
        let (bedrooms, bathrooms) = (rooms(bedrooms), rooms(bathrooms));
        let (area_min, area_min_unit) = split_area(area.min);
        let (area_max, area_max_unit) = split_area(area.max);
        let query = query.as_ref().map(|q| -> &str { q.as_ref() });

        const SQL: &str = "\
            INSERT INTO saved_searches (\
                id, user_id, name, \
                purpose, kind, sub_types, bedrooms, bathrooms, furnishing, \
                price_min, price_max, \
                area_min, area_min_unit, area_max, area_max_unit, \
                posted_by, amenities, query, verified_only, \
                sort, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, \
                $4::INT2, $5::INT2, $6::INT2[], $7::INT2[], $8::INT2[], \
                $9::INT2[], \
                $10::NUMERIC, $11::NUMERIC, \
                $12::NUMERIC, $13::INT2, $14::NUMERIC, $15::INT2, \
                $16::INT2[], $17::VARCHAR[], $18::VARCHAR, $19::BOOL, \
                $20::INT2, $21::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &name,
                &purpose,
                &kind,
                &sub_types,
                &bedrooms,
                &bathrooms,
                &furnishing,
                &price.min,
                &price.max,
                &area_min,
                &area_min_unit,
                &area_max,
                &area_max_unit,
                &posted_by,
                &amenities,
                &query,
                &verified_only,
                &sort,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

/// Splits the provided [`Area`] bound into its value and unit columns.
fn split_area(area: Option<Area>) -> (Option<Decimal>, Option<AreaUnit>) {
    area.map(|a| (a.value(), a.unit())).unzip()
}

impl<C> Database<Delete<By<SavedSearch, saved_search::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<SavedSearch, saved_search::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: saved_search::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM saved_searches \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<SavedSearch>, saved_search::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<SavedSearch>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<SavedSearch>, saved_search::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: saved_search::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM saved_searches \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<SavedSearch>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<SavedSearch>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<SavedSearch>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id: user::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM saved_searches \
             WHERE user_id = $1::UUID \
             ORDER BY created_at DESC, id DESC",
        );
        Ok(self
            .query(&sql, &[&user_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}
