//! [`Property`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        property::{self, Area, Details, Location, PostedBy, RoomCount, Views},
        Property,
    },
    infra::{
        database::{
            self,
            postgres::{Connection, FuzzPattern},
            Postgres,
        },
        Database,
    },
    read,
};

impl<C, IDs> Database<Select<By<HashMap<property::Id, Property>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[property::Id]>,
{
    type Ok = HashMap<property::Id, Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<property::Id, Property>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[property::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT id, title, purpose, kind, sub_type, \
                   price, security_deposit, \
                   city, locality, sub_locality, society, address, pincode, \
                   bedrooms, bathrooms, balconies, area, area_unit, \
                   furnishing, age, facing, covered_parking, open_parking, \
                   floor, total_floors, \
                   amenities, description, images, video, available_from, \
                   posted_by_id, posted_by_kind, posted_by_name, \
                   posted_by_phone, posted_by_email, \
                   terms, views, verified, \
                   created_at, updated_at \
            FROM properties \
            WHERE id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| {
                let property = from_row(row);
                (property.id, property)
            })
            .collect())
    }
}

/// Reads a [`Property`] out of the provided [`Row`].
fn from_row(row: &Row) -> Property {
    let room = |column: &str| {
        row.get::<_, Option<i16>>(column)
            .map(|c| u8::try_from(c).map(RoomCount::from))
            .transpose()
            .expect("room count overflow")
    };
    let parking = |column: &str| {
        u8::try_from(row.get::<_, i16>(column)).expect("parking overflow")
    };
    let floor = |column: &str| {
        row.get::<_, Option<i32>>(column)
            .map(u16::try_from)
            .transpose()
            .expect("floor overflow")
    };

    Property {
        id: row.get("id"),
        title: row.get("title"),
        purpose: row.get("purpose"),
        kind: row.get("kind"),
        sub_type: row.get("sub_type"),
        price: row.get("price"),
        security_deposit: row.get("security_deposit"),
        location: Location {
            city: row.get("city"),
            locality: row.get("locality"),
            sub_locality: row.get("sub_locality"),
            society: row.get("society"),
            address: row.get("address"),
            pincode: row.get("pincode"),
        },
        details: Details {
            bedrooms: room("bedrooms"),
            bathrooms: room("bathrooms"),
            balconies: room("balconies"),
            area: Area::new(row.get("area"), row.get("area_unit"))
                .expect("`area` is always valid"),
            furnishing: row.get("furnishing"),
            age: row.get("age"),
            facing: row.get("facing"),
            covered_parking: parking("covered_parking"),
            open_parking: parking("open_parking"),
            floor: floor("floor"),
            total_floors: floor("total_floors"),
        },
        amenities: row
            .get::<_, Vec<property::Amenity>>("amenities")
            .into_iter()
            .collect(),
        description: row.get("description"),
        images: row.get("images"),
        video: row.get("video"),
        available_from: row.get("available_from"),
        posted_by: PostedBy {
            id: row.get("posted_by_id"),
            kind: row.get("posted_by_kind"),
            name: row.get("posted_by_name"),
            phone: row.get("posted_by_phone"),
            email: row.get("posted_by_email"),
        },
        terms: row.get("terms"),
        views: Views::from(
            u32::try_from(row.get::<_, i64>("views"))
                .expect("`views` overflow"),
        ),
        verified: row.get("verified"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<Property>, property::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<property::Id, Property>, [property::Id; 1]>>,
        Ok = HashMap<property::Id, Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Insert<Property>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Property>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(property))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Property>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let score = i16::from(property.score().get());
        let Property {
            id,
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
            posted_by,
            terms,
            views,
            verified,
            created_at,
            updated_at,
        } = property;

        let room = |c: Option<RoomCount>| c.map(|c| i16::from(c.get()));
        let (bedrooms, bathrooms, balconies) = (
            room(details.bedrooms),
            room(details.bathrooms),
            room(details.balconies),
        );
        let area = details.area.value();
        let area_unit = details.area.unit();
        let area_sq_ft = details.area.in_sq_ft();
        let covered_parking = i16::from(details.covered_parking);
        let open_parking = i16::from(details.open_parking);
        let floor = details.floor.map(i32::from);
        let total_floors = details.total_floors.map(i32::from);
        let amenities = amenities.iter().collect::<Vec<_>>();
        let views = i64::from(u32::from(views));

        const SQL: &str = "\
            INSERT INTO properties (\
                id, title, purpose, kind, sub_type, \
                price, security_deposit, \
                city, locality, sub_locality, society, address, pincode, \
                bedrooms, bathrooms, balconies, \
                area, area_unit, area_sq_ft, \
                furnishing, age, facing, covered_parking, open_parking, \
                floor, total_floors, \
                amenities, description, images, video, available_from, \
                posted_by_id, posted_by_kind, posted_by_name, \
                posted_by_phone, posted_by_email, \
                terms, views, verified, property_score, \
                created_at, updated_at\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::INT2, $4::INT2, $5::INT2, \
                $6::NUMERIC, $7::NUMERIC, \
                $8::VARCHAR, $9::VARCHAR, $10::VARCHAR, $11::VARCHAR, \
                $12::VARCHAR, $13::VARCHAR, \
                $14::INT2, $15::INT2, $16::INT2, \
                $17::NUMERIC, $18::INT2, $19::NUMERIC, \
                $20::INT2, $21::INT2, $22::INT2, $23::INT2, $24::INT2, \
                $25::INT4, $26::INT4, \
                $27::VARCHAR[], $28::VARCHAR, $29::VARCHAR[], $30::VARCHAR, \
                $31::DATE, \
                $32::UUID, $33::INT2, $34::VARCHAR, \
                $35::VARCHAR, $36::VARCHAR, \
                $37::VARCHAR, $38::INT8, $39::BOOL, $40::INT2, \
                $41::TIMESTAMPTZ, $42::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                purpose = EXCLUDED.purpose, \
                kind = EXCLUDED.kind, \
                sub_type = EXCLUDED.sub_type, \
                price = EXCLUDED.price, \
                security_deposit = EXCLUDED.security_deposit, \
                city = EXCLUDED.city, \
                locality = EXCLUDED.locality, \
                sub_locality = EXCLUDED.sub_locality, \
                society = EXCLUDED.society, \
                address = EXCLUDED.address, \
                pincode = EXCLUDED.pincode, \
                bedrooms = EXCLUDED.bedrooms, \
                bathrooms = EXCLUDED.bathrooms, \
                balconies = EXCLUDED.balconies, \
                area = EXCLUDED.area, \
                area_unit = EXCLUDED.area_unit, \
                area_sq_ft = EXCLUDED.area_sq_ft, \
                furnishing = EXCLUDED.furnishing, \
                age = EXCLUDED.age, \
                facing = EXCLUDED.facing, \
                covered_parking = EXCLUDED.covered_parking, \
                open_parking = EXCLUDED.open_parking, \
                floor = EXCLUDED.floor, \
                total_floors = EXCLUDED.total_floors, \
                amenities = EXCLUDED.amenities, \
                description = EXCLUDED.description, \
                images = EXCLUDED.images, \
                video = EXCLUDED.video, \
                available_from = EXCLUDED.available_from, \
                posted_by_id = EXCLUDED.posted_by_id, \
                posted_by_kind = EXCLUDED.posted_by_kind, \
                posted_by_name = EXCLUDED.posted_by_name, \
                posted_by_phone = EXCLUDED.posted_by_phone, \
                posted_by_email = EXCLUDED.posted_by_email, \
                terms = EXCLUDED.terms, \
                views = EXCLUDED.views, \
                verified = EXCLUDED.verified, \
                property_score = EXCLUDED.property_score, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &purpose,
                &kind,
                &sub_type,
                &price,
                &security_deposit,
                &location.city,
                &location.locality,
                &location.sub_locality,
                &location.society,
                &location.address,
                &location.pincode,
                &bedrooms,
                &bathrooms,
                &balconies,
                &area,
                &area_unit,
                &area_sq_ft,
                &details.furnishing,
                &details.age,
                &details.facing,
                &covered_parking,
                &open_parking,
                &floor,
                &total_floors,
                &amenities,
                &description,
                &images,
                &video,
                &available_from,
                &posted_by.id,
                &posted_by.kind,
                &posted_by.name,
                &posted_by.phone,
                &posted_by.email,
                &terms,
                &views,
                &verified,
                &score,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Property, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM properties \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Property, property::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO properties_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Property>, read::property::Poster>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<property::Id, Property>, Vec<property::Id>>>,
        Ok = HashMap<property::Id, Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, read::property::Poster>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::property::Poster(user_id) = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM properties \
            WHERE posted_by_id = $1::UUID \
            ORDER BY created_at DESC, id DESC";
        let ids = self
            .query(SQL, &[&user_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect::<Vec<property::Id>>();

        self.load_ordered(ids).await
    }
}

impl<'l, C> Database<Select<By<Vec<Property>, &'l property::Filter>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<property::Id, Property>, Vec<property::Id>>>,
        Ok = HashMap<property::Id, Property>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    /// Selects a superset of the [`Property`]s matching the
    /// [`property::Filter`], leaving the exact matching to it.
    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, &'l property::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let mut conditions = vec![];

        if let Some(purpose) = &filter.purpose {
            ps.push(purpose);
            conditions.push(format!("purpose = ${}::INT2", ps.len()));
        }
        if let Some(kind) = &filter.kind {
            ps.push(kind);
            conditions.push(format!("kind = ${}::INT2", ps.len()));
        }
        if !filter.sub_types.is_empty() {
            ps.push(&filter.sub_types);
            conditions.push(format!("sub_type = ANY(${}::INT2[])", ps.len()));
        }
        if let Some(min) = &filter.price.min {
            ps.push(min);
            conditions.push(format!("price >= ${}::NUMERIC", ps.len()));
        }
        if let Some(max) = &filter.price.max {
            ps.push(max);
            conditions.push(format!("price <= ${}::NUMERIC", ps.len()));
        }
        let area = filter.area.map(|a| a.in_sq_ft());
        if let Some(min) = &area.min {
            ps.push(min);
            conditions.push(format!("area_sq_ft >= ${}::NUMERIC", ps.len()));
        }
        if let Some(max) = &area.max {
            ps.push(max);
            conditions.push(format!("area_sq_ft <= ${}::NUMERIC", ps.len()));
        }
        if !filter.posted_by.is_empty() {
            ps.push(&filter.posted_by);
            conditions
                .push(format!("posted_by_kind = ANY(${}::INT2[])", ps.len()));
        }
        if filter.verified_only {
            conditions.push("verified".to_owned());
        }
        // Matches any word of the query, so it's looser than
        // `SearchQuery::matches`, which re-checks the loaded records.
        let pattern =
            filter.query.as_ref().map(|q| FuzzPattern::new(q.as_ref()));
        if let Some(pattern) = &pattern {
            ps.push(pattern);
            let idx = ps.len();
            conditions.push(format!(
                "({})",
                [
                    "title",
                    "description",
                    "city",
                    "locality",
                    "society"
                ]
                .iter()
                .format_with(" OR ", |column, f| f(&format_args!(
                    "LOWER({column}) SIMILAR TO LOWER(${idx}::VARCHAR)"
                ))),
            ));
        }

        let sql = format!(
            "SELECT id \
             FROM properties \
             {where_clause} \
             ORDER BY created_at DESC, id DESC",
            where_clause = (!conditions.is_empty())
                .then(|| format!("WHERE {}", conditions.iter().join(" AND ")))
                .unwrap_or_default(),
        );
        let ids = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| row.get("id"))
            .collect::<Vec<property::Id>>();

        self.load_ordered(ids).await
    }
}

impl<C> Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<property::Id, Property>, Vec<property::Id>>>,
        Ok = HashMap<property::Id, Property>,
        Err = Traced<database::Error>,
    >,
{
    /// Loads [`Property`]s with the provided IDs, keeping their order.
    async fn load_ordered(
        &self,
        ids: Vec<property::Id>,
    ) -> Result<Vec<Property>, Traced<database::Error>> {
        let mut found = self
            .execute(Select(By::new(ids.clone())))
            .await
            .map_err(tracerr::wrap!())?;
        Ok(ids.iter().filter_map(|id| found.remove(id)).collect())
    }
}
