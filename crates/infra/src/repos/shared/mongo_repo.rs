use anyhow::Result;
use dill_reminders_domain::ID;
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, doc, Document},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
    Collection, Cursor,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
    fn get_id_filter(&self) -> Document;
}

pub fn get_id_filter(id: &ID) -> Document {
    doc! {
        "_id": id.as_str()
    }
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    Ok(bson::to_document(&raw)?)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

pub async fn save<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let raw = D::from_domain(entity);
    let filter = raw.get_id_filter();
    let doc = bson::to_document(&raw)?;
    collection.replace_one(filter, doc, None).await?;
    Ok(())
}

pub async fn find<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    id: &ID,
) -> Result<Option<E>> {
    find_one_by::<E, D>(collection, get_id_filter(id)).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Result<Option<E>> {
    collection
        .find_one(filter, None)
        .await?
        .map(persistence_to_entity::<E, D>)
        .transpose()
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    options: Option<FindOptions>,
) -> Result<Vec<E>> {
    let cursor = collection.find(filter, options).await?;
    consume_cursor::<E, D>(cursor).await
}

/// Atomically applies `update` to the document matching `filter` and returns
/// the document as it is after the update. With `upsert` a missing document
/// is created from the filter and the update.
pub async fn find_one_and_update<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
    upsert: bool,
) -> Result<Option<E>> {
    let options = FindOneAndUpdateOptions::builder()
        .upsert(upsert)
        .return_document(ReturnDocument::After)
        .build();
    collection
        .find_one_and_update(filter, update, options)
        .await?
        .map(persistence_to_entity::<E, D>)
        .transpose()
}

/// Documents that do not map to the domain are logged and left out
async fn consume_cursor<E, D: MongoDocument<E>>(mut cursor: Cursor<Document>) -> Result<Vec<E>> {
    let mut entities = vec![];
    while let Some(result) = cursor.next().await {
        let document = result?;
        match persistence_to_entity::<E, D>(document) {
            Ok(entity) => entities.push(entity),
            Err(e) => {
                error!("Unable to map document to a domain entity. Error: {:?}", e);
            }
        }
    }

    Ok(entities)
}
