use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Client, ClientSession, Collection, Database};
use opentelemetry::KeyValue;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::DatabaseError;
use super::DatabaseClient;
use crate::types::constant::{JOBS_COLLECTION, OFFERS_COLLECTION};
use crate::types::jobs::{JobItem, JobItemUpdates, JobStatus};
use crate::types::offers::{OfferItem, OfferItemUpdates, OfferStatus};
use crate::types::params::DatabaseArgs;
use crate::utils::metrics::DISPATCHER_METRICS;

/// MongoDB-backed offer store. Single-document races are handled by
/// version-filtered `find_one_and_update`; offer/job pairs are written
/// inside a client-session transaction so the job pointer and the offer
/// status can never disagree.
pub struct MongoDbClient {
    client: Client,
    database: Arc<Database>,
}

impl MongoDbClient {
    pub async fn new(config: &DatabaseArgs) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&config.connection_uri)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        let database = Arc::new(client.database(&config.database_name));
        Ok(Self { client, database })
    }

    /// The driver uses `Arc` internally, so handing the database out for
    /// the audit client to share is cheap.
    pub fn database(&self) -> Arc<Database> {
        self.database.clone()
    }

    fn get_offer_collection(&self) -> Collection<OfferItem> {
        self.database.collection(OFFERS_COLLECTION)
    }

    fn get_job_collection(&self) -> Collection<JobItem> {
        self.database.collection(JOBS_COLLECTION)
    }

    async fn start_transaction(&self) -> Result<ClientSession, DatabaseError> {
        let mut session = self.client.start_session(None).await?;
        session.start_transaction(None).await?;
        Ok(session)
    }

    /// Update document for one offer transition. Unset optional fields are
    /// left untouched; `version` and `updated_at` always move.
    fn offer_update_document(current: &OfferItem, updates: &OfferItemUpdates) -> Result<Document, DatabaseError> {
        let mut set = doc! {
            "status": bson::to_bson(&updates.status)?,
            "version": Bson::Int32(current.version + 1),
            "updated_at": Bson::DateTime(Utc::now().round_subsecs(0).into()),
        };
        if let Some(worker) = &updates.accepted_by {
            set.insert("accepted_by", worker);
        }
        if let Some(worker) = &updates.declined_by {
            set.insert("declined_by", worker);
        }
        if let Some(at) = updates.responded_at {
            set.insert("responded_at", Bson::DateTime(at.into()));
        }
        if let Some(at) = updates.expired_at {
            set.insert("expired_at", Bson::DateTime(at.into()));
        }
        if let Some(at) = updates.cancelled_at {
            set.insert("cancelled_at", Bson::DateTime(at.into()));
        }
        if let Some(note) = &updates.resolution_note {
            set.insert("resolution_note", note);
        }
        if let Some(actor) = &updates.resolved_by_actor {
            set.insert("resolved_by_actor", actor);
        }
        Ok(doc! { "$set": set })
    }

    fn job_update_document(current: &JobItem, updates: &JobItemUpdates) -> Result<Document, DatabaseError> {
        let mut set = doc! {
            "version": Bson::Int32(current.version + 1),
            "updated_at": Bson::DateTime(Utc::now().round_subsecs(0).into()),
        };
        if let Some(status) = &updates.status {
            set.insert("status", bson::to_bson(status)?);
        }
        match &updates.active_offer_id {
            Some(Some(offer_id)) => {
                set.insert("active_offer_id", offer_id.to_string());
            }
            Some(None) => {
                set.insert("active_offer_id", Bson::Null);
            }
            None => {}
        }
        Ok(doc! { "$set": set })
    }

    /// Applies `updates` to `job` inside `session`, guarded by the job's
    /// version. A zero-modified result means a concurrent writer moved the
    /// job first and the whole transaction must be abandoned.
    async fn update_job_in_session(
        &self,
        session: &mut ClientSession,
        job: &JobItem,
        updates: &JobItemUpdates,
    ) -> Result<(), DatabaseError> {
        let filter = doc! {
            "id": job.id.to_string(),
            "version": job.version,
        };
        let update = Self::job_update_document(job, updates)?;
        let result = self.get_job_collection().update_one_with_session(filter, update, None, session).await?;
        if result.modified_count == 0 {
            return Err(DatabaseError::PreconditionFailed(format!(
                "Job {} version {} is stale",
                job.id, job.version
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DatabaseClient for MongoDbClient {
    async fn create_offer_for_job(&self, offer: OfferItem) -> Result<OfferItem, DatabaseError> {
        let start = Instant::now();
        let mut session = self.start_transaction().await?;

        let result: Result<OfferItem, DatabaseError> = async {
            // Re-read the job inside the transaction: the precondition must
            // hold against current state, not whatever the caller read.
            let job = self
                .get_job_collection()
                .find_one_with_session(doc! { "id": offer.job_id.to_string() }, None, &mut session)
                .await?
                .ok_or_else(|| DatabaseError::NotFound(format!("Job {}", offer.job_id)))?;

            if let Some(active_offer_id) = job.active_offer_id {
                let active_offer = self
                    .get_offer_collection()
                    .find_one_with_session(doc! { "id": active_offer_id.to_string() }, None, &mut session)
                    .await?;
                if active_offer.map(|o| o.is_open()).unwrap_or(false) {
                    return Err(DatabaseError::ActiveOfferExists {
                        job_id: job.id.to_string(),
                        offer_id: active_offer_id.to_string(),
                    });
                }
            }

            self.get_offer_collection().insert_one_with_session(offer.clone(), None, &mut session).await?;

            let job_updates =
                JobItemUpdates::new().update_status(JobStatus::Offered).set_active_offer(offer.id);
            self.update_job_in_session(&mut session, &job, &job_updates).await?;

            Ok(offer)
        }
        .await;

        match result {
            Ok(offer) => {
                session.commit_transaction().await?;
                debug!(offer_id = %offer.id, job_id = %offer.job_id, "Offer created");
                let attributes = [KeyValue::new("db_operation_name", "create_offer_for_job")];
                DISPATCHER_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
                Ok(offer)
            }
            Err(e) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    warn!(error = %abort_err, "Failed to abort create_offer_for_job transaction");
                }
                Err(e)
            }
        }
    }

    async fn get_offer_by_id(&self, id: Uuid) -> Result<Option<OfferItem>, DatabaseError> {
        let start = Instant::now();
        let filter = doc! { "id": id.to_string() };
        let result = self.get_offer_collection().find_one(filter, None).await?;
        let attributes = [KeyValue::new("db_operation_name", "get_offer_by_id")];
        DISPATCHER_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
        Ok(result)
    }

    async fn get_job_by_id(&self, id: Uuid) -> Result<Option<JobItem>, DatabaseError> {
        let start = Instant::now();
        let filter = doc! { "id": id.to_string() };
        let result = self.get_job_collection().find_one(filter, None).await?;
        let attributes = [KeyValue::new("db_operation_name", "get_job_by_id")];
        DISPATCHER_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
        Ok(result)
    }

    async fn get_expired_offers(
        &self,
        as_of: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<OfferItem>, DatabaseError> {
        let start = Instant::now();
        let filter = doc! {
            "status": bson::to_bson(&OfferStatus::Open)?,
            "expires_at": { "$lte": Bson::DateTime(as_of.into()) },
        };
        let options = FindOptions::builder().sort(doc! { "expires_at": 1 }).limit(limit).build();
        let offers: Vec<OfferItem> =
            self.get_offer_collection().find(filter, options).await?.try_collect().await?;

        debug!(count = offers.len(), "Fetched expired offers");
        let attributes = [KeyValue::new("db_operation_name", "get_expired_offers")];
        DISPATCHER_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
        Ok(offers)
    }

    async fn transition_offer(
        &self,
        current_offer: &OfferItem,
        offer_updates: OfferItemUpdates,
        job_updates: JobItemUpdates,
    ) -> Result<OfferItem, DatabaseError> {
        let start = Instant::now();
        let mut session = self.start_transaction().await?;

        let result: Result<OfferItem, DatabaseError> = async {
            // Open-status + version filter: whichever of two racing
            // transitions commits first wins, the loser matches nothing.
            let filter = doc! {
                "id": current_offer.id.to_string(),
                "status": bson::to_bson(&OfferStatus::Open)?,
                "version": current_offer.version,
            };
            let update = Self::offer_update_document(current_offer, &offer_updates)?;
            let options =
                FindOneAndUpdateOptions::builder().upsert(false).return_document(ReturnDocument::After).build();

            let updated_offer = self
                .get_offer_collection()
                .find_one_and_update_with_session(filter, update, options, &mut session)
                .await?
                .ok_or_else(|| {
                    DatabaseError::PreconditionFailed(format!(
                        "Offer {} is not open at version {}",
                        current_offer.id, current_offer.version
                    ))
                })?;

            if !job_updates.is_empty() {
                let job = self
                    .get_job_collection()
                    .find_one_with_session(doc! { "id": current_offer.job_id.to_string() }, None, &mut session)
                    .await?
                    .ok_or_else(|| DatabaseError::NotFound(format!("Job {}", current_offer.job_id)))?;
                self.update_job_in_session(&mut session, &job, &job_updates).await?;
            }

            Ok(updated_offer)
        }
        .await;

        match result {
            Ok(offer) => {
                session.commit_transaction().await?;
                debug!(offer_id = %offer.id, status = %offer.status, "Offer transitioned");
                let attributes = [KeyValue::new("db_operation_name", "transition_offer")];
                DISPATCHER_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
                Ok(offer)
            }
            Err(e) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    warn!(error = %abort_err, "Failed to abort transition_offer transaction");
                }
                Err(e)
            }
        }
    }
}
