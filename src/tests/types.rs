use mongodb::bson;
use rstest::rstest;

use crate::tests::utils::{build_job_item, build_open_offer};
use crate::types::jobs::JobStatus;
use crate::types::offers::OfferItem;

#[rstest]
fn offer_documents_round_trip_resolution_fields() {
    let mut job = build_job_item(JobStatus::Pending);
    let mut offer = build_open_offer(&mut job, 1);
    offer.resolution_note = Some("too far away".to_string());
    offer.resolved_by_actor = Some("admin-1".to_string());

    let document = bson::to_document(&offer).unwrap();
    let read_back: OfferItem = bson::from_document(document).unwrap();
    assert_eq!(read_back.resolution_note.as_deref(), Some("too far away"));
    assert_eq!(read_back.resolved_by_actor.as_deref(), Some("admin-1"));
    assert_eq!(read_back, offer);
}
