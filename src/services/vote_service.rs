// ==================== UPVOTE COORDINATOR ====================
// The one operation with a real invariant: a user may increment a
// request's counter at most once, under concurrent invocation, across
// handler instances that share no memory. Mutual exclusion comes from
// the store, not from process-local locks.

use crate::{
    database::MongoDB,
    models::{FeatureRequest, User},
    utils::AppError,
};
use mongodb::bson::{doc, oid::ObjectId, Document};

fn parse_request_id(request_id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(request_id)
        .map_err(|_| AppError::InvalidArgument("Invalid request ID".to_string()))
}

/// Filter for the duplicate-vote gate: matches the user only while
/// `upvoted_on` does not yet hold the request id.
fn gate_filter(user_id: &str, request_id: &str) -> Document {
    doc! { "user_id": user_id, "upvoted_on": { "$ne": request_id } }
}

fn gate_update(request_id: &str) -> Document {
    doc! { "$addToSet": { "upvoted_on": request_id } }
}

fn counter_update() -> Document {
    doc! { "$inc": { "upvotes": 1_i64 } }
}

/// Applies a one-time upvote from `user_id` to request `request_id`.
///
/// Duplicate protection is a single conditional update on the user
/// document: the filter excludes users whose `upvoted_on` already holds
/// the request id, and MongoDB evaluates filter and update atomically
/// per document. Of N concurrent calls for the same (user, request)
/// pair exactly one observes `modified_count == 1`; the rest fail the
/// precondition. Only the winner touches the counter, via `$inc` —
/// never a read-modify-write of the request record.
pub async fn upvote(db: &MongoDB, user_id: &str, request_id: &str) -> Result<(), AppError> {
    let request_oid = parse_request_id(request_id)?;

    // Requests are never deleted, so a record that exists here still
    // exists for the `$inc` below; a failure past this point cannot
    // leave a set entry with no matching request.
    let requests = db.collection::<FeatureRequest>("requests");

    if requests
        .find_one(doc! { "_id": request_oid })
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "request '{}' does not exist",
            request_id
        )));
    }

    let users = db.collection::<User>("users");

    let gate = users
        .update_one(gate_filter(user_id, request_id), gate_update(request_id))
        .await?;

    if gate.modified_count == 0 {
        // The filter did not match: either there is no user record, or
        // `upvoted_on` already contained the request id.
        return match users.find_one(doc! { "user_id": user_id }).await? {
            None => Err(AppError::NotFound(format!(
                "no user record for '{}'",
                user_id
            ))),
            Some(_) => Err(AppError::FailedPrecondition(
                "You can only vote something up once".to_string(),
            )),
        };
    }

    requests
        .update_one(doc! { "_id": request_oid }, counter_update())
        .await?;

    log::info!("👍 User {} upvoted request {}", user_id, request_id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_filter_excludes_prior_voters() {
        let filter = gate_filter("uid-1", "req-1");
        assert_eq!(filter.get_str("user_id").unwrap(), "uid-1");
        // The membership condition rides in the filter, so check and
        // mark happen in one atomic document update.
        let condition = filter.get_document("upvoted_on").unwrap();
        assert_eq!(condition.get_str("$ne").unwrap(), "req-1");
    }

    #[test]
    fn gate_update_marks_membership_once() {
        let update = gate_update("req-1");
        let add = update.get_document("$addToSet").unwrap();
        assert_eq!(add.get_str("upvoted_on").unwrap(), "req-1");
        // $addToSet is the only operator: nothing else on the user
        // record may change when a vote lands.
        assert_eq!(update.len(), 1);
    }

    #[test]
    fn counter_update_increments_by_exactly_one() {
        let update = counter_update();
        let inc = update.get_document("$inc").unwrap();
        assert_eq!(inc.get_i64("upvotes").unwrap(), 1);
        assert_eq!(update.len(), 1);
    }

    #[test]
    fn malformed_request_id_is_an_invalid_argument() {
        match parse_request_id("not-a-hex-oid") {
            Err(AppError::InvalidArgument(_)) => {}
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn well_formed_request_id_parses() {
        let oid = ObjectId::new();
        assert_eq!(parse_request_id(&oid.to_hex()).unwrap(), oid);
    }
}
