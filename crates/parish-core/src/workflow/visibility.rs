//! Which priest-assigned records a user may see.

use serde_json::Value;

use crate::Result;
use crate::accessor::Accessor;
use crate::entities::{PriestConfirmationStatus, kinds};
use crate::traits::Store;
use crate::types::RecordId;
use crate::user::User;

const PRIEST_ID_FIELD: &str = "priestId";
const PRIEST_CONFIRMATION_FIELD: &str = "priestConfirmationStatus";

/// Find the priest record linked to `user` through its `authId`.
pub async fn priest_id_for<S: Store + Clone>(store: &S, user: &User) -> Result<Option<RecordId>> {
    let priests = Accessor::<_, kinds::Priests>::new(store.clone());
    let linked = priests.search_by_field("authId", user.id.as_str()).await?;
    Ok(linked.into_iter().next().and_then(|p| p.meta.id))
}

/// Returns true if `user` may see `record`.
///
/// Super admins see everything. Anyone else sees only records assigned to
/// their priest id that the priest has not declined. Records that are not
/// objects or carry no `priestId` are hidden.
pub fn is_visible(record: &Value, user: &User, priest_id: Option<&str>) -> bool {
    if user.is_super_admin {
        return true;
    }
    let (Some(fields), Some(priest_id)) = (record.as_object(), priest_id) else {
        return false;
    };
    let Some(assigned) = fields.get(PRIEST_ID_FIELD) else {
        return false;
    };
    let declined = fields
        .get(PRIEST_CONFIRMATION_FIELD)
        .and_then(Value::as_str)
        == Some(PriestConfirmationStatus::Rejected.as_str());

    assigned.as_str() == Some(priest_id) && !declined
}

/// Keep the records `user` may see, in order.
pub fn visible_to(records: Vec<Value>, user: &User, priest_id: Option<&str>) -> Vec<Value> {
    records
        .into_iter()
        .filter(|record| is_visible(record, user, priest_id))
        .collect()
}
