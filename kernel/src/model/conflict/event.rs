use derive_new::new;

use crate::model::id::{ConflictId, UserId};

#[derive(new)]
pub struct ResolveConflict {
    pub conflict_id: ConflictId,
    pub resolved_by: UserId,
    pub resolution: String,
}
