//! Request payloads of the three post operations the backend exposes.

use crate::model::{
    Id,
    actor::ActorMarker,
    like::LikeAction,
    post::{PostBody, PostMarker},
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct UpdatePostBody {
    pub id: Id<PostMarker>,
    pub body: PostBody,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLike {
    pub id: Id<PostMarker>,
    pub actor_id: Id<ActorMarker>,
    pub action: LikeAction,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct DeletePost {
    pub id: Id<PostMarker>,
}
