use crate::model::{
    Id,
    actor::{Actor, ActorMarker},
    like::LikeSet,
};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id<PostMarker>,
    pub body: PostBody,
    #[serde(with = "time::serde::rfc3339")]
    pub posted_at: OffsetDateTime,
    pub author: Actor,
    pub liked_by: LikeSet,
}

impl Post {
    #[must_use]
    pub fn is_authored_by(&self, actor: &Id<ActorMarker>) -> bool {
        self.author.id == *actor
    }

    #[must_use]
    pub fn with_body(&self, body: PostBody) -> Self {
        Self {
            body,
            ..self.clone()
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub author: Actor,
    pub body: PostBody,
}

/// Text of a post. Never empty.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct PostBody(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The post body must not be empty")]
pub struct InvalidPostBodyError;

impl PostBody {
    pub fn new(body: String) -> Result<Self, InvalidPostBodyError> {
        if body.is_empty() {
            Err(InvalidPostBodyError)
        } else {
            Ok(PostBody(body))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for PostBody {
    type Error = InvalidPostBodyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_owned())
    }
}

impl<'de> Deserialize<'de> for PostBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        PostBody::new(inner).map_err(|_| Error::invalid_value(Unexpected::Str(""), &"PostBody"))
    }
}
