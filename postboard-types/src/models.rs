use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: Option<String>,
}

/// An employee as returned by `/users` and `/users/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub company: Company,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    /// Not consulted by the client; the post is implied by the request
    #[serde(default)]
    pub post_id: Option<PostId>,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl User {
    /// "Author: {name} with {company}" line shown under each post
    pub fn byline(&self) -> String {
        format!("Author: {} with {}", self.name, self.company.name)
    }
}
