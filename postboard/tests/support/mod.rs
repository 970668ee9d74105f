//! In-process stand-in for the employee/post/comment REST service.

#![allow(dead_code)]

pub mod capture;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use postboard_types::{Comment, CommentId, Company, Post, PostId, User, UserId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Failures and delays to inject, per route
#[derive(Debug, Clone, Default)]
pub struct Faults {
    pub users: bool,
    pub user: bool,
    pub posts: bool,
    pub comments: bool,
    /// Serve `/users` with a 200 and a body that is not JSON
    pub garbage_users: bool,
    /// Delay `/users/{id}/posts` for one employee
    pub slow_posts: Option<(UserId, Duration)>,
}

struct Shared {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    faults: Faults,
    requests: AtomicUsize,
}

pub struct Fixture {
    pub base_url: String,
    shared: Arc<Shared>,
}

impl Fixture {
    /// Requests served so far, successful or not
    pub fn requests(&self) -> usize {
        self.shared.requests.load(Ordering::SeqCst)
    }
}

fn user(id: u64, name: &str, company: &str, catch_phrase: &str) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        company: Company {
            name: company.to_string(),
            catch_phrase: catch_phrase.to_string(),
            bs: None,
        },
        username: None,
        email: None,
        phone: None,
        website: None,
    }
}

fn post(id: u64, user_id: u64, title: &str) -> Post {
    Post {
        id: PostId(id),
        user_id: UserId(user_id),
        title: title.to_string(),
        body: format!("body of post {}", id),
    }
}

fn comment(id: u64, post_id: u64, email: &str) -> Comment {
    Comment {
        id: CommentId(id),
        post_id: Some(PostId(post_id)),
        name: format!("comment {}", id),
        email: email.to_string(),
        body: format!("comment body {}", id),
    }
}

/// Leanne (posts 1 and 2), Ervin (no posts), Clementine (post 3).
/// Post 1 has two comments, post 2 one, post 3 none.
fn seed() -> (Vec<User>, Vec<Post>, Vec<Comment>) {
    let users = vec![
        user(1, "Leanne Graham", "Romaguera-Crona", "Multi-layered client-server neural-net"),
        user(2, "Ervin Howell", "Deckow-Crist", "Proactive didactic contingency"),
        user(3, "Clementine Bauch", "Romaguera-Jacobson", "Face to face bifurcated interface"),
    ];
    let posts = vec![
        post(1, 1, "sunt aut facere"),
        post(2, 1, "qui est esse"),
        post(3, 3, "ea molestias <quasi>"),
    ];
    let comments = vec![
        comment(1, 1, "Eliseo@gardner.biz"),
        comment(2, 1, "Jayne_Kuhic@sydney.com"),
        comment(3, 2, "Nikita@garfield.biz"),
    ];
    (users, posts, comments)
}

fn failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "fixture failure").into_response()
}

async fn get_users(State(state): State<Arc<Shared>>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if state.faults.users {
        return failure();
    }
    if state.faults.garbage_users {
        return (StatusCode::OK, "this is not json").into_response();
    }
    Json(state.users.clone()).into_response()
}

async fn get_user(State(state): State<Arc<Shared>>, Path(id): Path<u64>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if state.faults.user {
        return failure();
    }
    match state.users.iter().find(|u| u.id == UserId(id)) {
        Some(user) => Json(user.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "{}").into_response(),
    }
}

async fn get_user_posts(State(state): State<Arc<Shared>>, Path(id): Path<u64>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if let Some((slow_id, delay)) = state.faults.slow_posts {
        if slow_id == UserId(id) {
            tokio::time::sleep(delay).await;
        }
    }
    if state.faults.posts {
        return failure();
    }
    let posts: Vec<Post> = state
        .posts
        .iter()
        .filter(|p| p.user_id == UserId(id))
        .cloned()
        .collect();
    Json(posts).into_response()
}

async fn get_post_comments(State(state): State<Arc<Shared>>, Path(id): Path<u64>) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if state.faults.comments {
        return failure();
    }
    let comments: Vec<Comment> = state
        .comments
        .iter()
        .filter(|c| c.post_id == Some(PostId(id)))
        .cloned()
        .collect();
    Json(comments).into_response()
}

/// Serve the seeded data on an ephemeral local port
pub async fn spawn(faults: Faults) -> Fixture {
    let (users, posts, comments) = seed();
    let shared = Arc::new(Shared {
        users,
        posts,
        comments,
        faults,
        requests: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/users", get(get_users))
        .route("/users/:id", get(get_user))
        .route("/users/:id/posts", get(get_user_posts))
        .route("/posts/:id/comments", get(get_post_comments))
        .with_state(Arc::clone(&shared));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Fixture {
        base_url: format!("http://{}", addr),
        shared,
    }
}
