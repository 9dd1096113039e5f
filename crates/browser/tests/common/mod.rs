#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use blog_api::client::{Client, Config};
use serde::Deserialize;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Debug, Clone)]
struct StoredPost {
    id: u64,
    title: String,
    content: String,
    author: Option<(String, String)>,
}

impl StoredPost {
    fn entity(&self, with_author: bool) -> Value {
        let mut attributes = json!({"title": self.title, "content": self.content});
        if with_author {
            attributes["user"] = match &self.author {
                Some((username, email)) => json!({"data": {
                    "id": "1",
                    "attributes": {"username": username, "email": email}
                }}),
                None => json!({"data": null}),
            };
        }
        json!({"id": self.id.to_string(), "attributes": attributes})
    }
}

#[derive(Debug, Default)]
struct Store {
    posts: Vec<StoredPost>,
    next_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Body {
    operation_name: String,
    #[serde(default)]
    variables: Value,
}

/// Strapi-shaped GraphQL backend keeping posts in memory.
/// Posts with an odd id have an author.
#[derive(Clone)]
pub struct FakeCms {
    store: Arc<Mutex<Store>>,
}

impl FakeCms {
    pub fn with_posts(n: u64) -> Self {
        let posts = (1..=n)
            .map(|id| StoredPost {
                id,
                title: format!("Post {}", id),
                content: format!("Content {}", id),
                author: (id % 2 == 1)
                    .then(|| (format!("author{}", id), format!("author{}@example.com", id))),
            })
            .collect();
        FakeCms {
            store: Arc::new(Mutex::new(Store {
                posts,
                next_id: n + 1,
            })),
        }
    }

    /// Drop every post past the first `n`, as if they were deleted elsewhere.
    pub fn truncate(&self, n: usize) {
        self.store.lock().unwrap().posts.truncate(n);
    }

    fn handle(&self, body: Body) -> Value {
        let mut store = self.store.lock().unwrap();
        let vars = &body.variables;
        match body.operation_name.as_str() {
            "GetAllPosts" => {
                let data: Vec<Value> = store.posts.iter().map(|p| p.entity(false)).collect();
                json!({"data": {"posts": {"data": data}}})
            }
            "GetPosts" => {
                let page = vars["page"].as_u64().unwrap_or(1).max(1);
                let page_size = vars["pageSize"].as_u64().unwrap_or(25).max(1);
                let total = store.posts.len() as u64;
                let data: Vec<Value> = store
                    .posts
                    .iter()
                    .skip(((page - 1) * page_size) as usize)
                    .take(page_size as usize)
                    .map(|p| p.entity(true))
                    .collect();
                json!({"data": {"posts": {
                    "data": data,
                    "meta": {"pagination": {
                        "page": page,
                        "pageSize": page_size,
                        "pageCount": total.div_ceil(page_size),
                        "total": total
                    }}
                }}})
            }
            "GetPostByTitle" => {
                let title = vars["title"].as_str().unwrap_or_default();
                let data: Vec<Value> = store
                    .posts
                    .iter()
                    .filter(|p| p.title == title)
                    .map(|p| p.entity(false))
                    .collect();
                json!({"data": {"posts": {"data": data}}})
            }
            "GetPostById" => {
                let data = find(&store, vars)
                    .map(|i| store.posts[i].entity(false))
                    .unwrap_or(Value::Null);
                json!({"data": {"post": {"data": data}}})
            }
            "CreatePost" => {
                let post = StoredPost {
                    id: store.next_id,
                    title: vars["title"].as_str().unwrap_or_default().to_string(),
                    content: vars["content"].as_str().unwrap_or_default().to_string(),
                    author: None,
                };
                store.next_id += 1;
                let entity = post.entity(false);
                store.posts.push(post);
                json!({"data": {"createPost": {"data": entity}}})
            }
            "UpdatePost" => match find(&store, vars) {
                Some(i) => {
                    let post = &mut store.posts[i];
                    if let Some(title) = vars["data"]["title"].as_str() {
                        post.title = title.to_string();
                    }
                    if let Some(content) = vars["data"]["content"].as_str() {
                        post.content = content.to_string();
                    }
                    json!({"data": {"updatePost": {"data": post.entity(false)}}})
                }
                None => not_found("updatePost"),
            },
            "DeletePost" => match find(&store, vars) {
                Some(i) => {
                    let post = store.posts.remove(i);
                    json!({"data": {"deletePost": {"data": post.entity(false)}}})
                }
                None => not_found("deletePost"),
            },
            other => json!({"errors": [{"message": format!("Unknown operation {}", other)}]}),
        }
    }
}

fn find(store: &Store, vars: &Value) -> Option<usize> {
    let id = vars["id"].as_str()?;
    store.posts.iter().position(|p| p.id.to_string() == id)
}

fn not_found(field: &str) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(field.to_string(), Value::Null);
    json!({"data": data, "errors": [{"message": "Not Found", "path": [field]}]})
}

impl Respond for FakeCms {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match request.body_json::<Body>() {
            Ok(body) => ResponseTemplate::new(200).set_body_json(self.handle(body)),
            Err(_) => ResponseTemplate::new(400),
        }
    }
}

pub async fn start(cms: FakeCms) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(cms)
        .mount(&server)
        .await;
    server
}

pub async fn start_failing(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

pub fn client(server: &MockServer) -> Arc<Client> {
    let cfg = Config::new(Some(format!("{}/graphql", server.uri())), None);
    Arc::new(Client::new(Some(cfg)).unwrap())
}

pub async fn requests(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|r| r.body_json::<Value>().ok())
        .collect()
}
