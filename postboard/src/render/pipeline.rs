use crate::api::ApiClient;
use crate::dom::{Document, NodeId};
use crate::error::{RenderError, RenderResult};
use crate::logging::LogConfig;
use crate::page::{main_element, select_menu, Page, DEFAULT_TEXT, DEFAULT_TEXT_CLASS};
use postboard_types::{Comment, Post, PostId, User};

use super::generation::{Generations, RenderTicket};
use super::helpers::{create_elem_with_text, create_select_options, delete_child_elements};
use super::listeners::{add_button_listeners, remove_button_listeners};
use super::toggle::{HIDE_CLASS, POST_ID_ATTR, SHOW_COMMENTS};

/// Fragment with one `article` per comment: name, body and sender
pub fn create_comments(
    doc: &mut Document,
    comments: Option<&[Comment]>,
) -> RenderResult<Option<NodeId>> {
    let Some(comments) = comments else {
        return Ok(None);
    };

    let fragment = doc.create_document_fragment();
    for comment in comments {
        let article = doc.create_element("article");
        let heading = create_elem_with_text(doc, "h3", &comment.name, None)?;
        let body = create_elem_with_text(doc, "p", &comment.body, None)?;
        let from = create_elem_with_text(doc, "p", &format!("From: {}", comment.email), None)?;

        doc.append_child(article, heading)?;
        doc.append_child(article, body)?;
        doc.append_child(article, from)?;
        doc.append_child(fragment, article)?;
    }

    Ok(Some(fragment))
}

/// Append one option per user to `#selectMenu`
pub fn populate_select_menu(doc: &mut Document, users: Option<&[User]>) -> RenderResult<NodeId> {
    let users = users.ok_or(RenderError::MissingArgument("users"))?;
    let select = select_menu(doc).ok_or(RenderError::MissingElement("#selectMenu"))?;

    let options = create_select_options(doc, Some(users))?.unwrap_or_default();
    for option in options {
        doc.append_child(select, option)?;
    }

    Ok(select)
}

/// Outcome of one [`Renderer::refresh_posts`] pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    /// Buttons whose listeners were detached before clearing
    pub removed: Vec<NodeId>,
    /// The cleared `main` element
    pub main: NodeId,
    /// What was appended to `main` (an emptied fragment or the placeholder)
    pub content: NodeId,
    /// Buttons whose listeners were attached afterwards
    pub added: Vec<NodeId>,
}

/// Fetch-then-render half of the pipeline.
///
/// Cheap to clone; clones share the page, the HTTP client and the
/// generation counter.
#[derive(Clone)]
pub struct Renderer {
    page: Page,
    api: ApiClient,
    generations: Generations,
    log_config: LogConfig,
}

impl Renderer {
    pub fn new(page: Page, api: ApiClient) -> Self {
        Self {
            page,
            api,
            generations: Generations::new(),
            log_config: LogConfig::default(),
        }
    }

    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn generations(&self) -> &Generations {
        &self.generations
    }

    /// Hidden `section` holding the comments of one post
    pub async fn display_comments(&self, post_id: Option<PostId>) -> RenderResult<NodeId> {
        let post_id = post_id.ok_or(RenderError::MissingArgument("post_id"))?;

        let section = self.page.with(|doc| -> RenderResult<NodeId> {
            let section = doc.create_element("section");
            doc.set_attribute(section, POST_ID_ATTR, &post_id.to_string())?;
            doc.add_class(section, "comments")?;
            doc.add_class(section, HIDE_CLASS)?;
            Ok(section)
        })?;

        let comments = match self.api.get_post_comments(Some(post_id)).await {
            Ok(comments) => comments,
            Err(e) => {
                log::error!("Failed to fetch comments for post ID: {}", post_id);
                return Err(e.into());
            }
        };

        self.page.with(|doc| -> RenderResult<NodeId> {
            if let Some(fragment) = create_comments(doc, Some(comments.as_slice()))? {
                doc.append_child(section, fragment)?;
            }
            Ok(section)
        })
    }

    /// Fragment with one `article` per post.
    ///
    /// Each post's author and comments are awaited before the next post is
    /// started, so N posts cost 2N requests in sequence.
    pub async fn create_posts(
        &self,
        posts: Option<&[Post]>,
        ticket: &RenderTicket,
    ) -> RenderResult<NodeId> {
        let posts = posts.ok_or(RenderError::MissingArgument("posts"))?;
        let fragment = self.page.with(|doc| doc.create_document_fragment());

        for post in posts {
            let article = self.page.with(|doc| -> RenderResult<NodeId> {
                let article = doc.create_element("article");
                let title = create_elem_with_text(doc, "h2", &post.title, None)?;
                let body = create_elem_with_text(doc, "p", &post.body, None)?;
                let id_label = create_elem_with_text(doc, "p", &format!("Post ID: {}", post.id), None)?;
                doc.append_child(article, title)?;
                doc.append_child(article, body)?;
                doc.append_child(article, id_label)?;
                Ok(article)
            })?;

            let author = self.api.get_user(Some(post.user_id)).await?;
            ticket.ensure_current()?;

            self.page.with(|doc| -> RenderResult<()> {
                let author_info = create_elem_with_text(doc, "p", &author.byline(), None)?;
                let catch_phrase =
                    create_elem_with_text(doc, "p", &author.company.catch_phrase, None)?;
                let button = create_elem_with_text(doc, "button", SHOW_COMMENTS, None)?;
                doc.set_attribute(button, POST_ID_ATTR, &post.id.to_string())?;

                doc.append_child(article, author_info)?;
                doc.append_child(article, catch_phrase)?;
                doc.append_child(article, button)?;
                Ok(())
            })?;

            let section = self.display_comments(Some(post.id)).await?;
            ticket.ensure_current()?;

            self.page.with(|doc| -> RenderResult<()> {
                doc.append_child(article, section)?;
                doc.append_child(fragment, article)?;
                Ok(())
            })?;
            log_rendering!(self.log_config, "Rendered post {}", post.id);
        }

        Ok(fragment)
    }

    /// Render `posts` (or the placeholder when there are none) into `main`
    pub async fn display_posts(
        &self,
        posts: Option<&[Post]>,
        ticket: &RenderTicket,
    ) -> RenderResult<NodeId> {
        let content = match posts {
            Some(posts) if !posts.is_empty() => self.create_posts(Some(posts), ticket).await?,
            _ => self.page.with(|doc| {
                create_elem_with_text(doc, "p", DEFAULT_TEXT, Some(DEFAULT_TEXT_CLASS))
            })?,
        };

        // Check and append under one lock so a newer pass cannot slip in between
        self.page.with(|doc| -> RenderResult<NodeId> {
            ticket.ensure_current()?;
            let main = main_element(doc).ok_or(RenderError::MissingElement("main"))?;
            doc.append_child(main, content)?;
            Ok(content)
        })
    }

    /// Replace the contents of `main` with `posts` and rewire the buttons
    pub async fn refresh_posts(
        &self,
        posts: Option<&[Post]>,
        ticket: &RenderTicket,
    ) -> RenderResult<Refresh> {
        let posts = posts.ok_or(RenderError::MissingArgument("posts"))?;

        let (removed, main) = self.page.with(|doc| -> RenderResult<(Vec<NodeId>, NodeId)> {
            ticket.ensure_current()?;
            let removed = remove_button_listeners(doc);
            let main = main_element(doc).ok_or(RenderError::MissingElement("main"))?;
            let main = delete_child_elements(doc, main).ok_or(RenderError::NotAnElement(main))?;
            Ok((removed, main))
        })?;
        log_rendering!(
            self.log_config,
            "Refreshing {} posts (generation {})",
            posts.len(),
            ticket.generation()
        );

        let content = self.display_posts(Some(posts), ticket).await?;

        let added = self.page.with(|doc| -> RenderResult<Vec<NodeId>> {
            ticket.ensure_current()?;
            Ok(add_button_listeners(doc)?)
        })?;

        Ok(Refresh {
            removed,
            main,
            content,
            added,
        })
    }
}
