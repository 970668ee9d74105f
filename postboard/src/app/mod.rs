use crate::api::ApiClient;
use crate::dom::{Event, EventType, Handler, NodeId};
use crate::error::{RenderError, RenderResult};
use crate::logging::LogConfig;
use crate::page::{select_menu, Page};
use crate::render::{find_comment_button, populate_select_menu, toggle_comments, Refresh, Renderer};
use postboard_types::{Post, PostId, User, UserId};

/// Employee picked when the dropdown has no usable value
pub const FALLBACK_USER_ID: UserId = UserId(1);

/// Result of loading the page
#[derive(Debug, Clone)]
pub struct PageInit {
    pub users: Vec<User>,
    pub select: NodeId,
}

/// Result of one dropdown change
#[derive(Debug, Clone)]
pub struct Selection {
    pub user_id: UserId,
    pub posts: Vec<Post>,
    pub refresh: Refresh,
}

/// The browsing application: page, HTTP client and event wiring
#[derive(Clone)]
pub struct App {
    renderer: Renderer,
    pub log_config: LogConfig,
}

impl App {
    pub fn new(page: Page, api_client: ApiClient) -> Self {
        Self::with_log_config(page, api_client, LogConfig::default())
    }

    pub fn with_log_config(page: Page, api_client: ApiClient, log_config: LogConfig) -> Self {
        let api_client = api_client.with_log_config(log_config.clone());
        Self {
            renderer: Renderer::new(page, api_client).with_log_config(log_config.clone()),
            log_config,
        }
    }

    pub fn page(&self) -> &Page {
        self.renderer.page()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Fetch every employee and fill the dropdown
    pub async fn init_page(&self) -> RenderResult<PageInit> {
        let users = self.renderer.api().get_users().await?;
        let select = self
            .page()
            .with(|doc| populate_select_menu(doc, Some(users.as_slice())))?;
        log_debug!(self.log_config, "Loaded {} employees", users.len());
        Ok(PageInit { users, select })
    }

    /// Load the page, then listen for dropdown changes
    pub async fn init_app(&self) -> RenderResult<PageInit> {
        let init = self.init_page().await?;
        self.page().with(|doc| {
            doc.add_event_listener(init.select, EventType::Change, Handler::SelectUser)
        })?;
        Ok(init)
    }

    /// Show the posts of the employee chosen in the dropdown.
    ///
    /// Opens a new render generation first, so any pass still running for an
    /// earlier selection stops writing to the page.
    pub async fn select_menu_change_event_handler(
        &self,
        event: Option<&Event>,
    ) -> RenderResult<Selection> {
        let event = event.ok_or(RenderError::MissingArgument("event"))?;
        let ticket = self.renderer.generations().issue();

        let user_id = self
            .page()
            .with(|doc| doc.value(event.target))
            .as_deref()
            .and_then(UserId::parse)
            .unwrap_or(FALLBACK_USER_ID);
        log_event!(
            self.log_config,
            "Selected user {} (generation {})",
            user_id,
            ticket.generation()
        );

        let posts = self.renderer.api().get_user_posts(Some(user_id)).await?;
        ticket.ensure_current()?;

        let refresh = self.renderer.refresh_posts(Some(posts.as_slice()), &ticket).await?;
        Ok(Selection {
            user_id,
            posts,
            refresh,
        })
    }

    /// Run the listeners registered on the event's target.
    ///
    /// Returns how many listeners ran.
    pub async fn dispatch(&self, event: Event) -> RenderResult<usize> {
        let handlers = self
            .page()
            .with(|doc| doc.listeners(event.target, event.event_type));
        log_event!(
            self.log_config,
            "{} on {:?}: {} listener(s)",
            event.event_type.as_str(),
            event.target,
            handlers.len()
        );

        for handler in &handlers {
            match handler {
                Handler::ToggleComments(post_id) => {
                    self.page()
                        .with(|doc| toggle_comments(doc, Some(&event), Some(*post_id)))?;
                }
                Handler::SelectUser => {
                    self.select_menu_change_event_handler(Some(&event)).await?;
                }
            }
        }

        Ok(handlers.len())
    }

    pub async fn click(&self, target: NodeId) -> RenderResult<usize> {
        self.dispatch(Event::click(target)).await
    }

    /// Click the comment button of a post, if one is on the page
    pub async fn click_comments(&self, post_id: PostId) -> RenderResult<usize> {
        let button = self
            .page()
            .with(|doc| find_comment_button(doc, post_id))
            .ok_or(RenderError::MissingElement("comment button"))?;
        self.click(button).await
    }

    /// Choose an employee in the dropdown and fire `change`, as a user would
    pub async fn select_user(&self, user_id: UserId) -> RenderResult<usize> {
        let select = self.page().with(|doc| -> RenderResult<NodeId> {
            let select = select_menu(doc).ok_or(RenderError::MissingElement("#selectMenu"))?;
            if !doc.set_value(select, &user_id.to_string())? {
                return Err(RenderError::NoSuchOption(user_id));
            }
            Ok(select)
        })?;
        self.dispatch(Event::change(select)).await
    }
}
