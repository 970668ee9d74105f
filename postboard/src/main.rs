use anyhow::{Context, Result};
use clap::Parser;
use postboard::api::ApiClient;
use postboard::app::App;
use postboard::logging::{self, LogConfig};
use postboard::page::Page;
use postboard::server_config::{ServerConfigManager, SERVER_URL_ENV};
use postboard_types::{PostId, UserId};
use std::path::PathBuf;

/// Postboard - browse employees, their posts and the comments on each post
#[derive(Parser)]
#[command(name = "postboard")]
#[command(about = "Render an employee's posts and comments as an HTML page")]
#[command(version)]
struct Cli {
    /// API base URL to fetch from
    #[arg(long, short, env = SERVER_URL_ENV)]
    server: Option<String>,

    /// Employee to select once the dropdown is filled
    #[arg(long, short)]
    user: Option<UserId>,

    /// Open the comments of this post (repeatable)
    #[arg(long = "show-comments", short = 'c')]
    show_comments: Vec<PostId>,

    /// Write the page here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Remember the resolved API base URL for later runs
    #[arg(long)]
    save_server: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

// Lets POSTBOARD_API_URL come from a .env file in the working directory
fn load_env() {
    let _ = dotenv::dotenv();
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let server_config_manager = ServerConfigManager::new()?;
    let server_url = server_config_manager.determine_server_url(cli.server)?;
    log::info!(
        "Using {} at {}",
        server_config_manager.get_server_description(&server_url),
        server_url
    );

    if cli.save_server {
        server_config_manager
            .save_server_url(server_url.clone())
            .context("Failed to save server URL")?;
    }

    let page = Page::shell().context("Failed to build page shell")?;
    let app = App::with_log_config(page, ApiClient::new(server_url), log_config);

    app.init_app().await.context("Failed to load employees")?;

    if let Some(user_id) = cli.user {
        app.select_user(user_id)
            .await
            .with_context(|| format!("Failed to show posts of employee {}", user_id))?;

        for post_id in cli.show_comments {
            app.click_comments(post_id)
                .await
                .with_context(|| format!("Failed to open comments of post {}", post_id))?;
        }
    } else if !cli.show_comments.is_empty() {
        log::warn!("--show-comments has no effect without --user");
    }

    let html = app.page().to_html();
    match cli.output {
        Some(path) => std::fs::write(&path, html)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", html),
    }

    Ok(())
}
