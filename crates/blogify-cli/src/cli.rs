use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use blogify_sdk::Category;

#[derive(Parser)]
#[command(
    name = "blogify",
    about = "Blogify: write, browse and moderate blog posts from the terminal",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding the persisted records
    #[arg(long, global = true, env = "BLOGIFY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, env = "BLOGIFY_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List posts, optionally filtered
    List(ListArgs),
    /// Show a post (counts a view)
    Show(IdArgs),
    /// Publish a new post as the logged-in user
    Create(CreateArgs),
    /// Edit one of your posts
    Edit(EditArgs),
    /// Delete one of your posts
    Delete(IdArgs),
    /// Like a post
    Like(IdArgs),
    /// List featured posts
    Featured,
    /// List the newest posts
    Recent(LimitArgs),
    /// List the most viewed posts
    Popular(LimitArgs),
    /// Post count per category
    Categories,
    /// Post count per tag
    Tags,
    /// Log in
    Login(LoginArgs),
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Restore the seed posts (admin only)
    Reset,
    /// Print the stored collection as JSON
    Export,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short, long)]
    pub search: Option<String>,
    #[arg(short, long)]
    pub category: Option<Category>,
    #[arg(short, long)]
    pub tag: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    pub id: String,
}

#[derive(Args)]
pub struct LimitArgs {
    #[arg(short = 'n', long, default_value = "3")]
    pub limit: usize,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub excerpt: String,
    #[arg(long)]
    pub content: String,
    #[arg(short, long, default_value = "tech")]
    pub category: Category,
    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub featured: bool,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(short, long)]
    pub category: Option<Category>,
    /// Comma-separated tags, replacing the current ones
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<String>,
    #[arg(long)]
    pub clear_image: bool,
    #[arg(long)]
    pub featured: Option<bool>,
}

#[derive(Args)]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
}
