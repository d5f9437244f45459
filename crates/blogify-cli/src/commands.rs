use anyhow::Context;
use colored::Colorize;
use serde_json::json;

use blogify_sdk::{
    parse_tags, Blogify, BlogifyConfig, LikeOutcome, Post, PostDraft, PostId, PostPatch,
    PostQuery,
};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let blog = Blogify::open(config).context("failed to open the blog data directory")?;
    let out = Output { format: cli.format };

    match cli.command {
        Command::List(args) => cmd_list(&blog, &out, args),
        Command::Show(args) => cmd_show(&blog, &out, args),
        Command::Create(args) => cmd_create(&blog, &out, args),
        Command::Edit(args) => cmd_edit(&blog, &out, args),
        Command::Delete(args) => cmd_delete(&blog, &out, args),
        Command::Like(args) => cmd_like(&blog, &out, args),
        Command::Featured => out.posts("Featured", &blog.featured()),
        Command::Recent(args) => out.posts("Recent", &blog.recent(args.limit)),
        Command::Popular(args) => out.posts("Popular", &blog.popular(args.limit)),
        Command::Categories => cmd_categories(&blog, &out),
        Command::Tags => cmd_tags(&blog, &out),
        Command::Login(args) => cmd_login(&blog, &out, args),
        Command::Logout => cmd_logout(&blog, &out),
        Command::Whoami => cmd_whoami(&blog, &out),
        Command::Reset => cmd_reset(&blog, &out),
        Command::Export => {
            println!("{}", blog.content().export_json()?);
            Ok(())
        }
    }
}

/// Config file first, then `--data-dir` / `BLOGIFY_DATA_DIR` on top.
fn load_config(cli: &Cli) -> anyhow::Result<BlogifyConfig> {
    let config = match &cli.config {
        Some(path) => BlogifyConfig::load(path)?,
        None => BlogifyConfig::default(),
    };
    Ok(match &cli.data_dir {
        Some(dir) => config.with_data_dir(dir.clone()),
        None => config,
    })
}

fn parse_id(raw: &str) -> anyhow::Result<PostId> {
    PostId::parse(raw).with_context(|| format!("invalid post id {raw:?}"))
}

fn cmd_list(blog: &Blogify, out: &Output, args: ListArgs) -> anyhow::Result<()> {
    let mut query = PostQuery::new();
    if let Some(text) = args.search {
        query = query.text(text);
    }
    if let Some(category) = args.category {
        query = query.category(category);
    }
    if let Some(tag) = args.tag {
        query = query.tag(tag);
    }

    let home = blog.home(&query);
    if let OutputFormat::Json = out.format {
        return out.json(&json!({ "featured": home.featured, "posts": home.posts }));
    }

    if home.total() == 0 {
        println!("No posts found.");
        return Ok(());
    }
    if !home.featured.is_empty() {
        out.posts("Featured", &home.featured)?;
        println!();
    }
    let heading = if query.is_unfiltered() {
        "Latest".to_string()
    } else {
        format!("Results ({})", home.posts.len())
    };
    out.posts(&heading, &home.posts)
}

fn cmd_show(blog: &Blogify, out: &Output, args: IdArgs) -> anyhow::Result<()> {
    let post = blog.open_post(&parse_id(&args.id)?)?;
    if let OutputFormat::Json = out.format {
        return out.json(&post);
    }

    println!("{}", post.title.bold());
    println!(
        "{} · {} · {}",
        post.author.cyan(),
        post.category.as_str().yellow(),
        post.published_at.format("%B %-d, %Y")
    );
    if let Some(updated) = post.updated_at {
        println!("{}", format!("updated {}", updated.format("%B %-d, %Y")).dimmed());
    }
    if let Some(image) = &post.image {
        println!("{} {}", "image:".dimmed(), image.blue());
    }
    println!("\n{}\n", post.content);
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|t| format!("#{t}")).collect();
        println!("{}", tags.join(" ").green());
    }
    println!("{} views · {} likes", post.views, post.likes);
    if blog.can_edit(&post) {
        println!("{}", format!("(you can edit this post: blogify edit {})", post.id).dimmed());
    }
    Ok(())
}

fn cmd_create(blog: &Blogify, out: &Output, args: CreateArgs) -> anyhow::Result<()> {
    let mut draft = PostDraft::new(args.title, args.excerpt, args.content)
        .with_category(args.category)
        .with_tags(parse_tags(&args.tags))
        .featured(args.featured);
    if let Some(image) = args.image {
        draft = draft.with_image(image);
    }

    let post = blog.publish(draft)?;
    if let OutputFormat::Json = out.format {
        return out.json(&post);
    }
    println!("{} Published {}", "✓".green().bold(), post.title.bold());
    println!("  Id: {}", post.id.to_string().yellow());
    Ok(())
}

fn cmd_edit(blog: &Blogify, out: &Output, args: EditArgs) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let mut patch = PostPatch::new();
    if let Some(title) = args.title {
        patch = patch.title(title);
    }
    if let Some(excerpt) = args.excerpt {
        patch = patch.excerpt(excerpt);
    }
    if let Some(content) = args.content {
        patch = patch.content(content);
    }
    if let Some(category) = args.category {
        patch = patch.category(category);
    }
    if let Some(tags) = args.tags {
        patch = patch.tags(parse_tags(&tags));
    }
    if args.clear_image {
        patch = patch.image(None);
    } else if let Some(image) = args.image {
        patch = patch.image(Some(image));
    }
    if let Some(featured) = args.featured {
        patch = patch.featured(featured);
    }

    let post = blog.edit(&id, patch)?;
    if let OutputFormat::Json = out.format {
        return out.json(&post);
    }
    println!("{} Updated {}", "✓".green().bold(), post.title.bold());
    Ok(())
}

fn cmd_delete(blog: &Blogify, out: &Output, args: IdArgs) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    blog.remove(&id)?;
    if let OutputFormat::Json = out.format {
        return out.json(&json!({ "deleted": id }));
    }
    println!("{} Deleted post {}", "✓".green().bold(), id.short_id().yellow());
    Ok(())
}

fn cmd_like(blog: &Blogify, out: &Output, args: IdArgs) -> anyhow::Result<()> {
    let outcome = blog.like(&parse_id(&args.id)?)?;
    if let OutputFormat::Json = out.format {
        let liked = matches!(outcome, LikeOutcome::Liked(_));
        return out.json(&json!({ "liked": liked, "likes": outcome.likes() }));
    }
    match outcome {
        LikeOutcome::Liked(n) => println!("{} Liked ({} likes)", "♥".red().bold(), n),
        LikeOutcome::AlreadyLiked(n) => println!("Already liked ({n} likes)"),
    }
    Ok(())
}

fn cmd_categories(blog: &Blogify, out: &Output) -> anyhow::Result<()> {
    let counts = blog.categories();
    if let OutputFormat::Json = out.format {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(c, n)| (c.as_str().to_string(), json!(n)))
            .collect();
        return out.json(&map);
    }
    for (category, n) in counts {
        println!("  {:<12} {}", category.as_str().yellow(), n);
    }
    Ok(())
}

fn cmd_tags(blog: &Blogify, out: &Output) -> anyhow::Result<()> {
    let counts = blog.tags();
    if let OutputFormat::Json = out.format {
        let list: Vec<_> = counts
            .iter()
            .map(|(tag, n)| json!({ "tag": tag, "count": n }))
            .collect();
        return out.json(&list);
    }
    if counts.is_empty() {
        println!("No tags.");
    }
    for (tag, n) in counts {
        println!("  {:<20} {}", format!("#{tag}").green(), n);
    }
    Ok(())
}

fn cmd_login(blog: &Blogify, out: &Output, args: LoginArgs) -> anyhow::Result<()> {
    let Some(session) = blog.login(&args.email, &args.password)? else {
        anyhow::bail!("email and password are both required");
    };
    if let OutputFormat::Json = out.format {
        return out.json(&session);
    }
    let role = if session.is_admin { "admin" } else { "user" };
    println!("{} Logged in as {} ({})", "✓".green().bold(), session.email.bold(), role.cyan());
    Ok(())
}

fn cmd_logout(blog: &Blogify, out: &Output) -> anyhow::Result<()> {
    let previous = blog.logout()?;
    if let OutputFormat::Json = out.format {
        return out.json(&json!({ "loggedOut": previous.map(|s| s.email) }));
    }
    match previous {
        Some(s) => println!("Logged out {}", s.email.bold()),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn cmd_whoami(blog: &Blogify, out: &Output) -> anyhow::Result<()> {
    let current = blog.current_user();
    if let OutputFormat::Json = out.format {
        return out.json(&current);
    }
    match current {
        Some(s) if s.is_admin => println!("{} <{}> {}", s.name, s.email.bold(), "[admin]".red()),
        Some(s) => println!("{} <{}>", s.name, s.email.bold()),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn cmd_reset(blog: &Blogify, out: &Output) -> anyhow::Result<()> {
    blog.reset()?;
    if let OutputFormat::Json = out.format {
        return out.json(&json!({ "posts": blog.posts().len() }));
    }
    println!("{} Restored {} seed posts", "✓".green().bold(), blog.posts().len());
    Ok(())
}

struct Output {
    format: OutputFormat,
}

impl Output {
    fn json<T: serde::Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn posts(&self, heading: &str, posts: &[Post]) -> anyhow::Result<()> {
        if let OutputFormat::Json = self.format {
            return self.json(posts);
        }
        println!("{}", heading.bold().underline());
        for post in posts {
            print_summary(post);
        }
        Ok(())
    }
}

fn print_summary(post: &Post) {
    let star = if post.featured { "★ ".yellow().to_string() } else { String::new() };
    println!(
        "{} {}{}",
        post.id.short_id().yellow(),
        star,
        post.title.bold()
    );
    println!(
        "  {} · {} · {} views · {} likes",
        post.author.cyan(),
        post.category.as_str(),
        post.views,
        post.likes
    );
    println!("  {}", post.excerpt.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn data_dir_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blogify.toml");
        std::fs::write(&path, "data_dir = \"/from/file\"\nadmin_email = \"boss@x.io\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "blogify",
            "whoami",
            "--config",
            path.to_str().unwrap(),
            "--data-dir",
            "/from/flag",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.data_dir, std::path::PathBuf::from("/from/flag"));
        assert_eq!(config.admin_email, "boss@x.io");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["blogify", "whoami", "--config", "/no/such/blogify.toml"])
            .unwrap();
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn blank_id_is_rejected() {
        assert!(parse_id("  ").is_err());
        assert_eq!(parse_id("7").unwrap(), PostId::from("7"));
    }
}
