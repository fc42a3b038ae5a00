// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Fetch, process, and print results
// 4. Exit with proper code (0 = success, 2 = error)
//
// Primary data failures (profile, repo list) surface as errors; optional
// sub-fetches were already absorbed further down, so once the essential
// fetch succeeds something always gets printed.
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

use portfolio_scout::config::PortfolioConfig;
use portfolio_scout::extract::extract_project_info;
use portfolio_scout::github::{self, GithubClient, RepositorySummary, UserProfile};
use portfolio_scout::helpers::{
    card_color, format_date, format_repo_name, get_initials, language_color,
};
use portfolio_scout::render::render_markdown;

#[tokio::main]
async fn main() {
    env_logger::init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.user {
        Some(user) => PortfolioConfig::for_user(user),
        None => PortfolioConfig::default(),
    };
    let client = GithubClient::new()?;

    match cli.command {
        Commands::User { json } => handle_user(&client, &cfg, json).await,
        Commands::Repos { json } => handle_repos(&client, &cfg, json).await,
        Commands::Readme { repo, html, json } => {
            handle_readme(&client, &cfg, &repo, html, json).await
        }
    }
}

// Handles the 'user' subcommand
async fn handle_user(client: &GithubClient, cfg: &PortfolioConfig, json: bool) -> Result<()> {
    let profile = github::fetch_user(client, cfg).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print_profile(&profile);
    }
    Ok(())
}

// Handles the 'repos' subcommand
async fn handle_repos(client: &GithubClient, cfg: &PortfolioConfig, json: bool) -> Result<()> {
    println!("🔍 Fetching repositories for {}...", cfg.username);

    let repos = github::fetch_repos(client, cfg).await?;

    if repos.is_empty() {
        println!("⚠️  No portfolio repositories found");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
    } else {
        print_repo_table(&repos);
    }
    Ok(())
}

// Handles the 'readme' subcommand
async fn handle_readme(
    client: &GithubClient,
    cfg: &PortfolioConfig,
    repo: &str,
    html: bool,
    json: bool,
) -> Result<()> {
    let files = github::fetch_documentation(client, cfg, repo).await;

    if files.is_empty() {
        println!("⚠️  No documentation files found in {}", repo);
        return Ok(());
    }

    if html {
        for file in &files {
            println!("<!-- {} -->", file.path);
            println!("{}", render_markdown(&file.decoded_text, Some(repo), cfg));
        }
        return Ok(());
    }

    let extracted: Vec<_> = files
        .iter()
        .map(|file| {
            (
                file.path.clone(),
                extract_project_info(&file.decoded_text, repo, cfg),
            )
        })
        .collect();

    if json {
        let entries: Vec<serde_json::Value> = extracted
            .iter()
            .map(|(path, info)| {
                serde_json::json!({
                    "path": path,
                    "info": info,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (path, info) in &extracted {
            print_extracted(path, info);
        }
    }
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    let display_name = profile.name.as_deref().unwrap_or(&profile.login);
    println!("👤 {} ({})", display_name, get_initials(&profile.login));
    if let Some(bio) = &profile.bio {
        println!("   {}", bio);
    }
    if let Some(location) = &profile.location {
        println!("   📍 {}", location);
    }
    println!("   📦 {} public repos", profile.public_repos);
    println!("   ⭐ {} followers", profile.followers);
    println!("   🔗 {}", profile.html_url);
}

fn print_repo_table(repos: &[RepositorySummary]) {
    println!(
        "{:<30} {:<12} {:<22} {:<10}",
        "PROJECT", "LANGUAGE", "UPDATED", "INSTALLER"
    );
    println!("{}", "=".repeat(78));

    for repo in repos {
        let language = repo.language.as_deref().unwrap_or("-");
        let installer = if repo.has_apk { "📱 APK" } else { "-" };

        println!(
            "{:<30} {:<12} {:<22} {:<10}",
            format_repo_name(&repo.name),
            language,
            format_date(&repo.updated_at),
            installer
        );

        // Display colors the way the portfolio cards use them
        println!(
            "   🎨 card {} / language {}",
            card_color(&repo.name),
            language_color(language)
        );

        if let Some(apk_url) = &repo.apk_url {
            println!("   ⬇️  {}", apk_url);
        }
    }

    println!();
    let with_apk = repos.iter().filter(|r| r.has_apk).count();
    println!("📊 Summary:");
    println!("   📋 Total: {}", repos.len());
    println!("   📱 With installer: {}", with_apk);
}

fn print_extracted(path: &str, info: &portfolio_scout::extract::ExtractedInfo) {
    println!("📄 {}", path);

    if !info.features.is_empty() {
        println!("   🚀 Features:");
        for feature in &info.features {
            println!("      - {}", feature);
        }
    }
    if !info.technologies.is_empty() {
        println!("   🛠️  Technologies:");
        for tech in &info.technologies {
            println!("      - {}", tech);
        }
    }
    if !info.installation.is_empty() {
        println!("   📦 Installation: {} chars", info.installation.len());
    }
    if !info.usage.is_empty() {
        println!("   📝 Usage: {} chars", info.usage.len());
    }
    if !info.screenshots.is_empty() {
        println!("   🖼️  Screenshots:");
        for shot in &info.screenshots {
            println!("      - {} ({})", shot.alt, shot.url);
        }
    }
    if !info.media_urls.is_empty() {
        println!("   🎬 Media:");
        for url in &info.media_urls {
            println!("      - {}", url);
        }
    }
    println!();
}
