use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use suno_api::auth::Credentials;
use suno_api::{AudioRecord, ClientConfig, LazyClient, SunoClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "suno", version, about = "Suno music generation CLI")]
struct Cli {
    /// Session cookie (overrides `SUNO_COOKIE` and the saved login)
    #[arg(long, global = true, value_name = "COOKIE")]
    cookie: Option<String>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Verbose logging (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save the browser session cookie
    Login {
        /// `Cookie` header value from a logged-in suno.com session
        #[arg(required_unless_present = "check")]
        cookie: Option<String>,
        /// Validate the saved cookie
        #[arg(long)]
        check: bool,
    },
    /// Forget the saved cookie
    Logout,
    /// Generate songs from a description
    Generate {
        /// What the song should be about
        prompt: String,
        /// No vocals
        #[arg(short, long)]
        instrumental: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Generate songs from your own lyrics
    Custom {
        /// Lyrics
        prompt: String,
        /// Style tags, e.g. "lofi, chill"
        #[arg(short, long, default_value = "")]
        tags: String,
        /// Song title
        #[arg(long, default_value = "")]
        title: String,
        /// Styles to avoid
        #[arg(long)]
        negative_tags: Option<String>,
        /// No vocals
        #[arg(short, long)]
        instrumental: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Generate lyrics
    Lyrics {
        /// Theme for the lyrics
        prompt: String,
    },
    /// Show clip status (recent clips when no ids are given)
    Get {
        /// Clip ids
        ids: Vec<String>,
    },
    /// Show a single clip
    Clip {
        /// Clip id
        id: String,
    },
    /// Continue an existing clip
    Extend {
        /// Clip id to extend
        id: String,
        /// Lyrics for the continuation
        #[arg(short, long, default_value = "")]
        prompt: String,
        /// Continue from this many seconds in
        #[arg(long)]
        at: Option<f64>,
        #[arg(short, long)]
        tags: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Join an extended clip into a full song
    Concat {
        /// Id of the last extension
        id: String,
    },
    /// Show remaining credits
    Credits,
}

#[derive(clap::Args)]
struct WaitArgs {
    /// Block until the audio is playable
    #[arg(short, long)]
    wait: bool,
    /// Give up waiting after this many seconds
    #[arg(long, value_name = "SECS", requires = "wait")]
    timeout: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Login { cookie, check } => cmd_login(cookie, check),
        Command::Logout => cmd_logout(),
        command => {
            let config = ClientConfig::load().context("failed to load config")?;
            let mut client = lazy_client(cli.cookie, config, &command)?;
            run(&mut client, command, cli.json)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "suno_api=debug,info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn lazy_client(
    flag: Option<String>,
    mut config: ClientConfig,
    command: &Command,
) -> Result<LazyClient> {
    if let Command::Generate { wait, .. } | Command::Custom { wait, .. } = command {
        if let Some(secs) = wait.timeout {
            config.poll.timeout_ms = secs.saturating_mul(1000);
        }
    }

    let cookie = match flag {
        Some(c) => c,
        None => suno_api::lazy::cookie_from_env()
            .context("pass --cookie, set SUNO_COOKIE, or run `suno login`")?,
    };
    Ok(LazyClient::new(cookie, config))
}

fn run(lazy: &mut LazyClient, command: Command, json: bool) -> Result<()> {
    let client = lazy.get().context("failed to establish session")?;
    match command {
        Command::Generate {
            prompt,
            instrumental,
            wait,
        } => {
            let clips = client.generate(&prompt, instrumental, wait.wait)?;
            print_records(&clips, json)
        }
        Command::Custom {
            prompt,
            tags,
            title,
            negative_tags,
            instrumental,
            wait,
        } => {
            let clips = client.custom_generate(
                &prompt,
                &tags,
                &title,
                instrumental,
                wait.wait,
                negative_tags.as_deref(),
            )?;
            print_records(&clips, json)
        }
        Command::Lyrics { prompt } => {
            let lyrics = client.generate_lyrics(&prompt)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&lyrics)?);
            } else {
                println!("Title:  {}", lyrics.title);
                println!("Status: {}\n", lyrics.status);
                println!("{}", lyrics.text);
            }
            Ok(())
        }
        Command::Get { ids } => {
            let ids = (!ids.is_empty()).then_some(ids);
            let clips = client.fetch(ids.as_deref())?;
            print_records(&clips, json)
        }
        Command::Clip { id } => {
            let clip = client.get_clip(&id)?;
            print_records(std::slice::from_ref(&clip), json)
        }
        Command::Extend {
            id,
            prompt,
            at,
            tags,
            title,
        } => {
            let (tags, title) = (tags.as_deref(), title.as_deref());
            let clips = client.extend_audio(&id, &prompt, at, tags, title)?;
            print_records(&clips, json)
        }
        Command::Concat { id } => {
            let clip = client.concatenate(&id)?;
            print_records(std::slice::from_ref(&clip), json)
        }
        Command::Credits => {
            let info = client.billing_info()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Credits left: {}", info.credits_left);
                println!(
                    "Usage:        {} / {} ({})",
                    info.monthly_usage,
                    info.monthly_limit,
                    info.period.as_deref().unwrap_or("no period"),
                );
            }
            Ok(())
        }
        Command::Login { .. } | Command::Logout => bail!("handled before connecting"),
    }
}

// ── login / logout ──

fn cmd_login(cookie: Option<String>, check: bool) -> Result<()> {
    if check {
        let creds = Credentials::load()?;
        let Some(cookie) = creds.cookie.filter(|c| !c.trim().is_empty()) else {
            println!("Not logged in.");
            return Ok(());
        };
        let mut client = LazyClient::new(cookie, ClientConfig::load()?);
        match client.get().and_then(SunoClient::billing_info) {
            Ok(info) => println!("Logged in ({} credits left)", info.credits_left),
            Err(e) => println!("Cookie saved but validation failed: {e}"),
        }
        return Ok(());
    }

    let cookie = cookie.context("cookie value required")?;
    Credentials {
        cookie: Some(cookie),
    }
    .save()?;
    println!("Cookie saved.");
    Ok(())
}

fn cmd_logout() -> Result<()> {
    Credentials::clear()?;
    println!("Cookie cleared.");
    Ok(())
}

// ── output ──

fn print_records(records: &[AudioRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    for r in records {
        let title = r.title.as_deref().filter(|t| !t.is_empty());
        println!("[{}] {} ({})", r.id, title.unwrap_or("untitled"), r.status);
        if let Some(tags) = r.tags.as_deref().filter(|t| !t.is_empty()) {
            println!("  Tags:     {tags}");
        }
        if let Some(d) = r.duration {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let secs = d.round() as u64;
            println!("  Duration: {}:{:02}", secs / 60, secs % 60);
        }
        if let Some(url) = &r.audio_url {
            println!("  Audio:    {url}");
        }
        if let Some(err) = &r.error_message {
            println!("  Error:    {err}");
        }
    }
    if records.iter().any(|r| !r.status.is_terminal()) {
        eprintln!("note: some clips are not ready yet; check again with `suno get <id>`");
    }
    Ok(())
}
