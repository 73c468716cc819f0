use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use quickqr::config::{find_preset, Color, ConfigUpdate, CornerDotType, CornerSquareType, DotType, ErrorCorrectionLevel, PRESETS};
use quickqr::payload::limits::Clamp;
use quickqr::payload::{
    self, ContactRecord, EmailRecord, LinkRecord, PayloadKind, PayloadRecords, TextRecord, WifiEncryption, WifiRecord,
};
use quickqr::render::{ExportFormat, MatrixRenderer, Renderer};
use quickqr::session::EditorSession;
use quickqr::settings::EditorSettings;
use quickqr::storage::{FileStore, KeyValueStore};
use quickqr::history::HistoryStore;

#[derive(Debug, Parser)]
#[command(name = "quickqr", about = "Compose, style and export QR codes", version)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Directory holding export history
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Directory receiving exported images
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the encoded payload for a record.
    Payload {
        kind: PayloadKind,
        #[command(flatten)]
        fields: PayloadArgs,
    },

    /// Render a record and export it as an image.
    Render {
        kind: PayloadKind,
        #[command(flatten)]
        fields: PayloadArgs,
        #[command(flatten)]
        style: StyleArgs,
        #[arg(long, default_value = "png")]
        format: ExportFormat,
    },

    /// Inspect or clear export history.
    #[command(subcommand)]
    History(HistoryCommand),

    /// Print built-in style preset names.
    Presets,
}

#[derive(Debug, Subcommand)]
enum HistoryCommand {
    /// List recent exports, newest first.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Delete all history.
    Clear,
}

#[derive(Debug, Clone, Default, Args)]
struct PayloadArgs {
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    text: Option<String>,

    #[arg(long)]
    ssid: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    encryption: Option<WifiEncryption>,
    #[arg(long)]
    hidden: bool,

    #[arg(long)]
    to: Option<String>,
    #[arg(long)]
    subject: Option<String>,
    #[arg(long)]
    body: Option<String>,

    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    mobile: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    job: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    street: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    zip: Option<String>,
    #[arg(long)]
    country: Option<String>,
}

fn set(field: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        field.clone_from(v);
    }
}

impl PayloadArgs {
    fn fill_link(&self, r: &mut LinkRecord) {
        set(&mut r.url, &self.url);
    }

    fn fill_text(&self, r: &mut TextRecord) {
        set(&mut r.text, &self.text);
    }

    fn fill_wifi(&self, r: &mut WifiRecord) {
        set(&mut r.ssid, &self.ssid);
        set(&mut r.password, &self.password);
        if let Some(encryption) = self.encryption {
            r.encryption = encryption;
        }
        r.hidden = self.hidden;
    }

    fn fill_email(&self, r: &mut EmailRecord) {
        set(&mut r.to, &self.to);
        set(&mut r.subject, &self.subject);
        set(&mut r.body, &self.body);
    }

    fn fill_contact(&self, r: &mut ContactRecord) {
        set(&mut r.first_name, &self.first_name);
        set(&mut r.last_name, &self.last_name);
        set(&mut r.mobile, &self.mobile);
        set(&mut r.email, &self.email);
        set(&mut r.company, &self.company);
        set(&mut r.job, &self.job);
        set(&mut r.website, &self.website);
        set(&mut r.street, &self.street);
        set(&mut r.city, &self.city);
        set(&mut r.zip, &self.zip);
        set(&mut r.country, &self.country);
    }

    /// Standalone records with these fields filled in
    fn records(&self) -> PayloadRecords {
        let mut records = PayloadRecords::default();
        self.fill_link(&mut records.link);
        self.fill_text(&mut records.text);
        self.fill_wifi(&mut records.wifi);
        self.fill_email(&mut records.email);
        self.fill_contact(&mut records.contact);
        records.link.clamp();
        records.text.clamp();
        records.wifi.clamp();
        records.email.clamp();
        records.contact.clamp();
        records
    }
}

#[derive(Debug, Clone, Default, Args)]
struct StyleArgs {
    /// Classic, Modern, Soft or Eco
    #[arg(long)]
    preset: Option<String>,
    /// Error correction level (L, M, Q, H)
    #[arg(long)]
    level: Option<ErrorCorrectionLevel>,
    #[arg(long)]
    fg: Option<Color>,
    #[arg(long)]
    bg: Option<Color>,
    #[arg(long)]
    dots: Option<DotType>,
    #[arg(long)]
    corner_square: Option<CornerSquareType>,
    #[arg(long)]
    corner_square_color: Option<Color>,
    #[arg(long)]
    corner_dot: Option<CornerDotType>,
    #[arg(long)]
    corner_dot_color: Option<Color>,
    /// Margin around the symbol, in pixels
    #[arg(long)]
    quiet_zone: Option<u32>,
    /// Image file placed at the center
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Logo size as a fraction of the symbol (0.1 to 0.5)
    #[arg(long)]
    logo_scale: Option<f64>,
}

impl StyleArgs {
    fn updates(&self) -> Vec<ConfigUpdate> {
        let mut updates = Vec::new();
        if let Some(level) = self.level {
            updates.push(ConfigUpdate::ErrorCorrectionLevel(level));
        }
        if let Some(c) = &self.fg {
            updates.push(ConfigUpdate::ForegroundColor(c.clone()));
        }
        if let Some(c) = &self.bg {
            updates.push(ConfigUpdate::BackgroundColor(c.clone()));
        }
        if let Some(s) = self.dots {
            updates.push(ConfigUpdate::DotStyle(s));
        }
        if let Some(s) = self.corner_square {
            updates.push(ConfigUpdate::CornerFrameStyle(s));
        }
        if let Some(c) = &self.corner_square_color {
            updates.push(ConfigUpdate::CornerFrameColor(c.clone()));
        }
        if let Some(s) = self.corner_dot {
            updates.push(ConfigUpdate::CornerDotStyle(s));
        }
        if let Some(c) = &self.corner_dot_color {
            updates.push(ConfigUpdate::CornerDotColor(c.clone()));
        }
        if let Some(q) = self.quiet_zone {
            updates.push(ConfigUpdate::QuietZone(q));
        }
        if let Some(s) = self.logo_scale {
            updates.push(ConfigUpdate::LogoScale(s));
        }
        updates
    }
}

fn load_settings(cli: &Cli) -> Result<EditorSettings> {
    let mut settings = match &cli.settings {
        Some(path) => EditorSettings::load(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => EditorSettings::default(),
    };
    if let Some(dir) = &cli.storage_dir {
        settings.storage_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.out_dir {
        settings.export_dir.clone_from(dir);
    }
    settings.debug_logging |= cli.debug;
    settings.validate()?;
    settings.apply_logging();
    Ok(settings)
}

fn open_store(settings: &EditorSettings) -> Result<FileStore> {
    FileStore::open(&settings.storage_dir)
        .with_context(|| format!("opening history in {}", settings.storage_dir.display()))
}

fn fill_session<R: Renderer, S: KeyValueStore>(session: &mut EditorSession<R, S>, kind: PayloadKind, fields: &PayloadArgs) {
    session.set_active_kind(kind);
    match kind {
        PayloadKind::Link => session.edit_link(|r| fields.fill_link(r)),
        PayloadKind::Text => session.edit_text(|r| fields.fill_text(r)),
        PayloadKind::Wifi => session.edit_wifi(|r| fields.fill_wifi(r)),
        PayloadKind::Email => session.edit_email(|r| fields.fill_email(r)),
        PayloadKind::Contact => session.edit_contact(|r| fields.fill_contact(r)),
    }
}

async fn render(
    settings: &EditorSettings,
    kind: PayloadKind,
    fields: &PayloadArgs,
    style: &StyleArgs,
    format: ExportFormat,
) -> Result<()> {
    let renderer = MatrixRenderer::new(&settings.export_dir);
    let mut session = EditorSession::with_settings(renderer, open_store(settings)?, settings);

    fill_session(&mut session, kind, fields);

    if let Some(name) = &style.preset {
        let preset = find_preset(name).with_context(|| format!("unknown preset '{}'", name))?;
        session.apply_preset(preset);
    }
    for update in style.updates() {
        session.update(update);
    }
    if let Some(logo) = &style.logo {
        session.upload_logo(logo).with_context(|| format!("loading logo {}", logo.display()))?;
    }

    session.settle().await;
    if let Some(advisory) = session.render_state().failure() {
        bail!("{}", advisory);
    }

    let receipt = session.export(format)?;
    match &receipt.asset.path {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", receipt.asset.file_name),
    }
    Ok(())
}

fn history(settings: &EditorSettings, command: &HistoryCommand) -> Result<()> {
    let mut history = HistoryStore::new(open_store(settings)?);
    match command {
        HistoryCommand::List { json } => {
            let entries = history.list();
            if *json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No history yet");
            } else {
                for entry in entries {
                    println!("{}  {:<6} {:<20}  {}", entry.date_label(), entry.kind_label, entry.display_name, entry.id);
                }
            }
        }
        HistoryCommand::Clear => {
            history.clear();
            println!("History cleared");
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    match &cli.command {
        Commands::Payload { kind, fields } => {
            println!("{}", payload::format(*kind, &fields.records()));
            Ok(())
        }
        Commands::Render { kind, fields, style, format } => render(&settings, *kind, fields, style, *format).await,
        Commands::History(command) => history(&settings, command),
        Commands::Presets => {
            for preset in PRESETS.iter() {
                println!("{}", preset.name);
            }
            Ok(())
        }
    }
}
