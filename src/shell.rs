//! Line-oriented shell over the view controller.

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use recursos_core::error::AppError;
use recursos_core::result::AppResult;
use recursos_core::traits::UploadFile;
use recursos_entity::{ResourceId, ResourceType, Section};
use recursos_service::{OpenOutcome, SaveRequest, SectionChange, ViewController};

use crate::output::{self, OutputFormat, ResourceRow};

/// One shell line
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    /// Command
    #[command(subcommand)]
    pub command: Command,
}

/// Shell commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the current folder
    Ls,
    /// Enter a folder by ID, `..` for the parent, `/` for the root
    Cd {
        /// Folder ID, `..`, or `/`
        target: String,
    },
    /// Switch section (monitoreo, supervision, centros-escolares)
    Section {
        /// Section name
        name: Section,
    },
    /// Sign in with an identity assertion
    Login {
        /// Signed identity token
        assertion: String,
    },
    /// Sign out
    Logout,
    /// Store the storage provider access token
    Authorize {
        /// Bearer token
        token: String,
    },
    /// Add a resource to the current folder
    Add {
        /// Display name
        name: String,
        /// Type: Carpeta, PDF, Documento, "Hoja de cálculo", Enlace
        #[arg(short = 't', long = "type", default_value = "Carpeta")]
        kind: ResourceType,
        /// Link target
        #[arg(long)]
        url: Option<String>,
        /// File to upload
        #[arg(long)]
        file: Option<PathBuf>,
        /// Require sign-in to open
        #[arg(long)]
        protected: bool,
        /// Destination folder ID, `/` for the root
        #[arg(long)]
        parent: Option<String>,
    },
    /// Edit a resource
    Edit {
        /// Resource ID
        id: ResourceId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<ResourceType>,
        /// New link target
        #[arg(long)]
        url: Option<String>,
        /// Replacement file to upload
        #[arg(long)]
        file: Option<PathBuf>,
        /// New protection flag
        #[arg(long)]
        protected: Option<bool>,
        /// New destination folder ID, `/` for the root
        #[arg(long)]
        parent: Option<String>,
    },
    /// Delete a resource
    Rm {
        /// Resource ID
        id: ResourceId,
    },
    /// Open a resource, entering folders
    Open {
        /// Resource ID
        id: ResourceId,
    },
    /// Show one resource
    Show {
        /// Resource ID
        id: ResourceId,
    },
    /// Folders available as destinations
    Folders,
    /// Session and settings
    Status,
    /// Toggle light/dark theme
    Theme,
    /// Show or set the upload bucket
    Bucket {
        /// Bucket name; empty clears it
        name: Option<String>,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Whether the shell keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Splits a line into words, honouring single and double quotes.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {q} quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parses `/` or `root` as the section root and anything else as an ID.
fn parse_folder(raw: &str) -> AppResult<Option<ResourceId>> {
    match raw.trim() {
        "/" | "root" => Ok(None),
        other => other
            .parse::<ResourceId>()
            .map(Some)
            .map_err(|_| AppError::validation(format!("Invalid folder ID: {other}"))),
    }
}

/// Commands that change the resource list.
fn edits_resources(command: &Command) -> bool {
    matches!(
        command,
        Command::Add { .. } | Command::Edit { .. } | Command::Rm { .. }
    )
}

/// Reads a file chosen for upload.
async fn read_upload(path: &Path) -> AppResult<UploadFile> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::not_found(format!("Failed to read {}: {e}", path.display())))?;
    let mime = mime_guess::from_path(&name).first_or_octet_stream().to_string();
    Ok(UploadFile {
        name,
        mime_type: Some(mime),
        data: Bytes::from(data),
    })
}

/// Interactive shell.
pub struct Shell {
    controller: ViewController,
    format: OutputFormat,
}

impl Shell {
    /// Creates a shell over `controller`.
    pub fn new(controller: ViewController, format: OutputFormat) -> Self {
        Self { controller, format }
    }

    /// Read and run commands until `quit` or end of input.
    pub async fn run(&self) -> AppResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        self.list().await;

        loop {
            self.prompt().await;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let words = match split_words(&line) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(e) => {
                    output::print_error(&e);
                    continue;
                }
            };

            let parsed = match Line::try_parse_from(words) {
                Ok(parsed) => parsed,
                Err(e) => {
                    let _ = e.print();
                    continue;
                }
            };

            match self.execute(parsed.command).await {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => output::print_error(&e.message),
            }
        }

        tracing::info!("Shell closed");
        Ok(())
    }

    async fn prompt(&self) {
        let view = self.controller.snapshot().await;
        let who = view
            .user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("anónimo");
        print!("[{}] {} ({who})> ", view.section, output::trail(&view.breadcrumbs));
        let _ = std::io::stdout().flush();
    }

    async fn list(&self) {
        let view = self.controller.snapshot().await;
        println!("{}", view.title);
        let rows: Vec<ResourceRow> = view.listing.iter().map(ResourceRow::from).collect();
        output::print_list(&rows, self.format);
    }

    async fn execute(&self, command: Command) -> AppResult<Flow> {
        if edits_resources(&command) && !self.controller.snapshot().await.can_add_resources {
            output::print_warning(
                "Not signed in; resource changes are meant for signed-in users",
            );
        }
        match command {
            Command::Ls => self.list().await,
            Command::Cd { target } => {
                let folder = match target.as_str() {
                    ".." => {
                        let view = self.controller.snapshot().await;
                        let len = view.breadcrumbs.len();
                        if len >= 2 {
                            view.breadcrumbs[len - 2].id
                        } else {
                            None
                        }
                    }
                    other => parse_folder(other)?,
                };
                if let Some(id) = folder {
                    match self.controller.find(id).await {
                        Some(r) if r.is_folder() => {}
                        Some(r) => {
                            return Err(AppError::validation(format!("{} is not a folder", r.name)));
                        }
                        None => return Err(AppError::not_found(format!("Folder {id} not found"))),
                    }
                }
                self.controller.navigate(folder).await;
                self.list().await;
            }
            Command::Section { name } => match self.controller.select_section(name).await {
                SectionChange::LoginRequired(section) => output::print_warning(&format!(
                    "{} requires sign-in; use `login <assertion>`",
                    section.display_name()
                )),
                SectionChange::Switched(_) | SectionChange::Unchanged(_) => self.list().await,
            },
            Command::Login { assertion } => {
                let sign_in = self.controller.sign_in(&assertion).await?;
                output::print_success(&format!("Signed in as {}", sign_in.user.name));
                if sign_in.entered.is_some() {
                    self.list().await;
                }
            }
            Command::Logout => {
                let moved = self.controller.sign_out().await;
                output::print_success("Signed out");
                if moved.is_some() {
                    self.list().await;
                }
            }
            Command::Authorize { token } => {
                self.controller.authorize_storage(&token).await?;
                output::print_success("Storage access authorized");
            }
            Command::Add {
                name,
                kind,
                url,
                file,
                protected,
                parent,
            } => {
                let parent_id = match parent {
                    Some(raw) => parse_folder(&raw)?,
                    None => self.controller.snapshot().await.current_folder,
                };
                let file = match file {
                    Some(path) => Some(read_upload(&path).await?),
                    None => None,
                };
                let request = SaveRequest {
                    id: None,
                    name,
                    resource_type: kind,
                    is_protected: protected,
                    url,
                    parent_id,
                    file,
                };
                if let Some(saved) = self.controller.save(request).await? {
                    output::print_success(&format!("Created {} ({})", saved.name, saved.id));
                }
                self.list().await;
            }
            Command::Edit {
                id,
                name,
                kind,
                url,
                file,
                protected,
                parent,
            } => {
                let existing = self
                    .controller
                    .find(id)
                    .await
                    .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))?;
                let mut request = SaveRequest::edit(&existing);
                if let Some(name) = name {
                    request.name = name;
                }
                if let Some(kind) = kind {
                    request.resource_type = kind;
                }
                if url.is_some() {
                    request.url = url;
                }
                if let Some(protected) = protected {
                    request.is_protected = protected;
                }
                if let Some(raw) = parent {
                    request.parent_id = parse_folder(&raw)?;
                }
                if let Some(path) = file {
                    request.file = Some(read_upload(&path).await?);
                }
                match self.controller.save(request).await? {
                    Some(saved) => output::print_success(&format!("Updated {}", saved.name)),
                    None => output::print_warning(&format!("Resource {id} no longer exists")),
                }
                self.list().await;
            }
            Command::Rm { id } => {
                match self.controller.delete(id).await? {
                    Some(removed) => output::print_success(&format!("Deleted {}", removed.name)),
                    None => output::print_warning(&format!("Resource {id} not found")),
                }
                self.list().await;
            }
            Command::Open { id } => match self.controller.open(id).await? {
                OpenOutcome::Entered(_) => self.list().await,
                OpenOutcome::External(url) => println!("{url}"),
                OpenOutcome::LoginRequired => {
                    output::print_warning("This resource is protected; use `login <assertion>`")
                }
                OpenOutcome::NoLink(name) => {
                    output::print_warning(&format!("{name} has no link to open"))
                }
            },
            Command::Show { id } => {
                let resource = self
                    .controller
                    .find(id)
                    .await
                    .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))?;
                output::print_item(&resource, self.format);
            }
            Command::Folders => {
                let folders = self.controller.available_folders(None).await;
                let rows: Vec<ResourceRow> = folders.iter().map(ResourceRow::from).collect();
                output::print_list(&rows, self.format);
            }
            Command::Status => {
                let view = self.controller.snapshot().await;
                output::print_kv("Section", view.section.display_name());
                output::print_kv("Title", &view.title);
                output::print_kv(
                    "User",
                    view.user.as_ref().map(|u| u.email.as_str()).unwrap_or("-"),
                );
                output::print_kv(
                    "Storage",
                    if view.storage_authorized {
                        "authorized"
                    } else {
                        "not authorized"
                    },
                );
                output::print_kv("Theme", view.theme.as_str());
                output::print_kv("Bucket", view.bucket_name.as_deref().unwrap_or("-"));
            }
            Command::Theme => {
                let theme = self.controller.toggle_theme().await?;
                output::print_success(&format!("Theme: {}", theme.as_str()));
            }
            Command::Bucket { name } => match name {
                Some(name) => {
                    self.controller.set_bucket_name(&name).await?;
                    output::print_success("Bucket updated");
                }
                None => {
                    let view = self.controller.snapshot().await;
                    println!("{}", view.bucket_name.as_deref().unwrap_or("-"));
                }
            },
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}
