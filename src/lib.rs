//! pdftags: hierarchical tagging and bibliography database for local PDFs.
//!
//! All state lives in a single SQLite file in the user's data directory.
//! Tags form a tree stored as materialized paths (`"3.7.12"` = node 12
//! under 7 under 3); documents carry bibliographic metadata and a
//! many-to-many association with tags.
//!
//! # Crate structure
//!
//! - [`core`]: connection handling, schema, errors, store resolution
//! - [`catalog`]: the tag tree, documents, people, journals, citations

pub mod catalog;
pub mod core;

use crate::catalog::{bib, docs, journals, people, tag_path, tags};
use crate::core::error::TagDbError;
use crate::core::store::Store;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rusqlite::Connection;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "pdftags",
    version = env!("CARGO_PKG_VERSION"),
    about = "Hierarchical tagging for local PDF collections"
)]
struct Cli {
    /// Data directory holding the database (defaults to the platform
    /// user-data directory, or $PDFTAGS_DATA_DIR).
    #[clap(long, global = true)]
    data_dir: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the data directory and database
    Init,
    /// Manage the tag tree
    Tag(TagCli),
    /// Manage documents and their tags
    Doc(DocCli),
    /// Manage people records
    Person(PersonCli),
    /// Manage journal records
    Journal(JournalCli),
    /// Manage document authorship
    Author(AuthorCli),
    /// Print the citation record for a document
    Bib {
        #[clap(long)]
        id: i64,
    },
}

#[derive(clap::Args, Debug)]
struct TagCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: TagCommand,
}

#[derive(Subcommand, Debug)]
enum TagCommand {
    /// Create a tag (a root node unless --parent is given)
    Add {
        #[clap(value_name = "NAME")]
        name: String,
        /// Parent tag name to nest under.
        #[clap(long)]
        parent: Option<String>,
        /// Optional icon file stored alongside the tag.
        #[clap(long)]
        icon: Option<PathBuf>,
    },
    /// Move a tag under a new parent, or to the root with no --parent
    Move {
        #[clap(value_name = "NAME")]
        name: String,
        #[clap(long)]
        parent: Option<String>,
    },
    /// List all tags ordered by path
    List,
    /// Render the tag tree, indented by depth
    Tree,
    /// Show a tag's subtree (descendants first, the tag itself last)
    Show {
        #[clap(value_name = "NAME")]
        name: String,
    },
}

#[derive(clap::Args, Debug)]
struct DocCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: DocCommand,
}

#[derive(Subcommand, Debug)]
enum DocCommand {
    /// Register a document
    Add {
        #[clap(long)]
        path: Option<String>,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        md5: Option<String>,
        #[clap(long)]
        doi: Option<String>,
        /// Journal name; created on first use.
        #[clap(long)]
        journal: Option<String>,
        #[clap(long)]
        volume: Option<String>,
        #[clap(long)]
        number: Option<String>,
        #[clap(long)]
        pages: Option<String>,
        #[clap(long)]
        year: Option<i64>,
        #[clap(long)]
        comment: Option<String>,
    },
    /// List all documents
    List,
    /// Show a document with its citation and tags
    Show {
        #[clap(long)]
        id: i64,
    },
    /// Attach a tag to a document
    Tag {
        #[clap(long)]
        id: i64,
        #[clap(long)]
        tag: String,
    },
    /// Detach a tag from a document
    Untag {
        #[clap(long)]
        id: i64,
        #[clap(long)]
        tag: String,
    },
    /// Link an older version of a document
    LinkVersion {
        #[clap(long)]
        id: i64,
        #[clap(long)]
        older: i64,
    },
    /// Mark a document's metadata as complete
    Complete {
        #[clap(long)]
        id: i64,
    },
}

#[derive(clap::Args, Debug)]
struct PersonCli {
    #[clap(subcommand)]
    command: PersonCommand,
}

#[derive(Subcommand, Debug)]
enum PersonCommand {
    /// Add a person record
    Add {
        #[clap(value_name = "NAME")]
        name: String,
        #[clap(long)]
        email: Option<String>,
        #[clap(long)]
        institute: Option<String>,
    },
    /// List all people
    List,
}

#[derive(clap::Args, Debug)]
struct JournalCli {
    #[clap(subcommand)]
    command: JournalCommand,
}

#[derive(Subcommand, Debug)]
enum JournalCommand {
    /// Add a journal record
    Add {
        #[clap(value_name = "NAME")]
        name: String,
    },
    /// List all journals
    List,
}

#[derive(clap::Args, Debug)]
struct AuthorCli {
    #[clap(subcommand)]
    command: AuthorCommand,
}

#[derive(Subcommand, Debug)]
enum AuthorCommand {
    /// Attach a person as an author of a document
    Attach {
        #[clap(long)]
        doc: i64,
        #[clap(long)]
        person: i64,
        /// Citation position; appended after the last author if omitted.
        #[clap(long)]
        position: Option<i64>,
    },
}

pub fn run() -> Result<(), TagDbError> {
    let cli = Cli::parse();
    let store = Store::resolve(cli.data_dir.clone())?;

    match cli.command {
        Command::Init => run_init(&store),
        Command::Tag(tag_cli) => {
            let mut conn = store.open()?;
            run_tag_cli(&mut conn, tag_cli)
        }
        Command::Doc(doc_cli) => {
            let mut conn = store.open()?;
            run_doc_cli(&mut conn, doc_cli)
        }
        Command::Person(person_cli) => {
            let conn = store.open()?;
            run_person_cli(&conn, person_cli)
        }
        Command::Journal(journal_cli) => {
            let conn = store.open()?;
            run_journal_cli(&conn, journal_cli)
        }
        Command::Author(author_cli) => {
            let conn = store.open()?;
            run_author_cli(&conn, author_cli)
        }
        Command::Bib { id } => {
            let conn = store.open()?;
            println!("{}", bib::citation(&conn, id)?);
            Ok(())
        }
    }
}

fn run_init(store: &Store) -> Result<(), TagDbError> {
    store.initialize()?;
    for table in ["tags", "journals", "people", "pdfs", "pdf_tag", "pdf_people"] {
        println!("    {} {}", "●".bright_green(), table.bright_white());
    }
    println!(
        "{} database initialized at {}",
        "✓".bright_green(),
        store.db_path().display()
    );
    Ok(())
}

fn run_tag_cli(conn: &mut Connection, cli: TagCli) -> Result<(), TagDbError> {
    match cli.command {
        TagCommand::Add { name, parent, icon } => {
            let icon_bytes = match icon {
                Some(p) => Some(std::fs::read(p).map_err(TagDbError::IoError)?),
                None => None,
            };
            let tag = tags::create(conn, &name, icon_bytes.as_deref())?;
            let tag = match parent {
                Some(parent_name) => {
                    let parent = tags::get_by_name(conn, &parent_name)?;
                    tags::move_to(conn, tag.id, Some(parent.id))?
                }
                None => tag,
            };
            println!("Tag created: {} ({})", tag.name, tag.path);
        }
        TagCommand::Move { name, parent } => {
            let tag = tags::get_by_name(conn, &name)?;
            let parent_id = match parent {
                Some(parent_name) => Some(tags::get_by_name(conn, &parent_name)?.id),
                None => None,
            };
            let tag = tags::move_to(conn, tag.id, parent_id)?;
            println!("Tag moved: {} ({})", tag.name, tag.path);
        }
        TagCommand::List => {
            let all = tags::list(conn)?;
            print_tags(&all, cli.format)?;
        }
        TagCommand::Tree => {
            for tag in tags::list(conn)? {
                let depth = tag_path::depth(&tag.path)?;
                println!("{}{} ({})", "  ".repeat(depth), tag.name, tag.id);
            }
        }
        TagCommand::Show { name } => {
            let tag = tags::get_by_name(conn, &name)?;
            let subtree = tags::all_tags(conn, &tag)?;
            print_tags(&subtree, cli.format)?;
        }
    }
    Ok(())
}

fn print_tags(tags: &[tags::Tag], format: OutputFormat) -> Result<(), TagDbError> {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(tags)
                    .map_err(|e| TagDbError::ValidationError(e.to_string()))?
            );
        }
        OutputFormat::Text => {
            for tag in tags {
                println!("{:>6}  {:<24} {}", tag.id, tag.name, tag.path);
            }
        }
    }
    Ok(())
}

fn run_doc_cli(conn: &mut Connection, cli: DocCli) -> Result<(), TagDbError> {
    match cli.command {
        DocCommand::Add {
            path,
            title,
            md5,
            doi,
            journal,
            volume,
            number,
            pages,
            year,
            comment,
        } => {
            let journal_id = match journal {
                Some(name) => Some(journals::get_or_create(conn, &name)?.id),
                None => None,
            };
            if let Some(md5sum) = &md5 {
                if let Some(existing) = docs::find_by_md5(conn, md5sum)? {
                    log::warn!("md5 {} already registered as pdf id {}", md5sum, existing.id);
                }
            }
            let pdf = docs::register(
                conn,
                &docs::NewPdf {
                    path,
                    md5,
                    comment,
                    title,
                    doi,
                    journal_id,
                    volume,
                    number,
                    pages,
                    year,
                },
            )?;
            println!("Document registered: {}", pdf.id);
        }
        DocCommand::List => match cli.format {
            OutputFormat::Json => {
                let all = docs::list(conn)?;
                println!(
                    "{}",
                    serde_json::to_string_pretty(&all)
                        .map_err(|e| TagDbError::ValidationError(e.to_string()))?
                );
            }
            OutputFormat::Text => {
                for pdf in docs::list(conn)? {
                    println!(
                        "{:>6}  {}",
                        pdf.id,
                        pdf.title
                            .as_deref()
                            .or(pdf.path.as_deref())
                            .unwrap_or("<untitled>")
                    );
                }
            }
        },
        DocCommand::Show { id } => {
            let pdf = docs::get(conn, id)?;
            let doc_tags = docs::tags_of(conn, id)?;
            match cli.format {
                OutputFormat::Json => {
                    let view = serde_json::json!({ "pdf": pdf, "tags": doc_tags });
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&view)
                            .map_err(|e| TagDbError::ValidationError(e.to_string()))?
                    );
                }
                OutputFormat::Text => {
                    println!("{}", bib::citation(conn, id)?);
                    if let Some(path) = &pdf.path {
                        println!("file: {}", path);
                    }
                    if !doc_tags.is_empty() {
                        let names: Vec<&str> =
                            doc_tags.iter().map(|t| t.name.as_str()).collect();
                        println!("tags: {}", names.join(","));
                    }
                }
            }
        }
        DocCommand::Tag { id, tag } => {
            let tag = tags::get_by_name(conn, &tag)?;
            docs::add_tag(conn, id, tag.id)?;
            println!("Tagged document {} with '{}'", id, tag.name);
        }
        DocCommand::Untag { id, tag } => {
            let tag = tags::get_by_name(conn, &tag)?;
            docs::remove_tag(conn, id, tag.id)?;
            println!("Untagged document {} from '{}'", id, tag.name);
        }
        DocCommand::LinkVersion { id, older } => {
            docs::set_other_version(conn, id, older)?;
            println!("Linked document {} -> older version {}", id, older);
        }
        DocCommand::Complete { id } => {
            docs::set_metadata_complete(conn, id, true)?;
            println!("Document {} marked metadata-complete", id);
        }
    }
    Ok(())
}

fn run_person_cli(conn: &Connection, cli: PersonCli) -> Result<(), TagDbError> {
    match cli.command {
        PersonCommand::Add {
            name,
            email,
            institute,
        } => {
            let person = people::create(conn, &name, email.as_deref(), institute.as_deref())?;
            println!("Person added: {} ({})", person.name, person.id);
        }
        PersonCommand::List => {
            for person in people::list(conn)? {
                println!(
                    "{:>6}  {:<24} {}",
                    person.id,
                    person.name,
                    person.institute.as_deref().unwrap_or("")
                );
            }
        }
    }
    Ok(())
}

fn run_journal_cli(conn: &Connection, cli: JournalCli) -> Result<(), TagDbError> {
    match cli.command {
        JournalCommand::Add { name } => {
            let journal = journals::create(conn, &name)?;
            println!("Journal added: {} ({})", journal.name, journal.id);
        }
        JournalCommand::List => {
            for journal in journals::list(conn)? {
                println!("{:>6}  {}", journal.id, journal.name);
            }
        }
    }
    Ok(())
}

fn run_author_cli(conn: &Connection, cli: AuthorCli) -> Result<(), TagDbError> {
    match cli.command {
        AuthorCommand::Attach {
            doc,
            person,
            position,
        } => {
            people::attach_author(conn, doc, person, position)?;
            println!("Attached person {} to document {}", person, doc);
        }
    }
    Ok(())
}
