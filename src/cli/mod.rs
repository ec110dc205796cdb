//! CLI interface for docdex.
//!
//! Provides command-line argument parsing using clap.

use clap::{Parser, Subcommand};

use crate::index::{Audience, Detail, Style};

/// Command-line interface for docdex.
#[derive(Parser)]
#[command(name = "docdex")]
#[command(author, version, about = "Versioned documentation catalog", long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Record a documentation snippet in the catalog.
    Add {
        /// Identifier for the documentation artifact (e.g., "async-guide").
        file_name: String,

        /// Version the documentation applies to (e.g., "3.9.1").
        version: String,

        /// Programming language the documentation covers.
        language: String,

        /// Human-readable title, used for fuzzy search.
        #[arg(short, long)]
        title: Option<String>,

        /// Document author.
        #[arg(short, long)]
        author: Option<String>,

        /// Intended audience level.
        #[arg(long, value_enum)]
        audience: Option<Audience>,

        /// Detail level of the documentation.
        #[arg(long, value_enum)]
        detail: Option<Detail>,

        /// Explanation style.
        #[arg(long, value_enum)]
        style: Option<Style>,

        /// Comma-separated tags for additional classification.
        #[arg(short = 'T', long)]
        tags: Option<String>,

        /// Inline document content.
        #[arg(short, long, conflicts_with = "file")]
        content: Option<String>,

        /// Read content from file instead of stdin.
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Find records by file name at an exact (language, version) key.
    Search {
        /// File name to match against stored records.
        file_name: String,

        /// Exact version to look up (e.g., "3.9.1").
        version: String,

        /// Language bucket to search.
        language: String,

        /// Fuzzy title filter applied on top of the exact lookup.
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List every record in the catalog.
    List,

    /// Find all records for a language below a version bound.
    SearchRange {
        /// Language bucket to search.
        language: String,

        /// Exclusive upper version bound (e.g., "2.0.0").
        max_version: String,

        /// Fuzzy title filter applied on top of the range query.
        #[arg(short, long)]
        title: Option<String>,
    },
}
