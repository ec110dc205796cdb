use clap::Parser;
use docdex::catalog::AddRequest;
use docdex::cli::{Cli, Commands};
use docdex::commands::{self, RecordInfo};

fn print_record(info: &RecordInfo) {
    let display_title = info.title.as_deref().unwrap_or(&info.file_name);
    let tags = if info.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", info.tags.join(", "))
    };

    println!("{} {}: {}{}", info.language, info.version, display_title, tags);
    println!("  {}", info.path.display());
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Add {
            file_name,
            version,
            language,
            title,
            author,
            audience,
            detail,
            style,
            tags,
            content,
            file,
        }) => {
            let content = commands::read_content(content, file)?;
            let info = commands::add(AddRequest {
                file_name,
                version,
                language,
                content,
                title,
                author,
                audience,
                detail,
                style,
                tags: commands::parse_tags(tags),
            })?;

            println!("Added: {} {} ({})", info.file_name, info.version, info.language);
            println!("Path: {}", info.path.display());
            Ok(())
        }
        Some(Commands::Search {
            file_name,
            version,
            language,
            title,
        }) => {
            let results = commands::search(&file_name, &version, &language, title.as_deref())?;

            if results.is_empty() {
                println!("No matches found for '{file_name}'");
            } else {
                for info in &results {
                    print_record(info);
                }
                println!("{} result(s) found", results.len());
            }
            Ok(())
        }
        Some(Commands::List) => {
            let records = commands::list()?;

            if records.is_empty() {
                println!("No documents found.");
            } else {
                for info in &records {
                    print_record(info);
                }
            }
            Ok(())
        }
        Some(Commands::SearchRange {
            language,
            max_version,
            title,
        }) => {
            let results = commands::search_range(&language, &max_version, title.as_deref())?;

            if results.is_empty() {
                println!("No matches found for '{language}' below {max_version}");
            } else {
                for info in &results {
                    print_record(info);
                }
                println!("{} result(s) found", results.len());
            }
            Ok(())
        }
        None => {
            Cli::parse_from(["docdex", "--help"]);
            Ok(())
        }
    }
}
