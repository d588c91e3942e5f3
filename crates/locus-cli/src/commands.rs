use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use locus_ident::Identifier;
use locus_loader::{Loader, LoaderConfig};
use serde::Serialize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Parse(args) => cmd_parse(args, cli.format),
        Command::Expand(args) => cmd_expand(args, cli.format),
        Command::Config(args) => cmd_config(args),
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct IdentifierView {
    identifier: String,
    #[serde(rename = "type")]
    kind: String,
    application: String,
    package: String,
    path: Vec<String>,
    name: String,
}

impl From<&Identifier> for IdentifierView {
    fn from(id: &Identifier) -> Self {
        Self {
            identifier: id.to_string(),
            kind: id.kind().to_string(),
            application: id.application().to_string(),
            package: id.package().to_string(),
            path: id.path().to_vec(),
            name: id.name().to_string(),
        }
    }
}

/// One sequence entry and what it produced.
#[derive(Debug, Serialize)]
struct Candidate {
    template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LoaderConfig> {
    match path {
        Some(path) => LoaderConfig::load(path)
            .with_context(|| format!("reading loader config {}", path.display())),
        None => Ok(LoaderConfig::default()),
    }
}

fn parse_all(raw: &[String]) -> anyhow::Result<Vec<IdentifierView>> {
    raw.iter()
        .map(|raw| {
            let id = Identifier::parse(raw).with_context(|| format!("parsing {raw:?}"))?;
            Ok(IdentifierView::from(&id))
        })
        .collect()
}

fn expand(config: &LoaderConfig, raw: &str) -> anyhow::Result<Vec<Candidate>> {
    let loader: Loader<()> = Loader::from_config(config)?;
    let identifier = Identifier::parse(raw).with_context(|| format!("parsing {raw:?}"))?;

    Ok(loader
        .sequence()
        .iter()
        .map(|template| match template.expand(&identifier) {
            Ok(candidate) => Candidate {
                template: template.to_string(),
                candidate: Some(candidate.to_string()),
                error: None,
            },
            Err(e) => Candidate {
                template: template.to_string(),
                candidate: None,
                error: Some(e.to_string()),
            },
        })
        .collect())
}

fn cmd_parse(args: ParseArgs, format: OutputFormat) -> anyhow::Result<()> {
    let views = parse_all(&args.identifiers)?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for view in &views {
        println!("{}", view.identifier.bold());
        println!("  type:        {}", view.kind.cyan());
        println!("  application: {}", view.application.cyan());
        println!("  package:     {}", view.package.cyan());
        println!("  path:        {}", view.path.join(".").cyan());
        println!("  name:        {}", view.name.yellow());
    }
    Ok(())
}

fn cmd_expand(args: ExpandArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if !args.templates.is_empty() {
        config.sequence = args.templates;
    }

    let candidates = expand(&config, &args.identifier)?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    for (i, entry) in candidates.iter().enumerate() {
        match (&entry.candidate, &entry.error) {
            (Some(candidate), _) => {
                println!("{:>3}. {} → {}", i + 1, entry.template.dimmed(), candidate.green())
            }
            (None, Some(error)) => {
                println!("{:>3}. {} → {}", i + 1, entry.template.dimmed(), error.red())
            }
            (None, None) => {}
        }
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn view_carries_every_field() {
        let views = parse_all(&["type://application/package.path.names".to_string()]).unwrap();
        assert_eq!(
            views,
            vec![IdentifierView {
                identifier: "type://application/package.path.name".into(),
                kind: "type".into(),
                application: "application".into(),
                package: "package".into(),
                path: vec!["path".into()],
                name: "name".into(),
            }]
        );
    }

    #[test]
    fn view_serializes_type_field() {
        let views = parse_all(&["core:database.table.default".to_string()]).unwrap();
        let json = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(json["type"], "core");
        assert_eq!(json["application"], "");
    }

    #[test]
    fn parse_all_reports_malformed_input() {
        let err = parse_all(&["core:a.b".to_string(), "broken".to_string()]).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn expand_with_default_sequence() {
        let candidates = expand(&LoaderConfig::default(), "view://admin/blog.posts.items").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].candidate.as_deref(),
            Some("view://admin/blog.posts.item")
        );
    }

    #[test]
    fn expand_reports_unparseable_candidates() {
        let config = LoaderConfig {
            sequence: vec![
                "core://framework/<Package>.<Name>".into(),
                "<Module>.<Name>".into(),
            ],
            ..Default::default()
        };
        let candidates = expand(&config, "view://admin/blog.post").unwrap();
        assert_eq!(
            candidates[0].candidate.as_deref(),
            Some("core://framework/blog.post")
        );
        assert!(candidates[1].candidate.is_none());
        assert!(candidates[1].error.is_some());
    }

    #[test]
    fn config_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sequence = [\"<Type>:<Package>.<Name>\"]").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.sequence, vec!["<Type>:<Package>.<Name>".to_string()]);
    }

    #[test]
    fn missing_config_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn no_config_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), LoaderConfig::default());
    }
}
