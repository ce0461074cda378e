use anyhow::{Context, Result, bail};
use pmd_config::Config;
use pmd_engine::{ParseOptions, Parser};
use pmd_syntax::{TokenKind, tokenize};
use std::{
    env,
    io::{self, Read, Write},
    path::PathBuf,
    process,
};

const USAGE: &str = "Usage: pmd-cli [--tokens] [--config <path>] <file | ->";

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    Html,
    Tokens,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    mode: Mode,
    config: Option<PathBuf>,
    /// `None` reads stdin.
    input: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut mode = Mode::Html;
    let mut config = None;
    let mut input = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tokens" => mode = Mode::Tokens,
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "-" if input.is_none() => input = Some(None),
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path if input.is_none() => input = Some(Some(PathBuf::from(path))),
            extra => bail!("unexpected argument {extra}"),
        }
    }

    let Some(input) = input else {
        bail!("no input given");
    };
    Ok(Args {
        mode,
        config,
        input,
    })
}

fn read_input(input: &Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            Ok(content)
        }
    }
}

fn load_options(config: &Option<PathBuf>) -> Result<ParseOptions> {
    let loaded = match config {
        Some(path) => {
            let path = Config::expand_path(path).unwrap_or_else(|| path.clone());
            let loaded = Config::load_from_path(&path)?;
            if loaded.is_none() {
                bail!("config file {} not found", path.display());
            }
            loaded
        }
        None => Config::load()?,
    };

    match loaded {
        Some(config) => Ok(config.parse_options()),
        None => {
            log::debug!(
                "no config at {}, using defaults",
                Config::config_path().display()
            );
            Ok(ParseOptions::default())
        }
    }
}

fn dump_tokens(content: &str, out: &mut impl Write) -> Result<()> {
    for token in tokenize(content) {
        match (token.kind, token.level) {
            (TokenKind::HeadingMarker, Some(level)) => writeln!(
                out,
                "{:>6} {:?}({level}) {:?}",
                token.offset, token.kind, token.text
            )?,
            _ => writeln!(out, "{:>6} {:?} {:?}", token.offset, token.kind, token.text)?,
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let content = read_input(&args.input)?;
    let mut stdout = io::stdout().lock();

    match args.mode {
        Mode::Tokens => dump_tokens(&content, &mut stdout)?,
        Mode::Html => {
            let parser = Parser::new(load_options(&args.config)?);
            writeln!(stdout, "{}", parser.parse(&content))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Result<Args> {
        let owned: Vec<String> = list.iter().map(|s| s.to_string()).collect();
        parse_args(&owned)
    }

    #[test]
    fn file_argument() {
        assert_eq!(
            args(&["notes.pmd"]).unwrap(),
            Args {
                mode: Mode::Html,
                config: None,
                input: Some(PathBuf::from("notes.pmd")),
            }
        );
    }

    #[test]
    fn stdin_tokens_with_config() {
        assert_eq!(
            args(&["--tokens", "--config", "pmd.toml", "-"]).unwrap(),
            Args {
                mode: Mode::Tokens,
                config: Some(PathBuf::from("pmd.toml")),
                input: None,
            }
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(args(&[]).is_err());
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--verbose", "a.pmd"]).is_err());
        assert!(args(&["a.pmd", "b.pmd"]).is_err());
    }

    #[test]
    fn token_dump_lists_every_token() {
        let mut out = Vec::new();
        dump_tokens("## Hi\n", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            concat!(
                "     0 HeadingMarker(2) \"##\"\n",
                "     2 Whitespace \" \"\n",
                "     3 Text \"Hi\"\n",
                "     5 Newline \"\\n\"\n",
                "     6 Eof \"\"\n",
            )
        );
    }
}
