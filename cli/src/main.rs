use anyhow::{Context, Result};
use boltprompt_core::bundle::{write_output, PromptBundle};
use boltprompt_core::config::Config;
use boltprompt_core::continue_prompt;
use boltprompt_core::logger::Logger;
use boltprompt_core::markdown::render_allowed_elements;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boltprompt", about = "Prints prompts for the in-browser coding assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the system prompt
    System {
        /// Working directory spliced into the prompt, ahead of config and env
        #[arg(long)]
        cwd: Option<String>,
        /// JSON config file with prompt inputs
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Emit a JSON bundle with both prompts
        #[arg(long)]
        json: bool,
    },
    /// Render the continue prompt
    Continue,
    /// List the allowed HTML elements
    Elements {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let rid = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(1).max(1);
    let log = Logger::stderr(rid);
    let env = |key: &str| std::env::var(key).ok();

    let stdout = io::stdout();
    if let Err(e) = run(cli.command, &log, &env, &mut stdout.lock()) {
        log.error("cli", "run", &format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(
    command: Command,
    log: &Logger,
    env: &dyn Fn(&str) -> Option<String>,
    stdout: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::System { cwd, config, out, json } => {
            let mut cfg = load_config(config.as_ref(), log, env)?;
            if let Some(dir) = cwd {
                cfg.work_dir = dir;
            }
            cfg.validate().context("invalid prompt inputs")?;

            let text = if json {
                let mut doc = PromptBundle::from_config(&cfg).to_json()?;
                doc.push('\n');
                doc
            } else {
                cfg.system_prompt()
            };
            log.info(
                "prompt",
                "build",
                &format!("{} bytes for {}", text.len(), cfg.work_dir),
            );
            emit(&text, out, log, stdout)
        }
        Command::Continue => emit(&format!("{}\n", continue_prompt()), None, log, stdout),
        Command::Elements { config } => {
            let cfg = load_config(config.as_ref(), log, env)?;
            let list = render_allowed_elements(cfg.allowed_html_elements.as_slice());
            emit(&format!("{list}\n"), None, log, stdout)
        }
    }
}

fn load_config(
    path: Option<&PathBuf>,
    log: &Logger,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<Config> {
    let cfg = match path {
        Some(p) => {
            log.info("config", "load", &p.display().to_string());
            Config::load(p).with_context(|| format!("loading {}", p.display()))?
        }
        None => Config::new(),
    };
    Ok(cfg.with_overrides(env))
}

/// Writes `text` byte for byte, to `out` when given and to stdout otherwise.
fn emit(text: &str, out: Option<PathBuf>, log: &Logger, stdout: &mut dyn Write) -> Result<()> {
    match out {
        Some(path) => {
            write_output(&path, text)?;
            log.info("output", "write", &path.display().to_string());
        }
        None => {
            stdout.write_all(text.as_bytes()).context("writing to stdout")?;
            stdout.flush().context("flushing stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boltprompt_core::config::ENV_WORK_DIR;
    use boltprompt_core::error::{ErrorCode, PromptError};
    use boltprompt_core::get_system_prompt;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn parses_system_with_flags() {
        let cli = Cli::try_parse_from([
            "boltprompt", "system", "--cwd", "/srv/app", "--out", "p.txt", "--json",
        ])
        .unwrap();
        match cli.command {
            Command::System { cwd, out, json, config } => {
                assert_eq!(cwd.as_deref(), Some("/srv/app"));
                assert_eq!(out, Some(PathBuf::from("p.txt")));
                assert!(json);
                assert!(config.is_none());
            }
            _ => panic!("expected system subcommand"),
        }
    }

    #[test]
    fn parses_continue_and_elements() {
        let cli = Cli::try_parse_from(["boltprompt", "continue"]).unwrap();
        assert!(matches!(cli.command, Command::Continue));

        let cli = Cli::try_parse_from(["boltprompt", "elements", "--config", "c.json"]).unwrap();
        assert!(matches!(cli.command, Command::Elements { config: Some(_) }));
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Cli::try_parse_from(["boltprompt"]).is_err());
    }

    struct Harness {
        logs: Rc<RefCell<String>>,
        stdout: Vec<u8>,
        env: HashMap<String, String>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                logs: Rc::new(RefCell::new(String::new())),
                stdout: Vec::new(),
                env: HashMap::new(),
            }
        }

        fn run(&mut self, args: &[&str]) -> Result<()> {
            let mut argv = vec!["boltprompt"];
            argv.extend_from_slice(args);
            let cli = Cli::try_parse_from(argv).unwrap();
            let log = Logger::new_for_test(1, Rc::clone(&self.logs));
            let env = self.env.clone();
            let lookup = move |key: &str| env.get(key).cloned();
            run(cli.command, &log, &lookup, &mut self.stdout)
        }

        fn stdout(&self) -> String {
            String::from_utf8(self.stdout.clone()).unwrap()
        }
    }

    fn write_config(dir: &TempDir, json: &str) -> String {
        let path = dir.path().join("boltprompt.json");
        fs::write(&path, json).unwrap();
        path.display().to_string()
    }

    #[test]
    fn system_to_stdout_matches_file_bytes() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("prompt.txt");
        let file_arg = file.display().to_string();

        let mut h = Harness::new();
        h.run(&["system"]).unwrap();
        h.run(&["system", "--out", &file_arg]).unwrap();

        assert_eq!(h.stdout(), get_system_prompt(None));
        assert_eq!(fs::read_to_string(&file).unwrap(), get_system_prompt(None));
        assert!(h.stdout().ends_with("</example>\n\n"));
        assert!(h.logs.borrow().contains("\"action\":\"write\""));
    }

    #[test]
    fn cwd_flag_beats_config_file_and_env() {
        let tmp = TempDir::new().unwrap();
        let cfg = write_config(&tmp, r#"{"work_dir": "/from/config"}"#);

        let mut h = Harness::new();
        h.env.insert(ENV_WORK_DIR.to_string(), "/from/env".to_string());
        h.run(&["system", "--config", &cfg, "--cwd", "/from/flag"]).unwrap();

        let out = h.stdout();
        assert!(out.contains("Current working directory is `/from/flag`."));
        assert!(!out.contains("/from/env"));
        assert!(!out.contains("/from/config"));
    }

    #[test]
    fn env_overrides_loaded_config() {
        let tmp = TempDir::new().unwrap();
        let cfg = write_config(
            &tmp,
            r#"{"work_dir": "/from/config", "modifications_tag_name": "cfg_changes"}"#,
        );

        let mut h = Harness::new();
        h.env.insert(ENV_WORK_DIR.to_string(), "/from/env".to_string());
        h.run(&["system", "--config", &cfg]).unwrap();

        let out = h.stdout();
        assert!(out.contains("Current working directory is `/from/env`."));
        assert!(out.contains("<cfg_changes> section"));
    }

    #[test]
    fn config_file_beats_defaults() {
        let tmp = TempDir::new().unwrap();
        let cfg = write_config(&tmp, r#"{"work_dir": "/from/config"}"#);

        let mut h = Harness::new();
        h.run(&["system", "--config", &cfg]).unwrap();
        assert!(h.stdout().contains("Current working directory is `/from/config`."));
    }

    #[test]
    fn relative_cwd_is_rejected() {
        let mut h = Harness::new();
        let err = h.run(&["system", "--cwd", "project"]).unwrap_err();
        let cause = err.downcast_ref::<PromptError>().unwrap();
        assert_eq!(cause.code(), &ErrorCode::InvalidWorkDir);
        assert!(h.stdout.is_empty());
    }

    #[test]
    fn json_flag_emits_bundle() {
        let mut h = Harness::new();
        h.run(&["system", "--json", "--cwd", "/srv/app"]).unwrap();

        let doc: serde_json::Value = serde_json::from_str(&h.stdout()).unwrap();
        assert_eq!(doc["work_dir"], "/srv/app");
        assert_eq!(doc["continue"], continue_prompt());
        assert_eq!(doc["system"], get_system_prompt(Some("/srv/app")));
    }

    #[test]
    fn continue_and_elements_end_with_newline() {
        let mut h = Harness::new();
        h.run(&["continue"]).unwrap();
        assert_eq!(h.stdout(), format!("{}\n", continue_prompt()));

        let mut h = Harness::new();
        h.run(&["elements"]).unwrap();
        assert!(h.stdout().starts_with("<a>, <b>, <blockquote>"));
        assert!(h.stdout().ends_with("<var>\n"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
